//! Models derived from an investor's commitments.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::ALL_ASSET_CLASSES;

/// Sum of an investor's commitments in one asset class.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssetClassSummary {
    pub name: String,
    pub total: Decimal,
}

/// Active filter over the commitments grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum AssetClassFilter {
    /// No filtering.
    #[default]
    All,
    /// Only commitments whose asset class equals this name.
    AssetClass(String),
}

impl AssetClassFilter {
    /// Parses a filter name. The sentinel `"All"` means no filtering.
    pub fn from_name(name: &str) -> Self {
        if name == ALL_ASSET_CLASSES {
            AssetClassFilter::All
        } else {
            AssetClassFilter::AssetClass(name.to_string())
        }
    }

    pub fn name(&self) -> &str {
        match self {
            AssetClassFilter::All => ALL_ASSET_CLASSES,
            AssetClassFilter::AssetClass(name) => name,
        }
    }

    /// Whether a commitment in `asset_class` passes this filter.
    pub fn matches(&self, asset_class: &str) -> bool {
        match self {
            AssetClassFilter::All => true,
            AssetClassFilter::AssetClass(name) => name == asset_class,
        }
    }
}

impl fmt::Display for AssetClassFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry of the filter bar: the filter it selects and the total shown on it.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOption {
    pub filter: AssetClassFilter,
    pub total: Decimal,
}
