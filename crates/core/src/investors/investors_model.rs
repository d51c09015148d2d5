//! Investor domain models, as served by the investors API.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// One row of the investors list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvestorSummary {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub investor_type: String,
    pub country: String,
    pub date_added: NaiveDate,
    /// Authoritative total supplied by the service. Not derived from commitments.
    pub total_commitment: Decimal,
}

/// A single commitment of capital to an asset class.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Commitment {
    pub id: i64,
    pub asset_class: String,
    pub amount: Decimal,
    pub currency: String,
}

/// Investor summary plus the ordered list of that investor's commitments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvestorDetail {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub investor_type: String,
    pub country: String,
    pub date_added: NaiveDate,
    pub total_commitment: Decimal,
    #[serde(default)]
    pub commitments: Vec<Commitment>,
}

impl InvestorDetail {
    /// Returns the summary part of this detail record.
    pub fn summary(&self) -> InvestorSummary {
        InvestorSummary {
            id: self.id,
            name: self.name.clone(),
            investor_type: self.investor_type.clone(),
            country: self.country.clone(),
            date_added: self.date_added,
            total_commitment: self.total_commitment,
        }
    }

    /// Sum of the commitment amounts visible to the client.
    ///
    /// May differ from `total_commitment`, which stays authoritative.
    pub fn commitments_sum(&self) -> Result<Decimal> {
        self.commitments
            .iter()
            .try_fold(Decimal::ZERO, |acc, c| acc.checked_add(c.amount))
            .ok_or_else(|| {
                Error::Decode(format!(
                    "Commitments of investor {} sum out of range",
                    self.id
                ))
            })
    }
}
