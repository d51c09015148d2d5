//! Group-and-sum and filtering over an investor's commitments.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::errors::{Error, Result};
use crate::investors::{Commitment, InvestorDetail};

use super::{AssetClassFilter, AssetClassSummary, FilterOption};

/// Groups commitments by asset class and sums their amounts.
///
/// Output has one entry per distinct asset class, sorted by total descending.
/// Equal totals keep the order in which their asset class first appeared.
/// Fails with [`Error::Decode`] when a class total leaves the `Decimal` range.
pub fn summarize_by_asset_class(commitments: &[Commitment]) -> Result<Vec<AssetClassSummary>> {
    let mut summaries: Vec<AssetClassSummary> = Vec::new();
    let mut index_by_class: HashMap<&str, usize> = HashMap::new();

    for commitment in commitments {
        match index_by_class.get(commitment.asset_class.as_str()) {
            Some(&index) => {
                let summary = &mut summaries[index];
                summary.total = summary
                    .total
                    .checked_add(commitment.amount)
                    .ok_or_else(|| {
                        Error::Decode(format!(
                            "Total for asset class '{}' is out of range",
                            summary.name
                        ))
                    })?;
            }
            None => {
                index_by_class.insert(commitment.asset_class.as_str(), summaries.len());
                summaries.push(AssetClassSummary {
                    name: commitment.asset_class.clone(),
                    total: commitment.amount,
                });
            }
        }
    }

    // Vec::sort_by is stable, which keeps first-encounter order on ties
    summaries.sort_by(|a, b| b.total.cmp(&a.total));
    Ok(summaries)
}

/// Returns the commitments that pass `filter`, in their original order.
///
/// A filter naming an asset class with no commitments yields an empty list.
pub fn filter_by_asset_class(
    commitments: &[Commitment],
    filter: &AssetClassFilter,
) -> Vec<Commitment> {
    commitments
        .iter()
        .filter(|c| filter.matches(&c.asset_class))
        .cloned()
        .collect()
}

/// Builds the filter bar for an investor.
///
/// The leading `All` entry carries the service-supplied `total_commitment`;
/// the remaining entries follow [`summarize_by_asset_class`].
pub fn filter_options(detail: &InvestorDetail) -> Result<Vec<FilterOption>> {
    let mut options = vec![FilterOption {
        filter: AssetClassFilter::All,
        total: detail.total_commitment,
    }];
    options.extend(
        summarize_by_asset_class(&detail.commitments)?
            .into_iter()
            .map(|summary| FilterOption {
                filter: AssetClassFilter::AssetClass(summary.name),
                total: summary.total,
            }),
    );
    Ok(options)
}

/// Total of all summaries. Equals the sum of the commitment amounts they came from.
pub fn summaries_total(summaries: &[AssetClassSummary]) -> Result<Decimal> {
    summaries
        .iter()
        .try_fold(Decimal::ZERO, |acc, s| acc.checked_add(s.total))
        .ok_or_else(|| Error::Decode("Total of asset class summaries is out of range".to_string()))
}

/// Rejects a detail record whose commitment totals cannot be represented.
///
/// Checks every per class total, their grand total and the plain sum of the
/// amounts, so the derived views built from an accepted record cannot fail.
pub fn validate_commitment_totals(detail: &InvestorDetail) -> Result<()> {
    summaries_total(&summarize_by_asset_class(&detail.commitments)?)?;
    detail.commitments_sum()?;
    Ok(())
}
