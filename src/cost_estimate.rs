//! The construction cost estimate produced alongside the energy simulation.
use crate::units::Money;
use anyhow::{Context, Result};
use indexmap::IndexMap;

/// The label of the line item holding the total first cost of the envelope
pub const TOTAL_FIRST_COST_LABEL: &str = "Cost Estimate Total ($)";

/// Line items of a construction cost estimate, in input order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CostEstimate {
    /// Cost for each line item, keyed by label
    pub line_items: IndexMap<String, Money>,
}

impl CostEstimate {
    /// The total first cost of the building envelope.
    ///
    /// The cost estimate cannot be used without this line item, so its absence is an error.
    pub fn total_first_cost(&self) -> Result<Money> {
        self.line_items
            .get(TOTAL_FIRST_COST_LABEL)
            .copied()
            .with_context(|| {
                format!("Could not find '{TOTAL_FIRST_COST_LABEL}' in the construction cost estimate")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::assert_error;
    use indexmap::indexmap;

    #[test]
    fn test_total_first_cost() {
        let estimate = CostEstimate {
            line_items: indexmap! {
                "Line Item SubTotal ($)".to_string() => Money(90_000.0),
                TOTAL_FIRST_COST_LABEL.to_string() => Money(100_000.0),
            },
        };
        assert_eq!(estimate.total_first_cost().unwrap(), Money(100_000.0));
    }

    #[test]
    fn test_total_first_cost_missing() {
        assert_error!(
            CostEstimate::default().total_first_cost(),
            "Could not find 'Cost Estimate Total ($)' in the construction cost estimate"
        );
    }
}
