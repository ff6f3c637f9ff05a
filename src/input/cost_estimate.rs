//! Code for reading the construction cost estimate from a CSV file.
use super::*;
use crate::cost_estimate::CostEstimate;
use crate::units::Money;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

const COST_ESTIMATE_FILE_NAME: &str = "cost_estimate.csv";

#[derive(PartialEq, Debug, Deserialize)]
struct LineItemRaw {
    line_item: String,
    value: Money,
}

/// Read the construction cost estimate for a variant.
///
/// # Arguments
///
/// * `variant_dir` - Folder containing variant input files
pub fn read_cost_estimate(variant_dir: &Path) -> Result<CostEstimate> {
    let file_path = variant_dir.join(COST_ESTIMATE_FILE_NAME);
    let line_items_csv = read_csv::<LineItemRaw>(&file_path)?;
    read_cost_estimate_from_iter(line_items_csv).with_context(|| input_err_msg(&file_path))
}

fn read_cost_estimate_from_iter<I>(iter: I) -> Result<CostEstimate>
where
    I: Iterator<Item = LineItemRaw>,
{
    let mut line_items = IndexMap::new();
    for item in iter {
        ensure!(
            item.value.is_finite(),
            "Value for line item '{}' must be a finite number",
            item.line_item
        );
        ensure!(
            line_items.insert(item.line_item.clone(), item.value).is_none(),
            "Duplicate line item '{}'",
            item.line_item
        );
    }

    Ok(CostEstimate { line_items })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost_estimate::TOTAL_FIRST_COST_LABEL;
    use crate::fixture::assert_error;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_read_cost_estimate() {
        let dir = tempdir().unwrap();
        {
            let mut file = File::create(dir.path().join(COST_ESTIMATE_FILE_NAME)).unwrap();
            writeln!(
                file,
                "line_item,value
Line Item SubTotal ($),81000
Contractor Overhead ($),9000
\"Cost Estimate Total ($)\",90000"
            )
            .unwrap();
        }

        let estimate = read_cost_estimate(dir.path()).unwrap();
        assert_eq!(estimate.line_items.len(), 3);
        assert_eq!(estimate.total_first_cost().unwrap(), Money(90_000.0));
        assert_eq!(
            estimate.line_items.keys().last().map(String::as_str),
            Some(TOTAL_FIRST_COST_LABEL)
        );
    }

    #[test]
    fn test_read_cost_estimate_duplicate() {
        let item = || LineItemRaw {
            line_item: "A".into(),
            value: Money(1.0),
        };
        assert_error!(
            read_cost_estimate_from_iter([item(), item()].into_iter()),
            "Duplicate line item 'A'"
        );
    }
}
