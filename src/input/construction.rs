//! Code for reading constructions and their quantities from CSV files.
use super::*;
use crate::construction::{Construction, ConstructionCollection, with_quantities_ft2};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const CONSTRUCTIONS_FILE_NAME: &str = "constructions.csv";
const CONSTRUCTION_QUANTITIES_FILE_NAME: &str = "construction_quantities.csv";

/// The area of a construction in the building, as reported by the energy model
#[derive(PartialEq, Debug, Deserialize)]
struct ConstructionQuantityRaw {
    name: String,
    quantity_ft2: f64,
}

/// Read constructions for a variant, with their areas.
///
/// # Arguments
///
/// * `variant_dir` - Folder containing variant input files
///
/// # Returns
///
/// The variant's constructions, each with its area set, or an error.
pub fn read_constructions(variant_dir: &Path) -> Result<ConstructionCollection> {
    let file_path = variant_dir.join(CONSTRUCTIONS_FILE_NAME);
    let constructions_csv = read_csv::<Construction>(&file_path)?;
    let constructions = read_constructions_from_iter(constructions_csv)
        .with_context(|| input_err_msg(&file_path))?;

    let file_path = variant_dir.join(CONSTRUCTION_QUANTITIES_FILE_NAME);
    let quantities_csv = read_csv::<ConstructionQuantityRaw>(&file_path)?;
    let quantities =
        read_quantities_from_iter(quantities_csv).with_context(|| input_err_msg(&file_path))?;

    with_quantities_ft2(&constructions, &quantities).with_context(|| input_err_msg(&file_path))
}

fn read_constructions_from_iter<I>(iter: I) -> Result<ConstructionCollection>
where
    I: Iterator<Item = Construction>,
{
    let constructions = read_catalog_from_iter(iter)?;
    for construction in constructions.iter() {
        ensure!(
            construction.cost_per_m2.is_finite() && construction.co2_kg_per_m2.is_finite(),
            "Costs and CO2 values for construction {} must be finite numbers",
            construction.name
        );
    }

    Ok(constructions)
}

fn read_quantities_from_iter<I>(iter: I) -> Result<HashMap<String, f64>>
where
    I: Iterator<Item = ConstructionQuantityRaw>,
{
    let mut quantities = HashMap::new();
    for quantity in iter {
        ensure!(
            quantity.quantity_ft2.is_finite() && quantity.quantity_ft2 >= 0.0,
            "Quantity for construction {} must be a finite number greater than or equal to zero",
            quantity.name
        );
        ensure!(
            quantities
                .insert(quantity.name.clone(), quantity.quantity_ft2)
                .is_none(),
            "Duplicate quantity for construction {}",
            quantity.name
        );
    }

    Ok(quantities)
}
