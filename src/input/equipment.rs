//! Code for reading the equipment CSV file.
use super::*;
use crate::equipment::{Equipment, EquipmentCollection};
use std::path::Path;

const EQUIPMENT_FILE_NAME: &str = "equipment.csv";

/// Read the equipment used in a variant.
///
/// # Arguments
///
/// * `variant_dir` - Folder containing variant input files
pub fn read_equipment(variant_dir: &Path) -> Result<EquipmentCollection> {
    let file_path = variant_dir.join(EQUIPMENT_FILE_NAME);
    let equipment_csv = read_csv::<Equipment>(&file_path)?;
    read_equipment_from_iter(equipment_csv).with_context(|| input_err_msg(&file_path))
}

fn read_equipment_from_iter<I>(iter: I) -> Result<EquipmentCollection>
where
    I: Iterator<Item = Equipment>,
{
    let equipment = read_catalog_from_iter(iter)?;
    for item in equipment.iter() {
        ensure!(
            item.cost.is_finite(),
            "Cost for equipment {} must be a finite number",
            item.name
        );
    }

    Ok(equipment)
}
