//! Code for reading a grid region's CO2 forecast from a CSV file.
use super::*;
use crate::grid_region::{GridRegion, HourlyCO2Factors};
use crate::units::KgCO2PerMegawattHour;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const GRID_REGIONS_DIR_NAME: &str = "grid_regions";

/// One hourly CO2 factor for one forecast year
#[derive(PartialEq, Debug, Deserialize)]
struct GridFactorRaw {
    year: u32,
    hour: u32,
    co2_factor: KgCO2PerMegawattHour,
}

/// Get the path to the forecast file for a grid region
pub fn get_grid_region_file_path(variant_dir: &Path, region_code: &str) -> PathBuf {
    variant_dir
        .join(GRID_REGIONS_DIR_NAME)
        .join(format!("{region_code}.csv"))
}

/// Read the CO2 forecast for a grid region.
///
/// # Arguments
///
/// * `variant_dir` - Folder containing variant input files
/// * `region_code` - The code of the grid region (e.g. "NEWEc")
pub fn read_grid_region(variant_dir: &Path, region_code: &str) -> Result<GridRegion> {
    let file_path = get_grid_region_file_path(variant_dir, region_code);
    ensure!(
        file_path.is_file(),
        "No forecast file found for grid region '{region_code}' (expected {})",
        file_path.display()
    );

    let factors_csv = read_csv::<GridFactorRaw>(&file_path)?;
    let hourly_co2_factors =
        read_grid_factors_from_iter(factors_csv).with_context(|| input_err_msg(&file_path))?;

    Ok(GridRegion {
        region_code: region_code.to_string(),
        hourly_co2_factors,
    })
}

fn read_grid_factors_from_iter<I>(iter: I) -> Result<HourlyCO2Factors>
where
    I: Iterator<Item = GridFactorRaw>,
{
    let mut by_year: BTreeMap<u32, BTreeMap<u32, KgCO2PerMegawattHour>> = BTreeMap::new();
    for factor in iter {
        ensure!(
            factor.co2_factor.is_finite(),
            "CO2 factor for year {}, hour {} must be a finite number",
            factor.year,
            factor.hour
        );
        ensure!(
            by_year
                .entry(factor.year)
                .or_default()
                .insert(factor.hour, factor.co2_factor)
                .is_none(),
            "Duplicate CO2 factor for year {}, hour {}",
            factor.year,
            factor.hour
        );
    }

    by_year
        .into_iter()
        .map(|(year, hours)| -> Result<_> {
            // Hours must run from zero with no gaps
            ensure!(
                hours.keys().copied().eq((0..).take(hours.len())),
                "Hours for year {year} must be contiguous and start at 0"
            );

            Ok((year, hours.into_values().collect()))
        })
        .collect()
}
