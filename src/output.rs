//! The module responsible for writing output data to disk.
use crate::adorb::{AdorbCostTable, AdorbResults, CostStreams};
use crate::grid_region::GridRegion;
use crate::log::{LOG_ERROR_FILE_NAME, LOG_INFO_FILE_NAME};
use crate::schedule::YearlyCostEvent;
use crate::units::{KgCO2, Money};
use crate::variant::Variant;
use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

pub mod metadata;
use metadata::{METADATA_FILE_NAME, write_metadata};

/// The output file name for the ADORB cost table
const ADORB_COSTS_FILE_NAME: &str = "adorb_costs.csv";

/// The output file name for maintenance events
const MAINTENANCE_EVENTS_FILE_NAME: &str = "debug_maintenance_events.csv";

/// The output file name for embodied CO2 events
const EMBODIED_CO2_EVENTS_FILE_NAME: &str = "debug_embodied_co2_events.csv";

/// The output file name for the electricity CO2 trajectory
const ELECTRIC_CO2_FILE_NAME: &str = "debug_electric_co2.csv";

/// Every file a run may write to its output folder
const OUTPUT_FILE_NAMES: [&str; 7] = [
    ADORB_COSTS_FILE_NAME,
    METADATA_FILE_NAME,
    LOG_INFO_FILE_NAME,
    LOG_ERROR_FILE_NAME,
    MAINTENANCE_EVENTS_FILE_NAME,
    EMBODIED_CO2_EVENTS_FILE_NAME,
    ELECTRIC_CO2_FILE_NAME,
];

/// Get the default output directory for the variant at the specified path.
///
/// This is a folder named after the variant folder, inside `results_dir`.
pub fn get_output_dir(results_dir: &Path, variant_dir: &Path) -> Result<PathBuf> {
    let variant_dir = variant_dir
        .canonicalize() // canonicalise in case the user has specified "."
        .context("Could not resolve path to variant")?;

    let variant_name = variant_dir
        .file_name()
        .context("Variant cannot be in root folder")?;

    Ok(results_dir.join(variant_name))
}

/// Create a new output directory, or prepare an existing one for reuse.
///
/// An existing directory which is not empty is only reused if `allow_overwrite` is true. In that
/// case, any files left by a previous run are removed so that no stale results remain. Other
/// files are left untouched.
///
/// # Returns
///
/// True if an existing non-empty directory will be overwritten, false otherwise.
pub fn create_output_directory(output_dir: &Path, allow_overwrite: bool) -> Result<bool> {
    if !output_dir.is_dir() {
        // Try to create the directory, with parents
        fs::create_dir_all(output_dir)?;
        return Ok(false);
    }

    let mut previous_outputs = Vec::new();
    let mut is_empty = true;
    for entry in output_dir.read_dir()? {
        let entry = entry?;
        is_empty = false;
        let is_output = entry
            .file_name()
            .to_str()
            .is_some_and(|name| OUTPUT_FILE_NAMES.contains(&name));
        if is_output && entry.file_type()?.is_file() {
            previous_outputs.push(entry.path());
        }
    }

    if is_empty {
        return Ok(false);
    }

    ensure!(
        allow_overwrite,
        "Output folder already exists and is not empty. Use --overwrite to replace its results."
    );

    for file_path in previous_outputs {
        fs::remove_file(&file_path)
            .with_context(|| format!("Could not remove {}", file_path.display()))?;
    }

    Ok(true)
}

/// Represents a row in the maintenance and embodied CO2 events debug files
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct EventRow<T> {
    year: u32,
    amount: T,
}

impl<T: Copy> From<&YearlyCostEvent<T>> for EventRow<T> {
    fn from(event: &YearlyCostEvent<T>) -> Self {
        Self {
            year: event.year,
            amount: event.amount,
        }
    }
}

/// Represents a row in the electricity CO2 debug file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct ElectricCO2Row {
    forecast_year: u32,
    analysis_year: u32,
    kg_co2: KgCO2,
}

/// Write the ADORB cost table to the specified CSV file
pub fn write_adorb_costs(file_path: &Path, table: &AdorbCostTable) -> Result<()> {
    let mut writer = csv::Writer::from_path(file_path)
        .with_context(|| format!("Could not create {}", file_path.display()))?;
    for row in table.rows() {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// For writing the intermediate data of the calculation
struct DebugDataWriter {
    maintenance_writer: csv::Writer<File>,
    embodied_co2_writer: csv::Writer<File>,
    electric_co2_writer: csv::Writer<File>,
}

impl DebugDataWriter {
    /// Open CSV files to write debug info to
    ///
    /// # Arguments
    ///
    /// * `output_path` - Folder where files will be saved
    fn create(output_path: &Path) -> Result<Self> {
        let new_writer = |file_name| {
            let file_path = output_path.join(file_name);
            csv::Writer::from_path(file_path)
        };

        Ok(Self {
            maintenance_writer: new_writer(MAINTENANCE_EVENTS_FILE_NAME)?,
            embodied_co2_writer: new_writer(EMBODIED_CO2_EVENTS_FILE_NAME)?,
            electric_co2_writer: new_writer(ELECTRIC_CO2_FILE_NAME)?,
        })
    }

    /// Write maintenance and embodied CO2 events
    fn write_streams(&mut self, streams: &CostStreams) -> Result<()> {
        for event in &streams.maintenance {
            self.maintenance_writer.serialize(EventRow::<Money>::from(event))?;
        }
        for event in &streams.embodied_co2 {
            self.embodied_co2_writer.serialize(EventRow::<KgCO2>::from(event))?;
        }

        Ok(())
    }

    /// Write the electricity CO2 for each forecast year
    fn write_electric_co2<I>(&mut self, iter: I) -> Result<()>
    where
        I: Iterator<Item = (u32, KgCO2)>,
    {
        for (analysis_year, (forecast_year, kg_co2)) in (0..).zip(iter) {
            let row = ElectricCO2Row {
                forecast_year,
                analysis_year,
                kg_co2,
            };
            self.electric_co2_writer.serialize(row)?;
        }

        Ok(())
    }

    /// Flush the underlying streams
    fn flush(&mut self) -> Result<()> {
        self.maintenance_writer.flush()?;
        self.embodied_co2_writer.flush()?;
        self.electric_co2_writer.flush()?;

        Ok(())
    }
}

/// An object for writing the results of an ADORB calculation to file
pub struct DataWriter {
    output_path: PathBuf,
    debug_writer: Option<DebugDataWriter>,
}

impl DataWriter {
    /// Prepare to write output data
    ///
    /// # Arguments
    ///
    /// * `output_path` - Folder where files will be saved
    /// * `variant` - The variant being run (summarised in the metadata)
    /// * `save_debug_info` - Whether to include extra CSV files for debugging
    pub fn create(output_path: &Path, variant: &Variant, save_debug_info: bool) -> Result<Self> {
        write_metadata(output_path, variant).context("Failed to save metadata")?;

        let debug_writer = if save_debug_info {
            // Create debug CSV files
            Some(DebugDataWriter::create(output_path)?)
        } else {
            None
        };

        Ok(Self {
            output_path: output_path.to_path_buf(),
            debug_writer,
        })
    }

    /// Write the cost table, plus intermediate data if debugging is enabled
    pub fn write_results(&mut self, results: &AdorbResults, grid_region: &GridRegion) -> Result<()> {
        write_adorb_costs(&self.output_path.join(ADORB_COSTS_FILE_NAME), &results.table)?;

        if let Some(ref mut wtr) = self.debug_writer {
            wtr.write_streams(&results.streams)?;
            wtr.write_electric_co2(
                grid_region
                    .iter_years()
                    .map(|(year, _)| year)
                    .zip(results.operational.electric_co2_trajectory.iter().copied()),
            )?;
        }

        Ok(())
    }

    /// Flush the underlying streams
    pub fn flush(&mut self) -> Result<()> {
        if let Some(ref mut wtr) = self.debug_writer {
            wtr.flush()?;
        }

        Ok(())
    }
}
