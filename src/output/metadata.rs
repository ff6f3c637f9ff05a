//! The `metadata.toml` file, which records what was run and with which build of the program.
use crate::construction::Construction;
use crate::units::{KgCO2, Money};
use crate::variant::{LaborCarbonPolicy, Variant};
use anyhow::{Context, Result};
use chrono::Local;
use platform_info::{PlatformInfo, PlatformInfoAPI, UNameAPI};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// The output file name for metadata
pub const METADATA_FILE_NAME: &str = "metadata.toml";

/// Information about the program build via `built` crate
mod built_info {
    // The file has been placed there by the build script.
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

/// The short git hash of the build, marked if there were uncommitted changes
fn get_git_hash() -> String {
    match (built_info::GIT_COMMIT_HASH_SHORT, built_info::GIT_DIRTY) {
        (Some(hash), Some(true)) => format!("{hash}-dirty"),
        (Some(hash), _) => hash.into(),
        (None, _) => "unknown".into(),
    }
}

#[derive(Serialize)]
struct Metadata<'a> {
    run: RunMetadata<'a>,
    variant: VariantMetadata<'a>,
    program: ProgramMetadata,
    platform: PlatformMetadata,
}

/// When and on what the calculation was run
#[derive(Serialize)]
struct RunMetadata<'a> {
    /// Path to the variant folder
    variant_path: &'a Path,
    /// The date and time on which the run started
    datetime: String,
}

/// A summary of the variant's inputs, for checking results against
#[derive(Serialize)]
struct VariantMetadata<'a> {
    name: &'a str,
    analysis_duration: u32,
    country: &'a str,
    grid_region: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_forecast_year: Option<u32>,
    labor_carbon: LaborCarbonPolicy,
    first_cost: Money,
    num_constructions: usize,
    construction_area_ft2: f64,
    construction_kg_co2: KgCO2,
    num_equipment: usize,
    num_performance_measures: usize,
    num_nonperformance_measures: usize,
}

impl<'a> VariantMetadata<'a> {
    fn new(variant: &'a Variant) -> Self {
        let constructions = &variant.constructions;
        Self {
            name: variant.name(),
            analysis_duration: variant.analysis_duration(),
            country: &variant.parameters.country,
            grid_region: &variant.grid_region.region_code,
            first_forecast_year: variant.grid_region.first_year(),
            labor_carbon: variant.costing().labor_carbon,
            first_cost: variant.first_cost,
            num_constructions: constructions.len(),
            construction_area_ft2: constructions.iter().map(Construction::quantity_ft2).sum(),
            construction_kg_co2: constructions.iter().map(Construction::co2_kg).sum(),
            num_equipment: variant.equipment.len(),
            num_performance_measures: variant.measures.performance_measures().len(),
            num_nonperformance_measures: variant.measures.nonperformance_measures().len(),
        }
    }
}

/// The build of the program which produced the results
#[derive(Serialize)]
struct ProgramMetadata {
    name: &'static str,
    version: &'static str,
    git_commit_hash: String,
    target: &'static str,
    is_debug: bool,
    rustc_version: &'static str,
    build_time_utc: &'static str,
}

impl ProgramMetadata {
    fn new() -> Self {
        Self {
            name: built_info::PKG_NAME,
            version: built_info::PKG_VERSION,
            git_commit_hash: get_git_hash(),
            target: built_info::TARGET,
            is_debug: built_info::DEBUG,
            rustc_version: built_info::RUSTC_VERSION,
            build_time_utc: built_info::BUILT_TIME_UTC,
        }
    }
}

/// The operating system the program ran on
#[derive(Serialize)]
struct PlatformMetadata {
    osname: String,
    release: String,
    machine: String,
}

impl PlatformMetadata {
    fn new() -> Result<Self> {
        let info = PlatformInfo::new()
            .map_err(|err| anyhow::anyhow!("Unable to determine platform info: {err}"))?;
        Ok(Self {
            osname: info.osname().to_string_lossy().into(),
            release: info.release().to_string_lossy().into(),
            machine: info.machine().to_string_lossy().into(),
        })
    }
}

/// Write metadata for a run of the given variant to the output folder
pub fn write_metadata(output_path: &Path, variant: &Variant) -> Result<()> {
    let metadata = Metadata {
        run: RunMetadata {
            variant_path: &variant.variant_path,
            datetime: Local::now().to_rfc2822(),
        },
        variant: VariantMetadata::new(variant),
        program: ProgramMetadata::new(),
        platform: PlatformMetadata::new()?,
    };
    let file_path = output_path.join(METADATA_FILE_NAME);
    fs::write(&file_path, toml::to_string(&metadata)?)
        .with_context(|| format!("Could not write {}", file_path.display()))?;

    Ok(())
}
