//! Code for loading building variants.
use crate::construction::ConstructionCollection;
use crate::cost_estimate::CostEstimate;
use crate::energy_results::EnergyResults;
use crate::equipment::EquipmentCollection;
use crate::grid_region::GridRegion;
use crate::input::construction::read_constructions;
use crate::input::cost_estimate::read_cost_estimate;
use crate::input::energy_results::read_energy_results;
use crate::input::equipment::read_equipment;
use crate::input::grid_region::{get_grid_region_file_path, read_grid_region};
use crate::input::input_err_msg;
use crate::input::measure::read_measures;
use crate::input::national_emissions::{get_national_emissions, read_national_emissions};
use crate::measure::MeasureCollection;
use crate::national_emissions::NationalEmissions;
use crate::units::{KgCO2PerMoney, Money};
use anyhow::{Context, Result, ensure};
use itertools::Itertools;
use std::path::{Path, PathBuf};

pub mod parameters;
pub use parameters::{CostingParameters, LaborCarbonPolicy, VariantParameters};

/// A single building design, with everything needed to calculate its ADORB costs
#[derive(Debug, Clone)]
pub struct Variant {
    /// Path to the variant folder
    pub variant_path: PathBuf,
    /// Parameters from the variant file
    pub parameters: VariantParameters,
    /// Simulated energy use
    pub energy_results: EnergyResults,
    /// Constructions, with their areas
    pub constructions: ConstructionCollection,
    /// Equipment
    pub equipment: EquipmentCollection,
    /// One-time carbon reduction measures
    pub measures: MeasureCollection,
    /// Grid CO2 forecast for the variant's region
    pub grid_region: GridRegion,
    /// Emissions intensity of the variant's country
    pub national_emissions: NationalEmissions,
    /// The construction cost estimate
    pub cost_estimate: CostEstimate,
    /// Total first cost of the building envelope (from the cost estimate)
    pub first_cost: Money,
}

impl Variant {
    /// Read a variant from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `variant_dir` - Folder containing variant input files
    pub fn from_path<P: AsRef<Path>>(variant_dir: P) -> Result<Variant> {
        let variant_dir = variant_dir.as_ref();
        let parameters = VariantParameters::from_path(variant_dir)?;
        let duration = parameters.analysis_duration;

        let energy_results = read_energy_results(variant_dir)?;
        let constructions = read_constructions(variant_dir)?;
        let equipment = read_equipment(variant_dir)?;
        let measures = read_measures(variant_dir, duration)?;

        let grid_region = read_grid_region(variant_dir, &parameters.grid_region)?;
        check_grid_forecast(&grid_region, duration).with_context(|| {
            input_err_msg(get_grid_region_file_path(variant_dir, &parameters.grid_region))
        })?;

        let national_emissions_map = read_national_emissions(variant_dir)?;
        let national_emissions =
            get_national_emissions(&national_emissions_map, &parameters.country)?.clone();

        let cost_estimate = read_cost_estimate(variant_dir)?;
        let first_cost = cost_estimate.total_first_cost()?;

        Ok(Variant {
            variant_path: variant_dir.to_path_buf(),
            parameters,
            energy_results,
            constructions,
            equipment,
            measures,
            grid_region,
            national_emissions,
            cost_estimate,
            first_cost,
        })
    }

    /// The name of the variant
    pub fn name(&self) -> &str {
        &self.parameters.name
    }

    /// The number of years over which costs are evaluated
    pub fn analysis_duration(&self) -> u32 {
        self.parameters.analysis_duration
    }

    /// Cost weighting and discounting parameters
    pub fn costing(&self) -> &CostingParameters {
        &self.parameters.costing
    }

    /// Embodied carbon per dollar spent in the variant's country
    pub fn kg_co2_per_usd(&self) -> KgCO2PerMoney {
        self.national_emissions.kg_co2_per_usd
    }
}

/// Check that the grid forecast can be used for the analysis.
///
/// Forecast years must be consecutive and there must be a value for every analysis year from 0 to
/// `analysis_duration` inclusive.
fn check_grid_forecast(grid_region: &GridRegion, analysis_duration: u32) -> Result<()> {
    ensure!(
        grid_region
            .hourly_co2_factors
            .keys()
            .tuple_windows()
            .all(|(a, b)| *b == a + 1),
        "Forecast years for grid region {} must be consecutive",
        grid_region.region_code
    );

    let required = analysis_duration as usize + 1;
    ensure!(
        grid_region.num_years() >= required,
        "Forecast for grid region {} covers {} years, but {required} are required for an \
        analysis duration of {analysis_duration} years",
        grid_region.region_code,
        grid_region.num_years()
    );

    Ok(())
}
