//! Defines the `VariantParameters` struct, which represents the contents of `variant.toml`.
use crate::fuel::{Fuel, FuelType};
use crate::input::{deserialise_proportion, input_err_msg, read_toml};
use crate::units::{Dimensionless, KgCO2PerTherm, Money, MoneyPerKgCO2, MoneyPerWatt, Watts};
use anyhow::{Context, Result, ensure};
use log::warn;
use serde::Deserialize;
use serde_string_enum::{DeserializeLabeledStringEnum, SerializeLabeledStringEnum};
use std::path::Path;

const VARIANT_PARAMETERS_FILE_NAME: &str = "variant.toml";

macro_rules! define_unit_param_default {
    ($name:ident, $type: ty, $value: expr) => {
        fn $name() -> $type {
            <$type>::new($value)
        }
    };
}

macro_rules! define_param_default {
    ($name:ident, $type: ty, $value: expr) => {
        fn $name() -> $type {
            $value
        }
    };
}

define_param_default!(default_direct_discount_rate, Dimensionless, Dimensionless(0.02));
define_param_default!(default_carbon_discount_rate, Dimensionless, Dimensionless(0.075));
define_param_default!(default_embodied_discount_rate, Dimensionless, Dimensionless(0.0));
define_unit_param_default!(default_carbon_price, MoneyPerKgCO2, 0.25);
define_unit_param_default!(default_embodied_factor, MoneyPerKgCO2, 0.75);
define_unit_param_default!(default_gas_kg_co2_per_therm, KgCO2PerTherm, 12.7);
define_param_default!(default_transition_years, u32, 30);
define_unit_param_default!(default_national_transition_cost, Money, 4_500_000_000_000.0);
define_param_default!(default_nameplate_capacity_increase_gw, f64, 1_600.0);

/// How the labour share of a cost is treated when converting dollars to embodied carbon
#[derive(
    SerializeLabeledStringEnum, DeserializeLabeledStringEnum, Debug, Clone, Copy, PartialEq, Default,
)]
pub enum LaborCarbonPolicy {
    /// Labour dollars are converted at the national emissions factor, like materials
    #[default]
    #[string = "national_factor"]
    NationalFactor,
    /// Only the material share of a cost gives rise to embodied carbon
    #[string = "excluded"]
    Excluded,
}

/// Parameters controlling how the cost streams are weighted and discounted
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CostingParameters {
    /// Discount rate for direct (monetary) costs: energy, maintenance and grid transition
    #[serde(default = "default_direct_discount_rate")]
    pub direct_discount_rate: Dimensionless,
    /// Discount rate for operational carbon costs
    #[serde(default = "default_carbon_discount_rate")]
    pub carbon_discount_rate: Dimensionless,
    /// Discount rate for embodied carbon costs
    #[serde(default = "default_embodied_discount_rate")]
    pub embodied_discount_rate: Dimensionless,
    /// The price applied to operational CO2 emissions
    #[serde(default = "default_carbon_price")]
    pub carbon_price: MoneyPerKgCO2,
    /// The price applied to embodied CO2 emissions
    #[serde(default = "default_embodied_factor")]
    pub embodied_factor: MoneyPerKgCO2,
    /// CO2 emitted per therm of natural gas
    #[serde(default = "default_gas_kg_co2_per_therm")]
    pub gas_kg_co2_per_therm: KgCO2PerTherm,
    /// Number of years over which the national grid transition takes place
    #[serde(default = "default_transition_years")]
    pub transition_years: u32,
    /// The national cost of the grid transition
    #[serde(default = "default_national_transition_cost")]
    pub national_transition_cost: Money,
    /// The increase in nameplate generating capacity required by the transition (GW)
    #[serde(default = "default_nameplate_capacity_increase_gw")]
    pub nameplate_capacity_increase_gw: f64,
    /// Treatment of labour costs in embodied carbon accounting
    #[serde(default)]
    pub labor_carbon: LaborCarbonPolicy,
}

impl Default for CostingParameters {
    fn default() -> Self {
        toml::from_str("").expect("Cannot create costing parameters from empty TOML")
    }
}

impl CostingParameters {
    /// The grid transition cost per watt of peak demand, over the whole transition
    pub fn transition_cost_per_watt(&self) -> MoneyPerWatt {
        MoneyPerWatt(self.national_transition_cost.value() / (self.nameplate_capacity_increase_gw * 1e9))
    }

    /// Validate parameters after reading in file
    fn validate(&self) -> Result<()> {
        for (name, rate) in [
            ("direct_discount_rate", self.direct_discount_rate),
            ("carbon_discount_rate", self.carbon_discount_rate),
            ("embodied_discount_rate", self.embodied_discount_rate),
        ] {
            check_discount_rate(name, rate)?;
        }

        ensure!(
            self.carbon_price.is_finite() && self.carbon_price >= MoneyPerKgCO2(0.0),
            "carbon_price must be a finite number greater than or equal to zero"
        );
        ensure!(
            self.embodied_factor.is_finite() && self.embodied_factor >= MoneyPerKgCO2(0.0),
            "embodied_factor must be a finite number greater than or equal to zero"
        );
        ensure!(
            self.gas_kg_co2_per_therm.is_finite() && self.gas_kg_co2_per_therm >= KgCO2PerTherm(0.0),
            "gas_kg_co2_per_therm must be a finite number greater than or equal to zero"
        );
        ensure!(
            self.transition_years > 0,
            "transition_years cannot be zero"
        );
        ensure!(
            self.national_transition_cost.is_finite(),
            "national_transition_cost must be a finite number"
        );
        ensure!(
            self.nameplate_capacity_increase_gw.is_finite()
                && self.nameplate_capacity_increase_gw > 0.0,
            "nameplate_capacity_increase_gw must be a finite number greater than zero"
        );

        Ok(())
    }
}

/// Check that a discount rate is valid
fn check_discount_rate(name: &str, rate: Dimensionless) -> Result<()> {
    ensure!(rate.is_finite(), "{name} must be a finite number");

    // Rates of -1 or below are absorbed in the present value calculation, but are almost
    // certainly a mistake
    if rate <= Dimensionless(-1.0) {
        warn!("{name} is {}: discounted costs will be zero or meaningless", rate.0);
    } else if rate > Dimensionless(1.0) {
        warn!("{name} is greater than 1 ({})", rate.0);
    }

    Ok(())
}

/// Represents the contents of the entire variant file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct VariantParameters {
    /// The name of the building variant
    pub name: String,
    /// The number of years over which costs are evaluated
    pub analysis_duration: u32,
    /// Fraction of the envelope first cost attributable to labour
    #[serde(deserialize_with = "deserialise_proportion")]
    pub envelope_labor_cost_fraction: Dimensionless,
    /// Peak electricity demand of the building
    pub peak_electric_demand_w: Watts,
    /// The country whose national emissions factor applies
    pub country: String,
    /// The code of the grid region whose CO2 forecast applies
    pub grid_region: String,
    /// Electricity prices
    pub electricity: Fuel,
    /// Natural gas prices
    pub gas: Fuel,
    /// Cost weighting and discounting
    #[serde(default)]
    pub costing: CostingParameters,
}

impl VariantParameters {
    /// Read a variant file from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `variant_dir` - Folder containing variant input files
    ///
    /// # Returns
    ///
    /// The file contents as a [`VariantParameters`] struct or an error if the file is invalid
    pub fn from_path<P: AsRef<Path>>(variant_dir: P) -> Result<VariantParameters> {
        let file_path = variant_dir.as_ref().join(VARIANT_PARAMETERS_FILE_NAME);
        let params: VariantParameters = read_toml(&file_path)?;

        params
            .validate()
            .with_context(|| input_err_msg(file_path))?;

        Ok(params)
    }

    /// Validate parameters after reading in file
    fn validate(&self) -> Result<()> {
        ensure!(
            self.analysis_duration > 0,
            "analysis_duration must be greater than zero"
        );
        ensure!(
            self.peak_electric_demand_w.is_finite() && self.peak_electric_demand_w >= Watts(0.0),
            "peak_electric_demand_w must be a finite number greater than or equal to zero"
        );
        self.electricity.validate(FuelType::Electricity)?;
        self.gas.validate(FuelType::NaturalGas)?;
        self.costing.validate()?;

        Ok(())
    }
}
