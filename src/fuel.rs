//! Fuel types and their prices.
use crate::units::Money;
use anyhow::{Result, ensure};
use serde::Deserialize;
use strum::Display;

/// The kinds of fuel purchased by a building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FuelType {
    /// Grid electricity (metered hourly)
    #[strum(to_string = "Electricity")]
    Electricity,
    /// Natural gas (metered monthly)
    #[strum(to_string = "Natural Gas")]
    NaturalGas,
}

/// Prices for a single fuel, as specified in `variant.toml`.
///
/// Prices are per kWh for electricity and per therm for natural gas.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Fuel {
    /// Price paid per unit of purchased energy
    pub purchase_price: f64,
    /// Price received per unit of energy sold back to the grid
    #[serde(default)]
    pub sale_price: f64,
    /// A fixed annual connection fee
    #[serde(default)]
    pub annual_base_price: Money,
    /// Whether the building uses this fuel at all
    #[serde(default = "default_used")]
    pub used: bool,
}

fn default_used() -> bool {
    true
}

impl Fuel {
    /// Check that prices are valid numbers
    pub fn validate(&self, fuel_type: FuelType) -> Result<()> {
        ensure!(
            self.purchase_price.is_finite()
                && self.sale_price.is_finite()
                && self.annual_base_price.is_finite(),
            "Prices for {fuel_type} must be finite numbers"
        );

        Ok(())
    }
}
