//! Country-level CO2 emissions per US dollar of economic activity.
use crate::units::KgCO2PerMoney;
use indexmap::IndexMap;
use serde::Deserialize;

/// A map of [`NationalEmissions`], keyed by country name
pub type NationalEmissionsMap = IndexMap<String, NationalEmissions>;

/// National emissions data for a single country
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NationalEmissions {
    /// The name of the country (e.g. "USA")
    pub country_name: String,
    /// The country's rank among US trading partners
    pub us_trading_rank: u32,
    /// Gross domestic product (millions of US dollars)
    pub gdp_million_usd: f64,
    /// Total CO2 emissions (megatonnes)
    pub co2_mt: f64,
    /// Emissions intensity of the economy
    pub kg_co2_per_usd: KgCO2PerMoney,
}
