//! Forecasts of the CO2 intensity of a regional electricity grid.
use crate::units::KgCO2PerMegawattHour;
use std::collections::BTreeMap;

/// Hourly grid CO2 factors for each forecast (calendar) year
pub type HourlyCO2Factors = BTreeMap<u32, Vec<KgCO2PerMegawattHour>>;

/// A grid region together with its decarbonisation forecast
#[derive(Debug, Clone, PartialEq)]
pub struct GridRegion {
    /// The region code (e.g. "NEWEc")
    pub region_code: String,
    /// Hourly CO2 factors for each forecast year, in year order
    pub hourly_co2_factors: HourlyCO2Factors,
}

impl GridRegion {
    /// The number of forecast years covered
    pub fn num_years(&self) -> usize {
        self.hourly_co2_factors.len()
    }

    /// The first forecast year, if there is one
    pub fn first_year(&self) -> Option<u32> {
        self.hourly_co2_factors.keys().next().copied()
    }

    /// Iterate over the hourly factors for each forecast year, in year order
    pub fn iter_years(&self) -> impl Iterator<Item = (u32, &[KgCO2PerMegawattHour])> {
        self.hourly_co2_factors
            .iter()
            .map(|(year, factors)| (*year, factors.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::grid_region;
    use rstest::rstest;

    #[rstest]
    fn test_grid_region_years(grid_region: GridRegion) {
        assert_eq!(grid_region.num_years(), 3);
        assert_eq!(grid_region.first_year(), Some(2023));
        let years: Vec<_> = grid_region.iter_years().map(|(year, _)| year).collect();
        assert_eq!(years, [2023, 2024, 2025]);
    }
}
