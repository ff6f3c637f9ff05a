//! Energy simulation results for a building variant.
use crate::units::Joules;

/// The time series output by an energy simulation of the building
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnergyResults {
    /// Electricity purchased from the grid in each hour of the year
    pub purchased_electricity: Vec<Joules>,
    /// Surplus electricity sold to the grid in each hour of the year
    pub surplus_electricity: Vec<Joules>,
    /// Natural gas metered in each month of the year
    pub natural_gas: Vec<Joules>,
}

impl EnergyResults {
    /// Total electricity purchased over the simulated period
    pub fn total_purchased_electricity(&self) -> Joules {
        self.purchased_electricity.iter().copied().sum()
    }

    /// Total surplus electricity sold over the simulated period
    pub fn total_surplus_electricity(&self) -> Joules {
        self.surplus_electricity.iter().copied().sum()
    }

    /// Total natural gas used over the simulated period
    pub fn total_natural_gas(&self) -> Joules {
        self.natural_gas.iter().copied().sum()
    }
}
