//! Reduces simulated energy use to annual operating costs and emissions.
use crate::energy_results::EnergyResults;
use crate::fuel::Fuel;
use crate::grid_region::GridRegion;
use crate::units::{KgCO2, KgCO2PerTherm, Money, MoneyPerKilowattHour, MoneyPerTherm};
use log::warn;

/// Annual operating costs and emissions of a building
#[derive(Debug, Clone, PartialEq)]
pub struct OperationalSummary {
    /// Net annual cost of electricity, including the base fee
    pub annual_electric_cost: Money,
    /// Annual cost of natural gas, including the base fee
    pub annual_gas_cost: Money,
    /// Annual electricity CO2 for each forecast year, in year order
    pub electric_co2_trajectory: Vec<KgCO2>,
    /// Annual natural gas CO2 (the same in every year)
    pub annual_gas_co2: KgCO2,
}

impl OperationalSummary {
    /// Summarise annual operation for the given energy results and fuels
    pub fn new(
        results: &EnergyResults,
        electricity: &Fuel,
        gas: &Fuel,
        grid_region: &GridRegion,
        gas_kg_co2_per_therm: KgCO2PerTherm,
    ) -> Self {
        Self {
            annual_electric_cost: annual_electric_cost(results, electricity),
            annual_gas_cost: annual_gas_cost(results, gas),
            electric_co2_trajectory: electric_co2_trajectory(results, electricity, grid_region),
            annual_gas_co2: annual_gas_co2(results, gas, gas_kg_co2_per_therm),
        }
    }

    /// Combined annual cost of all fuels
    pub fn annual_energy_cost(&self) -> Money {
        self.annual_electric_cost + self.annual_gas_cost
    }

    /// Total operational CO2 in the given analysis year.
    ///
    /// Years beyond the end of the forecast have no electricity CO2.
    pub fn annual_co2(&self, year: u32) -> KgCO2 {
        let electric = self
            .electric_co2_trajectory
            .get(year as usize)
            .copied()
            .unwrap_or_default();
        electric + self.annual_gas_co2
    }
}

/// Net annual cost of electricity: purchases less sales, plus the annual base fee.
///
/// An unused fuel costs nothing.
pub fn annual_electric_cost(results: &EnergyResults, electricity: &Fuel) -> Money {
    if !electricity.used {
        return Money(0.0);
    }

    let purchased = results.total_purchased_electricity().to_kilowatt_hours()
        * MoneyPerKilowattHour(electricity.purchase_price);
    let sold = results.total_surplus_electricity().to_kilowatt_hours()
        * MoneyPerKilowattHour(electricity.sale_price);

    purchased - sold + electricity.annual_base_price
}

/// Annual cost of natural gas, plus the annual base fee.
///
/// An unused fuel costs nothing.
pub fn annual_gas_cost(results: &EnergyResults, gas: &Fuel) -> Money {
    if !gas.used {
        return Money(0.0);
    }

    results.total_natural_gas().to_therms() * MoneyPerTherm(gas.purchase_price)
        + gas.annual_base_price
}

/// Annual CO2 from purchased electricity for each forecast year.
///
/// Each year's emissions are the sum over hours of purchased energy multiplied by that hour's grid
/// factor. If the simulation and forecast cover different numbers of hours, only the overlapping
/// hours are counted.
pub fn electric_co2_trajectory(
    results: &EnergyResults,
    electricity: &Fuel,
    grid_region: &GridRegion,
) -> Vec<KgCO2> {
    if !electricity.used {
        return vec![KgCO2(0.0); grid_region.num_years()];
    }

    let num_hours = results.purchased_electricity.len();
    grid_region
        .iter_years()
        .map(|(year, factors)| {
            if factors.len() != num_hours {
                warn!(
                    "Grid region {} has {} hourly factors for {year}, but the simulation has {} \
                    hours. Only overlapping hours will be counted.",
                    grid_region.region_code,
                    factors.len(),
                    num_hours
                );
            }

            results
                .purchased_electricity
                .iter()
                .zip(factors)
                .map(|(energy, factor)| energy.to_megawatt_hours() * *factor)
                .sum()
        })
        .collect()
}

/// Annual CO2 from natural gas.
///
/// An unused fuel emits nothing.
pub fn annual_gas_co2(results: &EnergyResults, gas: &Fuel, kg_co2_per_therm: KgCO2PerTherm) -> KgCO2 {
    if !gas.used {
        return KgCO2(0.0);
    }

    results.total_natural_gas().to_therms() * kg_co2_per_therm
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{energy_results, fuel, grid_region};
    use crate::units::Joules;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    /// One kWh, in joules
    const KWH: f64 = 1.0 / 2.778e-7;

    #[rstest]
    fn test_annual_electric_cost(fuel: Fuel) {
        let results = EnergyResults {
            purchased_electricity: vec![Joules(KWH), Joules(KWH)],
            surplus_electricity: vec![Joules(0.0), Joules(KWH)],
            natural_gas: Vec::new(),
        };
        let electricity = Fuel {
            purchase_price: 0.2,
            sale_price: 0.05,
            annual_base_price: Money(100.0),
            ..fuel
        };

        // 2 kWh bought, 1 kWh sold
        assert_approx_eq!(
            Money,
            annual_electric_cost(&results, &electricity),
            Money(100.35),
            epsilon = 1e-9
        );
    }

    #[rstest]
    fn test_zero_usage_costs_only_base_fee(fuel: Fuel) {
        let electricity = Fuel {
            annual_base_price: Money(100.0),
            ..fuel
        };
        assert_eq!(
            annual_electric_cost(&EnergyResults::default(), &electricity),
            Money(100.0)
        );
        assert_eq!(
            annual_electric_cost(
                &EnergyResults::default(),
                &Fuel {
                    annual_base_price: Money(0.0),
                    ..electricity
                }
            ),
            Money(0.0)
        );
    }

    #[rstest]
    fn test_unused_fuel_contributes_nothing(
        energy_results: EnergyResults,
        fuel: Fuel,
        grid_region: GridRegion,
    ) {
        let unused = Fuel {
            annual_base_price: Money(480.0),
            used: false,
            ..fuel
        };

        assert_eq!(annual_electric_cost(&energy_results, &unused), Money(0.0));
        assert_eq!(annual_gas_cost(&energy_results, &unused), Money(0.0));
        assert_eq!(
            annual_gas_co2(&energy_results, &unused, KgCO2PerTherm(12.7)),
            KgCO2(0.0)
        );
        assert_eq!(
            electric_co2_trajectory(&energy_results, &unused, &grid_region),
            vec![KgCO2(0.0); 3]
        );
    }

    #[rstest]
    fn test_annual_gas(fuel: Fuel) {
        // 100 therms
        let results = EnergyResults {
            natural_gas: vec![Joules(50.0 / 9.478169879e-9); 2],
            ..Default::default()
        };
        let gas = Fuel {
            purchase_price: 1.5,
            annual_base_price: Money(480.0),
            ..fuel
        };

        assert_approx_eq!(
            Money,
            annual_gas_cost(&results, &gas),
            Money(630.0),
            epsilon = 1e-6
        );
        assert_approx_eq!(
            KgCO2,
            annual_gas_co2(&results, &gas, KgCO2PerTherm(12.7)),
            KgCO2(1270.0),
            epsilon = 1e-6
        );
    }

    #[rstest]
    fn test_electric_co2_trajectory(fuel: Fuel, grid_region: GridRegion) {
        // One MWh in each hour
        let results = EnergyResults {
            purchased_electricity: vec![Joules(1.0 / 2.778e-10); 2],
            ..Default::default()
        };

        let trajectory = electric_co2_trajectory(&results, &fuel, &grid_region);
        assert_eq!(trajectory.len(), 3);
        for (actual, expected) in trajectory.into_iter().zip([929.4, 935.4, 879.3]) {
            assert_approx_eq!(KgCO2, actual, KgCO2(expected), epsilon = 1e-6);
        }
    }

    #[rstest]
    fn test_electric_co2_trajectory_length_mismatch(fuel: Fuel, grid_region: GridRegion) {
        // Only the first hour overlaps with the forecast
        let results = EnergyResults {
            purchased_electricity: vec![Joules(1.0 / 2.778e-10)],
            ..Default::default()
        };

        let trajectory = electric_co2_trajectory(&results, &fuel, &grid_region);
        assert_approx_eq!(KgCO2, trajectory[0], KgCO2(460.1), epsilon = 1e-6);
        assert_approx_eq!(KgCO2, trajectory[2], KgCO2(434.1), epsilon = 1e-6);
    }

    #[rstest]
    fn test_operational_summary(
        energy_results: EnergyResults,
        fuel: Fuel,
        grid_region: GridRegion,
    ) {
        let summary =
            OperationalSummary::new(&energy_results, &fuel, &fuel, &grid_region, KgCO2PerTherm(12.7));
        assert_eq!(
            summary.annual_energy_cost(),
            summary.annual_electric_cost + summary.annual_gas_cost
        );
        assert_eq!(
            summary.annual_co2(1),
            summary.electric_co2_trajectory[1] + summary.annual_gas_co2
        );

        // Beyond the end of the forecast
        assert_eq!(summary.annual_co2(10), summary.annual_gas_co2);
    }
}
