//! Assembles the discounted ADORB cost components for each year of the analysis.
//!
//! The ADORB cost of a building variant is made up of five streams:
//!
//! 1. direct energy costs (fuel purchases)
//! 2. operational carbon costs (CO2 from fuel use)
//! 3. direct maintenance costs (first costs and replacements)
//! 4. embodied carbon costs (CO2 from manufacture and installation)
//! 5. grid transition costs (the building's share of decarbonising the grid)
//!
//! Each is discounted to its present value with its own discount rate.
use crate::catalog::ReplaceableItem;
use crate::finance::discount;
use crate::operational::OperationalSummary;
use crate::schedule::{YearlyCostEvent, recurring_schedule};
use crate::units::{Dimensionless, KgCO2, KgCO2PerMoney, Money, MoneyPerKgCO2, Watts};
use crate::variant::{CostingParameters, LaborCarbonPolicy, Variant};
use log::info;
use serde::Serialize;

/// Discount an amount occurring in the given analysis year to its present value
fn discount_in_year(amount: Money, year: u32, discount_rate: Dimensionless) -> Money {
    // Years too large for the factor's exponent are discounted as heavily as possible
    discount(amount, i32::try_from(year).unwrap_or(i32::MAX), discount_rate)
}

/// Present value of the energy bill in the given year
pub fn pv_direct_energy(year: u32, annual_energy_cost: Money, discount_rate: Dimensionless) -> Money {
    discount_in_year(annual_energy_cost, year, discount_rate)
}

/// Present value of the operational carbon cost in the given year.
///
/// The electricity CO2 is taken from the trajectory entry for the year; the gas CO2 is the same
/// in every year.
pub fn pv_operational_co2(
    year: u32,
    electric_co2_trajectory: &[KgCO2],
    annual_gas_co2: KgCO2,
    carbon_price: MoneyPerKgCO2,
    discount_rate: Dimensionless,
) -> Money {
    let electric_co2 = electric_co2_trajectory
        .get(year as usize)
        .copied()
        .unwrap_or_default();
    discount_in_year(
        (electric_co2 + annual_gas_co2) * carbon_price,
        year,
        discount_rate,
    )
}

/// Present value of the maintenance events occurring in the given year
pub fn pv_direct_maintenance(
    year: u32,
    events: &[YearlyCostEvent<Money>],
    discount_rate: Dimensionless,
) -> Money {
    events
        .iter()
        .filter(|event| event.year == year)
        .map(|event| discount_in_year(event.amount, year, discount_rate))
        .sum()
}

/// Present value of the embodied carbon events occurring in the given year
pub fn pv_embodied_co2(
    year: u32,
    events: &[YearlyCostEvent<KgCO2>],
    embodied_factor: MoneyPerKgCO2,
    discount_rate: Dimensionless,
) -> Money {
    events
        .iter()
        .filter(|event| event.year == year)
        .map(|event| discount_in_year(event.amount * embodied_factor, year, discount_rate))
        .sum()
}

/// Present value of the building's share of the grid transition cost in the given year.
///
/// The transition cost per watt of peak demand is spread evenly over the transition period. There
/// is no cost after the transition has finished.
pub fn pv_grid_transition(
    year: u32,
    peak_electric_demand: Watts,
    costing: &CostingParameters,
) -> Money {
    if year > costing.transition_years {
        return Money(0.0);
    }

    let cost_per_watt_year =
        costing.transition_cost_per_watt() / Dimensionless(costing.transition_years as f64);
    discount_in_year(
        peak_electric_demand * cost_per_watt_year,
        year,
        costing.direct_discount_rate,
    )
}

/// The maintenance and embodied carbon event streams for a variant
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CostStreams {
    /// Installation, replacement and measure costs
    pub maintenance: Vec<YearlyCostEvent<Money>>,
    /// Embodied CO2 of installations, replacements and measures
    pub embodied_co2: Vec<YearlyCostEvent<KgCO2>>,
}

impl CostStreams {
    /// Add the installation and replacement events for a catalogue item.
    ///
    /// Embodied carbon is attributed to the material share of the cost only.
    pub fn add_replaceable_item<T: ReplaceableItem>(
        &mut self,
        item: &T,
        kg_co2_per_usd: KgCO2PerMoney,
        analysis_duration: u32,
    ) {
        let cost = item.total_cost();
        let lifetime = item.lifetime_years();
        let embodied = cost * item.material_fraction() * kg_co2_per_usd;

        self.maintenance
            .extend(recurring_schedule(cost, lifetime, analysis_duration));
        self.embodied_co2
            .extend(recurring_schedule(embodied, lifetime, analysis_duration));
    }

    /// Add a one-off cost occurring in the given year
    pub fn add_one_off(&mut self, cost: Money, embodied: KgCO2, year: u32) {
        self.maintenance.push(YearlyCostEvent::new(cost, year));
        self.embodied_co2.push(YearlyCostEvent::new(embodied, year));
    }

    /// Build the event streams for all of a variant's measures, constructions and equipment
    pub fn from_variant(variant: &Variant) -> Self {
        let duration = variant.analysis_duration();
        let kg_co2_per_usd = variant.kg_co2_per_usd();
        let policy = variant.costing().labor_carbon;
        let mut streams = Self::default();

        for measure in variant.measures.iter() {
            let embodied = match policy {
                LaborCarbonPolicy::NationalFactor => measure.cost * kg_co2_per_usd,
                LaborCarbonPolicy::Excluded => {
                    measure.cost * measure.material_fraction() * kg_co2_per_usd
                }
            };
            streams.add_one_off(measure.cost, embodied, measure.year);
        }

        // The envelope first cost is incurred once, at the start
        let first_cost = variant.first_cost;
        let first_cost_embodied = match policy {
            LaborCarbonPolicy::NationalFactor => first_cost * kg_co2_per_usd,
            LaborCarbonPolicy::Excluded => {
                let material_fraction =
                    Dimensionless(1.0) - variant.parameters.envelope_labor_cost_fraction;
                first_cost * material_fraction * kg_co2_per_usd
            }
        };
        streams.add_one_off(first_cost, first_cost_embodied, 0);

        for construction in variant.constructions.iter() {
            streams.add_replaceable_item(construction, kg_co2_per_usd, duration);
        }
        for equipment in variant.equipment.iter() {
            streams.add_replaceable_item(equipment, kg_co2_per_usd, duration);
        }

        streams
    }
}

/// The discounted cost components for a single analysis year
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnnualCostRow {
    /// The analysis year (starting at 1)
    pub year: u32,
    /// Present value of the energy bill
    pub pv_direct_energy: Money,
    /// Present value of the operational carbon cost
    pub pv_operational_co2: Money,
    /// Present value of maintenance and replacement costs
    pub pv_direct_maintenance: Money,
    /// Present value of the embodied carbon cost
    pub pv_embodied_co2: Money,
    /// Present value of the grid transition cost
    pub pv_grid_transition: Money,
}

impl AnnualCostRow {
    /// The sum of all cost components for this year
    pub fn total(&self) -> Money {
        self.pv_direct_energy
            + self.pv_operational_co2
            + self.pv_direct_maintenance
            + self.pv_embodied_co2
            + self.pv_grid_transition
    }
}

/// The total of each cost component over the whole analysis
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CostTotals {
    /// Total of [`AnnualCostRow::pv_direct_energy`]
    pub direct_energy: Money,
    /// Total of [`AnnualCostRow::pv_operational_co2`]
    pub operational_co2: Money,
    /// Total of [`AnnualCostRow::pv_direct_maintenance`]
    pub direct_maintenance: Money,
    /// Total of [`AnnualCostRow::pv_embodied_co2`]
    pub embodied_co2: Money,
    /// Total of [`AnnualCostRow::pv_grid_transition`]
    pub grid_transition: Money,
}

impl CostTotals {
    /// The sum of all components
    pub fn total(&self) -> Money {
        self.direct_energy
            + self.operational_co2
            + self.direct_maintenance
            + self.embodied_co2
            + self.grid_transition
    }
}

/// The ADORB cost table: one row per analysis year
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdorbCostTable {
    rows: Vec<AnnualCostRow>,
}

impl AdorbCostTable {
    /// The rows of the table, in year order
    pub fn rows(&self) -> &[AnnualCostRow] {
        &self.rows
    }

    /// The number of analysis years
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The total of each cost component over all years
    pub fn column_totals(&self) -> CostTotals {
        self.rows
            .iter()
            .fold(CostTotals::default(), |totals, row| CostTotals {
                direct_energy: totals.direct_energy + row.pv_direct_energy,
                operational_co2: totals.operational_co2 + row.pv_operational_co2,
                direct_maintenance: totals.direct_maintenance + row.pv_direct_maintenance,
                embodied_co2: totals.embodied_co2 + row.pv_embodied_co2,
                grid_transition: totals.grid_transition + row.pv_grid_transition,
            })
    }

    /// The ADORB cost: the sum of every component over every year
    pub fn total(&self) -> Money {
        self.rows.iter().map(AnnualCostRow::total).sum()
    }
}

impl FromIterator<AnnualCostRow> for AdorbCostTable {
    fn from_iter<I: IntoIterator<Item = AnnualCostRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

/// Calculate the cost table from operational data and event streams.
///
/// Rows are produced for analysis years `1..=analysis_duration`.
pub fn calculate_annual_adorb_costs(
    analysis_duration: u32,
    operational: &OperationalSummary,
    streams: &CostStreams,
    peak_electric_demand: Watts,
    costing: &CostingParameters,
) -> AdorbCostTable {
    (1..=analysis_duration)
        .map(|year| AnnualCostRow {
            year,
            pv_direct_energy: pv_direct_energy(
                year,
                operational.annual_energy_cost(),
                costing.direct_discount_rate,
            ),
            pv_operational_co2: pv_operational_co2(
                year,
                &operational.electric_co2_trajectory,
                operational.annual_gas_co2,
                costing.carbon_price,
                costing.carbon_discount_rate,
            ),
            pv_direct_maintenance: pv_direct_maintenance(
                year,
                &streams.maintenance,
                costing.direct_discount_rate,
            ),
            pv_embodied_co2: pv_embodied_co2(
                year,
                &streams.embodied_co2,
                costing.embodied_factor,
                costing.embodied_discount_rate,
            ),
            pv_grid_transition: pv_grid_transition(year, peak_electric_demand, costing),
        })
        .collect()
}

/// Everything calculated for a variant: the cost table and its intermediate data
#[derive(Debug, Clone, PartialEq)]
pub struct AdorbResults {
    /// Annual operating costs and emissions
    pub operational: OperationalSummary,
    /// Maintenance and embodied carbon events
    pub streams: CostStreams,
    /// The discounted cost table
    pub table: AdorbCostTable,
}

/// Calculate the ADORB costs for a variant, keeping the intermediate data
pub fn calculate_variant_adorb_results(variant: &Variant) -> AdorbResults {
    let costing = variant.costing();
    let params = &variant.parameters;

    let operational = OperationalSummary::new(
        &variant.energy_results,
        &params.electricity,
        &params.gas,
        &variant.grid_region,
        costing.gas_kg_co2_per_therm,
    );
    info!(
        "Annual energy cost: ${:.2} (electricity ${:.2}, gas ${:.2})",
        operational.annual_energy_cost().value(),
        operational.annual_electric_cost.value(),
        operational.annual_gas_cost.value()
    );

    let streams = CostStreams::from_variant(variant);
    let table = calculate_annual_adorb_costs(
        variant.analysis_duration(),
        &operational,
        &streams,
        params.peak_electric_demand_w,
        costing,
    );

    AdorbResults {
        operational,
        streams,
        table,
    }
}

/// Calculate the ADORB cost table for a variant
pub fn calculate_variant_adorb_costs(variant: &Variant) -> AdorbCostTable {
    calculate_variant_adorb_results(variant).table
}
