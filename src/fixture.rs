//! Fixtures for tests

use crate::construction::{Construction, ConstructionCollection, ConstructionType};
use crate::cost_estimate::{CostEstimate, TOTAL_FIRST_COST_LABEL};
use crate::energy_results::EnergyResults;
use crate::equipment::{Equipment, EquipmentCollection, EquipmentType};
use crate::fuel::Fuel;
use crate::grid_region::GridRegion;
use crate::measure::{MeasureCollection, MeasureType, ReductionMeasure};
use crate::national_emissions::NationalEmissions;
use crate::units::{
    Dimensionless, Joules, KgCO2, KgCO2PerMegawattHour, KgCO2PerMoney, KgCO2PerSquareMetre,
    Money, MoneyPerSquareMetre, SquareMetres, Watts,
};
use crate::variant::{CostingParameters, Variant, VariantParameters};
use indexmap::indexmap;
use rstest::fixture;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

#[fixture]
pub fn construction() -> Construction {
    Construction {
        name: "Exterior Wall".into(),
        construction_type: ConstructionType::ExteriorWall,
        co2_kg_per_m2: KgCO2PerSquareMetre(5.0),
        cost_per_m2: MoneyPerSquareMetre(100.0),
        lifetime_years: 40,
        labor_fraction: Dimensionless(0.4),
        quantity_m2: SquareMetres(0.0),
    }
}

#[fixture]
pub fn equipment() -> Equipment {
    Equipment {
        name: "Heat Pump".into(),
        equipment_type: EquipmentType::Mechanical,
        cost: Money(1000.0),
        lifetime_years: 20,
        labor_fraction: Dimensionless(0.25),
    }
}

#[fixture]
pub fn measure() -> ReductionMeasure {
    ReductionMeasure {
        measure_type: MeasureType::Performance,
        name: "Test Measure 1".into(),
        year: 1,
        cost: Money(1000.0),
        kg_co2: KgCO2(100.0),
        country_name: "USA".into(),
        labor_fraction: Dimensionless(0.5),
    }
}

#[fixture]
pub fn grid_region() -> GridRegion {
    let factors = |values: [f64; 2]| values.map(KgCO2PerMegawattHour).to_vec();
    GridRegion {
        region_code: "NEWEc".into(),
        hourly_co2_factors: BTreeMap::from([
            (2023, factors([460.1, 469.3])),
            (2024, factors([460.1, 475.3])),
            (2025, factors([434.1, 445.2])),
        ]),
    }
}

#[fixture]
pub fn fuel() -> Fuel {
    Fuel {
        purchase_price: 0.102,
        sale_price: 0.0,
        annual_base_price: Money(0.0),
        used: true,
    }
}

#[fixture]
pub fn energy_results() -> EnergyResults {
    EnergyResults {
        purchased_electricity: vec![Joules(3.6e9), Joules(1.8e9)],
        surplus_electricity: vec![Joules(0.0), Joules(3.6e8)],
        natural_gas: vec![Joules(1.055e9); 12],
    }
}

#[fixture]
pub fn costing() -> CostingParameters {
    CostingParameters::default()
}

#[fixture]
pub fn national_emissions() -> NationalEmissions {
    NationalEmissions {
        country_name: "USA".into(),
        us_trading_rank: 0,
        gdp_million_usd: 25_439_700.0,
        co2_mt: 4_713.0,
        kg_co2_per_usd: KgCO2PerMoney(0.5),
    }
}

#[fixture]
pub fn variant(
    construction: Construction,
    equipment: Equipment,
    measure: ReductionMeasure,
    grid_region: GridRegion,
    fuel: Fuel,
    energy_results: EnergyResults,
    costing: CostingParameters,
    national_emissions: NationalEmissions,
) -> Variant {
    let parameters = VariantParameters {
        name: "Test".into(),
        analysis_duration: 2,
        envelope_labor_cost_fraction: Dimensionless(0.4),
        peak_electric_demand_w: Watts(5000.0),
        country: "USA".into(),
        grid_region: grid_region.region_code.clone(),
        electricity: fuel.clone(),
        gas: Fuel {
            purchase_price: 1.2,
            annual_base_price: Money(480.0),
            ..fuel
        },
        costing,
    };
    let cost_estimate = CostEstimate {
        line_items: indexmap! { TOTAL_FIRST_COST_LABEL.to_string() => Money(90_000.0) },
    };

    Variant {
        variant_path: PathBuf::from("test"),
        parameters,
        energy_results,
        constructions: ConstructionCollection::from_iter([construction.with_quantity_ft2(1076.39)]),
        equipment: EquipmentCollection::from_iter([equipment]),
        measures: MeasureCollection::from_iter([measure]),
        grid_region,
        national_emissions,
        cost_estimate,
        first_cost: Money(90_000.0),
    }
}
