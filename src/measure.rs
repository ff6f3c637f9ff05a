//! One-time carbon reduction measures applied to a building variant.
use crate::catalog::Catalog;
use crate::id::{define_id_getter, define_id_type};
use crate::input::deserialise_proportion;
use crate::units::{Dimensionless, KgCO2, Money};
use serde::{Deserialize, Serialize};
use serde_string_enum::{DeserializeLabeledStringEnum, SerializeLabeledStringEnum};

define_id_type! {MeasureID}

/// A collection of [`ReductionMeasure`]s, ordered by name
pub type MeasureCollection = Catalog<MeasureID, ReductionMeasure>;

/// Whether a measure affects the building's energy performance
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, SerializeLabeledStringEnum, DeserializeLabeledStringEnum,
)]
pub enum MeasureType {
    /// Changes the building's energy performance
    #[string = "PERFORMANCE"]
    Performance,
    /// Has no effect on energy use (e.g. cosmetic or structural work)
    #[string = "NON_PERFORMANCE"]
    NonPerformance,
}

/// A one-time measure which occurs in a specific analysis year and is never replaced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReductionMeasure {
    /// Whether the measure is performance-related
    pub measure_type: MeasureType,
    /// Unique name for the measure
    pub name: MeasureID,
    /// The analysis year in which the measure takes place
    pub year: u32,
    /// Cost of the measure
    pub cost: Money,
    /// Carbon associated with the measure
    pub kg_co2: KgCO2,
    /// Country in which the measure's materials originate
    pub country_name: String,
    /// Fraction of the cost attributable to labour
    #[serde(deserialize_with = "deserialise_proportion")]
    pub labor_fraction: Dimensionless,
}
define_id_getter! {ReductionMeasure, MeasureID}

impl ReductionMeasure {
    /// Fraction of the cost attributable to materials
    pub fn material_fraction(&self) -> Dimensionless {
        Dimensionless(1.0) - self.labor_fraction
    }
}

impl MeasureCollection {
    /// The subset of measures of the given type
    pub fn of_type(&self, measure_type: MeasureType) -> MeasureCollection {
        self.iter()
            .filter(|measure| measure.measure_type == measure_type)
            .cloned()
            .collect()
    }

    /// Only the performance-related measures
    pub fn performance_measures(&self) -> MeasureCollection {
        self.of_type(MeasureType::Performance)
    }

    /// Only the measures which are not performance-related
    pub fn nonperformance_measures(&self) -> MeasureCollection {
        self.of_type(MeasureType::NonPerformance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::measure;
    use rstest::rstest;

    #[rstest]
    fn test_material_fraction(measure: ReductionMeasure) {
        assert_eq!(measure.material_fraction(), Dimensionless(0.5));
    }

    #[rstest]
    fn test_measure_collection_by_type(measure: ReductionMeasure) {
        let measure2 = ReductionMeasure {
            name: "Test Measure 2".into(),
            year: 2,
            ..measure.clone()
        };
        let measure3 = ReductionMeasure {
            name: "Test Measure 3".into(),
            measure_type: MeasureType::NonPerformance,
            ..measure.clone()
        };
        let collection: MeasureCollection =
            [measure.clone(), measure2.clone(), measure3].into_iter().collect();

        assert_eq!(collection.len(), 3);
        assert_eq!(collection.get("Test Measure 1"), Some(&measure));
        assert!(collection.contains_item(&measure2));
        assert_eq!(collection.performance_measures().len(), 2);
        assert_eq!(collection.nonperformance_measures().len(), 1);
    }
}
