//! Equipment (mechanical, lighting, appliances, PV arrays etc.) used in a building variant.
use crate::catalog::{Catalog, ReplaceableItem};
use crate::id::{define_id_getter, define_id_type};
use crate::input::deserialise_proportion;
use crate::units::{Dimensionless, Money};
use serde::{Deserialize, Serialize};
use serde_string_enum::{DeserializeLabeledStringEnum, SerializeLabeledStringEnum};

define_id_type! {EquipmentID}

/// A collection of [`Equipment`], ordered by name
pub type EquipmentCollection = Catalog<EquipmentID, Equipment>;

/// The category of a piece of equipment
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, SerializeLabeledStringEnum, DeserializeLabeledStringEnum,
)]
pub enum EquipmentType {
    /// Heating, cooling and ventilation plant
    #[string = "Mechanical"]
    Mechanical,
    /// Domestic hot water heaters
    #[string = "Hot Water"]
    HotWater,
    /// Household appliances
    #[string = "Appliance"]
    Appliance,
    /// Lighting
    #[string = "Lights"]
    Lights,
    /// Solar photovoltaic panels
    #[string = "PV Array"]
    PvArray,
    /// Electrical storage
    #[string = "Battery"]
    Battery,
}

/// A single piece of equipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    /// Unique name for the equipment
    pub name: EquipmentID,
    /// The equipment category
    pub equipment_type: EquipmentType,
    /// Total installed cost
    pub cost: Money,
    /// Years between replacements (zero if never replaced)
    pub lifetime_years: u32,
    /// Fraction of the cost attributable to labour
    #[serde(deserialize_with = "deserialise_proportion")]
    pub labor_fraction: Dimensionless,
}
define_id_getter! {Equipment, EquipmentID}

impl ReplaceableItem for Equipment {
    fn total_cost(&self) -> Money {
        self.cost
    }

    fn lifetime_years(&self) -> u32 {
        self.lifetime_years
    }

    fn labor_fraction(&self) -> Dimensionless {
        self.labor_fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::equipment;
    use rstest::rstest;

    #[rstest]
    fn test_equipment_fractions(equipment: Equipment) {
        assert_eq!(equipment.total_cost(), Money(1000.0));
        assert_eq!(equipment.material_fraction(), Dimensionless(0.75));
    }

    #[rstest]
    fn test_equipment_collection(equipment: Equipment) {
        let battery = Equipment {
            name: "Battery".into(),
            equipment_type: EquipmentType::Battery,
            cost: Money(3_894.54),
            lifetime_years: 10,
            labor_fraction: Dimensionless(0.5),
        };
        let collection: EquipmentCollection =
            [equipment.clone(), battery.clone()].into_iter().collect();

        assert_eq!(collection.len(), 2);
        assert!(collection.contains("Battery"));
        assert!(collection.contains_item(&equipment));

        // Iteration is in name order
        let names: Vec<_> = collection.iter().map(|e| e.name.to_string()).collect();
        assert_eq!(names, ["Battery", "Heat Pump"]);
    }
}
