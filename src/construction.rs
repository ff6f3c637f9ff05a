//! Assembly constructions (walls, floors, windows etc.) used in a building variant.
use crate::catalog::{Catalog, ReplaceableItem};
use crate::id::{define_id_getter, define_id_type};
use crate::input::deserialise_proportion;
use crate::units::{
    Dimensionless, KgCO2, KgCO2PerSquareMetre, Money, MoneyPerSquareMetre, SquareMetres,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_string_enum::{DeserializeLabeledStringEnum, SerializeLabeledStringEnum};
use std::collections::HashMap;

define_id_type! {ConstructionID}

/// A collection of [`Construction`]s, ordered by name
pub type ConstructionCollection = Catalog<ConstructionID, Construction>;

/// The kind of building element a construction is used for
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, SerializeLabeledStringEnum, DeserializeLabeledStringEnum,
)]
pub enum ConstructionType {
    /// An external door
    #[string = "Exterior Door"]
    ExteriorDoor,
    /// A window or glazed opening in the envelope
    #[string = "Exterior Window"]
    ExteriorWindow,
    /// An external wall
    #[string = "Exterior Wall"]
    ExteriorWall,
    /// A floor over the ground or outside air
    #[string = "Exterior Floor"]
    ExteriorFloor,
    /// A roof
    #[string = "Exterior Roof"]
    ExteriorRoof,
    /// An internal partition wall
    #[string = "Interior Wall"]
    InteriorWall,
    /// A floor between storeys
    #[string = "Interior Floor"]
    InteriorFloor,
}

/// A single construction with per-area costs and embodied carbon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Construction {
    /// Unique name for the construction
    pub name: ConstructionID,
    /// The kind of building element
    pub construction_type: ConstructionType,
    /// Embodied carbon per unit area
    pub co2_kg_per_m2: KgCO2PerSquareMetre,
    /// Installed cost per unit area
    pub cost_per_m2: MoneyPerSquareMetre,
    /// Years between replacements (zero if never replaced)
    pub lifetime_years: u32,
    /// Fraction of the cost attributable to labour
    #[serde(deserialize_with = "deserialise_proportion")]
    pub labor_fraction: Dimensionless,
    /// The area of this construction in the building
    #[serde(default)]
    pub quantity_m2: SquareMetres,
}
define_id_getter! {Construction, ConstructionID}

impl Construction {
    /// Total cost for the construction's area
    pub fn cost(&self) -> Money {
        self.quantity_m2 * self.cost_per_m2
    }

    /// Total embodied carbon for the construction's area
    pub fn co2_kg(&self) -> KgCO2 {
        self.quantity_m2 * self.co2_kg_per_m2
    }

    /// The construction's area in square feet
    pub fn quantity_ft2(&self) -> f64 {
        self.quantity_m2.to_square_feet()
    }

    /// Create a copy of this construction covering the given area (in square feet)
    pub fn with_quantity_ft2(&self, quantity_ft2: f64) -> Self {
        Self {
            quantity_m2: SquareMetres::from_square_feet(quantity_ft2),
            ..self.clone()
        }
    }
}

impl ReplaceableItem for Construction {
    fn total_cost(&self) -> Money {
        self.cost()
    }

    fn lifetime_years(&self) -> u32 {
        self.lifetime_years
    }

    fn labor_fraction(&self) -> Dimensionless {
        self.labor_fraction
    }
}

/// Normalise a construction name for matching against quantity tables.
///
/// Simulation reports list construction names upper-cased and with spaces replaced.
fn normalise_name(name: &str) -> String {
    name.to_uppercase().replace(' ', "_")
}

/// Create a new collection with each construction's area taken from `quantities_ft2`.
///
/// Names in `quantities_ft2` are matched ignoring case and with spaces equivalent to
/// underscores. Every construction must have a quantity.
pub fn with_quantities_ft2(
    constructions: &ConstructionCollection,
    quantities_ft2: &HashMap<String, f64>,
) -> Result<ConstructionCollection> {
    let quantities: HashMap<_, _> = quantities_ft2
        .iter()
        .map(|(name, quantity)| (normalise_name(name), *quantity))
        .collect();

    constructions
        .iter()
        .map(|construction| {
            let quantity = quantities
                .get(&normalise_name(&construction.name.0))
                .with_context(|| format!("No quantity found for construction {}", construction.name))?;
            Ok(construction.with_quantity_ft2(*quantity))
        })
        .collect()
}
