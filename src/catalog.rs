//! A generic store for catalogue records (constructions, equipment, measures).
//!
//! Records are unique by name and always iterated in name order.
use crate::id::{HasID, IDLike};
use crate::units::{Dimensionless, Money};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::collections::btree_map::Values;

/// A catalogue record which is installed in the first year and replaced at the end of its life
pub trait ReplaceableItem {
    /// The total (installed) cost of the item
    fn total_cost(&self) -> Money;

    /// The item's lifetime in years (zero if it is never replaced)
    fn lifetime_years(&self) -> u32;

    /// The fraction of the cost attributable to labour
    fn labor_fraction(&self) -> Dimensionless;

    /// The fraction of the cost attributable to materials
    fn material_fraction(&self) -> Dimensionless {
        Dimensionless(1.0) - self.labor_fraction()
    }
}

/// An ordered-by-name, unique-by-key collection of catalogue records
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog<ID: IDLike, T: HasID<ID>> {
    items: BTreeMap<ID, T>,
}

impl<ID: IDLike, T: HasID<ID>> Default for Catalog<ID, T> {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }
}

impl<ID: IDLike, T: HasID<ID>> Catalog<ID, T> {
    /// Create an empty catalogue
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record, replacing any existing record with the same name.
    ///
    /// Returns the replaced record, if there was one.
    pub fn add(&mut self, item: T) -> Option<T> {
        self.items.insert(item.get_id().clone(), item)
    }

    /// Get a record by name
    pub fn get(&self, name: &str) -> Option<&T> {
        self.items.get(name)
    }

    /// Whether a record with the given name is present
    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    /// Iterate over the names of records, in order
    pub fn keys(&self) -> impl Iterator<Item = &ID> {
        self.items.keys()
    }

    /// Iterate over records, in name order
    pub fn iter(&self) -> Values<'_, ID, T> {
        self.items.values()
    }

    /// The number of records
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no records
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<ID: IDLike, T: HasID<ID> + PartialEq> Catalog<ID, T> {
    /// Whether an identical record is present
    pub fn contains_item(&self, item: &T) -> bool {
        self.get(item.get_id().borrow()) == Some(item)
    }
}

impl<'a, ID: IDLike, T: HasID<ID>> IntoIterator for &'a Catalog<ID, T> {
    type Item = &'a T;
    type IntoIter = Values<'a, ID, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<ID: IDLike, T: HasID<ID>> FromIterator<T> for Catalog<ID, T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for item in iter {
            catalog.add(item);
        }
        catalog
    }
}
