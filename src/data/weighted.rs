//! Weighted selection tables
//!
//! A table is a list of `(value, weight)` entries. The sampling index is
//! built once when the table is constructed, so a table that exists is
//! always safe to sample from.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::TableError;

/// One weighted entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weighted<T> {
    pub value: T,
    pub weight: u32,
}

/// A non-empty table of values with positive total weight
#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    entries: Vec<Weighted<T>>,
    index: WeightedIndex<u32>,
}

impl<T> WeightedTable<T> {
    /// Build a table, rejecting empty tables and zero total weight
    pub fn new(entries: Vec<Weighted<T>>) -> Result<Self, TableError> {
        if entries.is_empty() {
            return Err(TableError::Empty);
        }
        entries
            .iter()
            .try_fold(0u32, |total, e| total.checked_add(e.weight))
            .ok_or_else(|| TableError::Weights("total weight overflows u32".to_string()))?;

        let index = WeightedIndex::new(entries.iter().map(|e| e.weight))
            .map_err(|e| TableError::Weights(e.to_string()))?;
        Ok(Self { entries, index })
    }

    /// Build a table from `(value, weight)` pairs
    pub fn from_pairs<I, V>(pairs: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (V, u32)>,
        V: Into<T>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(value, weight)| Weighted { value: value.into(), weight })
                .collect(),
        )
    }

    /// Pick one value according to the weights
    pub fn pick(&self, rng: &mut impl Rng) -> &T {
        &self.entries[self.index.sample(rng)].value
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all weights; fits in `u32` by construction
    pub fn total_weight(&self) -> u32 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|e| &e.value)
    }
}

impl<T: PartialEq> WeightedTable<T> {
    /// Configured probability of drawing `value`
    pub fn probability(&self, value: &T) -> f64 {
        let weight: u32 = self
            .entries
            .iter()
            .filter(|e| &e.value == value)
            .map(|e| e.weight)
            .sum();
        f64::from(weight) / f64::from(self.total_weight())
    }
}

impl<T: Serialize> Serialize for WeightedTable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for WeightedTable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<Weighted<T>>::deserialize(deserializer)?;
        WeightedTable::new(entries).map_err(serde::de::Error::custom)
    }
}
