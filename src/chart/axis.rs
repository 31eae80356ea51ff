//! Ordered axis storage.
//!
//! Insertion order is the angular order of the chart, so this is backed by an
//! [`IndexMap`] rather than a hash map.

use indexmap::IndexMap;

use crate::error::{ChartError, Result};

/// Ordered mapping from axis name to a non-negative value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisSet {
    entries: IndexMap<String, f32>,
}

fn check_value(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ChartError::InvalidAxisValue {
            name: name.to_string(),
            value,
        })
    }
}

impl AxisSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from ordered pairs, rejecting the whole batch on any bad value.
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, f32)>,
        K: Into<String>,
    {
        let mut entries = IndexMap::new();
        for (name, value) in pairs {
            let name = name.into();
            check_value(&name, value)?;
            entries.insert(name, value);
        }
        Ok(Self { entries })
    }

    /// Insert a new axis at the end, or replace the value of an existing one in place.
    pub fn insert(&mut self, name: impl Into<String>, value: f32) -> Result<()> {
        let name = name.into();
        check_value(&name, value)?;
        self.entries.insert(name, value);
        Ok(())
    }

    /// Remove an axis, keeping the relative order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<f32> {
        self.entries.shift_remove(name)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        self.entries.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest value, or `None` when there are no axes.
    pub fn max_value(&self) -> Option<f32> {
        self.entries.values().copied().reduce(f32::max)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl ExactSizeIterator<Item = f32> + '_ {
        self.entries.values().copied()
    }

    /// Snapshot of the current entries in angular order.
    pub fn to_map(&self) -> IndexMap<String, f32> {
        self.entries.clone()
    }
}
