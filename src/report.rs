use std::{
    collections::{btree_map::Entry, BTreeMap},
    ops::Index,
};

/// Named metrics accumulated over an episode
///
/// Keys are fixed at construction and iterate in sorted order, so the values returned
/// by [`take`](Report::take) line up with [`keys`](Report::keys).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Report {
    values: BTreeMap<&'static str, f64>,
}

impl Report {
    pub fn new(keys: Vec<&'static str>) -> Self {
        Self {
            values: keys.into_iter().map(|k| (k, 0.0)).collect(),
        }
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.values.keys().copied().collect()
    }

    /// Entry for an existing metric, or a vacant entry that will not be recorded by
    /// [`and_modify`](Entry::and_modify)
    pub fn entry(&mut self, key: &'static str) -> Entry<'_, &'static str, f64> {
        self.values.entry(key)
    }

    /// Return the current values and reset every metric to zero
    pub fn take(&mut self) -> BTreeMap<&'static str, f64> {
        let reset = self.values.keys().map(|&k| (k, 0.0)).collect();
        std::mem::replace(&mut self.values, reset)
    }
}

impl Index<&str> for Report {
    type Output = f64;

    fn index(&self, key: &str) -> &Self::Output {
        &self.values[key]
    }
}
