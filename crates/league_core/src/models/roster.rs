//! Insertion-ordered, identifier-keyed child collection shared by every level
//! of the association tree.

use rustc_hash::FxHashMap;

/// Anything addressed by a numeric identifier in a description file.
pub trait Identified {
    fn id(&self) -> u32;
}

/// Ordered collection with O(1) lookup by identifier.
///
/// Iteration follows first-insertion order. Inserting an identifier that is
/// already present replaces the entry in place and returns the old value.
#[derive(Debug, Clone)]
pub struct Roster<T> {
    entries: Vec<T>,
    index: FxHashMap<u32, usize>,
}

impl<T> Default for Roster<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }
}

impl<T: Identified> Roster<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry
    pub fn insert(&mut self, item: T) -> Option<T> {
        let id = item.id();
        match self.index.get(&id) {
            Some(&position) => Some(std::mem::replace(&mut self.entries[position], item)),
            None => {
                self.index.insert(id, self.entries.len());
                self.entries.push(item);
                None
            }
        }
    }

    pub fn get(&self, id: u32) -> Option<&T> {
        self.index.get(&id).map(|&position| &self.entries[position])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }
}

impl<'a, T: Identified> IntoIterator for &'a Roster<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Identified> FromIterator<T> for Roster<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut roster = Roster::new();
        for item in iter {
            roster.insert(item);
        }
        roster
    }
}
