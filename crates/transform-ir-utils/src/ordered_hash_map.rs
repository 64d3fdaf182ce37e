use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};
use std::ops::{Deref, DerefMut};

use indexmap::IndexMap;

#[cfg(test)]
#[path = "ordered_hash_map_test.rs"]
mod test;

/// A hash map that iterates in insertion order. Equality takes the order into account.
#[derive(Clone, Debug)]
pub struct OrderedHashMap<Key, Value, BH = RandomState>(IndexMap<Key, Value, BH>);

impl<Key: Hash + Eq, Value, BH: BuildHasher + Default> Default for OrderedHashMap<Key, Value, BH> {
    fn default() -> Self {
        Self(IndexMap::default())
    }
}

impl<Key, Value, BH> Deref for OrderedHashMap<Key, Value, BH> {
    type Target = IndexMap<Key, Value, BH>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<Key, Value, BH> DerefMut for OrderedHashMap<Key, Value, BH> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<Key: Hash + Eq, Value, BH: BuildHasher + Default> FromIterator<(Key, Value)>
    for OrderedHashMap<Key, Value, BH>
{
    fn from_iter<T: IntoIterator<Item = (Key, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<Key: PartialEq, Value: PartialEq, BH> PartialEq for OrderedHashMap<Key, Value, BH> {
    fn eq(&self, other: &Self) -> bool {
        self.0.iter().eq(other.0.iter())
    }
}

impl<Key: Eq, Value: Eq, BH> Eq for OrderedHashMap<Key, Value, BH> {}
