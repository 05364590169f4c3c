//! Insertion-ordered list with a unique derived key per item.

use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

use crate::{CollectionError, CollectionResult};

/// An item that knows its own key inside an [`IndexedList`].
pub trait Keyed {
    /// The key this item is indexed under.
    fn key(&self) -> String;
}

/// An ordered sequence of items, each reachable by a key derived from it.
///
/// At most one item per key is held at any time. Items added with
/// [`push`](Self::push) keep their insertion order, [`add_or_update`](Self::add_or_update)
/// replaces in place, and [`remove`](Self::remove) closes the gap.
///
/// Uniqueness is checked when an item enters the list. The list hands out
/// only shared references, but an item with interior mutability can still
/// change its key afterwards; the list will not notice.
pub struct IndexedList<T, F = fn(&T) -> String> {
    items: Vec<T>,
    positions: HashMap<String, usize>,
    index_fn: F,
}

impl<T: Keyed> IndexedList<T> {
    /// Creates an empty list keyed by [`Keyed::key`].
    #[must_use]
    pub fn keyed() -> Self {
        Self::new(T::key)
    }
}

impl<T: Keyed> Default for IndexedList<T> {
    fn default() -> Self {
        Self::keyed()
    }
}

impl<T, F> IndexedList<T, F>
where
    F: Fn(&T) -> String,
{
    /// Creates an empty list using `index_fn` to derive keys.
    pub fn new(index_fn: F) -> Self {
        Self {
            items: Vec::new(),
            positions: HashMap::new(),
            index_fn,
        }
    }

    /// Creates a list holding `items` in order.
    ///
    /// Fails on the first duplicate key.
    pub fn from_items<I>(index_fn: F, items: I) -> CollectionResult<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut list = Self::new(index_fn);
        list.push(items)?;
        Ok(list)
    }

    /// Appends one item.
    ///
    /// Fails with [`CollectionError::DuplicateKey`] if its key is already
    /// present; the list is left unchanged in that case.
    pub fn push_single(&mut self, item: T) -> CollectionResult<()> {
        let key = (self.index_fn)(&item);
        if self.positions.contains_key(&key) {
            debug!(%key, "rejected item with duplicate key");
            return Err(CollectionError::DuplicateKey { key });
        }
        self.positions.insert(key, self.items.len());
        self.items.push(item);
        Ok(())
    }

    /// Appends every item in order.
    ///
    /// Stops at the first duplicate. Items appended before it stay in the list.
    pub fn push<I>(&mut self, items: I) -> CollectionResult<()>
    where
        I: IntoIterator<Item = T>,
    {
        items.into_iter().try_for_each(|item| self.push_single(item))
    }

    /// Removes the item with `key` and returns it.
    ///
    /// Returns `None` when no item has that key. Later items shift down by one.
    pub fn remove(&mut self, key: &str) -> Option<T> {
        let removed_at = self.positions.remove(key)?;
        let item = self.items.remove(removed_at);
        for position in self.positions.values_mut() {
            if *position > removed_at {
                *position -= 1;
            }
        }
        Some(item)
    }

    /// Replaces the item with the same key in place, or appends it.
    ///
    /// Returns the replaced item, if there was one.
    pub fn add_or_update(&mut self, item: T) -> Option<T> {
        let key = (self.index_fn)(&item);
        match self.positions.get(&key) {
            Some(&position) => Some(std::mem::replace(&mut self.items[position], item)),
            None => {
                self.positions.insert(key, self.items.len());
                self.items.push(item);
                None
            }
        }
    }

    /// Derives the key of `item` without inserting it.
    pub fn key_of(&self, item: &T) -> String {
        (self.index_fn)(item)
    }
}

impl<T, F> IndexedList<T, F> {
    /// The items in list order.
    #[must_use]
    pub fn to_array(&self) -> &[T] {
        &self.items
    }

    /// Consumes the list, returning the items in order.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// Returns the item with `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&T> {
        self.positions.get(key).map(|&position| &self.items[position])
    }

    /// Returns the position of the item with `key`.
    #[must_use]
    pub fn position(&self, key: &str) -> Option<usize> {
        self.positions.get(key).copied()
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Keys in list order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keyed: Vec<(&str, usize)> = self
            .positions
            .iter()
            .map(|(key, &position)| (key.as_str(), position))
            .collect();
        keyed.sort_unstable_by_key(|&(_, position)| position);
        keyed.into_iter().map(|(key, _)| key).collect()
    }
}

impl<'a, T, F> IntoIterator for &'a IndexedList<T, F> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Clone, F: Clone> Clone for IndexedList<T, F> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            positions: self.positions.clone(),
            index_fn: self.index_fn.clone(),
        }
    }
}

impl<T: fmt::Debug, F> fmt::Debug for IndexedList<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.items).finish()
    }
}

/// Serializes as a plain array of items.
impl<T: Serialize, F> Serialize for IndexedList<T, F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}
