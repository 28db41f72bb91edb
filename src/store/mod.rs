// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Heterogeneous key/value store with per-key type pinning.
//!
//! A [`TypedStore`] maps keys to values of arbitrary types, but each key's type
//! is fixed by its first `set`. Every later write or read is checked against the
//! recorded [`TypeId`], and lookups go through `downcast_ref`, which never panics.
//! Tasks use a store as their result container.
//!
//! # Example
//! ```rust
//! use the_switchboard::store::TypedStore;
//! use the_switchboard::errors::StoreError;
//!
//! let mut store: TypedStore = TypedStore::new();
//! store.set("attempts".to_string(), 3_u32).unwrap();
//!
//! assert_eq!(store.get::<u32, _>("attempts"), Ok(&3));
//! assert!(matches!(
//!     store.set("attempts".to_string(), 3_i32),
//!     Err(StoreError::TypeMismatch { .. })
//! ));
//! assert_eq!(store.try_get::<i32, _>("attempts"), None);
//! ```

use std::any::{type_name, Any, TypeId};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::errors::StoreError;

/// One stored value plus the type tag recorded at first insertion.
struct Entry {
    type_id: TypeId,
    type_name: &'static str,
    value: Box<dyn Any + Send + Sync>,
}

impl Entry {
    fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            value: Box::new(value),
        }
    }

    fn mismatch<T: Any>(&self, key: String) -> StoreError {
        StoreError::TypeMismatch {
            key,
            stored: self.type_name,
            requested: type_name::<T>(),
        }
    }
}

/// Key to dynamically typed value mapping; see the module docs.
///
/// Not internally synchronized. Share a finished store behind an `Arc`, or wrap
/// it in a lock when it must be written from several threads.
pub struct TypedStore<K = String> {
    entries: HashMap<K, Entry>,
}

impl<K: Eq + Hash> TypedStore<K> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Insert `value` under `key`, or overwrite the existing value if it has the same type.
    ///
    /// Fails with [`StoreError::TypeMismatch`] when the key was first written with
    /// another type; the stored value is left unchanged in that case.
    pub fn set<T>(&mut self, key: K, value: T) -> Result<(), StoreError>
    where
        T: Any + Send + Sync,
        K: fmt::Display,
    {
        match self.entries.get_mut(&key) {
            Some(entry) if entry.type_id != TypeId::of::<T>() => {
                Err(entry.mismatch::<T>(key.to_string()))
            }
            Some(entry) => {
                entry.value = Box::new(value);
                Ok(())
            }
            None => {
                self.entries.insert(key, Entry::new(value));
                Ok(())
            }
        }
    }

    /// Borrow the value under `key` as a `T`.
    pub fn get<T, Q>(&self, key: &Q) -> Result<&T, StoreError>
    where
        T: Any,
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Display + ?Sized,
    {
        let entry = self.entries.get(key).ok_or_else(|| StoreError::KeyNotFound {
            key: key.to_string(),
        })?;
        entry
            .value
            .downcast_ref::<T>()
            .ok_or_else(|| entry.mismatch::<T>(key.to_string()))
    }

    /// Mutably borrow the value under `key` as a `T`.
    pub fn get_mut<T, Q>(&mut self, key: &Q) -> Result<&mut T, StoreError>
    where
        T: Any,
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Display + ?Sized,
    {
        let entry = self
            .entries
            .get_mut(key)
            .ok_or_else(|| StoreError::KeyNotFound {
                key: key.to_string(),
            })?;
        let stored = entry.type_name;
        entry
            .value
            .downcast_mut::<T>()
            .ok_or_else(|| StoreError::TypeMismatch {
                key: key.to_string(),
                stored,
                requested: type_name::<T>(),
            })
    }

    /// Soft lookup: a copy of the value, or `None` on a missing key or a type mismatch.
    pub fn try_get<T, Q>(&self, key: &Q) -> Option<T>
    where
        T: Any + Clone,
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries
            .get(key)
            .and_then(|entry| entry.value.downcast_ref::<T>())
            .cloned()
    }

    /// Remove the entry under `key`; absent keys are ignored.
    pub fn erase<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.remove(key);
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    /// Name of the type pinned to `key`, for diagnostics.
    pub fn type_name<Q>(&self, key: &Q) -> Option<&'static str>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).map(|entry| entry.type_name)
    }
}

impl<K: Eq + Hash> Default for TypedStore<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug> fmt::Debug for TypedStore<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, e)| (k, e.type_name)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get_returns_value() {
        let mut store: TypedStore = TypedStore::new();
        store.set("name".to_string(), "relay".to_string()).unwrap();
        store.set("port".to_string(), 8080_u16).unwrap();
        store.set("bytes".to_string(), vec![1_u8, 2, 3]).unwrap();

        assert_eq!(store.get::<String, _>("name").unwrap(), "relay");
        assert_eq!(*store.get::<u16, _>("port").unwrap(), 8080);
        assert_eq!(store.get::<Vec<u8>, _>("bytes").unwrap(), &vec![1, 2, 3]);
        assert_eq!(store.size(), 3);
    }

    #[test]
    fn test_same_type_set_overwrites_in_place() {
        let mut store: TypedStore = TypedStore::new();
        store.set("count".to_string(), 1_i64).unwrap();
        store.set("count".to_string(), 2_i64).unwrap();

        assert_eq!(*store.get::<i64, _>("count").unwrap(), 2);
        assert_eq!(store.size(), 1);
    }

    #[test]
    fn test_different_type_set_fails_and_keeps_original() {
        let mut store: TypedStore = TypedStore::new();
        store.set("count".to_string(), 7_i32).unwrap();

        let err = store.set("count".to_string(), 7_u32).unwrap_err();
        assert_eq!(
            err,
            StoreError::TypeMismatch {
                key: "count".to_string(),
                stored: "i32",
                requested: "u32",
            }
        );
        assert_eq!(*store.get::<i32, _>("count").unwrap(), 7);
    }

    #[test]
    fn test_get_absent_key_fails_but_try_get_is_soft() {
        let store: TypedStore = TypedStore::new();

        assert_eq!(
            store.get::<String, _>("missing"),
            Err(StoreError::KeyNotFound {
                key: "missing".to_string()
            })
        );
        assert_eq!(store.try_get::<String, _>("missing"), None);
    }

    #[test]
    fn test_get_with_wrong_type_fails() {
        let mut store: TypedStore = TypedStore::new();
        store.set("flag".to_string(), true).unwrap();

        assert!(matches!(
            store.get::<u8, _>("flag"),
            Err(StoreError::TypeMismatch { stored: "bool", .. })
        ));
        assert_eq!(store.try_get::<u8, _>("flag"), None);
        assert_eq!(store.try_get::<bool, _>("flag"), Some(true));
    }

    #[test]
    fn test_get_mut_updates_value() {
        let mut store: TypedStore = TypedStore::new();
        store.set("log".to_string(), Vec::<String>::new()).unwrap();

        store
            .get_mut::<Vec<String>, _>("log")
            .unwrap()
            .push("entry".to_string());

        assert_eq!(store.get::<Vec<String>, _>("log").unwrap().len(), 1);
        assert!(store.get_mut::<String, _>("log").is_err());
    }

    #[test]
    fn test_erase_is_noop_for_missing_key() {
        let mut store: TypedStore = TypedStore::new();
        store.set("a".to_string(), 1_u8).unwrap();

        store.erase("missing");
        assert_eq!(store.size(), 1);

        store.erase("a");
        assert!(store.is_empty());
        assert!(!store.contains("a"));
    }

    #[test]
    fn test_erase_releases_type_pin() {
        let mut store: TypedStore = TypedStore::new();
        store.set("slot".to_string(), 1_u8).unwrap();
        store.erase("slot");

        store.set("slot".to_string(), "text".to_string()).unwrap();
        assert_eq!(store.type_name("slot"), Some(type_name::<String>()));
    }

    #[test]
    fn test_non_string_keys() {
        let mut store: TypedStore<u32> = TypedStore::new();
        store.set(1, 'x').unwrap();

        assert_eq!(store.get::<char, _>(&1), Ok(&'x'));
        assert_eq!(store.keys().copied().collect::<Vec<_>>(), vec![1]);
    }
}
