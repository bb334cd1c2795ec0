//! Fixed-key attribute tables and the default/override layering used by [`crate::theme`].
//!
//! An [`AttributeStore`] owns a key set that is frozen at construction; only values can change.
//! A [`LayeredAttributeStore`] shares one of those stores as its defaults and keeps a sparse set
//! of overrides on top. Overrides can only name keys the defaults already know, so a typo in an
//! attribute name is rejected instead of silently creating a new attribute.
//!
//! Defaults are shared through [`Arc`] and are never mutated through the layered store. If the
//! owner needs to change default values it should do so before sharing (for example with
//! [`Arc::make_mut`]).

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AttributeError {
    #[error("attribute key not found: {key}")]
    KeyNotFound { key: String },

    #[error("invalid attribute configuration: {0}")]
    InvalidConfiguration(String),
}

impl AttributeError {
    fn key_not_found(key: &impl Debug) -> Self {
        Self::KeyNotFound {
            key: format!("{key:?}"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AttributeStore<K, V> {
    keys: Vec<K>,
    values: Vec<V>,
    index: HashMap<K, usize>,
}

impl<K, V> Default for AttributeStore<K, V> {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K, V> AttributeStore<K, V>
where
    K: Eq + Hash + Clone + Debug,
{
    /// Builds a store whose key set is exactly the keys of `entries`, in order.
    pub fn new(entries: impl IntoIterator<Item = (K, V)>) -> Result<Self, AttributeError> {
        let mut keys = Vec::new();
        let mut values = Vec::new();
        let mut index = HashMap::new();
        for (key, value) in entries {
            if index.contains_key(&key) {
                return Err(AttributeError::InvalidConfiguration(format!(
                    "duplicate key {key:?}"
                )));
            }
            index.insert(key.clone(), keys.len());
            keys.push(key);
            values.push(value);
        }
        Ok(Self {
            keys,
            values,
            index,
        })
    }

    pub fn get(&self, key: &K) -> Result<&V, AttributeError> {
        self.slot(key).map(|i| &self.values[i])
    }

    pub fn get_mut(&mut self, key: &K) -> Result<&mut V, AttributeError> {
        let i = self.slot(key)?;
        Ok(&mut self.values[i])
    }

    /// Replaces the value for an existing key and returns the previous one.
    pub fn set(&mut self, key: &K, value: V) -> Result<V, AttributeError> {
        let i = self.slot(key)?;
        Ok(std::mem::replace(&mut self.values[i], value))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.keys.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.values.iter()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.keys.iter().zip(self.values.iter())
    }

    fn slot(&self, key: &K) -> Result<usize, AttributeError> {
        self.index
            .get(key)
            .copied()
            .ok_or_else(|| AttributeError::key_not_found(key))
    }
}

impl<K, V: PartialEq> AttributeStore<K, V> {
    pub fn contains_value(&self, value: &V) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

/// Infallible counterpart of [`AttributeStore::new`]: a repeated key keeps its first position and
/// takes the last value.
impl<K, V> FromIterator<(K, V)> for AttributeStore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(entries: I) -> Self {
        let mut store = Self::default();
        for (key, value) in entries {
            match store.index.get(&key) {
                Some(&i) => store.values[i] = value,
                None => {
                    store.index.insert(key.clone(), store.keys.len());
                    store.keys.push(key);
                    store.values.push(value);
                }
            }
        }
        store
    }
}

/// Default values shared from an [`AttributeStore`], shadowed per key by optional overrides.
///
/// Overrides live in a dense vector indexed by the defaults' slot, so resolution never hashes
/// twice and iteration follows the defaults' order.
#[derive(Clone, Debug)]
pub struct LayeredAttributeStore<K, V> {
    defaults: Arc<AttributeStore<K, V>>,
    overrides: Vec<Option<V>>,
}

impl<K, V> LayeredAttributeStore<K, V>
where
    K: Eq + Hash + Clone + Debug,
{
    pub fn new(defaults: Arc<AttributeStore<K, V>>) -> Self {
        let overrides = (0..defaults.len()).map(|_| None).collect();
        Self {
            defaults,
            overrides,
        }
    }

    /// Layers `overrides` over `defaults`. Fails without building anything if any key is
    /// unknown to the defaults.
    pub fn with_overrides(
        defaults: Arc<AttributeStore<K, V>>,
        overrides: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, AttributeError> {
        let mut store = Self::new(defaults);
        for (key, value) in overrides {
            store.set_override(key, value)?;
        }
        Ok(store)
    }

    pub fn builder() -> LayeredAttributeStoreBuilder<K, V> {
        LayeredAttributeStoreBuilder::default()
    }

    pub fn get(&self, key: &K) -> Result<&V, AttributeError> {
        let i = self.defaults.slot(key)?;
        Ok(self.resolve_slot(i))
    }

    pub fn get_default(&self, key: &K) -> Result<&V, AttributeError> {
        self.defaults.get(key)
    }

    pub fn get_override(&self, key: &K) -> Option<&V> {
        let i = self.defaults.slot(key).ok()?;
        self.overrides[i].as_ref()
    }

    pub fn has_override(&self, key: &K) -> bool {
        self.get_override(key).is_some()
    }

    pub fn set_override(&mut self, key: K, value: V) -> Result<(), AttributeError> {
        let i = match self.defaults.slot(&key) {
            Ok(i) => i,
            Err(err) => {
                tracing::debug!(key = ?key, "rejected override for unknown attribute");
                return Err(err);
            }
        };
        self.overrides[i] = Some(value);
        Ok(())
    }

    pub fn clear_override(&mut self, key: &K) -> bool {
        match self.defaults.slot(key) {
            Ok(i) => self.overrides[i].take().is_some(),
            Err(_) => false,
        }
    }

    pub fn clear_all_overrides(&mut self) {
        self.overrides.iter_mut().for_each(|o| *o = None);
    }

    pub fn override_count(&self) -> usize {
        self.overrides.iter().filter(|o| o.is_some()).count()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.defaults.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.defaults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }

    pub fn defaults(&self) -> &Arc<AttributeStore<K, V>> {
        &self.defaults
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.defaults.keys()
    }

    /// Resolved `(key, value)` pairs in the defaults' order. Each call starts over and reflects
    /// the overrides as they are at the time of iteration.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.defaults
            .keys
            .iter()
            .enumerate()
            .map(move |(i, k)| (k, self.resolve_slot(i)))
    }

    /// Only the keys that currently carry an override.
    pub fn overrides(&self) -> impl Iterator<Item = (&K, &V)> {
        self.defaults
            .keys
            .iter()
            .zip(self.overrides.iter())
            .filter_map(|(k, o)| o.as_ref().map(|v| (k, v)))
    }

    fn resolve_slot(&self, i: usize) -> &V {
        self.overrides[i]
            .as_ref()
            .unwrap_or(&self.defaults.values[i])
    }
}

impl<K, V> LayeredAttributeStore<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    /// Flattens the current resolution into a standalone store, e.g. to serve as the defaults
    /// of another layer.
    pub fn resolve(&self) -> AttributeStore<K, V> {
        AttributeStore {
            keys: self.defaults.keys.clone(),
            values: self.iter().map(|(_, v)| v.clone()).collect(),
            index: self.defaults.index.clone(),
        }
    }
}

impl<K, V: PartialEq> LayeredAttributeStore<K, V> {
    pub fn contains_value(&self, value: &V) -> bool {
        self.defaults.contains_value(value) || self.overrides.iter().flatten().any(|v| v == value)
    }
}

impl<'a, K, V> IntoIterator for &'a LayeredAttributeStore<K, V>
where
    K: Eq + Hash + Clone + Debug,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Box<dyn Iterator<Item = (&'a K, &'a V)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

pub struct LayeredAttributeStoreBuilder<K, V> {
    defaults: Option<Arc<AttributeStore<K, V>>>,
    overrides: Vec<(K, V)>,
}

impl<K, V> Default for LayeredAttributeStoreBuilder<K, V> {
    fn default() -> Self {
        Self {
            defaults: None,
            overrides: Vec::new(),
        }
    }
}

impl<K, V> LayeredAttributeStoreBuilder<K, V>
where
    K: Eq + Hash + Clone + Debug,
{
    pub fn defaults(mut self, defaults: Arc<AttributeStore<K, V>>) -> Self {
        self.defaults = Some(defaults);
        self
    }

    pub fn set_override(mut self, key: K, value: V) -> Self {
        self.overrides.push((key, value));
        self
    }

    pub fn overrides(mut self, overrides: impl IntoIterator<Item = (K, V)>) -> Self {
        self.overrides.extend(overrides);
        self
    }

    pub fn build(self) -> Result<LayeredAttributeStore<K, V>, AttributeError> {
        let Some(defaults) = self.defaults else {
            return Err(AttributeError::InvalidConfiguration(
                "layered store requires a defaults store".to_string(),
            ));
        };
        LayeredAttributeStore::with_overrides(defaults, self.overrides)
    }
}
