//! Namespace resolution over the deduplicated descriptor sequence.
//!
//! Two passes, in order:
//! - registry build: every class registers its first namespace segment as a
//!   `namespace` key, or its own name as a `type` key when it lives at the root;
//! - nested-type synthesis: a descriptor whose namespace is the qualified name
//!   of a known class becomes a field on that class.
//!
//! All first-occurrence-wins bookkeeping goes through [`insert_if_absent`].
use std::hash::Hash;

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Serialize;
use tracing::debug;

use crate::ir::{Field, TypeDescriptor, TypeInfo};

/// Insert `value` under `key` unless the key is already taken.
/// Returns `true` when the value was stored.
pub fn insert_if_absent<K: Hash + Eq, V>(map: &mut IndexMap<K, V>, key: K, value: V) -> bool {
    match map.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(value);
            true
        }
        Entry::Occupied(_) => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NamespaceKind {
    Namespace,
    Type,
}

/// Root-level keys of the `CS` table, in registration order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct NamespaceRegistry {
    entries: IndexMap<String, NamespaceKind>,
}

impl NamespaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the root key a type is reachable through. A key keeps the kind
    /// it was first registered with.
    pub fn register(&mut self, info: &TypeInfo) -> bool {
        match info.root_namespace() {
            Some(root) => insert_if_absent(&mut self.entries, root.to_string(), NamespaceKind::Namespace),
            None => insert_if_absent(&mut self.entries, info.name.clone(), NamespaceKind::Type),
        }
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<NamespaceKind> {
        self.entries.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, NamespaceKind)> {
        self.entries.iter().map(|(key, kind)| (key.as_str(), *kind))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

pub struct Deduped {
    pub types: Vec<TypeDescriptor>,
    pub dropped: usize,
}

/// Keep the first descriptor per `(namespace, name)`; later ones are dropped
/// whole, members included.
pub fn dedup<I>(types: I) -> Deduped
where
    I: IntoIterator<Item = TypeDescriptor>,
{
    let mut seen = IndexMap::<(String, String), ()>::new();
    let mut kept = Vec::new();
    let mut dropped = 0;
    for ty in types {
        let key = (ty.namespace().to_string(), ty.name().to_string());
        if insert_if_absent(&mut seen, key, ()) {
            kept.push(ty);
        } else {
            debug!(ty = %ty.qualified_name(), "dropping duplicate descriptor");
            dropped += 1;
        }
    }
    Deduped { types: kept, dropped }
}

pub struct Resolution {
    pub types: Vec<TypeDescriptor>,
    pub registry: NamespaceRegistry,
}

pub fn resolve(mut types: Vec<TypeDescriptor>) -> Resolution {
    let mut registry = NamespaceRegistry::new();
    let mut classes = IndexMap::<String, usize>::new();

    for (index, ty) in types.iter().enumerate() {
        if let TypeDescriptor::Class(class) = ty {
            registry.register(&class.info);
            insert_if_absent(&mut classes, class.info.qualified_name(), index);
        }
    }

    let nested: Vec<(usize, Field)> = types
        .iter()
        .filter_map(|ty| {
            let info = ty.info();
            if info.is_namespace || info.namespace.is_empty() {
                return None;
            }
            let &parent = classes.get(&info.namespace)?;
            Some((parent, Field {
                name: info.name.clone(),
                type_name: info.qualified_name(),
                comment: info.comment.clone(),
                location: info.location.clone(),
            }))
        })
        .collect();

    for (parent, field) in nested {
        if let TypeDescriptor::Class(class) = &mut types[parent] {
            debug!(parent = %class.info.qualified_name(), field = %field.name, "nested type field");
            class.fields.push(field);
        }
    }

    Resolution { types, registry }
}
