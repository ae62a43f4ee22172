// Copyright (c) 2022, MaidSafe.
// All rights reserved.
//
// This SAFE Network Software is licensed under the BSD-3-Clause license.
// Please see the LICENSE file for more details.

//! Implements `Record`, the accessor trait a `Tree` uses to read the
//! identifier and parent reference out of caller supplied data.
//!
//! The tree is configured with two field names (see `TreeConfig`).  A
//! record type decides how a field name maps onto its own data: structs
//! usually match on the name, while dynamic records such as
//! `serde_json::Value` look the field up.

use serde_json::{Map, Value};
use std::fmt::Debug;

use super::{Key, TreeId};

/// Record trait.  Records are application-defined pieces of data that are
/// indexed by a `Tree`.
pub trait Record: Debug {
    /// identifier type shared by the id and parent fields.
    type Id: TreeId;

    /// returns true if the record has a field called `name`,
    /// regardless of its value.
    fn has_field(&self, name: &str) -> bool;

    /// returns the identifier stored in field `name`, or None if the
    /// field is absent or does not hold a usable identifier.
    fn id(&self, name: &str) -> Option<Self::Id>;

    /// returns the parent reference stored in field `name`.
    ///
    /// The default treats a missing or unusable identifier as a root.
    fn parent_id(&self, name: &str) -> Parent<Self::Id> {
        match self.id(name) {
            Some(id) => Parent::Id(id),
            None => Parent::Root,
        }
    }
}

/// What a record's parent field says about its place in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parent<ID> {
    /// no parent, the record is a root
    Root,
    /// the id of the parent record
    Id(ID),
    /// a value that names a parent but can never match an identifier,
    /// carried in printable form
    Unusable(String),
}

fn key_of(value: &Value) -> Option<Key> {
    match value {
        Value::String(s) => Some(Key::Str(s.clone())),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(Key::Int(i)),
            None => n.as_f64().map(Key::from),
        },
        _ => None,
    }
}

// null, false, 0 and "" mean root.  Any other value must be a scalar key.
fn parent_of(value: &Value) -> Parent<Key> {
    match value {
        Value::Null | Value::Bool(false) => Parent::Root,
        _ => match key_of(value) {
            Some(k) if k.is_falsy() => Parent::Root,
            Some(k) => Parent::Id(k),
            None => Parent::Unusable(value.to_string()),
        },
    }
}

impl Record for Map<String, Value> {
    type Id = Key;

    fn has_field(&self, name: &str) -> bool {
        self.contains_key(name)
    }

    fn id(&self, name: &str) -> Option<Key> {
        self.get(name).and_then(key_of)
    }

    fn parent_id(&self, name: &str) -> Parent<Key> {
        self.get(name).map_or(Parent::Root, parent_of)
    }
}

/// Only JSON objects have fields; every other value is a record
/// without any.
impl Record for Value {
    type Id = Key;

    fn has_field(&self, name: &str) -> bool {
        self.as_object().map_or(false, |m| m.has_field(name))
    }

    fn id(&self, name: &str) -> Option<Key> {
        self.as_object().and_then(|m| m.id(name))
    }

    fn parent_id(&self, name: &str) -> Parent<Key> {
        self.as_object().map_or(Parent::Root, |m| m.parent_id(name))
    }
}
