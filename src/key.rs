// Copyright (c) 2022, MaidSafe.
// All rights reserved.
//
// This SAFE Network Software is licensed under the BSD-3-Clause license.
// Please see the LICENSE file for more details.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A scalar identifier read from a dynamic record.
///
/// JSON records identify themselves (and their parent) with either a number
/// or a string, so `Key` covers both.  Numbers and strings never compare
/// equal, ie `1` and `"1"` are distinct keys.  Integral numbers are always
/// held as `Int`, so `1.0` and `1` are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    /// integer identifier
    Int(i64),
    /// non-integral (or out of i64 range) numeric identifier
    Float(FloatKey),
    /// string identifier
    Str(String),
}

/// A float usable as a map key.
///
/// Equality, hashing and ordering go by bit pattern, with `-0.0` folded
/// into `0.0`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct FloatKey(f64);

impl FloatKey {
    /// returns the wrapped value
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for FloatKey {
    fn from(f: f64) -> Self {
        if f == 0.0 {
            FloatKey(0.0)
        } else {
            FloatKey(f)
        }
    }
}

impl From<FloatKey> for f64 {
    fn from(k: FloatKey) -> Self {
        k.0
    }
}

impl PartialEq for FloatKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatKey {}

impl Hash for FloatKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl Ord for FloatKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for FloatKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Key {
    /// returns true for values a parent reference treats as "no parent",
    /// ie `0` and the empty string.
    pub fn is_falsy(&self) -> bool {
        match self {
            Key::Int(i) => *i == 0,
            Key::Float(f) => f.value() == 0.0,
            Key::Str(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{}", i),
            Key::Float(x) => write!(f, "{}", x.value()),
            Key::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_owned())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

// i64::MAX as f64 rounds up to 2^63, which is already out of range.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Integral values in i64 range become `Int`, the rest `Float`.
impl From<f64> for Key {
    fn from(f: f64) -> Self {
        if f.fract() == 0.0 && f >= -I64_LIMIT && f < I64_LIMIT {
            Key::Int(f as i64)
        } else {
            Key::Float(FloatKey::from(f))
        }
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Int(i64::from(i))
    }
}

impl From<u32> for Key {
    fn from(i: u32) -> Self {
        Key::Int(i64::from(i))
    }
}
