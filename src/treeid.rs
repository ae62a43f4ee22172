// Copyright (c) 2022, MaidSafe.
// All rights reserved.
//
// This SAFE Network Software is licensed under the BSD-3-Clause license.
// Please see the LICENSE file for more details.

use std::fmt::Debug;
use std::hash::Hash;

/// `TreeId` trait. `TreeId` are unique identifiers for each record in a tree.
///
/// `Debug` is required so that failures can name the offending id.
pub trait TreeId: Eq + Clone + Hash + Debug {}
impl<ID: Eq + Clone + Hash + Debug> TreeId for ID {}
