// Copyright 2020 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under the MIT license <LICENSE-MIT
// http://opensource.org/licenses/MIT> or the Modified BSD license <LICENSE-BSD
// https://opensource.org/licenses/BSD-3-Clause>, at your option. This file may not be copied,
// modified, or distributed except according to those terms. Please review the Licences for the
// specific language governing permissions and limitations relating to use of the SAFE Network
// Software.

//! Implements a Tree index over flat records.
//!
//! Records are caller-defined values that name themselves with an id
//! field and point at their parent with a parent field.  A `Tree` wraps
//! each record in a `TreeNode` and answers structural queries: branch
//! (subtree), ancestors, root, leaves and containment.
//!
//! For usage/examples, see:
//!   tests/tree.rs
//!
//! ```
//! use record_tree::{Needle, Tree};
//! use serde_json::json;
//!
//! let mut tree = Tree::new();
//! tree.add_nodes(vec![
//!     json!({"id": 1, "parent": null}),
//!     json!({"id": 2, "parent": 1}),
//! ])
//! .unwrap();
//!
//! assert_eq!(tree.root(Needle::id(2)).unwrap()["id"], 1);
//! assert!(tree.is_in_tree(Needle::id(2), Needle::id(1)).unwrap());
//! ```
#![deny(missing_docs)]

/// This module contains a Tree.
pub mod tree;

/// This module contains `TreeConfig`.
pub mod config;

/// This module contains `TreeError`.
pub mod error;

/// This module contains `Key`.
pub mod key;

/// This module contains `Needle`.
pub mod needle;

/// This module contains `Record`.
pub mod record;

/// This module contains `TreeId`.
pub mod treeid;

/// This module contains `TreeNode`.
pub mod treenode;

pub use self::{
    config::TreeConfig,
    error::{Result, TreeError},
    key::{FloatKey, Key},
    needle::Needle,
    record::{Parent, Record},
    tree::Tree,
    treeid::TreeId,
    treenode::TreeNode,
};
