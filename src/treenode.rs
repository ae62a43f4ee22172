// Copyright 2020 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under the MIT license <LICENSE-MIT
// http://opensource.org/licenses/MIT> or the Modified BSD license <LICENSE-BSD
// https://opensource.org/licenses/BSD-3-Clause>, at your option. This file may not be copied,
// modified, or distributed except according to those terms. Please review the Licences for the
// specific language governing permissions and limitations relating to use of the SAFE Network
// Software.

//! Implements TreeNode, ie the wrapper a Tree keeps for every record.
//!
//! For usage/examples, see:
//!   tests/tree.rs

use std::collections::HashSet;

use super::Record;

/// Represents a Node in a Tree.
///
/// A node owns its record and links to other nodes by id only.  The
/// linking fields are maintained by the owning `Tree`: `children` holds
/// direct children, `parents` every ancestor (nearest first) and `branch`
/// every descendant plus the node itself.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode<R: Record> {
    id: R::Id,
    item: R,
    parent: Option<R::Id>,
    pub(crate) children: HashSet<R::Id>,
    pub(crate) parents: Vec<R::Id>,
    pub(crate) branch: HashSet<R::Id>,
}

impl<R: Record> TreeNode<R> {
    /// creates an unlinked TreeNode
    pub(crate) fn new(id: R::Id, parent: Option<R::Id>, item: R) -> Self {
        Self {
            id,
            item,
            parent,
            children: HashSet::new(),
            parents: Vec::new(),
            branch: HashSet::new(),
        }
    }

    /// returns id reference
    #[inline]
    pub fn id(&self) -> &R::Id {
        &self.id
    }

    /// returns the wrapped record
    #[inline]
    pub fn item(&self) -> &R {
        &self.item
    }

    /// returns parent id, or None for a root
    #[inline]
    pub fn parent_id(&self) -> Option<&R::Id> {
        self.parent.as_ref()
    }

    /// returns ids of direct children
    #[inline]
    pub fn children(&self) -> &HashSet<R::Id> {
        &self.children
    }

    /// returns ids of all ancestors, nearest first
    #[inline]
    pub fn parents(&self) -> &[R::Id] {
        &self.parents
    }

    /// returns ids of this node and all its descendants
    #[inline]
    pub fn branch(&self) -> &HashSet<R::Id> {
        &self.branch
    }

    /// depth of the node; roots are at level 1.
    pub fn level(&self) -> usize {
        self.parents.len() + 1
    }

    /// true if the node has no parent
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// true if the node has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
