// Copyright (c) 2022, MaidSafe.
// All rights reserved.
//
// This SAFE Network Software is licensed under the BSD-3-Clause license.
// Please see the LICENSE file for more details.

use std::fmt;

use super::{Record, TreeNode};

/// A lookup key accepted by every `Tree` query.
///
/// A needle names a node by id, by a record carrying that id in the
/// configured id field, or by a node previously obtained from a tree.
pub enum Needle<'a, R: Record> {
    /// an identifier value
    Id(R::Id),
    /// a record; its id field is read with the tree's configuration
    Record(&'a R),
    /// a node; only its id is used
    Node(&'a TreeNode<R>),
}

impl<'a, R: Record> Needle<'a, R> {
    /// builds an `Id` needle from anything convertible to the id type.
    pub fn id(id: impl Into<R::Id>) -> Self {
        Needle::Id(id.into())
    }
}

impl<'a, R: Record> From<&'a TreeNode<R>> for Needle<'a, R> {
    fn from(node: &'a TreeNode<R>) -> Self {
        Needle::Node(node)
    }
}

impl<'a, R: Record> Clone for Needle<'a, R> {
    fn clone(&self) -> Self {
        match self {
            Needle::Id(id) => Needle::Id(id.clone()),
            Needle::Record(r) => Needle::Record(*r),
            Needle::Node(n) => Needle::Node(*n),
        }
    }
}

impl<'a, R: Record> fmt::Debug for Needle<'a, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Needle::Id(id) => write!(f, "{:?}", id),
            Needle::Record(r) => write!(f, "{:?}", r),
            Needle::Node(n) => write!(f, "{:?}", n.id()),
        }
    }
}
