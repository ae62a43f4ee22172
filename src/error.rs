// Copyright (c) 2022, MaidSafe.
// All rights reserved.
//
// This SAFE Network Software is licensed under the BSD-3-Clause license.
// Please see the LICENSE file for more details.

use thiserror::Error;

/// Errors raised by `Tree` operations.
///
/// `TreeError` is the umbrella type: matching on it catches every
/// tree failure, matching on a variant catches one kind.  Ids and records
/// are carried in their `Debug` form so the error is not generic over them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// Malformed construction arguments.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A record lacks the configured id or parent field, or the id field
    /// holds no usable identifier.
    #[error("property `{property}` missing or unusable in record {record}")]
    PropertyError {
        /// name of the offending field
        property: String,
        /// the record, debug-formatted
        record: String,
    },

    /// A needle or parent reference does not resolve to a node.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// Parent references among newly added records form a loop, so the
    /// records never reach a root.
    #[error("cyclic parent reference at node {0}")]
    CyclicReference(String),

    /// A record was added with an id already present in the tree.
    #[error("duplicate identifier: {0}")]
    DuplicateIdentifier(String),
}

impl TreeError {
    pub(crate) fn property(property: &str, record: &impl std::fmt::Debug) -> Self {
        Self::PropertyError {
            property: property.to_owned(),
            record: format!("{:?}", record),
        }
    }

    pub(crate) fn not_found(id: &impl std::fmt::Debug) -> Self {
        Self::NodeNotFound(format!("{:?}", id))
    }

    pub(crate) fn cycle(id: &impl std::fmt::Debug) -> Self {
        Self::CyclicReference(format!("{:?}", id))
    }

    pub(crate) fn duplicate(id: &impl std::fmt::Debug) -> Self {
        Self::DuplicateIdentifier(format!("{:?}", id))
    }
}

/// Result alias for tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;
