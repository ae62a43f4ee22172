// Copyright (c) 2022, MaidSafe.
// All rights reserved.
//
// This SAFE Network Software is licensed under the BSD-3-Clause license.
// Please see the LICENSE file for more details.

use serde::{Deserialize, Serialize};

use super::{Result, TreeError};

const DEFAULT_ID_PROPERTY: &str = "id";
const DEFAULT_PARENT_PROPERTY: &str = "parent";

/// Field names a `Tree` reads from its records.
///
/// Both names are fixed once the tree is built.  Missing fields fall back
/// to the defaults when deserializing, so a host application can embed
/// this in its own configuration with only the overrides it needs:
///
/// ```
/// use record_tree::TreeConfig;
///
/// let cfg: TreeConfig = serde_json::from_str(r#"{"parent_property": "owner"}"#).unwrap();
/// assert_eq!(cfg.id_property(), "id");
/// assert_eq!(cfg.parent_property(), "owner");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    id_property: String,
    parent_property: String,
}

impl TreeConfig {
    /// create a config with the default field names, `id` and `parent`.
    pub fn new() -> Self {
        Self::default()
    }

    /// sets the identifier field name
    pub fn with_id_property(mut self, name: impl Into<String>) -> Self {
        self.id_property = name.into();
        self
    }

    /// sets the parent-reference field name
    pub fn with_parent_property(mut self, name: impl Into<String>) -> Self {
        self.parent_property = name.into();
        self
    }

    /// returns the identifier field name
    #[inline]
    pub fn id_property(&self) -> &str {
        &self.id_property
    }

    /// returns the parent-reference field name
    #[inline]
    pub fn parent_property(&self) -> &str {
        &self.parent_property
    }

    /// checks that both names are non-empty and distinct.
    pub fn validate(&self) -> Result<()> {
        if self.id_property.is_empty() {
            return Err(TreeError::InvalidArgument(
                "id property name is empty".into(),
            ));
        }
        if self.parent_property.is_empty() {
            return Err(TreeError::InvalidArgument(
                "parent property name is empty".into(),
            ));
        }
        if self.id_property == self.parent_property {
            return Err(TreeError::InvalidArgument(format!(
                "id and parent property are both `{}`",
                self.id_property
            )));
        }
        Ok(())
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            id_property: DEFAULT_ID_PROPERTY.to_owned(),
            parent_property: DEFAULT_PARENT_PROPERTY.to_owned(),
        }
    }
}
