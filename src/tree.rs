// Copyright (c) 2022, MaidSafe.
// All rights reserved.
//
// This SAFE Network Software is licensed under the BSD-3-Clause license.
// Please see the LICENSE file for more details.

use log::{debug, trace, warn};
use std::collections::hash_map::Values;
use std::collections::{HashMap, HashSet};
use std::fmt;

use super::{Needle, Parent, Record, Result, TreeConfig, TreeError, TreeId, TreeNode};

/// Implements `Tree`, a parent/child/ancestor index over flat records.
///
/// Each record names itself through the configured id field and its
/// parent through the configured parent field.  The tree wraps every
/// record in a `TreeNode` and keeps the structural links of all nodes
/// (children, ancestors, branch) up to date across insertion and removal.
///
/// ```text
/// id    | parent
/// --------------
/// 1       -
/// 1-1     1
/// 1-1-1   1-1
/// 1-2     1
/// 2       -
///
///              1          2
///          1-1   1-2
///        1-1-1
/// ```
///
/// Queries accept a `Needle`: an id, a record, or a node.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree<R: Record> {
    config: TreeConfig,
    nodes: HashMap<R::Id, TreeNode<R>>, // tree_nodes, indexed by id.
}

impl<R: Record> Tree<R> {
    /// create a new, empty Tree reading the `id` and `parent` fields.
    pub fn new() -> Self {
        Self {
            config: TreeConfig::default(),
            nodes: HashMap::new(),
        }
    }

    /// create a new, empty Tree with custom field names.
    pub fn with_config(config: TreeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            nodes: HashMap::new(),
        })
    }

    /// create a Tree and index `records` into it.
    pub fn from_records<I>(records: I, config: TreeConfig) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
    {
        let mut tree = Self::with_config(config)?;
        tree.add_nodes(records)?;
        Ok(tree)
    }

    /// returns config reference
    #[inline]
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// adds a single record.  See `add_nodes`.
    pub fn add_node(&mut self, item: R) -> Result<&mut Self> {
        self.add_nodes(std::iter::once(item))
    }

    /// adds a batch of records and re-links the whole tree.
    ///
    /// Within a batch, records may reference parents that appear later in
    /// the same batch.  Processing is fail-fast without rollback: records
    /// taken before the first invalid one (missing field, duplicate id,
    /// parent value that cannot be an identifier) stay in the tree and are
    /// fully linked when the error is returned.
    /// Records that do not lead up to a root once the batch is in, because
    /// a parent is missing or the references loop, are dropped and the
    /// first such failure is reported.
    pub fn add_nodes<I>(&mut self, items: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = R>,
    {
        let mut added: Vec<R::Id> = Vec::new();
        let mut failure = None;
        for item in items {
            match self.insert_unlinked(item) {
                Ok(id) => added.push(id),
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        let unrooted = self.evict_unrooted(&added);
        self.reindex();
        debug!(
            "indexed batch of {} records, tree holds {} nodes",
            added.len(),
            self.nodes.len()
        );

        match failure.or(unrooted) {
            Some(e) => {
                warn!("add_nodes stopped early: {}", e);
                Err(e)
            }
            None => Ok(self),
        }
    }

    // validates a record and stores it without structural links.
    fn insert_unlinked(&mut self, item: R) -> Result<R::Id> {
        let id_property = self.config.id_property();
        let parent_property = self.config.parent_property();

        if !item.has_field(id_property) {
            return Err(TreeError::property(id_property, &item));
        }
        if !item.has_field(parent_property) {
            return Err(TreeError::property(parent_property, &item));
        }
        let id = item
            .id(id_property)
            .ok_or_else(|| TreeError::property(id_property, &item))?;
        if self.nodes.contains_key(&id) {
            return Err(TreeError::duplicate(&id));
        }

        let parent = match item.parent_id(parent_property) {
            Parent::Root => None,
            Parent::Id(p) => Some(p),
            // no identifier can ever equal it
            Parent::Unusable(value) => return Err(TreeError::NodeNotFound(value)),
        };
        trace!("inserting {:?} with parent {:?}", id, parent);
        self.nodes
            .insert(id.clone(), TreeNode::new(id.clone(), parent, item));
        Ok(id)
    }

    // drops every newly added node whose parent chain does not end at a
    // root, returning the first reason found.  Nodes added in earlier
    // batches always reach a root, so only `added` needs checking.
    fn evict_unrooted(&mut self, added: &[R::Id]) -> Option<TreeError> {
        let mut rooted: HashSet<R::Id> = HashSet::new();
        let mut unrooted: HashSet<R::Id> = HashSet::new();
        let mut first = None;

        for id in added {
            let mut chain: Vec<R::Id> = Vec::new();
            let mut cursor = id.clone();
            let verdict = loop {
                if rooted.contains(&cursor) {
                    break Ok(());
                }
                if unrooted.contains(&cursor) {
                    break Err(None);
                }
                if chain.contains(&cursor) {
                    break Err(Some(TreeError::cycle(&cursor)));
                }
                let parent = match self.nodes.get(&cursor) {
                    Some(node) => node.parent_id().cloned(),
                    None => break Err(Some(TreeError::not_found(&cursor))),
                };
                chain.push(cursor);
                match parent {
                    Some(p) => cursor = p,
                    None => break Ok(()),
                }
            };

            match verdict {
                Ok(()) => rooted.extend(chain),
                Err(reason) => {
                    if first.is_none() {
                        first = reason;
                    }
                    unrooted.extend(chain);
                }
            }
        }

        for id in &unrooted {
            warn!("dropping {:?}: no path to a root", id);
            self.nodes.remove(id);
        }
        first
    }

    // recomputes children, ancestors and branch of every node.
    fn reindex(&mut self) {
        let mut children: HashMap<R::Id, HashSet<R::Id>> = HashMap::new();
        for node in self.nodes.values() {
            if let Some(p) = node.parent_id() {
                children
                    .entry(p.clone())
                    .or_default()
                    .insert(node.id().clone());
            }
        }

        let mut parents: HashMap<R::Id, Vec<R::Id>> = self
            .nodes
            .keys()
            .map(|id| (id.clone(), self.ancestors_of(id)))
            .collect();
        let mut branches: HashMap<R::Id, HashSet<R::Id>> = self
            .nodes
            .keys()
            .map(|id| (id.clone(), collect_branch(&children, id)))
            .collect();

        for (id, node) in self.nodes.iter_mut() {
            node.children = children.remove(id).unwrap_or_default();
            node.parents = parents.remove(id).unwrap_or_default();
            node.branch = branches.remove(id).unwrap_or_default();
        }
    }

    // ids of all ancestors of `id`, nearest first.
    fn ancestors_of(&self, id: &R::Id) -> Vec<R::Id> {
        let mut ancestors = Vec::new();
        let mut cursor = self.nodes.get(id).and_then(|n| n.parent_id());
        while let Some(p) = cursor {
            ancestors.push(p.clone());
            cursor = self.nodes.get(p).and_then(|n| n.parent_id());
        }
        ancestors
    }

    fn resolve(&self, needle: &Needle<'_, R>) -> Option<&TreeNode<R>> {
        match needle {
            Needle::Id(id) => self.nodes.get(id),
            Needle::Record(r) => r
                .id(self.config.id_property())
                .and_then(|id| self.nodes.get(&id)),
            Needle::Node(n) => self.nodes.get(n.id()),
        }
    }

    fn require(&self, needle: &Needle<'_, R>) -> Result<&TreeNode<R>> {
        self.resolve(needle)
            .ok_or_else(|| TreeError::NodeNotFound(format!("{:?}", needle)))
    }

    /// returns matching node, or None.
    ///
    /// A `Needle::Node` resolves to this tree's node with the same id.
    pub fn get_node<'n, N>(&self, needle: N) -> Option<&TreeNode<R>>
    where
        R: 'n,
        N: Into<Needle<'n, R>>,
    {
        self.resolve(&needle.into())
    }

    /// returns true if the needle resolves to a node in this tree.
    pub fn contains<'n, N>(&self, needle: N) -> bool
    where
        R: 'n,
        N: Into<Needle<'n, R>>,
    {
        self.get_node(needle).is_some()
    }

    /// walks the subtree below `id` (inclusive), calling FnMut f for
    /// each node with its depth relative to `id`.
    ///
    /// walk uses a non-recursive algorithm, so calling
    /// it on a deep tree will not cause stack overflow.
    pub fn walk<'a, F>(&'a self, id: &R::Id, mut f: F)
    where
        F: FnMut(&'a TreeNode<R>, usize),
    {
        let mut stack: Vec<(&R::Id, usize)> = vec![(id, 0)];
        while let Some((next, depth)) = stack.pop() {
            if let Some(node) = self.nodes.get(next) {
                f(node, depth);
                for child in node.children() {
                    stack.push((child, depth + 1));
                }
            }
        }
    }

    /// returns the node and all its descendants, parents before children.
    pub fn branch_nodes<'n, N>(&self, needle: N) -> Result<Vec<&TreeNode<R>>>
    where
        R: 'n,
        N: Into<Needle<'n, R>>,
    {
        let node = self.require(&needle.into())?;
        let mut branch = Vec::new();
        self.walk(node.id(), |n, _| branch.push(n));
        Ok(branch)
    }

    /// returns the records of `branch_nodes`.
    pub fn branch<'n, N>(&self, needle: N) -> Result<Vec<&R>>
    where
        R: 'n,
        N: Into<Needle<'n, R>>,
    {
        Ok(items(self.branch_nodes(needle)?))
    }

    /// returns all ancestors of the node, nearest first.
    pub fn parent_nodes<'n, N>(&self, needle: N) -> Result<Vec<&TreeNode<R>>>
    where
        R: 'n,
        N: Into<Needle<'n, R>>,
    {
        let node = self.require(&needle.into())?;
        Ok(node
            .parents()
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .collect())
    }

    /// returns the records of `parent_nodes`.
    pub fn parents<'n, N>(&self, needle: N) -> Result<Vec<&R>>
    where
        R: 'n,
        N: Into<Needle<'n, R>>,
    {
        Ok(items(self.parent_nodes(needle)?))
    }

    /// returns the root above the node, or the node itself if it is a root.
    pub fn root_node<'n, N>(&self, needle: N) -> Result<&TreeNode<R>>
    where
        R: 'n,
        N: Into<Needle<'n, R>>,
    {
        let mut node = self.require(&needle.into())?;
        while let Some(parent) = node.parent_id().and_then(|p| self.nodes.get(p)) {
            node = parent;
        }
        Ok(node)
    }

    /// returns the record of `root_node`.
    pub fn root<'n, N>(&self, needle: N) -> Result<&R>
    where
        R: 'n,
        N: Into<Needle<'n, R>>,
    {
        Ok(self.root_node(needle)?.item())
    }

    /// returns childless nodes: of the whole tree when `needle` is None,
    /// otherwise of the needle's branch.
    pub fn leaf_nodes(&self, needle: Option<Needle<'_, R>>) -> Result<Vec<&TreeNode<R>>> {
        match needle {
            None => Ok(self.nodes.values().filter(|n| n.is_leaf()).collect()),
            Some(needle) => Ok(self
                .branch_nodes(needle)?
                .into_iter()
                .filter(|n| n.is_leaf())
                .collect()),
        }
    }

    /// returns the records of `leaf_nodes`.
    pub fn leaves(&self, needle: Option<Needle<'_, R>>) -> Result<Vec<&R>> {
        Ok(items(self.leaf_nodes(needle)?))
    }

    /// returns true if `needle` lies in the branch of `haystack`.
    ///
    /// A node is in its own branch.
    ///
    /// ```text
    ///              1          2
    ///          1-1   1-2
    ///        1-1-1
    ///
    /// is 1-1-1 in 1?    yes.
    /// is 1-1-1 in 1-2?   no.
    /// ```
    pub fn is_in_tree<'n, 'h, N, H>(&self, needle: N, haystack: H) -> Result<bool>
    where
        R: 'n + 'h,
        N: Into<Needle<'n, R>>,
        H: Into<Needle<'h, R>>,
    {
        let node = self.require(&needle.into())?;
        let hay = self.require(&haystack.into())?;
        Ok(node.id() == hay.id() || node.parents().contains(hay.id()))
    }

    /// removes the node and every descendant.
    pub fn remove_item<'n, N>(&mut self, needle: N) -> Result<&mut Self>
    where
        R: 'n,
        N: Into<Needle<'n, R>>,
    {
        let id = self.require(&needle.into())?.id().clone();
        self.remove_subtree(&id);
        Ok(self)
    }

    /// removes each needle's branch.
    ///
    /// All needles are resolved before anything is removed, so an unknown
    /// needle leaves the tree untouched.  A needle inside the branch of an
    /// earlier one is simply already gone.  An empty list removes nothing;
    /// use `flush` to empty the tree.
    pub fn remove_items<'n, I, N>(&mut self, needles: I) -> Result<&mut Self>
    where
        R: 'n,
        I: IntoIterator<Item = N>,
        N: Into<Needle<'n, R>>,
    {
        let ids = needles
            .into_iter()
            .map(|n| self.require(&n.into()).map(|node| node.id().clone()))
            .collect::<Result<Vec<_>>>()?;
        for id in &ids {
            self.remove_subtree(id);
        }
        Ok(self)
    }

    /// removes every node.
    pub fn flush(&mut self) -> &mut Self {
        debug!("flushing {} nodes", self.nodes.len());
        self.nodes.clear();
        self
    }

    // removes the subtree at `id` and detaches it from surviving
    // ancestors.  returns the number of nodes removed.
    fn remove_subtree(&mut self, id: &R::Id) -> usize {
        let (ancestors, doomed) = match self.nodes.get(id) {
            Some(node) => {
                let mut doomed: Vec<R::Id> = Vec::new();
                self.walk(node.id(), |n, _| doomed.push(n.id().clone()));
                (node.parents().to_vec(), doomed)
            }
            None => return 0,
        };

        for d in &doomed {
            self.nodes.remove(d);
        }
        if let Some(parent) = ancestors.first().and_then(|p| self.nodes.get_mut(p)) {
            parent.children.remove(id);
        }
        for a in &ancestors {
            if let Some(ancestor) = self.nodes.get_mut(a) {
                for d in &doomed {
                    ancestor.branch.remove(d);
                }
            }
        }

        debug!("removed {:?} and {} descendants", id, doomed.len() - 1);
        doomed.len()
    }

    /// Total number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// true if the tree holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// returns all root nodes
    pub fn root_nodes(&self) -> Vec<&TreeNode<R>> {
        self.nodes.values().filter(|n| n.is_root()).collect()
    }

    /// returns the records of all roots
    pub fn roots(&self) -> Vec<&R> {
        items(self.root_nodes())
    }

    /// iterates all nodes in no particular order
    pub fn iter(&self) -> Values<'_, R::Id, TreeNode<R>> {
        self.nodes.values()
    }
}

impl<R: Record> Default for Tree<R> {
    fn default() -> Self {
        Self::new()
    }
}

fn items<R: Record>(nodes: Vec<&TreeNode<R>>) -> Vec<&R> {
    nodes.into_iter().map(TreeNode::item).collect()
}

// non-recursive collection of `start` and everything below it.
fn collect_branch<ID: TreeId>(children: &HashMap<ID, HashSet<ID>>, start: &ID) -> HashSet<ID> {
    let mut branch = HashSet::new();
    let mut stack = vec![start.clone()];
    while let Some(next) = stack.pop() {
        if let Some(kids) = children.get(&next) {
            stack.extend(kids.iter().cloned());
        }
        branch.insert(next);
    }
    branch
}

/// Implement `IntoIterator` for `Tree`.  This is useful for
/// walking all Nodes in tree without knowing a starting point.
impl<R: Record> IntoIterator for Tree<R> {
    type Item = (R::Id, TreeNode<R>);
    type IntoIter = std::collections::hash_map::IntoIter<R::Id, TreeNode<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<R: Record> fmt::Display for Tree<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.print_tree(f)
    }
}

impl<R: Record> Tree<R> {
    // print a tree, one outline per root.  driven by `walk`, so deep
    // chains do not recurse.
    fn print_tree(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut result = Ok(());
        for root in self.root_nodes() {
            self.walk(root.id(), |node, depth| {
                if result.is_ok() {
                    result = writeln!(f, "{:indent$}{:?}", "", node.id(), indent = depth * 2);
                }
            });
            result?;
        }
        Ok(())
    }
}
