// Copyright (c) 2022, MaidSafe.
// All rights reserved.
//
// This SAFE Network Software is licensed under the BSD-3-Clause license.
// Please see the LICENSE file for more details.

/// property tests for record_tree
use quickcheck::{Arbitrary, Gen, TestResult};
use quickcheck_macros::quickcheck;
use rand::seq::SliceRandom;
use rand::Rng;
use record_tree::{Needle, Record, Tree, TreeError, TreeNode};
use serde_json::json;
use std::collections::{HashMap, HashSet};

// Define some "real" types for use in the tests.
type TypeId = u16;

#[derive(Debug, Clone, PartialEq)]
struct Item {
    id: TypeId,
    parent: Option<TypeId>,
}

impl Record for Item {
    type Id = TypeId;

    fn has_field(&self, name: &str) -> bool {
        name == "id" || name == "parent"
    }

    fn id(&self, name: &str) -> Option<TypeId> {
        match name {
            "id" => Some(self.id),
            "parent" => self.parent,
            _ => None,
        }
    }
}

// A quasi-random forest for use by quickcheck.
//
// Ids are 0..n.  Each item picks its parent among the lower ids or is a
// root, so the forest is always connected to roots and acyclic.  The
// items are then shuffled, so children frequently come before their
// parents in the list.
#[derive(Debug, Clone)]
struct Forest {
    items: Vec<Item>,
}

impl Arbitrary for Forest {
    fn arbitrary<G: Gen>(g: &mut G) -> Forest {
        let size = {
            let s = g.size();
            if s == 0 {
                0
            } else {
                g.gen_range(0, s)
            }
        };

        let mut items: Vec<Item> = Vec::new();
        for id in 0..size as TypeId {
            let parent = if id == 0 || g.gen_range(0, 4) == 0 {
                None
            } else {
                Some(g.gen_range(0, id))
            };
            items.push(Item { id, parent });
        }
        items.shuffle(g);
        Self { items }
    }
}

impl Forest {
    fn tree(&self) -> Tree<Item> {
        let mut tree = Tree::new();
        tree.add_nodes(self.items.iter().cloned())
            .expect("forest is well formed");
        tree
    }

    // descendants of `id` (inclusive), computed from the items alone.
    fn expected_branch(&self, id: TypeId) -> HashSet<TypeId> {
        let parents: HashMap<TypeId, Option<TypeId>> =
            self.items.iter().map(|i| (i.id, i.parent)).collect();
        self.items
            .iter()
            .map(|i| i.id)
            .filter(|&candidate| {
                let mut cursor = Some(candidate);
                while let Some(c) = cursor {
                    if c == id {
                        return true;
                    }
                    cursor = parents[&c];
                }
                false
            })
            .collect()
    }
}

// helper: ids of a list of nodes.
fn node_ids(nodes: Vec<&TreeNode<Item>>) -> HashSet<TypeId> {
    nodes.into_iter().map(|n| *n.id()).collect()
}

// helper: checks that the cached links of every node agree with a
// live walk of the tree.
fn caches_consistent(tree: &Tree<Item>) -> bool {
    tree.iter().all(|node| {
        let live = node_ids(tree.branch_nodes(node).unwrap());
        let children: HashSet<TypeId> = tree
            .iter()
            .filter(|n| n.parent_id() == Some(node.id()))
            .map(|n| *n.id())
            .collect();
        &live == node.branch() && &children == node.children()
    })
}

#[quickcheck]
fn prop_round_trip(f: Forest) -> bool {
    let tree = f.tree();
    tree.len() == f.items.len()
        && f
            .items
            .iter()
            .all(|i| tree.get_node(Needle::id(i.id)).map(TreeNode::item) == Some(i))
}

#[quickcheck]
fn prop_parent_child_symmetry(f: Forest) -> bool {
    let tree = f.tree();
    tree.iter().all(|a| {
        a.children().iter().all(|b| {
            let b = tree.get_node(Needle::id(*b)).unwrap();
            b.parent_id() == Some(a.id()) && b.parents().contains(a.id())
        })
    })
}

#[quickcheck]
fn prop_level(f: Forest) -> bool {
    let tree = f.tree();
    tree.iter().all(|n| match n.parent_id() {
        None => n.level() == 1,
        Some(p) => n.level() == tree.get_node(Needle::id(*p)).unwrap().level() + 1,
    })
}

#[quickcheck]
fn prop_branch(f: Forest) -> bool {
    let tree = f.tree();
    f.items.iter().all(|i| {
        let branch = node_ids(tree.branch_nodes(Needle::id(i.id)).unwrap());
        branch.contains(&i.id) && branch == f.expected_branch(i.id)
    })
}

#[quickcheck]
fn prop_leaves(f: Forest) -> bool {
    let tree = f.tree();
    let global = node_ids(tree.leaf_nodes(None).unwrap());
    let mut union = HashSet::new();
    for root in tree.root_nodes() {
        union.extend(node_ids(tree.leaf_nodes(Some(root.into())).unwrap()));
    }
    global == union
        && global
            .iter()
            .all(|id| tree.get_node(Needle::id(*id)).unwrap().children().is_empty())
}

#[quickcheck]
fn prop_root_idempotent(f: Forest) -> bool {
    let tree = f.tree();
    tree.iter().all(|n| {
        let root = tree.root_node(n).unwrap();
        root.is_root() && tree.root_node(root).unwrap().id() == root.id()
    })
}

#[quickcheck]
fn prop_contains_self(f: Forest) -> bool {
    let tree = f.tree();
    tree.iter().all(|n| tree.is_in_tree(n, n).unwrap())
}

#[quickcheck]
fn prop_dangling_parent(f: Forest) -> bool {
    let mut tree = f.tree();
    let n = f.items.len() as TypeId;
    let err = tree.add_node(Item {
        id: n,
        parent: Some(n + 1),
    });
    matches!(err, Err(TreeError::NodeNotFound(_))) && tree.len() == f.items.len()
}

#[quickcheck]
fn prop_missing_field(ids: Vec<u8>) -> TestResult {
    if ids.is_empty() {
        return TestResult::discard();
    }
    let mut tree = Tree::new();
    let records: Vec<_> = ids.iter().map(|id| json!({ "id": id })).collect();
    let err = tree.add_nodes(records);
    TestResult::from_bool(
        matches!(err, Err(TreeError::PropertyError { .. })) && tree.is_empty(),
    )
}

#[quickcheck]
fn prop_remove_cascades(f: Forest, pick: usize) -> TestResult {
    if f.items.is_empty() {
        return TestResult::discard();
    }
    let mut tree = f.tree();
    let target = f.items[pick % f.items.len()].id;
    let doomed = f.expected_branch(target);

    tree.remove_item(Needle::id(target)).unwrap();

    let gone = doomed.iter().all(|id| tree.get_node(Needle::id(*id)).is_none());
    let kept = f
        .items
        .iter()
        .filter(|i| !doomed.contains(&i.id))
        .all(|i| tree.contains(Needle::id(i.id)));
    TestResult::from_bool(gone && kept && caches_consistent(&tree))
}

#[quickcheck]
fn prop_split_batches(f: Forest, cut: usize) -> TestResult {
    // items must arrive parent first across batches
    let mut items = f.items.clone();
    items.sort_by_key(|i| i.id);
    let cut = if items.is_empty() { 0 } else { cut % items.len() };
    let (first, second) = items.split_at(cut);

    let mut tree = Tree::new();
    tree.add_nodes(first.iter().cloned()).unwrap();
    tree.add_nodes(second.iter().cloned()).unwrap();

    TestResult::from_bool(caches_consistent(&tree) && tree == f.tree())
}
