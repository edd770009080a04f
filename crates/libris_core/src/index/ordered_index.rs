//! Unbalanced binary search tree over polymorphic records.
//!
//! # Responsibility
//! - Own every inserted record and keep them in strictly increasing order.
//! - Hand out in-place references and stable node ids for lookups.
//!
//! # Invariants
//! - Left subtree < node < right subtree under `Record::compare`.
//! - No two stored records compare equal; an equal insert is rejected.
//! - Nodes live in an arena and link by slot index; `clear` bumps the
//!   generation so ids issued before the clear stop resolving.
//!
//! No rebalancing is done: sorted insert order degrades depth to O(n).
//! Every walk is iterative, so depth never bounds stack usage.

use crate::model::record::Record;
use crate::render::RenderSink;
use log::debug;
use std::cmp::Ordering;
use std::fmt::{Debug, Formatter};

/// Stable id of one stored record within one index generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    slot: u32,
    generation: u32,
}

impl NodeId {
    pub fn slot(self) -> u32 {
        self.slot
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

struct IndexNode {
    record: Box<dyn Record>,
    left: Option<u32>,
    right: Option<u32>,
}

/// Sorted record container for one catalog category.
pub struct OrderedIndex {
    name: String,
    header: Vec<String>,
    nodes: Vec<IndexNode>,
    root: Option<u32>,
    generation: u32,
}

impl Debug for OrderedIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderedIndex")
            .field("name", &self.name)
            .field("len", &self.nodes.len())
            .field("generation", &self.generation)
            .finish()
    }
}

impl OrderedIndex {
    pub fn new(name: impl Into<String>, header: Vec<String>) -> Self {
        Self {
            name: name.into(),
            header,
            nodes: Vec::new(),
            root: None,
            generation: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Inserts `record` at its sorted position.
    ///
    /// Returns `false` and drops `record` when a stored record is neither
    /// less nor greater than it.
    pub fn insert(&mut self, record: Box<dyn Record>) -> bool {
        let Some(mut current) = self.root else {
            self.root = Some(self.push_node(record));
            return true;
        };

        loop {
            let node = &self.nodes[current as usize];
            let go_left = match record.compare(node.record.as_ref()) {
                Some(Ordering::Less) => true,
                Some(Ordering::Greater) => false,
                _ => {
                    debug!(
                        "event=record_rejected module=index status=duplicate index={} title={}",
                        self.name,
                        record.title()
                    );
                    return false;
                }
            };

            let child = if go_left { node.left } else { node.right };
            match child {
                Some(next) => current = next,
                None => {
                    let slot = self.push_node(record);
                    let parent = &mut self.nodes[current as usize];
                    if go_left {
                        parent.left = Some(slot);
                    } else {
                        parent.right = Some(slot);
                    }
                    return true;
                }
            }
        }
    }

    /// Finds the stored record equal to `target`.
    pub fn find(&self, target: &dyn Record) -> Option<NodeId> {
        let mut cursor = self.root;
        while let Some(slot) = cursor {
            let node = &self.nodes[slot as usize];
            cursor = match target.compare(node.record.as_ref()) {
                Some(Ordering::Equal) => return Some(self.node_id(slot)),
                Some(Ordering::Less) => node.left,
                _ => node.right,
            };
        }
        None
    }

    /// Returns the stored record equal to `target`.
    pub fn retrieve(&self, target: &dyn Record) -> Option<&dyn Record> {
        let id = self.find(target)?;
        self.get(id)
    }

    /// Returns the stored record equal to `target` for in-place mutation.
    pub fn retrieve_mut(&mut self, target: &dyn Record) -> Option<&mut dyn Record> {
        let id = self.find(target)?;
        self.get_mut(id)
    }

    /// Resolves an id issued by this index in its current generation.
    pub fn get(&self, id: NodeId) -> Option<&dyn Record> {
        if id.generation != self.generation {
            return None;
        }
        let node = self.nodes.get(id.slot as usize)?;
        Some(node.record.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut dyn Record> {
        if id.generation != self.generation {
            return None;
        }
        let node = self.nodes.get_mut(id.slot as usize)?;
        let record: &mut dyn Record = node.record.as_mut();
        Some(record)
    }

    /// Releases every node post-order and leaves the index empty.
    pub fn clear(&mut self) {
        if self.nodes.is_empty() {
            return;
        }

        let mut records: Vec<Option<Box<dyn Record>>> = Vec::with_capacity(self.nodes.len());
        let mut links = Vec::with_capacity(self.nodes.len());
        for node in self.nodes.drain(..) {
            records.push(Some(node.record));
            links.push((node.left, node.right));
        }

        let mut pending = Vec::new();
        let mut released = 0usize;
        if let Some(root) = self.root.take() {
            pending.push((root, false));
        }
        while let Some((slot, children_done)) = pending.pop() {
            if children_done {
                drop(records[slot as usize].take());
                released += 1;
                continue;
            }
            pending.push((slot, true));
            let (left, right) = links[slot as usize];
            if let Some(right) = right {
                pending.push((right, false));
            }
            if let Some(left) = left {
                pending.push((left, false));
            }
        }

        self.generation = self.generation.wrapping_add(1);
        debug!(
            "event=index_cleared module=index status=ok index={} released={}",
            self.name, released
        );
    }

    /// Visits every record in ascending order without mutating the tree.
    pub fn traverse_in_order<F>(&self, mut visit: F)
    where
        F: FnMut(&dyn Record),
    {
        let mut stack = Vec::new();
        let mut cursor = self.root;
        loop {
            while let Some(slot) = cursor {
                stack.push(slot);
                cursor = self.nodes[slot as usize].left;
            }
            let Some(slot) = stack.pop() else {
                break;
            };
            let node = &self.nodes[slot as usize];
            visit(node.record.as_ref());
            cursor = node.right;
        }
    }

    /// Renders the index name, its column header and every record in order.
    pub fn render(&self, sink: &mut dyn RenderSink) {
        sink.write_line(&self.name);
        let header: Vec<&str> = self.header.iter().map(String::as_str).collect();
        sink.write_row(&header);
        self.traverse_in_order(|record| record.render(sink));
    }

    /// Longest root-to-leaf path, in nodes.
    #[cfg(test)]
    pub(crate) fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending: Vec<(u32, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();
        while let Some((slot, level)) = pending.pop() {
            deepest = deepest.max(level);
            let node = &self.nodes[slot as usize];
            pending.extend(node.left.map(|left| (left, level + 1)));
            pending.extend(node.right.map(|right| (right, level + 1)));
        }
        deepest
    }

    fn push_node(&mut self, record: Box<dyn Record>) -> u32 {
        let slot = self.nodes.len() as u32;
        self.nodes.push(IndexNode {
            record,
            left: None,
            right: None,
        });
        slot
    }

    fn node_id(&self, slot: u32) -> NodeId {
        NodeId {
            slot,
            generation: self.generation,
        }
    }
}

impl Drop for OrderedIndex {
    fn drop(&mut self) {
        self.clear();
    }
}
