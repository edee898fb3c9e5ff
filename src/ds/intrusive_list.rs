//! Doubly linked stack of values stored in a [`SlotArena`].
//!
//! Nodes are addressed by [`SlotId`] and linked through `up`/`down` handles,
//! so a node can be raised or unlinked in O(1) without raw pointers or
//! reference cycles. The `top` end holds the most recently pushed or raised
//! value and the `bottom` end the value that has sat untouched the longest.
//!
//! ```text
//!   top ─► [id_2: c] ──down──► [id_0: a] ──down──► [id_1: b] ◄─ bottom
//!                    ◄───up───           ◄───up───
//! ```
//!
//! | Operation    | Time |
//! |--------------|------|
//! | `push_top`   | O(1) |
//! | `pop_bottom` | O(1) |
//! | `raise`      | O(1) |
//! | `remove`     | O(1) |
//! | `iter`       | O(n) |

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    up: Option<SlotId>,
    down: Option<SlotId>,
}

/// Linked stack whose nodes keep stable [`SlotId`] handles.
#[derive(Debug, Clone)]
pub struct IntrusiveList<T> {
    nodes: SlotArena<Node<T>>,
    top: Option<SlotId>,
    bottom: Option<SlotId>,
}

impl<T> IntrusiveList<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotArena::with_capacity(capacity),
            top: None,
            bottom: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` if `id` names a live node.
    pub fn contains(&self, id: SlotId) -> bool {
        self.nodes.contains(id)
    }

    pub fn top(&self) -> Option<&T> {
        self.get(self.top?)
    }

    pub fn bottom(&self) -> Option<&T> {
        self.get(self.bottom?)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.nodes.get(id).map(|node| &node.value)
    }

    /// Iterates from top to bottom.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            next: self.top,
        }
    }

    /// Pushes `value` on top and returns its handle.
    pub fn push_top(&mut self, value: T) -> SlotId {
        let id = self.nodes.insert(Node {
            value,
            up: None,
            down: None,
        });
        self.link_top(id);
        id
    }

    /// Unlinks and returns the bottom value.
    pub fn pop_bottom(&mut self) -> Option<T> {
        let id = self.bottom?;
        self.remove(id)
    }

    /// Unlinks node `id` and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.unlink(id)?;
        self.nodes.remove(id).map(|node| node.value)
    }

    /// Moves node `id` to the top. Returns `false` if `id` is not live.
    pub fn raise(&mut self, id: SlotId) -> bool {
        if self.top == Some(id) {
            return true;
        }
        if self.unlink(id).is_none() {
            return false;
        }
        self.link_top(id);
        true
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.top = None;
        self.bottom = None;
    }

    /// Splices `id` out of the chain, leaving it allocated but unlinked.
    fn unlink(&mut self, id: SlotId) -> Option<()> {
        let node = self.nodes.get_mut(id)?;
        let (up, down) = (node.up.take(), node.down.take());

        match up.and_then(|up| self.nodes.get_mut(up)) {
            Some(above) => above.down = down,
            None => self.top = down,
        }
        match down.and_then(|down| self.nodes.get_mut(down)) {
            Some(below) => below.up = up,
            None => self.bottom = up,
        }
        Some(())
    }

    /// Links an allocated, unlinked node above the current top.
    fn link_top(&mut self, id: SlotId) {
        let old_top = self.top.replace(id);
        if let Some(node) = self.nodes.get_mut(id) {
            node.up = None;
            node.down = old_top;
        }
        match old_top.and_then(|old| self.nodes.get_mut(old)) {
            Some(below) => below.up = Some(id),
            None => self.bottom = Some(id),
        }
    }

    /// Walks top to bottom checking link symmetry, endpoints and length.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut walked = 0usize;
        let mut above = None;
        let mut cursor = self.top;

        while let Some(id) = cursor {
            let node = self
                .nodes
                .get(id)
                .ok_or_else(|| InvariantError::new(format!("dangling link to {:?}", id)))?;
            if node.up != above {
                return Err(InvariantError::new(format!(
                    "{:?} links up to {:?} but sits below {:?}",
                    id, node.up, above
                )));
            }
            walked += 1;
            if walked > self.len() {
                return Err(InvariantError::new("cycle in linked nodes"));
            }
            above = Some(id);
            cursor = node.down;
        }

        if above != self.bottom {
            return Err(InvariantError::new(format!(
                "walk ended at {:?} but bottom is {:?}",
                above, self.bottom
            )));
        }
        if walked != self.len() {
            return Err(InvariantError::new(format!(
                "walked {} nodes but {} are allocated",
                walked,
                self.len()
            )));
        }
        Ok(())
    }
}

impl<T> Default for IntrusiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Top-to-bottom iterator over an [`IntrusiveList`].
pub struct Iter<'a, T> {
    nodes: &'a SlotArena<Node<T>>,
    next: Option<SlotId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.next?)?;
        self.next = node.down;
        Some(&node.value)
    }
}
