//! Slot arena with stable handles.
//!
//! Values sit in a flat `Vec` of entries. A removed value leaves a vacant
//! entry that is threaded onto a free chain through the vacant entries
//! themselves, so the next insert reuses the most recently freed slot
//! without any side allocation.
//!
//! ```text
//!   entries: [Occupied(a)] [Vacant(→3)] [Occupied(c)] [Vacant(end)]
//!   free_head: 1
//! ```
//!
//! A [`SlotId`] stays valid until the value it names is removed.

/// Stable handle to a value stored in a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

impl SlotId {
    /// Position of the slot in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
enum Entry<T> {
    Occupied(T),
    Vacant { next_free: Option<usize> },
}

/// Arena that hands out [`SlotId`]s for stored values and recycles freed slots.
#[derive(Debug, Clone)]
pub struct SlotArena<T> {
    entries: Vec<Entry<T>>,
    free_head: Option<usize>,
    occupied: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an arena with room for `capacity` values before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            free_head: None,
            occupied: 0,
        }
    }

    /// Stores `value`, reusing the last freed slot if there is one.
    pub fn insert(&mut self, value: T) -> SlotId {
        self.occupied += 1;
        match self.free_head {
            Some(index) => {
                let previous = std::mem::replace(&mut self.entries[index], Entry::Occupied(value));
                if let Entry::Vacant { next_free } = previous {
                    self.free_head = next_free;
                }
                SlotId(index)
            },
            None => {
                self.entries.push(Entry::Occupied(value));
                SlotId(self.entries.len() - 1)
            },
        }
    }

    /// Takes the value out of `id`'s slot; `None` if the slot is already vacant.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let entry = self.entries.get_mut(id.0)?;
        if matches!(entry, Entry::Vacant { .. }) {
            return None;
        }
        let vacant = Entry::Vacant {
            next_free: self.free_head,
        };
        match std::mem::replace(entry, vacant) {
            Entry::Occupied(value) => {
                self.free_head = Some(id.0);
                self.occupied -= 1;
                Some(value)
            },
            Entry::Vacant { .. } => None,
        }
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        match self.entries.get(id.0)? {
            Entry::Occupied(value) => Some(value),
            Entry::Vacant { .. } => None,
        }
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        match self.entries.get_mut(id.0)? {
            Entry::Occupied(value) => Some(value),
            Entry::Vacant { .. } => None,
        }
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.occupied
    }

    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// Drops every value; previously issued ids become invalid.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.free_head = None;
        self.occupied = 0;
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freed_slot_is_reused_first() {
        let mut arena = SlotArena::new();
        let a = arena.insert("a");
        let b = arena.insert("b");
        let c = arena.insert("c");
        assert_eq!(arena.len(), 3);

        assert_eq!(arena.remove(a), Some("a"));
        assert_eq!(arena.remove(c), Some("c"));
        assert!(!arena.contains(a));
        assert_eq!(arena.len(), 1);

        // Last freed, first reused
        assert_eq!(arena.insert("d").index(), c.index());
        assert_eq!(arena.insert("e").index(), a.index());
        assert_eq!(arena.insert("f").index(), 3);
        assert_eq!(arena.get(b), Some(&"b"));
    }

    #[test]
    fn double_remove_is_none() {
        let mut arena = SlotArena::with_capacity(4);
        let id = arena.insert(1);
        assert_eq!(arena.remove(id), Some(1));
        assert_eq!(arena.remove(id), None);
        assert!(arena.is_empty());

        // The free chain was not corrupted by the second remove
        let again = arena.insert(2);
        assert_eq!(again, id);
        assert_eq!(arena.insert(3).index(), 1);
    }

    #[test]
    fn out_of_range_id_is_absent() {
        let mut arena: SlotArena<u8> = SlotArena::default();
        let stale = SlotId(7);
        assert_eq!(arena.get(stale), None);
        assert_eq!(arena.get_mut(stale), None);
        assert_eq!(arena.remove(stale), None);
    }

    #[test]
    fn clone_is_independent() {
        let mut arena = SlotArena::new();
        let id = arena.insert(10);
        let mut copy = arena.clone();
        if let Some(v) = copy.get_mut(id) {
            *v = 20;
        }
        assert_eq!(arena.get(id), Some(&10));
        assert_eq!(copy.get(id), Some(&20));

        arena.clear();
        assert!(arena.is_empty());
        assert!(!arena.contains(id));
        assert!(copy.contains(id));
    }
}
