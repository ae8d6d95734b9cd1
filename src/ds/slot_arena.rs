//! Generational slot arena backing the sentinel list.
//!
//! Values live in one `Vec` of slots and are addressed by `SlotId` handles.
//! A removed slot goes on the free list and is handed out again by a later
//! `insert`, but every removal bumps the slot's generation. A `SlotId` carries
//! the generation it was issued with, so a handle to a removed value never
//! resolves to whatever value reuses the slot.
//!
//! ```text
//!   slots: [ {gen 0, Some(A)} | {gen 1, None} | {gen 0, Some(C)} ]
//!   free:  [ 1 ]
//!
//!   SlotId { index: 1, generation: 0 }  -> stale, resolves to nothing
//!   insert(D) -> SlotId { index: 1, generation: 1 }
//! ```

/// Handle to a value in a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

impl SlotId {
    /// Position of the slot in the arena.
    pub fn index(self) -> usize {
        self.index
    }

    /// Generation the handle was issued with.
    pub fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<usize>,
    len: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Creates an arena with room for `capacity` values before reallocating.
    ///
    /// The request is a hint and is clamped, so huge values do not allocate
    /// up front.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity.min(MAX_PREALLOC_SLOTS)),
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub fn insert(&mut self, value: T) -> SlotId {
        let id = match self.free_list.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.value = Some(value);
                SlotId {
                    index,
                    generation: slot.generation,
                }
            },
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    value: Some(value),
                });
                SlotId {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            },
        };
        self.len += 1;
        id
    }

    /// Removes the value behind `id` and retires the handle.
    ///
    /// Returns `None` for a handle that is stale or was never issued.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(id.index);
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots ever allocated, live or free.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Drops every value and retires all outstanding handles.
    ///
    /// Slots are kept for reuse, so handles issued before the clear stay
    /// stale afterwards.
    pub fn clear(&mut self) {
        self.free_list.clear();
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            if slot.value.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free_list.push(index);
        }
        self.len = 0;
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

const MAX_PREALLOC_SLOTS: usize = 1 << 16;
