//! Doubly linked list with sentinel boundary nodes, backed by `SlotArena`.
//!
//! Every node, the two sentinels included, lives in a `SlotArena` and is
//! linked to its neighbours by `SlotId`. Callers keep `SlotId` handles to data
//! nodes, which makes removal and relocation of a known node O(1) with no
//! search and no raw pointers.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬───────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                    │
//!   ├────────┼───────────────────────────────────────────────┤
//!   │ id_0   │ { value: None,    prev: id_0, next: id_2 }    │  head sentinel
//!   │ id_1   │ { value: None,    prev: id_3, next: id_1 }    │  tail sentinel
//!   │ id_2   │ { value: Some(A), prev: id_0, next: id_3 }    │
//!   │ id_3   │ { value: Some(B), prev: id_2, next: id_1 }    │
//!   └────────┴───────────────────────────────────────────────┘
//!
//!   [head] ◄──► [A] ◄──► [B] ◄──► [tail]
//! ```
//!
//! The sentinels are never removed. Their outward links point at themselves,
//! so every data node always has a live predecessor and successor and no
//! operation needs an empty-list special case for relinking.
//!
//! ## Operations
//! - `push_front` / `push_back`: O(1)
//! - `pop_front` / `pop_back`: O(1), `ListError::Empty` on an empty list
//! - `remove_node` / `move_to_front` / `move_to_back`: O(1) by handle
//! - `remove_value` / `index` / `insert` / `count`: O(n) scans
//! - `reverse`: O(n) relink, no value moves; swaps the sentinel roles
//! - `rotate`: O(steps mod len) ring walk
//!
//! Handles are generational. Once its node is removed, a `SlotId` stays
//! stale even after a later insert reuses the slot, and handle operations
//! report it as `ListError::InvalidArgument` (or `false`). Sentinel ids are
//! rejected the same way.

use std::fmt;
use std::iter::FusedIterator;
use std::ops::{Bound, RangeBounds};

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::{InvariantError, ListError};

// Overwritten before the sentinels are ever read.
const PLACEHOLDER: SlotId = SlotId {
    index: 0,
    generation: 0,
};

#[derive(Debug)]
struct Node<T> {
    // None only on the two sentinels.
    value: Option<T>,
    prev: SlotId,
    next: SlotId,
}

#[derive(Debug)]
/// Sentinel-bounded doubly linked list that stores nodes in a `SlotArena`.
pub struct SentinelList<T> {
    arena: SlotArena<Node<T>>,
    head: SlotId,
    tail: SlotId,
    len: usize,
}

impl<T> SentinelList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::from_arena(SlotArena::new())
    }

    /// Creates an empty list with room for `capacity` data nodes.
    ///
    /// Large requests are clamped; the arena grows past them on demand.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_arena(SlotArena::with_capacity(capacity.saturating_add(2)))
    }

    fn from_arena(mut arena: SlotArena<Node<T>>) -> Self {
        let (head, tail) = Self::insert_sentinels(&mut arena);
        Self {
            arena,
            head,
            tail,
            len: 0,
        }
    }

    fn insert_sentinels(arena: &mut SlotArena<Node<T>>) -> (SlotId, SlotId) {
        let head = arena.insert(Node {
            value: None,
            prev: PLACEHOLDER,
            next: PLACEHOLDER,
        });
        let tail = arena.insert(Node {
            value: None,
            prev: head,
            next: PLACEHOLDER,
        });
        if let Some(node) = arena.get_mut(head) {
            node.prev = head;
            node.next = tail;
        }
        if let Some(node) = arena.get_mut(tail) {
            node.next = tail;
        }
        (head, tail)
    }

    /// Returns the number of data nodes in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no data nodes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if `id` is a live data node of this list.
    pub fn contains(&self, id: SlotId) -> bool {
        self.is_data(id)
    }

    /// Returns the first value, if any.
    pub fn front(&self) -> Option<&T> {
        self.front_id().and_then(|id| self.get(id))
    }

    /// Returns the handle of the first data node, if any.
    pub fn front_id(&self) -> Option<SlotId> {
        let id = self.next_of(self.head);
        (id != self.tail).then_some(id)
    }

    /// Returns the last value, if any.
    pub fn back(&self) -> Option<&T> {
        self.back_id().and_then(|id| self.get(id))
    }

    /// Returns the handle of the last data node, if any.
    pub fn back_id(&self) -> Option<SlotId> {
        let id = self.prev_of(self.tail);
        (id != self.head).then_some(id)
    }

    /// Returns the value stored at `id`, if `id` is a live data node.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).and_then(|node| node.value.as_ref())
    }

    /// Returns a mutable reference to the value stored at `id`.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).and_then(|node| node.value.as_mut())
    }

    /// Returns a front-to-back iterator over the values.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.next_of(self.head),
            back: self.prev_of(self.tail),
            remaining: self.len,
        }
    }

    /// Returns a front-to-back iterator over data node handles.
    pub fn iter_ids(&self) -> IdIter<'_, T> {
        IdIter {
            list: self,
            current: self.next_of(self.head),
            remaining: self.len,
        }
    }

    /// Inserts `value` before the first data node and returns its handle.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.alloc(value);
        self.attach_after(self.head, id);
        id
    }

    /// Inserts `value` after the last data node and returns its handle.
    pub fn push_back(&mut self, value: T) -> SlotId {
        let id = self.alloc(value);
        self.attach_after(self.prev_of(self.tail), id);
        id
    }

    /// Removes and returns the first value.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::Empty`] if the list holds no data nodes.
    pub fn pop_front(&mut self) -> Result<T, ListError> {
        let id = self.front_id().ok_or(ListError::Empty)?;
        self.take(id)
    }

    /// Removes and returns the last value.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::Empty`] if the list holds no data nodes.
    pub fn pop_back(&mut self) -> Result<T, ListError> {
        let id = self.back_id().ok_or(ListError::Empty)?;
        self.take(id)
    }

    /// Detaches the node `id` and returns its value.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::InvalidArgument`] if `id` is not a live data node.
    pub fn remove_node(&mut self, id: SlotId) -> Result<T, ListError> {
        if !self.is_data(id) {
            return Err(ListError::invalid(format!(
                "slot {} is not a live data node",
                id.index()
            )));
        }
        self.take(id)
    }

    /// Moves an existing node to the front; returns `false` if `id` is not a data node.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.is_data(id) {
            return false;
        }
        if self.next_of(self.head) != id {
            self.unlink(id);
            self.attach_after(self.head, id);
        }
        true
    }

    /// Moves an existing node to the back; returns `false` if `id` is not a data node.
    pub fn move_to_back(&mut self, id: SlotId) -> bool {
        if !self.is_data(id) {
            return false;
        }
        if self.prev_of(self.tail) != id {
            self.unlink(id);
            self.attach_after(self.prev_of(self.tail), id);
        }
        true
    }

    /// Inserts `value` so that it ends up at position `index`.
    ///
    /// `index == 0` behaves as [`push_front`](Self::push_front) and
    /// `index >= len` as [`push_back`](Self::push_back).
    pub fn insert(&mut self, index: usize, value: T) -> SlotId {
        if index == 0 {
            return self.push_front(value);
        }
        if index >= self.len {
            return self.push_back(value);
        }
        match self.iter_ids().nth(index - 1) {
            Some(anchor) => {
                let id = self.alloc(value);
                self.attach_after(anchor, id);
                id
            },
            None => self.push_back(value),
        }
    }

    /// Reverses the list in place by swapping every node's links.
    ///
    /// Values are never moved; the head and tail sentinels trade roles, so
    /// reversing twice restores both the order and the sentinel identities.
    pub fn reverse(&mut self) {
        let last = self.tail;
        let mut current = self.head;
        loop {
            let Some(node) = self.arena.get_mut(current) else {
                break;
            };
            std::mem::swap(&mut node.prev, &mut node.next);
            if current == last {
                break;
            }
            // after the swap `prev` holds the old successor
            current = node.prev;
        }
        std::mem::swap(&mut self.head, &mut self.tail);
        tracing::trace!(len = self.len, "reversed list");
    }

    /// Rotates the list so that the value at position `steps mod len` becomes first.
    ///
    /// Negative `steps` rotate towards the back.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::InvalidArgument`] on an empty list, where the
    /// modulus is undefined. The list is left untouched.
    pub fn rotate(&mut self, steps: isize) -> Result<(), ListError> {
        if self.len == 0 {
            return Err(ListError::invalid("cannot rotate an empty list"));
        }
        let steps = steps.rem_euclid(self.len as isize) as usize;
        if steps == 0 {
            return Ok(());
        }

        let mut first = self.next_of(self.head);
        let mut last = self.prev_of(self.tail);

        // close into a ring, walk, then cut at the new boundary
        self.link(last, first);
        for _ in 0..steps {
            first = self.next_of(first);
            last = self.next_of(last);
        }
        self.link(self.head, first);
        self.link(last, self.tail);

        tracing::trace!(len = self.len, steps, "rotated list");
        Ok(())
    }

    /// Removes all data nodes.
    pub fn clear(&mut self) {
        self.arena.clear();
        let (head, tail) = Self::insert_sentinels(&mut self.arena);
        self.head = head;
        self.tail = tail;
        self.len = 0;
    }

    /// Walks the list and verifies link symmetry, sentinel placement and length.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let head = self
            .arena
            .get(self.head)
            .ok_or_else(|| InvariantError::new("head sentinel missing from arena"))?;
        let tail = self
            .arena
            .get(self.tail)
            .ok_or_else(|| InvariantError::new("tail sentinel missing from arena"))?;
        if head.value.is_some() || tail.value.is_some() {
            return Err(InvariantError::new("sentinel carries a value"));
        }
        if head.prev != self.head || tail.next != self.tail {
            return Err(InvariantError::new("sentinel outward link is not a self-link"));
        }

        let mut count = 0usize;
        let mut current = self.head;
        loop {
            let node = self.arena.get(current).ok_or_else(|| {
                InvariantError::new(format!("stale SlotId {} in links", current.index()))
            })?;
            if current == self.tail {
                break;
            }
            let next = self.arena.get(node.next).ok_or_else(|| {
                InvariantError::new(format!("stale next SlotId {}", node.next.index()))
            })?;
            if next.prev != current {
                return Err(InvariantError::new(format!(
                    "slot {}: next.prev does not point back",
                    current.index()
                )));
            }
            if node.next != self.tail {
                if next.value.is_none() {
                    return Err(InvariantError::new("sentinel found inside the list"));
                }
                count += 1;
                if count > self.len {
                    return Err(InvariantError::new("cycle or overlong chain detected"));
                }
            }
            current = node.next;
        }

        if count != self.len {
            return Err(InvariantError::new(format!(
                "len {} != traversal count {}",
                self.len, count
            )));
        }
        if self.arena.len() != self.len + 2 {
            return Err(InvariantError::new(format!(
                "arena holds {} nodes, expected {}",
                self.arena.len(),
                self.len + 2
            )));
        }
        Ok(())
    }

    /// Slots allocated in the backing arena, sentinels and free slots included.
    pub(crate) fn arena_slots(&self) -> usize {
        self.arena.slot_count()
    }

    fn is_data(&self, id: SlotId) -> bool {
        id != self.head && id != self.tail && self.get(id).is_some()
    }

    // Links only ever reference live slots; the fallbacks end a walk at a sentinel.
    fn next_of(&self, id: SlotId) -> SlotId {
        self.arena.get(id).map_or(self.tail, |node| node.next)
    }

    fn prev_of(&self, id: SlotId) -> SlotId {
        self.arena.get(id).map_or(self.head, |node| node.prev)
    }

    fn link(&mut self, a: SlotId, b: SlotId) {
        if let Some(node) = self.arena.get_mut(a) {
            node.next = b;
        }
        if let Some(node) = self.arena.get_mut(b) {
            node.prev = a;
        }
    }

    fn alloc(&mut self, value: T) -> SlotId {
        self.arena.insert(Node {
            value: Some(value),
            prev: self.head,
            next: self.tail,
        })
    }

    fn attach_after(&mut self, anchor: SlotId, id: SlotId) {
        let after = self.next_of(anchor);
        self.link(anchor, id);
        self.link(id, after);
        self.len += 1;
    }

    fn unlink(&mut self, id: SlotId) {
        let (prev, next) = match self.arena.get(id) {
            Some(node) => (node.prev, node.next),
            None => return,
        };
        self.link(prev, next);
        self.len -= 1;
    }

    fn take(&mut self, id: SlotId) -> Result<T, ListError> {
        self.unlink(id);
        self.arena
            .remove(id)
            .and_then(|node| node.value)
            .ok_or_else(|| ListError::invalid(format!("slot {} held no value", id.index())))
    }
}

impl<T: PartialEq> SentinelList<T> {
    /// Removes the first value equal to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::NotFound`] if no element matches.
    pub fn remove_value(&mut self, value: &T) -> Result<T, ListError> {
        let id = self
            .iter_ids()
            .find(|&id| self.get(id) == Some(value))
            .ok_or(ListError::NotFound)?;
        self.take(id)
    }

    /// Returns the position of the first element equal to `value` whose
    /// position lies within `range`.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::NotFound`] if no element in range matches.
    pub fn index<R: RangeBounds<usize>>(&self, value: &T, range: R) -> Result<usize, ListError> {
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let stop = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => self.len,
        };
        self.iter()
            .enumerate()
            .skip(start)
            .take_while(|&(i, _)| i < stop)
            .find(|&(_, v)| v == value)
            .map(|(i, _)| i)
            .ok_or(ListError::NotFound)
    }

    /// Counts the elements equal to `value`.
    pub fn count(&self, value: &T) -> usize {
        self.iter().filter(|v| *v == value).count()
    }
}

impl<T> Default for SentinelList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for SentinelList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> FromIterator<T> for SentinelList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'a, T> IntoIterator for &'a SentinelList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Display> fmt::Display for SentinelList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" => ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

/// Iterator over values, front to back (or back to front via `rev`).
pub struct Iter<'a, T> {
    list: &'a SentinelList<T>,
    front: SlotId,
    back: SlotId,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.arena.get(self.front)?;
        self.front = node.next;
        self.remaining -= 1;
        node.value.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.arena.get(self.back)?;
        self.back = node.prev;
        self.remaining -= 1;
        node.value.as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Iterator over data node handles, front to back.
pub struct IdIter<'a, T> {
    list: &'a SentinelList<T>,
    current: SlotId,
    remaining: usize,
}

impl<T> Iterator for IdIter<'_, T> {
    type Item = SlotId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.current;
        self.current = self.list.next_of(id);
        self.remaining -= 1;
        Some(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
