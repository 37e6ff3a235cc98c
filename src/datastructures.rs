use bitvec::prelude::*;
use fxhash::FxHashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::ops::Index;

/// Fixed-size set of small indices, used to mark visited bags.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BitSet {
    cardinality: usize,
    bit_vec: BitVec,
}

impl Debug for BitSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let values: Vec<_> = self.iter().map(|i| i.to_string()).collect();
        write!(
            f,
            "BitSet {{ cardinality: {}, bit_vec: [{}]}}",
            self.cardinality,
            values.join(", "),
        )
    }
}

impl BitSet {
    pub fn new(size: usize) -> Self {
        Self {
            cardinality: 0,
            bit_vec: bitvec![0; size],
        }
    }

    /// Sets `idx` and returns whether it was already set.
    #[inline]
    pub fn set_bit(&mut self, idx: usize) -> bool {
        if !self.bit_vec[idx] {
            self.bit_vec.set(idx, true);
            self.cardinality += 1;
            false
        } else {
            true
        }
    }

    #[inline]
    pub fn cardinality(&self) -> usize {
        self.cardinality
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bit_vec
            .iter()
            .enumerate()
            .filter(|(_, bit)| **bit)
            .map(|(i, _)| i)
    }
}

impl Index<usize> for BitSet {
    type Output = bool;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        self.bit_vec.index(index)
    }
}

/// Addressable binary min-heap. Every element is present at most once;
/// inserting an element that is already queued updates its priority.
#[derive(Debug, Clone, Default)]
pub struct BinaryQueue {
    heap: Vec<usize>,
    values: FxHashMap<usize, i64>,
    indices: FxHashMap<usize, usize>,
}

enum ChildType {
    First,
    Second,
}

impl BinaryQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            values: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            indices: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, element: usize) -> bool {
        self.values.contains_key(&element)
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.values.clear();
        self.indices.clear();
    }

    pub fn insert(&mut self, element: usize, priority: i64) {
        match self.values.entry(element) {
            Entry::Occupied(_) => self.update(element, priority),
            Entry::Vacant(entry) => {
                entry.insert(priority);
                self.indices.insert(element, self.heap.len());
                self.heap.push(element);
                if self.heap.len() > 1 {
                    self.up(self.heap.len() - 1);
                }
            }
        }
    }

    fn update(&mut self, element: usize, priority: i64) {
        self.values.insert(element, priority);
        let idx = self.indices[&element];
        self.up(idx);
        let idx = self.indices[&element];
        self.down(idx);
    }

    pub fn pop_min(&mut self) -> Option<(usize, i64)> {
        let last = self.heap.pop()?;
        let (element, priority) = if self.heap.is_empty() {
            (last, self.values[&last])
        } else {
            let element = std::mem::replace(&mut self.heap[0], last);
            self.indices.insert(last, 0);
            self.down(0);
            (element, self.values[&element])
        };
        self.values.remove(&element);
        self.indices.remove(&element);
        Some((element, priority))
    }

    fn up(&mut self, mut idx: usize) {
        let x = self.heap[idx];
        let priority = self.values[&x];
        while let Some(p) = self.parent(idx) {
            let parent = self.heap[p];
            if priority < self.values[&parent] {
                self.heap[idx] = parent;
                self.indices.insert(parent, idx);
                idx = p;
            } else {
                break;
            }
        }
        self.heap[idx] = x;
        self.indices.insert(x, idx);
    }

    fn down(&mut self, idx: usize) {
        let mut current = idx;
        let value = self.heap[current];
        let priority = self.values[&value];

        while let Some(mut first) = self.child(current, ChildType::First) {
            if let Some(second) = self.child(current, ChildType::Second) {
                if self.values[&self.heap[second]] < self.values[&self.heap[first]] {
                    first = second;
                }
            }
            if self.values[&self.heap[first]] < priority {
                self.heap[current] = self.heap[first];
                self.indices.insert(self.heap[current], current);
                current = first
            } else {
                break;
            }
        }
        self.heap[current] = value;
        self.indices.insert(value, current);
    }

    fn parent(&self, idx: usize) -> Option<usize> {
        if idx == 0 {
            None
        } else {
            Some((idx - 1) / 2)
        }
    }

    fn child(&self, idx: usize, child_type: ChildType) -> Option<usize> {
        let off = match child_type {
            ChildType::First => 1,
            ChildType::Second => 2,
        };
        let idx = idx * 2 + off;
        if idx >= self.heap.len() {
            None
        } else {
            Some(idx)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::datastructures::{BinaryQueue, BitSet};

    #[test]
    fn bitset_cardinality() {
        let mut bs = BitSet::new(130);
        assert_eq!(bs.cardinality(), 0);
        assert!(!bs.set_bit(3));
        assert!(bs.set_bit(3));
        assert!(!bs.set_bit(129));
        assert_eq!(bs.cardinality(), 2);
        assert!(bs[129]);
        assert!(!bs[128]);
        assert_eq!(bs.iter().collect::<Vec<_>>(), vec![3, 129]);
    }

    #[test]
    fn pq_pop_min() {
        let mut pq = BinaryQueue::default();

        pq.insert(0, 10);
        pq.insert(16, 1);
        pq.insert(1, 15);

        assert_eq!(pq.pop_min(), Some((16, 1)));
        assert_eq!(pq.pop_min(), Some((0, 10)));
        assert_eq!(pq.pop_min(), Some((1, 15)));
        assert_eq!(pq.pop_min(), None);
        assert!(pq.is_empty());
    }

    #[test]
    fn pq_update() {
        let mut pq = BinaryQueue::default();

        pq.insert(0, 10);
        pq.insert(16, 1);
        pq.insert(1, 15);
        pq.insert(16, 11);
        pq.insert(1, -3);

        assert_eq!(pq.heap.len(), 3);
        assert_eq!(pq.pop_min(), Some((1, -3)));
        assert_eq!(pq.pop_min(), Some((0, 10)));
        assert_eq!(pq.pop_min(), Some((16, 11)));
        assert_eq!(pq.pop_min(), None);
    }

    #[test]
    fn pq_reinsert_after_pop() {
        let mut pq = BinaryQueue::with_capacity(4);
        for (element, priority) in [(4, 2), (5, 7), (6, 0), (7, 5)].iter() {
            pq.insert(*element, *priority);
        }
        assert_eq!(pq.pop_min(), Some((6, 0)));
        assert!(!pq.contains(6));
        pq.insert(6, 6);
        assert!(pq.contains(6));
        let order: Vec<_> = std::iter::from_fn(|| pq.pop_min()).map(|(e, _)| e).collect();
        assert_eq!(order, vec![4, 7, 6, 5]);
    }

    #[test]
    fn pq_clear() {
        let mut pq = BinaryQueue::default();
        pq.insert(1, 1);
        pq.insert(2, 2);
        pq.clear();
        assert!(pq.is_empty());
        assert!(!pq.contains(1));
        assert_eq!(pq.pop_min(), None);
    }
}
