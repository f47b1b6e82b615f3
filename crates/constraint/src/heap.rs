// Copyright 2025 Irreducible Inc.

//! Array-backed binary min-heap over expression cursors.
//!
//! Specialized to concrete entries rather than a trait bound to keep the merge
//! inner loop free of indirection; circuits combine a small number of operands
//! (k) relative to the total term count, so these operations dominate the cost
//! of building expressions.

use crate::expression::WireId;

/// Cursor into one source term list, ordered by the wire id at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapEntry {
	/// Index of the source list this cursor walks.
	pub source: usize,
	/// Current position within the source list.
	pub pos: usize,
	/// Wire id of the term at `pos`, the heap key.
	pub wire: WireId,
}

#[derive(Debug, Default)]
pub struct MinHeap(Vec<HeapEntry>);

impl MinHeap {
	/// Builds a heap from arbitrary-order entries in O(n).
	pub fn from_entries(entries: Vec<HeapEntry>) -> Self {
		let mut heap = Self(entries);
		heap.heapify();
		heap
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Mutable access to the minimum entry; callers changing `wire` must
	/// follow up with `fix(0)`.
	pub fn head_mut(&mut self) -> Option<&mut HeapEntry> {
		self.0.first_mut()
	}

	/// Re-establishes the heap invariant over all entries. Idempotent.
	pub fn heapify(&mut self) {
		let n = self.0.len();
		for i in (0..n / 2).rev() {
			self.down(i, n);
		}
	}

	/// Inserts an entry in O(log n).
	pub fn push(&mut self, entry: HeapEntry) {
		self.0.push(entry);
		self.up(self.0.len() - 1);
	}

	/// Removes and returns the minimum entry in O(log n).
	pub fn pop_head(&mut self) -> Option<HeapEntry> {
		if self.0.is_empty() {
			return None;
		}
		let n = self.0.len() - 1;
		self.0.swap(0, n);
		self.down(0, n);
		self.0.pop()
	}

	/// Restores the invariant after the entry at `i` changed its key.
	///
	/// Equivalent to removing and re-pushing the entry, but cheaper.
	pub fn fix(&mut self, i: usize) {
		if !self.down(i, self.0.len()) {
			self.up(i);
		}
	}

	fn less(&self, i: usize, j: usize) -> bool {
		self.0[i].wire < self.0[j].wire
	}

	fn up(&mut self, mut j: usize) {
		while j > 0 {
			let i = (j - 1) / 2;
			if !self.less(j, i) {
				break;
			}
			self.0.swap(i, j);
			j = i;
		}
	}

	fn down(&mut self, i0: usize, n: usize) -> bool {
		let mut i = i0;
		loop {
			let left = 2 * i + 1;
			if left >= n {
				break;
			}
			// smaller child, left wins ties
			let mut j = left;
			let right = left + 1;
			if right < n && self.less(right, left) {
				j = right;
			}
			if !self.less(j, i) {
				break;
			}
			self.0.swap(i, j);
			i = j;
		}
		i > i0
	}
}
