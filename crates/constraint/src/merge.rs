// Copyright 2025 Irreducible Inc.

//! K-way merge of sorted term lists into one canonical linear expression.

use snarkc_utils::sorting::is_sorted_strictly_ascending_by_key;

use crate::{
	expression::{CoeffId, LinearExpression, Term},
	heap::{HeapEntry, MinHeap},
};

/// Merges `sources`, each sorted strictly ascending by wire id, into a single
/// canonical [`LinearExpression`] in O(n log k).
///
/// Terms with equal wire ids are coalesced through `add`, which receives the
/// two coefficient ids and returns the id of their field sum — the caller owns
/// the arithmetic and the interning, this routine never interprets
/// coefficients. Zero sources merge to the empty expression.
pub fn merge_linear_expressions(
	sources: &[&[Term]],
	mut add: impl FnMut(CoeffId, CoeffId) -> CoeffId,
) -> LinearExpression {
	debug_assert!(sources
		.iter()
		.all(|source| is_sorted_strictly_ascending_by_key(source.iter(), |term| term.wire)));

	let entries = sources
		.iter()
		.enumerate()
		.filter(|(_, source)| !source.is_empty())
		.map(|(i, source)| HeapEntry {
			source: i,
			pos: 0,
			wire: source[0].wire,
		})
		.collect::<Vec<_>>();
	let mut heap = MinHeap::from_entries(entries);

	let mut merged: Vec<Term> = Vec::with_capacity(sources.iter().map(|s| s.len()).sum());
	loop {
		let Some(head) = heap.head_mut() else {
			break;
		};
		let source = head.source;
		let pos = head.pos;

		// advance the winning cursor in place; `fix` is cheaper than pop+push
		let next = pos + 1;
		let exhausted = next >= sources[source].len();
		if !exhausted {
			head.pos = next;
			head.wire = sources[source][next].wire;
		}

		let term = sources[source][pos];
		match merged.last_mut() {
			Some(last) if last.wire == term.wire => last.coeff = add(last.coeff, term.coeff),
			_ => merged.push(term),
		}

		if exhausted {
			heap.pop_head();
		} else {
			heap.fix(0);
		}
	}

	LinearExpression::from_terms_unchecked(merged)
}
