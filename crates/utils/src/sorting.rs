// Copyright 2025 Irreducible Inc.

use itertools::Itertools;

/// Returns whether the given values are sorted in ascending order.
pub fn is_sorted_ascending<T: PartialOrd + Clone>(values: impl Iterator<Item = T>) -> bool {
	!values.tuple_windows().any(|(a, b)| a > b)
}

/// Returns whether the keys projected from the given values are strictly ascending.
///
/// Strictness matters for canonical forms that forbid duplicates, e.g. term lists
/// keyed by wire id: equal adjacent keys are rejected along with descending ones.
pub fn is_sorted_strictly_ascending_by_key<T, K: PartialOrd + Clone>(
	values: impl Iterator<Item = T>,
	key: impl Fn(&T) -> K,
) -> bool {
	!values
		.map(|value| key(&value))
		.tuple_windows()
		.any(|(a, b)| a >= b)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_is_sorted_ascending() {
		assert!(is_sorted_ascending([1, 2, 2, 3].into_iter()));
		assert!(is_sorted_ascending(std::iter::empty::<u32>()));
		assert!(!is_sorted_ascending([2, 1].into_iter()));
	}

	#[test]
	fn test_is_sorted_strictly_ascending_by_key() {
		let key = |&(k, _): &(u32, &str)| k;
		assert!(is_sorted_strictly_ascending_by_key(
			[(1, "a"), (2, "b"), (5, "c")].into_iter(),
			key
		));
		assert!(is_sorted_strictly_ascending_by_key(std::iter::empty::<(u32, &str)>(), key));
		// duplicates are not strictly ascending
		assert!(!is_sorted_strictly_ascending_by_key(
			[(1, "a"), (1, "b")].into_iter(),
			key
		));
		assert!(!is_sorted_strictly_ascending_by_key(
			[(3, "a"), (2, "b")].into_iter(),
			key
		));
	}
}
