// Copyright 2025 Irreducible Inc.

//! Deduplicating table interning field coefficients.
//!
//! Terms reference coefficients by [`CoeffId`] only; the element type is opaque
//! here — field arithmetic lives with the caller. Interning the same element
//! twice returns the original id, so equal coefficients across millions of
//! constraints share one table slot.

use std::{collections::HashMap, hash::Hash};

use crate::expression::CoeffId;

#[derive(Debug, Clone)]
pub struct CoeffTable<F> {
	coeffs: Vec<F>,
	ids: HashMap<F, CoeffId>,
}

impl<F> Default for CoeffTable<F> {
	fn default() -> Self {
		Self {
			coeffs: Vec::new(),
			ids: HashMap::new(),
		}
	}
}

impl<F: Clone + Eq + Hash> CoeffTable<F> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Interns a coefficient, returning the id it is already stored under when
	/// seen before.
	pub fn add_coeff(&mut self, coeff: F) -> CoeffId {
		if let Some(&id) = self.ids.get(&coeff) {
			return id;
		}
		let id = self.coeffs.len() as CoeffId;
		self.coeffs.push(coeff.clone());
		self.ids.insert(coeff, id);
		id
	}

	/// Reverse lookup, for diagnostics and display.
	pub fn coeff(&self, id: CoeffId) -> Option<&F> {
		self.coeffs.get(id as usize)
	}

	pub fn len(&self) -> usize {
		self.coeffs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.coeffs.is_empty()
	}
}
