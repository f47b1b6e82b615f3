// Copyright 2025 Irreducible Inc.

//! Terms, linear expressions and the rank-1 constraint shape.
//!
//! A linear expression is kept in canonical form: terms strictly ascending by
//! wire id, at most one term per wire. Contributions to the same wire must be
//! summed before construction, typically via
//! [`merge_linear_expressions`](crate::merge::merge_linear_expressions).

use snarkc_utils::sorting::is_sorted_strictly_ascending_by_key;

use crate::error::Error;

/// Identifier of a wire (circuit variable) in the evaluation vector.
///
/// Wire ids are assigned monotonically by the constraint system and never reused.
pub type WireId = u32;

/// Identifier of an interned coefficient in a [`CoeffTable`](crate::coeff::CoeffTable).
///
/// Opaque to the codec; compared by equality only.
pub type CoeffId = u32;

/// A single `coeff * wire` product inside a linear expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Term {
	pub coeff: CoeffId,
	pub wire: WireId,
}

impl Term {
	pub const fn new(coeff: CoeffId, wire: WireId) -> Self {
		Self { coeff, wire }
	}
}

/// A weighted sum of wires in canonical form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearExpression(Vec<Term>);

impl LinearExpression {
	pub const fn empty() -> Self {
		Self(Vec::new())
	}

	/// Constructs an expression, validating the canonical form.
	pub fn from_terms(terms: Vec<Term>) -> Result<Self, Error> {
		if let Some(index) = first_order_violation(&terms) {
			return Err(Error::NonCanonicalExpression {
				index,
				wire: terms[index].wire,
			});
		}
		Ok(Self(terms))
	}

	/// Constructs an expression from terms already known to be canonical.
	///
	/// Used on decode paths where the encoder upheld the invariant; checked in
	/// debug builds only.
	pub(crate) fn from_terms_unchecked(terms: Vec<Term>) -> Self {
		debug_assert!(first_order_violation(&terms).is_none());
		Self(terms)
	}

	pub fn terms(&self) -> &[Term] {
		&self.0
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Term> {
		self.0.iter()
	}

	/// Backing storage, for decoders that refill an expression in place.
	pub(crate) fn as_mut_vec(&mut self) -> &mut Vec<Term> {
		&mut self.0
	}
}

impl<'a> IntoIterator for &'a LinearExpression {
	type Item = &'a Term;
	type IntoIter = std::slice::Iter<'a, Term>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

fn first_order_violation(terms: &[Term]) -> Option<usize> {
	if is_sorted_strictly_ascending_by_key(terms.iter(), |term| term.wire) {
		return None;
	}
	terms
		.windows(2)
		.position(|pair| pair[0].wire >= pair[1].wire)
		.map(|i| i + 1)
}

/// A rank-1 constraint `⟨l, w⟩ · ⟨r, w⟩ = ⟨o, w⟩` over the witness vector `w`.
///
/// All three sides are independent expressions; any of them may be empty (an
/// empty side evaluates to zero). Once appended to a constraint system the
/// constraint is immutable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct R1c {
	pub l: LinearExpression,
	pub r: LinearExpression,
	pub o: LinearExpression,
}

impl R1c {
	/// Total number of terms across all three sides.
	pub fn nb_terms(&self) -> usize {
		self.l.len() + self.r.len() + self.o.len()
	}
}
