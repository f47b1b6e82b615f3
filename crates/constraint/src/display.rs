// Copyright 2025 Irreducible Inc.

//! Human-readable rendering of constraints, for diagnostics and examples.

use std::{fmt, hash::Hash};

use itertools::Itertools;

use crate::{
	coeff::CoeffTable,
	expression::{LinearExpression, R1c, WireId},
};

/// Renders a constraint as `l ⋅ r == o`, resolving coefficient ids through a
/// [`CoeffTable`] and wire ids through a naming callback.
///
/// Multi-term `l`/`r` sides are parenthesized; an empty side renders as `0`;
/// a coefficient id missing from the table renders as `#id`.
pub struct R1cDisplay<'a, F, WireName> {
	pub constraint: &'a R1c,
	pub coeffs: &'a CoeffTable<F>,
	pub wire_name: WireName,
}

impl<F, WireName> fmt::Display for R1cDisplay<'_, F, WireName>
where
	F: Clone + Eq + Hash + fmt::Display,
	WireName: Fn(WireId) -> String,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.write_side(f, &self.constraint.l, true)?;
		write!(f, " ⋅ ")?;
		self.write_side(f, &self.constraint.r, true)?;
		write!(f, " == ")?;
		self.write_side(f, &self.constraint.o, false)
	}
}

impl<F, WireName> R1cDisplay<'_, F, WireName>
where
	F: Clone + Eq + Hash + fmt::Display,
	WireName: Fn(WireId) -> String,
{
	fn write_side(
		&self,
		f: &mut fmt::Formatter<'_>,
		side: &LinearExpression,
		parenthesize: bool,
	) -> fmt::Result {
		if side.is_empty() {
			return write!(f, "0");
		}
		let terms = side.iter().format_with(" + ", |term, callback| {
			let name = (self.wire_name)(term.wire);
			match self.coeffs.coeff(term.coeff) {
				Some(coeff) => callback(&format_args!("{coeff}*{name}")),
				None => callback(&format_args!("#{}*{name}", term.coeff)),
			}
		});
		if parenthesize && side.len() > 1 {
			write!(f, "({terms})")
		} else {
			write!(f, "{terms}")
		}
	}
}
