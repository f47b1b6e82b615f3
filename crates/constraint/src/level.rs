// Copyright 2025 Irreducible Inc.

//! Wire→level bookkeeping for dependency scheduling.
//!
//! A wire's level is its distance, in evaluation rounds, from the circuit
//! inputs: inputs sit at level 0 and a wire defined by an instruction sits one
//! past the deepest tracked wire that instruction references. Wires at the same
//! level never depend on one another, which is what lets a witness solver
//! evaluate a whole level in parallel.

use std::collections::HashMap;

use crate::expression::WireId;

pub type Level = u32;

/// Wire→level table a blueprint updates while leveling one instruction.
///
/// A wire is in one of three states:
/// - untracked (`has_wire` false): not managed by this table, silently ignored
///   during leveling;
/// - tracked but unleveled (`wire_level` returns `None`): allocated, not yet
///   defined by any instruction — the leveling pass treats these as the
///   instruction's outputs;
/// - leveled (`wire_level` returns `Some`): committed, contributes to the
///   level of downstream instructions.
///
/// Levels only ever grow the table; committed levels are never rewritten
/// within a pass.
pub trait InstructionTree {
	fn has_wire(&self, wire: WireId) -> bool;

	fn wire_level(&self, wire: WireId) -> Option<Level>;

	fn insert_wire(&mut self, wire: WireId, level: Level);
}

/// Standalone [`InstructionTree`] over an explicit wire set.
///
/// [`ConstraintSystem`](crate::system::ConstraintSystem) carries its own
/// dense table; this map-backed one serves callers leveling instruction
/// streams detached from a system, e.g. replay tooling and tests.
#[derive(Debug, Clone, Default)]
pub struct WireLevels(HashMap<WireId, Option<Level>>);

impl WireLevels {
	pub fn new() -> Self {
		Self::default()
	}

	/// Starts managing a wire without committing a level, the state of an
	/// allocated-but-undefined wire.
	pub fn track(&mut self, wire: WireId) {
		self.0.entry(wire).or_insert(None);
	}

	/// Tracks a wire at a committed level, e.g. pre-seeded inputs at level 0.
	pub fn seed(&mut self, wire: WireId, level: Level) {
		self.0.insert(wire, Some(level));
	}

	pub fn level(&self, wire: WireId) -> Option<Level> {
		self.0.get(&wire).copied().flatten()
	}

	pub fn nb_wires(&self) -> usize {
		self.0.len()
	}
}

impl InstructionTree for WireLevels {
	fn has_wire(&self, wire: WireId) -> bool {
		self.0.contains_key(&wire)
	}

	fn wire_level(&self, wire: WireId) -> Option<Level> {
		self.0.get(&wire).copied().flatten()
	}

	fn insert_wire(&mut self, wire: WireId, level: Level) {
		self.0.insert(wire, Some(level));
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_wire_states() {
		let mut tree = WireLevels::new();
		assert!(!tree.has_wire(3));

		tree.track(3);
		assert!(tree.has_wire(3));
		assert_eq!(tree.wire_level(3), None);

		tree.insert_wire(3, 2);
		assert_eq!(tree.wire_level(3), Some(2));
	}

	#[test]
	fn test_track_does_not_clear_seeded_level() {
		let mut tree = WireLevels::new();
		tree.seed(0, 0);
		tree.track(0);
		assert_eq!(tree.wire_level(0), Some(0));
	}
}
