// Copyright 2025 Irreducible Inc.

//! Append-only constraint system tying allocator, codecs and scheduler together.

use crate::{
	blueprint::{Blueprint, BlueprintId},
	error::Error,
	expression::{R1c, WireId},
	instruction::{Instruction, PackedInstruction},
	level::{InstructionTree, Level},
};

/// An append-only store of compressed constraints plus the wire bookkeeping
/// needed to schedule their evaluation.
///
/// Wires are allocated monotonically and never reused. Public and secret
/// input wires are tracked at level 0 from creation; internal wires stay
/// unleveled until the instruction defining them is appended, at which point
/// the scheduler commits their level and buckets the instruction for the
/// witness solver.
#[derive(Debug, Default)]
pub struct ConstraintSystem {
	blueprints: Vec<Blueprint>,
	calldata: Vec<u32>,
	instructions: Vec<PackedInstruction>,
	wires: WireTable,
	/// Instruction indexes grouped by level; the solver evaluates one group
	/// at a time, every group in parallel internally.
	levels: Vec<Vec<usize>>,
	nb_public: usize,
	nb_secret: usize,
	nb_internal: usize,
}

/// Dense wire→level table; the wire id is the index.
#[derive(Debug, Default, Clone)]
struct WireTable(Vec<Option<Level>>);

impl InstructionTree for WireTable {
	fn has_wire(&self, wire: WireId) -> bool {
		(wire as usize) < self.0.len()
	}

	fn wire_level(&self, wire: WireId) -> Option<Level> {
		self.0.get(wire as usize).copied().flatten()
	}

	fn insert_wire(&mut self, wire: WireId, level: Level) {
		self.0[wire as usize] = Some(level);
	}
}

impl ConstraintSystem {
	pub fn new() -> Self {
		Self::default()
	}

	/// Pre-sizes the instruction store and the calldata arena, for builders
	/// that know their constraint count up front.
	pub fn with_capacity(nb_instructions: usize, nb_calldata_words: usize) -> Self {
		Self {
			instructions: Vec::with_capacity(nb_instructions),
			calldata: Vec::with_capacity(nb_calldata_words),
			..Self::default()
		}
	}

	/// Registers a codec and returns the id instructions reference it by.
	pub fn add_blueprint(&mut self, blueprint: Blueprint) -> BlueprintId {
		let id = self.blueprints.len() as BlueprintId;
		self.blueprints.push(blueprint);
		tracing::debug!(blueprint_id = id, ?blueprint, "registered blueprint");
		id
	}

	pub fn add_public_variable(&mut self) -> WireId {
		self.nb_public += 1;
		self.allocate_wire(Some(0))
	}

	pub fn add_secret_variable(&mut self) -> WireId {
		self.nb_secret += 1;
		self.allocate_wire(Some(0))
	}

	pub fn add_internal_variable(&mut self) -> WireId {
		self.nb_internal += 1;
		self.allocate_wire(None)
	}

	fn allocate_wire(&mut self, level: Option<Level>) -> WireId {
		let id = self.wires.0.len() as WireId;
		self.wires.0.push(level);
		id
	}

	/// Compresses a rank-1 constraint, appends the instruction and levels the
	/// wires it defines. Returns the instruction index.
	///
	/// On error nothing is appended; the arena and the level table are
	/// unchanged.
	pub fn add_r1c(&mut self, constraint: &R1c, blueprint_id: BlueprintId) -> Result<usize, Error> {
		let blueprint = *self
			.blueprints
			.get(blueprint_id as usize)
			.ok_or(Error::UnknownBlueprint(blueprint_id))?;

		let start_calldata = self.calldata.len() as u64;
		match blueprint {
			Blueprint::GenericR1c(codec) => codec.compress(constraint, &mut self.calldata)?,
		}

		let index = self.instructions.len();
		let packed = PackedInstruction {
			blueprint_id,
			start_calldata,
		};
		self.instructions.push(packed);

		let instruction = packed.unpack(&self.calldata, &self.blueprints)?;
		let level = blueprint.update_instruction_tree(instruction, &mut self.wires);
		if self.levels.len() <= level as usize {
			self.levels.resize_with(level as usize + 1, Vec::new);
		}
		self.levels[level as usize].push(index);
		Ok(index)
	}

	/// Borrowed calldata view of the instruction at `index`.
	pub fn instruction(&self, index: usize) -> Result<Instruction<'_>, Error> {
		self.instructions
			.get(index)
			.ok_or(Error::InstructionOutOfRange {
				got: index,
				nb_instructions: self.instructions.len(),
			})?
			.unpack(&self.calldata, &self.blueprints)
	}

	/// Decompresses the constraint at `index` on demand; constraints are never
	/// stored twice.
	pub fn r1c_at(&self, index: usize) -> Result<R1c, Error> {
		let instruction = self.instruction(index)?;
		let mut constraint = R1c::default();
		match &self.blueprints[instruction.blueprint_id as usize] {
			Blueprint::GenericR1c(codec) => codec.decompress(instruction, &mut constraint)?,
		}
		Ok(constraint)
	}

	/// Decompresses every constraint, in declaration order.
	pub fn r1cs(&self) -> Result<Vec<R1c>, Error> {
		let _scope = tracing::debug_span!(
			"ConstraintSystem::r1cs",
			nb_instructions = self.instructions.len()
		)
		.entered();
		(0..self.instructions.len()).map(|i| self.r1c_at(i)).collect()
	}

	pub fn wire_level(&self, wire: WireId) -> Option<Level> {
		self.wires.wire_level(wire)
	}

	/// Instruction indexes grouped by level, the solver's parallel batches.
	pub fn levels(&self) -> &[Vec<usize>] {
		&self.levels
	}

	/// The raw calldata arena, for readers that walk the stream themselves
	/// (see [`skip_span`](crate::instruction::skip_span)).
	pub fn calldata(&self) -> &[u32] {
		&self.calldata
	}

	pub fn nb_instructions(&self) -> usize {
		self.instructions.len()
	}

	/// Number of primitive rank-1 constraints across all instructions.
	pub fn nb_constraints(&self) -> usize {
		self.instructions
			.iter()
			.map(|packed| self.blueprints[packed.blueprint_id as usize].nb_constraints())
			.sum()
	}

	pub fn nb_wires(&self) -> usize {
		self.wires.0.len()
	}

	pub fn nb_public_variables(&self) -> usize {
		self.nb_public
	}

	pub fn nb_secret_variables(&self) -> usize {
		self.nb_secret
	}

	pub fn nb_internal_variables(&self) -> usize {
		self.nb_internal
	}
}

impl InstructionTree for ConstraintSystem {
	fn has_wire(&self, wire: WireId) -> bool {
		self.wires.has_wire(wire)
	}

	fn wire_level(&self, wire: WireId) -> Option<Level> {
		self.wires.wire_level(wire)
	}

	fn insert_wire(&mut self, wire: WireId, level: Level) {
		self.wires.insert_wire(wire, level)
	}
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;

	use super::*;
	use crate::{
		blueprint::GenericR1c,
		expression::{LinearExpression, Term},
	};

	fn single_term(coeff: u32, wire: WireId) -> LinearExpression {
		LinearExpression::from_terms(vec![Term::new(coeff, wire)]).unwrap()
	}

	fn mul_constraint(a: WireId, b: WireId, out: WireId) -> R1c {
		R1c {
			l: single_term(1, a),
			r: single_term(1, b),
			o: single_term(1, out),
		}
	}

	#[test]
	fn test_add_r1c_requires_registered_blueprint() {
		let mut system = ConstraintSystem::new();
		assert_matches!(
			system.add_r1c(&R1c::default(), 0),
			Err(Error::UnknownBlueprint(0))
		);
		assert_eq!(system.nb_instructions(), 0);
	}

	#[test]
	fn test_instruction_index_out_of_range() {
		let system = ConstraintSystem::new();
		assert_matches!(
			system.instruction(0),
			Err(Error::InstructionOutOfRange {
				got: 0,
				nb_instructions: 0
			})
		);
	}

	#[test]
	fn test_levels_track_longest_chain_not_declaration_order() {
		let mut system = ConstraintSystem::new();
		let blueprint = system.add_blueprint(Blueprint::GenericR1c(GenericR1c));

		let a = system.add_public_variable();
		let b = system.add_secret_variable();
		let v10 = system.add_internal_variable();
		let v11 = system.add_internal_variable();
		let v12 = system.add_internal_variable();

		// #1 defines v10 from level-0 inputs
		system.add_r1c(&mul_constraint(a, b, v10), blueprint).unwrap();
		// #2 defines v11 from v10
		system.add_r1c(&mul_constraint(v10, b, v11), blueprint).unwrap();
		// #3 defines v12 from level-0 inputs only
		system.add_r1c(&mul_constraint(a, a, v12), blueprint).unwrap();

		assert_eq!(system.wire_level(v10), Some(1));
		assert_eq!(system.wire_level(v11), Some(2));
		assert_eq!(system.wire_level(v12), Some(1));
		assert_eq!(system.levels(), &[vec![], vec![0, 2], vec![1]]);
	}

	#[test]
	fn test_scheduler_is_deterministic() {
		let build = || {
			let mut system = ConstraintSystem::new();
			let blueprint = system.add_blueprint(Blueprint::GenericR1c(GenericR1c));
			let x = system.add_secret_variable();
			let mut wires = vec![x];
			for i in 0..32 {
				let out = system.add_internal_variable();
				let a = wires[i % wires.len()];
				let b = wires[(7 * i + 1) % wires.len()];
				system.add_r1c(&mul_constraint(a, b, out), blueprint).unwrap();
				wires.push(out);
			}
			(0..system.nb_wires() as WireId)
				.map(|w| system.wire_level(w))
				.collect::<Vec<_>>()
		};
		assert_eq!(build(), build());
	}

	#[test]
	fn test_failed_compress_leaves_system_unchanged() {
		// decompressing a corrupted span must not partially populate anything,
		// and a rejected add must not grow the store
		let mut system = ConstraintSystem::new();
		let blueprint = system.add_blueprint(Blueprint::GenericR1c(GenericR1c));
		let x = system.add_secret_variable();
		let out = system.add_internal_variable();
		system.add_r1c(&mul_constraint(x, x, out), blueprint).unwrap();

		let before_words = system.calldata.len();
		assert_matches!(
			system.add_r1c(&R1c::default(), blueprint + 1),
			Err(Error::UnknownBlueprint(_))
		);
		assert_eq!(system.calldata.len(), before_words);
		assert_eq!(system.nb_instructions(), 1);
	}
}
