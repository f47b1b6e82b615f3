// Copyright 2025 Irreducible Inc.

//! Constraint codecs ("blueprints") and the generic rank-1 codec.
//!
//! A blueprint is the strategy for one constraint shape: how it packs into
//! calldata words, how many primitive constraints it expands to, and how it
//! contributes to the dependency levels. Blueprints form a tagged-variant
//! registry — adding a constraint shape means adding an enum variant, and an
//! instruction names its codec by [`BlueprintId`].

use crate::{
	error::Error,
	expression::{R1c, Term, WireId},
	instruction::Instruction,
	level::{InstructionTree, Level},
};

pub type BlueprintId = u32;

/// Calldata footprint of a blueprint's instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalldataSize {
	/// Every instruction of this blueprint spans exactly this many words.
	Fixed(usize),
	/// Span is carried in the leading calldata word of each instruction.
	Variable,
}

/// Registry entry dispatching to a concrete codec.
#[derive(Debug, Clone, Copy)]
pub enum Blueprint {
	GenericR1c(GenericR1c),
}

impl Blueprint {
	pub fn calldata_size(&self) -> CalldataSize {
		match self {
			Self::GenericR1c(blueprint) => blueprint.calldata_size(),
		}
	}

	/// Number of primitive rank-1 constraints one instruction expands to.
	pub fn nb_constraints(&self) -> usize {
		match self {
			Self::GenericR1c(blueprint) => blueprint.nb_constraints(),
		}
	}

	/// Number of wires an instruction of this blueprint syntactically defines.
	pub fn nb_outputs(&self, instruction: Instruction<'_>) -> usize {
		match self {
			Self::GenericR1c(blueprint) => blueprint.nb_outputs(instruction),
		}
	}

	/// Levels the wires an instruction defines; see [`GenericR1c::update_instruction_tree`].
	pub fn update_instruction_tree(
		&self,
		instruction: Instruction<'_>,
		tree: &mut impl InstructionTree,
	) -> Level {
		match self {
			Self::GenericR1c(blueprint) => blueprint.update_instruction_tree(instruction, tree),
		}
	}
}

/// Codec for the generic rank-1 shape `⟨l, w⟩ · ⟨r, w⟩ = ⟨o, w⟩`.
///
/// Calldata layout, one `u32` per word:
///
/// ```txt
/// [0]        total word count, this word included: 4 + 2*(|l| + |r| + |o|)
/// [1..=3]    |l|, |r|, |o|
/// [4..]      (coeff id, wire id) per term, l then r then o, original order
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericR1c;

/// Word cost of encoding `nb_terms` terms; the total must fit the `u32` header.
fn encoded_words(nb_terms: usize) -> Result<u32, Error> {
	let words = 4 + 2 * nb_terms as u64;
	if words > u32::MAX as u64 {
		return Err(Error::ConstraintTooLarge { words });
	}
	Ok(words as u32)
}

impl GenericR1c {
	pub fn calldata_size(&self) -> CalldataSize {
		// arity of l, r and o is unbounded
		CalldataSize::Variable
	}

	pub fn nb_constraints(&self) -> usize {
		1
	}

	pub fn nb_outputs(&self, _instruction: Instruction<'_>) -> usize {
		// a rank-1 constraint does not distinguish outputs syntactically; the
		// leveling pass resolves them against the instruction tree
		0
	}

	/// Appends the encoding of `constraint` to `calldata`.
	///
	/// Atomic: the capacity check runs before the first write, so a failed
	/// compression leaves `calldata` untouched.
	pub fn compress(&self, constraint: &R1c, calldata: &mut Vec<u32>) -> Result<(), Error> {
		let total = encoded_words(constraint.nb_terms())?;
		calldata.reserve(total as usize);
		calldata.push(total);
		calldata.push(constraint.l.len() as u32);
		calldata.push(constraint.r.len() as u32);
		calldata.push(constraint.o.len() as u32);
		for side in [&constraint.l, &constraint.r, &constraint.o] {
			for term in side {
				calldata.push(term.coeff);
				calldata.push(term.wire);
			}
		}
		Ok(())
	}

	/// Reconstructs the constraint an instruction encodes, reusing
	/// `constraint`'s backing storage when capacity suffices.
	///
	/// Exact inverse of [`compress`](Self::compress): terms come back in the
	/// encoded order, which is the original one.
	pub fn decompress(
		&self,
		instruction: Instruction<'_>,
		constraint: &mut R1c,
	) -> Result<(), Error> {
		let calldata = instruction.calldata;
		if calldata.len() < 4 {
			return Err(Error::CalldataTruncated {
				expected: 4,
				got: calldata.len(),
			});
		}
		let len_l = calldata[1] as usize;
		let len_r = calldata[2] as usize;
		let len_o = calldata[3] as usize;
		let expected = 4 + 2 * (len_l + len_r + len_o);
		if calldata[0] as usize != expected {
			return Err(Error::CalldataHeaderMismatch {
				declared: calldata[0] as usize,
				expected,
			});
		}
		if calldata.len() < expected {
			return Err(Error::CalldataTruncated {
				expected,
				got: calldata.len(),
			});
		}

		let mut offset = 4;
		for (side, len) in [
			(&mut constraint.l, len_l),
			(&mut constraint.r, len_r),
			(&mut constraint.o, len_o),
		] {
			let terms = side.as_mut_vec();
			terms.clear();
			terms.extend(
				calldata[offset..offset + 2 * len]
					.chunks_exact(2)
					.map(|pair| Term::new(pair[0], pair[1])),
			);
			offset += 2 * len;
		}
		Ok(())
	}

	/// Computes the dependency level of the wires this instruction defines and
	/// commits them to `tree`.
	///
	/// Walks every referenced wire of l, r and o in encoding order: untracked
	/// wires are skipped, committed levels raise the running maximum, and
	/// tracked-but-unleveled wires are collected as outputs. The output level
	/// is one past the maximum, folding to 0 when nothing tracked is
	/// referenced.
	pub fn update_instruction_tree(
		&self,
		instruction: Instruction<'_>,
		tree: &mut impl InstructionTree,
	) -> Level {
		let calldata = instruction.calldata;
		let len_l = calldata[1] as usize;
		let len_r = calldata[2] as usize;
		let len_o = calldata[3] as usize;

		let mut max_level = None;
		let mut output_wires = Vec::new();
		let mut offset = 4;
		for len in [len_l, len_r, len_o] {
			walk_wires(calldata, len, offset, &*tree, &mut max_level, &mut output_wires);
			offset += 2 * len;
		}

		let level = max_level.map_or(0, |max: Level| max + 1);
		for wire in output_wires {
			tree.insert_wire(wire, level);
		}
		level
	}
}

fn walk_wires(
	calldata: &[u32],
	nb_terms: usize,
	offset: usize,
	tree: &impl InstructionTree,
	max_level: &mut Option<Level>,
	output_wires: &mut Vec<WireId>,
) {
	for k in 0..nb_terms {
		// each term is (coeff id, wire id)
		let wire = calldata[offset + 2 * k + 1];
		if !tree.has_wire(wire) {
			continue;
		}
		match tree.wire_level(wire) {
			None => output_wires.push(wire),
			Some(level) => *max_level = Some(max_level.map_or(level, |max| max.max(level))),
		}
	}
}
