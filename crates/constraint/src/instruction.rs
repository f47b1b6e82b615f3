// Copyright 2025 Irreducible Inc.

//! Instruction storage over a shared calldata arena.
//!
//! All encoded constraints live in one growable `Vec<u32>`; an instruction is
//! just a blueprint id plus an offset into that arena. Decoding borrows a word
//! slice — no per-instruction allocation, which is what keeps multi-million
//! constraint systems in memory.

use crate::{
	blueprint::{Blueprint, BlueprintId, CalldataSize},
	error::Error,
};

/// Stored form of an instruction: codec id and arena offset.
///
/// The word span is not stored; it is recovered from the blueprint's
/// [`CalldataSize`] or, for variable-size encodings, from the leading word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedInstruction {
	pub blueprint_id: BlueprintId,
	pub start_calldata: u64,
}

impl PackedInstruction {
	/// Resolves this instruction to a borrowed calldata view.
	pub fn unpack<'a>(
		&self,
		calldata: &'a [u32],
		blueprints: &[Blueprint],
	) -> Result<Instruction<'a>, Error> {
		let blueprint = blueprints
			.get(self.blueprint_id as usize)
			.ok_or(Error::UnknownBlueprint(self.blueprint_id))?;
		let start = self.start_calldata as usize;
		let size = match blueprint.calldata_size() {
			CalldataSize::Fixed(n) => n,
			CalldataSize::Variable => {
				*calldata.get(start).ok_or(Error::SpanOutOfBounds {
					offset: self.start_calldata,
					len: 1,
					arena_len: calldata.len(),
				})? as usize
			}
		};
		let words = calldata
			.get(start..start + size)
			.ok_or(Error::SpanOutOfBounds {
				offset: self.start_calldata,
				len: size,
				arena_len: calldata.len(),
			})?;
		Ok(Instruction {
			blueprint_id: self.blueprint_id,
			calldata: words,
		})
	}
}

/// Borrowed decoded view of one instruction.
#[derive(Debug, Clone, Copy)]
pub struct Instruction<'a> {
	pub blueprint_id: BlueprintId,
	/// Self-describing word span; for variable-size encodings `calldata[0]` is
	/// the total word count, the span itself included.
	pub calldata: &'a [u32],
}

impl Instruction<'_> {
	pub fn total_words(&self) -> usize {
		self.calldata.first().copied().unwrap_or(0) as usize
	}
}

/// Advances past one variable-size instruction using only its leading word.
///
/// This is the forward-compatibility path: a reader that does not recognize an
/// instruction's blueprint id can still step over its payload.
pub fn skip_span(calldata: &[u32], offset: u64) -> Result<u64, Error> {
	let start = offset as usize;
	let total = *calldata.get(start).ok_or(Error::SpanOutOfBounds {
		offset,
		len: 1,
		arena_len: calldata.len(),
	})? as usize;
	if total == 0 {
		return Err(Error::ZeroSpan(offset));
	}
	if calldata.get(start..start + total).is_none() {
		return Err(Error::SpanOutOfBounds {
			offset,
			len: total,
			arena_len: calldata.len(),
		});
	}
	Ok(offset + total as u64)
}
