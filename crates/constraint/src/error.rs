// Copyright 2025 Irreducible Inc.

use crate::{blueprint::BlueprintId, expression::WireId};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(
		"linear expression is not canonical: term {index} breaks strict wire-id order at wire {wire}"
	)]
	NonCanonicalExpression { index: usize, wire: WireId },

	#[error("constraint needs {words} calldata words, which exceeds the u32 length header")]
	ConstraintTooLarge { words: u64 },

	#[error("calldata truncated: expected at least {expected} words, got {got}")]
	CalldataTruncated { expected: usize, got: usize },

	#[error("calldata header declares {declared} total words, layout requires {expected}")]
	CalldataHeaderMismatch { declared: usize, expected: usize },

	#[error(
		"calldata span out of bounds: offset {offset} + {len} words exceeds arena of {arena_len}"
	)]
	SpanOutOfBounds {
		offset: u64,
		len: usize,
		arena_len: usize,
	},

	#[error("calldata leading word is zero at offset {0}")]
	ZeroSpan(u64),

	#[error("no blueprint registered under id {0}")]
	UnknownBlueprint(BlueprintId),

	#[error("instruction index {got} out of range, store holds {nb_instructions}")]
	InstructionOutOfRange { got: usize, nb_instructions: usize },
}
