// Copyright 2025 Irreducible Inc.

//! Constraint encoding and dependency scheduling for a SNARK circuit compiler.
//!
//! Three pieces make up this crate:
//! - blueprints, pluggable codecs packing rank-1 constraints into a
//!   self-describing `u32` instruction stream over a shared arena;
//! - a dependency-level scheduler assigning each defined wire its distance
//!   from the circuit inputs, so a witness solver can evaluate whole levels in
//!   parallel;
//! - a k-way merge keeping linear expressions sorted and deduplicated by wire
//!   id while expressions are combined during compilation.
//!
//! Field arithmetic stays external: coefficients are interned ids resolved
//! through a [`CoeffTable`], and proving, verification and witness solving are
//! downstream consumers of the instruction stream and the level table.

pub mod blueprint;
pub mod coeff;
pub mod display;
pub mod error;
pub mod expression;
pub mod heap;
pub mod instruction;
pub mod level;
pub mod merge;
pub mod system;

pub use blueprint::{Blueprint, BlueprintId, CalldataSize, GenericR1c};
pub use coeff::CoeffTable;
pub use display::R1cDisplay;
pub use error::Error;
pub use expression::{CoeffId, LinearExpression, R1c, Term, WireId};
pub use instruction::{skip_span, Instruction, PackedInstruction};
pub use level::{InstructionTree, Level, WireLevels};
pub use merge::merge_linear_expressions;
pub use system::ConstraintSystem;
