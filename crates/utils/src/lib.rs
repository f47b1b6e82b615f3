// Copyright 2025 Irreducible Inc.

//! Small generic helpers shared by the constraint compiler crates.

pub mod sorting;
