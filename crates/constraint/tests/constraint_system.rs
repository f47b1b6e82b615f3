// Copyright 2025 Irreducible Inc.

//! End-to-end test building the cubic circuit `x³ + x + 5 == y` the way a
//! frontend would: interned coefficients, merged expressions, compressed
//! instructions, then introspection and scheduling on the way back out.

use snarkc_constraint::{
	merge_linear_expressions, skip_span, Blueprint, CoeffTable, ConstraintSystem, GenericR1c,
	LinearExpression, R1c, R1cDisplay, Term, WireId,
};

fn single_term(coeff: u32, wire: WireId) -> LinearExpression {
	LinearExpression::from_terms(vec![Term::new(coeff, wire)]).unwrap()
}

#[test]
fn cubic_circuit_end_to_end() {
	let mut coeffs = CoeffTable::new();
	let c_one = coeffs.add_coeff(1u64);
	let c_five = coeffs.add_coeff(5u64);

	let mut system = ConstraintSystem::new();
	let blueprint = system.add_blueprint(Blueprint::GenericR1c(GenericR1c));

	let one = system.add_public_variable(); // the constant-one wire
	let y = system.add_public_variable();
	let x = system.add_secret_variable();
	let v0 = system.add_internal_variable(); // x²
	let v1 = system.add_internal_variable(); // x³

	// x² == x * x
	let sq = R1c {
		l: single_term(c_one, x),
		r: single_term(c_one, x),
		o: single_term(c_one, v0),
	};
	// x³ == x² * x
	let cube = R1c {
		l: single_term(c_one, v0),
		r: single_term(c_one, x),
		o: single_term(c_one, v1),
	};
	// y == x³ + x + 5, with the o side assembled by the k-way merge
	let five_const = [Term::new(c_five, one)];
	let linear_x = [Term::new(c_one, x)];
	let cubic_x = [Term::new(c_one, v1)];
	let o = merge_linear_expressions(&[&five_const, &linear_x, &cubic_x], |_, _| {
		panic!("operand wires are disjoint")
	});
	let sum = R1c {
		l: single_term(c_one, y),
		r: single_term(c_one, one),
		o,
	};

	let instructions = [
		system.add_r1c(&sq, blueprint).unwrap(),
		system.add_r1c(&cube, blueprint).unwrap(),
		system.add_r1c(&sum, blueprint).unwrap(),
	];
	assert_eq!(instructions, [0, 1, 2]);
	assert_eq!(system.nb_instructions(), 3);
	assert_eq!(system.nb_constraints(), 3);
	assert_eq!(system.nb_public_variables(), 2);
	assert_eq!(system.nb_secret_variables(), 1);
	assert_eq!(system.nb_internal_variables(), 2);

	// decompression reproduces the constraints exactly
	let decoded = system.r1cs().unwrap();
	assert_eq!(decoded, vec![sq.clone(), cube, sum]);

	// diagnostics render through the coefficient table
	let names = ["one", "Y", "X", "v0", "v1"];
	let rendered = R1cDisplay {
		constraint: &decoded[2],
		coeffs: &coeffs,
		wire_name: |wire: WireId| names[wire as usize].to_string(),
	}
	.to_string();
	assert_eq!(rendered, "1*Y ⋅ 1*one == 5*one + 1*X + 1*v1");

	// dependency levels: inputs at 0, x² at 1, x³ at 2; the final instruction
	// only references leveled wires and lands at 3 defining nothing
	assert_eq!(system.wire_level(one), Some(0));
	assert_eq!(system.wire_level(y), Some(0));
	assert_eq!(system.wire_level(x), Some(0));
	assert_eq!(system.wire_level(v0), Some(1));
	assert_eq!(system.wire_level(v1), Some(2));
	assert_eq!(system.levels(), &[vec![], vec![0], vec![1], vec![2]]);

	// solver contract: every input wire of an instruction at level L sits
	// strictly below L
	for (level, batch) in system.levels().iter().enumerate() {
		for &index in batch {
			let constraint = system.r1c_at(index).unwrap();
			for side in [&constraint.l, &constraint.r, &constraint.o] {
				for term in side {
					let wire_level = system.wire_level(term.wire).unwrap();
					assert!(wire_level <= level as u32);
					if wire_level == level as u32 {
						// the instruction's own output
						assert!([v0, v1].contains(&term.wire) || level == 0);
					}
				}
			}
		}
	}

	// a reader ignorant of every blueprint can still walk the stream
	let calldata = system.calldata();
	let mut offset = 0;
	let mut spans = 0;
	while (offset as usize) < calldata.len() {
		offset = skip_span(calldata, offset).unwrap();
		spans += 1;
	}
	assert_eq!(spans, 3);

	// deterministic rebuild: identical instruction sequence, identical levels
	let mut replay = ConstraintSystem::new();
	let replay_blueprint = replay.add_blueprint(Blueprint::GenericR1c(GenericR1c));
	for _ in 0..3 {
		replay.add_public_variable();
	}
	// allocation order differs in kind but not in id assignment
	replay.add_internal_variable();
	replay.add_internal_variable();
	for constraint in &decoded {
		replay.add_r1c(constraint, replay_blueprint).unwrap();
	}
	for wire in 0..system.nb_wires() as WireId {
		assert_eq!(replay.wire_level(wire), system.wire_level(wire));
	}
	assert_eq!(replay.levels(), system.levels());
}
