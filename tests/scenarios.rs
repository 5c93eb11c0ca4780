//! End-to-end tests exercising the public surface of the library. Each test uses a disjoint
//! range of variable ids, since the variable registry is process-wide and integration test
//! functions in this file may run concurrently.

use std::collections::HashMap;

use maxsum_rust::index::{ind2sub, sub2ind};
use maxsum_rust::registry;
use maxsum_rust::{DiscreteFunction, MaxSumController, MaxSumOptions, VarId};

#[test]
fn index_math_round_trips_a_coordinate_tuple() {
    let sizes = [2, 3, 4];
    assert_eq!(sub2ind(&sizes, &[1, 2, 3]), 23);
    assert_eq!(ind2sub(&sizes, 23), vec![1, 2, 3]);
}

#[test]
fn expand_preserves_values_across_the_broadcast_variable() {
    let base: VarId = 1000;
    registry::register_variable(base, 2).unwrap();
    registry::register_variable(base + 1, 2).unwrap();

    let mut f = DiscreteFunction::from_values(vec![base], vec![10.0, 20.0]).unwrap();
    f.expand(&[base + 1]).unwrap();

    assert_eq!(f.vars(), &[base, base + 1]);
    assert_eq!(f.get_by_subindex(&[0, 0]), 10.0);
    assert_eq!(f.get_by_subindex(&[1, 0]), 20.0);
    assert_eq!(f.get_by_subindex(&[0, 1]), 10.0);
    assert_eq!(f.get_by_subindex(&[1, 1]), 20.0);
}

#[test]
fn max_marginal_reduces_a_two_variable_function() {
    let base: VarId = 1010;
    registry::register_variable(base, 2).unwrap();
    registry::register_variable(base + 1, 3).unwrap();

    let mut g = DiscreteFunction::new(vec![base, base + 1], 0.0).unwrap();
    for i in 0..2 {
        for j in 0..3 {
            g.set_by_subindex(&[i, j], (i + 10 * j) as f64);
        }
    }

    let out = g.max_marginal(&[base]).unwrap();
    assert_eq!(out.get_by_subindex(&[0]), 20.0);
    assert_eq!(out.get_by_subindex(&[1]), 21.0);
}

#[test]
fn condition_fixes_one_variable_and_drops_it_from_the_domain() {
    let base: VarId = 1020;
    registry::register_variable(base, 2).unwrap();
    registry::register_variable(base + 1, 3).unwrap();

    let mut g = DiscreteFunction::new(vec![base, base + 1], 0.0).unwrap();
    for i in 0..2 {
        for j in 0..3 {
            g.set_by_subindex(&[i, j], (i + 10 * j) as f64);
        }
    }

    g.condition(&[base + 1], &[1]).unwrap();
    assert_eq!(g.vars(), &[base]);
    assert_eq!(g.get_by_subindex(&[0]), 10.0);
    assert_eq!(g.get_by_subindex(&[1]), 11.0);
}

#[test]
fn trivial_two_factor_max_sum_via_the_public_api() {
    let x: VarId = 1030;
    let y: VarId = 1031;
    registry::register_variable(x, 2).unwrap();
    registry::register_variable(y, 2).unwrap();

    let a = DiscreteFunction::from_values(vec![x], vec![0.0, 5.0]).unwrap();
    let mut b = DiscreteFunction::new(vec![x, y], 0.0).unwrap();
    b.set_by_subindex(&[0, 0], 0.0);
    b.set_by_subindex(&[1, 0], 1.0);
    b.set_by_subindex(&[0, 1], 2.0);
    b.set_by_subindex(&[1, 1], 0.0);

    let mut controller = MaxSumController::new(MaxSumOptions::default());
    controller.set_factor(0, a).unwrap();
    controller.set_factor(1, b).unwrap();
    controller.optimise().unwrap();

    let values: HashMap<VarId, usize> = controller.get_values().unwrap().into_iter().collect();
    assert_eq!(values[&x], 1);
    assert_eq!(values[&y], 0);
}

#[test]
fn converges_on_a_three_variable_tree_matching_brute_force() {
    let x: VarId = 1040;
    let y: VarId = 1041;
    let z: VarId = 1042;
    registry::register_variable(x, 2).unwrap();
    registry::register_variable(y, 2).unwrap();
    registry::register_variable(z, 2).unwrap();

    let a = DiscreteFunction::from_values(vec![x], vec![0.0, 3.0]).unwrap();
    let mut b = DiscreteFunction::new(vec![x, y], 0.0).unwrap();
    b.set_by_subindex(&[0, 0], 1.0);
    b.set_by_subindex(&[1, 0], 0.0);
    b.set_by_subindex(&[0, 1], 0.0);
    b.set_by_subindex(&[1, 1], 4.0);
    let mut c = DiscreteFunction::new(vec![y, z], 0.0).unwrap();
    c.set_by_subindex(&[0, 0], 2.0);
    c.set_by_subindex(&[1, 0], 0.0);
    c.set_by_subindex(&[0, 1], 0.0);
    c.set_by_subindex(&[1, 1], 1.0);

    let mut controller = MaxSumController::new(MaxSumOptions::default());
    controller.set_factor(0, a.clone()).unwrap();
    controller.set_factor(1, b.clone()).unwrap();
    controller.set_factor(2, c.clone()).unwrap();

    let iterations = controller.optimise().unwrap();
    assert!(iterations > 0);
    let values: HashMap<VarId, usize> = controller.get_values().unwrap().into_iter().collect();

    let mut best_score = f64::NEG_INFINITY;
    let mut best = (0, 0, 0);
    for xi in 0..2 {
        for yi in 0..2 {
            for zi in 0..2 {
                let score = a.get_by_subindex(&[xi])
                    + b.get_by_subindex(&[xi, yi])
                    + c.get_by_subindex(&[yi, zi]);
                if score > best_score {
                    best_score = score;
                    best = (xi, yi, zi);
                }
            }
        }
    }

    assert_eq!(values[&x], best.0);
    assert_eq!(values[&y], best.1);
    assert_eq!(values[&z], best.2);
}

#[test]
fn reregistering_a_variable_with_a_different_size_fails_without_mutation() {
    let v: VarId = 1050;
    registry::register_variable(v, 4).unwrap();
    let err = registry::register_variable(v, 5).unwrap_err();
    assert!(matches!(err, maxsum_rust::MaxSumError::DuplicateVariable { var, existing_size: 4, requested_size: 5 } if var == v));
    assert_eq!(registry::domain_size(v).unwrap(), 4);
}
