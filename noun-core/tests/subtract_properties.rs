// Property tests for atom subtraction across both representations

use noun_core::frame::gate_core;
use noun_core::{Atom, Bail, DIRECT_MAX, Noun, Underflow, subtract, subtract_gate, subtract_owned};
use num_bigint::BigUint;
use proptest::prelude::*;

fn small() -> impl Strategy<Value = u64> {
    0..=DIRECT_MAX
}

// Byte strings up to 24 bytes cover small atoms, atoms just over the direct
// limit, and multi-word atoms.
fn any_atom() -> impl Strategy<Value = Atom> {
    prop::collection::vec(any::<u8>(), 0..24).prop_map(|bytes| Atom::from_big(BigUint::from_bytes_le(&bytes)))
}

fn is_canonical(atom: &Atom) -> bool {
    atom.is_small() == (atom.to_big() <= BigUint::from(DIRECT_MAX))
}

proptest! {
    #[test]
    fn small_minus_smaller_is_small(x in small(), y in small()) {
        let (a, b) = if x >= y { (x, y) } else { (y, x) };
        let result = subtract(&Atom::new(a), &Atom::new(b)).unwrap();
        prop_assert_eq!(result.as_small(), Some(a - b));
    }

    #[test]
    fn matches_big_integer_arithmetic(a in any_atom(), b in any_atom()) {
        match subtract(&a, &b) {
            Ok(result) => {
                prop_assert!(a >= b);
                prop_assert_eq!(result.to_big(), a.to_big() - b.to_big());
                prop_assert!(is_canonical(&result));
            }
            Err(Underflow) => prop_assert!(a < b),
        }
    }

    #[test]
    fn self_difference_is_small_zero(a in any_atom()) {
        let result = subtract(&a, &a.clone()).unwrap();
        prop_assert!(result.is_small());
        prop_assert!(result.is_zero());
    }

    #[test]
    fn underflow_leaves_no_extra_references(a in any_atom(), b in any_atom()) {
        prop_assume!(a < b);
        let before = (a.share_count(), b.share_count());
        prop_assert_eq!(subtract(&a, &b), Err(Underflow));
        prop_assert_eq!((a.share_count(), b.share_count()), before);
    }

    #[test]
    fn owned_subtraction_releases_both_operands(a in any_atom(), b in any_atom()) {
        let (a_held, b_held) = (a.clone(), b.clone());
        let a_before = a_held.share_count();
        let b_before = b_held.share_count();

        let outcome = subtract_owned(a, b);
        prop_assert_eq!(a_held.share_count(), a_before.map(|n| n - 1));
        prop_assert_eq!(b_held.share_count(), b_before.map(|n| n - 1));
        prop_assert_eq!(outcome, subtract(&a_held, &b_held));
    }

    #[test]
    fn gate_agrees_with_core(a in any_atom(), b in any_atom()) {
        let core = gate_core(0u64.into(), Noun::cell(a.clone().into(), b.clone().into()), 0u64.into());
        let expected = subtract(&a, &b).map(Noun::from).map_err(Bail::from);
        prop_assert_eq!(subtract_gate(&core), expected);
    }

    #[test]
    fn gate_exits_on_any_cell_operand(a in any_atom(), h in any_atom(), t in any_atom(), first in any::<bool>()) {
        let cell = Noun::cell(h.into(), t.into());
        let sample = if first {
            Noun::cell(cell, a.into())
        } else {
            Noun::cell(a.into(), cell)
        };
        let core = gate_core(0u64.into(), sample, 0u64.into());
        prop_assert_eq!(subtract_gate(&core), Err(Bail::Exit));
    }
}
