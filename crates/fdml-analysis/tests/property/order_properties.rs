use fdml_analysis::geometry::order::{apply_swap, rotate_forward};
use proptest::prelude::*;

fn sorted(mut v: Vec<String>) -> Vec<String> {
    v.sort();
    v
}

proptest! {
    #[test]
    fn rotation_reduces_modulo_length(seq in prop::collection::vec("[a-z]{1,3}", 1..12), d in -1000i64..1000) {
        let n = seq.len() as i64;
        prop_assert_eq!(rotate_forward(&seq, d), rotate_forward(&seq, d.rem_euclid(n)));
    }

    #[test]
    fn rotation_by_zero_is_identity(seq in prop::collection::vec("[a-z]{1,3}", 0..12)) {
        prop_assert_eq!(rotate_forward(&seq, 0), seq);
    }

    #[test]
    fn full_cycle_of_single_steps_is_identity(seq in prop::collection::vec("[a-z]{1,3}", 1..12)) {
        let mut current = seq.clone();
        for _ in 0..seq.len() {
            current = rotate_forward(&current, 1);
        }
        prop_assert_eq!(current, seq);
    }

    #[test]
    fn rotation_preserves_multiset(seq in prop::collection::vec("[a-c]", 0..12), d in -50i64..50) {
        prop_assert_eq!(sorted(rotate_forward(&seq, d)), sorted(seq));
    }

    #[test]
    fn swap_is_an_involution(seq in prop::collection::hash_set("[a-z]{2}", 2..10), i in 0usize..10, j in 0usize..10) {
        let seq: Vec<String> = seq.into_iter().collect();
        let a = seq[i % seq.len()].clone();
        let b = seq[j % seq.len()].clone();
        let mut twice = seq.clone();
        apply_swap(&mut twice, &a, &b);
        apply_swap(&mut twice, &a, &b);
        prop_assert_eq!(twice, seq);
    }

    #[test]
    fn swap_with_unknown_id_is_noop(seq in prop::collection::vec("[a-z]{2}", 0..10)) {
        let mut out = seq.clone();
        apply_swap(&mut out, &"UNKNOWN".to_string(), &seq.first().cloned().unwrap_or_default());
        prop_assert_eq!(out, seq);
    }
}
