use fdml_analysis::timing::parse_meter;
use proptest::prelude::*;

proptest! {
    #[test]
    fn simple_meter_bar_length_is_numerator(n in 1u32..64, d in 1u32..64) {
        prop_assume!(!(n == 9 && d == 16));
        let m = parse_meter(&format!("{n}/{d}")).unwrap();
        prop_assert!(!m.additive);
        prop_assert_eq!(m.bar_length_counts, n);
        prop_assert_eq!(m.denominator, d);
    }

    #[test]
    fn additive_meter_bar_length_is_group_count(groups in prop::collection::vec(1u32..9, 2..6), d in 1u32..32) {
        let numerator: Vec<String> = groups.iter().map(|g| g.to_string()).collect();
        let m = parse_meter(&format!("{}/{d}", numerator.join("+"))).unwrap();
        prop_assert!(m.additive);
        prop_assert!(!m.nine_sixteen_legacy);
        prop_assert_eq!(m.bar_length_counts as usize, groups.len());
        prop_assert_eq!(m.groups, groups);
    }

    #[test]
    fn whole_bars_always_align(n in 1u32..16, bars in 0u64..20) {
        let m = parse_meter(&format!("{n}/4")).unwrap();
        prop_assert!(m.aligns_to_bar_length(u64::from(n) * bars));
    }

    #[test]
    fn parser_never_panics(s in ".{0,24}") {
        let _ = parse_meter(&s);
    }

    #[test]
    fn wide_additive_numerators_parse_or_reject(terms in prop::collection::vec(1u32..=u32::MAX, 1..4), d in 1u32..64) {
        let numerator: Vec<String> = terms.iter().map(|t| t.to_string()).collect();
        let parsed = parse_meter(&format!("{}/{d}", numerator.join("+")));
        let total: u64 = terms.iter().map(|t| u64::from(*t)).sum();
        prop_assert_eq!(parsed.is_ok(), total <= u64::from(u32::MAX));
    }

    #[test]
    fn parsed_meter_raw_is_trimmed(n in 1u32..16, pad in " {0,3}") {
        let m = parse_meter(&format!("{pad}{n}/8{pad}")).unwrap();
        prop_assert_eq!(m.raw, format!("{n}/8"));
    }
}
