//! Meter expressions (`3/4`, `2+2+2+3/16`) and bar alignment.

use fdml_core::errors::MeterError;

/// A parsed meter.
///
/// `bar_length_counts` is the group count for additive meters, 4 for the
/// legacy `9/16` half-bar encoding, and the numerator otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meter {
    pub raw: String,
    pub groups: Vec<u32>,
    pub denominator: u32,
    pub bar_length_counts: u32,
    pub additive: bool,
    pub nine_sixteen_legacy: bool,
}

/// Parse a strictly positive integer, surrounding whitespace allowed.
pub fn parse_positive_int(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|v| *v > 0)
}

/// Parse `N/D` or `A+B+.../D`.
pub fn parse_meter(raw: &str) -> Result<Meter, MeterError> {
    let meter = raw.trim();
    if meter.is_empty() {
        return Err(MeterError::Empty);
    }
    let (numerator, denominator) = match meter.split_once('/') {
        Some((n, d)) if !n.trim().is_empty() && !d.contains('/') => (n, d),
        _ => return Err(MeterError::Slash(meter.to_string())),
    };
    let denominator = parse_positive_int(denominator)
        .ok_or_else(|| MeterError::Component(denominator.trim().to_string()))?;

    let groups = numerator
        .split('+')
        .map(|tok| parse_positive_int(tok).ok_or_else(|| MeterError::Component(tok.trim().to_string())))
        .collect::<Result<Vec<u32>, MeterError>>()?;

    let total = groups
        .iter()
        .try_fold(0u32, |acc, g| acc.checked_add(*g))
        .ok_or_else(|| MeterError::Component(numerator.trim().to_string()))?;
    let additive = groups.len() > 1;
    let nine_sixteen_legacy = !additive && total == 9 && denominator == 16;
    let bar_length_counts = if additive {
        groups.len() as u32
    } else if nine_sixteen_legacy {
        4
    } else {
        total
    };

    Ok(Meter {
        raw: meter.to_string(),
        groups,
        denominator,
        bar_length_counts,
        additive,
        nine_sixteen_legacy,
    })
}

impl Meter {
    /// Whether a figure's total count fills whole bars. Legacy `9/16` also
    /// accepts any even total.
    pub fn aligns_to_bar_length(&self, total_beats: u64) -> bool {
        let bar = u64::from(self.bar_length_counts);
        if bar == 0 {
            return false;
        }
        if total_beats % bar == 0 {
            return true;
        }
        self.nine_sixteen_legacy && total_beats % 2 == 0
    }

    /// Whether step boundaries sit on group boundaries. The running sum is
    /// taken modulo the group count; only the last step must land on zero.
    pub fn aligns_to_additive_pattern(&self, step_beats: &[u32]) -> bool {
        let bar = u64::from(self.bar_length_counts);
        if bar == 0 {
            return false;
        }
        let mut run = 0u64;
        for (i, beats) in step_beats.iter().enumerate() {
            run += u64::from(*beats);
            let remainder = run % bar;
            let is_last = i + 1 == step_beats.len();
            let on_boundary = remainder == 0 || (1..bar).contains(&remainder);
            if (is_last && remainder != 0) || !on_boundary {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_meter() {
        let m = parse_meter("3/4").unwrap();
        assert_eq!(m.groups, vec![3]);
        assert_eq!(m.denominator, 4);
        assert_eq!(m.bar_length_counts, 3);
        assert!(!m.additive);
        assert!(!m.nine_sixteen_legacy);
    }

    #[test]
    fn test_additive_meter_uses_group_count() {
        let m = parse_meter(" 2+2+2+3/16 ").unwrap();
        assert_eq!(m.raw, "2+2+2+3/16");
        assert_eq!(m.groups, vec![2, 2, 2, 3]);
        assert!(m.additive);
        assert_eq!(m.bar_length_counts, 4);
    }

    #[test]
    fn test_nine_sixteen_is_legacy() {
        let m = parse_meter("9/16").unwrap();
        assert!(m.nine_sixteen_legacy);
        assert_eq!(m.bar_length_counts, 4);
        assert!(m.aligns_to_bar_length(6));
        assert!(m.aligns_to_bar_length(8));
        assert!(!m.aligns_to_bar_length(7));
        assert!(!parse_meter("4+5/16").unwrap().nine_sixteen_legacy);
    }

    #[test]
    fn test_rejects_malformed() {
        assert_eq!(parse_meter(""), Err(MeterError::Empty));
        assert_eq!(parse_meter("  "), Err(MeterError::Empty));
        assert!(matches!(parse_meter("3"), Err(MeterError::Slash(_))));
        assert!(matches!(parse_meter("/4"), Err(MeterError::Slash(_))));
        assert!(matches!(parse_meter("3/4/4"), Err(MeterError::Slash(_))));
        assert!(matches!(parse_meter("0/4"), Err(MeterError::Component(_))));
        assert!(matches!(parse_meter("3/x"), Err(MeterError::Component(_))));
        assert!(matches!(parse_meter("2++3/8"), Err(MeterError::Component(_))));
        assert!(matches!(parse_meter("-3/4"), Err(MeterError::Component(_))));
    }

    #[test]
    fn test_numerator_total_overflow_is_rejected() {
        assert_eq!(
            parse_meter("4294967295+1/4"),
            Err(MeterError::Component("4294967295+1".to_string()))
        );
        assert!(parse_meter("4294967294+1/4").is_ok());
    }

    #[test]
    fn test_bar_alignment() {
        let m = parse_meter("3/4").unwrap();
        assert!(m.aligns_to_bar_length(6));
        assert!(!m.aligns_to_bar_length(4));
        assert!(m.aligns_to_bar_length(0));
    }

    #[test]
    fn test_additive_pattern() {
        let m = parse_meter("2+2+2+3/16").unwrap();
        assert!(!m.aligns_to_additive_pattern(&[3, 6]));
        assert!(m.aligns_to_additive_pattern(&[3, 5]));
        assert!(m.aligns_to_additive_pattern(&[4]));
        assert!(m.aligns_to_additive_pattern(&[]));
    }

    #[test]
    fn test_positive_int() {
        assert_eq!(parse_positive_int(" 4 "), Some(4));
        assert_eq!(parse_positive_int("0"), None);
        assert_eq!(parse_positive_int("2.5"), None);
        assert_eq!(parse_positive_int(""), None);
    }
}
