//! Partner side tracking for couple formations.
//!
//! The woman's side starts at the declared `womanSide` and flips on every
//! `swapPlaces` between the partners. Each `relpos` between the partners
//! asserts a side; an assertion that disagrees with the tracked side is a
//! contradiction. Assertions never overwrite the tracked side.

use std::fmt;

pub const MAN: &str = "man";
pub const WOMAN: &str = "woman";

/// Side the woman stands on relative to the man.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

/// Literal `@relation` of a relpos primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    LeftOf,
    RightOf,
}

impl Relation {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            r if r.eq_ignore_ascii_case("leftOf") => Some(Self::LeftOf),
            r if r.eq_ignore_ascii_case("rightOf") => Some(Self::RightOf),
            _ => None,
        }
    }
}

/// Whether `a`/`b` name the two partners, in either order.
pub fn is_partner_pair(a: &str, b: &str) -> bool {
    (a == MAN && b == WOMAN) || (a == WOMAN && b == MAN)
}

/// Side of the woman implied by `a <relation> b`.
pub fn asserted_side(a: &str, b: &str, relation: Relation) -> Option<Side> {
    match (a, b) {
        (WOMAN, MAN) => Some(match relation {
            Relation::LeftOf => Side::Left,
            Relation::RightOf => Side::Right,
        }),
        (MAN, WOMAN) => Some(match relation {
            Relation::LeftOf => Side::Right,
            Relation::RightOf => Side::Left,
        }),
        _ => None,
    }
}

/// A relpos assertion that disagreed with the tracked side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contradiction {
    pub figure_id: Option<String>,
    pub tracked: Side,
    pub relation: String,
}

/// Running side state over document-ordered evidence.
#[derive(Debug, Clone)]
pub struct SideTracker {
    state: Side,
    evidence: usize,
}

impl SideTracker {
    pub fn new(initial: Side) -> Self {
        Self {
            state: initial,
            evidence: 0,
        }
    }

    pub fn state(&self) -> Side {
        self.state
    }

    pub fn has_evidence(&self) -> bool {
        self.evidence > 0
    }

    pub fn on_swap(&mut self, a: &str, b: &str) {
        if is_partner_pair(a, b) {
            self.state = self.state.flipped();
        }
    }

    /// Feed a relpos primitive. Returns a contradiction when the asserted
    /// side disagrees with the tracked one.
    pub fn on_relpos(
        &mut self,
        a: &str,
        b: &str,
        relation: &str,
        figure_id: Option<&str>,
    ) -> Option<Contradiction> {
        if !is_partner_pair(a, b) {
            return None;
        }
        self.evidence += 1;
        let side = asserted_side(a, b, Relation::parse(relation)?)?;
        if side == self.state {
            return None;
        }
        Some(Contradiction {
            figure_id: figure_id.map(str::to_string),
            tracked: self.state,
            relation: relation.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asserted_side_depends_on_order() {
        assert_eq!(asserted_side(WOMAN, MAN, Relation::LeftOf), Some(Side::Left));
        assert_eq!(asserted_side(WOMAN, MAN, Relation::RightOf), Some(Side::Right));
        assert_eq!(asserted_side(MAN, WOMAN, Relation::LeftOf), Some(Side::Right));
        assert_eq!(asserted_side(MAN, WOMAN, Relation::RightOf), Some(Side::Left));
        assert_eq!(asserted_side(MAN, MAN, Relation::LeftOf), None);
    }

    #[test]
    fn test_consistent_evidence() {
        let mut t = SideTracker::new(Side::Left);
        assert!(t.on_relpos(WOMAN, MAN, "leftOf", Some("f1")).is_none());
        assert!(t.has_evidence());
    }

    #[test]
    fn test_swap_flips_state() {
        let mut t = SideTracker::new(Side::Left);
        t.on_swap(MAN, WOMAN);
        assert_eq!(t.state(), Side::Right);
        assert!(t.on_relpos(WOMAN, MAN, "rightOf", None).is_none());
        t.on_swap("a", "b");
        assert_eq!(t.state(), Side::Right);
    }

    #[test]
    fn test_contradiction_keeps_state() {
        let mut t = SideTracker::new(Side::Left);
        let c = t.on_relpos(WOMAN, MAN, "rightOf", Some("f2")).unwrap();
        assert_eq!(c.figure_id.as_deref(), Some("f2"));
        assert_eq!(c.tracked, Side::Left);
        assert_eq!(c.relation, "rightOf");
        assert_eq!(t.state(), Side::Left);
    }

    #[test]
    fn test_unrelated_relpos_is_not_evidence() {
        let mut t = SideTracker::new(Side::Right);
        assert!(t.on_relpos("a", "b", "leftOf", None).is_none());
        assert!(!t.has_evidence());
    }

    #[test]
    fn test_unknown_relation_counts_as_evidence_only() {
        let mut t = SideTracker::new(Side::Right);
        assert!(t.on_relpos(MAN, WOMAN, "behind", None).is_none());
        assert!(t.has_evidence());
    }
}
