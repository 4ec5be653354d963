//! Geometry rules and the ordered rule set that runs them.
//!
//! Each rule reads the shared `ValidationContext` and appends issues. The set
//! runs rules in a fixed order so that issue order is stable: generic checks
//! first, then the circle, line, two-line and couple branches.

pub mod circle;
pub mod couple;
pub mod generic;
pub mod line;
pub mod two_lines;

use std::panic::{catch_unwind, AssertUnwindSafe};

use fdml_core::errors::ValidationError;

use super::context::ValidationContext;
use crate::issues::Issue;

/// A single geometry check.
pub trait Rule: Send + Sync {
    /// Stable rule name, used in logs and failure messages.
    fn name(&self) -> &'static str;

    /// Whether the rule is relevant for this document.
    fn applies(&self, ctx: &ValidationContext) -> bool;

    /// Append any findings to `issues`.
    fn check(&self, ctx: &ValidationContext, issues: &mut Vec<Issue>);
}

/// Ordered list of rules run against one context.
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleSet {
    /// The default rule order.
    pub fn new() -> Self {
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(generic::FormationKindRule),
            Box::new(generic::PrimitiveScanRule),
            Box::new(generic::RoleReferenceRule),
            Box::new(generic::HoldRule),
            Box::new(generic::TwirlRule),
            Box::new(circle::CircleTravelRule),
            Box::new(circle::CircleCrossingRule),
            Box::new(circle::CircleOrderRule),
            Box::new(line::LineProgressionRule),
            Box::new(line::LineTravelRule),
            Box::new(two_lines::FacingRule),
            Box::new(two_lines::SeparationRule),
            Box::new(two_lines::TwoLineSwapRule),
            Box::new(couple::PartnerPairingRule),
            Box::new(couple::PartnerSideRule),
        ];
        Self { rules }
    }

    /// A rule set with a custom list, run in the given order.
    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run every applicable rule in order. A rule that panics stops the run;
    /// issues appended before the failure stay in `issues`.
    pub fn run(&self, ctx: &ValidationContext, issues: &mut Vec<Issue>) -> Result<(), ValidationError> {
        for rule in &self.rules {
            let outcome = catch_unwind(AssertUnwindSafe(|| {
                if rule.applies(ctx) {
                    let before = issues.len();
                    rule.check(ctx, issues);
                    tracing::trace!(rule = rule.name(), found = issues.len() - before, "rule checked");
                }
            }));
            if let Err(payload) = outcome {
                let detail = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                return Err(ValidationError::Internal(format!(
                    "rule '{}' failed: {detail}",
                    rule.name()
                )));
            }
        }
        Ok(())
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issues::IssueCode;
    use fdml_core::Document;

    struct Always(IssueCode);

    impl Rule for Always {
        fn name(&self) -> &'static str {
            "always"
        }
        fn applies(&self, _ctx: &ValidationContext) -> bool {
            true
        }
        fn check(&self, _ctx: &ValidationContext, issues: &mut Vec<Issue>) {
            issues.push(Issue::new(self.0, "always"));
        }
    }

    struct Panics;

    impl Rule for Panics {
        fn name(&self) -> &'static str {
            "panics"
        }
        fn applies(&self, _ctx: &ValidationContext) -> bool {
            true
        }
        fn check(&self, _ctx: &ValidationContext, _issues: &mut Vec<Issue>) {
            panic!("boom");
        }
    }

    fn ctx() -> ValidationContext {
        let doc = Document::parse(r#"<fdml version="1.2"/>"#).unwrap();
        ValidationContext::from_root(doc.root())
    }

    #[test]
    fn test_default_order() {
        let set = RuleSet::new();
        assert_eq!(set.len(), 15);
        let names = set.names();
        assert_eq!(names[0], "formation_kind");
        assert_eq!(names[1], "primitive_scan");
        assert_eq!(names.last().copied(), Some("partner_side"));
    }

    #[test]
    fn test_panicking_rule_keeps_earlier_issues() {
        let set = RuleSet::with_rules(vec![
            Box::new(Always(IssueCode::HoldBroken)),
            Box::new(Panics),
            Box::new(Always(IssueCode::NotNeighbors)),
        ]);
        let mut issues = Vec::new();
        let err = set.run(&ctx(), &mut issues).unwrap_err();
        assert!(err.to_string().contains("boom"));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, IssueCode::HoldBroken);
    }
}
