//! Two lines facing: facing declaration, approach/retreat separation, and
//! opposite / neighbor swaps.

use super::Rule;
use crate::geometry::context::{FormationKind, LineDecl, PrimitiveKind, ValidationContext};
use crate::geometry::order;
use crate::geometry::separation::{self, SeparationStep};
use crate::issues::{Issue, IssueCode};

fn is_two_lines(ctx: &ValidationContext) -> bool {
    ctx.formation == FormationKind::TwoLinesFacing
}

/// `body/geometry/twoLines/facing` must name both lines.
pub struct FacingRule;

impl Rule for FacingRule {
    fn name(&self) -> &'static str {
        "two_lines_facing"
    }

    fn applies(&self, ctx: &ValidationContext) -> bool {
        is_two_lines(ctx)
    }

    fn check(&self, ctx: &ValidationContext, issues: &mut Vec<Issue>) {
        let declared = ctx
            .facing
            .as_ref()
            .is_some_and(|f| !f.a.is_empty() && !f.b.is_empty());
        if !declared {
            issues.push(Issue::new(
                IssueCode::MissingTwoLinesFacing,
                "twoLinesFacing requires body/geometry/twoLines/facing with @a and @b",
            ));
        }
    }
}

/// Approach and retreat come as a pair and must actually change the separation.
pub struct SeparationRule;

impl Rule for SeparationRule {
    fn name(&self) -> &'static str {
        "two_lines_separation"
    }

    fn applies(&self, ctx: &ValidationContext) -> bool {
        is_two_lines(ctx) && (ctx.signals.approach || ctx.signals.retreat)
    }

    fn check(&self, ctx: &ValidationContext, issues: &mut Vec<Issue>) {
        if !(ctx.signals.approach && ctx.signals.retreat) {
            let (found, missing) = if ctx.signals.approach {
                ("approach", "retreat")
            } else {
                ("retreat", "approach")
            };
            issues.push(Issue::new(
                IssueCode::MissingApproachRetreatPair,
                format!("twoLinesFacing uses {found} without any {missing}"),
            ));
            return;
        }

        let steps: Vec<SeparationStep> = ctx
            .steps
            .iter()
            .map(|s| SeparationStep {
                beats: s.beats,
                approach: s.has_kind(&PrimitiveKind::Approach),
                retreat: s.has_kind(&PrimitiveKind::Retreat),
            })
            .collect();
        let range = separation::simulate_separation(&steps);
        if !range.has_dip() {
            issues.push(Issue::new(
                IssueCode::TwoLinesNoSepDip,
                format!(
                    "approach/retreat separation only ranges {:.2}..{:.2} (needs {} of change)",
                    range.min,
                    range.max,
                    separation::MIN_SEPARATION_DIP
                ),
            ));
        }
    }
}

/// Swaps across or along the facing lines must name opposite or adjacent dancers.
pub struct TwoLineSwapRule;

impl TwoLineSwapRule {
    /// The facing lines: the declared `facing` pair when both have order
    /// lists, otherwise the first two declared lines.
    fn facing_lines(ctx: &ValidationContext) -> Option<(&LineDecl, &LineDecl)> {
        let with_orders = |id: &str| {
            ctx.two_lines
                .iter()
                .find(|l| l.id == id && !l.orders.is_empty())
        };
        if let Some(facing) = &ctx.facing {
            if let (Some(a), Some(b)) = (with_orders(&facing.a), with_orders(&facing.b)) {
                return Some((a, b));
            }
        }
        let mut declared = ctx.two_lines.iter();
        Some((declared.next()?, declared.next()?))
    }
}

impl Rule for TwoLineSwapRule {
    fn name(&self) -> &'static str {
        "two_lines_swap"
    }

    fn applies(&self, ctx: &ValidationContext) -> bool {
        is_two_lines(ctx) && ctx.two_lines.iter().any(|l| !l.orders.is_empty())
    }

    fn check(&self, ctx: &ValidationContext, issues: &mut Vec<Issue>) {
        // Opposite pairs by index; unavailable when the lines differ in
        // length or carry a blank slot.
        let mut opposites: Option<Vec<(&str, &str)>> = None;
        if let Some((left, right)) = Self::facing_lines(ctx) {
            let l = left.first_slots().unwrap_or_default();
            let r = right.first_slots().unwrap_or_default();
            if l.len() != r.len() {
                issues.push(Issue::new(
                    IssueCode::TwoLinesOrderLengthMismatch,
                    format!(
                        "twoLines line '{}' has {} slot(s) but line '{}' has {}",
                        left.id,
                        l.len(),
                        right.id,
                        r.len()
                    ),
                ));
            } else if !l.iter().chain(r.iter()).any(|s| s.is_empty()) {
                opposites = Some(
                    l.iter()
                        .zip(r.iter())
                        .map(|(a, b)| (a.as_str(), b.as_str()))
                        .collect(),
                );
            }
        }

        let line_slots: Vec<&[String]> = ctx
            .two_lines
            .iter()
            .filter_map(|l| l.first_slots())
            .collect();

        for p in ctx.primitives().filter(|p| p.kind == PrimitiveKind::SwapPlaces) {
            let frame = p.frame.to_ascii_lowercase();
            if frame != "opposite" && frame != "neighbor" {
                continue;
            }

            let unknown: Vec<&str> = [p.a.as_str(), p.b.as_str()]
                .into_iter()
                .filter(|who| !line_slots.iter().any(|s| order::position_of(s, who).is_some()))
                .collect();
            if !unknown.is_empty() {
                issues.push(Issue::new(
                    IssueCode::UnknownDancerInOrder,
                    format!(
                        "swapPlaces references dancer(s) '{}' absent from twoLines line orders",
                        unknown.join("', '")
                    ),
                ));
                continue;
            }

            if frame == "opposite" {
                if let Some(pairs) = &opposites {
                    let a = p.a.as_str();
                    let b = p.b.as_str();
                    if !pairs.iter().any(|&(x, y)| (x, y) == (a, b) || (x, y) == (b, a)) {
                        issues.push(Issue::new(
                            IssueCode::NotOpposites,
                            format!(
                                "swapPlaces frame='opposite' uses '{a}' and '{b}', which are not opposite by index"
                            ),
                        ));
                    }
                }
            } else if !line_slots
                .iter()
                .any(|s| order::are_adjacent(s, &p.a, &p.b))
            {
                issues.push(Issue::new(
                    IssueCode::NotNeighbors,
                    format!(
                        "swapPlaces frame='neighbor' uses '{}' and '{}', which are not adjacent in one line",
                        p.a, p.b
                    ),
                ));
            }
        }
    }
}
