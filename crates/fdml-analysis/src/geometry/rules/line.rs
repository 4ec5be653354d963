//! Line formation: order evolution under progression and net lateral travel.

use super::Rule;
use crate::geometry::context::{
    expected_order, initial_order, FormationKind, PrimitiveKind, ValidationContext,
};
use crate::geometry::{direction, order, separation};
use crate::issues::{Issue, IssueCode};

fn is_line(ctx: &ValidationContext) -> bool {
    ctx.formation == FormationKind::Line
}

/// Rotating each line's initial order by every progress delta must yield its
/// expected order.
pub struct LineProgressionRule;

impl Rule for LineProgressionRule {
    fn name(&self) -> &'static str {
        "line_progression"
    }

    fn applies(&self, ctx: &ValidationContext) -> bool {
        is_line(ctx)
    }

    fn check(&self, ctx: &ValidationContext, issues: &mut Vec<Issue>) {
        let ordered: Vec<_> = ctx.lines.iter().filter(|l| !l.orders.is_empty()).collect();
        if ordered.is_empty() {
            if ctx.signals.progress {
                issues.push(Issue::new(
                    IssueCode::MissingLineOrderSlots,
                    "progress primitives need body/geometry/line/order/slot/@who entries",
                ));
            }
            return;
        }

        let mut deltas = Vec::new();
        for p in ctx.primitives().filter(|p| p.kind == PrimitiveKind::Progress) {
            match p.valid_delta() {
                Some(delta) => deltas.push(delta),
                None => tracing::trace!(delta = ?p.delta, "skipping progress without integer delta"),
            }
        }

        for line in ordered {
            let (Some(initial), Some(expected)) =
                (initial_order(&line.orders), expected_order(&line.orders))
            else {
                continue;
            };
            let actual = deltas
                .iter()
                .fold(initial.slots.clone(), |seq, delta| order::rotate_forward(&seq, *delta));
            if actual != expected.slots {
                issues.push(Issue::new(
                    IssueCode::LineOrderMismatch,
                    format!(
                        "line '{}' order after progress is [{}] but expected [{}]",
                        line.id,
                        actual.join(", "),
                        expected.slots.join(", ")
                    ),
                ));
            }
        }
    }
}

/// A line that moves sideways must net a noticeable distance.
pub struct LineTravelRule;

impl Rule for LineTravelRule {
    fn name(&self) -> &'static str {
        "line_travel"
    }

    fn applies(&self, ctx: &ValidationContext) -> bool {
        is_line(ctx)
    }

    fn check(&self, ctx: &ValidationContext, issues: &mut Vec<Issue>) {
        let moves: Vec<(f64, f64)> = ctx
            .primitives()
            .filter(|p| !p.dir.is_empty())
            .map(|p| (direction::line_travel_sign(&p.dir), p.beats))
            .filter(|(sign, _)| *sign != 0.0)
            .collect();
        if separation::line_travel_too_small(&moves) {
            issues.push(Issue::new(
                IssueCode::LineTravelTooSmall,
                format!(
                    "line travel nets {:.3} across {} directional primitive(s), below {}",
                    separation::net_line_travel(&moves),
                    moves.len(),
                    separation::MIN_LINE_TRAVEL
                ),
            ));
        }
    }
}
