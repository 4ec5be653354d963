//! Circle formation: travel direction consistency and order preservation.

use super::Rule;
use crate::geometry::context::{initial_order, FormationKind, PrimitiveKind, ValidationContext};
use crate::geometry::order;
use crate::issues::{Issue, IssueCode};

fn is_circle(ctx: &ValidationContext) -> bool {
    ctx.formation == FormationKind::Circle
}

/// Travel primitives must not mix clockwise and counterclockwise.
pub struct CircleTravelRule;

impl Rule for CircleTravelRule {
    fn name(&self) -> &'static str {
        "circle_travel"
    }

    fn applies(&self, ctx: &ValidationContext) -> bool {
        is_circle(ctx)
    }

    fn check(&self, ctx: &ValidationContext, issues: &mut Vec<Issue>) {
        if ctx.signals.clockwise_travel && ctx.signals.counter_clockwise_travel {
            issues.push(Issue::new(
                IssueCode::CircleTravelAmbiguous,
                "circle travel mixes clockwise and counterclockwise primitives",
            ));
        }
    }
}

/// `preserveOrder` forbids crossings that cannot be simulated (pass, weave).
pub struct CircleCrossingRule;

impl Rule for CircleCrossingRule {
    fn name(&self) -> &'static str {
        "circle_crossing"
    }

    fn applies(&self, ctx: &ValidationContext) -> bool {
        is_circle(ctx) && ctx.signals.preserve_order
    }

    fn check(&self, ctx: &ValidationContext, issues: &mut Vec<Issue>) {
        if ctx.signals.unsimulated_crossing {
            issues.push(Issue::new(
                IssueCode::CircleOrderViolation,
                "circle formation with preserveOrder=true must not include crossing primitives (pass/weave)",
            ));
        }
    }
}

/// Under `preserveOrder`, the slot order after all swaps must equal the initial order.
pub struct CircleOrderRule;

impl Rule for CircleOrderRule {
    fn name(&self) -> &'static str {
        "circle_order"
    }

    fn applies(&self, ctx: &ValidationContext) -> bool {
        is_circle(ctx) && ctx.signals.preserve_order
    }

    fn check(&self, ctx: &ValidationContext, issues: &mut Vec<Issue>) {
        let Some(initial) = initial_order(&ctx.circle_orders).filter(|o| !o.slots.is_empty()) else {
            issues.push(Issue::new(
                IssueCode::MissingCircleOrderSlots,
                "preserveOrder requires body/geometry/circle/order/slot/@who entries",
            ));
            return;
        };

        let mut current = initial.slots.clone();
        for p in ctx.primitives().filter(|p| p.kind == PrimitiveKind::SwapPlaces) {
            order::apply_swap(&mut current, &p.a, &p.b);
        }

        if current != initial.slots {
            issues.push(Issue::new(
                IssueCode::CircleOrderChanged,
                format!(
                    "circle order changed under preserveOrder: [{}] became [{}]",
                    initial.slots.join(", "),
                    current.join(", ")
                ),
            ));
        }
    }
}
