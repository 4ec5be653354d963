//! Checks that run for every v1.2 document regardless of formation.

use super::Rule;
use crate::geometry::context::{FormationKind, PrimitiveKind, ValidationContext};
use crate::geometry::direction::{self, FrameFamily, Rotation};
use crate::issues::{Issue, IssueCode};

/// `meta/geometry/formation/@kind` must be present.
pub struct FormationKindRule;

impl Rule for FormationKindRule {
    fn name(&self) -> &'static str {
        "formation_kind"
    }

    fn applies(&self, _ctx: &ValidationContext) -> bool {
        true
    }

    fn check(&self, ctx: &ValidationContext, issues: &mut Vec<Issue>) {
        if ctx.formation == FormationKind::Missing {
            issues.push(Issue::new(
                IssueCode::MissingFormationKind,
                "meta/geometry/formation/@kind is required for fdml version=1.2",
            ));
        }
    }
}

/// Per-primitive checks, emitted in document order.
pub struct PrimitiveScanRule;

impl Rule for PrimitiveScanRule {
    fn name(&self) -> &'static str {
        "primitive_scan"
    }

    fn applies(&self, _ctx: &ValidationContext) -> bool {
        true
    }

    fn check(&self, ctx: &ValidationContext, issues: &mut Vec<Issue>) {
        for p in ctx.primitives() {
            if p.kind == PrimitiveKind::Missing {
                issues.push(Issue::new(
                    IssueCode::MissingPrimitiveKind,
                    "geo/primitive is missing @kind",
                ));
            }

            if ctx.is_unknown_role(&p.who) {
                issues.push(Issue::new(
                    IssueCode::UnknownRole,
                    format!(
                        "geo/primitive/@who='{}' is not declared in meta/geometry/roles",
                        p.who
                    ),
                ));
            }

            if !p.dir.is_empty() {
                if p.frame.is_empty() {
                    issues.push(Issue::new(
                        IssueCode::MissingPrimitiveFrame,
                        format!(
                            "primitive kind='{}' has @dir='{}' but no @frame",
                            p.kind.as_str(),
                            p.dir
                        ),
                    ));
                } else if let Some(frame) = FrameFamily::from_frame(&p.frame) {
                    let expected = direction::expected_frames(&p.dir);
                    if !expected.is_empty() && !expected.contains(&frame) {
                        issues.push(Issue::new(
                            IssueCode::FrameDirMismatch,
                            format!(
                                "@dir='{}' expects frame='{}' but primitive has @frame='{}'",
                                p.dir,
                                expected[0].as_str(),
                                p.frame
                            ),
                        ));
                    }
                }
            }

            if p.kind.is_approach_or_retreat() && ctx.formation != FormationKind::TwoLinesFacing {
                issues.push(Issue::new(
                    IssueCode::BadFormationForApproachRetreat,
                    format!(
                        "primitive kind='{}' requires formation kind='twoLinesFacing' (found '{}')",
                        p.kind.as_str(),
                        ctx.formation_raw
                    ),
                ));
            }

            if p.kind == PrimitiveKind::Progress && p.valid_delta().is_none() {
                let found = match &p.delta {
                    Some(Err(raw)) => format!("@delta='{raw}'"),
                    _ => "no @delta".to_string(),
                };
                issues.push(Issue::new(
                    IssueCode::ProgressMissingDelta,
                    format!("progress primitive requires an integer @delta (found {found})"),
                ));
            }
        }
    }
}

/// `step/@who` and circle `order/@role` must name declared roles.
pub struct RoleReferenceRule;

impl Rule for RoleReferenceRule {
    fn name(&self) -> &'static str {
        "role_reference"
    }

    fn applies(&self, ctx: &ValidationContext) -> bool {
        ctx.has_roles()
    }

    fn check(&self, ctx: &ValidationContext, issues: &mut Vec<Issue>) {
        for step in &ctx.steps {
            if ctx.is_unknown_role(&step.who) {
                issues.push(Issue::new(
                    IssueCode::UnknownRole,
                    format!(
                        "step/@who='{}' is not declared in meta/geometry/roles",
                        step.who
                    ),
                ));
            }
        }
        for order in &ctx.circle_orders {
            if ctx.is_unknown_role(&order.role) {
                issues.push(Issue::new(
                    IssueCode::UnknownRole,
                    format!(
                        "body/geometry/circle/order/@role='{}' is not declared in meta/geometry/roles",
                        order.role
                    ),
                ));
            }
        }
    }
}

/// A declared hold must not be released.
pub struct HoldRule;

impl Rule for HoldRule {
    fn name(&self) -> &'static str {
        "hold"
    }

    fn applies(&self, ctx: &ValidationContext) -> bool {
        !ctx.hold_kind.is_empty() && ctx.hold_kind != "none"
    }

    fn check(&self, ctx: &ValidationContext, issues: &mut Vec<Issue>) {
        if ctx.signals.release_hold {
            issues.push(Issue::new(
                IssueCode::HoldBroken,
                format!(
                    "releaseHold primitive occurs while meta/geometry/hold/@kind='{}'",
                    ctx.hold_kind
                ),
            ));
        }
    }
}

/// A figure that twirls must show both the clockwise and counterclockwise half.
pub struct TwirlRule;

impl Rule for TwirlRule {
    fn name(&self) -> &'static str {
        "twirl"
    }

    fn applies(&self, _ctx: &ValidationContext) -> bool {
        true
    }

    fn check(&self, ctx: &ValidationContext, issues: &mut Vec<Issue>) {
        // Keyed by figure ordinal; the id is only for the message.
        let mut figures: Vec<(Option<usize>, Option<&str>, Rotation)> = Vec::new();
        for p in ctx.primitives().filter(|p| p.kind == PrimitiveKind::Twirl) {
            let rotation = p.rotation();
            match figures.iter_mut().find(|(index, _, _)| *index == p.figure_index) {
                Some((_, _, seen)) => {
                    seen.clockwise |= rotation.clockwise;
                    seen.counter_clockwise |= rotation.counter_clockwise;
                }
                None => figures.push((p.figure_index, p.figure_id.as_deref(), rotation)),
            }
        }

        for (_, figure, seen) in figures {
            if seen.clockwise && seen.counter_clockwise {
                continue;
            }
            let missing = match (seen.clockwise, seen.counter_clockwise) {
                (true, false) => "counterclockwise",
                (false, true) => "clockwise",
                _ => "clockwise and counterclockwise",
            };
            let message = format!(
                "figure '{}' has twirl primitives without a {missing} half",
                figure.unwrap_or(fdml_core::constants::NO_FIGURE_ID)
            );
            issues.push(match figure {
                Some(id) => Issue::in_figure(IssueCode::TwirlMissingHalf, id, message),
                None => Issue::new(IssueCode::TwirlMissingHalf, message),
            });
        }
    }
}
