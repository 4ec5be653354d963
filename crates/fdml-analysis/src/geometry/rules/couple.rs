//! Couple formation: partner pairing and side tracking.

use super::Rule;
use crate::geometry::context::{FormationKind, PrimitiveKind, ValidationContext};
use crate::geometry::relpos::{self, Side, SideTracker, MAN, WOMAN};
use crate::issues::{Issue, IssueCode};

fn declares_partners(ctx: &ValidationContext) -> bool {
    ctx.roles.contains(MAN) && ctx.roles.contains(WOMAN)
}

fn is_sided_couple(ctx: &ValidationContext) -> bool {
    ctx.formation == FormationKind::Couple && !ctx.woman_side.is_empty()
}

/// The partners must be declared as roles and linked by a `couples/pair`.
pub struct PartnerPairingRule;

impl Rule for PartnerPairingRule {
    fn name(&self) -> &'static str {
        "partner_pairing"
    }

    fn applies(&self, ctx: &ValidationContext) -> bool {
        is_sided_couple(ctx)
    }

    fn check(&self, ctx: &ValidationContext, issues: &mut Vec<Issue>) {
        let paired = ctx.pairs.iter().any(|p| relpos::is_partner_pair(&p.a, &p.b));
        if !declares_partners(ctx) || !paired {
            issues.push(Issue::new(
                IssueCode::MissingPartnerPairing,
                "couple formation requires roles 'man' and 'woman' linked by body/geometry/couples/pair",
            ));
        }
    }
}

/// relpos evidence must agree with the woman's tracked side.
pub struct PartnerSideRule;

impl Rule for PartnerSideRule {
    fn name(&self) -> &'static str {
        "partner_side"
    }

    fn applies(&self, ctx: &ValidationContext) -> bool {
        is_sided_couple(ctx) && declares_partners(ctx) && Side::parse(&ctx.woman_side).is_some()
    }

    fn check(&self, ctx: &ValidationContext, issues: &mut Vec<Issue>) {
        let Some(initial) = Side::parse(&ctx.woman_side) else {
            return;
        };
        let mut tracker = SideTracker::new(initial);

        for p in ctx.primitives() {
            match p.kind {
                PrimitiveKind::SwapPlaces => tracker.on_swap(&p.a, &p.b),
                PrimitiveKind::Relpos => {
                    let Some(c) = tracker.on_relpos(&p.a, &p.b, &p.relation, p.figure_id.as_deref())
                    else {
                        continue;
                    };
                    let message = format!(
                        "figure '{}': relpos {} {} {} contradicts tracked womanSide '{}'",
                        c.figure_id.as_deref().unwrap_or(fdml_core::constants::NO_FIGURE_ID),
                        p.a,
                        c.relation,
                        p.b,
                        c.tracked
                    );
                    issues.push(match c.figure_id {
                        Some(id) => Issue::in_figure(IssueCode::RelposContradiction, id, message),
                        None => Issue::new(IssueCode::RelposContradiction, message),
                    });
                }
                _ => {}
            }
        }

        if !tracker.has_evidence() {
            issues.push(Issue::new(
                IssueCode::MissingRelposEvidence,
                format!(
                    "couple formation with womanSide='{}' has no relpos evidence between man and woman",
                    ctx.woman_side
                ),
            ));
        }
    }
}
