//! Remediation text for every issue code.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::issues::{FileResult, IssueCode};

static GUIDANCE: LazyLock<FxHashMap<IssueCode, &'static str>> = LazyLock::new(|| {
    IssueCode::ALL
        .iter()
        .map(|code| (*code, text_for(*code)))
        .collect()
});

fn text_for(code: IssueCode) -> &'static str {
    match code {
        IssueCode::MissingFormationKind => "For fdml version 1.2, set meta/geometry/formation/@kind (circle|line|twoLinesFacing|couple).",
        IssueCode::MissingPrimitiveKind => "Each step/geo/primitive must include @kind so geometry semantics can be evaluated.",
        IssueCode::UnknownRole => "A primitive, step or circle order references a role id not declared in meta/geometry/roles/role. Declare it or fix the reference.",
        IssueCode::BadFormationForApproachRetreat => "approach/retreat primitives are only valid for formation kind='twoLinesFacing'.",
        IssueCode::MissingTwoLinesFacing => "twoLinesFacing files must declare body/geometry/twoLines/facing with the two line ids.",
        IssueCode::MissingApproachRetreatPair => "If twoLinesFacing uses approach/retreat, include both so the lines return to their starting separation.",
        IssueCode::TwoLinesNoSepDip => "The approach/retreat sequence does not change the separation enough. Review the primitive sequence and step counts.",
        IssueCode::CircleOrderViolation => "In circle formation with preserveOrder=true, avoid crossing primitives such as pass or weave.",
        IssueCode::CircleTravelAmbiguous => "Circle travel mixes clockwise and counterclockwise markers. Keep one clear direction for the sequence.",
        IssueCode::LineTravelTooSmall => "Line travel directives net to near zero. Verify direction primitives and the intended travel distance.",
        IssueCode::MissingPartnerPairing => "Couple semantics require roles 'man' and 'woman' and a body/geometry/couples/pair linking them.",
        IssueCode::MissingRelposEvidence => "Couple semantics need relpos evidence consistent with womanSide (left/right).",
        IssueCode::RelposContradiction => "relpos primitives assert a side that contradicts the tracked partner side. Account for swaps and keep side statements consistent.",
        IssueCode::HoldBroken => "A releaseHold occurs while a hold kind is declared. Align hold primitives with meta/geometry/hold/@kind.",
        IssueCode::TwirlMissingHalf => "Twirls are expected as clockwise and counterclockwise halves within a figure. Add or fix the missing half.",
        IssueCode::MissingPrimitiveFrame => "A primitive with @dir must include @frame to disambiguate dancer and formation coordinates.",
        IssueCode::FrameDirMismatch => "Primitive @dir does not match its @frame. Use the formation frame for clockwise/inward and the dancer frame for left/right/forward/backward.",
        IssueCode::ProgressMissingDelta => "A progress primitive requires an integer @delta (the line progression shift).",
        IssueCode::MissingLineOrderSlots => "Line progression checks need body/geometry/line/order with slot/@who entries.",
        IssueCode::LineOrderMismatch => "The line order computed from progress deltas differs from the expected final order. Fix the deltas or the after-order slots.",
        IssueCode::MissingCircleOrderSlots => "Circle order checks require body/geometry/circle/order/slot entries.",
        IssueCode::CircleOrderChanged => "Circle order changed despite preserveOrder. Review swapPlaces primitives or the preserveOrder flag.",
        IssueCode::TwoLinesOrderLengthMismatch => "twoLines per-line order lists must have equal slot counts to infer opposites.",
        IssueCode::UnknownDancerInOrder => "A primitive references dancer ids absent from the declared twoLines line orders.",
        IssueCode::NotOpposites => "swapPlaces frame='opposite' must use dancers opposite by index between the two facing lines.",
        IssueCode::NotNeighbors => "swapPlaces frame='neighbor' must use adjacent dancers in the same twoLines line order.",
        IssueCode::GeoException => "The geometry validator could not evaluate this file. Fix the reported read or parse error, or inspect the structure it names.",
        IssueCode::MissingMeter => "Add meta/meter/@value (for example 3/4 or 2+2+2+3/16) so timing checks can evaluate beats.",
        IssueCode::BadMeterFormat => "Use meter as N/D (like 3/4) or additive A+B+.../D (like 2+2+2+3/16). Also reported when the file is not parseable XML.",
        IssueCode::BadStepBeats => "Each step/@beats must be a positive integer count.",
        IssueCode::OffMeterFigure => "Figure total counts do not align with the bar length or grouping. Rebalance step counts or fix the meter value.",
    }
}

/// Guidance for a known code.
pub fn guidance_for(code: IssueCode) -> &'static str {
    GUIDANCE.get(&code).copied().unwrap_or_else(|| text_for(code))
}

/// Guidance for a raw code string; unknown codes get a generic message.
pub fn guidance_for_str(code: &str) -> String {
    match code.parse::<IssueCode>() {
        Ok(code) => guidance_for(code).to_string(),
        Err(_) => {
            let label = if code.trim().is_empty() {
                "this code".to_string()
            } else {
                format!("'{code}'")
            };
            format!("No specific remediation for {label}. Inspect the referenced elements.")
        }
    }
}

/// Every code seen in `results`, mapped to its guidance, in code order.
pub fn explain<'a>(results: impl IntoIterator<Item = &'a FileResult>) -> BTreeMap<IssueCode, &'static str> {
    results
        .into_iter()
        .flat_map(|r| r.issues.iter())
        .map(|i| (i.code, guidance_for(i.code)))
        .collect()
}
