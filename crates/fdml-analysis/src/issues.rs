//! Issue vocabulary and per-file results shared by the geometry and timing engines.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stable issue codes. The serialized snake_case names are the external contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    MissingFormationKind,
    MissingPrimitiveKind,
    UnknownRole,
    BadFormationForApproachRetreat,
    MissingTwoLinesFacing,
    MissingApproachRetreatPair,
    TwoLinesNoSepDip,
    CircleOrderViolation,
    CircleTravelAmbiguous,
    LineTravelTooSmall,
    MissingPartnerPairing,
    MissingRelposEvidence,
    RelposContradiction,
    HoldBroken,
    TwirlMissingHalf,
    MissingPrimitiveFrame,
    FrameDirMismatch,
    ProgressMissingDelta,
    MissingLineOrderSlots,
    LineOrderMismatch,
    MissingCircleOrderSlots,
    CircleOrderChanged,
    TwoLinesOrderLengthMismatch,
    UnknownDancerInOrder,
    NotOpposites,
    NotNeighbors,
    GeoException,
    MissingMeter,
    BadMeterFormat,
    BadStepBeats,
    OffMeterFigure,
}

impl IssueCode {
    /// Every code, in vocabulary order.
    pub const ALL: [IssueCode; 31] = [
        Self::MissingFormationKind,
        Self::MissingPrimitiveKind,
        Self::UnknownRole,
        Self::BadFormationForApproachRetreat,
        Self::MissingTwoLinesFacing,
        Self::MissingApproachRetreatPair,
        Self::TwoLinesNoSepDip,
        Self::CircleOrderViolation,
        Self::CircleTravelAmbiguous,
        Self::LineTravelTooSmall,
        Self::MissingPartnerPairing,
        Self::MissingRelposEvidence,
        Self::RelposContradiction,
        Self::HoldBroken,
        Self::TwirlMissingHalf,
        Self::MissingPrimitiveFrame,
        Self::FrameDirMismatch,
        Self::ProgressMissingDelta,
        Self::MissingLineOrderSlots,
        Self::LineOrderMismatch,
        Self::MissingCircleOrderSlots,
        Self::CircleOrderChanged,
        Self::TwoLinesOrderLengthMismatch,
        Self::UnknownDancerInOrder,
        Self::NotOpposites,
        Self::NotNeighbors,
        Self::GeoException,
        Self::MissingMeter,
        Self::BadMeterFormat,
        Self::BadStepBeats,
        Self::OffMeterFigure,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingFormationKind => "missing_formation_kind",
            Self::MissingPrimitiveKind => "missing_primitive_kind",
            Self::UnknownRole => "unknown_role",
            Self::BadFormationForApproachRetreat => "bad_formation_for_approach_retreat",
            Self::MissingTwoLinesFacing => "missing_two_lines_facing",
            Self::MissingApproachRetreatPair => "missing_approach_retreat_pair",
            Self::TwoLinesNoSepDip => "two_lines_no_sep_dip",
            Self::CircleOrderViolation => "circle_order_violation",
            Self::CircleTravelAmbiguous => "circle_travel_ambiguous",
            Self::LineTravelTooSmall => "line_travel_too_small",
            Self::MissingPartnerPairing => "missing_partner_pairing",
            Self::MissingRelposEvidence => "missing_relpos_evidence",
            Self::RelposContradiction => "relpos_contradiction",
            Self::HoldBroken => "hold_broken",
            Self::TwirlMissingHalf => "twirl_missing_half",
            Self::MissingPrimitiveFrame => "missing_primitive_frame",
            Self::FrameDirMismatch => "frame_dir_mismatch",
            Self::ProgressMissingDelta => "progress_missing_delta",
            Self::MissingLineOrderSlots => "missing_line_order_slots",
            Self::LineOrderMismatch => "line_order_mismatch",
            Self::MissingCircleOrderSlots => "missing_circle_order_slots",
            Self::CircleOrderChanged => "circle_order_changed",
            Self::TwoLinesOrderLengthMismatch => "two_lines_order_length_mismatch",
            Self::UnknownDancerInOrder => "unknown_dancer_in_order",
            Self::NotOpposites => "not_opposites",
            Self::NotNeighbors => "not_neighbors",
            Self::GeoException => "geo_exception",
            Self::MissingMeter => "missing_meter",
            Self::BadMeterFormat => "bad_meter_format",
            Self::BadStepBeats => "bad_step_beats",
            Self::OffMeterFigure => "off_meter_figure",
        }
    }

    /// Whether the code belongs to the timing engine.
    pub fn is_timing(self) -> bool {
        matches!(
            self,
            Self::MissingMeter | Self::BadMeterFormat | Self::BadStepBeats | Self::OffMeterFigure
        )
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a string that is not part of the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownIssueCode(pub String);

impl fmt::Display for UnknownIssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown issue code '{}'", self.0)
    }
}

impl std::error::Error for UnknownIssueCode {}

impl FromStr for IssueCode {
    type Err = UnknownIssueCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| UnknownIssueCode(s.to_string()))
    }
}

/// A single finding. Messages are for humans; only `code` is machine-read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub code: IssueCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub figure_id: Option<String>,
}

impl Issue {
    pub fn new(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            figure_id: None,
        }
    }

    pub fn in_figure(code: IssueCode, figure_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            figure_id: Some(figure_id.into()),
        }
    }
}

/// Outcome of validating one file. `ok` is always `issues.is_empty()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileResult {
    pub file: PathBuf,
    pub ok: bool,
    pub issues: Vec<Issue>,
}

impl FileResult {
    pub fn new(file: impl AsRef<Path>, issues: Vec<Issue>) -> Self {
        Self {
            file: file.as_ref().to_path_buf(),
            ok: issues.is_empty(),
            issues,
        }
    }

    pub fn passed(file: impl AsRef<Path>) -> Self {
        Self::new(file, Vec::new())
    }

    /// Codes in emission order.
    pub fn codes(&self) -> Vec<IssueCode> {
        self.issues.iter().map(|i| i.code).collect()
    }

    pub fn has(&self, code: IssueCode) -> bool {
        self.issues.iter().any(|i| i.code == code)
    }
}
