//! Coarse proximity heuristics: inter-line separation for facing lines and
//! net lateral travel for a single line. Thresholds are fixed.

/// Starting separation between two facing lines.
pub const INITIAL_SEPARATION: f64 = 2.0;
/// Separation change per two beats of approach or retreat.
pub const SEPARATION_RATE: f64 = 0.12;
/// Minimum spread of separation values expected from an approach/retreat sequence.
pub const MIN_SEPARATION_DIP: f64 = 0.3;
/// Lateral travel per four beats of a directional primitive in a line.
pub const LINE_TRAVEL_RATE: f64 = 0.10;
/// Minimum absolute net travel for a line that moves at all.
pub const MIN_LINE_TRAVEL: f64 = 0.05;

/// One step's contribution to the separation simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeparationStep {
    pub beats: f64,
    pub approach: bool,
    pub retreat: bool,
}

/// Running separation range over a sequence of steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeparationRange {
    pub min: f64,
    pub max: f64,
}

impl SeparationRange {
    pub fn spread(&self) -> f64 {
        self.max - self.min
    }

    pub fn has_dip(&self) -> bool {
        self.spread() >= MIN_SEPARATION_DIP
    }
}

/// Simulate separation across `steps` in order. A step may both approach and retreat.
pub fn simulate_separation(steps: &[SeparationStep]) -> SeparationRange {
    let mut sep = INITIAL_SEPARATION;
    let mut range = SeparationRange { min: sep, max: sep };
    for step in steps {
        let delta = SEPARATION_RATE * (step.beats / 2.0);
        if step.approach {
            sep -= delta;
        }
        if step.retreat {
            sep += delta;
        }
        range.min = range.min.min(sep);
        range.max = range.max.max(sep);
    }
    range
}

/// Net lateral travel of a line. Each entry is `(sign, beats)` where sign is
/// +1 for right / clockwise and -1 for left / counterclockwise.
pub fn net_line_travel(moves: &[(f64, f64)]) -> f64 {
    moves
        .iter()
        .map(|(sign, beats)| sign * LINE_TRAVEL_RATE * (beats / 4.0))
        .sum()
}

/// Whether a line that has directional moves nets too little travel.
pub fn line_travel_too_small(moves: &[(f64, f64)]) -> bool {
    !moves.is_empty() && net_line_travel(moves).abs() < MIN_LINE_TRAVEL
}
