//! Direction and frame classification for primitive `@dir` / `@axis` text.

use std::sync::LazyLock;

use regex::Regex;

static CCW_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^a-z])ccw(?:[^a-z]|$)").expect("ccw token pattern is valid")
});

static CW_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^a-z])cw(?:[^a-z]|$)").expect("cw token pattern is valid")
});

const FORMATION_FRAME_WORDS: [&str; 6] = [
    "clockwise",
    "inward",
    "outward",
    "center",
    "centre",
    "ccw",
];

const DANCER_FRAME_WORDS: [&str; 4] = ["forward", "backward", "left", "right"];

/// Rotational sense of a direction text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rotation {
    pub clockwise: bool,
    pub counter_clockwise: bool,
}

impl Rotation {
    pub fn is_none(self) -> bool {
        !self.clockwise && !self.counter_clockwise
    }
}

/// Coordinate frame a primitive's direction is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFamily {
    Formation,
    Dancer,
}

impl FrameFamily {
    /// Maps an `@frame` value onto a family. Other frames (`opposite`,
    /// `neighbor`, ...) describe partner relations and carry no direction.
    pub fn from_frame(frame: &str) -> Option<Self> {
        match frame.trim().to_ascii_lowercase().as_str() {
            "formation" => Some(Self::Formation),
            "dancer" => Some(Self::Dancer),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Formation => "formation",
            Self::Dancer => "dancer",
        }
    }
}

/// Classify lower-cased direction text. Counterclockwise always wins over
/// clockwise so `counterclockwise` is never read as clockwise.
pub fn classify(text: &str) -> Rotation {
    let text = text.to_ascii_lowercase();
    let counter_clockwise = text.contains("counterclockwise")
        || text.contains("counter-clockwise")
        || CCW_TOKEN.is_match(&text);
    let clockwise =
        !counter_clockwise && (text.contains("clockwise") || CW_TOKEN.is_match(&text));
    Rotation {
        clockwise,
        counter_clockwise,
    }
}

/// Classify a primitive from its `@dir` and `@axis` attributes together.
pub fn classify_primitive(dir: &str, axis: &str) -> Rotation {
    classify(&format!("{dir} {axis}"))
}

/// Frame families the direction text belongs to. Empty when the text
/// carries no recognised direction word.
pub fn expected_frames(dir: &str) -> Vec<FrameFamily> {
    let text = dir.to_ascii_lowercase();
    let mut frames = Vec::new();
    let formation = FORMATION_FRAME_WORDS.iter().any(|w| text.contains(w))
        || CW_TOKEN.is_match(&text)
        || CCW_TOKEN.is_match(&text);
    if formation {
        frames.push(FrameFamily::Formation);
    }
    if DANCER_FRAME_WORDS.iter().any(|w| text.contains(w)) {
        frames.push(FrameFamily::Dancer);
    }
    frames
}

/// Signed travel sense along a line: positive for right / clockwise,
/// negative for left / counterclockwise, zero when neither applies.
pub fn line_travel_sign(dir: &str) -> f64 {
    let text = dir.to_ascii_lowercase();
    let rotation = classify(&text);
    if rotation.counter_clockwise || text.contains("left") {
        -1.0
    } else if rotation.clockwise || text.contains("right") {
        1.0
    } else {
        0.0
    }
}
