//! Validation context: everything the geometry rules read, extracted from the
//! document in one pass and held as typed records.

use fdml_core::NodeQuery;
use rustc_hash::FxHashSet;

use super::direction::{self, Rotation};

/// Closed set of primitive kinds with an explicit fallback for unknown input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveKind {
    Move,
    Pass,
    Weave,
    SwapPlaces,
    Approach,
    Retreat,
    Progress,
    Relpos,
    Hold,
    ReleaseHold,
    Twirl,
    Missing,
    Unrecognized(String),
}

impl PrimitiveKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "" => Self::Missing,
            "move" => Self::Move,
            "pass" => Self::Pass,
            "weave" => Self::Weave,
            "swapPlaces" => Self::SwapPlaces,
            "approach" => Self::Approach,
            "retreat" => Self::Retreat,
            "progress" => Self::Progress,
            "relpos" => Self::Relpos,
            "hold" => Self::Hold,
            "releaseHold" => Self::ReleaseHold,
            "twirl" => Self::Twirl,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Move => "move",
            Self::Pass => "pass",
            Self::Weave => "weave",
            Self::SwapPlaces => "swapPlaces",
            Self::Approach => "approach",
            Self::Retreat => "retreat",
            Self::Progress => "progress",
            Self::Relpos => "relpos",
            Self::Hold => "hold",
            Self::ReleaseHold => "releaseHold",
            Self::Twirl => "twirl",
            Self::Missing => "",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Crossing kinds that cannot be simulated as a slot exchange.
    pub fn is_unsimulated_crossing(&self) -> bool {
        matches!(self, Self::Pass | Self::Weave)
    }

    pub fn is_approach_or_retreat(&self) -> bool {
        matches!(self, Self::Approach | Self::Retreat)
    }
}

/// Formation kinds that select rule branches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormationKind {
    Circle,
    Line,
    TwoLinesFacing,
    Couple,
    Missing,
    Unrecognized(String),
}

impl FormationKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "" => Self::Missing,
            "circle" => Self::Circle,
            "line" => Self::Line,
            "twoLinesFacing" => Self::TwoLinesFacing,
            "couple" => Self::Couple,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

/// A `step/geo/primitive`, with absent attributes read as empty strings.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub kind: PrimitiveKind,
    pub who: String,
    pub frame: String,
    pub dir: String,
    pub axis: String,
    pub a: String,
    pub b: String,
    /// `None` when `@delta` is absent; `Some(Err(raw))` when it is not an integer.
    pub delta: Option<Result<i64, String>>,
    pub relation: String,
    pub preserve_order: bool,
    /// `@id` of the enclosing figure, if any.
    pub figure_id: Option<String>,
    /// Document-order ordinal of the enclosing figure.
    pub figure_index: Option<usize>,
    /// `@beats` of the enclosing step, non-numeric read as zero.
    pub beats: f64,
}

impl Primitive {
    fn from_node<N: NodeQuery>(node: &N, figure: Option<FigureScope<'_>>, beats: f64) -> Self {
        let delta = node.attr("delta").map(|raw| {
            let raw = raw.trim();
            raw.parse::<i64>().map_err(|_| raw.to_string())
        });
        let preserve = node.attr_trimmed("preserveOrder");
        Self {
            kind: PrimitiveKind::parse(node.attr_trimmed("kind")),
            who: node.attr_trimmed("who").to_string(),
            frame: node.attr_trimmed("frame").to_string(),
            dir: node.attr_trimmed("dir").to_string(),
            axis: node.attr_trimmed("axis").to_string(),
            a: node.attr_trimmed("a").to_string(),
            b: node.attr_trimmed("b").to_string(),
            delta,
            relation: node.attr_trimmed("relation").to_string(),
            preserve_order: preserve == "true" || preserve == "1",
            figure_id: figure.and_then(|f| f.id).map(str::to_string),
            figure_index: figure.map(|f| f.index),
            beats,
        }
    }

    /// Rotation sense from `@dir` and `@axis` together.
    pub fn rotation(&self) -> Rotation {
        direction::classify_primitive(&self.dir, &self.axis)
    }

    pub fn valid_delta(&self) -> Option<i64> {
        match &self.delta {
            Some(Ok(d)) => Some(*d),
            _ => None,
        }
    }
}

/// A `step` element and the primitives it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord {
    pub figure_id: Option<String>,
    pub figure_index: Option<usize>,
    pub who: String,
    pub beats: f64,
    pub primitives: Vec<Primitive>,
}

impl StepRecord {
    pub fn has_kind(&self, kind: &PrimitiveKind) -> bool {
        self.primitives.iter().any(|p| &p.kind == kind)
    }
}

/// An `order` element: optional phase plus its slot ids (blank ids kept).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderList {
    pub phase: String,
    pub role: String,
    pub slots: Vec<String>,
}

impl OrderList {
    fn from_node<N: NodeQuery>(node: &N) -> Self {
        Self {
            phase: node.attr_trimmed("phase").to_string(),
            role: node.attr_trimmed("role").to_string(),
            slots: node
                .select("slot")
                .iter()
                .map(|s| s.attr_trimmed("who").to_string())
                .collect(),
        }
    }

    pub fn has_blank_slot(&self) -> bool {
        self.slots.iter().any(|s| s.is_empty())
    }
}

/// Initial order: phase `initial`, else the first order.
pub fn initial_order(orders: &[OrderList]) -> Option<&OrderList> {
    orders
        .iter()
        .find(|o| o.phase == "initial")
        .or_else(|| orders.first())
}

/// Expected final order: phase `after`, else the last order when at least two exist.
pub fn expected_order(orders: &[OrderList]) -> Option<&OrderList> {
    orders
        .iter()
        .find(|o| o.phase == "after")
        .or_else(|| if orders.len() >= 2 { orders.last() } else { None })
}

/// A declared `line` with its order lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDecl {
    pub id: String,
    pub role: String,
    pub orders: Vec<OrderList>,
}

impl LineDecl {
    fn from_node<N: NodeQuery>(node: &N) -> Self {
        Self {
            id: node.attr_trimmed("id").to_string(),
            role: node.attr_trimmed("role").to_string(),
            orders: node.select("order").iter().map(|o| OrderList::from_node(*o)).collect(),
        }
    }

    /// Slots of the first order list, if any.
    pub fn first_slots(&self) -> Option<&[String]> {
        self.orders.first().map(|o| o.slots.as_slice())
    }
}

/// An `a`/`b` pair as used by `facing` and `couples/pair`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairDecl {
    pub a: String,
    pub b: String,
}

impl PairDecl {
    fn from_node<N: NodeQuery>(node: &N) -> Self {
        Self {
            a: node.attr_trimmed("a").to_string(),
            b: node.attr_trimmed("b").to_string(),
        }
    }
}

/// Boolean signals gathered in the single primitive scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Signals {
    pub preserve_order: bool,
    pub unsimulated_crossing: bool,
    pub swap_places: bool,
    pub clockwise_travel: bool,
    pub counter_clockwise_travel: bool,
    pub approach: bool,
    pub retreat: bool,
    pub progress: bool,
    pub relpos: bool,
    pub release_hold: bool,
}

/// Everything the rules need from one document.
#[derive(Debug, Clone)]
pub struct ValidationContext {
    pub version: String,
    pub formation: FormationKind,
    pub formation_raw: String,
    pub woman_side: String,
    pub roles: FxHashSet<String>,
    pub hold_kind: String,
    pub steps: Vec<StepRecord>,
    pub circle_orders: Vec<OrderList>,
    pub lines: Vec<LineDecl>,
    pub two_lines: Vec<LineDecl>,
    pub facing: Option<PairDecl>,
    pub pairs: Vec<PairDecl>,
    pub signals: Signals,
}

impl ValidationContext {
    /// Extract the context from a document root (`fdml` element).
    pub fn from_root<N: NodeQuery>(root: &N) -> Self {
        let formation_node = root.select_first("meta/geometry/formation");
        let formation_raw = formation_node
            .map(|f| f.attr_trimmed("kind").to_string())
            .unwrap_or_default();
        let woman_side = formation_node
            .map(|f| f.attr_trimmed("womanSide").to_string())
            .unwrap_or_default();

        let roles: FxHashSet<String> = root
            .select("meta/geometry/roles/role")
            .iter()
            .map(|r| r.attr_or_empty("id").to_string())
            .filter(|id| !id.is_empty())
            .collect();

        let hold_kind = root
            .select_first("meta/geometry/hold")
            .map(|h| h.attr_trimmed("kind").to_string())
            .unwrap_or_default();

        let steps = collect_steps(root);
        let signals = gather_signals(&steps);

        let geometry = root.select_first("body/geometry");
        let circle_orders: Vec<OrderList> = geometry
            .map(|g| g.select("circle/order").iter().map(|o| OrderList::from_node(*o)).collect())
            .unwrap_or_default();
        let lines: Vec<LineDecl> = geometry
            .map(|g| g.select("line").iter().map(|l| LineDecl::from_node(*l)).collect())
            .unwrap_or_default();
        let two_lines: Vec<LineDecl> = geometry
            .map(|g| g.select("twoLines/line").iter().map(|l| LineDecl::from_node(*l)).collect())
            .unwrap_or_default();
        let facing = geometry
            .and_then(|g| g.select_first("twoLines/facing"))
            .map(PairDecl::from_node);
        let pairs: Vec<PairDecl> = geometry
            .map(|g| g.select("couples/pair").iter().map(|p| PairDecl::from_node(*p)).collect())
            .unwrap_or_default();

        Self {
            version: root.attr_trimmed("version").to_string(),
            formation: FormationKind::parse(&formation_raw),
            formation_raw,
            woman_side,
            roles,
            hold_kind,
            steps,
            circle_orders,
            lines,
            two_lines,
            facing,
            pairs,
            signals,
        }
    }

    /// Role checking is enabled only when roles are declared.
    pub fn has_roles(&self) -> bool {
        !self.roles.is_empty()
    }

    /// Whether `id` is unknown while role checking is enabled.
    pub fn is_unknown_role(&self, id: &str) -> bool {
        self.has_roles() && !id.is_empty() && !self.roles.contains(id)
    }

    /// All primitives in document order.
    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.steps.iter().flat_map(|s| s.primitives.iter())
    }
}

/// The innermost `figure` around a node: its ordinal and optional `@id`.
#[derive(Debug, Clone, Copy)]
struct FigureScope<'a> {
    index: usize,
    id: Option<&'a str>,
}

/// Walk the tree in document order, recording every `step` with its
/// enclosing figure and its `geo/primitive` children.
fn collect_steps<N: NodeQuery>(root: &N) -> Vec<StepRecord> {
    let mut out = Vec::new();
    let mut figures = 0usize;
    let mut stack: Vec<(&N, Option<FigureScope<'_>>)> =
        root.children().iter().rev().map(|c| (c, None)).collect();
    while let Some((node, figure)) = stack.pop() {
        if node.tag() == "step" {
            let beats = parse_beats(node.attr_or_empty("beats"));
            let primitives = node
                .select("geo/primitive")
                .iter()
                .map(|p| Primitive::from_node(*p, figure, beats))
                .collect();
            out.push(StepRecord {
                figure_id: figure.and_then(|f| f.id).map(str::to_string),
                figure_index: figure.map(|f| f.index),
                who: node.attr_or_empty("who").to_string(),
                beats,
                primitives,
            });
        }
        let scope = if node.tag() == "figure" {
            figures += 1;
            Some(FigureScope {
                index: figures - 1,
                id: node.attr("id").map(str::trim).filter(|id| !id.is_empty()),
            })
        } else {
            figure
        };
        stack.extend(node.children().iter().rev().map(|c| (c, scope)));
    }
    out
}

fn parse_beats(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|b| b.is_finite())
        .unwrap_or(0.0)
}

fn gather_signals(steps: &[StepRecord]) -> Signals {
    let mut signals = Signals::default();
    for p in steps.iter().flat_map(|s| s.primitives.iter()) {
        signals.preserve_order |= p.preserve_order;
        signals.unsimulated_crossing |= p.kind.is_unsimulated_crossing();
        match p.kind {
            PrimitiveKind::SwapPlaces => signals.swap_places = true,
            PrimitiveKind::Approach => signals.approach = true,
            PrimitiveKind::Retreat => signals.retreat = true,
            PrimitiveKind::Progress => signals.progress = true,
            PrimitiveKind::Relpos => signals.relpos = true,
            PrimitiveKind::ReleaseHold => signals.release_hold = true,
            _ => {}
        }
        if p.kind != PrimitiveKind::Twirl {
            let rotation = p.rotation();
            signals.clockwise_travel |= rotation.clockwise;
            signals.counter_clockwise_travel |= rotation.counter_clockwise;
        }
    }
    signals
}
