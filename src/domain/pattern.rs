// ============================================================
// Layer 3 — Sewing Pattern Domain Types
// ============================================================
// In-memory form of a garment sewing pattern: named panels,
// each a closed loop of edges over 2D vertices, placed in 3D
// by a translation and rotation, plus the stitches joining
// panel edges.
//
// Parsing from specification files lives in Layer 4
// (data::patterns); this module only describes the shape.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ─── Edges ────────────────────────────────────────────────────────────────────

/// Geometric kind of a panel edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Line,
    Quadratic,
    Cubic,
    Circle,
}

impl EdgeKind {
    pub const ALL: [EdgeKind; 4] = [
        EdgeKind::Line,
        EdgeKind::Quadratic,
        EdgeKind::Cubic,
        EdgeKind::Circle,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            EdgeKind::Line      => "line",
            EdgeKind::Quadratic => "quadratic",
            EdgeKind::Cubic     => "cubic",
            EdgeKind::Circle    => "circle",
        }
    }
}

/// Curvature of a non-straight edge.
///
/// Control points are relative to the edge: `x` runs along the
/// edge from start to end, `y` is the normalized offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Curvature {
    Quadratic { control: [f64; 2] },
    Cubic { controls: [[f64; 2]; 2] },
    Circle { radius: f64, large_arc: bool, right: bool },
}

impl Curvature {
    pub fn kind(&self) -> EdgeKind {
        match self {
            Curvature::Quadratic { .. } => EdgeKind::Quadratic,
            Curvature::Cubic { .. }     => EdgeKind::Cubic,
            Curvature::Circle { .. }    => EdgeKind::Circle,
        }
    }

    /// Curvature parameters flattened into at most four numbers.
    pub fn params(&self) -> [f64; 4] {
        match self {
            Curvature::Quadratic { control } => [control[0], control[1], 0.0, 0.0],
            Curvature::Cubic { controls } => {
                [controls[0][0], controls[0][1], controls[1][0], controls[1][1]]
            }
            Curvature::Circle { radius, large_arc, right } => [
                *radius,
                f64::from(u8::from(*large_arc)),
                f64::from(u8::from(*right)),
                0.0,
            ],
        }
    }
}

/// One edge of a panel outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Indices into the owning panel's vertex list.
    pub endpoints: [usize; 2],

    /// None for a straight line.
    pub curvature: Option<Curvature>,
}

impl Edge {
    pub fn kind(&self) -> EdgeKind {
        self.curvature
            .as_ref()
            .map_or(EdgeKind::Line, Curvature::kind)
    }
}

// ─── Panels ───────────────────────────────────────────────────────────────────

/// A flat piece of fabric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub name: String,

    /// 2D outline vertices in panel-local coordinates.
    pub vertices: Vec<[f64; 2]>,

    /// Closed loop of edges over `vertices`.
    pub edges: Vec<Edge>,

    /// 3D placement of the panel origin.
    pub translation: [f64; 3],

    /// Euler angles in degrees.
    pub rotation: [f64; 3],

    /// Class index assigned by a [`PanelClasses`] table, if one was given
    /// and it lists this panel.
    pub class_idx: Option<usize>,
}

impl Panel {
    /// Offset from the start to the end vertex of an edge.
    pub fn edge_vector(&self, edge: &Edge) -> [f64; 2] {
        let [a, b] = edge.endpoints;
        match (self.vertices.get(a), self.vertices.get(b)) {
            (Some(s), Some(e)) => [e[0] - s[0], e[1] - s[1]],
            _ => [0.0, 0.0],
        }
    }
}

/// One side of a stitch: an edge on a named panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StitchSide {
    pub panel: String,
    pub edge: usize,
}

/// Two (or more) panel edges sewn together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stitch {
    pub sides: Vec<StitchSide>,
}

// ─── SewingPattern ────────────────────────────────────────────────────────────

/// A parsed garment sewing pattern.
///
/// The dataset retags `name` with
/// `before_`/`after_` prefixes when building editing samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SewingPattern {
    pub name: String,

    /// Template the pattern was instantiated from, when known.
    pub template_name: Option<String>,

    /// Panels in canonical order.
    pub panels: Vec<Panel>,

    pub stitches: Vec<Stitch>,
}

impl SewingPattern {
    pub fn new(name: impl Into<String>, panels: Vec<Panel>, stitches: Vec<Stitch>) -> Self {
        Self {
            name: name.into(),
            template_name: None,
            panels,
            stitches,
        }
    }

    pub fn num_panels(&self) -> usize {
        self.panels.len()
    }

    /// Total number of edges across all panels.
    pub fn num_edges(&self) -> usize {
        self.panels.iter().map(|p| p.edges.len()).sum()
    }

    pub fn panel(&self, name: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.name == name)
    }

    pub fn panel_names(&self) -> Vec<&str> {
        self.panels.iter().map(|p| p.name.as_str()).collect()
    }

    /// Prefix the pattern name in place, e.g. `dress` → `before_dress`.
    pub fn prefix_name(&mut self, prefix: &str) {
        self.name = format!("{prefix}{}", self.name);
    }
}

// ─── PanelClasses ─────────────────────────────────────────────────────────────

/// Named panel classes, each grouping a set of panel names.
///
/// Class order is the order the classes were declared in, and a
/// panel's class index is its position in that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelClasses {
    classes: Vec<String>,
    panel_to_class: HashMap<String, usize>,
}

impl PanelClasses {
    /// Build from `(class name, member panel names)` pairs.
    ///
    /// A panel listed under several classes keeps the first one.
    pub fn new(groups: Vec<(String, Vec<String>)>) -> Self {
        let mut classes        = Vec::with_capacity(groups.len());
        let mut panel_to_class = HashMap::new();

        for (idx, (class, panels)) in groups.into_iter().enumerate() {
            for panel in panels {
                panel_to_class.entry(panel).or_insert(idx);
            }
            classes.push(class);
        }

        Self { classes, panel_to_class }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn class_index(&self, panel_name: &str) -> Option<usize> {
        self.panel_to_class.get(panel_name).copied()
    }

    pub fn class_name(&self, panel_name: &str) -> Option<&str> {
        self.class_index(panel_name)
            .and_then(|i| self.classes.get(i))
            .map(String::as_str)
    }

    /// Assign class indices to every panel of a pattern.
    pub fn classify(&self, pattern: &mut SewingPattern) {
        for panel in &mut pattern.panels {
            panel.class_idx = self.class_index(&panel.name);
        }
    }
}
