// ============================================================
// Layer 4 — Pattern Specification Parser
// ============================================================
// Reads GarmentCode-style specification JSON into the domain
// SewingPattern, and panel-class tables into PanelClasses.
//
// Specification layout:
//   {
//     "pattern": {
//       "panels": {
//         "<name>": {
//           "translation": [x, y, z],
//           "rotation":    [rx, ry, rz],
//           "vertices":    [[x, y], ...],
//           "edges": [{ "endpoints": [i, j], "curvature": ... }, ...]
//         }, ...
//       },
//       "stitches":    [[{"panel": "a", "edge": 0}, {"panel": "b", "edge": 2}], ...],
//       "panel_order": ["a", "b", ...]
//     }
//   }
//
// Curvature comes in two dialects:
//   [x, y]                                        legacy quadratic control point
//   {"type": "quadratic", "params": [[x, y]]}
//   {"type": "cubic",     "params": [[x, y], [x, y]]}
//   {"type": "circle",    "params": [radius, large_arc, right]}

use serde::Deserialize;
use serde_json::{Map, Value};
use std::{fs, path::Path};

use crate::domain::error::{DatasetError, Result};
use crate::domain::pattern::{Curvature, Edge, Panel, PanelClasses, SewingPattern, Stitch, StitchSide};

// ─── Raw JSON shapes ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RawSpec {
    pattern: RawPattern,
}

#[derive(Deserialize)]
struct RawPattern {
    panels: Map<String, Value>,
    #[serde(default)]
    stitches: Vec<Vec<StitchSide>>,
    #[serde(default)]
    panel_order: Vec<String>,
}

#[derive(Deserialize)]
struct RawPanel {
    #[serde(default)]
    translation: [f64; 3],
    #[serde(default)]
    rotation: [f64; 3],
    vertices: Vec<[f64; 2]>,
    edges: Vec<RawEdge>,
}

#[derive(Deserialize)]
struct RawEdge {
    endpoints: [usize; 2],
    #[serde(default)]
    curvature: Option<RawCurvature>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCurvature {
    Legacy([f64; 2]),
    Typed {
        #[serde(rename = "type")]
        kind: String,
        params: Value,
    },
}

// ─── SewingPattern loading ────────────────────────────────────────────────────

impl SewingPattern {
    /// Parse a specification file.
    ///
    /// The pattern is named after the file stem; panels are classified
    /// when `classifier` is given.
    pub fn from_file(
        path:          &Path,
        classifier:    Option<&PanelClasses>,
        template_name: Option<&str>,
    ) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("pattern");

        let mut pattern = Self::from_json_str(&text, name, path)?;
        pattern.template_name = template_name.map(str::to_string);
        if let Some(classes) = classifier {
            classes.classify(&mut pattern);
        }

        tracing::debug!(
            "Parsed pattern '{}' ({} panels, {} edges) from '{}'",
            pattern.name,
            pattern.num_panels(),
            pattern.num_edges(),
            path.display()
        );
        Ok(pattern)
    }

    /// Parse specification JSON text. `origin` is only used in errors.
    pub fn from_json_str(text: &str, name: &str, origin: &Path) -> Result<Self> {
        let raw: RawSpec = serde_json::from_str(text)
            .map_err(|e| DatasetError::invalid_pattern(origin, e.to_string()))?;
        let RawPattern { panels, stitches, panel_order } = raw.pattern;

        let order: Vec<String> = if panel_order.is_empty() {
            panels.keys().cloned().collect()
        } else {
            panel_order
        };

        let mut parsed = Vec::with_capacity(order.len());
        for panel_name in &order {
            let value = panels.get(panel_name).ok_or_else(|| {
                DatasetError::invalid_pattern(
                    origin,
                    format!("panel_order names unknown panel '{panel_name}'"),
                )
            })?;
            parsed.push(parse_panel(panel_name, value, origin)?);
        }

        let stitches = stitches
            .into_iter()
            .map(|sides| Stitch { sides })
            .collect();

        Ok(SewingPattern::new(name, parsed, stitches))
    }
}

fn parse_panel(name: &str, value: &Value, origin: &Path) -> Result<Panel> {
    let raw: RawPanel = serde_json::from_value(value.clone()).map_err(|e| {
        DatasetError::invalid_pattern(origin, format!("panel '{name}': {e}"))
    })?;

    let mut edges = Vec::with_capacity(raw.edges.len());
    for (i, edge) in raw.edges.into_iter().enumerate() {
        if edge.endpoints.iter().any(|&v| v >= raw.vertices.len()) {
            return Err(DatasetError::invalid_pattern(
                origin,
                format!(
                    "panel '{name}' edge {i} endpoints {:?} exceed {} vertices",
                    edge.endpoints,
                    raw.vertices.len()
                ),
            ));
        }
        let curvature = edge
            .curvature
            .map(|c| parse_curvature(c, origin, name, i))
            .transpose()?;
        edges.push(Edge { endpoints: edge.endpoints, curvature });
    }

    Ok(Panel {
        name: name.to_string(),
        vertices: raw.vertices,
        edges,
        translation: raw.translation,
        rotation: raw.rotation,
        class_idx: None,
    })
}

fn parse_curvature(raw: RawCurvature, origin: &Path, panel: &str, edge: usize) -> Result<Curvature> {
    let bad = |msg: String| {
        DatasetError::invalid_pattern(origin, format!("panel '{panel}' edge {edge}: {msg}"))
    };

    match raw {
        RawCurvature::Legacy(control) => Ok(Curvature::Quadratic { control }),
        RawCurvature::Typed { kind, params } => match kind.as_str() {
            "quadratic" => {
                let points: Vec<[f64; 2]> = serde_json::from_value(params)
                    .map_err(|e| bad(format!("quadratic params: {e}")))?;
                let control = *points
                    .first()
                    .ok_or_else(|| bad("quadratic needs one control point".into()))?;
                Ok(Curvature::Quadratic { control })
            }
            "cubic" => {
                let points: Vec<[f64; 2]> = serde_json::from_value(params)
                    .map_err(|e| bad(format!("cubic params: {e}")))?;
                match points.as_slice() {
                    [a, b, ..] => Ok(Curvature::Cubic { controls: [*a, *b] }),
                    _ => Err(bad("cubic needs two control points".into())),
                }
            }
            "circle" => {
                let values: Vec<Value> = serde_json::from_value(params)
                    .map_err(|e| bad(format!("circle params: {e}")))?;
                match values.as_slice() {
                    [radius, large_arc, right, ..] => Ok(Curvature::Circle {
                        radius: radius
                            .as_f64()
                            .ok_or_else(|| bad("circle radius is not a number".into()))?,
                        large_arc: truthy(large_arc),
                        right: truthy(right),
                    }),
                    _ => Err(bad("circle needs [radius, large_arc, right]".into())),
                }
            }
            other => Err(bad(format!("unknown curvature type '{other}'"))),
        },
    }
}

// flags are written either as booleans or as 0/1
fn truthy(v: &Value) -> bool {
    match v {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|x| x != 0.0),
        _ => false,
    }
}

// ─── PanelClasses loading ─────────────────────────────────────────────────────

impl PanelClasses {
    /// Load a `{ "class": ["panel", ...], ... }` table, keeping the
    /// declaration order of the classes.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let table: Map<String, Value> = serde_json::from_str(&text)?;

        let mut groups = Vec::with_capacity(table.len());
        for (class, members) in table {
            let panels: Vec<String> = serde_json::from_value(members).map_err(|e| {
                DatasetError::Serialization(format!("panel class '{class}': {e}"))
            })?;
            groups.push((class, panels));
        }

        let classes = PanelClasses::new(groups);
        tracing::info!(
            "Loaded {} panel classes from '{}'",
            classes.len(),
            path.display()
        );
        Ok(classes)
    }
}
