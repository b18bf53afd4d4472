//! The tunable parameter surface.
//!
//! [`FlowParams`] holds the four live-bindable numbers. Writes through
//! [`FlowParams::set`] enforce the documented ranges; direct field writes do
//! not, and out-of-range values there are a caller contract violation.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::FieldError;

pub const DEFAULT_CELL_SIZE: u32 = 15;
pub const DEFAULT_LINE_WIDTH: f64 = 1.0;
pub const DEFAULT_ZOOM: f64 = 0.01;
pub const DEFAULT_MAXIMUM_LINE_LENGTH: f64 = 60.0;
pub const DEFAULT_STARTED: bool = true;

/// Range and slider step of one tunable, as shown by a control panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub integer: bool,
    pub description: &'static str,
}

/// The tunables in panel order.
pub const PARAM_SPECS: &[ParamSpec] = &[
    ParamSpec {
        name: "cellSize",
        min: 1.0,
        max: 30.0,
        step: 1.0,
        integer: true,
        description: "Spacing in pixels between sampled grid points",
    },
    ParamSpec {
        name: "lineWidth",
        min: 0.0,
        max: 10.0,
        step: 1.0,
        integer: false,
        description: "Stroke width of each segment",
    },
    ParamSpec {
        name: "zoom",
        min: 0.0001,
        max: 0.03,
        step: 0.001,
        integer: false,
        description: "Spatial frequency applied to grid coordinates",
    },
    ParamSpec {
        name: "maximumLineLength",
        min: 0.0,
        max: 100.0,
        step: 1.0,
        integer: false,
        description: "Cap on segment length contributed by pointer distance",
    },
];

impl ParamSpec {
    /// Step for a slider over this range, or `None` when `min` and `max` do
    /// not both sit on the step grid and the slider must be continuous.
    pub fn slider_step(&self) -> Option<f64> {
        let on_grid = |v: f64| {
            let k = v / self.step;
            (k - k.round()).abs() < 1e-9
        };
        (on_grid(self.min) && on_grid(self.max - self.min)).then_some(self.step)
    }
}

/// Looks up the spec for a tunable by its JSON name.
pub fn param_spec(name: &str) -> Option<&'static ParamSpec> {
    PARAM_SPECS.iter().find(|s| s.name == name)
}

/// Live-bindable rendering parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlowParams {
    pub cell_size: u32,
    pub line_width: f64,
    pub zoom: f64,
    pub maximum_line_length: f64,
}

impl Default for FlowParams {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            line_width: DEFAULT_LINE_WIDTH,
            zoom: DEFAULT_ZOOM,
            maximum_line_length: DEFAULT_MAXIMUM_LINE_LENGTH,
        }
    }
}

impl FlowParams {
    /// Current values as a JSON object keyed by tunable name.
    pub fn to_json(&self) -> Value {
        json!({
            "cellSize": self.cell_size,
            "lineWidth": self.line_width,
            "zoom": self.zoom,
            "maximumLineLength": self.maximum_line_length,
        })
    }

    /// Current value of a tunable by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        match name {
            "cellSize" => Some(self.cell_size as f64),
            "lineWidth" => Some(self.line_width),
            "zoom" => Some(self.zoom),
            "maximumLineLength" => Some(self.maximum_line_length),
            _ => None,
        }
    }

    /// Writes one tunable from the binding surface.
    ///
    /// Rejects unknown names, non-numeric values, non-integral `cellSize`,
    /// and anything outside the documented range. On error nothing changes.
    pub fn set(&mut self, name: &str, value: &Value) -> Result<(), FieldError> {
        let spec = param_spec(name).ok_or_else(|| FieldError::UnknownParam(name.to_string()))?;
        let v = value.as_f64().ok_or_else(|| FieldError::ParamTypeMismatch {
            name: name.to_string(),
            expected: if spec.integer { "integer" } else { "number" }.to_string(),
            got: json_type_name(value).to_string(),
        })?;
        if spec.integer && v.fract() != 0.0 {
            return Err(FieldError::ParamTypeMismatch {
                name: name.to_string(),
                expected: "integer".to_string(),
                got: "number".to_string(),
            });
        }
        if !(spec.min..=spec.max).contains(&v) {
            return Err(FieldError::ParamOutOfRange {
                name: name.to_string(),
                value: v,
                min: spec.min,
                max: spec.max,
            });
        }
        match name {
            "cellSize" => self.cell_size = v as u32,
            "lineWidth" => self.line_width = v,
            "zoom" => self.zoom = v,
            "maximumLineLength" => self.maximum_line_length = v,
            _ => unreachable!("every PARAM_SPECS entry has a field"),
        }
        log::debug!("param {name} = {v}");
        Ok(())
    }

    /// Schema describing every tunable: type, default, range, step.
    pub fn schema() -> Value {
        let defaults = FlowParams::default();
        let mut schema = Map::new();
        for spec in PARAM_SPECS {
            schema.insert(
                spec.name.to_string(),
                json!({
                    "type": if spec.integer { "integer" } else { "number" },
                    "default": defaults.get(spec.name),
                    "min": spec.min,
                    "max": spec.max,
                    "step": spec.step,
                    "description": spec.description,
                }),
            );
        }
        Value::Object(schema)
    }
}

/// JSON type name as used in type-mismatch errors.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- FlowParams --

    #[test]
    fn defaults_match_documented_values() {
        let p = FlowParams::default();
        assert_eq!(p.cell_size, 15);
        assert_eq!(p.line_width, 1.0);
        assert_eq!(p.zoom, 0.01);
        assert_eq!(p.maximum_line_length, 60.0);
    }

    #[test]
    fn slider_step_is_discrete_when_range_sits_on_grid() {
        for name in ["cellSize", "lineWidth", "maximumLineLength"] {
            let spec = param_spec(name).unwrap();
            assert_eq!(spec.slider_step(), Some(1.0), "{name}");
        }
    }

    #[test]
    fn zoom_slider_is_continuous_so_range_ends_are_reachable() {
        // 0.0001 + k * 0.001 never lands on 0.03 or on the 0.01 default
        let zoom = param_spec("zoom").unwrap();
        assert_eq!(zoom.slider_step(), None);
    }

    #[test]
    fn to_json_uses_camel_case_keys() {
        let v = FlowParams::default().to_json();
        assert_eq!(v["cellSize"], 15);
        assert_eq!(v["maximumLineLength"], 60.0);
    }

    #[test]
    fn serde_matches_to_json() {
        let p = FlowParams::default();
        assert_eq!(serde_json::to_value(p).unwrap(), p.to_json());
    }

    #[test]
    fn deserialize_fills_missing_keys_with_defaults() {
        let p: FlowParams = serde_json::from_str(r#"{"zoom": 0.02}"#).unwrap();
        assert_eq!(p.zoom, 0.02);
        assert_eq!(p.cell_size, DEFAULT_CELL_SIZE);
    }

    #[test]
    fn set_writes_in_range_values() {
        let mut p = FlowParams::default();
        p.set("cellSize", &json!(1)).unwrap();
        p.set("lineWidth", &json!(10)).unwrap();
        p.set("zoom", &json!(0.0001)).unwrap();
        p.set("maximumLineLength", &json!(0)).unwrap();
        assert_eq!(p.cell_size, 1);
        assert_eq!(p.line_width, 10.0);
        assert_eq!(p.zoom, 0.0001);
        assert_eq!(p.maximum_line_length, 0.0);
    }

    #[test]
    fn set_rejects_zero_cell_size() {
        let mut p = FlowParams::default();
        let result = p.set("cellSize", &json!(0));
        assert!(matches!(result, Err(FieldError::ParamOutOfRange { .. })));
        assert_eq!(p.cell_size, DEFAULT_CELL_SIZE);
    }

    #[test]
    fn set_rejects_fractional_cell_size() {
        let mut p = FlowParams::default();
        let result = p.set("cellSize", &json!(2.5));
        assert!(matches!(result, Err(FieldError::ParamTypeMismatch { .. })));
    }

    #[test]
    fn set_rejects_negative_zoom() {
        let mut p = FlowParams::default();
        let result = p.set("zoom", &json!(-0.01));
        assert!(matches!(result, Err(FieldError::ParamOutOfRange { .. })));
        assert_eq!(p.zoom, DEFAULT_ZOOM);
    }

    #[test]
    fn set_rejects_wrong_type() {
        let mut p = FlowParams::default();
        let err = p.set("lineWidth", &json!("thick")).unwrap_err();
        assert!(err.to_string().contains("string"), "got: {err}");
    }

    #[test]
    fn set_rejects_unknown_name() {
        let mut p = FlowParams::default();
        assert!(matches!(
            p.set("radius", &json!(1.0)),
            Err(FieldError::UnknownParam(_))
        ));
    }

    #[test]
    fn schema_has_all_four_tunables_with_ranges() {
        let schema = FlowParams::schema();
        for spec in PARAM_SPECS {
            let entry = &schema[spec.name];
            assert_eq!(entry["min"], spec.min, "min of {}", spec.name);
            assert_eq!(entry["max"], spec.max, "max of {}", spec.name);
            assert_eq!(entry["step"], spec.step, "step of {}", spec.name);
        }
        assert_eq!(schema["cellSize"]["type"], "integer");
        assert_eq!(schema["cellSize"]["default"], 15.0);
        assert_eq!(schema.as_object().unwrap().len(), 4);
    }

    #[test]
    fn every_default_lies_inside_its_range() {
        let p = FlowParams::default();
        for spec in PARAM_SPECS {
            let v = p.get(spec.name).unwrap();
            assert!((spec.min..=spec.max).contains(&v), "{} = {v}", spec.name);
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn set_never_leaves_value_out_of_range(
                idx in 0_usize..4,
                value in -1000.0_f64..1000.0,
            ) {
                let spec = &PARAM_SPECS[idx];
                let mut p = FlowParams::default();
                let _ = p.set(spec.name, &json!(value));
                let v = p.get(spec.name).unwrap();
                prop_assert!((spec.min..=spec.max).contains(&v));
            }
        }
    }
}
