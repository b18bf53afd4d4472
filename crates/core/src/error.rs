//! Error types for the flowfield core.

use thiserror::Error;

/// Errors produced by flowfield operations.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Width or height was zero when creating an engine or surface.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A parameter name is not part of the tunable parameter surface.
    #[error("unknown parameter: {0}")]
    UnknownParam(String),

    /// A parameter existed but had the wrong JSON type.
    #[error("parameter type mismatch for '{name}': expected {expected}, got {got}")]
    ParamTypeMismatch {
        name: String,
        expected: String,
        got: String,
    },

    /// A parameter value fell outside its documented range.
    #[error("parameter '{name}' out of range: {value} not in [{min}, {max}]")]
    ParamOutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A gradient could not be constructed from the given stops.
    #[error("invalid gradient: {0}")]
    InvalidGradient(String),

    /// The drawing surface rejected an operation (e.g. no 2D context).
    #[error("surface error: {0}")]
    Surface(String),

    /// The host could not arm the next animation frame.
    #[error("scheduler error: {0}")]
    Scheduler(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let err = FieldError::InvalidDimensions;
        let msg = format!("{err}");
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn unknown_param_includes_name() {
        let err = FieldError::UnknownParam("speed".into());
        let msg = format!("{err}");
        assert!(
            msg.contains("speed"),
            "expected message containing 'speed', got: {msg}"
        );
    }

    #[test]
    fn param_type_mismatch_includes_all_fields() {
        let err = FieldError::ParamTypeMismatch {
            name: "zoom".into(),
            expected: "number".into(),
            got: "string".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("zoom"), "missing param name in: {msg}");
        assert!(msg.contains("number"), "missing expected type in: {msg}");
        assert!(msg.contains("string"), "missing got type in: {msg}");
    }

    #[test]
    fn param_out_of_range_includes_bounds() {
        let err = FieldError::ParamOutOfRange {
            name: "cellSize".into(),
            value: 42.0,
            min: 1.0,
            max: 30.0,
        };
        let msg = format!("{err}");
        assert!(msg.contains("cellSize"), "missing name in: {msg}");
        assert!(msg.contains("42"), "missing value in: {msg}");
        assert!(msg.contains("30"), "missing max in: {msg}");
    }

    #[test]
    fn surface_and_scheduler_include_message() {
        let surface = FieldError::Surface("no 2d context".into());
        assert!(surface.to_string().contains("no 2d context"));
        let scheduler = FieldError::Scheduler("no window".into());
        assert!(scheduler.to_string().contains("no window"));
    }

    #[test]
    fn field_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FieldError>();
    }

    #[test]
    fn field_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<FieldError>();
    }
}
