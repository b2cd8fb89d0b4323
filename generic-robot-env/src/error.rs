//! Errors in the library.
use crate::ObjectKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, binding or driving a robot environment.
#[derive(Error, Debug)]
pub enum RobotEnvError {
    /// The root scene file or one of its includes does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// A file exists but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Malformed XML.
    #[error("XML parse error in {}: {message}", .path.display())]
    XmlParse {
        /// The offending document.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// The simulator could not build a model from the scene.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Invalid or inconsistent robot configuration.
    #[error("configuration error in `{field}`: {message}")]
    Config {
        /// The configuration field at fault.
        field: String,
        /// What went wrong.
        message: String,
    },

    /// A declared name does not exist in the loaded model.
    #[error("configuration error: {kind} `{name}` does not exist in the loaded model")]
    MissingName {
        /// Kind of the object looked up.
        kind: ObjectKind,
        /// The unresolved name.
        name: String,
    },

    /// The action does not match the number of bound actuators.
    #[error("action has {got} elements, expected {expected}")]
    ActionShape {
        /// Number of bound actuators.
        expected: usize,
        /// Length of the given action.
        got: usize,
    },

    /// The environment was used after `close()`.
    #[error("environment used after close()")]
    Closed,

    /// An end-effector target violates the cartesian bounds.
    #[error("end-effector target {value} on axis {axis} is outside [{min}, {max}]")]
    OutOfBounds {
        /// Axis name, `x`, `y` or `z`.
        axis: char,
        /// Commanded coordinate.
        value: f64,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// Rendering failed.
    #[error("render error: {0}")]
    Render(String),

    /// The simulator does not implement the requested capability.
    #[error("unsupported by the simulator: {0}")]
    Unsupported(String),
}

impl RobotEnvError {
    pub(crate) fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns `true` for configuration errors, including names missing from the model.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Config { .. } | Self::MissingName { .. })
    }
}

/// Result type of the library.
pub type Result<T> = std::result::Result<T, RobotEnvError>;
