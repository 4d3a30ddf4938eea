//! Error types for morphognostic operations.
//!
//! Provides structured error handling instead of panics. Every error is
//! local to the call that raised it; the core performs no retries and no
//! silent recovery.

use std::error::Error;
use std::fmt;

/// Result type for morphognostic operations.
pub type Result<T> = std::result::Result<T, MorphoError>;

/// Errors that can occur during morphognostic operations.
#[derive(Debug, Clone)]
pub enum MorphoError {
    /// Invalid geometry or shape parameter at construction.
    Config(ConfigError),
    /// Operands with incompatible geometry.
    Geometry(GeometryError),
    /// Malformed input or persisted data.
    Data(DataError),
    /// I/O errors (wrapped).
    Io(String),
    /// Serialization errors.
    Serialization(String),
}

impl fmt::Display for MorphoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MorphoError::Config(e) => write!(f, "Config error: {}", e),
            MorphoError::Geometry(e) => write!(f, "Geometry error: {}", e),
            MorphoError::Data(e) => write!(f, "Data error: {}", e),
            MorphoError::Io(msg) => write!(f, "I/O error: {}", msg),
            MorphoError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl Error for MorphoError {}

impl From<std::io::Error> for MorphoError {
    fn from(e: std::io::Error) -> Self {
        MorphoError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for MorphoError {
    fn from(e: serde_json::Error) -> Self {
        MorphoError::Serialization(e.to_string())
    }
}

/// Invalid geometry/shape parameters. Construction fails fast; no default
/// is substituted.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// A parameter that must be at least 1 was not.
    NonPositive { field: &'static str, value: i64 },
    /// An event shape with no dimensions.
    EmptyShape,
    /// A dimension with zero event types.
    ZeroCardinality { dimension: usize },
    /// The level schedule overflowed machine arithmetic.
    ScheduleOverflow { level: usize },
    /// A level dimension beyond the sanity bound.
    LevelTooLarge { level: usize, dimension: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositive { field, value } => {
                write!(f, "{} must be positive (got {})", field, value)
            }
            ConfigError::EmptyShape => write!(f, "event shape has no dimensions"),
            ConfigError::ZeroCardinality { dimension } => {
                write!(f, "event dimension {} has zero types", dimension)
            }
            ConfigError::ScheduleOverflow { level } => {
                write!(f, "level schedule overflows at level {}", level)
            }
            ConfigError::LevelTooLarge { level, dimension } => {
                write!(
                    f,
                    "level {} dimension {} exceeds the sanity bound",
                    level, dimension
                )
            }
        }
    }
}

/// Incompatible geometry between two operands, or an observation that does
/// not fit the declared shape.
#[derive(Debug, Clone)]
pub enum GeometryError {
    /// Differing neighborhood counts.
    NeighborhoodCount { left: usize, right: usize },
    /// Differing spatial dimension at one pyramid level.
    LevelDimension { level: usize, left: usize, right: usize },
    /// Differing temporal duration at one pyramid level.
    LevelDuration { level: usize, left: u64, right: u64 },
    /// Differing event dimension counts.
    EventDimensions { left: usize, right: usize },
    /// Differing type cardinality for one event dimension.
    TypeCardinality { dimension: usize, left: usize, right: usize },
    /// Observation vector length differs from the declared shape.
    ObservationLength { expected: usize, found: usize },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::NeighborhoodCount { left, right } => {
                write!(f, "neighborhood counts differ: {} vs {}", left, right)
            }
            GeometryError::LevelDimension { level, left, right } => {
                write!(f, "level {} dimensions differ: {} vs {}", level, left, right)
            }
            GeometryError::LevelDuration { level, left, right } => {
                write!(f, "level {} durations differ: {} vs {}", level, left, right)
            }
            GeometryError::EventDimensions { left, right } => {
                write!(f, "event dimensions differ: {} vs {}", left, right)
            }
            GeometryError::TypeCardinality { dimension, left, right } => {
                write!(
                    f,
                    "type cardinality for dimension {} differs: {} vs {}",
                    dimension, left, right
                )
            }
            GeometryError::ObservationLength { expected, found } => {
                write!(
                    f,
                    "observation has {} values, shape declares {}",
                    found, expected
                )
            }
        }
    }
}

/// Malformed input or persisted data.
#[derive(Debug, Clone)]
pub enum DataError {
    /// Persisted stream ended before the declared geometry was satisfied.
    Truncated,
    /// Persisted stream holds a value no writer could have produced.
    Malformed(String),
    /// An observed type outside its dimension's cardinality.
    TypeOutOfRange {
        dimension: usize,
        value: i32,
        cardinality: usize,
    },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Truncated => write!(f, "stream truncated"),
            DataError::Malformed(msg) => write!(f, "malformed stream: {}", msg),
            DataError::TypeOutOfRange {
                dimension,
                value,
                cardinality,
            } => {
                write!(
                    f,
                    "type {} out of range for dimension {} (cardinality {})",
                    value, dimension, cardinality
                )
            }
        }
    }
}

// Convenience constructors
impl MorphoError {
    pub fn non_positive(field: &'static str, value: i64) -> Self {
        MorphoError::Config(ConfigError::NonPositive { field, value })
    }

    pub fn truncated() -> Self {
        MorphoError::Data(DataError::Truncated)
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        MorphoError::Data(DataError::Malformed(msg.into()))
    }
}
