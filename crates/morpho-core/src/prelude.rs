//! Morpho Core Prelude — convenient imports for common usage.
//!
//! ```rust
//! use morpho_core::prelude::*;
//! ```

// Re-export commonly used types
pub use crate::config::{EventShape, FingerprintConfig, LevelSpec};
pub use crate::event::{Event, EventLog};
pub use crate::fingerprint::{Morphognostic, Observation};
pub use crate::neighborhood::Neighborhood;
pub use crate::sector::Sector;
pub use crate::types::{EventValue, Orientation, Tick};

// Re-export error types
pub use crate::error::{MorphoError, Result};
