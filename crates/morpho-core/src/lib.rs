//! # Morpho Core
//!
//! Morphognostic fingerprints: multi-resolution spatiotemporal summaries
//! of the events recently observed around an agent's position.
//!
//! A fingerprint is an ordered pyramid of neighborhoods sharing one event
//! log. Each neighborhood covers a larger square and a longer temporal
//! window than the one before it, tiled into sectors that accumulate
//! per-dimension event-type densities. An orientation-normalized readout
//! makes fingerprints captured under different facings comparable, and a
//! fixed big-endian wire format round-trips them exactly.
//!
//! ## Quick start
//!
//! ```rust
//! use morpho_core::prelude::*;
//!
//! let mut fingerprint = Morphognostic::new(
//!     Orientation::North,
//!     EventShape::scalar(1)?,
//!     21,
//!     21,
//!     FingerprintConfig::default(),
//! )?;
//! fingerprint.update(&[Some(5)], 10, 10)?;
//! assert_eq!(fingerprint.compare(&fingerprint.clone())?, 0.0);
//! # Ok::<(), morpho_core::MorphoError>(())
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod fingerprint;
pub mod neighborhood;
pub mod sector;
pub mod types;
pub mod wire;
pub mod prelude;

pub use error::{MorphoError, Result};
