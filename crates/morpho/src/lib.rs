//! # Morpho
//!
//! Multi-resolution spatiotemporal fingerprints ("morphognostics") and a
//! case memory mapping fingerprints to agent responses.
//!
//! Each simulation tick the host hands the core an observation vector and
//! the agent's position. The fingerprint appends the observation to its
//! event log and recomputes a pyramid of neighborhoods — nested squares of
//! increasing spatial size and temporal depth, tiled into sectors that
//! accumulate event-type densities. The host's response-selection policy
//! reads the fingerprint, acts, and may record the (fingerprint, response)
//! pair as a metamorph for later nearest-case lookup.
//!
//! ## Quick Start
//!
//! ```rust
//! use morpho::prelude::*;
//!
//! // One scalar event dimension, a 21x21 world, default pyramid geometry.
//! let mut fingerprint = Morphognostic::new(
//!     Orientation::North,
//!     EventShape::scalar(1)?,
//!     21,
//!     21,
//!     FingerprintConfig::default(),
//! )?;
//!
//! // Tick: observe value 5 at the agent's cell.
//! fingerprint.update(&[Some(5)], 10, 10)?;
//!
//! // Remember the response taken for this situation.
//! let mut store = MetamorphStore::default();
//! store.insert(Metamorph::new(fingerprint.clone(), 1).with_response_name("forage"))?;
//!
//! // Later: recall the nearest known case.
//! let nearest = store.query_nearest(&fingerprint)?.unwrap();
//! assert_eq!(nearest.metamorph.response, 1);
//! # Ok::<(), morpho::MorphoError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`morpho_core`] — event log, sectors, neighborhoods, the fingerprint
//!   pyramid, and its binary wire format
//! - [`morpho_memory`] — the metamorph case library, store persistence,
//!   and training-dataset export

pub use morpho_core;
pub use morpho_memory;

pub use morpho_core::error::{MorphoError, Result};

pub mod prelude {
    //! Convenient imports for common usage.
    pub use morpho_core::prelude::*;
    pub use morpho_memory::prelude::*;
}
