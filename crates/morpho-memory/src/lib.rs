//! # Morpho Memory
//!
//! Case library for morphognostic agents: metamorphs map previously seen
//! fingerprints to the response the agent took, with dedup on insert and
//! brute-force nearest-neighbor query.
//!
//! ## Quick start
//!
//! ```rust
//! use morpho_core::prelude::*;
//! use morpho_memory::prelude::*;
//!
//! let mut fingerprint = Morphognostic::new(
//!     Orientation::North,
//!     EventShape::scalar(1)?,
//!     21,
//!     21,
//!     FingerprintConfig::default(),
//! )?;
//! fingerprint.update(&[Some(5)], 10, 10)?;
//!
//! let mut store = MetamorphStore::default();
//! store.insert(Metamorph::new(fingerprint.clone(), 1))?;
//! let nearest = store.query_nearest(&fingerprint)?.unwrap();
//! assert_eq!(nearest.distance, 0.0);
//! # Ok::<(), morpho_core::MorphoError>(())
//! ```

pub mod dataset;
pub mod metamorph;
pub mod store;
pub mod prelude;
