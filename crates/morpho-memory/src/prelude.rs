//! Morpho Memory Prelude — convenient imports for common usage.
//!
//! ```rust
//! use morpho_memory::prelude::*;
//! ```

pub use crate::dataset::{export_dataset, read_dataset, write_dataset, Dataset, DatasetCase};
pub use crate::metamorph::Metamorph;
pub use crate::store::{MetamorphStore, Nearest, DEFAULT_EQUIVALENCE_DISTANCE};
