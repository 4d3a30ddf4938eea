//! Training-dataset export.
//!
//! Serializes a store as a JSON document — session metadata plus one
//! feature row per case — so external response-selection policies (neural
//! network, decision tree) can be trained on the case library. Features
//! are the orientation-normalized flattened densities, so rows from agents
//! that faced different directions share one frame.

use crate::store::MetamorphStore;
use morpho_core::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Metadata describing one exported dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub session_id: String,
    pub case_count: usize,
    /// Length of every feature row.
    pub feature_width: usize,
    pub equivalence_distance: f32,
}

/// One training row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetCase {
    pub response: i32,
    pub response_name: String,
    pub features: Vec<f32>,
}

/// A full exported dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub metadata: DatasetMetadata,
    pub cases: Vec<DatasetCase>,
}

/// Build the dataset for a store. An empty store exports an empty dataset
/// with feature width 0.
pub fn export_dataset(store: &MetamorphStore) -> Dataset {
    let cases: Vec<DatasetCase> = store
        .iter()
        .map(|m| DatasetCase {
            response: m.response,
            response_name: m.response_name.clone(),
            features: m.fingerprint().rectified_densities(),
        })
        .collect();
    let feature_width = cases.first().map(|c| c.features.len()).unwrap_or(0);
    Dataset {
        metadata: DatasetMetadata {
            session_id: uuid::Uuid::new_v4().to_string(),
            case_count: cases.len(),
            feature_width,
            equivalence_distance: store.equivalence_distance(),
        },
        cases,
    }
}

/// Export a store's dataset to a JSON file.
pub fn write_dataset(store: &MetamorphStore, path: &Path) -> Result<()> {
    let dataset = export_dataset(store);
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &dataset)?;
    Ok(())
}

/// Read a dataset back from a JSON file.
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
