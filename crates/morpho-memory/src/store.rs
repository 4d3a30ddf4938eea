//! MetamorphStore — deduplicated case library with nearest-neighbor query.
//!
//! Every operation is a brute-force linear scan. The structure favors
//! simplicity over scale: store sizes stay small relative to the
//! simulation horizon, so O(n) per operation is an accepted limit, not a
//! defect.

use crate::metamorph::Metamorph;
use morpho_core::error::Result;
use morpho_core::fingerprint::Morphognostic;
use morpho_core::wire;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Distance at or below which two fingerprints are treated as the same
/// case.
pub const DEFAULT_EQUIVALENCE_DISTANCE: f32 = 0.0;

const DEFAULT_RNG_SEED: u64 = 42;

/// The nearest stored case for a queried fingerprint.
#[derive(Debug, Clone, Copy)]
pub struct Nearest<'a> {
    pub metamorph: &'a Metamorph,
    pub index: usize,
    pub distance: f32,
}

/// Deduplicated collection of (fingerprint, response) cases. Insertion
/// order is irrelevant to queries.
#[derive(Debug, Clone)]
pub struct MetamorphStore {
    metamorphs: Vec<Metamorph>,
    equivalence_distance: f32,
    rng: u64,
}

impl Default for MetamorphStore {
    fn default() -> Self {
        Self::new(DEFAULT_EQUIVALENCE_DISTANCE)
    }
}

impl MetamorphStore {
    pub fn new(equivalence_distance: f32) -> Self {
        Self {
            metamorphs: Vec::new(),
            equivalence_distance,
            rng: DEFAULT_RNG_SEED,
        }
    }

    /// Seed the tie-break generator (queries with tied distances pick
    /// uniformly at random).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = seed;
        self
    }

    pub fn equivalence_distance(&self) -> f32 {
        self.equivalence_distance
    }

    pub fn len(&self) -> usize {
        self.metamorphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metamorphs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Metamorph> {
        self.metamorphs.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Metamorph> {
        self.metamorphs.get(index)
    }

    /// Forget every stored case.
    pub fn clear(&mut self) {
        self.metamorphs.clear();
    }

    /// Insert a case unless an equivalent one is already present.
    ///
    /// The candidate is compared against every stored entry; any distance
    /// at or below the equivalence threshold (inclusive) discards the new
    /// observation — no replacement, no counter. Returns whether the case
    /// was stored.
    pub fn insert(&mut self, metamorph: Metamorph) -> Result<bool> {
        for stored in &self.metamorphs {
            let distance = stored.fingerprint().compare(metamorph.fingerprint())?;
            if distance <= self.equivalence_distance {
                return Ok(false);
            }
        }
        self.metamorphs.push(metamorph);
        Ok(true)
    }

    /// Nearest stored case by fingerprint distance, `None` on an empty
    /// store. Ties are broken uniformly at random among the tied
    /// candidates (a reservoir step per tie), never by insertion order.
    pub fn query_nearest(&mut self, fingerprint: &Morphognostic) -> Result<Option<Nearest<'_>>> {
        let mut best: Option<(usize, f32)> = None;
        let mut tied = 0u64;
        for (index, stored) in self.metamorphs.iter().enumerate() {
            let distance = fingerprint.compare(stored.fingerprint())?;
            match best {
                None => {
                    best = Some((index, distance));
                    tied = 1;
                }
                Some((_, best_distance)) if distance < best_distance => {
                    best = Some((index, distance));
                    tied = 1;
                }
                Some((_, best_distance)) if distance == best_distance => {
                    tied += 1;
                    let r = self
                        .rng
                        .wrapping_mul(6364136223846793005)
                        .wrapping_add(1442695040888963407);
                    self.rng = r;
                    if (r >> 33) % tied == 0 {
                        best = Some((index, distance));
                    }
                }
                _ => {}
            }
        }
        Ok(best.map(|(index, distance)| Nearest {
            metamorph: &self.metamorphs[index],
            index,
            distance,
        }))
    }

    /// Serialize the whole store: case count, every case, then the
    /// equivalence threshold. Big-endian fixed-width fields throughout.
    pub fn save(&self, w: &mut impl Write) -> Result<()> {
        wire::write_i32(w, self.metamorphs.len() as i32)?;
        for metamorph in &self.metamorphs {
            metamorph.save(w)?;
        }
        wire::write_f32(w, self.equivalence_distance)?;
        Ok(())
    }

    /// Rebuild a store from its serialized form. A zero-case stream is a
    /// successful empty load, distinct from a truncation error.
    pub fn load(r: &mut impl Read) -> Result<Self> {
        let count = wire::read_i32(r)?;
        if count < 0 {
            return Err(morpho_core::MorphoError::malformed(format!(
                "negative case count {}",
                count
            )));
        }
        let mut metamorphs = Vec::with_capacity(count as usize);
        for _ in 0..count {
            metamorphs.push(Metamorph::load(r)?);
        }
        let equivalence_distance = wire::read_f32(r)?;
        Ok(Self {
            metamorphs,
            equivalence_distance,
            rng: DEFAULT_RNG_SEED,
        })
    }

    /// Save to a file at a session boundary.
    pub fn save_file(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.save(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Load from a file written by [`MetamorphStore::save_file`].
    pub fn load_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::load(&mut reader)
    }
}
