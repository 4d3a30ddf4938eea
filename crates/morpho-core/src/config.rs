//! Fingerprint geometry configuration.
//!
//! The original system kept these as global mutable defaults; here they are
//! an explicit value handed to the constructor, with named constants only
//! documenting the defaults. Geometry is fixed for the lifetime of a
//! fingerprint — only densities and the event log mutate after
//! construction.

use crate::error::{ConfigError, MorphoError, Result};
use serde::{Deserialize, Serialize};

/// Default number of pyramid levels.
pub const DEFAULT_NUM_NEIGHBORHOODS: usize = 2;
/// Default level-0 spatial dimension.
pub const DEFAULT_BASE_DIMENSION: usize = 3;
/// Default additive term of the dimension schedule.
pub const DEFAULT_DIMENSION_STRIDE: usize = 0;
/// Default multiplicative term of the dimension schedule.
pub const DEFAULT_DIMENSION_MULTIPLIER: usize = 3;
/// Default additive term of the duration schedule (also the level-0 duration).
pub const DEFAULT_INTERVAL_STRIDE: u64 = 1;
/// Default multiplicative term of the duration schedule.
pub const DEFAULT_INTERVAL_MULTIPLIER: u64 = 3;

/// Largest level dimension [`FingerprintConfig::validate`] accepts. The
/// schedule grows geometrically, so a handful of levels can request more
/// sector storage than any grid could justify; untrusted persisted
/// geometry must fail cleanly before allocation.
pub const MAX_LEVEL_DIMENSION: usize = 1 << 12;

/// Geometry parameters of a fingerprint pyramid.
///
/// Level 0 has dimension `base_dimension` and duration `interval_stride`;
/// level i+1 has dimension `d_i * dimension_multiplier + dimension_stride`
/// and duration `t_i * interval_multiplier + interval_stride`. Each level
/// is tiled into sectors whose side is the previous level's full dimension
/// (level 0 tiles are single pixels), producing a nested pyramid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintConfig {
    pub num_neighborhoods: usize,
    pub base_dimension: usize,
    pub dimension_stride: usize,
    pub dimension_multiplier: usize,
    pub interval_stride: u64,
    pub interval_multiplier: u64,
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            num_neighborhoods: DEFAULT_NUM_NEIGHBORHOODS,
            base_dimension: DEFAULT_BASE_DIMENSION,
            dimension_stride: DEFAULT_DIMENSION_STRIDE,
            dimension_multiplier: DEFAULT_DIMENSION_MULTIPLIER,
            interval_stride: DEFAULT_INTERVAL_STRIDE,
            interval_multiplier: DEFAULT_INTERVAL_MULTIPLIER,
        }
    }
}

impl FingerprintConfig {
    /// Check the parameters; invalid geometry fails fast with no default
    /// substitution.
    pub fn validate(&self) -> Result<()> {
        if self.num_neighborhoods < 1 {
            return Err(MorphoError::non_positive(
                "num_neighborhoods",
                self.num_neighborhoods as i64,
            ));
        }
        if self.base_dimension < 1 {
            return Err(MorphoError::non_positive(
                "base_dimension",
                self.base_dimension as i64,
            ));
        }
        if self.dimension_multiplier < 1 {
            return Err(MorphoError::non_positive(
                "dimension_multiplier",
                self.dimension_multiplier as i64,
            ));
        }
        if self.interval_stride < 1 {
            return Err(MorphoError::non_positive(
                "interval_stride",
                self.interval_stride as i64,
            ));
        }
        if self.interval_multiplier < 1 {
            return Err(MorphoError::non_positive(
                "interval_multiplier",
                self.interval_multiplier as i64,
            ));
        }
        // Walk the full schedule with checked arithmetic so that geometry
        // read from a persisted stream cannot overflow or demand absurd
        // allocations in levels().
        let mut dimension = self.base_dimension;
        let mut duration = self.interval_stride;
        for level in 0..self.num_neighborhoods {
            if dimension > MAX_LEVEL_DIMENSION {
                return Err(MorphoError::Config(ConfigError::LevelTooLarge {
                    level,
                    dimension,
                }));
            }
            if level + 1 < self.num_neighborhoods {
                dimension = dimension
                    .checked_mul(self.dimension_multiplier)
                    .and_then(|d| d.checked_add(self.dimension_stride))
                    .ok_or(MorphoError::Config(ConfigError::ScheduleOverflow {
                        level: level + 1,
                    }))?;
                duration = duration
                    .checked_mul(self.interval_multiplier)
                    .and_then(|t| t.checked_add(self.interval_stride))
                    .ok_or(MorphoError::Config(ConfigError::ScheduleOverflow {
                        level: level + 1,
                    }))?;
            }
        }
        Ok(())
    }

    /// Derived per-level geometry, smallest level first.
    pub fn levels(&self) -> Vec<LevelSpec> {
        let mut levels = Vec::with_capacity(self.num_neighborhoods);
        let mut dimension = self.base_dimension;
        let mut sector_dimension = 1;
        let mut duration = self.interval_stride;
        for _ in 0..self.num_neighborhoods {
            levels.push(LevelSpec {
                dimension,
                duration,
                sector_dimension,
                offset: -((dimension / 2) as i32),
            });
            sector_dimension = dimension;
            dimension = dimension * self.dimension_multiplier + self.dimension_stride;
            duration = duration * self.interval_multiplier + self.interval_stride;
        }
        levels
    }

    /// Oldest event age the outermost level can still see: its duration − 1.
    pub fn max_event_age(&self) -> u64 {
        self.levels().last().map(|l| l.duration - 1).unwrap_or(0)
    }
}

/// Geometry of one pyramid level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSpec {
    /// Side of the square footprint, in grid cells.
    pub dimension: usize,
    /// Temporal window, in ticks.
    pub duration: u64,
    /// Side of one sector tile.
    pub sector_dimension: usize,
    /// Spatial offset of the footprint from the focal cell (kept centered).
    pub offset: i32,
}

/// Per-dimension type cardinalities of the observation vector.
///
/// A cardinality of 1 marks a scalar-accumulator dimension: observed values
/// are summed into a single bucket instead of counted per type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventShape {
    cardinalities: Vec<usize>,
}

impl EventShape {
    pub fn new(cardinalities: Vec<usize>) -> Result<Self> {
        if cardinalities.is_empty() {
            return Err(MorphoError::Config(ConfigError::EmptyShape));
        }
        for (dimension, &cardinality) in cardinalities.iter().enumerate() {
            if cardinality < 1 {
                return Err(MorphoError::Config(ConfigError::ZeroCardinality {
                    dimension,
                }));
            }
        }
        Ok(Self { cardinalities })
    }

    /// Shape with `dimensions` scalar-accumulator dimensions.
    pub fn scalar(dimensions: usize) -> Result<Self> {
        Self::new(vec![1; dimensions])
    }

    /// Number of event dimensions.
    pub fn dimensions(&self) -> usize {
        self.cardinalities.len()
    }

    /// Type cardinality of one dimension.
    pub fn cardinality(&self, dimension: usize) -> usize {
        self.cardinalities[dimension]
    }

    pub fn cardinalities(&self) -> &[usize] {
        &self.cardinalities
    }

    /// Total density buckets per sector.
    pub fn bucket_count(&self) -> usize {
        self.cardinalities.iter().sum()
    }
}
