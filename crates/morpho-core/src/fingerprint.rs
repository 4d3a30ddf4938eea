//! Morphognostic fingerprint — an ordered pyramid of neighborhoods
//! sharing one event log.
//!
//! Levels are nested by increasing spatial size and receding temporal
//! distance from the present: each level's tiling granularity is the
//! previous level's full dimension. Geometry is immutable after
//! construction; only densities and the event log mutate.

use crate::config::{EventShape, FingerprintConfig};
use crate::error::{GeometryError, MorphoError, Result};
use crate::event::EventLog;
use crate::neighborhood::Neighborhood;
use crate::types::{EventValue, Orientation, Tick};

/// One observation destined for the current tick.
#[derive(Debug, Clone)]
pub struct Observation {
    pub values: Vec<EventValue>,
    pub x: i32,
    pub y: i32,
}

/// Multi-resolution spatiotemporal signature of recent activity around a
/// focal point.
#[derive(Debug, Clone)]
pub struct Morphognostic {
    config: FingerprintConfig,
    shape: EventShape,
    orientation: Orientation,
    grid_width: usize,
    grid_height: usize,
    neighborhoods: Vec<Neighborhood>,
    log: EventLog,
    max_event_age: Tick,
}

impl Morphognostic {
    /// Build a fingerprint with fixed geometry. Fails fast on any invalid
    /// parameter; nothing is substituted.
    pub fn new(
        orientation: Orientation,
        shape: EventShape,
        grid_width: usize,
        grid_height: usize,
        config: FingerprintConfig,
    ) -> Result<Self> {
        config.validate()?;
        if grid_width < 1 {
            return Err(MorphoError::non_positive("grid_width", grid_width as i64));
        }
        if grid_height < 1 {
            return Err(MorphoError::non_positive("grid_height", grid_height as i64));
        }
        let neighborhoods = config
            .levels()
            .into_iter()
            .map(|level| {
                Neighborhood::new(
                    level.offset,
                    level.dimension,
                    level.duration,
                    level.sector_dimension,
                    &shape,
                )
            })
            .collect();
        Ok(Self {
            config,
            shape,
            orientation,
            grid_width,
            grid_height,
            neighborhoods,
            log: EventLog::new(),
            max_event_age: config.max_event_age(),
        })
    }

    pub fn config(&self) -> &FingerprintConfig {
        &self.config
    }

    pub fn shape(&self) -> &EventShape {
        &self.shape
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The owning agent turned to face a new cardinal direction.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn grid_width(&self) -> usize {
        self.grid_width
    }

    pub fn grid_height(&self) -> usize {
        self.grid_height
    }

    pub fn neighborhoods(&self) -> &[Neighborhood] {
        &self.neighborhoods
    }

    pub(crate) fn neighborhoods_mut(&mut self) -> &mut [Neighborhood] {
        &mut self.neighborhoods
    }

    /// Current event-time tick.
    pub fn event_time(&self) -> Tick {
        self.log.now()
    }

    pub fn event_log(&self) -> &EventLog {
        &self.log
    }

    /// Oldest event age any level can still see.
    pub fn max_event_age(&self) -> Tick {
        self.max_event_age
    }

    fn check_observation(&self, values: &[EventValue]) -> Result<()> {
        if values.len() != self.shape.dimensions() {
            return Err(MorphoError::Geometry(GeometryError::ObservationLength {
                expected: self.shape.dimensions(),
                found: values.len(),
            }));
        }
        for (d, value) in values.iter().enumerate() {
            if let Some(v) = *value {
                let cardinality = self.shape.cardinality(d);
                // Negative values are rejected even for scalar dimensions:
                // the raw grid persists -1 as the absent marker, so a stored
                // -1 would not survive a round trip.
                if v < 0 || (cardinality > 1 && v as usize >= cardinality) {
                    return Err(MorphoError::Data(crate::error::DataError::TypeOutOfRange {
                        dimension: d,
                        value: v,
                        cardinality,
                    }));
                }
            }
        }
        Ok(())
    }

    /// One simulation tick: append the observation, evict stale events,
    /// recompute every level from smallest to largest, advance the clock.
    pub fn update(&mut self, values: &[EventValue], x: i32, y: i32) -> Result<()> {
        self.check_observation(values)?;
        self.log.record(values.to_vec(), x, y);
        self.recompute(x, y);
        Ok(())
    }

    /// One tick carrying several observations (multiple reporting agents).
    /// All observations share the tick's timestamp, which is how a sector
    /// density can accumulate past 1.0.
    pub fn update_batch(
        &mut self,
        observations: &[Observation],
        focal_x: i32,
        focal_y: i32,
    ) -> Result<()> {
        for observation in observations {
            self.check_observation(&observation.values)?;
        }
        for observation in observations {
            self.log
                .record(observation.values.clone(), observation.x, observation.y);
        }
        self.recompute(focal_x, focal_y);
        Ok(())
    }

    /// Evict stale events, rebuild every level from the log, advance the
    /// clock.
    fn recompute(&mut self, focal_x: i32, focal_y: i32) {
        self.log.evict(self.max_event_age);
        for neighborhood in &mut self.neighborhoods {
            neighborhood.update(focal_x, focal_y, &self.log);
        }
        self.log.advance();
    }

    fn check_geometry(&self, other: &Morphognostic) -> Result<()> {
        if self.neighborhoods.len() != other.neighborhoods.len() {
            return Err(MorphoError::Geometry(GeometryError::NeighborhoodCount {
                left: self.neighborhoods.len(),
                right: other.neighborhoods.len(),
            }));
        }
        for (level, (a, b)) in self
            .neighborhoods
            .iter()
            .zip(other.neighborhoods.iter())
            .enumerate()
        {
            if a.dimension != b.dimension {
                return Err(MorphoError::Geometry(GeometryError::LevelDimension {
                    level,
                    left: a.dimension,
                    right: b.dimension,
                }));
            }
            if a.duration != b.duration {
                return Err(MorphoError::Geometry(GeometryError::LevelDuration {
                    level,
                    left: a.duration,
                    right: b.duration,
                }));
            }
        }
        if self.shape.dimensions() != other.shape.dimensions() {
            return Err(MorphoError::Geometry(GeometryError::EventDimensions {
                left: self.shape.dimensions(),
                right: other.shape.dimensions(),
            }));
        }
        for (dimension, (&a, &b)) in self
            .shape
            .cardinalities()
            .iter()
            .zip(other.shape.cardinalities().iter())
            .enumerate()
        {
            if a != b {
                return Err(MorphoError::Geometry(GeometryError::TypeCardinality {
                    dimension,
                    left: a,
                    right: b,
                }));
            }
        }
        Ok(())
    }

    /// Distance between two same-geometry fingerprints: the sum of
    /// per-level L1 distances over rectified densities. Mismatched
    /// geometry is an error, never a silently wrong number.
    pub fn compare(&self, other: &Morphognostic) -> Result<f32> {
        self.check_geometry(other)?;
        Ok(self
            .neighborhoods
            .iter()
            .zip(other.neighborhoods.iter())
            .map(|(a, b)| a.compare(b, self.orientation, other.orientation, &self.shape))
            .sum())
    }

    /// The full orientation-normalized feature vector: every level's
    /// rectified densities, concatenated smallest level first.
    pub fn rectified_densities(&self) -> Vec<f32> {
        let mut out = Vec::new();
        for neighborhood in &self.neighborhoods {
            out.extend(neighborhood.rectified_densities(self.orientation, &self.shape));
        }
        out
    }

    /// Zero every sector across every level and empty the event log.
    /// Geometry and the event-time counter are untouched.
    pub fn clear(&mut self) {
        for neighborhood in &mut self.neighborhoods {
            neighborhood.reset();
        }
        self.log.clear();
    }
}
