//! Binary persistence for fingerprints.
//!
//! Fixed-width big-endian fields in declared order, no padding, no length
//! prefixes beyond the counts implied by geometry:
//!
//! ```text
//! i32  num_neighborhoods, base_dimension, dimension_stride,
//!      dimension_multiplier, interval_stride, interval_multiplier
//! i32  orientation, grid_width, grid_height
//! i32  event_dimensions
//! i32  cardinality[event_dimensions]
//! f32  density, for each neighborhood / sector (x outer, y inner) /
//!      dimension / type
//! i32  raw value (-1 = absent), for each neighborhood / sector /
//!      dimension / x / y
//! ```
//!
//! A truncated or malformed stream is a [`DataError`](crate::error::DataError),
//! surfaced distinctly from any successful load.

use crate::config::{EventShape, FingerprintConfig};
use crate::error::{MorphoError, Result};
use crate::fingerprint::Morphognostic;
use crate::types::Orientation;
use std::io::{Read, Write};

fn eof_to_truncated(e: std::io::Error) -> MorphoError {
    if e.kind() == std::io::ErrorKind::UnexpectedEof {
        MorphoError::truncated()
    } else {
        MorphoError::Io(e.to_string())
    }
}

pub fn write_i32(w: &mut impl Write, v: i32) -> Result<()> {
    w.write_all(&v.to_be_bytes())?;
    Ok(())
}

pub fn write_f32(w: &mut impl Write, v: f32) -> Result<()> {
    w.write_all(&v.to_be_bytes())?;
    Ok(())
}

pub fn read_i32(r: &mut impl Read) -> Result<i32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf).map_err(eof_to_truncated)?;
    Ok(i32::from_be_bytes(buf))
}

pub fn read_f32(r: &mut impl Read) -> Result<f32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf).map_err(eof_to_truncated)?;
    Ok(f32::from_be_bytes(buf))
}

/// Length-prefixed UTF-8 string.
pub fn write_string(w: &mut impl Write, s: &str) -> Result<()> {
    write_i32(w, s.len() as i32)?;
    w.write_all(s.as_bytes())?;
    Ok(())
}

pub fn read_string(r: &mut impl Read) -> Result<String> {
    let len = read_i32(r)?;
    if len < 0 {
        return Err(MorphoError::malformed(format!(
            "negative string length {}",
            len
        )));
    }
    let mut buf = vec![0u8; len as usize];
    r.read_exact(&mut buf).map_err(eof_to_truncated)?;
    String::from_utf8(buf).map_err(|e| MorphoError::malformed(e.to_string()))
}

fn read_count(r: &mut impl Read, field: &str) -> Result<usize> {
    let v = read_i32(r)?;
    if v < 0 {
        return Err(MorphoError::malformed(format!("negative {}: {}", field, v)));
    }
    Ok(v as usize)
}

// No writer produces shapes anywhere near these; counts beyond them mark a
// corrupt stream and must fail before any allocation sized by them.
const MAX_EVENT_DIMENSIONS: usize = 4096;
const MAX_TYPE_CARDINALITY: usize = 1 << 16;

fn read_bounded_count(r: &mut impl Read, field: &str, max: usize) -> Result<usize> {
    let v = read_count(r, field)?;
    if v > max {
        return Err(MorphoError::malformed(format!(
            "{} {} exceeds limit {}",
            field, v, max
        )));
    }
    Ok(v)
}

impl Morphognostic {
    /// Serialize geometry, densities, and raw grids. The event log and
    /// clock are transient and not persisted.
    pub fn save(&self, w: &mut impl Write) -> Result<()> {
        let config = self.config();
        write_i32(w, config.num_neighborhoods as i32)?;
        write_i32(w, config.base_dimension as i32)?;
        write_i32(w, config.dimension_stride as i32)?;
        write_i32(w, config.dimension_multiplier as i32)?;
        write_i32(w, config.interval_stride as i32)?;
        write_i32(w, config.interval_multiplier as i32)?;
        write_i32(w, self.orientation().index())?;
        write_i32(w, self.grid_width() as i32)?;
        write_i32(w, self.grid_height() as i32)?;
        write_i32(w, self.shape().dimensions() as i32)?;
        for &cardinality in self.shape().cardinalities() {
            write_i32(w, cardinality as i32)?;
        }

        for neighborhood in self.neighborhoods() {
            let n = neighborhood.per_side();
            for sx in 0..n {
                for sy in 0..n {
                    let sector = neighborhood.sector(sx, sy);
                    for d in 0..self.shape().dimensions() {
                        for t in 0..self.shape().cardinality(d) {
                            write_f32(w, sector.density(d, t))?;
                        }
                    }
                }
            }
        }

        for neighborhood in self.neighborhoods() {
            let n = neighborhood.per_side();
            for sx in 0..n {
                for sy in 0..n {
                    let sector = neighborhood.sector(sx, sy);
                    for d in 0..self.shape().dimensions() {
                        for x in 0..sector.dimension {
                            for y in 0..sector.dimension {
                                write_i32(w, sector.raw(x, y, d).unwrap_or(-1))?;
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Rebuild a fingerprint from its serialized form.
    pub fn load(r: &mut impl Read) -> Result<Self> {
        let config = FingerprintConfig {
            num_neighborhoods: read_count(r, "num_neighborhoods")?,
            base_dimension: read_count(r, "base_dimension")?,
            dimension_stride: read_count(r, "dimension_stride")?,
            dimension_multiplier: read_count(r, "dimension_multiplier")?,
            interval_stride: read_count(r, "interval_stride")? as u64,
            interval_multiplier: read_count(r, "interval_multiplier")? as u64,
        };
        let orientation_index = read_i32(r)?;
        let orientation = Orientation::from_index(orientation_index).ok_or_else(|| {
            MorphoError::malformed(format!("invalid orientation {}", orientation_index))
        })?;
        let grid_width = read_count(r, "grid_width")?;
        let grid_height = read_count(r, "grid_height")?;
        let event_dimensions = read_bounded_count(r, "event_dimensions", MAX_EVENT_DIMENSIONS)?;
        let mut cardinalities = Vec::with_capacity(event_dimensions);
        for _ in 0..event_dimensions {
            cardinalities.push(read_bounded_count(r, "cardinality", MAX_TYPE_CARDINALITY)?);
        }
        let shape = EventShape::new(cardinalities)
            .map_err(|e| MorphoError::malformed(format!("invalid event shape: {}", e)))?;
        let mut fingerprint =
            Morphognostic::new(orientation, shape, grid_width, grid_height, config)
                .map_err(|e| MorphoError::malformed(format!("invalid geometry: {}", e)))?;

        let dimensions = fingerprint.shape().dimensions();
        let cardinalities: Vec<usize> = fingerprint.shape().cardinalities().to_vec();

        for neighborhood in fingerprint.neighborhoods_mut() {
            let n = neighborhood.per_side();
            for sx in 0..n {
                for sy in 0..n {
                    let sector = neighborhood.sector_mut(sx, sy);
                    for d in 0..dimensions {
                        for t in 0..cardinalities[d] {
                            sector.set_density(d, t, read_f32(r)?);
                        }
                    }
                }
            }
        }

        for neighborhood in fingerprint.neighborhoods_mut() {
            let n = neighborhood.per_side();
            for sx in 0..n {
                for sy in 0..n {
                    let sector = neighborhood.sector_mut(sx, sy);
                    for d in 0..dimensions {
                        for x in 0..sector.dimension {
                            for y in 0..sector.dimension {
                                let v = read_i32(r)?;
                                sector.set_raw(x, y, d, if v == -1 { None } else { Some(v) });
                            }
                        }
                    }
                }
            }
        }
        Ok(fingerprint)
    }
}
