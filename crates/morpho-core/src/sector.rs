//! Sector — one tile of a neighborhood.
//!
//! A sector accumulates, per event dimension, the density of observed
//! types during its neighborhood's duration window, and keeps a raw
//! snapshot of the values that fell inside its own pixel footprint. The
//! raw grid is introspection-only; comparison reads densities alone.

use crate::config::EventShape;
use crate::types::EventValue;

/// A tile of a neighborhood, holding per-dimension type-density
/// accumulators and a raw event-value grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Sector {
    /// Offset of this tile from the neighborhood origin, in grid cells.
    pub dx: i32,
    pub dy: i32,
    /// Side of the tile, in grid cells.
    pub dimension: usize,
    /// `densities[d][t]` — time-normalized accumulation for type `t` of
    /// event dimension `d`. Never clamped: simultaneous events can push a
    /// bucket past 1.0.
    densities: Vec<Vec<f32>>,
    /// Raw observed values, `[x][y][d]` flattened. `None` = absent.
    raw: Vec<EventValue>,
    raw_dims: usize,
}

impl Sector {
    pub fn new(dx: i32, dy: i32, dimension: usize, shape: &EventShape) -> Self {
        let densities = shape
            .cardinalities()
            .iter()
            .map(|&c| vec![0.0; c])
            .collect();
        Self {
            dx,
            dy,
            dimension,
            densities,
            raw: vec![None; dimension * dimension * shape.dimensions()],
            raw_dims: shape.dimensions(),
        }
    }

    /// Zero every density bucket and mark every raw cell absent.
    pub fn reset(&mut self) {
        for buckets in &mut self.densities {
            for bucket in buckets.iter_mut() {
                *bucket = 0.0;
            }
        }
        for cell in &mut self.raw {
            *cell = None;
        }
    }

    /// Fold one observed value into dimension `d`. Cardinality-1 dimensions
    /// are scalar accumulators: the raw value itself is added to bucket 0.
    /// Otherwise the bucket for the observed type is incremented.
    ///
    /// Callers have already checked `value` against the cardinality.
    pub fn accumulate(&mut self, d: usize, value: i32) {
        let buckets = &mut self.densities[d];
        if buckets.len() == 1 {
            buckets[0] += value as f32;
        } else {
            buckets[value as usize] += 1.0;
        }
    }

    /// Divide every bucket by the neighborhood duration.
    pub fn scale(&mut self, duration: u64) {
        for buckets in &mut self.densities {
            for bucket in buckets.iter_mut() {
                *bucket /= duration as f32;
            }
        }
    }

    pub fn density(&self, d: usize, t: usize) -> f32 {
        self.densities[d][t]
    }

    pub fn set_density(&mut self, d: usize, t: usize, density: f32) {
        self.densities[d][t] = density;
    }

    /// Densities of one dimension, by type.
    pub fn densities(&self, d: usize) -> &[f32] {
        &self.densities[d]
    }

    fn raw_index(&self, x: usize, y: usize, d: usize) -> usize {
        (x * self.dimension + y) * self.raw_dims + d
    }

    /// Raw observed value at tile-local cell `(x, y)` for dimension `d`.
    pub fn raw(&self, x: usize, y: usize, d: usize) -> EventValue {
        self.raw[self.raw_index(x, y, d)]
    }

    pub fn set_raw(&mut self, x: usize, y: usize, d: usize, value: EventValue) {
        let i = self.raw_index(x, y, d);
        self.raw[i] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_dimension_accumulates_values() {
        let shape = EventShape::new(vec![1]).unwrap();
        let mut s = Sector::new(0, 0, 1, &shape);
        s.accumulate(0, 5);
        s.accumulate(0, 2);
        assert_eq!(s.density(0, 0), 7.0);
        s.scale(2);
        assert_eq!(s.density(0, 0), 3.5);
    }

    #[test]
    fn categorical_dimension_counts_types() {
        let shape = EventShape::new(vec![3]).unwrap();
        let mut s = Sector::new(0, 0, 1, &shape);
        s.accumulate(0, 2);
        s.accumulate(0, 2);
        s.accumulate(0, 0);
        assert_eq!(s.densities(0), &[1.0, 0.0, 2.0]);
    }

    #[test]
    fn reset_clears_densities_and_raw() {
        let shape = EventShape::new(vec![1, 2]).unwrap();
        let mut s = Sector::new(0, 0, 2, &shape);
        s.accumulate(0, 4);
        s.set_raw(1, 0, 1, Some(1));
        s.reset();
        assert_eq!(s.density(0, 0), 0.0);
        assert_eq!(s.raw(1, 0, 1), None);
    }
}
