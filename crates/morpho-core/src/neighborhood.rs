//! Neighborhood — one spatial/temporal scale of the fingerprint pyramid.
//!
//! A neighborhood is a square footprint centered on the focal cell, tiled
//! into sectors and paired with a temporal duration window. Each tick it
//! is recomputed in full from the shared event log: reset, accumulate,
//! scale. There is no incremental reuse.

use crate::config::EventShape;
use crate::event::EventLog;
use crate::sector::Sector;
use crate::types::Orientation;

/// One scale level: spatial offset, square size, duration, and a
/// near-uniform tiling of sectors covering the square.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighborhood {
    /// Offset of the footprint from the focal cell (both axes).
    pub dx: i32,
    pub dy: i32,
    /// Side of the square footprint, in grid cells.
    pub dimension: usize,
    /// Temporal window, in ticks.
    pub duration: u64,
    /// Sectors per side.
    per_side: usize,
    /// Row-major sector grid, `sectors[sy * per_side + sx]`.
    sectors: Vec<Sector>,
}

impl Neighborhood {
    /// Tile a `dimension`-sized footprint with sectors of side
    /// `sector_dimension`. When the tiles do not divide the footprint
    /// evenly, the remainder is spread by a fractional stride so adjacent
    /// tiles differ by at most one pixel.
    pub fn new(
        offset: i32,
        dimension: usize,
        duration: u64,
        sector_dimension: usize,
        shape: &EventShape,
    ) -> Self {
        let mut per_side = dimension / sector_dimension;
        if per_side * sector_dimension < dimension {
            per_side += 1;
        }
        let f = if per_side > 1 {
            (per_side * sector_dimension - dimension) as f32 / (per_side - 1) as f32
        } else {
            0.0
        };
        let mut sectors = Vec::with_capacity(per_side * per_side);
        for sy in 0..per_side {
            for sx in 0..per_side {
                let sdx = (sx * sector_dimension) as f32 - sx as f32 * f;
                let sdy = (sy * sector_dimension) as f32 - sy as f32 * f;
                sectors.push(Sector::new(
                    sdx as i32,
                    sdy as i32,
                    sector_dimension,
                    shape,
                ));
            }
        }
        Self {
            dx: offset,
            dy: offset,
            dimension,
            duration,
            per_side,
            sectors,
        }
    }

    pub fn per_side(&self) -> usize {
        self.per_side
    }

    pub fn sector(&self, sx: usize, sy: usize) -> &Sector {
        &self.sectors[sy * self.per_side + sx]
    }

    pub fn sector_mut(&mut self, sx: usize, sy: usize) -> &mut Sector {
        &mut self.sectors[sy * self.per_side + sx]
    }

    /// Zero every sector's densities and raw grid.
    pub fn reset(&mut self) {
        for sector in &mut self.sectors {
            sector.reset();
        }
    }

    /// Absolute grid position of a sector's center for a given focal cell.
    fn sector_center(&self, cx: i32, cy: i32, sector: &Sector) -> (i32, i32) {
        let half = (sector.dimension / 2) as i32;
        (
            cx + self.dx + sector.dx + half,
            cy + self.dy + sector.dy + half,
        )
    }

    /// Full recompute from the shared event log: reset all sectors,
    /// accumulate every event inside the duration window into its closest
    /// sector, then scale by the duration.
    pub fn update(&mut self, cx: i32, cy: i32, log: &EventLog) {
        self.reset();

        for event in log.iter() {
            if log.now() - event.time >= self.duration {
                continue;
            }

            // Closest sector by Manhattan distance over sector centers.
            // The candidate is seeded with the center sector and replaced
            // only on a strictly smaller distance, scanning x outer / y
            // inner; ties keep the earlier candidate.
            let mut best = (self.per_side / 2) * self.per_side + self.per_side / 2;
            let (bx, by) = self.sector_center(cx, cy, &self.sectors[best]);
            let mut best_dist = (bx - event.x).abs() + (by - event.y).abs();
            let mut best_center = (bx, by);
            for sx in 0..self.per_side {
                for sy in 0..self.per_side {
                    let index = sy * self.per_side + sx;
                    let (px, py) = self.sector_center(cx, cy, &self.sectors[index]);
                    let dist = (px - event.x).abs() + (py - event.y).abs();
                    if dist < best_dist {
                        best = index;
                        best_dist = dist;
                        best_center = (px, py);
                    }
                }
            }

            let sector = &mut self.sectors[best];
            let half = (sector.dimension / 2) as i32;
            let local_x = event.x - (best_center.0 - half);
            let local_y = event.y - (best_center.1 - half);
            let inside = local_x >= 0
                && (local_x as usize) < sector.dimension
                && local_y >= 0
                && (local_y as usize) < sector.dimension;
            for (d, value) in event.values.iter().enumerate() {
                if let Some(v) = *value {
                    sector.accumulate(d, v);
                    if inside {
                        sector.set_raw(local_x as usize, local_y as usize, d, Some(v));
                    }
                }
            }
        }

        for sector in &mut self.sectors {
            sector.scale(self.duration);
        }
    }

    /// Flattened densities read out in the orientation's rectified order.
    ///
    /// Two neighborhoods captured under different facings become comparable
    /// as if both were captured facing the canonical direction. The
    /// traversal order defines which sector each flattened position refers
    /// to, so it is fixed (see [`Orientation::scan_order`]).
    pub fn rectified_densities(&self, orientation: Orientation, shape: &EventShape) -> Vec<f32> {
        let mut out =
            Vec::with_capacity(self.per_side * self.per_side * shape.bucket_count());
        for (sx, sy) in orientation.scan_order(self.per_side) {
            let sector = self.sector(sx, sy);
            for d in 0..shape.dimensions() {
                out.extend_from_slice(sector.densities(d));
            }
        }
        out
    }

    /// L1 distance between the two neighborhoods' rectified density
    /// vectors. Geometry compatibility has been checked by the caller.
    pub fn compare(
        &self,
        other: &Neighborhood,
        self_orientation: Orientation,
        other_orientation: Orientation,
        shape: &EventShape,
    ) -> f32 {
        let a = self.rectified_densities(self_orientation, shape);
        let b = other.rectified_densities(other_orientation, shape);
        a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EventShape;

    fn shape1() -> EventShape {
        EventShape::new(vec![1]).unwrap()
    }

    #[test]
    fn exact_tiling() {
        let n = Neighborhood::new(-4, 9, 4, 3, &shape1());
        assert_eq!(n.per_side(), 3);
        let offsets: Vec<i32> = (0..3).map(|sx| n.sector(sx, 0).dx).collect();
        assert_eq!(offsets, vec![0, 3, 6]);
    }

    #[test]
    fn fractional_stride_tiling() {
        // 5 cells over tiles of 2: three tiles, one remainder pixel spread
        // by a stride of 0.5.
        let n = Neighborhood::new(-2, 5, 1, 2, &shape1());
        assert_eq!(n.per_side(), 3);
        let offsets: Vec<i32> = (0..3).map(|sx| n.sector(sx, 0).dx).collect();
        assert_eq!(offsets, vec![0, 1, 3]);
    }

    #[test]
    fn accumulates_focal_event_into_center_sector() {
        let shape = shape1();
        let mut n = Neighborhood::new(-1, 3, 1, 1, &shape);
        let mut log = EventLog::new();
        log.record(vec![Some(5)], 10, 10);
        n.update(10, 10, &log);
        assert_eq!(n.sector(1, 1).density(0, 0), 5.0);
        assert_eq!(n.sector(1, 1).raw(0, 0, 0), Some(5));
        assert_eq!(n.sector(0, 0).density(0, 0), 0.0);
    }

    #[test]
    fn stale_events_are_ignored() {
        let shape = shape1();
        let mut n = Neighborhood::new(-1, 3, 1, 1, &shape);
        let mut log = EventLog::new();
        log.record(vec![Some(5)], 10, 10);
        log.advance();
        // Age 1 is outside a duration-1 window.
        n.update(10, 10, &log);
        assert_eq!(n.sector(1, 1).density(0, 0), 0.0);
    }

    #[test]
    fn off_center_event_lands_in_nearest_sector() {
        let shape = EventShape::new(vec![4]).unwrap();
        let mut n = Neighborhood::new(-1, 3, 1, 1, &shape);
        let mut log = EventLog::new();
        log.record(vec![Some(2)], 11, 10);
        n.update(10, 10, &log);
        // One cell east of focus: sector (2, 1).
        assert_eq!(n.sector(2, 1).densities(0), &[0.0, 0.0, 1.0, 0.0]);
        assert_eq!(n.sector(1, 1).densities(0), &[0.0; 4]);
    }

    #[test]
    fn scaling_divides_by_duration() {
        let shape = shape1();
        let mut n = Neighborhood::new(-4, 9, 4, 3, &shape);
        let mut log = EventLog::new();
        log.record(vec![Some(5)], 10, 10);
        n.update(10, 10, &log);
        assert_eq!(n.sector(1, 1).density(0, 0), 1.25);
    }
}
