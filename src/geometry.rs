//! Per-pixel geometry precomputation
//!
//! Maps every canvas pixel to the lane that owns it, its signed distance
//! down that lane from the arena center, and the band ring it falls in.
//! Pure geometry, independent of game state: computed once per lane-count
//! change (every restart, since the lane count comes from the pattern file)
//! and cached for the rest of the session.

use glam::Vec2;

use crate::consts::{BAND_SIZE, CANVAS_SIZE, INNER_BORDER, LANES_MAX, LANES_MIN};
use crate::lane_direction;

/// Cached per-pixel lane/distance/band tables for a fixed resolution
#[derive(Debug, Clone)]
pub struct GeometryCache {
    lanes: usize,
    width: usize,
    height: usize,
    lane: Vec<usize>,
    dist: Vec<f32>,
    band: Vec<usize>,
}

impl GeometryCache {
    /// Precompute tables for the standard square canvas
    pub fn new(lanes: usize) -> Self {
        Self::with_resolution(lanes, CANVAS_SIZE as usize, CANVAS_SIZE as usize)
    }

    /// Precompute tables for an arbitrary resolution (tests use small ones)
    pub fn with_resolution(lanes: usize, width: usize, height: usize) -> Self {
        assert!(
            (LANES_MIN..=LANES_MAX).contains(&lanes),
            "lane count {lanes} out of bounds"
        );

        let mut lane = Vec::with_capacity(width * height);
        let mut dist = Vec::with_capacity(width * height);
        let mut band = Vec::with_capacity(width * height);

        let center = Vec2::new((width - 1) as f32 / 2.0, (height - 1) as f32 / 2.0);

        for y in 0..height {
            for x in 0..width {
                let d = Vec2::new(x as f32, y as f32) - center;

                // Angle clockwise of straight up, folded into [0, 2pi].
                // Doubling the wedge resolution and shifting by one centers
                // each lane's angular bisector on its own index.
                let theta = d.x.atan2(d.y) + std::f32::consts::PI;
                let wedge = (theta / (std::f32::consts::PI / lanes as f32)) as usize;
                let l = ((wedge + 1) % (2 * lanes)) / 2;
                lane.push(l);

                // Signed distance down the lane from center
                let r = lane_direction(l, lanes).dot(d);
                dist.push(r);

                let b = if r >= INNER_BORDER as f32 {
                    ((r - INNER_BORDER as f32) / BAND_SIZE as f32) as usize
                } else {
                    0
                };
                band.push(b);
            }
        }

        Self {
            lanes,
            width,
            height,
            lane,
            dist,
            band,
        }
    }

    /// Lane count the tables were built for. Restart logic compares this
    /// against the freshly loaded library to decide whether the cache must
    /// be rebuilt.
    pub fn lanes(&self) -> usize {
        self.lanes
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Lane index owning pixel (x, y)
    #[inline]
    pub fn lane_at(&self, x: usize, y: usize) -> usize {
        self.lane[y * self.width + x]
    }

    /// Signed distance of pixel (x, y) down its lane, from center
    #[inline]
    pub fn dist_at(&self, x: usize, y: usize) -> f32 {
        self.dist[y * self.width + x]
    }

    /// Zero-based band ring index of pixel (x, y); 0 inside the border
    #[inline]
    pub fn band_at(&self, x: usize, y: usize) -> usize {
        self.band[y * self.width + x]
    }
}
