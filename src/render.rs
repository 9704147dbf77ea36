//! Per-pixel render projection
//!
//! Derives a color for every canvas pixel from the precomputed geometry and
//! the current game state. Pure: the same state and elapsed time always
//! produce the same frame, so the caller may sample at any rate. After a
//! death the caller keeps passing the frozen state and draws its own overlay
//! text on top; fonts are outside this crate.

use crate::consts::{ANIM_PER_SEC, BAND_SIZE, BAND_THICKNESS, INNER_BORDER, INNER_SPREAD};
use crate::geometry::GeometryCache;
use crate::patterns::CellKind;
use crate::sim::GameState;

/// RGBA8888 palette
pub const DARK_RED: u32 = 0x4712_05FF;
pub const MEDIUM_RED: u32 = 0x6A1A_07FF;
pub const LIGHT_RED: u32 = 0xC116_1EFF;
pub const VERY_LIGHT_RED: u32 = 0xFF77_80FF;
pub const LIGHT_GREEN: u32 = 0x1FC1_16FF;

fn band_color(kind: CellKind) -> u32 {
    match kind {
        CellKind::Hurdle => LIGHT_GREEN,
        _ => LIGHT_RED,
    }
}

/// Color of pixel (x, y) for the current frame.
///
/// `elapsed_since_advance` is wall-clock seconds since the last advance,
/// owned and updated by the frame loop. It drives the sliding reveal: a
/// band's leading edge sweeps inward over `BAND_SIZE / ANIM_PER_SEC`
/// seconds, so obstacles slide toward the player instead of snapping.
pub fn color_at(
    state: &GameState,
    geom: &GeometryCache,
    x: usize,
    y: usize,
    elapsed_since_advance: f32,
) -> u32 {
    let lane = geom.lane_at(x, y);
    let dist = geom.dist_at(x, y);

    // Base checkerboard by lane parity
    let mut color = if lane % 2 == 1 { DARK_RED } else { MEDIUM_RED };

    if dist < INNER_SPREAD as f32 {
        return DARK_RED;
    }
    if dist < INNER_BORDER as f32 {
        return LIGHT_RED;
    }

    let band = geom.band_at(x, y);
    let in_band_dist = (dist - INNER_BORDER as f32) - (BAND_SIZE * band as u32) as f32;

    let tween = (BAND_SIZE as f32 - (ANIM_PER_SEC * elapsed_since_advance).round()).max(0.0);

    // A band fresh off an advance still spills into the next ring out, so
    // each pixel checks its own ring and the one just inside it.
    for dband in 0..=1i64 {
        let kind = state.incoming(lane, band as i64 - dband);
        if kind == CellKind::Empty {
            continue;
        }

        // Merge with the neighbor band when it carries the same obstacle
        let thickness = if state.incoming(lane, band as i64 + 1 - dband) == kind {
            BAND_SIZE as f32
        } else {
            BAND_THICKNESS as f32
        };

        let d = in_band_dist + (dband as f32) * BAND_SIZE as f32;
        if d >= tween && d < thickness + tween {
            color = band_color(kind);
        }
    }

    // Highlight the player's position on the innermost ring of their lane
    if lane == state.player_lane()
        && band == 0
        && in_band_dist >= (BAND_SIZE - BAND_THICKNESS) as f32
    {
        color = VERY_LIGHT_RED;
    }

    color
}

/// Fill a whole RGBA frame. `frame` must hold `width * height` pixels of
/// the geometry's resolution.
pub fn render_frame(
    state: &GameState,
    geom: &GeometryCache,
    elapsed_since_advance: f32,
    frame: &mut [u32],
) {
    assert_eq!(frame.len(), geom.width() * geom.height());
    for y in 0..geom.height() {
        for x in 0..geom.width() {
            frame[y * geom.width() + x] = color_at(state, geom, x, y, elapsed_since_advance);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::LevelTimeline;

    // 401x401 canvas centered at (200, 200); walking up the x=200 column is
    // walking out lane 0's bisector, one pixel per distance unit.
    const CX: usize = 200;
    const CY: usize = 200;

    fn geom() -> GeometryCache {
        GeometryCache::with_resolution(4, 401, 401)
    }

    fn at_dist(d: usize) -> (usize, usize) {
        (CX, CY - d)
    }

    /// Long after an advance the reveal sweep has finished
    const SETTLED: f32 = 1.0;

    #[test]
    fn test_inner_disc_and_border() {
        let state = GameState::with_timeline(LevelTimeline::empty(4));
        let geom = geom();

        let (x, y) = at_dist(0);
        assert_eq!(color_at(&state, &geom, x, y, SETTLED), DARK_RED);
        let (x, y) = at_dist(INNER_SPREAD as usize + 4);
        assert_eq!(color_at(&state, &geom, x, y, SETTLED), LIGHT_RED);
    }

    #[test]
    fn test_player_highlight_on_innermost_ring() {
        let state = GameState::with_timeline(LevelTimeline::empty(4));
        let geom = geom();

        // Outer half of band 0 in the player's lane
        let (x, y) = at_dist((INNER_BORDER + BAND_SIZE - 10) as usize);
        assert_eq!(color_at(&state, &geom, x, y, SETTLED), VERY_LIGHT_RED);
        // Inner half is not highlighted
        let (x, y) = at_dist((INNER_BORDER + 8) as usize);
        assert_ne!(color_at(&state, &geom, x, y, SETTLED), VERY_LIGHT_RED);
    }

    #[test]
    fn test_settled_band_paints_inner_stripe() {
        let mut timeline = LevelTimeline::empty(4);
        timeline.set(0, 2, CellKind::Wall);
        let state = GameState::with_timeline(timeline);
        let geom = geom();

        // Band 2 spans dist [112, 144); the lone stripe is its inner half
        let (x, y) = at_dist((INNER_BORDER + 2 * BAND_SIZE + 8) as usize);
        assert_eq!(color_at(&state, &geom, x, y, SETTLED), LIGHT_RED);
        // Outer half stays checkerboard (lane 0 is even: medium)
        let (x, y) = at_dist((INNER_BORDER + 2 * BAND_SIZE + 24) as usize);
        assert_eq!(color_at(&state, &geom, x, y, SETTLED), MEDIUM_RED);
    }

    #[test]
    fn test_hurdle_band_is_green() {
        let mut timeline = LevelTimeline::empty(4);
        timeline.set(0, 2, CellKind::Hurdle);
        let state = GameState::with_timeline(timeline);
        let geom = geom();

        let (x, y) = at_dist((INNER_BORDER + 2 * BAND_SIZE + 8) as usize);
        assert_eq!(color_at(&state, &geom, x, y, SETTLED), LIGHT_GREEN);
    }

    #[test]
    fn test_adjacent_same_kind_bands_merge() {
        let mut timeline = LevelTimeline::empty(4);
        timeline.set(0, 2, CellKind::Wall);
        timeline.set(0, 3, CellKind::Wall);
        let state = GameState::with_timeline(timeline);
        let geom = geom();

        // With the neighbor band matching, band 2 is painted full width
        let (x, y) = at_dist((INNER_BORDER + 2 * BAND_SIZE + 24) as usize);
        assert_eq!(color_at(&state, &geom, x, y, SETTLED), LIGHT_RED);
    }

    #[test]
    fn test_band_slides_in_after_advance() {
        let mut timeline = LevelTimeline::empty(4);
        timeline.set(0, 1, CellKind::Wall);
        let state = GameState::with_timeline(timeline);
        let geom = geom();

        let in_band_1 = at_dist((INNER_BORDER + BAND_SIZE + 8) as usize);
        let in_band_2 = at_dist((INNER_BORDER + 2 * BAND_SIZE + 8) as usize);

        // Immediately after an advance the stripe still sits one ring out
        assert_eq!(color_at(&state, &geom, in_band_2.0, in_band_2.1, 0.0), LIGHT_RED);
        assert_ne!(color_at(&state, &geom, in_band_1.0, in_band_1.1, 0.0), LIGHT_RED);

        // Once the sweep finishes it has arrived in its own ring
        assert_eq!(
            color_at(&state, &geom, in_band_1.0, in_band_1.1, SETTLED),
            LIGHT_RED
        );
        assert_ne!(
            color_at(&state, &geom, in_band_2.0, in_band_2.1, SETTLED),
            LIGHT_RED
        );
    }

    #[test]
    fn test_render_frame_fills_buffer() {
        let state = GameState::with_timeline(LevelTimeline::empty(4));
        let geom = GeometryCache::with_resolution(4, 64, 64);
        let mut frame = vec![0u32; 64 * 64];
        render_frame(&state, &geom, SETTLED, &mut frame);
        assert!(frame.iter().all(|&px| px != 0));
    }
}
