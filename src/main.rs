//! Hexbeat entry point
//!
//! Headless demo harness: loads the pattern file, autoplays the generated
//! level with the action each beat calls for, and renders every frame on
//! the CPU. A windowed presentation layer would drive the same library
//! calls from its event loop instead.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use hexbeat::consts::CANVAS_SIZE;
use hexbeat::render;
use hexbeat::{Action, CellKind, GameState, GeometryCache, PatternLibrary};

/// Decayed running average, matching how a frame loop would smooth
/// per-frame render times
struct RenderAvg {
    time_ms: f64,
    denom: f64,
}

const RENDER_AVG_DECAY: f64 = 0.99;

impl RenderAvg {
    fn new() -> Self {
        Self {
            time_ms: 0.0,
            denom: 0.0,
        }
    }

    fn record(&mut self, ms: f64) {
        self.time_ms = RENDER_AVG_DECAY * self.time_ms + (1.0 - RENDER_AVG_DECAY) * ms;
        self.denom = RENDER_AVG_DECAY * self.denom + (1.0 - RENDER_AVG_DECAY);
    }

    fn average(&self) -> Option<f64> {
        (self.denom > 0.0).then(|| self.time_ms / self.denom)
    }
}

/// Answer the next beat with whatever it requires: jump hurdles, rotate
/// away from walls, hold otherwise.
fn autoplay(state: &GameState) -> Action {
    let lane = state.player_lane();
    let lanes = state.lanes();
    match state.incoming(lane, 1) {
        CellKind::Empty => Action::Hold,
        CellKind::Hurdle => Action::Jump,
        CellKind::Wall => {
            let ccw = state.incoming((lane + 1) % lanes, 1);
            let cw = state.incoming((lane + lanes - 1) % lanes, 1);
            if ccw == CellKind::Empty {
                Action::RotateCcw
            } else if cw == CellKind::Empty {
                Action::RotateCw
            } else {
                // Boxed in; take the hit
                Action::RotateCcw
            }
        }
    }
}

fn write_ppm(path: &str, frame: &[u32], width: usize, height: usize) -> std::io::Result<()> {
    let mut out = Vec::with_capacity(frame.len() * 3 + 32);
    out.extend_from_slice(format!("P6\n{width} {height}\n255\n").as_bytes());
    for &px in frame {
        out.push((px >> 24) as u8);
        out.push((px >> 16) as u8);
        out.push((px >> 8) as u8);
    }
    std::fs::write(path, out)
}

fn main() {
    env_logger::init();

    let mut pattern_path = String::from("data/patterns.txt");
    let mut seed: Option<u64> = None;
    let mut dump_path: Option<String> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => seed = args.next().and_then(|s| s.parse().ok()),
            "--dump" => dump_path = args.next(),
            _ => pattern_path = arg,
        }
    }

    let library = match PatternLibrary::load(&pattern_path) {
        Ok(library) => library,
        Err(err) => {
            log::error!("failed to load {pattern_path}: {err}");
            std::process::exit(1);
        }
    };

    let seed = seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    log::info!("starting run with seed {seed}");

    let geometry = GeometryCache::new(library.lanes);
    let mut state = GameState::new(&library, seed);

    let size = CANVAS_SIZE as usize;
    let mut frame = vec![0u32; size * size];
    let mut avg = RenderAvg::new();

    let mut beats = 0usize;
    while state.is_alive() && !state.cleared() {
        state.apply(autoplay(&state));
        beats += 1;

        let start = Instant::now();
        render::render_frame(&state, &geometry, 0.0, &mut frame);
        avg.record(start.elapsed().as_secs_f64() * 1000.0);
    }

    if let Some(ms) = avg.average() {
        log::info!("render avg: {ms:.2} ms over {beats} beats");
    }

    if state.is_alive() {
        println!("cleared the level in {beats} beats (seed {seed})");
    } else {
        println!(
            "died at beat {} in lane {} (seed {seed})",
            state.scroll_offset(),
            state.player_lane()
        );
    }

    if let Some(path) = dump_path {
        render::render_frame(&state, &geometry, 1.0, &mut frame);
        if let Err(err) = write_ppm(&path, &frame, size, size) {
            log::error!("failed to write {path}: {err}");
            std::process::exit(1);
        }
        log::info!("wrote final frame to {path}");
    }
}
