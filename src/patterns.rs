//! Pattern library loading
//!
//! Obstacle templates come from a whitespace-tokenized text file: the lane
//! count first, then repeated groups of a row count followed by that many
//! rows, with a row count of zero terminating the list. Parsing is strict -
//! any malformed token aborts the whole load.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{LANES_MAX, LANES_MIN};

/// One cell of the obstacle grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CellKind {
    #[default]
    Empty,
    Wall,
    Hurdle,
}

impl CellKind {
    fn from_symbol(c: char) -> Option<Self> {
        match c {
            '.' => Some(CellKind::Empty),
            '#' => Some(CellKind::Wall),
            'o' => Some(CellKind::Hurdle),
            _ => None,
        }
    }
}

/// Pattern file load failures. All fatal: a malformed file is a
/// configuration error, reported once with no partial recovery.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("could not read pattern file")]
    Io(#[from] std::io::Error),
    #[error("could not read number of lanes")]
    MissingLaneCount,
    #[error("number of lanes {lanes} out of bounds [{LANES_MIN}, {LANES_MAX}]")]
    LaneCountOutOfBounds { lanes: usize },
    #[error("could not read pattern length")]
    MissingPatternLength,
    #[error("could not read pattern row")]
    MissingPatternRow,
    #[error("incorrect length of pattern row {row:?}: expected {expected} cells")]
    RowWidthMismatch { row: String, expected: usize },
    #[error("invalid cell symbol {symbol:?} in pattern row")]
    InvalidSymbol { symbol: char },
    #[error("expected at least one pattern")]
    EmptyLibrary,
}

/// An obstacle template: ordered rows of cells, one beat per row, one cell
/// per lane. Row 0 is the first beat the pattern occupies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub rows: Vec<Vec<CellKind>>,
}

impl Pattern {
    /// Beats this pattern occupies when placed on the timeline
    pub fn beats(&self) -> usize {
        self.rows.len()
    }
}

/// The loaded pattern set plus the lane count it was authored for.
/// Immutable after load; replaced wholesale on restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternLibrary {
    pub lanes: usize,
    pub patterns: Vec<Pattern>,
}

impl PatternLibrary {
    /// Load and parse a pattern file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        Self::parse(&std::fs::read_to_string(path)?)
    }

    /// Parse pattern definitions from text
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut tokens = text.split_whitespace();

        let lanes: usize = tokens
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or(ParseError::MissingLaneCount)?;
        if !(LANES_MIN..=LANES_MAX).contains(&lanes) {
            return Err(ParseError::LaneCountOutOfBounds { lanes });
        }

        let mut patterns = Vec::new();
        loop {
            let beats: usize = tokens
                .next()
                .and_then(|t| t.parse().ok())
                .ok_or(ParseError::MissingPatternLength)?;
            if beats == 0 {
                break;
            }

            let mut rows = Vec::with_capacity(beats);
            for _ in 0..beats {
                let token = tokens.next().ok_or(ParseError::MissingPatternRow)?;
                if token.chars().count() != lanes {
                    return Err(ParseError::RowWidthMismatch {
                        row: token.to_string(),
                        expected: lanes,
                    });
                }
                let row = token
                    .chars()
                    .map(|c| {
                        CellKind::from_symbol(c).ok_or(ParseError::InvalidSymbol { symbol: c })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                rows.push(row);
            }

            log::debug!("pattern {}: {} beats", patterns.len(), rows.len());
            patterns.push(Pattern { rows });
        }

        if patterns.is_empty() {
            return Err(ParseError::EmptyLibrary);
        }

        log::info!(
            "loaded {} patterns for {} lanes",
            patterns.len(),
            lanes
        );
        Ok(Self { lanes, patterns })
    }
}
