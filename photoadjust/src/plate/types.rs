//! Core types for addressing tiles in a plate store.

use serde::{Deserialize, Serialize};

/// In-memory raster for one tile: 32-bit float intensity plus alpha.
///
/// The alpha channel doubles as the sample weight. Zero alpha marks a
/// pixel that carries no data and must not enter any accumulation.
pub type GrayAlphaTile = image::ImageBuffer<image::LumaA<f32>, Vec<f32>>;

/// Location and version of one tile inside a plate store.
///
/// `col` and `row` address the tile within its pyramid level; `transaction`
/// is the version under which the tile was committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileHeader {
    /// Pyramid level, 0 being the most zoomed-out.
    pub level: u32,
    /// Column within the level, west to east.
    pub col: u32,
    /// Row within the level, north to south.
    pub row: u32,
    /// Transaction id the tile was written under.
    pub transaction: u64,
}

/// Inclusive range of transaction ids to match during a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionRange {
    pub begin: u64,
    pub end: u64,
}

impl TransactionRange {
    /// Creates a new inclusive range.
    pub fn new(begin: u64, end: u64) -> Self {
        Self { begin, end }
    }

    /// Range matching exactly one transaction id.
    pub fn exact(transaction: u64) -> Self {
        Self {
            begin: transaction,
            end: transaction,
        }
    }

    /// Returns true when `transaction` falls inside the range.
    pub fn contains(&self, transaction: u64) -> bool {
        self.begin <= transaction && transaction <= self.end
    }
}

/// Which version of a tile to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileVersion {
    /// The tile as committed under exactly this transaction id.
    Exact(u64),
    /// The most recently committed version, whatever wrote it.
    Latest,
}

/// Half-open rectangle of tile coordinates within a single level.
///
/// Columns span `min_col..max_col` and rows `min_row..max_row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRegion {
    pub min_col: u32,
    pub min_row: u32,
    pub max_col: u32,
    pub max_row: u32,
}

impl TileRegion {
    /// Creates a new region from half-open column and row bounds.
    pub fn new(min_col: u32, min_row: u32, max_col: u32, max_row: u32) -> Self {
        Self {
            min_col,
            min_row,
            max_col,
            max_row,
        }
    }

    /// Region covering the entire tile grid of `level`.
    ///
    /// A level holds `2^level` tiles along each axis. Levels of 32 or more
    /// do not fit a `u32` grid, so the bound saturates at `u32::MAX`.
    pub fn full_grid(level: u32) -> Self {
        let side = 1u32.checked_shl(level).unwrap_or(u32::MAX);
        Self {
            min_col: 0,
            min_row: 0,
            max_col: side,
            max_row: side,
        }
    }

    /// Returns true when tile `(col, row)` lies inside the region.
    pub fn contains(&self, col: u32, row: u32) -> bool {
        self.min_col <= col && col < self.max_col && self.min_row <= row && row < self.max_row
    }
}
