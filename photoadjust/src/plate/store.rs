//! The plate store interface.

use super::types::{GrayAlphaTile, TileHeader, TileRegion, TileVersion, TransactionRange};
use crate::http::HttpError;
use thiserror::Error;

/// Errors raised by a plate store.
#[derive(Debug, Error)]
pub enum PlateError {
    /// The store could not be reached or answered with an error status.
    #[error("plate store request failed: {0}")]
    Http(#[from] HttpError),

    /// A metadata response was not the JSON we expect.
    #[error("plate store response was not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// A tile payload failed structural validation.
    #[error("malformed tile payload: {0}")]
    Payload(String),
}

/// Read access to one versioned tile pyramid.
///
/// A plate store keeps every committed version of every tile. Readers pick
/// a version explicitly: an exact transaction id isolates the contribution
/// of a single writer, while [`TileVersion::Latest`] follows the live state
/// of the mosaic.
pub trait PlateStore {
    /// Number of pyramid levels in the store. The finest level is
    /// `num_levels() - 1`.
    fn num_levels(&self) -> Result<u32, PlateError>;

    /// Lists the tiles of `level` inside `region` whose transaction id
    /// falls in `transactions`. Order is unspecified.
    fn search_by_region(
        &self,
        level: u32,
        region: TileRegion,
        transactions: TransactionRange,
    ) -> Result<Vec<TileHeader>, PlateError>;

    /// Reads one tile, or `None` when the store holds no tile at that
    /// coordinate and version.
    fn read_tile(
        &self,
        level: u32,
        col: u32,
        row: u32,
        version: TileVersion,
    ) -> Result<Option<GrayAlphaTile>, PlateError>;
}
