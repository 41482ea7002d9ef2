//! Versioned tile store ("plate") access.
//!
//! A plate is a tiled image pyramid in which every write is tagged with a
//! transaction id and old versions stay readable. The exposure update
//! reads two plates: the DRG mosaic, where each camera's tiles live under
//! that camera's transaction, and the albedo mosaic, always read at its
//! latest version.

mod codec;
mod http;
mod store;
mod types;

pub use codec::{decode_tile, encode_tile, TILE_MAGIC};
pub use http::HttpPlateStore;
pub use store::{PlateError, PlateStore};
pub use types::{GrayAlphaTile, TileHeader, TileRegion, TileVersion, TransactionRange};
