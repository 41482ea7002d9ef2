//! HTTP-backed plate store client.

use super::codec::decode_tile;
use super::store::{PlateError, PlateStore};
use super::types::{GrayAlphaTile, TileHeader, TileRegion, TileVersion, TransactionRange};
use crate::http::HttpClient;
use serde::Deserialize;
use tracing::trace;

/// Metadata returned by the plate `info` endpoint.
#[derive(Debug, Deserialize)]
struct PlateInfo {
    num_levels: u32,
}

/// Client for a plate store served over HTTP.
///
/// All requests are relative to the plate's base URL:
///
/// * `GET info` - pyramid metadata
/// * `GET search?...` - tile headers matching a region and transaction range
/// * `GET tiles/{level}/{col}/{row}` - one tile payload
pub struct HttpPlateStore<C: HttpClient> {
    http_client: C,
    base_url: String,
}

impl<C: HttpClient> HttpPlateStore<C> {
    /// Creates a store client for the plate at `base_url`.
    pub fn new(http_client: C, base_url: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The plate base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn info_url(&self) -> String {
        format!("{}/info", self.base_url)
    }

    fn search_url(&self, level: u32, region: TileRegion, transactions: TransactionRange) -> String {
        format!(
            "{}/search?level={}&min_col={}&min_row={}&max_col={}&max_row={}&begin={}&end={}",
            self.base_url,
            level,
            region.min_col,
            region.min_row,
            region.max_col,
            region.max_row,
            transactions.begin,
            transactions.end
        )
    }

    fn tile_url(&self, level: u32, col: u32, row: u32, version: TileVersion) -> String {
        let mut url = format!("{}/tiles/{}/{}/{}", self.base_url, level, col, row);
        if let TileVersion::Exact(transaction) = version {
            url.push_str(&format!("?transaction={}&exact=true", transaction));
        }
        url
    }
}

impl<C: HttpClient> PlateStore for HttpPlateStore<C> {
    fn num_levels(&self) -> Result<u32, PlateError> {
        let bytes = self.http_client.get(&self.info_url())?;
        let info: PlateInfo = serde_json::from_slice(&bytes)?;
        Ok(info.num_levels)
    }

    fn search_by_region(
        &self,
        level: u32,
        region: TileRegion,
        transactions: TransactionRange,
    ) -> Result<Vec<TileHeader>, PlateError> {
        let url = self.search_url(level, region, transactions);
        trace!(url = %url, "plate search");

        let bytes = self.http_client.get(&url)?;
        let headers: Vec<TileHeader> = serde_json::from_slice(&bytes)?;
        Ok(headers)
    }

    fn read_tile(
        &self,
        level: u32,
        col: u32,
        row: u32,
        version: TileVersion,
    ) -> Result<Option<GrayAlphaTile>, PlateError> {
        let url = self.tile_url(level, col, row, version);
        trace!(url = %url, "plate tile read");

        match self.http_client.get(&url) {
            Ok(bytes) => decode_tile(&bytes).map(Some),
            // An absent tile is ordinary sparse coverage, not a failure.
            Err(error) if error.is_not_found() => Ok(None),
            Err(error) => Err(error.into()),
        }
    }
}
