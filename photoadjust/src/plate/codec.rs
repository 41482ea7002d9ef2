//! Raw tile payload encoding.
//!
//! Tiles travel as a small little-endian binary payload rather than a
//! compressed image format, because the samples are 32-bit floats with an
//! alpha channel and must survive the trip bit-exactly.
//!
//! Layout:
//!
//! ```text
//! offset  size  field
//! 0       4     magic "PGA1"
//! 4       4     width  (u32, LE)
//! 8       4     height (u32, LE)
//! 12      ...   width * height pixels, each two f32 LE: intensity, alpha
//! ```

use super::store::PlateError;
use super::types::GrayAlphaTile;

/// Magic bytes identifying a tile payload: Photometric Gray+Alpha v1.
pub const TILE_MAGIC: [u8; 4] = *b"PGA1";

/// Size of the fixed header preceding the samples.
const HEADER_SIZE: usize = 12;

/// Serializes a tile into its wire payload.
pub fn encode_tile(tile: &GrayAlphaTile) -> Vec<u8> {
    let samples = tile.as_raw();
    let mut bytes = Vec::with_capacity(HEADER_SIZE + samples.len() * 4);

    bytes.extend_from_slice(&TILE_MAGIC);
    bytes.extend_from_slice(&tile.width().to_le_bytes());
    bytes.extend_from_slice(&tile.height().to_le_bytes());
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }

    bytes
}

/// Parses a wire payload back into a tile.
///
/// Rejects payloads with a wrong magic, a truncated header, or a body
/// whose length disagrees with the declared dimensions.
pub fn decode_tile(bytes: &[u8]) -> Result<GrayAlphaTile, PlateError> {
    if bytes.len() < HEADER_SIZE {
        return Err(PlateError::Payload(format!(
            "payload truncated at {} bytes, header needs {}",
            bytes.len(),
            HEADER_SIZE
        )));
    }
    if bytes[0..4] != TILE_MAGIC {
        return Err(PlateError::Payload(format!(
            "bad magic {:02x?}",
            &bytes[0..4]
        )));
    }

    let width = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    let height = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);

    // Two f32 samples per pixel. The expected length is computed in u128
    // so a hostile width/height pair cannot overflow the check itself.
    let samples = u128::from(width) * u128::from(height) * 2;
    let expected = HEADER_SIZE as u128 + samples * 4;
    if bytes.len() as u128 != expected {
        return Err(PlateError::Payload(format!(
            "{}x{} tile needs {} bytes, payload has {}",
            width,
            height,
            expected,
            bytes.len()
        )));
    }

    let mut data = Vec::with_capacity(samples as usize);
    for chunk in bytes[HEADER_SIZE..].chunks_exact(4) {
        data.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }

    GrayAlphaTile::from_raw(width, height, data).ok_or_else(|| {
        PlateError::Payload(format!("{}x{} tile rejected by image buffer", width, height))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::LumaA;

    fn sample_tile() -> GrayAlphaTile {
        let mut tile = GrayAlphaTile::new(3, 2);
        for (index, pixel) in tile.pixels_mut().enumerate() {
            *pixel = LumaA([index as f32 * 0.25, 1.0 - index as f32 * 0.1]);
        }
        tile
    }

    #[test]
    fn test_header_layout() {
        let encoded = encode_tile(&sample_tile());

        assert_eq!(&encoded[0..4], b"PGA1");
        assert_eq!(u32::from_le_bytes([encoded[4], encoded[5], encoded[6], encoded[7]]), 3);
        assert_eq!(
            u32::from_le_bytes([encoded[8], encoded[9], encoded[10], encoded[11]]),
            2
        );
        assert_eq!(encoded.len(), 12 + 3 * 2 * 2 * 4);
    }

    #[test]
    fn test_round_trip_is_bit_exact() {
        let tile = sample_tile();

        let decoded = decode_tile(&encode_tile(&tile)).unwrap();

        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.as_raw(), tile.as_raw());
    }

    #[test]
    fn test_zero_size_tile_round_trips() {
        let tile = GrayAlphaTile::new(0, 0);

        let encoded = encode_tile(&tile);
        assert_eq!(encoded.len(), 12);

        let decoded = decode_tile(&encoded).unwrap();
        assert_eq!(decoded.dimensions(), (0, 0));
    }

    #[test]
    fn test_rejects_bad_magic() {
        let mut encoded = encode_tile(&sample_tile());
        encoded[0] = b'X';

        let error = decode_tile(&encoded).unwrap_err();
        assert!(matches!(error, PlateError::Payload(_)));
        assert!(error.to_string().contains("bad magic"));
    }

    #[test]
    fn test_rejects_truncated_header() {
        let error = decode_tile(&[b'P', b'G', b'A']).unwrap_err();
        assert!(error.to_string().contains("truncated"));
    }

    #[test]
    fn test_rejects_body_shorter_than_declared() {
        let mut encoded = encode_tile(&sample_tile());
        encoded.truncate(encoded.len() - 4);

        assert!(decode_tile(&encoded).is_err());
    }

    #[test]
    fn test_rejects_body_longer_than_declared() {
        let mut encoded = encode_tile(&sample_tile());
        encoded.extend_from_slice(&[0, 0, 0, 0]);

        assert!(decode_tile(&encoded).is_err());
    }

    #[test]
    fn test_rejects_huge_declared_dimensions() {
        // The sample count for these dimensions overflows u64; the length
        // check must still fail cleanly instead of wrapping or allocating.
        let mut payload = Vec::new();
        payload.extend_from_slice(&TILE_MAGIC);
        payload.extend_from_slice(&u32::MAX.to_le_bytes());
        payload.extend_from_slice(&u32::MAX.to_le_bytes());

        assert!(decode_tile(&payload).is_err());
    }
}
