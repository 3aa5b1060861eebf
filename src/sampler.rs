// Pointer sampler: where the pointer is and what color lies under it.
// Each call is one synchronous round-trip to the server.

use anyhow::{Context, Result};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::*;

use crate::constants::PIXEL_BYTES;
use crate::error::PickError;
use crate::types::{Color, Point};

const ALL_PLANES: u32 = u32::MAX;

pub fn get_pointer_position(conn: &impl Connection, root: Window) -> Result<Point> {
    let reply = conn
        .query_pointer(root)
        .context("query_pointer failed")?
        .reply()
        .map_err(|e| PickError::from_reply("query_pointer", e))?;

    Ok(Point::new(reply.root_x, reply.root_y))
}

pub fn get_color_at(conn: &impl Connection, root: Window, at: Point) -> Result<Color> {
    let reply = conn
        .get_image(ImageFormat::Z_PIXMAP, root, at.x, at.y, 1, 1, ALL_PLANES)
        .context("get_image failed")?
        .reply()
        .map_err(|e| PickError::from_reply("get_image", e))?;

    Ok(decode_pixel(&reply.data)?)
}

/// Decodes the image data of a single Z-pixmap pixel.
///
/// Only 32 bits-per-pixel data is accepted; the padding byte is dropped and
/// the remaining BGR bytes are repacked as `0xRRGGBB`.
pub fn decode_pixel(data: &[u8]) -> Result<Color, PickError> {
    let bytes: [u8; PIXEL_BYTES] = data
        .try_into()
        .map_err(|_| PickError::PixelFormat(data.len() * 8))?;

    Ok(Color::from_bgrx(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_pixel_extracts_low_24_bits() {
        // Arrange: 0xFF1A2B3C as a little-endian word
        let data = 0xFF1A2B3Cu32.to_le_bytes();

        // Act
        let color = decode_pixel(&data).unwrap();

        // Assert
        assert_eq!(color.rgb(), 0x1A2B3C);
    }

    #[test]
    fn test_decode_pixel_ignores_upper_byte() {
        for pad in [0x00u8, 0x7f, 0xff] {
            let color = decode_pixel(&[0x00, 0xff, 0x00, pad]).unwrap();
            assert_eq!(color, Color::new(0x00ff00));
        }
    }

    #[test]
    fn test_decode_pixel_rejects_other_depths() {
        for (len, bits) in [(0usize, 0usize), (1, 8), (2, 16), (3, 24), (8, 64)] {
            let data = vec![0u8; len];

            let err = decode_pixel(&data).unwrap_err();

            assert!(matches!(err, PickError::PixelFormat(b) if b == bits));
            assert!(err.to_string().ends_with(&format!("got: {}bpp", bits)));
        }
    }
}
