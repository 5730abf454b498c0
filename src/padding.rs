//! Adds the bleed border around an image before it is packed: a one pixel
//! frame on every side, filled by repeating the image's edge pixels. Without
//! the border, bilinear sampling near the edge of an atlas cell blends in
//! whatever texture happens to be packed next to it.

/// How many border pixels `add_padding` adds on each side of an image.
pub(crate) const PADDING_WIDTH: u32 = 1;

/// Copies `data`, a tightly packed `width` x `height` pixel buffer with
/// `pixel_stride` bytes per pixel, into a buffer two pixels larger on each
/// axis. The interior is the unchanged input at offset (1, 1); the border
/// repeats the nearest edge pixel, corners included.
///
/// The transform knows nothing about the pixel format beyond its stride, so
/// it works for any byte-per-pixel layout. The caller must pass nonzero
/// dimensions that match the buffer's length.
pub(crate) fn add_padding(data: &[u8], width: u32, height: u32, pixel_stride: usize) -> Vec<u8> {
    let width = width as usize;
    let height = height as usize;

    assert!(width > 0 && height > 0);
    assert_eq!(data.len(), width * height * pixel_stride);

    let padded_row_len = (width + 2) * pixel_stride;
    let mut padded = vec![0; padded_row_len * (height + 2)];

    for y in 0..height {
        let source_row = &data[y * width * pixel_stride..(y + 1) * width * pixel_stride];
        let target_row = &mut padded[(y + 1) * padded_row_len..(y + 2) * padded_row_len];

        // The row itself, shifted right by one pixel.
        target_row[pixel_stride..pixel_stride + source_row.len()].copy_from_slice(source_row);

        // Left and right borders repeat the row's edge pixels.
        target_row[..pixel_stride].copy_from_slice(&source_row[..pixel_stride]);
        target_row[padded_row_len - pixel_stride..]
            .copy_from_slice(&source_row[source_row.len() - pixel_stride..]);
    }

    // The top and bottom borders copy the adjacent interior rows after those
    // rows have themselves been padded, which fills the corners with the
    // nearest interior edge pixel.
    padded.copy_within(padded_row_len..2 * padded_row_len, 0);

    let last_interior_start = height * padded_row_len;
    padded.copy_within(
        last_interior_start..last_interior_start + padded_row_len,
        (height + 1) * padded_row_len,
    );

    padded
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pads_rgba_2x2() {
        #[rustfmt::skip]
        let input = vec![
             1,  2,  3,  4,     5,  6,  7,  8,
             9, 10, 11, 12,    13, 14, 15, 16,
        ];

        #[rustfmt::skip]
        let expected = vec![
             1,  2,  3,  4,     1,  2,  3,  4,     5,  6,  7,  8,     5,  6,  7,  8,
             1,  2,  3,  4,     1,  2,  3,  4,     5,  6,  7,  8,     5,  6,  7,  8,
             9, 10, 11, 12,     9, 10, 11, 12,    13, 14, 15, 16,    13, 14, 15, 16,
             9, 10, 11, 12,     9, 10, 11, 12,    13, 14, 15, 16,    13, 14, 15, 16,
        ];

        assert_eq!(add_padding(&input, 2, 2, 4), expected);
    }

    #[test]
    fn pads_single_pixel() {
        let input = vec![10, 20, 30, 40];
        let padded = add_padding(&input, 1, 1, 4);

        assert_eq!(padded.len(), 3 * 3 * 4);
        for pixel in padded.chunks_exact(4) {
            assert_eq!(pixel, &input[..]);
        }
    }

    #[test]
    fn pads_single_byte_pixels() {
        #[rustfmt::skip]
        let input = vec![
            1, 2, 3,
            4, 5, 6,
        ];

        #[rustfmt::skip]
        let expected = vec![
            1, 1, 2, 3, 3,
            1, 1, 2, 3, 3,
            4, 4, 5, 6, 6,
            4, 4, 5, 6, 6,
        ];

        assert_eq!(add_padding(&input, 3, 2, 1), expected);
    }
}
