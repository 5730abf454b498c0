//! Simple containers to track images and perform operations on them.

use std::io::{Read, Write};

use crate::padding::{add_padding, PADDING_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageFormat {
    Rgba8,
}

impl ImageFormat {
    fn stride(&self) -> u32 {
        match self {
            ImageFormat::Rgba8 => 4,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Image {
    size: (u32, u32),
    data: Vec<u8>,
    format: ImageFormat,
}

impl Image {
    pub fn new_rgba8<D: Into<Vec<u8>>>(size: (u32, u32), data: D) -> Self {
        let data = data.into();
        let format = ImageFormat::Rgba8;

        assert!(data.len() == (size.0 * size.1 * format.stride()) as usize);

        Self { size, data, format }
    }

    pub fn new_empty_rgba8(size: (u32, u32)) -> Self {
        let data = vec![0; (size.0 * size.1 * ImageFormat::Rgba8.stride()) as usize];
        Self::new_rgba8(size, data)
    }

    pub fn decode_png<R: Read>(input: R) -> Result<Self, png::DecodingError> {
        let decoder = png::Decoder::new(input);
        let (info, mut reader) = decoder.read_info()?;

        // TODO: Transcode other color types to RGBA instead of rejecting
        // them.
        assert!(info.color_type == png::ColorType::RGBA);

        let mut data = vec![0; info.buffer_size()];
        reader.next_frame(&mut data)?;

        Ok(Self::new_rgba8((info.width, info.height), data))
    }

    pub fn encode_png<W: Write>(&self, output: W) -> Result<(), png::EncodingError> {
        let mut encoder = png::Encoder::new(output, self.size.0, self.size.1);

        match self.format {
            ImageFormat::Rgba8 => {
                encoder.set_color(png::ColorType::RGBA);
                encoder.set_depth(png::BitDepth::Eight);
            }
        }

        let mut output_writer = encoder.write_header()?;
        output_writer.write_image_data(&self.data)?;

        // On drop, output_writer will write the last chunk of the PNG file.
        Ok(())
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Copies another image into this one with its top-left corner at `pos`.
    /// The other image must fit entirely within this one.
    pub fn blit(&mut self, other: &Image, pos: (u32, u32)) {
        assert!(self.format == other.format);
        assert!(pos.0 + other.size.0 <= self.size.0);
        assert!(pos.1 + other.size.1 <= self.size.1);

        let stride = self.format.stride();
        let other_row_len = (other.size.0 * stride) as usize;

        for (other_y, other_row) in other.data.chunks_exact(other_row_len).enumerate() {
            let start_px = pos.0 + self.size.0 * (pos.1 + other_y as u32);
            let start = (start_px * stride) as usize;

            self.data[start..start + other_row_len].copy_from_slice(other_row);
        }
    }

    /// Returns a copy of this image with the bleed border added: one pixel
    /// on every side, repeating the image's edges.
    pub fn padded(&self) -> Image {
        let data = add_padding(
            &self.data,
            self.size.0,
            self.size.1,
            self.format.stride() as usize,
        );

        Image {
            size: (
                self.size.0 + 2 * PADDING_WIDTH,
                self.size.1 + 2 * PADDING_WIDTH,
            ),
            data,
            format: self.format,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn blit_copies_rows_into_place() {
        let source = Image::new_rgba8((2, 1), vec![1, 2, 3, 4, 5, 6, 7, 8]);
        let mut target = Image::new_empty_rgba8((4, 2));

        target.blit(&source, (1, 1));

        let mut expected = vec![0; 4 * 2 * 4];
        expected[(4 + 1) * 4..(4 + 3) * 4].copy_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(target.data, expected);
    }

    #[test]
    fn blit_far_corner() {
        let source = Image::new_rgba8((2, 2), vec![7; 2 * 2 * 4]);
        let mut target = Image::new_empty_rgba8((8, 8));

        target.blit(&source, (6, 6));

        assert_eq!(&target.data[(6 * 8 + 6) * 4..(6 * 8 + 8) * 4], &[7; 8][..]);
        assert_eq!(&target.data[(7 * 8 + 6) * 4..(7 * 8 + 8) * 4], &[7; 8][..]);
        assert_eq!(target.data[(6 * 8 + 5) * 4 + 3], 0);
    }

    #[test]
    fn padded_repeats_edges() {
        let source = Image::new_rgba8((1, 1), vec![1, 2, 3, 4]);
        let padded = source.padded();

        assert_eq!(padded.size(), (3, 3));
        for pixel in padded.data.chunks_exact(4) {
            assert_eq!(pixel, &[1, 2, 3, 4]);
        }
    }
}
