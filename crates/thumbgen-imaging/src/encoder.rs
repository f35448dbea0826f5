use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{codecs::jpeg::JpegEncoder, ColorType, DynamicImage};
use thumbgen_types::{
    config::DEFAULT_JPEG_QUALITY, snapshot::EncodedSnapshot, Result, ThumbgenError,
};
use tracing::info;

use crate::encode_error;

/// Serializes a decoded image into the text payload of a thumbnail block.
pub trait SnapshotEncoder {
    fn encode(&self, image: &DynamicImage) -> Result<EncodedSnapshot>;
}

/// Baseline JPEG at a fixed quality, base64 encoded with the standard padded alphabet.
#[derive(Debug, Clone, Copy)]
pub struct JpegSnapshotEncoder {
    quality: u8,
}

impl JpegSnapshotEncoder {
    pub fn new(quality: u8) -> Result<Self> {
        if !(1..=100).contains(&quality) {
            return Err(ThumbgenError::Configuration(format!(
                "jpeg quality must be between 1 and 100, got {quality}"
            )));
        }
        Ok(Self { quality })
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Raw JPEG bytes for `image`. Alpha is dropped since JPEG has no alpha channel.
    pub fn encode_jpeg(&self, image: &DynamicImage) -> Result<Vec<u8>> {
        let rgb = image.to_rgb8();
        let mut buf = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut buf, self.quality);
        encoder
            .encode(rgb.as_raw(), rgb.width(), rgb.height(), ColorType::Rgb8)
            .map_err(|err| encode_error(format!("failed to encode jpeg: {err}")))?;
        Ok(buf)
    }
}

impl Default for JpegSnapshotEncoder {
    fn default() -> Self {
        Self {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl SnapshotEncoder for JpegSnapshotEncoder {
    fn encode(&self, image: &DynamicImage) -> Result<EncodedSnapshot> {
        let jpeg = self.encode_jpeg(image)?;
        let thumbnail_length = jpeg.len();
        let encoded = STANDARD.encode(&jpeg);
        info!("Snapshot encoded, thumbnail_length={}", thumbnail_length);
        Ok(EncodedSnapshot::new(encoded, thumbnail_length))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::gradient;
    use image::{GenericImageView, Rgba, RgbaImage};

    #[test]
    fn declared_length_matches_jpeg_bytes() {
        let image = DynamicImage::ImageRgb8(gradient(64, 48));
        let snapshot = JpegSnapshotEncoder::default()
            .encode(&image)
            .expect("encode snapshot");

        let decoded = STANDARD.decode(snapshot.base64()).expect("valid base64");
        assert_eq!(decoded.len(), snapshot.jpeg_len());
        assert_ne!(snapshot.base64().len(), snapshot.jpeg_len());
        assert_eq!(&decoded[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn encoded_jpeg_decodes_at_thumbnail_size() {
        let image = DynamicImage::ImageRgb8(gradient(30, 20));
        let jpeg = JpegSnapshotEncoder::default()
            .encode_jpeg(&image)
            .expect("encode jpeg");
        let decoded = image::load_from_memory(&jpeg).expect("decode jpeg");
        assert_eq!(decoded.dimensions(), (30, 20));
    }

    #[test]
    fn alpha_channel_is_flattened() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([10, 200, 30, 0])));
        let snapshot = JpegSnapshotEncoder::default()
            .encode(&image)
            .expect("encode rgba snapshot");
        assert!(snapshot.jpeg_len() > 0);
    }

    #[test]
    fn higher_quality_produces_more_bytes() {
        let image = DynamicImage::ImageRgb8(gradient(120, 120));
        let low = JpegSnapshotEncoder::new(10)
            .expect("low quality")
            .encode(&image)
            .expect("encode low");
        let high = JpegSnapshotEncoder::new(95)
            .expect("high quality")
            .encode(&image)
            .expect("encode high");
        assert!(high.jpeg_len() > low.jpeg_len());
    }

    #[test]
    fn encoding_is_deterministic() {
        let image = DynamicImage::ImageRgb8(gradient(40, 40));
        let encoder = JpegSnapshotEncoder::default();
        let first = encoder.encode(&image).expect("first encode");
        let second = encoder.encode(&image).expect("second encode");
        assert_eq!(first, second);
    }

    #[test]
    fn reject_out_of_range_quality() {
        assert!(matches!(
            JpegSnapshotEncoder::new(0).unwrap_err(),
            ThumbgenError::Configuration(_)
        ));
        assert!(matches!(
            JpegSnapshotEncoder::new(101).unwrap_err(),
            ThumbgenError::Configuration(_)
        ));
        assert_eq!(JpegSnapshotEncoder::new(100).expect("max").quality(), 100);
    }
}
