//! Image decoding, resizing and JPEG snapshot encoding.

mod encoder;
mod loader;

pub use encoder::{JpegSnapshotEncoder, SnapshotEncoder};
pub use loader::{FileImageLoader, ImageLoader};

use image::imageops::FilterType;
use thumbgen_types::{snapshot::ResizeFilter, ThumbgenError};

pub(crate) fn filter_type(filter: ResizeFilter) -> FilterType {
    match filter {
        ResizeFilter::Nearest => FilterType::Nearest,
        ResizeFilter::Triangle => FilterType::Triangle,
        ResizeFilter::CatmullRom => FilterType::CatmullRom,
        ResizeFilter::Gaussian => FilterType::Gaussian,
        ResizeFilter::Lanczos3 => FilterType::Lanczos3,
    }
}

pub fn decode_error(message: impl Into<String>) -> ThumbgenError {
    ThumbgenError::Decode(message.into())
}

pub fn encode_error(message: impl Into<String>) -> ThumbgenError {
    ThumbgenError::Encode(message.into())
}
