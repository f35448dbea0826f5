use std::path::Path;

use image::{io::Reader, DynamicImage, GenericImageView};
use thumbgen_types::{
    snapshot::{ResizeFilter, ThumbnailSize},
    Result,
};
use tracing::{debug, info};

use crate::{decode_error, filter_type};

/// Produces a decoded image stretched to an exact thumbnail size.
pub trait ImageLoader {
    fn load(&self, path: &Path, size: ThumbnailSize) -> Result<DynamicImage>;
}

/// Loads images from the filesystem in any format the `image` crate was built with.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileImageLoader {
    filter: ResizeFilter,
}

impl FileImageLoader {
    pub fn new(filter: ResizeFilter) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> ResizeFilter {
        self.filter
    }
}

impl ImageLoader for FileImageLoader {
    fn load(&self, path: &Path, size: ThumbnailSize) -> Result<DynamicImage> {
        // Format comes from the file contents; the extension is only a fallback.
        let reader = Reader::open(path)
            .and_then(Reader::with_guessed_format)
            .map_err(|err| {
                decode_error(format!("failed to open image {}: {err}", path.display()))
            })?;
        let source = reader.decode().map_err(|err| {
            decode_error(format!("failed to load image from {}: {err}", path.display()))
        })?;
        let (width, height) = source.dimensions();
        info!(
            "Loaded {} ({}x{}), resizing to {} with {} filter",
            path.display(),
            width,
            height,
            size,
            self.filter
        );

        // Stretch to the exact size; aspect ratio is not kept.
        let resized = source.resize_exact(size.width(), size.height(), filter_type(self.filter));
        debug!("Resized image color type {:?}", resized.color());
        Ok(resized)
    }
}
