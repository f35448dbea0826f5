use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    snapshot::{ResizeFilter, ThumbnailSize},
    Result, ThumbgenError,
};

pub const DEFAULT_WIDTH: u32 = 200;
pub const DEFAULT_HEIGHT: u32 = 200;
pub const DEFAULT_CHUNK_SIZE: usize = 76;
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailConfig {
    pub width: u32,
    pub height: u32,
    /// Maximum number of base64 characters per body line.
    pub chunk_size: usize,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl ThumbnailConfig {
    pub fn size(&self) -> Result<ThumbnailSize> {
        ThumbnailSize::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    pub quality: u8,
    pub filter: ResizeFilter,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            quality: DEFAULT_JPEG_QUALITY,
            filter: ResizeFilter::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpsConfig {
    pub log_level: String,
}

impl Default for OpsConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThumbgenConfig {
    #[serde(default)]
    pub thumbnail: ThumbnailConfig,
    #[serde(default)]
    pub encoder: EncoderConfig,
    #[serde(default)]
    pub ops: OpsConfig,
}

impl ThumbgenConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref).map_err(|err| {
            ThumbgenError::Configuration(format!(
                "unable to read config file {}: {err}",
                path_ref.display()
            ))
        })?;
        toml::from_str(&contents).map_err(|err| {
            ThumbgenError::Configuration(format!(
                "failed to parse config file {}: {err}",
                path_ref.display()
            ))
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.thumbnail.size()?;
        if self.thumbnail.chunk_size == 0 {
            return Err(ThumbgenError::Configuration(
                "thumbnail.chunk_size must be greater than zero".into(),
            ));
        }
        if !(1..=100).contains(&self.encoder.quality) {
            return Err(ThumbgenError::Configuration(
                "encoder.quality must be between 1 and 100".into(),
            ));
        }
        Ok(())
    }
}
