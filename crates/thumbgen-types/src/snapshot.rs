use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Result, ThumbgenError};

/// Target thumbnail dimensions in pixels. Both sides are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailSize {
    width: u32,
    height: u32,
}

impl ThumbnailSize {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ThumbgenError::Configuration(format!(
                "thumbnail size must be positive, got {width}*{height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl fmt::Display for ThumbnailSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}*{}", self.width, self.height)
    }
}

/// Interpolation used when stretching the source image to the thumbnail size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum ResizeFilter {
    #[default]
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl ResizeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Triangle => "triangle",
            Self::CatmullRom => "catmull-rom",
            Self::Gaussian => "gaussian",
            Self::Lanczos3 => "lanczos3",
        }
    }
}

impl FromStr for ResizeFilter {
    type Err = ThumbgenError;

    fn from_str(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "triangle" => Ok(Self::Triangle),
            "catmull-rom" | "catmullrom" => Ok(Self::CatmullRom),
            "gaussian" => Ok(Self::Gaussian),
            "lanczos3" => Ok(Self::Lanczos3),
            other => Err(ThumbgenError::Configuration(format!(
                "unknown resize filter '{other}' (expected nearest, triangle, catmull-rom, gaussian or lanczos3)"
            ))),
        }
    }
}

impl TryFrom<String> for ResizeFilter {
    type Error = ThumbgenError;

    fn try_from(name: String) -> Result<Self> {
        name.parse()
    }
}

impl fmt::Display for ResizeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base64 text of a JPEG thumbnail together with the length of the JPEG bytes
/// it was produced from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedSnapshot {
    base64: String,
    jpeg_len: usize,
}

impl EncodedSnapshot {
    pub fn new(base64: String, jpeg_len: usize) -> Self {
        Self { base64, jpeg_len }
    }

    pub fn base64(&self) -> &str {
        &self.base64
    }

    /// Byte length of the JPEG buffer before base64 encoding.
    pub fn jpeg_len(&self) -> usize {
        self.jpeg_len
    }
}
