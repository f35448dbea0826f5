//! Pipeline wiring image loading, snapshot encoding, block formatting and output.

use std::{
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use serde::Serialize;
use thumbgen_gcode::{format_block, write_block, write_injected, GcodeBlock};
use thumbgen_imaging::{FileImageLoader, ImageLoader, JpegSnapshotEncoder, SnapshotEncoder};
use thumbgen_types::{
    config::ThumbgenConfig,
    snapshot::{EncodedSnapshot, ThumbnailSize},
    Result, ThumbgenError,
};
use tracing::{error, info};

/// Outcome of a successful pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub jpeg_len: usize,
    pub base64_len: usize,
    pub body_lines: usize,
}

pub struct Pipeline<L, E>
where
    L: ImageLoader,
    E: SnapshotEncoder,
{
    loader: L,
    encoder: E,
    chunk_size: NonZeroUsize,
}

impl Pipeline<FileImageLoader, JpegSnapshotEncoder> {
    pub fn from_config(config: &ThumbgenConfig) -> Result<Self> {
        config.validate()?;
        let chunk_size = NonZeroUsize::new(config.thumbnail.chunk_size).ok_or_else(|| {
            ThumbgenError::Configuration("thumbnail.chunk_size must be greater than zero".into())
        })?;
        Ok(Self::new(
            FileImageLoader::new(config.encoder.filter),
            JpegSnapshotEncoder::new(config.encoder.quality)?,
            chunk_size,
        ))
    }
}

impl<L, E> Pipeline<L, E>
where
    L: ImageLoader,
    E: SnapshotEncoder,
{
    pub fn new(loader: L, encoder: E, chunk_size: NonZeroUsize) -> Self {
        Self {
            loader,
            encoder,
            chunk_size,
        }
    }

    /// Loads, encodes and formats `input` without touching any output file.
    pub fn build_block(
        &self,
        input: &Path,
        size: ThumbnailSize,
    ) -> Result<(GcodeBlock, EncodedSnapshot)> {
        let image = self
            .loader
            .load(input, size)
            .inspect_err(|err| error!("Image loading failed: {err}"))?;
        let snapshot = self
            .encoder
            .encode(&image)
            .inspect_err(|err| error!("Image encoding failed: {err}"))?;
        let block = format_block(&snapshot, size, self.chunk_size);
        Ok((block, snapshot))
    }

    /// Writes the thumbnail block for `input` as the whole of `output`.
    pub fn generate(
        &self,
        input: &Path,
        output: &Path,
        size: ThumbnailSize,
    ) -> Result<PipelineReport> {
        let (block, snapshot) = self.build_block(input, size)?;
        write_block(output, &block).inspect_err(|err| error!("Writing G-code failed: {err}"))?;
        Ok(self.report(input, output, size, &block, &snapshot))
    }

    /// Embeds the thumbnail block for `input` at the top of the G-code file `gcode`.
    pub fn inject(
        &self,
        input: &Path,
        gcode: &Path,
        size: ThumbnailSize,
    ) -> Result<PipelineReport> {
        let (block, snapshot) = self.build_block(input, size)?;
        write_injected(gcode, &block)
            .inspect_err(|err| error!("Injecting thumbnail failed: {err}"))?;
        Ok(self.report(input, gcode, size, &block, &snapshot))
    }

    fn report(
        &self,
        input: &Path,
        output: &Path,
        size: ThumbnailSize,
        block: &GcodeBlock,
        snapshot: &EncodedSnapshot,
    ) -> PipelineReport {
        let report = PipelineReport {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            width: size.width(),
            height: size.height(),
            jpeg_len: snapshot.jpeg_len(),
            base64_len: snapshot.base64().len(),
            body_lines: block.body().len(),
        };
        info!(
            "Thumbnail {} from {} -> {} ({} jpeg bytes, {} lines)",
            size,
            input.display(),
            output.display(),
            report.jpeg_len,
            report.body_lines
        );
        report
    }
}
