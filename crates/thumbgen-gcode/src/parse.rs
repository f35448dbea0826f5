use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use thumbgen_types::Result;

use crate::{
    format_error, header_offsets, BLOCK_BEGIN, BLOCK_END, BLOCK_TERMINATOR, COMMENT_PREFIX,
    HEADER_TRAILER,
};

const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];

/// A thumbnail block read back from text, not yet checked for consistency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedBlock {
    pub width: u32,
    pub height: u32,
    pub jpeg_len: usize,
    pub x1: u32,
    pub x2: u32,
    pub trailer: u32,
    pub chunks: Vec<String>,
    /// Whether the closing `;` line followed the end marker.
    pub terminated: bool,
}

/// Result of a successful [`ParsedBlock::verify`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockSummary {
    pub width: u32,
    pub height: u32,
    pub jpeg_len: usize,
    pub chunk_size: usize,
    pub body_lines: usize,
}

/// Parses the first thumbnail block found in `text`.
pub fn parse_block(text: &str) -> Result<ParsedBlock> {
    let mut lines = text.lines();
    let header = lines
        .by_ref()
        .find(|line| is_block_begin(line))
        .ok_or_else(|| format_error("no '; jpg begin' header found"))?;

    let fields: Vec<&str> = header[BLOCK_BEGIN.len()..].split_whitespace().collect();
    let [dims, jpeg_len, x1, x2, trailer] = fields.as_slice() else {
        return Err(format_error(format!(
            "header must have 5 fields, found {}: '{header}'",
            fields.len()
        )));
    };
    let (width, height) = dims
        .split_once('*')
        .ok_or_else(|| format_error(format!("dimensions '{dims}' are not of the form W*H")))?;

    let mut block = ParsedBlock {
        width: parse_field("width", width)?,
        height: parse_field("height", height)?,
        jpeg_len: parse_field("byte length", jpeg_len)?,
        x1: parse_field("x1", x1)?,
        x2: parse_field("x2", x2)?,
        trailer: parse_field("trailer", trailer)?,
        chunks: Vec::new(),
        terminated: false,
    };

    loop {
        let Some(line) = lines.next() else {
            return Err(format_error("block ended without '; jpg end'"));
        };
        if line == BLOCK_END {
            break;
        }
        let chunk = line
            .strip_prefix(COMMENT_PREFIX)
            .ok_or_else(|| format_error(format!("unexpected line in block body: '{line}'")))?;
        block.chunks.push(chunk.to_string());
    }
    block.terminated = lines.next() == Some(BLOCK_TERMINATOR);
    Ok(block)
}

impl ParsedBlock {
    /// Base64 payload with markers and line breaks removed.
    pub fn payload(&self) -> String {
        self.chunks.concat()
    }

    pub fn verify(&self) -> Result<BlockSummary> {
        let (x1, x2) = header_offsets(self.width);
        if self.width == 0 || self.height == 0 {
            return Err(format_error(format!(
                "thumbnail size {}*{} must be positive",
                self.width, self.height
            )));
        }
        if (self.x1, self.x2) != (x1, x2) {
            return Err(format_error(format!(
                "offsets {} {} do not match width {} (expected {x1} {x2})",
                self.x1, self.x2, self.width
            )));
        }
        if self.trailer != HEADER_TRAILER {
            return Err(format_error(format!(
                "trailer field is {}, expected {HEADER_TRAILER}",
                self.trailer
            )));
        }

        let chunk_size = self.chunks.first().map(String::len).unwrap_or(0);
        if let Some((last, full)) = self.chunks.split_last() {
            if let Some(pos) = full.iter().position(|chunk| chunk.len() != chunk_size) {
                return Err(format_error(format!(
                    "body line {} has {} characters, expected {chunk_size}",
                    pos + 1,
                    full[pos].len()
                )));
            }
            if last.len() > chunk_size {
                return Err(format_error(format!(
                    "last body line is longer than {chunk_size} characters"
                )));
            }
        }

        let jpeg = STANDARD
            .decode(self.payload())
            .map_err(|err| format_error(format!("payload is not valid base64: {err}")))?;
        if jpeg.len() != self.jpeg_len {
            return Err(format_error(format!(
                "header declares {} bytes but payload decodes to {}",
                self.jpeg_len,
                jpeg.len()
            )));
        }
        if !jpeg.is_empty() && !jpeg.starts_with(&JPEG_SOI) {
            return Err(format_error("payload is not a JPEG image"));
        }

        Ok(BlockSummary {
            width: self.width,
            height: self.height,
            jpeg_len: self.jpeg_len,
            chunk_size,
            body_lines: self.chunks.len(),
        })
    }
}

pub(crate) fn is_block_begin(line: &str) -> bool {
    line.strip_prefix(BLOCK_BEGIN)
        .is_some_and(|rest| rest.starts_with(' '))
}

fn parse_field<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| format_error(format!("invalid {name} '{value}' in header")))
}
