//! Thumbnail comment blocks: formatting, parsing, injection and file output.
//!
//! A block looks like this:
//!
//! ```text
//! ; jpg begin 200*200 5312 3 197 500
//! ; /9j/4AAQSkZJRgABAgAAAQABAAD/wAARCADIAMgDAREAAhEBAxEB/9sAQwAIBgYHBgUIBwcHCQ
//! ; ...
//! ; jpg end
//! ;
//! ```
//!
//! The header carries the thumbnail size, the JPEG byte length before base64
//! encoding, two offsets derived from the width and a fixed trailer field.

mod block;
mod inject;
mod parse;
mod writer;

pub use block::{format_block, header_offsets, GcodeBlock};
pub use inject::inject_block;
pub use parse::{parse_block, BlockSummary, ParsedBlock};
pub use writer::{write_block, write_injected};

use thumbgen_types::ThumbgenError;

pub const BLOCK_BEGIN: &str = "; jpg begin";
pub const BLOCK_END: &str = "; jpg end";
pub const BLOCK_TERMINATOR: &str = ";";
pub const COMMENT_PREFIX: &str = "; ";
/// Last header field. Firmware expects this exact value.
pub const HEADER_TRAILER: u32 = 500;

pub fn format_error(message: impl Into<String>) -> ThumbgenError {
    ThumbgenError::Format(message.into())
}

pub fn write_error(message: impl Into<String>) -> ThumbgenError {
    ThumbgenError::Write(message.into())
}
