use std::num::NonZeroUsize;

use thumbgen_types::snapshot::{EncodedSnapshot, ThumbnailSize};

use crate::{BLOCK_BEGIN, BLOCK_END, BLOCK_TERMINATOR, COMMENT_PREFIX, HEADER_TRAILER};

/// Returns the two header offsets for a thumbnail `width`: `x1 = width / 80 + 1`
/// and `x2 = width - x1`.
pub fn header_offsets(width: u32) -> (u32, u32) {
    let x1 = width / 80 + 1;
    (x1, width.saturating_sub(x1))
}

/// Ordered comment lines of one thumbnail block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcodeBlock {
    lines: Vec<String>,
}

impl GcodeBlock {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn header(&self) -> &str {
        &self.lines[0]
    }

    /// Base64 payload lines, markers included.
    pub fn body(&self) -> &[String] {
        &self.lines[1..self.lines.len() - 2]
    }

    /// Newline-joined block without a trailing newline.
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Wraps an encoded snapshot in header, body and footer comment lines.
pub fn format_block(
    snapshot: &EncodedSnapshot,
    size: ThumbnailSize,
    chunk_size: NonZeroUsize,
) -> GcodeBlock {
    let (x1, x2) = header_offsets(size.width());
    let mut lines = Vec::with_capacity(snapshot.base64().len() / chunk_size.get() + 4);
    lines.push(format!(
        "{BLOCK_BEGIN} {}*{} {} {x1} {x2} {HEADER_TRAILER}",
        size.width(),
        size.height(),
        snapshot.jpeg_len()
    ));

    let chars: Vec<char> = snapshot.base64().chars().collect();
    lines.extend(
        chars
            .chunks(chunk_size.get())
            .map(|chunk| format!("{COMMENT_PREFIX}{}", chunk.iter().collect::<String>())),
    );

    lines.push(BLOCK_END.to_string());
    lines.push(BLOCK_TERMINATOR.to_string());
    GcodeBlock { lines }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).expect("non-zero chunk size")
    }

    #[test]
    fn offsets_follow_width() {
        assert_eq!(header_offsets(200), (3, 197));
        assert_eq!(header_offsets(1), (1, 0));
        assert_eq!(header_offsets(79), (1, 78));
        assert_eq!(header_offsets(80), (2, 78));
        assert_eq!(header_offsets(480), (7, 473));
        for width in 1..=2000 {
            let (x1, x2) = header_offsets(width);
            assert_eq!(x1, width / 80 + 1);
            assert_eq!(x1 + x2, width);
        }
    }

    #[test]
    fn format_default_thumbnail_header() {
        let snapshot = EncodedSnapshot::new("QUJD".into(), 3);
        let size = ThumbnailSize::new(200, 200).expect("size");
        let block = format_block(&snapshot, size, chunk(76));
        assert_eq!(
            block.lines(),
            &[
                "; jpg begin 200*200 3 3 197 500".to_string(),
                "; QUJD".to_string(),
                "; jpg end".to_string(),
                ";".to_string(),
            ]
        );
        assert_eq!(
            block.to_text(),
            "; jpg begin 200*200 3 3 197 500\n; QUJD\n; jpg end\n;"
        );
    }

    #[test]
    fn split_payload_into_fixed_chunks() {
        let payload: String = "ABCDEFGHIJ".repeat(17);
        let snapshot = EncodedSnapshot::new(payload.clone(), 120);
        let size = ThumbnailSize::new(96, 64).expect("size");
        let block = format_block(&snapshot, size, chunk(76));

        // 170 chars at 76 per line: 76 + 76 + 18
        let body = block.body();
        assert_eq!(body.len(), 3);
        assert_eq!(body[0].len(), 2 + 76);
        assert_eq!(body[1].len(), 2 + 76);
        assert_eq!(body[2].len(), 2 + 18);
        assert!(body.iter().all(|line| line.starts_with("; ")));

        let rebuilt: String = body.iter().map(|line| &line[2..]).collect();
        assert_eq!(rebuilt, payload);
        assert_eq!(block.header(), "; jpg begin 96*64 120 2 94 500");
    }

    #[test]
    fn line_count_is_ceiling_of_payload_over_chunk() {
        let size = ThumbnailSize::new(10, 10).expect("size");
        for (len, chunk_size) in [(1, 76), (76, 76), (77, 76), (152, 76), (100, 7), (5, 1)] {
            let snapshot = EncodedSnapshot::new("A".repeat(len), len);
            let block = format_block(&snapshot, size, chunk(chunk_size));
            let expected = len.div_ceil(chunk_size);
            assert_eq!(block.body().len(), expected, "len={len} chunk={chunk_size}");
            let last = block.body().last().expect("at least one line");
            assert!(last.len() - 2 <= chunk_size);
        }
    }

    #[test]
    fn empty_payload_keeps_header_and_footer() {
        let snapshot = EncodedSnapshot::new(String::new(), 0);
        let size = ThumbnailSize::new(1, 1).expect("size");
        let block = format_block(&snapshot, size, chunk(76));
        assert!(block.body().is_empty());
        assert_eq!(block.to_text(), "; jpg begin 1*1 0 1 0 500\n; jpg end\n;");
    }
}
