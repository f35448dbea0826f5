use thumbgen_types::Result;

use crate::{format_error, parse::is_block_begin, GcodeBlock, BLOCK_END, BLOCK_TERMINATOR};

/// Places `block` at the top of `existing` G-code, replacing the first
/// thumbnail block already present. Line endings of the remaining G-code are
/// kept as they were.
pub fn inject_block(existing: &str, block: &GcodeBlock) -> Result<String> {
    let segments: Vec<&str> = existing.split_inclusive('\n').collect();

    let mut remaining = segments.clone();
    if let Some(begin) = segments.iter().position(|s| is_block_begin(content(s))) {
        let end = segments[begin..]
            .iter()
            .position(|s| content(s) == BLOCK_END)
            .map(|offset| begin + offset)
            .ok_or_else(|| format_error("existing thumbnail block has no '; jpg end' line"))?;
        let last = match segments.get(end + 1) {
            Some(next) if content(next) == BLOCK_TERMINATOR => end + 1,
            _ => end,
        };
        remaining.drain(begin..=last);
    }

    let mut output = block.to_text();
    output.push('\n');
    output.extend(remaining);
    Ok(output)
}

fn content(segment: &str) -> &str {
    segment.trim_end_matches(['\n', '\r'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format_block;
    use std::num::NonZeroUsize;
    use thumbgen_types::snapshot::{EncodedSnapshot, ThumbnailSize};

    fn block(payload: &str) -> GcodeBlock {
        format_block(
            &EncodedSnapshot::new(payload.into(), payload.len() * 3 / 4),
            ThumbnailSize::new(200, 200).expect("size"),
            NonZeroUsize::new(4).expect("chunk"),
        )
    }

    #[test]
    fn prepend_block_to_plain_gcode() {
        let gcode = ";FLAVOR:Marlin\nG28\nG1 X10 Y10\n";
        let injected = inject_block(gcode, &block("QUJDREVG")).expect("inject");
        assert_eq!(
            injected,
            "; jpg begin 200*200 6 3 197 500\n; QUJD\n; REVG\n; jpg end\n;\n;FLAVOR:Marlin\nG28\nG1 X10 Y10\n"
        );
    }

    #[test]
    fn injecting_twice_is_idempotent() {
        let gcode = "G28\r\nG1 X10\r\nM84";
        let once = inject_block(gcode, &block("QUJDREVG")).expect("first inject");
        let twice = inject_block(&once, &block("QUJDREVG")).expect("second inject");
        assert_eq!(once, twice);
        assert!(twice.ends_with("\nG28\r\nG1 X10\r\nM84"));
    }

    #[test]
    fn replace_existing_block() {
        let gcode = "G90\n; jpg begin 8*8 3 1 7 500\n; QUJD\n; jpg end\n;\nG28\n";
        let injected = inject_block(gcode, &block("REVG")).expect("inject");
        assert_eq!(
            injected,
            "; jpg begin 200*200 3 3 197 500\n; REVG\n; jpg end\n;\nG90\nG28\n"
        );
        assert_eq!(injected.matches("; jpg begin").count(), 1);
    }

    #[test]
    fn inject_into_empty_file() {
        let injected = inject_block("", &block("QUJD")).expect("inject");
        assert_eq!(injected, "; jpg begin 200*200 3 3 197 500\n; QUJD\n; jpg end\n;\n");
    }

    #[test]
    fn reject_unterminated_existing_block() {
        let gcode = "; jpg begin 8*8 3 1 7 500\n; QUJD\nG28\n";
        assert!(inject_block(gcode, &block("QUJD")).is_err());
    }
}
