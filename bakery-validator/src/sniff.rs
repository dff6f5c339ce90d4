//! Binary/text detection — a pluggable capability so scans can skip
//! non-text artifacts without trusting file extensions.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Sample size for the content heuristic.
const SAMPLE_LEN: u64 = 1024;

/// Reports whether a file's content is binary. Injected into the scanning
/// operations so tests (or callers with an extension allowlist) can swap the
/// heuristic out.
pub trait BinarySniff {
    fn is_binary(&self, path: &Path) -> io::Result<bool>;
}

/// Default content-sniffing heuristic: a leading NUL byte or a high share of
/// non-text bytes in the first [`SAMPLE_LEN`] bytes marks the file binary.
/// Empty files are text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentSniffer;

impl BinarySniff for ContentSniffer {
    fn is_binary(&self, path: &Path) -> io::Result<bool> {
        let file = File::open(path)?;
        let mut sample = Vec::with_capacity(SAMPLE_LEN as usize);
        file.take(SAMPLE_LEN).read_to_end(&mut sample)?;
        Ok(looks_binary(&sample))
    }
}

fn looks_binary(sample: &[u8]) -> bool {
    if sample.is_empty() {
        return false;
    }
    if sample.contains(&0) {
        return true;
    }
    let non_text = sample.iter().filter(|b| !is_text_byte(**b)).count();
    // Same 30% threshold the classic binary-or-not heuristic uses.
    non_text * 100 / sample.len() > 30
}

fn is_text_byte(b: u8) -> bool {
    // Printable ASCII, common control whitespace, or the upper half left to
    // whatever text encoding the file uses.
    matches!(b, 0x07..=0x0d | 0x1b | 0x20..=0x7e) || b >= 0x80
}
