//! Binary/text gate.
//!
//! A file is analyzable text when the first [`SAMPLE_SIZE`] bytes contain no
//! NUL byte and decode as UTF-8. This is a heuristic: text in other encodings
//! is reported as binary.

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Number of leading bytes inspected.
pub const SAMPLE_SIZE: usize = 8000;

/// Decide whether a byte sample looks like UTF-8 text.
///
/// A multi-byte character cut off by the end of the sample does not count as
/// a decode failure.
pub fn is_text_bytes(sample: &[u8]) -> bool {
    if sample.contains(&0) {
        return false;
    }
    match std::str::from_utf8(sample) {
        Ok(_) => true,
        // error_len() is None only for an incomplete sequence at the very end
        Err(e) => e.error_len().is_none() && sample.len() - e.valid_up_to() < 4,
    }
}

/// Check whether a file is binary by sampling its first bytes.
///
/// Unreadable files are reported as binary so they are never analyzed.
pub fn is_binary(path: &Path) -> bool {
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "cannot open file, treating as binary");
            return true;
        }
    };

    let mut sample = Vec::with_capacity(SAMPLE_SIZE);
    if let Err(e) = file
        .by_ref()
        .take(SAMPLE_SIZE as u64)
        .read_to_end(&mut sample)
    {
        tracing::debug!(path = %path.display(), error = %e, "cannot read file, treating as binary");
        return true;
    }

    !is_text_bytes(&sample)
}
