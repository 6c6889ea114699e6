//! Length contract for generated paragraphs
//!
//! Bounds the fused paragraph to 450-500 characters: anything longer is cut
//! to exactly 500, anything shorter than 450 fails when enforcement is on.
//! Lengths are counted in characters, not bytes.

use crate::{Error, Result};

pub const MIN_PARAGRAPH_CHARS: usize = 450;
pub const MAX_PARAGRAPH_CHARS: usize = 500;

/// Apply the length contract to a raw backend paragraph.
///
/// Returns the (possibly truncated) paragraph and whether truncation
/// happened. Truncation above the maximum is unconditional; the minimum is
/// only checked when `enforce` is true. Both boundaries are in contract.
pub fn apply(paragraph: String, enforce: bool) -> Result<(String, bool)> {
    let length = paragraph.chars().count();

    if length > MAX_PARAGRAPH_CHARS {
        let cut = paragraph
            .char_indices()
            .nth(MAX_PARAGRAPH_CHARS)
            .map(|(index, _)| index)
            .unwrap_or(paragraph.len());
        let mut truncated = paragraph;
        truncated.truncate(cut);
        return Ok((truncated, true));
    }

    if enforce && length < MIN_PARAGRAPH_CHARS {
        return Err(Error::LengthViolation { length });
    }

    Ok((paragraph, false))
}
