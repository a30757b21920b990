//! Column conversions between LSP UTF-16 code units and byte offsets within a single line.
//!
//! Positions handed out by language clients count UTF-16 code units, so a non-BMP character
//! (like 😀) takes two columns while the editor stores UTF-8 lines.

/// Byte offset of the UTF-16 column `character` in `line`.
///
/// Returns `None` when the column is past end-of-line or falls inside a surrogate pair.
pub fn byte_offset(line: &str, character: u32) -> Option<usize> {
    let target = character as usize;
    let mut units = 0usize;
    for (offset, ch) in line.char_indices() {
        if units == target {
            return Some(offset);
        }
        units += ch.len_utf16();
        if units > target {
            return None;
        }
    }
    (units == target).then_some(line.len())
}

/// UTF-16 column of the byte offset `offset` in `line`.
///
/// Returns `None` when the offset is out of bounds or not on a character boundary.
pub fn utf16_column(line: &str, offset: usize) -> Option<u32> {
    if offset > line.len() || !line.is_char_boundary(offset) {
        return None;
    }
    let units: usize = line[..offset].chars().map(char::len_utf16).sum();
    u32::try_from(units).ok()
}

/// UTF-16 length of `line`.
pub fn utf16_len(line: &str) -> u32 {
    let units: usize = line.chars().map(char::len_utf16).sum();
    u32::try_from(units).unwrap_or(u32::MAX)
}
