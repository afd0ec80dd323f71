// ContentCal - platform/fs.rs
//
// Filesystem helpers for reading calendar exports.

use std::io;
use std::path::Path;

/// Byte-order mark some spreadsheet tools prepend to CSV exports.
const UTF8_BOM: char = '\u{feff}';

/// Size of the file at `path` in bytes.
pub fn file_size(path: &Path) -> io::Result<u64> {
    Ok(std::fs::metadata(path)?.len())
}

/// Read the full content of a file as a string.
///
/// For files with invalid UTF-8, uses lossy conversion. A leading UTF-8 BOM
/// is stripped so the first header cell compares cleanly.
pub fn read_file_lossy(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(text.strip_prefix(UTF8_BOM).unwrap_or(&text).to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_strips_bom_and_replaces_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cal.csv");
        let mut bytes = "\u{feff}ID,Date\n".as_bytes().to_vec();
        bytes.extend_from_slice(&[b'C', 0xFF, b'\n']);
        std::fs::write(&path, &bytes).unwrap();

        let text = read_file_lossy(&path).unwrap();
        assert!(text.starts_with("ID,Date"));
        assert!(text.contains('\u{fffd}'));
        assert_eq!(file_size(&path).unwrap(), bytes.len() as u64);
    }
}
