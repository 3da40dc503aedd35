// Line sources: split in-memory text or read a chart file from disk.

use std::path::Path;

use encoding_rs::{EUC_JP, Encoding, SHIFT_JIS, UTF_8};

use crate::error::ChartError;

/// Split chart text into lines, keeping order. Handles `\n` and `\r\n`.
pub fn lines_from_str(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

/// Read a chart file and split it into lines.
pub fn read_chart_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>, ChartError> {
    let path = path.as_ref();
    let raw = std::fs::read(path).map_err(|e| ChartError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let (content, encoding) = decode_chart_bytes(&raw);
    log::debug!(
        "read {} bytes from {} as {}",
        raw.len(),
        path.display(),
        encoding.name()
    );
    Ok(lines_from_str(&content))
}

/// Decode chart bytes, returning the text and the encoding it was read as.
///
/// A byte order mark decides the encoding outright. Otherwise the first of
/// UTF-8, Shift_JIS and EUC-JP that decodes cleanly wins, and bytes none of
/// them accept are read as Shift_JIS with replacement characters.
pub fn decode_chart_bytes(raw: &[u8]) -> (String, &'static Encoding) {
    if let Some((encoding, bom_len)) = Encoding::for_bom(raw) {
        let (text, _) = encoding.decode_without_bom_handling(&raw[bom_len..]);
        return (text.into_owned(), encoding);
    }

    for encoding in [UTF_8, SHIFT_JIS, EUC_JP] {
        if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(raw) {
            return (text.into_owned(), encoding);
        }
    }

    let (text, _) = SHIFT_JIS.decode_without_bom_handling(raw);
    (text.into_owned(), SHIFT_JIS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn lines_from_str_handles_crlf() {
        let lines = lines_from_str("#TITLE a\r\n#BPM 120\n\n#00011:01");
        assert_eq!(lines, vec!["#TITLE a", "#BPM 120", "", "#00011:01"]);
    }

    #[test]
    fn decode_utf8() {
        let (text, encoding) = decode_chart_bytes("UTF-8テスト".as_bytes());
        assert_eq!(text, "UTF-8テスト");
        assert_eq!(encoding, UTF_8);
    }

    #[test]
    fn decode_strips_bom() {
        let mut raw = vec![0xEF, 0xBB, 0xBF];
        raw.extend_from_slice(b"#TITLE x");
        assert_eq!(decode_chart_bytes(&raw), ("#TITLE x".to_string(), UTF_8));
    }

    #[test]
    fn decode_shift_jis() {
        let (bytes, _, _) = SHIFT_JIS.encode("#TITLE 曲名");
        let (text, encoding) = decode_chart_bytes(&bytes);
        assert_eq!(text, "#TITLE 曲名");
        assert_eq!(encoding, SHIFT_JIS);
    }

    #[test]
    fn decode_utf16_with_bom() {
        let mut raw = vec![0xFF, 0xFE];
        for unit in "#BPM 150".encode_utf16() {
            raw.extend_from_slice(&unit.to_le_bytes());
        }
        let (text, encoding) = decode_chart_bytes(&raw);
        assert_eq!(text, "#BPM 150");
        assert_eq!(encoding, encoding_rs::UTF_16LE);
    }

    #[test]
    fn undecodable_bytes_fall_back_to_lossy_shift_jis() {
        // 0xFF is invalid in UTF-8, Shift_JIS and EUC-JP alike
        let (text, encoding) = decode_chart_bytes(&[b'#', 0xFF, b'A']);
        assert_eq!(encoding, SHIFT_JIS);
        assert_eq!(text, "#\u{FFFD}A");
    }

    #[test]
    fn read_chart_file_splits_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "#TITLE From Disk\n#00011:01\n").unwrap();
        let lines = read_chart_file(file.path()).unwrap();
        assert_eq!(lines, vec!["#TITLE From Disk", "#00011:01"]);
    }

    #[test]
    fn read_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_chart_file(dir.path().join("missing.bms")).unwrap_err();
        assert!(matches!(err, ChartError::FileRead { .. }));
        assert!(err.to_string().contains("missing.bms"));
    }
}
