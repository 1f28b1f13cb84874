//! CSV loading with encoding and delimiter auto-detection.
//!
//! Converts a delimited file into a [`RawTable`]. No tourism-specific
//! logic here: the loader does not know or care which columns the
//! reshape stage will later expect.

use std::path::Path;

use crate::error::LoadError;
use crate::table::RawTable;

/// Metadata about how a file was loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadMeta {
    /// Detected encoding.
    pub encoding: String,
    /// Detected delimiter.
    pub delimiter: char,
}

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let (charset, _, _) = chardet::detect(bytes);

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding.
pub fn decode_content(bytes: &[u8], encoding: &str) -> Result<String, LoadError> {
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8(bytes.to_vec())
            .or_else(|_| Ok(String::from_utf8_lossy(bytes).to_string())),
        "iso-8859-1" | "latin-1" | "latin1" => {
            Ok(encoding_rs::ISO_8859_15.decode(bytes).0.to_string())
        }
        "windows-1252" | "cp1252" => Ok(encoding_rs::WINDOWS_1252.decode(bytes).0.to_string()),
        _ => {
            // Fallback: UTF-8 with lossy conversion
            Ok(String::from_utf8_lossy(bytes).to_string())
        }
    }
}

/// Detect the delimiter by counting occurrences in the first line.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Load a CSV file with auto-detection of encoding and delimiter.
///
/// # Example
/// ```ignore
/// let (table, meta) = load_table("International Tourism.csv")?;
/// println!("Encoding: {}, Delimiter: '{}'", meta.encoding, meta.delimiter);
/// println!("Rows: {}", table.len());
/// ```
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<(RawTable, LoadMeta), LoadError> {
    let bytes = std::fs::read(path.as_ref())?;
    load_bytes(&bytes)
}

/// Load CSV bytes with auto-detection of encoding and delimiter.
pub fn load_bytes(bytes: &[u8]) -> Result<(RawTable, LoadMeta), LoadError> {
    if bytes.is_empty() {
        return Err(LoadError::EmptyFile);
    }

    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
    let delimiter = detect_delimiter(content);

    let table = parse_content(content, delimiter)?;

    Ok((table, LoadMeta { encoding, delimiter }))
}

/// Parse decoded CSV content with an explicit delimiter.
///
/// Quoted fields may contain the delimiter (series names carry
/// embedded commas), so parsing goes through the csv crate rather
/// than line splitting. Rows consisting only of empty cells are
/// dropped; ragged rows are normalized by [`RawTable::new`].
pub fn parse_content(content: &str, delimiter: char) -> Result<RawTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::NoHeaders);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable::new(headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_simple_csv() {
        let (table, meta) = load_bytes(b"name,age\nAlice,30\nBob,25").unwrap();
        assert_eq!(meta.delimiter, ',');
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, "name"), Some("Alice"));
        assert_eq!(table.cell(1, "age"), Some("25"));
    }

    #[test]
    fn test_quoted_field_with_embedded_delimiter() {
        let csv = "Series Name,Value\n\"International tourism, number of arrivals\",100";
        let (table, _) = load_bytes(csv.as_bytes()).unwrap();
        assert_eq!(
            table.cell(0, "Series Name"),
            Some("International tourism, number of arrivals")
        );
        assert_eq!(table.cell(0, "Value"), Some("100"));
    }

    #[test]
    fn test_bom_stripped() {
        let (table, _) = load_bytes("\u{feff}a,b\n1,2".as_bytes()).unwrap();
        assert_eq!(table.cell(0, "a"), Some("1"));
    }

    #[test]
    fn test_empty_rows_dropped() {
        let (table, _) = load_bytes(b"a,b\n1,2\n,\n3,4").unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_empty_file_error() {
        match load_bytes(b"") {
            Err(LoadError::EmptyFile) => {}
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_detect_delimiter_comma() {
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), ',');
    }

    #[test]
    fn test_detect_delimiter_semicolon() {
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), ';');
    }

    #[test]
    fn test_detect_delimiter_tab() {
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3"), '\t');
    }

    #[test]
    fn test_detect_delimiter_pipe() {
        assert_eq!(detect_delimiter("a|b|c\n1|2|3"), '|');
    }

    #[test]
    fn test_load_table_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "a,b\n1,2\n3,4").unwrap();

        let (table, meta) = load_table(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(meta.encoding, "utf-8");
    }

    #[test]
    fn test_load_table_missing_file() {
        match load_table("/no/such/file.csv") {
            Err(LoadError::Io(_)) => {}
            other => panic!("unexpected: {:?}", other),
        }
    }
}
