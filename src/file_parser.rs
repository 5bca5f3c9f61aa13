// src/file_parser.rs
//! Turns a base64-encoded CSV or PDF upload into plain context text.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::FileParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Pdf,
}

impl FileKind {
    pub fn from_hint(hint: &str) -> Option<Self> {
        match hint.trim().to_ascii_lowercase().as_str() {
            "csv" | "text/csv" => Some(FileKind::Csv),
            "pdf" | "application/pdf" => Some(FileKind::Pdf),
            _ => None,
        }
    }

    /// PDF magic first, then text containing commas and newlines is CSV.
    /// Anything else is handed to the PDF reader.
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.starts_with(b"%PDF") {
            return FileKind::Pdf;
        }
        match std::str::from_utf8(bytes) {
            Ok(text) if text.contains(',') && text.contains('\n') => FileKind::Csv,
            _ => FileKind::Pdf,
        }
    }
}

pub fn decode_base64(encoded: &str) -> Result<Vec<u8>, FileParseError> {
    let trimmed = encoded.trim();
    // Browsers hand over data URLs; keep only the payload.
    let payload = match trimmed.split_once(";base64,") {
        Some((_, data)) => data,
        None => trimmed,
    };
    if payload.is_empty() {
        return Err(FileParseError::Empty);
    }

    let cleaned: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(STANDARD.decode(cleaned)?)
}

/// Render CSV rows as a right-aligned text table, header first.
pub fn parse_csv(bytes: &[u8]) -> Result<String, FileParseError> {
    let text = String::from_utf8(bytes.to_vec())?;
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }

    let columns = rows.iter().map(Vec::len).chain([headers.len()]).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in std::iter::once(&headers).chain(rows.iter()) {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let render = |row: &Vec<String>| {
        widths
            .iter()
            .enumerate()
            .map(|(i, width)| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                format!("{:>width$}", cell, width = *width)
            })
            .collect::<Vec<_>>()
            .join(" ")
    };

    let mut lines = vec![render(&headers)];
    lines.extend(rows.iter().map(render));

    tracing::info!("Parsed CSV with {} rows and {} columns", rows.len(), columns);
    Ok(lines.join("\n"))
}

pub fn parse_pdf(bytes: &[u8]) -> Result<String, FileParseError> {
    let text = pdf_extract::extract_text_from_mem(bytes).map_err(|e| FileParseError::Pdf(e.to_string()))?;
    let text = text.trim().to_string();
    tracing::info!("Extracted {} chars of text from PDF", text.len());
    Ok(text)
}

/// Decode and parse an upload. `hint` names the type ("csv" / "pdf"); without
/// one the type is sniffed from the bytes.
pub fn parse_file_content(encoded: &str, hint: Option<&str>) -> Result<String, FileParseError> {
    let bytes = decode_base64(encoded)?;
    if bytes.is_empty() {
        return Err(FileParseError::Empty);
    }

    let kind = hint
        .and_then(FileKind::from_hint)
        .unwrap_or_else(|| FileKind::detect(&bytes));

    match kind {
        FileKind::Csv => parse_csv(&bytes),
        FileKind::Pdf => parse_pdf(&bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(text: &str) -> String {
        STANDARD.encode(text)
    }

    #[test]
    fn test_detects_csv_and_pdf() {
        assert_eq!(FileKind::detect(b"name,price\nshoe,99\n"), FileKind::Csv);
        assert_eq!(FileKind::detect(b"%PDF-1.7\n..."), FileKind::Pdf);
        assert_eq!(FileKind::detect(b"just words"), FileKind::Pdf);
        assert_eq!(FileKind::from_hint("CSV"), Some(FileKind::Csv));
        assert_eq!(FileKind::from_hint("docx"), None);
    }

    #[test]
    fn test_csv_renders_aligned_table() {
        let text = parse_file_content(&encode("product,price\nrunner,120\ntrail shoe,95\n"), None).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "   product price");
        assert_eq!(lines[1], "    runner   120");
        assert_eq!(lines[2], "trail shoe    95");
    }

    #[test]
    fn test_data_url_prefix_is_stripped() {
        let encoded = format!("data:text/csv;base64,{}", encode("a,b\n1,2\n"));
        let text = parse_file_content(&encoded, Some("csv")).unwrap();
        assert!(text.contains('1'));
        assert!(text.contains('b'));
    }

    /// Single-page PDF drawing `text` in Helvetica, with a valid xref table.
    fn one_page_pdf(text: &str) -> Vec<u8> {
        let stream = format!("BT /F1 24 Tf 72 720 Td ({}) Tj ET", text);
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>".to_string(),
            format!("<< /Length {} >>\nstream\n{}\nendstream", stream.len(), stream),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>".to_string(),
        ];

        let mut pdf = String::from("%PDF-1.4\n");
        let mut offsets = Vec::new();
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
        }

        let xref_start = pdf.len();
        pdf.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
        for offset in offsets {
            pdf.push_str(&format!("{:010} 00000 n \n", offset));
        }
        pdf.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_start
        ));
        pdf.into_bytes()
    }

    #[test]
    fn test_pdf_text_is_extracted() {
        let encoded = STANDARD.encode(one_page_pdf("Spring sale"));
        let text = parse_file_content(&encoded, None).unwrap();
        assert!(text.contains("Spring"));
        assert!(text.contains("sale"));
    }

    #[test]
    fn test_pdf_hint_overrides_sniffing() {
        let text = parse_file_content(&STANDARD.encode(one_page_pdf("Catalog")), Some("application/pdf")).unwrap();
        assert!(text.contains("Catalog"));
    }

    #[test]
    fn test_invalid_base64() {
        assert!(matches!(
            parse_file_content("***not base64***", None),
            Err(FileParseError::Base64(_))
        ));
        assert!(matches!(parse_file_content("  ", None), Err(FileParseError::Empty)));
    }
}
