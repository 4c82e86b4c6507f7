//! CV document extraction: base64 document + type tag → best-effort plain text.
//!
//! PDF goes through `pdf-extract`. DOCX is read from the `word/document.xml`
//! part of the archive; legacy `.doc` takes the same path and fails unless the
//! file is really a DOCX with the old extension.
//!
//! Never fails towards the caller. Anything that goes wrong is logged and yields
//! an empty string, which the scorer treats as "no evidence".

use std::io::{Cursor, Read};

use base64::prelude::{Engine as _, BASE64_STANDARD};
use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;
use tracing::{info, warn};

const DOCX_BODY_PART: &str = "word/document.xml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Doc,
    Txt,
}

impl DocumentKind {
    /// From a type tag ("pdf", ".PDF", "application/pdf"); unknown tags read as text.
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim().trim_start_matches('.').to_lowercase();
        match tag.as_str() {
            "pdf" | "application/pdf" => DocumentKind::Pdf,
            "docx" | "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                DocumentKind::Docx
            }
            "doc" | "application/msword" => DocumentKind::Doc,
            _ => DocumentKind::Txt,
        }
    }

    /// From a file name's extension; no extension reads as text.
    pub fn from_file_name(name: &str) -> Self {
        name.rsplit_once('.')
            .map(|(_, ext)| Self::from_tag(ext))
            .unwrap_or(DocumentKind::Txt)
    }
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("PDF extraction error: {0}")]
    Pdf(String),

    #[error("PDF extraction panicked")]
    PdfPanic,

    #[error("DOCX archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("DOCX body error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Decodes and extracts `content_base64`. Returns "" on any failure.
pub fn extract_text(content_base64: &str, kind: DocumentKind) -> String {
    match try_extract_text(content_base64, kind) {
        Ok(text) => {
            let text = text.trim().to_string();
            if text.is_empty() {
                warn!("No text extracted from {kind:?} document");
            } else {
                info!("Extracted {} characters from {kind:?} document", text.len());
            }
            text
        }
        Err(e) => {
            warn!("CV extraction failed: {e}");
            String::new()
        }
    }
}

fn try_extract_text(content_base64: &str, kind: DocumentKind) -> Result<String, ExtractionError> {
    let bytes = BASE64_STANDARD.decode(content_base64.trim())?;
    match kind {
        DocumentKind::Txt => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        DocumentKind::Pdf => extract_pdf(&bytes),
        DocumentKind::Docx | DocumentKind::Doc => extract_docx(&bytes),
    }
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    // pdf-extract panics on some malformed inputs
    std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
        .map_err(|_| ExtractionError::PdfPanic)?
        .map_err(|e| ExtractionError::Pdf(e.to_string()))
}

fn extract_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive.by_name(DOCX_BODY_PART)?.read_to_string(&mut xml)?;
    docx_body_text(&xml)
}

/// Collects `<w:t>` runs; paragraphs become lines, tabs and breaks become spaces.
fn docx_body_text(xml: &str) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_run = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_run = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Event::Empty(e) if matches!(e.name().as_ref(), b"w:tab" | b"w:br") => text.push(' '),
            Event::Text(t) if in_run => text.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(text)
}
