//! Guide loading and keyword lookup
//!
//! The document is split into passages on blank lines. Long blocks (typical
//! of PDF text) are cut into line-aligned chunks. A lookup scores each passage
//! by how many distinct query terms it contains; ties keep document order.

use crate::error::{Error, Result};
use crate::pdf;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Terms shorter than this are ignored when matching
const MIN_TERM_LEN: usize = 3;

/// Blocks longer than this many bytes are cut at line boundaries
const MAX_PASSAGE_LEN: usize = 1200;

/// Common words that carry no retrieval signal
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "was", "with", "what", "where", "which", "when", "how", "who",
    "you", "your", "this", "that", "there", "from", "can", "any", "some", "about", "into", "have",
    "has", "its", "but", "not", "all", "our", "out", "best", "good", "tell",
];

/// A contiguous block of the guide
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Passage {
    /// Position in the document (0-based)
    pub index: usize,
    /// Passage text, trimmed
    pub text: String,
}

/// Read-only handle to the loaded guide
#[derive(Debug, Clone)]
pub struct KnowledgeCorpus {
    source: PathBuf,
    passages: Vec<Passage>,
    terms: Vec<HashSet<String>>,
}

impl KnowledgeCorpus {
    /// Load a guide from disk. PDFs are detected by their header or a `.pdf`
    /// extension; anything else must be UTF-8 text.
    ///
    /// # Errors
    /// `Error::NotFound` when the path does not exist; `Error::Load` when the
    /// file cannot be read or parsed, or contains no text.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::NotFound(path.to_path_buf()));
        }

        let load_error = |message: String| Error::Load {
            path: path.to_path_buf(),
            message,
        };

        let bytes = std::fs::read(path).map_err(|e| load_error(e.to_string()))?;
        let text = if pdf::is_pdf(path, &bytes) {
            debug!(bytes = bytes.len(), "Extracting PDF text");
            pdf::extract_text(&bytes).map_err(load_error)?
        } else {
            String::from_utf8(bytes).map_err(|_| load_error("not valid UTF-8 text".to_string()))?
        };

        let corpus = Self::from_text(path, &text);
        if corpus.is_empty() {
            return Err(load_error("document contains no text".to_string()));
        }

        info!(passages = corpus.len(), "Guide loaded");
        Ok(corpus)
    }

    /// Build a corpus from in-memory text
    #[must_use]
    pub fn from_text(source: impl Into<PathBuf>, text: &str) -> Self {
        let passages: Vec<Passage> = split_passages(text)
            .into_iter()
            .enumerate()
            .map(|(index, text)| Passage { index, text })
            .collect();
        let terms = passages.iter().map(|p| terms_of(&p.text)).collect();

        Self {
            source: source.into(),
            passages,
            terms,
        }
    }

    /// Where the guide was loaded from
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Number of passages
    #[must_use]
    pub fn len(&self) -> usize {
        self.passages.len()
    }

    /// Whether the corpus has no passages
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Passages relevant to `query`, best first, at most `limit`
    #[must_use]
    pub fn lookup(&self, query: &str, limit: usize) -> Vec<&Passage> {
        let query_terms = terms_of(query);
        if query_terms.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(usize, &Passage)> = self
            .passages
            .iter()
            .zip(&self.terms)
            .filter_map(|(passage, terms)| {
                let score = query_terms.iter().filter(|t| terms.contains(*t)).count();
                (score > 0).then_some((score, passage))
            })
            .collect();

        // stable sort keeps document order among equal scores
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.truncate(limit);

        debug!(query = %query, matches = scored.len(), "Guide lookup");
        scored.into_iter().map(|(_, p)| p).collect()
    }
}

fn split_passages(text: &str) -> Vec<String> {
    let mut passages = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            flush_block(&mut block, &mut passages);
        } else {
            block.push(line.trim_end());
        }
    }
    flush_block(&mut block, &mut passages);

    passages
}

fn flush_block(block: &mut Vec<&str>, passages: &mut Vec<String>) {
    let mut chunk = String::new();
    for line in block.drain(..) {
        if !chunk.is_empty() && chunk.len() + line.len() >= MAX_PASSAGE_LEN {
            push_trimmed(&mut chunk, passages);
        }
        if !chunk.is_empty() {
            chunk.push('\n');
        }
        chunk.push_str(line);
    }
    push_trimmed(&mut chunk, passages);
}

fn push_trimmed(chunk: &mut String, passages: &mut Vec<String>) {
    let text = chunk.trim();
    if !text.is_empty() {
        passages.push(text.to_string());
    }
    chunk.clear();
}

fn terms_of(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .map(str::to_lowercase)
        .filter(|w| w.chars().count() >= MIN_TERM_LEN && !STOPWORDS.contains(&w.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const GUIDE: &str = "\
# Bangalore Guide

Lalbagh Botanical Garden hosts a flower show every January.

Koramangala is a lively neighborhood with startups, cafes and rent that
rises every year.

Namma Metro connects Whitefield to the city center; metro cards save money.

Indiranagar is a neighborhood known for pubs and restaurants.
";

    #[test]
    fn test_split_passages() {
        let corpus = KnowledgeCorpus::from_text("guide.md", GUIDE);
        assert_eq!(corpus.len(), 5);
        assert_eq!(corpus.passages[0].text, "# Bangalore Guide");
        assert!(corpus.passages[2].text.contains("rises every year."));
    }

    #[test]
    fn test_lookup_ranks_by_overlap() {
        let corpus = KnowledgeCorpus::from_text("guide.md", GUIDE);
        let hits = corpus.lookup("Which neighborhood has startups and cafes?", 3);
        assert_eq!(hits[0].index, 2);
        // second neighborhood passage matches only "neighborhood"
        assert_eq!(hits[1].index, 4);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_lookup_respects_limit_and_case() {
        let corpus = KnowledgeCorpus::from_text("guide.md", GUIDE);
        let hits = corpus.lookup("NEIGHBORHOOD", 1);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].index, 2);
    }

    #[test]
    fn test_lookup_no_terms() {
        let corpus = KnowledgeCorpus::from_text("guide.md", GUIDE);
        assert!(corpus.lookup("", 3).is_empty());
        assert!(corpus.lookup("is it the", 3).is_empty());
        assert!(corpus.lookup("submarine", 3).is_empty());
    }

    #[test]
    fn test_load_not_found() {
        let err = KnowledgeCorpus::load("/definitely/not/here/guide.md").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(GUIDE.as_bytes()).unwrap();

        let corpus = KnowledgeCorpus::load(file.path()).unwrap();
        assert_eq!(corpus.len(), 5);
        assert_eq!(corpus.source(), file.path());
    }

    #[test]
    fn test_load_empty_file_is_load_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = KnowledgeCorpus::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Load { .. }));
    }

    /// Single-page PDF with one Helvetica text line per entry
    fn pdf_with_lines(lines: &[&str]) -> Vec<u8> {
        let mut content = String::from("BT /F1 12 Tf 72 720 Td");
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                content.push_str(" 0 -18 Td");
            }
            content.push_str(&format!(" ({line}) Tj"));
        }
        content.push_str(" ET");

        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R \
             /Resources << /Font << /F1 5 0 R >> >> >>"
                .to_string(),
            format!("<< /Length {} >>\nstream\n{content}\nendstream", content.len()),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica \
             /Encoding /WinAnsiEncoding >>"
                .to_string(),
        ];

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
        }
        let xref = pdf.len();
        let size = objects.len() + 1;
        pdf.extend_from_slice(format!("xref\n0 {size}\n0000000000 65535 f \n").as_bytes());
        for offset in offsets {
            pdf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        pdf.extend_from_slice(
            format!("trailer\n<< /Size {size} /Root 1 0 R >>\nstartxref\n{xref}\n%%EOF\n")
                .as_bytes(),
        );
        pdf
    }

    #[test]
    fn test_load_pdf_guide() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(&pdf_with_lines(&[
            "Namma Metro connects Whitefield to the city center.",
            "Lalbagh hosts a flower show every January.",
        ]))
        .unwrap();

        let corpus = KnowledgeCorpus::load(file.path()).unwrap();
        assert!(!corpus.is_empty());

        let hits = corpus.lookup("metro whitefield", 1);
        assert_eq!(hits.len(), 1);
        assert!(hits[0].text.contains("Whitefield"));
    }

    #[test]
    fn test_unreadable_pdf_is_load_error() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"%PDF-1.4\ntruncated").unwrap();
        let err = KnowledgeCorpus::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Load { .. }));
    }

    #[test]
    fn test_long_block_is_chunked_at_lines() {
        let line = "Whitefield tech parks sit along the Outer Ring Road corridor.";
        let block = vec![line; 60].join("\n");
        let corpus = KnowledgeCorpus::from_text("guide.pdf", &block);

        assert!(corpus.len() > 1);
        for passage in &corpus.passages {
            assert!(passage.text.len() < MAX_PASSAGE_LEN);
            assert!(passage.text.lines().all(|l| l == line));
        }
    }

    #[test]
    fn test_load_binary_file_is_load_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00, 0x9f]).unwrap();
        let err = KnowledgeCorpus::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Load { .. }));
    }
}
