//! Concierge Knowledge - Static City Guide Corpus
//!
//! The guide is loaded once at startup and stays read-only for the rest of the
//! session:
//! - `KnowledgeCorpus::load`: read the guide as a PDF or as UTF-8 text/markdown
//! - `KnowledgeCorpus::lookup`: keyword-ranked passages for a query
//!
//! ```ignore
//! use concierge_knowledge::KnowledgeCorpus;
//!
//! let corpus = KnowledgeCorpus::load("guides/bangalore.md")?;
//! for passage in corpus.lookup("best neighborhoods for families", 3) {
//!     println!("[{}] {}", passage.index, passage.text);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod corpus;
pub mod error;
mod pdf;

pub use corpus::{KnowledgeCorpus, Passage};
pub use error::{Error, Result};
