//! Built-in capabilities

mod knowledge_search;
mod web_search;

pub use knowledge_search::KnowledgeSearchTool;
pub use web_search::{SearchConfig, SearchOutcome, SearchResult, WebSearchTool};
