//! Concierge Tools - Capability Registry
//!
//! This crate provides the capabilities the reasoning engine may invoke:
//! - Registry: capability descriptors and lookup by name
//! - Builtins: `web_search` (SerpAPI) and `search_knowledge_base` (city guide)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod builtins;
pub mod error;
pub mod registry;

pub use builtins::{
    KnowledgeSearchTool, SearchConfig, SearchOutcome, SearchResult, WebSearchTool,
};
pub use error::{Error, Result};
pub use registry::{Capability, CapabilityCategory, CapabilityDescriptor, CapabilityRegistry};
