//! City guide lookup tool

use crate::registry::{Capability, CapabilityCategory, CapabilityDescriptor};
use concierge_knowledge::KnowledgeCorpus;
use std::sync::Arc;
use tracing::debug;

/// Default number of passages returned per lookup
const DEFAULT_PASSAGE_LIMIT: usize = 3;

/// Exposes the loaded guide to the reasoning engine
pub struct KnowledgeSearchTool {
    descriptor: CapabilityDescriptor,
    corpus: Arc<KnowledgeCorpus>,
    limit: usize,
}

impl KnowledgeSearchTool {
    /// Create a lookup tool over a loaded corpus
    #[must_use]
    pub fn new(corpus: Arc<KnowledgeCorpus>) -> Self {
        let descriptor = CapabilityDescriptor::new(
            "search_knowledge_base",
            "Search the city guide for background information about the city: \
             neighborhoods, landmarks, food, culture and getting around. \
             Check this before searching the web.",
            CapabilityCategory::Knowledge,
        )
        .with_input("query", "Topic to look up in the city guide");

        Self {
            descriptor,
            corpus,
            limit: DEFAULT_PASSAGE_LIMIT,
        }
    }

    /// Set the maximum passages per lookup
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }
}

#[async_trait::async_trait]
impl Capability for KnowledgeSearchTool {
    fn descriptor(&self) -> &CapabilityDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, input: &str) -> String {
        let passages = self.corpus.lookup(input, self.limit);
        debug!(query = %input, passages = passages.len(), "City guide lookup");

        if passages.is_empty() {
            return format!("The city guide has nothing about '{}'.", input);
        }

        let blocks: Vec<String> = passages
            .iter()
            .enumerate()
            .map(|(i, p)| format!("[{}] {}", i + 1, p.text))
            .collect();
        format!("From the city guide:\n\n{}", blocks.join("\n\n"))
    }
}
