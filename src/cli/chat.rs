//! Interactive session bootstrap

use crate::config::AppConfig;
use anyhow::{Context, Result};
use concierge_core::{DialogueOrchestrator, InstructionComposer, ToolLoopEngine};
use concierge_knowledge::KnowledgeCorpus;
use concierge_llm::{OpenRouterConfig, OpenRouterProvider};
use concierge_tools::{CapabilityRegistry, KnowledgeSearchTool, SearchConfig, WebSearchTool};
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{info, warn};

/// Build the collaborators and run the read loop on stdin/stdout
pub async fn run(config: AppConfig) -> Result<()> {
    let llm_config = OpenRouterConfig::from_env()
        .context("OpenRouter API key not found. Please set OPENROUTER_API_KEY in your .env file.")?
        .with_base_url(&config.llm.base_url)
        .with_model(&config.llm.model)
        .with_timeout(config.llm.timeout());
    let provider = OpenRouterProvider::new(llm_config).context("Failed to create LLM provider")?;

    let mut engine = ToolLoopEngine::new(Arc::new(provider))
        .with_model(&config.llm.model)
        .with_max_iterations(config.llm.max_iterations);
    if let Some(temperature) = config.llm.temperature {
        engine = engine.with_temperature(temperature);
    }

    let capabilities = build_capabilities(&config)?;
    info!(
        capabilities = ?capabilities.list_names(),
        model = %config.llm.model,
        "Session ready"
    );

    let mut orchestrator = DialogueOrchestrator::new(
        Arc::new(engine),
        capabilities,
        InstructionComposer::new(&config.city),
    );

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    orchestrator.run(stdin, &mut stdout).await?;
    Ok(())
}

/// Web search is always offered; the guide lookup only when the guide loads
fn build_capabilities(config: &AppConfig) -> Result<CapabilityRegistry> {
    let mut registry = CapabilityRegistry::new();

    let search_config = SearchConfig::from_env()
        .with_base_url(&config.search.base_url)
        .with_engine(&config.search.engine)
        .with_timeout(config.search.timeout());
    if !search_config.is_configured() {
        warn!("SERPAPI_API_KEY not set, web search will report itself unavailable");
    }
    let search = WebSearchTool::new(search_config).context("Failed to create web search")?;
    registry.register(Arc::new(search));

    if let Some(corpus) = load_guide(config) {
        let lookup = KnowledgeSearchTool::new(Arc::new(corpus)).with_limit(config.guide_passages);
        registry.register(Arc::new(lookup));
    }

    Ok(registry)
}

fn load_guide(config: &AppConfig) -> Option<KnowledgeCorpus> {
    let path = &config.guide_path;
    match KnowledgeCorpus::load(path) {
        Ok(corpus) => {
            println!(
                "Successfully loaded '{}' into the knowledge base.",
                path.display()
            );
            Some(corpus)
        }
        Err(concierge_knowledge::Error::NotFound(_)) => {
            warn!(path = %path.display(), "City guide not found");
            println!(
                "Error: '{}' not found. Please make sure the city guide is available.",
                path.display()
            );
            None
        }
        Err(e) => {
            warn!(error = %e, "City guide failed to load");
            println!("An error occurred while loading the city guide: {e}");
            None
        }
    }
}
