//! Configuration check
//!
//! Reports which collaborators a session would get, without starting one.

use crate::config::AppConfig;
use concierge_knowledge::KnowledgeCorpus;
use concierge_llm::OpenRouterConfig;
use concierge_tools::SearchConfig;

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    println!("City Concierge check ({})\n", config.city);

    let llm_ok = check_llm(config);
    check_search();
    check_guide(config);

    println!();
    if llm_ok {
        println!("✅ Ready to chat.");
    } else {
        println!("⚠️  OPENROUTER_API_KEY is required. Add it to your .env file.");
        std::process::exit(1);
    }

    Ok(())
}

fn check_llm(config: &AppConfig) -> bool {
    print!("Checking reasoning engine... ");
    match OpenRouterConfig::from_env() {
        Ok(_) => {
            println!("✅ OpenRouter ({})", config.llm.model);
            true
        }
        Err(_) => {
            println!("❌ OPENROUTER_API_KEY not set");
            false
        }
    }
}

fn check_search() {
    print!("Checking web search... ");
    if SearchConfig::from_env().is_configured() {
        println!("✅ SerpAPI");
    } else {
        println!("⚠️  SERPAPI_API_KEY not set (web search unavailable)");
    }
}

fn check_guide(config: &AppConfig) {
    print!("Checking city guide... ");
    match KnowledgeCorpus::load(&config.guide_path) {
        Ok(corpus) => println!(
            "✅ {} ({} passages)",
            config.guide_path.display(),
            corpus.len()
        ),
        Err(e) => println!("⚠️  {e} (answers will rely on web search)"),
    }
}
