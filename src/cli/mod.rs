use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;

use crate::env::{apis, corpus, search as search_env};
use crate::services::openai::OpenAiConfig;
use crate::services::{HttpCorpusStore, OpenAiEmbeddingProvider, SearchConfig, SearchService};

#[derive(Parser)]
#[command(name = "sitesearch")]
#[command(about = "Semantic search over scraped site content")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank the corpus against a query and print the top results
    Search {
        /// Natural-language query
        query: String,
        /// Maximum number of results to return
        #[arg(short, long, default_value_t = 3)]
        limit: usize,
        /// Drop results scoring below this relevance threshold
        #[arg(long)]
        min_score: Option<f32>,
    },
    /// Print every corpus item without scoring
    List,
    /// Verify the embedding provider is reachable
    Check,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let runtime = Runtime::new()?;
        runtime.block_on(self.run_async())
    }

    async fn run_async(self) -> anyhow::Result<()> {
        match self.command {
            Commands::Search {
                query,
                limit,
                min_score,
            } => run_search(&query, limit, min_score).await,
            Commands::List => run_list().await,
            Commands::Check => run_check().await,
        }
    }
}

fn build_service() -> anyhow::Result<SearchService> {
    let corpus_url = std::env::var(corpus::CORPUS_URL).with_context(|| {
        format!(
            "{} must be set to the scraped-content endpoint URL",
            corpus::CORPUS_URL
        )
    })?;

    if std::env::var(apis::OPENAI_API_KEY).unwrap_or_default().is_empty() {
        bail!("{} must be set to an OpenAI API key", apis::OPENAI_API_KEY);
    }

    let embedder = OpenAiEmbeddingProvider::new(OpenAiConfig::default())?;
    let store = HttpCorpusStore::new(corpus_url);

    let mut config = SearchConfig::default();
    if let Ok(concurrent) = std::env::var(search_env::CONCURRENT) {
        if let Ok(parsed) = concurrent.parse::<usize>() {
            config.max_concurrent_embeds = parsed.max(1);
        }
    }

    Ok(SearchService::with_config(
        Arc::new(store),
        Arc::new(embedder),
        config,
    ))
}

async fn run_search(query: &str, limit: usize, min_score: Option<f32>) -> anyhow::Result<()> {
    if limit == 0 {
        bail!("--limit must be greater than zero");
    }

    let service = build_service()?;

    let results = match min_score {
        Some(threshold) => service.search_filtered(query, limit, threshold).await?,
        None => service.search(query, limit).await?,
    };

    if results.is_empty() {
        // An empty list means different things depending on why it is empty.
        if service.corpus_fetch_failures() > 0 {
            println!("Corpus is unavailable; no results could be retrieved.");
        } else if min_score.is_some() {
            println!("No sufficiently relevant results found.");
        } else {
            println!("No relevant information found.");
        }
        return Ok(());
    }

    for (rank, result) in results.iter().enumerate() {
        println!(
            "{:>2}. [{:.3}] {} — {}",
            rank + 1,
            result.score,
            result.item.url,
            result.item.content_preview(80)
        );
    }

    Ok(())
}

async fn run_list() -> anyhow::Result<()> {
    let service = build_service()?;
    let items = service.get_all_results().await?;

    if items.is_empty() {
        println!("Corpus is empty.");
        return Ok(());
    }

    for item in &items {
        println!(
            "{} {} (scraped {})",
            item.id,
            item.url,
            item.last_scraped.format("%Y-%m-%d %H:%M")
        );
    }
    println!("{} items total", items.len());

    Ok(())
}

async fn run_check() -> anyhow::Result<()> {
    let embedder = OpenAiEmbeddingProvider::new(OpenAiConfig::default())?;

    match embedder.client().test_connection().await {
        Ok(()) => {
            println!("Embedding provider is reachable.");
            Ok(())
        }
        Err(e) => bail!("Embedding provider check failed: {}", e.user_message()),
    }
}
