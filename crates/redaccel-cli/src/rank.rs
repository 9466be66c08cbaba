//! `rank` command handler.

use clap::Args;

use redaccel_core::AppConfig;
use redaccel_ranker::{RankedResult, Ranker};

#[derive(Debug, Args)]
pub struct RankArgs {
    /// Keyword or phrase to find threads for
    #[arg(long, short)]
    pub keyword: String,

    /// Number of threads to return
    #[arg(long, default_value_t = 10)]
    pub top_n: usize,

    /// Skip search-traffic enrichment
    #[arg(long)]
    pub no_traffic: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Rank threads for the keyword and print them.
///
/// An empty result is not an error; it is reported and the command exits
/// successfully.
///
/// # Errors
///
/// Returns an error if the HTTP clients cannot be built or JSON output fails.
pub(crate) async fn run_rank(config: &AppConfig, args: &RankArgs) -> anyhow::Result<()> {
    let keyword = args.keyword.trim();
    if keyword.is_empty() {
        anyhow::bail!("keyword must not be empty");
    }

    let ranker = Ranker::from_config(config)?;
    let result = ranker.rank(keyword, args.top_n, !args.no_traffic).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_ranked(&result);
    }
    Ok(())
}

fn print_ranked(result: &RankedResult) {
    if result.is_empty() {
        println!("no threads found for '{}'", result.keyword);
        return;
    }

    println!(
        "{} threads for '{}' (source: {})",
        result.len(),
        result.keyword,
        result.source.as_deref().unwrap_or("-")
    );
    for (i, item) in result.items.iter().enumerate() {
        let recent = if item.is_recent { " recent" } else { "" };
        println!(
            "{:>3}. [r/{}] {}\n     \
             engagement {} ({} up, {} comments), {}d old{}, traffic {}\n     {}",
            i + 1,
            item.group,
            item.title,
            item.engagement,
            item.popularity,
            item.discussion,
            item.age_days,
            recent,
            item.search_traffic,
            item.url,
        );
    }
}
