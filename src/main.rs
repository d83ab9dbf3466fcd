use anyhow::Context;
use chrono::Datelike;
use clap::Parser;

use citemetrics::ads::record::fractional_year;
use citemetrics::cache::{CacheStore, JsonFileCache};
use citemetrics::metrics::compute_metrics;
use citemetrics::orcid;
use citemetrics::paper::PaperCollection;
use citemetrics::report::write_report;

/// Researcher looked up when no iD is given on the command line.
const DEFAULT_ORCID_ID: &str = "0000-0002-5074-7183";

const CACHE_FILE: &str = "papers.json";
const REPORT_FILE: &str = "report.md";
const SERIES_FILE: &str = "series.json";

#[derive(Parser)]
#[command(
    name = "citemetrics",
    about = "Citation statistics for one researcher, from ORCID and ADS"
)]
struct Cli {
    /// Free tokens: the literal `update` refreshes from the live APIs
    /// instead of loading the cache; an ORCID iD overrides the default
    /// researcher.
    tokens: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut update = false;
    let mut researcher_id = DEFAULT_ORCID_ID.to_owned();
    for token in &cli.tokens {
        if token == "update" {
            update = true;
        } else if token.contains('-') {
            researcher_id = token.clone();
        } else {
            log::warn!("ignoring unrecognized argument {token:?}");
        }
    }

    let today = chrono::Local::now().date_naive();
    let now_year = fractional_year(today.year(), today.month());

    let client = reqwest::Client::new();
    let cache = JsonFileCache::new(CACHE_FILE);

    let (papers, name) = if update {
        let token = dotenvy::var("ADS_API_TOKEN")
            .context("ADS_API_TOKEN must be set for an update run")?;
        let (papers, name) = citemetrics::refresh_collection(&client, &token, &researcher_id)
            .await
            .context("live refresh failed")?;
        cache.store(&papers).await.context("writing the cache")?;
        (papers, name)
    } else {
        let papers = cache.load().await.with_context(|| {
            format!("no usable cache at {CACHE_FILE}; run with `update` to fetch")
        })?;
        let name = orcid::fetch_researcher_name(&client, &researcher_id)
            .await
            .context("resolving the researcher's name")?;
        (papers, name)
    };

    let start_year = papers
        .earliest_pub_year()
        .map(f64::floor)
        .unwrap_or_else(|| now_year.floor());

    let bundle = compute_metrics(&papers, start_year, now_year);
    print_summary(&papers, &bundle);

    let mut report = std::fs::File::create(REPORT_FILE).context("creating the report file")?;
    write_report(&mut report, &papers, &bundle, &name.display(), name.surname())
        .context("writing the report")?;

    let series = std::fs::File::create(SERIES_FILE).context("creating the series file")?;
    bundle
        .write_series_json(series)
        .context("writing the series export")?;

    log::info!("wrote {REPORT_FILE} and {SERIES_FILE}");
    Ok(())
}

fn print_summary(papers: &PaperCollection, bundle: &citemetrics::metrics::MetricsBundle) {
    println!("Number of papers: {}", papers.len());
    println!("Total number of citations: {}", bundle.total_citations);
    println!(
        "Number of citations without self-citations: {}",
        bundle.total_citations - bundle.total_self_citations
    );
    println!("h-index: {}", bundle.h_index);
    println!("h5-index: {}", bundle.h5_index);
    if let Some(slope) = bundle.long_term_slope {
        println!("h-index slope: {slope:.2}");
    }
    match bundle.short_term_slope {
        Some(slope) => println!("h-index slope (last 3 years): {slope:.2}"),
        None => println!("h-index slope (last 3 years): not enough history"),
    }
}
