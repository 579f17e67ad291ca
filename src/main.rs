//! Main entry point for the nozomi CLI application.
//!
//! Resolves a listing path or URL, then prints the gallery IDs on the
//! requested page, read either from the remote host or a local mirror.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;

use nozomi::{
    Cli, FetchSettings, HttpRangeSource, IndexFetchResult, IndexFetcher, LocalIndexSource,
    NozomiConfig, QueryDescriptor, RangeSource, ResultSink, config, logging, path_from_url,
    resolve,
};

/// Application entry point.
///
/// Loads configuration, resolves the path and dispatches to the remote or
/// mirror source depending on `-m`.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => config::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => config::load_or_init().unwrap_or_else(|e| {
            tracing::warn!("config unavailable ({e:#}), using defaults");
            NozomiConfig::default()
        }),
    };
    cli.apply_overrides(&mut config);
    config.validate()?;

    let raw_path = path_from_url(&cli.path, &config.site_host)?;
    let mut query =
        resolve(&raw_path).with_context(|| format!("invalid listing path {:?}", raw_path))?;
    if let Some(page) = cli.page {
        query = query.with_page(page)?;
    }

    if cli.resolve_only {
        print_query(&query, &config, cli.json)?;
        return Ok(());
    }

    let settings = FetchSettings::from(&config);

    if let Some(ref dir) = cli.mirror {
        // Serve ranges from the local mirror
        let fetcher = IndexFetcher::new(Arc::new(LocalIndexSource::new(dir)), settings);
        run(&fetcher, &query, &cli).await?;
    } else {
        let source = Arc::new(HttpRangeSource::from_config(&config)?);
        let fetcher = IndexFetcher::new(source.clone(), settings);
        run(&fetcher, &query, &cli).await?;

        // Display network transfer statistics for HTTP sources
        if !cli.is_quiet() {
            eprintln!(
                "\nTotal bytes transferred: {}",
                format_size(source.transferred_bytes())
            );
        }
    }

    Ok(())
}

/// Fetch the requested page (or the whole index with `-a`) and print it.
async fn run<S: RangeSource>(
    fetcher: &IndexFetcher<S>,
    query: &QueryDescriptor,
    cli: &Cli,
) -> Result<()> {
    let address = fetcher.address(query);
    let mut printer = Printer {
        json: cli.json,
        quiet: cli.is_quiet(),
        entries_per_page: fetcher.settings().entries_per_page,
    };

    if cli.all {
        let result = fetcher
            .fetch_all(query)
            .await
            .with_context(|| format!("fetching {}", address))?;
        if !result.is_empty() {
            printer.put_results(query, &result);
        }
        return Ok(());
    }

    let delivered = fetcher
        .fetch_into(query, &mut printer)
        .await
        .with_context(|| format!("fetching page {} of {}", query.page_number(), address))?;

    if !delivered && !cli.is_quiet() {
        eprintln!("No galleries on page {}", query.page_number());
    }

    Ok(())
}

/// Writes fetched pages to stdout, one ID per line or as a JSON document.
struct Printer {
    json: bool,
    quiet: bool,
    entries_per_page: u32,
}

impl ResultSink for Printer {
    fn put_results(&mut self, query: &QueryDescriptor, result: &IndexFetchResult) {
        if self.json {
            let doc = serde_json::json!({
                "query": query,
                "result": result,
                "page_count": result.page_count(self.entries_per_page),
            });
            println!("{}", doc);
            return;
        }

        if !self.quiet {
            eprintln!(
                "{} [{}], page {} of {} ({} galleries)",
                query.tag_display(),
                query.language(),
                query.page_number(),
                result.page_count(self.entries_per_page),
                result.total_items
            );
        }
        for id in result {
            println!("{}", id);
        }
    }
}

/// Print how a path resolved, and where its index lives.
fn print_query(query: &QueryDescriptor, config: &NozomiConfig, json: bool) -> Result<()> {
    let address = nozomi::IndexAddress::for_query(query, &config.extension);
    let url = format!("{}/{}", config.base_url(), address);

    if json {
        let doc = serde_json::json!({ "query": query, "url": url });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("tag:      {}", query.tag());
    println!("display:  {}", query.tag_display());
    println!("language: {}", query.language());
    println!("area:     {}", query.area().unwrap_or("-"));
    println!("popular:  {}", query.popular().unwrap_or("-"));
    println!("page:     {}", query.page_number());
    println!("index:    {}", url);

    if let Some(range) = nozomi::page_range(query.page_number(), config.entries_per_page) {
        println!("range:    {}", range.header_value());
    }

    Ok(())
}

/// Format a byte size into a human-readable string.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_size(500), "500 bytes");
/// assert_eq!(format_size(1536), "1.50 KB");
/// ```
fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
