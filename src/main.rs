//! # postsift CLI
//!
//! Command-line interface for the postsift library.

use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use log::info;

use postsift::cli::Args;
use postsift::config::DatasetConfig;
use postsift::core::zone::parse_utc_offset;
use postsift::core::{FilterConfig, OutputConfig, apply_filters_with_stats, monthly_volume};
use postsift::dataset::{CachedDataset, CsvDataset, DatasetProvider};
use postsift::format::{OutputFormat, write_to_format};
use postsift::{Post, PostsiftError};

const PREVIEW_CHARS: usize = 100;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), PostsiftError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();
    init_logging(&args);

    let zone = parse_utc_offset(&args.utc_offset)?;
    let delimiter = args.delimiter_byte()?;

    // Build filter configuration
    let mut filter_config = FilterConfig::new()
        .with_zone(zone)
        .with_senders(args.senders.iter().cloned())
        .with_query(args.query.clone(), args.mode.into());
    for message_type in &args.types {
        filter_config = filter_config.with_message_type((*message_type).into());
    }
    if let Some(ref from) = args.from {
        filter_config = filter_config.with_date_from(from)?;
    }
    if let Some(ref to) = args.to {
        filter_config = filter_config.with_date_to(to)?;
    }

    // Print header
    println!("postsift v{}", env!("CARGO_PKG_VERSION"));
    println!("----------------------------------");
    println!("Input:    {}", args.input);
    if !args.senders.is_empty() {
        println!("Senders:  {}", args.senders.join(", "));
    }
    if !filter_config.message_types.is_empty() {
        let codes: Vec<_> = filter_config
            .message_types
            .iter()
            .map(|t| t.code())
            .collect();
        println!("Types:    {}", codes.join(", "));
    }
    if filter_config.has_date_filter() {
        println!(
            "Dates:    {} .. {} (UTC{})",
            display_date(args.from.as_deref()),
            display_date(args.to.as_deref()),
            zone
        );
    }
    if filter_config.has_text_filter() {
        println!("Query:    {} ({})", args.query.trim(), filter_config.mode);
    }
    println!();

    // Step 1: Load
    let dataset_config = DatasetConfig::new()
        .with_delimiter(delimiter)
        .with_zone(zone)
        .with_skip_invalid(!args.strict);
    let dataset = CachedDataset::new(CsvDataset::with_config(&args.input, dataset_config));
    println!("Loading {}...", dataset.provider().name());
    let load_start = Instant::now();
    let posts = dataset.get()?.to_vec();
    println!(
        "   Loaded {} posts ({:.2}s)",
        posts.len(),
        load_start.elapsed().as_secs_f64()
    );

    // Step 2: Filter
    let filter_start = Instant::now();
    let (filtered, stats) = apply_filters_with_stats(posts, &filter_config);
    info!("Filtering took {:.3}s", filter_start.elapsed().as_secs_f64());

    // Step 3: Monthly volume
    if args.monthly {
        print_monthly(&filtered, zone);
    }

    // Step 4: Preview
    let output_config = if args.normalized {
        OutputConfig::new().with_zone(zone).with_normalized()
    } else {
        OutputConfig::new().with_zone(zone)
    };
    if args.show > 0 {
        print_preview(&filtered, args.show, &output_config);
    }

    // Step 5: Export
    if let Some(ref output) = args.output {
        let format = args.output_format();
        let output_path = adjust_output_extension(output, format);
        println!("Writing {}...", format);
        write_to_format(&filtered, &output_path, format, &output_config)?;
        println!("   Output saved to {}", output_path);
    }

    // Summary
    println!();
    println!("Summary:");
    println!("   Loaded:    {} posts", stats.total);
    if filter_config.has_base_filter() {
        println!("   Filtered:  {} posts (sender/type/date)", stats.after_base);
    }
    println!("   Matched:   {} posts", stats.after_text);
    println!("   Retention: {:.1}%", stats.retention());
    println!(
        "   Time:      {:.2}s",
        total_start.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Logs go to stderr; `-v` raises the level, `RUST_LOG` overrides it.
fn init_logging(args: &Args) {
    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn display_date(date: Option<&str>) -> &str {
    date.unwrap_or("*")
}

fn print_monthly(posts: &[Post], zone: chrono::FixedOffset) {
    let volume = monthly_volume(posts, zone);
    println!();
    println!("Posts per month:");
    if volume.is_empty() {
        println!("   (no dated posts)");
        return;
    }
    println!("   {:<8} {:>9} {:>9} {:>9}", "Month", "Originals", "Reposts", "Total");
    for month in &volume {
        println!(
            "   {:<8} {:>9} {:>9} {:>9}",
            month.month,
            month.originals,
            month.reposts,
            month.total()
        );
    }
}

fn print_preview(posts: &[Post], limit: usize, config: &OutputConfig) {
    println!();
    println!("First {} of {} posts:", limit.min(posts.len()), posts.len());
    for post in posts.iter().take(limit) {
        let ts = post
            .timestamp()
            .map(|ts| config.format_timestamp(ts))
            .unwrap_or_else(|| "-".to_string());
        let text: String = post
            .text()
            .unwrap_or("")
            .replace('\n', " ")
            .chars()
            .take(PREVIEW_CHARS)
            .collect();
        println!(
            "   {} | {} | {} | {}",
            ts,
            post.sender().unwrap_or("-"),
            post.message_type().code(),
            text
        );
    }
    println!();
}

/// Appends the format extension when the output path has none.
fn adjust_output_extension(output: &str, format: OutputFormat) -> String {
    if Path::new(output).extension().is_some() {
        return output.to_string();
    }
    format!("{}.{}", output, format.extension())
}
