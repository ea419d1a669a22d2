use anyhow::{anyhow, Result};
use chrono::Utc;
use std::env;
use std::path::Path;

use hinglish_sentiment::{
    default_raw_filename, load_dataset, raw_dump, to_rows, write_dataset, write_raw_dump,
    Collector, Config, DatasetRow, DatasetSummary, PassStatus, RawDumpOptions, RawDumpStats,
    RedditClient, SortMode, TimeWindow, DEFAULT_DATASET_FILE,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("collect");

    match command {
        "collect" => run_collect(args.get(2).map(String::as_str).unwrap_or(DEFAULT_DATASET_FILE)),
        "raw" => run_raw(args.get(2).map(String::as_str), args.get(3).map(String::as_str)),
        "stats" => {
            let path = args
                .get(2)
                .ok_or_else(|| anyhow!("Usage: hinglish-sentiment stats <dataset.csv>"))?;
            run_stats(Path::new(path))
        }
        other => Err(anyhow!(
            "Unknown command: {} (expected collect, raw or stats)",
            other
        )),
    }
}

fn run_collect(output: &str) -> Result<()> {
    println!("🇮🇳 SCRAPING PURE HINGLISH STOCK MARKET DATA");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = Config::from_env()?;
    let client = RedditClient::connect(&config)?;

    let collector = Collector::new(client);
    let report = collector.collect();

    println!();
    for pass in &report.passes {
        match &pass.status {
            PassStatus::Completed { posts, records } => {
                println!("   ✅ {}: {} Hinglish comments from {} posts", pass.label, records, posts)
            }
            PassStatus::Skipped { error } => println!("   ❌ {}: {}", pass.label, error),
        }
    }
    if !report.skipped.is_empty() {
        println!("   ⚠️  {} posts/comments skipped", report.skipped.len());
    }

    if report.is_empty() {
        println!("\n❌ No Hinglish data found.");
        return Ok(());
    }

    let path = Path::new(output);
    let written = write_dataset(path, &report.records)?;

    println!("\n🎯 FINAL HINGLISH SENTIMENT DATASET READY");
    println!("📁 File: {}", path.display());
    println!("📊 Total comments: {} ({} duplicates removed)", written, report.duplicates_removed);

    print_summary(&to_rows(&report.records));
    Ok(())
}

fn run_raw(sort: Option<&str>, window: Option<&str>) -> Result<()> {
    let sort: SortMode = sort.unwrap_or("hot").parse()?;
    let window: TimeWindow = window.unwrap_or("week").parse()?;

    let config = Config::from_env()?;
    let client = RedditClient::connect(&config)?;

    println!("Starting Reddit scraping...");
    let options = RawDumpOptions {
        sort,
        window: Some(window),
        max_posts: config.max_posts,
        comments_per_post: config.comments_per_post,
        pacing: hinglish_sentiment::raw_dump::POST_PACING,
    };
    let dump = raw_dump(&client, &options)?;

    let stats = match RawDumpStats::from_rows(&dump.rows) {
        Some(stats) => stats,
        None => {
            println!("No comments were scraped. Please check your configuration.");
            return Ok(());
        }
    };

    let filename = default_raw_filename(&config.subreddit, Utc::now());
    write_raw_dump(Path::new(&filename), &dump.rows)?;

    println!("\n{}", "=".repeat(50));
    println!("SCRAPING STATISTICS");
    println!("{}", "=".repeat(50));
    println!("Total comments scraped: {}", stats.total_comments);
    println!("Unique posts: {}", stats.unique_posts);
    println!("Unique authors: {}", stats.unique_authors);
    println!("Average comments per post: {:.2}", stats.comments_per_post);
    println!("Date range: {} to {}", stats.earliest, stats.latest);
    println!("Average comment score: {:.2}", stats.average_comment_score);
    println!("Skipped items: {}", dump.skipped.len());
    println!("Data saved to: {}", filename);
    println!("{}", "=".repeat(50));

    Ok(())
}

fn run_stats(path: &Path) -> Result<()> {
    let rows = load_dataset(path)?;
    println!("📁 File: {}", path.display());
    println!("📊 Total comments: {}", rows.len());
    print_summary(&rows);
    Ok(())
}

fn print_summary(rows: &[DatasetRow]) {
    let summary = DatasetSummary::from_rows(rows);

    println!("\n💭 Sentiment Distribution:");
    for label in &summary.by_sentiment {
        println!(
            "   {} {}: {} ({:.1}%)",
            label.sentiment.emoji(),
            label.sentiment,
            label.count,
            label.percentage
        );
    }

    println!("\n📅 Year Distribution:");
    for year in &summary.by_year {
        println!("   📆 {}: {} ({:.1}%)", year.year, year.count, year.percentage);
    }

    println!("\n💬 Sample Comments:");
    println!("──────────────────────────────────────────────────");
    for (sentiment, samples) in &summary.samples {
        println!("\n{} {} Examples:", sentiment.emoji(), sentiment.as_str().to_uppercase());
        for sample in samples {
            let preview: String = sample.comment.chars().take(70).collect();
            println!("   📝 \"{}...\"", preview);
            println!("   📅 {} | 👍 {}", sample.comment_date, sample.comment_score);
        }
    }
}
