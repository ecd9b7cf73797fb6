//! # chatstat CLI
//!
//! Command-line interface for the chatstat library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use chatstat::ChatstatError;
use chatstat::analytics::{Analyzer, Report};
use chatstat::cli::{Args, init_tracing};
use chatstat::output::{report_to_json, write_report};
use chatstat::parser::TranscriptParser;
use chatstat::store::RecordStore;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";
const TOP_ROWS: usize = 5;

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), ChatstatError> {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    let parse_start = Instant::now();
    let parser = TranscriptParser::with_config(args.parse_config());
    let store = parser.parse(&args.input)?;
    let parse_time = parse_start.elapsed();

    let selector = args.selector();
    if !selector.is_overall() && !store.senders().contains(&selector.to_string().as_str()) {
        tracing::warn!(%selector, "no messages from this sender");
    }

    let analyzer = Analyzer::with_config(&store, args.analytics_config()?);
    let report = analyzer.report(&selector);

    if args.json {
        println!("{}", report_to_json(&report)?);
    } else {
        print_summary(&args, &store, &report, parse_time.as_secs_f64());
    }

    if let Some(ref path) = args.output {
        write_report(&report, path)?;
        if !args.json {
            println!();
            println!("💾 Saved report to {}", path.display());
        }
    }

    Ok(())
}

fn print_summary(args: &Args, store: &RecordStore, report: &Report, parse_secs: f64) {
    println!("📊 chatstat v{}", env!("CARGO_PKG_VERSION"));
    println!("{}", RULE);
    println!("📂 Input:     {}", args.input.display());
    match store.format() {
        Some(format) => println!("🕒 Format:    {}", format),
        None => println!("🕒 Format:    not detected"),
    }
    println!(
        "📖 Parsed:    {} records, {} dropped ({:.2}s)",
        store.len(),
        store.dropped(),
        parse_secs
    );
    println!("👤 Selection: {}", report.selection);
    println!();

    let counts = &report.basic_counts;
    println!("💬 Messages:  {}", counts.messages);
    println!("📝 Words:     {}", counts.words);
    println!("🖼️  Media:     {}", counts.media);
    println!("🔗 Links:     {}", counts.links);

    if let Some(ref ranking) = report.most_active_users {
        println!();
        println!("🏆 Most active");
        for share in &ranking.shares {
            println!("   {:<24} {:>6.2}%", share.sender, share.percent);
        }
    }

    // Ties go to the earliest day and month.
    if let Some(busiest) = report.weekday_activity.iter().rev().max_by_key(|d| d.messages) {
        if busiest.messages > 0 {
            println!();
            println!("📅 Busiest day:   {} ({})", busiest.day, busiest.messages);
        }
    }
    if let Some(busiest) = report.month_activity.iter().rev().max_by_key(|m| m.messages) {
        if busiest.messages > 0 {
            println!("🗓️  Busiest month: {} ({})", busiest.month, busiest.messages);
        }
    }

    if !report.common_words.is_empty() {
        println!();
        println!("🔤 Common words");
        for word in report.common_words.iter().take(TOP_ROWS) {
            println!("   {:<24} {:>6}", word.token, word.count);
        }
    }

    if !report.emoji_frequencies.is_empty() {
        println!();
        println!("😀 Emoji");
        for emoji in report.emoji_frequencies.iter().take(TOP_ROWS) {
            println!("   {:<24} {:>6}", emoji.emoji, emoji.count);
        }
    }

    println!("{}", RULE);
}
