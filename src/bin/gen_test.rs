//! Synthetic transcript generator for stress testing chatstat.
//!
//! Usage: cargo run --features gen-test --bin gen_test -- [messages] [output] [layout]
//! Example: cargo run --features gen-test --bin gen_test -- 100000 heavy_chat.txt android-us
//!
//! Layouts: android-us (month-first, 12-hour), android-eu (day-first,
//! 24-hour), ios-dotted (bracketed, dotted dates), ios-us (bracketed,
//! month-first, 12-hour with seconds).

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::Rng;
use rand::seq::SliceRandom;
use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;

const EMOJIS: &[&str] = &[
    "😀", "😂", "🤣", "😍", "🥰", "🤔", "🙄", "😱", "🤯", "💀", "🎉", "🔥", "👍", "👍🏽", "❤️",
    "💔", "🇮🇳", "🇺🇸", "👨‍👩‍👧‍👦", "🏊‍♂️",
];

const SENDERS: &[&str] = &[
    "Alice",
    "Bob",
    "Иван",
    "Мария",
    "村上",
    "محمد",
    "+1 555 010 9999",
    "🔥FireUser🔥",
    "User;With;Semicolons",
    "User \"Quoted\"",
];

const WORDS: &[&str] = &[
    "hello", "pizza", "tonight", "meeting", "kal", "milte", "hai", "the", "and", "weekend",
    "привет", "мир", "こんにちは", "ok", "lol", "yes", "no", "maybe",
];

const NOTIFICATIONS: &[&str] = &[
    "Messages and calls are end-to-end encrypted. No one outside of this chat can read them.",
    "Alice added Bob",
    "Bob left",
    "Alice changed the group description",
    "Иван joined using this group's invite link",
];

#[derive(Clone, Copy)]
enum Layout {
    AndroidUs,
    AndroidEu,
    IosDotted,
    IosUs,
}

impl Layout {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "android-us" => Some(Layout::AndroidUs),
            "android-eu" => Some(Layout::AndroidEu),
            "ios-dotted" => Some(Layout::IosDotted),
            "ios-us" => Some(Layout::IosUs),
            _ => None,
        }
    }

    fn prefix(self, at: NaiveDateTime) -> String {
        match self {
            Layout::AndroidUs => format!("{} - ", at.format("%-m/%-d/%y, %-I:%M %p")),
            Layout::AndroidEu => format!("{} - ", at.format("%d/%m/%Y, %H:%M")),
            Layout::IosDotted => format!("[{}] ", at.format("%d.%m.%y, %H:%M:%S")),
            Layout::IosUs => format!("[{}] ", at.format("%-m/%-d/%y, %-I:%M:%S %p")),
        }
    }

    fn hint(self) -> &'static str {
        match self {
            Layout::AndroidUs | Layout::IosUs => "--month-first",
            Layout::AndroidEu => "--day-first",
            Layout::IosDotted => "(no flag needed)",
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100_000);
    let output = args.get(2).map(|s| s.as_str()).unwrap_or("heavy_chat.txt");
    let layout_name = args.get(3).map(|s| s.as_str()).unwrap_or("android-us");

    let Some(layout) = Layout::parse(layout_name) else {
        eprintln!(
            "Unknown layout: {}. Use android-us, android-eu, ios-dotted or ios-us",
            layout_name
        );
        process::exit(1);
    };

    println!("🧪 Transcript Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Messages: {}", count);
    println!("   Output:   {}", output);
    println!("   Layout:   {}", layout_name);
    println!();

    if let Err(e) = generate(count, output, layout) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn generate(count: usize, output: &str, layout: Layout) -> io::Result<()> {
    let file = File::create(output)?;
    let mut writer = BufWriter::with_capacity(1024 * 1024, file); // 1MB buffer

    let mut rng = rand::thread_rng();
    let start = std::time::Instant::now();
    let mut bytes_written: usize = 0;

    let mut at = NaiveDate::from_ymd_opt(2023, 1, 1)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .unwrap_or_default();

    writeln!(writer, "WhatsApp Chat export")?;

    for i in 0..count {
        at += Duration::minutes(rng.gen_range(0..=90));
        let line = format!("{}{}\n", layout.prefix(at), generate_entry(&mut rng, i));
        bytes_written += line.len();
        writer.write_all(line.as_bytes())?;

        if (i + 1) % 10000 == 0 {
            let elapsed = start.elapsed().as_secs_f64();
            let mps = (i + 1) as f64 / elapsed;
            let mb = bytes_written as f64 / 1_000_000.0;
            eprint!(
                "\r   Generated {}/{} ({:.1} MB, {:.0} msg/s)",
                i + 1,
                count,
                mb,
                mps
            );
        }
    }

    writer.flush()?;

    let elapsed = start.elapsed();
    let mb = bytes_written as f64 / 1_000_000.0;

    println!("\n\n✅ Done!");
    println!("   Size: {:.2} MB", mb);
    println!("   Time: {:.2}s", elapsed.as_secs_f64());
    println!("   Parse with: chatstat {} {}", output, layout.hint());
    Ok(())
}

fn generate_entry(rng: &mut impl Rng, index: usize) -> String {
    let sender = SENDERS.choose(rng).copied().unwrap_or("Alice");
    match index % 20 {
        0 => NOTIFICATIONS.choose(rng).copied().unwrap_or("Bob left").to_string(),
        1 | 2 => format!("{}: <Media omitted>", sender),
        3 => format!("{}: see https://example.com/item/{} or www.example.org", sender, index),
        4 => format!("{}: {}\n{}\n{}", sender, sentence(rng), sentence(rng), sentence(rng)),
        5 => {
            let emojis: String = (0..rng.gen_range(1..=12))
                .filter_map(|_| EMOJIS.choose(rng).copied())
                .collect();
            format!("{}: {}", sender, emojis)
        }
        6 => format!("{}: meet at 10:30: bring snacks", sender),
        7 => format!("{}:", sender),
        _ => format!("{}: {}", sender, sentence(rng)),
    }
}

fn sentence(rng: &mut impl Rng) -> String {
    (0..rng.gen_range(1..=12))
        .filter_map(|_| WORDS.choose(rng).copied())
        .collect::<Vec<_>>()
        .join(" ")
}
