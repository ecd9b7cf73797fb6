//! Integration tests: transcript text in, records and statistics out.

use chatstat::analytics::{AggregateResult, Analyzer, Query};
use chatstat::parsing::{Clock, Framing};
use chatstat::prelude::*;
use std::fs;
use tempfile::tempdir;

// Android export, month-first, 12-hour clock.
const ANDROID_US: &str = "\
1/2/23, 10:00 AM - Messages and calls are end-to-end encrypted. No one outside of this chat can read them.
1/2/23, 10:00 AM - Alice: Hello everyone
1/2/23, 10:05 AM - Bob: Hi Alice, check http://example.com now
1/2/23, 10:06 AM - Alice: <Media omitted>
1/3/23, 9:15 PM - Alice: shopping list:
milk
eggs 🥚
1/3/23, 9:20 PM - Carol joined using this group's invite link
2/14/23, 11:59 PM - Bob: 😂😂 good night
";

// iOS export, day-first, 24-hour clock with seconds.
const IOS_EU: &str = "\
[15/01/2024, 14:30:05] Alice: Ciao!
[15/01/2024, 14:31:10] Bob: Ciao Alice 👋
[16/01/2024, 08:00:00] Alice: Buongiorno
";

fn us_store() -> RecordStore {
    parse(ANDROID_US, &ParseConfig::month_first()).unwrap()
}

// =========================================================================
// Parsing
// =========================================================================

#[test]
fn test_android_records() {
    let store = us_store();
    assert_eq!(store.len(), 7);
    assert_eq!(store.dropped(), 0);

    let kinds: Vec<MessageKind> = store.iter().map(|r| r.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            MessageKind::SystemNotification,
            MessageKind::UserMessage,
            MessageKind::UserMessage,
            MessageKind::MediaPlaceholder,
            MessageKind::UserMessage,
            MessageKind::SystemNotification,
            MessageKind::UserMessage,
        ]
    );

    let multiline = &store.records()[4];
    assert_eq!(multiline.sender_name(), Some("Alice"));
    assert_eq!(multiline.body(), "shopping list:\nmilk\neggs 🥚");
    assert_eq!(multiline.calendar().hour, 21);
    assert_eq!(multiline.calendar().period.label(), "21-22");

    let last = &store.records()[6];
    assert_eq!(last.calendar().month_name, "February");
    assert_eq!(last.calendar().day_name, "Tuesday");
    assert_eq!(last.calendar().period.label(), "23-00");
}

#[test]
fn test_ios_day_first_records() {
    let store = parse(IOS_EU, &ParseConfig::day_first()).unwrap();
    assert_eq!(store.len(), 3);

    let format = store.format().unwrap();
    assert_eq!(format.framing, Framing::Bracket);
    assert_eq!(format.clock, Clock::TwentyFourHour);

    let first = &store.records()[0];
    assert_eq!(first.calendar().day, 15);
    assert_eq!(first.calendar().month, 1);
    assert_eq!(first.calendar().minute, 30);
    assert_eq!(first.timestamp().format("%S").to_string(), "00");
}

#[test]
fn test_system_sender_label() {
    let store = us_store();
    let notice = &store.records()[0];
    assert_eq!(notice.sender(), &Sender::System);
    assert_eq!(notice.sender().to_string(), "SYSTEM");
    assert_eq!(notice.sender_name(), None);
}

#[test]
fn test_ambiguous_dates_need_configuration() {
    let err = parse(ANDROID_US, &ParseConfig::new()).unwrap_err();
    assert!(matches!(err, ChatstatError::AmbiguousDateOrder { .. }));
    assert!(err.is_configuration());
}

#[test]
fn test_wrong_date_order_reported() {
    // 15 cannot be a month.
    let text = "15/01/2024, 14:30 - Alice: Ciao\n";
    let err = parse(text, &ParseConfig::month_first()).unwrap_err();
    assert!(matches!(err, ChatstatError::InconsistentDateOrder { .. }));
    assert!(err.to_string().contains("15/01/2024"));
}

#[test]
fn test_dotted_dates_default_to_day_first() {
    let text = "15.01.24, 14:30 - Alice: Hallo\n16.01.24, 09:00 - Bob: Morgen\n";
    let store = parse(text, &ParseConfig::new()).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.records()[0].calendar().day, 15);

    let err = parse(text, &ParseConfig::month_first()).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_parse_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("WhatsApp Chat with Bob.txt");
    fs::write(&path, format!("\u{FEFF}{}", IOS_EU)).unwrap();

    let parser = TranscriptParser::with_config(ParseConfig::day_first());
    let store = parser.parse(&path).unwrap();
    assert_eq!(store.len(), 3);
    assert_eq!(store.senders(), vec!["Alice", "Bob"]);
}

// =========================================================================
// Analytics
// =========================================================================

#[test]
fn test_most_active_users() {
    let text = "\
1/2/23, 10:00 AM - Alice: Hello
1/2/23, 10:05 AM - Bob: Hi Alice
1/2/23, 10:06 AM - Alice: <Media omitted>
";
    let store = parse(text, &ParseConfig::month_first()).unwrap();
    let ranking = Analyzer::new(&store).most_active_users();

    let counts: Vec<(&str, usize)> = ranking
        .counts
        .iter()
        .map(|c| (c.sender.as_str(), c.messages))
        .collect();
    assert_eq!(counts, vec![("Alice", 2), ("Bob", 1)]);
    assert!((ranking.shares[0].percent - 66.67).abs() < 1e-9);
    assert!((ranking.shares[1].percent - 33.33).abs() < 1e-9);
}

#[test]
fn test_basic_counts() {
    let store = us_store();
    let analyzer = Analyzer::new(&store);

    let overall = analyzer.basic_counts(&Selector::Overall);
    assert_eq!(overall.messages, 7);
    assert_eq!(overall.media, 1);
    assert_eq!(overall.links, 1);

    let bob = analyzer.basic_counts(&Selector::sender("Bob"));
    assert_eq!(bob.messages, 2);
    assert_eq!(bob.links, 1);
    assert_eq!(bob.media, 0);
    // "Hi Alice, check http://example.com now" + "😂😂 good night"
    assert_eq!(bob.words, 5 + 3);
}

#[test]
fn test_timelines_and_activity() {
    let store = us_store();
    let analyzer = Analyzer::new(&store);

    let monthly = analyzer.monthly_timeline(&Selector::Overall);
    let labels: Vec<(&str, usize)> = monthly
        .iter()
        .map(|m| (m.label.as_str(), m.messages))
        .collect();
    assert_eq!(labels, vec![("January 2023", 6), ("February 2023", 1)]);

    let daily = analyzer.daily_timeline(&Selector::sender("Alice"));
    assert_eq!(daily.len(), 2);
    assert_eq!(daily[0].messages, 2);
    assert_eq!(daily[1].messages, 1);

    let weekdays = analyzer.weekday_activity(&Selector::Overall);
    assert_eq!(weekdays.len(), 7);
    assert_eq!(weekdays.iter().map(|d| d.messages).sum::<usize>(), 7);

    let months = analyzer.month_activity(&Selector::Overall);
    assert_eq!(months.len(), 12);
    assert_eq!(months[0].month, "January");
    assert_eq!(months[0].messages, 6);
}

#[test]
fn test_heatmap_counts_every_record() {
    let store = us_store();
    let heatmap = Analyzer::new(&store).activity_heatmap(&Selector::Overall);
    assert_eq!(heatmap.total(), store.len());
    assert_eq!(heatmap.cells.len(), 7);
}

#[test]
fn test_words_and_emoji() {
    let store = us_store();
    let config = AnalyticsConfig::new().with_stop_words(StopWords::from_text("check now"));
    let analyzer = Analyzer::with_config(&store, config);

    let words = analyzer.common_words(&Selector::Overall);
    assert!(words.iter().all(|w| w.token != "check" && w.token != "now"));
    assert!(words.iter().all(|w| w.token != "media" && w.token != "omitted"));
    assert!(words.iter().any(|w| w.token == "milk"));

    let emoji = analyzer.emoji_frequencies(&Selector::Overall);
    assert_eq!(emoji[0].emoji, "😂");
    assert_eq!(emoji[0].count, 2);
}

#[test]
fn test_dynamic_queries() {
    let store = us_store();
    let analyzer = Analyzer::new(&store);

    for query in Query::all() {
        let result = analyzer.query(&Selector::Overall, *query).unwrap();
        assert_eq!(result.query(), *query);
    }

    let err = analyzer
        .query(&Selector::sender("Alice"), Query::MostActiveUsers)
        .unwrap_err();
    assert!(err.is_overall_only());

    let result = analyzer
        .query(&Selector::sender("Alice"), Query::BasicCounts)
        .unwrap();
    let AggregateResult::BasicCounts(counts) = result else {
        panic!("expected basic counts");
    };
    assert_eq!(counts.messages, 3);
}

#[test]
fn test_queries_are_deterministic() {
    let store = us_store();
    let analyzer = Analyzer::new(&store);
    assert_eq!(
        analyzer.report(&Selector::Overall),
        analyzer.report(&Selector::Overall)
    );
}

#[test]
fn test_empty_transcript() {
    let store = parse("", &ParseConfig::new()).unwrap();
    assert!(store.is_empty());
    assert_eq!(store.selector_options(), vec![Selector::Overall]);

    let report = Analyzer::new(&store).report(&Selector::Overall);
    assert_eq!(report.basic_counts.messages, 0);
    assert!(report.monthly_timeline.is_empty());
    assert!(report.daily_timeline.is_empty());
    assert!(report.common_words.is_empty());
    assert!(report.emoji_frequencies.is_empty());
    assert_eq!(report.activity_heatmap.total(), 0);
    assert!(report.most_active_users.unwrap().counts.is_empty());
}

// =========================================================================
// Report output
// =========================================================================

#[test]
fn test_report_json() {
    let store = us_store();
    let analyzer = Analyzer::new(&store);

    let overall: serde_json::Value =
        serde_json::from_str(&report_to_json(&analyzer.report(&Selector::Overall)).unwrap())
            .unwrap();
    assert_eq!(overall["selection"], "Overall");
    assert_eq!(overall["basic_counts"]["messages"], 7);
    assert_eq!(overall["most_active_users"]["counts"][0]["sender"], "Alice");

    let bob: serde_json::Value = serde_json::from_str(
        &report_to_json(&analyzer.report(&Selector::sender("Bob"))).unwrap(),
    )
    .unwrap();
    assert_eq!(bob["selection"], "Bob");
    assert!(bob["most_active_users"].is_null());
}
