//! End-to-end checks over the report pipeline.

use std::path::{Path, PathBuf};

use stats_core::identity::IdentityMap;
use stats_core::models::AggregatedReport;
use stats_core::settings::AggregationConfig;
use stats_core::stopwords::StopwordList;
use stats_data::analysis::{analyze_file, render_report, write_report};
use tempfile::TempDir;

const SAMPLE: &str = "\
date (YYYY-MM-DD),time (hh:mm),name,text
24-01-01,12:00,Alice,Olá a todos
24-01-01,12:03,Bob,Olá Alice
24-01-01,14:00,Alice,Conversa diferente
24-01-01,14:04,Charlie,Resposta rápida
24-01-02,09:00,Bob,Bom dia
";

fn write_csv(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("w.csv");
    std::fs::write(&path, body).unwrap();
    path
}

fn low_threshold() -> AggregationConfig {
    AggregationConfig {
        min_interaction_weight: 1,
        ..Default::default()
    }
}

fn assert_counts_consistent(report: &AggregatedReport) {
    let total = report.stats.total_messages;
    let hourly: u64 = report.hourly.iter().map(|h| h.count).sum();
    let daily: u64 = report.daily.iter().map(|d| d.count).sum();
    let heatmap: u64 = report.heatmap.iter().map(|c| c.count).sum();
    let monthly: u64 = report.monthly.iter().map(|m| m.count).sum();
    let contributors: u64 = report.contributors.iter().map(|c| c.count).sum();

    assert_eq!(hourly, total);
    assert_eq!(daily, total);
    assert_eq!(heatmap, total);
    assert_eq!(monthly, total);
    assert_eq!(contributors, total);
    assert!(report
        .contributors
        .windows(2)
        .all(|w| w[0].count >= w[1].count));
}

#[test]
fn sample_export_end_to_end() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(dir.path(), SAMPLE);
    let output = dir.path().join("data").join("whatsapp-aggregated.json");

    let result = analyze_file(&input, &low_threshold()).unwrap();
    write_report(&result.report, &output).unwrap();

    let data: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();

    assert_eq!(data["stats"]["totalMessages"], 5);
    assert_eq!(data["stats"]["uniqueParticipants"], 3);
    assert_eq!(data["hourly"].as_array().unwrap().len(), 24);
    assert_eq!(data["daily"].as_array().unwrap().len(), 7);
    assert_eq!(data["heatmap"].as_array().unwrap().len(), 168);

    let interactions = data["interactions"].as_array().unwrap();
    assert!(interactions.len() >= 2);
    let has_alice_bob = interactions.iter().any(|i| {
        let (s, t) = (i["source"].as_str().unwrap(), i["target"].as_str().unwrap());
        (s, t) == ("Alice", "Bob") || (s, t) == ("Bob", "Alice")
    });
    assert!(has_alice_bob);

    assert_counts_consistent(&result.report);
}

#[test]
fn default_threshold_drops_sparse_pairs() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(dir.path(), SAMPLE);

    let result = analyze_file(&input, &AggregationConfig::default()).unwrap();
    assert!(result.report.interactions.is_empty());
}

#[test]
fn repeated_runs_are_identical_apart_from_timestamp() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(dir.path(), SAMPLE);
    let config = low_threshold();

    let mut first = analyze_file(&input, &config).unwrap().report;
    let mut second = analyze_file(&input, &config).unwrap().report;
    first.generated_at.clear();
    second.generated_at.clear();

    assert_eq!(render_report(&first).unwrap(), render_report(&second).unwrap());
}

#[test]
fn malformed_rows_do_not_abort_the_run() {
    let dir = TempDir::new().unwrap();
    let body = format!("{SAMPLE}not-a-date,12:00,Eve,x\n24-01-03,25:99,Eve,y\n24-01-03\n");
    let input = write_csv(dir.path(), &body);

    let result = analyze_file(&input, &AggregationConfig::default()).unwrap();

    assert_eq!(result.report.stats.total_messages, 5);
    assert_eq!(result.metadata.rows_dropped, 3);
    assert_counts_consistent(&result.report);
}

#[test]
fn unmapped_phone_number_stays_distinct() {
    let dir = TempDir::new().unwrap();
    let body = "\
date (YYYY-MM-DD),time (hh:mm),name,text
24-01-01,12:00,Alice,oi
24-01-01,12:01,+351 912 345 678,oi
24-01-01,12:02,+351 933 333 333,oi
";
    let input = write_csv(dir.path(), body);
    let config = AggregationConfig {
        identities: [("+351 912 345 678", "Alice")].into_iter().collect::<IdentityMap>(),
        ..Default::default()
    };

    let report = analyze_file(&input, &config).unwrap().report;
    let names: Vec<(&str, u64)> = report
        .contributors
        .iter()
        .map(|c| (c.name.as_str(), c.count))
        .collect();

    assert_eq!(names, vec![("Alice", 2), ("+351 933 333 333", 1)]);
}

#[test]
fn word_frequency_respects_limits_and_stopwords() {
    let dir = TempDir::new().unwrap();
    let mut body = String::from("date (YYYY-MM-DD),time (hh:mm),name,text\n");
    for i in 0..120 {
        body.push_str(&format!(
            "24-01-01,{:02}:{:02},Alice,que não palavra{} e x\n",
            (i / 60) % 24,
            i % 60,
            i
        ));
    }
    let input = write_csv(dir.path(), &body);
    let config = AggregationConfig::default();

    let report = analyze_file(&input, &config).unwrap().report;
    let stopwords = StopwordList::portuguese();

    assert!(report.wordfreq.len() <= 100);
    assert!(report.wordfreq.windows(2).all(|w| w[0].count >= w[1].count));
    assert!(report
        .wordfreq
        .iter()
        .all(|w| !stopwords.contains(&w.word) && w.word.chars().count() >= 2));
}

#[test]
fn three_quick_exchanges_form_an_edge() {
    let dir = TempDir::new().unwrap();
    let body = "\
date (YYYY-MM-DD),time (hh:mm),name,text
24-01-01,09:00,Alice,a
24-01-01,09:04,Bob,b
24-01-01,11:00,Alice,a
24-01-01,11:04,Bob,b
24-01-01,15:00,Bob,b
24-01-01,15:03,Alice,a
24-01-01,20:00,Alice,a
24-01-01,20:06,Bob,b
";
    let input = write_csv(dir.path(), body);

    let report = analyze_file(&input, &AggregationConfig::default())
        .unwrap()
        .report;

    assert_eq!(report.interactions.len(), 1);
    assert_eq!(report.interactions[0].source, "Alice");
    assert_eq!(report.interactions[0].target, "Bob");
    assert_eq!(report.interactions[0].value, 3);
}

#[test]
fn header_only_export_gives_empty_report() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(dir.path(), "date (YYYY-MM-DD),time (hh:mm),name,text\n");

    let report = analyze_file(&input, &AggregationConfig::default())
        .unwrap()
        .report;

    assert_eq!(report.stats.total_messages, 0);
    assert_eq!(report.stats.unique_participants, 0);
    assert_eq!(report.stats.avg_per_day, 0.0);
    assert!(report.hourly.iter().all(|h| h.count == 0));
    assert!(report.daily.iter().all(|d| d.count == 0));
    assert!(report.monthly.is_empty());
    assert!(report.wordfreq.is_empty());
    assert!(report.interactions.is_empty());
    assert_counts_consistent(&report);
}
