//! Integration tests: CSV archive in, filtered posts out.

#![cfg(all(feature = "csv", feature = "json-output"))]

use std::fs;
use std::sync::Arc;

use postsift::core::zone::utc;
use postsift::prelude::*;
use tempfile::{TempDir, tempdir};

const ARCHIVE: &str = "emisor,tipo_mensaje,fecha_milei,texto
jmilei,T,2024-01-15 10:30:00,Pelotudo total
jmilei,T,2024-01-20 23:30:00,\"Es un PELOTUDO, https://t.co/abc\"
jmilei,R,2024-02-01 02:00:00,RT sobre el periodismo
otro,T,2024-02-10 12:00:00,habla de perio
jmilei,T,2024-03-05 09:00:00,La CANCIÓN de la casta
jmilei,T,,sin fecha pero con casta
JMilei,R,2024-03-06 09:00:00,no aplica
";

fn write_archive() -> (TempDir, String) {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("tuits.csv");
    fs::write(&path, ARCHIVE).unwrap();
    let path = path.to_str().unwrap().to_string();
    (dir, path)
}

fn load() -> Vec<Post> {
    let (_dir, path) = write_archive();
    CsvDataset::new(path).load().unwrap()
}

fn texts(posts: &[Post]) -> Vec<&str> {
    posts.iter().filter_map(Post::text).collect()
}

#[test]
fn test_load_archive() {
    let posts = load();
    assert_eq!(posts.len(), 7);
    assert_eq!(posts[0].sender(), Some("jmilei"));
    assert!(posts[2].is_repost());
    assert!(posts[5].timestamp().is_none());
}

#[test]
fn test_exact_word_query() {
    let hits = apply_text_filter(load(), "pelotudo", MatchMode::ExactWord);
    assert_eq!(
        texts(&hits),
        ["Pelotudo total", "Es un PELOTUDO, https://t.co/abc"]
    );
}

#[test]
fn test_exact_versus_contains() {
    let exact = apply_text_filter(load(), "perio", MatchMode::ExactWord);
    assert_eq!(texts(&exact), ["habla de perio"]);

    let contains = apply_text_filter(load(), "perio", MatchMode::Contains);
    assert_eq!(
        texts(&contains),
        ["RT sobre el periodismo", "habla de perio"]
    );
}

#[test]
fn test_accent_insensitive_query() {
    let hits = apply_text_filter(load(), "cancion", MatchMode::ExactWord);
    assert_eq!(texts(&hits), ["La CANCIÓN de la casta"]);
}

#[test]
fn test_url_does_not_match() {
    let hits = apply_text_filter(load(), "abc", MatchMode::Contains);
    assert!(hits.is_empty());
}

#[test]
fn test_sender_filter_is_case_insensitive() {
    let config = FilterConfig::new().with_sender("jmilei");
    assert_eq!(apply_filters(load(), &config).len(), 6);
}

#[test]
fn test_type_filter() {
    let config = FilterConfig::new().with_message_type(MessageType::Repost);
    let reposts = apply_filters(load(), &config);
    assert_eq!(reposts.len(), 2);
    assert!(reposts.iter().all(Post::is_repost));
}

#[test]
fn test_date_filter_excludes_undated() {
    let config = FilterConfig::new().with_date_from("2024-01-01").unwrap();
    let dated = apply_filters(load(), &config);
    assert_eq!(dated.len(), 6);
    assert!(dated.iter().all(|p| p.timestamp().is_some()));
}

#[test]
fn test_date_range_depends_on_zone() {
    let config = FilterConfig::new()
        .with_date_from("2024-02-01")
        .unwrap()
        .with_date_to("2024-02-29")
        .unwrap();
    assert_eq!(apply_filters(load(), &config).len(), 2);

    // 2024-02-01 02:00 UTC is still January 31st at -03:00
    let art = parse_utc_offset("-03:00").unwrap();
    let config = config.with_zone(art);
    assert_eq!(
        texts(&apply_filters(load(), &config)),
        ["habla de perio"]
    );
}

#[test]
fn test_all_filters_combined_with_stats() {
    let config = FilterConfig::new()
        .with_sender("jmilei")
        .with_message_type(MessageType::Original)
        .with_query("casta", MatchMode::Contains);

    let (filtered, stats) = apply_filters_with_stats(load(), &config);
    assert_eq!(
        texts(&filtered),
        ["La CANCIÓN de la casta", "sin fecha pero con casta"]
    );
    assert_eq!(stats.total, 7);
    assert_eq!(stats.after_base, 4);
    assert_eq!(stats.after_text, 2);
}

#[test]
fn test_monthly_volume_of_archive() {
    let volume = monthly_volume(&load(), utc());
    let rows: Vec<_> = volume
        .iter()
        .map(|v| (v.month.as_str(), v.originals, v.reposts))
        .collect();
    assert_eq!(
        rows,
        [("2024-01", 2, 0), ("2024-02", 1, 1), ("2024-03", 1, 1)]
    );
}

#[test]
fn test_cached_dataset_loads_once() {
    let (_dir, path) = write_archive();
    let cache = CachedDataset::new(CsvDataset::new(&path));
    assert!(!cache.is_loaded());

    let first = cache.get().unwrap();
    let second = cache.get().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.len(), 7);

    fs::write(&path, "emisor,tipo_mensaje,fecha_milei,texto\na,T,,hola\n").unwrap();
    assert_eq!(cache.get().unwrap().len(), 7);
    assert_eq!(cache.reload().unwrap().len(), 1);
}

#[test]
fn test_missing_column() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(&path, "emisor,tipo_mensaje,fecha_milei\njmilei,T,2024-01-01\n").unwrap();

    let err = CsvDataset::new(&path).load().unwrap_err();
    assert!(err.is_dataset());
    assert!(err.to_string().contains("texto"));
}

#[test]
fn test_missing_file() {
    let err = CsvDataset::new("does/not/exist.csv").load().unwrap_err();
    assert!(err.is_io());
}

#[test]
fn test_export_roundtrip_through_files() {
    let dir = tempdir().unwrap();
    let hits = apply_text_filter(load(), "pelotudo", MatchMode::ExactWord);
    let config = OutputConfig::new();

    let csv_path = dir.path().join("out.csv");
    write_to_format(&hits, csv_path.to_str().unwrap(), OutputFormat::Csv, &config).unwrap();
    let csv = fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("Sender;Timestamp;Text;Type\n"));
    assert!(csv.contains("jmilei;2024-01-15 10:30:00;Pelotudo total;T"));
    assert_eq!(csv.lines().count(), 3);

    let jsonl_path = dir.path().join("out.jsonl");
    write_to_format(&hits, jsonl_path.to_str().unwrap(), OutputFormat::Jsonl, &config).unwrap();
    let jsonl = fs::read_to_string(&jsonl_path).unwrap();
    for line in jsonl.lines() {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["type"], "T");
        assert_eq!(value["sender"], "jmilei");
    }
    assert_eq!(jsonl.lines().count(), 2);
}
