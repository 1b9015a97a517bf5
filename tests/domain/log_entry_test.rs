use batchdash::domain::LogEntry;

#[test]
fn given_multiline_text_when_converting_then_returns_one_entry_per_line() {
    let entries = LogEntry::from_text("starting\nworking\r\ndone\n");

    assert_eq!(
        entries,
        vec![
            LogEntry::new("starting"),
            LogEntry::new("working"),
            LogEntry::new("done"),
        ]
    );
}

#[test]
fn given_empty_text_when_converting_then_returns_no_entries() {
    assert!(LogEntry::from_text("").is_empty());
}

#[test]
fn given_upstream_log_json_when_deserializing_then_reads_message_field() {
    let entries: Vec<LogEntry> =
        serde_json::from_str(r#"[{"Message":"hello"},{"Message":"world"}]"#).unwrap();

    assert_eq!(entries[1].message, "world");
}
