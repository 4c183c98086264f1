use keel_logger::{ConsoleFormat, LevelFilter, Logger, parse_level};

#[test]
fn json_console_only_has_no_guard() {
    let logger = Logger::builder()
        .name("integration-console-only")
        .console(true)
        .console_format(ConsoleFormat::Json)
        .level(parse_level("INFO").expect("known level"))
        .init()
        .expect("logger should initialize");

    tracing::info!(feature = "ocr", "console line rendered as JSON");
    assert!(!logger.writes_files());
    assert_eq!(parse_level("debug").expect("known level"), LevelFilter::DEBUG);
}
