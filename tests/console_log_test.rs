mod common;

use std::path::Path;
use std::sync::Mutex;

use common::working_tree;

static MESSAGES: Mutex<Vec<String>> = Mutex::new(Vec::new());

struct Recorder;

impl log::Log for Recorder {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::Level::Info
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata())
            && let Ok(mut messages) = MESSAGES.lock()
        {
            messages.push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

static RECORDER: Recorder = Recorder;

type Generate = fn(&Path) -> Result<sampledoc::Generated, sampledoc::Error>;

fn position(messages: &[String], text: &str) -> usize {
    messages
        .iter()
        .position(|m| m == text)
        .unwrap_or_else(|| panic!("missing log line {text:?} in {messages:?}"))
}

// Single test: the logger is process-wide.
#[test]
fn generation_logs_banners_in_order() {
    log::set_logger(&RECORDER).unwrap();
    log::set_max_level(log::LevelFilter::Info);
    let tree = working_tree(&[]);

    for (format, generate) in [
        ("DOCX", sampledoc::generate_docx as Generate),
        ("PDF", sampledoc::generate_pdf as Generate),
    ] {
        MESSAGES.lock().unwrap().clear();
        generate(tree.path()).unwrap();
        let messages = MESSAGES.lock().unwrap().clone();

        let start = position(&messages, &format!("Starting {format} generation..."));
        let target = position(&messages, "Target: 500 pages");
        let loading = position(&messages, "Loading sample images...");
        let first_progress = position(&messages, "Generated 50 pages...");
        let last_progress = position(&messages, "Generated 500 pages...");
        let serialize = position(&messages, &format!("Generating {format} file..."));
        assert!(start < target && target < loading && loading < first_progress);
        assert!(first_progress < last_progress && last_progress < serialize);
        assert!(messages[serialize + 1..].iter().any(|m| m.starts_with("Timing: ")));
    }
}
