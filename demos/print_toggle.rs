use log::kv::Key;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::collections::HashMap;
use std::time::Duration;
use togglebox::*;

#[tokio::main]
async fn main() {
    // Info level logging helps to inspect the toggle refresh and evaluation process.
    // Use the default Warning level to avoid too detailed logging in your application.
    log::set_max_level(LevelFilter::Info);
    log::set_logger(&PrintLog {}).unwrap();

    let client = Client::builder("https://cdn.togglebox.io/demo/features")
        .polling_mode(PollingMode::AutoPoll(Duration::from_secs(5)))
        .strategy(Box::new(HostnameStrategy {}))
        .on_update(|| println!("toggle snapshot updated"))
        .build()
        .await
        .unwrap();

    let search_v2 = client.is_enabled("search.v2", false);
    println!("search.v2: {search_v2}");

    let dark_mode = client.is_enabled("darkMode", false);
    println!("darkMode: {dark_mode}");

    client.shutdown();
}

// Example custom strategy that activates a toggle on the hosts listed in
// the binding's "hostnames" parameter.
struct HostnameStrategy {}

impl Strategy for HostnameStrategy {
    fn name(&self) -> &str {
        "hostname"
    }

    fn evaluate(&self, parameters: &HashMap<String, String>) -> bool {
        let Ok(current) = std::env::var("HOSTNAME") else {
            return false;
        };
        parameters
            .get("hostnames")
            .is_some_and(|hosts| hosts.split(',').any(|host| host.trim() == current))
    }
}

// Example log implementation.
pub struct PrintLog {}

impl Log for PrintLog {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level() && metadata.target().contains("togglebox")
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = match record.level() {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        };
        match record.key_values().get(Key::from("event_id")) {
            Some(event_id) => println!("{level} [{event_id}] {}", record.args()),
            None => println!("{level} {}", record.args()),
        }
    }

    fn flush(&self) {}
}
