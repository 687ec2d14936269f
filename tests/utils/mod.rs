#![allow(dead_code)]

use rand::distr::{Alphanumeric, SampleString};
use std::sync::{Arc, Mutex};
use togglebox::BackupStore;

pub fn produce_mock_path() -> String {
    format!("/toggle-sources/{}/features", rand_str(16))
}

pub fn construct_payload(name: &str, enabled: bool) -> String {
    format!(r#"{{"features": [{{"name": "{name}", "enabled": {enabled}}}]}}"#)
}

fn rand_str(len: usize) -> String {
    Alphanumeric.sample_string(&mut rand::rng(), len)
}

/// Shared in-memory backup store; clones observe the same stored payload.
#[derive(Clone, Default)]
pub struct SharedBackup(Arc<SharedBackupState>);

#[derive(Default)]
struct SharedBackupState {
    stored: Mutex<Option<String>>,
    last_key: Mutex<Option<String>>,
}

impl SharedBackup {
    pub fn seeded(payload: &str) -> Self {
        let backup = Self::default();
        *backup.0.stored.lock().unwrap() = Some(payload.to_owned());
        backup
    }

    pub fn stored(&self) -> Option<String> {
        self.0.stored.lock().unwrap().clone()
    }

    pub fn last_key(&self) -> Option<String> {
        self.0.last_key.lock().unwrap().clone()
    }
}

impl BackupStore for SharedBackup {
    fn read(&self, _: &str) -> Option<String> {
        self.stored()
    }

    fn write(&self, key: &str, payload: &str) {
        *self.0.last_key.lock().unwrap() = Some(key.to_owned());
        *self.0.stored.lock().unwrap() = Some(payload.to_owned());
    }
}

/// Backup store that never has data and drops every write.
pub struct NullBackup {}

impl BackupStore for NullBackup {
    fn read(&self, _: &str) -> Option<String> {
        None
    }

    fn write(&self, _: &str, _: &str) {}
}
