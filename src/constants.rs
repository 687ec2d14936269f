/// The version of the SDK package.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const SDK_UA_HEADER: &str = "X-ToggleBox-UserAgent";
pub const BACKUP_FORMAT_VERSION: &str = "v1";

#[cfg(test)]
pub mod test_constants {
    pub const MOCK_PATH: &str = "/api/features";
}
