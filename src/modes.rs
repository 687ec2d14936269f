use std::time::Duration;

/// Describes how the SDK keeps its toggle snapshot in sync with the remote source.
pub enum PollingMode {
    /// The SDK downloads the latest toggle data automatically on the given interval.
    AutoPoll(Duration),
    /// The SDK downloads toggle data only when [`crate::Client::refresh`] is called.
    Manual,
}
