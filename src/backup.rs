/// A storage API used to persist and recover the last successfully retrieved toggle payload.
///
/// The payload handed to [`BackupStore::write`] is the raw fetch response body; it is read back
/// and decoded through the same parser when the remote source is unreachable. Both operations
/// are best-effort: implementations should keep their own failures internal, the SDK treats a
/// [`BackupStore::read`] returning `None` as "no backup available".
pub trait BackupStore: Sync + Send {
    /// Gets the backed up payload identified by the given `key`.
    fn read(&self, key: &str) -> Option<String>;

    /// Writes the given raw `payload` to the store by the given `key`.
    fn write(&self, key: &str, payload: &str);
}
