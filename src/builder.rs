use crate::backup::BackupStore;
use crate::errors::{ClientError, ErrorKind};
use crate::modes::PollingMode;
use crate::strategy::{Strategy, StrategyRegistry};
use crate::Client;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::time::Duration;

pub(crate) type UpdateCallback = Box<dyn Fn() + Send + Sync>;

pub struct Options {
    source_url: String,
    headers: HashMap<String, String>,
    http_timeout: Duration,
    polling_mode: PollingMode,
    backup: Option<Box<dyn BackupStore>>,
    registry: StrategyRegistry,
    on_update: Option<UpdateCallback>,
    notify_on_fallback: bool,
}

impl Options {
    pub(crate) fn source_url(&self) -> &str {
        &self.source_url
    }

    pub(crate) fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub(crate) fn http_timeout(&self) -> &Duration {
        &self.http_timeout
    }

    pub(crate) fn polling_mode(&self) -> &PollingMode {
        &self.polling_mode
    }

    pub(crate) fn backup(&self) -> Option<&dyn BackupStore> {
        self.backup.as_ref().map(|b| b.borrow())
    }

    pub(crate) fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    pub(crate) fn on_update(&self) -> Option<&UpdateCallback> {
        self.on_update.as_ref()
    }

    pub(crate) fn notify_on_fallback(&self) -> bool {
        self.notify_on_fallback
    }
}

/// Builder to create ToggleBox [`Client`].
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use togglebox::{Client, PollingMode};
///
/// #[tokio::main]
/// async fn main() {
///     let client = Client::builder("https://my-togglebox-host/api/features")
///         .polling_mode(PollingMode::AutoPoll(Duration::from_secs(60)))
///         .build()
///         .await
///         .unwrap();
/// }
/// ```
pub struct ClientBuilder {
    source_url: String,
    headers: HashMap<String, String>,
    http_timeout: Option<Duration>,
    polling_mode: Option<PollingMode>,
    backup: Option<Box<dyn BackupStore>>,
    strategies: Vec<Box<dyn Strategy>>,
    on_update: Option<UpdateCallback>,
    notify_on_fallback: bool,
}

impl ClientBuilder {
    pub(crate) fn new(source_url: &str) -> Self {
        Self {
            source_url: source_url.to_owned(),
            headers: HashMap::default(),
            http_timeout: None,
            polling_mode: None,
            backup: None,
            strategies: vec![],
            on_update: None,
            notify_on_fallback: false,
        }
    }

    /// Adds an HTTP header sent with every toggle data request.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use togglebox::Client;
    ///
    /// let builder = Client::builder("https://my-togglebox-host/api/features")
    ///     .header("Authorization", "token-1");
    /// ```
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_owned(), value.to_owned());
        self
    }

    /// Sets the HTTP headers sent with every toggle data request.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use togglebox::Client;
    ///
    /// let builder = Client::builder("https://my-togglebox-host/api/features")
    ///     .headers(HashMap::from([
    ///         ("Authorization".to_owned(), "token-1".to_owned())
    ///     ]));
    /// ```
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the HTTP request timeout.
    /// Default value is `30` seconds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use togglebox::Client;
    ///
    /// let builder = Client::builder("https://my-togglebox-host/api/features")
    ///     .http_timeout(Duration::from_secs(60));
    /// ```
    pub fn http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = Some(timeout);
        self
    }

    /// Sets the [`PollingMode`] of the SDK.
    /// Default value is [`PollingMode::AutoPoll`] with `60` seconds poll interval.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use togglebox::{Client, PollingMode};
    ///
    /// let builder = Client::builder("https://my-togglebox-host/api/features")
    ///     .polling_mode(PollingMode::AutoPoll(Duration::from_secs(60)));
    /// ```
    pub fn polling_mode(mut self, polling_mode: PollingMode) -> Self {
        self.polling_mode = Some(polling_mode);
        self
    }

    /// Sets a [`BackupStore`] implementation used to persist and recover the
    /// last successfully retrieved toggle payload.
    ///
    /// Without a backup store the SDK keeps the current snapshot unchanged
    /// when a fetch fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use togglebox::{BackupStore, Client};
    ///
    /// let builder = Client::builder("https://my-togglebox-host/api/features")
    ///     .backup(Box::new(CustomBackup {}));
    ///
    /// struct CustomBackup {}
    ///
    /// impl BackupStore for CustomBackup {
    ///     fn read(&self, key: &str) -> Option<String> {
    ///         // read from storage
    ///         Some("from-backup".to_owned())
    ///     }
    ///
    ///     fn write(&self, key: &str, payload: &str) {
    ///         // write to storage
    ///     }
    /// }
    /// ```
    pub fn backup(mut self, backup: Box<dyn BackupStore>) -> Self {
        self.backup = Some(backup);
        self
    }

    /// Registers a custom activation [`Strategy`].
    ///
    /// Strategies are resolved by name in registration order, the built-in
    /// `"default"` strategy is always registered first.
    pub fn strategy(mut self, strategy: Box<dyn Strategy>) -> Self {
        self.strategies.push(strategy);
        self
    }

    /// Registers custom activation [`Strategy`] implementations in their given order.
    pub fn strategies(mut self, strategies: Vec<Box<dyn Strategy>>) -> Self {
        self.strategies.extend(strategies);
        self
    }

    /// Sets a callback invoked after each successful refresh published a new snapshot.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use togglebox::Client;
    ///
    /// let builder = Client::builder("https://my-togglebox-host/api/features")
    ///     .on_update(|| println!("toggles updated"));
    /// ```
    pub fn on_update(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_update = Some(Box::new(callback));
        self
    }

    /// Indicates whether the update callback should also fire when a failed
    /// fetch fell back to a snapshot recovered from the backup store.
    /// Default value is `false`.
    pub fn notify_on_fallback(mut self, notify: bool) -> Self {
        self.notify_on_fallback = notify;
        self
    }

    /// Creates a [`Client`] from the configuration made on the builder.
    ///
    /// Completes after the first fetch/fallback cycle ran, so the returned
    /// client is immediately queryable.
    ///
    /// # Errors
    ///
    /// This method fails if the toggle source URL is invalid, a configured
    /// HTTP header is invalid, or the HTTP client cannot be initialized. The
    /// outcome of the first fetch/fallback cycle is not an error, the client
    /// falls back to its backup store or to per-call defaults.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use togglebox::Client;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let client = Client::builder("https://my-togglebox-host/api/features")
    ///         .build()
    ///         .await
    ///         .unwrap();
    /// }
    /// ```
    pub async fn build(self) -> Result<Client, ClientError> {
        if self.source_url.is_empty() {
            return Err(ClientError::new(
                ErrorKind::InvalidSourceUrl,
                "Toggle source URL cannot be empty".to_owned(),
            ));
        }
        if let Err(err) = reqwest::Url::parse(self.source_url.as_str()) {
            return Err(ClientError::new(
                ErrorKind::InvalidSourceUrl,
                format!("Toggle source URL '{}' is invalid. ({err})", self.source_url),
            ));
        }
        Client::with_options(self.build_options()).await
    }

    pub(crate) fn build_options(self) -> Options {
        Options {
            source_url: self.source_url,
            headers: self.headers,
            http_timeout: self.http_timeout.unwrap_or(Duration::from_secs(30)),
            polling_mode: self
                .polling_mode
                .unwrap_or(PollingMode::AutoPoll(Duration::from_secs(60))),
            backup: self.backup,
            registry: StrategyRegistry::new(self.strategies),
            on_update: self.on_update,
            notify_on_fallback: self.notify_on_fallback,
        }
    }
}
