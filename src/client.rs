use crate::builder::{ClientBuilder, Options};
use crate::errors::ClientError;
use crate::eval::evaluator::eval;
use crate::fetch::service::ToggleService;
use crate::model::toggle::Toggle;
use std::sync::Arc;

/// The main component for evaluating feature toggles.
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
///
///     let enabled = client.is_enabled("my-feature", false);
/// }
/// ```
pub struct Client {
    options: Arc<Options>,
    service: ToggleService,
}

impl Client {
    pub(crate) async fn with_options(options: Options) -> Result<Self, ClientError> {
        let opts = Arc::new(options);
        let service = ToggleService::new(Arc::clone(&opts))?;
        service.start().await;
        Ok(Self {
            options: opts,
            service,
        })
    }

    /// Creates a new [`ClientBuilder`] used to build a [`Client`].
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
    pub fn builder(source_url: &str) -> ClientBuilder {
        ClientBuilder::new(source_url)
    }

    /// Decides whether the toggle identified by `name` is enabled.
    ///
    /// Evaluates against the currently published snapshot and never blocks.
    /// Returns `default` if the toggle doesn't exist in the snapshot.
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
    ///
    ///     let enabled = client.is_enabled("my-feature", false);
    /// }
    /// ```
    pub fn is_enabled(&self, name: &str, default: bool) -> bool {
        let snapshot = self.service.snapshot();
        eval(&snapshot, self.options.registry(), name, default)
    }

    /// Initiates a force refresh on the toggle snapshot.
    ///
    /// # Errors
    ///
    /// This method fails if the fetch/fallback cycle could not retrieve fresh
    /// toggle data. The fallback to the backup store has already run by the
    /// time the error is returned.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use togglebox::{Client, PollingMode};
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let client = Client::builder("https://my-togglebox-host/api/features")
    ///         .polling_mode(PollingMode::Manual)
    ///         .build()
    ///         .await
    ///         .unwrap();
    ///
    ///     client.refresh().await.unwrap();
    /// }
    /// ```
    pub async fn refresh(&self) -> Result<(), ClientError> {
        self.service.refresh().await
    }

    /// Returns the names of all toggles in the current snapshot.
    ///
    /// If no toggle data is available, this method returns an empty [`Vec`].
    pub fn toggle_names(&self) -> Vec<String> {
        self.service.snapshot().toggles().keys().cloned().collect()
    }

    /// Returns all toggle definitions in the current snapshot.
    pub fn toggles(&self) -> Vec<Toggle> {
        self.service.snapshot().toggles().values().cloned().collect()
    }

    /// Stops the periodic refresh. Idempotent; a refresh cycle already in
    /// flight is allowed to complete.
    pub fn shutdown(&self) {
        self.service.close();
    }
}
