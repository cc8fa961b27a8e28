//! Long-polling update loop
//!
//! Fetches updates with `getUpdates`, confirms them by advancing the offset
//! and hands each text message to the dispatcher in its own task.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use application::CommandDispatcher;
use domain::ChatId;
use infrastructure::TelegramAppConfig;
use integration_telegram::{TelegramClient, TelegramError, Update};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// Timing of the update loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Server-side long-poll timeout
    pub poll_timeout: Duration,
    /// Pause after a failed poll
    pub retry_delay: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_secs(30),
            retry_delay: Duration::from_secs(5),
        }
    }
}

impl From<&TelegramAppConfig> for PollSettings {
    fn from(config: &TelegramAppConfig) -> Self {
        Self {
            poll_timeout: Duration::from_secs(config.poll_timeout_secs),
            retry_delay: Duration::from_secs(config.retry_delay_secs),
        }
    }
}

/// Receives updates and dispatches them until shutdown
#[derive(Debug)]
pub struct UpdatePoller {
    client: TelegramClient,
    dispatcher: Arc<CommandDispatcher>,
    settings: PollSettings,
}

impl UpdatePoller {
    /// Create a poller
    pub const fn new(
        client: TelegramClient,
        dispatcher: Arc<CommandDispatcher>,
        settings: PollSettings,
    ) -> Self {
        Self {
            client,
            dispatcher,
            settings,
        }
    }

    /// Poll until `shutdown` completes, then wait for in-flight replies
    ///
    /// Polling errors are logged and retried after the configured delay;
    /// they never end the loop.
    pub async fn run<F>(&self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut offset = None;
        let mut tasks = JoinSet::new();

        info!(
            poll_timeout_secs = self.settings.poll_timeout.as_secs(),
            "Listening for updates"
        );

        loop {
            tokio::select! {
                () = &mut shutdown => break,
                result = self.poll_once(offset, &mut tasks) => match result {
                    Ok(next) => offset = next,
                    Err(e) => {
                        if e.is_retryable() {
                            warn!(error = %e, "Polling for updates failed");
                        } else {
                            error!(error = %e, "Polling for updates failed");
                        }
                        tokio::select! {
                            () = &mut shutdown => break,
                            () = tokio::time::sleep(self.settings.retry_delay) => {},
                        }
                    },
                },
            }

            while let Some(joined) = tasks.try_join_next() {
                log_join_result(joined);
            }
        }

        if !tasks.is_empty() {
            info!(in_flight = tasks.len(), "Waiting for in-flight replies");
        }
        while let Some(joined) = tasks.join_next().await {
            log_join_result(joined);
        }
        info!("Update loop stopped");
    }

    /// Fetch one batch of updates and spawn a handler per text message
    ///
    /// Returns the offset confirming this batch.
    pub async fn poll_once(
        &self,
        offset: Option<i64>,
        tasks: &mut JoinSet<()>,
    ) -> Result<Option<i64>, TelegramError> {
        let updates = self
            .client
            .get_updates(offset, self.settings.poll_timeout.as_secs())
            .await?;

        if !updates.is_empty() {
            debug!(count = updates.len(), "Received updates");
        }

        for update in &updates {
            let Some((chat_id, text)) = update.text_message() else {
                debug!(update_id = update.update_id, "Skipping non-text update");
                continue;
            };

            let dispatcher = Arc::clone(&self.dispatcher);
            let chat_id = ChatId::new(chat_id);
            let text = text.to_owned();
            tasks.spawn(async move {
                if let Err(e) = dispatcher.handle_message(chat_id, &text).await {
                    warn!(chat_id = %chat_id, error = %e, "Failed to deliver reply");
                }
            });
        }

        Ok(next_offset(offset, &updates))
    }
}

/// Offset that confirms every update in `updates`
pub fn next_offset(current: Option<i64>, updates: &[Update]) -> Option<i64> {
    updates
        .iter()
        .map(|update| update.update_id + 1)
        .max()
        .map_or(current, |next| Some(current.map_or(next, |c| c.max(next))))
}

fn log_join_result(joined: Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined {
        error!(error = %e, "Message handler task failed");
    }
}
