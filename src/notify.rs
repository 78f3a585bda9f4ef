//! Completion notices posted to a chat channel.
//!
//! Delivery is best-effort: each notice is dispatched on a detached task so
//! a slow or failing chat endpoint cannot hold up or fail the triggering
//! request. Failures are logged and dropped, never retried.

use serde_json::json;
use tracing::{debug, warn};

/// Chat API base URL.
const SLACK_API_BASE: &str = "https://slack.com/api";

/// Channel receiving completion notices unless overridden.
const DEFAULT_CHANNEL: &str = "D07V10LPBM4";

/// Settings for the completion notifier.
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    /// Bearer token for the chat API. Notices are disabled when unset.
    pub token: Option<String>,
    /// Channel id the notices are posted to.
    pub channel: String,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            token: None,
            channel: DEFAULT_CHANNEL.to_string(),
        }
    }
}

/// Posts task-completion messages to a chat channel.
pub struct Notifier {
    client: reqwest::Client,
    token: String,
    channel: String,
}

impl Notifier {
    /// Build a notifier from config. Returns `None` when no token is
    /// configured, which disables notices entirely.
    pub fn from_config(config: &NotifyConfig) -> Option<Self> {
        let token = config.token.clone()?;

        Some(Self {
            client: reqwest::Client::new(),
            token,
            channel: config.channel.clone(),
        })
    }

    /// Message body for a completed task.
    fn message_text(title: &str) -> String {
        format!("Someone just completed the task {}", title)
    }

    /// Announce a completed task.
    ///
    /// Fire-and-forget: returns immediately, the post happens on a detached
    /// task and its outcome is only logged.
    pub fn task_completed(&self, title: &str) {
        let client = self.client.clone();
        let token = self.token.clone();
        let channel = self.channel.clone();
        let text = Self::message_text(title);

        tokio::spawn(async move {
            let result = client
                .post(format!("{}/chat.postMessage", SLACK_API_BASE))
                .bearer_auth(token)
                .json(&json!({ "channel": &channel, "text": text }))
                .send()
                .await;

            match result {
                Ok(response) if response.status().is_success() => {
                    debug!(channel = %channel, "completion notice delivered");
                }
                Ok(response) => {
                    warn!(status = %response.status(), "completion notice rejected");
                }
                Err(err) => {
                    warn!(error = %err, "completion notice failed");
                }
            }
        });
    }
}
