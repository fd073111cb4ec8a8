//! VK Teams bot message delivery

use reqwest::blocking::Client;
use std::time::Duration;

use crate::error::{RatewatchError, Result};
use crate::report::ReportSender;

const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Delivers report texts through the VK Teams bot `sendText` endpoint. The
/// token and destination chat are opaque to the rest of the crate.
pub struct VkTeamsSender {
    client: Client,
    api_url: String,
    token: String,
    chat_id: String,
}

impl VkTeamsSender {
    pub fn new(
        api_url: impl Into<String>,
        token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .map_err(|err| {
                RatewatchError::Transport(format!("failed to build HTTP client: {}", err))
            })?;
        Ok(Self {
            client,
            api_url: api_url.into(),
            token: token.into(),
            chat_id: chat_id.into(),
        })
    }
}

impl ReportSender for VkTeamsSender {
    fn send(&self, text: &str) -> Result<()> {
        let url = format!("{}/messages/sendText", self.api_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("token", self.token.as_str()),
                ("chatId", self.chat_id.as_str()),
                ("text", text),
            ])
            .send()
            .map_err(|err| RatewatchError::Transport(format!("sendText failed: {}", err)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(RatewatchError::Transport(format!(
                "sendText returned {}",
                response.status()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_creation() {
        let sender = VkTeamsSender::new("https://api.example.test/bot/v1", "token", "chat");
        assert!(sender.is_ok());
    }
}
