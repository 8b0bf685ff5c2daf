//! Discord Webhook 通知

use chrono::{DateTime, Utc};
use reqwest::blocking::{Client, ClientBuilder};
use serde::Serialize;
use std::time::Duration;

use super::{ChangeEvent, Notifier};
use crate::error::NotifyError;
use crate::fingerprint::preview;

pub const NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

const EMBED_COLOR: u32 = 3447003; // 蓝色
const FOOTER_TEXT: &str = "Website Monitor Bot";

#[derive(Debug, Serialize)]
pub struct WebhookPayload {
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Serialize)]
pub struct Embed {
    pub title: String,
    pub url: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    pub timestamp: String,
    pub footer: EmbedFooter,
}

#[derive(Debug, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

fn field(name: &str, value: impl Into<String>, inline: bool) -> EmbedField {
    EmbedField {
        name: name.to_string(),
        value: value.into(),
        inline,
    }
}

/// 构建 Webhook 消息体
pub fn build_payload(change: &ChangeEvent, at: DateTime<Utc>) -> WebhookPayload {
    let embed = Embed {
        title: format!("🔔 Change Detected: {}", change.site),
        url: change.url.clone(),
        color: EMBED_COLOR,
        fields: vec![
            field("Site", change.site.as_str(), true),
            field("URL", change.url.as_str(), false),
            field("Previous Hash", format!("`{}`", preview(&change.old_hash)), true),
            field("New Hash", format!("`{}`", preview(&change.new_hash)), true),
        ],
        timestamp: at.to_rfc3339(),
        footer: EmbedFooter {
            text: FOOTER_TEXT.to_string(),
        },
    };

    WebhookPayload {
        embeds: vec![embed],
    }
}

pub struct DiscordNotifier {
    client: Client,
    webhook_url: String,
}

impl DiscordNotifier {
    pub fn new(webhook_url: impl Into<String>) -> Result<Self, NotifyError> {
        let client = Self::client_builder().build()?;
        Ok(Self::with_client(client, webhook_url))
    }

    pub fn client_builder() -> ClientBuilder {
        Client::builder().timeout(NOTIFY_TIMEOUT)
    }

    pub fn with_client(client: Client, webhook_url: impl Into<String>) -> Self {
        Self {
            client,
            webhook_url: webhook_url.into(),
        }
    }
}

impl Notifier for DiscordNotifier {
    fn notify(&self, change: &ChangeEvent) -> Result<(), NotifyError> {
        let payload = build_payload(change, Utc::now());

        let res = self.client.post(&self.webhook_url).json(&payload).send()?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().unwrap_or_default();
            return Err(NotifyError::Status { status, body });
        }

        Ok(())
    }
}
