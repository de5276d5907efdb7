use async_trait::async_trait;
use std::time::Duration;
use teloxide::prelude::*;
use teloxide::types::{AllowedUpdate, ChatId, InlineKeyboardMarkup, UpdateKind};
use teloxide::RequestError;
use thiserror::Error;
use tracing::debug;

/// A text message delivered by the platform.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingMessage {
    pub chat_id: ChatId,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutboundMessage {
    pub chat_id: ChatId,
    pub text: String,
    pub reply_markup: InlineKeyboardMarkup,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to connect to Telegram: {0}")]
    Connect(#[source] RequestError),
    #[error("long polling failed: {0}")]
    Receive(#[source] RequestError),
    #[error("failed to send message to chat {}: {source}", .chat_id.0)]
    Send {
        chat_id: ChatId,
        #[source]
        source: RequestError,
    },
}

/// Pause before polling again after a network failure.
const NETWORK_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Headroom between the long-poll timeout and the HTTP client timeout.
const REQUEST_TIMEOUT_MARGIN_SECS: u64 = 10;

impl TransportError {
    /// How long to wait before the next poll when the failure is transient.
    /// `None` means the receive loop cannot recover.
    pub fn retry_delay(&self) -> Option<Duration> {
        match self {
            Self::Receive(RequestError::RetryAfter(wait)) => Some(*wait),
            Self::Receive(RequestError::Network(_) | RequestError::Io(_)) => Some(NETWORK_RETRY_DELAY),
            _ => None,
        }
    }
}

/// The two calls the bot loop needs from a messaging platform.
#[async_trait]
pub trait Transport: Send {
    /// Waits for the next batch of messages. An empty batch means the poll timed out.
    async fn receive(&mut self) -> Result<Vec<IncomingMessage>, TransportError>;

    async fn send(&mut self, message: &OutboundMessage) -> Result<(), TransportError>;
}

pub struct TelegramTransport {
    bot: Bot,
    timeout_secs: u32,
    offset: i32,
    username: Option<String>,
}

impl TelegramTransport {
    /// teloxide's default client gives up after 17s, so a longer poll needs a longer deadline.
    pub fn build_bot(token: &str, timeout_secs: u32) -> Result<Bot, reqwest::Error> {
        let client = teloxide::net::default_reqwest_settings()
            .timeout(Duration::from_secs(u64::from(timeout_secs) + REQUEST_TIMEOUT_MARGIN_SECS))
            .build()?;
        Ok(Bot::with_client(token, client))
    }

    /// Checks the token with `getMe` before any polling starts.
    pub async fn connect(bot: Bot, timeout_secs: u32) -> Result<Self, TransportError> {
        let me = bot.get_me().await.map_err(TransportError::Connect)?;
        Ok(Self {
            bot,
            timeout_secs,
            offset: 0,
            username: me.user.username.clone(),
        })
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn receive(&mut self) -> Result<Vec<IncomingMessage>, TransportError> {
        let updates = self
            .bot
            .get_updates()
            .offset(self.offset)
            .timeout(self.timeout_secs)
            .allowed_updates(vec![AllowedUpdate::Message])
            .await
            .map_err(TransportError::Receive)?;

        let mut messages = Vec::with_capacity(updates.len());
        for update in updates {
            // Every update is acknowledged, including the ones we drop.
            self.offset = self.offset.max(update.id + 1);
            match update.kind {
                UpdateKind::Message(msg) => match msg.text() {
                    Some(text) => messages.push(IncomingMessage {
                        chat_id: msg.chat.id,
                        text: text.to_string(),
                    }),
                    None => debug!("Skipping non-text message in chat {}", msg.chat.id.0),
                },
                _ => debug!("Skipping update {}", update.id),
            }
        }

        Ok(messages)
    }

    async fn send(&mut self, message: &OutboundMessage) -> Result<(), TransportError> {
        self.bot
            .send_message(message.chat_id, &message.text)
            .reply_markup(message.reply_markup.clone())
            .await
            .map_err(|source| TransportError::Send {
                chat_id: message.chat_id,
                source,
            })?;
        Ok(())
    }
}
