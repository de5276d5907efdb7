use crate::config::Config;
use crate::transport::{IncomingMessage, OutboundMessage};
use crate::utils::web_app_keyboard;
use reqwest::Url;

const START_COMMAND: &str = "/start";

/// Matches `/start` and `/start@<bot_username>` on the first token of `text`.
/// Anything after the command (a deep-link payload, for instance) is ignored.
pub fn is_start_command(text: &str, bot_username: Option<&str>) -> bool {
    let Some(token) = text.split_whitespace().next() else {
        return false;
    };

    match token.split_once('@') {
        None => token == START_COMMAND,
        Some((command, mention)) => {
            command == START_COMMAND
                && bot_username.is_some_and(|name| name.eq_ignore_ascii_case(mention))
        }
    }
}

/// Answers `/start` with the welcome message and the web app button.
#[derive(Debug, Clone)]
pub struct StartHandler {
    welcome_text: String,
    button_text: String,
    web_app_url: Url,
    bot_username: Option<String>,
}

impl StartHandler {
    pub fn new(config: &Config) -> Self {
        Self {
            welcome_text: config.welcome_text.clone(),
            button_text: config.button_text.clone(),
            web_app_url: config.web_app_url.clone(),
            bot_username: None,
        }
    }

    pub fn with_bot_username(mut self, username: Option<&str>) -> Self {
        self.bot_username = username.map(str::to_string);
        self
    }

    pub fn handle(&self, msg: &IncomingMessage) -> Option<OutboundMessage> {
        if !is_start_command(&msg.text, self.bot_username.as_deref()) {
            return None;
        }

        Some(OutboundMessage {
            chat_id: msg.chat_id,
            text: self.welcome_text.clone(),
            reply_markup: web_app_keyboard(&self.button_text, &self.web_app_url),
        })
    }
}
