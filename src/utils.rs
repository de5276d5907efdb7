use reqwest::Url;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, WebAppInfo};

/// Single-row keyboard with one button that opens `url` as a Telegram web app.
pub fn web_app_keyboard(text: &str, url: &Url) -> InlineKeyboardMarkup {
    let button = InlineKeyboardButton::web_app(text, WebAppInfo { url: url.clone() });
    InlineKeyboardMarkup::new(vec![vec![button]])
}
