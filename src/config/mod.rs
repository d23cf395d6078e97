//! Configuration module for Joinbell.
//!
//! Loads configuration from environment variables (and `.env`).

mod allow_list;

use std::env;
use std::net::SocketAddr;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;
use tracing::warn;
use url::Url;

pub use allow_list::AllowList;

/// Telegram rejects media groups with more than 10 items.
pub const MEDIA_GROUP_LIMIT: usize = 10;

/// Default caption used when `WELCOME_MESSAGE` is not set.
pub const DEFAULT_WELCOME_MESSAGE: &str = "Welcome to the group! 👋\n\n\
Here are a few photos from our community.\n\
Say hi and tell us a bit about yourself!";

/// Bot running mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BotMode {
    #[default]
    Polling,
    Webhook,
}

/// Errors that stop the bot before it starts listening.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TELEGRAM_BOT_TOKEN must be set")]
    MissingToken,

    #[error("WEBHOOK_URL must be set when BOT_MODE is webhook")]
    MissingWebhookUrl,

    #[error("invalid chat id {entry:?} in ALLOWED_CHAT_IDS")]
    InvalidChatId {
        entry: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    // Telegram
    pub bot_token: String,
    pub bot_mode: BotMode,
    pub webhook_url: Option<Url>,
    pub webhook_port: u16,
    pub webhook_secret: Option<String>,

    /// Chats allowed to receive announcements (empty = all chats).
    pub allowed_chat_ids: AllowList,

    // Announcement
    pub welcome_message: String,
    pub images_folder: PathBuf,
    pub max_images: usize,

    /// Address for the admin HTTP surface. Disabled when unset.
    pub admin_addr: Option<SocketAddr>,
    /// Bearer token required on `/bot/*` routes when set.
    pub admin_api_token: Option<String>,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bot_token = get("TELEGRAM_BOT_TOKEN")
            .or_else(|| get("BOT_TOKEN"))
            .ok_or(ConfigError::MissingToken)?;

        let bot_mode = match get("BOT_MODE").map(|m| m.trim().to_lowercase()).as_deref() {
            None | Some("polling") => BotMode::Polling,
            Some("webhook") => BotMode::Webhook,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    key: "BOT_MODE",
                    value: other.to_string(),
                });
            }
        };

        let webhook_url = get("WEBHOOK_URL")
            .map(|raw| {
                Url::parse(raw.trim()).map_err(|_| ConfigError::InvalidValue {
                    key: "WEBHOOK_URL",
                    value: raw,
                })
            })
            .transpose()?;

        if bot_mode == BotMode::Webhook && webhook_url.is_none() {
            return Err(ConfigError::MissingWebhookUrl);
        }

        let webhook_port = parse_or("WEBHOOK_PORT", get("WEBHOOK_PORT"), 8443)?;

        let allowed_chat_ids = match get("ALLOWED_CHAT_IDS") {
            Some(raw) => AllowList::parse(&raw)?,
            None => AllowList::default(),
        };

        let max_images = parse_or("MAX_IMAGES", get("MAX_IMAGES"), MEDIA_GROUP_LIMIT)?;
        let max_images = if max_images > MEDIA_GROUP_LIMIT {
            warn!(
                "MAX_IMAGES={} exceeds the media group limit, using {}",
                max_images, MEDIA_GROUP_LIMIT
            );
            MEDIA_GROUP_LIMIT
        } else {
            max_images
        };

        let admin_addr = get("ADMIN_ADDR")
            .map(|raw| {
                raw.trim().parse::<SocketAddr>().map_err(|_| ConfigError::InvalidValue {
                    key: "ADMIN_ADDR",
                    value: raw,
                })
            })
            .transpose()?;

        Ok(Self {
            bot_token,
            bot_mode,
            webhook_url,
            webhook_port,
            webhook_secret: get("WEBHOOK_SECRET"),
            allowed_chat_ids,
            welcome_message: get("WELCOME_MESSAGE")
                .unwrap_or_else(|| DEFAULT_WELCOME_MESSAGE.to_string()),
            images_folder: get("IMAGES_FOLDER")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("images")),
            max_images,
            admin_addr,
            admin_api_token: get("ADMIN_API_TOKEN"),
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use teloxide::types::ChatId;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("TELEGRAM_BOT_TOKEN", "123:abc")]).unwrap();
        assert_eq!(config.bot_token, "123:abc");
        assert_eq!(config.bot_mode, BotMode::Polling);
        assert!(config.allowed_chat_ids.is_empty());
        assert_eq!(config.images_folder, PathBuf::from("images"));
        assert_eq!(config.max_images, 10);
        assert_eq!(config.welcome_message, DEFAULT_WELCOME_MESSAGE);
        assert!(config.admin_addr.is_none());
    }

    #[test]
    fn test_missing_token_is_fatal() {
        assert!(matches!(load(&[]), Err(ConfigError::MissingToken)));
        assert!(matches!(
            load(&[("TELEGRAM_BOT_TOKEN", "  ")]),
            Err(ConfigError::MissingToken)
        ));
    }

    #[test]
    fn test_legacy_token_name() {
        let config = load(&[("BOT_TOKEN", "999:xyz")]).unwrap();
        assert_eq!(config.bot_token, "999:xyz");
    }

    #[test]
    fn test_allow_list_parsed() {
        let config = load(&[
            ("TELEGRAM_BOT_TOKEN", "t"),
            ("ALLOWED_CHAT_IDS", "-1001234, -1005678"),
        ])
        .unwrap();
        assert!(config.allowed_chat_ids.permits(ChatId(-1001234)));
        assert!(!config.allowed_chat_ids.permits(ChatId(1)));
    }

    #[test]
    fn test_malformed_allow_list_is_fatal() {
        let err = load(&[("TELEGRAM_BOT_TOKEN", "t"), ("ALLOWED_CHAT_IDS", "12,x")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidChatId { .. }));

        let err = load(&[("TELEGRAM_BOT_TOKEN", "t"), ("ALLOWED_CHAT_IDS", "-1001,")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidChatId { ref entry, .. } if entry.is_empty()));
    }

    #[test]
    fn test_blank_allow_list_admits_all() {
        let config = load(&[("TELEGRAM_BOT_TOKEN", "t"), ("ALLOWED_CHAT_IDS", "  ")]).unwrap();
        assert!(config.allowed_chat_ids.is_empty());
    }

    #[test]
    fn test_max_images_is_clamped() {
        let config = load(&[("TELEGRAM_BOT_TOKEN", "t"), ("MAX_IMAGES", "25")]).unwrap();
        assert_eq!(config.max_images, MEDIA_GROUP_LIMIT);

        let config = load(&[("TELEGRAM_BOT_TOKEN", "t"), ("MAX_IMAGES", "3")]).unwrap();
        assert_eq!(config.max_images, 3);

        let err = load(&[("TELEGRAM_BOT_TOKEN", "t"), ("MAX_IMAGES", "-1")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "MAX_IMAGES", .. }));
    }

    #[test]
    fn test_webhook_mode_requires_url() {
        let err = load(&[("TELEGRAM_BOT_TOKEN", "t"), ("BOT_MODE", "webhook")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingWebhookUrl));

        let config = load(&[
            ("TELEGRAM_BOT_TOKEN", "t"),
            ("BOT_MODE", "Webhook"),
            ("WEBHOOK_URL", "https://example.org/hook"),
        ])
        .unwrap();
        assert_eq!(config.bot_mode, BotMode::Webhook);
        assert_eq!(config.webhook_port, 8443);
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let err = load(&[("TELEGRAM_BOT_TOKEN", "t"), ("BOT_MODE", "carrier-pigeon")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "BOT_MODE", .. }));
    }

    #[test]
    fn test_admin_addr() {
        let config = load(&[("TELEGRAM_BOT_TOKEN", "t"), ("ADMIN_ADDR", "127.0.0.1:8000")]).unwrap();
        assert_eq!(config.admin_addr, Some("127.0.0.1:8000".parse().unwrap()));

        let err = load(&[("TELEGRAM_BOT_TOKEN", "t"), ("ADMIN_ADDR", "nowhere")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "ADMIN_ADDR", .. }));
    }
}
