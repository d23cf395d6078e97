//! Chat allow-list parsed from `ALLOWED_CHAT_IDS`.

use std::collections::BTreeSet;

use teloxide::types::ChatId;

use super::ConfigError;

/// Set of chats allowed to receive announcements.
///
/// An empty list admits every chat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    chats: BTreeSet<i64>,
}

impl AllowList {
    /// Parse a comma-separated list of chat ids.
    ///
    /// A blank input is an empty list. Every entry between commas must be an
    /// integer, so a stray or doubled comma is an error.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let mut chats = BTreeSet::new();
        if raw.trim().is_empty() {
            return Ok(Self { chats });
        }

        for entry in raw.split(',').map(str::trim) {
            let id = entry
                .parse::<i64>()
                .map_err(|source| ConfigError::InvalidChatId {
                    entry: entry.to_string(),
                    source,
                })?;
            chats.insert(id);
        }
        Ok(Self { chats })
    }

    /// Returns true if announcements may be sent to `chat_id`.
    pub fn permits(&self, chat_id: ChatId) -> bool {
        self.chats.is_empty() || self.chats.contains(&chat_id.0)
    }

    pub fn is_empty(&self) -> bool {
        self.chats.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chats.len()
    }
}

impl FromIterator<i64> for AllowList {
    fn from_iter<T: IntoIterator<Item = i64>>(iter: T) -> Self {
        Self {
            chats: iter.into_iter().collect(),
        }
    }
}
