//! Sharing a catch to the host feed.

use crate::constants::{GAME_TITLE, SHARE_OUTBOX_FILENAME};
use crate::error::ShareError;
use crate::reward::{RarityTier, RewardDefinition};
use crate::utils::persistence::data_path;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A post for the host feed: text plus optional embedded links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareRequest {
    pub text: String,
    pub embeds: Vec<String>,
}

impl ShareRequest {
    pub fn for_reward(reward: &RewardDefinition, embed_url: Option<&str>) -> Self {
        Self {
            text: compose_share_text(reward),
            embeds: embed_url.map(|url| vec![url.to_string()]).unwrap_or_default(),
        }
    }
}

/// Host-side compose action.
pub trait ShareTarget {
    fn compose(&mut self, request: &ShareRequest) -> Result<(), ShareError>;
}

/// Builds the post text, e.g.
/// `I caught 🐋 Ikan Paus in Fishy Fortune! 🎉 LEGENDARY! +50 tokens!`
pub fn compose_share_text(reward: &RewardDefinition) -> String {
    let mut text = format!("I caught {} in {}!", reward.title(), GAME_TITLE);
    if reward.rarity == RarityTier::Legendary {
        text.push_str(&format!(" 🎉 LEGENDARY! +{} tokens!", reward.token_reward));
    }
    text
}

#[derive(Serialize)]
struct OutboxEntry<'a> {
    text: &'a str,
    embeds: &'a [String],
    composed_at: String,
}

/// Appends each post as a JSON line to an outbox file the host picks up.
#[derive(Debug, Clone)]
pub struct OutboxShareTarget {
    path: PathBuf,
}

impl OutboxShareTarget {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Outbox at ~/.fishy-fortune/shares.jsonl.
    pub fn in_data_dir() -> io::Result<Self> {
        Ok(Self::new(data_path(SHARE_OUTBOX_FILENAME)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ShareTarget for OutboxShareTarget {
    fn compose(&mut self, request: &ShareRequest) -> Result<(), ShareError> {
        let entry = OutboxEntry {
            text: &request.text,
            embeds: &request.embeds,
            composed_at: chrono::Utc::now().to_rfc3339(),
        };
        let line = serde_json::to_string(&entry)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }
}

/// Keeps posts in memory; can be told to reject them.
#[derive(Debug, Clone, Default)]
pub struct MemoryShareTarget {
    pub sent: Vec<ShareRequest>,
    pub reject_with: Option<String>,
}

impl ShareTarget for MemoryShareTarget {
    fn compose(&mut self, request: &ShareRequest) -> Result<(), ShareError> {
        if let Some(reason) = &self.reject_with {
            return Err(ShareError::Rejected(reason.clone()));
        }
        self.sent.push(request.clone());
        Ok(())
    }
}
