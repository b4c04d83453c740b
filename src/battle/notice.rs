//! Presentation notices.
//!
//! The battle never renders anything. It publishes `Notice`s on a broadcast
//! bus and any number of presentation layers subscribe. Publishing with no
//! subscriber is normal and silently drops the notice.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::cards::CardId;
use crate::core::UnitId;

/// Combat log categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogCategory {
    System,
    Player,
    Enemy,
    Damage,
    Status,
}

/// One-way message to the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Notice {
    UpdateUi,
    RenderBattlefield,
    ClearLog,
    Log { message: String, category: LogCategory },
    Toast(String),
    FloatText { target: Option<UnitId>, text: String, color: String },
    SpawnVfx { vfx: String, target: Option<UnitId> },
    PlaySound(String),
    Shake,
    AnimateCardPlay { card: CardId },
    PlayBgm(String),
    StopBgm,
    HighlightUnit { unit: UnitId, on: bool },
}

impl Notice {
    #[must_use]
    pub fn log(message: impl Into<String>, category: LogCategory) -> Self {
        Notice::Log { message: message.into(), category }
    }

    #[must_use]
    pub fn float(target: UnitId, text: impl Into<String>, color: impl Into<String>) -> Self {
        Notice::FloatText { target: Some(target), text: text.into(), color: color.into() }
    }
}

/// Broadcast bus for notices.
#[derive(Clone, Debug)]
pub struct NoticeBus {
    tx: broadcast::Sender<Notice>,
}

impl Default for NoticeBus {
    fn default() -> Self {
        Self::with_capacity(256)
    }
}

impl NoticeBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { tx: broadcast::channel(capacity).0 }
    }

    /// Best-effort publish.
    pub fn publish(&self, notice: Notice) {
        if self.tx.send(notice).is_err() {
            tracing::trace!("no notice subscribers");
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }
}
