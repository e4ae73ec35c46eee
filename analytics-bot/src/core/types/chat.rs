//! Chat identity type for core messages.

use serde::{Deserialize, Serialize};

/// Conversation kind as reported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
}

/// Chat identity and kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub kind: ChatKind,
}

impl Chat {
    pub fn new(id: i64, kind: ChatKind) -> Self {
        Self { id, kind }
    }

    /// Groups and supergroups. Only these are logged and served by commands.
    pub fn is_group_context(&self) -> bool {
        matches!(self.kind, ChatKind::Group | ChatKind::Supergroup)
    }
}
