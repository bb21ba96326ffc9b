//! In-memory chat sessions keyed by cookie id

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::Serialize;
use uuid::Uuid;

/// Who wrote a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in a transcript
#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
    pub at: DateTime<Utc>,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            at: Utc::now(),
        }
    }
}

/// Ordered, append-only list of turns
#[derive(Debug, Clone)]
pub struct Transcript {
    turns: Vec<ChatTurn>,
    last_active: DateTime<Utc>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self {
            turns: Vec::new(),
            last_active: Utc::now(),
        }
    }
}

impl Transcript {
    pub fn push(&mut self, turn: ChatTurn) {
        self.last_active = turn.at;
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// Process-local session map; everything is lost on restart
///
/// Sessions are opened only when there is a turn to keep. Sessions idle
/// longer than `idle_ttl` are dropped, and the map never holds more than
/// `max_sessions` entries.
pub struct SessionStore {
    sessions: DashMap<String, Transcript>,
    idle_ttl: Duration,
    max_sessions: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Duration::hours(1), 1000)
    }
}

impl SessionStore {
    pub fn new(idle_ttl: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            idle_ttl,
            max_sessions: max_sessions.max(1),
        }
    }

    /// Return `id` if it names a live session
    pub fn find(&self, id: &str) -> Option<String> {
        let transcript = self.sessions.get(id)?;
        if Utc::now() - transcript.last_active > self.idle_ttl {
            drop(transcript);
            self.sessions.remove(id);
            return None;
        }
        Some(id.to_string())
    }

    /// Open a new empty session, making room for it first
    pub fn open(&self) -> String {
        self.prune_idle(Utc::now());
        while self.sessions.len() >= self.max_sessions {
            let oldest = self
                .sessions
                .iter()
                .min_by_key(|entry| entry.value().last_active)
                .map(|entry| entry.key().clone());
            match oldest {
                Some(id) => {
                    self.sessions.remove(&id);
                    tracing::debug!("Evicted chat session {}", id);
                }
                None => break,
            }
        }

        let id = Uuid::new_v4().to_string();
        self.sessions.insert(id.clone(), Transcript::default());
        tracing::debug!("Opened chat session {}", id);
        id
    }

    /// Drop sessions with no activity since `now - idle_ttl`
    pub fn prune_idle(&self, now: DateTime<Utc>) {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, transcript| now - transcript.last_active <= self.idle_ttl);
        let dropped = before.saturating_sub(self.sessions.len());
        if dropped > 0 {
            tracing::debug!("Expired {} idle chat sessions", dropped);
        }
    }

    /// Append turns to a session in order
    pub fn append(&self, id: &str, turns: impl IntoIterator<Item = ChatTurn>) {
        let mut transcript = self.sessions.entry(id.to_string()).or_default();
        for turn in turns {
            transcript.push(turn);
        }
    }

    /// Snapshot of a session's turns
    pub fn transcript(&self, id: &str) -> Vec<ChatTurn> {
        self.sessions
            .get(id)
            .map(|t| t.turns().to_vec())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
