use crate::classifier::ErrorCategory;
use crate::types::SessionStatus;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Default buffer size for the event channel.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Billable usage reported by one pipeline service call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "service")]
pub enum ServiceUsage {
    #[serde(rename = "stt")]
    Stt { audio_seconds: f64 },
    #[serde(rename = "llm")]
    Llm {
        input_tokens: u64,
        output_tokens: u64,
    },
    #[serde(rename = "tts")]
    Tts { characters: u64 },
}

/// Everything that can happen inside a voice room, as seen by the worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoomEvent {
    SessionStarted {
        room: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        participant: Option<String>,
    },
    SessionEnded {
        room: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        status: Option<SessionStatus>,
    },
    UserMessage {
        room: String,
    },
    AgentMessage {
        room: String,
    },
    MetricsCollected {
        room: String,
        #[serde(flatten)]
        usage: ServiceUsage,
    },
    ToolInvoked {
        room: String,
        name: String,
        #[serde(default)]
        arguments: serde_json::Value,
    },
    ErrorRaised {
        room: String,
        category: ErrorCategory,
        message: String,
    },
}

impl RoomEvent {
    /// The room this event belongs to.
    pub fn room(&self) -> &str {
        match self {
            RoomEvent::SessionStarted { room, .. }
            | RoomEvent::SessionEnded { room, .. }
            | RoomEvent::UserMessage { room }
            | RoomEvent::AgentMessage { room }
            | RoomEvent::MetricsCollected { room, .. }
            | RoomEvent::ToolInvoked { room, .. }
            | RoomEvent::ErrorRaised { room, .. } => room,
        }
    }
}

/// Broadcast channel fanning room events out to any number of subscribers.
///
/// Clones share the underlying channel. Slow subscribers lag rather than
/// block publishers.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<RoomEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers. Returns the number of
    /// subscribers that received it, or an error if there are none.
    pub fn publish(
        &self,
        event: RoomEvent,
    ) -> Result<usize, broadcast::error::SendError<RoomEvent>> {
        self.sender.send(event)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RoomEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
