use chrono::{DateTime, Utc};
use folio_core::SessionStatus;
use serde::{Deserialize, Serialize};

/// Everything recorded about one voice session, from start to summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: String,
    pub room_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_identity: Option<String>,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<i64>,
    pub status: SessionStatus,
    /// Total conversation turns, user and agent combined.
    pub message_count: u64,
    pub user_messages: u64,
    pub agent_messages: u64,
    pub error_count: u64,
    pub api_usage: ApiUsage,
}

impl SessionRecord {
    pub fn new(session_id: &str, room_name: &str, participant_identity: Option<&str>) -> Self {
        Self {
            session_id: session_id.to_string(),
            room_name: room_name.to_string(),
            participant_identity: participant_identity.map(String::from),
            started_at: Utc::now(),
            ended_at: None,
            duration_ms: None,
            status: SessionStatus::Active,
            message_count: 0,
            user_messages: 0,
            agent_messages: 0,
            error_count: 0,
            api_usage: ApiUsage::default(),
        }
    }
}

/// Cumulative per-service usage and estimated spend for one session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiUsage {
    pub stt: SttUsage,
    pub llm: LlmUsage,
    pub tts: TtsUsage,
    pub total: TotalUsage,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SttUsage {
    pub requests: u64,
    pub audio_seconds: f64,
    pub estimated_cost: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmUsage {
    pub requests: u64,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
    pub estimated_cost: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TtsUsage {
    pub requests: u64,
    pub characters: u64,
    pub estimated_cost: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TotalUsage {
    pub estimated_cost: f64,
}

/// Worker-wide tally for one error category. Kept outside any session so
/// faults before or after a session still count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMetric {
    pub error_type: String,
    pub count: u64,
    pub last_occurrence: DateTime<Utc>,
}
