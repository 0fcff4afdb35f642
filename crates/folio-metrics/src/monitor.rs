use crate::session::{ErrorMetric, SessionRecord};
use chrono::Utc;
use folio_core::{AgentError, PricingConfig, Result, SessionStatus};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, info, warn};

/// Tracks usage, estimated cost, and errors for every session the worker
/// serves.
///
/// All methods take `&self`; state lives behind one mutex so the monitor
/// can sit in an `Arc` shared across tasks. Usage reported for a session
/// the monitor has never seen is dropped silently, with one deliberate
/// exception: [`SessionMonitor::track_error`] always lands in the global
/// error tally, even when the session is unknown.
pub struct SessionMonitor {
    pricing: PricingConfig,
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    sessions: HashMap<String, SessionRecord>,
    error_metrics: HashMap<String, ErrorMetric>,
}

impl SessionMonitor {
    pub fn new(pricing: PricingConfig) -> Self {
        Self {
            pricing,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Begin tracking a session. Session ids are caller-chosen and must be
    /// unique among live and finished sessions alike.
    pub fn start_session(
        &self,
        session_id: &str,
        room_name: &str,
        participant_identity: Option<&str>,
    ) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.sessions.contains_key(session_id) {
            return Err(AgentError::DuplicateSession(session_id.to_string()));
        }
        inner.sessions.insert(
            session_id.to_string(),
            SessionRecord::new(session_id, room_name, participant_identity),
        );
        info!(session_id, room = room_name, "Session started");
        Ok(())
    }

    /// Close a session, stamp its duration, and log the summary. Ending an
    /// unknown session warns and changes nothing; ending a session twice
    /// keeps the first outcome.
    pub fn end_session(&self, session_id: &str, status: SessionStatus) -> Option<SessionRecord> {
        let mut inner = self.inner.lock().unwrap();
        let Some(record) = inner.sessions.get_mut(session_id) else {
            warn!(session_id, "Attempted to end non-existent session");
            return None;
        };

        if record.ended_at.is_none() {
            let ended_at = Utc::now();
            record.duration_ms = Some((ended_at - record.started_at).num_milliseconds());
            record.ended_at = Some(ended_at);
            record.status = status;
            log_record_summary(record);
        } else {
            warn!(session_id, "Session already ended");
        }
        Some(record.clone())
    }

    pub fn track_user_message(&self, session_id: &str) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(record) = inner.sessions.get_mut(session_id) {
            record.user_messages += 1;
            record.message_count += 1;
        }
    }

    pub fn track_agent_message(&self, session_id: &str) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(record) = inner.sessions.get_mut(session_id) {
            record.agent_messages += 1;
            record.message_count += 1;
        }
    }

    /// Record one transcription call.
    pub fn track_stt_usage(&self, session_id: &str, audio_seconds: f64) {
        let cost = self.pricing.stt_cost(audio_seconds);
        let mut inner = self.inner.lock().unwrap();
        if let Some(record) = inner.sessions.get_mut(session_id) {
            let stt = &mut record.api_usage.stt;
            stt.requests += 1;
            stt.audio_seconds += audio_seconds;
            stt.estimated_cost += cost;
            record.api_usage.total.estimated_cost += cost;
            debug!(session_id, audio_seconds, cost, "STT usage tracked");
        }
    }

    /// Record one language-model call.
    pub fn track_llm_usage(&self, session_id: &str, input_tokens: u64, output_tokens: u64) {
        let cost = self.pricing.llm_cost(input_tokens, output_tokens);
        let mut inner = self.inner.lock().unwrap();
        if let Some(record) = inner.sessions.get_mut(session_id) {
            let llm = &mut record.api_usage.llm;
            llm.requests += 1;
            llm.input_tokens += input_tokens;
            llm.output_tokens += output_tokens;
            llm.total_tokens += input_tokens + output_tokens;
            llm.estimated_cost += cost;
            record.api_usage.total.estimated_cost += cost;
            debug!(session_id, input_tokens, output_tokens, cost, "LLM usage tracked");
        }
    }

    /// Record one synthesis call.
    pub fn track_tts_usage(&self, session_id: &str, characters: u64) {
        let cost = self.pricing.tts_cost(characters);
        let mut inner = self.inner.lock().unwrap();
        if let Some(record) = inner.sessions.get_mut(session_id) {
            let tts = &mut record.api_usage.tts;
            tts.requests += 1;
            tts.characters += characters;
            tts.estimated_cost += cost;
            record.api_usage.total.estimated_cost += cost;
            debug!(session_id, characters, cost, "TTS usage tracked");
        }
    }

    /// Record one fault. Bumps the session's error count when the session
    /// is known, and the worker-wide per-category tally unconditionally.
    pub fn track_error(&self, session_id: &str, error_type: &str) {
        let now = Utc::now();
        let mut inner = self.inner.lock().unwrap();
        if let Some(record) = inner.sessions.get_mut(session_id) {
            record.error_count += 1;
        }
        let metric = inner
            .error_metrics
            .entry(error_type.to_string())
            .or_insert(ErrorMetric {
                error_type: error_type.to_string(),
                count: 0,
                last_occurrence: now,
            });
        metric.count += 1;
        metric.last_occurrence = now;
        warn!(session_id, error_type, "Error tracked");
    }

    /// Snapshot of one session.
    pub fn session(&self, session_id: &str) -> Option<SessionRecord> {
        self.inner.lock().unwrap().sessions.get(session_id).cloned()
    }

    /// Snapshot of every session, running or finished.
    pub fn sessions(&self) -> Vec<SessionRecord> {
        self.inner.lock().unwrap().sessions.values().cloned().collect()
    }

    /// Ids of sessions that have not ended yet.
    pub fn active_sessions(&self) -> Vec<String> {
        self.inner
            .lock()
            .unwrap()
            .sessions
            .values()
            .filter(|record| record.ended_at.is_none())
            .map(|record| record.session_id.clone())
            .collect()
    }

    pub fn session_count(&self) -> usize {
        self.inner.lock().unwrap().sessions.len()
    }

    /// Snapshot of the worker-wide error tallies, keyed by category.
    pub fn error_metrics(&self) -> HashMap<String, ErrorMetric> {
        self.inner.lock().unwrap().error_metrics.clone()
    }

    /// Log the summary of a session without ending it.
    pub fn log_summary(&self, session_id: &str) {
        let inner = self.inner.lock().unwrap();
        match inner.sessions.get(session_id) {
            Some(record) => log_record_summary(record),
            None => warn!(session_id, "No session to summarize"),
        }
    }
}

fn log_record_summary(record: &SessionRecord) {
    let duration_minutes = record
        .duration_ms
        .map(|ms| (ms as f64 / 60_000.0 * 100.0).round() / 100.0);
    let api_usage =
        serde_json::to_string(&record.api_usage).unwrap_or_else(|_| String::from("{}"));
    info!(
        session_id = record.session_id.as_str(),
        room = record.room_name.as_str(),
        status = record.status.as_str(),
        duration_ms = record.duration_ms,
        duration_minutes,
        message_count = record.message_count,
        user_messages = record.user_messages,
        agent_messages = record.agent_messages,
        error_count = record.error_count,
        api_usage = api_usage.as_str(),
        "Session summary"
    );
}
