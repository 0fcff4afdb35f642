use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;
use tracing::{error, info, warn};

/// Where in the voice pipeline a fault occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCategory {
    #[serde(rename = "stt_error")]
    SpeechRecognition,
    #[serde(rename = "llm_error")]
    LanguageModel,
    #[serde(rename = "tts_error")]
    SpeechSynthesis,
    #[serde(rename = "connection_error")]
    Connection,
    #[serde(rename = "timeout_error")]
    Timeout,
}

impl ErrorCategory {
    pub const ALL: [ErrorCategory; 5] = [
        ErrorCategory::SpeechRecognition,
        ErrorCategory::LanguageModel,
        ErrorCategory::SpeechSynthesis,
        ErrorCategory::Connection,
        ErrorCategory::Timeout,
    ];

    /// Stable key used in metrics and event payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::SpeechRecognition => "stt_error",
            ErrorCategory::LanguageModel => "llm_error",
            ErrorCategory::SpeechSynthesis => "tts_error",
            ErrorCategory::Connection => "connection_error",
            ErrorCategory::Timeout => "timeout_error",
        }
    }

    /// Human-readable prefix for log lines.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorCategory::SpeechRecognition => "STT error",
            ErrorCategory::LanguageModel => "LLM error",
            ErrorCategory::SpeechSynthesis => "TTS error",
            ErrorCategory::Connection => "Connection error",
            ErrorCategory::Timeout => "Timeout error",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Outcome of classifying one pipeline fault.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub severity: Severity,
    /// Whether the failed operation is worth retrying.
    pub retryable: bool,
    /// What the agent should say aloud, if anything. `None` means stay
    /// silent.
    pub user_message: Option<String>,
}

#[derive(Debug, Clone, Copy)]
struct CategoryStat {
    count: u64,
    last_seen: DateTime<Utc>,
}

/// Maps pipeline faults to severity, retry advice, and a spoken fallback,
/// keeping per-category occurrence counts.
#[derive(Debug, Default)]
pub struct ErrorClassifier {
    stats: Mutex<HashMap<ErrorCategory, CategoryStat>>,
}

impl ErrorClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a fault, record it, and log it at a level matching its
    /// severity.
    pub fn classify(&self, category: ErrorCategory, fault: &str) -> Classification {
        let classification = classification_for(category, fault);
        self.record(category);
        match classification.severity {
            Severity::High => {
                error!(category = category.as_str(), "{}: {}", category.label(), fault)
            }
            Severity::Medium => {
                warn!(category = category.as_str(), "{}: {}", category.label(), fault)
            }
            Severity::Low => {
                info!(category = category.as_str(), "{}: {}", category.label(), fault)
            }
        }
        classification
    }

    fn record(&self, category: ErrorCategory) {
        let mut stats = self.stats.lock().unwrap();
        let stat = stats.entry(category).or_insert(CategoryStat {
            count: 0,
            last_seen: Utc::now(),
        });
        stat.count += 1;
        stat.last_seen = Utc::now();
    }

    /// How many faults of this category have been classified.
    pub fn count(&self, category: ErrorCategory) -> u64 {
        self.stats
            .lock()
            .unwrap()
            .get(&category)
            .map(|s| s.count)
            .unwrap_or(0)
    }

    /// Snapshot of all category counts.
    pub fn counts(&self) -> HashMap<ErrorCategory, u64> {
        self.stats
            .lock()
            .unwrap()
            .iter()
            .map(|(category, stat)| (*category, stat.count))
            .collect()
    }

    /// When this category last fired.
    pub fn last_seen(&self, category: ErrorCategory) -> Option<DateTime<Utc>> {
        self.stats
            .lock()
            .unwrap()
            .get(&category)
            .map(|s| s.last_seen)
    }
}

fn classification_for(category: ErrorCategory, fault: &str) -> Classification {
    match category {
        ErrorCategory::SpeechRecognition => Classification {
            severity: Severity::Medium,
            retryable: true,
            user_message: Some(
                "I'm sorry, I didn't catch that. Could you please repeat?".into(),
            ),
        },
        ErrorCategory::LanguageModel => {
            let rate_limited = fault.contains("rate limit") || fault.contains("429");
            let message = if rate_limited {
                "I'm experiencing high demand right now. Please try again in a moment."
            } else {
                "I'm having trouble processing that right now. Could you try rephrasing your question?"
            };
            Classification {
                severity: Severity::High,
                retryable: true,
                user_message: Some(message.into()),
            }
        }
        ErrorCategory::SpeechSynthesis => Classification {
            severity: Severity::Medium,
            retryable: true,
            user_message: None,
        },
        ErrorCategory::Connection => Classification {
            severity: Severity::High,
            retryable: true,
            user_message: None,
        },
        ErrorCategory::Timeout => Classification {
            severity: Severity::Medium,
            retryable: true,
            user_message: Some(
                "I'm taking a bit longer than usual. Let me try that again.".into(),
            ),
        },
    }
}
