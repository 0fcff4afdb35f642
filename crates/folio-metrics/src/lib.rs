//! Per-session usage, cost, and error accounting for the voice worker.

pub mod monitor;
pub mod session;

pub use monitor::SessionMonitor;
pub use session::{ApiUsage, ErrorMetric, LlmUsage, SessionRecord, SttUsage, TotalUsage, TtsUsage};
