//! Core building blocks for the folio-agent worker: configuration, the
//! error taxonomy, fault classification, the room event bus, and the
//! tool-call registry.

pub mod classifier;
pub mod config;
pub mod error;
pub mod events;
pub mod tool_registry;
pub mod types;

pub use classifier::{Classification, ErrorCategory, ErrorClassifier, Severity};
pub use config::{AgentConfig, PricingConfig, Settings};
pub use error::{AgentError, Result};
pub use events::{EventBus, RoomEvent, ServiceUsage};
pub use tool_registry::{schemas_to_openai_tools, Tool, ToolRegistry};
pub use types::{SessionStatus, ToolOutput, ToolSchema};
