use folio_core::{
    AgentConfig, Classification, ErrorCategory, ErrorClassifier, RoomEvent, ServiceUsage,
    SessionStatus, ToolOutput, ToolRegistry,
};
use folio_data::{PortfolioQueries, PortfolioSource};
use folio_metrics::SessionMonitor;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// The portfolio voice worker: consumes room events and keeps the session
/// ledger, error tallies, and tool results flowing.
pub struct AgentWorker {
    config: AgentConfig,
    monitor: Arc<SessionMonitor>,
    classifier: ErrorClassifier,
    registry: ToolRegistry,
    reconnect: Option<Box<dyn Fn() + Send + Sync>>,
}

impl AgentWorker {
    /// Build a worker: load the portfolio, register the tools, and wire
    /// up session accounting with the configured price table.
    pub async fn new(config: AgentConfig) -> folio_core::Result<Self> {
        let source = PortfolioSource::new(
            config.settings.portfolio_api_url.clone(),
            config.settings.portfolio_data_path.clone(),
        );
        let queries = PortfolioQueries::new(source.load().await);

        let mut registry = ToolRegistry::new();
        folio_tools::register_all(&mut registry, &queries)?;

        let monitor = Arc::new(SessionMonitor::new(config.settings.pricing.clone()));
        Ok(Self {
            config,
            monitor,
            classifier: ErrorClassifier::new(),
            registry,
            reconnect: None,
        })
    }

    /// Install a hook fired when a connection fault is classified.
    pub fn with_reconnect(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.reconnect = Some(Box::new(hook));
        self
    }

    pub fn monitor(&self) -> Arc<SessionMonitor> {
        Arc::clone(&self.monitor)
    }

    /// Consume events until the channel closes, then end whatever
    /// sessions are still open.
    pub async fn run(&self, mut events: broadcast::Receiver<RoomEvent>) {
        info!(
            url = self.config.livekit.url.as_str(),
            model = self.config.settings.llm_model.as_str(),
            tools = self.registry.len(),
            "Worker ready"
        );
        loop {
            match events.recv().await {
                Ok(event) => self.handle_event(event).await,
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    warn!(missed, "Event stream lagged; usage may be undercounted");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        self.shutdown();
    }

    async fn handle_event(&self, event: RoomEvent) {
        match event {
            RoomEvent::SessionStarted { room, participant } => {
                // One session per room; the room name doubles as the id.
                if let Err(e) = self
                    .monitor
                    .start_session(&room, &room, participant.as_deref())
                {
                    warn!(room = room.as_str(), "{e}");
                }
            }
            RoomEvent::SessionEnded { room, status } => {
                self.monitor
                    .end_session(&room, status.unwrap_or(SessionStatus::Completed));
            }
            RoomEvent::UserMessage { room } => self.monitor.track_user_message(&room),
            RoomEvent::AgentMessage { room } => self.monitor.track_agent_message(&room),
            RoomEvent::MetricsCollected { room, usage } => match usage {
                ServiceUsage::Stt { audio_seconds } => {
                    self.monitor.track_stt_usage(&room, audio_seconds)
                }
                ServiceUsage::Llm {
                    input_tokens,
                    output_tokens,
                } => self.monitor.track_llm_usage(&room, input_tokens, output_tokens),
                ServiceUsage::Tts { characters } => {
                    self.monitor.track_tts_usage(&room, characters)
                }
            },
            RoomEvent::ToolInvoked {
                room,
                name,
                arguments,
            } => {
                self.invoke_tool(&room, &name, arguments).await;
            }
            RoomEvent::ErrorRaised {
                room,
                category,
                message,
            } => {
                self.raise_error(&room, category, &message);
            }
        }
    }

    /// Run one tool call for a room. A successful call counts as an agent
    /// turn; a failed one counts against the tool's error tally.
    async fn invoke_tool(&self, room: &str, name: &str, arguments: serde_json::Value) -> ToolOutput {
        let call_id = Uuid::new_v4().to_string();
        debug!(room, tool = name, call_id = call_id.as_str(), "Invoking tool");

        let output = self.registry.execute(name, &call_id, arguments).await;
        if output.is_error {
            error!(room, tool = name, "Tool call failed: {}", output.content);
            self.monitor.track_error(room, name);
        } else {
            self.monitor.track_agent_message(room);
        }
        output
    }

    /// Classify a pipeline fault, count it, and react: fire the reconnect
    /// hook for connection faults, surface the spoken fallback otherwise.
    fn raise_error(&self, room: &str, category: ErrorCategory, message: &str) -> Classification {
        let classification = self.classifier.classify(category, message);
        self.monitor.track_error(room, category.as_str());

        if category == ErrorCategory::Connection {
            if let Some(reconnect) = &self.reconnect {
                info!(room, "Requesting reconnect");
                reconnect();
            }
        }
        if let Some(line) = &classification.user_message {
            info!(room, "Spoken fallback: {line}");
        }
        classification
    }

    fn shutdown(&self) {
        for session_id in self.monitor.active_sessions() {
            self.monitor.end_session(&session_id, SessionStatus::Completed);
        }
        for (category, metric) in self.monitor.error_metrics() {
            info!(
                category = category.as_str(),
                count = metric.count,
                "Error tally"
            );
        }
        let sessions = self.monitor.sessions();
        let total_cost: f64 = sessions
            .iter()
            .map(|s| s.api_usage.total.estimated_cost)
            .sum();
        info!(
            sessions = sessions.len(),
            estimated_cost = total_cost,
            "Worker stopped"
        );
    }
}

/// System instructions for the language model, with the portfolio
/// briefing embedded.
pub fn agent_instructions(queries: &PortfolioQueries) -> String {
    let name = &queries.data().personal.name;
    let briefing = queries.briefing();
    format!(
        "You are a helpful voice assistant for {name}'s portfolio website.\n\n\
         Act like a friendly, slightly nerdy engineering buddy who answers questions about \
         their experience, projects, skills, and background.\n\n\
         {briefing}\n\n\
         Voice response guidelines:\n\
         1) keep answers short and human, like you're chatting on a call\n\
         2) 3–4 sentences max unless they explicitly ask for more depth\n\
         3) if it exists in the portfolio data, use real specifics (company names, stacks, metrics)\n\
         4) if something isn't in the portfolio data, say you don't have that info\n\
         5) offer to expand if they want to zoom in\n\
         6) for visuals, just point them to the site (you're not a CDN)\n\
         7) for availability or contact, share their contact / booking info\n\
         8) tone = chill, sharp, confident, not corporate-marketing\n\n\
         data you can use:\n\
         - experience at Healthtrip, AST Consulting, Microsoft\n\
         - projects like LeetCode MCP server and ML based traffic detection\n\
         - stacks: React, Next.js, NestJS, Python, AWS, Docker, Kubernetes\n\
         - MSc Computing Science, University of Glasgow\n\
         - contact + meeting scheduling info\n\n\
         if the answer isn't in the known set → return politely with \"not in my dataset\" \
         and offer to check another area."
    )
}
