//! Intent-to-agent dispatch

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::agents::Agent;
use crate::core::message::{Intent, Message, PipelineResult};
use crate::errors::AgentError;

/// Registry mapping each intent to the agent that owns it.
///
/// The table is populated at startup and only read afterwards, so a shared
/// `Arc<AgentRouter>` is safe under concurrent dispatch.
#[derive(Default)]
pub struct AgentRouter {
    agents: HashMap<Intent, Arc<dyn Agent>>,
}

impl AgentRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the agent for an intent. Re-registering an intent replaces
    /// the previous agent; the last registration wins.
    pub fn register(&mut self, intent: Intent, agent: Arc<dyn Agent>) {
        info!(
            intent = intent.as_str(),
            agent = agent.name(),
            "Registered agent"
        );
        self.agents.insert(intent, agent);
    }

    /// Routes a message to its registered agent and forwards the agent's
    /// envelope unchanged. An unregistered intent yields a routing error
    /// envelope, never a panic.
    pub async fn dispatch(&self, message: &Message) -> PipelineResult {
        match self.agents.get(&message.intent) {
            Some(agent) => {
                info!(
                    intent = message.intent.as_str(),
                    agent = agent.name(),
                    "Dispatching message"
                );
                agent.handle(message).await
            }
            None => {
                warn!(intent = message.intent.as_str(), "No agent registered");
                PipelineResult::error(AgentError::Routing(message.intent.as_str().to_string()))
            }
        }
    }
}
