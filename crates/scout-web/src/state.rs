//! Application state.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tokio::task::AbortHandle;
use tracing::{debug, info};

use scout_core::agent::AgentInvoker;
use scout_core::{Dashboard, Submission, Ticket, WorkflowKind};

/// WebSocket message types.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "type", content = "data")]
pub enum WebSocketMessage {
    WorkflowUpdated { workflow: String, phase: String },
    SampleModeChanged { enabled: bool },
    ActiveAgentChanged { agent_id: Option<String> },
}

/// Handle to a spawned agent call, tagged with the generation it serves.
struct Inflight {
    generation: u64,
    handle: AbortHandle,
}

type InflightCalls = HashMap<WorkflowKind, Inflight>;

/// Application state shared across handlers.
///
/// Lock order is always `dashboard` then `inflight`.
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Mutex<Dashboard>>,
    pub invoker: Arc<dyn AgentInvoker>,
    pub tx: broadcast::Sender<WebSocketMessage>,
    inflight: Arc<Mutex<InflightCalls>>,
}

impl AppState {
    pub fn new(dashboard: Dashboard, invoker: Arc<dyn AgentInvoker>) -> Self {
        let (tx, _rx) = broadcast::channel(100);
        Self {
            dashboard: Arc::new(Mutex::new(dashboard)),
            invoker,
            tx,
            inflight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Broadcast a message to all WebSocket clients.
    pub fn broadcast(&self, msg: WebSocketMessage) {
        let _ = self.tx.send(msg);
    }

    /// Apply `f` to the dashboard and announce the resulting state of `kind`.
    ///
    /// The lock is released before anything is broadcast.
    pub async fn update<R>(&self, kind: WorkflowKind, f: impl FnOnce(&mut Dashboard) -> R) -> R {
        self.update_with(kind, |dashboard, _| f(dashboard)).await
    }

    /// Like [`update`](Self::update), with the in-flight calls held in the same
    /// critical section.
    async fn update_with<R>(&self, kind: WorkflowKind, f: impl FnOnce(&mut Dashboard, &mut InflightCalls) -> R) -> R {
        let (out, phase, before, after) = {
            let mut dashboard = self.dashboard.lock().await;
            let mut inflight = self.inflight.lock().await;
            let before = dashboard.active_agent_id();
            let out = f(&mut dashboard, &mut inflight);
            (out, dashboard.phase(kind), before, dashboard.active_agent_id())
        };

        self.broadcast(WebSocketMessage::WorkflowUpdated {
            workflow: kind.as_str().to_string(),
            phase: phase.to_string(),
        });
        if before != after {
            self.broadcast(WebSocketMessage::ActiveAgentChanged {
                agent_id: after.map(str::to_string),
            });
        }
        out
    }

    /// Submit (or retry) a workflow, spawning the agent call when one is needed.
    ///
    /// The call is registered before the dashboard lock is released, so the
    /// newest generation always owns the in-flight slot.
    pub async fn submit(&self, kind: WorkflowKind, retry: bool) -> Submission {
        self.update_with(kind, |d, inflight| {
            let submission = if retry { d.retry(kind) } else { d.submit(kind) };
            match &submission {
                Submission::Dispatch(ticket) => {
                    let call = Inflight {
                        generation: ticket.generation,
                        handle: self.spawn_call(ticket.clone()),
                    };
                    if let Some(previous) = inflight.insert(kind, call) {
                        if !previous.handle.is_finished() {
                            info!(workflow = kind.as_str(), generation = previous.generation, "Aborting superseded agent call");
                        }
                        previous.handle.abort();
                    }
                }
                Submission::Completed => abort_call(inflight, kind),
                Submission::Invalid(_) => {}
            }
            submission
        })
        .await
    }

    /// Cancel a loading workflow. Returns whether anything was cancelled.
    pub async fn cancel(&self, kind: WorkflowKind) -> bool {
        self.update_with(kind, |d, inflight| {
            let cancelled = d.cancel(kind);
            if cancelled {
                abort_call(inflight, kind);
            }
            cancelled
        })
        .await
    }

    pub async fn set_sample_mode(&self, enabled: bool) {
        self.dashboard.lock().await.set_sample_mode(enabled);
        self.broadcast(WebSocketMessage::SampleModeChanged { enabled });
    }

    fn spawn_call(&self, ticket: Ticket) -> AbortHandle {
        let kind = ticket.workflow;
        let state = self.clone();
        let task = tokio::spawn(async move {
            let outcome = state.invoker.invoke(&ticket.message, ticket.agent_id).await;
            let settled = state
                .update_with(kind, |d, inflight| {
                    if inflight.get(&kind).is_some_and(|call| call.generation == ticket.generation) {
                        inflight.remove(&kind);
                    }
                    d.complete(&ticket, outcome)
                })
                .await;
            debug!(workflow = kind.as_str(), ticket = %ticket.id, settled, "Agent call finished");
        });
        task.abort_handle()
    }
}

fn abort_call(inflight: &mut InflightCalls, kind: WorkflowKind) {
    if let Some(call) = inflight.remove(&kind) {
        call.handle.abort();
    }
}
