//! Shared submit-invoke-print cycle for the workflow commands.

use anyhow::{bail, Result};
use colored::Colorize;
use tracing::info;

use scout_agent::AgentClient;
use scout_core::agent::AgentInvoker;
use scout_core::workflow::{Workflow, WorkflowController};
use scout_core::{ScoutConfig, Submission, ViewState};

use crate::progress::Progress;

/// How a workflow command reports its outcome.
pub struct Run<'a, W: Workflow> {
    pub config: &'a ScoutConfig,
    pub json: bool,
    pub spinner: &'a str,
    pub print: fn(&W::Output),
}

impl<W: Workflow> Run<'_, W> {
    /// Submit the controller's form and print the settled result.
    pub async fn execute(&self, mut controller: WorkflowController<W>) -> Result<()> {
        let client = AgentClient::from_config(self.config);
        self.settle(&mut controller, &client).await?;

        match controller.state() {
            ViewState::Success { result } if self.json => {
                println!("{}", serde_json::to_string_pretty(result)?);
                Ok(())
            }
            ViewState::Success { result } => {
                (self.print)(result);
                Ok(())
            }
            ViewState::Error { message } => bail!("{}", message),
            ViewState::Empty => {
                println!("{}", "Cancelled.".dimmed());
                Ok(())
            }
            ViewState::Loading { .. } => bail!("{} workflow did not settle", W::KIND.as_str()),
        }
    }

    /// Drive one submission to completion. Ctrl+C cancels it.
    pub async fn settle(&self, controller: &mut WorkflowController<W>, invoker: &dyn AgentInvoker) -> Result<()> {
        let ticket = match controller.submit(self.config.sample_mode) {
            Submission::Invalid(errors) => {
                bail!("Missing required fields: {}", errors.fields().join(", "))
            }
            Submission::Completed => return Ok(()),
            Submission::Dispatch(ticket) => ticket,
        };

        let progress = Progress::spinner(self.spinner, !self.json);
        tokio::select! {
            outcome = invoker.invoke(&ticket.message, ticket.agent_id) => {
                controller.complete(&ticket, outcome);
            }
            _ = tokio::signal::ctrl_c() => {
                controller.cancel();
                info!(workflow = W::KIND.as_str(), "Interrupted by user");
            }
        }
        progress.finish();
        Ok(())
    }
}
