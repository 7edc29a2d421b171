//! `scout match` command.

use anyhow::Result;
use clap::Args;

use scout_core::matching::{MatchForm, MatchWorkflow};
use scout_core::workflow::WorkflowController;
use scout_core::ScoutConfig;

use super::run::Run;
use crate::output;

#[derive(Args)]
pub struct MatchArgs {
    /// Your name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Short professional bio
    #[arg(long, default_value = "")]
    pub bio: String,

    /// Key preferences for a match
    #[arg(long, default_value = "")]
    pub preferences: String,

    /// What kind of connection you are looking for
    #[arg(long, default_value = "")]
    pub intent: String,
}

pub async fn execute(args: MatchArgs, config: &ScoutConfig, json: bool) -> Result<()> {
    let mut controller = WorkflowController::<MatchWorkflow>::new();
    controller.replace_form(MatchForm {
        name: args.name,
        bio: args.bio,
        preferences: args.preferences,
        intent: args.intent,
    });

    Run { config, json, spinner: "Finding matches...", print: output::print_matches }
        .execute(controller)
        .await
}
