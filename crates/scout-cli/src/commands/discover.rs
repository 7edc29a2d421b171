//! `scout discover` command.

use anyhow::Result;
use clap::Args;

use scout_core::discovery::{DiscoveryWorkflow, ResearchForm, ALL_TYPES, DATA_TYPE_OPTIONS, DOMAIN_OPTIONS};
use scout_core::workflow::WorkflowController;
use scout_core::ScoutConfig;

use super::run::Run;
use crate::output;

#[derive(Args)]
pub struct DiscoverArgs {
    /// Research topic to search for
    #[arg(long, default_value = "")]
    pub topic: String,

    /// Research domain
    #[arg(long, default_value = "Computer Science", value_parser = clap::builder::PossibleValuesParser::new(DOMAIN_OPTIONS.iter().copied()))]
    pub domain: String,

    /// Kind of source to look for
    #[arg(long, default_value = ALL_TYPES, value_parser = clap::builder::PossibleValuesParser::new(DATA_TYPE_OPTIONS.iter().copied()))]
    pub data_type: String,

    /// Earliest publication year
    #[arg(long, default_value = "")]
    pub year_from: String,

    /// Latest publication year
    #[arg(long, default_value = "")]
    pub year_to: String,
}

pub async fn execute(args: DiscoverArgs, config: &ScoutConfig, json: bool) -> Result<()> {
    let mut controller = WorkflowController::<DiscoveryWorkflow>::new();
    controller.replace_form(ResearchForm {
        topic: args.topic,
        domain: args.domain,
        data_type: args.data_type,
        year_from: args.year_from,
        year_to: args.year_to,
    });

    Run { config, json, spinner: "Discovering datasets...", print: output::print_datasets }
        .execute(controller)
        .await
}
