//! `scout sample` command.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde_json::json;

use scout_core::{sample, WorkflowKind};

use crate::output;

#[derive(Args)]
pub struct SampleArgs {
    /// Workflow to show: match or discover
    #[arg(default_value = "match")]
    pub workflow: String,
}

pub fn execute(args: SampleArgs, json: bool) -> Result<()> {
    let kind = WorkflowKind::parse(&args.workflow).context("Unknown workflow")?;

    if json {
        let value = match kind {
            WorkflowKind::Match => json!({ "form": sample::match_form(), "result": sample::match_result() }),
            WorkflowKind::Discover => json!({ "form": sample::research_form(), "result": sample::dataset_result() }),
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", "Sample form".bold());
    match kind {
        WorkflowKind::Match => {
            let form = sample::match_form();
            output::print_field("Name", &form.name);
            output::print_field("Bio", &form.bio);
            output::print_field("Preferences", &form.preferences);
            output::print_field("Intent", &form.intent);
            println!();
            output::print_matches(&sample::match_result());
        }
        WorkflowKind::Discover => {
            let form = sample::research_form();
            output::print_field("Topic", &form.topic);
            output::print_field("Domain", &form.domain);
            output::print_field("Data type", &form.data_type);
            output::print_field("Years", &format!("{} - {}", form.year_from, form.year_to));
            println!();
            output::print_datasets(&sample::dataset_result());
        }
    }
    Ok(())
}
