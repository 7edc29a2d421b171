//! `scout agents` command.

use anyhow::Result;

use scout_core::Dashboard;

use crate::output;

pub fn execute(json: bool) -> Result<()> {
    let agents = Dashboard::default().agents();
    if json {
        println!("{}", serde_json::to_string_pretty(&agents)?);
    } else {
        output::print_agents(&agents);
    }
    Ok(())
}
