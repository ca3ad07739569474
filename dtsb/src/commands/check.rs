use clap::Args;
use eyre::Result;

use super::{ConfigArgs, UnwrapOrExit};
use crate::{
    ops,
    reports::{Report, TerminalOutput, print_json},
};

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let loaded = self.config.load().unwrap_or_exit();

        let report = ops::check(&loaded);
        if self.json {
            print_json(&report)?;
        } else {
            report.render(&mut TerminalOutput::new());
        }
        Ok(())
    }
}
