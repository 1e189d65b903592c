use anyhow::{Ok, Result};

use super::super::args::StatsCommand;
use super::{
    CommandResult, CommandSummary, StatsSummary,
    helper::{catalog_errors, finish},
};
use crate::core::{CatalogStats, CheckContext};

pub fn stats(cmd: StatsCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let ctx = CheckContext::new(&args.common)?;

    let catalogs: Vec<CatalogStats> = ctx.catalogs().iter().map(|c| c.stats()).collect();

    Ok(finish(
        CommandSummary::Stats(StatsSummary {
            catalogs,
            json: args.json,
        }),
        catalog_errors(&ctx),
        ctx.catalogs().len(),
        true,
    ))
}
