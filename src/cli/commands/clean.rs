use std::collections::HashSet;

use anyhow::{Ok, Result};
use tracing::debug;

use super::super::args::CleanCommand;
use super::helper::{catalog_errors, finish};
use super::{CleanSummary, CommandResult, CommandSummary};
use crate::{
    core::{CheckContext, merge::drop_obsolete, writer::write_catalog_file},
    rules::obsolete::check_obsolete_entry_issues,
};

pub fn clean(cmd: CleanCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let ctx = CheckContext::new(&args.common)?;
    let apply = args.apply;

    let entries = check_obsolete_entry_issues(&ctx);
    let removed_count = entries.len();

    let file_count = if apply {
        let mut modified = 0;
        for catalog in ctx.catalogs() {
            let mut cleaned = catalog.clone();
            let dropped = drop_obsolete(&mut cleaned);
            if dropped > 0 {
                debug!(file = %catalog.file_path, dropped, "removing retired entries");
                write_catalog_file(&catalog.file_path, &cleaned)?;
                modified += 1;
            }
        }
        modified
    } else {
        entries
            .iter()
            .map(|e| e.context.file_path())
            .collect::<HashSet<_>>()
            .len()
    };

    Ok(finish(
        CommandSummary::Clean(CleanSummary {
            removed_count,
            file_count,
            is_apply: apply,
            entries,
        }),
        catalog_errors(&ctx),
        ctx.catalogs().len(),
        false,
    ))
}
