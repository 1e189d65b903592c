use std::{fs, path::Path};

use anyhow::{Context as _, Result};
use tracing::debug;

use super::super::args::UpdateCommand;
use super::helper::finish;
use super::{CatalogUpdate, CommandResult, CommandSummary, UpdateSummary};
use crate::{
    core::{
        CheckContext,
        catalog::{Catalog, language_from_file_name},
        extract::build_template,
        merge::{MergeOptions, merge},
        writer::write_catalog,
    },
    issues::Issue,
};

pub fn update(cmd: UpdateCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let ctx = CheckContext::new(&args.common)?;
    let apply = args.apply;
    let options = MergeOptions {
        no_obsolete: args.no_obsolete,
        same_text_heuristic: !args.no_same_text,
    };

    let extracted = ctx.extracted();

    let mut targets: Vec<(Catalog, bool)> =
        ctx.catalogs().iter().map(|c| (c.clone(), false)).collect();
    for path in &ctx.missing_catalogs {
        let mut catalog = Catalog::new(language_from_file_name(path).as_deref());
        catalog.file_path = path.clone();
        targets.push((catalog, true));
    }

    let mut catalogs = Vec::new();
    for (catalog, created) in targets {
        let catalog_dir = catalog_dir(&catalog.file_path);
        let template = build_template(&extracted.messages, catalog_dir);
        let (merged, stats) = merge(&catalog, &template, options);

        let output = write_catalog(&merged);
        let changed = created
            || fs::read_to_string(&catalog.file_path).map_or(true, |current| current != output);
        debug!(file = %catalog.file_path, changed, "merged catalog");

        if apply && changed {
            fs::create_dir_all(catalog_dir).with_context(|| {
                format!("Failed to create directory: {}", catalog_dir.display())
            })?;
            fs::write(&catalog.file_path, output)
                .with_context(|| format!("Failed to write catalog: {}", catalog.file_path))?;
        }

        catalogs.push(CatalogUpdate {
            file_path: catalog.file_path.clone(),
            stats,
            created,
            changed,
        });
    }

    let mut issues: Vec<Issue> = Vec::new();
    issues.extend(ctx.catalog_parse_errors().iter().cloned().map(Issue::ParseError));
    issues.extend(extracted.errors.iter().cloned().map(Issue::ParseError));

    Ok(finish(
        CommandSummary::Update(UpdateSummary {
            catalogs,
            source_files: ctx.source_files().len(),
            extracted_count: extracted.messages.len(),
            is_apply: apply,
        }),
        issues,
        ctx.catalogs().len(),
        true,
    ))
}

/// Directory holding the catalog; location paths are written relative to it.
fn catalog_dir(file_path: &str) -> &Path {
    Path::new(file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
}
