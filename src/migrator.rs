use std::{
    ffi::OsStr,
    io::{self, Write},
};

use anyhow::Context as _;
use chrono::NaiveDate;
use log::{debug, warn};

use crate::{context::Context, frontmatter::Frontmatter};

pub(crate) mod data;
mod utils;

use data::{Outcome, Rename, SkipReason, Summary};
use utils::{
    dated_file_name, has_date_prefix, is_markdown, normalize_newlines, replace_with_renamed,
};

fn migrate_entry(ctx: &Context, entry_name: &OsStr) -> anyhow::Result<Outcome> {
    let skip = |file_name: &str, reason: SkipReason| -> anyhow::Result<Outcome> {
        debug!("{file_name}: {reason:?}");
        Ok(Outcome::Skipped {
            file_name: file_name.to_string(),
            reason,
        })
    };

    let Some(file_name) = entry_name.to_str() else {
        return skip(&entry_name.to_string_lossy(), SkipReason::NonUtf8Name);
    };
    if has_date_prefix(file_name) {
        return skip(file_name, SkipReason::AlreadyProcessed);
    }
    if !is_markdown(file_name) {
        return skip(file_name, SkipReason::NotMarkdown);
    }

    let path = ctx.posts_dir.join(file_name);
    if !path.is_file() {
        return skip(file_name, SkipReason::NotAFile);
    }

    let content =
        std::fs::read_to_string(&path).with_context(|| format!("while reading {path:?}"))?;
    let content = normalize_newlines(&content);

    let Some(frontmatter) = Frontmatter::extract(&content) else {
        return skip(file_name, SkipReason::NoFrontmatter);
    };
    let Some(date) = frontmatter.date() else {
        return skip(file_name, SkipReason::NoDate);
    };
    if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        warn!("{file_name}: {date} is not a calendar date, using it as it is");
    }

    let rename = Rename {
        from: file_name.to_string(),
        to: dated_file_name(date, file_name),
        date: date.to_string(),
    };
    let new_content = frontmatter.rewrite(&ctx.layout);
    let target = ctx.posts_dir.join(&rename.to);

    if ctx.dry_run {
        // the real run refuses to clobber, so report that here too
        if target.exists() {
            return Ok(Outcome::RenameFailed {
                file_name: rename.from,
                error: io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("{} already exists", rename.to),
                ),
            });
        }
        return Ok(Outcome::Planned(rename));
    }

    match replace_with_renamed(&path, &target, &new_content)? {
        Ok(()) => Ok(Outcome::Processed(rename)),
        Err(error) => Ok(Outcome::RenameFailed {
            file_name: rename.from,
            error,
        }),
    }
}

/// Migrates every post directly inside `ctx.posts_dir`, writing one report line
/// per entry and a final completion line to `out`.
///
/// Outcomes are recorded into `summary` as they happen, so on a fatal error it
/// still holds every rename performed before the failure.
pub(crate) fn process<W: Write>(
    ctx: &Context,
    summary: &mut Summary,
    out: &mut W,
) -> anyhow::Result<()> {
    // names are listed up front so renamed and temporary files are never visited
    let entry_names = std::fs::read_dir(&ctx.posts_dir)
        .and_then(|entries| {
            entries
                .map(|entry| entry.map(|e| e.file_name()))
                .collect::<Result<Vec<_>, _>>()
        })
        .with_context(|| format!("while listing {:?}", ctx.posts_dir))?;

    for entry_name in entry_names.iter() {
        let outcome = migrate_entry(ctx, entry_name)?;
        let line = outcome.to_string();
        summary.record(outcome);
        writeln!(out, "{line}")?;
    }
    writeln!(out, "All markdown files processed.")?;

    Ok(())
}
