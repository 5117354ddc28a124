use anyhow::{bail, Context as _};
use clap::{command, value_parser, Arg, ArgAction};
use context::Context;
use log::info;
use migrator::data::Summary;
use std::path::PathBuf;

mod backup;
mod context;
mod frontmatter;
mod manifest;
mod migrator;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = command!()
        .args(&[
            Arg::new("posts_dir")
                .help("Directory path of posts to migrate")
                .value_parser(value_parser!(PathBuf))
                .default_value("_posts"),
            Arg::new("layout")
                .long("layout")
                .help("Value of the `layout:` line added to every migrated post")
                .default_value("post"),
            Arg::new("dry_run")
                .long("dry-run")
                .help("Report what would be done without touching any file")
                .action(ArgAction::SetTrue),
            Arg::new("backup")
                .long("backup")
                .help("Directory to copy the posts into before migrating. Existing files will be overwritten.")
                .value_parser(value_parser!(PathBuf)),
            Arg::new("manifest")
                .long("manifest")
                .help("JSON file to append performed renames to")
                .value_parser(value_parser!(PathBuf)),
        ])
        .get_matches();

    let posts_dir: &PathBuf = matches
        .get_one("posts_dir")
        .context("posts_dir is required")?;
    if !posts_dir.exists() || !posts_dir.is_dir() {
        bail!("posts_dir must be a directory.");
    }
    let layout: &String = matches.get_one("layout").context("layout is required")?;
    let dry_run = matches.get_flag("dry_run");

    let backup_dir: Option<&PathBuf> = matches.get_one("backup");
    if let Some(backup_dir) = backup_dir {
        if backup_dir.exists() && !backup_dir.is_dir() {
            bail!("if backup exists, it must be directory.");
        }
    }
    let manifest_path: Option<&PathBuf> = matches.get_one("manifest");

    let ctx = Context::new(posts_dir.to_owned(), layout.to_owned(), dry_run);

    match backup_dir {
        Some(_) if dry_run => info!("dry run: skipping backup"),
        Some(backup_dir) => backup::backup_posts(&ctx.posts_dir, backup_dir)?,
        None => {}
    }

    let mut summary = Summary::default();
    let result = {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        migrator::process(&ctx, &mut summary, &mut out)
    };
    info!(
        "processed: {}, planned: {}, skipped: {}, rename errors: {}",
        summary.processed, summary.planned, summary.skipped, summary.failed
    );

    // renames done before a fatal error are on disk, so record them either way
    if let Some(manifest_path) = manifest_path {
        if !summary.renames.is_empty() {
            manifest::record_renames(manifest_path, &summary.renames)?;
        }
    }
    result?;

    Ok(())
}
