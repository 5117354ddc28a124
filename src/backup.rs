use std::path::Path;

use anyhow::Context;
use fs_extra::dir::CopyOptions;
use log::info;

/// Copies the contents of `posts_dir` into `backup_dir`, overwriting files already there.
pub(super) fn backup_posts(posts_dir: &Path, backup_dir: &Path) -> anyhow::Result<()> {
    fs_extra::dir::create_all(backup_dir, false)
        .with_context(|| format!("while creating {backup_dir:?}"))?;

    let mut cp_opts = CopyOptions::new();
    cp_opts.copy_inside = true;
    cp_opts.content_only = true;
    cp_opts.overwrite = true;
    fs_extra::dir::copy(posts_dir, backup_dir, &cp_opts)
        .with_context(|| format!("while backing up {posts_dir:?} to {backup_dir:?}"))?;

    info!("Backed up {posts_dir:?} to {backup_dir:?}");
    Ok(())
}
