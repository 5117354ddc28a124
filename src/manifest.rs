use std::{
    fs::{File, OpenOptions},
    io::{BufReader, BufWriter, Write as _},
    path::Path,
};

use anyhow::Context;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::migrator::data::Rename;

/// One performed rename, kept so a migration can be traced back or undone by hand.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub(crate) struct ManifestEntry {
    #[serde(flatten)]
    pub rename: Rename,
    pub migrated_at: DateTime<Utc>,
}

pub(super) fn load_manifest(manifest_path: &Path) -> anyhow::Result<Vec<ManifestEntry>> {
    if manifest_path.exists() {
        let fd = File::open(manifest_path)
            .with_context(|| format!("while opening manifest {manifest_path:?}"))?;
        let reader = BufReader::new(fd);
        serde_json::from_reader(reader)
            .with_context(|| format!("while parsing manifest {manifest_path:?}"))
    } else {
        info!("Manifest file({manifest_path:?}) does not exist. starting a new one...");
        Ok(vec![])
    }
}

pub(super) fn save_manifest(manifest_path: &Path, entries: &[ManifestEntry]) -> anyhow::Result<()> {
    let manifest_fd = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(manifest_path)
        .with_context(|| format!("while opening manifest {manifest_path:?}"))?;
    let mut writer = BufWriter::new(manifest_fd);
    serde_json::to_writer_pretty(&mut writer, entries)?;
    writer.flush()?;

    Ok(())
}

/// Appends `renames` to the manifest at `manifest_path`, creating it if needed.
pub(super) fn record_renames(manifest_path: &Path, renames: &[Rename]) -> anyhow::Result<()> {
    let mut entries = load_manifest(manifest_path)?;
    let migrated_at = Utc::now();
    entries.extend(renames.iter().cloned().map(|rename| ManifestEntry {
        rename,
        migrated_at,
    }));
    save_manifest(manifest_path, &entries)
        .with_context(|| format!("while saving manifest {manifest_path:?}"))?;
    info!("{} rename(s) recorded in {manifest_path:?}", renames.len());

    Ok(())
}
