use std::{
    borrow::Cow,
    fs,
    io::{self, Write as _},
    path::Path,
    sync::OnceLock,
};

use anyhow::Context;
use regex::Regex;
use tempfile::NamedTempFile;

const MARKDOWN_EXTENSIONS: [&str; 2] = [".md", ".markdown"];

pub(super) fn has_date_prefix(file_name: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").expect("date prefix pattern is valid"))
        .is_match(file_name)
}

pub(super) fn is_markdown(file_name: &str) -> bool {
    MARKDOWN_EXTENSIONS
        .iter()
        .any(|ext| file_name.ends_with(ext))
}

pub(super) fn dated_file_name(date: &str, file_name: &str) -> String {
    format!("{date}-{file_name}")
}

/// Text-mode line ending translation: `\r\n` and lone `\r` become `\n`.
pub(super) fn normalize_newlines(content: &str) -> Cow<'_, str> {
    if content.contains('\r') {
        Cow::Owned(content.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(content)
    }
}

/// Writes `content` to `target` and removes `original`, as one step as far as
/// readers of the directory are concerned.
///
/// The content goes to a temporary file next to `original` first, which is then
/// moved to `target` without clobbering. If that move is refused the temporary
/// file is discarded, `original` is left as it was and the cause is returned as
/// `Ok(Err(_))`. Other I/O failures are fatal and returned as `Err(_)`.
pub(super) fn replace_with_renamed(
    original: &Path,
    target: &Path,
    content: &str,
) -> anyhow::Result<Result<(), io::Error>> {
    let dir = original
        .parent()
        .with_context(|| format!("{original:?} has no parent directory"))?;
    let permissions = fs::metadata(original)
        .with_context(|| format!("while reading metadata of {original:?}"))?
        .permissions();

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("while creating a temporary file in {dir:?}"))?;
    tmp.write_all(content.as_bytes())
        .and_then(|_| tmp.flush())
        .with_context(|| format!("while writing new content for {original:?}"))?;
    tmp.as_file()
        .set_permissions(permissions)
        .with_context(|| format!("while copying permissions of {original:?}"))?;

    if let Err(e) = tmp.persist_noclobber(target) {
        // dropping `e.file` removes the temporary file
        return Ok(Err(e.error));
    }

    fs::remove_file(original).with_context(|| format!("while removing {original:?}"))?;
    Ok(Ok(()))
}
