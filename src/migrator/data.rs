use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SkipReason {
    AlreadyProcessed,
    NotMarkdown,
    NotAFile,
    NonUtf8Name,
    NoFrontmatter,
    NoDate,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct Rename {
    pub from: String,
    pub to: String,
    pub date: String,
}

/// What happened to a single directory entry.
#[derive(Debug)]
pub(crate) enum Outcome {
    Skipped {
        file_name: String,
        reason: SkipReason,
    },
    Processed(Rename),
    /// dry run: the post qualifies but nothing was touched
    Planned(Rename),
    RenameFailed {
        file_name: String,
        error: std::io::Error,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Skipped { file_name, reason } => match reason {
                SkipReason::AlreadyProcessed => {
                    write!(f, "Skipping already processed file: {file_name}")
                }
                SkipReason::NotMarkdown => write!(f, "Skipping non-markdown file: {file_name}"),
                SkipReason::NotAFile => write!(f, "Skipping non-file entry: {file_name}"),
                SkipReason::NonUtf8Name => {
                    write!(f, "Skipping file with non-UTF-8 name: {file_name}")
                }
                SkipReason::NoFrontmatter => {
                    write!(f, "No frontmatter found in {file_name}, skipping...")
                }
                SkipReason::NoDate => write!(f, "No date found in {file_name}, skipping..."),
            },
            Outcome::Processed(rename) => write!(f, "Processed {} -> {}", rename.from, rename.to),
            Outcome::Planned(rename) => {
                write!(f, "Would process {} -> {}", rename.from, rename.to)
            }
            Outcome::RenameFailed { file_name, error } => {
                write!(f, "Error renaming {file_name}: {error}")
            }
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct Summary {
    pub processed: usize,
    pub planned: usize,
    pub skipped: usize,
    pub failed: usize,

    /// renames actually performed, in processing order
    pub renames: Vec<Rename>,
}

impl Summary {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Skipped { .. } => self.skipped += 1,
            Outcome::Processed(rename) => {
                self.processed += 1;
                self.renames.push(rename);
            }
            Outcome::Planned(_) => self.planned += 1,
            Outcome::RenameFailed { .. } => self.failed += 1,
        }
    }
}
