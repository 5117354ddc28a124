use std::path::PathBuf;

#[derive(Debug, Clone)]
pub(crate) struct Context {
    pub posts_dir: PathBuf,

    /// value of the `layout:` line appended to every migrated frontmatter
    pub layout: String,
    pub dry_run: bool,
}

impl Context {
    pub fn new(posts_dir: PathBuf, layout: String, dry_run: bool) -> Self {
        Self {
            posts_dir,
            layout,
            dry_run,
        }
    }
}
