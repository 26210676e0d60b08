use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::error::LinkError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterializeOptions {
    /// Replace whatever already sits at a destination path.
    pub force: bool,
    /// Nest links under `<dest>/<series>/Season NN/`.
    pub create_dirs: bool,
}

/// Absolute source path -> absolute link path, fully resolved before anything
/// touches the filesystem.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkPlan {
    pub dest_dir: PathBuf,
    pub links: IndexMap<PathBuf, PathBuf>,
}

impl LinkPlan {
    pub fn new(dest_dir: PathBuf) -> Self {
        Self {
            dest_dir,
            links: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn destinations(&self) -> impl Iterator<Item = &Path> {
        self.links.values().map(PathBuf::as_path)
    }
}

/// A single source/destination pair that could not be linked.
#[derive(Debug)]
pub struct LinkFailure {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub error: LinkError,
}

#[derive(Debug, Default)]
pub struct LinkReport {
    pub created: usize,
    pub failures: Vec<LinkFailure>,
}

impl LinkReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Creates every link in `plan`.
///
/// The destination directory is created first; failing that is the only fatal
/// outcome. A pair that cannot be replaced or linked is recorded in the report
/// and the remaining pairs are still processed.
pub async fn materialize(
    plan: &LinkPlan,
    options: MaterializeOptions,
) -> io::Result<LinkReport> {
    if !fs::metadata(&plan.dest_dir)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
    {
        debug!("Creating destination directory {}", plan.dest_dir.display());
        fs::create_dir_all(&plan.dest_dir).await?;
    }

    let mut report = LinkReport::default();
    for (source, destination) in &plan.links {
        match link_one(source, destination, options.force).await {
            Ok(()) => report.created += 1,
            Err(error) => {
                warn!("{} -> {}: {error}", source.display(), destination.display());
                report.failures.push(LinkFailure {
                    source: source.clone(),
                    destination: destination.clone(),
                    error,
                });
            }
        }
    }

    Ok(report)
}

async fn link_one(source: &Path, destination: &Path, force: bool) -> Result<(), LinkError> {
    if force && fs::symlink_metadata(destination).await.is_ok() {
        info!("[-f] Deleting existing file link {}", destination.display());
        fs::remove_file(destination)
            .await
            .map_err(|err| LinkError::Remove {
                path: destination.to_path_buf(),
                source: err,
            })?;
    }

    info!("Creating link {}", destination.display());
    create_symlink(source, destination)
        .await
        .map_err(|err| LinkError::Create {
            path: destination.to_path_buf(),
            source: err,
        })
}

#[cfg(unix)]
async fn create_symlink(source: &Path, destination: &Path) -> io::Result<()> {
    fs::symlink(source, destination).await
}

#[cfg(windows)]
async fn create_symlink(source: &Path, destination: &Path) -> io::Result<()> {
    fs::symlink_file(source, destination).await
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn plan_for(dir: &TempDir, pairs: &[(&str, &str)]) -> LinkPlan {
        let dest_dir = dir.path().join("out");
        let mut plan = LinkPlan::new(dest_dir.clone());
        for (source, link) in pairs {
            let source = dir.path().join(source);
            File::create(&source).unwrap();
            plan.links.insert(source, dest_dir.join(link));
        }
        plan
    }

    #[tokio::test]
    async fn test_materialize_creates_dir_and_links() {
        let dir = TempDir::new().unwrap();
        let plan = plan_for(&dir, &[("a.mkv", "Foo - s01e01.mkv"), ("b.mkv", "Foo - s01e02.mkv")]);

        let report = materialize(&plan, MaterializeOptions::default()).await.unwrap();

        assert_eq!(report.created, 2);
        assert!(report.is_success());
        for (source, link) in &plan.links {
            assert_eq!(&std::fs::read_link(link).unwrap(), source);
        }
    }

    #[tokio::test]
    async fn test_materialize_replaces_dangling_link_when_forced() {
        let dir = TempDir::new().unwrap();
        let plan = plan_for(&dir, &[("a.mkv", "Foo - s01e01.mkv")]);
        let link = plan.links[0].clone();
        std::fs::create_dir_all(&plan.dest_dir).unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.mkv"), &link).unwrap();

        let options = MaterializeOptions {
            force: true,
            create_dirs: false,
        };
        let report = materialize(&plan, options).await.unwrap();

        assert_eq!(report.created, 1);
        assert_eq!(std::fs::read_link(&link).unwrap(), dir.path().join("a.mkv"));
    }

    #[tokio::test]
    async fn test_materialize_fails_when_dest_dir_is_a_file() {
        let dir = TempDir::new().unwrap();
        let plan = plan_for(&dir, &[("a.mkv", "Foo - s01e01.mkv")]);
        File::create(&plan.dest_dir).unwrap();

        assert!(materialize(&plan, MaterializeOptions::default()).await.is_err());
    }
}
