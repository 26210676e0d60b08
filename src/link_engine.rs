use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use tracing::{debug, info, warn};

use crate::episodes::{EpisodeNameMap, load_episode_names};
use crate::materialize::{LinkPlan, LinkReport, MaterializeOptions, materialize};
use crate::naming::{SeriesInfo, build_name};
use crate::scanner::{ScanOutcome, scan};

#[derive(Debug, Clone)]
pub struct LinkConfig {
    pub source_dir: PathBuf,
    /// Defaults to `source_dir` when absent.
    pub dest_dir: Option<PathBuf>,
    pub pattern: String,
    pub episodes_file: Option<PathBuf>,
    pub series: SeriesInfo,
    pub options: MaterializeOptions,
}

/// How a run ended when it did not fail outright.
#[derive(Debug)]
pub enum RunOutcome {
    /// Nothing in the source directory matched the pattern.
    NothingMatched,
    /// The operator declined the confirmation prompt.
    Aborted,
    Completed(LinkReport),
}

#[derive(Debug)]
pub struct LinkEngine {
    config: LinkConfig,
    pattern: Regex,
}

impl LinkEngine {
    pub fn new(config: LinkConfig) -> Result<Self> {
        let pattern = Regex::new(&config.pattern)
            .with_context(|| format!("Invalid match pattern: {}", config.pattern))?;
        Ok(Self { config, pattern })
    }

    pub fn scan_directory(&self) -> Result<ScanOutcome> {
        scan(&self.config.source_dir, &self.pattern)
            .with_context(|| format!("Failed to scan {}", self.config.source_dir.display()))
    }

    /// Loads the episodes file if one was configured. A missing or unreadable
    /// file is fatal.
    pub fn load_episode_names(&self) -> Result<Option<EpisodeNameMap>> {
        let Some(path) = &self.config.episodes_file else {
            return Ok(None);
        };
        let names = load_episode_names(path)?;
        if names.is_empty() {
            warn!("No valid entries in episodes file {}", path.display());
        } else {
            info!("Found {} entries in episodes file:", names.len());
            for (number, name) in &names.names {
                info!("{number} <-> {name}");
            }
        }
        Ok(Some(names))
    }

    /// Directory the links will be written to, including the
    /// `<series>/Season NN` nesting when enabled.
    pub fn destination_dir(&self) -> PathBuf {
        let base = self
            .config
            .dest_dir
            .as_deref()
            .unwrap_or(self.config.source_dir.as_path());
        if self.config.options.create_dirs {
            base.join(&self.config.series.name)
                .join(self.config.series.season_dir_name())
        } else {
            base.to_path_buf()
        }
    }

    /// Resolves every matched file into an absolute source -> link pair.
    ///
    /// Empty name maps are treated as absent.
    pub fn prepare_links(
        &self,
        matched: &ScanOutcome,
        episode_names: Option<&EpisodeNameMap>,
    ) -> Result<LinkPlan> {
        let episode_names = episode_names.filter(|names| !names.is_empty());
        if let Some(names) = episode_names {
            if names.len() != matched.matched.len() {
                warn!(
                    "Number of episodes matched ({}) differs from definitions in file ({})",
                    matched.matched.len(),
                    names.len()
                );
            }
        }

        let dest_dir = absolute(&self.destination_dir())?;
        let mut plan = LinkPlan::new(dest_dir);

        for (episode_id, filename) in &matched.matched {
            let source = absolute(&self.config.source_dir.join(filename))?;

            let title = episode_names.and_then(|names| {
                let title = names.get(episode_id);
                if title.is_none() {
                    warn!("Episode[{episode_id}] not found in episodes file");
                }
                title
            });

            let link_name = build_name(filename, &self.config.series, episode_id, title)?;
            let destination = plan.dest_dir.join(link_name);
            debug!("{} -> {}", source.display(), destination.display());
            plan.links.insert(source, destination);
        }

        Ok(plan)
    }

    pub async fn create_links(&self, plan: &LinkPlan) -> Result<LinkReport> {
        materialize(plan, self.config.options)
            .await
            .with_context(|| format!("Failed to create directory {}", plan.dest_dir.display()))
    }

    /// Runs scan, name loading and planning, asks `confirm` with the finished
    /// plan, then creates the links. Nothing is written unless `confirm`
    /// returns `true`.
    pub async fn run<F>(&self, confirm: F) -> Result<RunOutcome>
    where
        F: FnOnce(&LinkPlan) -> Result<bool>,
    {
        let matched = self.scan_directory()?;
        let episode_names = self.load_episode_names()?;
        if matched.is_empty() {
            warn!("No files in {} matched {}", self.config.source_dir.display(), self.config.pattern);
            return Ok(RunOutcome::NothingMatched);
        }

        let plan = self.prepare_links(&matched, episode_names.as_ref())?;

        if !confirm(&plan)? {
            return Ok(RunOutcome::Aborted);
        }

        let report = self.create_links(&plan).await?;
        Ok(RunOutcome::Completed(report))
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path)
        .with_context(|| format!("Failed to resolve absolute path for {}", path.display()))
}

/// Builder for [`LinkConfig`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    source_dir: Option<PathBuf>,
    dest_dir: Option<PathBuf>,
    pattern: Option<String>,
    episodes_file: Option<PathBuf>,
    name: Option<String>,
    season: Option<u32>,
    force: bool,
    create_dirs: bool,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directory<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.source_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn dest(mut self, dir: Option<PathBuf>) -> Self {
        self.dest_dir = dir;
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn episodes_file(mut self, path: Option<PathBuf>) -> Self {
        self.episodes_file = path;
        self
    }

    pub fn series(mut self, name: impl Into<String>, season: u32) -> Self {
        self.name = Some(name.into());
        self.season = Some(season);
        self
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn create_dirs(mut self, create_dirs: bool) -> Self {
        self.create_dirs = create_dirs;
        self
    }

    pub fn build(self) -> Result<LinkConfig> {
        let source_dir = self
            .source_dir
            .ok_or_else(|| anyhow::anyhow!("Source directory is required"))?;
        let pattern = self
            .pattern
            .ok_or_else(|| anyhow::anyhow!("Match pattern is required"))?;
        let name = self
            .name
            .ok_or_else(|| anyhow::anyhow!("Series name is required"))?;
        let season = self
            .season
            .ok_or_else(|| anyhow::anyhow!("Season number is required"))?;

        Ok(LinkConfig {
            source_dir,
            dest_dir: self.dest_dir,
            pattern,
            episodes_file: self.episodes_file,
            series: SeriesInfo::new(name, season),
            options: MaterializeOptions {
                force: self.force,
                create_dirs: self.create_dirs,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .directory("/test/path")
            .pattern(r"(\d+)")
            .series("Foo", 2)
            .force(true)
            .build()
            .unwrap();

        assert_eq!(config.source_dir, PathBuf::from("/test/path"));
        assert_eq!(config.series, SeriesInfo::new("Foo", 2));
        assert!(config.options.force);
        assert!(!config.options.create_dirs);
        assert!(config.dest_dir.is_none());
    }

    #[test]
    fn test_config_builder_requires_series() {
        let err = ConfigBuilder::new()
            .directory("/test/path")
            .pattern(r"(\d+)")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("Series name"));
    }

    #[test]
    fn test_destination_dir_defaults_to_source() {
        let config = ConfigBuilder::new()
            .directory("/media/in")
            .pattern(r"(\d+)")
            .series("Foo", 1)
            .build()
            .unwrap();
        let engine = LinkEngine::new(config).unwrap();
        assert_eq!(engine.destination_dir(), PathBuf::from("/media/in"));
    }

    #[test]
    fn test_destination_dir_nests_season() {
        let config = ConfigBuilder::new()
            .directory("/media/in")
            .dest(Some(PathBuf::from("/media/out")))
            .pattern(r"(\d+)")
            .series("Foo", 3)
            .create_dirs(true)
            .build()
            .unwrap();
        let engine = LinkEngine::new(config).unwrap();
        assert_eq!(
            engine.destination_dir(),
            PathBuf::from("/media/out/Foo/Season 03")
        );
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let config = ConfigBuilder::new()
            .directory("/media/in")
            .pattern(r"([0-9]+")
            .series("Foo", 1)
            .build()
            .unwrap();
        assert!(LinkEngine::new(config).is_err());
    }
}
