//! Subcommand implementations and the repository/tag arguments they share.

pub mod diagram;
pub mod render;
pub mod segments;

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::internal::{
    config::{Config, DEFAULT_CONFIG_FILE},
    repository::Repository,
    segment::CommitGraph,
};

/// Where the repository and tag list come from. Flags override the config file.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// JSON config file
    #[clap(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
    /// Repository root, overrides `repository_path`
    #[clap(short, long)]
    pub repo: Option<PathBuf>,
    /// Store directory under the repository root, overrides `store_dir`
    #[clap(long)]
    pub store_dir: Option<PathBuf>,
    /// Tag to include, oldest first; repeat for several. Replaces `tag_names`
    #[clap(short, long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,
    /// Follow annotated tag objects to the commit they name
    #[clap(long)]
    pub peel: bool,
}

impl SourceArgs {
    /// The config file with command line overrides applied.
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = if self.repo.is_some() && !self.tags.is_empty() {
            Config::load_or_default(&self.config)?
        } else {
            Config::load(&self.config)?
        };
        if let Some(repo) = &self.repo {
            config.repository_path = repo.clone();
        }
        if let Some(store_dir) = &self.store_dir {
            config.store_dir = store_dir.clone();
        }
        if !self.tags.is_empty() {
            config.tag_names = self.tags.clone();
        }
        config.peel_tags |= self.peel;
        Ok(config)
    }

    /// Loads the config and segments the configured tags.
    pub fn segment(&self) -> anyhow::Result<(Config, CommitGraph)> {
        let config = self.load_config()?;
        let tags = config.require_tags()?;
        let repo = Repository::open(&config.repository_path, &config.store_dir);
        let graph = repo.segment(tags, config.peel_tags).with_context(|| {
            format!(
                "failed to collect commits for tags in {}",
                config.repository_path.display()
            )
        })?;
        tracing::debug!(
            "collected {} commits over {} tags",
            graph.commit_count(),
            graph.len()
        );
        Ok((config, graph))
    }
}
