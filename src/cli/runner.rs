//! CLI runner - executes commands

use crate::api::DataApiClient;
use crate::catalog::Catalog;
use crate::cli::commands::{Cli, Commands};
use crate::config::TapConfig;
use crate::discover::{discover, load_exclusions};
use crate::engine::SyncEngine;
use crate::error::{Error, Result};
use crate::output::{JsonLinesSink, MessageSink};
use crate::state::StateManager;
use std::path::Path;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, writing to stdout
    pub async fn run(&self) -> Result<()> {
        self.run_with_sink(JsonLinesSink::stdout()).await?;
        Ok(())
    }

    /// Run the CLI command against `sink`, returning it afterwards
    pub async fn run_with_sink<S: MessageSink>(&self, sink: S) -> Result<S> {
        let config = self.load_config()?;
        let api = DataApiClient::from_config(&config)?;

        match &self.cli.command {
            Commands::Discover { field_exclusions } => {
                self.discover(api, &config, field_exclusions.as_deref(), sink)
                    .await
            }
            Commands::Sync {
                catalog,
                checkpoint,
            } => {
                self.sync(api, config, catalog, checkpoint.as_deref(), sink)
                    .await
            }
        }
    }

    async fn discover<S: MessageSink>(
        &self,
        api: DataApiClient,
        config: &TapConfig,
        field_exclusions: Option<&Path>,
        mut sink: S,
    ) -> Result<S> {
        let cached = field_exclusions.map(load_exclusions).transpose()?;
        if cached.is_some() {
            info!("Using cached field exclusions");
        }

        let catalog = discover(&api, config, cached).await?;
        sink.emit_catalog(&catalog)?;
        Ok(sink)
    }

    async fn sync<S: MessageSink>(
        &self,
        api: DataApiClient,
        config: TapConfig,
        catalog: &Path,
        checkpoint: Option<&Path>,
        sink: S,
    ) -> Result<S> {
        let catalog = Catalog::from_file(catalog)?;
        let mut state = self.load_state()?;
        if let Some(path) = checkpoint {
            state = state.with_checkpoint(path);
        }

        let mut engine = SyncEngine::new(api, sink, config, state);
        engine.sync(&catalog).await?;
        let (sink, _) = engine.into_parts();
        Ok(sink)
    }

    /// Load and validate the config file
    fn load_config(&self) -> Result<TapConfig> {
        let path = self
            .cli
            .config
            .as_ref()
            .ok_or_else(|| Error::config("Config file not specified (use -C flag)"))?;
        TapConfig::from_file(path)
    }

    /// Inline state wins over a state file; neither means a fresh sync
    fn load_state(&self) -> Result<StateManager> {
        if let Some(json) = &self.cli.state_json {
            return StateManager::from_json(json);
        }
        match &self.cli.state {
            Some(path) => StateManager::from_file(path),
            None => Ok(StateManager::in_memory()),
        }
    }
}
