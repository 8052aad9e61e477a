use std::fs;
use std::time::Instant;

use anyhow::{Context, Result};

use crate::model::config::SimConfig;
use crate::model::history::RunLogger;
use crate::model::world::World;

/// Runtime options resolved from the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config_path: String,
    pub ticks: u64,
    pub seed: Option<u64>,
    pub log_dir: String,
}

/// Reads the TOML config at `path`. A missing file is not an error: the
/// defaults are used and written back so the next run starts from an
/// editable file. A file that exists but fails to parse or validate is.
pub fn load_config(path: &str) -> Result<SimConfig> {
    match fs::read_to_string(path) {
        Ok(content) => {
            SimConfig::from_toml(&content).with_context(|| format!("invalid config file {path}"))
        }
        Err(_) => {
            let default = SimConfig::default();
            if let Ok(text) = toml::to_string_pretty(&default) {
                // Create default config file if missing
                let _ = fs::write(path, text);
            }
            Ok(default)
        }
    }
}

pub struct App {
    pub running: bool,
    pub tick_count: u64,
    pub world: World,
    pub logger: RunLogger,
}

impl App {
    pub fn new(options: &RunOptions) -> Result<Self> {
        let mut config = load_config(&options.config_path)?;
        if let Some(seed) = options.seed {
            config.world.seed = Some(seed);
        }
        let logger = RunLogger::new_at(&options.log_dir)
            .with_context(|| format!("opening run log in {}", options.log_dir))?;
        let world = World::new(config).context("building world")?;
        Ok(Self {
            running: true,
            tick_count: 0,
            world,
            logger,
        })
    }

    /// Advances the world until `ticks` have run or both species are
    /// gone, appending each tick's ledger to the run log.
    pub fn run(&mut self, ticks: u64) -> Result<()> {
        let started = Instant::now();
        for _ in 0..ticks {
            let report = self.world.tick();
            self.tick_count = report.tick;
            self.logger.log_report(&report).context("writing run log")?;
            if !self.world.is_running() {
                self.running = false;
                break;
            }
        }

        let stats = self.world.stats();
        tracing::info!(
            ticks = self.tick_count,
            elapsed_ms = started.elapsed().as_millis() as u64,
            seed = self.world.seed,
            dogs = self.world.counts.dogs,
            cats = self.world.counts.cats,
            harvesters = self.world.counts.harvesters,
            births = stats.total_births,
            deaths = stats.total_deaths,
            harvested = stats.total_harvested,
            earnings = stats.total_earnings,
            "run finished"
        );
        Ok(())
    }
}
