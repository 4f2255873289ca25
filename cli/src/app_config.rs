use clap::ArgMatches;
use log::*;

use midipad::control_surface;
use midipad::{Baseline, Config, Engine};

use crate::app_error::AppError;

pub const DEFAULT_SURFACE: &str = "xbox-ble";
pub const DEFAULT_TICK_MS: u64 = 1;

/// Everything the `live` and `replay` commands need to build a pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub surface: String,
    pub config: Config,
    pub tick_ms: u64,
}

impl AppConfig {
    pub fn new(surface: &str, config: Config) -> Self {
        AppConfig { surface: surface.to_string(), config, tick_ms: DEFAULT_TICK_MS }
    }

    pub fn from_matches(matches: &ArgMatches) -> Result<AppConfig, AppError> {
        let surface = matches.value_of("surface").unwrap_or(DEFAULT_SURFACE);
        let mut config = Config::default();

        if let Some(text) = matches.value_of("mapping") {
            config.mapping = text.parse::<usize>()?;
        }
        if let Some(text) = matches.value_of("base-note") {
            config.baseline = Baseline::BaseNote(text.parse::<u8>()?);
        }
        if let Some(text) = matches.value_of("transpose") {
            config.baseline = Baseline::Transpose(text.parse::<i32>()?);
        }
        config.sustain = matches.is_present("sustain");
        config.extend = matches.is_present("extend");

        let tick_ms = match matches.value_of("tick-ms") {
            Some(text) => text.parse::<u64>()?,
            None => DEFAULT_TICK_MS,
        };
        if tick_ms == 0 {
            return Err(AppError::new("--tick-ms must be at least 1"));
        }

        debug!("{}: {:?}, tick {} ms", surface, config, tick_ms);
        return Ok(AppConfig { surface: surface.to_string(), config, tick_ms });
    }

    pub fn build_engine(self: &Self) -> Result<Engine, AppError> {
        let surface = control_surface::by_name(&self.surface)?;
        Ok(Engine::new(surface, self.config)?)
    }
}
