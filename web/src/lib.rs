use std::time::Duration;

use clap::Parser;
use simon_core::EngineConfig;
use wasm_bindgen::prelude::*;

pub use host::SimonGame;
pub use store::BrowserStore;

mod host;
mod store;
mod utils;

/// Options read from the page's location hash, e.g. `#-vv&--seed=42&--round-delay-ms=800`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Pause before each round's playback, in milliseconds
    #[arg(long)]
    round_delay_ms: Option<u64>,

    /// Comma separated color labels, one button each
    #[arg(long, value_delimiter = ',')]
    colors: Vec<String>,
}

impl Args {
    fn from_hash(location_hash: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(location_hash.split(['#', '&']))
    }

    fn from_location() -> Self {
        let location_hash = gloo::utils::window()
            .location()
            .hash()
            .unwrap_or_else(|_| "".to_string());

        Self::from_hash(&location_hash).unwrap_or_else(|err| {
            log::warn!("Ignoring location options: {}", err);
            Self::from_hash("").expect("empty options always parse")
        })
    }

    fn engine_config(&self) -> EngineConfig {
        let mut config = if self.colors.is_empty() {
            EngineConfig::default()
        } else {
            EngineConfig::new(self.colors.clone())
        };
        if let Some(millis) = self.round_delay_ms {
            config = config.with_round_delay(Duration::from_millis(millis));
        }
        config
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let args = Args::from_location();
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("seed: {:?}", args.seed);
    log::debug!("App started");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_options_parse_like_a_command_line() {
        let args = Args::from_hash("#-vv&--seed=42&--round-delay-ms=800").unwrap();

        assert_eq!(args.seed, Some(42));
        assert_eq!(args.verbose.log_level(), Some(log::Level::Info));
        assert_eq!(
            args.engine_config().round_delay,
            Duration::from_millis(800)
        );
    }

    #[test]
    fn empty_hash_uses_defaults() {
        let args = Args::from_hash("").unwrap();

        assert_eq!(args.seed, None);
        assert_eq!(args.engine_config(), EngineConfig::default());
    }

    #[test]
    fn custom_palette_from_hash() {
        let args = Args::from_hash("#--colors=red,blue,green").unwrap();
        let config = args.engine_config();

        assert_eq!(config.palette, ["red", "blue", "green"]);
    }

    #[test]
    fn unknown_option_is_rejected() {
        assert!(Args::from_hash("#--difficulty=hard").is_err());
    }
}
