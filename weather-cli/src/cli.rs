use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text, validator::Validation};
use mgm_weather_core::{Config, provider_from_config};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "mgm-weather", version, about = "Weather from the MGM forecast pages")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current conditions and the 5-day forecast.
    Show {
        /// City (il), e.g. "Trabzon". Prompted for when omitted.
        city: Option<String>,

        /// District (ilçe); "Merkez" for the provincial center. Prompted for when omitted.
        district: Option<String>,

        /// Print the raw snapshot as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Interactively set browser and timeout options.
    Configure,

    /// Print where the config file lives.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show { city, district, json } => {
                let config = Config::load()?;
                let city = prompt_if_missing(city, "City (il):")?;
                let district = prompt_if_missing(district, "District (ilçe):")?;

                let provider = provider_from_config(&config);
                let snapshot = provider.extract_weather(&city, &district).await?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&snapshot)?);
                } else {
                    print!("{}", render::snapshot_table(&snapshot, chrono::Local::now()));
                }
            }
            Command::Configure => configure()?,
            Command::ConfigPath => println!("{}", Config::config_file_path()?.display()),
        }

        Ok(())
    }
}

fn prompt_if_missing(value: Option<String>, message: &str) -> anyhow::Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }

    Text::new(message)
        .with_validator(|input: &str| {
            Ok(if input.trim().is_empty() {
                Validation::Invalid("must not be empty".into())
            } else {
                Validation::Valid
            })
        })
        .prompt()
        .context("Failed to read input")
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let timeout_prompt = CustomType::<u64>::new("Wait timeout per element (seconds):");
    config.extraction.wait_timeout_secs = timeout_prompt
        .with_default(config.extraction.wait_timeout_secs)
        .with_validator(|secs: &u64| {
            Ok(if *secs == 0 {
                Validation::Invalid("must be at least 1 second".into())
            } else {
                Validation::Valid
            })
        })
        .prompt()
        .context("Failed to read timeout")?;

    let current_agent = config.browser.user_agent.clone();
    config.browser.user_agent = Text::new("Browser user agent:")
        .with_default(&current_agent)
        .prompt()
        .context("Failed to read user agent")?;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}
