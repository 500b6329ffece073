use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use weatherdash::config::LoggingConfig;
use weatherdash::{
    Dashboard, DashboardConfig, DashboardView, MeasurementSystem, PreferenceStore, Renderer,
    Theme, WeatherApiClient, WeatherDashError,
};

/// Current conditions and 5-day forecast in your terminal
#[derive(Parser, Debug)]
#[command(name = "weatherdash", version, about)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Measurement system (metric or imperial)
    #[arg(short, long, global = true)]
    units: Option<MeasurementSystem>,

    /// Print display records as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Current conditions and forecast for a city
    Search {
        /// City name, e.g. "San José, Costa Rica"
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,
    },
    /// Current conditions and forecast for a coordinate pair
    Locate {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },
    /// Show or change the saved display theme
    Theme {
        #[arg(value_enum, default_value_t = ThemeAction::Show)]
        action: ThemeAction,
    },
    /// Interactive session
    Shell {
        /// Starting latitude
        #[arg(long, allow_negative_numbers = true, requires = "lon")]
        lat: Option<f64>,
        /// Starting longitude
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lon: Option<f64>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ThemeAction {
    Show,
    Toggle,
    Light,
    Dark,
}

fn init_logging(config: &LoggingConfig, verbose: bool) {
    let level = if verbose { "debug" } else { config.level.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("weatherdash={level}")));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_view(view: &DashboardView, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else {
        print!("{view}");
    }
    Ok(())
}

struct App {
    dashboard: Dashboard<WeatherApiClient>,
    renderer: Renderer,
    json: bool,
}

impl App {
    fn new(config: &DashboardConfig, units: MeasurementSystem, json: bool) -> Result<Self> {
        let client = WeatherApiClient::new(&config.weather)?;
        Ok(Self {
            dashboard: Dashboard::new(client, units),
            renderer: Renderer::new(&config.weather.icon_base_url, config.defaults.forecast_days),
            json,
        })
    }

    fn show(&self) -> Result<()> {
        print_view(&self.renderer.render_state(&self.dashboard.state()), self.json)
    }

    /// Print the dashboard after a fetch; `false` when the fetch failed
    fn report<T>(&self, result: weatherdash::Result<T>) -> Result<bool> {
        match result {
            Ok(_) => {
                self.show()?;
                Ok(true)
            }
            Err(err @ WeatherDashError::Validation { .. }) => {
                eprintln!("{}", err.user_message());
                Ok(false)
            }
            Err(err) => {
                debug!("Request failed: {}", err);
                self.show()?;
                Ok(false)
            }
        }
    }
}

fn open_preferences(config: &DashboardConfig) -> Result<PreferenceStore> {
    PreferenceStore::open(&config.preferences.location).with_context(|| {
        format!(
            "Failed to open preference store at {}",
            config.preferences.location
        )
    })
}

async fn run_theme(config: &DashboardConfig, action: ThemeAction) -> Result<Theme> {
    let store = open_preferences(config)?;
    let theme = match action {
        ThemeAction::Show => store.theme().await?,
        ThemeAction::Toggle => store.toggle_theme().await?,
        ThemeAction::Light => {
            store.set_theme(Theme::Light).await?;
            Theme::Light
        }
        ThemeAction::Dark => {
            store.set_theme(Theme::Dark).await?;
            Theme::Dark
        }
    };
    Ok(theme)
}

const SHELL_HELP: &str = "Commands:
  search <city>              look up a city
  units <metric|imperial>    switch measurement system
  theme                      toggle light/dark theme
  show                       print the dashboard again
  help                       this text
  quit                       leave";

async fn run_shell(app: &App, config: &DashboardConfig, start: Option<(f64, f64)>) -> Result<()> {
    let preferences = match open_preferences(config) {
        Ok(store) => Some(store),
        Err(e) => {
            warn!("Theme preference unavailable: {:#}", e);
            None
        }
    };
    if let Some(store) = &preferences {
        match store.theme().await {
            Ok(theme) => println!("Theme: {theme}"),
            Err(e) => warn!("Theme preference unavailable: {:#}", e),
        }
    }

    if let Some((lat, lon)) = start {
        app.report(app.dashboard.search_by_coordinates(lat, lon).await)?;
    } else {
        app.show()?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, argument) = line.split_once(' ').unwrap_or((line, ""));

        match command {
            "" => {}
            "search" | "s" => {
                app.report(app.dashboard.search(argument).await)?;
            }
            "units" | "u" => match argument.parse::<MeasurementSystem>() {
                Ok(units) => {
                    app.report(app.dashboard.set_units(units).await)?;
                }
                Err(e) => eprintln!("{e}"),
            },
            "theme" | "t" => match &preferences {
                Some(store) => match store.toggle_theme().await {
                    Ok(theme) => println!("Theme: {theme}"),
                    Err(e) => eprintln!("Theme preference unavailable: {e:#}"),
                },
                None => eprintln!("Theme preference unavailable"),
            },
            "show" => app.show()?,
            "help" | "?" => println!("{SHELL_HELP}"),
            "quit" | "exit" | "q" => break,
            other => eprintln!("Unknown command '{other}'. Type 'help' for a list."),
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = DashboardConfig::load_from_path(cli.config.clone())?;
    init_logging(&config.logging, cli.verbose);
    debug!(
        "Using config from {}",
        cli.config
            .clone()
            .or_else(DashboardConfig::get_config_path)
            .map_or_else(|| "defaults".to_string(), |p| p.display().to_string())
    );

    let units = cli.units.unwrap_or(config.defaults.units);

    let succeeded = match cli.command {
        Command::Theme { action } => {
            let theme = run_theme(&config, action).await?;
            println!("Theme: {theme}");
            true
        }
        Command::Search { city } => {
            let app = App::new(&config, units, cli.json)?;
            app.report(app.dashboard.search(&city.join(" ")).await)?
        }
        Command::Locate { lat, lon } => {
            let app = App::new(&config, units, cli.json)?;
            app.report(app.dashboard.search_by_coordinates(lat, lon).await)?
        }
        Command::Shell { lat, lon } => {
            let app = App::new(&config, units, cli.json)?;
            run_shell(&app, &config, lat.zip(lon)).await?;
            true
        }
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
