mod config;
mod events;
mod session;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tnav_core::{ControllerSettings, StepSize};

use config::Config;
use session::Session;

/// Replay navigation events against a recording and print every viewport
/// change the controllers publish.
#[derive(Parser, Debug)]
#[command(name = "tnav", version, about)]
struct Cli {
    /// Recording description (JSON or MessagePack)
    recording: PathBuf,

    /// Read events from this file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Initial step size, e.g. "100 ms"
    #[arg(long)]
    step: Option<String>,

    /// Initial window size in seconds
    #[arg(long)]
    window: Option<f64>,
}

impl Cli {
    /// Settings from the config with this run's overrides applied. The
    /// overrides are not written back to the config.
    fn controller_settings(&self, config: &Config) -> Result<ControllerSettings> {
        let mut settings = config.controller_settings();
        if let Some(token) = &self.step {
            settings.step = token.parse::<StepSize>()?;
        }
        Ok(settings)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    let mut config = Config::load();
    let settings = cli.controller_settings(&config)?;

    let loaded = tnav_project::load_recording(&cli.recording)
        .with_context(|| format!("failed to load {}", cli.recording.display()))?;

    config.remember_recording(&cli.recording);
    config.save();

    let mut session = Session::new(&loaded, settings)?;
    if let Some(seconds) = cli.window {
        session.navigation.on_window_changed(seconds);
    }
    print_output(&session);

    let input: Box<dyn BufRead> = match &cli.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;

        let event = match events::parse_line(&line) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(err) => {
                log::warn!("line {line_no}: {err:#}");
                continue;
            }
        };

        if let Err(err) = session.apply(event) {
            log::warn!("line {line_no}: {err:#}");
        }
        print_output(&session);
    }

    Ok(())
}

fn print_output(session: &Session) {
    for line in session.drain_output() {
        println!("{line}");
    }
}
