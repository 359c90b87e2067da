use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shared::protocol::{CompletedSlip, SlipEvent};
use slip_wizard::{load_settings, Catalog, SlipWizard, WizardStep};
use tracing_subscriber::EnvFilter;

mod script;

#[derive(Parser, Debug)]
struct Cli {
    /// TOML settings file; missing means defaults.
    #[arg(long, default_value = "slip_wizard.toml")]
    settings: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON action script against a fresh wizard.
    Run {
        #[arg(long)]
        script: PathBuf,
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Print the wizard's steps in order.
    Steps,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Command::Run { script, catalog } => {
            let settings = load_settings(&cli.settings)?;
            let catalog = catalog.map(|path| load_catalog(&path)).transpose()?;
            let raw = fs::read_to_string(&script)
                .with_context(|| format!("failed to read script {}", script.display()))?;
            let actions = script::parse_script(&raw)
                .with_context(|| format!("failed to parse script {}", script.display()))?;

            let mut wizard = SlipWizard::new(settings, Vec::<CompletedSlip>::new());
            wizard.set_catalog(catalog);
            let summary = script::run_script(&mut wizard, actions);

            for slip in wizard.submitter() {
                let event = SlipEvent::SlipCompleted { slip: slip.clone() };
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
            tracing::info!(
                applied = summary.applied,
                rejected = summary.rejected.len(),
                submitted = wizard.submitter().len(),
                "script finished"
            );
        }
        Command::Steps => {
            for step in WizardStep::all() {
                println!("{step}");
            }
        }
    }

    Ok(())
}

fn load_catalog(path: &PathBuf) -> Result<Catalog> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse catalog {}", path.display()))
}
