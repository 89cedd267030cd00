//! CLI entrypoint for `yaml-overlay`.

use clap::Parser;

use yaml_overlay_cli::cli::Args;
use yaml_overlay_cli::error::CliError;
use yaml_overlay_cli::settings::OverlaySettings;
use yaml_overlay_cli::{logging, run};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    execute().map_err(color_eyre::eyre::Report::from)
}

fn execute() -> Result<(), CliError> {
    logging::init()?;
    let args = Args::parse();
    let settings = OverlaySettings::resolve_from_env(&args.settings())?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run(&args, &settings, &mut stdin.lock(), &mut stdout.lock())
}
