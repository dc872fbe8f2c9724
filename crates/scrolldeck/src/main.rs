mod app;
mod cli;
mod commands;
mod config;
mod content;
mod nav;
mod palette;
mod render;
mod slideshow;
mod theme;
mod watch;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    let filter = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    cli.run()
}
