use std::io;
use std::process;

use account_keeper::config::Cli;
use account_keeper::run;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let (settings, command) = Cli::parse().into_parts();
    let mut store = settings.open_store();
    match run(command, &mut store, io::stdout().lock()) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(1);
        }
    }
}
