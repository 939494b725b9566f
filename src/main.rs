use crossword_www::config::{self, ConfigError};
use crossword_www::orchestrate::{self, BuildError};
use crossword_www::output;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(ConfigError::Help(text)) = err.downcast_ref::<ConfigError>() {
                print!("{}", text);
                return ExitCode::SUCCESS;
            }
            eprintln!("ERROR: {}", err);
            if let Some(stderr) = err
                .downcast_ref::<BuildError>()
                .and_then(BuildError::generator_stderr)
            {
                eprintln!("{}", stderr);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let today = chrono::Local::now().date_naive();
    let cli = config::resolve_cli(std::env::args_os().skip(1), today)?;

    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let cwd = std::env::current_dir()?;
    let site = config::load_config(cli.config.as_deref(), &cwd)?;
    let output_dir = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&site.output_dir));

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            output::print_build_event(&event);
        }
    });
    let result = orchestrate::build_site(&site, &cli.run, &output_dir, Some(tx));
    // The sender is dropped with the build, so the printer drains and exits.
    if printer.join().is_err() {
        eprintln!("warning: progress output thread panicked");
    }
    let summary = result?;

    println!();
    output::print_summary(&summary);
    Ok(())
}
