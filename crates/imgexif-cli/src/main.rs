use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use env_logger::Env;
use log::info;

#[derive(Parser)]
#[command(name = "imgexif", version, about = "Sort a directory of photos into per-capture-date subdirectories")]
struct Cli {
    /// Directory holding the image files to organize
    source_dir: PathBuf,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
            let _ = err.print();
            return code;
        }
    };

    match run(&cli) {
        Ok(count) => {
            println!("Successfully processed {} images.", count);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<u64> {
    let started = std::time::Instant::now();

    imgexif_core::validate_source_dir(&cli.source_dir)?;
    let report = imgexif_core::Organizer::new(&cli.source_dir).run()?;

    info!(
        "relocated {} files ({} without a capture date, {} unreadable), {} failed ({:.2}s)",
        report.relocated,
        report.undated,
        report.unreadable,
        report.failed,
        started.elapsed().as_secs_f64()
    );
    Ok(report.relocated)
}
