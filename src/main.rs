use std::path::PathBuf;
use std::process::ExitCode;

use camkit::{init_logging, run_file, BUILD_DATE, VERSION};
use tracing::info;

fn usage() -> ExitCode {
    eprintln!("Usage: camkit <segments.json> [-o <output.txt>]");
    ExitCode::from(2)
}

fn main() -> ExitCode {
    if let Err(e) = init_logging() {
        eprintln!("failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }
    info!("camkit {} (built {})", VERSION, BUILD_DATE);

    let mut args = std::env::args().skip(1);
    let input = match args.next() {
        Some(a) if a != "-h" && a != "--help" => PathBuf::from(a),
        _ => return usage(),
    };
    let output = match (args.next(), args.next()) {
        (None, _) => None,
        (Some(flag), Some(path)) if flag == "-o" => Some(PathBuf::from(path)),
        _ => return usage(),
    };

    match run_file(&input) {
        Ok(text) => {
            if let Some(path) = output {
                if let Err(e) = std::fs::write(&path, &text) {
                    eprintln!("failed to write {}: {}", path.display(), e);
                    return ExitCode::FAILURE;
                }
            } else {
                print!("{}", text);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
