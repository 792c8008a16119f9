use clap::Parser;
use entroscan::{pipeline, Config};
use simple_logger::SimpleLogger;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Log records go to stderr; stdout carries only the report and labels.
    if let Err(e) = SimpleLogger::new()
        .with_level(log::LevelFilter::Warn)
        .env()
        .init()
    {
        eprintln!("failed to initialise logging: {}", e);
    }

    let config = Config::parse();
    log::debug!("{:?}", config);

    let output = match pipeline::run(&config) {
        Ok(output) => output,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if config.json {
        match output.report.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", output.report);
    }

    if config.labels {
        for label in output.assignment.labels() {
            println!("{}", label);
        }
    }

    ExitCode::SUCCESS
}
