mod args;
mod config;

use chrono::Local;
use timelog_ingest::{append_entry, append_session_end, default_log_path};
use timelog_report::{ReportParams, render_report, report_from_path};

use crate::args::Command;

fn main() {
    env_logger::init();

    let args = match args::parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            args::print_help();
            std::process::exit(2);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(args: args::CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = config::load_or_create()?;
    if config.created {
        log::info!("created config at {}", config.file.display());
    }
    let log_path = args
        .file
        .or(config.config.log_file)
        .unwrap_or_else(default_log_path);

    match args.command {
        Command::Track { description, page } => {
            append_entry(&log_path, &description, &page, Local::now().naive_local())?;
        }
        Command::Stop => {
            append_session_end(&log_path, Local::now().naive_local())?;
        }
        Command::Report(report_args) => {
            let params = ReportParams {
                from_date: report_args.from,
                to_date: report_args.to,
                search: report_args.filter,
            };
            let report = report_from_path(&log_path, &params)?;
            if report_args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_report(&report));
            }
        }
    }
    Ok(())
}
