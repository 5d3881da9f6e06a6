use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Track { description: String, page: String },
    Stop,
    Report(ReportArgs),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportArgs {
    pub from: Option<String>,
    pub to: Option<String>,
    pub filter: Option<String>,
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub command: Command,
    pub file: Option<PathBuf>,
}

pub fn parse_args() -> Result<CliArgs, String> {
    parse_from(env::args().skip(1))
}

fn parse_from<I: Iterator<Item = String>>(mut args: I) -> Result<CliArgs, String> {
    let mut file = None;
    let command = loop {
        match args.next().as_deref() {
            Some("--file") => {
                let value = args.next().ok_or("missing value for --file")?;
                file = Some(PathBuf::from(value));
            }
            Some("--help") | Some("-h") => {
                print_help();
                std::process::exit(0);
            }
            Some("track") => break parse_track(args)?,
            Some("stop") => {
                if let Some(extra) = args.next() {
                    return Err(format!("unexpected argument: {extra}"));
                }
                break Command::Stop;
            }
            Some("report") => break parse_report(args)?,
            Some(other) => return Err(format!("unknown command: {other}")),
            None => return Err("missing command".to_string()),
        }
    };
    Ok(CliArgs { command, file })
}

fn parse_track<I: Iterator<Item = String>>(mut args: I) -> Result<Command, String> {
    let mut description: Option<String> = None;
    let mut page = String::new();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--page" => {
                page = args.next().ok_or("missing value for --page")?;
            }
            _ if description.is_none() => description = Some(arg),
            _ => return Err(format!("unexpected argument: {arg}")),
        }
    }
    let description = description.ok_or("missing task description")?;
    Ok(Command::Track { description, page })
}

fn parse_report<I: Iterator<Item = String>>(mut args: I) -> Result<Command, String> {
    let mut report = ReportArgs::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--from" => report.from = Some(args.next().ok_or("missing value for --from")?),
            "--to" => report.to = Some(args.next().ok_or("missing value for --to")?),
            "--filter" => report.filter = Some(args.next().ok_or("missing value for --filter")?),
            "--json" => report.json = true,
            _ => return Err(format!("unexpected argument: {arg}")),
        }
    }
    Ok(Command::Report(report))
}

pub fn print_help() {
    println!(
        "timelog\n\n\
Usage:\n  timelog [--file <path>] track <description> [--page <page>]\n  timelog [--file <path>] stop\n  timelog [--file <path>] report [--from <dd/mm/yyyy>] [--to <dd/mm/yyyy>] [--filter <text>] [--json]\n\n\
Commands:\n  track    Record that work switched to the given task now\n  stop     Mark the end of the tracking session\n  report   Rebuild the time report from the log\n\n\
Options:\n  --file <path>  Use this log file instead of the configured one\n  -h, --help     Show this help message\n"
    );
}
