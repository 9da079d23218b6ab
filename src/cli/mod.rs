use anyhow::Result;
use clap::{value_parser, Arg, ArgAction, Command};
use tracing::Level;

pub mod telemetry;

#[must_use]
pub fn new() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .env("ECHOENV_PORT")
                .default_value("8080")
                .value_parser(value_parser!(u16).range(1..)),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: -v for debug, -vv for trace")
                .action(ArgAction::Count),
        )
}

/// Parse the command line, returning the port to listen on and the log
/// level derived from the number of `-v` flags.
/// # Errors
/// Will return an error on an invalid command line
pub fn start() -> Result<(u16, Level)> {
    let matches = new().get_matches();

    let port = matches.get_one::<u16>("port").map_or(8080, |port| *port);

    Ok((port, verbosity_level(matches.get_count("verbosity"))))
}

const fn verbosity_level(count: u8) -> Level {
    match count {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}
