use chatline::{DatagramListener, Received};
use clap::{command, value_parser, Arg, ArgAction, Command};
use eyre::{OptionExt, WrapErr};
use log::LevelFilter;
use std::io::Write;
use std::net::SocketAddr;

// Every interface, on the chat port.
const DEFAULT_BIND: &str = "0.0.0.0:12888";

fn register_args() -> Command {
    command!()
        .next_line_help(true)
        .arg(
            Arg::new("bind")
                .required(false)
                .default_value(DEFAULT_BIND)
                .long("bind")
                .action(ArgAction::Set)
                .value_parser(value_parser!(SocketAddr))
                .help("Address to receive chat messages on"),
        )
}

/// Prints every message that arrives, one per line. Stops cleanly when a read times out and
/// with an error on any other receive failure.
fn serve(
    mut recv: impl FnMut() -> chatline::Result<Received>,
    out: &mut impl Write,
) -> eyre::Result<()> {
    loop {
        match recv() {
            Ok(received) => {
                writeln!(out, "{}", received.text)?;
                out.flush()?;
            }
            Err(err) if err.is_timeout() => return Ok(()),
            Err(err) => return Err(err).wrap_err("Receive failed"),
        }
    }
}

fn main() -> eyre::Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .try_init()?;

    let mut matches = register_args().get_matches();
    let addr = matches
        .remove_one::<SocketAddr>("bind")
        .ok_or_eyre("Missing bind address")?;

    let mut listener =
        DatagramListener::bind(addr).wrap_err_with(|| format!("Cannot listen on {addr}"))?;

    serve(|| listener.recv(), &mut std::io::stdout().lock())
}
