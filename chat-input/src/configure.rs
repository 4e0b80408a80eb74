use chatline::SenderConfig;
use clap::ArgMatches;
use eyre::OptionExt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug)]
pub struct Config {
    pub sender: SenderConfig,
    pub log_file: Option<PathBuf>,
}

impl TryFrom<ArgMatches> for Config {
    type Error = eyre::Report;

    fn try_from(mut matches: ArgMatches) -> Result<Self, Self::Error> {
        let host = matches
            .remove_one::<IpAddr>("host")
            .ok_or_eyre("Missing host")?;
        let port = matches
            .remove_one::<u16>("port")
            .ok_or_eyre("Missing port")?;
        let timeout_ms = matches
            .remove_one::<u64>("timeout-ms")
            .ok_or_eyre("Missing timeout")?;

        Ok(Self {
            sender: SenderConfig {
                destination: SocketAddr::new(host, port),
                timeout: Duration::from_millis(timeout_ms),
            },
            log_file: matches.remove_one::<PathBuf>("log-file"),
        })
    }
}
