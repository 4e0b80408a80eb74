use clap::{command, value_parser, Arg, ArgAction, Command};

pub fn register_args() -> Command {
    command!()
        .next_line_help(true)
        .arg(
            Arg::new("host")
                .required(false)
                .default_value("127.0.0.1")
                .long("host")
                .action(ArgAction::Set)
                .value_parser(value_parser!(std::net::IpAddr))
                .help("Address of the chat server"),
        )
        .arg(
            Arg::new("port")
                .required(false)
                .default_value("12888")
                .long("port")
                .action(ArgAction::Set)
                .value_parser(value_parser!(u16).range(1..))
                .help("UDP port of the chat server"),
        )
        .arg(
            Arg::new("timeout-ms")
                .required(false)
                .default_value("1000")
                .long("timeout-ms")
                .action(ArgAction::Set)
                .value_parser(value_parser!(u64).range(1..))
                .help("Socket timeout in milliseconds"),
        )
        .arg(
            Arg::new("log-file")
                .required(false)
                .long("log-file")
                .action(ArgAction::Set)
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Write logs here instead of discarding them"),
        )
}
