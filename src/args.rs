use clap::{value_parser, Arg, ArgAction, Command};
use std::fs;

/// Arguments shared by the decode and encode subcommands
fn code_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("input")
                .help("Input file")
                .required(true)
                .index(1)
                .value_parser(|input: &str| {
                    let path =
                        fs::canonicalize(input).map_err(|_| "Failed to resolve input path")?;
                    if path.is_file() {
                        Ok(path.to_string_lossy().to_string())
                    } else {
                        Err(String::from("Input file does not exist"))
                    }
                }),
        )
        .arg(
            Arg::new("output")
                .help("Output file (default: standard output)")
                .required(false)
                .index(2),
        )
        .arg(
            Arg::new("basis")
                .short('b')
                .long("basis")
                .help("Field exponent: symbols live in GF(2^N)")
                .value_name("N")
                .value_parser(value_parser!(u32))
                .default_value("8"),
        )
        .arg(
            Arg::new("codewords")
                .short('c')
                .long("codewords")
                .help("Interleaving depth")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .default_value("4"),
        )
        .arg(
            Arg::new("codeword-len")
                .short('l')
                .long("codeword-len")
                .help("Shortened codeword length for stream mode")
                .value_name("BYTES")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("dual-basis")
                .short('d')
                .long("dual-basis")
                .help("Symbols use the CCSDS dual basis")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("pdu")
                .short('p')
                .long("pdu")
                .help("Input and output are PDU record files instead of raw streams")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("parallel")
                .short('j')
                .long("parallel")
                .help("Decode stream frames on all cores (decode only)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Report every codeword to standard error")
                .action(ArgAction::SetTrue),
        )
}

/// Command line definition of the `rsdecode` binary
pub fn build_cli() -> Command {
    Command::new("rsdecode")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Interleaved Reed-Solomon frame decoder")
        .arg_required_else_help(true)
        .subcommand(code_args(
            Command::new("decode")
                .visible_alias("d")
                .about("Correct interleaved frames and strip parity"),
        ))
        .subcommand(code_args(
            Command::new("encode")
                .visible_alias("e")
                .about("Add parity and interleave payload blocks into frames"),
        ))
}

pub fn parse_args() -> clap::ArgMatches {
    build_cli().get_matches()
}
