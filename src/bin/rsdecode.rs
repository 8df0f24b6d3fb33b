//! rsdecode - decode or encode interleaved Reed-Solomon frames from files
//!
//! Raw streams are pushed through the block's `forecast`/`general_work`
//! interface the way a scheduler would; PDU record files go through the
//! `in` message port.

use anyhow::{Context, Result};
use rsinterleave::block::{Block, Message, QueueSink};
use rsinterleave::decoder::{DecodeRsInterleaved, DecoderConfig, InterleavedCode};
use rsinterleave::pdu::{read_records, write_records};
use rsinterleave::reporters::{ConsoleDecodeReporter, DecodeReporter};
use std::fs;
use std::io::{Cursor, Write};
use std::sync::Arc;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let matches = rsinterleave::parse_args();

    match matches.subcommand() {
        Some(("decode", sub_matches)) => handle_decode(sub_matches),
        Some(("encode", sub_matches)) => handle_encode(sub_matches),
        Some((cmd, _)) => {
            eprintln!("Unknown command: {}", cmd);
            std::process::exit(1);
        }
        None => {
            eprintln!("Error: No command specified");
            eprintln!("\nUse 'rsdecode --help' for usage information");
            std::process::exit(1);
        }
    }
}

fn read_input(matches: &clap::ArgMatches) -> Result<Vec<u8>> {
    let input = matches
        .get_one::<String>("input")
        .context("Input file is required")?;
    fs::read(input).with_context(|| format!("Failed to read {}", input))
}

fn write_output(matches: &clap::ArgMatches, data: &[u8]) -> Result<()> {
    match matches.get_one::<String>("output") {
        Some(path) => fs::write(path, data).with_context(|| format!("Failed to write {}", path)),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(data).context("Failed to write to stdout")?;
            stdout.flush().context("Failed to flush stdout")
        }
    }
}

fn handle_decode(matches: &clap::ArgMatches) -> Result<()> {
    let config = DecoderConfig::from_args(matches);
    let verbose = config.verbose;
    let sink = Arc::new(QueueSink::new());
    let reporter = Arc::new(ConsoleDecodeReporter::new());
    let decoder = DecodeRsInterleaved::with_config(config)
        .context("Invalid decoder configuration")?
        .with_reporter(reporter.clone())
        .with_sink(sink.clone());

    let input = read_input(matches)?;
    let output = if matches.get_flag("pdu") {
        let records = read_records(&mut Cursor::new(&input)).context("Malformed PDU record file")?;
        for (index, record) in records.into_iter().enumerate() {
            if let Err(err) = decoder.handle_message("in", Message::Pdu(record.into_pdu(index))) {
                log::warn!("record {}: {}", index, err);
            }
        }
        let payloads: Vec<Vec<u8>> = sink.drain().into_iter().map(|(_, pdu)| pdu.data).collect();
        let mut out = Cursor::new(Vec::new());
        write_records(&mut out, &payloads).context("Failed to encode PDU records")?;
        out.into_inner()
    } else if matches.get_flag("parallel") {
        decoder.decode_stream(&input)
    } else {
        run_stream(&decoder, &input)?
    };

    write_output(matches, &output)?;

    let stats = decoder.stats();
    if verbose {
        reporter.report_stats(&stats);
    }
    log::info!("{}", stats);
    if stats.frames_dropped > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Feed a raw stream through the block one forecast-sized chunk at a time
fn run_stream(decoder: &DecodeRsInterleaved, input: &[u8]) -> Result<Vec<u8>> {
    let code = decoder.code();
    let noutput_items = decoder.output_multiple() * 16;
    let mut required = [0usize];
    decoder.forecast(noutput_items, &mut required);

    let mut output = Vec::new();
    let mut buffer = vec![0u8; noutput_items];
    let mut offset = 0;
    while input.len() - offset >= code.frame_len() {
        let available = (input.len() - offset).min(required[0]);
        let status = decoder
            .general_work(
                noutput_items,
                &[available],
                &[&input[offset..offset + available]],
                &mut [&mut buffer[..]],
            )
            .context("Decoder rejected work call")?;
        output.extend_from_slice(&buffer[..status.produced]);
        offset += status.consumed[0];
    }

    if offset < input.len() {
        log::warn!(
            "ignoring {} trailing bytes that do not fill a {} byte frame",
            input.len() - offset,
            code.frame_len()
        );
    }
    Ok(output)
}

fn handle_encode(matches: &clap::ArgMatches) -> Result<()> {
    let config = DecoderConfig::from_args(matches);
    let code = InterleavedCode::from_config(&config).context("Invalid code configuration")?;
    let input = read_input(matches)?;

    let output = if matches.get_flag("pdu") {
        let records = read_records(&mut Cursor::new(&input)).context("Malformed PDU record file")?;
        let frames = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                code.encode_frame(&record.data)
                    .with_context(|| format!("Failed to encode record {}", index))
            })
            .collect::<Result<Vec<_>>>()?;
        let mut out = Cursor::new(Vec::new());
        write_records(&mut out, &frames).context("Failed to encode PDU records")?;
        out.into_inner()
    } else {
        anyhow::ensure!(
            input.len() % code.payload_len() == 0,
            "Input length {} is not a multiple of the {} byte frame payload",
            input.len(),
            code.payload_len()
        );
        let mut frames = Vec::with_capacity(input.len() / code.payload_len() * code.frame_len());
        for payload in input.chunks_exact(code.payload_len()) {
            frames.extend(code.encode_frame(payload)?);
        }
        frames
    };

    write_output(matches, &output)
}
