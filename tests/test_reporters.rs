//! Tests for the decode reporters and verbose reporting

use rsinterleave::block::{Block, Pdu};
use rsinterleave::decoder::{CodewordStatus, DecodeRsInterleaved, DecodeStats, PORT_IN};
use rsinterleave::reed_solomon::RsError;
use rsinterleave::reporters::{
    ConsoleDecodeReporter, DecodeReporter, LogDecodeReporter, SilentDecodeReporter,
};
use std::sync::{Arc, Mutex};

/// Reporter that records every call for inspection
#[derive(Default)]
struct RecordingReporter {
    events: Mutex<Vec<String>>,
}

impl RecordingReporter {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl DecodeReporter for RecordingReporter {
    fn report_codeword(&self, frame: u64, codeword: usize, status: &CodewordStatus) {
        let event = match status {
            CodewordStatus::Corrected(n) => format!("{}:{} corrected {}", frame, codeword, n),
            CodewordStatus::Failed(_) => format!("{}:{} failed", frame, codeword),
        };
        self.events.lock().unwrap().push(event);
    }

    fn report_frame_dropped(&self, frame: u64, failed: usize, total: usize) {
        self.events
            .lock()
            .unwrap()
            .push(format!("{} dropped {}/{}", frame, failed, total));
    }

    fn report_error(&self, error: &str) {
        self.events.lock().unwrap().push(format!("error {}", error));
    }

    fn report_stats(&self, stats: &DecodeStats) {
        self.events.lock().unwrap().push(stats.to_string());
    }
}

#[test]
fn test_builtin_reporters_accept_all_events() {
    let reporters: Vec<Box<dyn DecodeReporter>> = vec![
        Box::new(SilentDecodeReporter::new()),
        Box::new(ConsoleDecodeReporter::new()),
        Box::new(LogDecodeReporter::new()),
    ];
    for reporter in &reporters {
        reporter.report_codeword(0, 0, &CodewordStatus::Corrected(3));
        reporter.report_codeword(0, 1, &CodewordStatus::Failed(RsError::CorrectionFailed));
        reporter.report_frame_dropped(0, 1, 2);
        reporter.report_error("frame too short");
        reporter.report_stats(&DecodeStats::default());
    }
}

#[test]
fn test_verbose_reports_every_codeword() {
    let reporter = Arc::new(RecordingReporter::default());
    let decoder = DecodeRsInterleaved::new(true, 8, 2)
        .unwrap()
        .with_reporter(reporter.clone());
    let code = decoder.code();

    let mut good = code.encode_frame(&vec![1u8; 446]).unwrap();
    good[0] ^= 0x80;
    good[2] ^= 0x80;
    good[5] ^= 0x80;
    decoder.handle_message(PORT_IN, Pdu::new(good).into()).unwrap();

    let mut bad = code.encode_frame(&vec![2u8; 446]).unwrap();
    for k in 0..20 {
        bad[1 + 2 * (k * 12)] ^= 0x11;
    }
    decoder.handle_message(PORT_IN, Pdu::new(bad).into()).unwrap();

    assert_eq!(
        reporter.events(),
        vec![
            "0:0 corrected 2".to_string(),
            "0:1 corrected 1".to_string(),
            "1:0 corrected 0".to_string(),
            "1:1 failed".to_string(),
            "1 dropped 1/2".to_string(),
        ]
    );
}

#[test]
fn test_quiet_decoder_does_not_report() {
    let reporter = Arc::new(RecordingReporter::default());
    let decoder = DecodeRsInterleaved::new(false, 8, 1)
        .unwrap()
        .with_reporter(reporter.clone());
    let frame = decoder.code().encode_frame(&[0u8; 223]).unwrap();
    decoder.handle_message(PORT_IN, Pdu::new(frame).into()).unwrap();
    let _ = decoder.handle_message(PORT_IN, Pdu::new(vec![0; 10]).into());

    assert!(reporter.events().is_empty());
}

#[test]
fn test_verbose_reports_rejected_pdu() {
    let reporter = Arc::new(RecordingReporter::default());
    let decoder = DecodeRsInterleaved::new(true, 8, 4)
        .unwrap()
        .with_reporter(reporter.clone());

    assert!(decoder
        .handle_message(PORT_IN, Pdu::new(vec![0; 1021]).into())
        .is_err());
    let events = reporter.events();
    assert_eq!(events.len(), 1);
    assert!(events[0].starts_with("error "));
}
