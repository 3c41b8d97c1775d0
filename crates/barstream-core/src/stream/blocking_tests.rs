use std::collections::HashSet;
use std::io::{self, Read, Write};

use serde_json::Value;

use super::*;
use crate::protocol::Block;
use crate::stream::Framing;

/// Sink that fails its `nth` write call (zero-based) and records the rest.
struct FlakySink {
    buf: Vec<u8>,
    writes: usize,
    fail_on: Option<usize>,
}

impl FlakySink {
    const fn failing_on(nth: usize) -> Self {
        Self {
            buf: Vec::new(),
            writes: 0,
            fail_on: Some(nth),
        }
    }
}

impl Write for FlakySink {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let call = self.writes;
        self.writes += 1;
        if self.fail_on == Some(call) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "bar went away"));
        }
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn line(text: &str) -> StatusLine {
    vec![Block::new(text)].into()
}

fn open(options: StreamOptions) -> Stream<Vec<u8>> {
    Stream::with_options(Vec::new(), io::empty(), options, &Header::new(1)).unwrap()
}

fn output(stream: Stream<Vec<u8>>) -> String {
    String::from_utf8(stream.into_parts().0).unwrap()
}

#[test]
fn construction_sends_header_then_opens_array() {
    let stream = open(StreamOptions::default());
    assert_eq!(stream.lines_sent(), 0);
    assert!(!stream.is_closed());
    assert_eq!(output(stream), "{\"version\":1}\n[");
}

#[test]
fn end_to_end_cpu_and_mem() {
    let stream = open(StreamOptions::default());
    stream.send_line(&line("CPU 10%")).unwrap();
    stream
        .send_line(&vec![Block::new("MEM 2G").with_urgent(true)].into())
        .unwrap();
    stream.close().unwrap();

    assert_eq!(stream.lines_sent(), 2);
    assert!(stream.is_closed());
    assert_eq!(
        output(stream),
        concat!(
            "{\"version\":1}\n",
            "[",
            "[{\"full_text\":\"CPU 10%\"}]\n",
            "[{\"full_text\":\"MEM 2G\",\"urgent\":true}]\n",
            "]",
        )
    );
}

#[test]
fn close_writes_exactly_one_bracket() {
    let stream = open(StreamOptions::default());
    for i in 0..5 {
        stream.send_line(&line(&i.to_string())).unwrap();
    }
    stream.close().unwrap();
    let out = output(stream);
    assert!(out.ends_with("\n]"));
    assert_eq!(out.matches(']').count(), 5 + 1);
}

#[test]
fn closed_stream_rejects_further_writes() {
    let stream = open(StreamOptions::default());
    stream.close().unwrap();

    assert!(matches!(stream.send_line(&line("late")), Err(Error::Closed)));
    assert!(matches!(stream.close(), Err(Error::Closed)));
    assert_eq!(stream.lines_sent(), 0);
    assert_eq!(output(stream), "{\"version\":1}\n[]");
}

#[test]
fn header_failure_aborts_construction() {
    let err = Stream::new(FlakySink::failing_on(0), io::empty(), false, &Header::new(1))
        .unwrap_err();
    assert!(matches!(err, Error::SendHeader(_)));
    assert!(err.to_string().starts_with("failed to send header"));
}

#[test]
fn open_bracket_failure_aborts_construction() {
    let err = Stream::new(FlakySink::failing_on(1), io::empty(), false, &Header::new(1))
        .unwrap_err();
    assert!(matches!(err, Error::StartArray(_)));
    assert!(err.to_string().starts_with("failed to start infinite array"));
}

#[test]
fn line_failure_is_reported_and_stream_stays_usable() {
    let stream =
        Stream::new(FlakySink::failing_on(2), io::empty(), false, &Header::new(1)).unwrap();

    let err = stream.send_line(&line("lost")).unwrap_err();
    assert!(matches!(err, Error::SendLine(_)));
    assert!(err.to_string().contains("bar went away"));
    assert_eq!(stream.lines_sent(), 0);

    stream.send_line(&line("kept")).unwrap();
    assert_eq!(stream.lines_sent(), 1);

    let sink = stream.into_parts().0;
    let text = String::from_utf8(sink.buf).unwrap();
    assert_eq!(text, "{\"version\":1}\n[[{\"full_text\":\"kept\"}]\n");
}

#[test]
fn close_failure_leaves_array_open() {
    let stream =
        Stream::new(FlakySink::failing_on(2), io::empty(), false, &Header::new(1)).unwrap();

    let err = stream.close().unwrap_err();
    assert!(matches!(err, Error::CloseArray(_)));
    assert!(!stream.is_closed());

    stream.close().unwrap();
    assert!(stream.is_closed());
}

#[test]
fn comma_framing_produces_a_valid_json_document() {
    let stream = open(StreamOptions::default().with_framing(Framing::Comma));
    for text in ["a", "b", "c"] {
        stream.send_line(&line(text)).unwrap();
    }
    stream.close().unwrap();
    let out = stream.into_parts().0;

    let values: Vec<Value> = serde_json::Deserializer::from_slice(&out)
        .into_iter::<Value>()
        .collect::<std::result::Result<_, _>>()
        .unwrap();
    assert_eq!(values.len(), 2);
    assert_eq!(values[0], serde_json::json!({"version": 1}));
    let lines = values[1].as_array().unwrap();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[2], serde_json::json!([{"full_text": "c"}]));
}

#[test]
fn pretty_output_is_indented() {
    let stream = open(StreamOptions::default().with_pretty(true));
    stream.send_line(&line("a")).unwrap();
    assert_eq!(
        output(stream),
        "{\n    \"version\": 1\n}\n[[\n    {\n        \"full_text\": \"a\"\n    }\n]\n"
    );
}

#[test]
fn source_is_not_read() {
    let input: &[u8] = b"[{\"name\":\"cpu\",\"button\":1}";
    let stream = Stream::new(Vec::new(), input, false, &Header::new(1)).unwrap();
    let remaining = stream.with_source(|source| {
        let mut rest = Vec::new();
        source.read_to_end(&mut rest).unwrap();
        rest
    });
    assert_eq!(remaining, input);
}

#[test]
fn concurrent_lines_are_never_interleaved() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 25;

    let stream = open(StreamOptions::default());
    std::thread::scope(|scope| {
        for t in 0..THREADS {
            let stream = &stream;
            scope.spawn(move || {
                for i in 0..PER_THREAD {
                    let block = Block::new(format!("{t}-{i}")).with_name(format!("worker-{t}"));
                    stream.send_line(&vec![block].into()).unwrap();
                }
            });
        }
    });
    stream.close().unwrap();
    assert_eq!(stream.lines_sent(), (THREADS * PER_THREAD) as u64);

    let out = output(stream);
    let body = out
        .strip_prefix("{\"version\":1}\n[")
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap();

    let mut seen = HashSet::new();
    for raw in body.lines() {
        let parsed: StatusLine = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.len(), 1);
        assert!(seen.insert(parsed.blocks()[0].full_text.clone()));
    }
    assert_eq!(seen.len(), THREADS * PER_THREAD);
}
