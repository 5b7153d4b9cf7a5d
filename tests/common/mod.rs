//! Capturing sinks and hooks shared by the integration tests.
#![allow(dead_code)]

use reqlog::{Error, FatalHook, LogRecord, Output};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::Value;
use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Keeps every encoded line in memory.
#[derive(Clone, Default)]
pub struct Capture {
    lines: Arc<Mutex<Vec<String>>>,
    flushes: Arc<Mutex<usize>>,
}

impl Capture {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn flushes(&self) -> usize {
        *self.flushes.lock().unwrap()
    }
}

impl Output for Capture {
    fn write(&self, record: &LogRecord<'_>) -> Result<(), Error> {
        let line = record.to_json_line()?;
        self.lines.lock().unwrap().push(line);
        Ok(())
    }

    fn flush(&self) -> Result<(), Error> {
        *self.flushes.lock().unwrap() += 1;
        Ok(())
    }
}

/// `Write` over a shared buffer, for capturing what the terminal sink prints.
#[derive(Clone, Default)]
pub struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Records escalations instead of exiting or panicking.
#[derive(Clone, Default)]
pub struct RecordingHook {
    events: Arc<Mutex<Vec<(&'static str, String)>>>,
}

impl RecordingHook {
    pub fn events(&self) -> Vec<(&'static str, String)> {
        self.events.lock().unwrap().clone()
    }
}

impl FatalHook for RecordingHook {
    fn fatal(&self, message: &str) {
        self.events.lock().unwrap().push(("fatal", message.to_string()));
    }

    fn panic(&self, message: &str) {
        self.events.lock().unwrap().push(("panic", message.to_string()));
    }
}

/// Top-level entries of one JSON line, in document order, duplicates included.
pub fn entries(line: &str) -> Vec<(String, Value)> {
    struct Entries(Vec<(String, Value)>);
    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = Entries;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a JSON object")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Entries, A::Error> {
            let mut entries = Vec::new();
            while let Some(entry) = map.next_entry::<String, Value>()? {
                entries.push(entry);
            }
            Ok(Entries(entries))
        }
    }

    impl<'de> Deserialize<'de> for Entries {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_map(EntriesVisitor)
        }
    }

    serde_json::from_str::<Entries>(line).unwrap().0
}

pub fn keys(line: &str) -> Vec<String> {
    entries(line).into_iter().map(|(k, _)| k).collect()
}

pub fn value(line: &str, key: &str) -> Option<Value> {
    entries(line)
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}
