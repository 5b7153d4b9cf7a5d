//! JSON line encoding shared by every built-in sink.
//!
//! Written by hand instead of through a map so that key order is fixed and repeated user
//! keys survive in the order they were added.

use super::LogRecord;
use chrono::SecondsFormat;
use serde::Serialize;

const TIMESTAMP_KEY: &str = "timestamp";
const LEVEL_KEY: &str = "level";
const CALLER_KEY: &str = "caller";
const MESSAGE_KEY: &str = "msg";

impl LogRecord<'_> {
    /// Renders `{"timestamp":..,"level":..,"caller":..,"msg":..,<fields>}` without a
    /// trailing newline.
    ///
    /// # Errors
    /// Returns `Error::Format` when a field value cannot be serialized.
    pub fn to_json_line(&self) -> Result<String, crate::Error> {
        let mut buf = Vec::with_capacity(96 + self.message.len() + self.fields.len() * 24);

        buf.push(b'{');
        write_pair(
            &mut buf,
            TIMESTAMP_KEY,
            &self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        )?;
        buf.push(b',');
        write_pair(&mut buf, LEVEL_KEY, self.level.as_capital())?;
        if let Some(caller) = self.caller {
            buf.push(b',');
            write_pair(
                &mut buf,
                CALLER_KEY,
                &format!("{}:{}", caller.file(), caller.line()),
            )?;
        }
        buf.push(b',');
        write_pair(&mut buf, MESSAGE_KEY, self.message)?;
        for (key, value) in self.fields {
            buf.push(b',');
            write_pair(&mut buf, key, value)?;
        }
        buf.push(b'}');

        String::from_utf8(buf).map_err(|e| crate::Error::Format(e.to_string()))
    }
}

fn write_pair<V: Serialize + ?Sized>(
    buf: &mut Vec<u8>,
    key: &str,
    value: &V,
) -> Result<(), crate::Error> {
    serde_json::to_writer(&mut *buf, key)?;
    buf.push(b':');
    serde_json::to_writer(&mut *buf, value)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::level::Level;
    use crate::output::{Field, LogRecord};
    use chrono::{Local, TimeZone};
    use serde_json::json;

    fn record<'a>(message: &'a str, fields: &'a [Field]) -> LogRecord<'a> {
        LogRecord {
            level: Level::Warn,
            timestamp: Local.with_ymd_and_hms(2024, 3, 9, 8, 5, 7).unwrap(),
            caller: None,
            message,
            fields,
        }
    }

    #[test]
    fn fixed_keys_come_first_in_order() {
        let line = record("hello", &[]).to_json_line().unwrap();
        let ts = line.find("\"timestamp\"").unwrap();
        let level = line.find("\"level\":\"WARN\"").unwrap();
        let msg = line.find("\"msg\":\"hello\"").unwrap();
        assert!(ts < level && level < msg);
        assert!(line.ends_with('}'));
    }

    #[test]
    fn timestamp_has_millis_and_offset() {
        let line = record("x", &[]).to_json_line().unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        let ts = value["timestamp"].as_str().unwrap();
        assert!(ts.starts_with("2024-03-09T08:05:07.000"));
        assert!(ts.ends_with('Z') || ts[23..].starts_with(['+', '-']));
    }

    #[test]
    fn repeated_keys_are_kept_in_order() {
        let fields = vec![
            ("k".to_string(), json!(1)),
            ("k".to_string(), json!("two")),
        ];
        let line = record("dup", &fields).to_json_line().unwrap();
        assert!(line.ends_with(r#""msg":"dup","k":1,"k":"two"}"#));
    }

    #[test]
    fn strings_are_escaped() {
        let line = record("quote \" and \n newline", &[]).to_json_line().unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["msg"], "quote \" and \n newline");
    }
}
