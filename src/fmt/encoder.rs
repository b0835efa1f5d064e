//! Every core of a logger shares one encoder, so a record reads the same in
//! the debug file, the error file, and on the console.

use crate::output::Record;
use serde::{Deserialize, Serialize};
use std::panic::Location;

/// `YYYY-MM-DD HH:MM:SS.mmm`
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Line layout written by the encoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Tab-separated `time  LEVEL  caller  message`.
    #[default]
    Console,
    /// One JSON object per line.
    Json,
}

#[derive(Debug, Clone, Default)]
pub struct Encoder {
    encoding: Encoding,
}

#[derive(Serialize)]
struct JsonLine<'a> {
    level: &'static str,
    ts: String,
    caller: String,
    msg: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    stacktrace: Option<&'a str>,
}

impl Encoder {
    #[must_use]
    pub const fn new(encoding: Encoding) -> Self {
        Self { encoding }
    }

    #[must_use]
    pub const fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Renders one record as a newline-terminated line. A stack trace, when
    /// attached, follows the line on its own lines.
    ///
    /// # Errors
    /// JSON serialization failures.
    pub fn encode(&self, record: &Record) -> Result<String, crate::Error> {
        match self.encoding {
            Encoding::Console => Ok(Self::encode_console(record)),
            Encoding::Json => Self::encode_json(record),
        }
    }

    fn encode_console(record: &Record) -> String {
        let mut line = format!(
            "{}\t{}\t{}\t{}\n",
            record.time.format(TIME_FORMAT),
            record.level.as_capital_str(),
            short_caller(record.caller),
            record.message,
        );
        if let Some(trace) = record.stacktrace.as_deref() {
            line.push_str(trace.trim_end());
            line.push('\n');
        }
        line
    }

    fn encode_json(record: &Record) -> Result<String, crate::Error> {
        let entry = JsonLine {
            level: record.level.as_capital_str(),
            ts: record.time.format(TIME_FORMAT).to_string(),
            caller: short_caller(record.caller),
            msg: &record.message,
            stacktrace: record.stacktrace.as_deref(),
        };
        let mut line = serde_json::to_string(&entry)?;
        line.push('\n');
        Ok(line)
    }
}

/// `dir/file.rs:line`: the file name plus its parent directory.
#[must_use]
pub fn short_caller(location: &Location<'_>) -> String {
    let file = location.file();
    let mut seps = file.rmatch_indices(['/', '\\']);
    let short = match (seps.next(), seps.next()) {
        (Some(_), Some((idx, _))) => &file[idx + 1..],
        _ => file,
    };
    format!("{short}:{}", location.line())
}
