//! Flat text form of a record, used for keyword search.
//!
//! The text is a single-line JSON dump with `", "` between items and `": "`
//! after keys, lowercased. Keywords are matched against keys and values
//! alike, including any separators between them.

use super::Record;
use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use std::io;

/// Compact formatter with a space after every `,` and `:`.
#[derive(Debug, Clone, Copy, Default)]
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Single-line JSON text of `value` with `", "` and `": "` separators.
pub fn spaced_json<T>(value: &T) -> String
where
    T: ?Sized + Serialize,
{
    let mut buf = Vec::with_capacity(128);
    let mut serializer = Serializer::with_formatter(&mut buf, SpacedFormatter);
    // Writing JSON values into a Vec cannot fail: map keys are strings and
    // the sink is infallible.
    if value.serialize(&mut serializer).is_err() {
        return String::new();
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Lowercase single-line dump of `record`.
pub fn search_text(record: &Record) -> String {
    spaced_json(record).to_lowercase()
}
