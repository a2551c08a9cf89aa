//! XML bytes to text, honouring the encoding named in the prolog.
//!
//! POMs in the wild are not always UTF-8: older ones declare
//! `encoding="ISO-8859-1"` and carry Latin-1 developer names.

use std::borrow::Cow;
use std::path::Path;

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use log::warn;

use crate::error::{Error, Result};

/// Read an XML file as text.
pub fn read_xml(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    Ok(decode_xml(&bytes, path).into_owned())
}

/// Decode with the prolog's encoding, UTF-8 when there is none. A byte order
/// mark takes precedence. Undecodable bytes become U+FFFD; whether the
/// result is well-formed is left to the XML parser. `path` is only used in
/// log messages.
pub fn decode_xml<'a>(bytes: &'a [u8], path: &Path) -> Cow<'a, str> {
    let encoding = match declared_encoding(bytes) {
        None => UTF_8,
        Some(label) => match Encoding::for_label(label.as_bytes()) {
            // A prolog readable as ASCII can't be UTF-16 without a BOM.
            Some(e) if e == UTF_16LE || e == UTF_16BE => UTF_8,
            Some(e) => e,
            None => {
                warn!(
                    "{}: unknown encoding '{}', reading as UTF-8",
                    path.display(),
                    label
                );
                UTF_8
            }
        },
    };
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        warn!(
            "{}: malformed {} replaced with U+FFFD",
            path.display(),
            used.name()
        );
    }
    text
}

/// The `encoding` pseudo-attribute of `<?xml ... ?>`, if any.
fn declared_encoding(bytes: &[u8]) -> Option<&str> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let rest = bytes.strip_prefix(b"<?xml")?;
    let end = rest.windows(2).position(|w| w == b"?>")?;
    let prolog = std::str::from_utf8(&rest[..end]).ok()?;

    let after = &prolog[prolog.find("encoding")? + "encoding".len()..];
    let after = after.trim_start().strip_prefix('=')?.trim_start();
    let quote = after.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = &after[1..];
    Some(&value[..value.find(quote)?])
}
