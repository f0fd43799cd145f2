//! Printable and writable payloads.
//!
//! The producer of a value picks its representation up front: JSON for
//! structured data, an XML tree for encoded queries, or raw text (which may or
//! may not hold an XML document).

use super::{pretty_xml, reindent_xml};
use crate::error::Result;
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};
use xmltree::Element;

/// Notice printed for falsy payloads.
pub const EMPTY_NOTICE: &str = "Empty";

#[derive(Debug, Clone)]
pub enum Payload {
    Json(Value),
    Xml(Element),
    Text(String),
}

impl Payload {
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Payload::Json(serde_json::to_value(value)?))
    }

    /// Decode a byte payload as UTF-8 text.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Ok(Payload::Text(String::from_utf8(bytes)?))
    }

    /// Whether the payload counts as empty: null, false, zero, empty string,
    /// array or object, or empty text. An XML tree is never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Payload::Json(value) => is_falsy(value),
            Payload::Xml(_) => false,
            Payload::Text(text) => text.is_empty(),
        }
    }

    /// Print to `out`.
    ///
    /// An empty payload first prints [`EMPTY_NOTICE`] and then still goes
    /// through its regular branch, so e.g. `{}` prints the notice followed by
    /// `{}`.
    pub fn print_to<W: Write>(&self, out: &mut W) -> Result<()> {
        match self {
            Payload::Json(value) => print_json(value, out),
            Payload::Xml(element) => {
                writeln!(out, "{}", pretty_xml(element)?)?;
                Ok(())
            }
            Payload::Text(text) => {
                if text.is_empty() {
                    writeln!(out, "{}", EMPTY_NOTICE)?;
                }
                writeln!(out, "{}", xml_or_text(text))?;
                Ok(())
            }
        }
    }

    pub fn pretty_print(&self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        self.print_to(&mut lock)
    }

    /// Render the file contents [`write_file`](Payload::write_file) produces.
    pub fn to_file_contents(&self) -> Result<String> {
        Ok(match self {
            Payload::Json(value) => serde_json::to_string_pretty(value)?,
            Payload::Xml(element) => pretty_xml(element)?,
            Payload::Text(text) => xml_or_text(text),
        })
    }

    /// Write to `output`, creating the parent directory if needed.
    ///
    /// The path is split on its last `/`; a non-empty prefix other than `.`
    /// is created recursively. Existing files are overwritten.
    pub fn write_file(&self, output: &str) -> Result<()> {
        if let Some((dirpath, _)) = output.rsplit_once('/') {
            if !dirpath.is_empty() && dirpath != "." && !Path::new(dirpath).exists() {
                std::fs::create_dir_all(dirpath)?;
            }
        }
        std::fs::write(output, self.to_file_contents()?)?;
        info!(path = output, "wrote payload");
        Ok(())
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Json(value)
    }
}

impl From<Element> for Payload {
    fn from(element: Element) -> Self {
        Payload::Xml(element)
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn print_json<W: Write>(value: &Value, out: &mut W) -> Result<()> {
    if is_falsy(value) {
        writeln!(out, "{}", EMPTY_NOTICE)?;
    }
    match value {
        Value::Object(_) => writeln!(out, "{}", serde_json::to_string_pretty(value)?)?,
        Value::Array(items) => {
            for item in items {
                print_json(item, out)?;
            }
        }
        Value::String(text) => writeln!(out, "{}", xml_or_text(text))?,
        other => writeln!(out, "{}", other)?,
    }
    Ok(())
}

/// Pretty XML when `text` parses as XML, the text unchanged otherwise.
fn xml_or_text(text: &str) -> String {
    reindent_xml(text).unwrap_or_else(|| {
        debug!("payload is not XML, using raw text");
        text.to_string()
    })
}
