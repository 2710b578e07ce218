//! XML envelope codec
//!
//! Request shape:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <request>
//!   <user>..</user><auth>..</auth><command>..</command><clTRID>..</clTRID>
//!   <data>..</data>
//! </request>
//! ```
//!
//! Payload mapping: a scalar becomes a text leaf (`Null` an empty leaf), a
//! mapping becomes a branch, and a list becomes one sibling element per item,
//! all named after the list's key. A list item that is not a mapping is
//! written as a leaf holding its text form.
//!
//! Decoding is the mirror image with one deliberate asymmetry: repeated
//! sibling tags are collected into a list, but a tag that occurs once decodes
//! to a bare value. A one-item list therefore does not survive a round trip;
//! readers should use [`Value::items`].

use std::fmt::Display;
use std::mem;

use indexmap::map::Entry;
use indexmap::IndexMap;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use regwapi_core::{RequestEnvelope, WireCodec};
use regwapi_domain::{Response, Result, Value, ValueMap, WapiError, WireFormat};
use tracing::warn;

const RESPONSE_TAG: &str = "response";

/// Codec for the `/xml` endpoint
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlCodec;

impl XmlCodec {
    pub fn new() -> Self {
        Self
    }
}

impl WireCodec for XmlCodec {
    fn format(&self) -> WireFormat {
        WireFormat::Xml
    }

    fn encode(&self, envelope: &RequestEnvelope) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(encode_error)?;
        writer.write_event(Event::Start(BytesStart::new("request"))).map_err(encode_error)?;

        write_element(&mut writer, "user", &Value::from(envelope.user.as_str()))?;
        write_element(&mut writer, "auth", &Value::from(envelope.auth.as_str()))?;
        write_element(&mut writer, "command", &Value::from(envelope.command.as_str()))?;
        write_element(&mut writer, "clTRID", &Value::from(envelope.cl_trid.as_str()))?;
        if let Some(data) = &envelope.data {
            write_data(&mut writer, data)?;
        }

        writer.write_event(Event::End(BytesEnd::new("request"))).map_err(encode_error)?;
        String::from_utf8(writer.into_inner()).map_err(encode_error)
    }

    fn decode(&self, body: &str) -> Response {
        match parse_document(body) {
            Ok(root) => response_from(&root),
            Err(detail) => {
                warn!(error = %detail, "xml_response_unparsable");
                Response::parse_failure(detail)
            }
        }
    }
}

fn encode_error(err: impl Display) -> WapiError {
    WapiError::Request(format!("failed to encode XML request: {err}"))
}

/* -------------------------------------------------------------------------- */
/* Encoding */
/* -------------------------------------------------------------------------- */

fn write_element(writer: &mut Writer<Vec<u8>>, tag: &str, value: &Value) -> Result<()> {
    match value {
        Value::Map(map) => write_branch(writer, tag, map),
        // One sibling per item; only mapping items nest, anything else is a leaf.
        Value::List(items) => items.iter().try_for_each(|item| match item {
            Value::Map(map) => write_branch(writer, tag, map),
            other => write_leaf(writer, tag, &other.to_text()),
        }),
        scalar => write_leaf(writer, tag, &scalar.to_text()),
    }
}

/// The payload root is always a single `<data>` element.
fn write_data(writer: &mut Writer<Vec<u8>>, data: &Value) -> Result<()> {
    match data {
        Value::List(_) => write_leaf(writer, "data", &data.to_text()),
        other => write_element(writer, "data", other),
    }
}

fn write_branch(writer: &mut Writer<Vec<u8>>, tag: &str, map: &ValueMap) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag))).map_err(encode_error)?;
    for (key, child) in map {
        write_element(writer, key, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag))).map_err(encode_error)?;
    Ok(())
}

fn write_leaf(writer: &mut Writer<Vec<u8>>, tag: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag))).map_err(encode_error)?;
    if !text.is_empty() {
        writer.write_event(Event::Text(BytesText::new(text))).map_err(encode_error)?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag))).map_err(encode_error)?;
    Ok(())
}

/* -------------------------------------------------------------------------- */
/* Decoding */
/* -------------------------------------------------------------------------- */

/// Attribute-free element tree, the only shape the protocol uses
#[derive(Debug, Default)]
struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn named(name: &[u8]) -> Self {
        Self { name: String::from_utf8_lossy(name).into_owned(), ..Default::default() }
    }

    fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    fn child_text(&self, name: &str) -> Option<String> {
        self.child(name).map(|c| c.text.trim().to_string())
    }
}

fn parse_document(body: &str) -> std::result::Result<Element, String> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            format!("XML parse error at position {}: {e}", reader.buffer_position())
        })?;
        match event {
            Event::Start(start) => stack.push(Element::named(start.name().as_ref())),
            Event::Empty(start) => {
                attach(&mut stack, &mut root, Element::named(start.name().as_ref()))?
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| format!("invalid XML text: {e}"))?;
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&text);
                }
            }
            Event::CData(cdata) => {
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&String::from_utf8_lossy(&cdata.into_inner()));
                }
            }
            Event::End(_) => {
                let closed = stack.pop().ok_or_else(|| "unexpected closing tag".to_string())?;
                attach(&mut stack, &mut root, closed)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(format!("unexpected end of document inside <{}>", open.name));
    }
    root.ok_or_else(|| "document has no root element".to_string())
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> std::result::Result<(), String> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(format!("unexpected second root element <{}>", element.name)),
    }
    Ok(())
}

/// Sibling group during decode: one value until a second sibling shares the tag.
enum Slot {
    One(Value),
    Many(Vec<Value>),
}

impl Slot {
    fn push(self, value: Value) -> Self {
        match self {
            Slot::One(first) => Slot::Many(vec![first, value]),
            Slot::Many(mut items) => {
                items.push(value);
                Slot::Many(items)
            }
        }
    }

    fn finish(self) -> Value {
        match self {
            Slot::One(value) => value,
            Slot::Many(items) => Value::List(items),
        }
    }
}

fn element_value(element: &Element) -> Value {
    if element.children.is_empty() {
        return leaf_value(&element.text);
    }

    let mut slots: IndexMap<String, Slot> = IndexMap::new();
    for child in &element.children {
        let value = element_value(child);
        match slots.entry(child.name.clone()) {
            Entry::Vacant(vacant) => {
                vacant.insert(Slot::One(value));
            }
            Entry::Occupied(mut occupied) => {
                let slot = occupied.get_mut();
                *slot = mem::replace(slot, Slot::Many(Vec::new())).push(value);
            }
        }
    }

    Value::Map(slots.into_iter().map(|(name, slot)| (name, slot.finish())).collect())
}

/// Trimmed text; unsigned digit runs become integers.
fn leaf_value(text: &str) -> Value {
    let trimmed = text.trim();
    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(number) = trimmed.parse::<i64>() {
            return Value::Int(number);
        }
    }
    Value::Str(trimmed.to_string())
}

fn response_from(root: &Element) -> Response {
    let body = if root.name == RESPONSE_TAG {
        root
    } else {
        root.child(RESPONSE_TAG).unwrap_or(root)
    };

    let Some(code) = body.child_text("code").filter(|c| !c.is_empty()) else {
        warn!(root = %root.name, "xml_response_without_code");
        return Response::parse_failure("response has no <code> element");
    };

    let data = match body.child("data") {
        Some(data) if data.children.is_empty() && data.text.trim().is_empty() => Value::Null,
        Some(data) => element_value(data),
        None => Value::Null,
    };

    Response {
        code,
        result: body.child_text("result").unwrap_or_default(),
        data,
        command: body.child_text("command"),
        cl_trid: body.child_text("clTRID"),
        sv_trid: body.child_text("svTRID"),
        timestamp: body.child_text("timestamp"),
    }
}
