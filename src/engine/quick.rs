/*
** This file is a part of Iksax (callback facade for streaming XML engines)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::borrow::Cow;

use quick_xml::errors::Error as XmlError;
use quick_xml::errors::SyntaxError;
use quick_xml::escape::EscapeError;
use quick_xml::escape::unescape;
use quick_xml::events::BytesDecl;
use quick_xml::events::BytesRef;
use quick_xml::events::BytesStart;
use quick_xml::events::Event;
use quick_xml::events::attributes::AttrError;
use quick_xml::reader::Reader;

use super::Engine;
use super::EngineSink;
use super::Location;
use super::Slot;
use super::SlotSet;
use super::Status;
use crate::ErrorCode;

macro_rules! whitespace {
    () => {
        b' ' | b'\t' | b'\r' | b'\n'
    };
}

const BOM: &[u8] = b"\xef\xbb\xbf";

fn is_whitespace(text: &str) -> bool {
    text.bytes().all(|c| matches!(c, whitespace!()))
}

fn is_valid_xml_char(c: u32) -> bool {
    matches!(c, 0x09 | 0x0a | 0x0d | 0x20..=0xd7ff | 0xe000..=0xfffd | 0x10000..=0x10ffff)
}

fn is_supported_encoding(name: &[u8]) -> bool {
    name.eq_ignore_ascii_case(b"utf-8")
        || name.eq_ignore_ascii_case(b"utf8")
        || name.eq_ignore_ascii_case(b"us-ascii")
}

/// Position and code of an error found while scanning the pending input.
struct Failure {
    code: ErrorCode,
    offset: usize,
    detail: Option<String>,
}

impl Failure {
    fn new(code: ErrorCode, offset: usize) -> Failure {
        Failure {
            code,
            offset,
            detail: None,
        }
    }

    fn with_detail(mut self, detail: String) -> Failure {
        self.detail = Some(detail);
        self
    }

    fn from_reader(err: XmlError, offset: usize) -> Failure {
        let code = match &err {
            XmlError::Syntax(SyntaxError::UnclosedCData) => ErrorCode::UNCLOSED_CDATA_SECTION,
            XmlError::Syntax(SyntaxError::InvalidBangMarkup) => ErrorCode::SYNTAX,
            XmlError::Syntax(_) => ErrorCode::UNCLOSED_TOKEN,
            XmlError::InvalidAttr(AttrError::Duplicated(..)) => ErrorCode::DUPLICATE_ATTRIBUTE,
            _ => ErrorCode::INVALID_TOKEN,
        };
        Failure::new(code, offset).with_detail(err.to_string())
    }

    fn from_attribute(err: AttrError, offset: usize) -> Failure {
        let code = match err {
            AttrError::Duplicated(..) => ErrorCode::DUPLICATE_ATTRIBUTE,
            _ => ErrorCode::INVALID_TOKEN,
        };
        Failure::new(code, offset).with_detail(err.to_string())
    }

    fn from_escape(err: EscapeError, offset: usize) -> Failure {
        let code = match err {
            EscapeError::UnrecognizedEntity(..) => ErrorCode::UNDEFINED_ENTITY,
            EscapeError::InvalidCharRef(..) => ErrorCode::BAD_CHAR_REF,
            _ => ErrorCode::INVALID_TOKEN,
        };
        Failure::new(code, offset).with_detail(err.to_string())
    }
}

fn decode(bytes: &[u8], offset: usize) -> Result<&str, Failure> {
    std::str::from_utf8(bytes).map_err(|_| Failure::new(ErrorCode::INVALID_TOKEN, offset))
}

fn resolve_char_ref(reference: &str) -> Option<char> {
    let (digits, radix) = match reference.strip_prefix('x') {
        Some(hex) => (hex, 16),
        None => (reference, 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let value = u32::from_str_radix(digits, radix).ok()?;
    if !is_valid_xml_char(value) {
        return None;
    }
    char::from_u32(value)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    Parsing,
    Finished,
    Failed,
}

/// An [Engine] built on the [quick_xml] pull reader.
///
/// Input is buffered until it contains complete markup, so chunks can be
/// split at any byte. Only the predefined entities and character
/// references are resolved, references to entities declared in a
/// document type definition are reported as undefined.
///
/// # Examples
///
/// ```
/// use iksax::{Engine, EngineSink, QuickXmlEngine, Slot, Status};
///
/// struct Printer;
/// impl EngineSink for Printer {
///     fn start_element(&mut self, name: &str, attributes: &[&str]) {
///         println!("<{}> {:?}", name, attributes);
///     }
///     fn end_element(&mut self, name: &str) {
///         println!("</{}>", name);
///     }
///     fn character_data(&mut self, text: &str) {
///         println!("{:?}", text);
///     }
/// }
///
/// let mut engine = QuickXmlEngine::new();
/// engine.bind(Slot::StartElement);
/// assert_eq!(engine.feed(&mut Printer, b"<doc a='1'>", false), Status::Ok);
/// assert_eq!(engine.feed(&mut Printer, b"</doc>", true), Status::Ok);
/// ```
pub struct QuickXmlEngine {
    bound: SlotSet,
    state: State,
    pending: Vec<u8>,
    location: Location,
    stack: Vec<String>,
    seen_content: bool,
    seen_root: bool,
    error: ErrorCode,
    error_location: Location,
    error_detail: Option<String>,
}

impl QuickXmlEngine {
    pub fn new() -> QuickXmlEngine {
        QuickXmlEngine {
            bound: SlotSet::empty(),
            state: State::Parsing,
            pending: Vec::new(),
            location: Location::new(),
            stack: Vec::new(),
            seen_content: false,
            seen_root: false,
            error: ErrorCode::NONE,
            error_location: Location::new(),
            error_detail: None,
        }
    }

    fn fail(&mut self, failure: Failure, input: &[u8]) {
        let mut location = self.location;
        location.advance_over(&input[..failure.offset.min(input.len())]);
        self.state = State::Failed;
        self.error = failure.code;
        self.error_location = location;
        self.error_detail = failure.detail;
    }

    // Returns how many bytes of the input are fully processed.
    fn scan(
        &mut self,
        sink: &mut dyn EngineSink,
        input: &[u8],
        is_final: bool,
    ) -> Result<usize, Failure> {
        // Markup can only be complete up to the last '>', the rest waits
        // for more input.
        let window = if is_final {
            input
        } else {
            match input.iter().rposition(|&c| c == b'>') {
                Some(end) => &input[..=end],
                None => return Ok(0),
            }
        };

        // A fresh reader drops a leading byte order mark, which is only
        // valid at the very start of the document.
        let mut base = 0;
        if self.location.bytes > 0 && window.starts_with(BOM) {
            self.character_data(sink, BOM, 0, false)?;
            self.seen_content = true;
            base = BOM.len();
        }

        let mut reader = Reader::from_reader(&window[base..]);
        reader.config_mut().trim_text(false);
        reader.config_mut().check_end_names = false;
        reader.config_mut().allow_unmatched_ends = true;
        reader.config_mut().expand_empty_elements = false;

        let mut committed = base;
        loop {
            let start = base + reader.buffer_position() as usize;
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(XmlError::Syntax(_)) if !is_final => return Ok(committed),
                Err(err) => return Err(Failure::from_reader(err, start)),
            };
            match event {
                Event::Start(e) => self.start_element(sink, &e, start, false)?,
                Event::Empty(e) => self.start_element(sink, &e, start, true)?,
                Event::End(e) => {
                    let qname = e.name();
                    self.end_element(sink, qname.as_ref(), start)?;
                }
                Event::Text(e) => self.character_data(sink, &e, start, false)?,
                Event::CData(e) => self.character_data(sink, &e, start, true)?,
                Event::GeneralRef(e) => self.reference(sink, &e, start)?,
                Event::Decl(e) => self.declaration(&e, start)?,
                Event::Eof => break,
                _ => (),
            }
            self.seen_content = true;
            committed = base + reader.buffer_position() as usize;
        }

        if is_final {
            self.finish(window.len())?;
        }
        Ok(window.len())
    }

    fn start_element(
        &mut self,
        sink: &mut dyn EngineSink,
        tag: &BytesStart,
        offset: usize,
        is_empty: bool,
    ) -> Result<(), Failure> {
        if self.stack.is_empty() && self.seen_root {
            return Err(Failure::new(ErrorCode::JUNK_AFTER_DOC_ELEMENT, offset));
        }
        let qname = tag.name();
        let name = decode(qname.as_ref(), offset)?;

        let mut flat: Vec<String> = Vec::new();
        for attribute in tag.attributes() {
            let attribute = attribute.map_err(|err| Failure::from_attribute(err, offset))?;
            flat.push(decode(attribute.key.as_ref(), offset)?.to_string());
            let raw = decode(&attribute.value, offset)?;
            flat.push(attribute_value(raw, offset)?);
        }
        self.seen_root = true;

        if self.bound.contains(Slot::StartElement) {
            let attributes: Vec<&str> = flat.iter().map(String::as_str).collect();
            sink.start_element(name, &attributes);
        }
        if is_empty {
            if self.bound.contains(Slot::EndElement) {
                sink.end_element(name);
            }
        } else {
            self.stack.push(name.to_string());
        }
        Ok(())
    }

    fn end_element(
        &mut self,
        sink: &mut dyn EngineSink,
        raw_name: &[u8],
        offset: usize,
    ) -> Result<(), Failure> {
        let name = decode(raw_name, offset)?;
        match self.stack.pop() {
            Some(open) if open == name => {
                if self.bound.contains(Slot::EndElement) {
                    sink.end_element(name);
                }
                Ok(())
            }
            Some(open) => Err(Failure::new(ErrorCode::TAG_MISMATCH, offset)
                .with_detail(format!("mismatched tag: expected </{}>, found </{}>", open, name))),
            None if self.seen_root => Err(Failure::new(ErrorCode::JUNK_AFTER_DOC_ELEMENT, offset)),
            None => Err(Failure::new(ErrorCode::INVALID_TOKEN, offset)),
        }
    }

    fn character_data(
        &mut self,
        sink: &mut dyn EngineSink,
        bytes: &[u8],
        offset: usize,
        is_cdata: bool,
    ) -> Result<(), Failure> {
        let text = decode(bytes, offset)?;
        if self.stack.is_empty() {
            if !is_cdata && is_whitespace(text) {
                return Ok(());
            }
            return Err(self.outside_root(offset));
        }
        if !text.is_empty() && self.bound.contains(Slot::CharacterData) {
            sink.character_data(text);
        }
        Ok(())
    }

    fn reference(
        &mut self,
        sink: &mut dyn EngineSink,
        reference: &BytesRef,
        offset: usize,
    ) -> Result<(), Failure> {
        if self.stack.is_empty() {
            return Err(self.outside_root(offset));
        }
        let name = reference
            .decode()
            .map_err(|_| Failure::new(ErrorCode::INVALID_TOKEN, offset))?;
        let mut buf = [0u8; 4];
        let text: &str = match name.as_ref() {
            "lt" => "<",
            "gt" => ">",
            "amp" => "&",
            "apos" => "'",
            "quot" => "\"",
            other => match other.strip_prefix('#') {
                Some(number) => match resolve_char_ref(number) {
                    Some(c) => c.encode_utf8(&mut buf),
                    None => return Err(Failure::new(ErrorCode::BAD_CHAR_REF, offset)),
                },
                None => {
                    return Err(Failure::new(ErrorCode::UNDEFINED_ENTITY, offset)
                        .with_detail(format!("undefined entity: &{};", other)));
                }
            },
        };
        if self.bound.contains(Slot::CharacterData) {
            sink.character_data(text);
        }
        Ok(())
    }

    fn declaration(&mut self, decl: &BytesDecl, offset: usize) -> Result<(), Failure> {
        if self.seen_content {
            return Err(Failure::new(ErrorCode::MISPLACED_XML_PI, offset));
        }
        match decl.encoding() {
            Some(Ok(encoding)) if !is_supported_encoding(&encoding) => {
                Err(Failure::new(ErrorCode::UNKNOWN_ENCODING, offset))
            }
            Some(Err(_)) => Err(Failure::new(ErrorCode::XML_DECL, offset)),
            _ => Ok(()),
        }
    }

    fn finish(&self, end: usize) -> Result<(), Failure> {
        if let Some(open) = self.stack.last() {
            return Err(Failure::new(ErrorCode::UNCLOSED_TOKEN, end)
                .with_detail(format!("unclosed token: <{}> is not closed", open)));
        }
        if !self.seen_root {
            return Err(Failure::new(ErrorCode::NO_ELEMENTS, end));
        }
        Ok(())
    }

    fn outside_root(&self, offset: usize) -> Failure {
        if self.seen_root {
            Failure::new(ErrorCode::JUNK_AFTER_DOC_ELEMENT, offset)
        } else {
            Failure::new(ErrorCode::SYNTAX, offset)
        }
    }
}

// Literal whitespace in attribute values is normalized to spaces before
// references are expanded.
fn attribute_value(raw: &str, offset: usize) -> Result<String, Failure> {
    let normalized: Cow<str> = if raw.bytes().any(|c| matches!(c, b'\t' | b'\r' | b'\n')) {
        Cow::Owned(raw.replace(['\t', '\r', '\n'], " "))
    } else {
        Cow::Borrowed(raw)
    };
    let value = unescape(&normalized).map_err(|err| Failure::from_escape(err, offset))?;
    Ok(value.into_owned())
}

impl Default for QuickXmlEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for QuickXmlEngine {
    fn bind(&mut self, slot: Slot) {
        self.bound.insert(slot);
    }

    fn feed(&mut self, sink: &mut dyn EngineSink, bytes: &[u8], is_final: bool) -> Status {
        match self.state {
            State::Parsing => (),
            State::Finished => {
                self.state = State::Failed;
                self.error = ErrorCode::FINISHED;
                self.error_location = self.location;
                self.error_detail = None;
                return Status::Error;
            }
            State::Failed => return Status::Error,
        }

        let mut input = std::mem::take(&mut self.pending);
        input.extend_from_slice(bytes);
        let status = match self.scan(sink, &input, is_final) {
            Ok(committed) => {
                self.location.advance_over(&input[..committed]);
                input.drain(..committed);
                if is_final {
                    self.state = State::Finished;
                }
                Status::Ok
            }
            Err(failure) => {
                self.fail(failure, &input);
                Status::Error
            }
        };
        self.pending = input;
        status
    }

    fn location(&self) -> Location {
        match self.state {
            State::Failed => self.error_location,
            _ => self.location,
        }
    }

    fn error_code(&self) -> ErrorCode {
        self.error
    }

    fn error_detail(&self) -> Option<&str> {
        self.error_detail.as_deref()
    }

    fn reset(&mut self) {
        self.bound.clear();
        self.state = State::Parsing;
        self.pending.clear();
        self.location = Location::new();
        self.stack.clear();
        self.seen_content = false;
        self.seen_root = false;
        self.error = ErrorCode::NONE;
        self.error_location = Location::new();
        self.error_detail = None;
    }
}
