/*
** This file is a part of Iksax (callback facade for streaming XML engines)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod nocompile;

use crate::Attributes;
use crate::Engine;
use crate::Location;
use crate::ParseError;
use crate::QuickXmlEngine;
use crate::adapter::Adapter;

/// Callback based streaming XML parser.
///
/// This struct drives an XML [Engine] and invokes the registered
/// callbacks for each start tag, end tag, and piece of character data
/// as the input bytes are parsed.
///
/// All callbacks are invoked synchronously from inside
/// [parse()](Parser::parse), in document order. A callback cannot call
/// back into its own parser; the borrow checker rejects such code.
///
/// # Examples
///
/// Typical usage:
/// ```
/// use std::cell::RefCell;
/// use iksax::Parser;
///
/// let names = RefCell::new(Vec::new());
/// let mut parser = Parser::new();
/// parser.on_start_element(|name, attributes| {
///     names.borrow_mut().push(format!("{} {:?}", name, attributes));
/// });
/// parser.on_error(|error| {
///     println!("syntax error at {}", error);
/// });
///
/// assert!(parser.parse(b"<doc lang='en'>example</doc>", true));
/// assert_eq!(*names.borrow(), vec![r#"doc {"lang": "en"}"#]);
/// ```
///
/// Alternatively you can pass the input in multiple blocks:
/// ```
/// # use iksax::Parser;
/// # use std::io::Read;
/// # let mut parser = Parser::new();
/// # let binding = vec!(b'<', b'a', b'/', b'>');
/// # let mut xml_file = binding.as_slice();
/// let mut buffer = [0u8; 1024];
/// loop {
///     let len = xml_file.read(&mut buffer).expect("io error");
///     if len == 0 {
///         break;
///     }
///     if !parser.parse(&buffer[0..len], false) {
///         return;
///     }
/// }
/// // This is to check if there is any incomplete XML construct at the end
/// assert!(parser.parse(b"", true));
/// ```
///
/// # Reuse
///
/// [reset()](Parser::reset) prepares the parser for a new document.
/// It unbinds the start tag, end tag, and character data callbacks from
/// the engine, so they have to be registered again. The error callback
/// stays in effect:
/// ```
/// use std::cell::Cell;
/// use iksax::Parser;
///
/// let tags = Cell::new(0);
/// let errors = Cell::new(0);
/// let mut parser = Parser::new();
/// parser.on_error(|_| errors.set(errors.get() + 1));
///
/// parser.on_end_element(|_| tags.set(tags.get() + 1));
/// assert!(parser.parse(b"<a/>", true));
///
/// parser.reset();
/// assert!(parser.parse(b"<b/>", true));
/// assert_eq!(tags.get(), 1);
///
/// parser.reset();
/// parser.on_end_element(|_| tags.set(tags.get() + 1));
/// assert!(!parser.parse(b"<c>", true));
/// assert_eq!(errors.get(), 1);
/// ```
pub struct Parser<'h, E: Engine = QuickXmlEngine> {
    adapter: Adapter<'h, E>,
}

impl<'h> Parser<'h> {
    /// Creates a new parser using the [QuickXmlEngine].
    ///
    /// The instance can be reused for multiple documents with the
    /// [reset()](Parser::reset) method.
    pub fn new() -> Parser<'h> {
        Parser::with_engine(QuickXmlEngine::new())
    }
}

impl Default for Parser<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'h, E: Engine> Parser<'h, E> {
    /// Creates a new parser using the given engine.
    pub fn with_engine(engine: E) -> Parser<'h, E> {
        Parser {
            adapter: Adapter::new(engine),
        }
    }

    /// Sets the callback for start tags and empty element tags.
    ///
    /// The callback gets the tag name and its attributes. Replaces any
    /// previously set start tag callback.
    pub fn on_start_element<F>(&mut self, callback: F)
    where
        F: FnMut(&str, &Attributes) + 'h,
    {
        self.adapter.set_start_element(Box::new(callback));
    }

    /// Sets the callback for end tags.
    ///
    /// Empty element tags invoke this callback right after the start
    /// tag callback.
    pub fn on_end_element<F>(&mut self, callback: F)
    where
        F: FnMut(&str) + 'h,
    {
        self.adapter.set_end_element(Box::new(callback));
    }

    /// Sets the callback for character data.
    ///
    /// Note that you might get this callback several times with
    /// different parts of a single continuous block of text. Parts are
    /// passed as they come from the engine, concatenate them yourself if
    /// you need the whole text.
    pub fn on_character_data<F>(&mut self, callback: F)
    where
        F: FnMut(&str) + 'h,
    {
        self.adapter.set_character_data(Box::new(callback));
    }

    /// Sets the callback for parse failures.
    ///
    /// Unlike the other callbacks, this one survives a
    /// [reset()](Parser::reset).
    pub fn on_error<F>(&mut self, callback: F)
    where
        F: FnMut(&ParseError) + 'h,
    {
        self.adapter.set_error(Box::new(callback));
    }

    /// Parses the given XML bytes.
    ///
    /// Input can be passed in any number of chunks, split at any byte.
    /// The last chunk, which can be empty, must have `is_final` set so
    /// that incomplete documents are detected.
    ///
    /// Returns false if the document is not well-formed. The error
    /// callback is invoked once before returning. The document should
    /// be abandoned after a failure, call [reset()](Parser::reset)
    /// before parsing another one.
    pub fn parse(&mut self, chunk: &[u8], is_final: bool) -> bool {
        self.adapter.parse(chunk, is_final)
    }

    /// Resets the parser into a clean state for a new document.
    ///
    /// Start tag, end tag, and character data callbacks must be set
    /// again after this call, otherwise their events are not reported.
    pub fn reset(&mut self) {
        self.adapter.reset();
    }

    /// Returns the current position in the input.
    ///
    /// After a failed [parse()](Parser::parse) this is the location of
    /// the error.
    pub fn location(&self) -> Location {
        self.adapter.location()
    }

    /// Returns the engine driven by this parser.
    ///
    /// The engine can be inspected, for example to get the detailed
    /// error code after a failure, but not fed directly.
    pub fn engine(&self) -> &E {
        self.adapter.engine()
    }
}

#[cfg(test)]
mod tests;
