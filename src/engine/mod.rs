/*
** This file is a part of Iksax (callback facade for streaming XML engines)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod location;
mod quick;

#[cfg(test)]
pub(crate) mod scripted;

pub use location::Location;
pub use quick::QuickXmlEngine;

use crate::ErrorCode;

/// One of the engine handler positions a dispatcher can be bound to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Slot {
    StartElement,
    EndElement,
    CharacterData,
}

impl Slot {
    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Slot::StartElement => write!(f, "start element"),
            Slot::EndElement => write!(f, "end element"),
            Slot::CharacterData => write!(f, "character data"),
        }
    }
}

/// A set of bound handler slots.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SlotSet(u8);

impl SlotSet {
    pub const fn empty() -> SlotSet {
        SlotSet(0)
    }

    pub fn contains(&self, slot: Slot) -> bool {
        self.0 & slot.bit() != 0
    }

    pub fn insert(&mut self, slot: Slot) {
        self.0 |= slot.bit();
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Result of feeding a chunk into an engine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    Ok,
    Error,
}

/// Receiver of the structural events produced by an engine.
///
/// The engine calls these methods synchronously from inside
/// [feed()](Engine::feed), in document order, and only for the slots
/// which are currently bound.
pub trait EngineSink {
    /// A start tag was parsed.
    ///
    /// The attributes are given as a flat list alternating between names
    /// and values.
    fn start_element(&mut self, name: &str, attributes: &[&str]);

    fn end_element(&mut self, name: &str);

    /// A fragment of character data.
    ///
    /// A single continuous block of text can arrive in any number of
    /// fragments.
    fn character_data(&mut self, text: &str);
}

/// A push based streaming XML tokenizer.
///
/// Engines are driven by the [Parser](crate::Parser) facade and never
/// used reentrantly: no method is called while a `feed()` is running.
pub trait Engine {
    /// Starts delivering events of the given kind to the sink.
    ///
    /// Binding an already bound slot has no effect.
    fn bind(&mut self, slot: Slot);

    /// Consumes the given bytes and reports the resulting events to the sink.
    ///
    /// The final chunk must be passed with `is_final` set, so that the
    /// engine can check the document is complete.
    fn feed(&mut self, sink: &mut dyn EngineSink, bytes: &[u8], is_final: bool) -> Status;

    /// Current position in the input, or the error position after a failure.
    fn location(&self) -> Location;

    /// Code of the last error, [ErrorCode::NONE] if there was none.
    fn error_code(&self) -> ErrorCode;

    /// Engine specific description of the last error.
    fn error_detail(&self) -> Option<&str> {
        None
    }

    /// Reinitializes the engine for a new document.
    ///
    /// This unbinds every slot.
    fn reset(&mut self);
}
