/*
** This file is a part of Iksax (callback facade for streaming XML engines)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

//! Callback based facade over a push style streaming XML engine.
//!
//! Register closures on a [Parser] for start tags, end tags, character
//! data, and errors, then feed the document in as many chunks as you
//! like. Parsing is done by an [Engine], the default one is built on
//! top of the `quick-xml` crate.

mod adapter;
mod attributes;
mod engine;
mod error;
mod parser;

pub use attributes::Attributes;
pub use attributes::pair_attributes;

pub use engine::Engine;
pub use engine::EngineSink;
pub use engine::Location;
pub use engine::QuickXmlEngine;
pub use engine::Slot;
pub use engine::SlotSet;
pub use engine::Status;

pub use error::ErrorCode;
pub use error::ErrorKind;
pub use error::ParseError;
pub use error::translate;

pub use parser::Parser;
