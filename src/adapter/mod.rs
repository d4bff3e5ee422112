/*
** This file is a part of Iksax (callback facade for streaming XML engines)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use crate::Attributes;
use crate::Engine;
use crate::EngineSink;
use crate::Location;
use crate::ParseError;
use crate::Slot;
use crate::SlotSet;
use crate::Status;
use crate::attributes::pair_attributes;
use crate::error::translate;

pub(crate) type StartElementCallback<'h> = Box<dyn FnMut(&str, &Attributes) + 'h>;
pub(crate) type EndElementCallback<'h> = Box<dyn FnMut(&str) + 'h>;
pub(crate) type CharacterDataCallback<'h> = Box<dyn FnMut(&str) + 'h>;
pub(crate) type ErrorCallback<'h> = Box<dyn FnMut(&ParseError) + 'h>;

/// Application callbacks, one optional entry per event kind.
///
/// The registry is lent to the engine as its event sink during a feed.
#[derive(Default)]
struct Callbacks<'h> {
    start_element: Option<StartElementCallback<'h>>,
    end_element: Option<EndElementCallback<'h>>,
    character_data: Option<CharacterDataCallback<'h>>,
    error: Option<ErrorCallback<'h>>,
}

impl EngineSink for Callbacks<'_> {
    fn start_element(&mut self, name: &str, attributes: &[&str]) {
        if let Some(callback) = self.start_element.as_mut() {
            let attributes = pair_attributes(attributes);
            callback(name, &attributes);
        }
    }

    fn end_element(&mut self, name: &str) {
        if let Some(callback) = self.end_element.as_mut() {
            callback(name);
        }
    }

    fn character_data(&mut self, text: &str) {
        if let Some(callback) = self.character_data.as_mut() {
            callback(text);
        }
    }
}

/// Connects an engine to the application callbacks.
pub(crate) struct Adapter<'h, E: Engine> {
    engine: E,
    callbacks: Callbacks<'h>,
    bound: SlotSet,
}

impl<'h, E: Engine> Adapter<'h, E> {
    pub(crate) fn new(engine: E) -> Self {
        Adapter {
            engine,
            callbacks: Callbacks::default(),
            bound: SlotSet::empty(),
        }
    }

    fn bind(&mut self, slot: Slot) {
        if !self.bound.contains(slot) {
            log::debug!("binding {} handler", slot);
            self.engine.bind(slot);
            self.bound.insert(slot);
        }
    }

    pub(crate) fn set_start_element(&mut self, callback: StartElementCallback<'h>) {
        self.callbacks.start_element = Some(callback);
        self.bind(Slot::StartElement);
    }

    pub(crate) fn set_end_element(&mut self, callback: EndElementCallback<'h>) {
        self.callbacks.end_element = Some(callback);
        self.bind(Slot::EndElement);
    }

    pub(crate) fn set_character_data(&mut self, callback: CharacterDataCallback<'h>) {
        self.callbacks.character_data = Some(callback);
        self.bind(Slot::CharacterData);
    }

    // Errors come from the feed status, no engine slot is involved.
    pub(crate) fn set_error(&mut self, callback: ErrorCallback<'h>) {
        self.callbacks.error = Some(callback);
    }

    pub(crate) fn parse(&mut self, chunk: &[u8], is_final: bool) -> bool {
        log::trace!("feeding {} bytes (final: {})", chunk.len(), is_final);
        match self.engine.feed(&mut self.callbacks, chunk, is_final) {
            Status::Ok => true,
            Status::Error => {
                let error = translate(
                    self.engine.error_code(),
                    self.engine.location(),
                    self.engine.error_detail(),
                );
                match self.callbacks.error.as_mut() {
                    Some(callback) => callback(&error),
                    None => log::debug!("unhandled parse error at {}", error),
                }
                false
            }
        }
    }

    pub(crate) fn reset(&mut self) {
        log::debug!("resetting engine, structural handlers are unbound");
        self.engine.reset();
        self.bound.clear();
    }

    pub(crate) fn location(&self) -> Location {
        self.engine.location()
    }

    pub(crate) fn engine(&self) -> &E {
        &self.engine
    }
}
