/*
** This file is a part of Iksax (callback facade for streaming XML engines)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

//! An engine which replays prepared events instead of tokenizing.

use std::collections::VecDeque;

use super::Engine;
use super::EngineSink;
use super::Location;
use super::Slot;
use super::SlotSet;
use super::Status;
use crate::ErrorCode;

#[derive(Clone, Debug)]
pub(crate) enum Step {
    Start(&'static str, Vec<&'static str>),
    End(&'static str),
    Text(&'static str),
}

#[derive(Default)]
struct Feed {
    steps: Vec<Step>,
    failure: Option<(ErrorCode, Location)>,
}

/// Each `feed()` call consumes the next prepared feed. Once the script runs
/// out, feeds succeed without any events.
#[derive(Default)]
pub(crate) struct ScriptedEngine {
    script: VecDeque<Feed>,
    bound: SlotSet,
    error: Option<(ErrorCode, Location)>,
    pub(crate) binds: Vec<Slot>,
    pub(crate) fed: Vec<(Vec<u8>, bool)>,
    pub(crate) resets: usize,
}

impl ScriptedEngine {
    pub(crate) fn new() -> Self {
        ScriptedEngine::default()
    }

    pub(crate) fn then(mut self, steps: Vec<Step>) -> Self {
        self.script.push_back(Feed {
            steps,
            failure: None,
        });
        self
    }

    pub(crate) fn then_fail(
        mut self,
        steps: Vec<Step>,
        code: ErrorCode,
        line: usize,
        column: usize,
    ) -> Self {
        let location = Location {
            bytes: 0,
            line,
            column,
        };
        self.script.push_back(Feed {
            steps,
            failure: Some((code, location)),
        });
        self
    }

    pub(crate) fn is_bound(&self, slot: Slot) -> bool {
        self.bound.contains(slot)
    }
}

impl Engine for ScriptedEngine {
    fn bind(&mut self, slot: Slot) {
        self.binds.push(slot);
        self.bound.insert(slot);
    }

    fn feed(&mut self, sink: &mut dyn EngineSink, bytes: &[u8], is_final: bool) -> Status {
        self.fed.push((bytes.to_vec(), is_final));
        let feed = self.script.pop_front().unwrap_or_default();
        for step in feed.steps {
            match step {
                Step::Start(name, attributes) => {
                    if self.bound.contains(Slot::StartElement) {
                        sink.start_element(name, &attributes);
                    }
                }
                Step::End(name) => {
                    if self.bound.contains(Slot::EndElement) {
                        sink.end_element(name);
                    }
                }
                Step::Text(text) => {
                    if self.bound.contains(Slot::CharacterData) {
                        sink.character_data(text);
                    }
                }
            }
        }
        match feed.failure {
            Some(failure) => {
                self.error = Some(failure);
                Status::Error
            }
            None => Status::Ok,
        }
    }

    fn location(&self) -> Location {
        match self.error {
            Some((_, location)) => location,
            None => Location::new(),
        }
    }

    fn error_code(&self) -> ErrorCode {
        match self.error {
            Some((code, _)) => code,
            None => ErrorCode::NONE,
        }
    }

    fn reset(&mut self) {
        self.resets += 1;
        self.bound.clear();
        self.error = None;
    }
}
