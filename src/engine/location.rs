/*
** This file is a part of Iksax (callback facade for streaming XML engines)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::fmt::Display;

/// Where an engine is in the document it is fed.
///
/// Engines advance it over the input they have fully processed, so
/// bytes held back for an incomplete tag are not counted yet. Once a
/// feed fails it stays at the start of the offending construct, or at
/// the end of the input for an unfinished document.
///
/// Lines start from one, columns start from zero and count bytes after
/// the last newline character.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Location {
    /// Bytes processed since the start of the document.
    pub bytes: usize,
    /// Line number, starting from 1.
    pub line: usize,
    /// Bytes processed since the last newline.
    pub column: usize,
}

impl Location {
    /// Start of a document, the state of a fresh or reset engine.
    pub fn new() -> Self {
        Location {
            bytes: 0,
            line: 1,
            column: 0,
        }
    }

    pub(crate) fn advance(&mut self, c: u8) {
        self.bytes += 1;
        if c == b'\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }

    // Multi byte characters count one column per byte.
    pub(crate) fn advance_over(&mut self, bytes: &[u8]) {
        for &c in bytes {
            self.advance(c);
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Location::new()
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "byte: {}, line: {}, column: {}",
            self.bytes, self.line, self.column
        )
    }
}
