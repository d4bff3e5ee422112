/*
** This file is a part of Iksax (callback facade for streaming XML engines)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

/// # Must not compile tests
///
/// A callback cannot parse with its own parser:
/// ```compile_fail
/// use iksax::Parser;
/// let mut parser = Parser::new();
/// parser.on_end_element(|_| {
///     parser.parse(b"<again/>", true);
/// });
/// parser.parse(b"<a/>", true);
/// ```
///
/// A callback cannot reset its own parser:
/// ```compile_fail
/// use iksax::Parser;
/// let mut parser = Parser::new();
/// parser.on_start_element(|_, _| parser.reset());
/// parser.parse(b"<a/>", true);
/// ```
///
/// Attributes cannot outlive the start tag callback:
/// ```compile_fail
/// use iksax::Attributes;
/// use iksax::Parser;
/// let mut saved: Option<&Attributes> = None;
/// let mut parser = Parser::new();
/// parser.on_start_element(|_, attributes| saved = Some(attributes));
/// parser.parse(b"<a b='c'/>", true);
/// ```
///
/// Callback state must outlive the parser:
/// ```compile_fail
/// use std::cell::Cell;
/// use iksax::Parser;
/// let mut parser = Parser::new();
/// {
///     let count = Cell::new(0);
///     parser.on_end_element(|_| count.set(count.get() + 1));
/// }
/// parser.parse(b"<a/>", true);
/// ```
///
#[cfg(doctest)]
struct MustNotCompileTests;
