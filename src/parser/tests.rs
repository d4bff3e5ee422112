/*
** This file is a part of Iksax (callback facade for streaming XML engines)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::cell::RefCell;

use super::*;
use crate::ErrorCode;
use crate::ErrorKind;
use crate::engine::scripted::ScriptedEngine;
use crate::engine::scripted::Step;

#[derive(Debug, Eq, PartialEq)]
enum Seen {
    Start(String, Attributes),
    End(String),
    Text(String),
    Error(ErrorKind, usize, usize),
}

fn start(name: &str, attributes: &[(&str, &str)]) -> Seen {
    Seen::Start(
        name.to_string(),
        attributes
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

fn end(name: &str) -> Seen {
    Seen::End(name.to_string())
}

fn text(s: &str) -> Seen {
    Seen::Text(s.to_string())
}

fn register_structural<'h, E: Engine>(parser: &mut Parser<'h, E>, seen: &'h RefCell<Vec<Seen>>) {
    parser.on_start_element(move |name, attributes| {
        seen.borrow_mut()
            .push(Seen::Start(name.to_string(), attributes.clone()))
    });
    parser.on_end_element(move |name| seen.borrow_mut().push(end(name)));
    // Fragments are joined to make the checks independent of chunking.
    parser.on_character_data(move |s| {
        let mut seen = seen.borrow_mut();
        if let Some(Seen::Text(last)) = seen.last_mut() {
            last.push_str(s);
        } else {
            seen.push(text(s));
        }
    });
}

fn register_all<'h, E: Engine>(parser: &mut Parser<'h, E>, seen: &'h RefCell<Vec<Seen>>) {
    register_structural(parser, seen);
    parser.on_error(move |error| {
        seen.borrow_mut()
            .push(Seen::Error(error.kind, error.line, error.column))
    });
}

#[test]
fn empty_element() {
    let seen = RefCell::new(Vec::new());
    let mut parser = Parser::new();
    register_all(&mut parser, &seen);
    assert!(parser.parse(b"<a/>", true));
    assert_eq!(*seen.borrow(), vec![start("a", &[]), end("a")]);
}

#[test]
fn attributes_and_text() {
    let seen = RefCell::new(Vec::new());
    let mut parser = Parser::new();
    register_all(&mut parser, &seen);
    assert!(parser.parse(b"<a x=\"1\" y=\"2\">text</a>", true));
    assert_eq!(
        *seen.borrow(),
        vec![
            start("a", &[("x", "1"), ("y", "2")]),
            text("text"),
            end("a")
        ]
    );
}

#[test]
fn split_document() {
    let whole = RefCell::new(Vec::new());
    let mut parser = Parser::new();
    register_all(&mut parser, &whole);
    assert!(parser.parse(b"<a></a>", true));

    let split = RefCell::new(Vec::new());
    let mut parser = Parser::new();
    register_all(&mut parser, &split);
    assert!(parser.parse(b"<a>", false));
    assert!(parser.parse(b"</a>", true));

    assert_eq!(*split.borrow(), *whole.borrow());
    assert_eq!(*split.borrow(), vec![start("a", &[]), end("a")]);
}

#[test]
fn text_split_from_end_tag() {
    let seen = RefCell::new(Vec::new());
    let mut parser = Parser::new();
    register_all(&mut parser, &seen);
    assert!(parser.parse(b"<a>", false));
    assert!(parser.parse(b"text</a>", true));
    assert_eq!(*seen.borrow(), vec![start("a", &[]), text("text"), end("a")]);
}

#[test]
fn duplicate_attributes_last_wins() {
    let seen = RefCell::new(Vec::new());
    let engine = ScriptedEngine::new().then(vec![
        Step::Start("a", vec!["x", "1", "x", "2"]),
        Step::End("a"),
    ]);
    let mut parser = Parser::with_engine(engine);
    register_all(&mut parser, &seen);
    assert!(parser.parse(b"<a x=\"1\" x=\"2\"/>", true));
    assert_eq!(*seen.borrow(), vec![start("a", &[("x", "2")]), end("a")]);
}

#[test]
fn incomplete_document() {
    let seen = RefCell::new(Vec::new());
    let mut parser = Parser::new();
    register_all(&mut parser, &seen);
    assert!(!parser.parse(b"<a>", true));
    assert_eq!(
        *seen.borrow(),
        vec![start("a", &[]), Seen::Error(ErrorKind::UnclosedToken, 1, 3)]
    );
    assert_eq!(parser.location().line, 1);
    assert_eq!(parser.location().column, 3);
}

#[test]
fn incomplete_document_scripted() {
    let seen = RefCell::new(Vec::new());
    let engine = ScriptedEngine::new().then_fail(
        vec![Step::Start("a", vec![])],
        ErrorCode::UNCLOSED_TOKEN,
        1,
        3,
    );
    let mut parser = Parser::with_engine(engine);
    register_all(&mut parser, &seen);
    assert!(!parser.parse(b"<a>", true));
    assert_eq!(
        *seen.borrow(),
        vec![start("a", &[]), Seen::Error(ErrorKind::UnclosedToken, 1, 3)]
    );
}

#[test]
fn error_without_callback() {
    let seen = RefCell::new(Vec::new());
    let mut parser = Parser::new();
    register_structural(&mut parser, &seen);
    assert!(!parser.parse(b"<a></b>", true));
    assert_eq!(*seen.borrow(), vec![start("a", &[])]);
}

#[test]
fn reset_unbinds_structural_callbacks() {
    let seen = RefCell::new(Vec::new());
    let mut parser = Parser::new();
    register_all(&mut parser, &seen);
    assert!(parser.parse(b"<a>x</a>", true));
    seen.borrow_mut().clear();

    parser.reset();
    assert!(parser.parse(b"<b y='1'>text</b>", true));
    assert!(seen.borrow().is_empty());

    // error callback is still there
    parser.reset();
    assert!(!parser.parse(b"<c>", true));
    assert_eq!(
        *seen.borrow(),
        vec![Seen::Error(ErrorKind::UnclosedToken, 1, 3)]
    );
    seen.borrow_mut().clear();

    parser.reset();
    register_structural(&mut parser, &seen);
    assert!(parser.parse(b"<d/>", true));
    assert_eq!(*seen.borrow(), vec![start("d", &[]), end("d")]);
}

#[test]
fn reset_unbinds_scripted() {
    let seen = RefCell::new(Vec::new());
    let engine = ScriptedEngine::new()
        .then(vec![Step::Start("a", vec![]), Step::End("a")])
        .then(vec![Step::Start("b", vec![]), Step::Text("t"), Step::End("b")])
        .then_fail(vec![], ErrorCode::SYNTAX, 2, 5);
    let mut parser = Parser::with_engine(engine);
    register_all(&mut parser, &seen);
    assert!(parser.parse(b"<a/>", true));

    parser.reset();
    assert_eq!(parser.engine().resets, 1);
    assert!(!parser.engine().is_bound(crate::Slot::StartElement));
    assert!(parser.parse(b"<b>t</b>", true));
    assert!(!parser.parse(b"lala", true));
    assert_eq!(
        *seen.borrow(),
        vec![
            start("a", &[]),
            end("a"),
            Seen::Error(ErrorKind::Syntax, 2, 5)
        ]
    );
}

#[test]
fn replaces_callbacks() {
    let first = RefCell::new(Vec::new());
    let second = RefCell::new(Vec::new());
    let mut parser = Parser::new();
    parser.on_end_element(|name| first.borrow_mut().push(name.to_string()));
    parser.on_end_element(|name| second.borrow_mut().push(name.to_string()));
    assert!(parser.parse(b"<a><b/></a>", true));
    assert!(first.borrow().is_empty());
    assert_eq!(*second.borrow(), vec!["b", "a"]);
}

#[test]
fn document_order() {
    let seen = RefCell::new(Vec::new());
    let mut parser = Parser::new();
    register_all(&mut parser, &seen);
    let xml = "<?xml version='1.0'?>\n<doc>\n <item id='1'>one</item>\n <item id='2'/>\n</doc>\n";
    for chunk in xml.as_bytes().chunks(5) {
        assert!(parser.parse(chunk, false));
    }
    assert!(parser.parse(b"", true));
    assert_eq!(
        *seen.borrow(),
        vec![
            start("doc", &[]),
            text("\n "),
            start("item", &[("id", "1")]),
            text("one"),
            end("item"),
            text("\n "),
            start("item", &[("id", "2")]),
            end("item"),
            text("\n"),
            end("doc"),
        ]
    );
}

#[test]
fn failed_parse_is_final() {
    let seen = RefCell::new(Vec::new());
    let mut parser = Parser::new();
    register_all(&mut parser, &seen);
    assert!(!parser.parse(b"<a></b>", false));
    assert!(!parser.parse(b"</a>", true));
    assert_eq!(
        *seen.borrow(),
        vec![
            start("a", &[]),
            Seen::Error(ErrorKind::TagMismatch, 1, 3),
            Seen::Error(ErrorKind::TagMismatch, 1, 3),
        ]
    );
}
