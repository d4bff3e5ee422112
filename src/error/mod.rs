/*
** This file is a part of Iksax (callback facade for streaming XML engines)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod code;

pub use code::ErrorCode;

use std::error::Error;
use std::fmt::Display;

use crate::Location;

/// Category of a parse failure.
///
/// Every code an engine can report has its own kind. Codes which are not
/// known to this crate are reported as [ErrorKind::Unknown].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// The engine did not report an error.
    None,
    NoMemory,
    Syntax,
    NoElements,
    InvalidToken,
    UnclosedToken,
    PartialChar,
    TagMismatch,
    DuplicateAttribute,
    JunkAfterDocElement,
    ParamEntityRef,
    UndefinedEntity,
    RecursiveEntityRef,
    AsyncEntity,
    BadCharRef,
    BinaryEntityRef,
    AttributeExternalEntityRef,
    MisplacedXmlPi,
    UnknownEncoding,
    IncorrectEncoding,
    UnclosedCdataSection,
    ExternalEntityHandling,
    NotStandalone,
    UnexpectedState,
    EntityDeclaredInPe,
    FeatureRequiresXmlDtd,
    CantChangeFeatureOnceParsing,
    UnboundPrefix,
    UndeclaringPrefix,
    IncompletePe,
    XmlDecl,
    TextDecl,
    Publicid,
    Suspended,
    NotSuspended,
    Aborted,
    Finished,
    SuspendPe,
    ReservedPrefixXml,
    ReservedPrefixXmlns,
    ReservedNamespaceUri,
    /// The engine reported a code which has no known meaning.
    Unknown,
}

impl ErrorKind {
    /// Maps an engine error code to its kind.
    pub fn from_code(code: ErrorCode) -> ErrorKind {
        match code {
            ErrorCode::NONE => ErrorKind::None,
            ErrorCode::NO_MEMORY => ErrorKind::NoMemory,
            ErrorCode::SYNTAX => ErrorKind::Syntax,
            ErrorCode::NO_ELEMENTS => ErrorKind::NoElements,
            ErrorCode::INVALID_TOKEN => ErrorKind::InvalidToken,
            ErrorCode::UNCLOSED_TOKEN => ErrorKind::UnclosedToken,
            ErrorCode::PARTIAL_CHAR => ErrorKind::PartialChar,
            ErrorCode::TAG_MISMATCH => ErrorKind::TagMismatch,
            ErrorCode::DUPLICATE_ATTRIBUTE => ErrorKind::DuplicateAttribute,
            ErrorCode::JUNK_AFTER_DOC_ELEMENT => ErrorKind::JunkAfterDocElement,
            ErrorCode::PARAM_ENTITY_REF => ErrorKind::ParamEntityRef,
            ErrorCode::UNDEFINED_ENTITY => ErrorKind::UndefinedEntity,
            ErrorCode::RECURSIVE_ENTITY_REF => ErrorKind::RecursiveEntityRef,
            ErrorCode::ASYNC_ENTITY => ErrorKind::AsyncEntity,
            ErrorCode::BAD_CHAR_REF => ErrorKind::BadCharRef,
            ErrorCode::BINARY_ENTITY_REF => ErrorKind::BinaryEntityRef,
            ErrorCode::ATTRIBUTE_EXTERNAL_ENTITY_REF => ErrorKind::AttributeExternalEntityRef,
            ErrorCode::MISPLACED_XML_PI => ErrorKind::MisplacedXmlPi,
            ErrorCode::UNKNOWN_ENCODING => ErrorKind::UnknownEncoding,
            ErrorCode::INCORRECT_ENCODING => ErrorKind::IncorrectEncoding,
            ErrorCode::UNCLOSED_CDATA_SECTION => ErrorKind::UnclosedCdataSection,
            ErrorCode::EXTERNAL_ENTITY_HANDLING => ErrorKind::ExternalEntityHandling,
            ErrorCode::NOT_STANDALONE => ErrorKind::NotStandalone,
            ErrorCode::UNEXPECTED_STATE => ErrorKind::UnexpectedState,
            ErrorCode::ENTITY_DECLARED_IN_PE => ErrorKind::EntityDeclaredInPe,
            ErrorCode::FEATURE_REQUIRES_XML_DTD => ErrorKind::FeatureRequiresXmlDtd,
            ErrorCode::CANT_CHANGE_FEATURE_ONCE_PARSING => ErrorKind::CantChangeFeatureOnceParsing,
            ErrorCode::UNBOUND_PREFIX => ErrorKind::UnboundPrefix,
            ErrorCode::UNDECLARING_PREFIX => ErrorKind::UndeclaringPrefix,
            ErrorCode::INCOMPLETE_PE => ErrorKind::IncompletePe,
            ErrorCode::XML_DECL => ErrorKind::XmlDecl,
            ErrorCode::TEXT_DECL => ErrorKind::TextDecl,
            ErrorCode::PUBLICID => ErrorKind::Publicid,
            ErrorCode::SUSPENDED => ErrorKind::Suspended,
            ErrorCode::NOT_SUSPENDED => ErrorKind::NotSuspended,
            ErrorCode::ABORTED => ErrorKind::Aborted,
            ErrorCode::FINISHED => ErrorKind::Finished,
            ErrorCode::SUSPEND_PE => ErrorKind::SuspendPe,
            ErrorCode::RESERVED_PREFIX_XML => ErrorKind::ReservedPrefixXml,
            ErrorCode::RESERVED_PREFIX_XMLNS => ErrorKind::ReservedPrefixXmlns,
            ErrorCode::RESERVED_NAMESPACE_URI => ErrorKind::ReservedNamespaceUri,
            _ => ErrorKind::Unknown,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ErrorKind::None => "no error",
            ErrorKind::NoMemory => "out of memory",
            ErrorKind::Syntax => "syntax error",
            ErrorKind::NoElements => "no element found",
            ErrorKind::InvalidToken => "not well-formed (invalid token)",
            ErrorKind::UnclosedToken => "unclosed token",
            ErrorKind::PartialChar => "partial character",
            ErrorKind::TagMismatch => "mismatched tag",
            ErrorKind::DuplicateAttribute => "duplicate attribute",
            ErrorKind::JunkAfterDocElement => "junk after document element",
            ErrorKind::ParamEntityRef => "illegal parameter entity reference",
            ErrorKind::UndefinedEntity => "undefined entity",
            ErrorKind::RecursiveEntityRef => "recursive entity reference",
            ErrorKind::AsyncEntity => "asynchronous entity",
            ErrorKind::BadCharRef => "reference to invalid character number",
            ErrorKind::BinaryEntityRef => "reference to binary entity",
            ErrorKind::AttributeExternalEntityRef => "reference to external entity in attribute",
            ErrorKind::MisplacedXmlPi => "XML or text declaration not at start of entity",
            ErrorKind::UnknownEncoding => "unknown encoding",
            ErrorKind::IncorrectEncoding => "encoding specified in XML declaration is incorrect",
            ErrorKind::UnclosedCdataSection => "unclosed CDATA section",
            ErrorKind::ExternalEntityHandling => "error in processing external entity reference",
            ErrorKind::NotStandalone => "document is not standalone",
            ErrorKind::UnexpectedState => "unexpected parser state",
            ErrorKind::EntityDeclaredInPe => "entity declared in parameter entity",
            ErrorKind::FeatureRequiresXmlDtd => "requested feature requires DTD support",
            ErrorKind::CantChangeFeatureOnceParsing => {
                "cannot change setting once parsing has begun"
            }
            ErrorKind::UnboundPrefix => "unbound prefix",
            ErrorKind::UndeclaringPrefix => "must not undeclare prefix",
            ErrorKind::IncompletePe => "incomplete markup in parameter entity",
            ErrorKind::XmlDecl => "XML declaration not well-formed",
            ErrorKind::TextDecl => "text declaration not well-formed",
            ErrorKind::Publicid => "illegal character(s) in public id",
            ErrorKind::Suspended => "parser suspended",
            ErrorKind::NotSuspended => "parser not suspended",
            ErrorKind::Aborted => "parsing aborted",
            ErrorKind::Finished => "parsing finished",
            ErrorKind::SuspendPe => "cannot suspend in external parameter entity",
            ErrorKind::ReservedPrefixXml => {
                "reserved prefix (xml) must not be undeclared or bound to another namespace name"
            }
            ErrorKind::ReservedPrefixXmlns => {
                "reserved prefix (xmlns) must not be declared or undeclared"
            }
            ErrorKind::ReservedNamespaceUri => {
                "prefix must not be bound to one of the reserved namespace names"
            }
            ErrorKind::Unknown => "unknown error",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Details of a failed parse.
///
/// This is a snapshot taken when the engine reported the failure and is
/// given to the [on_error()](crate::Parser::on_error) callback.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseError {
    /// Category of the failure.
    pub kind: ErrorKind,
    /// Line of the failure, starting from 1.
    pub line: usize,
    /// Byte column of the failure, starting from 0.
    pub column: usize,
    /// Human readable description.
    pub message: String,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}, column {}: {}",
            self.line, self.column, self.message
        )
    }
}

impl Error for ParseError {}

/// Builds the error record for the given engine state.
///
/// The engine's own detail message is preferred over the generic
/// description of the error kind.
pub fn translate(code: ErrorCode, location: Location, detail: Option<&str>) -> ParseError {
    let kind = ErrorKind::from_code(code);
    if kind == ErrorKind::Unknown {
        log::warn!("unrecognized {} at {}", code, location);
    }
    let message = match detail {
        Some(detail) => detail.to_string(),
        None => kind.description().to_string(),
    };
    ParseError {
        kind,
        line: location.line,
        column: location.column,
        message,
    }
}
