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

/// Raw error code reported by an engine.
///
/// Known codes have named constants. Engines are free to report other
/// values, which are translated to [ErrorKind::Unknown](crate::ErrorKind::Unknown).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ErrorCode(pub u32);

impl ErrorCode {
    pub const NONE: ErrorCode = ErrorCode(0);
    pub const NO_MEMORY: ErrorCode = ErrorCode(1);
    pub const SYNTAX: ErrorCode = ErrorCode(2);
    pub const NO_ELEMENTS: ErrorCode = ErrorCode(3);
    pub const INVALID_TOKEN: ErrorCode = ErrorCode(4);
    pub const UNCLOSED_TOKEN: ErrorCode = ErrorCode(5);
    pub const PARTIAL_CHAR: ErrorCode = ErrorCode(6);
    pub const TAG_MISMATCH: ErrorCode = ErrorCode(7);
    pub const DUPLICATE_ATTRIBUTE: ErrorCode = ErrorCode(8);
    pub const JUNK_AFTER_DOC_ELEMENT: ErrorCode = ErrorCode(9);
    pub const PARAM_ENTITY_REF: ErrorCode = ErrorCode(10);
    pub const UNDEFINED_ENTITY: ErrorCode = ErrorCode(11);
    pub const RECURSIVE_ENTITY_REF: ErrorCode = ErrorCode(12);
    pub const ASYNC_ENTITY: ErrorCode = ErrorCode(13);
    pub const BAD_CHAR_REF: ErrorCode = ErrorCode(14);
    pub const BINARY_ENTITY_REF: ErrorCode = ErrorCode(15);
    pub const ATTRIBUTE_EXTERNAL_ENTITY_REF: ErrorCode = ErrorCode(16);
    pub const MISPLACED_XML_PI: ErrorCode = ErrorCode(17);
    pub const UNKNOWN_ENCODING: ErrorCode = ErrorCode(18);
    pub const INCORRECT_ENCODING: ErrorCode = ErrorCode(19);
    pub const UNCLOSED_CDATA_SECTION: ErrorCode = ErrorCode(20);
    pub const EXTERNAL_ENTITY_HANDLING: ErrorCode = ErrorCode(21);
    pub const NOT_STANDALONE: ErrorCode = ErrorCode(22);
    pub const UNEXPECTED_STATE: ErrorCode = ErrorCode(23);
    pub const ENTITY_DECLARED_IN_PE: ErrorCode = ErrorCode(24);
    pub const FEATURE_REQUIRES_XML_DTD: ErrorCode = ErrorCode(25);
    pub const CANT_CHANGE_FEATURE_ONCE_PARSING: ErrorCode = ErrorCode(26);
    pub const UNBOUND_PREFIX: ErrorCode = ErrorCode(27);
    pub const UNDECLARING_PREFIX: ErrorCode = ErrorCode(28);
    pub const INCOMPLETE_PE: ErrorCode = ErrorCode(29);
    pub const XML_DECL: ErrorCode = ErrorCode(30);
    pub const TEXT_DECL: ErrorCode = ErrorCode(31);
    pub const PUBLICID: ErrorCode = ErrorCode(32);
    pub const SUSPENDED: ErrorCode = ErrorCode(33);
    pub const NOT_SUSPENDED: ErrorCode = ErrorCode(34);
    pub const ABORTED: ErrorCode = ErrorCode(35);
    pub const FINISHED: ErrorCode = ErrorCode(36);
    pub const SUSPEND_PE: ErrorCode = ErrorCode(37);
    pub const RESERVED_PREFIX_XML: ErrorCode = ErrorCode(38);
    pub const RESERVED_PREFIX_XMLNS: ErrorCode = ErrorCode(39);
    pub const RESERVED_NAMESPACE_URI: ErrorCode = ErrorCode(40);
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "engine error code {}", self.0)
    }
}
