/*
** This file is a part of Iksax (callback facade for streaming XML engines)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::collections::BTreeMap;

/// Attributes of a start tag, keyed by attribute name.
pub type Attributes = BTreeMap<String, String>;

/// Builds the attribute map from the flat name, value, name, value... list
/// reported by an engine.
///
/// If a name appears more than once, the last value wins. A trailing name
/// without a value is ignored.
pub fn pair_attributes(flat: &[&str]) -> Attributes {
    let mut attributes = Attributes::new();
    for pair in flat.chunks_exact(2) {
        attributes.insert(pair[0].to_string(), pair[1].to_string());
    }
    attributes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs() {
        assert!(pair_attributes(&[]).is_empty());

        let attributes = pair_attributes(&["x", "1", "y", "2"]);
        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes["x"], "1");
        assert_eq!(attributes["y"], "2");
    }

    #[test]
    fn last_value_wins() {
        let attributes = pair_attributes(&["x", "1", "x", "2"]);
        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes["x"], "2");
    }

    #[test]
    fn empty_values() {
        let attributes = pair_attributes(&["a", "", "b", "lala"]);
        assert_eq!(attributes["a"], "");
        assert_eq!(attributes["b"], "lala");
    }

    #[test]
    fn dangling_name() {
        let attributes = pair_attributes(&["x", "1", "y"]);
        assert_eq!(attributes.len(), 1);
        assert!(!attributes.contains_key("y"));
    }
}
