// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Collation rules for string comparison in indexes and queries
//!
//! A collation names a locale and a comparison strength. Strength 2
//! (secondary) treats case and accents as insignificant, so "Alice" and
//! "alice" produce the same sort key and collide under a unique index.
//! Strength 3 (tertiary) is binary comparison.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison strength levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strength {
    /// Base letters only
    Primary = 1,
    /// Case- and accent-insensitive
    Secondary = 2,
    /// Exact (binary) comparison
    Tertiary = 3,
}

/// String comparison rules for an index or query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collation {
    pub locale: String,
    pub strength: Strength,
}

impl Collation {
    /// The collation declared by the movies-platform catalog: locale `en`,
    /// strength 2
    pub fn en_secondary() -> Self {
        Self {
            locale: "en".to_string(),
            strength: Strength::Secondary,
        }
    }

    /// Derive the sort key for a string under this collation.
    ///
    /// Two strings are equal under the collation exactly when their sort
    /// keys are byte-equal.
    pub fn sort_key(&self, s: &str) -> String {
        match self.strength {
            Strength::Tertiary => s.to_string(),
            Strength::Primary | Strength::Secondary => fold_case_and_accents(s),
        }
    }

    /// Compare two strings under this collation
    pub fn compare(&self, a: &str, b: &str) -> std::cmp::Ordering {
        self.sort_key(a).cmp(&self.sort_key(b))
    }

    /// Check two strings for equality under this collation
    pub fn eq(&self, a: &str, b: &str) -> bool {
        self.sort_key(a) == self.sort_key(b)
    }
}

impl fmt::Display for Collation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, strength {}", self.locale, self.strength as u8)
    }
}

/// Fold a string to its case- and accent-insensitive form.
///
/// Unicode lowercasing followed by base-letter substitution for the Latin
/// accented ranges. Characters outside the mapping pass through unchanged.
fn fold_case_and_accents(s: &str) -> String {
    let mut folded = String::with_capacity(s.len());
    for ch in s.chars() {
        for lower in ch.to_lowercase() {
            match strip_accent(lower) {
                Some(base) => folded.push_str(base),
                None => folded.push(lower),
            }
        }
    }
    folded
}

/// Map an accented lowercase Latin character to its base letter(s).
///
/// Covers Latin-1 Supplement and the Latin Extended-A characters that occur
/// in `en`-locale text. Returns None when the character is already a base
/// character.
fn strip_accent(ch: char) -> Option<&'static str> {
    let base = match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => "c",
        'ď' | 'đ' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => "e",
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => "g",
        'ĥ' | 'ħ' => "h",
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => "i",
        'ĵ' => "j",
        'ķ' => "k",
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => "l",
        'ñ' | 'ń' | 'ņ' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => "o",
        'ŕ' | 'ŗ' | 'ř' => "r",
        'ś' | 'ŝ' | 'ş' | 'š' => "s",
        'ţ' | 'ť' | 'ŧ' => "t",
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => "u",
        'ŵ' => "w",
        'ý' | 'ÿ' | 'ŷ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        'æ' => "ae",
        'œ' => "oe",
        'ß' => "ss",
        _ => return None,
    };
    Some(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn secondary_strength_ignores_case() {
        let collation = Collation::en_secondary();
        assert!(collation.eq("Alice", "alice"));
        assert!(collation.eq("MATRIX", "matrix"));
        assert!(!collation.eq("Matrix", "Matrix 2"));
    }

    #[test]
    fn secondary_strength_ignores_accents() {
        let collation = Collation::en_secondary();
        assert!(collation.eq("Amélie", "amelie"));
        assert!(collation.eq("Café", "CAFE"));
        assert!(!collation.eq("cafe", "code"));
    }

    #[test]
    fn tertiary_strength_is_binary() {
        let collation = Collation {
            locale: "en".to_string(),
            strength: Strength::Tertiary,
        };
        assert!(!collation.eq("Alice", "alice"));
        assert_eq!(collation.compare("Alice", "alice"), Ordering::Less);
    }

    #[test]
    fn sort_key_expands_ligatures() {
        let collation = Collation::en_secondary();
        assert_eq!(collation.sort_key("Æon"), "aeon");
        assert_eq!(collation.sort_key("straße"), "strasse");
    }
}
