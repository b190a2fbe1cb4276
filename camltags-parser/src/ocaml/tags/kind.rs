//! Declaration kinds and their enablement

use serde::{Serialize, Serializer};
use std::fmt;

/// What a tag declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Class,
    Method,
    Module,
    Variable,
    /// A `val` item of a signature
    ValueSignature,
    Type,
    Function,
    Constructor,
    RecordField,
    Exception,
}

impl Kind {
    pub const ALL: [Kind; 10] = [
        Kind::Class,
        Kind::Method,
        Kind::Module,
        Kind::Variable,
        Kind::ValueSignature,
        Kind::Type,
        Kind::Function,
        Kind::Constructor,
        Kind::RecordField,
        Kind::Exception,
    ];

    /// One-letter code used in tag files
    pub fn letter(self) -> char {
        match self {
            Kind::Class => 'c',
            Kind::Method => 'm',
            Kind::Module => 'M',
            Kind::Variable => 'v',
            Kind::ValueSignature => 'p',
            Kind::Type => 't',
            Kind::Function => 'f',
            Kind::Constructor => 'C',
            Kind::RecordField => 'r',
            Kind::Exception => 'e',
        }
    }

    /// Long name used in scope fields and listings
    pub fn name(self) -> &'static str {
        match self {
            Kind::Class => "class",
            Kind::Method => "method",
            Kind::Module => "module",
            Kind::Variable => "var",
            Kind::ValueSignature => "val",
            Kind::Type => "type",
            Kind::Function => "function",
            Kind::Constructor => "Constructor",
            Kind::RecordField => "RecordField",
            Kind::Exception => "Exception",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Kind::Class => "classes",
            Kind::Method => "Object's method",
            Kind::Module => "Module or functor",
            Kind::Variable => "Global variable",
            Kind::ValueSignature => "Signature item",
            Kind::Type => "Type name",
            Kind::Function => "A function",
            Kind::Constructor => "A constructor",
            Kind::RecordField => "A 'structure' field",
            Kind::Exception => "An exception",
        }
    }

    pub fn from_letter(letter: char) -> Option<Kind> {
        Kind::ALL.into_iter().find(|kind| kind.letter() == letter)
    }

    /// Character joining a scope of this kind to the names it contains
    pub fn scope_separator(self) -> char {
        match self {
            Kind::Type => '.',
            Kind::Class => '#',
            _ => '/',
        }
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Kind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Set of kinds that may be emitted.
///
/// A disabled kind still drives scope tracking, only the record is suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindSet {
    bits: u16,
}

impl KindSet {
    pub fn all() -> Self {
        Kind::ALL.into_iter().collect()
    }

    pub fn none() -> Self {
        Self { bits: 0 }
    }

    /// Build a set from one-letter codes; unknown letters are returned as the error.
    pub fn from_letters(letters: &str) -> Result<Self, char> {
        letters
            .chars()
            .map(|letter| Kind::from_letter(letter).ok_or(letter))
            .collect()
    }

    pub fn contains(&self, kind: Kind) -> bool {
        self.bits & kind.bit() != 0
    }

    pub fn enable(&mut self, kind: Kind) {
        self.bits |= kind.bit();
    }

    pub fn disable(&mut self, kind: Kind) {
        self.bits &= !kind.bit();
    }

    pub fn set(&mut self, kind: Kind, enabled: bool) {
        if enabled {
            self.enable(kind);
        } else {
            self.disable(kind);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Kind> + '_ {
        Kind::ALL.into_iter().filter(|kind| self.contains(*kind))
    }
}

impl Default for KindSet {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<Kind> for KindSet {
    fn from_iter<I: IntoIterator<Item = Kind>>(iter: I) -> Self {
        let mut set = KindSet::none();
        for kind in iter {
            set.enable(kind);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_round_trip_through_lookup() {
        for kind in Kind::ALL {
            assert_eq!(Kind::from_letter(kind.letter()), Some(kind));
        }
        assert_eq!(Kind::from_letter('x'), None);
    }

    #[test]
    fn test_kind_set_from_letters() {
        let set = KindSet::from_letters("fM").unwrap();
        assert!(set.contains(Kind::Function));
        assert!(set.contains(Kind::Module));
        assert!(!set.contains(Kind::Method));
        assert_eq!(set.iter().count(), 2);
    }

    #[test]
    fn test_kind_set_rejects_unknown_letter() {
        assert_eq!(KindSet::from_letters("fz"), Err('z'));
    }

    #[test]
    fn test_enable_disable() {
        let mut set = KindSet::all();
        set.disable(Kind::Constructor);
        assert!(!set.contains(Kind::Constructor));
        set.set(Kind::Constructor, true);
        assert_eq!(set, KindSet::all());
    }
}
