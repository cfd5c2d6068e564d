//! Primitive value types shared by participants and settings.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Case-insensitive name equality, matching how the client matches names.
pub(crate) fn same_name(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

pub(crate) fn hash_name<H: Hasher>(name: &str, state: &mut H) {
    for c in name.chars().flat_map(char::to_lowercase) {
        c.hash(state);
    }
}

pub(crate) fn cmp_name(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Declares a `{ "name": ... }` value type whose identity ignores case.
macro_rules! named_value {
    ($(#[$meta:meta])* $type:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Serialize, Deserialize)]
        pub struct $type {
            pub name: String,
        }

        impl $type {
            pub fn new(name: impl Into<String>) -> Self {
                Self { name: name.into() }
            }

            pub fn name(&self) -> &str {
                &self.name
            }
        }

        impl PartialEq for $type {
            fn eq(&self, other: &Self) -> bool {
                same_name(&self.name, &other.name)
            }
        }

        impl Eq for $type {}

        impl Hash for $type {
            fn hash<H: Hasher>(&self, state: &mut H) {
                hash_name(&self.name, state);
            }
        }

        impl PartialOrd for $type {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $type {
            fn cmp(&self, other: &Self) -> Ordering {
                cmp_name(&self.name, &other.name)
            }
        }

        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, ": {}"), self.name)
            }
        }
    };
}

named_value!(
    /// A place where a participant is based.
    Location,
    "Location"
);

named_value!(
    /// A named competency an evaluator may hold and an evaluated person may require.
    Skill,
    "Skill"
);

named_value!(
    /// A meeting slot, referenced by name from participant availabilities.
    TimeSlot,
    "TimeSlot"
);

/// `{ "name": ... }` wire shape used for enums and references by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct NameRepr {
    pub name: String,
}

/// Category of participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "NameRepr", into = "NameRepr")]
pub enum PersonType {
    Professional,
    NonProfessional,
    External,
    #[default]
    Undefined,
}

impl PersonType {
    /// Returns the wire name of the type.
    pub fn as_str(self) -> &'static str {
        match self {
            PersonType::Professional => "professional",
            PersonType::NonProfessional => "non-professional",
            PersonType::External => "external",
            PersonType::Undefined => "undefined",
        }
    }

    /// Parses a wire name; anything unknown is `Undefined`.
    pub fn from_name(name: &str) -> Self {
        [
            PersonType::Professional,
            PersonType::NonProfessional,
            PersonType::External,
        ]
        .into_iter()
        .find(|t| same_name(t.as_str(), name))
        .unwrap_or(PersonType::Undefined)
    }
}

impl From<NameRepr> for PersonType {
    fn from(repr: NameRepr) -> Self {
        PersonType::from_name(&repr.name)
    }
}

impl From<PersonType> for NameRepr {
    fn from(person_type: PersonType) -> Self {
        NameRepr {
            name: person_type.as_str().to_string(),
        }
    }
}

impl fmt::Display for PersonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PersonType: {}", self.as_str())
    }
}

/// Inclusive integer bound, serialized as `{ "value": [min, max] }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RangeRepr", into = "RangeRepr")]
pub struct Range {
    min: i64,
    max: i64,
}

#[derive(Serialize, Deserialize)]
struct RangeRepr {
    value: [i64; 2],
}

impl From<RangeRepr> for Range {
    fn from(repr: RangeRepr) -> Self {
        Range::new(repr.value[0], repr.value[1])
    }
}

impl From<Range> for RangeRepr {
    fn from(range: Range) -> Self {
        RangeRepr {
            value: [range.min, range.max],
        }
    }
}

impl Range {
    /// Creates a range; callers guarantee `min <= max`.
    pub const fn new(min: i64, max: i64) -> Self {
        Range { min, max }
    }

    /// Range accepting every non-negative value.
    pub const fn unbounded() -> Self {
        Range::new(0, i64::MAX)
    }

    #[inline]
    pub const fn min(&self) -> i64 {
        self.min
    }

    #[inline]
    pub const fn max(&self) -> i64 {
        self.max
    }

    #[inline]
    pub const fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for Range {
    fn default() -> Self {
        Range::unbounded()
    }
}

/// Travel cost between named locations.
///
/// Lookups by an unknown name, or into a missing cell, cost nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceMatrix {
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub distances: Vec<Vec<Option<i64>>>,
}

impl DistanceMatrix {
    pub fn new(locations: Vec<String>, distances: Vec<Vec<Option<i64>>>) -> Self {
        Self {
            locations,
            distances,
        }
    }

    fn index_of(&self, location: &str) -> Option<usize> {
        self.locations.iter().position(|l| same_name(l, location))
    }

    /// Returns the distance between two locations, or 0 when either is unknown.
    pub fn distance(&self, from: &str, to: &str) -> i64 {
        match (self.index_of(from), self.index_of(to)) {
            (Some(i), Some(j)) => self
                .distances
                .get(i)
                .and_then(|row| row.get(j))
                .copied()
                .flatten()
                .unwrap_or(0),
            _ => 0,
        }
    }
}
