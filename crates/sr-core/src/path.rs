//! # Canonical Field Paths — The Shared Identifier Space
//!
//! Every representation of the resume schema names its fields differently:
//! nested `properties`, array `items`, a flat JSON-LD context map, and XSD
//! complex types with child elements. Before any comparison is possible each
//! extractor maps the fields it finds into a [`CanonicalPath`].
//!
//! ## Grammar
//!
//! ```text
//! path    := segment ("." segment)*
//! segment := name ("[]")?
//! name    := one or more characters, none of '.', '[' or ']'
//! ```
//!
//! The list marker `[]` is stored on the segment it marks, so a marker can
//! never begin a path and two markers can never be adjacent. The rendered
//! string is the identity key for matrix aggregation: equality, hashing and
//! ordering all follow the rendered form, and [`CanonicalPath::parse`]
//! inverts [`Display`](std::fmt::Display) exactly.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PathError;

/// Separator between path segments.
pub const SEGMENT_SEPARATOR: char = '.';

/// Marker appended to a list-valued segment.
pub const LIST_MARKER: &str = "[]";

/// One named step of a [`CanonicalPath`], optionally marked as list-valued.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    name: String,
    list: bool,
}

impl Segment {
    /// Create a segment, validating the field name.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::EmptySegment`] for an empty name and
    /// [`PathError::ReservedCharacter`] if the name contains `.`, `[` or `]`.
    pub fn new(name: impl Into<String>, list: bool) -> Result<Self, PathError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self { name, list })
    }

    /// The field name without any list marker.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this segment carries the list marker.
    pub fn is_list(&self) -> bool {
        self.list
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.list {
            write!(f, "{}{LIST_MARKER}", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// Check that `name` can be used as a path segment.
pub fn validate_name(name: &str) -> Result<(), PathError> {
    if name.is_empty() {
        return Err(PathError::EmptySegment);
    }
    if let Some(c) = name.chars().find(|c| matches!(c, '.' | '[' | ']')) {
        return Err(PathError::ReservedCharacter {
            name: name.to_string(),
            character: c,
        });
    }
    Ok(())
}

/// An unambiguous, dot-joined identifier for one logical field.
///
/// The empty path is the root: it renders as `""` and is the prefix of
/// every top-level section.
///
/// # Invariants
///
/// - `rendered` is always the `Display` form of `segments`.
/// - Every segment name is non-empty and free of reserved characters.
#[derive(Clone)]
pub struct CanonicalPath {
    segments: Vec<Segment>,
    rendered: String,
}

impl CanonicalPath {
    /// The empty root path.
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
            rendered: String::new(),
        }
    }

    /// Build a path from already validated segments.
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        let rendered = segments
            .iter()
            .map(Segment::to_string)
            .collect::<Vec<_>>()
            .join(".");
        Self { segments, rendered }
    }

    /// Single-segment path, used for flat names such as meta-schema keywords.
    pub fn field(name: impl Into<String>) -> Result<Self, PathError> {
        Ok(Self::from_segments(vec![Segment::new(name, false)?]))
    }

    /// Parse the rendered form back into a path.
    ///
    /// The empty string parses to [`CanonicalPath::root`].
    ///
    /// # Errors
    ///
    /// Returns a [`PathError`] describing the first grammar violation:
    /// empty segments (`a..b`), a bare or doubled marker (`[]`, `a[][]`),
    /// or stray brackets inside a name.
    pub fn parse(input: &str) -> Result<Self, PathError> {
        if input.is_empty() {
            return Ok(Self::root());
        }
        let mut segments = Vec::new();
        for raw in input.split(SEGMENT_SEPARATOR) {
            let (name, list) = match raw.strip_suffix(LIST_MARKER) {
                Some(stripped) => (stripped, true),
                None => (raw, false),
            };
            if list && name.is_empty() {
                return Err(PathError::DanglingMarker {
                    path: input.to_string(),
                });
            }
            if list && name.ends_with(LIST_MARKER) {
                return Err(PathError::RepeatedMarker {
                    path: input.to_string(),
                });
            }
            segments.push(Segment::new(name, list)?);
        }
        Ok(Self::from_segments(segments))
    }

    /// Extend this path by one field.
    ///
    /// # Errors
    ///
    /// Returns a [`PathError`] if `name` is not a valid segment name.
    pub fn child(&self, name: impl Into<String>, list: bool) -> Result<Self, PathError> {
        let segment = Segment::new(name, list)?;
        let mut segments = self.segments.clone();
        segments.push(segment);
        Ok(Self::from_segments(segments))
    }

    /// The ordered segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True for the root path.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The final segment's name, ignoring any list marker.
    pub fn leaf_name(&self) -> Option<&str> {
        self.segments.last().map(Segment::name)
    }

    /// Suffix test used to reconcile qualified paths with flat names.
    ///
    /// True iff the final segment's name equals `name`. A trailing list
    /// marker is ignored, so `skills[]` ends with `skills`.
    pub fn ends_with_name(&self, name: &str) -> bool {
        self.leaf_name() == Some(name)
    }

    /// The rendered string.
    pub fn as_str(&self) -> &str {
        &self.rendered
    }
}

/// Produce the canonical path of `name` under `prefix`.
///
/// This is the single construction rule every extractor goes through: a
/// nested field's path is `prefix.name`, with the list marker on `name`
/// when the field's value is a list. An empty prefix yields a top-level
/// path.
pub fn canonicalize(
    prefix: &CanonicalPath,
    name: &str,
    is_list: bool,
) -> Result<CanonicalPath, PathError> {
    prefix.child(name, is_list)
}

impl fmt::Debug for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CanonicalPath({:?})", self.rendered)
    }
}

impl fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

impl PartialEq for CanonicalPath {
    fn eq(&self, other: &Self) -> bool {
        self.rendered == other.rendered
    }
}

impl Eq for CanonicalPath {}

impl Hash for CanonicalPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rendered.hash(state);
    }
}

impl PartialOrd for CanonicalPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CanonicalPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rendered.cmp(&other.rendered)
    }
}

impl FromStr for CanonicalPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for CanonicalPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.rendered)
    }
}

impl<'de> Deserialize<'de> for CanonicalPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
