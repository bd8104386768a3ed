//! Path segments addressing values inside a JSON5 document.
//!
//! A path is a sequence of [`Segment`]s starting at the root: property names
//! for objects, element indices for arrays. Paths are produced by
//! [`get_node_path`](crate::get_node_path) and
//! [`get_location`](crate::get_location), and consumed by
//! [`find_node_at_location`](crate::find_node_at_location) and
//! [`Location::matches`](crate::Location::matches).
use alloc::string::{String, ToString};

/// One step in the path to a JSON5 value: a property name or an array index.
///
/// # Examples
///
/// ```
/// use json5edit::Segment;
///
/// let path: Vec<Segment> = vec!["dependencies".into(), Segment::Index(0)];
/// assert_eq!(path[0].as_key().map(String::as_str), Some("dependencies"));
/// assert_eq!(path[1].as_index(), Some(&0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl Segment {
    /// The index payload, when this segment addresses an array element.
    #[must_use]
    pub fn as_index(&self) -> Option<&usize> {
        match self {
            Self::Index(index) => Some(index),
            Self::Key(_) => None,
        }
    }

    /// The name payload, when this segment addresses an object member.
    #[must_use]
    pub fn as_key(&self) -> Option<&String> {
        match self {
            Self::Key(key) => Some(key),
            Self::Index(_) => None,
        }
    }
}

impl From<&str> for Segment {
    fn from(name: &str) -> Self {
        Self::Key(name.to_string())
    }
}

impl From<String> for Segment {
    fn from(name: String) -> Self {
        Self::Key(name)
    }
}

// Indices arrive in whatever unsigned width the caller has on hand.
macro_rules! index_conversions {
    ($($int:ty)*) => {$(
        impl From<$int> for Segment {
            fn from(index: $int) -> Self {
                #[allow(clippy::cast_possible_truncation)]
                Self::Index(index as usize)
            }
        }
    )*};
}

index_conversions!(u8 u16 u32 u64 usize);

// A path should read as `["foo", 0, "bar"]` on the wire, not as a list of
// tagged variants, so the serde impls flatten each segment to a bare string
// or integer. Deserialization funnels through an untagged mirror enum; the
// integer arm is tried first so numbers never collapse into keys.
#[cfg(any(test, feature = "serde"))]
mod serde_support {
    use alloc::string::String;

    use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

    use super::Segment;

    impl Serialize for Segment {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match self {
                Self::Key(key) => key.serialize(serializer),
                Self::Index(index) => (*index as u64).serialize(serializer),
            }
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawSegment {
        Index(u64),
        Key(String),
    }

    impl<'de> Deserialize<'de> for Segment {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            match RawSegment::deserialize(deserializer)? {
                RawSegment::Index(index) => usize::try_from(index)
                    .map(Self::Index)
                    .map_err(|_| de::Error::custom("array index does not fit in usize")),
                RawSegment::Key(key) => Ok(Self::Key(key)),
            }
        }
    }
}
