//! Schema-less values produced by folding XML

use indexmap::map::{IntoIter, Iter, Keys, Values};
use indexmap::IndexMap;
use std::ops::Index;

/// Key under which a node's character data is stored
pub const TEXT_KEY: &str = "";
/// Key under which `<!...>` nodes are stored
pub const BANG_KEY: &str = "!";
/// Key under which `<?...?>` nodes are stored
pub const PI_KEY: &str = "?";
/// Prefix that marks attribute keys
pub const ATTRIBUTE_PREFIX: char = '@';

/// What a [`Struct`] key refers to, decided by its prefix
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyKind {
    /// Nested element, key is the tag name
    Element,
    /// `@name` attribute
    Attribute,
    /// `""` character data
    Text,
    /// `"!"` comment, DOCTYPE or other bang node
    Bang,
    /// `"?"` processing instruction
    ProcessingInstruction,
}

impl KeyKind {
    /// Classify a key
    pub fn of(key: &str) -> Self {
        match key {
            TEXT_KEY => Self::Text,
            BANG_KEY => Self::Bang,
            PI_KEY => Self::ProcessingInstruction,
            _ if key.starts_with(ATTRIBUTE_PREFIX) => Self::Attribute,
            _ => Self::Element,
        }
    }
}

/// Value folded from an XML document or element
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
    /// Self-closing element, valueless attribute
    #[default]
    Null,
    /// Decoded character data
    Text(String),
    /// Keyed entries in first-appearance order
    Struct(Struct),
    /// Every occurrence of a repeated key
    List(List),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    pub fn is_struct(&self) -> bool {
        matches!(self, Self::Struct(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Returns the text if this is text, None otherwise
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the struct if this is a struct, None otherwise
    pub fn as_struct(&self) -> Option<&Struct> {
        match self {
            Self::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the list if this is a list, None otherwise
    pub fn as_list(&self) -> Option<&List> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_struct_mut(&mut self) -> Option<&mut Struct> {
        match self {
            Self::Struct(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    /// Look up `key` if this is a struct
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_struct().and_then(|s| s.get(key))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<Struct> for Value {
    fn from(value: Struct) -> Self {
        Self::Struct(value)
    }
}

impl From<List> for Value {
    fn from(value: List) -> Self {
        Self::List(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Self::List(List(values))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// An order-preserving map with unique keys.
///
/// Equality compares entries in order, unlike the underlying `IndexMap`.
#[derive(Debug, Clone, Eq, Default)]
pub struct Struct(pub(crate) IndexMap<String, Value>);

impl PartialEq for Struct {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().eq(other.0.iter())
    }
}

impl Struct {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(IndexMap::with_capacity(capacity))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Inserts a key-value pair, keeping the position of an existing key.
    /// Returns the previous value if the key already existed
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> Keys<'_, String, Value> {
        self.0.keys()
    }

    pub fn values(&self) -> Values<'_, String, Value> {
        self.0.values()
    }

    pub fn iter(&self) -> Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Iterate over attribute entries with the `@` prefix stripped
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0
            .iter()
            .filter_map(|(k, v)| k.strip_prefix(ATTRIBUTE_PREFIX).map(|name| (name, v)))
    }

    /// Take the single entry out of a one-entry struct
    pub(crate) fn into_single(self) -> Result<(String, Value), Self> {
        if self.0.len() != 1 {
            return Err(self);
        }
        self.0.into_iter().next().ok_or_else(Self::new)
    }
}

impl Index<&str> for Struct {
    type Output = Value;

    #[allow(clippy::indexing_slicing)]
    fn index(&self, key: &str) -> &Self::Output {
        &self.0[key]
    }
}

impl<'a> IntoIterator for &'a Struct {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Struct {
    type Item = (String, Value);
    type IntoIter = IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<IndexMap<String, Value>> for Struct {
    fn from(map: IndexMap<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Struct {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Values of a repeated key, in document order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct List(pub(crate) Vec<Value>);

impl List {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn push(&mut self, value: impl Into<Value>) {
        self.0.push(value.into());
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }
}

impl Index<usize> for List {
    type Output = Value;

    #[allow(clippy::indexing_slicing)]
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for List {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<Value> for List {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(feature = "serde")]
mod ser {
    use super::{List, Struct, Value};
    use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

    impl Serialize for Value {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Self::Null => serializer.serialize_unit(),
                Self::Text(s) => serializer.serialize_str(s),
                Self::Struct(s) => s.serialize(serializer),
                Self::List(l) => l.serialize(serializer),
            }
        }
    }

    impl Serialize for Struct {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (k, v) in self {
                map.serialize_entry(k, v)?;
            }
            map.end()
        }
    }

    impl Serialize for List {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for v in self {
                seq.serialize_element(v)?;
            }
            seq.end()
        }
    }
}
