//! Token vocabulary for the streaming parse: event kinds, scalar values and
//! the dotted path addressing scheme with its repetition marker.

use std::fmt::{self, Display};

use serde_json::{Number, Value};

/// The kind of parse event a token represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    String,
    Number,
    Boolean,
    Null,
    StartMap,
    EndMap,
    StartArray,
    EndArray,
}

/// A scalar leaf value carried by string/number/boolean events.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Str(String),
    Num(Number),
    Bool(bool),
}

impl Scalar {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_num(&self) -> Option<&Number> {
        match self {
            Scalar::Num(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Scalar::Str(s) => Value::String(s.clone()),
            Scalar::Num(n) => Value::Number(n.clone()),
            Scalar::Bool(b) => Value::Bool(*b),
        }
    }
}

/// One parse event: its kind plus the scalar payload for leaf events.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: EventKind,
    pub value: Option<Scalar>,
}

impl Token {
    pub fn new(kind: EventKind, value: Option<Scalar>) -> Self {
        Token { kind, value }
    }
}

/// One segment of a [JsonPath]: a named field, or the marker for "element
/// of a repeated group".
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSeg {
    Key(String),
    Item,
}

/// The dotted path of the event currently being parsed, e.g.
/// `positions.item.variants.item.variantType`. The `item` marker is
/// stripped for registry lookups but is load-bearing for knowing when a
/// new element of a repeated group starts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JsonPath {
    segs: Vec<PathSeg>,
}

impl JsonPath {
    pub fn new() -> Self {
        JsonPath::default()
    }

    pub fn push_key(&mut self, key: String) {
        self.segs.push(PathSeg::Key(key));
    }

    pub fn push_item(&mut self) {
        self.segs.push(PathSeg::Item);
    }

    pub fn pop(&mut self) {
        self.segs.pop();
    }

    /// The named segments in order, with repetition markers skipped.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.segs.iter().filter_map(|seg| match seg {
            PathSeg::Key(k) => Some(k.as_str()),
            PathSeg::Item => None,
        })
    }

    /// The dotted key-only form of the path, used as the registry key.
    pub fn shape(&self) -> String {
        self.keys().collect::<Vec<_>>().join(".")
    }
}

impl Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segs.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            match seg {
                PathSeg::Key(k) => write!(f, "{}", k)?,
                PathSeg::Item => write!(f, "item")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn shape_strips_repetition_markers() {
        let mut path = JsonPath::new();
        path.push_key("positions".to_string());
        path.push_item();
        path.push_key("variants".to_string());
        path.push_item();
        path.push_key("variantType".to_string());

        assert_eq!(path.shape(), "positions.variants.variantType");
        assert_eq!(path.to_string(), "positions.item.variants.item.variantType");
    }

    #[test]
    fn keys_follow_segment_order() {
        let mut path = JsonPath::new();
        path.push_key("positions".to_string());
        path.push_item();
        path.push_key("filters".to_string());
        path.push_item();

        let keys: Vec<&str> = path.keys().collect();
        assert_eq!(keys, vec!["positions", "filters"]);

        path.pop();
        path.pop();
        assert_eq!(path.shape(), "positions");
    }
}
