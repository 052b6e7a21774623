//! Streaming token source - constant memory usage regardless of document size.
//!
//! Walks a JSON document with a recursive [serde::de::DeserializeSeed] and
//! pushes one token per parse event into a [TokenSink], instead of
//! materializing the document as a value tree. The event vocabulary and the
//! dotted-path addressing mirror what an incremental parser exposes:
//! scalars fire at their field path, start/end of an object fire at the
//! object's path, and elements of an array are visited under a pushed
//! repetition marker.

use std::fmt;
use std::io::Read;

use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::Number;

use crate::errors::ConvertError;
use crate::token::{EventKind, JsonPath, Scalar, Token};

/// Receives every token of the streaming parse, in document order.
pub trait TokenSink {
    fn on_token(&mut self, path: &JsonPath, token: Token) -> Result<(), ConvertError>;
}

/// Stream every parse event of the JSON document in `reader` into `sink`.
///
/// Failures from the underlying reader or a malformed document propagate
/// out unchanged; there is no partial-result recovery.
pub fn stream_tokens<R: Read, S: TokenSink>(reader: R, sink: &mut S) -> Result<(), ConvertError> {
    let mut de = serde_json::Deserializer::from_reader(reader);
    let mut walker = EventWalker {
        sink,
        path: JsonPath::new(),
    };
    (&mut walker).deserialize(&mut de)?;
    de.end()?;
    Ok(())
}

struct EventWalker<'s, S> {
    sink: &'s mut S,
    path: JsonPath,
}

impl<S: TokenSink> EventWalker<'_, S> {
    fn emit(&mut self, kind: EventKind, value: Option<Scalar>) -> Result<(), ConvertError> {
        self.sink.on_token(&self.path, Token::new(kind, value))
    }
}

impl<'de, S: TokenSink> DeserializeSeed<'de> for &mut EventWalker<'_, S> {
    type Value = ();

    fn deserialize<D>(self, deserializer: D) -> Result<(), D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de, S: TokenSink> Visitor<'de> for &mut EventWalker<'_, S> {
    type Value = ();

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<(), E> {
        self.emit(EventKind::Boolean, Some(Scalar::Bool(v)))
            .map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<(), E> {
        self.emit(EventKind::Number, Some(Scalar::Num(Number::from(v))))
            .map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<(), E> {
        self.emit(EventKind::Number, Some(Scalar::Num(Number::from(v))))
            .map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<(), E> {
        let num = Number::from_f64(v)
            .ok_or_else(|| E::custom(format!("non-finite number in input: {}", v)))?;
        self.emit(EventKind::Number, Some(Scalar::Num(num)))
            .map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<(), E> {
        self.emit(EventKind::String, Some(Scalar::Str(v.to_owned())))
            .map_err(E::custom)
    }

    fn visit_unit<E: de::Error>(self) -> Result<(), E> {
        self.emit(EventKind::Null, None).map_err(E::custom)
    }

    fn visit_map<A>(self, mut map: A) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        self.emit(EventKind::StartMap, None).map_err(de::Error::custom)?;
        while let Some(key) = map.next_key::<String>()? {
            self.path.push_key(key);
            map.next_value_seed(&mut *self)?;
            self.path.pop();
        }
        self.emit(EventKind::EndMap, None).map_err(de::Error::custom)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<(), A::Error>
    where
        A: SeqAccess<'de>,
    {
        self.emit(EventKind::StartArray, None)
            .map_err(de::Error::custom)?;
        self.path.push_item();
        while seq.next_element_seed(&mut *self)?.is_some() {}
        self.path.pop();
        self.emit(EventKind::EndArray, None)
            .map_err(de::Error::custom)
    }
}
