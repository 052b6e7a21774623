//! Exact-match registries that dispatch each parse event to at most one
//! action: a field write into the context tree, or a structural hook.
//!
//! There is no prefix or wildcard matching; every nesting depth that must
//! be observed needs its own registration, keyed by the path shape (the
//! dotted path with repetition markers stripped) and the event kind.

use fxhash::FxHashMap;

use crate::token::{EventKind, JsonPath};

/// Result of routing one token.
#[derive(Debug, PartialEq)]
pub enum Routed<'r, H> {
    /// Store the token's scalar under this output field name.
    Field(&'r str),
    /// Run a structural hook.
    Handler(H),
    /// No registration matched; the token is ignored, not an error.
    None,
}

/// Two lookup tables over (path shape, event kind): simple field mappings
/// and structural handlers. The field table is consulted first.
#[derive(Debug, Default)]
pub struct PathRouter<H> {
    fields: FxHashMap<String, FxHashMap<EventKind, String>>,
    handlers: FxHashMap<String, FxHashMap<EventKind, H>>,
}

impl<H: Copy> PathRouter<H> {
    pub fn new() -> Self {
        PathRouter {
            fields: FxHashMap::default(),
            handlers: FxHashMap::default(),
        }
    }

    /// Register a simple mapping: a scalar at `shape` is stored under
    /// `output` in the context tree.
    pub fn field(&mut self, shape: &str, kind: EventKind, output: &str) {
        self.fields
            .entry(shape.to_string())
            .or_default()
            .insert(kind, output.to_string());
    }

    /// Register a structural hook for start/end-of-group events.
    pub fn handler(&mut self, shape: &str, kind: EventKind, hook: H) {
        self.handlers
            .entry(shape.to_string())
            .or_default()
            .insert(kind, hook);
    }

    /// Dispatch one token. At most one action matches.
    pub fn route(&self, path: &JsonPath, kind: EventKind) -> Routed<'_, H> {
        let shape = path.shape();
        if let Some(output) = self.fields.get(shape.as_str()).and_then(|m| m.get(&kind)) {
            return Routed::Field(output);
        }
        if let Some(hook) = self.handlers.get(shape.as_str()).and_then(|m| m.get(&kind)) {
            return Routed::Handler(*hook);
        }
        Routed::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn path(segs: &[&str]) -> JsonPath {
        let mut p = JsonPath::new();
        for seg in segs {
            if *seg == "item" {
                p.push_item();
            } else {
                p.push_key(seg.to_string());
            }
        }
        p
    }

    #[test]
    fn lookups_strip_the_repetition_marker() {
        let mut router: PathRouter<u8> = PathRouter::new();
        router.field("positions.chromosome", EventKind::String, "chromosome");

        let p = path(&["positions", "item", "chromosome"]);
        assert_eq!(router.route(&p, EventKind::String), Routed::Field("chromosome"));
    }

    #[test]
    fn field_table_is_consulted_before_handlers() {
        let mut router: PathRouter<u8> = PathRouter::new();
        router.field("positions.filters", EventKind::String, "filters");
        router.handler("positions.filters", EventKind::String, 7);

        let p = path(&["positions", "item", "filters", "item"]);
        assert_eq!(router.route(&p, EventKind::String), Routed::Field("filters"));
    }

    #[test]
    fn kind_must_match_exactly() {
        let mut router: PathRouter<u8> = PathRouter::new();
        router.handler("positions", EventKind::EndMap, 1);

        let p = path(&["positions", "item"]);
        assert_eq!(router.route(&p, EventKind::EndMap), Routed::Handler(1));
        assert_eq!(router.route(&p, EventKind::StartMap), Routed::None);
    }

    #[test]
    fn unregistered_tokens_are_ignored() {
        let router: PathRouter<u8> = PathRouter::new();
        let p = path(&["positions", "item", "refAllele"]);
        assert_eq!(router.route(&p, EventKind::String), Routed::None);
    }
}
