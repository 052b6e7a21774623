//! The context tree: the bounded, per-record object being assembled from
//! the token stream.
//!
//! A [Group] is one in-progress object; repeated groups (variants,
//! transcripts, samples) are vectors of child groups, and writes always
//! target the last element of each vector on the way down. Missing
//! intermediate segments are created lazily so a sparse or out-of-order
//! token stream never errors.

use fxhash::FxHashMap;
use serde_json::Value;

use crate::consts::POSITIONS_GROUP;
use crate::token::Scalar;

/// A field value: a scalar the first time the field is set, transparently
/// promoted to an ordered sequence when the same field repeats.
#[derive(Clone, Debug, PartialEq)]
pub enum Field {
    Scalar(Scalar),
    Seq(Vec<Scalar>),
}

impl Field {
    pub fn to_value(&self) -> Value {
        match self {
            Field::Scalar(s) => s.to_value(),
            Field::Seq(seq) => Value::Array(seq.iter().map(Scalar::to_value).collect()),
        }
    }
}

/// One object under assembly: scalar fields plus named vectors of child
/// groups.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Group {
    fields: FxHashMap<String, Field>,
    groups: FxHashMap<String, Vec<Group>>,
}

impl Group {
    /// Set `name`, promoting an existing scalar to a sequence on repeat.
    pub fn set(&mut self, name: &str, value: Scalar) {
        match self.fields.get_mut(name) {
            Some(Field::Seq(seq)) => seq.push(value),
            Some(slot @ Field::Scalar(_)) => {
                let old = match std::mem::replace(slot, Field::Seq(Vec::new())) {
                    Field::Scalar(s) => s,
                    Field::Seq(_) => unreachable!(),
                };
                if let Field::Seq(seq) = slot {
                    seq.push(old);
                    seq.push(value);
                }
            }
            None => {
                self.fields.insert(name.to_string(), Field::Scalar(value));
            }
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// The field as a string; for a promoted sequence, the first element.
    pub fn str_field(&self, name: &str) -> Option<&str> {
        match self.fields.get(name)? {
            Field::Scalar(s) => s.as_str(),
            Field::Seq(seq) => seq.first().and_then(Scalar::as_str),
        }
    }

    pub fn num_field(&self, name: &str) -> Option<&serde_json::Number> {
        match self.fields.get(name)? {
            Field::Scalar(s) => s.as_num(),
            Field::Seq(seq) => seq.first().and_then(Scalar::as_num),
        }
    }

    pub fn bool_field(&self, name: &str) -> Option<bool> {
        match self.fields.get(name)? {
            Field::Scalar(s) => s.as_bool(),
            Field::Seq(seq) => seq.first().and_then(Scalar::as_bool),
        }
    }

    /// Every string occurrence of the field, scalar or sequence.
    pub fn strings(&self, name: &str) -> Vec<String> {
        match self.fields.get(name) {
            Some(Field::Scalar(s)) => s.as_str().map(str::to_owned).into_iter().collect(),
            Some(Field::Seq(seq)) => seq
                .iter()
                .filter_map(|s| s.as_str().map(str::to_owned))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Whether the field holds `value`, either as its scalar value or as
    /// one element of its sequence.
    pub fn contains_str(&self, name: &str, value: &str) -> bool {
        match self.fields.get(name) {
            Some(Field::Scalar(s)) => s.as_str() == Some(value),
            Some(Field::Seq(seq)) => seq.iter().any(|s| s.as_str() == Some(value)),
            None => false,
        }
    }

    /// The child groups under `name`, empty when none were created.
    pub fn groups(&self, name: &str) -> &[Group] {
        self.groups.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// The mutable assembly state for the record currently being streamed.
#[derive(Debug, Default)]
pub struct Context {
    root: Group,
}

impl Context {
    pub fn new() -> Self {
        let mut ctx = Context { root: Group::default() };
        ctx.reseed();
        ctx
    }

    fn reseed(&mut self) {
        self.root
            .groups
            .insert(POSITIONS_GROUP.to_string(), vec![Group::default()]);
    }

    /// Descend into the last element of the group vector at each segment,
    /// creating a one-element vector at any segment not yet present.
    fn descend(&mut self, path: &[&str]) -> &mut Group {
        let mut cur = &mut self.root;
        for part in path {
            let groups = cur
                .groups
                .entry(part.to_string())
                .or_insert_with(|| vec![Group::default()]);
            if groups.is_empty() {
                groups.push(Group::default());
            }
            cur = groups.last_mut().expect("group vector is never empty");
        }
        cur
    }

    /// Append a fresh empty group at the final segment of `path`: the
    /// start of a new variant, transcript or sample.
    pub fn enter_group(&mut self, path: &[&str]) {
        let Some((last, parents)) = path.split_last() else {
            return;
        };
        let container = self.descend(parents);
        container
            .groups
            .entry(last.to_string())
            .or_default()
            .push(Group::default());
    }

    /// Write a scalar into the object at the top of `parent`, under the
    /// mapped output name.
    pub fn set_field(&mut self, parent: &[&str], name: &str, value: Scalar) {
        self.descend(parent).set(name, value);
    }

    /// Replace the group vector at `path` with a single empty group.
    pub fn reset_group(&mut self, path: &[&str]) {
        let Some((last, parents)) = path.split_last() else {
            return;
        };
        let container = self.descend(parents);
        container
            .groups
            .insert(last.to_string(), vec![Group::default()]);
    }

    /// The record currently under assembly.
    pub fn record(&self) -> Option<&Group> {
        self.root.groups.get(POSITIONS_GROUP).and_then(|v| v.first())
    }

    /// Remove the current record and reset the assembly state, whether or
    /// not the record will be emitted.
    pub fn take_record(&mut self) -> Group {
        let record = self
            .root
            .groups
            .get_mut(POSITIONS_GROUP)
            .and_then(|v| (!v.is_empty()).then(|| v.remove(0)))
            .unwrap_or_default();
        self.root = Group::default();
        self.reseed();
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn s(v: &str) -> Scalar {
        Scalar::Str(v.to_string())
    }

    #[test]
    fn repeated_field_promotes_scalar_to_sequence() {
        let mut ctx = Context::new();
        ctx.set_field(&["positions"], "filters", s("PASS"));
        ctx.set_field(&["positions"], "filters", s("LowQual"));

        let record = ctx.record().unwrap();
        assert_eq!(
            record.field("filters").unwrap().to_value(),
            json!(["PASS", "LowQual"])
        );
        assert!(record.contains_str("filters", "PASS"));
        assert!(record.contains_str("filters", "LowQual"));
        assert!(!record.contains_str("filters", "SB"));
    }

    #[test]
    fn single_field_stays_scalar() {
        let mut ctx = Context::new();
        ctx.set_field(&["positions"], "chromosome", s("chr7"));

        let record = ctx.record().unwrap();
        assert_eq!(record.field("chromosome").unwrap().to_value(), json!("chr7"));
        assert_eq!(record.str_field("chromosome"), Some("chr7"));
    }

    #[test]
    fn enter_group_appends_fresh_objects() {
        let mut ctx = Context::new();
        ctx.enter_group(&["positions", "variants"]);
        ctx.set_field(&["positions", "variants"], "vid", s("v1"));
        ctx.enter_group(&["positions", "variants"]);
        ctx.set_field(&["positions", "variants"], "vid", s("v2"));

        let record = ctx.record().unwrap();
        let variants = record.groups("variants");
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].str_field("vid"), Some("v1"));
        assert_eq!(variants[1].str_field("vid"), Some("v2"));
    }

    #[test]
    fn missing_segments_are_created_lazily() {
        let mut ctx = Context::new();
        // No enter_group for samples: the container appears on first write.
        ctx.set_field(&["positions", "samples"], "genotype", s("0/1"));

        let record = ctx.record().unwrap();
        assert_eq!(record.groups("samples").len(), 1);
        assert_eq!(record.groups("samples")[0].str_field("genotype"), Some("0/1"));
    }

    #[test]
    fn take_record_resets_the_assembly_state() {
        let mut ctx = Context::new();
        ctx.set_field(&["positions"], "chromosome", s("chr1"));

        let record = ctx.take_record();
        assert_eq!(record.str_field("chromosome"), Some("chr1"));

        let fresh = ctx.record().unwrap();
        assert_eq!(fresh.str_field("chromosome"), None);
    }

    #[test]
    fn reset_group_drops_accumulated_children() {
        let mut ctx = Context::new();
        ctx.enter_group(&["positions", "variants"]);
        ctx.enter_group(&["positions", "variants", "transcripts"]);
        ctx.set_field(&["positions", "variants", "transcripts"], "gene", s("EGFR"));
        ctx.reset_group(&["positions", "variants", "transcripts"]);

        let record = ctx.record().unwrap();
        let variant = &record.groups("variants")[0];
        assert_eq!(variant.groups("transcripts").len(), 1);
        assert_eq!(variant.groups("transcripts")[0].str_field("gene"), None);
    }
}
