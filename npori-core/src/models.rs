//! Output-facing record types and the transient transcript value used for
//! representative selection.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// One gene-model interpretation of a variant's effect, converted to an
/// immutable value when its object closes in the stream.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transcript {
    pub gene: Option<String>,
    pub transcript: Option<String>,
    pub source: Option<String>,
    pub is_canonical: bool,
    pub hgvs_protein: Option<String>,
    pub hgvs_cds: Option<String>,
    pub consequences: Vec<String>,
}

/// One emitted copy-number record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyVariant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chromosome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chromosome_band: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kb_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gene: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy_change: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loh_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genotype: Option<String>,
}

/// One emitted small-mutation record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmallMutation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chromosome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_position: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_position: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gene: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_canonical: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hgvs_protein: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hgvs_cds: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein_change: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_seq: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_seq: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genotype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_frequencies: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allele_depths: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_depth: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub somatic_quality: Option<Number>,
}
