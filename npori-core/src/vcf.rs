//! Small-mutation flavor: maps one Nirvana VCF-derived position onto one
//! `smallMutations` record.
//!
//! Transcripts are converted to immutable values as their objects close
//! and accumulate on the adapter, scoped to the current record: the
//! accumulator is drained on every finalize, accepted or not. The protein
//! change is derived from the best transcript's HGVS protein string when
//! present, else from the variant's genomic change string, with a
//! distinct path for mitochondrial changes (which have no transcript).

use std::mem;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::adapter::{Adapter, Hook, first_sample};
use crate::consts::{
    CONSEQUENCE_PRIORITY, MITOCHONDRIAL_TRANSCRIPT, PASS_FILTER, PREFERRED_SOURCE,
};
use crate::context::{Context, Group};
use crate::errors::ConvertError;
use crate::models::{SmallMutation, Transcript};
use crate::ranker::best_transcript;
use crate::router::PathRouter;
use crate::token::{EventKind, Scalar};

/// Wrapper notation some callers emit for protein changes, e.g.
/// `NM_x:c.524G>A(p.(Arg175His))`.
static HGVS_WRAPPED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*):(c\..*)\(p.\((.*)\)\)").expect("hgvs wrapper pattern is valid")
});

/// A genomic change on the mitochondrial genome, e.g. `MT:m.152T>C`.
static MITOCHONDRIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+:m\.\S+)?$").expect("mitochondrial pattern is valid"));

/// Rewrite the parenthesized wrapper form to `reference:p.change` and
/// strip any remaining parentheses.
fn normalize_hgvs_protein(hgvsp: &str) -> String {
    let rewritten = match HGVS_WRAPPED.captures(hgvsp) {
        Some(caps) => format!("{}:p.{}", &caps[1], &caps[3]),
        None => hgvsp.to_string(),
    };
    rewritten.replace(['(', ')'], "")
}

fn after_colon(s: &str) -> Option<String> {
    s.split(':').nth(1).map(str::to_owned)
}

fn before_colon(s: &str) -> Option<String> {
    s.split(':').next().map(str::to_owned)
}

/// Adapter for Nirvana small-mutation (VCF-derived) export files.
#[derive(Debug, Default)]
pub struct VcfAdapter {
    transcripts: Vec<Transcript>,
    pending_consequences: Vec<String>,
}

impl Adapter for VcfAdapter {
    const SECTION: &'static str = "smallMutations";

    fn register(router: &mut PathRouter<Hook>) {
        router.field("positions.chromosome", EventKind::String, "chromosome");
        router.field("positions.filters", EventKind::String, "filters");
        router.field("positions.variants.begin", EventKind::Number, "startPosition");
        router.field("positions.variants.end", EventKind::Number, "endPosition");
        router.field("positions.variants.hgvsg", EventKind::String, "hgvsg");
        router.field("positions.variants.variantType", EventKind::String, "variantType");
        router.field("positions.variants.phylopScore", EventKind::Number, "phylopScore");
        router.field("positions.variants.vid", EventKind::String, "vid");
        router.field("positions.variants.refAllele", EventKind::String, "refSeq");
        router.field("positions.variants.altAllele", EventKind::String, "altSeq");
        router.field(
            "positions.variants.transcripts.hgvsp",
            EventKind::String,
            "hgvsProtein",
        );
        router.field("positions.variants.transcripts.hgvsc", EventKind::String, "hgvsCds");
        router.field(
            "positions.variants.transcripts.isCanonical",
            EventKind::Boolean,
            "isCanonical",
        );
        router.field("positions.variants.transcripts.source", EventKind::String, "source");
        router.field(
            "positions.variants.transcripts.transcript",
            EventKind::String,
            "transcript",
        );
        router.field("positions.variants.transcripts.bioType", EventKind::String, "bioType");
        router.field("positions.variants.transcripts.hgnc", EventKind::String, "gene");
        router.field("positions.samples.genotype", EventKind::String, "genotype");
        router.field(
            "positions.samples.variantFrequencies",
            EventKind::Number,
            "variantFrequencies",
        );
        router.field("positions.samples.alleleDepths", EventKind::Number, "alleleDepths");
        router.field("positions.samples.totalDepth", EventKind::Number, "totalDepth");
        router.field("positions.samples.somaticQuality", EventKind::Number, "somaticQuality");

        router.handler("positions", EventKind::EndMap, Hook::PositionDone);
        router.handler("positions.variants", EventKind::StartMap, Hook::VariantStart);
        router.handler("positions.samples", EventKind::StartMap, Hook::SampleStart);
        router.handler(
            "positions.variants.transcripts",
            EventKind::StartMap,
            Hook::TranscriptStart,
        );
        router.handler(
            "positions.variants.transcripts",
            EventKind::EndMap,
            Hook::TranscriptDone,
        );
        router.handler(
            "positions.variants.transcripts.consequence",
            EventKind::String,
            Hook::ConsequenceTerm,
        );
    }

    fn consequence(&mut self, term: &Scalar) {
        if let Some(term) = term.as_str() {
            self.pending_consequences.push(term.to_owned());
        }
    }

    fn transcript_done(&mut self, ctx: &mut Context) {
        let consequences = mem::take(&mut self.pending_consequences);
        if let Some(group) = ctx
            .record()
            .and_then(|record| record.groups("variants").last())
            .and_then(|variant| variant.groups("transcripts").last())
        {
            self.transcripts.push(Transcript {
                gene: group.str_field("gene").map(str::to_owned),
                transcript: group.str_field("transcript").map(str::to_owned),
                source: group.str_field("source").map(str::to_owned),
                is_canonical: group.bool_field("isCanonical").unwrap_or(false),
                hgvs_protein: group.str_field("hgvsProtein").map(str::to_owned),
                hgvs_cds: group.str_field("hgvsCds").map(str::to_owned),
                consequences,
            });
        }
        // Converted transcripts no longer need their context groups.
        ctx.reset_group(&["positions", "variants", "transcripts"]);
    }

    fn finalize(&mut self, record: Group) -> Result<Option<Value>, ConvertError> {
        // Drain first so a rejected record cannot leak transcripts into
        // the next one.
        let transcripts = mem::take(&mut self.transcripts);
        self.pending_consequences.clear();

        if !record.contains_str("filters", PASS_FILTER) {
            return Ok(None);
        }

        let mut out = SmallMutation {
            chromosome: record.str_field("chromosome").map(str::to_owned),
            ..SmallMutation::default()
        };

        if let Some(best) = best_transcript(&transcripts, CONSEQUENCE_PRIORITY, PREFERRED_SOURCE) {
            out.gene = best.gene.clone();
            out.source = best.source.clone();
            if best.is_canonical {
                out.is_canonical = Some(true);
            }
            out.transcript = best.transcript.clone();
            out.hgvs_protein = best.hgvs_protein.clone();
            out.hgvs_cds = best.hgvs_cds.clone();
        }

        let mut hgvsg = None;
        if let Some(variant) = record.groups("variants").first() {
            out.start_position = variant.num_field("startPosition").cloned();
            out.end_position = variant.num_field("endPosition").cloned();
            out.variant_type = variant.str_field("variantType").map(str::to_owned);
            out.vid = variant.str_field("vid").map(str::to_owned);
            out.ref_seq = variant.str_field("refSeq").map(str::to_owned);
            out.alt_seq = variant.str_field("altSeq").map(str::to_owned);
            hgvsg = variant.str_field("hgvsg").map(str::to_owned);
        }

        if let Some(hgvs_protein) = out.hgvs_protein.take() {
            let normalized = normalize_hgvs_protein(&hgvs_protein);
            out.protein_change = after_colon(&normalized);
            out.hgvs_protein = Some(normalized);
        } else if let Some(hgvsg) = hgvsg {
            if MITOCHONDRIAL.is_match(&hgvsg) {
                // Mitochondrial changes have no transcript.
                out.protein_change = before_colon(&hgvsg);
                out.transcript = Some(MITOCHONDRIAL_TRANSCRIPT.to_string());
            } else {
                out.protein_change = after_colon(&hgvsg);
            }
        }

        if let Some(sample) = first_sample(&record) {
            out.genotype = sample.str_field("genotype").map(str::to_owned);
            out.variant_frequencies = sample.field("variantFrequencies").map(|f| f.to_value());
            out.allele_depths = sample.field("alleleDepths").map(|f| f.to_value());
            out.total_depth = sample.num_field("totalDepth").cloned();
            out.somatic_quality = sample.num_field("somaticQuality").cloned();
        }

        // The knowledge base needs a gene and a change descriptor to map
        // the record.
        if out.gene.is_none() || out.protein_change.is_none() {
            return Ok(None);
        }

        Ok(Some(serde_json::to_value(out)?))
    }
}
