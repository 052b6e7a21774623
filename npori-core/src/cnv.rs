//! Copy-number flavor: maps one Nirvana CNV position onto one
//! `copyVariants` record.
//!
//! Transcripts stay in the context tree until the position closes; the
//! best one contributes the gene, source and transcript id, and the raw
//! variant type is mapped onto its knowledge-base category. Only the
//! first sample is read; its copy number is reported as a delta against
//! the diploid baseline.

use serde_json::{Number, Value};

use crate::adapter::{Adapter, Hook, first_sample};
use crate::consts::{
    CONSEQUENCE_PRIORITY, DIPLOID_COPY_NUMBER, LOH_STATE, PASS_FILTER, PREFERRED_SOURCE,
    kb_category,
};
use crate::context::Group;
use crate::errors::ConvertError;
use crate::models::{CopyVariant, Transcript};
use crate::ranker::best_transcript;
use crate::router::PathRouter;
use crate::token::EventKind;
use crate::utils::convert_cytogenetic_band;

/// Adapter for Nirvana copy-number export files.
#[derive(Debug, Default)]
pub struct CnvAdapter;

fn transcripts_of(variant: &Group) -> Vec<Transcript> {
    variant
        .groups("transcripts")
        .iter()
        .map(|group| Transcript {
            gene: group.str_field("gene").map(str::to_owned),
            transcript: group.str_field("transcript").map(str::to_owned),
            source: group.str_field("source").map(str::to_owned),
            is_canonical: group.bool_field("isCanonical").unwrap_or(false),
            hgvs_protein: None,
            hgvs_cds: None,
            consequences: group.strings("consequence"),
        })
        .collect()
}

impl Adapter for CnvAdapter {
    const SECTION: &'static str = "copyVariants";

    fn register(router: &mut PathRouter<Hook>) {
        router.field("positions.chromosome", EventKind::String, "chromosome");
        router.field("positions.position", EventKind::Number, "start");
        router.field("positions.svEnd", EventKind::Number, "end");
        router.field("positions.cytogeneticBand", EventKind::String, "cytogeneticBand");
        router.field("positions.filters", EventKind::String, "filters");
        router.field("positions.variants.variantType", EventKind::String, "kbCategory");
        router.field(
            "positions.variants.transcripts.transcript",
            EventKind::String,
            "transcript",
        );
        router.field("positions.variants.transcripts.source", EventKind::String, "source");
        router.field("positions.variants.transcripts.hgnc", EventKind::String, "gene");
        router.field(
            "positions.variants.transcripts.isCanonical",
            EventKind::Boolean,
            "isCanonical",
        );
        router.field(
            "positions.variants.transcripts.completeOverlap",
            EventKind::Boolean,
            "completeOverlap",
        );
        router.field(
            "positions.variants.transcripts.consequence",
            EventKind::String,
            "consequence",
        );
        router.field("positions.samples.copyNumber", EventKind::Number, "copyNumber");
        router.field(
            "positions.samples.minorHaplotypeCopyNumber",
            EventKind::Number,
            "minorHaplotype",
        );
        router.field(
            "positions.samples.lossOfHeterozygosity",
            EventKind::Number,
            "lossOfHeterozygosity",
        );
        router.field(
            "positions.samples.lossOfHeterozygosity",
            EventKind::Boolean,
            "lossOfHeterozygosity",
        );
        router.field("positions.samples.genotype", EventKind::String, "genotype");

        router.handler("positions", EventKind::EndMap, Hook::PositionDone);
        router.handler("positions.variants", EventKind::StartMap, Hook::VariantStart);
        router.handler("positions.samples", EventKind::StartMap, Hook::SampleStart);
        router.handler(
            "positions.variants.transcripts",
            EventKind::StartMap,
            Hook::TranscriptStart,
        );
    }

    fn finalize(&mut self, record: Group) -> Result<Option<Value>, ConvertError> {
        if !record.contains_str("filters", PASS_FILTER) {
            return Ok(None);
        }

        let mut out = CopyVariant {
            chromosome: record.str_field("chromosome").map(str::to_owned),
            start: record.num_field("start").cloned(),
            end: record.num_field("end").cloned(),
            ..CopyVariant::default()
        };

        if let (Some(chromosome), Some(band)) =
            (record.str_field("chromosome"), record.str_field("cytogeneticBand"))
        {
            out.chromosome_band = Some(convert_cytogenetic_band(chromosome, band));
        }

        if let Some(variant) = record.groups("variants").first() {
            let transcripts = transcripts_of(variant);
            if !transcripts.is_empty() {
                if let Some(best) =
                    best_transcript(&transcripts, CONSEQUENCE_PRIORITY, PREFERRED_SOURCE)
                {
                    out.gene = best.gene.clone();
                    out.source = best.source.clone();
                    out.transcript = best.transcript.clone();
                }
                if let Some(raw) = variant.str_field("kbCategory") {
                    out.kb_category = Some(kb_category(raw).to_string());
                }
            }
        }

        if let Some(sample) = first_sample(&record) {
            out.copy_change = sample.num_field("copyNumber").and_then(|n| match n.as_i64() {
                Some(v) => Some(Number::from(v - DIPLOID_COPY_NUMBER)),
                None => n
                    .as_f64()
                    .and_then(|v| Number::from_f64(v - DIPLOID_COPY_NUMBER as f64)),
            });
            if sample.field("lossOfHeterozygosity").is_some() {
                out.loh_state = Some(LOH_STATE.to_string());
            }
            out.genotype = sample.str_field("genotype").map(str::to_owned);
        }

        // The knowledge base maps records by gene name; without one the
        // record cannot be imported.
        if out.gene.is_none() {
            return Ok(None);
        }

        Ok(Some(serde_json::to_value(out)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::adapter::convert;

    fn position(body: &str) -> String {
        format!(r#"{{"header": {{"genomeAssembly": "GRCh38"}}, "positions": [{}]}}"#, body)
    }

    const EGFR_AMPLIFICATION: &str = r#"{
        "chromosome": "chr7",
        "position": 55019017,
        "svEnd": 55211628,
        "cytogeneticBand": "p11.2",
        "filters": ["PASS"],
        "variants": [{
            "variantType": "copy_number_gain",
            "transcripts": [{
                "transcript": "NM_005228.5",
                "source": "RefSeq",
                "hgnc": "EGFR",
                "isCanonical": true,
                "consequence": ["amplification"]
            }]
        }],
        "samples": [{"copyNumber": 6, "genotype": "1/1"}]
    }"#;

    #[test]
    fn amplified_egfr_position_is_emitted_with_derived_fields() {
        let doc = position(EGFR_AMPLIFICATION);
        let records = convert(doc.as_bytes(), CnvAdapter).unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record["gene"], json!("EGFR"));
        assert_eq!(record["chromosomeBand"], json!("7:p11.2"));
        assert_eq!(record["copyChange"], json!(4));
        assert_eq!(record["kbCategory"], json!("copy gain"));
        assert_eq!(record["transcript"], json!("NM_005228.5"));
        assert_eq!(record["source"], json!("RefSeq"));
        assert_eq!(record["genotype"], json!("1/1"));
        // No loss-of-heterozygosity field on the sample.
        assert_eq!(record.get("lohState"), None);
    }

    #[test]
    fn record_without_the_pass_tag_is_never_emitted() {
        let doc = position(&EGFR_AMPLIFICATION.replace(r#"["PASS"]"#, r#"["LowQual"]"#));
        let records = convert(doc.as_bytes(), CnvAdapter).unwrap();
        assert_eq!(records, Vec::<Value>::new());
    }

    #[test]
    fn repeated_filter_tags_still_gate_on_pass() {
        let doc = position(
            &EGFR_AMPLIFICATION.replace(r#"["PASS"]"#, r#"["LowQual", "PASS"]"#),
        );
        let records = convert(doc.as_bytes(), CnvAdapter).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn record_without_a_gene_is_discarded() {
        let doc = position(
            r#"{
                "chromosome": "chr3",
                "position": 100,
                "filters": ["PASS"],
                "variants": [{"variantType": "copy_number_loss", "transcripts": []}],
                "samples": [{"copyNumber": 1}]
            }"#,
        );
        let records = convert(doc.as_bytes(), CnvAdapter).unwrap();
        assert_eq!(records, Vec::<Value>::new());
    }

    #[test]
    fn loss_of_heterozygosity_sets_the_marker() {
        let doc = position(
            r#"{
                "chromosome": "chr17",
                "position": 7500000,
                "cytogeneticBand": "p13.1",
                "filters": ["PASS"],
                "variants": [{
                    "variantType": "copy_number_loss",
                    "transcripts": [{
                        "transcript": "NM_000546.6",
                        "source": "RefSeq",
                        "hgnc": "TP53",
                        "consequence": ["feature_truncation"]
                    }]
                }],
                "samples": [{"copyNumber": 1, "lossOfHeterozygosity": 1}]
            }"#,
        );
        let records = convert(doc.as_bytes(), CnvAdapter).unwrap();
        assert_eq!(records[0]["lohState"], json!("LOH"));
        assert_eq!(records[0]["copyChange"], json!(-1));
        assert_eq!(records[0]["kbCategory"], json!("copy loss"));
    }

    #[test]
    fn fractional_copy_numbers_still_yield_a_copy_change() {
        let doc = position(&EGFR_AMPLIFICATION.replace(r#""copyNumber": 6"#, r#""copyNumber": 6.5"#));
        let records = convert(doc.as_bytes(), CnvAdapter).unwrap();
        assert_eq!(records[0]["copyChange"], json!(4.5));
    }

    #[test]
    fn only_the_first_sample_contributes_fields() {
        let doc = position(&EGFR_AMPLIFICATION.replace(
            r#"[{"copyNumber": 6, "genotype": "1/1"}]"#,
            r#"[{"copyNumber": 6, "genotype": "1/1"}, {"copyNumber": 1, "genotype": "0/1", "lossOfHeterozygosity": true}]"#,
        ));
        let records = convert(doc.as_bytes(), CnvAdapter).unwrap();

        // The second sample is warned about and otherwise ignored.
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["copyChange"], json!(4));
        assert_eq!(records[0]["genotype"], json!("1/1"));
        assert_eq!(records[0].get("lohState"), None);
    }

    #[test]
    fn duplicate_genes_are_consolidated_to_one_record() {
        let ensembl = EGFR_AMPLIFICATION
            .replace("NM_005228.5", "ENST00000275493")
            .replace(r#""source": "RefSeq""#, r#""source": "Ensembl""#);
        let doc = format!(r#"{{"positions": [{}, {}]}}"#, ensembl, EGFR_AMPLIFICATION);
        let records = convert(doc.as_bytes(), CnvAdapter).unwrap();
        assert_eq!(records.len(), 1);
        // The RefSeq entry wins consolidation even though it streamed second.
        assert_eq!(records[0]["transcript"], json!("NM_005228.5"));
    }
}
