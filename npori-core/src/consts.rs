//! Fixed vocabulary shared by both record flavors: the quality gate, the
//! preferred transcript source, the consequence severity ranking and the
//! copy-number category labels.

/// Only positions carrying this filter tag are eligible for output.
pub const PASS_FILTER: &str = "PASS";

/// Curated transcript source preferred over predicted sources on rank ties.
pub const PREFERRED_SOURCE: &str = "RefSeq";

/// Copy-number category that always wins gene consolidation.
pub const DEEP_DELETION: &str = "deep deletion";

/// Baseline copy number subtracted to get the reported copy change.
pub const DIPLOID_COPY_NUMBER: i64 = 2;

/// Marker emitted when a sample reports loss of heterozygosity.
pub const LOH_STATE: &str = "LOH";

/// Placeholder transcript for mitochondrial changes, which have none.
pub const MITOCHONDRIAL_TRANSCRIPT: &str = ".";

/// Name of the repeated group that holds the record under assembly.
pub const POSITIONS_GROUP: &str = "positions";

/// Consequence terms ordered by severity; index 0 is the most severe.
/// Terms absent from this list rank as worse than everything in it.
pub const CONSEQUENCE_PRIORITY: &[&str] = &[
    "amplification",
    "deep_deletion",
    "transcript_ablation",
    "transcript_amplification",
    "splice_acceptor_variant",
    "splice_donor_variant",
    "stop_gained",
    "frameshift_variant",
    "stop_lost",
    "start_lost",
    "inframe_insertion",
    "inframe_deletion",
    "missense_variant",
    "protein_altering_variant",
    "splice_region_variant",
    "incomplete_terminal_codon_variant",
    "start_retained_variant",
    "stop_retained_variant",
    "synonymous_variant",
    "coding_sequence_variant",
    "mature_miRNA_variant",
    "five_prime_UTR_variant",
    "three_prime_UTR_variant",
    "non_coding_transcript_exon_variant",
    "intron_variant",
    "NMD_transcript_variant",
    "non_coding_transcript_variant",
    "upstream_gene_variant",
    "downstream_gene_variant",
    "regulatory_region_variant",
    "feature_elongation",
    "feature_truncation",
    "intergenic_variant",
];

/// Map a raw Nirvana copy-number variant type onto the knowledge-base
/// category label used in the output.
pub fn kb_category(variant_type: &str) -> &'static str {
    match variant_type {
        "copy_number_gain" | "gain" => "copy gain",
        "copy_number_loss" | "loss" => "copy loss",
        "amplification" | "copy_number_amplification" => "amplification",
        "copy_number_deletion" | "deletion" => "deep deletion",
        _ => "unknown",
    }
}
