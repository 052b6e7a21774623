//! Small field-massaging helpers shared by the record flavors.

/// Strip the literal `chr` prefix from a chromosome name.
pub fn chromosome_number_only(chromosome: &str) -> &str {
    chromosome.strip_prefix("chr").unwrap_or(chromosome)
}

/// Join the bare chromosome number with the cytogenetic band, e.g.
/// `("chr7", "q11.1")` becomes `7:q11.1`.
pub fn convert_cytogenetic_band(chromosome: &str, band: &str) -> String {
    format!("{}:{}", chromosome_number_only(chromosome), band)
}

/// Zygosity of a diploid `a/b` genotype string: `hom`, `het`, or empty
/// when the genotype is not recognized.
pub fn determine_zygosity(genotype: &str) -> &'static str {
    match genotype {
        "0/0" | "1/1" => "hom",
        "0/1" | "1/0" => "het",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("chr7", "7")]
    #[case("7", "7")]
    #[case("chrX", "X")]
    #[case("chrM", "M")]
    fn chr_prefix_is_stripped(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(chromosome_number_only(input), expected);
    }

    #[test]
    fn band_is_joined_with_the_bare_chromosome() {
        assert_eq!(convert_cytogenetic_band("chr7", "q11.1"), "7:q11.1");
        assert_eq!(convert_cytogenetic_band("17", "p13.1"), "17:p13.1");
    }

    #[rstest]
    #[case("0/0", "hom")]
    #[case("1/1", "hom")]
    #[case("0/1", "het")]
    #[case("1/0", "het")]
    #[case("./.", "")]
    #[case("1/2", "")]
    fn zygosity_of_diploid_genotypes(#[case] genotype: &str, #[case] expected: &str) {
        assert_eq!(determine_zygosity(genotype), expected);
    }
}
