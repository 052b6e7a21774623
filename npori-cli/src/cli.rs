use clap::{Command, arg};

use crate::consts;

pub fn create_npori_cli() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("BC Genome Sciences Centre")
        .about("Convert Nirvana annotation JSON exports into a PORI report JSON file.")
        .arg(arg!(--cnv <FILE> "Path to the input JSON file with copy number information"))
        .arg(arg!(--vcf <FILE> "Path to the input JSON file with small mutation information"))
        .arg(arg!(--output <FILE> "Path to the output report JSON file").required(true))
        .arg(arg!(--"patient-id" <ID> "Patient ID").default_value("ANONYMOUS"))
        .arg(
            arg!(--disease <NAME> "Disease name for kbDiseaseMatch, eg: sarcoma, colorectal cancer")
                .required(true),
        )
        .arg(arg!(--project <NAME> "Project name for PORI").default_value("NoProjectName"))
        .arg(
            arg!(--template <NAME> "Template for the PORI import. See https://bcgsc.github.io/pori/ipr/templates/")
                .default_value("genomic"),
        )
}
