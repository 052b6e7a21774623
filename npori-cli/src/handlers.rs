use std::fs::File;
use std::io::{BufReader, BufWriter, Write};

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde_json::{Map, Value};

use npori_core::{Adapter, CnvAdapter, VcfAdapter, convert};

pub fn run_convert(matches: &ArgMatches) -> Result<()> {
    let patient_id = matches.get_one::<String>("patient-id").expect("has default");
    let disease = matches
        .get_one::<String>("disease")
        .expect("A disease name is required.");
    let project = matches.get_one::<String>("project").expect("has default");
    let template = matches.get_one::<String>("template").expect("has default");

    let mut report = Map::new();
    report.insert("patientId".to_string(), Value::String(patient_id.clone()));
    report.insert("kbDiseaseMatch".to_string(), Value::String(disease.clone()));
    report.insert("project".to_string(), Value::String(project.clone()));
    report.insert("template".to_string(), Value::String(template.clone()));

    if let Some(cnv) = matches.get_one::<String>("cnv") {
        let records = convert_file(cnv, CnvAdapter)?;
        report.insert(CnvAdapter::SECTION.to_string(), Value::Array(records));
    }

    if let Some(vcf) = matches.get_one::<String>("vcf") {
        let records = convert_file(vcf, VcfAdapter::default())?;
        report.insert(VcfAdapter::SECTION.to_string(), Value::Array(records));
    }

    let output = matches
        .get_one::<String>("output")
        .expect("An output path is required.");
    let mut writer = BufWriter::new(
        File::create(output).with_context(|| format!("can't create output file: {}", output))?,
    );
    serde_json::to_writer_pretty(&mut writer, &Value::Object(report))?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}

fn convert_file<A: Adapter>(path: &str, adapter: A) -> Result<Vec<Value>> {
    let reader = BufReader::new(
        File::open(path).with_context(|| format!("can't read input file: {}", path))?,
    );
    let records = convert(reader, adapter)
        .with_context(|| format!("conversion failed for: {}", path))?;
    Ok(records)
}
