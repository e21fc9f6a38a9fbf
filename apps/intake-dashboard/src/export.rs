//! Exportação dos registros em CSV para pesquisa

use intake_db::PatientVisit;
use std::fs;
use std::io;
use std::path::Path;
use tracing::info;

/// Cabeçalho fixo do arquivo exportado
pub const CSV_HEADER: [&str; 8] = [
    "ID",
    "Admit Time",
    "Symptoms",
    "Diagnosis",
    "Vitals",
    "Hospital",
    "Sync?",
    "Notes",
];

/// Nome sugerido para o download
pub const EXPORT_FILE_NAME: &str = "intake_research_data.csv";

/// Uma linha por registro, valores crus. Só recebem aspas os campos com
/// vírgula, aspas ou quebra de linha, para que o conteúdo volte intacto.
pub fn render_csv(visits: &[PatientVisit]) -> String {
    let mut output = String::new();
    write_row(&mut output, &CSV_HEADER);

    for visit in visits {
        write_row(
            &mut output,
            &[
                visit.id.as_str(),
                visit.admit_time.as_str(),
                visit.symptoms.as_str(),
                visit.diagnosis.as_str(),
                visit.vitals.as_str(),
                visit.hospital.as_str(),
                visit.sync_flag.as_str(),
                visit.notes.as_str(),
            ],
        );
    }

    output
}

/// Grava o CSV em `path` e devolve o conteúdo para envio
pub fn write_export(path: &Path, visits: &[PatientVisit]) -> io::Result<Vec<u8>> {
    let csv = render_csv(visits).into_bytes();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, &csv)?;

    info!(path = %path.display(), records = visits.len(), "Exportação gravada");
    Ok(csv)
}

fn write_row(output: &mut String, fields: &[&str]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            output.push(',');
        }
        push_field(output, field);
    }
    output.push_str("\r\n");
}

fn push_field(output: &mut String, field: &str) {
    if field.contains([',', '"', '\r', '\n']) {
        output.push('"');
        output.push_str(&field.replace('"', "\"\""));
        output.push('"');
    } else {
        output.push_str(field);
    }
}
