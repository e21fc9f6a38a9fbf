//! Páginas HTML mínimas do operador

use axum::http::StatusCode;

use crate::error::message_for_code;
use crate::service::TriagedVisit;
use crate::stats::{DashboardStats, PrevalenceRow};

/// Imagens do painel já codificadas em base64 (PNG)
pub struct EncodedCharts {
    pub disease_pie: String,
    pub symptom_bar: String,
    pub admissions_line: String,
}

/// Escapa texto livre para inclusão em HTML
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n<nav><a href=\"/\">Patients</a> | <a href=\"/dashboard\">Dashboard</a> | \
         <a href=\"/export\">Export CSV</a></nav>\n{body}\n</body></html>\n",
        title = escape(title),
        body = body,
    )
}

/// Lista de pacientes com o formulário de admissão; `error` vem de `?error=`
pub fn patients_page(patients: &[TriagedVisit], error: Option<&str>) -> String {
    let mut body = String::from("<h1>Patient Intake</h1>\n");

    if let Some(code) = error {
        body.push_str(&format!(
            "<p class=\"error\" role=\"alert\">{}</p>\n",
            escape(message_for_code(code))
        ));
    }

    body.push_str(
        "<form method=\"post\" action=\"/add\">\n\
         <input name=\"id\" placeholder=\"ID\">\n\
         <input name=\"symptoms\" placeholder=\"Symptoms\">\n\
         <input name=\"diagnosis\" placeholder=\"Diagnosis\">\n\
         <input name=\"vitals\" placeholder=\"Vitals\">\n\
         <input name=\"hospital\" placeholder=\"Hospital\">\n\
         <select name=\"sync\"><option value=\"Y\">Synced</option><option value=\"N\">Not synced</option></select>\n\
         <input name=\"notes\" placeholder=\"Notes\">\n\
         <button type=\"submit\">Add patient</button>\n\
         </form>\n",
    );

    body.push_str(
        "<table>\n<tr><th>ID</th><th>Admit Time</th><th>Symptoms</th><th>Diagnosis</th>\
         <th>Vitals</th><th>Hospital</th><th>Sync?</th><th>Notes</th><th>Risk</th></tr>\n",
    );
    for row in patients {
        let v = &row.visit;
        body.push_str("<tr>");
        for cell in [
            &v.id,
            &v.admit_time,
            &v.symptoms,
            &v.diagnosis,
            &v.vitals,
            &v.hospital,
            &v.sync_flag,
            &v.notes,
        ] {
            body.push_str(&format!("<td>{}</td>", escape(cell)));
        }
        body.push_str(&format!("<td>{}</td></tr>\n", row.risk));
    }
    body.push_str("</table>");

    layout("Patient Intake", &body)
}

fn prevalence_table(title: &str, rows: &[PrevalenceRow]) -> String {
    let mut out = format!(
        "<h2>{}</h2>\n<table>\n<tr><th>Category</th><th>Count</th><th>%</th></tr>\n",
        escape(title)
    );
    for row in rows {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&row.category),
            row.count,
            format_percentage(row.percentage)
        ));
    }
    out.push_str("</table>\n");
    out
}

/// Porcentagem sempre com parte decimal: 40 vira "40.0", 33.33 fica "33.33"
fn format_percentage(value: f64) -> String {
    format!("{:?}", value)
}

pub fn dashboard_page(stats: &DashboardStats, charts: &EncodedCharts) -> String {
    let mut body = String::from("<h1>Dashboard</h1>\n<ul>\n");
    body.push_str(&format!("<li>Total patients: {}</li>\n", stats.total));
    body.push_str(&format!("<li>Fever cases: {}</li>\n", stats.fever_count));
    body.push_str(&format!("<li>Cough cases: {}</li>\n", stats.cough_count));
    body.push_str(&format!(
        "<li>Synced hospitals: {}</li>\n",
        stats.synced_hospital_count
    ));
    body.push_str(&format!("<li>Alert: <strong>{}</strong></li>\n</ul>\n", stats.alert));

    body.push_str(&prevalence_table("Disease Prevalence", &stats.diagnosis_prevalence));
    body.push_str(&prevalence_table("Symptom Prevalence", &stats.symptom_prevalence));

    for (alt, data) in [
        ("Disease prevalence", &charts.disease_pie),
        ("Symptom prevalence", &charts.symptom_bar),
        ("Admissions over time", &charts.admissions_line),
    ] {
        body.push_str(&format!(
            "<img alt=\"{}\" src=\"data:image/png;base64,{}\">\n",
            alt, data
        ));
    }

    layout("Dashboard", &body)
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        "<h1>{} {}</h1>\n<p>{}</p>",
        status.as_u16(),
        escape(status.canonical_reason().unwrap_or("Error")),
        escape(message)
    );
    layout("Error", &body)
}
