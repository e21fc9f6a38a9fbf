//! Geração dos gráficos do painel
//!
//! Cada função é uma transformação pura que devolve a imagem em pixels RGB;
//! a codificação (PNG, base64) fica a cargo da camada de apresentação.

mod axes;
mod bar;
mod canvas;
mod font;
mod line;
mod pie;

use image::Rgb;
use thiserror::Error;

pub use bar::render_symptom_bar;
pub use line::{admissions_by_date, render_admissions_over_time};
pub use pie::render_disease_pie;

pub const CHART_WIDTH: u32 = 640;
pub const CHART_HEIGHT: u32 = 480;
const TITLE_SCALE: i64 = 3;

/// Paleta categórica das fatias e da série de admissões
pub const PALETTE: [Rgb<u8>; 10] = [
    Rgb([0x1f, 0x77, 0xb4]),
    Rgb([0xff, 0x7f, 0x0e]),
    Rgb([0x2c, 0xa0, 0x2c]),
    Rgb([0xd6, 0x27, 0x28]),
    Rgb([0x94, 0x67, 0xbd]),
    Rgb([0x8c, 0x56, 0x4b]),
    Rgb([0xe3, 0x77, 0xc2]),
    Rgb([0x7f, 0x7f, 0x7f]),
    Rgb([0xbc, 0xbd, 0x22]),
    Rgb([0x17, 0xbe, 0xcf]),
];

/// Falhas na geração dos gráficos
#[derive(Error, Debug)]
pub enum ChartError {
    /// Horário de admissão fora do formato gravado pelo servidor: indica dado corrompido
    #[error("Horário de admissão inválido no registro {patient_id}: {value:?}")]
    MalformedAdmitTime {
        patient_id: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
