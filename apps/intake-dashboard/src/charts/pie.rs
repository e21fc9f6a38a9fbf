//! Gráfico de pizza da prevalência por diagnóstico

use image::{Rgb, RgbImage};
use std::f64::consts::PI;

use super::canvas::{text_height, Canvas, BLACK};
use super::{CHART_HEIGHT, CHART_WIDTH, PALETTE};
use crate::stats::PrevalenceRow;

const RADIUS: i64 = 170;
const CENTER_X: i64 = 220;
const CENTER_Y: i64 = 250;
/// Primeira fatia começa às 12 horas e as seguintes avançam no sentido anti-horário
const START_ANGLE_DEG: f64 = 90.0;
const LEGEND_X: i64 = 430;
const LEGEND_SWATCH: i64 = 14;
const LABEL_SCALE: i64 = 2;

/// Uma fatia por diagnóstico, proporcional à contagem, com a porcentagem escrita na fatia
pub fn render_disease_pie(prevalence: &[PrevalenceRow]) -> RgbImage {
    let mut canvas = Canvas::new(CHART_WIDTH, CHART_HEIGHT);
    let sum: i64 = prevalence.iter().map(|row| row.count.max(0)).sum();
    if sum == 0 {
        return canvas.into_image();
    }

    let bounds = slice_bounds(prevalence, sum);

    for dy in -RADIUS..=RADIUS {
        for dx in -RADIUS..=RADIUS {
            if dx * dx + dy * dy > RADIUS * RADIUS {
                continue;
            }
            let fraction = angle_fraction(dx, dy);
            let slice = bounds
                .iter()
                .position(|(_, end)| fraction < *end)
                .unwrap_or(bounds.len() - 1);
            canvas.put(CENTER_X + dx, CENTER_Y + dy, slice_color(slice));
        }
    }

    for (i, (row, (start, end))) in prevalence.iter().zip(&bounds).enumerate() {
        if end <= start {
            continue;
        }
        let mid = START_ANGLE_DEG.to_radians() + (start + end) / 2.0 * 2.0 * PI;
        let label_x = CENTER_X + (mid.cos() * RADIUS as f64 * 0.6).round() as i64;
        let label_y = CENTER_Y - (mid.sin() * RADIUS as f64 * 0.6).round() as i64;
        let share = (end - start) * 100.0;
        canvas.text_centered(
            label_x,
            label_y - text_height(LABEL_SCALE) / 2,
            &format!("{:.1}%", share),
            LABEL_SCALE,
            BLACK,
        );

        let legend_y = 60 + i as i64 * (LEGEND_SWATCH + 10);
        canvas.fill_rect(LEGEND_X, legend_y, LEGEND_SWATCH, LEGEND_SWATCH, slice_color(i));
        canvas.text(
            LEGEND_X + LEGEND_SWATCH + 8,
            legend_y + (LEGEND_SWATCH - text_height(LABEL_SCALE)) / 2,
            &row.category,
            LABEL_SCALE,
            BLACK,
        );
    }

    canvas.into_image()
}

fn slice_color(index: usize) -> Rgb<u8> {
    PALETTE[index % PALETTE.len()]
}

/// Intervalos acumulados `[início, fim)` de cada fatia, em frações de volta
fn slice_bounds(prevalence: &[PrevalenceRow], sum: i64) -> Vec<(f64, f64)> {
    let mut acc = 0i64;
    prevalence
        .iter()
        .map(|row| {
            let start = acc as f64 / sum as f64;
            acc += row.count.max(0);
            (start, acc as f64 / sum as f64)
        })
        .collect()
}

/// Fração de volta, no sentido anti-horário a partir das 12 horas, do pixel `(dx, dy)`
/// relativo ao centro (y da imagem cresce para baixo)
fn angle_fraction(dx: i64, dy: i64) -> f64 {
    let degrees = (-dy as f64).atan2(dx as f64).to_degrees();
    (degrees - START_ANGLE_DEG).rem_euclid(360.0) / 360.0
}
