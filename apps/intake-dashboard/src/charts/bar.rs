//! Gráfico de barras verticais da prevalência de sintomas

use image::{Rgb, RgbImage};

use super::axes::PlotArea;
use super::canvas::{text_height, Canvas, BLACK};
use super::{CHART_HEIGHT, CHART_WIDTH, TITLE_SCALE};
use crate::stats::PrevalenceRow;

/// Cores das barras, repetidas em ciclo
pub const BAR_COLORS: [Rgb<u8>; 2] = [Rgb([0xff, 0x99, 0x99]), Rgb([0x66, 0xb3, 0xff])];

/// Fração de cada faixa ocupada pela barra
const BAR_WIDTH_RATIO: f64 = 0.8;
const LABEL_SCALE: i64 = 2;

/// Uma barra por categoria, altura = número de casos
pub fn render_symptom_bar(symptom_stats: &[PrevalenceRow]) -> RgbImage {
    let mut canvas = Canvas::new(CHART_WIDTH, CHART_HEIGHT);
    let max_count = symptom_stats.iter().map(|row| row.count).max().unwrap_or(0);
    let area = PlotArea::new(&canvas, max_count);

    canvas.text_centered(CHART_WIDTH as i64 / 2, 16, "Symptom Prevalence", TITLE_SCALE, BLACK);
    area.draw_frame(&mut canvas);
    area.draw_y_label(&mut canvas, "Number of Cases");

    if symptom_stats.is_empty() {
        return canvas.into_image();
    }

    let slot = area.width() as f64 / symptom_stats.len() as f64;
    let bar_width = (slot * BAR_WIDTH_RATIO).round() as i64;

    for (i, row) in symptom_stats.iter().enumerate() {
        let center = area.left + (slot * (i as f64 + 0.5)).round() as i64;
        let top = area.y_for(row.count as f64);
        let color = BAR_COLORS[i % BAR_COLORS.len()];

        canvas.fill_rect(center - bar_width / 2, top, bar_width, area.bottom - top, color);
        canvas.text_centered(
            center,
            top - text_height(LABEL_SCALE) - 4,
            &row.count.to_string(),
            LABEL_SCALE,
            BLACK,
        );
        canvas.text_centered(center, area.bottom + 10, &row.category, LABEL_SCALE, BLACK);
    }

    canvas.into_image()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(fever: i64, cough: i64, total: i64) -> Vec<PrevalenceRow> {
        vec![
            PrevalenceRow::new("Fever", fever, total),
            PrevalenceRow::new("Cough", cough, total),
        ]
    }

    fn count_color(image: &RgbImage, color: Rgb<u8>) -> usize {
        image.pixels().filter(|p| **p == color).count()
    }

    #[test]
    fn test_bars_use_category_colors() {
        let image = render_symptom_bar(&rows(4, 2, 10));

        assert_eq!(image.dimensions(), (CHART_WIDTH, CHART_HEIGHT));
        let fever = count_color(&image, BAR_COLORS[0]);
        let cough = count_color(&image, BAR_COLORS[1]);
        assert!(fever > 0 && cough > 0);
        // mesma largura, então a área segue a contagem
        assert!(fever > cough);
    }

    #[test]
    fn test_zero_counts_draw_no_bars() {
        let image = render_symptom_bar(&rows(0, 0, 0));

        assert_eq!(count_color(&image, BAR_COLORS[0]), 0);
        assert_eq!(count_color(&image, BAR_COLORS[1]), 0);
    }

    #[test]
    fn test_tallest_bar_reaches_top_of_axis() {
        let image = render_symptom_bar(&rows(5, 0, 5));
        let canvas = Canvas::new(CHART_WIDTH, CHART_HEIGHT);
        let area = PlotArea::new(&canvas, 5);
        let fever_center = area.left + area.width() / 4;

        assert_eq!(*image.get_pixel(fever_center as u32, (area.top + 1) as u32), BAR_COLORS[0]);
    }
}
