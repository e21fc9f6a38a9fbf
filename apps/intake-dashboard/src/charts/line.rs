//! Gráfico de linha das admissões por dia

use chrono::{NaiveDate, NaiveDateTime};
use image::{Rgb, RgbImage};
use intake_db::{PatientVisit, ADMIT_TIME_FORMAT};
use std::collections::BTreeMap;

use super::axes::PlotArea;
use super::canvas::{Canvas, BLACK};
use super::{ChartError, CHART_HEIGHT, CHART_WIDTH, PALETTE, TITLE_SCALE};

pub const LINE_COLOR: Rgb<u8> = PALETTE[0];
const MARKER_RADIUS: i64 = 4;
const LINE_THICKNESS: i64 = 2;
const LABEL_SCALE: i64 = 1;
/// Máximo de datas escritas no eixo X; as demais ficam só com o ponto
const MAX_X_LABELS: usize = 8;

/// Conta admissões por data de calendário, em ordem cronológica
pub fn admissions_by_date(visits: &[PatientVisit]) -> Result<Vec<(NaiveDate, usize)>, ChartError> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for visit in visits {
        let admitted = NaiveDateTime::parse_from_str(&visit.admit_time, ADMIT_TIME_FORMAT)
            .map_err(|source| ChartError::MalformedAdmitTime {
                patient_id: visit.id.clone(),
                value: visit.admit_time.clone(),
                source,
            })?;
        *counts.entry(admitted.date()).or_insert(0) += 1;
    }
    Ok(counts.into_iter().collect())
}

/// Um ponto por data distinta, ligados por segmentos. Datas são posicionadas
/// no eixo X proporcionalmente ao intervalo de dias entre elas.
pub fn render_admissions_over_time(visits: &[PatientVisit]) -> Result<RgbImage, ChartError> {
    let series = admissions_by_date(visits)?;

    let mut canvas = Canvas::new(CHART_WIDTH, CHART_HEIGHT);
    let max_count = series.iter().map(|(_, count)| *count as i64).max().unwrap_or(0);
    let area = PlotArea::new(&canvas, max_count);

    canvas.text_centered(CHART_WIDTH as i64 / 2, 16, "Admissions Over Time", TITLE_SCALE, BLACK);
    area.draw_frame(&mut canvas);
    area.draw_y_label(&mut canvas, "Admissions");
    area.draw_x_label(&mut canvas, "Date");

    let points = plot_points(&area, &series);

    for pair in points.windows(2) {
        canvas.line(pair[0], pair[1], LINE_THICKNESS, LINE_COLOR);
    }
    for point in &points {
        canvas.fill_circle(point.0, point.1, MARKER_RADIUS, LINE_COLOR);
    }

    let stride = ((series.len() + MAX_X_LABELS - 1) / MAX_X_LABELS).max(1);
    for (i, ((date, _), point)) in series.iter().zip(&points).enumerate() {
        if i % stride != 0 {
            continue;
        }
        canvas.line((point.0, area.bottom), (point.0, area.bottom + 4), 1, BLACK);
        canvas.text_centered(
            point.0,
            area.bottom + 8,
            &date.format("%Y-%m-%d").to_string(),
            LABEL_SCALE,
            BLACK,
        );
    }

    Ok(canvas.into_image())
}

/// Coordenadas de pixel de cada ponto da série
fn plot_points(area: &PlotArea, series: &[(NaiveDate, usize)]) -> Vec<(i64, i64)> {
    let (Some((first, _)), Some((last, _))) = (series.first(), series.last()) else {
        return Vec::new();
    };
    let span_days = (*last - *first).num_days();
    // folga nas bordas para marcadores e rótulos
    let inset = area.width() / 10;
    let usable = area.width() - 2 * inset;

    series
        .iter()
        .map(|(date, count)| {
            let x = if span_days == 0 {
                area.left + area.width() / 2
            } else {
                let offset = (*date - *first).num_days() as f64 / span_days as f64;
                area.left + inset + (offset * usable as f64).round() as i64
            };
            (x, area.y_for(*count as f64))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_db::testing::visit;

    fn admitted(id: &str, admit_time: &str) -> PatientVisit {
        let mut v = visit(id, "Fever", "Flu");
        v.admit_time = admit_time.to_string();
        v
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("data válida")
    }

    #[test]
    fn test_buckets_are_chronological_not_insertion_order() {
        let visits = vec![
            admitted("1", "2024-03-05 10:00"),
            admitted("2", "2024-02-28 23:59"),
            admitted("3", "2024-03-05 08:30"),
            admitted("4", "2024-03-01 00:00"),
        ];

        let series = admissions_by_date(&visits).unwrap();

        assert_eq!(
            series,
            vec![(date(2024, 2, 28), 1), (date(2024, 3, 1), 1), (date(2024, 3, 5), 2)]
        );
    }

    #[test]
    fn test_malformed_admit_time_is_rejected() {
        let visits = vec![admitted("ok", "2024-03-05 10:00"), admitted("bad", "05/03/2024")];

        let err = admissions_by_date(&visits).unwrap_err();
        match err {
            ChartError::MalformedAdmitTime { patient_id, value, .. } => {
                assert_eq!(patient_id, "bad");
                assert_eq!(value, "05/03/2024");
            }
        }
        assert!(render_admissions_over_time(&visits).is_err());
    }

    #[test]
    fn test_markers_drawn_for_each_date() {
        let visits = vec![
            admitted("1", "2024-03-01 10:00"),
            admitted("2", "2024-03-03 10:00"),
            admitted("3", "2024-03-03 11:00"),
        ];

        let image = render_admissions_over_time(&visits).unwrap();
        let canvas = Canvas::new(CHART_WIDTH, CHART_HEIGHT);
        let area = PlotArea::new(&canvas, 2);
        let series = admissions_by_date(&visits).unwrap();

        for (x, y) in plot_points(&area, &series) {
            assert_eq!(*image.get_pixel(x as u32, y as u32), LINE_COLOR);
        }
    }

    #[test]
    fn test_empty_visits_render_axes_only() {
        let image = render_admissions_over_time(&[]).unwrap();

        assert_eq!(image.dimensions(), (CHART_WIDTH, CHART_HEIGHT));
        assert!(!image.pixels().any(|p| *p == LINE_COLOR));
    }
}
