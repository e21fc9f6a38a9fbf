//! Área de plotagem com eixo Y de contagens, compartilhada por barras e linha

use super::canvas::{text_height, text_width, Canvas, BLACK, GRID};

const MARGIN_LEFT: i64 = 70;
const MARGIN_RIGHT: i64 = 30;
const MARGIN_TOP: i64 = 60;
const MARGIN_BOTTOM: i64 = 70;
const TICK_LEN: i64 = 5;
const LABEL_SCALE: i64 = 2;
const TARGET_TICKS: i64 = 5;

/// Retângulo interno onde os dados são desenhados
#[derive(Debug, Clone, Copy)]
pub struct PlotArea {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
    /// Valor no topo do eixo Y
    pub y_max: i64,
    /// Passo entre marcas do eixo Y
    pub y_step: i64,
}

impl PlotArea {
    pub fn new(canvas: &Canvas, max_value: i64) -> Self {
        let y_step = tick_step(max_value);
        let y_max = ((max_value.max(1) + y_step - 1) / y_step) * y_step;
        Self {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            right: canvas.width() - MARGIN_RIGHT,
            bottom: canvas.height() - MARGIN_BOTTOM,
            y_max,
            y_step,
        }
    }

    pub fn width(&self) -> i64 {
        self.right - self.left
    }

    /// Linha de pixel correspondente a `value` no eixo Y
    pub fn y_for(&self, value: f64) -> i64 {
        let span = (self.bottom - self.top) as f64;
        self.bottom - (value / self.y_max as f64 * span).round() as i64
    }

    /// Eixos, grade horizontal e rótulos das marcas do eixo Y
    pub fn draw_frame(&self, canvas: &mut Canvas) {
        let mut value = 0;
        while value <= self.y_max {
            let y = self.y_for(value as f64);
            if value > 0 {
                canvas.line((self.left + 1, y), (self.right, y), 1, GRID);
            }
            canvas.line((self.left - TICK_LEN, y), (self.left, y), 1, BLACK);
            let label = value.to_string();
            canvas.text(
                self.left - TICK_LEN - 4 - text_width(&label, LABEL_SCALE),
                y - text_height(LABEL_SCALE) / 2,
                &label,
                LABEL_SCALE,
                BLACK,
            );
            value += self.y_step;
        }

        canvas.line((self.left, self.top), (self.left, self.bottom), 1, BLACK);
        canvas.line((self.left, self.bottom), (self.right, self.bottom), 1, BLACK);
    }

    /// Rótulo do eixo Y, escrito na horizontal acima do eixo
    pub fn draw_y_label(&self, canvas: &mut Canvas, label: &str) {
        canvas.text(
            self.left - TICK_LEN,
            self.top - text_height(LABEL_SCALE) - 8,
            label,
            LABEL_SCALE,
            BLACK,
        );
    }

    /// Rótulo do eixo X, centralizado abaixo da área
    pub fn draw_x_label(&self, canvas: &mut Canvas, label: &str) {
        canvas.text_centered(
            self.left + self.width() / 2,
            canvas.height() - text_height(LABEL_SCALE) - 10,
            label,
            LABEL_SCALE,
            BLACK,
        );
    }
}

/// Passo inteiro que gera no máximo `TARGET_TICKS` intervalos
fn tick_step(max_value: i64) -> i64 {
    let max_value = max_value.max(1);
    let raw = (max_value + TARGET_TICKS - 1) / TARGET_TICKS;
    // arredonda para 1, 2 ou 5 vezes uma potência de dez
    let mut magnitude = 1;
    while magnitude * 10 <= raw {
        magnitude *= 10;
    }
    [1, 2, 5, 10]
        .iter()
        .map(|m| m * magnitude)
        .find(|step| *step >= raw)
        .unwrap_or(10 * magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_step() {
        assert_eq!(tick_step(0), 1);
        assert_eq!(tick_step(4), 1);
        assert_eq!(tick_step(7), 2);
        assert_eq!(tick_step(23), 5);
        assert_eq!(tick_step(480), 100);
    }

    #[test]
    fn test_y_mapping_spans_area() {
        let canvas = Canvas::new(640, 480);
        let area = PlotArea::new(&canvas, 4);

        assert_eq!(area.y_max, 4);
        assert_eq!(area.y_for(0.0), area.bottom);
        assert_eq!(area.y_for(4.0), area.top);
    }

    #[test]
    fn test_y_max_rounds_up_to_step() {
        let canvas = Canvas::new(640, 480);
        assert_eq!(PlotArea::new(&canvas, 7).y_max, 8);
        assert_eq!(PlotArea::new(&canvas, 0).y_max, 1);
    }
}
