//! Primitivas de desenho sobre `RgbImage`
//!
//! Coordenadas são `i64` e tudo fora da imagem é recortado silenciosamente.

use image::{Rgb, RgbImage};

use super::font::{glyph, ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const GRID: Rgb<u8> = Rgb([220, 220, 220]);

pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    /// Canvas com fundo branco
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, WHITE),
        }
    }

    pub fn width(&self) -> i64 {
        self.image.width() as i64
    }

    pub fn height(&self) -> i64 {
        self.image.height() as i64
    }

    pub fn put(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        if x >= 0 && y >= 0 && x < self.width() && y < self.height() {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }

    pub fn fill_rect(&mut self, x: i64, y: i64, width: i64, height: i64, color: Rgb<u8>) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + width).min(self.width());
        let y1 = (y + height).min(self.height());
        for py in y0..y1 {
            for px in x0..x1 {
                self.image.put_pixel(px as u32, py as u32, color);
            }
        }
    }

    /// Segmento de Bresenham com pincel quadrado de lado `thickness`
    pub fn line(&mut self, from: (i64, i64), to: (i64, i64), thickness: i64, color: Rgb<u8>) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;
        let offset = thickness / 2;

        loop {
            self.fill_rect(x - offset, y - offset, thickness.max(1), thickness.max(1), color);
            if x == to.0 && y == to.1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    pub fn fill_circle(&mut self, cx: i64, cy: i64, radius: i64, color: Rgb<u8>) {
        for y in -radius..=radius {
            for x in -radius..=radius {
                if x * x + y * y <= radius * radius {
                    self.put(cx + x, cy + y, color);
                }
            }
        }
    }

    /// Escreve `text` com o canto superior esquerdo em `(x, y)`
    pub fn text(&mut self, x: i64, y: i64, text: &str, scale: i64, color: Rgb<u8>) {
        for (i, c) in text.chars().enumerate() {
            let Some(rows) = glyph(c) else { continue };
            let origin_x = x + i as i64 * ADVANCE * scale;
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                        self.fill_rect(
                            origin_x + col * scale,
                            y + row as i64 * scale,
                            scale,
                            scale,
                            color,
                        );
                    }
                }
            }
        }
    }

    /// Escreve `text` centralizado horizontalmente em `cx`
    pub fn text_centered(&mut self, cx: i64, y: i64, text: &str, scale: i64, color: Rgb<u8>) {
        let x = cx - text_width(text, scale) / 2;
        self.text(x, y, text, scale, color);
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }
}

/// Largura em pixels de `text` na escala dada, sem o espaçamento final
pub fn text_width(text: &str, scale: i64) -> i64 {
    let chars = text.chars().count() as i64;
    if chars == 0 {
        return 0;
    }
    (chars * ADVANCE - 1) * scale
}

pub fn text_height(scale: i64) -> i64 {
    GLYPH_HEIGHT * scale
}
