//! Software raster with canvas-style state.

use std::f64::consts::PI;

use orbita_core::{Color, Font, Rgba, Shadow, Surface, TextAlign, TextBaseline, Viewport};

/// Longest line, in pixel steps, that will be rasterized.
const MAX_LINE_STEPS: f64 = 16_384.0;

/// Glow opacity at full blur.
const GLOW_INTENSITY: f64 = 0.35;

/// Blur radius treated as full glow strength.
const GLOW_FULL_BLUR: f64 = 30.0;

/// Font size from which text is drawn bold.
const BOLD_FONT_SIZE: f64 = 18.0;

/// 2D affine transform, canvas layout:
/// `x' = a·x + c·y + e`, `y' = b·x + d·y + f`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn scaling(s: f64) -> Self {
        Affine {
            a: s,
            d: s,
            ..Self::IDENTITY
        }
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Post-multiply by a translation.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.e += self.a * dx + self.c * dy;
        self.f += self.b * dx + self.d * dy;
    }

    /// Post-multiply by a scale.
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.a *= sx;
        self.b *= sx;
        self.c *= sy;
        self.d *= sy;
    }

    /// Uniform length factor, used for radii and line widths.
    pub fn length_scale(&self) -> f64 {
        (self.a * self.d - self.b * self.c).abs().sqrt()
    }
}

/// A line of text placed on the cell grid.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// Column of the first character. May be negative when clipped.
    pub col: i32,
    pub row: i32,
    pub text: String,
    pub color: (u8, u8, u8),
    pub bold: bool,
}

#[derive(Debug, Clone, Copy)]
struct State {
    transform: Affine,
    fill: Color,
    stroke: Color,
    line_width: f64,
    font: Font,
    shadow: Shadow,
}

impl State {
    fn new(scale: f64) -> Self {
        Self {
            transform: Affine::scaling(1.0 / scale),
            fill: Color::Rgb(0, 0, 0),
            stroke: Color::Rgb(0, 0, 0),
            line_width: 1.0,
            font: Font::default(),
            shadow: Shadow::NONE,
        }
    }
}

/// RGB pixel grid backing one terminal screen.
///
/// Scene coordinates are mapped to pixels by `1 / scale`, so the viewport
/// reported by [`Raster::viewport`] is `scale` times the pixel grid.
#[derive(Debug, Clone)]
pub struct Raster {
    cols: u16,
    rows: u16,
    scale: f64,
    pixels: Vec<[f64; 3]>,
    texts: Vec<TextRun>,
    state: State,
    stack: Vec<State>,
}

impl Raster {
    /// An empty raster. `scale` is scene units per pixel and must be
    /// positive; non-positive values fall back to 1.
    pub fn new(scale: f64) -> Self {
        let scale = if scale > 0.0 && scale.is_finite() {
            scale
        } else {
            1.0
        };
        Self {
            cols: 0,
            rows: 0,
            scale,
            pixels: Vec::new(),
            texts: Vec::new(),
            state: State::new(scale),
            stack: Vec::new(),
        }
    }

    /// Match the terminal size. Returns true when the grid was reallocated.
    pub fn fit(&mut self, cols: u16, rows: u16) -> bool {
        if cols == self.cols && rows == self.rows {
            return false;
        }
        self.cols = cols;
        self.rows = rows;
        self.pixels = vec![[0.0; 3]; cols as usize * rows as usize * 2];
        self.texts.clear();
        self.state = State::new(self.scale);
        self.stack.clear();
        true
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn width_px(&self) -> usize {
        self.cols as usize
    }

    pub fn height_px(&self) -> usize {
        self.rows as usize * 2
    }

    /// Scene-space size covered by the grid.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            self.width_px() as f64 * self.scale,
            self.height_px() as f64 * self.scale,
        )
    }

    /// Current transform.
    pub fn transform(&self) -> Affine {
        self.state.transform
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<(u8, u8, u8)> {
        if x >= self.width_px() || y >= self.height_px() {
            return None;
        }
        let [r, g, b] = self.pixels[y * self.width_px() + x];
        Some((to_channel(r), to_channel(g), to_channel(b)))
    }

    pub fn texts(&self) -> &[TextRun] {
        &self.texts
    }

    /// Pixel index range whose centers fall inside the transformed rect.
    fn pixel_bounds(&self, x: f64, y: f64, width: f64, height: f64) -> (usize, usize, usize, usize) {
        let t = self.state.transform;
        let (x0, y0) = t.apply(x, y);
        let (x1, y1) = t.apply(x + width, y + height);
        let (min_x, max_x) = (x0.min(x1), x0.max(x1));
        let (min_y, max_y) = (y0.min(y1), y0.max(y1));
        (
            clamp_index(min_x, self.width_px()),
            clamp_index(max_x, self.width_px()),
            clamp_index(min_y, self.height_px()),
            clamp_index(max_y, self.height_px()),
        )
    }

    fn blend(&mut self, index: usize, color: Rgba, coverage: f64) {
        let alpha = (color.a * coverage).clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let pixel = &mut self.pixels[index];
        for (channel, value) in pixel.iter_mut().zip([color.r, color.g, color.b]) {
            *channel = *channel * (1.0 - alpha) + f64::from(value) * alpha;
        }
    }

    fn index_at(&self, x: f64, y: f64) -> Option<usize> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        (x < self.width_px() && y < self.height_px()).then(|| y * self.width_px() + x)
    }

    /// Pixel indices inside a disc given in pixel space.
    fn disc(&self, cx: f64, cy: f64, radius: f64, out: &mut Vec<usize>) {
        let x0 = clamp_index(cx - radius, self.width_px());
        let x1 = clamp_index(cx + radius, self.width_px());
        let y0 = clamp_index(cy - radius, self.height_px());
        let y1 = clamp_index(cy + radius, self.height_px());
        for py in y0..y1 {
            for px in x0..x1 {
                let dx = px as f64 + 0.5 - cx;
                let dy = py as f64 + 0.5 - cy;
                if dx * dx + dy * dy <= radius * radius {
                    out.push(py * self.width_px() + px);
                }
            }
        }
    }

    fn paint_glow(&mut self, shadow: Shadow, col: i32, row: i32, len: usize) {
        let strength = (shadow.blur / GLOW_FULL_BLUR).clamp(0.0, 1.0) * GLOW_INTENSITY;
        let color = shadow.color.to_rgba();
        let first = (col - 1).max(0) as usize;
        let last = (col + len as i32 + 1).max(0) as usize;
        for py in [row * 2, row * 2 + 1] {
            if py < 0 {
                continue;
            }
            for px in first..last.min(self.width_px()) {
                if let Some(index) = self.index_at(px as f64, py as f64) {
                    self.blend(index, color, strength);
                }
            }
        }
    }
}

impl Surface for Raster {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let (x0, x1, y0, y1) = self.pixel_bounds(x, y, width, height);
        let w = self.width_px();
        for py in y0..y1 {
            self.pixels[py * w + x0..py * w + x1].fill([0.0; 3]);
        }
        self.texts.retain(|run| {
            let (px, py) = (run.col.max(0) as usize, run.row.max(0) as usize * 2);
            !(x0 <= px && px < x1 && y0 <= py && py < y1)
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let (x0, x1, y0, y1) = self.pixel_bounds(x, y, width, height);
        let color = self.state.fill.to_rgba();
        let w = self.width_px();
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend(py * w + px, color, 1.0);
            }
        }
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64) {
        let (cx, cy) = self.state.transform.apply(x, y);
        let r = radius * self.state.transform.length_scale();
        let color = self.state.fill.to_rgba();
        if r <= 0.0 {
            return;
        }
        if r < 0.5 {
            // Sub-pixel disc: weight by the area it covers.
            if let Some(index) = self.index_at(cx, cy) {
                self.blend(index, color, (PI * r * r).min(1.0));
            }
            return;
        }
        let mut covered = Vec::new();
        self.disc(cx, cy, r, &mut covered);
        for index in covered {
            self.blend(index, color, 1.0);
        }
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64)) {
        let t = self.state.transform;
        let (x0, y0) = t.apply(from.0, from.1);
        let (x1, y1) = t.apply(to.0, to.1);
        let width = self.state.line_width * t.length_scale();
        let color = self.state.stroke.to_rgba();
        if width <= 0.0 {
            return;
        }

        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().clamp(1.0, MAX_LINE_STEPS);
        let mut covered = Vec::new();
        for i in 0..=steps as usize {
            let k = i as f64 / steps;
            let (x, y) = (x0 + (x1 - x0) * k, y0 + (y1 - y0) * k);
            if width > 1.0 {
                self.disc(x, y, width / 2.0, &mut covered);
            } else if let Some(index) = self.index_at(x, y) {
                covered.push(index);
            }
        }
        covered.sort_unstable();
        covered.dedup();

        let coverage = width.min(1.0);
        for index in covered {
            self.blend(index, color, coverage);
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let color = self.state.fill.to_rgba();
        if color.a <= 0.0 || text.is_empty() {
            return;
        }
        let (px, py) = self.state.transform.apply(x, y);
        let len = text.chars().count();
        let font = self.state.font;

        let left = match font.align {
            TextAlign::Left => px,
            TextAlign::Center => px - len as f64 / 2.0,
            TextAlign::Right => px - len as f64,
        };
        let top = match font.baseline {
            TextBaseline::Top => py,
            TextBaseline::Middle => py - 1.0,
            TextBaseline::Bottom => py - 2.0,
        };
        let col = left.round() as i32;
        let row = (top / 2.0).round() as i32;
        let visible = (0..i32::from(self.rows)).contains(&row)
            && col < i32::from(self.cols)
            && col + len as i32 > 0;
        if !visible {
            return;
        }

        let shadow = self.state.shadow;
        if !shadow.is_none() {
            self.paint_glow(shadow, col, row, len);
        }

        self.texts.push(TextRun {
            col,
            row,
            text: text.to_string(),
            color: (color.r, color.g, color.b),
            bold: font.size >= BOLD_FONT_SIZE,
        });
    }

    fn set_fill(&mut self, color: Color) {
        self.state.fill = color;
    }

    fn set_stroke(&mut self, color: Color, width: f64) {
        self.state.stroke = color;
        self.state.line_width = width;
    }

    fn set_font(&mut self, font: Font) {
        self.state.font = font;
    }

    fn set_shadow(&mut self, shadow: Shadow) {
        self.state.shadow = shadow;
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state.transform.translate(dx, dy);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.state.transform.scale(sx, sy);
    }
}

/// First pixel index whose center is at or past `edge`, clamped to `len`.
fn clamp_index(edge: f64, len: usize) -> usize {
    let index = (edge - 0.5).ceil();
    if index.is_nan() || index <= 0.0 {
        0
    } else {
        (index as usize).min(len)
    }
}

fn to_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raster(cols: u16, rows: u16) -> Raster {
        let mut raster = Raster::new(1.0);
        raster.fit(cols, rows);
        raster
    }

    #[test]
    fn test_fit_and_viewport() {
        let mut raster = Raster::new(2.0);
        assert!(raster.fit(80, 24));
        assert!(!raster.fit(80, 24));
        assert_eq!(raster.width_px(), 80);
        assert_eq!(raster.height_px(), 48);
        assert_eq!(raster.viewport(), Viewport::new(160.0, 96.0));
    }

    #[test]
    fn test_invalid_scale_falls_back() {
        let mut raster = Raster::new(0.0);
        raster.fit(10, 5);
        assert_eq!(raster.viewport(), Viewport::new(10.0, 10.0));
    }

    #[test]
    fn test_save_restore_round_trip() {
        let mut raster = raster(10, 5);
        let before = raster.transform();
        raster.save();
        raster.translate(5.0, 5.0);
        raster.scale(1.05, 1.05);
        raster.translate(-5.0, -5.0);
        raster.set_fill(Color::Rgb(255, 0, 0));
        assert_ne!(raster.transform(), before);
        raster.restore();
        assert_eq!(raster.transform(), before);
        // Extra restores are ignored.
        raster.restore();
        assert_eq!(raster.transform(), before);
    }

    #[test]
    fn test_zoom_about_center_keeps_center_fixed() {
        let mut transform = Affine::IDENTITY;
        transform.translate(40.0, 30.0);
        transform.scale(1.05, 1.05);
        transform.translate(-40.0, -30.0);
        let (x, y) = transform.apply(40.0, 30.0);
        assert!((x - 40.0).abs() < 1e-9 && (y - 30.0).abs() < 1e-9);
        let (x, _) = transform.apply(50.0, 30.0);
        assert!((x - 50.5).abs() < 1e-9);
    }

    #[test]
    fn test_fill_rect_blends_and_clear_resets() {
        let mut raster = raster(4, 2);
        raster.set_fill(Color::Rgb(200, 100, 0));
        raster.fill_rect(0.0, 0.0, 4.0, 4.0);
        assert_eq!(raster.pixel(3, 3), Some((200, 100, 0)));

        raster.set_fill(Color::Rgba(0, 0, 0, 0.5));
        raster.fill_rect(0.0, 0.0, 2.0, 4.0);
        assert_eq!(raster.pixel(0, 0), Some((100, 50, 0)));
        assert_eq!(raster.pixel(2, 0), Some((200, 100, 0)));

        raster.clear_rect(0.0, 0.0, 4.0, 4.0);
        assert_eq!(raster.pixel(2, 0), Some((0, 0, 0)));
    }

    #[test]
    fn test_trail_wash_is_faint() {
        let mut raster = raster(2, 1);
        raster.set_fill(Color::Rgba(26, 0, 26, 0.15));
        raster.fill_rect(0.0, 0.0, 2.0, 2.0);
        assert_eq!(raster.pixel(0, 0), Some((4, 0, 4)));
    }

    #[test]
    fn test_fill_circle() {
        let mut raster = raster(10, 5);
        raster.set_fill(Color::Rgb(255, 255, 255));
        raster.fill_circle(5.0, 5.0, 2.0);
        assert_eq!(raster.pixel(5, 5), Some((255, 255, 255)));
        assert_eq!(raster.pixel(4, 4), Some((255, 255, 255)));
        assert_eq!(raster.pixel(0, 0), Some((0, 0, 0)));
        assert_eq!(raster.pixel(9, 9), Some((0, 0, 0)));
    }

    #[test]
    fn test_tiny_circle_is_dimmed() {
        let mut raster = raster(4, 2);
        raster.set_fill(Color::Rgb(255, 255, 255));
        raster.fill_circle(1.5, 1.5, 0.25);
        let (r, _, _) = raster.pixel(1, 1).unwrap();
        assert!(r > 0 && r < 255);
    }

    #[test]
    fn test_offscreen_shapes_are_clipped() {
        let mut raster = raster(4, 2);
        raster.set_fill(Color::Rgb(255, 255, 255));
        raster.fill_circle(-50.0, -50.0, 3.0);
        raster.fill_rect(100.0, 100.0, 10.0, 10.0);
        raster.set_stroke(Color::Rgb(255, 255, 255), 2.0);
        raster.stroke_line((-100.0, -100.0), (-10.0, -50.0));
        assert!((0..4).all(|x| (0..4).all(|y| raster.pixel(x, y) == Some((0, 0, 0)))));
    }

    #[test]
    fn test_stroke_line_blends_each_pixel_once() {
        let mut raster = raster(10, 1);
        raster.set_stroke(Color::Rgba(255, 255, 255, 0.8), 1.0);
        raster.stroke_line((0.5, 0.5), (9.5, 0.5));
        for x in 0..10 {
            assert_eq!(raster.pixel(x, 0), Some((204, 204, 204)));
        }
        assert_eq!(raster.pixel(0, 1), Some((0, 0, 0)));
    }

    #[test]
    fn test_text_is_centered_on_cells() {
        let mut raster = raster(20, 5);
        raster.set_fill(Color::Hsl(0.0, 0.7, 0.8));
        raster.set_font(Font {
            size: 20.0,
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
        });
        raster.fill_text("Te amo", 10.0, 5.0);
        assert_eq!(
            raster.texts(),
            &[TextRun {
                col: 7,
                row: 2,
                text: "Te amo".to_string(),
                color: (239, 168, 168),
                bold: true,
            }]
        );
    }

    #[test]
    fn test_text_glow_tints_background() {
        let mut raster = raster(20, 5);
        raster.set_fill(Color::Rgb(255, 255, 255));
        raster.set_shadow(Shadow {
            color: Color::Rgba(179, 102, 255, 0.9),
            blur: 30.0,
        });
        raster.fill_text("hi", 4.0, 4.0);
        let (r, g, b) = raster.pixel(4, 4).unwrap();
        assert!(r > 0 && g > 0 && b > r);

        raster.clear_rect(0.0, 0.0, 20.0, 10.0);
        assert!(raster.texts().is_empty());
        assert_eq!(raster.pixel(4, 4), Some((0, 0, 0)));
    }

    #[test]
    fn test_offscreen_text_is_dropped() {
        let mut raster = raster(10, 3);
        raster.set_fill(Color::Rgb(255, 255, 255));
        raster.fill_text("below", 2.0, 40.0);
        raster.fill_text("above", 2.0, -6.0);
        raster.fill_text("left", -4.0, 2.0);
        raster.fill_text("right", 10.0, 2.0);
        assert!(raster.texts().is_empty());

        raster.fill_text("edge", -3.0, 2.0);
        assert_eq!(raster.texts().len(), 1);
    }

    #[test]
    fn test_zero_sized_raster_accepts_draws() {
        let mut raster = Raster::new(2.0);
        raster.fit(0, 0);
        raster.clear_rect(0.0, 0.0, 0.0, 0.0);
        raster.set_fill(Color::Rgb(255, 255, 255));
        raster.fill_rect(0.0, 0.0, 10.0, 10.0);
        raster.fill_circle(1.0, 1.0, 1.0);
        raster.set_stroke(Color::Rgb(255, 255, 255), 3.0);
        raster.stroke_line((0.0, 0.0), (10.0, 10.0));
        raster.fill_text("x", 0.0, 0.0);
        assert_eq!(raster.pixel(0, 0), None);
    }
}
