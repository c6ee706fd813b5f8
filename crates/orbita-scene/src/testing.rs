//! Recording surface for draw-call assertions.

use orbita_core::{Color, Font, Shadow, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Clear(f64, f64, f64, f64),
    FillRect(f64, f64, f64, f64),
    Circle { x: f64, y: f64, radius: f64 },
    Line { from: (f64, f64), to: (f64, f64) },
    Text { text: String, x: f64, y: f64 },
    Fill(Color),
    Stroke(Color, f64),
    Font(Font),
    Shadow(Shadow),
    Save,
    Restore,
    Translate(f64, f64),
    Scale(f64, f64),
}

/// Surface that remembers every call and the live shadow setting.
#[derive(Debug)]
pub struct Recorder {
    pub calls: Vec<Call>,
    pub shadow: Shadow,
    pub depth: usize,
}

impl Default for Recorder {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            shadow: Shadow::NONE,
            depth: 0,
        }
    }
}

impl Recorder {
    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl Surface for Recorder {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.calls.push(Call::Clear(x, y, width, height));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.calls.push(Call::FillRect(x, y, width, height));
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64) {
        self.calls.push(Call::Circle { x, y, radius });
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64)) {
        self.calls.push(Call::Line { from, to });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.calls.push(Call::Text {
            text: text.to_string(),
            x,
            y,
        });
    }

    fn set_fill(&mut self, color: Color) {
        self.calls.push(Call::Fill(color));
    }

    fn set_stroke(&mut self, color: Color, width: f64) {
        self.calls.push(Call::Stroke(color, width));
    }

    fn set_font(&mut self, font: Font) {
        self.calls.push(Call::Font(font));
    }

    fn set_shadow(&mut self, shadow: Shadow) {
        self.shadow = shadow;
        self.calls.push(Call::Shadow(shadow));
    }

    fn save(&mut self) {
        self.depth += 1;
        self.calls.push(Call::Save);
    }

    fn restore(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.calls.push(Call::Restore);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.calls.push(Call::Translate(dx, dy));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.calls.push(Call::Scale(sx, sy));
    }
}
