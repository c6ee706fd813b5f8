//! Paint a [`Raster`] into a ratatui buffer.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier},
    widgets::Widget,
};

use crate::raster::Raster;

/// Upper half block: foreground is the top pixel, background the bottom.
const HALF_BLOCK: char = '▀';

impl Widget for &Raster {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cols = area.width.min(self.cols());
        let rows = area.height.min(self.rows());

        for y in 0..rows {
            for x in 0..cols {
                let top = self.pixel(x as usize, y as usize * 2).unwrap_or_default();
                let bottom = self
                    .pixel(x as usize, y as usize * 2 + 1)
                    .unwrap_or_default();
                buf[(area.x + x, area.y + y)]
                    .set_char(HALF_BLOCK)
                    .set_fg(rgb(top))
                    .set_bg(rgb(bottom));
            }
        }

        for run in self.texts() {
            if run.row < 0 || run.row >= rows as i32 {
                continue;
            }
            let y = run.row as u16;
            for (i, ch) in run.text.chars().enumerate() {
                let x = run.col + i as i32;
                if x < 0 || x >= cols as i32 {
                    continue;
                }
                let x = x as u16;
                let top = self.pixel(x as usize, y as usize * 2).unwrap_or_default();
                let bottom = self
                    .pixel(x as usize, y as usize * 2 + 1)
                    .unwrap_or_default();

                let cell = &mut buf[(area.x + x, area.y + y)];
                cell.set_char(ch)
                    .set_fg(rgb(run.color))
                    .set_bg(rgb(average(top, bottom)));
                if run.bold {
                    cell.modifier.insert(Modifier::BOLD);
                }
            }
        }
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

fn average(a: (u8, u8, u8), b: (u8, u8, u8)) -> (u8, u8, u8) {
    let mid = |x: u8, y: u8| ((u16::from(x) + u16::from(y)) / 2) as u8;
    (mid(a.0, b.0), mid(a.1, b.1), mid(a.2, b.2))
}
