//! Software raster for the terminal.
//!
//! The canvas holds `cols × 2·rows` pixels: each cell shows two vertically
//! stacked pixels through the upper-half-block glyph, foreground on top and
//! background below.  Drawing calls take virtual-screen coordinates and are
//! scaled to the current terminal size.  Text sits in a separate per-cell
//! layer that wins over pixels when presented.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::entities::Rgb;
use crate::scene::{DrawCommand, Point};

const HALF_BLOCK: char = '▀';

pub struct Canvas {
    cols: u16,
    rows: u16,
    pixels: Vec<Rgb>,
    text: Vec<Option<(char, Rgb)>>,
}

impl Canvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        let mut canvas = Self {
            cols: 0,
            rows: 0,
            pixels: Vec::new(),
            text: Vec::new(),
        };
        canvas.resize(cols, rows);
        canvas
    }

    /// Reallocate for a new terminal size; contents are cleared.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        let cells = cols as usize * rows as usize;
        self.pixels = vec![Rgb::BLACK; cells * 2];
        self.text = vec![None; cells];
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn pixel_width(&self) -> i32 {
        self.cols as i32
    }

    pub fn pixel_height(&self) -> i32 {
        self.rows as i32 * 2
    }

    pub fn pixel(&self, px: i32, py: i32) -> Option<Rgb> {
        self.index(px, py).map(|i| self.pixels[i])
    }

    pub fn text_at(&self, col: u16, row: u16) -> Option<char> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.text[row as usize * self.cols as usize + col as usize].map(|(ch, _)| ch)
    }

    // ── Coordinate mapping ───────────────────────────────────────────────────

    /// Pixels per virtual unit along each axis.
    fn scale(&self) -> (f32, f32) {
        (
            self.pixel_width() as f32 / SCREEN_WIDTH,
            self.pixel_height() as f32 / SCREEN_HEIGHT,
        )
    }

    fn to_pixels(&self, (x, y): Point) -> (f32, f32) {
        let (sx, sy) = self.scale();
        (x * sx, y * sy)
    }

    fn index(&self, px: i32, py: i32) -> Option<usize> {
        if px < 0 || py < 0 || px >= self.pixel_width() || py >= self.pixel_height() {
            return None;
        }
        Some(py as usize * self.cols as usize + px as usize)
    }

    fn put(&mut self, px: i32, py: i32, color: Rgb) {
        if let Some(i) = self.index(px, py) {
            self.pixels[i] = color;
        }
    }

    // ── Primitives ───────────────────────────────────────────────────────────

    pub fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color);
        self.text.fill(None);
    }

    /// Even-odd scanline fill, sampling at pixel centres.
    pub fn fill_polygon(&mut self, points: &[Point], color: Rgb) {
        if points.len() < 3 {
            return;
        }
        let pts: Vec<(f32, f32)> = points.iter().map(|&p| self.to_pixels(p)).collect();
        let (y_min, y_max) = pts
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));
        let first_row = (y_min.floor() as i32).max(0);
        let last_row = (y_max.ceil() as i32).min(self.pixel_height());
        let width = self.pixel_width();

        let mut crossings = Vec::with_capacity(pts.len());
        for py in first_row..last_row {
            let y = py as f32 + 0.5;
            crossings.clear();
            for (i, &(ax, ay)) in pts.iter().enumerate() {
                let (bx, by) = pts[(i + 1) % pts.len()];
                if (ay <= y) != (by <= y) {
                    crossings.push(ax + (y - ay) * (bx - ax) / (by - ay));
                }
            }
            crossings.sort_by(f32::total_cmp);
            for span in crossings.chunks_exact(2) {
                let start = ((span[0] - 0.5).ceil() as i32).max(0);
                let end = ((span[1] - 0.5).floor() as i32).min(width - 1);
                for px in start..=end {
                    self.put(px, py, color);
                }
            }
        }
    }

    pub fn polygon_outline(&mut self, points: &[Point], color: Rgb, width: f32) {
        for (i, &from) in points.iter().enumerate() {
            let to = points[(i + 1) % points.len()];
            self.line(from, to, color, width);
        }
    }

    pub fn line(&mut self, from: Point, to: Point, color: Rgb, width: f32) {
        let (sx, _) = self.scale();
        let a = self.to_pixels(from);
        let b = self.to_pixels(to);
        let bounds = (
            -1.0,
            -1.0,
            self.pixel_width() as f32 + 1.0,
            self.pixel_height() as f32 + 1.0,
        );
        let Some(((ax, ay), (bx, by))) = clip_segment(a, b, bounds) else {
            return;
        };

        let thickness = ((width * sx).round() as i32).max(1);
        let offset = (thickness - 1) / 2;
        let steps = (bx - ax).abs().max((by - ay).abs()).ceil().max(1.0) as i32;
        for step in 0..=steps {
            let t = step as f32 / steps as f32;
            let px = (ax + (bx - ax) * t).floor() as i32 - offset;
            let py = (ay + (by - ay) * t).floor() as i32 - offset;
            for dy in 0..thickness {
                for dx in 0..thickness {
                    self.put(px + dx, py + dy, color);
                }
            }
        }
    }

    /// Filled disc; the pixel under the centre is always painted.
    pub fn fill_circle(&mut self, center: Point, radius: f32, color: Rgb) {
        let (sx, sy) = self.scale();
        let (cx, cy) = self.to_pixels(center);
        let (rx, ry) = (radius * sx, radius * sy);
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        self.put(cx.floor() as i32, cy.floor() as i32, color);

        let (x0, x1) = self.clamp_x(cx - rx, cx + rx);
        let (y0, y1) = self.clamp_y(cy - ry, cy + ry);
        for py in y0..=y1 {
            for px in x0..=x1 {
                let nx = (px as f32 + 0.5 - cx) / rx;
                let ny = (py as f32 + 0.5 - cy) / ry;
                if nx * nx + ny * ny <= 1.0 {
                    self.put(px, py, color);
                }
            }
        }
    }

    /// Ring of `width` virtual pixels inside `radius`.  Rings smaller than a
    /// couple of terminal pixels are skipped; they would swallow the disc.
    pub fn circle(&mut self, center: Point, radius: f32, color: Rgb, width: f32) {
        let (sx, sy) = self.scale();
        let unit = sx.min(sy);
        if radius * unit < 1.5 {
            return;
        }
        let pixel = 1.0 / unit;
        let inner = radius - width.max(pixel) - pixel / 2.0;
        let outer = radius + pixel / 2.0;

        let (cx, cy) = self.to_pixels(center);
        let (x0, x1) = self.clamp_x(cx - outer * sx, cx + outer * sx);
        let (y0, y1) = self.clamp_y(cy - outer * sy, cy + outer * sy);
        for py in y0..=y1 {
            for px in x0..=x1 {
                let dx = (px as f32 + 0.5 - cx) / sx;
                let dy = (py as f32 + 0.5 - cy) / sy;
                let d = dx.hypot(dy);
                if d > inner && d <= outer {
                    self.put(px, py, color);
                }
            }
        }
    }

    fn clamp_x(&self, lo: f32, hi: f32) -> (i32, i32) {
        ((lo.floor() as i32).max(0), (hi.ceil() as i32).min(self.pixel_width() - 1))
    }

    fn clamp_y(&self, lo: f32, hi: f32) -> (i32, i32) {
        ((lo.floor() as i32).max(0), (hi.ceil() as i32).min(self.pixel_height() - 1))
    }

    /// Lay translucent black over everything drawn so far, text included.
    pub fn darken(&mut self, alpha: u8) {
        let keep = 255 - alpha as u32;
        let dim = |c: Rgb| {
            Rgb(
                (c.0 as u32 * keep / 255) as u8,
                (c.1 as u32 * keep / 255) as u8,
                (c.2 as u32 * keep / 255) as u8,
            )
        };
        for p in &mut self.pixels {
            *p = dim(*p);
        }
        for (_, color) in self.text.iter_mut().flatten() {
            *color = dim(*color);
        }
    }

    // ── Text ─────────────────────────────────────────────────────────────────

    pub fn text(&mut self, col: u16, row: u16, s: &str, color: Rgb) {
        if row >= self.rows {
            return;
        }
        let base = row as usize * self.cols as usize;
        for (i, ch) in s.chars().enumerate() {
            let c = col as usize + i;
            if c >= self.cols as usize {
                break;
            }
            self.text[base + c] = Some((ch, color));
        }
    }

    pub fn text_centered(&mut self, row: u16, s: &str, color: Rgb) {
        let len = s.chars().count() as u16;
        self.text(self.cols.saturating_sub(len) / 2, row, s, color);
    }

    // ── Commands & output ────────────────────────────────────────────────────

    pub fn draw(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Polygon {
                points,
                fill,
                outline,
                outline_width,
            } => {
                self.fill_polygon(points, *fill);
                self.polygon_outline(points, *outline, *outline_width);
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
                width,
            } => {
                if *width > 0.0 {
                    self.circle(*center, *radius, *color, *width);
                } else {
                    self.fill_circle(*center, *radius, *color);
                }
            }
            DrawCommand::Line {
                from,
                to,
                color,
                width,
            } => self.line(*from, *to, *color, *width),
        }
    }

    /// Write the frame to the terminal, switching colours only when needed.
    pub fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let cols = self.cols as usize;
        let mut fg: Option<Rgb> = None;
        let mut bg: Option<Rgb> = None;
        let mut run = String::new();

        for row in 0..self.rows as usize {
            out.queue(cursor::MoveTo(0, row as u16))?;
            for col in 0..cols {
                let top = self.pixels[2 * row * cols + col];
                let bottom = self.pixels[(2 * row + 1) * cols + col];
                let (ch, want_fg, want_bg) = match self.text[row * cols + col] {
                    Some((ch, color)) => (ch, color, top),
                    None => (HALF_BLOCK, top, bottom),
                };
                if fg != Some(want_fg) || bg != Some(want_bg) {
                    if !run.is_empty() {
                        out.queue(Print(&run))?;
                        run.clear();
                    }
                    if fg != Some(want_fg) {
                        out.queue(style::SetForegroundColor(to_color(want_fg)))?;
                        fg = Some(want_fg);
                    }
                    if bg != Some(want_bg) {
                        out.queue(style::SetBackgroundColor(to_color(want_bg)))?;
                        bg = Some(want_bg);
                    }
                }
                run.push(ch);
            }
            if !run.is_empty() {
                out.queue(Print(&run))?;
                run.clear();
            }
        }

        out.queue(style::ResetColor)?;
        out.flush()
    }
}

fn to_color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

/// Liang–Barsky clip of segment `a→b` to `(x_min, y_min, x_max, y_max)`.
///
/// Runs in f64: a vertex just past the near plane projects millions of
/// pixels away, where f32 cannot resolve the screen edge.
fn clip_segment(
    a: (f32, f32),
    b: (f32, f32),
    (x_min, y_min, x_max, y_max): (f32, f32, f32, f32),
) -> Option<((f32, f32), (f32, f32))> {
    let (ax, ay) = (a.0 as f64, a.1 as f64);
    let (dx, dy) = (b.0 as f64 - ax, b.1 as f64 - ay);
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for (p, q) in [
        (-dx, ax - x_min as f64),
        (dx, x_max as f64 - ax),
        (-dy, ay - y_min as f64),
        (dy, y_max as f64 - ay),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((
        ((ax + t0 * dx) as f32, (ay + t0 * dy) as f32),
        ((ax + t1 * dx) as f32, (ay + t1 * dy) as f32),
    ))
}
