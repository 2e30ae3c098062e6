/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` buffer (array of Cell)
///   2. Compare each cell with `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// The shell draws onto a fixed 96×27 cell canvas centered in the
/// terminal: a 960×540 design layout at 10×20 px per cell.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, SetTitle},
};

use crate::nav::navigator::Navigator;
use crate::nav::region::{Region, CANVAS_H, CANVAS_W};
use crate::nav::screen::Screen;

// ── Palette ──

const MENU_BG: Color = Color::Rgb { r: 20, g: 26, b: 66 };
const GAMEPLAY_BG: Color = Color::Rgb { r: 24, g: 80, b: 24 };
const SETTINGS_BG: Color = Color::Rgb { r: 52, g: 31, b: 79 };
const EXIT_BG: Color = Color::Rgb { r: 0, g: 0, b: 0 };

const BUTTON_BG: Color = Color::Rgb { r: 244, g: 208, b: 63 };
const BUTTON_BG_HOT: Color = Color::Rgb { r: 248, g: 196, b: 113 };
const BUTTON_BORDER: Color = Color::Rgb { r: 212, g: 172, b: 13 };
const BUTTON_BORDER_HOT: Color = Color::Rgb { r: 235, g: 152, b: 78 };
const BUTTON_TEXT: Color = Color::Rgb { r: 80, g: 80, b: 80 };

const TITLE_FG: Color = Color::Rgb { r: 245, g: 245, b: 245 };
const HELP_FG: Color = Color::Rgb { r: 140, g: 140, b: 160 };

const TITLE: &str = "T O W E R   D E F E N S E";

fn background_for(screen: Screen) -> Color {
    match screen {
        Screen::Menu => MENU_BG,
        Screen::Gameplay => GAMEPLAY_BG,
        Screen::Settings => SETTINGS_BG,
        Screen::Exit => EXIT_BG,
    }
}

fn subtitle_for(screen: Screen) -> Option<&'static str> {
    match screen {
        Screen::Menu => Some("Build your defenses and hold the line!"),
        Screen::Gameplay => Some("Gameplay prototype coming soon"),
        Screen::Settings => Some("Settings panel under construction"),
        Screen::Exit => None,
    }
}

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    const fn blank(bg: Color) -> Self {
        Cell { ch: ' ', fg: Color::White, bg }
    }

    /// Sentinel cell used to invalidate the back buffer.
    /// Different from any real cell, so every position will be diff'd.
    const INVALID: Cell = Cell {
        ch: '?',
        fg: Color::Magenta,
        bg: Color::Magenta,
    };
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer {
            width: w,
            height: h,
            cells: vec![Cell::blank(EXIT_BG); w * h],
        }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::blank(EXIT_BG); w * h];
        }
    }

    fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::blank(EXIT_BG)
        }
    }

    /// Write a string at (x, y). Each char occupies one column.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.set(cx, y, Cell { ch, fg, bg });
            cx += 1;
        }
    }
}

// ── Renderer ──

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    origin: (u16, u16),
    last_screen: Option<Screen>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            origin: (0, 0),
            last_screen: None,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            SetTitle("Tower Defense"),
            cursor::Hide,
            SetBackgroundColor(MENU_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.resize_buffers(tw as usize, th as usize);

        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            DisableMouseCapture,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    /// Map a terminal coordinate onto the canvas. None outside it.
    pub fn canvas_pos(&self, col: u16, row: u16) -> Option<(u16, u16)> {
        let (ox, oy) = self.origin;
        if col < ox || row < oy {
            return None;
        }
        let (x, y) = (col - ox, row - oy);
        if x < CANVAS_W && y < CANVAS_H {
            Some((x, y))
        } else {
            None
        }
    }

    pub fn render(&mut self, nav: &Navigator, hover: Option<usize>) -> io::Result<()> {
        let bg = background_for(nav.current());

        // Detect terminal resize
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.resize_buffers(tw as usize, th as usize);
            queue!(self.writer, SetBackgroundColor(bg), Clear(ClearType::All))?;
        }

        // Screen change repaints everything (the background color differs)
        if self.last_screen != Some(nav.current()) {
            self.back.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(bg), Clear(ClearType::All))?;
            self.last_screen = Some(nav.current());
        }

        self.origin = (
            (self.term_w.saturating_sub(CANVAS_W as usize) / 2) as u16,
            (self.term_h.saturating_sub(CANVAS_H as usize) / 2) as u16,
        );

        // Build front buffer
        self.front.fill(Cell::blank(bg));
        self.compose(nav, hover, bg);

        // Diff and emit
        self.flush_diff(bg)?;

        // Swap: current front becomes next back
        std::mem::swap(&mut self.front, &mut self.back);

        Ok(())
    }

    fn resize_buffers(&mut self, w: usize, h: usize) {
        self.term_w = w;
        self.term_h = h;
        self.front.resize(w, h);
        self.back.resize(w, h);
        // Force full repaint: back ≠ front for every cell.
        self.back.fill(Cell::INVALID);
    }

    // ── Compose: build front buffer content ──

    fn compose(&mut self, nav: &Navigator, hover: Option<usize>, bg: Color) {
        let (ox, oy) = (self.origin.0 as usize, self.origin.1 as usize);

        let tx = ox + (CANVAS_W as usize).saturating_sub(TITLE.chars().count()) / 2;
        self.front.put_str(tx, oy + 4, TITLE, TITLE_FG, bg);

        if let Some(subtitle) = subtitle_for(nav.current()) {
            let sx = ox + (CANVAS_W as usize).saturating_sub(subtitle.chars().count()) / 2;
            self.front.put_str(sx, oy + 7, subtitle, TITLE_FG, bg);
        }

        for (i, region) in nav.regions().iter().enumerate() {
            let hot = hover == Some(i);
            let focused = nav.focus() == i;
            draw_button(&mut self.front, ox, oy, region, hot, focused);
        }

        let help = match nav.current() {
            Screen::Menu => "↑/↓ Select   ENTER Confirm   Click to choose   ESC Quit",
            _ => "ENTER Back   Click Back   ESC Quit",
        };
        let hx = ox + (CANVAS_W as usize).saturating_sub(help.chars().count()) / 2;
        self.front.put_str(hx, oy + CANVAS_H as usize - 1, help, HELP_FG, bg);
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self, base_bg: Color) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = base_bg;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        queue!(
            self.writer,
            SetForegroundColor(Color::White),
            SetBackgroundColor(base_bg),
        )?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                // Position cursor if needed
                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }

                // Set colors only if changed
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }

                queue!(self.writer, Print(cell.ch))?;
                last_x = x;
                last_y = y;
            }
        }

        self.writer.flush()
    }
}

/// Draw one button: filled rectangle, border, centered label.
/// Hover switches the palette; focus adds a marker next to the label.
fn draw_button(fb: &mut FrameBuffer, ox: usize, oy: usize, region: &Region, hot: bool, focused: bool) {
    let r = region.rect;
    let (x, y) = (ox + r.x as usize, oy + r.y as usize);
    let (w, h) = (r.w as usize, r.h as usize);
    if w < 2 || h < 2 {
        return;
    }

    let bg = if hot { BUTTON_BG_HOT } else { BUTTON_BG };
    let border = if hot { BUTTON_BORDER_HOT } else { BUTTON_BORDER };

    for row in 0..h {
        for col in 0..w {
            let ch = match (row, col) {
                (0, 0) => '╭',
                (0, c) if c == w - 1 => '╮',
                (r2, 0) if r2 == h - 1 => '╰',
                (r2, c) if r2 == h - 1 && c == w - 1 => '╯',
                (0, _) => '─',
                (r2, _) if r2 == h - 1 => '─',
                (_, 0) => '│',
                (_, c) if c == w - 1 => '│',
                _ => ' ',
            };
            fb.set(x + col, y + row, Cell { ch, fg: border, bg });
        }
    }

    let lx = x + w.saturating_sub(region.label.chars().count()) / 2;
    fb.put_str(lx, y + h / 2, region.label, BUTTON_TEXT, bg);

    if focused {
        fb.set(x + 2, y + h / 2, Cell { ch: '▸', fg: BUTTON_BORDER_HOT, bg });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_str_clips_at_buffer_edge() {
        let mut fb = FrameBuffer::new(5, 2);
        fb.put_str(3, 0, "abcdef", Color::White, EXIT_BG);
        assert_eq!(fb.get(3, 0).ch, 'a');
        assert_eq!(fb.get(4, 0).ch, 'b');
        // Nothing wrapped onto the next row.
        assert_eq!(fb.get(0, 1).ch, ' ');
    }

    #[test]
    fn canvas_pos_maps_and_rejects() {
        let mut renderer = Renderer::new();
        renderer.origin = (10, 3);
        assert_eq!(renderer.canvas_pos(10, 3), Some((0, 0)));
        assert_eq!(renderer.canvas_pos(15, 10), Some((5, 7)));
        assert_eq!(renderer.canvas_pos(9, 3), None); // left of the canvas
        assert_eq!(renderer.canvas_pos(10 + CANVAS_W, 3), None); // right of it
    }

    #[test]
    fn button_label_is_centered() {
        let mut fb = FrameBuffer::new(40, 10);
        let region = Region {
            rect: crate::nav::region::Rect::new(0, 0, 10, 3),
            label: "Play",
            target: Screen::Gameplay,
        };
        draw_button(&mut fb, 0, 0, &region, false, false);
        assert_eq!(fb.get(3, 1).ch, 'P');
        assert_eq!(fb.get(0, 0).ch, '╭');
        assert_eq!(fb.get(9, 2).ch, '╯');
    }
}
