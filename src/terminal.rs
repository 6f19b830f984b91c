//! crossterm front end: a diff-based cell renderer and a key poller.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::error::Result;
use crate::grid::Tile;
use crate::input::{InputSource, Intent};
use crate::render::{Frame, Palette, Renderer, Rgb, Sprite, SpriteKind};

const CELL_W: usize = 2;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Glyph {
    Player,
    Pursuer,
    Wall,
    Empty,
    Pellet,
    Gate,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

impl Cell {
    const BLANK: Cell = Cell {
        glyph: Glyph::Empty,
        color: Color::Reset,
    };
}

pub struct TerminalRenderer {
    out: Stdout,
    palette: Palette,
    last: Vec<Cell>,
    last_hud: String,
    last_banner: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl TerminalRenderer {
    pub fn new(out: Stdout, palette: Palette) -> Self {
        Self {
            out,
            palette,
            last: Vec::new(),
            last_hud: String::new(),
            last_banner: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    fn draw_cell(&mut self, column: usize, line: usize, cell: Cell) -> io::Result<()> {
        let text = match cell.glyph {
            Glyph::Player => "😃",
            Glyph::Pursuer => "👻",
            Glyph::Wall => "██",
            Glyph::Empty => "  ",
            Glyph::Pellet => "· ",
            Glyph::Gate => "==",
        };
        let x_pos = self.origin_x + (column * CELL_W) as u16;
        let y_pos = self.origin_y + line as u16;
        self.out.queue(MoveTo(x_pos, y_pos))?;
        self.out.queue(SetForegroundColor(cell.color))?;
        self.out.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        for _ in w..CELL_W {
            self.out.queue(Print(' '))?;
        }
        self.out.queue(ResetColor)?;
        Ok(())
    }

    fn draw_line(&mut self, y: u16, text: &str) -> io::Result<()> {
        self.out.queue(MoveTo(self.origin_x, y))?;
        self.out.queue(SetForegroundColor(rgb(self.palette.text)))?;
        self.out.queue(Clear(ClearType::CurrentLine))?;
        self.out.queue(Print(text))?;
        self.out.queue(ResetColor)?;
        Ok(())
    }
}

impl Renderer for TerminalRenderer {
    fn present(&mut self, frame: &Frame) -> Result<()> {
        let height = frame.tiles.len();
        let width = frame.tiles.first().map_or(0, Vec::len);
        let needed_h = (height + 2) as u16;
        let needed_w = (width * CELL_W) as u16;

        self.out.queue(MoveTo(0, 0))?;
        let (term_w, term_h) = terminal::size()?;
        if term_w < needed_w || term_h < needed_h {
            self.out.queue(Clear(ClearType::All))?;
            let msg = format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            );
            self.out.queue(Print(msg))?;
            self.out.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        if origin_x != self.origin_x
            || origin_y != self.origin_y
            || self.last.len() != width * height
        {
            self.out.queue(Clear(ClearType::All))?;
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.last = vec![Cell::BLANK; width * height];
            self.needs_full = true;
        }

        let hud = format!(
            "Score: {}  Lives: {}  Pellets: {}  (p to pause, q to quit)",
            frame.score, frame.lives, frame.pellets_left
        );
        if self.needs_full || hud != self.last_hud {
            self.draw_line(self.origin_y - 1, &hud)?;
            self.last_hud = hud;
        }

        let cells = compose(frame, &self.palette, width, height);
        for (idx, cell) in cells.into_iter().enumerate() {
            if self.needs_full || cell != self.last[idx] {
                self.last[idx] = cell;
                self.draw_cell(idx % width, idx / width, cell)?;
            }
        }

        let banner = match (frame.label(), frame.state.is_terminal()) {
            (Some(label), true) => {
                format!("{label} - Final Score: {} (press q to quit)", frame.score)
            }
            (Some(label), false) => format!("{label} (press p to resume)"),
            (None, _) => String::new(),
        };
        if self.needs_full || banner != self.last_banner {
            self.draw_line(self.origin_y + height as u16, &banner)?;
            self.last_banner = banner;
        }
        self.needs_full = false;

        self.out.flush()?;
        Ok(())
    }
}

fn compose(frame: &Frame, palette: &Palette, width: usize, height: usize) -> Vec<Cell> {
    let mut cells: Vec<Cell> = frame
        .tiles
        .iter()
        .flat_map(|row| row.iter().map(|&tile| tile_cell(tile, palette)))
        .collect();
    // Pursuers first so the player stays visible when they overlap.
    let mut sprites: Vec<&Sprite> = frame.sprites.iter().collect();
    sprites.sort_by_key(|s| matches!(s.kind, SpriteKind::Player { .. }));
    for sprite in sprites {
        let column = (sprite.center.x / frame.tile_size as f32).floor();
        let line = (sprite.center.y / frame.tile_size as f32).floor();
        if column < 0.0 || line < 0.0 {
            continue;
        }
        let (column, line) = (column as usize, line as usize);
        if column >= width || line >= height {
            continue;
        }
        let glyph = match sprite.kind {
            SpriteKind::Player { .. } => Glyph::Player,
            SpriteKind::Pursuer => Glyph::Pursuer,
        };
        cells[line * width + column] = Cell {
            glyph,
            color: rgb(sprite.color),
        };
    }
    cells
}

fn tile_cell(tile: Tile, palette: &Palette) -> Cell {
    match tile {
        Tile::Wall => Cell {
            glyph: Glyph::Wall,
            color: rgb(palette.wall),
        },
        Tile::GateMarker => Cell {
            glyph: Glyph::Gate,
            color: rgb(palette.gate),
        },
        Tile::Pellet => Cell {
            glyph: Glyph::Pellet,
            color: rgb(palette.pellet),
        },
        Tile::Empty | Tile::Consumed => Cell::BLANK,
    }
}

fn rgb(color: Rgb) -> Color {
    Color::Rgb {
        r: color.0,
        g: color.1,
        b: color.2,
    }
}

/// Non-blocking keyboard reader.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn poll(&mut self) -> Result<Vec<Intent>> {
        let mut intents = Vec::new();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if let Some(intent) = intent_for(key) {
                    intents.push(intent);
                }
            }
        }
        Ok(intents)
    }
}

fn intent_for(key: KeyEvent) -> Option<Intent> {
    if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Intent::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Intent::Quit),
        KeyCode::Char('p') => Some(Intent::Pause),
        KeyCode::Up | KeyCode::Char('k') => Some(Intent::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Intent::Down),
        KeyCode::Left | KeyCode::Char('h') => Some(Intent::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(Intent::Right),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::simulation::Simulation;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn keys_map_to_intents() {
        assert_eq!(intent_for(press(KeyCode::Char('k'))), Some(Intent::Up));
        assert_eq!(intent_for(press(KeyCode::Left)), Some(Intent::Left));
        assert_eq!(intent_for(press(KeyCode::Char('p'))), Some(Intent::Pause));
        assert_eq!(intent_for(press(KeyCode::Esc)), Some(Intent::Quit));
        assert_eq!(
            intent_for(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Intent::Quit)
        );
        assert_eq!(intent_for(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn compose_overlays_sprites_on_tiles() {
        let mut sim = Simulation::with_pursuers(Config::default());
        let frame = sim.frame();
        let cells = compose(&frame, &Palette::default(), 28, 30);
        assert_eq!(cells.len(), 28 * 30);
        assert_eq!(cells[0].glyph, Glyph::Wall);
        assert_eq!(cells[28 + 1].glyph, Glyph::Player);
        assert_eq!(cells[15 * 28 + 13].glyph, Glyph::Pursuer);
        assert_eq!(cells[12 * 28 + 12].glyph, Glyph::Gate);
        assert_eq!(cells[28 + 2].glyph, Glyph::Pellet);
    }

    #[test]
    fn player_wins_overlap() {
        let mut sim = Simulation::with_pursuers(Config::default());
        sim.player_mut().respawn(crate::grid::TileIndex::new(15, 13));
        let frame = sim.frame();
        let cells = compose(&frame, &Palette::default(), 28, 30);
        assert_eq!(cells[15 * 28 + 13].glyph, Glyph::Player);
    }

    #[test]
    fn tiles_take_palette_colors() {
        let palette = Palette {
            wall: Rgb(1, 2, 3),
            pellet: Rgb(4, 5, 6),
            gate: Rgb(7, 8, 9),
            ..Palette::default()
        };
        let mut sim = Simulation::new(Config::default());
        let cells = compose(&sim.frame(), &palette, 28, 30);
        assert_eq!(cells[0].color, Color::Rgb { r: 1, g: 2, b: 3 });
        assert_eq!(cells[28 + 2].color, Color::Rgb { r: 4, g: 5, b: 6 });
        assert_eq!(cells[12 * 28 + 12].color, Color::Rgb { r: 7, g: 8, b: 9 });
    }
}
