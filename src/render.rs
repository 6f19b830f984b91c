//! Frame snapshots and the draw primitives a pixel renderer consumes.

use crate::error::Result;
use crate::grid::Tile;
use crate::simulation::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const ORANGE: Rgb = Rgb(255, 165, 0);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const CYAN: Rgb = Rgb(0, 255, 255);
    pub const ROSE: Rgb = Rgb(241, 126, 161);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub wall: Rgb,
    pub pellet: Rgb,
    pub gate: Rgb,
    pub text: Rgb,
    pub eye: Rgb,
    pub pupil: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb::BLACK,
            wall: Rgb::BLUE,
            pellet: Rgb::YELLOW,
            gate: Rgb::WHITE,
            text: Rgb::YELLOW,
            eye: Rgb::WHITE,
            pupil: Rgb::BLACK,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    /// Text is centred on the point.
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
        outline: bool,
    },
    Circle {
        center: Point,
        radius: f32,
        color: Rgb,
    },
    Polygon {
        points: Vec<Point>,
        color: Rgb,
    },
    Line {
        from: Point,
        to: Point,
        width: f32,
        color: Rgb,
    },
    Text {
        text: String,
        at: Point,
        anchor: Anchor,
        color: Rgb,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpriteKind {
    /// `mouth` is the half-height of the mouth opening in pixels.
    Player { mouth: f32 },
    Pursuer,
}

/// Pixel-space description of one entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub center: Point,
    pub radius: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub tiles: Vec<Vec<Tile>>,
    pub tile_size: u32,
    pub screen: (u32, u32),
    pub score: u32,
    pub lives: u32,
    pub pellets_left: usize,
    pub state: GameState,
    /// Update order: player first, then pursuers.
    pub sprites: Vec<Sprite>,
}

impl Frame {
    pub fn label(&self) -> Option<&'static str> {
        self.state.label()
    }

    pub fn draw_commands(&self, palette: &Palette) -> Vec<DrawCommand> {
        let mut commands = Vec::new();
        if matches!(self.state, GameState::Playing | GameState::Paused) {
            self.draw_maze(palette, &mut commands);
            self.draw_hud(palette, &mut commands);
            for sprite in &self.sprites {
                draw_sprite(sprite, palette, &mut commands);
            }
        }
        if let Some(label) = self.label() {
            commands.push(DrawCommand::Text {
                text: label.to_string(),
                at: Point::new(self.screen.0 as f32 / 2.0, self.screen.1 as f32 / 2.0),
                anchor: Anchor::Center,
                color: palette.text,
            });
        }
        commands
    }

    fn draw_maze(&self, palette: &Palette, commands: &mut Vec<DrawCommand>) {
        let size = self.tile_size as f32;
        let half = size / 2.0;
        for (line, row) in self.tiles.iter().enumerate() {
            for (column, tile) in row.iter().enumerate() {
                let x = column as f32 * size;
                let y = line as f32 * size;
                let color = if tile.is_wall() {
                    palette.wall
                } else {
                    palette.background
                };
                commands.push(DrawCommand::Rect {
                    x,
                    y,
                    width: size,
                    height: size,
                    color,
                    outline: true,
                });
                match tile {
                    Tile::Pellet => commands.push(DrawCommand::Circle {
                        center: Point::new(x + half, y + half),
                        radius: (self.tile_size / 10) as f32,
                        color: palette.pellet,
                    }),
                    Tile::GateMarker => commands.push(DrawCommand::Line {
                        from: Point::new(x, y + half),
                        to: Point::new(x + size, y + half),
                        width: (self.tile_size / 4) as f32,
                        color: palette.gate,
                    }),
                    _ => {}
                }
            }
        }
    }

    fn draw_hud(&self, palette: &Palette, commands: &mut Vec<DrawCommand>) {
        let x = (self.tiles.len() as u32 * self.tile_size) as f32;
        let lines = [
            (format!("score {}", self.score), 50.0),
            (format!("Life: {}", self.lives), 100.0),
        ];
        for (text, y) in lines {
            commands.push(DrawCommand::Text {
                text,
                at: Point::new(x, y),
                anchor: Anchor::TopLeft,
                color: palette.text,
            });
        }
    }
}

fn draw_sprite(sprite: &Sprite, palette: &Palette, commands: &mut Vec<DrawCommand>) {
    let Point { x: cx, y: cy } = sprite.center;
    let r = sprite.radius;
    match sprite.kind {
        SpriteKind::Player { mouth } => {
            commands.push(DrawCommand::Circle {
                center: sprite.center,
                radius: r,
                color: sprite.color,
            });
            commands.push(DrawCommand::Polygon {
                points: vec![
                    sprite.center,
                    Point::new(cx + r, cy - mouth),
                    Point::new(cx + r, cy + mouth),
                ],
                color: palette.background,
            });
        }
        SpriteKind::Pursuer => {
            let size = r * 2.0;
            let (left, top) = (cx - r, cy - r);
            let piece = (size / 8.0).floor();
            commands.push(DrawCommand::Polygon {
                points: vec![
                    Point::new(left, top + size),
                    Point::new(left + piece, top + piece * 2.0),
                    Point::new(left + piece * 2.0, top + (piece / 2.0).floor()),
                    Point::new(left + piece * 3.0, top),
                    Point::new(left + piece * 5.0, top),
                    Point::new(left + piece * 6.0, top + (piece / 2.0).floor()),
                    Point::new(left + piece * 7.0, top + piece * 2.0),
                    Point::new(left + size, top + size),
                ],
                color: sprite.color,
            });
            for eye_x in [2.5, 5.5] {
                let center = Point::new(left + piece * eye_x, top + piece * 2.5);
                commands.push(DrawCommand::Circle {
                    center,
                    radius: piece,
                    color: palette.eye,
                });
                commands.push(DrawCommand::Circle {
                    center,
                    radius: (piece / 2.0).floor(),
                    color: palette.pupil,
                });
            }
        }
    }
}

/// Output surface fed once per tick.
pub trait Renderer {
    fn present(&mut self, frame: &Frame) -> Result<()>;
}

/// Keeps the expanded draw commands of every presented frame.
#[derive(Debug)]
pub struct Recorder {
    pub palette: Palette,
    pub frames: Vec<Vec<DrawCommand>>,
}

impl Recorder {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            frames: Vec::new(),
        }
    }
}

impl Renderer for Recorder {
    fn present(&mut self, frame: &Frame) -> Result<()> {
        self.frames.push(frame.draw_commands(&self.palette));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    fn frame(state: GameState) -> Frame {
        Frame {
            tiles: Grid::new().rows().to_vec(),
            tile_size: 20,
            screen: (800, 600),
            score: 7,
            lives: 2,
            pellets_left: 299,
            state,
            sprites: vec![
                Sprite {
                    kind: SpriteKind::Player { mouth: 4.0 },
                    center: Point::new(30.0, 30.0),
                    radius: 10.0,
                    color: Rgb::YELLOW,
                },
                Sprite {
                    kind: SpriteKind::Pursuer,
                    center: Point::new(270.0, 310.0),
                    radius: 10.0,
                    color: Rgb::RED,
                },
            ],
        }
    }

    fn count(commands: &[DrawCommand], pred: impl Fn(&DrawCommand) -> bool) -> usize {
        commands.iter().filter(|c| pred(c)).count()
    }

    #[test]
    fn playing_frame_draws_every_tile_and_pellet() {
        let commands = frame(GameState::Playing).draw_commands(&Palette::default());
        assert_eq!(
            count(&commands, |c| matches!(c, DrawCommand::Rect { .. })),
            30 * 28
        );
        let pellets = count(&commands, |c| {
            matches!(c, DrawCommand::Circle { radius, color, .. } if *radius == 2.0 && *color == Rgb::YELLOW)
        });
        assert_eq!(pellets, 306);
        assert_eq!(
            count(&commands, |c| matches!(c, DrawCommand::Line { .. })),
            4
        );
        assert!(commands.iter().any(
            |c| matches!(c, DrawCommand::Text { text, .. } if text == "score 7")
        ));
        assert!(commands.iter().any(
            |c| matches!(c, DrawCommand::Text { text, .. } if text == "Life: 2")
        ));
        assert!(!commands.iter().any(
            |c| matches!(c, DrawCommand::Text { anchor: Anchor::Center, .. })
        ));
    }

    #[test]
    fn pursuer_body_is_eight_point_polygon_with_eyes() {
        let commands = frame(GameState::Playing).draw_commands(&Palette::default());
        let body = commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::Polygon { points, color } if *color == Rgb::RED => Some(points),
                _ => None,
            })
            .unwrap();
        assert_eq!(body.len(), 8);
        assert_eq!(body[0], Point::new(260.0, 320.0));
        assert_eq!(body[7], Point::new(280.0, 320.0));

        let eyes = count(&commands, |c| {
            matches!(c, DrawCommand::Circle { center, .. } if center.y == 305.0)
        });
        assert_eq!(eyes, 4);
    }

    #[test]
    fn player_mouth_uses_opening() {
        let commands = frame(GameState::Playing).draw_commands(&Palette::default());
        let mouth = commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::Polygon { points, color } if *color == Rgb::BLACK => Some(points),
                _ => None,
            })
            .unwrap();
        assert_eq!(
            mouth,
            &vec![
                Point::new(30.0, 30.0),
                Point::new(40.0, 26.0),
                Point::new(40.0, 34.0)
            ]
        );
    }

    #[test]
    fn paused_frame_adds_banner() {
        let commands = frame(GameState::Paused).draw_commands(&Palette::default());
        let last = commands.last().unwrap();
        assert_eq!(
            last,
            &DrawCommand::Text {
                text: "P A U S E D".to_string(),
                at: Point::new(400.0, 300.0),
                anchor: Anchor::Center,
                color: Rgb::YELLOW,
            }
        );
        assert!(commands.len() > 1000);
    }

    #[test]
    fn terminal_frames_only_draw_banner() {
        for (state, label) in [(GameState::GameOver, "GAME OVER"), (GameState::Victory, "VICTORY")] {
            let commands = frame(state).draw_commands(&Palette::default());
            assert_eq!(commands.len(), 1);
            assert!(matches!(&commands[0], DrawCommand::Text { text, .. } if text == label));
        }
    }

    #[test]
    fn recorder_collects_frames() {
        let mut recorder = Recorder::new(Palette {
            text: Rgb::CYAN,
            ..Palette::default()
        });
        recorder.present(&frame(GameState::Victory)).unwrap();
        recorder.present(&frame(GameState::Playing)).unwrap();
        assert_eq!(recorder.frames.len(), 2);
        assert_eq!(recorder.frames[0].len(), 1);
        assert!(matches!(
            &recorder.frames[0][0],
            DrawCommand::Text { color, .. } if *color == Rgb::CYAN
        ));
    }
}
