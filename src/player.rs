use crate::entity::{Drawable, MobileEntity, Mover, Velocity};
use crate::grid::{Direction, Tile, TileIndex};
use crate::render::{Rgb, Sprite, SpriteKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    body: MobileEntity,
    speed: f32,
    color: Rgb,
    /// Mouth opening in pixels; cosmetic, cycles 0..=radius.
    mouth: u32,
}

impl Player {
    pub fn new(spawn: TileIndex, speed: f32) -> Self {
        Self {
            body: MobileEntity::new(spawn),
            speed,
            color: Rgb::YELLOW,
            mouth: 0,
        }
    }

    /// Axis-exclusive: the new direction replaces both velocity components.
    pub fn steer(&mut self, dir: Direction) {
        self.body.velocity = Velocity::toward(dir, self.speed);
    }

    pub fn respawn(&mut self, at: TileIndex) {
        self.body.teleport(at);
    }

    pub fn mouth(&self) -> u32 {
        self.mouth
    }

    pub fn advance_mouth(&mut self, tile_size: u32) {
        self.mouth += 1;
        if self.mouth > tile_size / 2 {
            self.mouth = 0;
        }
    }
}

impl Mover for Player {
    fn body(&self) -> &MobileEntity {
        &self.body
    }

    fn body_mut(&mut self) -> &mut MobileEntity {
        &mut self.body
    }

    fn can_enter(&self, tile: Tile) -> bool {
        !tile.blocks_player()
    }
}

impl Drawable for Player {
    fn sprite(&self, tile_size: u32) -> Sprite {
        Sprite {
            kind: SpriteKind::Player {
                mouth: self.mouth as f32,
            },
            center: self.body.position.pixel_center(tile_size),
            radius: (tile_size / 2) as f32,
            color: self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Position;
    use crate::render::Point;

    #[test]
    fn starts_still_at_spawn() {
        let player = Player::new(TileIndex::new(1, 1), 0.25);
        assert_eq!(player.body().position, Position::new(1.0, 1.0));
        assert_eq!(player.body().velocity, Velocity::default());
    }

    #[test]
    fn steering_zeroes_the_other_axis() {
        let mut player = Player::new(TileIndex::new(1, 1), 0.25);
        player.steer(Direction::Right);
        assert_eq!(player.body().velocity.d_column, 0.25);
        player.steer(Direction::Up);
        assert_eq!(player.body().velocity.d_line, -0.25);
        assert_eq!(player.body().velocity.d_column, 0.0);
    }

    #[test]
    fn gate_blocks_player() {
        let player = Player::new(TileIndex::new(1, 1), 0.25);
        assert!(!player.can_enter(Tile::GateMarker));
        assert!(!player.can_enter(Tile::Wall));
        assert!(player.can_enter(Tile::Consumed));
        assert!(player.can_enter(Tile::Pellet));
    }

    #[test]
    fn mouth_wraps_after_radius() {
        let mut player = Player::new(TileIndex::new(1, 1), 0.25);
        for _ in 0..10 {
            player.advance_mouth(20);
        }
        assert_eq!(player.mouth(), 10);
        player.advance_mouth(20);
        assert_eq!(player.mouth(), 0);
    }

    #[test]
    fn sprite_centers_on_tile() {
        let player = Player::new(TileIndex::new(1, 2), 0.25);
        let sprite = player.sprite(20);
        assert_eq!(sprite.center, Point::new(50.0, 30.0));
        assert_eq!(sprite.radius, 10.0);
    }
}
