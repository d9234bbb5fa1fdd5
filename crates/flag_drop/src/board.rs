use bevy::prelude::*;

pub const BOARD_SIZE: usize = 8;
pub const SQUARE_SIZE: f32 = 40.0;
const CENTER_OFFSET: f32 = -SQUARE_SIZE * 3.5;
const FRAME_SIZE: f32 = 336.0;

/// One square of the board. Built once at startup, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Square {
    pub id: usize,
    pub x: usize,
    pub y: usize,
    pub black: bool,
}

/// Builds the square descriptors in row-major order.
pub fn build_grid(size: usize) -> Vec<Square> {
    (0..size * size)
        .map(|id| {
            let x = id % size;
            let y = id / size;
            Square {
                id,
                x,
                y,
                black: (x + y) % 2 == 1,
            }
        })
        .collect()
}

/// The static square set, shared read-only by every system.
#[derive(Resource, Debug, Clone)]
pub struct Grid {
    squares: Vec<Square>,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            squares: build_grid(BOARD_SIZE),
        }
    }
}

impl Grid {
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    pub fn get(&self, id: usize) -> Option<&Square> {
        self.squares.get(id)
    }
}

pub fn square_center(x: usize, y: usize) -> Vec2 {
    Vec2::new(
        (x as f32).mul_add(SQUARE_SIZE, CENTER_OFFSET),
        -(y as f32).mul_add(SQUARE_SIZE, CENTER_OFFSET),
    )
}

/// Maps a world position to the square under it, `None` outside the board.
pub fn square_at_world(position: Vec2) -> Option<usize> {
    let column = ((position.x - CENTER_OFFSET) / SQUARE_SIZE + 0.5).floor();
    let row = ((-position.y - CENTER_OFFSET) / SQUARE_SIZE + 0.5).floor();
    if column < 0.0 || row < 0.0 {
        return None;
    }
    let (x, y) = (column as usize, row as usize);
    (x < BOARD_SIZE && y < BOARD_SIZE).then(|| y * BOARD_SIZE + x)
}

pub const fn base_color(black: bool) -> Color {
    if black { Color::BLACK } else { Color::WHITE }
}

#[derive(Component)]
pub struct BoardSquare(pub Square);

pub fn spawn_board(mut commands: Commands, grid: Res<Grid>) {
    // Frame
    commands.spawn((
        Sprite::from_color(Color::srgb(0.6, 0.6, 0.6), Vec2::splat(FRAME_SIZE)),
        Transform::from_xyz(0.0, 0.0, -10.0),
    ));

    for &square in grid.squares() {
        commands.spawn((
            Sprite::from_color(base_color(square.black), Vec2::splat(SQUARE_SIZE)),
            Transform::from_translation(square_center(square.x, square.y).extend(0.0)),
            BoardSquare(square),
        ));
    }
}
