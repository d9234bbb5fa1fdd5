use bevy::prelude::*;

/// App-wide placement state. Written only by [`apply_commands`]; every other
/// system reads a snapshot.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardState {
    /// Square currently holding the flag.
    pub selected_square: usize,
    /// When set, only white squares accept a drop.
    pub constrain_to_white: bool,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            selected_square: 0,
            constrain_to_white: false,
        }
    }
}

impl BoardState {
    pub fn apply(&mut self, command: BoardCommand) {
        match command {
            BoardCommand::SetSelectedSquare(id) => self.selected_square = id,
            BoardCommand::ToggleConstraint => self.constrain_to_white = !self.constrain_to_white,
        }
    }

    /// Whether the flag renders on the given square. Derived, so exactly one
    /// square can ever answer true.
    pub const fn is_flag_here(&self, square_id: usize) -> bool {
        self.selected_square == square_id
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardCommand {
    SetSelectedSquare(usize),
    ToggleConstraint,
}

/// Sole writer of [`BoardState`]. Commands validated at their send site are
/// applied unconditionally, in order.
pub fn apply_commands(mut commands: EventReader<BoardCommand>, mut state: ResMut<BoardState>) {
    for &command in commands.read() {
        state.apply(command);
    }
}
