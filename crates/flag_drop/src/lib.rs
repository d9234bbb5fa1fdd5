use bevy::prelude::*;

mod board;
mod checkbox;
mod drag;
mod flag;
mod state;

use board::{Grid, spawn_board};
use checkbox::{handle_checkbox, spawn_checkbox, sync_check_mark};
use drag::{DragSession, begin_drag, end_drag, track_hover, update_square_feedback};
use flag::{spawn_flag, update_flag};
use state::{BoardCommand, BoardState, apply_commands};

/// Entry point for the app
pub fn run() {
    let mut app =
        board_helpers::get_default_app(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    app.init_resource::<Grid>()
        .init_resource::<BoardState>()
        .init_resource::<DragSession>()
        .add_event::<BoardCommand>()
        .add_systems(
            Startup,
            (setup_camera, spawn_board, spawn_flag, spawn_checkbox),
        )
        .add_systems(
            Update,
            (
                // Gesture handling and command dispatch, in protocol order.
                (begin_drag, track_hover, end_drag, handle_checkbox, apply_commands).chain(),
                // Rendering derives from the updated snapshot.
                (update_square_feedback, update_flag, sync_check_mark),
            )
                .chain(),
        );

    app.run();
}

/// Sets up the main 2D camera
fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
