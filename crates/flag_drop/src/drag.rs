use bevy::color::Luminance;
use bevy::color::palettes::css::{GREEN, RED, YELLOW};
use bevy::prelude::*;
use board_helpers::input::{
    cursor_world_position, just_pressed_world_position, just_released_world_position,
};

use crate::board::{BoardSquare, Grid, base_color, square_at_world};
use crate::state::{BoardCommand, BoardState};

/// One pick-up-to-release gesture. Reset on drop or cancel, never persisted.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    active: bool,
    hovered: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Dropped(usize),
    Cancelled,
}

impl DragSession {
    pub const fn is_active(&self) -> bool {
        self.active
    }

    pub const fn hovered(&self) -> Option<usize> {
        if self.active { self.hovered } else { None }
    }

    pub fn begin(&mut self) {
        self.active = true;
        self.hovered = None;
    }

    pub fn hover_enter(&mut self, square_id: usize) {
        if self.active {
            self.hovered = Some(square_id);
        }
    }

    /// Clears the hover only if the given square still owns it.
    pub fn hover_leave(&mut self, square_id: usize) {
        if self.hovered == Some(square_id) {
            self.hovered = None;
        }
    }

    /// Ends the gesture. A release over a validated square drops the flag
    /// there; anything else cancels without touching shared state.
    pub fn release(&mut self, valid: bool) -> DragOutcome {
        let outcome = match self.hovered {
            Some(id) if self.active && valid => DragOutcome::Dropped(id),
            _ => DragOutcome::Cancelled,
        };
        *self = Self::default();
        outcome
    }
}

/// A drop is rejected only when the constraint is on and the square is black.
pub const fn is_valid_drop(constrain_to_white: bool, square_is_black: bool) -> bool {
    !(constrain_to_white && square_is_black)
}

/// Per-square render hint during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Neutral,
    Eligible,
    Invalid,
    Confirmable,
}

impl Feedback {
    pub const fn resolve(constrain_to_white: bool, is_over: bool, can_drop: bool) -> Self {
        if !constrain_to_white {
            return Self::Neutral;
        }
        match (is_over, can_drop) {
            (true, false) => Self::Invalid,
            (false, true) => Self::Eligible,
            (true, true) => Self::Confirmable,
            (false, false) => Self::Neutral,
        }
    }
}

/// Opens a drag session when the press lands on the square holding the flag.
pub fn begin_drag(
    mouse_button_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    windows: Query<&Window>,
    camera: Query<(&Camera, &GlobalTransform)>,
    state: Res<BoardState>,
    mut session: ResMut<DragSession>,
) {
    let Some(world_position) =
        just_pressed_world_position(&mouse_button_input, &touch_input, &windows, &camera)
    else {
        return;
    };

    if square_at_world(world_position) == Some(state.selected_square) {
        session.begin();
    }
}

/// Keeps the hovered square in sync with the pointer, one transition per
/// frame: leave the old square, then enter the new one.
pub fn track_hover(
    touch_input: Res<Touches>,
    windows: Query<&Window>,
    camera: Query<(&Camera, &GlobalTransform)>,
    mut session: ResMut<DragSession>,
) {
    if !session.is_active() {
        return;
    }

    let under_pointer =
        cursor_world_position(&touch_input, &windows, &camera).and_then(square_at_world);

    match (session.hovered(), under_pointer) {
        (Some(old), Some(new)) if old != new => {
            session.hover_leave(old);
            session.hover_enter(new);
        }
        (Some(old), None) => session.hover_leave(old),
        (None, Some(new)) => session.hover_enter(new),
        _ => {}
    }
}

/// Closes the session on release. The drop square is resolved from the
/// release position; valid drops dispatch the placement command, invalid or
/// off-board releases are absorbed silently.
pub fn end_drag(
    mouse_button_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    windows: Query<&Window>,
    camera: Query<(&Camera, &GlobalTransform)>,
    grid: Res<Grid>,
    state: Res<BoardState>,
    mut session: ResMut<DragSession>,
    mut board_commands: EventWriter<BoardCommand>,
) {
    if !session.is_active() {
        return;
    }
    if !mouse_button_input.just_released(MouseButton::Left) && !touch_input.any_just_released() {
        return;
    }

    // A release outside the window carries no position and cancels below.
    let dropped_on =
        just_released_world_position(&mouse_button_input, &touch_input, &windows, &camera)
            .and_then(square_at_world);

    // The release position is authoritative over the last tracked hover.
    if dropped_on != session.hovered() {
        if let Some(old) = session.hovered() {
            session.hover_leave(old);
        }
        if let Some(new) = dropped_on {
            session.hover_enter(new);
        }
    }

    let valid = dropped_on
        .and_then(|id| grid.get(id))
        .is_some_and(|square| is_valid_drop(state.constrain_to_white, square.black));

    match session.release(valid) {
        DragOutcome::Dropped(id) => {
            info!("flag dropped on square {id}");
            board_commands.send(BoardCommand::SetSelectedSquare(id));
        }
        DragOutcome::Cancelled => {}
    }
}

/// Color of one square given its feedback category. The hovered square is
/// dimmed on top of whatever tint the category gives it.
fn square_color(square_is_black: bool, feedback: Feedback, is_over: bool) -> Color {
    let color = match feedback {
        Feedback::Neutral => base_color(square_is_black),
        Feedback::Eligible => YELLOW.into(),
        Feedback::Invalid => RED.into(),
        Feedback::Confirmable => GREEN.into(),
    };
    if is_over { color.darker(0.25) } else { color }
}

/// Recolors every square from its resolved feedback category.
pub fn update_square_feedback(
    state: Res<BoardState>,
    session: Res<DragSession>,
    mut squares: Query<(&BoardSquare, &mut Sprite)>,
) {
    for (&BoardSquare(square), mut sprite) in &mut squares {
        let is_over = session.hovered() == Some(square.id);
        let can_drop =
            session.is_active() && is_valid_drop(state.constrain_to_white, square.black);
        let feedback = Feedback::resolve(state.constrain_to_white, is_over, can_drop);

        sprite.color = square_color(square.black, feedback, is_over);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::build_grid;
    use crate::state::{BoardCommand, BoardState};

    fn square_is_black(grid: &[crate::board::Square], id: usize) -> bool {
        grid.get(id).is_some_and(|square| square.black)
    }

    #[test]
    fn validator_rejects_only_black_squares_under_constraint() {
        assert!(!is_valid_drop(true, true));
        assert!(is_valid_drop(true, false));
        assert!(is_valid_drop(false, true));
        assert!(is_valid_drop(false, false));
    }

    #[test]
    fn feedback_is_neutral_whenever_the_constraint_is_off() {
        for is_over in [false, true] {
            for can_drop in [false, true] {
                assert_eq!(
                    Feedback::resolve(false, is_over, can_drop),
                    Feedback::Neutral
                );
            }
        }
    }

    #[test]
    fn feedback_matrix_with_the_constraint_on() {
        assert_eq!(Feedback::resolve(true, true, false), Feedback::Invalid);
        assert_eq!(Feedback::resolve(true, false, true), Feedback::Eligible);
        assert_eq!(Feedback::resolve(true, true, true), Feedback::Confirmable);
        assert_eq!(Feedback::resolve(true, false, false), Feedback::Neutral);
    }

    #[test]
    fn unconstrained_drop_on_a_black_square_moves_the_flag() {
        let grid = build_grid(8);
        let mut state = BoardState::default();
        let mut session = DragSession::default();

        assert!(square_is_black(&grid, 5), "square 5 is black");

        session.begin();
        session.hover_enter(5);
        let valid = is_valid_drop(state.constrain_to_white, square_is_black(&grid, 5));
        assert_eq!(session.release(valid), DragOutcome::Dropped(5));

        state.apply(BoardCommand::SetSelectedSquare(5));
        assert_eq!(state.selected_square, 5);
        assert!(!state.is_flag_here(0), "square 0 no longer shows the flag");
        assert!(!session.is_active(), "session returns to idle");
    }

    #[test]
    fn constrained_drop_on_a_black_square_is_cancelled() {
        let grid = build_grid(8);
        let mut state = BoardState::default();
        state.apply(BoardCommand::ToggleConstraint);
        let mut session = DragSession::default();

        session.begin();
        session.hover_enter(5);
        let black = square_is_black(&grid, 5);
        let can_drop = session.is_active() && is_valid_drop(state.constrain_to_white, black);
        assert_eq!(
            Feedback::resolve(state.constrain_to_white, true, can_drop),
            Feedback::Invalid
        );

        assert_eq!(session.release(can_drop), DragOutcome::Cancelled);
        assert_eq!(state.selected_square, 0, "rejected drops mutate nothing");
        assert!(!session.is_active());
    }

    #[test]
    fn constrained_drop_on_a_white_square_confirms_then_commits() {
        let grid = build_grid(8);
        let mut state = BoardState::default();
        state.apply(BoardCommand::ToggleConstraint);
        let mut session = DragSession::default();

        session.begin();
        session.hover_enter(2);
        let black = square_is_black(&grid, 2);
        assert!(!black, "square 2 is white");

        let can_drop = session.is_active() && is_valid_drop(state.constrain_to_white, black);
        assert_eq!(
            Feedback::resolve(state.constrain_to_white, true, can_drop),
            Feedback::Confirmable,
            "hovered valid target reads confirmable just before commit"
        );
        assert_eq!(
            Feedback::resolve(state.constrain_to_white, false, can_drop),
            Feedback::Eligible,
            "other valid targets read eligible"
        );

        match session.release(can_drop) {
            DragOutcome::Dropped(id) => state.apply(BoardCommand::SetSelectedSquare(id)),
            DragOutcome::Cancelled => unreachable!("white squares accept drops"),
        }
        assert_eq!(state.selected_square, 2);
    }

    #[test]
    fn releasing_outside_any_square_cancels() {
        let state = BoardState::default();
        let mut session = DragSession::default();

        session.begin();
        session.hover_enter(9);
        session.hover_leave(9);
        assert_eq!(session.hovered(), None);

        assert_eq!(session.release(false), DragOutcome::Cancelled);
        assert_eq!(state.selected_square, 0);
        assert!(!session.is_active());
    }

    #[test]
    fn hover_transfers_between_squares_one_at_a_time() {
        let mut session = DragSession::default();
        session.begin();

        session.hover_enter(10);
        assert_eq!(session.hovered(), Some(10));

        session.hover_leave(10);
        session.hover_enter(11);
        assert_eq!(session.hovered(), Some(11));

        // A stale leave for a square that lost the hover is a no-op.
        session.hover_leave(10);
        assert_eq!(session.hovered(), Some(11));
    }

    #[test]
    fn release_square_wins_over_stale_hover() {
        let grid = build_grid(8);
        let mut state = BoardState::default();
        let mut session = DragSession::default();

        session.begin();
        session.hover_enter(10);

        // The pointer settles on a neighboring square at the instant of
        // release; the release position decides the drop target.
        session.hover_leave(10);
        session.hover_enter(11);

        let valid = is_valid_drop(state.constrain_to_white, square_is_black(&grid, 11));
        assert_eq!(session.release(valid), DragOutcome::Dropped(11));

        state.apply(BoardCommand::SetSelectedSquare(11));
        assert_eq!(state.selected_square, 11);
    }

    #[test]
    fn hovered_square_dims_in_every_feedback_category() {
        let cases = [
            (false, Feedback::Neutral),
            (false, Feedback::Eligible),
            (true, Feedback::Invalid),
            (false, Feedback::Confirmable),
        ];
        for (black, feedback) in cases {
            let resting = square_color(black, feedback, false);
            let hovered = square_color(black, feedback, true);
            assert!(
                hovered.luminance() < resting.luminance(),
                "hover must dim a {feedback:?} square"
            );
        }
    }

    #[test]
    fn hover_is_ignored_while_idle() {
        let mut session = DragSession::default();
        session.hover_enter(3);
        assert_eq!(session.hovered(), None);
        assert_eq!(session.release(true), DragOutcome::Cancelled);
    }
}
