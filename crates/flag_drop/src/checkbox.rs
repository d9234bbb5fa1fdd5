use bevy::prelude::*;

use crate::state::{BoardCommand, BoardState};

const LABEL: &str = "Place in white squares only";

#[derive(Component)]
pub struct ConstraintCheckbox;

#[derive(Component)]
pub struct CheckMark;

pub fn spawn_checkbox(mut commands: Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            bottom: Val::Px(60.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            column_gap: Val::Px(10.0),
            ..default()
        })
        .with_children(|parent| {
            parent
                .spawn((
                    Button,
                    Node {
                        width: Val::Px(24.0),
                        height: Val::Px(24.0),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        ..default()
                    },
                    BackgroundColor(Color::WHITE),
                    ConstraintCheckbox,
                ))
                .with_child((
                    Text::new("x"),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(Color::BLACK),
                    Visibility::Hidden,
                    CheckMark,
                ));
            parent.spawn((
                Text::new(LABEL),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

/// Maps checkbox presses to the constraint toggle command.
pub fn handle_checkbox(
    interactions: Query<&Interaction, (Changed<Interaction>, With<ConstraintCheckbox>)>,
    mut board_commands: EventWriter<BoardCommand>,
) {
    for interaction in &interactions {
        if *interaction == Interaction::Pressed {
            board_commands.send(BoardCommand::ToggleConstraint);
        }
    }
}

/// The check mark derives its visibility from the store, like everything else.
pub fn sync_check_mark(
    state: Res<BoardState>,
    mut check_marks: Query<&mut Visibility, With<CheckMark>>,
) {
    if !state.is_changed() {
        return;
    }
    for mut visibility in &mut check_marks {
        *visibility = if state.constrain_to_white {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}
