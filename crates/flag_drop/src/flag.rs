use bevy::color::Alpha;
use bevy::prelude::*;

use crate::board::{Grid, square_center};
use crate::drag::DragSession;
use crate::state::BoardState;

const FLAG_Z: f32 = 10.0;
const POLE_HEIGHT: f32 = 26.0;

/// The single draggable flag marker.
#[derive(Component)]
pub struct Flag;

pub fn spawn_flag(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    grid: Res<Grid>,
    state: Res<BoardState>,
) {
    let start = grid
        .get(state.selected_square)
        .map_or(Vec2::ZERO, |square| square_center(square.x, square.y));

    let pole = meshes.add(Rectangle::new(2.0, POLE_HEIGHT));
    // Counter-clockwise so the mesh faces the camera.
    let pennant = meshes.add(Triangle2d::new(
        Vec2::new(1.0, POLE_HEIGHT / 2.0 - 10.0),
        Vec2::new(13.0, POLE_HEIGHT / 2.0 - 5.0),
        Vec2::new(1.0, POLE_HEIGHT / 2.0),
    ));

    commands
        .spawn((
            Flag,
            Transform::from_translation(start.extend(FLAG_Z)),
            Visibility::default(),
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh2d(pole),
                MeshMaterial2d(materials.add(ColorMaterial::from(Color::srgb(0.4, 0.4, 0.4)))),
                Transform::from_xyz(0.0, 0.0, 0.0),
            ));
            parent.spawn((
                Mesh2d(pennant),
                MeshMaterial2d(materials.add(ColorMaterial::from(Color::srgb(0.85, 0.1, 0.1)))),
                Transform::from_xyz(0.0, 0.0, 1.0),
            ));
        });
}

/// Rests the flag on whichever square the store selects, and dims it while a
/// drag session is open.
pub fn update_flag(
    grid: Res<Grid>,
    state: Res<BoardState>,
    session: Res<DragSession>,
    mut flags: Query<(&mut Transform, &Children), With<Flag>>,
    material_handles: Query<&MeshMaterial2d<ColorMaterial>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let Ok((mut transform, children)) = flags.get_single_mut() else {
        return;
    };

    if let Some(square) = grid.get(state.selected_square) {
        transform.translation = square_center(square.x, square.y).extend(FLAG_Z);
    }

    let alpha = if session.is_active() { 0.5 } else { 1.0 };
    for &child in children {
        let Ok(handle) = material_handles.get(child) else {
            continue;
        };
        if let Some(material) = materials.get_mut(&handle.0) {
            material.color = material.color.with_alpha(alpha);
        }
    }
}
