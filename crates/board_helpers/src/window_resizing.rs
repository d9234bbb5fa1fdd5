// wgpu rejects surfaces larger than the maximum texture extent.
#[cfg(target_arch = "wasm32")]
const MAX_SURFACE_EXTENT: f32 = 2048.0;

#[cfg(target_arch = "wasm32")]
pub fn handle_browser_resize(
    mut primary_query: bevy::ecs::system::Query<
        &mut bevy::window::Window,
        bevy::ecs::query::With<bevy::window::PrimaryWindow>,
    >,
) {
    let Some(wasm_window) = web_sys::window() else {
        return;
    };
    let (Ok(inner_width), Ok(inner_height)) = (wasm_window.inner_width(), wasm_window.inner_height())
    else {
        return;
    };
    let (Some(target_width), Some(target_height)) = (inner_width.as_f64(), inner_height.as_f64())
    else {
        return;
    };

    let width = (target_width as f32).min(MAX_SURFACE_EXTENT);
    let height = (target_height as f32).min(MAX_SURFACE_EXTENT);

    for mut window in &mut primary_query {
        if (window.resolution.width() - width).abs() > f32::EPSILON
            || (window.resolution.height() - height).abs() > f32::EPSILON
        {
            window.resolution.set(width, height);
        }
    }
}
