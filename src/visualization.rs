//! 3D visualization of puzzle arrangements using kiss3d.

use std::collections::HashMap;

use kiss3d::prelude::*;

use streakview::grid::{Color as PaintColor, Grid};
use streakview::render::color_rgb;

/// Returns the display color for a streak color.
fn cube_color(color: PaintColor) -> Color {
    let [r, g, b] = color_rgb(color);
    Color::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        1.0,
    )
}

/// Represents a rendered cube in the 3D scene.
struct RenderedCube {
    /// The kiss3d scene node for this cube.
    node: SceneNode3d,
    /// The cube's position when not exploded.
    base_position: Vec3,
    /// Which streak color this cube shows.
    color: PaintColor,
}

/// Builds the 3D scene for a grid.
///
/// Coordinate conventions:
/// - Grid coordinates use integer x, y, z in `0..side`.
/// - Rendered cubes map x->X, y->Y, z->Z in world units.
/// - The grid is centered at the origin.
///
/// Returns the rendered cubes and the centroid of each color, for the
/// explosion animation.
fn build_scene(scene: &mut SceneNode3d, grid: &Grid) -> (Vec<RenderedCube>, HashMap<PaintColor, Vec3>) {
    /// Size of each rendered cube (slightly smaller than 1.0 for visible gaps).
    const CUBE_SIZE: f32 = 0.9;

    let center_offset = -(grid.side() as f32 - 1.0) / 2.0;

    let mut sums: HashMap<PaintColor, (Vec3, f32)> = HashMap::new();
    let mut rendered_cubes = Vec::new();
    for ((x, y, z), color) in grid.colored_cells() {
        let base_position = Vec3::new(
            x as f32 + center_offset,
            y as f32 + center_offset,
            z as f32 + center_offset,
        );
        let node = scene
            .add_cube(CUBE_SIZE, CUBE_SIZE, CUBE_SIZE)
            .set_color(cube_color(color))
            .set_position(base_position);
        rendered_cubes.push(RenderedCube {
            node,
            base_position,
            color,
        });

        let entry = sums.entry(color).or_insert((Vec3::ZERO, 0.0));
        entry.0 += base_position;
        entry.1 += 1.0;
    }

    let centroids = sums
        .into_iter()
        .map(|(color, (sum, count))| (color, sum / count))
        .collect();
    (rendered_cubes, centroids)
}

/// Displays grids in an interactive 3D viewer, one at a time.
///
/// Each entry is a question index and its grid.
pub fn display(grids: Vec<(usize, Grid)>) {
    pollster::block_on(display_async(grids));
}

fn title(grids: &[(usize, Grid)], current: usize) -> String {
    format!(
        "Question {} ({}/{}) - [Left/Right] navigate, [Up/Down] explode, [R] reset",
        grids[current].0,
        current + 1,
        grids.len()
    )
}

async fn display_async(grids: Vec<(usize, Grid)>) {
    if grids.is_empty() {
        println!("No grids to display");
        return;
    }

    let num_grids = grids.len();
    let mut current = 0;

    let mut window = Window::new(&title(&grids, current)).await;

    let mut camera = OrbitCamera3d::default();
    camera.set_dist(10.0);

    let mut scene = SceneNode3d::empty();
    scene
        .add_light(Light::point(100.0))
        .set_position(Vec3::new(6.0, 6.0, 6.0));

    let (mut rendered_cubes, mut centroids) = build_scene(&mut scene, &grids[current].1);

    // how much to pull colors apart (0.0 = compact)
    let mut explosion_amount: f32 = 0.0;
    const EXPLOSION_SPEED: f32 = 0.05;
    let mut needs_rebuild = false;

    loop {
        for event in window.events().iter() {
            if let kiss3d::event::WindowEvent::Key(key, action, _) = event.value {
                use kiss3d::event::{Action, Key};
                if action == Action::Press {
                    match key {
                        Key::Up => explosion_amount += EXPLOSION_SPEED,
                        Key::Down => {
                            explosion_amount = (explosion_amount - EXPLOSION_SPEED).max(0.0)
                        }
                        Key::R => explosion_amount = 0.0,
                        Key::Right => {
                            current = (current + 1) % num_grids;
                            needs_rebuild = true;
                        }
                        Key::Left => {
                            current = current.checked_sub(1).unwrap_or(num_grids - 1);
                            needs_rebuild = true;
                        }
                        _ => {}
                    }
                }
            }
        }

        if needs_rebuild {
            for mut cube in rendered_cubes.drain(..) {
                cube.node.remove();
            }
            (rendered_cubes, centroids) = build_scene(&mut scene, &grids[current].1);
            window.set_title(&title(&grids, current));
            needs_rebuild = false;
        }

        for cube in &mut rendered_cubes {
            let centroid = centroids.get(&cube.color).copied().unwrap_or(Vec3::ZERO);
            let explosion_direction = centroid.normalize_or_zero();
            cube.node
                .set_position(cube.base_position + explosion_direction * explosion_amount * 2.0);
        }

        if !window.render_3d(&mut scene, &mut camera).await {
            break;
        }
    }
}
