use kiss3d::camera::Camera;
use kiss3d::renderer::{LineRenderer, Renderer};
use nalgebra::Point3;

use self::utils::{draw_path, path_iter_parametric};

mod utils;

const ORBIT_SEGMENTS: usize = 180;

pub struct CompoundRenderer {
    grid_renderer: LineRenderer,
    orbit_renderer: LineRenderer,
}

impl CompoundRenderer {
    pub fn new() -> Self {
        CompoundRenderer {
            grid_renderer: LineRenderer::new(),
            orbit_renderer: LineRenderer::new(),
        }
    }

    /// Draws a grid in the x-z plane, centered on `center`.
    pub fn draw_grid(&mut self, camera_distance: f32, center: Point3<f32>) {
        const NUM_SQUARES: i32 = 40;

        // We use the camera distance to determine the grid spacing.
        // If G is the grid subdivision, and R is a corrective factor, if the camera is
        // between G^k and G^(k+1) away, we draw a bright grid with spacing
        // R*G^(k+1) and a dimmer one with spacing G^k, getting dimmer as we get
        // closer to R*G^(k+1).
        const GRID_SUBDIV: i32 = 10;
        const GRID_SUBDIV_FLOAT: f32 = GRID_SUBDIV as f32;
        const CORRECTIVE: f32 = 0.4;

        let log_distance = camera_distance.log(GRID_SUBDIV_FLOAT);
        let k = log_distance.floor();
        let interp = log_distance - k;

        let square_size = CORRECTIVE * GRID_SUBDIV_FLOAT.powf(k);
        let color = Point3::new(0.25, 0.25, 0.3);
        let dim_color = color * (1.0 - interp);

        let max_coord = square_size * (NUM_SQUARES as f32);
        for i in (-NUM_SQUARES)..(NUM_SQUARES + 1) {
            let coord = square_size * (i as f32);
            let color = if i % GRID_SUBDIV == 0 {
                color
            } else {
                dim_color
            };

            // along x
            self.grid_renderer.draw_line(
                center + nalgebra::Vector3::new(-max_coord, 0.0, coord),
                center + nalgebra::Vector3::new(max_coord, 0.0, coord),
                color,
            );
            // along z
            self.grid_renderer.draw_line(
                center + nalgebra::Vector3::new(coord, 0.0, -max_coord),
                center + nalgebra::Vector3::new(coord, 0.0, max_coord),
                color,
            );
        }
    }

    /// Draws a closed path, where `point_at` maps an angle in [0, 2pi] to a
    /// point in scene space.
    pub fn draw_orbit<F>(&mut self, point_at: F, color: Point3<f32>)
    where
        F: Fn(f64) -> Point3<f32>,
    {
        draw_path(
            &mut self.orbit_renderer,
            path_iter_parametric(point_at, 0.0, std::f64::consts::TAU, ORBIT_SEGMENTS),
            &color,
        );
    }
}

impl Renderer for CompoundRenderer {
    fn render(&mut self, pass: usize, camera: &mut dyn Camera) {
        self.grid_renderer.render(pass, camera);
        self.orbit_renderer.render(pass, camera);
    }
}
