use std::collections::HashMap;
use std::f32::consts::{FRAC_PI_3, FRAC_PI_4};
use std::f64::consts::TAU;
use std::path::{Path, PathBuf};

use kiss3d::camera::{ArcBall, Camera};
use kiss3d::light::Light;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::scene::SceneNode;
use kiss3d::window::Window;
use nalgebra::{Point2, Point3, Translation3, UnitQuaternion, Vector3};
use tracing::{debug, warn};

use super::controller::Controller;
use super::renderers::CompoundRenderer;
use crate::astro::SolvedState;
use crate::model::{Body, BodyID, BodyState, Orrery, SimulationClock};

// Maps an angle in [0, 2pi] to a point on an orbit, in world space
type PathFn = Box<dyn Fn(f64) -> Point3<f64>>;

// The outermost orbits are around a thousand units out, so these planes keep
// the whole system in view from the furthest zoom
const CAMERA_Z_NEAR: f32 = 1.0;
const CAMERA_Z_FAR: f32 = 1.0e5;
const CAMERA_MAX_DISTANCE: f32 = 2.0e4;
const CAMERA_START_DISTANCE: f32 = 2000.0;

pub struct View {
    // Object state
    orrery: Orrery,
    clock: SimulationClock,
    solved: HashMap<BodyID, SolvedState>,
    body_nodes: HashMap<BodyID, SceneNode>,
    // Camera
    camera: ArcBall,
    camera_focus: CameraFocus,
    // Misc
    renderer: CompoundRenderer,
}

pub struct CameraFocus {
    focus_points: Vec<BodyID>,
    focus_idx: usize,
}

impl CameraFocus {
    pub fn new(orrery: &Orrery) -> Self {
        let mut focus_points: Vec<_> = orrery.bodies().map(|b| b.id).collect();
        focus_points.sort();

        CameraFocus {
            focus_points,
            focus_idx: 0,
        }
    }

    pub fn next(&mut self) {
        let num_bodies = self.focus_points.len();
        self.focus_idx = (self.focus_idx + 1) % num_bodies;
    }

    pub fn prev(&mut self) {
        let num_bodies = self.focus_points.len();
        self.focus_idx = (self.focus_idx + num_bodies - 1) % num_bodies;
    }

    pub fn point(&self) -> BodyID {
        self.focus_points[self.focus_idx]
    }
}

impl View {
    pub fn new(orrery: Orrery, asset_root: &Path, window: &mut Window) -> Self {
        let clock = SimulationClock::new();
        let solved = orrery.tick(clock.elapsed());

        let camera = Self::create_camera();
        let camera_focus = CameraFocus::new(&orrery);

        let mut body_nodes = HashMap::new();
        for body in orrery.bodies() {
            let node = Self::create_body_object(window, body, asset_root);
            body_nodes.insert(body.id, node);
        }

        let mut view = Self {
            orrery,
            clock,
            solved,
            body_nodes,
            camera,
            camera_focus,
            renderer: CompoundRenderer::new(),
        };
        view.fix_camera_zoom();
        view.update_scene_objects();

        view
    }

    // Always looks at the origin, which is wherever the focused body is
    fn create_camera() -> ArcBall {
        // Start 60 degrees down from straight overhead
        let (sin, cos) = FRAC_PI_3.sin_cos();
        let eye = Point3::new(0.0, cos, sin) * CAMERA_START_DISTANCE;
        let mut camera =
            ArcBall::new_with_frustrum(FRAC_PI_4, CAMERA_Z_NEAR, CAMERA_Z_FAR, eye, Point3::origin());
        camera.set_max_dist(CAMERA_MAX_DISTANCE);
        // Panning would move the camera off the focused body
        camera.rebind_drag_button(None);
        camera
    }

    /// Loads the body's model if there's an OBJ file behind its asset
    /// identifier, and otherwise stands in a plain sphere.
    fn create_body_object(window: &mut Window, body: &Body, asset_root: &Path) -> SceneNode {
        let path = resolve_asset(asset_root, &body.info.asset);
        let is_obj = path.extension().map_or(false, |ext| ext == "obj");

        if is_obj && path.is_file() {
            debug!("Loading {} for {}", path.display(), body.info.name);
            let mtl_dir = path.parent().unwrap_or(asset_root);
            return window.add_obj(&path, mtl_dir, Vector3::repeat(body.info.radius));
        }

        warn!(
            "No loadable model at {}, drawing {} as a sphere",
            path.display(),
            body.info.name
        );
        let mut sphere = window.add_sphere(body.info.radius);
        let color = &body.info.color;
        sphere.set_color(color.x, color.y, color.z);
        sphere
    }

    pub fn update_state_by(&mut self, dt: f64) {
        let time = self.clock.advance(dt);
        self.solved = self.orrery.tick(time);
        self.update_scene_objects();
    }

    pub fn restart_clock(&mut self) {
        self.clock.restart();
        self.update_state_by(0.0);
    }

    pub fn camera_focus_next(&mut self) {
        self.camera_focus.next();
        self.fix_camera_zoom();
        self.update_scene_objects();
    }

    pub fn camera_focus_prev(&mut self) {
        self.camera_focus.prev();
        self.fix_camera_zoom();
        self.update_scene_objects();
    }

    fn fix_camera_zoom(&mut self) {
        let focused = self.orrery.get_body(self.camera_focus.point());
        let min_distance = focused.info.radius * 2.0;
        self.camera.set_min_dist(min_distance);
        if self.camera.dist() < min_distance {
            self.camera.set_dist(min_distance);
        }
    }

    fn focus_position(&self) -> Point3<f64> {
        self.solved[&self.camera_focus.point()].position
    }

    // The scene is drawn with the focused body at the origin
    fn to_focus_space(&self, position: &Point3<f64>) -> Point3<f32> {
        let relative = *position - self.focus_position();
        nalgebra::convert(Point3::from(relative))
    }

    fn update_scene_objects(&mut self) {
        let focus = self.focus_position();
        for (id, node) in self.body_nodes.iter_mut() {
            let state = &self.solved[id];

            let position: Point3<f32> = nalgebra::convert(Point3::from(state.position - focus));
            node.set_local_translation(Translation3::from(position));

            // Only the displayed angle gets wrapped, to keep f32 precision
            let angle = state.rotation_angle.rem_euclid(TAU) as f32;
            node.set_local_rotation(UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angle));
        }
    }

    pub fn prerender_scene(&mut self, window: &mut Window, controller: &Controller) {
        // Light comes from the Sun, wherever it's ended up in focus space
        if let Some(center) = self.orrery.bodies().find(|b| b.parent_id().is_none()) {
            let sun = self.to_focus_space(&self.solved[&center.id].position);
            window.set_light(Light::Absolute(sun));
        }

        let origin = self.to_focus_space(&Point3::origin());
        self.renderer.draw_grid(self.camera.dist(), origin);
        self.draw_orbits();

        let default_font = kiss3d::text::Font::default();
        let text_color = Point3::new(1.0, 1.0, 1.0);
        window.draw_text(
            &self.left_hand_text(),
            &Point2::origin(),
            60.0,
            &default_font,
            &text_color,
        );
        window.draw_text(
            &self.time_summary_text(controller.time_scale(), controller.fps()),
            // no idea why i have to multiply by 2.0, but there it is
            &Point2::new(window.width() as f32 * 2.0 - 600.0, 0.0),
            60.0,
            &default_font,
            &text_color,
        );
    }

    fn draw_orbits(&mut self) {
        let mut paths: Vec<(PathFn, Point3<f32>)> = vec![];
        for body in self.orrery.bodies() {
            let color = body.info.color;
            match &body.state {
                BodyState::FixedAtOrigin { .. } => {}
                BodyState::Orbiting { orbit, .. } => {
                    let orbit = *orbit;
                    let path: PathFn = Box::new(move |s| orbit.point_at_angle(s));
                    paths.push((path, color));
                }
                BodyState::Satellite {
                    primary_id, radius, ..
                } => {
                    let center = self.solved[primary_id].position;
                    let radius = *radius;
                    let path: PathFn = Box::new(move |s: f64| {
                        center + Vector3::new(radius * s.cos(), 0.0, radius * s.sin())
                    });
                    paths.push((path, color));
                }
            }
        }

        let focus = self.focus_position();
        for (path, color) in paths {
            self.renderer.draw_orbit(
                |s| nalgebra::convert(Point3::from(path(s) - focus)),
                color,
            );
        }
    }

    fn left_hand_text(&self) -> String {
        let id = self.camera_focus.point();
        let body = self.orrery.get_body(id);
        let state = &self.solved[&id];

        format!(
            "Focused on: {}
State:
    Position: ({:.1}, {:.1}, {:.1})
    Distance from center: {:.1}
    Spin: {:.1} turns
Orbiting: {}",
            body.info.name,
            state.position.x,
            state.position.y,
            state.position.z,
            state.position.coords.norm(),
            state.rotation_angle / TAU,
            self.orbit_summary_text(body),
        )
    }

    fn orbit_summary_text(&self, body: &Body) -> String {
        let parent = match body.parent_id() {
            None => return String::from("N/A"),
            Some(id) => self.orrery.get_body(id),
        };

        // Indentation is intentional
        match &body.state {
            BodyState::Orbiting { orbit, .. } => format!(
                "{}
    SMA: {:.0}
    Eccentricity: {:.4}
    Inclination: {:.2}
    Period: {:.1} s",
                parent.info.name,
                orbit.semimajor_axis(),
                orbit.eccentricity(),
                orbit.inclination_degrees(),
                orbit.speeds().orbit_period_seconds(),
            ),
            BodyState::Satellite { radius, speeds, .. } => format!(
                "{}
    Radius: {:.0}
    Period: {:.1} s",
                parent.info.name,
                radius,
                speeds.orbit_period_seconds(),
            ),
            BodyState::FixedAtOrigin { .. } => String::from("N/A"),
        }
    }

    fn time_summary_text(&self, time_scale: f64, fps: f64) -> String {
        let year_seconds = self
            .orrery
            .reference_body()
            .speeds()
            .map_or(f64::NAN, |s| s.orbit_period_seconds());
        format!(
            "Time: {:.1} s ({:.2} {} years)
Time scale: {}x
FPS: {:.0}",
            self.clock.elapsed(),
            self.clock.elapsed() / year_seconds,
            self.orrery.reference_body().info.name,
            time_scale,
            fps,
        )
    }

    pub fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (Some(&mut self.camera), None, Some(&mut self.renderer), None)
    }
}

/// Asset identifiers look like absolute web paths; they're looked up under
/// the asset root.
fn resolve_asset(asset_root: &Path, asset: &str) -> PathBuf {
    asset_root.join(asset.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_camera_frames_origin() {
        let camera = View::create_camera();
        assert_eq!(camera.at(), Point3::origin());
        assert_relative_eq!(camera.dist(), CAMERA_START_DISTANCE, max_relative = 1e-5);
        assert_eq!(camera.drag_button(), None);

        // Above the orbital plane, looking down at it
        let eye = camera.eye();
        assert!(eye.y > 0.0);
        assert_relative_eq!(eye.y, CAMERA_START_DISTANCE * 0.5, max_relative = 1e-4);
    }

    #[test]
    fn test_resolve_asset() {
        let root = Path::new("public");
        assert_eq!(
            resolve_asset(root, "/images/SolarSystemElements/earth.gltf"),
            Path::new("public/images/SolarSystemElements/earth.gltf")
        );
        assert_eq!(
            resolve_asset(root, "models/moon.obj"),
            Path::new("public/models/moon.obj")
        );
    }
}
