use cgmath::{perspective, Deg, Matrix4, Point3, Rad, SquareMatrix, Vector3};
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
};

// cgmath produces clip z in -1..1; wgpu wants 0..1.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

const DEFAULT_ELEVATION: f32 = 20.0;
const DEFAULT_AZIMUTH: f32 = 45.0;
const ELEVATION_LIMIT: f32 = 89.0;
const MIN_DISTANCE: f32 = 1e-3;

/// Orbit camera: the eye circles a target point at a distance, Z up.
pub struct Camera {
    pub target: Point3<f32>,
    pub elevation: Deg<f32>,
    pub azimuth: Deg<f32>,
    pub distance: f32,
}

impl Camera {
    pub fn new() -> Camera {
        Camera {
            target: Point3::new(0.0, 0.0, 0.0),
            elevation: Deg(DEFAULT_ELEVATION),
            azimuth: Deg(DEFAULT_AZIMUTH),
            distance: 3.0,
        }
    }

    /// Center the orbit on the mesh and back the eye off far enough to
    /// see all of it.
    pub fn fit(&mut self, (min, max): ([f32; 3], [f32; 3])) {
        self.target = Point3::new(
            (min[0] + max[0]) / 2.0,
            (min[1] + max[1]) / 2.0,
            (min[2] + max[2]) / 2.0,
        );
        let half = Vector3::new(max[0] - min[0], max[1] - min[1], max[2] - min[2]) / 2.0;
        let radius = cgmath::InnerSpace::magnitude(half);
        if radius > 0.0 {
            self.distance = radius * 2.5;
        }
    }

    pub fn eye(&self) -> Point3<f32> {
        let (sin_e, cos_e) = Rad::from(self.elevation).0.sin_cos();
        let (sin_a, cos_a) = Rad::from(self.azimuth).0.sin_cos();
        self.target + Vector3::new(cos_e * cos_a, cos_e * sin_a, sin_e) * self.distance
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye(), self.target, Vector3::unit_z())
    }

    pub fn orbit(&mut self, d_azimuth: f32, d_elevation: f32) {
        self.azimuth = Deg((self.azimuth.0 + d_azimuth) % 360.0);
        self.elevation =
            Deg((self.elevation.0 + d_elevation).clamp(-ELEVATION_LIMIT, ELEVATION_LIMIT));
    }

    pub fn zoom(&mut self, steps: f32) {
        self.distance = (self.distance * 0.9_f32.powf(steps)).max(MIN_DISTANCE);
    }
}

pub struct Projection {
    pub aspect: f32,
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Projection {
    pub fn new(width: u32, height: u32) -> Projection {
        Projection {
            aspect: width as f32 / height.max(1) as f32,
            fovy: Deg(45.0),
            znear: 0.01,
            zfar: 1000.0,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        self.view_proj = (projection.matrix() * camera.view_matrix()).into();
    }
}

/// Left-drag orbits, the wheel zooms.
pub struct CameraController {
    orbit_speed: f32,
    dragging: bool,
    cursor: Option<PhysicalPosition<f64>>,
}

impl CameraController {
    pub fn new() -> CameraController {
        CameraController {
            orbit_speed: 0.4,
            dragging: false,
            cursor: None,
        }
    }

    /// Returns true when the camera moved and the frame is stale.
    pub fn window_event(&mut self, camera: &mut Camera, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.dragging = *state == ElementState::Pressed;
                false
            }
            WindowEvent::CursorMoved { position, .. } => {
                let previous = self.cursor.replace(*position);
                if !self.dragging {
                    return false;
                }
                let Some(previous) = previous else {
                    return false;
                };
                let dx = (position.x - previous.x) as f32;
                let dy = (position.y - previous.y) as f32;
                camera.orbit(-dx * self.orbit_speed, dy * self.orbit_speed);
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(position) => position.y as f32 / 20.0,
                };
                camera.zoom(steps);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_pose() {
        let camera = Camera::new();
        assert_eq!(camera.elevation, Deg(20.0));
        assert_eq!(camera.azimuth, Deg(45.0));
    }

    #[test]
    fn fit_centers_the_target() {
        let mut camera = Camera::new();
        camera.fit(([-1.0, 0.0, 2.0], [3.0, 4.0, 6.0]));
        assert_eq!(camera.target, Point3::new(1.0, 2.0, 4.0));
        assert!(camera.distance > 0.0);
    }

    #[test]
    fn fit_on_a_point_keeps_the_distance() {
        let mut camera = Camera::new();
        let before = camera.distance;
        camera.fit(([1.0, 1.0, 1.0], [1.0, 1.0, 1.0]));
        assert_eq!(camera.distance, before);
    }

    #[test]
    fn eye_orbits_at_distance() {
        let camera = Camera::new();
        let offset = camera.eye() - camera.target;
        let len = cgmath::InnerSpace::magnitude(offset);
        assert!((len - camera.distance).abs() < 1e-4);
    }

    #[test]
    fn elevation_never_reaches_the_pole() {
        let mut camera = Camera::new();
        camera.orbit(0.0, 500.0);
        assert_eq!(camera.elevation, Deg(89.0));
        camera.orbit(0.0, -1000.0);
        assert_eq!(camera.elevation, Deg(-89.0));
    }

    #[test]
    fn zoom_keeps_the_distance_positive() {
        let mut camera = Camera::new();
        camera.zoom(10_000.0);
        assert!(camera.distance > 0.0);
    }

    #[test]
    fn view_proj_is_finite() {
        let camera = Camera::new();
        let projection = Projection::new(800, 600);
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera, &projection);
        for row in uniform.view_proj {
            for value in row {
                assert!(value.is_finite());
            }
        }
    }
}
