use std::path::PathBuf;

use crate::hooks::{Hooks, SceneInitEvent};
use crate::scene::{Camera, Material, Plane};
use crate::shader::{ShaderLoadError, ShaderSources};
use crate::time::FrameTime;

/// Construction parameters for a [`Sandbox`].
#[derive(Debug, Clone, Default)]
pub struct SandboxConfig {
    pub width: u32,
    pub height: u32,
    pub vertex_path: Option<PathBuf>,
    pub fragment_path: Option<PathBuf>,
}

/// Scene graph built by [`Sandbox::init_scene`]: one camera, one plane, one
/// material. There is no re-initialization path; the triple lives as long as
/// the sandbox.
pub struct SandboxScene {
    pub camera: Camera,
    pub plane: Plane,
    pub material: Material,
}

/// The sandbox controller.
///
/// Lifecycle: construct (loads shader text), `init_scene` once a render
/// surface exists, then one `tick` + draw + `frame_presented` per animation
/// frame. All mutation happens from the animation loop; nothing here is
/// shared across threads.
pub struct Sandbox {
    width: u32,
    height: u32,

    /// When enabled (the default), viewport resizes propagate into the
    /// camera aspect ratio and the resolution uniform.
    pub auto_resize: bool,

    hooks: Hooks,
    sources: Option<ShaderSources>,
    scene: Option<SandboxScene>,
}

impl Sandbox {
    /// Creates a sandbox, reading shader text from the configured paths.
    ///
    /// With no paths at all this logs a warning and returns
    /// [`ShaderLoadError::NoSources`]; nothing is initialized and nothing
    /// ever renders.
    pub fn new(config: SandboxConfig) -> Result<Self, ShaderLoadError> {
        let sources = ShaderSources::load(
            config.vertex_path.as_deref(),
            config.fragment_path.as_deref(),
        )?;
        Ok(Self::with_sources(config.width, config.height, sources))
    }

    /// Creates a sandbox from already-loaded shader text.
    pub fn with_sources(width: u32, height: u32, sources: ShaderSources) -> Self {
        Self {
            width,
            height,
            auto_resize: true,
            hooks: Hooks::new(),
            sources: Some(sources),
            scene: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_initialized(&self) -> bool {
        self.scene.is_some()
    }

    pub fn scene(&self) -> Option<&SandboxScene> {
        self.scene.as_ref()
    }

    pub fn scene_mut(&mut self) -> Option<&mut SandboxScene> {
        self.scene.as_mut()
    }

    // ── hook registration ─────────────────────────────────────────────────

    pub fn on_scene_init(&mut self, f: impl FnMut(&mut SceneInitEvent<'_>) + 'static) {
        self.hooks.on_scene_init(f);
    }

    pub fn on_pre_render(&mut self, f: impl FnMut() + 'static) {
        self.hooks.on_pre_render(f);
    }

    pub fn on_post_render(&mut self, f: impl FnMut() + 'static) {
        self.hooks.on_post_render(f);
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    /// Builds the scene graph and fires the scene-init hook, exactly once.
    ///
    /// The hook runs before the plane is ever drawn, so subscribers may still
    /// mutate the material. Subsequent calls are ignored; there is no re-init
    /// path.
    pub fn init_scene(&mut self) {
        if self.scene.is_some() {
            log::debug!("init_scene called twice; ignoring");
            return;
        }

        let Some(sources) = self.sources.take() else {
            return;
        };

        let aspect = self.width as f32 / self.height as f32;
        let mut scene = SandboxScene {
            camera: Camera::new(aspect),
            plane: Plane::new(self.width as f32, self.height as f32),
            material: Material::new(sources, self.width, self.height),
        };

        let mut event = SceneInitEvent {
            material: &mut scene.material,
            geometry: &scene.plane,
        };
        self.hooks.fire_scene_init(&mut event);

        self.scene = Some(scene);
    }

    /// Applies a viewport resize.
    ///
    /// With auto-resize enabled the sandbox adopts the new dimensions,
    /// updates the camera aspect + projection and the resolution uniform, and
    /// returns `true`. Disabled, this is a no-op returning `false` and the
    /// render keeps its configured size.
    pub fn resize(&mut self, new_width: u32, new_height: u32) -> bool {
        if !self.auto_resize || new_width == 0 || new_height == 0 {
            return false;
        }

        self.width = new_width;
        self.height = new_height;

        if let Some(scene) = self.scene.as_mut() {
            scene
                .camera
                .set_aspect(new_width as f32 / new_height as f32);
            scene.material.uniforms.resolution = [new_width as f32, new_height as f32];
        }

        true
    }

    /// One animation-loop iteration, CPU side: advances the time and frame
    /// uniforms, then fires the pre-render hook. A no-op before
    /// [`init_scene`](Self::init_scene).
    pub fn tick(&mut self, ft: FrameTime) {
        let Some(scene) = self.scene.as_mut() else {
            return;
        };

        scene.material.uniforms.time = ft.elapsed;
        scene.material.uniforms.frame += 1.0;

        self.hooks.fire_pre_render();
    }

    /// Marks the end of an animation-loop iteration: fires the post-render
    /// hook. A no-op before initialization.
    pub fn frame_presented(&mut self) {
        if self.scene.is_none() {
            return;
        }
        self.hooks.fire_post_render();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    use super::*;
    use crate::scene::INITIAL_FRAME;
    use crate::time::FrameClock;

    fn fragment_sources() -> ShaderSources {
        ShaderSources {
            vertex: None,
            fragment: Some("// fragment".to_string()),
        }
    }

    fn ticked(base: Instant, offset_ms: u64) -> FrameTime {
        // A real clock, stepped deterministically.
        let mut clock = FrameClock::new();
        clock.tick_at(base + Duration::from_millis(offset_ms))
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn no_sources_never_initializes() {
        let config = SandboxConfig {
            width: 640,
            height: 480,
            vertex_path: None,
            fragment_path: None,
        };
        match Sandbox::new(config) {
            Err(ShaderLoadError::NoSources) => {}
            other => panic!("expected NoSources, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn fresh_scene_matches_the_configured_viewport() {
        let mut sandbox = Sandbox::with_sources(640, 480, fragment_sources());
        assert!(!sandbox.is_initialized());

        sandbox.init_scene();
        let scene = sandbox.scene().expect("scene after init");

        assert_eq!(scene.material.uniforms.resolution, [640.0, 480.0]);
        assert_eq!(scene.material.uniforms.frame, INITIAL_FRAME);
        assert_eq!(scene.material.uniforms.time, 0.0);
        assert_eq!(scene.camera.aspect(), 640.0 / 480.0);
        assert_eq!(scene.plane.width, 640.0);
        assert_eq!(scene.plane.height, 480.0);
    }

    // ── scene init hook ───────────────────────────────────────────────────

    #[test]
    fn scene_init_fires_exactly_once() {
        let count = Rc::new(RefCell::new(0));
        let mut sandbox = Sandbox::with_sources(640, 480, fragment_sources());

        let c = Rc::clone(&count);
        sandbox.on_scene_init(move |_| *c.borrow_mut() += 1);

        sandbox.init_scene();
        sandbox.init_scene(); // no re-init path
        assert_eq!(*count.borrow(), 1);
        assert!(sandbox.is_initialized());
    }

    #[test]
    fn scene_init_subscriber_can_mutate_the_material() {
        let mut sandbox = Sandbox::with_sources(640, 480, fragment_sources());
        sandbox.on_scene_init(|ev| {
            ev.material.uniforms.frame = 7.0;
            assert_eq!(ev.geometry.width, 640.0);
        });

        sandbox.init_scene();
        assert_eq!(sandbox.scene().unwrap().material.uniforms.frame, 7.0);
    }

    // ── animation loop ────────────────────────────────────────────────────

    #[test]
    fn frame_uniform_advances_by_one_per_tick() {
        let mut sandbox = Sandbox::with_sources(640, 480, fragment_sources());
        sandbox.init_scene();

        let base = Instant::now();
        let n = 5;
        for i in 1..=n {
            sandbox.tick(ticked(base, 16 * i));
        }

        let uniforms = &sandbox.scene().unwrap().material.uniforms;
        assert_eq!(uniforms.frame, INITIAL_FRAME + n as f32);
    }

    #[test]
    fn time_uniform_is_non_decreasing() {
        let mut sandbox = Sandbox::with_sources(640, 480, fragment_sources());
        sandbox.init_scene();

        let base = Instant::now();
        let mut clock = FrameClock::new();
        let mut prev = 0.0f32;
        for i in 1..10u64 {
            sandbox.tick(clock.tick_at(base + Duration::from_millis(9 * i)));
            let t = sandbox.scene().unwrap().material.uniforms.time;
            assert!(t >= prev);
            prev = t;
        }
    }

    #[test]
    fn pre_and_post_render_fire_each_iteration() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut sandbox = Sandbox::with_sources(640, 480, fragment_sources());

        let l = Rc::clone(&log);
        sandbox.on_pre_render(move || l.borrow_mut().push("pre"));
        let l = Rc::clone(&log);
        sandbox.on_post_render(move || l.borrow_mut().push("post"));

        sandbox.init_scene();
        let base = Instant::now();
        sandbox.tick(ticked(base, 16));
        sandbox.frame_presented();
        sandbox.tick(ticked(base, 32));
        sandbox.frame_presented();

        assert_eq!(*log.borrow(), vec!["pre", "post", "pre", "post"]);
    }

    #[test]
    fn tick_before_init_is_a_noop() {
        let fired = Rc::new(RefCell::new(false));
        let mut sandbox = Sandbox::with_sources(640, 480, fragment_sources());

        let f = Rc::clone(&fired);
        sandbox.on_pre_render(move || *f.borrow_mut() = true);

        sandbox.tick(ticked(Instant::now(), 16));
        sandbox.frame_presented();
        assert!(!*fired.borrow());
    }

    // ── resize ────────────────────────────────────────────────────────────

    #[test]
    fn resize_with_auto_resize_follows_the_viewport() {
        let mut sandbox = Sandbox::with_sources(640, 480, fragment_sources());
        sandbox.init_scene();

        assert!(sandbox.resize(1280, 720));
        assert_eq!(sandbox.width(), 1280);
        assert_eq!(sandbox.height(), 720);

        let scene = sandbox.scene().unwrap();
        assert_eq!(scene.camera.aspect(), 1280.0 / 720.0);
        assert_eq!(scene.material.uniforms.resolution, [1280.0, 720.0]);
    }

    #[test]
    fn resize_with_auto_resize_disabled_changes_nothing() {
        let mut sandbox = Sandbox::with_sources(640, 480, fragment_sources());
        sandbox.init_scene();
        sandbox.auto_resize = false;

        assert!(!sandbox.resize(1280, 720));
        assert_eq!(sandbox.width(), 640);

        let scene = sandbox.scene().unwrap();
        assert_eq!(scene.camera.aspect(), 640.0 / 480.0);
        assert_eq!(scene.material.uniforms.resolution, [640.0, 480.0]);
    }

    #[test]
    fn zero_sized_resize_is_rejected() {
        let mut sandbox = Sandbox::with_sources(640, 480, fragment_sources());
        sandbox.init_scene();
        assert!(!sandbox.resize(0, 720));
        assert_eq!(sandbox.width(), 640);
    }
}
