use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Result;
use winit::dpi::{LogicalSize, PhysicalSize};

use shaderbox_engine::core::{App, AppControl, FrameCtx};
use shaderbox_engine::device::GpuInit;
use shaderbox_engine::logging::{self, LoggingConfig};
use shaderbox_engine::render::{OverlayRenderer, SandboxRenderer};
use shaderbox_engine::sandbox::{Sandbox, SandboxConfig};
use shaderbox_engine::shader::ShaderLoadError;
use shaderbox_engine::stats::FpsCounter;
use shaderbox_engine::text::{FontId, FontSystem};
use shaderbox_engine::window::{Runtime, RuntimeConfig};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

fn main() -> Result<()> {
    logging::init_logging(LoggingConfig::default());

    let fragment = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/shader.frag.wgsl".to_string());

    let mut sandbox = match Sandbox::new(SandboxConfig {
        width: WIDTH,
        height: HEIGHT,
        vertex_path: None,
        fragment_path: Some(PathBuf::from(fragment)),
    }) {
        Ok(sandbox) => sandbox,
        // Already logged as a warning; there is nothing to preview.
        Err(ShaderLoadError::NoSources) => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    // The preview keeps its configured size; window resizes only stretch it.
    sandbox.auto_resize = false;

    sandbox.on_scene_init(|_event| {
        // Extension seam: seed extra state on `_event.material` here to
        // customize the material before the first frame.
    });

    let fps = Rc::new(RefCell::new(FpsCounter::new()));
    let fps_hook = Rc::clone(&fps);
    sandbox.on_pre_render(move || fps_hook.borrow_mut().update());

    let mut fonts = FontSystem::new();
    let overlay_font = load_overlay_font(&mut fonts);

    Runtime::run(
        RuntimeConfig {
            title: "shaderbox".to_string(),
            initial_size: LogicalSize::new(WIDTH as f64, HEIGHT as f64),
        },
        GpuInit::default(),
        ViewerApp {
            sandbox,
            renderer: None,
            pipeline_failed: false,
            overlay: OverlayRenderer::new(),
            fonts,
            overlay_font,
            fps,
        },
    )
}

fn load_overlay_font(fonts: &mut FontSystem) -> Option<FontId> {
    let candidates = [
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    ];

    let Some(bytes) = candidates.iter().find_map(|p| std::fs::read(p).ok()) else {
        log::warn!("no overlay font found; frame-rate counter disabled");
        return None;
    };

    match fonts.load_font(&bytes) {
        Ok(id) => Some(id),
        Err(e) => {
            log::warn!("overlay font failed to parse: {e}");
            None
        }
    }
}

struct ViewerApp {
    sandbox: Sandbox,
    renderer: Option<SandboxRenderer>,
    pipeline_failed: bool,
    overlay: OverlayRenderer,
    fonts: FontSystem,
    overlay_font: Option<FontId>,
    fps: Rc<RefCell<FpsCounter>>,
}

impl App for ViewerApp {
    fn on_resize(&mut self, new_size: PhysicalSize<u32>) {
        self.sandbox.resize(new_size.width, new_size.height);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        // The render surface exists by the time frames arrive; build the
        // scene on the first one.
        if !self.sandbox.is_initialized() {
            self.sandbox.init_scene();
        }

        self.sandbox.tick(ctx.time);

        let sandbox = &self.sandbox;
        let renderer = &mut self.renderer;
        let pipeline_failed = &mut self.pipeline_failed;
        let overlay = &mut self.overlay;
        let fonts = &self.fonts;
        let overlay_font = self.overlay_font;
        let fps = self.fps.borrow();

        let control = ctx.render(CLEAR_COLOR, |rctx, target| {
            if let Some(scene) = sandbox.scene() {
                if renderer.is_none() && !*pipeline_failed {
                    match SandboxRenderer::new(rctx, scene) {
                        Ok(r) => *renderer = Some(r),
                        Err(e) => {
                            // Keep the window open on a broken shader; the
                            // clear color is all that renders.
                            log::error!("{e:#}");
                            *pipeline_failed = true;
                        }
                    }
                }

                if let Some(r) = renderer.as_ref() {
                    r.render(rctx, target, scene);
                }
            }

            if let Some(font) = overlay_font {
                overlay.render(
                    rctx,
                    target,
                    fonts,
                    font,
                    fps.label(),
                    (8.0, 8.0),
                    16.0,
                    [1.0, 1.0, 1.0, 1.0],
                );
            }
        });
        drop(fps);

        if control == AppControl::Exit {
            return control;
        }

        self.sandbox.frame_presented();
        AppControl::Continue
    }
}
