use crate::scene::{Material, Plane};

/// Payload of the scene-initialization event.
///
/// Fired once, after the scene objects exist and before the plane is first
/// drawn, so subscribers may still reshape the material (e.g. seed extra
/// uniform state) ahead of the first frame.
pub struct SceneInitEvent<'a> {
    pub material: &'a mut Material,
    pub geometry: &'a Plane,
}

type SceneInitFn = Box<dyn FnMut(&mut SceneInitEvent<'_>)>;
type FrameFn = Box<dyn FnMut()>;

/// Ordered subscriber lists for the sandbox lifecycle events.
///
/// Callbacks are invoked synchronously, in registration order, each receiving
/// the same payload. Subscriptions accumulate for the life of the sandbox;
/// there is no removal.
#[derive(Default)]
pub struct Hooks {
    scene_init: Vec<SceneInitFn>,
    pre_render: Vec<FrameFn>,
    post_render: Vec<FrameFn>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_scene_init(&mut self, f: impl FnMut(&mut SceneInitEvent<'_>) + 'static) {
        self.scene_init.push(Box::new(f));
    }

    pub fn on_pre_render(&mut self, f: impl FnMut() + 'static) {
        self.pre_render.push(Box::new(f));
    }

    pub fn on_post_render(&mut self, f: impl FnMut() + 'static) {
        self.post_render.push(Box::new(f));
    }

    pub(crate) fn fire_scene_init(&mut self, event: &mut SceneInitEvent<'_>) {
        for f in &mut self.scene_init {
            f(event);
        }
    }

    pub(crate) fn fire_pre_render(&mut self) {
        for f in &mut self.pre_render {
            f();
        }
    }

    pub(crate) fn fire_post_render(&mut self) {
        for f in &mut self.post_render {
            f();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::shader::ShaderSources;

    fn material() -> Material {
        Material::new(
            ShaderSources {
                vertex: None,
                fragment: Some("@fragment fn fs_main() {}".to_string()),
            },
            640,
            480,
        )
    }

    // ── ordering ──────────────────────────────────────────────────────────

    #[test]
    fn frame_subscribers_run_in_registration_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut hooks = Hooks::new();

        for tag in ["first", "second", "third"] {
            let order = Rc::clone(&order);
            hooks.on_pre_render(move || order.borrow_mut().push(tag));
        }

        hooks.fire_pre_render();
        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn scene_init_subscribers_run_in_registration_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut hooks = Hooks::new();

        for tag in [1, 2, 3] {
            let order = Rc::clone(&order);
            hooks.on_scene_init(move |_| order.borrow_mut().push(tag));
        }

        let mut mat = material();
        let plane = Plane::new(640.0, 480.0);
        let mut ev = SceneInitEvent {
            material: &mut mat,
            geometry: &plane,
        };
        hooks.fire_scene_init(&mut ev);
        assert_eq!(*order.borrow(), vec![1, 2, 3]);
    }

    // ── invocation counts ─────────────────────────────────────────────────

    #[test]
    fn each_subscriber_invoked_exactly_once_per_fire() {
        let count = Rc::new(RefCell::new(0));
        let mut hooks = Hooks::new();

        let c = Rc::clone(&count);
        hooks.on_post_render(move || *c.borrow_mut() += 1);

        hooks.fire_post_render();
        assert_eq!(*count.borrow(), 1);
        hooks.fire_post_render();
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn fire_with_zero_subscribers_is_a_noop() {
        let mut hooks = Hooks::new();
        hooks.fire_pre_render();
        hooks.fire_post_render();

        let mut mat = material();
        let plane = Plane::new(1.0, 1.0);
        let mut ev = SceneInitEvent {
            material: &mut mat,
            geometry: &plane,
        };
        hooks.fire_scene_init(&mut ev);
    }

    // ── payload ───────────────────────────────────────────────────────────

    #[test]
    fn subscribers_see_the_same_payload() {
        let mut hooks = Hooks::new();

        // The first subscriber mutates the material, the second observes the
        // mutation — both were handed the same event.
        hooks.on_scene_init(|ev| ev.material.uniforms.frame = 42.0);
        hooks.on_scene_init(|ev| assert_eq!(ev.material.uniforms.frame, 42.0));

        let mut mat = material();
        let plane = Plane::new(640.0, 480.0);
        let mut ev = SceneInitEvent {
            material: &mut mat,
            geometry: &plane,
        };
        hooks.fire_scene_init(&mut ev);

        assert_eq!(mat.uniforms.frame, 42.0);
    }
}
