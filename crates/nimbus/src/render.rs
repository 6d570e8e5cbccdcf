//! # Render Glue
//!
//! Turns the world into an ordered draw list for an external renderer.
//! Drawing itself happens behind the [`Renderer`] trait.

use nimbus_core::{
    Animation, ComponentKind, DrawBackend, Drawable, EntityId, Sprite, System, Transform, Vec3,
    World,
};

/// Registered name of [`RenderSystem`].
pub const RENDER_SYSTEM: &str = "render";

/// Everything a renderer needs to draw one entity.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawItem {
    /// Entity being drawn.
    pub entity: EntityId,
    /// Entity name, if any.
    pub name: Option<String>,
    /// Backend family.
    pub backend: DrawBackend,
    /// Dispatch key: the drawable's tag, else the entity name.
    pub tag: Option<String>,
    /// Top-left corner.
    pub position: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
    /// Draw order key.
    pub z_index: i32,
    /// Animation frame, else sprite frame, when either is attached.
    pub frame: Option<u32>,
}

/// Target surface size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Drawing backend implemented by the host.
pub trait Renderer {
    /// Clears the surface before a frame.
    fn clear(&mut self, viewport: Viewport);

    /// Draws one item. Items arrive in ascending z order.
    fn draw(&mut self, item: &DrawItem);
}

/// Visible `{Transform, Drawable}` entities, stably sorted by ascending z.
///
/// Entities with equal z keep query order.
#[must_use]
pub fn draw_list(world: &World) -> Vec<DrawItem> {
    let storages = world.storages();
    let mut items: Vec<DrawItem> = world
        .entities_with(&[ComponentKind::Drawable, ComponentKind::Transform])
        .into_iter()
        .filter_map(|id| {
            let drawable: &Drawable = storages.drawables.get(id).filter(|d| d.visible)?;
            let transform: &Transform = storages.transforms.get(id)?;
            let name = world.entity(id).and_then(|record| record.name.clone());
            let frame = storages
                .animations
                .get(id)
                .map(Animation::frame_index)
                .or_else(|| storages.sprites.get(id).map(|sprite: &Sprite| sprite.current_frame));

            Some(DrawItem {
                entity: id,
                tag: drawable.tag.clone().or_else(|| name.clone()),
                name,
                backend: drawable.backend,
                position: transform.position,
                scale: transform.scale,
                z_index: drawable.z_index,
                frame,
            })
        })
        .collect();

    items.sort_by_key(|item| item.z_index);
    items
}

/// Hands the draw list to a [`Renderer`] once per tick.
///
/// Register it last so it sees the tick's final state.
pub struct RenderSystem<R> {
    renderer: R,
    viewport: Viewport,
}

impl<R: Renderer> RenderSystem<R> {
    /// Creates the system over `renderer`.
    #[must_use]
    pub fn new(renderer: R, viewport: Viewport) -> Self {
        Self { renderer, viewport }
    }

    /// Updates the surface size, e.g. after a window resize.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// The wrapped renderer.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

impl<R: Renderer> System for RenderSystem<R> {
    fn name(&self) -> &str {
        RENDER_SYSTEM
    }

    fn update(&mut self, world: &mut World, _dt: f32) {
        self.renderer.clear(self.viewport);
        for item in draw_list(world) {
            self.renderer.draw(&item);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use nimbus_core::Entity;

    fn drawable_at(name: &str, z: i32) -> Entity {
        Entity::named(name)
            .with(Transform::from_xy(0.0, 0.0))
            .with(Drawable::new(z))
    }

    #[test]
    fn test_sorted_by_z_and_stable() {
        let mut world = World::new();
        world.add_entity(drawable_at("front", 5));
        world.add_entity(drawable_at("first", 0));
        world.add_entity(drawable_at("back", -3));
        world.add_entity(drawable_at("second", 0));

        let names: Vec<_> = draw_list(&world)
            .into_iter()
            .filter_map(|item| item.name)
            .collect();
        assert_eq!(names, vec!["back", "first", "second", "front"]);
    }

    #[test]
    fn test_hidden_and_incomplete_entities_skipped() {
        let mut world = World::new();
        let mut hidden = Drawable::new(0);
        hidden.visible = false;
        world.add_entity(Entity::named("hidden").with(Transform::default()).with(hidden));
        world.add_entity(Entity::named("no-transform").with(Drawable::new(0)));
        world.add_entity(Entity::named("no-drawable").with(Transform::default()));

        assert!(draw_list(&world).is_empty());
    }

    #[test]
    fn test_item_fields() {
        let mut world = World::new();
        let mut animation = Animation::new("run", 8);
        animation.current_frame = 3.6;
        let id = world.add_entity(
            Entity::named("hero")
                .with(Transform::from_xy(10.0, 20.0))
                .with(Drawable::new(1).with_tag("goku"))
                .with(animation)
                .with(Sprite::new("hero", 64.0, 96.0)),
        );
        let plain = world.add_entity(drawable_at("stone", 2));

        let items = draw_list(&world);
        assert_eq!(items[0].entity, id);
        assert_eq!(items[0].tag.as_deref(), Some("goku"));
        assert_eq!(items[0].frame, Some(3));
        assert_eq!(items[0].position, Vec3::xy(10.0, 20.0));
        assert_eq!(items[1].entity, plain);
        assert_eq!(items[1].tag.as_deref(), Some("stone"), "falls back to the name");
        assert_eq!(items[1].frame, None);
    }

    #[derive(Default)]
    struct Recorder {
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl Renderer for Recorder {
        fn clear(&mut self, viewport: Viewport) {
            self.calls
                .borrow_mut()
                .push(format!("clear {}x{}", viewport.width, viewport.height));
        }

        fn draw(&mut self, item: &DrawItem) {
            self.calls
                .borrow_mut()
                .push(format!("draw {}", item.tag.as_deref().unwrap_or("?")));
        }
    }

    #[test]
    fn test_system_clears_then_draws() {
        let recorder = Recorder::default();
        let calls = Rc::clone(&recorder.calls);
        let mut world = World::new();
        world
            .add_system(RenderSystem::new(recorder, Viewport::default()))
            .unwrap();
        world.add_entity(drawable_at("tree", 1));
        world.add_entity(drawable_at("ground", 0));

        world.update(0.016);

        assert_eq!(
            *calls.borrow(),
            vec!["clear 800x600", "draw ground", "draw tree"]
        );
    }
}
