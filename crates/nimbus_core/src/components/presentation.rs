//! Presentation metadata read by the renderer. No system mutates these
//! except through `reset`.

use serde::{Deserialize, Serialize};

/// Sprite sheet metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sprite {
    /// Sprite sheet name.
    pub name: String,
    /// Frame width in pixels.
    pub width: f32,
    /// Frame height in pixels.
    pub height: f32,
    /// Frame to draw.
    pub current_frame: u32,
    /// Frames per second.
    pub frame_rate: f32,
    /// Whether the sheet loops.
    pub looping: bool,
    /// Whether to draw.
    pub visible: bool,
}

impl Sprite {
    /// Creates a visible, looping sprite at 12 fps.
    #[must_use]
    pub fn new(name: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            current_frame: 0,
            frame_rate: 12.0,
            looping: true,
            visible: true,
        }
    }

    /// Frame 0, visible.
    pub fn reset(&mut self) {
        self.current_frame = 0;
        self.visible = true;
    }
}

impl Default for Sprite {
    fn default() -> Self {
        Self::new("", 32.0, 32.0)
    }
}

/// Which drawing routine family handles an entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawBackend {
    /// 2-D immediate-mode canvas.
    #[default]
    Canvas,
    /// Vector markup.
    Svg,
    /// 3-D scene graph.
    Scene3d,
}

/// Draw ordering and dispatch data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Drawable {
    /// Backend family.
    pub backend: DrawBackend,
    /// Routine the renderer dispatches on; falls back to the entity name.
    pub tag: Option<String>,
    /// Lower values draw first.
    pub z_index: i32,
    /// Whether to draw.
    pub visible: bool,
}

impl Drawable {
    /// Creates a visible canvas drawable at `z_index`.
    #[must_use]
    pub const fn new(z_index: i32) -> Self {
        Self {
            backend: DrawBackend::Canvas,
            tag: None,
            z_index,
            visible: true,
        }
    }

    /// Returns a copy on another backend.
    #[must_use]
    pub fn with_backend(mut self, backend: DrawBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Returns a copy with an explicit dispatch tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Visible again.
    pub fn reset(&mut self) {
        self.visible = true;
    }
}

impl Default for Drawable {
    fn default() -> Self {
        Self::new(0)
    }
}
