//! Clip playback state.
//!
//! Clip selection lives in the animation system; this component only knows
//! how to switch clips and step frames.

use serde::{Deserialize, Serialize};

/// Clip playback state of an entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Animation {
    /// Active clip name.
    pub clip: String,
    /// Frames advanced per step.
    pub speed: f32,
    /// Fractional frame position.
    pub current_frame: f32,
    /// Frames in the active clip.
    pub total_frames: u32,
    /// Wraps instead of stopping at the end.
    pub looping: bool,
    /// Only playing animations advance.
    pub playing: bool,
    /// `1.0` forward, `-1.0` backward.
    pub direction: f32,
    /// Emit a completion event when a non-looping clip ends.
    pub notify_on_complete: bool,
}

impl Animation {
    /// Creates a looping, playing animation on `clip`.
    #[must_use]
    pub fn new(clip: impl Into<String>, total_frames: u32) -> Self {
        Self {
            clip: clip.into(),
            speed: 1.0,
            current_frame: 0.0,
            total_frames,
            looping: true,
            playing: true,
            direction: 1.0,
            notify_on_complete: false,
        }
    }

    /// Returns a copy that reports clip completion.
    #[must_use]
    pub fn notifying(mut self) -> Self {
        self.notify_on_complete = true;
        self
    }

    /// Switches to `clip` from frame 0, playing forward.
    ///
    /// Returns `false` without touching anything if `clip` is already active.
    pub fn play(&mut self, clip: &str, looping: bool, speed: f32) -> bool {
        if self.clip == clip {
            return false;
        }

        self.clip.clear();
        self.clip.push_str(clip);
        self.looping = looping;
        self.speed = speed;
        self.current_frame = 0.0;
        self.direction = 1.0;
        self.playing = true;
        true
    }

    /// Stops frame advance.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Continues frame advance.
    pub fn resume(&mut self) {
        self.playing = true;
    }

    /// Frame 0, playing.
    pub fn reset(&mut self) {
        self.current_frame = 0.0;
        self.playing = true;
    }

    /// Integer frame to draw.
    #[must_use]
    pub fn frame_index(&self) -> u32 {
        self.current_frame.max(0.0) as u32
    }

    /// Steps one frame in the current direction.
    ///
    /// Returns `true` when a non-looping clip just finished. Paused
    /// animations don't move.
    pub fn advance_frame(&mut self) -> bool {
        if !self.playing {
            return false;
        }

        let last = self.total_frames.saturating_sub(1) as f32;
        self.current_frame += self.speed * self.direction;

        if self.current_frame >= self.total_frames as f32 {
            if self.looping {
                self.current_frame = 0.0;
                return false;
            }
            self.current_frame = last;
            self.playing = false;
            return true;
        }

        if self.current_frame < 0.0 {
            if self.looping {
                self.current_frame = last;
                return false;
            }
            self.current_frame = 0.0;
            self.playing = false;
            return true;
        }

        false
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::new("idle", 1)
    }
}
