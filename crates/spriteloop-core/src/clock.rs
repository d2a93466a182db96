//! Tick-driven frame advancement.

use crate::resource::SpriteResource;

/// The looping animation state machine.
///
/// The clock holds a frame index and a tick accumulator and advances on an
/// externally delivered tick: once the accumulator reaches the frame delay,
/// the frame index steps forward (wrapping silently at the end) and the
/// accumulator resets. A frame is therefore displayed for exactly
/// `frame_delay + 1` ticks; a delay of 0 advances on every tick.
///
/// The clock only references the sprite it was built from at construction
/// time, so it must be discarded or rebuilt when the sprite changes.
#[derive(Debug, Clone)]
pub struct AnimationClock {
    frame_count: u32,
    frame_delay: u32,
    current_frame: u32,
    tick_accumulator: u32,
}

impl AnimationClock {
    /// Create a clock over `frame_count` frames with the given delay.
    /// A frame count of 0 is treated as 1.
    pub fn new(frame_count: u32, frame_delay: u32) -> Self {
        Self {
            frame_count: frame_count.max(1),
            frame_delay,
            current_frame: 0,
            tick_accumulator: 0,
        }
    }

    /// Create a clock matching a sprite's frame count and delay.
    pub fn for_sprite(sprite: &SpriteResource) -> Self {
        Self::new(sprite.frame_count(), sprite.frame_delay())
    }

    /// Deliver one tick. Returns true when the frame index advanced.
    pub fn tick(&mut self) -> bool {
        if self.tick_accumulator >= self.frame_delay {
            self.current_frame = (self.current_frame + 1) % self.frame_count;
            self.tick_accumulator = 0;
            true
        } else {
            self.tick_accumulator += 1;
            false
        }
    }

    /// The frame index to display, in `[0, frame_count)`.
    pub fn current_frame(&self) -> u32 {
        self.current_frame
    }

    /// Rewind to frame 0 with an empty accumulator.
    pub fn reset(&mut self) {
        self.current_frame = 0;
        self.tick_accumulator = 0;
    }
}
