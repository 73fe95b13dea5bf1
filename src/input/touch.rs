// Touch finger events and their double buffer

use super::buffer::{try_push, MIN_TOUCH_CAPACITY};
use glam::Vec2;
use std::collections::TryReserveError;

/// Phase of a touch finger event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Down,
    Motion,
    Up,
    Cancelled,
}

/// A single touch finger event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchFinger {
    /// Identifier of the finger, stable while it stays on the surface
    pub finger_id: u64,
    pub phase: TouchPhase,
    /// Position in window coordinates
    pub position: Vec2,
    /// Pressure in 0..=1, 1 when the device cannot measure it
    pub pressure: f32,
}

impl TouchFinger {
    /// Create a touch event with full pressure
    pub fn new(finger_id: u64, phase: TouchPhase, position: Vec2) -> Self {
        Self {
            finger_id,
            phase,
            position,
            pressure: 1.0,
        }
    }
}

/// Double buffer of touch events.
///
/// Events arriving between two frame-advances are collected into the
/// `previous` buffer; `swap` then turns them into `current` and hands the
/// old current buffer back for collecting, so no allocation happens per frame.
#[derive(Debug, Default)]
pub(crate) struct TouchBuffers {
    current: Vec<TouchFinger>,
    previous: Vec<TouchFinger>,
    /// Events collected since the last swap
    collected: usize,
}

impl TouchBuffers {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Collect an event for the frame being polled
    pub(crate) fn push(&mut self, event: TouchFinger) -> Result<(), TryReserveError> {
        if self.collected == 0 {
            // Still holds the frame before current; it is reused from here on.
            self.previous.clear();
        }

        try_push(&mut self.previous, event, MIN_TOUCH_CAPACITY)?;
        self.collected += 1;
        Ok(())
    }

    /// Promote the collected events to current
    pub(crate) fn swap(&mut self) {
        self.previous.truncate(self.collected);
        std::mem::swap(&mut self.current, &mut self.previous);
        self.collected = 0;
    }

    pub(crate) fn current(&self) -> &[TouchFinger] {
        &self.current
    }

    pub(crate) fn previous(&self) -> &[TouchFinger] {
        &self.previous
    }

    #[cfg(test)]
    pub(crate) fn capacities(&self) -> (usize, usize) {
        (self.current.capacity(), self.previous.capacity())
    }
}
