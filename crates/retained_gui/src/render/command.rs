//! # Render Queue
//!
//! Draw commands collected during a frame and flushed in submission order
//! when the frame finishes.
//!
//! ## Ordering
//!
//! Later commands paint over earlier ones, so the queue never reorders.
//! Rectangles are stored already resolved to absolute normalized
//! coordinates and already culled.

use super::{Color, Rect};
use crate::texture::Texture;

/// Single resolved drawing instruction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderCommand {
    /// Draw a texture stretched over `rect`
    DrawTexture {
        /// Texture to draw
        texture: Texture,
        /// Absolute target rectangle
        rect: Rect,
    },
    /// Fill `rect` with a solid color
    Fill {
        /// Fill color
        color: Color,
        /// Absolute target rectangle
        rect: Rect,
    },
    /// Clear the whole viewport
    Clear {
        /// Clear color
        color: Color,
    },
}

/// Commands of the current frame, in submission order
#[derive(Debug, Default)]
pub struct RenderQueue {
    commands: Vec<RenderCommand>,
}

impl RenderQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a queue with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
        }
    }

    /// Append a command
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Take every queued command, leaving the allocation in place
    pub fn drain(&mut self) -> std::vec::Drain<'_, RenderCommand> {
        self.commands.drain(..)
    }

    /// Number of queued commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Discard every queued command
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_queue_creation() {
        let queue = RenderQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_drain_preserves_order() {
        let mut queue = RenderQueue::with_capacity(4);
        let first = RenderCommand::Fill { color: Color::BLACK, rect: Rect::UNIT };
        let second = RenderCommand::Clear { color: Color::WHITE };
        queue.push(first);
        queue.push(second);
        assert_eq!(queue.len(), 2);

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(drained, vec![first, second]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut queue = RenderQueue::new();
        queue.push(RenderCommand::Clear { color: Color::BLACK });
        queue.clear();
        assert!(queue.is_empty());
    }
}
