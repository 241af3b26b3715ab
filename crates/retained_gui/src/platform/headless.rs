//! Scripted window for tests and display-less runs

use std::collections::VecDeque;

use super::{WindowBackend, WindowMetrics};
use crate::input::InputEvent;

/// Window that hands out pre-recorded event batches, one per poll
#[derive(Debug, Default)]
pub struct HeadlessWindow {
    script: VecDeque<Vec<InputEvent>>,
    metrics: WindowMetrics,
    should_close: bool,
    close_when_drained: bool,
    polls: usize,
    swaps: usize,
}

impl HeadlessWindow {
    /// Window with a client area of `width` x `height` pixels
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            metrics: WindowMetrics {
                inner_width: width,
                inner_height: height,
                ..WindowMetrics::default()
            },
            ..Self::default()
        }
    }

    /// Queue the events returned by a future poll
    #[must_use]
    pub fn with_batch(mut self, events: Vec<InputEvent>) -> Self {
        self.script.push_back(events);
        self
    }

    /// Request close once every scripted batch has been polled
    #[must_use]
    pub const fn close_when_drained(mut self) -> Self {
        self.close_when_drained = true;
        self
    }

    /// Number of polls so far
    pub const fn polls(&self) -> usize {
        self.polls
    }

    /// Number of presented frames
    pub const fn swaps(&self) -> usize {
        self.swaps
    }
}

impl WindowBackend for HeadlessWindow {
    fn should_close(&self) -> bool {
        self.should_close
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.should_close = should_close;
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.polls += 1;
        let batch = self.script.pop_front().unwrap_or_default();
        for event in &batch {
            match *event {
                InputEvent::Resized { width, height } => self.metrics.apply_resize(width, height),
                InputEvent::Moved { x, y } => self.metrics.apply_move(x, y),
                InputEvent::CloseRequested => self.should_close = true,
                _ => {}
            }
        }
        if self.close_when_drained && self.script.is_empty() {
            self.should_close = true;
        }
        batch
    }

    fn metrics(&self) -> WindowMetrics {
        self.metrics
    }

    fn swap_buffers(&mut self) {
        self.swaps += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batches_replay_in_order() {
        let mut window = HeadlessWindow::new(320, 240)
            .with_batch(vec![InputEvent::Resized { width: 100, height: 50 }])
            .with_batch(vec![InputEvent::CursorLeave, InputEvent::CloseRequested]);

        assert_eq!(window.poll_events(), vec![InputEvent::Resized { width: 100, height: 50 }]);
        assert_eq!(window.metrics().inner_width, 100);
        assert!(!window.should_close());

        assert_eq!(window.poll_events().len(), 2);
        assert!(window.should_close());
        assert!(window.poll_events().is_empty());
        assert_eq!(window.polls(), 3);
    }
}
