//! Thread affinity for windowing and GL calls
//!
//! GLFW and OpenGL must be driven from the thread that created the window.
//! Calling from any other thread is a programming error and fails fast.

use std::thread::{self, ThreadId};

/// Records the owning thread and checks later calls against it
#[derive(Debug, Clone, Copy)]
pub struct ThreadAffinity {
    owner: ThreadId,
}

impl ThreadAffinity {
    /// Bind to the calling thread
    pub fn current() -> Self {
        Self {
            owner: thread::current().id(),
        }
    }

    /// Whether the calling thread is the owner
    pub fn is_owner(&self) -> bool {
        thread::current().id() == self.owner
    }

    /// Panic unless called from the owning thread
    ///
    /// # Panics
    /// When `operation` is invoked from a thread other than the one that
    /// created this affinity.
    #[track_caller]
    pub fn ensure(&self, operation: &str) {
        if !self.is_owner() {
            let current = thread::current();
            panic!(
                "{operation} can only be called on the window thread ({:?}), called from {:?} ({})",
                self.owner,
                current.id(),
                current.name().unwrap_or("unnamed"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_thread_passes() {
        let affinity = ThreadAffinity::current();
        assert!(affinity.is_owner());
        affinity.ensure("poll_events");
    }

    #[test]
    fn test_other_thread_fails_fast() {
        let affinity = ThreadAffinity::current();
        let result = thread::spawn(move || affinity.ensure("swap_buffers")).join();
        assert!(result.is_err());
    }
}
