//! Interception hooks around event delivery

use super::InputState;
use crate::keycode::KeyCode;

/// Optional hooks run before and after each delivery
///
/// A `pre_*` hook returning `true` suppresses delivery to the component and
/// the matching `post_*` hook. Every default delivers and never suppresses.
///
/// Key and click hooks see the live [`InputState`]. A pressed key is already
/// down in both press hooks, a released key is still down in both release
/// hooks, and a released button is already up when the click hooks run.
pub trait WindowListener {
    /// Before `key_pressed`
    fn pre_key_pressed(&mut self, _key: KeyCode, _input: &InputState) -> bool {
        false
    }

    /// After `key_pressed`
    fn post_key_pressed(&mut self, _key: KeyCode, _input: &InputState) {}

    /// Before `key_released`
    fn pre_key_released(&mut self, _key: KeyCode, _input: &InputState) -> bool {
        false
    }

    /// After `key_released`
    fn post_key_released(&mut self, _key: KeyCode, _input: &InputState) {}

    /// Before `char_typed`
    fn pre_char_typed(&mut self, _ch: char) -> bool {
        false
    }

    /// After `char_typed`
    fn post_char_typed(&mut self, _ch: char) {}

    /// Before `click`
    fn pre_click(&mut self, _x: f32, _y: f32, _button: u8, _input: &InputState) -> bool {
        false
    }

    /// After `click`
    fn post_click(&mut self, _x: f32, _y: f32, _button: u8, _input: &InputState) {}

    /// Replace a scaled scroll amount; `0.0` suppresses it
    fn pre_scroll(&mut self, amount: f32) -> f32 {
        amount
    }

    /// After `scroll`
    fn post_scroll(&mut self, _amount: f32) {}

    /// Start of a run-loop iteration; `true` skips the iteration's work
    fn pre_run_loop(&mut self) -> bool {
        false
    }

    /// End of a run-loop iteration that was not skipped
    fn post_run_loop(&mut self) {}
}
