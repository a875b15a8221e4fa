//! Input handling
//!
//! One `InputState` lives for the whole process. The host attaches it when it
//! starts forwarding key events, feeds it presses and releases as they arrive,
//! and the simulation copies an `InputSnapshot` out of it at the start of each
//! tick.

use serde::{Deserialize, Serialize};

/// Logical flight controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    TurnLeft,
    TurnRight,
    ThrustForward,
    ThrustBackward,
    Ascend,
    Descend,
}

impl Control {
    pub const ALL: [Control; 6] = [
        Control::TurnLeft,
        Control::TurnRight,
        Control::ThrustForward,
        Control::ThrustBackward,
        Control::Ascend,
        Control::Descend,
    ];

    #[inline]
    fn bit(self) -> u8 {
        1 << self as u8
    }

    /// Map a host key name to a control (arrows, WASD, Space/Shift, E/Q)
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => return Some(Control::TurnLeft),
            "ArrowRight" => return Some(Control::TurnRight),
            "ArrowUp" => return Some(Control::ThrustForward),
            "ArrowDown" => return Some(Control::ThrustBackward),
            " " | "Space" => return Some(Control::Ascend),
            "Shift" | "ShiftLeft" | "ShiftRight" => return Some(Control::Descend),
            _ => {}
        }
        match key.to_ascii_lowercase().as_str() {
            "a" => Some(Control::TurnLeft),
            "d" => Some(Control::TurnRight),
            "w" => Some(Control::ThrustForward),
            "s" => Some(Control::ThrustBackward),
            "e" => Some(Control::Ascend),
            "q" => Some(Control::Descend),
            _ => None,
        }
    }
}

/// Controls held at the start of a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    bits: u8,
}

impl InputSnapshot {
    /// Snapshot with the given controls held
    pub fn with(controls: &[Control]) -> Self {
        let mut snapshot = Self::default();
        for &control in controls {
            snapshot.bits |= control.bit();
        }
        snapshot
    }

    /// Rebuild from a packed mask (bit n = `Control::ALL[n]`), e.g. from a replay tape
    pub fn from_bits(bits: u8) -> Self {
        Self {
            bits: bits & ((1 << Control::ALL.len()) - 1),
        }
    }

    pub fn bits(&self) -> u8 {
        self.bits
    }

    #[inline]
    pub fn is_pressed(&self, control: Control) -> bool {
        self.bits & control.bit() != 0
    }

    pub fn is_idle(&self) -> bool {
        self.bits == 0
    }

    /// -1 (right), 0, or +1 (left); opposing turns cancel
    pub fn turn_axis(&self) -> f32 {
        axis(
            self.is_pressed(Control::TurnLeft),
            self.is_pressed(Control::TurnRight),
        )
    }

    /// -1 (descend), 0, or +1 (ascend)
    pub fn vertical_axis(&self) -> f32 {
        axis(
            self.is_pressed(Control::Ascend),
            self.is_pressed(Control::Descend),
        )
    }
}

fn axis(positive: bool, negative: bool) -> f32 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

/// Process-wide pressed-control set with an explicit attach/detach lifecycle
#[derive(Debug, Default)]
pub struct InputState {
    held: InputSnapshot,
    attached: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start accepting key events
    pub fn attach(&mut self) {
        if !self.attached {
            log::info!("Input attached");
        }
        self.attached = true;
    }

    /// Stop accepting key events and release everything
    pub fn detach(&mut self) {
        if self.attached {
            log::info!("Input detached");
        }
        self.attached = false;
        self.held = InputSnapshot::default();
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn press(&mut self, control: Control) {
        if self.attached {
            self.held.bits |= control.bit();
        }
    }

    pub fn release(&mut self, control: Control) {
        if self.attached {
            self.held.bits &= !control.bit();
        }
    }

    /// Host key-down event; returns whether the key maps to a control
    pub fn key_down(&mut self, key: &str) -> bool {
        match Control::from_key(key) {
            Some(control) => {
                self.press(control);
                true
            }
            None => false,
        }
    }

    /// Host key-up event; returns whether the key maps to a control
    pub fn key_up(&mut self, key: &str) -> bool {
        match Control::from_key(key) {
            Some(control) => {
                self.release(control);
                true
            }
            None => false,
        }
    }

    /// Release everything (e.g. on window blur) without detaching
    pub fn release_all(&mut self) {
        self.held = InputSnapshot::default();
    }

    /// Stable copy for one tick
    pub fn snapshot(&self) -> InputSnapshot {
        self.held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Control::from_key("ArrowUp"), Some(Control::ThrustForward));
        assert_eq!(Control::from_key("W"), Some(Control::ThrustForward));
        assert_eq!(Control::from_key("a"), Some(Control::TurnLeft));
        assert_eq!(Control::from_key(" "), Some(Control::Ascend));
        assert_eq!(Control::from_key("ShiftLeft"), Some(Control::Descend));
        assert_eq!(Control::from_key("Escape"), None);
    }

    #[test]
    fn test_events_ignored_until_attached() {
        let mut input = InputState::new();
        input.key_down("w");
        assert!(input.snapshot().is_idle());

        input.attach();
        input.key_down("w");
        assert!(input.snapshot().is_pressed(Control::ThrustForward));
    }

    #[test]
    fn test_detach_releases_everything() {
        let mut input = InputState::new();
        input.attach();
        input.press(Control::TurnLeft);
        input.press(Control::Ascend);
        input.detach();
        assert!(input.snapshot().is_idle());
        input.press(Control::TurnLeft);
        assert!(input.snapshot().is_idle());
    }

    #[test]
    fn test_snapshot_is_stable_copy() {
        let mut input = InputState::new();
        input.attach();
        input.key_down("ArrowLeft");
        let snapshot = input.snapshot();
        input.key_up("ArrowLeft");
        assert!(snapshot.is_pressed(Control::TurnLeft));
        assert!(!input.snapshot().is_pressed(Control::TurnLeft));
    }

    #[test]
    fn test_axes_cancel() {
        let both = InputSnapshot::with(&[Control::TurnLeft, Control::TurnRight]);
        assert_eq!(both.turn_axis(), 0.0);
        let left = InputSnapshot::with(&[Control::TurnLeft]);
        assert_eq!(left.turn_axis(), 1.0);
        let down = InputSnapshot::with(&[Control::Descend]);
        assert_eq!(down.vertical_axis(), -1.0);
        assert_eq!(Control::ALL.len(), 6);
    }

    #[test]
    fn test_bits_match_control_order() {
        let snapshot = InputSnapshot::from_bits(0b1111_0101);
        assert!(snapshot.is_pressed(Control::TurnLeft));
        assert!(!snapshot.is_pressed(Control::TurnRight));
        assert!(snapshot.is_pressed(Control::ThrustForward));
        assert_eq!(snapshot.bits(), 0b11_0101);
        assert_eq!(InputSnapshot::with(&Control::ALL).bits(), 0b11_1111);
    }
}
