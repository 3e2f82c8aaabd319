//! Drag-to-rotate with momentum and auto-leveling
//!
//! Angles are in degrees, velocities in degrees per second. Dragging sets
//! the angles directly and remembers the last swipe as momentum. Once the
//! button is released the model keeps spinning, slows down by a fixed
//! friction per frame, never quite stops, and tilts back to level.

use serde::{Serialize, Deserialize};

/// Tunable constants for the preview motion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionTuning {
    /// Degrees of rotation per pixel of drag
    pub sensitivity: f32,
    /// Velocity multiplier applied once per idle frame
    pub friction: f32,
    /// Below this speed the idle spin kicks back in
    pub momentum_floor: f32,
    /// Yaw speed restored when momentum dies out
    pub idle_spin: f32,
    /// Pitch change per idle frame while leveling
    pub level_step: f32,
    /// Pitch within this of zero snaps to level
    pub level_epsilon: f32,
    /// Yaw speed at startup
    pub initial_spin: f32,
}

impl Default for InteractionTuning {
    fn default() -> Self {
        Self {
            sensitivity: 0.1f32.to_degrees(),
            friction: 0.99,
            momentum_floor: 0.2f32.to_degrees(),
            idle_spin: 0.3f32.to_degrees(),
            level_step: 0.1f32.to_degrees(),
            level_epsilon: 0.1f32.to_degrees(),
            initial_spin: 0.3f32.to_degrees(),
        }
    }
}

/// Pointer interaction mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragMode {
    Idle,
    /// Button held; last pointer position seen
    Dragging { last: (f32, f32) },
}

/// Angular velocity in degrees per second
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AngularVelocity {
    pub yaw: f32,
    pub pitch: f32,
}

impl AngularVelocity {
    pub fn magnitude(&self) -> f32 {
        (self.yaw * self.yaw + self.pitch * self.pitch).sqrt()
    }
}

/// Current model orientation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationState {
    /// Always within (-180, 180]
    pub yaw: f32,
    /// Not wrapped
    pub pitch: f32,
    pub velocity: AngularVelocity,
    pub mode: DragMode,
}

impl OrientationState {
    pub fn yaw_radians(&self) -> f32 {
        self.yaw.to_radians()
    }

    pub fn pitch_radians(&self) -> f32 {
        self.pitch.to_radians()
    }
}

/// Wrap an angle into (-180, 180]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Owns the orientation and applies input and per-frame motion to it
#[derive(Debug, Clone)]
pub struct InteractionController {
    tuning: InteractionTuning,
    state: OrientationState,
}

impl InteractionController {
    pub fn new(tuning: InteractionTuning) -> Self {
        Self {
            tuning,
            state: OrientationState {
                yaw: 0.0,
                pitch: 0.0,
                velocity: AngularVelocity {
                    yaw: tuning.initial_spin,
                    pitch: 0.0,
                },
                mode: DragMode::Idle,
            },
        }
    }

    pub fn state(&self) -> &OrientationState {
        &self.state
    }

    /// Button down: start (or restart) a drag at the pointer position
    pub fn press(&mut self, x: f32, y: f32) {
        self.state.mode = DragMode::Dragging { last: (x, y) };
    }

    /// Button up: hand over to momentum
    pub fn release(&mut self) {
        self.state.mode = DragMode::Idle;
    }

    /// Pointer moved. Only has an effect while dragging.
    pub fn motion(&mut self, x: f32, y: f32) {
        let DragMode::Dragging { last } = self.state.mode else {
            return;
        };
        let k = self.tuning.sensitivity;
        let dx = x - last.0;
        let dy = y - last.1;

        self.state.yaw = wrap_degrees(self.state.yaw - dx * k);
        self.state.pitch += dy * k;
        self.state.velocity = AngularVelocity {
            yaw: -dx * k,
            pitch: dy * k,
        };
        self.state.mode = DragMode::Dragging { last: (x, y) };
    }

    /// Advance one frame of `dt` seconds
    pub fn update(&mut self, dt: f32) {
        let t = &self.tuning;
        let s = &mut self.state;

        if s.mode == DragMode::Idle {
            s.yaw += s.velocity.yaw * dt;
            s.pitch += s.velocity.pitch * dt;

            s.velocity.yaw *= t.friction;
            s.velocity.pitch *= t.friction;
            if s.velocity.magnitude() < t.momentum_floor {
                s.velocity.yaw = t.idle_spin;
            }

            // Leveling runs alongside the momentum, not after it
            if s.pitch.abs() > t.level_epsilon {
                s.pitch -= s.pitch.signum() * t.level_step;
            } else {
                s.pitch = 0.0;
            }
        }

        s.yaw = wrap_degrees(s.yaw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> InteractionController {
        InteractionController::new(InteractionTuning::default())
    }

    /// Half a degree per pixel keeps the drag arithmetic exact
    fn slow_drag() -> InteractionTuning {
        InteractionTuning {
            sensitivity: 0.5,
            ..InteractionTuning::default()
        }
    }

    #[test]
    fn test_default_tuning_in_degrees() {
        let t = InteractionTuning::default();
        assert!((t.sensitivity - 5.7296).abs() < 1e-3);
        assert!((t.level_step - 5.7296).abs() < 1e-3);
        assert!((t.level_epsilon - 5.7296).abs() < 1e-3);
        assert!((t.momentum_floor - 11.4592).abs() < 1e-3);
        assert!((t.idle_spin - 17.1887).abs() < 1e-3);
        assert_eq!(t.initial_spin, t.idle_spin);
        assert_eq!(t.friction, 0.99);
    }

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(180.0), 180.0);
        assert_eq!(wrap_degrees(-180.0), 180.0);
        assert_eq!(wrap_degrees(190.0), -170.0);
        assert_eq!(wrap_degrees(-190.0), 170.0);
        assert_eq!(wrap_degrees(720.0 + 45.0), 45.0);
    }

    #[test]
    fn test_press_and_release_switch_modes() {
        let mut c = controller();
        assert_eq!(c.state().mode, DragMode::Idle);
        c.press(10.0, 10.0);
        assert!(matches!(c.state().mode, DragMode::Dragging { .. }));
        // Pressing again while dragging stays in Dragging with a new anchor
        c.press(50.0, 50.0);
        assert_eq!(c.state().mode, DragMode::Dragging { last: (50.0, 50.0) });
        c.release();
        assert_eq!(c.state().mode, DragMode::Idle);
    }

    #[test]
    fn test_motion_without_drag_is_ignored() {
        let mut c = controller();
        let before = *c.state();
        c.motion(100.0, 100.0);
        assert_eq!(*c.state(), before);
    }

    #[test]
    fn test_drag_rotates_and_records_momentum() {
        let mut c = InteractionController::new(slow_drag());
        c.press(100.0, 100.0);
        c.motion(110.0, 96.0);
        let s = c.state();
        assert_eq!(s.yaw, -5.0);
        assert_eq!(s.pitch, -2.0);
        assert_eq!(s.velocity, AngularVelocity { yaw: -5.0, pitch: -2.0 });

        // Motion deltas are measured from the previous event
        c.motion(110.0, 100.0);
        assert_eq!(c.state().pitch, 0.0);
        assert_eq!(c.state().velocity.pitch, 2.0);
    }

    #[test]
    fn test_dragging_freezes_momentum() {
        let mut c = controller();
        c.press(0.0, 0.0);
        c.update(1.0);
        assert_eq!(c.state().yaw, 0.0);
        assert_eq!(c.state().velocity.yaw, InteractionTuning::default().initial_spin);
    }

    #[test]
    fn test_momentum_integrates_and_decays() {
        let tuning = InteractionTuning {
            friction: 0.5,
            momentum_floor: 1.0,
            level_step: 0.0,
            level_epsilon: 1000.0,
            ..slow_drag()
        };
        let mut c = InteractionController::new(tuning);
        c.press(0.0, 0.0);
        c.motion(-100.0, 0.0);
        c.release();
        let yaw0 = c.state().yaw;
        let v0 = c.state().velocity.yaw;
        assert_eq!(v0, 50.0);

        c.update(0.1);
        assert!((c.state().yaw - wrap_degrees(yaw0 + 5.0)).abs() < 1e-4);
        assert_eq!(c.state().velocity.yaw, 25.0);
    }

    #[test]
    fn test_spin_never_stops() {
        let mut c = controller();
        let tuning = InteractionTuning::default();
        for _ in 0..5000 {
            c.update(1.0 / 60.0);
        }
        assert!(c.state().velocity.magnitude() >= tuning.momentum_floor * tuning.friction);
        assert!(c.state().velocity.yaw > 0.0);
    }

    #[test]
    fn test_pitch_levels_while_spinning() {
        let mut c = InteractionController::new(slow_drag());
        c.press(0.0, 0.0);
        c.motion(0.0, 40.0);
        c.release();
        assert_eq!(c.state().pitch, 20.0);

        let mut frames = 0;
        while c.state().pitch != 0.0 && frames < 1000 {
            c.update(1.0 / 60.0);
            frames += 1;
        }
        assert_eq!(c.state().pitch, 0.0);
        // Leveled long before the swipe momentum decays to the floor
        assert!(frames < 30);
        assert!(c.state().velocity.pitch > InteractionTuning::default().momentum_floor);
    }

    #[test]
    fn test_yaw_always_wrapped() {
        let mut c = controller();
        let mut x = 0.0;
        for i in 0..2000 {
            if i % 50 == 0 {
                c.press(x, 0.0);
            }
            x += if i % 3 == 0 { 137.0 } else { -41.0 };
            c.motion(x, (i % 7) as f32);
            if i % 50 == 25 {
                c.release();
            }
            c.update(1.0 / 60.0);
            let yaw = c.state().yaw;
            assert!(yaw > -180.0 && yaw <= 180.0, "yaw {} out of range", yaw);
        }
    }
}
