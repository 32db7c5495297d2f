use glam::Vec3;

/// Easing curves used by view transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Quadratic ease-in-out
    Power2InOut,
    /// Cubic ease-in-out
    #[default]
    Power3InOut,
}

impl Easing {
    /// Map normalized time to eased progress. Input is clamped to [0, 1].
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Power2InOut => in_out(t, 2),
            Easing::Power3InOut => in_out(t, 3),
        }
    }
}

fn in_out(t: f32, power: i32) -> f32 {
    if t < 0.5 {
        2f32.powi(power - 1) * t.powi(power)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(power) / 2.0
    }
}

/// Time-based interpolation of a vector toward a fixed end value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: Vec3,
    to: Vec3,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl Tween {
    pub fn new(from: Vec3, to: Vec3, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
            easing,
        }
    }

    /// Advance by `dt` seconds and return the new value.
    /// Returns exactly `to` once the duration has elapsed.
    pub fn advance(&mut self, dt: f32) -> Vec3 {
        self.elapsed += dt.max(0.0);
        self.value()
    }

    pub fn value(&self) -> Vec3 {
        if self.is_finished() {
            return self.to;
        }
        if self.elapsed <= 0.0 {
            return self.from;
        }
        let progress = self.easing.apply(self.elapsed / self.duration);
        self.from.lerp(self.to, progress)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn from(&self) -> Vec3 {
        self.from
    }

    pub fn to(&self) -> Vec3 {
        self.to
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Fraction of the duration elapsed, in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.is_finished() {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_out_midpoint() {
        assert!((in_out(0.5, 2) - 0.5).abs() < 1e-6);
        assert!((in_out(0.5, 3) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_in_out_quarter() {
        // 2 * 0.25^2 and 4 * 0.25^3
        assert!((in_out(0.25, 2) - 0.125).abs() < 1e-6);
        assert!((in_out(0.25, 3) - 0.0625).abs() < 1e-6);
    }
}
