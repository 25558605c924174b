use glam::Vec3;

/// Cubic Bezier curve through control points `a`..`d`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
    pub d: Vec3,
}

impl Default for CubicBezier {
    fn default() -> Self {
        Self {
            a: Vec3::new(1.0, 0.0, 1.0),
            b: Vec3::new(1.0, 3.0, 0.0),
            c: Vec3::new(-1.0, -2.0, 0.0),
            d: Vec3::new(-1.0, 1.0, -1.0),
        }
    }
}

impl CubicBezier {
    /// Point at parameter `t`, clamped to `[0, 1]`.
    pub fn point(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        let s = 1.0 - t;
        self.a * (s * s * s)
            + self.b * (3.0 * s * s * t)
            + self.c * (3.0 * s * t * t)
            + self.d * (t * t * t)
    }

    /// `samples` evenly spaced points from `a` to `d` inclusive (at least 2).
    pub fn sample(&self, samples: usize) -> Vec<Vec3> {
        let samples = samples.max(2);
        let last = (samples - 1) as f32;
        (0..samples).map(|i| self.point(i as f32 / last)).collect()
    }

    pub fn control_points(&self) -> [Vec3; 4] {
        [self.a, self.b, self.c, self.d]
    }

    pub fn control_points_mut(&mut self) -> [&mut Vec3; 4] {
        [&mut self.a, &mut self.b, &mut self.c, &mut self.d]
    }
}

/// Curve parameter that sweeps 0 -> 1 -> 0 repeatedly.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PingPong {
    // In [0, 2): [0, 1] is the outbound leg, (1, 2) the return leg.
    phase: f32,
}

impl PingPong {
    pub fn t(&self) -> f32 {
        if self.phase <= 1.0 {
            self.phase
        } else {
            2.0 - self.phase
        }
    }

    /// Jump to `t` on the outbound leg.
    pub fn set_t(&mut self, t: f32) {
        self.phase = t.clamp(0.0, 1.0);
    }

    pub fn advance(&mut self, delta: f32) {
        if delta.is_finite() {
            self.phase = (self.phase + delta).rem_euclid(2.0);
        }
    }

    pub fn is_returning(&self) -> bool {
        self.phase > 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_first_and_last_control_points() {
        let curve = CubicBezier::default();
        assert_eq!(curve.point(0.0), curve.a);
        assert!(curve.point(1.0).distance(curve.d) < 1e-6);
    }

    #[test]
    fn point_clamps_parameter() {
        let curve = CubicBezier::default();
        assert_eq!(curve.point(-3.0), curve.point(0.0));
        assert_eq!(curve.point(7.0), curve.point(1.0));
    }

    #[test]
    fn straight_line_midpoint() {
        let curve = CubicBezier {
            a: Vec3::ZERO,
            b: Vec3::new(1.0, 0.0, 0.0),
            c: Vec3::new(2.0, 0.0, 0.0),
            d: Vec3::new(3.0, 0.0, 0.0),
        };
        assert!(curve.point(0.5).distance(Vec3::new(1.5, 0.0, 0.0)) < 1e-6);
    }

    #[test]
    fn sample_includes_endpoints() {
        let curve = CubicBezier::default();
        let pts = curve.sample(50);
        assert_eq!(pts.len(), 50);
        assert_eq!(pts[0], curve.a);
        assert!(pts[49].distance(curve.d) < 1e-6);
        assert_eq!(curve.sample(0).len(), 2);
    }

    #[test]
    fn ping_pong_reflects_at_ends() {
        let mut p = PingPong::default();
        p.advance(0.75);
        assert!((p.t() - 0.75).abs() < 1e-6);
        p.advance(0.5);
        assert!(p.is_returning());
        assert!((p.t() - 0.75).abs() < 1e-6);
        p.advance(0.75);
        assert!(p.t().abs() < 1e-6);
        assert!(!p.is_returning());
    }

    #[test]
    fn ping_pong_large_steps_stay_in_range() {
        let mut p = PingPong::default();
        for _ in 0..100 {
            p.advance(0.37);
            assert!((0.0..=1.0).contains(&p.t()));
        }
        p.advance(f32::NAN);
        assert!((0.0..=1.0).contains(&p.t()));
    }

    #[test]
    fn set_t_restarts_outbound() {
        let mut p = PingPong::default();
        p.advance(1.5);
        p.set_t(0.25);
        assert!(!p.is_returning());
        assert_eq!(p.t(), 0.25);
    }
}
