use bevy::math::Vec3;

/// One cubic Bezier curve of the track.
///
/// Keeps a cumulative arc-length table so that a fraction of the segment's
/// length can be mapped back to the curve parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicBezierSegment {
    points: [Vec3; 4],
    arc_lengths: Vec<f32>,
}

impl CubicBezierSegment {
    pub fn new(start: Vec3, control_1: Vec3, control_2: Vec3, end: Vec3, divisions: usize) -> Self {
        let points = [start, control_1, control_2, end];
        let divisions = divisions.max(1);

        let mut arc_lengths = Vec::with_capacity(divisions + 1);
        arc_lengths.push(0.0);
        let mut previous = start;
        let mut total = 0.0;
        for step in 1..=divisions {
            let point = evaluate(&points, step as f32 / divisions as f32);
            total += point.distance(previous);
            arc_lengths.push(total);
            previous = point;
        }

        Self { points, arc_lengths }
    }

    pub fn start(&self) -> Vec3 {
        self.points[0]
    }

    pub fn end(&self) -> Vec3 {
        self.points[3]
    }

    /// Sampled arc length of the segment.
    pub fn length(&self) -> f32 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    /// Point on the curve at Bezier parameter `t` in [0, 1].
    pub fn evaluate(&self, t: f32) -> Vec3 {
        evaluate(&self.points, t)
    }

    /// First derivative at Bezier parameter `t`.
    pub fn derivative(&self, t: f32) -> Vec3 {
        let [p0, p1, p2, p3] = self.points;
        let s = 1.0 - t;
        3.0 * s * s * (p1 - p0) + 6.0 * s * t * (p2 - p1) + 3.0 * t * t * (p3 - p2)
    }

    /// Unit tangent at Bezier parameter `t`.
    ///
    /// Falls back to the chord direction where the derivative vanishes
    /// (coincident control points).
    pub fn tangent(&self, t: f32) -> Vec3 {
        let derivative = self.derivative(t);
        if derivative.length_squared() > f32::EPSILON {
            return derivative.normalize();
        }
        (self.end() - self.start()).normalize_or_zero()
    }

    /// Map a fraction `u` of the segment's arc length to the Bezier parameter.
    pub fn parameter_at(&self, u: f32) -> f32 {
        let length = self.length();
        if length <= f32::EPSILON {
            return u.clamp(0.0, 1.0);
        }

        let target = u.clamp(0.0, 1.0) * length;
        let last = self.arc_lengths.len() - 1;

        // Index of the last table entry not past the target.
        let index = self
            .arc_lengths
            .partition_point(|&length| length <= target)
            .saturating_sub(1);

        if index >= last {
            return 1.0;
        }

        let before = self.arc_lengths[index];
        let after = self.arc_lengths[index + 1];
        let span = after - before;
        let fraction = if span > 0.0 { (target - before) / span } else { 0.0 };

        (index as f32 + fraction) / last as f32
    }
}

fn evaluate(points: &[Vec3; 4], t: f32) -> Vec3 {
    let [p0, p1, p2, p3] = *points;
    let s = 1.0 - t;
    s * s * s * p0 + 3.0 * s * s * t * p1 + 3.0 * s * t * t * p2 + t * t * t * p3
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn straight(from: Vec3, to: Vec3) -> CubicBezierSegment {
        CubicBezierSegment::new(
            from,
            from.lerp(to, 1.0 / 3.0),
            from.lerp(to, 2.0 / 3.0),
            to,
            200,
        )
    }

    #[test]
    fn endpoints_are_interpolated() {
        let segment = CubicBezierSegment::new(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(10.0, 0.0, 10.0),
            Vec3::new(10.0, 0.0, 0.0),
            200,
        );
        assert!(segment.evaluate(0.0).distance(Vec3::ZERO) < EPSILON);
        assert!(segment.evaluate(1.0).distance(Vec3::new(10.0, 0.0, 0.0)) < EPSILON);
    }

    #[test]
    fn straight_segment_length_is_exact() {
        let segment = straight(Vec3::ZERO, Vec3::new(30.0, 0.0, 40.0));
        assert!((segment.length() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn uniform_segment_maps_fraction_to_same_parameter() {
        let segment = straight(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0));
        for u in [0.0, 0.1, 0.25, 0.5, 0.9, 1.0] {
            assert!((segment.parameter_at(u) - u).abs() < 1e-3, "u = {u}");
        }
    }

    #[test]
    fn tangent_is_unit_and_follows_the_curve() {
        let segment = straight(Vec3::ZERO, Vec3::new(0.0, 0.0, -20.0));
        let tangent = segment.tangent(0.5);
        assert!((tangent.length() - 1.0).abs() < EPSILON);
        assert!(tangent.distance(Vec3::NEG_Z) < EPSILON);
    }

    #[test]
    fn coincident_control_points_fall_back_to_chord() {
        let start = Vec3::ZERO;
        let end = Vec3::new(5.0, 0.0, 0.0);
        let segment = CubicBezierSegment::new(start, start, end, end, 50);
        assert!(segment.tangent(0.0).distance(Vec3::X) < EPSILON);
        assert!(segment.tangent(1.0).distance(Vec3::X) < EPSILON);
    }
}
