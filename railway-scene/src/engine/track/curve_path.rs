use bevy::prelude::*;
use constants::track::ARC_LENGTH_DIVISIONS;

use super::bezier::CubicBezierSegment;
use super::error::TrackError;

/// Gap tolerated between consecutive segment ends before a warning is logged.
const CONTINUITY_TOLERANCE: f32 = 1e-3;

/// Closed loop of cubic Bezier segments, queried by distance travelled.
///
/// Built once at startup; the total arc length is sampled at construction and
/// never changes afterwards.
#[derive(Resource, Debug, Clone)]
pub struct CurvePath {
    segments: Vec<CubicBezierSegment>,
    /// Arc length at the end of each segment.
    cumulative_lengths: Vec<f32>,
    length: f32,
}

/// Point and unit tangent at a distance along the path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    pub distance: f32,
    pub point: Vec3,
    pub tangent: Vec3,
}

impl CurvePath {
    /// Build a path from groups of 4 control points (start, control 1, control 2, end).
    pub fn from_control_points(points: &[Vec3]) -> Result<Self, TrackError> {
        Self::with_divisions(points, ARC_LENGTH_DIVISIONS)
    }

    /// Same as [`CurvePath::from_control_points`] with an explicit arc-length table size.
    pub fn with_divisions(points: &[Vec3], divisions: usize) -> Result<Self, TrackError> {
        if points.is_empty() || points.len() % 4 != 0 {
            return Err(TrackError::InvalidSegmentCount {
                points: points.len(),
            });
        }

        let segments: Vec<CubicBezierSegment> = points
            .chunks_exact(4)
            .map(|chunk| CubicBezierSegment::new(chunk[0], chunk[1], chunk[2], chunk[3], divisions))
            .collect();

        warn_on_gaps(&segments);

        let mut cumulative_lengths = Vec::with_capacity(segments.len());
        let mut length = 0.0;
        for segment in &segments {
            length += segment.length();
            cumulative_lengths.push(length);
        }

        Ok(Self {
            segments,
            cumulative_lengths,
            length,
        })
    }

    /// Total sampled arc length.
    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn segments(&self) -> &[CubicBezierSegment] {
        &self.segments
    }

    pub fn segment(&self, index: usize) -> Option<&CubicBezierSegment> {
        self.segments.get(index)
    }

    /// Wrap a distance into the normalised parameter range [0, 1).
    ///
    /// Uses floored division so negative distances wrap to the positive remainder.
    pub fn normalize(&self, distance: f32) -> f32 {
        if self.length <= f32::EPSILON {
            return 0.0;
        }
        let position = distance / self.length;
        let wrapped = position - position.floor();
        if wrapped >= 1.0 { 0.0 } else { wrapped }
    }

    /// Wrap an unbounded travelled distance into a single lap in double precision.
    ///
    /// Callers that accumulate distance over long runs wrap here before
    /// handing the result to [`CurvePath::point_at`] or [`CurvePath::tangent_at`].
    pub fn wrap_distance(&self, distance: f64) -> f32 {
        let length = f64::from(self.length);
        if length <= f64::from(f32::EPSILON) {
            return 0.0;
        }
        let wrapped = distance.rem_euclid(length) as f32;
        if wrapped >= self.length { 0.0 } else { wrapped }
    }

    /// Segment index and Bezier parameter for a distance along the path.
    ///
    /// A distance landing exactly on a segment boundary resolves to the end of
    /// the earlier segment.
    pub fn locate(&self, distance: f32) -> (usize, f32) {
        let target = self.normalize(distance) * self.length;

        let index = self
            .cumulative_lengths
            .partition_point(|&end| end < target)
            .min(self.segments.len() - 1);

        let segment_start = if index == 0 {
            0.0
        } else {
            self.cumulative_lengths[index - 1]
        };
        let segment = &self.segments[index];
        let segment_length = segment.length();
        let fraction = if segment_length > f32::EPSILON {
            (target - segment_start) / segment_length
        } else {
            0.0
        };

        (index, segment.parameter_at(fraction))
    }

    /// Point on the path at `distance` travelled from the start (wraps indefinitely).
    pub fn point_at(&self, distance: f32) -> Vec3 {
        let (index, t) = self.locate(distance);
        self.segments[index].evaluate(t)
    }

    /// Unit tangent at `distance` travelled from the start (wraps indefinitely).
    pub fn tangent_at(&self, distance: f32) -> Vec3 {
        let (index, t) = self.locate(distance);
        self.segments[index].tangent(t)
    }

    /// `count` evenly spaced samples covering one lap, starting at distance 0.
    pub fn sample(&self, count: usize) -> Vec<PathSample> {
        let step = self.length / count.max(1) as f32;
        (0..count)
            .map(|i| {
                let distance = i as f32 * step;
                PathSample {
                    distance,
                    point: self.point_at(distance),
                    tangent: self.tangent_at(distance),
                }
            })
            .collect()
    }

    /// Samples spaced `spacing` apart along one lap.
    pub fn sample_every(&self, spacing: f32) -> Vec<PathSample> {
        if spacing <= 0.0 {
            return Vec::new();
        }
        self.sample((self.length / spacing).floor() as usize)
    }
}

fn warn_on_gaps(segments: &[CubicBezierSegment]) {
    for (index, pair) in segments.windows(2).enumerate() {
        let gap = pair[0].end().distance(pair[1].start());
        if gap > CONTINUITY_TOLERANCE {
            warn!("Track segments {} and {} are {:.3} apart", index, index + 1, gap);
        }
    }
    if let (Some(first), Some(last)) = (segments.first(), segments.last()) {
        let gap = last.end().distance(first.start());
        if gap > CONTINUITY_TOLERANCE {
            warn!("Track loop is not closed, last segment ends {:.3} from the start", gap);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::track::TRACK_CONTROL_POINTS;

    const TOLERANCE: f32 = 1e-2;

    fn track() -> CurvePath {
        CurvePath::from_control_points(&TRACK_CONTROL_POINTS).expect("track points are valid")
    }

    /// Out-and-back loop: two straight segments between (0,0,0) and (100,0,0).
    fn thin_loop() -> CurvePath {
        let a = Vec3::ZERO;
        let b = Vec3::new(100.0, 0.0, 0.0);
        let points = [
            a,
            a.lerp(b, 1.0 / 3.0),
            a.lerp(b, 2.0 / 3.0),
            b,
            b,
            b.lerp(a, 1.0 / 3.0),
            b.lerp(a, 2.0 / 3.0),
            a,
        ];
        CurvePath::from_control_points(&points).expect("8 points form 2 segments")
    }

    #[test]
    fn rejects_point_counts_that_are_not_multiples_of_four() {
        let points = [Vec3::ZERO; 7];
        assert_eq!(
            CurvePath::from_control_points(&points).unwrap_err(),
            TrackError::InvalidSegmentCount { points: 7 }
        );
        assert!(CurvePath::from_control_points(&[]).is_err());
    }

    #[test]
    fn track_has_one_segment_per_four_points() {
        let path = track();
        assert_eq!(path.segments().len(), TRACK_CONTROL_POINTS.len() / 4);
        assert!(path.length() > 0.0);
    }

    #[test]
    fn point_at_is_periodic_in_length() {
        let path = track();
        for distance in [0.0, 17.5, 250.0, 999.0, 1800.0] {
            let a = path.point_at(distance);
            let b = path.point_at(distance + path.length());
            assert!(a.distance(b) < TOLERANCE, "distance {distance}: {a} vs {b}");
        }
    }

    #[test]
    fn point_at_matches_direct_segment_evaluation() {
        let path = track();
        for distance in [3.0, 140.0, 777.0, 1234.5] {
            let (index, t) = path.locate(distance);
            let direct = path.segment(index).unwrap().evaluate(t);
            assert!(path.point_at(distance).distance(direct) < 1e-4);
        }
    }

    #[test]
    fn negative_distance_wraps_with_floored_modulo() {
        let path = track();
        let wrapped = path.point_at(path.length() - 1.0);
        assert!(path.point_at(-1.0).distance(wrapped) < TOLERANCE);

        let far_back = -3.0 * path.length() - 40.0;
        let expected = path.point_at(path.length() - 40.0);
        assert!(path.point_at(far_back).distance(expected) < 0.05);
    }

    #[test]
    fn normalized_parameter_stays_in_half_open_range() {
        let path = track();
        for distance in [-1e-6, 0.0, path.length(), -path.length(), 5.0 * path.length() + 1.0] {
            let t = path.normalize(distance);
            assert!((0.0..1.0).contains(&t), "distance {distance} -> {t}");
        }
    }

    #[test]
    fn thin_loop_length_matches_perimeter() {
        let path = thin_loop();
        assert!((path.length() - 200.0).abs() < 1e-2);
        assert!(path.point_at(30.0).distance(Vec3::new(30.0, 0.0, 0.0)) < 1e-2);
        assert!(path.point_at(130.0).distance(Vec3::new(70.0, 0.0, 0.0)) < 1e-2);
    }

    #[test]
    fn segment_boundary_resolves_to_earlier_segment() {
        let path = thin_loop();
        let (index, t) = path.locate(100.0);
        assert_eq!(index, 0);
        assert!((t - 1.0).abs() < 1e-5);
        assert_eq!(path.locate(100.0), path.locate(100.0));
    }

    #[test]
    fn tangent_reverses_on_the_way_back() {
        let path = thin_loop();
        assert!(path.tangent_at(50.0).distance(Vec3::X) < 1e-4);
        assert!(path.tangent_at(150.0).distance(Vec3::NEG_X) < 1e-4);
    }

    #[test]
    fn track_starts_heading_along_positive_x() {
        let path = track();
        assert!(path.point_at(0.0).distance(Vec3::new(200.0, 0.0, 150.0)) < 1e-3);
        assert!(path.tangent_at(0.0).distance(Vec3::X) < 1e-3);
    }

    #[test]
    fn wrap_distance_keeps_precision_far_from_the_start() {
        let path = thin_loop();
        let lap = f64::from(path.length());
        let far = lap * 50_000.0 + 42.5;
        assert!((path.wrap_distance(far) - 42.5).abs() < 1e-3);
        assert!((path.wrap_distance(-30.0) - (path.length() - 30.0)).abs() < 1e-3);
        assert!(path.point_at(path.wrap_distance(far)).distance(path.point_at(42.5)) < 1e-3);
    }

    #[test]
    fn sample_every_covers_one_lap() {
        let path = thin_loop();
        let samples = path.sample_every(10.0);
        assert_eq!(samples.len(), 20);
        assert_eq!(samples[0].distance, 0.0);
        assert!(samples.last().unwrap().distance < path.length());
    }
}
