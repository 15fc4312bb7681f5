//! Compares the planned path against the actual path segment by segment
//! and reports how far they agree before diverging.

use crate::config::Config;
use crate::geometry::{segment_strictly_contains, Vector};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlignmentResult {
    pub fully_aligned: bool,
    /// How many leading segments of the planned path the actual path
    /// reproduces exactly (within tolerance).
    pub aligned_segment_count: usize,
    pub first_mismatch_index: Option<usize>,
    pub divergence_point: Option<Vector>,
}

pub fn compute_alignment(
    planned: &[Vector],
    actual: &[Vector],
    actual_reached_cursor: bool,
    config: &Config,
) -> AlignmentResult {
    let mut pi = 0usize;
    let mut ai = 0usize;
    let mut aligned = 0usize;
    let mut first_mismatch = None;
    let mut divergence_point = None;

    while pi + 1 < planned.len() && ai + 1 < actual.len() {
        let p_start = planned[pi];
        let p_end = planned[pi + 1];
        let a_start = actual[ai];
        let a_end = actual[ai + 1];

        if (p_start - a_start).length() > config.pixel_tolerance {
            first_mismatch = Some(pi);
            divergence_point = Some(p_start);
            break;
        }

        let dirs_ok = match ((p_end - p_start).normalized(), (a_end - a_start).normalized()) {
            (Some(pd), Some(ad)) => pd.dot(ad) >= config.direction_alignment_threshold,
            _ => false,
        };
        if !dirs_ok {
            first_mismatch = Some(pi);
            divergence_point = Some(p_start);
            break;
        }

        if (p_end - a_end).length() <= config.pixel_tolerance {
            pi += 1;
            ai += 1;
            aligned += 1;
            continue;
        }

        if segment_strictly_contains(a_start, a_end, p_end, config.pixel_tolerance) {
            pi += 1;
            first_mismatch = Some(pi);
            divergence_point = Some(p_end);
            break;
        }
        if segment_strictly_contains(p_start, p_end, a_end, config.pixel_tolerance) {
            ai += 1;
            first_mismatch = Some(ai);
            divergence_point = Some(a_end);
            break;
        }

        first_mismatch = Some(pi);
        divergence_point = Some(p_start);
        break;
    }

    let fully_aligned = first_mismatch.is_none()
        && planned.len() == actual.len()
        && aligned == planned.len().saturating_sub(1)
        && actual_reached_cursor;

    AlignmentResult { fully_aligned, aligned_segment_count: aligned, first_mismatch_index: first_mismatch, divergence_point }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_paths_are_fully_aligned() {
        let path = alloc::vec![Vector::new(0.0, 0.0), Vector::new(1.0, 0.0), Vector::new(1.0, 1.0)];
        let config = Config::default();
        let result = compute_alignment(&path, &path, true, &config);
        assert!(result.fully_aligned);
        assert_eq!(result.aligned_segment_count, 2);
        assert!(result.first_mismatch_index.is_none());
    }

    #[test]
    fn diverging_second_segment_reports_one_aligned_segment() {
        let planned = alloc::vec![Vector::new(0.0, 0.0), Vector::new(1.0, 0.0), Vector::new(1.0, 1.0)];
        let actual = alloc::vec![Vector::new(0.0, 0.0), Vector::new(1.0, 0.0), Vector::new(2.0, 0.0)];
        let config = Config::default();
        let result = compute_alignment(&planned, &actual, false, &config);
        assert!(!result.fully_aligned);
        assert_eq!(result.aligned_segment_count, 1);
        assert_eq!(result.first_mismatch_index, Some(1));
    }
}
