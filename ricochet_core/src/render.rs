//! The renderer-facing adapter: a pure data-conversion layer, no window and
//! no drawing backend, that turns an `AlignmentResult` into the green/red/
//! yellow segment classification a renderer is expected to color by.
//! Ghost segments render dashed; that's conveyed by a segment simply being
//! part of `PathOutput::ghost` rather than by a `SegmentColor` variant.

use alloc::vec::Vec;

use crate::alignment::AlignmentResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentColor {
    /// Green: planned and actual agree here.
    Aligned,
    /// Red: planned continues here, but the actual path already diverged.
    PlannedOnly,
    /// Yellow: the actual path continues here, off the plan.
    ActualOnly,
}

pub fn classify_planned_segments(alignment: &AlignmentResult, planned_point_count: usize) -> Vec<SegmentColor> {
    (0..planned_point_count.saturating_sub(1))
        .map(|i| if i < alignment.aligned_segment_count { SegmentColor::Aligned } else { SegmentColor::PlannedOnly })
        .collect()
}

pub fn classify_actual_segments(alignment: &AlignmentResult, actual_point_count: usize) -> Vec<SegmentColor> {
    (0..actual_point_count.saturating_sub(1))
        .map(|i| if i < alignment.aligned_segment_count { SegmentColor::Aligned } else { SegmentColor::ActualOnly })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fully_aligned_result_colors_every_segment_green() {
        let alignment = AlignmentResult {
            fully_aligned: true,
            aligned_segment_count: 3,
            first_mismatch_index: None,
            divergence_point: None,
        };
        let colors = classify_planned_segments(&alignment, 4);
        assert_eq!(colors, alloc::vec![SegmentColor::Aligned; 3]);
    }

    #[test]
    fn divergence_colors_the_tail_by_which_path_it_belongs_to() {
        let alignment = AlignmentResult {
            fully_aligned: false,
            aligned_segment_count: 1,
            first_mismatch_index: Some(1),
            divergence_point: None,
        };
        let planned_colors = classify_planned_segments(&alignment, 3);
        assert_eq!(planned_colors, alloc::vec![SegmentColor::Aligned, SegmentColor::PlannedOnly]);
        let actual_colors = classify_actual_segments(&alignment, 2);
        assert_eq!(actual_colors, alloc::vec![SegmentColor::Aligned]);
    }
}
