//! Rectangle overlap queries
//!
//! Overlap is strict: rectangles that only share an edge do not collide and
//! empty rectangles never collide with anything.

use crate::foundation::math::Rect;

/// Check if `hit_box` overlaps any of `rects`
pub fn any_overlap<'a>(hit_box: &Rect, rects: impl IntoIterator<Item = &'a Rect>) -> bool {
    rects.into_iter().any(|rect| hit_box.intersects(rect))
}

/// Index of the first rectangle overlapping `hit_box`
pub fn first_overlap<'a>(hit_box: &Rect, rects: impl IntoIterator<Item = &'a Rect>) -> Option<usize> {
    rects.into_iter().position(|rect| hit_box.intersects(rect))
}

/// Indices of every rectangle overlapping `hit_box`
pub fn overlapping<'a>(hit_box: &'a Rect, rects: impl IntoIterator<Item = &'a Rect> + 'a) -> impl Iterator<Item = usize> + 'a {
    rects
        .into_iter()
        .enumerate()
        .filter(move |(_, rect)| hit_box.intersects(rect))
        .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHIP: Rect = Rect::new(395.0, 495.0, 10.0, 10.0);

    #[test]
    fn test_hit_when_bullet_inside_hit_box() {
        let bullets = [Rect::new(0.0, 0.0, 5.0, 5.0), Rect::new(398.0, 498.0, 4.0, 4.0)];

        assert!(any_overlap(&SHIP, &bullets));
        assert_eq!(first_overlap(&SHIP, &bullets), Some(1));
    }

    #[test]
    fn test_miss_when_far_away() {
        let bullets = [Rect::new(0.0, 0.0, 5.0, 5.0)];

        assert!(!any_overlap(&SHIP, &bullets));
        assert_eq!(first_overlap(&SHIP, &bullets), None);
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let bullets = [Rect::new(405.0, 495.0, 4.0, 4.0), Rect::new(395.0, 491.0, 4.0, 4.0)];
        assert!(!any_overlap(&SHIP, &bullets));
    }

    #[test]
    fn test_empty_rects_never_collide() {
        let bullets = [Rect::new(400.0, 500.0, 0.0, 0.0)];
        assert!(!any_overlap(&SHIP, &bullets));
        assert!(!any_overlap(&SHIP, &[]));
    }

    #[test]
    fn test_overlapping_lists_all_hits() {
        let bullets = [
            Rect::new(396.0, 496.0, 2.0, 2.0),
            Rect::new(0.0, 0.0, 2.0, 2.0),
            Rect::new(400.0, 500.0, 20.0, 20.0),
        ];

        assert_eq!(overlapping(&SHIP, &bullets).collect::<Vec<_>>(), vec![0, 2]);
    }
}
