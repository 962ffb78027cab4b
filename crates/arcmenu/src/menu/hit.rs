use super::layout::IconVisual;
use crate::geometry::{Polar, Ring};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionChange {
    pub changed: bool,
    pub any_selected: bool,
}

/// Re-evaluates every icon's selection flag against a pointer position.
///
/// An icon is selected iff the pointer lies strictly inside the ring and its angle falls
/// in the icon's sector.
pub fn update_selection<'a>(
    visuals: impl IntoIterator<Item = &'a mut IconVisual>,
    pointer: Polar,
    ring: Ring,
) -> SelectionChange {
    let inside = ring.contains(pointer.distance);
    let mut change = SelectionChange::default();

    for visual in visuals {
        let wanted = inside && visual.sector.contains(pointer.angle);
        if visual.selected != wanted {
            visual.selected = wanted;
            change.changed = true;
        }
        change.any_selected |= visual.selected;
    }

    change
}

/// Index of the sector containing `angle`. Only the angle counts, not the distance.
///
/// Sectors never overlap; should they ever, the last match wins.
pub fn resolve_click<'a>(
    visuals: impl IntoIterator<Item = (usize, &'a IconVisual)>,
    angle: f64,
) -> Option<usize> {
    visuals
        .into_iter()
        .filter(|(_, visual)| visual.sector.contains(angle))
        .last()
        .map(|(index, _)| index)
}

/// Clears every flag, reporting whether anything was selected.
pub fn clear_selection<'a>(visuals: impl IntoIterator<Item = &'a mut IconVisual>) -> bool {
    visuals.into_iter().fold(false, |changed, visual| {
        std::mem::replace(&mut visual.selected, false) || changed
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{ArcSpan, Size};

    fn visuals(count: usize) -> Vec<IconVisual> {
        (0..count)
            .map(|i| {
                IconVisual::calculate(
                    i,
                    count,
                    Size::new(32.0, 32.0),
                    20.0,
                    ArcSpan::new(0.0, 360.0),
                    Ring::new(20.0, 80.0),
                )
                .unwrap()
            })
            .collect()
    }

    fn selected(visuals: &[IconVisual]) -> Vec<usize> {
        visuals
            .iter()
            .enumerate()
            .filter(|(_, v)| v.selected)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_pointer_in_sector_selects_it() {
        let ring = Ring::new(20.0, 80.0);
        let mut icons = visuals(4);

        let change = update_selection(&mut icons, Polar::new(46.0, 50.0), ring);
        assert_eq!(change, SelectionChange { changed: true, any_selected: true });
        assert_eq!(selected(&icons), vec![0]);

        let change = update_selection(&mut icons, Polar::new(91.0, 50.0), ring);
        assert!(change.changed);
        assert_eq!(selected(&icons), vec![1]);
    }

    #[test]
    fn test_unchanged_selection_reports_no_change() {
        let ring = Ring::new(20.0, 80.0);
        let mut icons = visuals(4);
        update_selection(&mut icons, Polar::new(46.0, 50.0), ring);

        let change = update_selection(&mut icons, Polar::new(60.0, 70.0), ring);
        assert_eq!(change, SelectionChange { changed: false, any_selected: true });
    }

    #[test]
    fn test_hole_and_outside_select_nothing() {
        let ring = Ring::new(20.0, 80.0);
        let mut icons = visuals(4);
        update_selection(&mut icons, Polar::new(100.0, 50.0), ring);

        for angle in [0.0, 46.0, 135.0, 300.0] {
            let change = update_selection(&mut icons, Polar::new(angle, 10.0), ring);
            assert!(!change.any_selected);
            assert!(selected(&icons).is_empty());
        }

        update_selection(&mut icons, Polar::new(200.0, 50.0), ring);
        let change = update_selection(&mut icons, Polar::new(200.0, 95.0), ring);
        assert_eq!(change, SelectionChange { changed: true, any_selected: false });
    }

    #[test]
    fn test_ring_boundaries_count_as_outside() {
        let ring = Ring::new(20.0, 80.0);
        let mut icons = visuals(4);
        update_selection(&mut icons, Polar::new(10.0, 20.0), ring);
        assert!(selected(&icons).is_empty());
        update_selection(&mut icons, Polar::new(10.0, 80.0), ring);
        assert!(selected(&icons).is_empty());
    }

    #[test]
    fn test_click_resolves_by_angle_only() {
        let icons = visuals(4);
        let indexed = || icons.iter().enumerate();
        assert_eq!(resolve_click(indexed(), 200.0), Some(2));
        assert_eq!(resolve_click(indexed(), 0.0), Some(0));
        assert_eq!(resolve_click(indexed(), 359.9), Some(3));
    }

    #[test]
    fn test_click_outside_the_arc_matches_nothing() {
        let icons: Vec<_> = (0..3)
            .map(|i| {
                IconVisual::calculate(
                    i,
                    3,
                    Size::new(32.0, 32.0),
                    20.0,
                    ArcSpan::new(50.0, 250.0),
                    Ring::new(20.0, 80.0),
                )
                .unwrap()
            })
            .collect();
        assert_eq!(resolve_click(icons.iter().enumerate(), 10.0), None);
        assert_eq!(resolve_click(icons.iter().enumerate(), 250.0), None);
    }

    #[test]
    fn test_overlapping_sectors_last_match_wins() {
        let mut icons = visuals(2);
        icons[1].sector = icons[0].sector;
        assert_eq!(resolve_click(icons.iter().enumerate(), 10.0), Some(1));
    }

    #[test]
    fn test_clear_selection() {
        let mut icons = visuals(3);
        assert!(!clear_selection(&mut icons));
        icons[2].selected = true;
        assert!(clear_selection(&mut icons));
        assert!(selected(&icons).is_empty());
    }
}
