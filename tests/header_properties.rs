//! Property tests for the collapse controller and direction mirroring.

use proptest::prelude::*;
use spark_header::{
    CollapseProgress, Direction, DirectionPolicy, HeaderConfig, ScrollOffsetTracker, TextAlign,
    TitleMetricsResolver, VisualState, compute_visual_state,
};

const TITLES: &[&str] = &[
    "RTL Large Title Test",
    "عنوان",
    "כותרת גדולה",
    "Inbox",
    "هذا نص تجريبي باللغة العربية لاختبار وظيفة العنوان الكبير",
];

fn align() -> impl Strategy<Value = TextAlign> {
    prop_oneof![Just(TextAlign::Left), Just(TextAlign::Center), Just(TextAlign::Right)]
}

fn state(config: &HeaderConfig, direction: Direction, p: f32) -> VisualState {
    let metrics = TitleMetricsResolver::default().resolve(config).unwrap();
    let policy = DirectionPolicy::new(direction, config.header_width);
    compute_visual_state(CollapseProgress::new(p), config, &metrics, &policy)
}

proptest! {
    #[test]
    fn opacities_sum_to_one(p in 0.0f32..=1.0, title in prop::sample::select(TITLES)) {
        let config = HeaderConfig::new(title, 390.0);
        let visual = state(&config, Direction::Ltr, p);
        prop_assert_eq!(visual.large_title_opacity + visual.compact_title_opacity, 1.0);
    }

    #[test]
    fn rtl_anchor_mirrors_ltr_anchor(
        p in 0.0f32..=1.0,
        width in 80.0f32..1200.0,
        align in align(),
        title in prop::sample::select(TITLES),
    ) {
        let config = HeaderConfig::new(title, width).with_align(align);
        let ltr = state(&config, Direction::Ltr, p);
        let rtl = state(&config, Direction::Rtl, p);

        prop_assert_eq!(rtl.horizontal_anchor, width - ltr.horizontal_anchor);
        match (ltr.compact_title_anchor, rtl.compact_title_anchor) {
            (Some(l), Some(r)) => {
                prop_assert_eq!(r, width - l);
            }
            (None, None) => {}
            other => {
                prop_assert!(false, "compact anchors disagree: {:?}", other);
            }
        }
        prop_assert_eq!(ltr.large_title_opacity, rtl.large_title_opacity);
        prop_assert_eq!(ltr.large_title_translate_y, rtl.large_title_translate_y);
    }

    #[test]
    fn controller_is_idempotent(p in 0.0f32..=1.0, rtl in any::<bool>()) {
        let direction = if rtl { Direction::Rtl } else { Direction::Ltr };
        let config = HeaderConfig::new("عنوان", 390.0).with_direction(direction);
        prop_assert_eq!(state(&config, direction, p), state(&config, direction, p));
    }

    #[test]
    fn opacities_are_monotonic_in_offset(
        a in -200.0f32..400.0,
        b in -200.0f32..400.0,
        distance in 1.0f32..300.0,
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let config = HeaderConfig::new("Title", 390.0);

        let mut tracker = ScrollOffsetTracker::new(distance).unwrap();
        let first = state(&config, Direction::Ltr, tracker.update(low).value());
        let second = state(&config, Direction::Ltr, tracker.update(high).value());

        prop_assert!(first.large_title_opacity >= second.large_title_opacity);
        prop_assert!(first.compact_title_opacity <= second.compact_title_opacity);
    }

    #[test]
    fn progress_boundaries_are_exact(distance in 0.5f32..500.0, extra in 0.0f32..1000.0) {
        let mut tracker = ScrollOffsetTracker::new(distance).unwrap();
        prop_assert_eq!(tracker.update(0.0).value(), 0.0);
        prop_assert_eq!(tracker.update(-extra).value(), 0.0);
        prop_assert_eq!(tracker.update(distance).value(), 1.0);
        prop_assert_eq!(tracker.update(distance + extra).value(), 1.0);
    }

    #[test]
    fn large_title_motion_stays_in_range(p in 0.0f32..=1.0, title in prop::sample::select(TITLES)) {
        let config = HeaderConfig::new(title, 390.0);
        let metrics = TitleMetricsResolver::default().resolve(&config).unwrap();
        let visual = state(&config, Direction::Ltr, p);

        let delta = metrics.expanded.height - metrics.collapsed.height;
        prop_assert!(visual.large_title_translate_y <= 0.0);
        prop_assert!(visual.large_title_translate_y >= -delta);

        let ratio = metrics.collapsed.height / metrics.expanded.height;
        prop_assert!(visual.large_title_scale <= 1.0);
        prop_assert!(visual.large_title_scale >= ratio - 1e-6);
    }
}
