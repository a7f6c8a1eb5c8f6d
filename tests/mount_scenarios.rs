//! Mount lifecycle scenarios against the public API.

use std::cell::RefCell;
use std::rc::Rc;

use spark_header::layout::BAR_INSET;
use spark_header::{
    CollapsePhase, ConfigError, Direction, HeaderConfig, HeaderError, HeaderFrame, HeaderOptions,
    Invalidation, LayoutError, ScrollSource, mount,
};

type Frames = Rc<RefCell<Vec<HeaderFrame>>>;

fn recorder() -> (Frames, impl FnMut(&HeaderFrame) + 'static) {
    let frames: Frames = Rc::new(RefCell::new(Vec::new()));
    let sink = frames.clone();
    (frames, move |frame: &HeaderFrame| sink.borrow_mut().push(frame.clone()))
}

#[test]
fn rtl_half_collapsed() {
    let source = ScrollSource::new();
    let (frames, renderer) = recorder();
    let config = HeaderConfig::new("عنوان", 390.0)
        .with_direction(Direction::Rtl)
        .with_collapse_distance(100.0);
    let _handle = mount(config, &source, renderer).unwrap();

    source.emit(50.0);

    let frames = frames.borrow();
    let frame = frames.last().unwrap();
    assert_eq!(frame.progress.value(), 0.5);
    assert_eq!(frame.visual.phase, CollapsePhase::Collapsing);
    assert_eq!(frame.visual.large_title_opacity, 0.5);
    assert_eq!(frame.visual.compact_title_opacity, 0.5);

    let back = frame.chrome.back_button.as_ref().unwrap();
    assert_eq!(back.frame.right(), 390.0 - BAR_INSET);
    assert!(back.mirrored_glyph);
    assert!(back.frame.x > 390.0 / 2.0);
}

#[test]
fn zero_width_fails_before_rendering() {
    let source = ScrollSource::new();
    let calls = Rc::new(RefCell::new(0));
    let counter = calls.clone();

    let result = mount(HeaderConfig::new("Title", 0.0), &source, move |_: &HeaderFrame| {
        *counter.borrow_mut() += 1;
    });

    assert!(matches!(result, Err(HeaderError::Layout(LayoutError::NonPositiveWidth { .. }))));
    assert_eq!(*calls.borrow(), 0);
    assert_eq!(source.listener_count(), 0);
}

#[test]
fn zero_collapse_distance_is_config_error() {
    let source = ScrollSource::new();
    let (frames, renderer) = recorder();

    let result = mount(
        HeaderConfig::new("Title", 390.0).with_collapse_distance(0.0),
        &source,
        renderer,
    );

    assert!(matches!(
        result,
        Err(HeaderError::Config(ConfigError::NonPositiveCollapseDistance { .. }))
    ));
    assert!(frames.borrow().is_empty());
    assert_eq!(source.listener_count(), 0);
}

#[test]
fn unmount_stops_frames() {
    let source = ScrollSource::new();
    let (frames, renderer) = recorder();
    let handle = mount(HeaderConfig::new("Title", 390.0), &source, renderer).unwrap();

    source.emit(10.0);
    assert_eq!(frames.borrow().len(), 2);

    handle.unmount();
    assert_eq!(source.listener_count(), 0);

    source.emit(40.0);
    source.emit(80.0);
    assert_eq!(frames.borrow().len(), 2);
}

#[test]
fn versions_track_their_own_inputs() {
    let source = ScrollSource::new();
    let (frames, renderer) = recorder();
    let handle = mount(HeaderConfig::new("Title", 390.0), &source, renderer).unwrap();

    source.emit(13.0);
    {
        let frames = frames.borrow();
        let frame = frames.last().unwrap();
        assert_eq!((frame.config_version, frame.progress_version), (0, 1));
        assert_eq!(frame.invalidated, Invalidation::PROGRESS);
    }

    handle
        .update_config(HeaderConfig::new("Retitled", 390.0))
        .unwrap();
    {
        let frames = frames.borrow();
        let frame = frames.last().unwrap();
        assert_eq!((frame.config_version, frame.progress_version), (1, 1));
        assert!(frame.invalidated.contains(Invalidation::CONFIG | Invalidation::METRICS));
        assert_eq!(frame.chrome.large_title.lines, vec!["Retitled".to_string()]);
        // Scroll position survives the update
        assert_eq!(frame.progress.value(), 0.25);
    }
}

#[test]
fn invalid_update_keeps_previous_frame() {
    let source = ScrollSource::new();
    let (frames, renderer) = recorder();
    let handle = mount(HeaderConfig::new("Title", 390.0), &source, renderer).unwrap();
    let before = handle.frame();

    let err = handle
        .update_config(HeaderConfig::new("Title", -5.0))
        .unwrap_err();
    assert!(matches!(err, HeaderError::Layout(LayoutError::NonPositiveWidth { .. })));

    assert_eq!(handle.frame(), before);
    assert_eq!(handle.config().header_width, 390.0);
    assert_eq!(frames.borrow().len(), 1);

    // Still live
    source.emit(52.0);
    assert_eq!(handle.frame().visual.phase, CollapsePhase::Collapsed);
}

#[test]
fn direction_flip_mirrors_chrome() {
    let source = ScrollSource::new();
    let (frames, renderer) = recorder();
    let handle = mount(HeaderConfig::new("Title", 390.0), &source, renderer).unwrap();
    let ltr = handle.frame();

    handle
        .update_config(HeaderConfig::new("Title", 390.0).with_direction(Direction::Rtl))
        .unwrap();
    let rtl = frames.borrow().last().cloned().unwrap();

    assert!(rtl.invalidated.contains(Invalidation::DIRECTION));
    assert_eq!(rtl.visual.horizontal_anchor, 390.0 - ltr.visual.horizontal_anchor);
    let ltr_back = ltr.chrome.back_button.unwrap().frame;
    let rtl_back = rtl.chrome.back_button.unwrap().frame;
    assert_eq!(rtl_back.x, 390.0 - ltr_back.right());
}

#[test]
fn mount_from_fixture_options() {
    let navigator = HeaderOptions::from_json(
        r##"{
            "headerLargeTitle": true,
            "direction": "rtl",
            "headerLargeTitleStyle": { "fontSize": 34, "fontWeight": "bold", "color": "#007AFF" },
            "headerStyle": { "backgroundColor": "#f8f9fa" },
            "headerTintColor": "#007AFF"
        }"##,
    )
    .unwrap();
    let screen = HeaderOptions::from_json(
        r#"{ "title": "RTL Large Title Test", "headerLargeTitle": true, "direction": "rtl" }"#,
    )
    .unwrap();
    let config = screen
        .inherit(&navigator)
        .into_config(390.0, Direction::Ltr)
        .unwrap();

    let source = ScrollSource::new();
    let (frames, renderer) = recorder();
    let handle = mount(config, &source, renderer).unwrap();

    for offset in (0..=60).step_by(10) {
        source.emit(offset as f32);
    }

    let frames = frames.borrow();
    // Initial frame plus one per step that moved progress, offset 0 does not
    assert_eq!(frames.len(), 7);
    let last = frames.last().unwrap();
    assert_eq!(last.visual.phase, CollapsePhase::Collapsed);
    assert_eq!(last.chrome.direction, Direction::Rtl);
    assert!(last.chrome.compact_title.is_some());
    assert_eq!(last.chrome.height(), 44.0);

    handle.unmount();
}
