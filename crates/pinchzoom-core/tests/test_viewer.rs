mod common;

use approx::assert_relative_eq;

use pinchzoom_core::config::ZoomConfig;
use pinchzoom_core::error::LoadError;
use pinchzoom_core::geometry::{NaturalSize, Point, Size};
use pinchzoom_core::loader::{ImageDescriptor, ImageLoader, LoadEvent};
use pinchzoom_core::viewer::{ViewerEvents, ZoomViewer};
use pinchzoom_core::viewport::{ViewportController, ZoomPhase};

use common::{loader_with, offline, png_bytes, wait_until, GatedFetcher, WAIT};

#[derive(Default)]
struct Recorder {
    loaded: Vec<NaturalSize>,
    failed: Vec<LoadError>,
    close_requests: usize,
}

impl ViewerEvents for Recorder {
    fn on_load_complete(&mut self, natural_size: NaturalSize) {
        self.loaded.push(natural_size);
    }

    fn on_load_failed(&mut self, error: &LoadError) {
        self.failed.push(error.clone());
    }

    fn on_request_close(&mut self) {
        self.close_requests += 1;
    }
}

fn viewer(loader: ImageLoader) -> ZoomViewer<Recorder> {
    ZoomViewer::new(
        loader,
        ViewportController::new(ZoomConfig::default()),
        Recorder::default(),
    )
}

#[test]
fn test_load_then_configure_with_known_viewport() {
    let mut v = viewer(loader_with(offline(), &[("wide", png_bytes(120, 80))]));
    v.set_viewport_size(Size::new(30.0, 60.0)).unwrap();
    assert_eq!(v.phase(), ZoomPhase::Unconfigured);

    v.open(ImageDescriptor::local("wide"));
    assert!(v.wait(WAIT).is_some());

    assert_eq!(v.phase(), ZoomPhase::Fitted);
    assert_relative_eq!(v.controller().min_scale().unwrap(), 0.25);
    let frame = v.controller().content_frame().unwrap();
    assert_relative_eq!(frame.origin.y, 20.0);
    assert_eq!(v.events().loaded, vec![Size::new(120.0, 80.0)]);
    assert!(v.events().failed.is_empty());
}

#[test]
fn test_viewport_arriving_after_load_configures() {
    let mut v = viewer(loader_with(offline(), &[("wide", png_bytes(120, 80))]));
    v.open(ImageDescriptor::local("wide"));
    assert!(v.wait(WAIT).is_some());
    assert_eq!(v.phase(), ZoomPhase::Unconfigured);

    v.set_viewport_size(Size::new(30.0, 60.0)).unwrap();
    assert_eq!(v.phase(), ZoomPhase::Fitted);
    assert!(v.bitmap().is_some());
}

#[test]
fn test_failed_load_reports_and_stays_unconfigured() {
    let mut v = viewer(loader_with(offline(), &[]));
    v.set_viewport_size(Size::new(100.0, 100.0)).unwrap();
    v.open(ImageDescriptor::remote("https://img.test/x.png"));

    let event = v.wait(WAIT).expect("failure delivered");
    assert!(matches!(event, LoadEvent::Failed { .. }));
    assert_eq!(v.events().failed.len(), 1);
    assert!(v.events().loaded.is_empty());
    assert_eq!(v.phase(), ZoomPhase::Unconfigured);

    // Gestures degrade to no-ops.
    v.pinch(2.0, Point::new(50.0, 50.0));
    assert!(v.double_tap(Point::new(50.0, 50.0)).is_none());
}

#[test]
fn test_stale_load_does_not_reach_viewport() {
    let fetcher = GatedFetcher::new();
    let release_a = fetcher.add_gated("https://img.test/a.png", png_bytes(400, 100));
    fetcher.add("https://img.test/b.png", png_bytes(100, 400));
    let mut v = viewer(loader_with(fetcher, &[]));
    v.set_viewport_size(Size::new(100.0, 100.0)).unwrap();

    v.open(ImageDescriptor::remote("https://img.test/a.png"));
    v.open(ImageDescriptor::remote("https://img.test/b.png"));
    assert!(v.wait(WAIT).is_some());
    let frame_b = v.controller().content_frame();

    release_a.send(()).unwrap();
    assert!(wait_until(|| {
        v.poll();
        v.loader().stale_dropped() == 1
    }));

    assert_eq!(v.events().loaded, vec![Size::new(100.0, 400.0)]);
    assert_eq!(v.controller().content_frame(), frame_b);
    assert_eq!(v.controller().natural_size(), Some(Size::new(100.0, 400.0)));
}

#[test]
fn test_open_resets_controller() {
    let mut v = viewer(loader_with(
        offline(),
        &[("a", png_bytes(10, 10)), ("b", png_bytes(20, 10))],
    ));
    v.set_viewport_size(Size::new(50.0, 50.0)).unwrap();
    v.open(ImageDescriptor::local("a"));
    v.wait(WAIT);
    v.pinch(2.0, Point::new(25.0, 25.0));
    assert_eq!(v.phase(), ZoomPhase::Zoomed);

    v.open(ImageDescriptor::local("b"));
    assert_eq!(v.phase(), ZoomPhase::Unconfigured);
    v.wait(WAIT);
    assert_eq!(v.phase(), ZoomPhase::Fitted);
    assert_eq!(v.events().loaded.len(), 2);
}

#[test]
fn test_reload_repeats_current_descriptor() {
    let mut v = viewer(loader_with(offline(), &[("a", png_bytes(10, 10))]));
    assert!(v.reload().is_none());

    let first = v.open(ImageDescriptor::local("a"));
    v.wait(WAIT);
    let second = v.reload().expect("descriptor known");
    assert!(second > first);
    v.wait(WAIT);
    assert_eq!(v.events().loaded.len(), 2);
}

#[test]
fn test_gestures_route_to_controller() {
    let mut v = viewer(loader_with(offline(), &[("wide", png_bytes(120, 80))]));
    v.set_viewport_size(Size::new(30.0, 60.0)).unwrap();
    v.open(ImageDescriptor::local("wide"));
    v.wait(WAIT);

    v.pinch(2.0, Point::new(15.0, 30.0));
    assert_relative_eq!(v.controller().scale().unwrap(), 0.5);
    v.pan(Point::new(100.0, 0.0));
    assert_relative_eq!(v.controller().content_frame().unwrap().origin.x, -30.0);

    assert!(v.double_tap(Point::new(15.0, 30.0)).is_some());
    assert_eq!(v.phase(), ZoomPhase::Fitted);
}

#[test]
fn test_request_close_fires_callback() {
    let mut v = viewer(loader_with(offline(), &[]));
    v.request_close();
    v.request_close();
    assert_eq!(v.events().close_requests, 2);
}

#[test]
fn test_rotation_preserves_zoom_through_viewer() {
    let mut v = viewer(loader_with(offline(), &[("wide", png_bytes(120, 80))]));
    v.set_viewport_size(Size::new(30.0, 60.0)).unwrap();
    v.open(ImageDescriptor::local("wide"));
    v.wait(WAIT);
    v.pinch(2.0, Point::new(15.0, 30.0));

    v.set_viewport_size(Size::new(60.0, 30.0)).unwrap();
    assert_relative_eq!(v.controller().min_scale().unwrap(), 0.375);
    assert_relative_eq!(v.controller().scale().unwrap(), 0.75, epsilon = 1e-5);
    assert_eq!(v.viewport_size(), Some(Size::new(60.0, 30.0)));
}

#[test]
fn test_set_scale_routes_to_controller() {
    let mut v = viewer(loader_with(offline(), &[("wide", png_bytes(120, 80))]));
    assert!(v.set_scale(0.5).is_none());

    v.set_viewport_size(Size::new(30.0, 60.0)).unwrap();
    v.open(ImageDescriptor::local("wide"));
    v.wait(WAIT);

    assert!(v.set_scale(0.5).is_some());
    assert_eq!(v.phase(), ZoomPhase::Zoomed);
    assert_relative_eq!(v.controller().scale().unwrap(), 0.5);
}

#[test]
fn test_minimized_viewport_keeps_zoom() {
    let mut v = viewer(loader_with(offline(), &[("wide", png_bytes(120, 80))]));
    v.set_viewport_size(Size::new(30.0, 60.0)).unwrap();
    v.open(ImageDescriptor::local("wide"));
    v.wait(WAIT);
    v.pinch(2.0, Point::new(15.0, 30.0));

    assert!(v.set_viewport_size(Size::ZERO).is_err());
    assert_eq!(v.phase(), ZoomPhase::Zoomed);

    v.set_viewport_size(Size::new(30.0, 60.0)).unwrap();
    assert_eq!(v.phase(), ZoomPhase::Zoomed);
    assert_relative_eq!(v.controller().scale().unwrap(), 0.5);
}
