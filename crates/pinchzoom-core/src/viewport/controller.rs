use std::time::Duration;

use tracing::{debug, warn};

use crate::config::{DoubleTapZoom, ZoomConfig};
use crate::consts::SCALE_EPSILON;
use crate::error::{Result, ZoomError};
use crate::geometry::{Axis, NaturalSize, Point, Rect, Size};

use super::transition::ZoomTransition;

/// Coarse zoom state derived from the current scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomPhase {
    Unconfigured,
    /// Scale sits at the minimum.
    Fitted,
    /// Scale is above the minimum.
    Zoomed,
}

/// Geometry of a configured viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    pub viewport_size: Size,
    pub natural_size: NaturalSize,
    pub min_scale: f32,
    pub max_scale: f32,
    pub scale: f32,
    /// Rectangle covered by the scaled image, in viewport coordinates.
    pub content_frame: Rect,
}

impl ViewportState {
    pub fn is_zoomed(&self) -> bool {
        self.scale > self.min_scale
    }

    /// Snap scales within float noise of the minimum onto it, so the
    /// fitted/zoomed split follows `scale > min_scale` exactly.
    fn snapped(&self, scale: f32) -> f32 {
        if scale <= self.min_scale * (1.0 + SCALE_EPSILON) {
            self.min_scale
        } else {
            scale
        }
    }

    pub fn viewport_to_image(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.content_frame.origin.x) / self.scale,
            (p.y - self.content_frame.origin.y) / self.scale,
        )
    }

    pub fn image_to_viewport(&self, p: Point) -> Point {
        Point::new(
            self.content_frame.origin.x + p.x * self.scale,
            self.content_frame.origin.y + p.y * self.scale,
        )
    }

    fn viewport_center(&self) -> Point {
        Point::new(self.viewport_size.width / 2.0, self.viewport_size.height / 2.0)
    }

    fn image_bounds(&self) -> Rect {
        Rect::new(Point::ZERO, self.natural_size)
    }

    /// Set the scale and place the frame so that `image_point` lands on
    /// `viewport_point`. Does not enforce the centering invariant.
    fn place(&mut self, scale: f32, image_point: Point, viewport_point: Point) {
        self.scale = scale;
        self.content_frame.size = self.natural_size.scaled(scale);
        self.content_frame.origin = Point::new(
            viewport_point.x - image_point.x * scale,
            viewport_point.y - image_point.y * scale,
        );
    }

    fn zoom_about(&mut self, scale: f32, focal: Point) {
        let anchor = self.viewport_to_image(focal);
        self.place(scale, anchor, focal);
    }

    fn recompute_center(&mut self) {
        for axis in Axis::BOTH {
            let view = self.viewport_size.axis(axis);
            let content = self.content_frame.size.axis(axis);
            let origin = if content < view {
                (view - content) / 2.0
            } else {
                self.content_frame.origin.axis(axis).clamp(view - content, 0.0)
            };
            self.content_frame.origin.set_axis(axis, origin);
        }
    }
}

/// Owns the zoomable surface: scale limits, current scale and content frame.
///
/// Every mutation ends in [`ViewportController::recompute_center`], so the
/// frame is always centered on axes where it is smaller than the viewport and
/// never reveals space beyond the image edge on axes where it is larger.
#[derive(Clone, Debug, Default)]
pub struct ViewportController {
    config: ZoomConfig,
    state: Option<ViewportState>,
}

impl ViewportController {
    pub fn new(config: ZoomConfig) -> Self {
        Self {
            config,
            state: None,
        }
    }

    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    /// Replace the zoom policy, refitting against the new limits.
    pub fn set_config(&mut self, config: ZoomConfig) -> Result<()> {
        self.config = config;
        match self.state.take() {
            Some(st) => self.configure(st.viewport_size, st.natural_size),
            None => Ok(()),
        }
    }

    /// Compute scale limits for `natural_size` inside `viewport_size`.
    ///
    /// The first configuration fits the image to the viewport. Later calls
    /// (resize, rotation) refit unless the user has zoomed in, in which case
    /// the zoom ratio relative to the minimum scale and the image point at the
    /// viewport center are preserved.
    ///
    /// An invalid natural size unconfigures the controller. An invalid
    /// viewport (e.g. a minimized window) is rejected without touching the
    /// current state.
    pub fn configure(&mut self, viewport_size: Size, natural_size: NaturalSize) -> Result<()> {
        if !natural_size.is_positive() {
            warn!(size = %natural_size, "Rejecting image with invalid natural size");
            self.state = None;
            return Err(ZoomError::InvalidNaturalSize {
                width: natural_size.width,
                height: natural_size.height,
            });
        }
        if !viewport_size.is_positive() {
            warn!(size = %viewport_size, "Rejecting invalid viewport size");
            return Err(ZoomError::InvalidViewport {
                width: viewport_size.width,
                height: viewport_size.height,
            });
        }

        let (min_scale, max_scale) = self.scale_limits(viewport_size, natural_size);
        let mut next = ViewportState {
            viewport_size,
            natural_size,
            min_scale,
            max_scale,
            scale: min_scale,
            content_frame: Rect::new(Point::ZERO, natural_size.scaled(min_scale)),
        };

        match self.state {
            Some(prev) if prev.is_zoomed() && prev.natural_size == natural_size => {
                let ratio = prev.scale / prev.min_scale;
                let scale = next.snapped((min_scale * ratio).clamp(min_scale, max_scale));
                let anchor = prev.viewport_to_image(prev.viewport_center());
                next.place(scale, anchor, next.viewport_center());
                debug!(scale, ratio, "Viewport resized, preserving zoom");
            }
            _ => debug!(min_scale, max_scale, "Viewport fitted"),
        }

        next.recompute_center();
        self.state = Some(next);
        Ok(())
    }

    /// Re-run configuration for a new viewport size. No-op while unconfigured.
    pub fn set_viewport_size(&mut self, viewport_size: Size) -> Result<()> {
        match self.state {
            Some(st) if st.viewport_size == viewport_size => Ok(()),
            Some(st) => self.configure(viewport_size, st.natural_size),
            None => Ok(()),
        }
    }

    fn scale_limits(&self, viewport: Size, natural: NaturalSize) -> (f32, f32) {
        let fit = (viewport.width / natural.width).min(viewport.height / natural.height);
        let min_scale = self
            .config
            .min_scale
            .filter(|s| s.is_finite() && *s > 0.0)
            .unwrap_or(fit);
        let max_scale = self
            .config
            .max_scale
            .filter(|s| s.is_finite() && *s > 0.0)
            .unwrap_or(fit * self.config.max_zoom_factor);
        (min_scale, max_scale.max(min_scale))
    }

    /// Scale by `scale_delta` around `focal_point`, keeping the image point
    /// under the focal point stationary (up to the centering clamp).
    pub fn apply_pinch(&mut self, scale_delta: f32, focal_point: Point) {
        let Some(st) = self.state.as_mut() else {
            return;
        };
        if !scale_delta.is_finite() || scale_delta <= 0.0 {
            return;
        }
        let scale = st.snapped((st.scale * scale_delta).clamp(st.min_scale, st.max_scale));
        st.zoom_about(scale, focal_point);
        st.recompute_center();
    }

    /// Shift the content offset by `translation`, clamped to the image edges.
    ///
    /// The offset is the viewport's position over the content, so a positive
    /// `x` reveals more of the image's right side. Adapters pass the negated
    /// finger movement.
    pub fn apply_pan(&mut self, translation: Point) {
        let Some(st) = self.state.as_mut() else {
            return;
        };
        if !translation.x.is_finite() || !translation.y.is_finite() {
            return;
        }
        st.content_frame.origin = st.content_frame.origin.offset(-translation.x, -translation.y);
        st.recompute_center();
    }

    /// Programmatic zoom to `scale`, clamped to the limits, about the
    /// viewport center.
    ///
    /// Returns the frame transition for animation, or `None` when
    /// unconfigured or `scale` is not a positive finite number.
    pub fn set_scale(&mut self, scale: f32) -> Option<ZoomTransition> {
        if !scale.is_finite() || scale <= 0.0 {
            return None;
        }
        let duration = Duration::from_millis(self.config.animation_ms);
        let st = self.state.as_mut()?;
        let from = st.content_frame;

        let target = st.snapped(scale.clamp(st.min_scale, st.max_scale));
        let center = st.viewport_center();
        st.zoom_about(target, center);
        st.recompute_center();

        debug!(requested = scale, scale = st.scale, "Scale set");
        Some(ZoomTransition::new(from, st.content_frame, duration))
    }

    /// Toggle between the minimum scale and the configured zoom-in target.
    ///
    /// Returns the frame transition for animation, or `None` when there is
    /// nothing to toggle (unconfigured, or the limits leave no room to zoom).
    pub fn handle_double_tap(&mut self, tap_point: Point) -> Option<ZoomTransition> {
        let duration = Duration::from_millis(self.config.animation_ms);
        let policy = self.config.double_tap.clone();
        let st = self.state.as_mut()?;
        let from = st.content_frame;

        if st.is_zoomed() {
            let center = st.viewport_center();
            st.zoom_about(st.min_scale, center);
        } else {
            let threshold = st.min_scale * (1.0 + SCALE_EPSILON);
            match policy {
                DoubleTapZoom::TapRect { size } if size.is_finite() && size > 0.0 => {
                    let bounds = st.image_bounds();
                    let tapped = st.viewport_to_image(tap_point);
                    let tapped = Point::new(
                        tapped.x.clamp(0.0, bounds.size.width),
                        tapped.y.clamp(0.0, bounds.size.height),
                    );
                    let rect = Rect::from_center_size(tapped, Size::new(size, size))
                        .clamped_within(&bounds);
                    let mut scale = (st.viewport_size.width / rect.size.width)
                        .min(st.viewport_size.height / rect.size.height)
                        .clamp(st.min_scale, st.max_scale);
                    if scale <= threshold {
                        scale = st.max_scale;
                    }
                    if scale <= threshold {
                        return None;
                    }
                    let center = st.viewport_center();
                    st.place(scale, rect.center(), center);
                }
                _ => {
                    if st.max_scale <= threshold {
                        return None;
                    }
                    st.zoom_about(st.max_scale, tap_point);
                }
            }
        }

        st.recompute_center();
        debug!(scale = st.scale, zoomed = st.is_zoomed(), "Double-tap zoom toggled");
        Some(ZoomTransition::new(from, st.content_frame, duration))
    }

    /// Enforce the centering invariant. Idempotent.
    pub fn recompute_center(&mut self) {
        if let Some(st) = self.state.as_mut() {
            st.recompute_center();
        }
    }

    /// Drop all geometry; used when the displayed image changes.
    pub fn reset(&mut self) {
        self.state = None;
    }

    pub fn state(&self) -> Option<&ViewportState> {
        self.state.as_ref()
    }

    pub fn phase(&self) -> ZoomPhase {
        match &self.state {
            None => ZoomPhase::Unconfigured,
            Some(st) if st.is_zoomed() => ZoomPhase::Zoomed,
            Some(_) => ZoomPhase::Fitted,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.state.is_some()
    }

    pub fn scale(&self) -> Option<f32> {
        self.state.map(|st| st.scale)
    }

    pub fn min_scale(&self) -> Option<f32> {
        self.state.map(|st| st.min_scale)
    }

    pub fn max_scale(&self) -> Option<f32> {
        self.state.map(|st| st.max_scale)
    }

    pub fn content_frame(&self) -> Option<Rect> {
        self.state.map(|st| st.content_frame)
    }

    /// Position of the viewport's top-left corner in scaled content space.
    pub fn content_offset(&self) -> Option<Point> {
        self.state
            .map(|st| Point::new(-st.content_frame.origin.x, -st.content_frame.origin.y))
    }

    pub fn viewport_size(&self) -> Option<Size> {
        self.state.map(|st| st.viewport_size)
    }

    pub fn natural_size(&self) -> Option<NaturalSize> {
        self.state.map(|st| st.natural_size)
    }

    pub fn viewport_to_image(&self, p: Point) -> Option<Point> {
        self.state.map(|st| st.viewport_to_image(p))
    }

    pub fn image_to_viewport(&self, p: Point) -> Option<Point> {
        self.state.map(|st| st.image_to_viewport(p))
    }

    /// Region of the image currently on screen, in image pixel coordinates.
    pub fn visible_image_rect(&self) -> Option<Rect> {
        let st = self.state?;
        let top_left = st.viewport_to_image(Point::ZERO);
        let bottom_right = st.viewport_to_image(Point::new(
            st.viewport_size.width,
            st.viewport_size.height,
        ));
        let visible = Rect::new(
            top_left,
            Size::new(bottom_right.x - top_left.x, bottom_right.y - top_left.y),
        );
        visible.intersect(&st.image_bounds())
    }
}
