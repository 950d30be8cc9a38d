use std::time::Duration;

use pinchzoom_core::geometry::{Point, Rect, Size};
use pinchzoom_core::loader::Bitmap;

/// Convert a decoded RGBA8 bitmap to an egui ColorImage.
pub fn bitmap_to_color_image(bitmap: &Bitmap) -> egui::ColorImage {
    let size = [bitmap.width() as usize, bitmap.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, bitmap.as_raw())
}

/// Parse a `#RRGGBB` / `#RRGGBBAA` color argument.
pub fn parse_color(s: &str) -> Result<egui::Color32, String> {
    egui::Color32::from_hex(s.trim()).map_err(|e| format!("invalid color '{s}': {e:?}"))
}

pub fn to_size(v: egui::Vec2) -> Size {
    Size::new(v.x, v.y)
}

/// Screen position to viewport-local coordinates.
pub fn to_local(pos: egui::Pos2, origin: egui::Pos2) -> Point {
    Point::new(pos.x - origin.x, pos.y - origin.y)
}

pub fn to_screen_rect(frame: Rect, origin: egui::Pos2) -> egui::Rect {
    egui::Rect::from_min_size(
        egui::pos2(origin.x + frame.origin.x, origin.y + frame.origin.y),
        egui::vec2(frame.size.width, frame.size.height),
    )
}

/// Opacity in `[0, 1]` for a fade-in that started `elapsed` ago.
pub fn fade_alpha(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_rect_offsets_by_origin() {
        let frame = Rect::new(Point::new(-10.0, 20.0), Size::new(300.0, 200.0));
        let r = to_screen_rect(frame, egui::pos2(5.0, 40.0));
        assert_eq!(r.min, egui::pos2(-5.0, 60.0));
        assert_eq!(r.size(), egui::vec2(300.0, 200.0));
    }

    #[test]
    fn test_local_point() {
        let p = to_local(egui::pos2(110.0, 75.0), egui::pos2(10.0, 25.0));
        assert_eq!(p, Point::new(100.0, 50.0));
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#000000").unwrap(), egui::Color32::BLACK);
        assert_eq!(
            parse_color("#ff000080").unwrap(),
            egui::Color32::from_rgba_unmultiplied(255, 0, 0, 128)
        );
        assert!(parse_color("black").is_err());
    }

    #[test]
    fn test_fade_alpha() {
        let d = Duration::from_millis(300);
        assert_eq!(fade_alpha(Duration::ZERO, d), 0.0);
        assert_eq!(fade_alpha(Duration::from_millis(600), d), 1.0);
        assert_eq!(fade_alpha(Duration::ZERO, Duration::ZERO), 1.0);
    }
}
