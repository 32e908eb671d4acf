//! Coordinate spaces of the map.
//!
//! - natural pixels: the unscaled background image grid. Data tables use this.
//! - screen pixels: pointer positions relative to the rendered map element.
//! - percent: fraction of the image extent * 100, used for CSS positioning so
//!   markers stay put when the image is scaled.

/// Natural dimensions of the background image. Only exists once both are known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapSize {
    pub width: f64,
    pub height: f64,
}

/// Rendered size of the map element on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementBox {
    pub width: f64,
    pub height: f64,
}

/// A rectangle in percent-of-image space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PercentRect {
    /// Inline CSS for an absolutely positioned element covering this rect.
    pub fn style(&self) -> String {
        format!(
            "left:{}%;top:{}%;width:{}%;height:{}%;",
            self.left, self.top, self.width, self.height
        )
    }
}

/// Convert a pixel value to a percentage of `extent`.
pub fn to_percent(pixel: f64, extent: f64) -> f64 {
    pixel / extent * 100.0
}

/// Convert a pointer position on the rendered element to natural image pixels,
/// rounded to the nearest integer. `None` when the element has no size yet.
pub fn screen_to_natural(pointer: f64, element_size: f64, natural_extent: f64) -> Option<i64> {
    if element_size <= 0.0 {
        return None;
    }
    Some((pointer / element_size * natural_extent).round() as i64)
}

/// Convert a natural pixel value back to a position on the rendered element.
pub fn natural_to_screen(natural: f64, natural_extent: f64, element_size: f64) -> f64 {
    natural / natural_extent * element_size
}

impl MapSize {
    /// Returns `None` until the image has non-zero natural dimensions.
    pub fn new(width: f64, height: f64) -> Option<Self> {
        if width > 0.0 && height > 0.0 {
            Some(MapSize { width, height })
        } else {
            None
        }
    }

    pub fn point_to_percent(&self, point: [f64; 2]) -> (f64, f64) {
        (
            to_percent(point[0], self.width),
            to_percent(point[1], self.height),
        )
    }

    pub fn rect_to_percent(&self, coords: [f64; 4]) -> PercentRect {
        let left = to_percent(coords[0], self.width);
        let top = to_percent(coords[1], self.height);
        PercentRect {
            left,
            top,
            width: to_percent(coords[2], self.width) - left,
            height: to_percent(coords[3], self.height) - top,
        }
    }

    /// Pointer position (relative to the element's top-left) to natural pixels.
    pub fn pointer_to_natural(&self, x: f64, y: f64, element: ElementBox) -> Option<(i64, i64)> {
        let nx = screen_to_natural(x, element.width, self.width)?;
        let ny = screen_to_natural(y, element.height, self.height)?;
        Some((nx, ny))
    }

    /// Natural pixels to a position on an element of the given size.
    pub fn natural_to_element(&self, x: f64, y: f64, element: ElementBox) -> (f64, f64) {
        (
            natural_to_screen(x, self.width, element.width),
            natural_to_screen(y, self.height, element.height),
        )
    }
}

impl std::fmt::Display for MapSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\u{d7}{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_hd() -> MapSize {
        MapSize::new(1920.0, 1080.0).unwrap()
    }

    #[test]
    fn test_to_percent() {
        assert!((to_percent(960.0, 1920.0) - 50.0).abs() < 1e-9);
        assert!((to_percent(0.0, 1080.0) - 0.0).abs() < 1e-9);
        assert!((to_percent(1080.0, 1080.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_map_size_requires_both_dimensions() {
        assert!(MapSize::new(0.0, 1080.0).is_none());
        assert!(MapSize::new(1920.0, 0.0).is_none());
        assert!(MapSize::new(1920.0, 1080.0).is_some());
    }

    #[test]
    fn test_rect_to_percent_cathedral() {
        let r = full_hd().rect_to_percent([682.0, 289.0, 702.0, 309.0]);
        assert!((r.left - 35.52).abs() < 0.01);
        assert!((r.top - 26.76).abs() < 0.01);
        assert!((r.width - 1.04).abs() < 0.01);
        assert!((r.height - 1.85).abs() < 0.01);
    }

    #[test]
    fn test_screen_to_natural_scales_and_rounds() {
        // Element rendered at half size
        assert_eq!(screen_to_natural(100.0, 960.0, 1920.0), Some(200));
        assert_eq!(screen_to_natural(100.3, 960.0, 1920.0), Some(201));
    }

    #[test]
    fn test_screen_to_natural_zero_element() {
        assert_eq!(screen_to_natural(10.0, 0.0, 1920.0), None);
    }

    #[test]
    fn test_natural_screen_roundtrip_within_one() {
        let size = full_hd();
        let element = ElementBox { width: 737.0, height: 414.5625 };
        for &(x, y) in &[(0.0, 0.0), (692.0, 299.0), (1919.0, 1079.0), (1145.0, 216.0)] {
            let (sx, sy) = size.natural_to_element(x, y, element);
            let (nx, ny) = size.pointer_to_natural(sx, sy, element).unwrap();
            assert!((nx as f64 - x).abs() <= 1.0);
            assert!((ny as f64 - y).abs() <= 1.0);
        }
    }

    #[test]
    fn test_percent_rect_style() {
        let r = PercentRect { left: 10.0, top: 20.0, width: 5.0, height: 2.5 };
        assert_eq!(r.style(), "left:10%;top:20%;width:5%;height:2.5%;");
    }

    #[test]
    fn test_map_size_display() {
        assert_eq!(full_hd().to_string(), "1920\u{d7}1080");
    }
}
