//! Utility functions for color names and arrowhead geometry.
//!
//! This module provides:
//! - Color name mapping used by config parsing and status logging
//! - Arrowhead geometry calculations

use crate::draw::{Color, color::*};
use crate::geometry::Point;

// ============================================================================
// Arrowhead Geometry
// ============================================================================

/// Calculates the two barb endpoints of a V-shaped arrowhead.
///
/// The head sits at `tip` and opens back towards `tail`; each barb is `length`
/// pixels long and rotated `angle_degrees` away from the shaft.
///
/// # Returns
/// Array of two points `[left, right]`. If the shaft is shorter than a pixel
/// both points equal `tip`.
pub fn calculate_arrowhead(tip: Point, tail: Point, length: f64, angle_degrees: f64) -> [Point; 2] {
    let dx = tip.x - tail.x;
    let dy = tip.y - tail.y;
    let line_length = dx.hypot(dy);

    if line_length < 1.0 {
        return [tip, tip];
    }

    let ux = dx / line_length;
    let uy = dy / line_length;

    let angle = angle_degrees.to_radians();
    let cos_a = angle.cos();
    let sin_a = angle.sin();

    let left = Point::new(
        tip.x - length * (ux * cos_a - uy * sin_a),
        tip.y - length * (uy * cos_a + ux * sin_a),
    );
    let right = Point::new(
        tip.x - length * (ux * cos_a + uy * sin_a),
        tip.y - length * (uy * cos_a - ux * sin_a),
    );

    [left, right]
}

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "white", "black"
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        _ => None,
    }
}

/// Maps a Color value to its human-readable name, or its hex form for custom colors.
pub fn color_to_name(color: &Color) -> String {
    if color.r > 0.9 && color.g < 0.1 && color.b < 0.1 {
        "Red".to_string()
    } else if color.r < 0.1 && color.g > 0.9 && color.b < 0.1 {
        "Green".to_string()
    } else if color.r < 0.1 && color.g < 0.1 && color.b > 0.9 {
        "Blue".to_string()
    } else if color.r > 0.9 && color.g > 0.9 && color.b < 0.1 {
        "Yellow".to_string()
    } else if color.r > 0.9 && color.g > 0.9 && color.b > 0.9 {
        "White".to_string()
    } else if color.r < 0.1 && color.g < 0.1 && color.b < 0.1 {
        "Black".to_string()
    } else {
        color.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrowhead_barbs_have_requested_length() {
        let tip = Point::new(10.0, 0.0);
        let [left, right] = calculate_arrowhead(tip, Point::new(0.0, 0.0), 13.0, 30.0);
        assert!((tip.distance_to(left) - 13.0).abs() < 1e-9);
        assert!((tip.distance_to(right) - 13.0).abs() < 1e-9);
        // Barbs point back towards the tail, mirrored across the shaft
        assert!(left.x < tip.x && right.x < tip.x);
        assert!((left.y + right.y).abs() < 1e-9);
    }

    #[test]
    fn arrowhead_barbs_are_thirty_degrees_off_the_shaft() {
        let tip = Point::new(0.0, 0.0);
        let [left, _] = calculate_arrowhead(tip, Point::new(-100.0, 0.0), 10.0, 30.0);
        let angle = (left.y - tip.y).atan2(tip.x - left.x).abs().to_degrees();
        assert!((angle - 30.0).abs() < 1e-9);
    }

    #[test]
    fn arrowhead_handles_degenerate_lines() {
        let tip = Point::new(5.0, 5.0);
        let [left, right] = calculate_arrowhead(tip, tip, 15.0, 45.0);
        assert_eq!(left, tip);
        assert_eq!(right, tip);
    }

    #[test]
    fn name_color_mappings() {
        assert_eq!(name_to_color("white").unwrap(), WHITE);
        assert_eq!(name_to_color("RED").unwrap(), RED);
        assert!(name_to_color("chartreuse").is_none());
    }

    #[test]
    fn color_to_name_matches_known_colors() {
        assert_eq!(color_to_name(&RED), "Red");
        assert_eq!(color_to_name(&BLACK), "Black");
        assert_eq!(color_to_name(&Color::from_rgb8(0x42, 0x42, 0x42)), "#424242");
    }
}
