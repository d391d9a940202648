//! Fixed glyph geometry in a 40x70 view box.

use crate::models::SurfaceKey;

pub const VIEW_BOX_WIDTH: f32 = 40.0;
pub const VIEW_BOX_HEIGHT: f32 = 70.0;

/// Which way the tooth points on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Root up, crown down (toward the midline)
    Upper,
    /// Crown up, root down
    Lower,
}

impl Orientation {
    pub fn for_arch(is_upper: bool) -> Self {
        if is_upper {
            Orientation::Upper
        } else {
            Orientation::Lower
        }
    }

    fn pick(self, upper: f32, lower: f32) -> f32 {
        match self {
            Orientation::Upper => upper,
            Orientation::Lower => lower,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub corner_radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// Anatomical region for a surface overlay. Unknown surfaces have no
/// region and are not drawn.
pub fn surface_region(surface: &SurfaceKey, orientation: Orientation) -> Option<Rect> {
    let (x, y, width, height) = match surface {
        SurfaceKey::Occlusal => (14.0, orientation.pick(34.0, 10.0), 12.0, 6.0),
        SurfaceKey::Mesial => (12.0, orientation.pick(38.0, 16.0), 4.0, 12.0),
        SurfaceKey::Distal => (24.0, orientation.pick(38.0, 16.0), 4.0, 12.0),
        SurfaceKey::Buccal => (16.0, orientation.pick(40.0, 18.0), 8.0, 10.0),
        SurfaceKey::Lingual => (14.0, orientation.pick(46.0, 24.0), 12.0, 6.0),
        SurfaceKey::Other(_) => return None,
    };
    Some(Rect {
        x,
        y,
        width,
        height,
        corner_radius: 1.0,
    })
}

/// The two strokes of the crossed-out placeholder for a missing tooth.
pub const MISSING_CROSS: [Segment; 2] = [
    Segment {
        x1: 8.0,
        y1: 10.0,
        x2: 32.0,
        y2: 60.0,
    },
    Segment {
        x1: 32.0,
        y1: 10.0,
        x2: 8.0,
        y2: 60.0,
    },
];

/// Implant post (the screw) for the given orientation.
pub fn implant_post(orientation: Orientation) -> Rect {
    Rect {
        x: 16.0,
        y: orientation.pick(36.0, 8.0),
        width: 8.0,
        height: 25.0,
        corner_radius: 1.0,
    }
}

/// Implant crown outline (SVG path data).
pub fn implant_crown_path(orientation: Orientation) -> &'static str {
    match orientation {
        Orientation::Upper => "M 12 12 L 28 12 L 29 16 L 28 32 L 27 36 L 13 36 L 12 32 L 11 16 Z",
        Orientation::Lower => "M 12 33 L 28 33 L 29 37 L 28 53 L 27 57 L 13 57 L 12 53 L 11 37 Z",
    }
}

/// Crown and root outlines of the clean anatomical tooth (SVG path data).
pub fn tooth_outline(orientation: Orientation) -> (&'static str, &'static str) {
    match orientation {
        Orientation::Upper => (
            "M 13 32 L 27 32 L 28 36 L 29 52 L 28 56 L 12 56 L 11 52 L 12 36 Z",
            "M 15 8 L 18 8 L 22 8 L 25 8 L 27 32 L 13 32 Z",
        ),
        Orientation::Lower => (
            "M 12 8 L 28 8 L 29 12 L 28 28 L 27 32 L 13 32 L 12 28 L 11 12 Z",
            "M 13 32 L 27 32 L 25 55 L 22 62 L 18 62 L 15 55 Z",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_regions_mirror_between_arches() {
        let upper = surface_region(&SurfaceKey::Occlusal, Orientation::Upper).unwrap();
        let lower = surface_region(&SurfaceKey::Occlusal, Orientation::Lower).unwrap();
        assert_eq!(upper.x, lower.x);
        assert_eq!(upper.y, 34.0);
        assert_eq!(lower.y, 10.0);
    }

    #[test]
    fn test_unknown_surface_has_no_region() {
        assert!(surface_region(&SurfaceKey::Other("I".into()), Orientation::Upper).is_none());
    }

    #[test]
    fn test_regions_fit_view_box() {
        for orientation in [Orientation::Upper, Orientation::Lower] {
            for surface in SurfaceKey::all() {
                let r = surface_region(&surface, orientation).unwrap();
                assert!(r.x + r.width <= VIEW_BOX_WIDTH);
                assert!(r.y + r.height <= VIEW_BOX_HEIGHT);
            }
        }
    }
}
