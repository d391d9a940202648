//! Tooth unit: turns one tooth's state into a renderable glyph.
//!
//! The unit is stateless. It is handed a tooth number, arch, status,
//! surface map, and selection flag, and produces a [`ToothGlyph`]. Its only
//! outbound event is the press, reported as the tooth number.

mod geometry;
mod svg;

pub use geometry::*;

use std::collections::BTreeMap;

use crate::models::{Condition, SurfaceKey, ToothNumber, ToothState, ToothStatus};
use crate::vocabulary::{
    color_for, is_striped_condition, status_color_for, tooth_type_for, Color, ToothType,
    STRIPE_COLOR,
};

/// Overlay opacity for striped (active disease/damage) conditions.
pub const STRIPED_OPACITY: f32 = 0.8;
/// Overlay opacity for solid (restorative/cosmetic) conditions.
pub const SOLID_OPACITY: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Solid(Color),
    Striped(Color),
}

impl Fill {
    pub fn color(&self) -> Color {
        match self {
            Fill::Solid(color) | Fill::Striped(color) => *color,
        }
    }

    pub fn is_striped(&self) -> bool {
        matches!(self, Fill::Striped(_))
    }
}

/// A colored region drawn over one surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceOverlay {
    pub surface: SurfaceKey,
    pub condition: Condition,
    pub region: Rect,
    pub fill: Fill,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingStyle {
    Solid,
    Dashed,
}

/// Outline drawn around the whole glyph for a non-present status.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusRing {
    pub color: Color,
    pub style: RingStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GlyphBody {
    /// Crossed-out placeholder; surfaces are not drawn
    Missing { cross: [Segment; 2] },
    /// Implant post and crown; surfaces are not drawn
    Implant {
        post: Rect,
        crown_path: &'static str,
    },
    /// Clean anatomical tooth with surface overlays and optional ring
    Anatomical {
        tooth_type: Option<ToothType>,
        overlays: Vec<SurfaceOverlay>,
        ring: Option<StatusRing>,
    },
}

/// Render output for one tooth.
#[derive(Debug, Clone, PartialEq)]
pub struct ToothGlyph {
    pub tooth: ToothNumber,
    pub orientation: Orientation,
    pub selected: bool,
    pub body: GlyphBody,
}

impl ToothGlyph {
    /// The press event: a tap anywhere on the glyph reports its tooth.
    pub fn press(&self) -> ToothNumber {
        self.tooth
    }

    pub fn overlays(&self) -> &[SurfaceOverlay] {
        match &self.body {
            GlyphBody::Anatomical { overlays, .. } => overlays,
            _ => &[],
        }
    }

    pub fn ring(&self) -> Option<&StatusRing> {
        match &self.body {
            GlyphBody::Anatomical { ring, .. } => ring.as_ref(),
            _ => None,
        }
    }
}

/// Render a tooth.
///
/// `missing` and `implant` replace the anatomical glyph and ignore
/// `surfaces` entirely. Every other status draws the tooth, oriented by
/// arch, with one overlay per recorded surface condition that has a
/// visual. Known non-present statuses add a ring, dashed for root canal.
pub fn render_tooth(
    tooth: ToothNumber,
    is_upper: bool,
    status: &ToothStatus,
    surfaces: &BTreeMap<SurfaceKey, Condition>,
    is_selected: bool,
) -> ToothGlyph {
    let orientation = Orientation::for_arch(is_upper);

    let status = status.canonical();
    let body = match status.as_ref() {
        ToothStatus::Missing => GlyphBody::Missing {
            cross: MISSING_CROSS,
        },
        ToothStatus::Implant => GlyphBody::Implant {
            post: implant_post(orientation),
            crown_path: implant_crown_path(orientation),
        },
        _ => GlyphBody::Anatomical {
            tooth_type: tooth_type_for(tooth),
            overlays: surfaces
                .iter()
                .filter_map(|(surface, condition)| overlay_for(surface, condition, orientation))
                .collect(),
            ring: ring_for(&status),
        },
    };

    ToothGlyph {
        tooth,
        orientation,
        selected: is_selected,
        body,
    }
}

/// Convenience wrapper over [`render_tooth`] for a stored state.
pub fn render_state(
    tooth: ToothNumber,
    is_upper: bool,
    state: &ToothState,
    is_selected: bool,
) -> ToothGlyph {
    render_tooth(tooth, is_upper, &state.status, &state.surfaces, is_selected)
}

fn overlay_for(
    surface: &SurfaceKey,
    condition: &Condition,
    orientation: Orientation,
) -> Option<SurfaceOverlay> {
    let region = surface_region(surface, orientation)?;

    let (fill, opacity) = if is_striped_condition(condition) {
        (Fill::Striped(STRIPE_COLOR), STRIPED_OPACITY)
    } else {
        let color = color_for(condition);
        if color.is_transparent() {
            // `none` and unrecognised conditions have no visual effect.
            return None;
        }
        (Fill::Solid(color), SOLID_OPACITY)
    };

    Some(SurfaceOverlay {
        surface: surface.clone(),
        condition: condition.clone(),
        region,
        fill,
        opacity,
    })
}

fn ring_for(status: &ToothStatus) -> Option<StatusRing> {
    if status.is_present() {
        return None;
    }
    Some(StatusRing {
        color: status_color_for(status)?,
        style: if matches!(status, ToothStatus::RootCanal) {
            RingStyle::Dashed
        } else {
            RingStyle::Solid
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surfaces(entries: &[(SurfaceKey, Condition)]) -> BTreeMap<SurfaceKey, Condition> {
        entries.iter().cloned().collect()
    }

    #[test]
    fn test_missing_ignores_surfaces() {
        let map = surfaces(&[(SurfaceKey::Occlusal, Condition::Caries)]);
        let glyph = render_tooth(3, true, &ToothStatus::Missing, &map, false);
        assert!(matches!(glyph.body, GlyphBody::Missing { .. }));
        assert!(glyph.overlays().is_empty());
        assert!(glyph.ring().is_none());
    }

    #[test]
    fn test_implant_ignores_surfaces() {
        let map = surfaces(&[(SurfaceKey::Mesial, Condition::FillingGold)]);
        let glyph = render_tooth(30, false, &ToothStatus::Implant, &map, false);
        match glyph.body {
            GlyphBody::Implant { post, .. } => assert_eq!(post.y, 8.0),
            other => panic!("expected implant, got {other:?}"),
        }
    }

    #[test]
    fn test_striped_and_solid_overlays() {
        let map = surfaces(&[
            (SurfaceKey::Occlusal, Condition::CariesClassI),
            (SurfaceKey::Buccal, Condition::FillingAmalgam),
        ]);
        let glyph = render_tooth(14, true, &ToothStatus::Present, &map, false);
        let overlays = glyph.overlays();
        assert_eq!(overlays.len(), 2);

        let occlusal = &overlays[0];
        assert_eq!(occlusal.surface, SurfaceKey::Occlusal);
        assert!(occlusal.fill.is_striped());
        assert_eq!(occlusal.fill.color(), STRIPE_COLOR);
        assert_eq!(occlusal.opacity, STRIPED_OPACITY);

        let buccal = &overlays[1];
        assert_eq!(buccal.fill, Fill::Solid(Color("#71717A")));
        assert_eq!(buccal.opacity, SOLID_OPACITY);
    }

    #[test]
    fn test_unknown_values_have_no_visual_effect() {
        let map = surfaces(&[
            (SurfaceKey::Occlusal, Condition::Unknown("erosion".into())),
            (SurfaceKey::Other("I".into()), Condition::Caries),
            (SurfaceKey::Lingual, Condition::None),
        ]);
        let glyph = render_tooth(
            9,
            true,
            &ToothStatus::Unknown("veneer".into()),
            &map,
            false,
        );
        assert!(glyph.overlays().is_empty());
        assert!(glyph.ring().is_none());
    }

    #[test]
    fn test_ring_dashed_only_for_root_canal() {
        let empty = BTreeMap::new();
        let rc = render_tooth(19, false, &ToothStatus::RootCanal, &empty, false);
        assert_eq!(rc.ring().map(|r| r.style), Some(RingStyle::Dashed));

        for status in [ToothStatus::Crown, ToothStatus::Impacted, ToothStatus::Fractured] {
            let glyph = render_tooth(19, false, &status, &empty, false);
            assert_eq!(glyph.ring().map(|r| r.style), Some(RingStyle::Solid));
        }

        let present = render_tooth(19, false, &ToothStatus::Present, &empty, false);
        assert!(present.ring().is_none());
    }

    #[test]
    fn test_legacy_keys_render_like_current_ones() {
        let map = surfaces(&[(SurfaceKey::Occlusal, Condition::from_key("class_i"))]);
        let glyph = render_tooth(3, true, &ToothStatus::from_key("root_canal"), &map, false);
        assert_eq!(glyph.ring().map(|r| r.style), Some(RingStyle::Dashed));
        assert!(glyph.overlays()[0].fill.is_striped());
        assert_eq!(glyph.overlays()[0].condition.as_key(), "class_i");
    }

    #[test]
    fn test_orientation_and_press() {
        let glyph = render_tooth(24, false, &ToothStatus::Present, &BTreeMap::new(), true);
        assert_eq!(glyph.orientation, Orientation::Lower);
        assert!(glyph.selected);
        assert_eq!(glyph.press(), 24);
    }
}
