//! SVG serialization of tooth glyphs for the web and desktop shells.

use std::fmt::Write;

use super::{
    tooth_outline, Fill, GlyphBody, Orientation, Rect, RingStyle, ToothGlyph, VIEW_BOX_HEIGHT,
    VIEW_BOX_WIDTH,
};

const OUTLINE_COLOR: &str = "#D0D0D0";
const CROWN_COLOR: &str = "#FFFEF0";
const ROOT_COLOR: &str = "#E8DCC0";
const MISSING_STROKE: &str = "#ef4444";
const IMPLANT_COLOR: &str = "#3b82f6";
const SELECTED_COLOR: &str = "#2a276e";

impl ToothGlyph {
    /// Render as a standalone `<svg>` element.
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_svg(&mut out);
        out
    }

    fn write_svg(&self, out: &mut String) -> std::fmt::Result {
        write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" data-tooth="{}">"#,
            VIEW_BOX_WIDTH, VIEW_BOX_HEIGHT, self.tooth
        )?;

        if self.selected {
            write!(
                out,
                r#"<rect x="0" y="0" width="{}" height="{}" rx="6" fill="{}" fill-opacity="0.1" stroke="{}" stroke-width="2"/>"#,
                VIEW_BOX_WIDTH, VIEW_BOX_HEIGHT, SELECTED_COLOR, SELECTED_COLOR
            )?;
        }

        match &self.body {
            GlyphBody::Missing { cross } => {
                for s in cross {
                    write!(
                        out,
                        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="3"/>"#,
                        s.x1, s.y1, s.x2, s.y2, MISSING_STROKE
                    )?;
                }
            }
            GlyphBody::Implant { post, crown_path } => {
                write_rect(out, post, IMPLANT_COLOR, None)?;
                write!(
                    out,
                    r##"<path d="{}" fill="#E8E8E8" stroke="{}" stroke-width="1.5"/>"##,
                    crown_path, IMPLANT_COLOR
                )?;
            }
            GlyphBody::Anatomical { overlays, ring, .. } => {
                self.write_clean_tooth(out)?;

                if overlays.iter().any(|o| o.fill.is_striped()) {
                    write!(
                        out,
                        r#"<defs><pattern id="stripes-{}" width="3" height="3" patternUnits="userSpaceOnUse" patternTransform="rotate(45)"><rect width="1.5" height="3" fill="{}"/></pattern></defs>"#,
                        self.tooth,
                        overlays
                            .iter()
                            .find(|o| o.fill.is_striped())
                            .map(|o| o.fill.color().as_str())
                            .unwrap_or_default()
                    )?;
                }

                for overlay in overlays {
                    let fill = match overlay.fill {
                        Fill::Solid(color) => color.as_str().to_string(),
                        Fill::Striped(_) => format!("url(#stripes-{})", self.tooth),
                    };
                    write_rect(out, &overlay.region, &fill, Some(overlay.opacity))?;
                }

                if let Some(ring) = ring {
                    let dash = match ring.style {
                        RingStyle::Dashed => r#" stroke-dasharray="4 2""#,
                        RingStyle::Solid => "",
                    };
                    write!(
                        out,
                        r#"<rect x="1" y="1" width="{}" height="{}" rx="6" fill="none" stroke="{}" stroke-width="2"{}/>"#,
                        VIEW_BOX_WIDTH - 2.0,
                        VIEW_BOX_HEIGHT - 2.0,
                        ring.color,
                        dash
                    )?;
                }
            }
        }

        out.push_str("</svg>");
        Ok(())
    }

    fn write_clean_tooth(&self, out: &mut String) -> std::fmt::Result {
        let (crown, root) = tooth_outline(self.orientation);
        let occlusal_cy = match self.orientation {
            Orientation::Upper => 4,
            Orientation::Lower => 66,
        };
        write!(
            out,
            r#"<ellipse cx="20" cy="{}" rx="8" ry="3" fill="none" stroke="{}" stroke-width="0.8"/>"#,
            occlusal_cy, OUTLINE_COLOR
        )?;
        write!(
            out,
            r#"<path d="{}" fill="{}" stroke="{}" stroke-width="0.8"/>"#,
            root, ROOT_COLOR, OUTLINE_COLOR
        )?;
        write!(
            out,
            r#"<path d="{}" fill="{}" stroke="{}" stroke-width="0.8"/>"#,
            crown, CROWN_COLOR, OUTLINE_COLOR
        )
    }
}

fn write_rect(out: &mut String, rect: &Rect, fill: &str, opacity: Option<f32>) -> std::fmt::Result {
    write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}""#,
        rect.x, rect.y, rect.width, rect.height, rect.corner_radius, fill
    )?;
    if let Some(opacity) = opacity {
        write!(out, r#" opacity="{}""#, opacity)?;
    }
    out.push_str("/>");
    Ok(())
}
