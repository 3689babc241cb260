use std::fmt::Write;

use egui::Color32;

use super::parse::escape;
use crate::document::Document;
use crate::shape::text::TEXT_FONT_SIZE;
use crate::shape::{AnyShape, Bezier, Segment, Shape};
use crate::style::{Fill, color_to_hex};

/// Serialize the visible content of a document as an SVG string
pub fn document_to_svg(document: &Document) -> String {
    let size = document.size();
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\">",
        size.x, size.y
    );

    for layer in document.layers().iter().filter(|layer| layer.is_visible()) {
        for shape in layer.shapes().iter().filter(|shape| shape.is_visible()) {
            if let Some(element) = shape_to_element(shape) {
                out.push_str("  ");
                out.push_str(&element);
                out.push('\n');
            }
        }
    }

    out.push_str("</svg>\n");
    out
}

/// One element for one shape; `None` for beziers too short to draw
pub fn shape_to_element(shape: &AnyShape) -> Option<String> {
    let rect = shape.bounding_rect();
    let element = match shape {
        AnyShape::Rectangle(rectangle) => {
            let mut element = format!(
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
                rect.min.x,
                rect.min.y,
                rect.width(),
                rect.height()
            );
            if rectangle.corner_radius() > 0.0 {
                let _ = write!(element, " rx=\"{}\"", rectangle.corner_radius());
            }
            element + &paint_attributes(shape, true) + "/>"
        }
        AnyShape::Ellipse(_) => {
            let center = rect.center();
            format!(
                "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\"{}/>",
                center.x,
                center.y,
                rect.width() / 2.0,
                rect.height() / 2.0,
                paint_attributes(shape, true)
            )
        }
        AnyShape::Line(line) => {
            let (start, end) = (line.start_point(), line.end_point());
            format!(
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"{}/>",
                start.x,
                start.y,
                end.x,
                end.y,
                paint_attributes(shape, false)
            )
        }
        AnyShape::Bezier(bezier) => format!(
            "<path d=\"{}\"{}/>",
            path_data(bezier)?,
            paint_attributes(shape, true)
        ),
        AnyShape::Text(text) => {
            let mut element = format!(
                "<text x=\"{}\" y=\"{}\" font-size=\"{}\"",
                rect.min.x, rect.min.y, TEXT_FONT_SIZE
            );
            let color = text.stroke().color;
            if color != Color32::BLACK {
                let _ = write!(element, " fill=\"{}\"", color_to_hex(color));
            }
            let _ = write!(element, ">{}</text>", escape(text.text()));
            element
        }
    };
    Some(element)
}

/// `M`, then one command per segment, then `Z` for closed paths
pub fn path_data(bezier: &Bezier) -> Option<String> {
    let first = bezier.point(0)?;
    let segments = bezier.segments();
    if segments.is_empty() {
        return None;
    }

    let mut data = format!("M {} {}", first.x, first.y);
    for segment in segments {
        let _ = match segment {
            Segment::Cubic(c1, c2, end) => write!(
                data,
                " C {} {} {} {} {} {}",
                c1.x, c1.y, c2.x, c2.y, end.x, end.y
            ),
            Segment::Quad(control, end) => {
                write!(data, " Q {} {} {} {}", control.x, control.y, end.x, end.y)
            }
            Segment::Line(end) => write!(data, " L {} {}", end.x, end.y),
        };
    }
    if bezier.is_closed() {
        data.push_str(" Z");
    }
    Some(data)
}

/// Fill and stroke attributes that differ from a white fill with a
/// one pixel black outline
fn paint_attributes(shape: &AnyShape, has_interior: bool) -> String {
    let mut attributes = String::new();

    if has_interior {
        match shape.fill() {
            Fill::None => attributes.push_str(" fill=\"none\""),
            Fill::Solid(Color32::WHITE) => {}
            Fill::Solid(color) => {
                let _ = write!(attributes, " fill=\"{}\"", color_to_hex(color));
            }
        }
    }

    let stroke = shape.stroke();
    if !stroke.enabled {
        attributes.push_str(" stroke=\"none\"");
    } else if stroke.color != Color32::BLACK {
        let _ = write!(
            attributes,
            " stroke=\"{}\" stroke-width=\"{}\"",
            color_to_hex(stroke.color),
            stroke.width
        );
    } else if stroke.width != 1.0 {
        let _ = write!(attributes, " stroke-width=\"{}\"", stroke.width);
    }

    attributes
}
