//! Best-effort reading of the SVG subset the editor writes.
//!
//! This scans tags and `name="value"` pairs; it is not an XML parser.
//! Unknown elements are skipped and missing numbers read as zero.

use std::collections::HashMap;

use egui::{Pos2, Vec2};

use crate::shape::{AnyShape, Bezier, Ellipse, Line, Rectangle, Shape, Text};
use crate::style::{Fill, parse_color};

/// One start tag (or self-closing tag) found in the input
#[derive(Debug, Clone, PartialEq)]
pub struct Element<'a> {
    pub name: &'a str,
    pub attributes: Attributes<'a>,
    /// Raw text between the start tag and the next `<`, for `<text>`
    pub text: &'a str,
}

/// Attributes of one element, with `style="a: b; ..."` entries folded in.
/// Plain attributes win over style entries of the same name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes<'a> {
    values: HashMap<&'a str, &'a str>,
}

impl<'a> Attributes<'a> {
    pub fn parse(tag_body: &'a str) -> Self {
        let mut values = HashMap::new();
        let mut rest = tag_body;

        while let Some(eq) = rest.find('=') {
            let name = rest[..eq].trim();
            let name = name.rsplit(char::is_whitespace).next().unwrap_or(name);
            let after = rest[eq + 1..].trim_start();
            let Some(quote) = after.chars().next().filter(|c| *c == '"' || *c == '\'') else {
                break;
            };
            let value_start = &after[1..];
            let Some(end) = value_start.find(quote) else {
                break;
            };
            if !name.is_empty() {
                values.insert(name, &value_start[..end]);
            }
            rest = &value_start[end + 1..];
        }

        if let Some(style) = values.get("style").copied() {
            for declaration in style.split(';') {
                if let Some((key, value)) = declaration.split_once(':') {
                    values.entry(key.trim()).or_insert(value.trim());
                }
            }
        }

        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.values.get(name).copied()
    }

    /// Numeric attribute; missing or malformed values read as zero
    pub fn number(&self, name: &str) -> f32 {
        self.get(name).and_then(parse_number).unwrap_or(0.0)
    }
}

/// Parse a length like `12`, `-3.5` or `800px`, ignoring a trailing unit
pub fn parse_number(value: &str) -> Option<f32> {
    let value = value.trim();
    let end = value
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || ((c == '-' || c == '+') && i == 0) || c == 'e' || c == 'E'))
        .map_or(value.len(), |(i, _)| i);
    value[..end].parse().ok()
}

/// Every start tag in document order; comments, declarations and closing
/// tags are skipped
pub fn elements(svg: &str) -> Vec<Element<'_>> {
    let mut found = Vec::new();
    let mut rest = svg;

    while let Some(open) = rest.find('<') {
        rest = &rest[open + 1..];

        if let Some(after_comment) = rest.strip_prefix("!--") {
            rest = after_comment
                .find("-->")
                .map_or("", |end| &after_comment[end + 3..]);
            continue;
        }
        if rest.starts_with(['/', '?', '!']) {
            continue;
        }

        let Some(close) = rest.find('>') else {
            break;
        };
        let tag = rest[..close].trim_end_matches('/');
        let name_end = tag.find(char::is_whitespace).unwrap_or(tag.len());
        let (name, attributes) = tag.split_at(name_end);

        rest = &rest[close + 1..];
        let text = rest.find('<').map_or(rest, |end| &rest[..end]);

        found.push(Element {
            name,
            attributes: Attributes::parse(attributes),
            text,
        });
    }
    found
}

/// Page size from the root `<svg>` element, when it has a usable one
pub fn page_size(root: &Element<'_>) -> Option<Vec2> {
    let width = root.attributes.get("width").and_then(parse_number)?;
    let height = root.attributes.get("height").and_then(parse_number)?;
    (width > 0.0 && height > 0.0).then(|| Vec2::new(width, height))
}

/// Convert one element into a shape, or `None` for anything unsupported
pub fn shape_from_element(element: &Element<'_>) -> Option<AnyShape> {
    let attrs = &element.attributes;
    let mut shape: AnyShape = match element.name {
        "rect" => {
            let mut rect = Rectangle::new(
                Pos2::new(attrs.number("x"), attrs.number("y")),
                Vec2::new(attrs.number("width"), attrs.number("height")),
            );
            rect.set_corner_radius(attrs.number("rx"));
            rect.into()
        }
        "circle" => {
            let r = attrs.number("r");
            Ellipse::new(
                Pos2::new(attrs.number("cx") - r, attrs.number("cy") - r),
                Vec2::splat(r * 2.0),
            )
            .into()
        }
        "ellipse" => {
            let (rx, ry) = (attrs.number("rx"), attrs.number("ry"));
            Ellipse::new(
                Pos2::new(attrs.number("cx") - rx, attrs.number("cy") - ry),
                Vec2::new(rx * 2.0, ry * 2.0),
            )
            .into()
        }
        "line" => Line::new(
            Pos2::new(attrs.number("x1"), attrs.number("y1")),
            Pos2::new(attrs.number("x2"), attrs.number("y2")),
        )
        .into(),
        "path" => path_from_data(attrs.get("d")?)?.into(),
        "text" => {
            let content = unescape(element.text.trim());
            let mut text = Text::new(Pos2::new(attrs.number("x"), attrs.number("y")), &content);
            // Text is painted with its stroke color, which SVG calls fill
            if let Some(fill) = attrs.get("fill").filter(|f| *f != "none") {
                let mut stroke = text.stroke();
                stroke.color = parse_color(fill);
                text.set_stroke(stroke);
            }
            return Some(text.into());
        }
        _ => return None,
    };

    apply_style(attrs, &mut shape);
    Some(shape)
}

fn apply_style(attrs: &Attributes<'_>, shape: &mut AnyShape) {
    match attrs.get("fill") {
        Some("none") => shape.set_fill(Fill::None),
        Some(fill) => shape.set_fill(Fill::Solid(parse_color(fill))),
        None => {}
    }

    let mut stroke = shape.stroke();
    match attrs.get("stroke") {
        Some("none") => stroke.enabled = false,
        Some(color) => {
            stroke.color = parse_color(color);
            stroke.enabled = true;
        }
        None => {}
    }
    if let Some(width) = attrs.get("stroke-width").and_then(parse_number) {
        stroke.width = width.max(0.0);
    }
    shape.set_stroke(stroke);
}

/// Rebuild a bezier from absolute `M`/`C`/`Q`/`L`/`Z` path data.
///
/// Relative commands and arcs are not supported; such paths are skipped.
pub fn path_from_data(data: &str) -> Option<Bezier> {
    let mut tokens = tokenize_path(data).into_iter();
    let mut points = Vec::new();
    let mut closed = false;

    while let Some(token) = tokens.next() {
        let arity = match token {
            PathToken::Command('M') if points.is_empty() => 1,
            PathToken::Command('L') => 1,
            PathToken::Command('Q') => 2,
            PathToken::Command('C') => 3,
            PathToken::Command('Z' | 'z') => {
                closed = true;
                continue;
            }
            _ => return None,
        };
        for _ in 0..arity {
            let (Some(PathToken::Number(x)), Some(PathToken::Number(y))) =
                (tokens.next(), tokens.next())
            else {
                return None;
            };
            points.push(Pos2::new(x, y));
        }
    }

    if points.len() < 2 {
        return None;
    }
    let mut bezier = Bezier::from_points(points);
    bezier.set_closed(closed);
    Some(bezier)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PathToken {
    Command(char),
    Number(f32),
}

fn tokenize_path(data: &str) -> Vec<PathToken> {
    let mut tokens = Vec::new();
    let mut number = String::new();

    let flush = |number: &mut String, tokens: &mut Vec<PathToken>| {
        if let Ok(value) = number.parse() {
            tokens.push(PathToken::Number(value));
        }
        number.clear();
    };

    for c in data.chars() {
        if c.is_ascii_alphabetic() && c != 'e' && c != 'E' {
            flush(&mut number, &mut tokens);
            tokens.push(PathToken::Command(c));
        } else if c == '-' && !number.is_empty() && !number.ends_with(['e', 'E']) {
            flush(&mut number, &mut tokens);
            number.push(c);
        } else if c.is_whitespace() || c == ',' {
            flush(&mut number, &mut tokens);
        } else {
            number.push(c);
        }
    }
    flush(&mut number, &mut tokens);
    tokens
}

pub(crate) fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Color32;

    #[test]
    fn test_attribute_names_do_not_bleed() {
        // A naive substring search for `x="` would find `rx="` first
        let attrs = Attributes::parse(r#" rx="4" x="10" stroke-width="3" width="20""#);
        assert_eq!(attrs.number("x"), 10.0);
        assert_eq!(attrs.number("rx"), 4.0);
        assert_eq!(attrs.number("width"), 20.0);
        assert_eq!(attrs.number("stroke-width"), 3.0);
        assert_eq!(attrs.number("missing"), 0.0);
    }

    #[test]
    fn test_style_attribute_is_folded_in() {
        let attrs = Attributes::parse(r#"fill="red" style="fill: blue; stroke: green""#);
        assert_eq!(attrs.get("fill"), Some("red"));
        assert_eq!(attrs.get("stroke"), Some("green"));
    }

    #[test]
    fn test_elements_in_document_order() {
        let svg = r#"<?xml version="1.0"?><!-- <rect/> --><svg width="10" height="10"><g><line x1="1"/><rect x="2"/></g></svg>"#;
        let names: Vec<_> = elements(svg).iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["svg", "g", "line", "rect"]);
    }

    #[test]
    fn test_circle_becomes_ellipse_box() {
        let found = elements(r##"<circle cx="50" cy="40" r="10" fill="#ff0000"/>"##);
        let shape = shape_from_element(&found[0]).unwrap();
        assert_eq!(shape.position(), Pos2::new(40.0, 30.0));
        assert_eq!(shape.size(), Vec2::new(20.0, 20.0));
        assert_eq!(shape.fill(), Fill::Solid(Color32::from_rgb(255, 0, 0)));
    }

    #[test]
    fn test_path_data() {
        let bezier = path_from_data("M 0 0 C 10 0 10 10 0 10 L -5,5 Z").unwrap();
        assert_eq!(bezier.point_count(), 5);
        assert_eq!(bezier.point(4), Some(Pos2::new(-5.0, 5.0)));
        assert!(bezier.is_closed());

        assert!(path_from_data("m 0 0 l 10 10").is_none());
        assert!(path_from_data("M 0 0").is_none());
    }

    #[test]
    fn test_number_units() {
        assert_eq!(parse_number("800px"), Some(800.0));
        assert_eq!(parse_number("-2.5"), Some(-2.5));
        assert_eq!(parse_number("abc"), None);
    }
}
