use common::config::SvgConfig;
use nalgebra::Vector2;
use svg::{
    node::element::{Group, Line, Rectangle},
    Document,
};

use crate::section::CrossSection;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgOptions {
    /// Line width, in model units.
    pub stroke_width: f64,
    /// Empty space around the drawing, in model units.
    pub padding: f64,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            stroke_width: 0.1,
            padding: 1.0,
        }
    }
}

impl From<&SvgConfig> for SvgOptions {
    fn from(config: &SvgConfig) -> Self {
        Self {
            stroke_width: config.stroke_width,
            padding: config.padding,
        }
    }
}

/// Draws every segment of the cross-section as a line in the plane's 2D
/// coordinate system. The Y axis is flipped so +Y points up, like a plot.
pub fn render(section: &CrossSection, options: &SvgOptions) -> Document {
    let lines = flipped_lines(section);
    let (min, max) = bounds(&lines);
    let size = (max - min).add_scalar(2.0 * options.padding).map(|x| x.max(1e-3));

    Document::new()
        .set(
            "viewBox",
            (min.x - options.padding, min.y - options.padding, size.x, size.y),
        )
        .add(draw_lines(&lines, Vector2::zeros(), options))
}

/// Lays out several cross-sections (usually a stack of layers) on a square
/// grid, each in its own outlined cell. All cells share the same size so the
/// layers can be compared.
pub fn render_layers(sections: &[CrossSection], options: &SvgOptions) -> Document {
    let layers = sections.iter().map(flipped_lines).collect::<Vec<_>>();
    let (min, max) = bounds(&layers.concat());
    let cell = (max - min).add_scalar(2.0 * options.padding).map(|x| x.max(1e-3));

    let sides = sections.len().isqrt() + 1;
    let mut document = Document::new().set(
        "viewBox",
        (0.0, 0.0, cell.x * sides as f64, cell.y * sides as f64),
    );

    for (idx, lines) in layers.iter().enumerate() {
        let (x, y) = (idx % sides, idx / sides);
        let offset = Vector2::new(x as f64 * cell.x, y as f64 * cell.y);

        document = document
            .add(
                Rectangle::new()
                    .set("x", offset.x)
                    .set("y", offset.y)
                    .set("width", cell.x)
                    .set("height", cell.y)
                    .set("fill", "none")
                    .set("stroke", "gray")
                    .set("stroke-width", options.stroke_width),
            )
            .add(draw_lines(
                lines,
                offset - min.add_scalar(-options.padding),
                options,
            ));
    }

    document
}

fn flipped_lines(section: &CrossSection) -> Vec<[Vector2<f64>; 2]> {
    section
        .project_2d()
        .into_iter()
        .map(|x| x.map(|p| Vector2::new(p.x, -p.y)))
        .collect()
}

fn draw_lines(lines: &[[Vector2<f64>; 2]], offset: Vector2<f64>, options: &SvgOptions) -> Group {
    lines.iter().fold(
        Group::new()
            .set("stroke", "black")
            .set("stroke-width", options.stroke_width)
            .set("stroke-linecap", "round"),
        |group, [a, b]| {
            let (a, b) = (a + offset, b + offset);
            group.add(
                Line::new()
                    .set("x1", a.x)
                    .set("y1", a.y)
                    .set("x2", b.x)
                    .set("y2", b.y),
            )
        },
    )
}

fn bounds(lines: &[[Vector2<f64>; 2]]) -> (Vector2<f64>, Vector2<f64>) {
    let mut points = lines.iter().flatten();
    let Some(&first) = points.next() else {
        return (Vector2::zeros(), Vector2::zeros());
    };

    points.fold((first, first), |(min, max), p| (min.inf(p), max.sup(p)))
}
