//! Cairo-based rendering of the source image and annotations.

use super::annotation::{Annotation, Shape};
use super::color::Color;
use super::raster::SourceImage;
use super::style::RenderStyle;
use crate::geometry::{CanvasSize, Point};
use crate::util;

/// Performs a full repaint of the canvas.
///
/// Always clears and redraws everything, in this order:
/// 1. clear the canvas
/// 2. draw the source image scaled to `size`
/// 3. paint every committed annotation in list order
/// 4. paint the in-progress annotation on top, if any
///
/// # Arguments
/// * `ctx` - Cairo drawing context targeting a surface of `size`
/// * `image` - Decoded source image (`None` paints annotations on a transparent canvas)
/// * `size` - Canvas dimensions the image is scaled to
/// * `annotations` - Committed annotations in paint order
/// * `in_progress` - Annotation currently being drawn
/// * `style` - Arrowhead and text parameters
pub fn render_scene(
    ctx: &cairo::Context,
    image: Option<&SourceImage>,
    size: CanvasSize,
    annotations: &[Annotation],
    in_progress: Option<&Annotation>,
    style: &RenderStyle,
) {
    clear(ctx);

    if let Some(image) = image {
        render_image(ctx, image, size);
    }

    render_annotations(ctx, annotations, style);

    if let Some(annotation) = in_progress {
        render_annotation(ctx, annotation, style);
    }
}

/// Clears the whole target surface to transparent.
pub fn clear(ctx: &cairo::Context) {
    let _ = ctx.save();
    ctx.set_operator(cairo::Operator::Clear);
    let _ = ctx.paint();
    let _ = ctx.restore();
}

/// Draws the source image stretched to the canvas dimensions.
pub fn render_image(ctx: &cairo::Context, image: &SourceImage, size: CanvasSize) {
    if size.is_empty() || image.width() == 0 || image.height() == 0 {
        return;
    }

    let _ = ctx.save();
    ctx.scale(
        size.width as f64 / image.width() as f64,
        size.height as f64 / image.height() as f64,
    );
    if ctx.set_source_surface(image.surface(), 0.0, 0.0).is_ok() {
        let _ = ctx.paint();
    }
    let _ = ctx.restore();
}

/// Renders all annotations in order (first = bottom layer).
pub fn render_annotations(ctx: &cairo::Context, annotations: &[Annotation], style: &RenderStyle) {
    for annotation in annotations {
        render_annotation(ctx, annotation, style);
    }
}

/// Renders a single annotation, dispatching on its shape.
pub fn render_annotation(ctx: &cairo::Context, annotation: &Annotation, style: &RenderStyle) {
    let color = annotation.color;
    let width = annotation.line_width as f64;

    match &annotation.shape {
        Shape::Freehand { points } => render_freehand(ctx, points, color, width),
        Shape::Rectangle { start, end } => render_rectangle(ctx, *start, *end, color, width),
        Shape::Circle { center, edge } => {
            render_circle(ctx, *center, center.distance_to(*edge), color, width)
        }
        Shape::Arrow { start, end } => render_arrow(
            ctx,
            *start,
            *end,
            color,
            width,
            style.arrow_head_length(annotation.line_width),
            style.arrow_head_angle,
        ),
        Shape::Text { anchor, text } => render_text(
            ctx,
            *anchor,
            text,
            color,
            style.text_size(annotation.line_width),
            style,
        ),
    }
}

fn set_stroke(ctx: &cairo::Context, color: Color, width: f64) {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(width);
}

/// Render freehand stroke (polyline through points)
///
/// Fewer than two points cannot form a visible stroke and are skipped.
pub fn render_freehand(ctx: &cairo::Context, points: &[Point], color: Color, width: f64) {
    let [first, rest @ ..] = points else {
        return;
    };
    if rest.is_empty() {
        return;
    }

    set_stroke(ctx, color, width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(first.x, first.y);
    for point in rest {
        ctx.line_to(point.x, point.y);
    }

    let _ = ctx.stroke();
}

/// Render a rectangle outline between two opposite corners
fn render_rectangle(ctx: &cairo::Context, start: Point, end: Point, color: Color, width: f64) {
    set_stroke(ctx, color, width);
    ctx.set_line_join(cairo::LineJoin::Miter);

    // Normalize so dragging up-left of the start is equivalent
    let x = start.x.min(end.x);
    let y = start.y.min(end.y);
    let w = (end.x - start.x).abs();
    let h = (end.y - start.y).abs();

    ctx.rectangle(x, y, w, h);
    let _ = ctx.stroke();
}

/// Render a circle outline
fn render_circle(ctx: &cairo::Context, center: Point, radius: f64, color: Color, width: f64) {
    if radius <= 0.0 {
        return;
    }

    set_stroke(ctx, color, width);
    ctx.new_path();
    ctx.arc(center.x, center.y, radius, 0.0, 2.0 * std::f64::consts::PI);
    let _ = ctx.stroke();
}

/// Render an arrow (shaft with a V-shaped head at `end`)
fn render_arrow(
    ctx: &cairo::Context,
    start: Point,
    end: Point,
    color: Color,
    width: f64,
    head_length: f64,
    head_angle: f64,
) {
    set_stroke(ctx, color, width);
    ctx.set_line_cap(cairo::LineCap::Round);

    ctx.move_to(start.x, start.y);
    ctx.line_to(end.x, end.y);
    let _ = ctx.stroke();

    let [left, right] = util::calculate_arrowhead(end, start, head_length, head_angle);

    ctx.move_to(end.x, end.y);
    ctx.line_to(left.x, left.y);
    let _ = ctx.stroke();

    ctx.move_to(end.x, end.y);
    ctx.line_to(right.x, right.y);
    let _ = ctx.stroke();
}

/// Renders filled text whose first baseline starts at `anchor`.
///
/// Uses Pango so multi-line strings and installed font families work; the
/// font size is given in device pixels.
pub fn render_text(
    ctx: &cairo::Context,
    anchor: Point,
    text: &str,
    color: Color,
    size: f64,
    style: &RenderStyle,
) {
    if text.is_empty() {
        return;
    }

    let _ = ctx.save();

    let layout = pangocairo::functions::create_layout(ctx);
    let font_desc = style.font.to_pango_description(size);
    layout.set_font_description(Some(&font_desc));
    layout.set_text(text);

    // Pango positions layouts by their top-left corner, so lift by the baseline
    let baseline = layout.baseline() as f64 / pango::SCALE as f64;
    ctx.move_to(anchor.x, anchor.y - baseline);

    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    pangocairo::functions::show_layout(ctx, &layout);

    let _ = ctx.restore();
}
