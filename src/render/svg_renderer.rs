use std::fmt::Write as _;

use crate::core::primitives::format_svg_number;
use crate::error::{ChartError, ChartResult};
use crate::render::{NodeId, NodeKind, Renderer, Scene, SceneNode};

/// Serializes a [`Scene`] into a standalone SVG document.
///
/// Hidden nodes are skipped together with their subtree.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
    frames: u64,
}

impl SvgRenderer {
    /// SVG text of the last rendered frame.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, scene: &Scene) -> ChartResult<()> {
        scene.validate()?;
        let mut out = String::with_capacity(4096);
        write_node(scene, scene.root(), true, &mut out)
            .map_err(|e| ChartError::InvalidData(format!("failed to write svg: {e}")))?;
        self.document = out;
        self.frames += 1;
        Ok(())
    }
}

/// Renders the scene to an SVG string without keeping renderer state.
pub fn scene_to_svg(scene: &Scene) -> ChartResult<String> {
    let mut renderer = SvgRenderer::default();
    renderer.render(scene)?;
    Ok(renderer.into_document())
}

fn write_node(scene: &Scene, id: NodeId, is_root: bool, out: &mut String) -> std::fmt::Result {
    let Some(node) = scene.get(id) else {
        return Ok(());
    };
    if !node.visible {
        return Ok(());
    }
    let n = format_svg_number;

    match &node.kind {
        NodeKind::Group => {
            write!(out, "<g")?;
            write_common(node, out)?;
            out.push('>');
            write_children(scene, node, out)?;
            out.push_str("</g>");
        }
        NodeKind::Canvas(canvas) => {
            out.push_str("<svg");
            if is_root {
                out.push_str(" xmlns=\"http://www.w3.org/2000/svg\"");
            } else {
                write!(out, " x=\"{}\" y=\"{}\"", n(canvas.x), n(canvas.y))?;
            }
            write!(
                out,
                " width=\"{}\" height=\"{}\" viewBox=\"{} {} {} {}\"",
                n(canvas.width),
                n(canvas.height),
                n(canvas.view_box.x),
                n(canvas.view_box.y),
                n(canvas.view_box.width),
                n(canvas.view_box.height)
            )?;
            if canvas.stretch {
                out.push_str(" preserveAspectRatio=\"none\"");
            }
            write_common(node, out)?;
            out.push('>');
            write_children(scene, node, out)?;
            out.push_str("</svg>");
        }
        NodeKind::Path(path) => {
            write!(
                out,
                "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" vector-effect=\"non-scaling-stroke\"",
                path.data,
                path.color.to_css(),
                n(path.stroke_width)
            )?;
            write_common(node, out)?;
            out.push_str("/>");
        }
        NodeKind::Line(line) => {
            write!(
                out,
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\"",
                n(line.x1),
                n(line.y1),
                n(line.x2),
                n(line.y2),
                line.color.to_css(),
                n(line.stroke_width)
            )?;
            write_common(node, out)?;
            out.push_str("/>");
        }
        NodeKind::Text(text) => {
            write!(
                out,
                "<text x=\"{}\" y=\"{}\" font-size=\"{}\" fill=\"{}\" text-anchor=\"{}\"",
                n(text.x),
                n(text.y),
                n(text.font_size_px),
                text.color.to_css(),
                text.h_align.svg_anchor()
            )?;
            write_common(node, out)?;
            out.push('>');
            out.push_str(&escape_text(&text.text));
            out.push_str("</text>");
        }
        NodeKind::Rect(rect) => {
            write!(
                out,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"",
                n(rect.x),
                n(rect.y),
                n(rect.width),
                n(rect.height),
                rect.fill.to_css()
            )?;
            write_common(node, out)?;
            out.push_str("/>");
        }
        NodeKind::Circle(circle) => {
            write!(
                out,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"",
                n(circle.cx),
                n(circle.cy),
                n(circle.radius),
                circle.fill.to_css()
            )?;
            write_common(node, out)?;
            out.push_str("/>");
        }
    }
    Ok(())
}

fn write_children(scene: &Scene, node: &SceneNode, out: &mut String) -> std::fmt::Result {
    for child in &node.children {
        write_node(scene, *child, false, out)?;
    }
    Ok(())
}

fn write_common(node: &SceneNode, out: &mut String) -> std::fmt::Result {
    if !node.class.is_empty() {
        write!(out, " class=\"{}\"", escape_text(&node.class))?;
    }
    if node.opacity < 1.0 {
        write!(out, " opacity=\"{}\"", format_svg_number(node.opacity))?;
    }
    if node.offset_x != 0.0 || node.offset_y != 0.0 {
        write!(
            out,
            " transform=\"translate({} {})\"",
            format_svg_number(node.offset_x),
            format_svg_number(node.offset_y)
        )?;
    }
    Ok(())
}

fn escape_text(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
