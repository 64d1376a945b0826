use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::ViewBox;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, LinePrimitive, PathPrimitive, RectPrimitive, TextPrimitive,
};

/// Handle to a node in a [`Scene`]. Handles are never reused after removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u32);

/// Nested drawing surface with its own view box, stretched to `width x height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasNode {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub view_box: ViewBox,
    /// Stretch non-uniformly instead of letterboxing.
    pub stretch: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    Group,
    Canvas(CanvasNode),
    Path(PathPrimitive),
    Line(LinePrimitive),
    Text(TextPrimitive),
    Rect(RectPrimitive),
    Circle(CirclePrimitive),
}

/// One element of the scene graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub kind: NodeKind,
    pub class: String,
    pub visible: bool,
    pub opacity: f64,
    /// Vertical translation applied on top of the node geometry.
    pub offset_y: f64,
    /// Horizontal translation applied on top of the node geometry.
    pub offset_x: f64,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl SceneNode {
    fn new(kind: NodeKind, class: &str, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            class: class.to_owned(),
            visible: true,
            opacity: 1.0,
            offset_y: 0.0,
            offset_x: 0.0,
            parent,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.class.split_whitespace().any(|item| item == class)
    }
}

/// Retained vector scene mutated imperatively by the chart.
///
/// The root is a canvas sized to the host container. Removing a node removes
/// its whole subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    nodes: Vec<Option<SceneNode>>,
    root: NodeId,
    live: usize,
}

impl Scene {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        let root = SceneNode::new(
            NodeKind::Canvas(CanvasNode {
                x: 0.0,
                y: 0.0,
                width,
                height,
                view_box: ViewBox::new(0.0, 0.0, width, height),
                stretch: false,
            }),
            "c-plot",
            None,
        );
        Self {
            nodes: vec![Some(root)],
            root: NodeId(0),
            live: 1,
        }
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0 as usize).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: NodeId) -> ChartResult<&mut SceneNode> {
        self.nodes
            .get_mut(id.0 as usize)
            .and_then(Option::as_mut)
            .ok_or_else(|| missing_node(id))
    }

    /// Appends a node as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, kind: NodeKind, class: &str) -> ChartResult<NodeId> {
        if !self.contains(parent) {
            return Err(missing_node(parent));
        }
        let id = NodeId(u32::try_from(self.nodes.len()).map_err(|_| {
            ChartError::InvalidData("scene node capacity exhausted".to_owned())
        })?);
        self.nodes.push(Some(SceneNode::new(kind, class, Some(parent))));
        self.get_mut(parent)?.children.push(id);
        self.live += 1;
        trace!(node = id.0, parent = parent.0, class, "scene append");
        Ok(id)
    }

    /// Removes `id` and its subtree. Removing the root or a missing node is a no-op.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if id == self.root {
            return false;
        }
        let Some(node) = self.nodes.get_mut(id.0 as usize).and_then(Option::take) else {
            return false;
        };
        self.live -= 1;
        if let Some(parent) = node.parent.and_then(|parent| {
            self.nodes
                .get_mut(parent.0 as usize)
                .and_then(Option::as_mut)
        }) {
            parent.children.retain(|child| *child != id);
        }
        for child in node.children {
            self.remove_detached(child);
        }
        true
    }

    fn remove_detached(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(id.0 as usize).and_then(Option::take) {
            self.live -= 1;
            for child in node.children {
                self.remove_detached(child);
            }
        }
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |node| node.children.as_slice())
    }

    /// Live nodes carrying `class`, in document order.
    #[must_use]
    pub fn find_by_class(&self, class: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.walk(self.root, &mut |id, node| {
            if node.has_class(class) {
                found.push(id);
            }
        });
        found
    }

    /// Depth-first, document-order traversal.
    pub fn walk(&self, from: NodeId, visit: &mut impl FnMut(NodeId, &SceneNode)) {
        if let Some(node) = self.get(from) {
            visit(from, node);
            for child in &node.children {
                self.walk(*child, visit);
            }
        }
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> ChartResult<()> {
        self.get_mut(id)?.visible = visible;
        Ok(())
    }

    pub fn set_opacity(&mut self, id: NodeId, opacity: f64) -> ChartResult<()> {
        self.get_mut(id)?.opacity = opacity.clamp(0.0, 1.0);
        Ok(())
    }

    pub fn set_offset(&mut self, id: NodeId, offset_x: f64, offset_y: f64) -> ChartResult<()> {
        let node = self.get_mut(id)?;
        node.offset_x = offset_x;
        node.offset_y = offset_y;
        Ok(())
    }

    /// Adds or removes a single class token.
    pub fn toggle_class(&mut self, id: NodeId, class: &str, enabled: bool) -> ChartResult<()> {
        let node = self.get_mut(id)?;
        let mut tokens: Vec<&str> = node
            .class
            .split_whitespace()
            .filter(|token| *token != class)
            .collect();
        if enabled {
            tokens.push(class);
        }
        node.class = tokens.join(" ");
        Ok(())
    }

    pub fn set_kind(&mut self, id: NodeId, kind: NodeKind) -> ChartResult<()> {
        self.get_mut(id)?.kind = kind;
        Ok(())
    }

    pub fn set_view_box(&mut self, id: NodeId, view_box: ViewBox) -> ChartResult<()> {
        match &mut self.get_mut(id)?.kind {
            NodeKind::Canvas(canvas) => {
                canvas.view_box = view_box;
                Ok(())
            }
            _ => Err(wrong_kind(id, "canvas")),
        }
    }

    pub fn set_path_data(&mut self, id: NodeId, data: String) -> ChartResult<()> {
        match &mut self.get_mut(id)?.kind {
            NodeKind::Path(path) => {
                path.data = data;
                Ok(())
            }
            _ => Err(wrong_kind(id, "path")),
        }
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> ChartResult<()> {
        match &mut self.get_mut(id)?.kind {
            NodeKind::Text(label) => {
                label.text = text.into();
                Ok(())
            }
            _ => Err(wrong_kind(id, "text")),
        }
    }

    pub fn set_circle_radius(&mut self, id: NodeId, radius: f64) -> ChartResult<()> {
        match &mut self.get_mut(id)?.kind {
            NodeKind::Circle(circle) => {
                circle.radius = radius;
                Ok(())
            }
            _ => Err(wrong_kind(id, "circle")),
        }
    }

    #[must_use]
    pub fn view_box(&self, id: NodeId) -> Option<ViewBox> {
        match self.get(id).map(|node| &node.kind) {
            Some(NodeKind::Canvas(canvas)) => Some(canvas.view_box),
            _ => None,
        }
    }

    /// Checks every live primitive for renderable geometry.
    pub fn validate(&self) -> ChartResult<()> {
        let mut result = Ok(());
        self.walk(self.root, &mut |_, node| {
            if result.is_err() {
                return;
            }
            result = match &node.kind {
                NodeKind::Group => Ok(()),
                NodeKind::Canvas(canvas) => {
                    if canvas.width.is_finite()
                        && canvas.height.is_finite()
                        && canvas.width >= 0.0
                        && canvas.height >= 0.0
                    {
                        Ok(())
                    } else {
                        Err(ChartError::InvalidViewport {
                            width: canvas.width,
                            height: canvas.height,
                        })
                    }
                }
                NodeKind::Path(path) => path.validate(),
                NodeKind::Line(line) => line.validate(),
                NodeKind::Text(text) => text.validate(),
                NodeKind::Rect(rect) => rect.validate(),
                NodeKind::Circle(circle) => circle.validate(),
            };
        });
        result
    }
}

fn missing_node(id: NodeId) -> ChartError {
    ChartError::InvalidData(format!("scene node {} does not exist", id.0))
}

fn wrong_kind(id: NodeId, expected: &str) -> ChartError {
    ChartError::InvalidData(format!("scene node {} is not a {expected}", id.0))
}

#[cfg(test)]
mod tests {
    use super::{NodeKind, Scene};

    #[test]
    fn removing_a_group_drops_its_subtree() {
        let mut scene = Scene::new(100.0, 100.0);
        let group = scene
            .append(scene.root(), NodeKind::Group, "ticks")
            .expect("append group");
        let child = scene
            .append(group, NodeKind::Group, "tick")
            .expect("append child");

        assert_eq!(scene.len(), 3);
        assert!(scene.remove(group));
        assert!(!scene.contains(child));
        assert_eq!(scene.len(), 1);
        assert!(scene.children(scene.root()).is_empty());
    }

    #[test]
    fn toggle_class_adds_and_removes_single_token() {
        let mut scene = Scene::new(10.0, 10.0);
        let node = scene
            .append(scene.root(), NodeKind::Group, "c-line")
            .expect("append");

        scene.toggle_class(node, "c-opaque", true).expect("add");
        assert!(scene.get(node).expect("node").has_class("c-opaque"));
        scene.toggle_class(node, "c-opaque", false).expect("remove");
        assert_eq!(scene.get(node).expect("node").class, "c-line");
    }
}
