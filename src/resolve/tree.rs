use crate::foundation::core::PixelRect;
use serde::{Deserialize, Serialize};

/// One node of a UI-tree snapshot taken from the host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UiNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// The node's own visibility flag.
    #[serde(default = "yes")]
    pub visible: bool,
    /// Effective visibility: the node and all of its ancestors are visible and attached.
    #[serde(default = "yes")]
    pub shown: bool,
    /// Bounding rectangle in root coordinates.
    pub bounds: PixelRect,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<UiNode>,
}

fn yes() -> bool {
    true
}

impl UiNode {
    /// Visible, shown leaf with the given bounds.
    pub fn new(bounds: PixelRect) -> Self {
        Self {
            tag: None,
            id: None,
            visible: true,
            shown: true,
            bounds,
            children: Vec::new(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_children(mut self, children: Vec<UiNode>) -> Self {
        self.children = children;
        self
    }

    /// Mark the node hidden (own flag and effective flag).
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self.shown = false;
        self
    }

    /// Depth-first pre-order walk starting at `self`; children in sibling order.
    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }
}

/// Iterator returned by [`UiNode::pre_order`].
pub struct PreOrder<'a> {
    stack: Vec<&'a UiNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a UiNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
