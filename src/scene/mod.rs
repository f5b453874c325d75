//! Retained scene graph: an arena of group and shape nodes.
//!
//! Nodes form a strict ownership tree. Parents own their children through
//! per-node child lists; handles (`NodeId`) are stable for the lifetime of a
//! node. Bounding boxes are computed on demand from current geometry, never
//! cached across mutations.

pub mod bbox;
pub mod shape;

pub use bbox::{BBox, union_all};
pub use shape::{Geometry, Shape};

use smallvec::SmallVec;

/// Stable handle to a node owned by a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
enum NodeKind {
    Group,
    Shape(Shape),
}

#[derive(Debug)]
struct NodeSlot {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
    translation: (f64, f64),
}

impl NodeSlot {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: SmallVec::new(),
            translation: (0.0, 0.0),
        }
    }
}

/// Node arena with a single root group.
///
/// Operations on stale handles are silent no-ops, matching the chart core's
/// "nothing to do" error posture.
#[derive(Debug)]
pub struct Scene {
    nodes: Vec<Option<NodeSlot>>,
    free: Vec<usize>,
    root: NodeId,
}

const NO_CHILDREN: &[NodeId] = &[];

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        let root_slot = NodeSlot::new(NodeKind::Group);
        Self {
            nodes: vec![Some(root_slot)],
            free: Vec::new(),
            root: NodeId(0),
        }
    }

    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.get(id.0).is_some_and(Option::is_some)
    }

    /// Number of live nodes, including the root group.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    fn slot(&self, id: NodeId) -> Option<&NodeSlot> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn slot_mut(&mut self, id: NodeId) -> Option<&mut NodeSlot> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let slot = NodeSlot::new(kind);
        if let Some(index) = self.free.pop() {
            self.nodes[index] = Some(slot);
            NodeId(index)
        } else {
            self.nodes.push(Some(slot));
            NodeId(self.nodes.len() - 1)
        }
    }

    /// Creates a detached group node.
    pub fn create_group(&mut self) -> NodeId {
        self.alloc(NodeKind::Group)
    }

    /// Creates a detached shape node.
    pub fn create_shape(&mut self, shape: Shape) -> NodeId {
        self.alloc(NodeKind::Shape(shape))
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slot(id).and_then(|slot| slot.parent)
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.slot(id).map_or(NO_CHILDREN, |slot| &slot.children)
    }

    #[must_use]
    pub fn translation(&self, id: NodeId) -> (f64, f64) {
        self.slot(id).map_or((0.0, 0.0), |slot| slot.translation)
    }

    pub fn set_translation(&mut self, id: NodeId, x: f64, y: f64) {
        if let Some(slot) = self.slot_mut(id) {
            slot.translation = (x, y);
        }
    }

    #[must_use]
    pub fn shape(&self, id: NodeId) -> Option<&Shape> {
        match self.slot(id)?.kind {
            NodeKind::Shape(ref shape) => Some(shape),
            NodeKind::Group => None,
        }
    }

    #[must_use]
    pub fn shape_mut(&mut self, id: NodeId) -> Option<&mut Shape> {
        match self.slot_mut(id)?.kind {
            NodeKind::Shape(ref mut shape) => Some(shape),
            NodeKind::Group => None,
        }
    }

    /// Whether `node` is `ancestor` or sits somewhere below it.
    fn is_in_subtree(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.slot(child).and_then(|slot| slot.parent) else {
            return;
        };
        if let Some(parent_slot) = self.slot_mut(parent) {
            parent_slot.children.retain(|id| *id != child);
        }
        if let Some(child_slot) = self.slot_mut(child) {
            child_slot.parent = None;
        }
    }

    /// Appends `child` as the last (topmost) child of `parent`.
    ///
    /// A child already attached elsewhere is detached first: every node has
    /// exactly one owner.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        if !self.contains(parent) || !self.contains(child) || self.is_in_subtree(child, parent) {
            return;
        }
        self.detach(child);
        if let Some(parent_slot) = self.slot_mut(parent) {
            parent_slot.children.push(child);
        }
        if let Some(child_slot) = self.slot_mut(child) {
            child_slot.parent = Some(parent);
        }
    }

    /// Inserts `child` under `parent` just before `before`, preserving the
    /// relative paint order of existing children. Falls back to append when
    /// `before` is not a child of `parent`.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, before: NodeId) {
        if !self.contains(parent) || !self.contains(child) || self.is_in_subtree(child, parent) {
            return;
        }
        self.detach(child);
        if let Some(parent_slot) = self.slot_mut(parent) {
            let index = parent_slot.children.iter().position(|id| *id == before);
            match index {
                Some(index) => parent_slot.children.insert(index, child),
                None => parent_slot.children.push(child),
            }
        }
        if let Some(child_slot) = self.slot_mut(child) {
            child_slot.parent = Some(parent);
        }
    }

    /// Detaches `child` from `parent` without destroying it.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if self.parent(child) == Some(parent) {
            self.detach(child);
        }
    }

    /// Detaches `id` and destroys it together with all of its descendants.
    pub fn remove_subtree(&mut self, id: NodeId) {
        if id == self.root || !self.contains(id) {
            return;
        }
        self.detach(id);
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(slot) = self.nodes[current.0].take() {
                stack.extend(slot.children);
                self.free.push(current.0);
            }
        }
    }

    /// Destroys all children of `id`, keeping the node itself.
    ///
    /// Series and the legend use this to rebuild their geometry wholesale on
    /// each layout.
    pub fn clear_children(&mut self, id: NodeId) {
        let children: Vec<NodeId> = self.children(id).to_vec();
        for child in children {
            self.remove_subtree(child);
        }
    }

    /// Bounding box of the subtree rooted at `id`, in the parent's
    /// coordinate space. `None` when nothing measurable is below the node.
    #[must_use]
    pub fn bbox(&self, id: NodeId) -> Option<BBox> {
        let slot = self.slot(id)?;
        let (tx, ty) = slot.translation;
        match slot.kind {
            NodeKind::Shape(ref shape) => Some(shape.geometry.bbox().translated(tx, ty)),
            NodeKind::Group => {
                let combined =
                    union_all(slot.children.iter().filter_map(|child| self.bbox(*child)))?;
                Some(combined.translated(tx, ty))
            }
        }
    }

    /// Topmost shape under the point, searching children in reverse
    /// insertion order so later-attached (visually front) nodes win.
    #[must_use]
    pub fn pick(&self, id: NodeId, x: f64, y: f64) -> Option<NodeId> {
        let slot = self.slot(id)?;
        let (tx, ty) = slot.translation;
        let local_x = x - tx;
        let local_y = y - ty;
        match slot.kind {
            NodeKind::Shape(ref shape) => shape
                .geometry
                .contains_point(local_x, local_y)
                .then_some(id),
            NodeKind::Group => slot
                .children
                .iter()
                .rev()
                .find_map(|child| self.pick(*child, local_x, local_y)),
        }
    }
}
