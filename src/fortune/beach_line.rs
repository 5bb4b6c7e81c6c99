//! The beach line: a binary tree of parabolic arcs and breakpoints
//!
//! Leaves are arcs (one parabola fragment per cell), internal nodes are
//! breakpoints (the meeting point of two adjacent arcs, tracing a bisector
//! as the sweep advances). Nodes live in an arena and reference each other
//! by index, so split/remove rewiring is plain index reassignment.
//!
//! The tree performs no rebalancing on `split`/`remove`; adversarial insert
//! orders (e.g. sites sorted by x) can degrade `arc_above` to O(n).

use glam::DVec2;

use super::event::EventId;
use super::voronoi::CellId;
use crate::error::{Result, VoronoiError};
use crate::geometry::{Edge, HalfEdge, Rect, EPSILON};

/// Index of a node in the beach line arena
pub(crate) type NodeId = usize;

#[derive(Debug)]
enum NodeKind {
    /// Leaf: a parabola fragment owned by one cell. Holds at most one live
    /// circle event at a time.
    Arc {
        cell: CellId,
        site: DVec2,
        event: Option<EventId>,
    },
    /// Internal node: separates two adjacent cells and owns the in-progress
    /// half-edge tracing their bisector.
    BreakPoint {
        left: NodeId,
        right: NodeId,
        left_cell: CellId,
        right_cell: CellId,
        half_edge: HalfEdge,
    },
}

#[derive(Debug)]
struct Node {
    parent: Option<NodeId>,
    kind: NodeKind,
}

/// Evaluate the parabola with focus `site` and directrix `sweep_y` at `x`.
///
/// Callers must ensure the focus is strictly above the sweep line.
pub(crate) fn parabola_y(site: DVec2, x: f64, sweep_y: f64) -> f64 {
    let dp = 2.0 * (site.y - sweep_y);
    let a = 1.0 / dp;
    let b = -2.0 * site.x / dp;
    let c = (site.x * site.x + site.y * site.y - sweep_y * sweep_y) / dp;
    a * x * x + b * x + c
}

/// The sweep's status structure
pub(crate) struct BeachLine {
    nodes: Vec<Node>,
    root: Option<NodeId>,
    bounds: Rect,
}

impl BeachLine {
    pub fn new(bounds: Rect) -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            bounds,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    #[cfg(test)]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Seed the beach line with its first arc.
    pub fn insert_root(&mut self, cell: CellId, site: DVec2) {
        let id = self.alloc(Node {
            parent: None,
            kind: NodeKind::Arc {
                cell,
                site,
                event: None,
            },
        });
        self.root = Some(id);
    }

    pub fn arc_cell(&self, arc: NodeId) -> CellId {
        match self.nodes[arc].kind {
            NodeKind::Arc { cell, .. } => cell,
            _ => unreachable!("node {} is not an arc", arc),
        }
    }

    pub fn arc_site(&self, arc: NodeId) -> DVec2 {
        match self.nodes[arc].kind {
            NodeKind::Arc { site, .. } => site,
            _ => unreachable!("node {} is not an arc", arc),
        }
    }

    pub fn arc_event(&self, arc: NodeId) -> Option<EventId> {
        match self.nodes[arc].kind {
            NodeKind::Arc { event, .. } => event,
            _ => unreachable!("node {} is not an arc", arc),
        }
    }

    pub fn set_arc_event(&mut self, arc: NodeId, new_event: Option<EventId>) {
        match &mut self.nodes[arc].kind {
            NodeKind::Arc { event, .. } => *event = new_event,
            _ => unreachable!("node {} is not an arc", arc),
        }
    }

    pub fn break_point_cells(&self, bp: NodeId) -> (CellId, CellId) {
        match self.nodes[bp].kind {
            NodeKind::BreakPoint {
                left_cell,
                right_cell,
                ..
            } => (left_cell, right_cell),
            _ => unreachable!("node {} is not a breakpoint", bp),
        }
    }

    pub fn half_edge(&self, bp: NodeId) -> &HalfEdge {
        match &self.nodes[bp].kind {
            NodeKind::BreakPoint { half_edge, .. } => half_edge,
            _ => unreachable!("node {} is not a breakpoint", bp),
        }
    }

    /// Re-point a breakpoint at a fresh bisector: used when a collapsing
    /// arc's surviving breakpoint takes over the merged edge.
    pub fn restart_break_point(
        &mut self,
        bp: NodeId,
        edge: HalfEdge,
        new_left_cell: CellId,
        new_right_cell: CellId,
    ) {
        match &mut self.nodes[bp].kind {
            NodeKind::BreakPoint {
                half_edge,
                left_cell,
                right_cell,
                ..
            } => {
                *half_edge = edge;
                *left_cell = new_left_cell;
                *right_cell = new_right_cell;
            }
            _ => unreachable!("node {} is not a breakpoint", bp),
        }
    }

    fn children(&self, bp: NodeId) -> (NodeId, NodeId) {
        match self.nodes[bp].kind {
            NodeKind::BreakPoint { left, right, .. } => (left, right),
            _ => unreachable!("node {} is not a breakpoint", bp),
        }
    }

    /// Find the arc vertically above the given point.
    ///
    /// Descends from the root comparing the query x against each
    /// breakpoint's current x at the sweep line.
    pub fn arc_above(&self, p: DVec2, sweep_y: f64) -> NodeId {
        let mut node = self.root.expect("arc_above on empty beach line");
        while let NodeKind::BreakPoint { left, right, .. } = self.nodes[node].kind {
            let x = self.break_point_x(node, sweep_y);
            node = if x > p.x { left } else { right };
        }
        node
    }

    /// Current x-coordinate of a breakpoint: the intersection of the two
    /// confocal parabolas of its adjacent arcs at the given sweep line.
    ///
    /// Sites lying exactly on the sweep line have a degenerate (vertical
    /// ray) parabola and are handled as explicit special cases.
    fn break_point_x(&self, bp: NodeId, sweep_y: f64) -> f64 {
        let l = self.arc_site(self.left_arc(bp));
        let r = self.arc_site(self.right_arc(bp));

        let ly = l.y - sweep_y;
        let ry = r.y - sweep_y;
        if ly.abs() < EPSILON && ry.abs() < EPSILON {
            return (l.x + r.x) / 2.0;
        }
        if ly.abs() < EPSILON {
            return l.x;
        }
        if ry.abs() < EPSILON {
            return r.x;
        }

        let dp1 = 2.0 * ly;
        let a1 = 1.0 / dp1;
        let b1 = -2.0 * l.x / dp1;
        let c1 = (l.x * l.x + l.y * l.y - sweep_y * sweep_y) / dp1;

        let dp2 = 2.0 * ry;
        let a2 = 1.0 / dp2;
        let b2 = -2.0 * r.x / dp2;
        let c2 = (r.x * r.x + r.y * r.y - sweep_y * sweep_y) / dp2;

        let a = a2 - a1;
        let b = b2 - b1;
        let c = c2 - c1;

        // equal focus heights: the parabolas meet exactly once
        if (l.y - r.y).abs() < EPSILON {
            return -c / b;
        }

        let disc = (b * b - 4.0 * a * c).max(0.0);
        let x1 = (-b + disc.sqrt()) / (2.0 * a);
        let x2 = (-b - disc.sqrt()) / (2.0 * a);

        if l.y > r.y {
            x1.min(x2)
        } else {
            x1.max(x2)
        }
    }

    /// Split an arc around a newly arrived site.
    ///
    /// Replaces the leaf with a three-leaf subtree (old, new, old) joined by
    /// two breakpoints that trace the two halves of the bisector between the
    /// old and new site. Returns the outer pair of leaves, the candidates
    /// for fresh circle events.
    ///
    /// If the split arc's site lies on the sweep line (tie in sweep
    /// coordinate) the bisector is a vertical ray and the leaf is replaced
    /// by a two-leaf subtree under a single breakpoint instead.
    pub fn split(
        &mut self,
        arc: NodeId,
        new_cell: CellId,
        new_site: DVec2,
    ) -> Result<(NodeId, NodeId)> {
        let old_cell = self.arc_cell(arc);
        let old_site = self.arc_site(arc);

        if (old_site.y - new_site.y).abs() < EPSILON {
            return self.split_degenerate(arc, old_cell, old_site, new_cell, new_site);
        }

        // The new breakpoints start where the new site's vertical projection
        // meets the old arc, heading perpendicular to the site-to-site vector.
        let start = DVec2::new(
            new_site.x,
            parabola_y(old_site, new_site.x, new_site.y),
        );
        let d = new_site - old_site;
        let el = HalfEdge::new(start, DVec2::new(d.y, -d.x))?;
        let er = HalfEdge::new(start, DVec2::new(-d.y, d.x))?;

        let left_leaf = self.alloc(Node {
            parent: None,
            kind: NodeKind::Arc {
                cell: old_cell,
                site: old_site,
                event: None,
            },
        });
        let mid_leaf = self.alloc(Node {
            parent: None,
            kind: NodeKind::Arc {
                cell: new_cell,
                site: new_site,
                event: None,
            },
        });
        let right_leaf = self.alloc(Node {
            parent: None,
            kind: NodeKind::Arc {
                cell: old_cell,
                site: old_site,
                event: None,
            },
        });

        let inner = self.alloc(Node {
            parent: None,
            kind: NodeKind::BreakPoint {
                left: mid_leaf,
                right: right_leaf,
                left_cell: new_cell,
                right_cell: old_cell,
                half_edge: er,
            },
        });
        let outer = self.alloc(Node {
            parent: None,
            kind: NodeKind::BreakPoint {
                left: left_leaf,
                right: inner,
                left_cell: old_cell,
                right_cell: new_cell,
                half_edge: el,
            },
        });

        self.nodes[left_leaf].parent = Some(outer);
        self.nodes[inner].parent = Some(outer);
        self.nodes[mid_leaf].parent = Some(inner);
        self.nodes[right_leaf].parent = Some(inner);

        self.replace(arc, outer);
        Ok((left_leaf, right_leaf))
    }

    /// Tie-in-sweep-coordinate split: old and new site share the sweep y,
    /// their bisector is the vertical line through the midpoint, growing
    /// downward from the top of the box.
    fn split_degenerate(
        &mut self,
        arc: NodeId,
        old_cell: CellId,
        old_site: DVec2,
        new_cell: CellId,
        new_site: DVec2,
    ) -> Result<(NodeId, NodeId)> {
        let mid_x = (old_site.x + new_site.x) / 2.0;
        let head = DVec2::new(mid_x, self.bounds.top());
        let half_edge = HalfEdge::new(head, DVec2::new(0.0, -1.0))?;

        let (left_spec, right_spec) = if new_site.x < old_site.x {
            ((new_cell, new_site), (old_cell, old_site))
        } else {
            ((old_cell, old_site), (new_cell, new_site))
        };

        let left_leaf = self.alloc(Node {
            parent: None,
            kind: NodeKind::Arc {
                cell: left_spec.0,
                site: left_spec.1,
                event: None,
            },
        });
        let right_leaf = self.alloc(Node {
            parent: None,
            kind: NodeKind::Arc {
                cell: right_spec.0,
                site: right_spec.1,
                event: None,
            },
        });
        let bp = self.alloc(Node {
            parent: None,
            kind: NodeKind::BreakPoint {
                left: left_leaf,
                right: right_leaf,
                left_cell: left_spec.0,
                right_cell: right_spec.0,
                half_edge,
            },
        });
        self.nodes[left_leaf].parent = Some(bp);
        self.nodes[right_leaf].parent = Some(bp);

        self.replace(arc, bp);
        Ok((left_leaf, right_leaf))
    }

    /// Swap `old` for `new` in old's parent (or at the root).
    fn replace(&mut self, old: NodeId, new: NodeId) {
        match self.nodes[old].parent {
            None => {
                self.root = Some(new);
                self.nodes[new].parent = None;
            }
            Some(parent) => {
                match &mut self.nodes[parent].kind {
                    NodeKind::BreakPoint { left, right, .. } => {
                        if *left == old {
                            *left = new;
                        } else if *right == old {
                            *right = new;
                        }
                    }
                    _ => unreachable!("parent {} is not a breakpoint", parent),
                }
                self.nodes[new].parent = Some(parent);
            }
        }
    }

    /// Unlink a collapsing arc and its immediate parent breakpoint,
    /// reconnecting the grandparent to the arc's sibling.
    pub fn remove(&mut self, arc: NodeId) {
        let Some(parent) = self.nodes[arc].parent else {
            // removing the last arc clears the tree
            self.root = None;
            return;
        };

        let (left, right) = self.children(parent);
        let sibling = if left == arc { right } else { left };
        self.replace(parent, sibling);
        self.nodes[arc].parent = None;
    }

    /// Nearest breakpoint bounding the arc on the left: the first ancestor
    /// reached from its right subtree.
    pub fn left_break_point(&self, arc: NodeId) -> Option<NodeId> {
        let mut last = arc;
        let mut parent = self.nodes[arc].parent?;
        loop {
            let (left, _) = self.children(parent);
            if left != last {
                return Some(parent);
            }
            last = parent;
            parent = self.nodes[parent].parent?;
        }
    }

    /// Nearest breakpoint bounding the arc on the right.
    pub fn right_break_point(&self, arc: NodeId) -> Option<NodeId> {
        let mut last = arc;
        let mut parent = self.nodes[arc].parent?;
        loop {
            let (_, right) = self.children(parent);
            if right != last {
                return Some(parent);
            }
            last = parent;
            parent = self.nodes[parent].parent?;
        }
    }

    /// Rightmost arc of a breakpoint's left subtree.
    pub fn left_arc(&self, bp: NodeId) -> NodeId {
        let (mut node, _) = self.children(bp);
        while let NodeKind::BreakPoint { right, .. } = self.nodes[node].kind {
            node = right;
        }
        node
    }

    /// Leftmost arc of a breakpoint's right subtree.
    pub fn right_arc(&self, bp: NodeId) -> NodeId {
        let (_, mut node) = self.children(bp);
        while let NodeKind::BreakPoint { left, .. } = self.nodes[node].kind {
            node = left;
        }
        node
    }

    /// Of the two breakpoints bounding a collapsing arc, return the one
    /// higher in the tree (the one that survives the merge).
    ///
    /// # Errors
    ///
    /// `InvariantViolation` if neither breakpoint is an ancestor of the arc;
    /// both must be by construction.
    pub fn determine_higher(&self, arc: NodeId, bp1: NodeId, bp2: NodeId) -> Result<NodeId> {
        let mut higher = None;
        let mut node = arc;
        while let Some(parent) = self.nodes[node].parent {
            node = parent;
            if node == bp1 {
                higher = Some(bp1);
            }
            if node == bp2 {
                higher = Some(bp2);
            }
        }
        higher.ok_or_else(|| {
            VoronoiError::InvariantViolation(format!(
                "neither breakpoint {} nor {} is an ancestor of arc {}",
                bp1, bp2, arc
            ))
        })
    }

    /// Finalize every breakpoint still on the beach line by clipping its
    /// half-edge to the bounding box.
    ///
    /// Returns the clipped edges together with the pair of cells each one
    /// separates. Heads outside the box and sub-epsilon stubs are dropped.
    pub fn end_edges(&self) -> Vec<(CellId, CellId, Edge)> {
        let mut edges = Vec::new();
        if let Some(root) = self.root {
            self.end_edges_below(root, &mut edges);
        }
        edges
    }

    fn end_edges_below(&self, node: NodeId, edges: &mut Vec<(CellId, CellId, Edge)>) {
        let NodeKind::BreakPoint {
            left,
            right,
            left_cell,
            right_cell,
            ref half_edge,
        } = self.nodes[node].kind
        else {
            return;
        };

        let points = half_edge.intersect_rect(&self.bounds);
        if let Some(&tail) = points.first() {
            if self.bounds.contains(half_edge.head) {
                let edge = Edge::new(half_edge.head, tail);
                if edge.length >= EPSILON {
                    edges.push((left_cell, right_cell, edge));
                }
            }
        }

        self.end_edges_below(left, edges);
        self.end_edges_below(right, edges);
    }

    /// In-order arc sequence, for inspecting the structure in tests.
    #[cfg(test)]
    fn arcs_in_order(&self) -> Vec<NodeId> {
        fn walk(bl: &BeachLine, node: NodeId, out: &mut Vec<NodeId>) {
            match bl.nodes[node].kind {
                NodeKind::Arc { .. } => out.push(node),
                NodeKind::BreakPoint { left, right, .. } => {
                    walk(bl, left, out);
                    walk(bl, right, out);
                }
            }
        }
        let mut out = Vec::new();
        if let Some(root) = self.root {
            walk(self, root, &mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::approx_eq;

    fn test_bounds() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 100.0)
    }

    #[test]
    fn test_parabola_y_apex() {
        // Focus (50, 75), directrix y = 25: apex at (50, 50)
        let y = parabola_y(DVec2::new(50.0, 75.0), 50.0, 25.0);
        assert!((y - 50.0).abs() < EPSILON);
    }

    #[test]
    fn test_split_produces_three_arcs() {
        let mut bl = BeachLine::new(test_bounds());
        bl.insert_root(0, DVec2::new(50.0, 80.0));
        let root_arc = bl.arc_above(DVec2::new(30.0, 40.0), 40.0);

        let (left, right) = bl.split(root_arc, 1, DVec2::new(30.0, 40.0)).unwrap();

        let arcs = bl.arcs_in_order();
        assert_eq!(arcs.len(), 3);
        assert_eq!(arcs[0], left);
        assert_eq!(arcs[2], right);
        assert_eq!(bl.arc_cell(arcs[0]), 0);
        assert_eq!(bl.arc_cell(arcs[1]), 1);
        assert_eq!(bl.arc_cell(arcs[2]), 0);
    }

    #[test]
    fn test_split_on_sweep_line_tie() {
        let mut bl = BeachLine::new(test_bounds());
        bl.insert_root(0, DVec2::new(25.0, 50.0));
        let root_arc = bl.arc_above(DVec2::new(75.0, 50.0), 50.0);

        let (left, right) = bl.split(root_arc, 1, DVec2::new(75.0, 50.0)).unwrap();

        let arcs = bl.arcs_in_order();
        assert_eq!(arcs, vec![left, right]);
        assert_eq!(bl.arc_cell(left), 0);
        assert_eq!(bl.arc_cell(right), 1);

        // the bisector is a vertical ray at the midpoint, from the box top
        let root = bl.root().unwrap();
        let he = bl.half_edge(root);
        assert!(approx_eq(he.head, DVec2::new(50.0, 100.0)));
        assert!(he.direction.y < 0.0);
    }

    #[test]
    fn test_arc_above_branches_on_breakpoint() {
        let mut bl = BeachLine::new(test_bounds());
        bl.insert_root(0, DVec2::new(25.0, 50.0));
        let root_arc = bl.arc_above(DVec2::new(75.0, 50.0), 50.0);
        bl.split(root_arc, 1, DVec2::new(75.0, 50.0)).unwrap();

        // breakpoint sits at x = 50: queries left of it find cell 0
        let below = bl.arc_above(DVec2::new(10.0, 20.0), 20.0);
        assert_eq!(bl.arc_cell(below), 0);
        let below = bl.arc_above(DVec2::new(90.0, 20.0), 20.0);
        assert_eq!(bl.arc_cell(below), 1);
    }

    #[test]
    fn test_neighbor_walks() {
        let mut bl = BeachLine::new(test_bounds());
        bl.insert_root(0, DVec2::new(50.0, 80.0));
        let root_arc = bl.arc_above(DVec2::new(30.0, 40.0), 40.0);
        let (left, right) = bl.split(root_arc, 1, DVec2::new(30.0, 40.0)).unwrap();

        let arcs = bl.arcs_in_order();
        let mid = arcs[1];

        let lbp = bl.left_break_point(mid).unwrap();
        let rbp = bl.right_break_point(mid).unwrap();
        assert_eq!(bl.left_arc(lbp), left);
        assert_eq!(bl.right_arc(rbp), right);

        // outer leaves have no bounding breakpoint on their outer side
        assert!(bl.left_break_point(left).is_none());
        assert!(bl.right_break_point(right).is_none());
    }

    #[test]
    fn test_determine_higher_prefers_upper_ancestor() {
        let mut bl = BeachLine::new(test_bounds());
        bl.insert_root(0, DVec2::new(50.0, 80.0));
        let root_arc = bl.arc_above(DVec2::new(30.0, 40.0), 40.0);
        bl.split(root_arc, 1, DVec2::new(30.0, 40.0)).unwrap();

        let arcs = bl.arcs_in_order();
        let mid = arcs[1];
        let lbp = bl.left_break_point(mid).unwrap();
        let rbp = bl.right_break_point(mid).unwrap();

        let higher = bl.determine_higher(mid, lbp, rbp).unwrap();
        assert_eq!(higher, bl.root().unwrap());
    }

    #[test]
    fn test_determine_higher_rejects_non_ancestors() {
        let mut bl = BeachLine::new(test_bounds());
        bl.insert_root(0, DVec2::new(50.0, 80.0));
        let root_arc = bl.arc_above(DVec2::new(30.0, 40.0), 40.0);
        let (left, _) = bl.split(root_arc, 1, DVec2::new(30.0, 40.0)).unwrap();

        // a leaf is never an ancestor
        assert!(bl.determine_higher(left, left, left).is_err());
    }

    #[test]
    fn test_remove_rewires_grandparent() {
        let mut bl = BeachLine::new(test_bounds());
        bl.insert_root(0, DVec2::new(50.0, 80.0));
        let root_arc = bl.arc_above(DVec2::new(30.0, 40.0), 40.0);
        bl.split(root_arc, 1, DVec2::new(30.0, 40.0)).unwrap();

        let arcs = bl.arcs_in_order();
        bl.remove(arcs[1]);

        let remaining = bl.arcs_in_order();
        assert_eq!(remaining.len(), 2);
        assert_eq!(remaining[0], arcs[0]);
        assert_eq!(remaining[1], arcs[2]);
    }

    #[test]
    fn test_remove_root_arc_clears_tree() {
        let mut bl = BeachLine::new(test_bounds());
        bl.insert_root(0, DVec2::new(50.0, 80.0));
        let root = bl.root().unwrap();
        bl.remove(root);
        assert!(bl.is_empty());
    }

    #[test]
    fn test_end_edges_clips_vertical_bisector() {
        let mut bl = BeachLine::new(test_bounds());
        bl.insert_root(0, DVec2::new(25.0, 50.0));
        let root_arc = bl.arc_above(DVec2::new(75.0, 50.0), 50.0);
        bl.split(root_arc, 1, DVec2::new(75.0, 50.0)).unwrap();

        let edges = bl.end_edges();
        assert_eq!(edges.len(), 1);
        let (lc, rc, edge) = &edges[0];
        assert_eq!((*lc, *rc), (0, 1));
        assert!(approx_eq(edge.a, DVec2::new(50.0, 100.0)));
        assert!(approx_eq(edge.b, DVec2::new(50.0, 0.0)));
    }
}
