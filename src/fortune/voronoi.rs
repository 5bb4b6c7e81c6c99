//! Sweep-line construction of the Voronoi diagram
//!
//! Fortune's algorithm: a horizontal sweep line moves from the top of the
//! bounding box to the bottom, maintaining the beach line of parabolic arcs
//! and a priority queue of site and circle events. Site events split an arc
//! and start two half-edges along the bisector; circle events remove an arc,
//! fix a diagram vertex and merge the two surviving half-edges into one.
//! Edges still unfinished when the queue drains are clipped to the box.

use glam::DVec2;

use super::beach_line::{parabola_y, BeachLine, NodeId};
use super::event::{EventKind, EventQueue};
use crate::cell::{CellBuilder, VoronoiCell};
use crate::error::{Result, VoronoiError};
use crate::geometry::{approx_eq, Edge, HalfEdge, Rect, EPSILON};

/// Index of a cell in the diagram, shared with the beach line
pub(crate) type CellId = usize;

/// A planar Voronoi diagram clipped to a bounding rectangle
#[derive(Debug, Clone)]
pub struct Voronoi {
    bounds: Rect,
    cells: Vec<VoronoiCell>,
    edges: Vec<Edge>,
}

impl Voronoi {
    /// Build the diagram of the given sites.
    ///
    /// Sites are deduplicated with the global epsilon before the sweep, so
    /// coincident inputs collapse into a single cell.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if no site remains after deduplication or a site
    /// lies outside the bounds; `InvariantViolation` if the beach line is
    /// corrupted, which indicates a bug rather than bad input.
    pub fn build(sites: &[DVec2], bounds: Rect) -> Result<Voronoi> {
        let mut sweep = Sweep::new(sites, bounds)?;
        sweep.run()?;
        sweep.finish()
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn cells(&self) -> &[VoronoiCell] {
        &self.cells
    }

    /// All bounded edges of the diagram, including the clipped remains of
    /// edges that were still open when the sweep finished. An edge shared by
    /// two cells appears once.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Centroid of every cell, in cell order. The input to one round of
    /// Lloyd relaxation.
    pub fn centroids(&self) -> Vec<DVec2> {
        self.cells.iter().map(|c| c.centroid).collect()
    }

    pub fn into_parts(self) -> (Vec<VoronoiCell>, Vec<Edge>) {
        (self.cells, self.edges)
    }
}

/// Orientation of the triangle (a, b, c): positive for counterclockwise,
/// negative for clockwise, zero within epsilon of collinear.
fn ccw(a: DVec2, b: DVec2, c: DVec2) -> i32 {
    let det =
        b.x * c.y + a.x * b.y + a.y * c.x - b.x * a.y - c.x * b.y - c.y * a.x;
    if det.abs() < EPSILON {
        0
    } else if det > 0.0 {
        1
    } else {
        -1
    }
}

/// Transient sweep state, consumed by `finish`
struct Sweep {
    bounds: Rect,
    queue: EventQueue,
    beach: BeachLine,
    builders: Vec<CellBuilder>,
    edges: Vec<Edge>,
    sweep_y: f64,
}

impl Sweep {
    fn new(sites: &[DVec2], bounds: Rect) -> Result<Self> {
        // top to bottom, left to right; the event-queue order
        let mut sorted = sites.to_vec();
        sorted.sort_by(|a, b| b.y.total_cmp(&a.y).then_with(|| a.x.total_cmp(&b.x)));

        // collapse epsilon-duplicates; a duplicate can sort several places
        // back with sites of intervening x in the same y band between the
        // two copies, so scan the whole band, not just the previous entry
        let mut unique: Vec<DVec2> = Vec::with_capacity(sorted.len());
        for &site in &sorted {
            let duplicate = unique
                .iter()
                .rev()
                .take_while(|p| p.y - site.y <= EPSILON)
                .any(|&p| approx_eq(p, site));
            if !duplicate {
                unique.push(site);
            }
        }

        if unique.is_empty() {
            return Err(VoronoiError::InvalidConfig(
                "at least one site is required".to_string(),
            ));
        }
        for &site in &unique {
            if !bounds.contains(site) {
                return Err(VoronoiError::InvalidConfig(format!(
                    "site {:?} lies outside the bounds {:?}",
                    site, bounds
                )));
            }
        }

        let mut queue = EventQueue::new();
        for (cell, &site) in unique.iter().enumerate() {
            queue.push_site(site, cell);
        }

        Ok(Self {
            bounds,
            queue,
            beach: BeachLine::new(bounds),
            builders: unique.into_iter().map(CellBuilder::new).collect(),
            sweep_y: bounds.top(),
            edges: Vec::new(),
        })
    }

    fn run(&mut self) -> Result<()> {
        while let Some(event) = self.queue.pop() {
            self.sweep_y = event.point.y;
            match event.kind {
                EventKind::Site { cell } => self.handle_site(event.point, cell)?,
                EventKind::Circle { arc, .. } => self.handle_circle(event.point, arc)?,
            }
        }
        Ok(())
    }

    /// Grow a new arc around the site that just crossed the sweep line.
    fn handle_site(&mut self, site: DVec2, cell: CellId) -> Result<()> {
        if self.beach.is_empty() {
            self.beach.insert_root(cell, site);
            return Ok(());
        }

        let arc = self.beach.arc_above(site, self.sweep_y);
        self.cancel_event(arc);

        let (left, right) = self.beach.split(arc, cell, site)?;
        self.check_circle_event(left);
        self.check_circle_event(right);
        Ok(())
    }

    /// The arc `gamma` shrank to nothing: its two breakpoints met at a
    /// diagram vertex.
    fn handle_circle(&mut self, point: DVec2, gamma: NodeId) -> Result<()> {
        let (Some(lbp), Some(rbp)) = (
            self.beach.left_break_point(gamma),
            self.beach.right_break_point(gamma),
        ) else {
            return Err(VoronoiError::InvariantViolation(format!(
                "circle event fired for boundary arc {}",
                gamma
            )));
        };
        let pred = self.beach.left_arc(lbp);
        let succ = self.beach.right_arc(rbp);

        // their triples change with gamma gone, so any pending collapse
        // prediction is stale
        self.cancel_event(pred);
        self.cancel_event(succ);

        // vertex of the diagram: the circumcenter, recovered by lifting the
        // event point back onto the collapsing arc; an arc whose site sits
        // on the sweep line has no parabola to lift onto, but its bounding
        // breakpoints still meet exactly at the vertex
        let site = self.beach.arc_site(gamma);
        let center = if (site.y - self.sweep_y).abs() < EPSILON {
            self.beach
                .half_edge(lbp)
                .intersect_half_edge(self.beach.half_edge(rbp))
                .ok_or_else(|| {
                    VoronoiError::InvariantViolation(format!(
                        "breakpoints bounding collapsing arc {} do not meet",
                        gamma
                    ))
                })?
        } else {
            DVec2::new(point.x, parabola_y(site, point.x, self.sweep_y))
        };

        let left_head = self.beach.half_edge(lbp).head;
        let right_head = self.beach.half_edge(rbp).head;
        let (ll, lr) = self.beach.break_point_cells(lbp);
        let (rl, rr) = self.beach.break_point_cells(rbp);
        self.emit_clipped(left_head, center, ll, lr)?;
        self.emit_clipped(right_head, center, rl, rr)?;

        // one breakpoint disappears with gamma; the higher one survives and
        // continues as the bisector of the now-adjacent neighbors
        let higher = self.beach.determine_higher(gamma, lbp, rbp)?;
        let d = self.beach.arc_site(succ) - self.beach.arc_site(pred);
        let merged = HalfEdge::new(center, DVec2::new(d.y, -d.x))?;
        let (pred_cell, succ_cell) = (self.beach.arc_cell(pred), self.beach.arc_cell(succ));
        self.beach.restart_break_point(higher, merged, pred_cell, succ_cell);

        self.beach.remove(gamma);

        self.check_circle_event(pred);
        self.check_circle_event(succ);
        Ok(())
    }

    fn cancel_event(&mut self, arc: NodeId) {
        if let Some(id) = self.beach.arc_event(arc) {
            self.queue.remove(id);
            self.beach.set_arc_event(arc, None);
        }
    }

    /// Predict whether the arc will be squeezed out by its neighbors, and if
    /// so queue the circle event for the moment the sweep line becomes
    /// tangent to the circumcircle.
    fn check_circle_event(&mut self, arc: NodeId) {
        let (Some(lbp), Some(rbp)) = (
            self.beach.left_break_point(arc),
            self.beach.right_break_point(arc),
        ) else {
            return;
        };

        let a = self.beach.arc_site(self.beach.left_arc(lbp));
        let b = self.beach.arc_site(arc);
        let c = self.beach.arc_site(self.beach.right_arc(rbp));

        // same outer site on both flanks: the breakpoints diverge
        if approx_eq(a, c) {
            return;
        }
        // counterclockwise triples open up instead of collapsing; collinear
        // triples fall through and fail the intersection test below
        if ccw(a, b, c) > 0 {
            return;
        }

        let Some(center) = self
            .beach
            .half_edge(lbp)
            .intersect_half_edge(self.beach.half_edge(rbp))
        else {
            return;
        };

        // the event fires when the sweep line reaches the bottom of the
        // circumcircle; skip it if that moment has already passed
        let radius = b.distance(center);
        if center.y - radius > self.sweep_y {
            return;
        }

        let id = self
            .queue
            .push_circle(DVec2::new(center.x, center.y - radius), arc);
        self.beach.set_arc_event(arc, Some(id));
    }

    /// Clip a finished edge to the box and hand it to both bordering cells.
    /// Fully outside edges and sub-epsilon stubs are dropped.
    fn emit_clipped(
        &mut self,
        head: DVec2,
        tail: DVec2,
        left: CellId,
        right: CellId,
    ) -> Result<()> {
        let head_in = self.bounds.contains(head);
        let tail_in = self.bounds.contains(tail);

        let edge = if head_in && tail_in {
            Some(Edge::new(head, tail))
        } else if !head_in && !tail_in {
            None
        } else {
            let (inside, outside) = if head_in { (head, tail) } else { (tail, head) };
            if approx_eq(inside, outside) {
                None
            } else {
                let ray = HalfEdge::new(inside, outside - inside)?;
                ray.intersect_rect(&self.bounds)
                    .first()
                    .map(|&p| Edge::new(inside, p))
            }
        };

        if let Some(edge) = edge {
            if edge.length >= EPSILON {
                self.edges.push(edge);
                self.builders[left].add_edge(edge);
                self.builders[right].add_edge(edge);
            }
        }
        Ok(())
    }

    /// Clip the edges still open on the beach line, assign each box corner
    /// to its nearest site and freeze every cell.
    fn finish(mut self) -> Result<Voronoi> {
        for (left, right, edge) in self.beach.end_edges() {
            self.edges.push(edge);
            self.builders[left].add_edge(edge);
            self.builders[right].add_edge(edge);
        }

        for corner in self.bounds.corners() {
            let mut owner = 0;
            let mut best = f64::INFINITY;
            for (i, builder) in self.builders.iter().enumerate() {
                let d = builder.site().distance_squared(corner);
                if d < best {
                    best = d;
                    owner = i;
                }
            }
            self.builders[owner].add_corner(corner);
        }

        Ok(Voronoi {
            bounds: self.bounds,
            cells: self.builders.into_iter().map(CellBuilder::finalize).collect(),
            edges: self.edges,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn unit_box() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 100.0)
    }

    fn has_edge(edges: &[Edge], a: DVec2, b: DVec2) -> bool {
        edges.iter().any(|e| {
            (approx_eq(e.a, a) && approx_eq(e.b, b)) || (approx_eq(e.a, b) && approx_eq(e.b, a))
        })
    }

    #[test]
    fn test_single_site_owns_the_box() {
        let v = Voronoi::build(&[DVec2::new(50.0, 50.0)], unit_box()).unwrap();

        assert_eq!(v.cells().len(), 1);
        assert!(v.edges().is_empty());

        let cell = &v.cells()[0];
        assert_eq!(cell.vertices.len(), 4);
        assert!((cell.area - 10_000.0).abs() < 1e-6);
        assert!(approx_eq(cell.centroid, DVec2::new(50.0, 50.0)));
    }

    #[test]
    fn test_two_sites_side_by_side() {
        let sites = [DVec2::new(25.0, 50.0), DVec2::new(75.0, 50.0)];
        let v = Voronoi::build(&sites, unit_box()).unwrap();

        assert_eq!(v.edges().len(), 1);
        assert!(has_edge(
            v.edges(),
            DVec2::new(50.0, 100.0),
            DVec2::new(50.0, 0.0)
        ));
        for cell in v.cells() {
            assert!((cell.area - 5000.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_two_sites_stacked() {
        let sites = [DVec2::new(50.0, 25.0), DVec2::new(50.0, 75.0)];
        let v = Voronoi::build(&sites, unit_box()).unwrap();

        // the horizontal bisector comes out as two half segments meeting at
        // the shared start point
        assert_eq!(v.edges().len(), 2);
        assert!(has_edge(
            v.edges(),
            DVec2::new(50.0, 50.0),
            DVec2::new(0.0, 50.0)
        ));
        assert!(has_edge(
            v.edges(),
            DVec2::new(50.0, 50.0),
            DVec2::new(100.0, 50.0)
        ));
        for cell in v.cells() {
            assert!((cell.area - 5000.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_three_sites_meet_at_circumcenter() {
        let sites = [
            DVec2::new(30.0, 70.0),
            DVec2::new(70.0, 70.0),
            DVec2::new(50.0, 30.0),
        ];
        let v = Voronoi::build(&sites, unit_box()).unwrap();

        assert_eq!(v.cells().len(), 3);
        assert_eq!(v.edges().len(), 3);

        // all three edges radiate from the circumcenter of the sites
        let center = DVec2::new(50.0, 55.0);
        assert!(has_edge(v.edges(), DVec2::new(50.0, 100.0), center));
        assert!(has_edge(v.edges(), center, DVec2::new(0.0, 30.0)));
        assert!(has_edge(v.edges(), center, DVec2::new(100.0, 30.0)));

        assert!((v.cells()[0].area - 2875.0).abs() < 1e-6);
        assert!((v.cells()[1].area - 2875.0).abs() < 1e-6);
        assert!((v.cells()[2].area - 4250.0).abs() < 1e-6);
    }

    #[test]
    fn test_collinear_sites_make_parallel_strips() {
        let sites = [
            DVec2::new(10.0, 50.0),
            DVec2::new(50.0, 50.0),
            DVec2::new(90.0, 50.0),
        ];
        let v = Voronoi::build(&sites, unit_box()).unwrap();

        assert_eq!(v.edges().len(), 2);
        assert!(has_edge(
            v.edges(),
            DVec2::new(30.0, 100.0),
            DVec2::new(30.0, 0.0)
        ));
        assert!(has_edge(
            v.edges(),
            DVec2::new(70.0, 100.0),
            DVec2::new(70.0, 0.0)
        ));

        let areas: Vec<f64> = v.cells().iter().map(|c| c.area).collect();
        assert!((areas[0] - 3000.0).abs() < 1e-6);
        assert!((areas[1] - 4000.0).abs() < 1e-6);
        assert!((areas[2] - 3000.0).abs() < 1e-6);
    }

    #[test]
    fn test_duplicate_sites_collapse() {
        let sites = [
            DVec2::new(25.0, 50.0),
            DVec2::new(75.0, 50.0),
            DVec2::new(25.0, 50.0),
            DVec2::new(25.0 + 1e-7, 50.0),
        ];
        let v = Voronoi::build(&sites, unit_box()).unwrap();
        assert_eq!(v.cells().len(), 2);
    }

    #[test]
    fn test_duplicates_split_by_intervening_site_still_collapse() {
        // the two copies share an epsilon-wide y band with a third site
        // whose x sorts it between them
        let sites = [
            DVec2::new(10.0, 50.000001),
            DVec2::new(90.0, 50.0000005),
            DVec2::new(10.000001, 50.0),
        ];
        let v = Voronoi::build(&sites, unit_box()).unwrap();
        assert_eq!(v.cells().len(), 2);
    }

    #[test]
    fn test_degenerate_vertex_is_the_breakpoint_meeting_point() {
        // a collapsing arc whose own site lies on the sweep line has no
        // parabola to lift the event point onto; the emitted vertex must
        // still be where its two breakpoints meet, not the event point
        let bounds = unit_box();
        let sites = [
            DVec2::new(30.0, 70.0),
            DVec2::new(70.0, 70.0),
            DVec2::new(50.0, 30.0),
        ];

        let mut beach = BeachLine::new(bounds);
        beach.insert_root(0, sites[0]);
        let root_arc = beach.arc_above(sites[1], 70.0);
        beach.split(root_arc, 1, sites[1]).unwrap();
        let above = beach.arc_above(sites[2], 30.0);
        let (left_copy, _) = beach.split(above, 2, sites[2]).unwrap();
        beach.remove(left_copy);

        let root_bp = beach.root().unwrap();
        let gamma = beach.right_arc(root_bp);
        assert_eq!(beach.arc_cell(gamma), 2);

        let mut sweep = Sweep {
            bounds,
            queue: EventQueue::new(),
            beach,
            builders: sites.iter().map(|&s| CellBuilder::new(s)).collect(),
            edges: Vec::new(),
            sweep_y: 30.0,
        };
        sweep.handle_circle(DVec2::new(50.0, 30.0), gamma).unwrap();

        assert!(has_edge(
            &sweep.edges,
            DVec2::new(50.0, 100.0),
            DVec2::new(50.0, 55.0)
        ));
    }

    #[test]
    fn test_no_sites_rejected() {
        let err = Voronoi::build(&[], unit_box()).unwrap_err();
        assert!(matches!(err, VoronoiError::InvalidConfig(_)));
    }

    #[test]
    fn test_site_outside_bounds_rejected() {
        let err = Voronoi::build(&[DVec2::new(150.0, 50.0)], unit_box()).unwrap_err();
        assert!(matches!(err, VoronoiError::InvalidConfig(_)));
    }

    #[test]
    fn test_near_cocircular_sites_tile_the_box() {
        // four sites a hair off a common circle
        let sites = [
            DVec2::new(30.0, 30.0),
            DVec2::new(70.0, 30.0),
            DVec2::new(70.0, 70.0),
            DVec2::new(30.01, 70.02),
        ];
        let v = Voronoi::build(&sites, unit_box()).unwrap();

        assert_eq!(v.cells().len(), 4);
        let total: f64 = v.cells().iter().map(|c| c.area).sum();
        assert!((total - 10_000.0).abs() < 1.0);
    }

    #[test]
    fn test_random_sites_tile_the_box() {
        let bounds = unit_box();
        let mut rng = ChaCha8Rng::seed_from_u64(1234);
        let sites: Vec<DVec2> = (0..50).map(|_| bounds.sample(&mut rng)).collect();

        let v = Voronoi::build(&sites, bounds).unwrap();
        assert_eq!(v.cells().len(), 50);

        let total: f64 = v.cells().iter().map(|c| c.area).sum();
        assert!(
            (total - bounds.area()).abs() < 1.0,
            "cell areas sum to {} for a box of {}",
            total,
            bounds.area()
        );

        // each bisector contributes at most a few clipped pieces
        assert!(v.edges().len() <= 3 * sites.len());

        for cell in v.cells() {
            assert!(!cell.vertices.is_empty());
            assert!(bounds.contains(cell.centroid));
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let bounds = unit_box();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let sites: Vec<DVec2> = (0..20).map(|_| bounds.sample(&mut rng)).collect();

        let a = Voronoi::build(&sites, bounds).unwrap();
        let b = Voronoi::build(&sites, bounds).unwrap();

        assert_eq!(a.edges().len(), b.edges().len());
        for (ea, eb) in a.edges().iter().zip(b.edges()) {
            assert_eq!(ea.a, eb.a);
            assert_eq!(ea.b, eb.b);
        }
        for (ca, cb) in a.cells().iter().zip(b.cells()) {
            assert_eq!(ca.area, cb.area);
            assert_eq!(ca.centroid, cb.centroid);
        }
    }

    #[test]
    fn test_centroids_follow_cells() {
        let sites = [DVec2::new(25.0, 50.0), DVec2::new(75.0, 50.0)];
        let v = Voronoi::build(&sites, unit_box()).unwrap();

        let centroids = v.centroids();
        assert_eq!(centroids.len(), 2);
        assert!(approx_eq(centroids[0], DVec2::new(25.0, 50.0)));
        assert!(approx_eq(centroids[1], DVec2::new(75.0, 50.0)));
    }
}
