//! Fortune's sweep-line algorithm
//!
//! The sweep is split across three pieces: the event queue ordering site and
//! circle events ([`event`]), the beach line of parabolic arcs ([`beach_line`])
//! and the driver that turns events into diagram edges and cells
//! ([`voronoi`]).

mod beach_line;
mod event;
mod voronoi;

pub use voronoi::Voronoi;
