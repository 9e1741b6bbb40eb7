mod is_valid;
mod locate_edge;
mod locate_face;
mod locate_vertex;

pub use is_valid::{component_count, IsValid};
pub use locate_edge::LocateEdge;
pub use locate_face::LocateFace;
pub use locate_vertex::LocateVertex;

pub(crate) use locate_edge::nearest_edge;
pub(crate) use locate_face::containing_face;
pub(crate) use locate_vertex::nearest_vertex;
