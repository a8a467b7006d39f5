//! Globe geometry and overlay: lat/lon projection onto the sphere, the shared
//! rotation frame, and the per-marker visual state machine.

pub mod frame;
pub mod marker;
pub mod projection;
