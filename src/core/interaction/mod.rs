pub mod interaction_type;
pub mod surface_geometry;
pub mod transport;

pub use interaction_type::*;
pub use surface_geometry::*;
pub use transport::*;
