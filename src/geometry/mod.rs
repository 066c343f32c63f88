//! Pure geometric core: vectors, rigid transforms, and local frames

pub mod error;
pub mod frame;
pub mod transform;
pub mod vector;

pub use error::{GeometryError, GeometryResult};
pub use frame::{AxisConvention, FrameBuilder, LocalFrame};
pub use transform::{compose_chain, extract_tip_world_position, RigidTransform};
