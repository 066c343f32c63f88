//! Stateful tracking layer: tools, the distance monitor, and the
//! event-driven session

pub mod monitor;
pub mod session;
pub mod tool;

pub use monitor::{DistanceMonitor, DistanceSource};
pub use session::{
    CallbackHandle, GuidanceError, GuidanceResult, GuidanceSession, SampleCallback,
};
pub use tool::TrackedTool;
