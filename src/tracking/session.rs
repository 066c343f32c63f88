//! Event-driven guidance session
//!
//! The session is the single owner of the monitor, the optional local
//! frame, and the telemetry emitter. The host delivers pose changes
//! keyed by tool name; each delivery synchronously runs one distance
//! update, fires registered sample callbacks, and (while streaming is
//! enabled) emits one feedback datagram. There is no background thread
//! and no buffering: updates are processed in arrival order.
//!
//! The session is `Send`; a multi-threaded host should keep it behind a
//! mutex to preserve the single-writer discipline.

use std::collections::HashMap;
use std::fmt;

use log::{info, warn};

use crate::core::{DistanceSample, GuidePlane, LineSegment, Point3};
use crate::geometry::{FrameBuilder, GeometryError, LocalFrame, RigidTransform};
use crate::telemetry::{TelemetryEmitter, TelemetryTransport, TransportError};
use crate::tracking::DistanceMonitor;
use crate::utils::config::{ConfigError, GuidanceConfig};

/// Callback invoked with every fresh distance sample.
pub type SampleCallback = Box<dyn Fn(&DistanceSample) + Send>;

/// Callback registration handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackHandle(u32);

impl CallbackHandle {
    pub fn id(&self) -> u32 {
        self.0
    }
}

/// Session-level error types
#[derive(Debug, Clone, PartialEq)]
pub enum GuidanceError {
    /// Geometric failure (empty chain, degenerate landmarks)
    Geometry(GeometryError),
    /// Telemetry transport failure
    Transport(TransportError),
    /// Configuration failure
    Config(ConfigError),
    /// A pose update for a tool this session does not monitor
    UnknownTool { name: String },
    /// An unregister for a handle that is not registered
    InvalidCallback { id: u32 },
}

impl From<GeometryError> for GuidanceError {
    fn from(error: GeometryError) -> Self {
        GuidanceError::Geometry(error)
    }
}

impl From<TransportError> for GuidanceError {
    fn from(error: TransportError) -> Self {
        GuidanceError::Transport(error)
    }
}

impl From<ConfigError> for GuidanceError {
    fn from(error: ConfigError) -> Self {
        GuidanceError::Config(error)
    }
}

impl fmt::Display for GuidanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuidanceError::Geometry(error) => write!(f, "{}", error),
            GuidanceError::Transport(error) => write!(f, "{}", error),
            GuidanceError::Config(error) => write!(f, "{}", error),
            GuidanceError::UnknownTool { name } => {
                write!(f, "Unknown tool: {:?}", name)
            }
            GuidanceError::InvalidCallback { id } => {
                write!(f, "Invalid callback handle {}", id)
            }
        }
    }
}

impl std::error::Error for GuidanceError {}

/// Result type for session operations
pub type GuidanceResult<T> = Result<T, GuidanceError>;

/// Owns the full guidance pipeline: pose intake, distance monitoring,
/// local-frame bookkeeping, and feedback emission.
pub struct GuidanceSession {
    config: GuidanceConfig,
    monitor: DistanceMonitor,
    frame_builder: FrameBuilder,
    local_frame: Option<LocalFrame>,
    emitter: TelemetryEmitter,
    armed: bool,
    callback_counter: u32,
    sample_callbacks: HashMap<CallbackHandle, SampleCallback>,
}

impl GuidanceSession {
    /// Assemble a session from its injected parts. Streaming starts
    /// disabled and the session starts disarmed.
    pub fn new(
        config: GuidanceConfig,
        monitor: DistanceMonitor,
        transport: Box<dyn TelemetryTransport>,
    ) -> Self {
        let frame_builder = FrameBuilder::new().with_convention(config.frame.axis_convention);
        let emitter = TelemetryEmitter::new(transport, config.telemetry.clone());
        Self {
            config,
            monitor,
            frame_builder,
            local_frame: None,
            emitter,
            armed: false,
            callback_counter: 0,
            sample_callbacks: HashMap::new(),
        }
    }

    pub fn config(&self) -> &GuidanceConfig {
        &self.config
    }

    pub fn monitor(&self) -> &DistanceMonitor {
        &self.monitor
    }

    pub fn emitter(&self) -> &TelemetryEmitter {
        &self.emitter
    }

    /// Compute and start monitoring.
    ///
    /// Runs an initial distance update and begins processing pose
    /// deliveries. Re-arming a running session is a no-op returning
    /// `Ok(None)`. A failed initial update (for example an empty chain)
    /// leaves the session armed; the error is surfaced and the previous
    /// sample, if any, is retained.
    pub fn arm(&mut self) -> GuidanceResult<Option<DistanceSample>> {
        if self.armed {
            return Ok(None);
        }
        self.armed = true;
        info!(
            "guidance monitoring armed: {} vs {}",
            self.monitor.source_a().name(),
            self.monitor.source_b().name()
        );
        self.run_update().map(Some)
    }

    /// Stop producing samples. Pose deliveries still update tool chains.
    pub fn disarm(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Toggle feedback streaming; returns the previous state.
    pub fn set_streaming(&mut self, enabled: bool) -> bool {
        self.emitter.set_streaming(enabled)
    }

    pub fn is_streaming(&self) -> bool {
        self.emitter.is_streaming()
    }

    /// Register a callback fired on every fresh sample.
    pub fn register_sample_callback(&mut self, callback: SampleCallback) -> CallbackHandle {
        self.callback_counter += 1;
        let handle = CallbackHandle(self.callback_counter);
        self.sample_callbacks.insert(handle, callback);
        handle
    }

    pub fn unregister_callback(&mut self, handle: CallbackHandle) -> GuidanceResult<()> {
        match self.sample_callbacks.remove(&handle) {
            Some(_) => Ok(()),
            None => Err(GuidanceError::InvalidCallback { id: handle.id() }),
        }
    }

    pub fn callback_count(&self) -> usize {
        self.sample_callbacks.len()
    }

    /// Deliver a pose change for one link of a tool's chain.
    ///
    /// Before arming the chain is updated but no sample is produced.
    /// After arming this synchronously runs one distance update; a
    /// geometric failure is logged and surfaced with the previous sample
    /// retained, while a telemetry failure never fails the update.
    pub fn handle_pose_update(
        &mut self,
        tool: &str,
        link_index: usize,
        transform: RigidTransform,
    ) -> GuidanceResult<Option<DistanceSample>> {
        let tracked = self
            .monitor
            .tool_mut(tool)
            .ok_or_else(|| GuidanceError::UnknownTool {
                name: tool.to_string(),
            })?;
        tracked.set_transform(link_index, transform)?;

        if !self.armed {
            return Ok(None);
        }
        self.run_update().map(Some)
    }

    /// Deliver a whole replacement chain for a tool.
    pub fn replace_chain(
        &mut self,
        tool: &str,
        chain: Vec<RigidTransform>,
    ) -> GuidanceResult<Option<DistanceSample>> {
        let tracked = self
            .monitor
            .tool_mut(tool)
            .ok_or_else(|| GuidanceError::UnknownTool {
                name: tool.to_string(),
            })?;
        tracked.set_chain(chain);

        if !self.armed {
            return Ok(None);
        }
        self.run_update().map(Some)
    }

    /// Build and install the landmark-anchored local frame.
    ///
    /// On degenerate landmarks nothing is installed and any previously
    /// installed frame stays in effect.
    pub fn build_local_frame(
        &mut self,
        origin: &Point3,
        forward: &Point3,
        in_plane: &Point3,
    ) -> GuidanceResult<&LocalFrame> {
        let frame = self.frame_builder.build(origin, forward, in_plane)?;
        info!(
            "local frame installed at origin ({:.1}, {:.1}, {:.1})",
            origin.x, origin.y, origin.z
        );
        Ok(self.local_frame.insert(frame))
    }

    pub fn local_frame(&self) -> Option<&LocalFrame> {
        self.local_frame.as_ref()
    }

    /// The frame's visualization plane, once a frame is installed.
    pub fn guide_plane(&self) -> Option<GuidePlane> {
        self.local_frame.as_ref().map(LocalFrame::guide_plane)
    }

    /// The most recent successful sample.
    pub fn last_sample(&self) -> Option<&DistanceSample> {
        self.monitor.last_sample()
    }

    /// The most recent sample with its endpoints and guide line
    /// re-expressed in the installed local frame. Distance fields are
    /// the measured values, unchanged.
    pub fn sample_in_local_frame(&self) -> Option<DistanceSample> {
        let frame = self.local_frame.as_ref()?;
        let sample = self.monitor.last_sample()?;

        let position_a = frame.point_to_local(&sample.position_a);
        let position_b = frame.point_to_local(&sample.position_b);
        Some(DistanceSample {
            position_a,
            position_b,
            raw_distance_mm: sample.raw_distance_mm,
            normalized_distance: sample.normalized_distance,
            line: LineSegment {
                start: position_a,
                end: position_b,
            },
            sequence_number: sample.sequence_number,
        })
    }

    fn run_update(&mut self) -> GuidanceResult<DistanceSample> {
        let sample = match self.monitor.update() {
            Ok(sample) => sample,
            Err(error) => {
                warn!("distance update failed: {}", error);
                return Err(error.into());
            }
        };

        for callback in self.sample_callbacks.values() {
            callback(&sample);
        }

        // Send failures are counted and logged by the emitter; they must
        // not interrupt monitoring.
        let _ = self.emitter.emit_distance(sample.normalized_distance);

        Ok(sample)
    }
}
