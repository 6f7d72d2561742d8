//! Core application primitives (HTTP surface, scheduler loop)

pub mod context;
pub mod http;
pub mod scheduler;

pub use context::PipelineContext;
pub use http::{create_router, start_server, AppState};
pub use scheduler::{SchedulerConfig, SignalScheduler};
