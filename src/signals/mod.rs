//! Signal derivation: classification, risk annotation, message formatting.

pub mod classifier;
pub mod message;
pub mod risk;

pub use classifier::classify;
pub use message::format_signal_message;
pub use risk::{annotate, RiskError};
