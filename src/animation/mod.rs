pub mod pulse;
pub mod transitions;
pub mod tweening;

// Re-export commonly used types and functions for convenience
pub use pulse::Pulse;
pub use transitions::{Transition, TransitionManager, TransitionStep, TransitionType};
pub use tweening::{EasingFunction, Tweenable};
