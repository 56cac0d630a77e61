//! Deck state machine and transition events

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{Approach, DeckState, StepContext, StepResult};
