//! Interactive controls for the timeline scrubber
//!
//! Turns host input into viewport operations and assembles the frame a
//! renderer draws from.

pub mod gesture;
pub mod player;
pub mod scrubber;

pub use gesture::{GestureEvent, GestureInterpreter};
pub use player::{PlayerHost, PlayerState};
pub use scrubber::{Scrubber, ScrubberFrame, WheelOutcome};
