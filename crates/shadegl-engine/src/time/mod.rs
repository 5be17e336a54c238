//! Time subsystem.
//!
//! - `FrameClock` measures wall-clock time between ticks
//! - `FrameLoop` is the Idle/Running state machine behind `Renderer::start`

mod frame_clock;
mod frame_loop;

pub use frame_clock::{FrameClock, FrameTime};
pub use frame_loop::{FrameLoop, LoopState, Tick};
