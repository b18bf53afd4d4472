#![deny(unsafe_code)]
//! Core types and traits for the flowfield animation.
//!
//! Provides the `Engine` trait, the `Surface` drawing seam and an in-memory
//! `RecordingSurface`, the `FrameScheduler` seam, the fixed color ramp
//! (`LinearGradient`, `Srgb`), the shared `PointerTracker`, and the tunable
//! parameter surface (`FlowParams`).

pub mod color;
pub mod engine;
pub mod error;
pub mod gradient;
pub mod params;
pub mod pointer;
pub mod schedule;
pub mod surface;

pub use color::Srgb;
pub use engine::Engine;
pub use error::FieldError;
pub use gradient::{ColorStop, LinearGradient};
pub use params::{FlowParams, ParamSpec, PARAM_SPECS};
pub use pointer::PointerTracker;
pub use schedule::{FrameScheduler, ManualScheduler};
pub use surface::{DrawCommand, RecordingSurface, Surface};
