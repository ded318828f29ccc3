#![no_std]

pub mod bounds;
pub mod color;
pub mod config;
pub mod controller;
pub mod frame_scheduler;
pub mod generator;
pub mod intent;
pub mod math8;
pub mod mode;
pub mod pixel_buffer;
pub mod random;
pub mod store;

pub use bounds::RenderingBounds;
pub use config::{BrightnessStep, ControllerConfig, GlobalConfig, WarmConfig};
pub use controller::{ControlError, ModeController, Status};
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use generator::{AnimationState, FrameContext, Generator};
pub use intent::{InputEvent, IntentChannel, IntentReceiver, IntentSender, LightIntent};
pub use mode::Mode;
pub use pixel_buffer::{IndexOutOfRange, PixelBuffer};
pub use random::{FastRandom, RandomSource};
pub use store::{ByteStorage, ConfigStore, FieldGroup, MemoryStorage, StorageError};

pub use color::{ColorTemperature, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// Receives the whole strip, including pixels outside of the rendering bounds.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}
