use embassy_time::Instant;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::bounds::{RenderingBounds, bounded};
use crate::color::{BLACK, Rgb};
use crate::config::{BrightnessStep, ControllerConfig, GlobalConfig, WarmConfig};
use crate::generator::{AnimationState, FrameContext};
use crate::intent::{InputEvent, IntentReceiver, LightIntent};
use crate::mode::Mode;
use crate::pixel_buffer::PixelBuffer;
use crate::random::RandomSource;
use crate::store::{ByteStorage, ConfigStore, FieldGroup, StorageError};

/// Error returned by [`ModeController::set_mode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlError {
    /// Ordinal outside of the known modes, the active mode is kept
    InvalidMode(u8),
    /// The change was applied but could not be persisted
    Storage(StorageError),
}

impl From<StorageError> for ControlError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

/// Snapshot of the user-visible light state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub mode: Mode,
    pub color: Rgb,
    pub brightness: u8,
}

/// Mode controller - owns the active generator, the configuration and the
/// frame buffer
///
/// All calls are expected from a single thread. Setters apply the change
/// immediately and persist it before returning; a persistence failure is
/// reported but never reverts the live state.
pub struct ModeController<S: ByteStorage, R: RandomSource, const N: usize> {
    // External dependencies and configuration
    store: ConfigStore<S>,
    rng: R,
    bounds: RenderingBounds,
    campfire_brightness_scaling: bool,
    brightness_step: BrightnessStep,

    // Internal state
    config: GlobalConfig,
    state: Option<AnimationState<N>>,
    frame_buffer: PixelBuffer<N>,
}

impl<S: ByteStorage, R: RandomSource, const N: usize> ModeController<S, R, N> {
    /// Create a controller from the persisted configuration
    ///
    /// Falls back to the documented defaults if the storage can not be read.
    pub fn new(store: ConfigStore<S>, rng: R, options: &ControllerConfig) -> Self {
        let config = store.load().unwrap_or_else(|_error| {
            #[cfg(feature = "esp32-log")]
            println!("[ModeController] failed to load config: {:?}", _error);
            GlobalConfig::default()
        });
        Self::with_config(store, rng, options, config)
    }

    /// Create a controller with an explicit initial configuration
    pub fn with_config(
        store: ConfigStore<S>,
        rng: R,
        options: &ControllerConfig,
        config: GlobalConfig,
    ) -> Self {
        Self {
            store,
            rng,
            bounds: options
                .bounds
                .unwrap_or(RenderingBounds::full(N))
                .clamped(N),
            campfire_brightness_scaling: options.campfire_brightness_scaling,
            brightness_step: options.brightness_step,
            config,
            state: None,
            frame_buffer: PixelBuffer::new(),
        }
    }

    /// Advance the active generator
    ///
    /// Returns `true` if the frame buffer was redrawn. The generator decides
    /// on its own whether enough time has passed since its last update.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mode = self.config.mode;
        let ctx = FrameContext {
            static_color: self.config.static_color,
            brightness: self.config.brightness,
            warm: self.config.warm,
            campfire_brightness_scaling: self.campfire_brightness_scaling,
        };

        let state = self
            .state
            .get_or_insert_with(|| AnimationState::for_mode(mode));
        let frame = bounded(self.frame_buffer.as_mut_slice(), self.bounds);
        state.step(now, &ctx, &mut self.rng, frame)
    }

    /// Switch mode by ordinal
    pub fn set_mode(&mut self, ordinal: u8) -> Result<(), ControlError> {
        let Some(mode) = Mode::from_raw(ordinal) else {
            #[cfg(feature = "esp32-log")]
            println!("[ModeController] rejected invalid mode {}", ordinal);
            return Err(ControlError::InvalidMode(ordinal));
        };
        self.switch_mode(mode)?;
        Ok(())
    }

    /// Switch to `mode`
    ///
    /// The outgoing animation state is dropped; coming back to a mode later
    /// starts it from scratch. Re-selecting the active mode keeps its state.
    pub fn switch_mode(&mut self, mode: Mode) -> Result<(), StorageError> {
        if mode != self.config.mode {
            #[cfg(feature = "esp32-log")]
            println!(
                "[ModeController] switching mode {} -> {}",
                self.config.mode.as_str(),
                mode.as_str()
            );
            self.config.mode = mode;
            self.state = None;
            self.clear_frame();
        }
        self.persist(FieldGroup::Mode)
    }

    pub fn set_static_color(&mut self, r: u8, g: u8, b: u8) -> Result<(), StorageError> {
        self.config.static_color = Rgb { r, g, b };
        self.persist(FieldGroup::Color)
    }

    pub fn set_brightness(&mut self, brightness: u8) -> Result<(), StorageError> {
        self.config.brightness = brightness;
        self.persist(FieldGroup::Brightness)
    }

    /// Replace the warm light tuning
    ///
    /// [`WarmConfig`] clamps on construction, so the stored values are always
    /// in range.
    pub fn set_warm_config(&mut self, warm: WarmConfig) -> Result<(), StorageError> {
        self.config.warm = warm;
        self.persist(FieldGroup::Warm)
    }

    /// Replace the whole configuration and persist every field
    pub fn set_config(&mut self, config: GlobalConfig) -> Result<(), StorageError> {
        if config.mode != self.config.mode {
            self.state = None;
            self.clear_frame();
        }
        self.config = config;
        self.persist(FieldGroup::All)
    }

    /// Handle an already debounced input device event
    pub fn handle_input(&mut self, event: InputEvent) -> Result<(), StorageError> {
        match event {
            InputEvent::RotateClockwise => {
                self.set_brightness(self.brightness_step.increase(self.config.brightness))
            }
            InputEvent::RotateCounterClockwise => {
                self.set_brightness(self.brightness_step.decrease(self.config.brightness))
            }
            InputEvent::Press => self.switch_mode(self.config.mode.next()),
        }
    }

    /// Apply a single control request
    pub fn apply_intent(&mut self, intent: LightIntent) -> Result<(), ControlError> {
        match intent {
            LightIntent::SetMode(ordinal) => self.set_mode(ordinal),
            LightIntent::SetStaticColor(color) => {
                Ok(self.set_static_color(color.r, color.g, color.b)?)
            }
            LightIntent::SetBrightness(brightness) => Ok(self.set_brightness(brightness)?),
            LightIntent::SetWarmConfig(warm) => Ok(self.set_warm_config(warm)?),
            LightIntent::Input(event) => Ok(self.handle_input(event)?),
        }
    }

    /// Drain pending requests from the channel (non-blocking)
    ///
    /// Failed requests are skipped; the remaining ones are still applied.
    /// Returns the number of processed intents.
    pub fn process_intents<const SIZE: usize>(
        &mut self,
        intents: &IntentReceiver<'_, SIZE>,
    ) -> usize {
        let mut processed = 0;
        while let Some(intent) = intents.try_receive() {
            if let Err(_error) = self.apply_intent(intent) {
                #[cfg(feature = "esp32-log")]
                println!("[ModeController] intent {:?} failed: {:?}", intent, _error);
            }
            processed += 1;
        }
        processed
    }

    pub fn get_status(&self) -> Status {
        Status {
            mode: self.config.mode,
            color: self.config.static_color,
            brightness: self.config.brightness,
        }
    }

    pub fn get_warm_config(&self) -> WarmConfig {
        self.config.warm
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }

    /// Current frame for the output driver
    pub fn frame(&self) -> &[Rgb] {
        self.frame_buffer.as_slice()
    }

    pub fn pixel_buffer(&self) -> &PixelBuffer<N> {
        &self.frame_buffer
    }

    /// Animation state of the active mode, `None` until the first tick after
    /// a mode change
    pub fn animation_state(&self) -> Option<&AnimationState<N>> {
        self.state.as_ref()
    }

    pub fn store(&self) -> &ConfigStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ConfigStore<S> {
        &mut self.store
    }

    pub fn bounds(&self) -> RenderingBounds {
        self.bounds
    }

    fn clear_frame(&mut self) {
        self.frame_buffer.fill(BLACK);
    }

    fn persist(&mut self, group: FieldGroup) -> Result<(), StorageError> {
        let result = self.store.save_fields(&self.config, group);
        #[cfg(feature = "esp32-log")]
        if let Err(error) = result {
            println!("[ModeController] failed to persist {:?}: {:?}", group, error);
        }
        result
    }
}
