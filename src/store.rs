//! Durable storage of the light configuration
//!
//! The configuration is kept as one byte per logical field in an EEPROM-like
//! [`ByteStorage`]. Never written cells read back as [`SENTINEL`]; such fields
//! load as their documented default. Brightness-like fields use the full byte
//! range, so a header cell marks storage that has been written at least once:
//! with the header present `0xFF` is a real value for those fields.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::{
    Rgb,
    color::ColorTemperature,
    config::{DEFAULT_BRIGHTNESS, DEFAULT_MODE, DEFAULT_STATIC_COLOR, GlobalConfig, WarmConfig},
    mode::Mode,
};

/// Value of a never written cell
pub const SENTINEL: u8 = 0xFF;

/// Marker written to the header cell on every save
const HEADER_MAGIC: u8 = 0xA5;

/// Number of cells used by the configuration record
pub const CONFIG_STORAGE_SIZE: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// The underlying driver failed to read, write or commit
    DriverError,
    /// Address outside of the storage
    OutOfBounds,
}

/// Byte addressable durable storage
///
/// Writes become visible to `read` only after `commit`.
pub trait ByteStorage {
    fn read(&self, address: usize) -> Result<u8, StorageError>;
    fn write(&mut self, address: usize, value: u8) -> Result<(), StorageError>;
    fn commit(&mut self) -> Result<(), StorageError>;
    /// Drop every write staged since the last `commit`
    fn discard(&mut self);
}

/// Logical fields of the persisted record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    Header,
    Mode,
    Red,
    Green,
    Blue,
    Brightness,
    /// Stored as Kelvin / 100
    WarmTemperature,
    WarmChangeChance,
    WarmMinBrightness,
    WarmMaxBrightness,
    WarmUpdateSpeed,
    WarmSmoothness,
}

impl ConfigField {
    pub const fn address(self) -> usize {
        match self {
            Self::Header => 0,
            Self::Mode => 1,
            Self::Red => 2,
            Self::Green => 3,
            Self::Blue => 4,
            Self::Brightness => 5,
            Self::WarmTemperature => 6,
            Self::WarmChangeChance => 7,
            Self::WarmMinBrightness => 8,
            Self::WarmMaxBrightness => 9,
            Self::WarmUpdateSpeed => 10,
            Self::WarmSmoothness => 11,
        }
    }

    /// Whether `0xFF` is a legal value of this field
    const fn sentinel_is_value(self) -> bool {
        matches!(
            self,
            Self::Red
                | Self::Green
                | Self::Blue
                | Self::Brightness
                | Self::WarmMinBrightness
                | Self::WarmMaxBrightness
        )
    }

    #[allow(clippy::cast_possible_truncation)]
    const fn encode(self, config: &GlobalConfig) -> u8 {
        let warm = config.warm;
        match self {
            Self::Header => HEADER_MAGIC,
            Self::Mode => config.mode.as_raw(),
            Self::Red => config.static_color.r,
            Self::Green => config.static_color.g,
            Self::Blue => config.static_color.b,
            Self::Brightness => config.brightness,
            Self::WarmTemperature => warm.color_temperature().as_hundreds(),
            Self::WarmChangeChance => warm.change_chance(),
            Self::WarmMinBrightness => warm.min_brightness(),
            Self::WarmMaxBrightness => warm.max_brightness(),
            // Bounded to 200 by `WarmConfig`
            Self::WarmUpdateSpeed => warm.update_speed_ms() as u8,
            Self::WarmSmoothness => warm.smoothness(),
        }
    }
}

/// Group of fields written together by a field-level save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldGroup {
    Mode,
    Color,
    Brightness,
    Warm,
    All,
}

impl FieldGroup {
    const fn fields(self) -> &'static [ConfigField] {
        match self {
            Self::Mode => &[ConfigField::Mode],
            Self::Color => &[ConfigField::Red, ConfigField::Green, ConfigField::Blue],
            Self::Brightness => &[ConfigField::Brightness],
            Self::Warm => &[
                ConfigField::WarmTemperature,
                ConfigField::WarmChangeChance,
                ConfigField::WarmMinBrightness,
                ConfigField::WarmMaxBrightness,
                ConfigField::WarmUpdateSpeed,
                ConfigField::WarmSmoothness,
            ],
            Self::All => &[
                ConfigField::Mode,
                ConfigField::Red,
                ConfigField::Green,
                ConfigField::Blue,
                ConfigField::Brightness,
                ConfigField::WarmTemperature,
                ConfigField::WarmChangeChance,
                ConfigField::WarmMinBrightness,
                ConfigField::WarmMaxBrightness,
                ConfigField::WarmUpdateSpeed,
                ConfigField::WarmSmoothness,
            ],
        }
    }
}

/// Loads and saves [`GlobalConfig`] records
#[derive(Debug)]
pub struct ConfigStore<S: ByteStorage> {
    storage: S,
    base_address: usize,
}

impl<S: ByteStorage> ConfigStore<S> {
    pub const fn new(storage: S) -> Self {
        Self::with_base_address(storage, 0)
    }

    /// Place the record at `base_address` inside a larger storage
    pub const fn with_base_address(storage: S, base_address: usize) -> Self {
        Self {
            storage,
            base_address,
        }
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    /// Read the configuration, substituting defaults for absent fields
    pub fn load(&self) -> Result<GlobalConfig, StorageError> {
        if !self.has_header()? {
            #[cfg(feature = "esp32-log")]
            println!("[ConfigStore] storage is pristine, using defaults");
            return Ok(GlobalConfig::default());
        }

        let defaults = WarmConfig::default();

        let mode = match self.read_field(ConfigField::Mode)? {
            Some(raw) => Mode::from_raw(raw).unwrap_or_else(|| {
                #[cfg(feature = "esp32-log")]
                println!("[ConfigStore] invalid stored mode {}, using default", raw);
                DEFAULT_MODE
            }),
            None => DEFAULT_MODE,
        };

        let static_color = Rgb {
            r: self
                .read_field(ConfigField::Red)?
                .unwrap_or(DEFAULT_STATIC_COLOR.r),
            g: self
                .read_field(ConfigField::Green)?
                .unwrap_or(DEFAULT_STATIC_COLOR.g),
            b: self
                .read_field(ConfigField::Blue)?
                .unwrap_or(DEFAULT_STATIC_COLOR.b),
        };

        let brightness = self
            .read_field(ConfigField::Brightness)?
            .unwrap_or(DEFAULT_BRIGHTNESS);

        let temperature = self
            .read_field(ConfigField::WarmTemperature)?
            .map_or(defaults.color_temperature(), ColorTemperature::from_hundreds);

        let warm = WarmConfig::new(
            temperature.kelvin(),
            self.read_field(ConfigField::WarmChangeChance)?
                .unwrap_or(defaults.change_chance()),
            self.read_field(ConfigField::WarmMinBrightness)?
                .unwrap_or(defaults.min_brightness()),
            self.read_field(ConfigField::WarmMaxBrightness)?
                .unwrap_or(defaults.max_brightness()),
            self.read_field(ConfigField::WarmUpdateSpeed)?
                .map_or(defaults.update_speed_ms(), u16::from),
            self.read_field(ConfigField::WarmSmoothness)?
                .unwrap_or(defaults.smoothness()),
        );

        Ok(GlobalConfig {
            mode,
            static_color,
            brightness,
            warm,
        })
    }

    /// Write the complete record
    pub fn save(&mut self, config: &GlobalConfig) -> Result<(), StorageError> {
        self.save_fields(config, FieldGroup::All)
    }

    /// Write only the fields of `group` and commit
    ///
    /// Storage that has never been written receives the whole record instead,
    /// so unrelated fields never end up holding stale sentinels.
    pub fn save_fields(
        &mut self,
        config: &GlobalConfig,
        group: FieldGroup,
    ) -> Result<(), StorageError> {
        let group = if group != FieldGroup::All && !self.has_header()? {
            FieldGroup::All
        } else {
            group
        };

        let result = self.write_group(config, group);
        if result.is_err() {
            // A later commit must not publish a partial record
            self.storage.discard();
        }
        result
    }

    fn write_group(
        &mut self,
        config: &GlobalConfig,
        group: FieldGroup,
    ) -> Result<(), StorageError> {
        self.write_field(config, ConfigField::Header)?;
        for field in group.fields() {
            self.write_field(config, *field)?;
        }
        self.storage.commit()
    }

    fn has_header(&self) -> Result<bool, StorageError> {
        let header = self
            .storage
            .read(self.base_address + ConfigField::Header.address())?;
        Ok(header == HEADER_MAGIC)
    }

    /// Read a field, `None` if it was never written
    fn read_field(&self, field: ConfigField) -> Result<Option<u8>, StorageError> {
        let value = self.storage.read(self.base_address + field.address())?;
        if value == SENTINEL && !field.sentinel_is_value() {
            return Ok(None);
        }
        Ok(Some(value))
    }

    fn write_field(
        &mut self,
        config: &GlobalConfig,
        field: ConfigField,
    ) -> Result<(), StorageError> {
        self.storage
            .write(self.base_address + field.address(), field.encode(config))
    }
}

/// RAM backed [`ByteStorage`] with EEPROM semantics
///
/// Starts out pristine (every cell is [`SENTINEL`]) and stages writes until
/// `commit`.
#[derive(Debug, Clone)]
pub struct MemoryStorage<const SIZE: usize> {
    committed: [u8; SIZE],
    staged: [u8; SIZE],
    commits: usize,
    fail_writes: bool,
}

impl<const SIZE: usize> Default for MemoryStorage<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const SIZE: usize> MemoryStorage<SIZE> {
    pub const fn new() -> Self {
        Self {
            committed: [SENTINEL; SIZE],
            staged: [SENTINEL; SIZE],
            commits: 0,
            fail_writes: false,
        }
    }

    /// Number of successful commits so far
    pub const fn commit_count(&self) -> usize {
        self.commits
    }

    /// Make every write and commit fail with [`StorageError::DriverError`]
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Committed contents
    pub const fn as_bytes(&self) -> &[u8; SIZE] {
        &self.committed
    }
}

impl<const SIZE: usize> ByteStorage for MemoryStorage<SIZE> {
    fn read(&self, address: usize) -> Result<u8, StorageError> {
        self.committed
            .get(address)
            .copied()
            .ok_or(StorageError::OutOfBounds)
    }

    fn write(&mut self, address: usize, value: u8) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::DriverError);
        }
        let cell = self
            .staged
            .get_mut(address)
            .ok_or(StorageError::OutOfBounds)?;
        *cell = value;
        Ok(())
    }

    fn commit(&mut self) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::DriverError);
        }
        self.committed = self.staged;
        self.commits += 1;
        Ok(())
    }

    fn discard(&mut self) {
        self.staged = self.committed;
    }
}
