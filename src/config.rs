//! Display configuration types and builder

pub use crate::error::{BuilderError, MAX_COLUMNS, MAX_ROWS};

/// Default 7-bit I2C address (SA0 low)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Columns between RAM column 0 and the first visible column on 128 wide panels
pub const DEFAULT_COLUMN_OFFSET: u8 = 2;

/// Visible display dimensions in pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Number of visible columns
    pub width: u8,
    /// Number of visible rows
    pub height: u8,
}

impl Dimensions {
    /// The common 1.3" 128x64 SH1106 module
    pub const SH1106_128X64: Self = Self {
        width: 128,
        height: 64,
    };

    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - width is 0 or > MAX_COLUMNS
    /// - height is 0 or > MAX_ROWS
    pub fn new(width: u8, height: u8) -> Result<Self, BuilderError> {
        if width == 0 || width > MAX_COLUMNS || height == 0 || height > MAX_ROWS {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of 8 row pages covering the height
    pub fn pages(&self) -> u8 {
        self.height.div_ceil(8)
    }

    /// Whether the pixel lies on the display
    pub fn contains(&self, x: u8, y: u8) -> bool {
        x < self.width && y < self.height
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::SH1106_128X64
    }
}

/// Display rotation relative to the module's native orientation
///
/// The SH1106 can only mirror both axes in hardware, so 90 degree steps are
/// not available without a framebuffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rotation {
    /// Segment remap on, COM scan decrementing (native module orientation)
    #[default]
    Rotate0,
    /// Segment remap off, COM scan incrementing
    Rotate180,
}

/// Display configuration
///
/// This struct holds all configurable parameters for the SH1106 controller.
/// Use `Builder` to create a Config.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Visible dimensions
    pub dimensions: Dimensions,
    /// 7-bit I2C address
    pub address: u8,
    /// RAM column of visible column 0
    pub column_offset: u8,
    /// Display rotation
    pub rotation: Rotation,
    /// Clock divide ratio / oscillator frequency byte
    pub clock_divider: u8,
    /// Vertical display offset
    pub display_offset: u8,
    /// Display start line
    pub start_line: u8,
    /// Charge pump setting
    pub charge_pump: u8,
    /// Memory addressing mode byte
    pub memory_mode: u8,
    /// COM pins hardware configuration byte
    pub com_pins: u8,
    /// Contrast
    pub contrast: u8,
    /// Precharge period byte
    pub precharge: u8,
    /// VCOM deselect level byte
    pub vcom_detect: u8,
    /// Whether the panel shows RAM inverted
    pub inverted: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dimensions: Dimensions::SH1106_128X64,
            address: DEFAULT_ADDRESS,
            column_offset: DEFAULT_COLUMN_OFFSET,
            rotation: Rotation::Rotate0,
            // Suggested ratio from the datasheet
            clock_divider: 0x80,
            display_offset: 0x00,
            start_line: 0x00,
            charge_pump: 0x10,
            memory_mode: 0x00,
            // Alternative COM pin configuration
            com_pins: 0x12,
            contrast: 0x9F,
            precharge: 0x22,
            vcom_detect: 0x40,
            inverted: false,
        }
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use sh1106_rmw::{Builder, Dimensions, Rotation};
///
/// let dims = match Dimensions::new(128, 32) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new().dimensions(dims).rotation(Rotation::Rotate180).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.dimensions.pages(), 4);
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display dimensions (default 128x64)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.config.dimensions = dims;
        self
    }

    /// Set the 7-bit I2C address (default 0x3C)
    pub fn address(mut self, address: u8) -> Self {
        self.config.address = address;
        self
    }

    /// Set the RAM column of visible column 0 (default 2)
    pub fn column_offset(mut self, offset: u8) -> Self {
        self.config.column_offset = offset;
        self
    }

    /// Set display rotation
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.config.rotation = rotation;
        self
    }

    /// Set the clock divide ratio / oscillator frequency byte
    pub fn clock_divider(mut self, value: u8) -> Self {
        self.config.clock_divider = value;
        self
    }

    /// Set the vertical display offset
    pub fn display_offset(mut self, value: u8) -> Self {
        self.config.display_offset = value;
        self
    }

    /// Set the display start line
    pub fn start_line(mut self, value: u8) -> Self {
        self.config.start_line = value;
        self
    }

    /// Set the charge pump byte
    pub fn charge_pump(mut self, value: u8) -> Self {
        self.config.charge_pump = value;
        self
    }

    /// Set the memory addressing mode byte
    pub fn memory_mode(mut self, value: u8) -> Self {
        self.config.memory_mode = value;
        self
    }

    /// Set the COM pins configuration byte
    pub fn com_pins(mut self, value: u8) -> Self {
        self.config.com_pins = value;
        self
    }

    /// Set the contrast
    pub fn contrast(mut self, value: u8) -> Self {
        self.config.contrast = value;
        self
    }

    /// Set the precharge period byte
    pub fn precharge(mut self, value: u8) -> Self {
        self.config.precharge = value;
        self
    }

    /// Set the VCOM deselect level byte
    pub fn vcom_detect(mut self, value: u8) -> Self {
        self.config.vcom_detect = value;
        self
    }

    /// Set whether the panel shows RAM inverted
    pub fn inverted(mut self, value: bool) -> Self {
        self.config.inverted = value;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidAddress` if the address does not fit in 7 bits,
    /// and `BuilderError::ColumnOffsetOutOfRange` if the visible columns do not fit
    /// in the controller's RAM.
    pub fn build(self) -> Result<Config, BuilderError> {
        let config = self.config;
        if config.address > 0x7F {
            return Err(BuilderError::InvalidAddress(config.address));
        }
        if u16::from(config.column_offset) + u16::from(config.dimensions.width)
            > u16::from(MAX_COLUMNS)
        {
            return Err(BuilderError::ColumnOffsetOutOfRange {
                offset: config.column_offset,
                width: config.dimensions.width,
            });
        }
        Ok(config)
    }
}
