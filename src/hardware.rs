//! Board wiring for the sensor bus.

/// GPIO numbers of the I2C bus the climate sensor hangs off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct I2cPins {
    /// Data line
    pub sda: u8,
    /// Clock line
    pub scl: u8,
}

impl I2cPins {
    /// ESP8266 default wiring (SDA = GPIO4, SCL = GPIO5).
    pub const ESP8266: Self = Self { sda: 4, scl: 5 };

    /// ESP32 default wiring (SDA = GPIO21, SCL = GPIO22).
    pub const ESP32: Self = Self { sda: 21, scl: 22 };

    /// Create a pin pair. Returns `None` if both lines share one pin.
    pub const fn new(sda: u8, scl: u8) -> Option<Self> {
        if sda == scl {
            None
        } else {
            Some(Self { sda, scl })
        }
    }
}
