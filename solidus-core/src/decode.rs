//! MAX31855 thermocouple frame decoding
//!
//! The converter shifts out a fixed 32-bit word per transaction, MSB
//! first. Two temperature fields are extracted by masking and shifting:
//!
//! - External (thermocouple) temperature: bits 18-31, 0.25 °C per LSB
//! - Internal (cold junction) temperature: bits 4-15, 0.0625 °C per LSB
//!
//! The sign bit is not extended; both fields are taken as unsigned
//! magnitudes, matching the reference board's decode. The decoder also
//! tracks the previous external reading to produce a per-sample
//! temperature delta used for heat-dissipation detection.

/// Length of one raw sensor frame in bytes
pub const FRAME_LEN: usize = 4;

/// External temperature field: bits 18-31
const EXT_MASK: u32 = 0x7FFC_0000;
const EXT_SHIFT: u32 = 18;
const EXT_GAIN_C: f32 = 0.25;

/// Internal temperature field: bits 4-15
const INT_MASK: u32 = 0x0000_FFF0;
const INT_SHIFT: u32 = 4;
const INT_GAIN_C: f32 = 0.0625;

/// Errors that can occur while decoding a raw sensor frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Frame shorter than the fixed sensor word
    ShortFrame {
        /// Number of bytes actually received
        len: usize,
    },
}

/// One decoded temperature observation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TempReading {
    /// Thermocouple (oven chamber) temperature in °C
    pub external_c: f32,
    /// Cold-junction (board) temperature in °C
    pub internal_c: f32,
    /// Change in external temperature since the previous reading
    ///
    /// `None` when either the current or the previous external reading
    /// is exactly 0.0 °C. This conflates "no prior reading" with "a
    /// reading of zero degrees" and is kept deliberately; dissipation
    /// detection is suppressed at that instant.
    pub delta_c: Option<f32>,
}

/// Stateful frame decoder
///
/// Pure bit extraction plus one word of retained state (the previous
/// external reading) for the delta computation.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameDecoder {
    prev_external_c: f32,
}

impl FrameDecoder {
    /// Create a decoder with no prior reading
    pub const fn new() -> Self {
        Self {
            prev_external_c: 0.0,
        }
    }

    /// Decode a raw frame as received from the bus
    ///
    /// The first [`FRAME_LEN`] bytes are interpreted as a big-endian
    /// 32-bit word; extra bytes are ignored. Fewer bytes than a full
    /// word is a [`DecodeError::ShortFrame`].
    pub fn decode(&mut self, frame: &[u8]) -> Result<TempReading, DecodeError> {
        if frame.len() < FRAME_LEN {
            return Err(DecodeError::ShortFrame { len: frame.len() });
        }
        let word = u32::from_be_bytes([frame[0], frame[1], frame[2], frame[3]]);
        Ok(self.decode_word(word))
    }

    /// Decode a raw 32-bit sensor word
    pub fn decode_word(&mut self, word: u32) -> TempReading {
        let external_c = ((word & EXT_MASK) >> EXT_SHIFT) as f32 * EXT_GAIN_C;
        let internal_c = ((word & INT_MASK) >> INT_SHIFT) as f32 * INT_GAIN_C;

        let prev = self.prev_external_c;
        self.prev_external_c = external_c;

        let delta_c = if external_c != 0.0 && prev != 0.0 {
            Some(external_c - prev)
        } else {
            None
        };

        TempReading {
            external_c,
            internal_c,
            delta_c,
        }
    }

    /// Forget the retained previous reading
    pub fn reset(&mut self) {
        self.prev_external_c = 0.0;
    }
}
