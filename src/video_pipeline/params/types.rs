//! Colour control levels

/// Lowest slider level.
pub const MIN_LEVEL: u8 = 0;

/// Highest slider level.
pub const MAX_LEVEL: u8 = 255;

/// Default slider level; neutral for brightness and contrast.
pub const NEUTRAL_LEVEL: u8 = 127;

/// One of the five user-facing colour controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    Brightness,
    Contrast,
    Hue,
    Saturation,
    Gamma,
}

/// Lookup table a parameter feeds into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Luma,
    Chroma,
}

impl Parameter {
    pub const ALL: [Parameter; 5] = [
        Parameter::Brightness,
        Parameter::Contrast,
        Parameter::Hue,
        Parameter::Saturation,
        Parameter::Gamma,
    ];

    pub const MIN: u8 = MIN_LEVEL;
    pub const MAX: u8 = MAX_LEVEL;
    pub const DEFAULT: u8 = NEUTRAL_LEVEL;

    pub fn table(self) -> TableKind {
        match self {
            Parameter::Brightness | Parameter::Contrast | Parameter::Gamma => TableKind::Luma,
            Parameter::Hue | Parameter::Saturation => TableKind::Chroma,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Parameter::Brightness => "brightness",
            Parameter::Contrast => "contrast",
            Parameter::Hue => "hue",
            Parameter::Saturation => "saturation",
            Parameter::Gamma => "gamma",
        }
    }
}

/// Current level of every colour control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorParameters {
    pub brightness: u8,
    pub contrast: u8,
    pub hue: u8,
    pub saturation: u8,
    pub gamma: u8,
}

impl Default for ColorParameters {
    fn default() -> Self {
        Self {
            brightness: NEUTRAL_LEVEL,
            contrast: NEUTRAL_LEVEL,
            hue: NEUTRAL_LEVEL,
            saturation: NEUTRAL_LEVEL,
            gamma: NEUTRAL_LEVEL,
        }
    }
}

impl ColorParameters {
    pub fn get(&self, parameter: Parameter) -> u8 {
        match parameter {
            Parameter::Brightness => self.brightness,
            Parameter::Contrast => self.contrast,
            Parameter::Hue => self.hue,
            Parameter::Saturation => self.saturation,
            Parameter::Gamma => self.gamma,
        }
    }

    pub fn set(&mut self, parameter: Parameter, level: u8) {
        let slot = match parameter {
            Parameter::Brightness => &mut self.brightness,
            Parameter::Contrast => &mut self.contrast,
            Parameter::Hue => &mut self.hue,
            Parameter::Saturation => &mut self.saturation,
            Parameter::Gamma => &mut self.gamma,
        };
        *slot = level;
    }
}
