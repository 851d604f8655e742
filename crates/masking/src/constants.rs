/// Coverage at or above this value marks a mask pixel as selected.
pub const MASK_THRESHOLD: f32 = 0.5;

/// Value written for selected mask pixels.
pub const MASK_SELECTED: u8 = 255;

/// Value written for preserved mask pixels.
pub const MASK_PRESERVED: u8 = 0;

/// Maximum flattening steps per quadratic segment of a smoothed stroke.
pub const MAX_CURVE_STEPS: u32 = 32;

/// Target length in pixels of one flattened curve step.
pub const CURVE_STEP_LENGTH: f32 = 2.0;

/// Extra diameter of the processing glow ring.
pub const GLOW_EXTRA_WIDTH: f32 = 6.0;
