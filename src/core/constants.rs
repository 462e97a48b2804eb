//! Shared layout constants for the archive format.

/// Number of clock phases driving a simulation. The sample stream always
/// begins with one channel per phase, in phase order.
pub const CLOCK_PHASE_COUNT: usize = 4;

/// Number of charge dots backing one polarization channel. Architecture
/// dot counts must be a positive multiple of this.
pub const DOTS_PER_POLARIZATION: u8 = 4;

/// Size in bytes of one little-endian sample value.
pub const SAMPLE_BYTES: usize = size_of::<f64>();

/// Degrees of clock phase shift separating consecutive phases.
pub const PHASE_SHIFT_STEP_DEGREES: f64 = 90.0;
