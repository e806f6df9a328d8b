//! Scroll Smoother (§4.1): a per-device velocity-space exponential filter.

/// Default exponential-smoothing factor, `α`.
pub const DEFAULT_SMOOTHING_FACTOR: f64 = 0.7;
/// Default per-update velocity decay.
pub const DEFAULT_VELOCITY_DECAY: f64 = 0.9;

const MIN_DT_SECONDS: f64 = 0.001;
const DISCRETE_TICK_SCALE: f64 = 0.1;

/// Converts raw/discrete wheel deltas into smoothed motion.
///
/// Position is an informational accumulator, not authoritative state a caller
/// should rely on for anything but diagnostics.
#[derive(Debug, Clone)]
pub struct ScrollSmoother {
    smoothing_factor: f64,
    velocity_decay: f64,
    velocity_x: f64,
    velocity_y: f64,
    position_x: f64,
    position_y: f64,
    last_update_us: u64,
    discrete_accum_x: i32,
    discrete_accum_y: i32,
}

impl ScrollSmoother {
    /// Create a smoother seeded at `now_us` with the default filter constants.
    pub fn new(now_us: u64) -> Self {
        Self::with_constants(now_us, DEFAULT_SMOOTHING_FACTOR, DEFAULT_VELOCITY_DECAY)
    }

    /// Create a smoother with explicit filter constants, both expected in `[0, 1]`.
    pub fn with_constants(now_us: u64, smoothing_factor: f64, velocity_decay: f64) -> Self {
        Self {
            smoothing_factor,
            velocity_decay,
            velocity_x: 0.0,
            velocity_y: 0.0,
            position_x: 0.0,
            position_y: 0.0,
            last_update_us: now_us,
            discrete_accum_x: 0,
            discrete_accum_y: 0,
        }
    }

    /// Process one raw scroll sample, returning the smoothed `(dx, dy)`.
    pub fn process(&mut self, now_us: u64, dx: f64, dy: f64, discrete: bool) -> (f64, f64) {
        let (delta_x, delta_y) = if discrete {
            self.discrete_accum_x += dx as i32;
            self.discrete_accum_y += dy as i32;
            let converted = (
                self.discrete_accum_x as f64 * DISCRETE_TICK_SCALE,
                self.discrete_accum_y as f64 * DISCRETE_TICK_SCALE,
            );
            self.discrete_accum_x = 0;
            self.discrete_accum_y = 0;
            converted
        } else {
            (dx, dy)
        };

        let raw_dt = now_us.saturating_sub(self.last_update_us) as f64 / 1_000_000.0;
        let dt = raw_dt.max(MIN_DT_SECONDS);

        let alpha = self.smoothing_factor;
        let v_new_x = delta_x / dt;
        let v_new_y = delta_y / dt;
        self.velocity_x = alpha * self.velocity_x + (1.0 - alpha) * v_new_x;
        self.velocity_y = alpha * self.velocity_y + (1.0 - alpha) * v_new_y;
        self.velocity_x *= self.velocity_decay;
        self.velocity_y *= self.velocity_decay;

        let smoothed_x = self.velocity_x * dt;
        let smoothed_y = self.velocity_y * dt;
        self.position_x += smoothed_x;
        self.position_y += smoothed_y;
        self.last_update_us = now_us;

        (smoothed_x, smoothed_y)
    }

    /// The informational position accumulator.
    pub fn position(&self) -> (f64, f64) {
        (self.position_x, self.position_y)
    }
}
