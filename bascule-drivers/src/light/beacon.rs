//! Safety light beacon output
//!
//! Renders a [`LightPattern`] onto a GPIO pin. Blinking is derived from
//! the millisecond clock rather than a local toggle, so every render call
//! lands on the same phase regardless of call spacing.

use bascule_core::command::LightPattern;
use embedded_hal::digital::OutputPin;

/// Safety light beacon
///
/// The pin can be wired active-high (default) or active-low for relay
/// boards that energize on low.
pub struct Beacon<P> {
    pin: P,
    /// If true, light ON = pin LOW
    inverted: bool,
    half_period_ms: u32,
    /// Current logical state (true = light on)
    lit: bool,
}

impl<P: OutputPin> Beacon<P> {
    /// Create a new beacon output, dark
    ///
    /// # Arguments
    /// - `pin`: the GPIO pin driving the light
    /// - `inverted`: if true, the light is ON when the pin is LOW
    /// - `half_period_ms`: blink half period (clamped to at least 1 ms)
    pub fn new(pin: P, inverted: bool, half_period_ms: u32) -> Self {
        let mut beacon = Self {
            pin,
            inverted,
            half_period_ms: half_period_ms.max(1),
            lit: false,
        };
        // Ensure the light starts dark
        beacon.set_lit(false);
        beacon
    }

    /// Create a new beacon with an active-high pin
    pub fn new_active_high(pin: P, half_period_ms: u32) -> Self {
        Self::new(pin, false, half_period_ms)
    }

    /// Create a new beacon with an active-low pin
    pub fn new_active_low(pin: P, half_period_ms: u32) -> Self {
        Self::new(pin, true, half_period_ms)
    }

    /// Whether the light is currently on
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    fn set_lit(&mut self, lit: bool) {
        self.lit = lit;

        if lit != self.inverted {
            self.pin.set_high().ok();
        } else {
            self.pin.set_low().ok();
        }
    }

    /// Drive the pin for the given pattern at the given time
    pub fn render(&mut self, pattern: LightPattern, now_ms: u32) {
        let lit = match pattern {
            LightPattern::Off => false,
            LightPattern::Solid => true,
            LightPattern::Blink => (now_ms / self.half_period_ms) % 2 == 0,
        };
        self.set_lit(lit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    /// Mock GPIO pin for testing
    struct MockPin {
        high: bool,
    }

    impl MockPin {
        fn new() -> Self {
            Self { high: false }
        }
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }
    }

    #[test]
    fn test_starts_dark() {
        let beacon = Beacon::new_active_high(MockPin::new(), 500);
        assert!(!beacon.is_lit());
        assert!(!beacon.pin.high);
    }

    #[test]
    fn test_solid_lights_pin() {
        let mut beacon = Beacon::new_active_high(MockPin::new(), 500);

        beacon.render(LightPattern::Solid, 0);
        assert!(beacon.is_lit());
        assert!(beacon.pin.high);

        beacon.render(LightPattern::Off, 10_000);
        assert!(!beacon.is_lit());
        assert!(!beacon.pin.high);
    }

    #[test]
    fn test_blink_follows_clock_phase() {
        let mut beacon = Beacon::new_active_high(MockPin::new(), 500);

        beacon.render(LightPattern::Blink, 0);
        assert!(beacon.is_lit());
        beacon.render(LightPattern::Blink, 499);
        assert!(beacon.is_lit());

        beacon.render(LightPattern::Blink, 500);
        assert!(!beacon.is_lit());
        beacon.render(LightPattern::Blink, 999);
        assert!(!beacon.is_lit());

        beacon.render(LightPattern::Blink, 1000);
        assert!(beacon.is_lit());
    }

    #[test]
    fn test_active_low_inverts_pin() {
        let mut beacon = Beacon::new_active_low(MockPin::new(), 500);

        // Dark means the pin rests high for active-low wiring
        assert!(beacon.pin.high);

        beacon.render(LightPattern::Solid, 0);
        assert!(beacon.is_lit());
        assert!(!beacon.pin.high);
    }

    #[test]
    fn test_zero_half_period_clamped() {
        let mut beacon = Beacon::new_active_high(MockPin::new(), 0);

        // Must not divide by zero
        beacon.render(LightPattern::Blink, 7);
        beacon.render(LightPattern::Blink, 8);
    }
}
