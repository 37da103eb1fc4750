//! Simulated indoor-air sensor. Readings wander deterministically from the
//! reference starting point; a running fan pulls gas and dust down while a
//! stopped fan lets them creep back up. With quirks enabled the rendered
//! payload reproduces the real firmware's defects so the gateway's repair
//! path gets exercised end to end.

use airmon_common::compute_index;

pub struct SimDevice {
    tick: u64,
    temperature: f64,
    gas: f64,
    dust: f64,
    fan_on: bool,
    quirks: bool,
}

impl SimDevice {
    pub fn new(quirks: bool) -> Self {
        Self {
            tick: 0,
            temperature: 22.5,
            gas: 420.0,
            dust: 35.0,
            fan_on: false,
            quirks,
        }
    }

    pub fn set_fan(&mut self, on: bool) {
        self.fan_on = on;
    }

    pub fn fan_on(&self) -> bool {
        self.fan_on
    }

    /// Advance one sample and render the status body the firmware would
    /// print. Hand-rendered rather than serialized so the quirk variants can
    /// emit text no JSON serializer would produce.
    pub fn sample(&mut self) -> String {
        self.step();

        let gas = self.gas.round() as u32;
        let dust = self.dust.round() as u32;
        let index = compute_index(self.temperature, gas, dust);

        // Every eighth read of the faulty firmware loses the dust sensor and
        // prints a bare nan; it also never prints the comma after "fan".
        let dust_field = if self.quirks && self.tick % 8 == 0 {
            "nan".to_string()
        } else {
            dust.to_string()
        };
        let fan_separator = if self.quirks { "" } else { "," };

        format!(
            "{{\"temperature\":{:.1},\"gas\":{},\"dust\":{},\"fan\":{}{}\"airQualityIndex\":{}}}",
            self.temperature, gas, dust_field, self.fan_on, fan_separator, index
        )
    }

    fn step(&mut self) {
        self.tick = self.tick.saturating_add(1);

        // Deterministic wander, -3..=3 scaled per reading.
        let jitter = (self.tick % 7) as f64 - 3.0;
        let fan_effect = if self.fan_on { -2.0 } else { 1.0 };

        self.temperature = (self.temperature + jitter * 0.1).clamp(15.0, 30.0);
        self.gas = (self.gas + jitter * 4.0 + fan_effect * 5.0).clamp(200.0, 1200.0);
        self.dust = (self.dust + jitter * 0.8 + fan_effect * 2.0).clamp(10.0, 200.0);
    }
}
