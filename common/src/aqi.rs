//! Air-quality scoring for deployments whose device does not report its own
//! index (the gateway trusts a device-supplied index; the simulator scores
//! its readings with this).

/// 0-100 comfort index. Starts at 100 and subtracts one penalty tier per
/// dimension: temperature outside the 20-24 °C comfort band (heavier outside
/// 18-26), then gas and dust threshold tiers. Clamped to the scale.
pub fn compute_index(temperature: f64, gas: u32, dust: u32) -> u8 {
    let mut score: i32 = 100;

    score -= if !(18.0..=26.0).contains(&temperature) {
        15
    } else if !(20.0..=24.0).contains(&temperature) {
        5
    } else {
        0
    };

    score -= match gas {
        g if g > 1000 => 40,
        g if g > 800 => 25,
        g if g > 500 => 10,
        _ => 0,
    };

    score -= match dust {
        d if d > 150 => 40,
        d if d > 100 => 25,
        d if d > 50 => 10,
        _ => 0,
    };

    score.clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comfortable_room_scores_full() {
        assert_eq!(compute_index(22.0, 400, 30), 100);
    }

    #[test]
    fn worst_case_bottoms_out_at_the_floor() {
        // Heaviest tier in every dimension: 100 - 15 - 40 - 40.
        assert_eq!(compute_index(15.0, 1100, 200), 5);
    }

    #[test]
    fn single_tier_applies_per_dimension() {
        assert_eq!(compute_index(25.0, 600, 60), 75);
    }

    #[test]
    fn tier_boundaries_are_exclusive() {
        assert_eq!(compute_index(22.0, 500, 50), 100);
        assert_eq!(compute_index(22.0, 501, 51), 80);
        assert_eq!(compute_index(22.0, 1000, 150), 50);
        assert_eq!(compute_index(22.0, 1001, 151), 20);
    }

    #[test]
    fn temperature_band_edges() {
        assert_eq!(compute_index(20.0, 0, 0), 100);
        assert_eq!(compute_index(24.0, 0, 0), 100);
        assert_eq!(compute_index(19.9, 0, 0), 95);
        assert_eq!(compute_index(24.1, 0, 0), 95);
        assert_eq!(compute_index(17.9, 0, 0), 85);
        assert_eq!(compute_index(26.1, 0, 0), 85);
    }
}
