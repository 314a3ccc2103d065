//! Degrees/radians conversion, consulted by the trig functions only.

use std::f64::consts::PI;

pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * (PI / 180.0)
}

pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * (180.0 / PI)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn quarter_turn() {
        assert!(close(degrees_to_radians(90.0), PI / 2.0));
        assert!(close(radians_to_degrees(PI / 2.0), 90.0));
    }

    #[test]
    fn round_trip() {
        for d in [-720.0, -33.3, 0.0, 1.0, 45.0, 180.0, 1234.5] {
            assert!(close(radians_to_degrees(degrees_to_radians(d)), d));
        }
    }

    #[test]
    fn agrees_with_std() {
        for d in [12.5, 60.0, 300.0] {
            assert!(close(degrees_to_radians(d), d.to_radians()));
        }
    }
}
