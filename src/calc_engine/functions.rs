//! Fixed function and constant tables.
//!
//! Both tables are read-only static data, safe to consult from concurrent
//! evaluations.

use super::angle;
use super::{AngleMode, Failure};

/// Whether and how a function cares about the angle mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleRole {
    /// Angle-neutral: log, ln, sqrt, cbrt.
    Neutral,
    /// Takes an angle: sin, cos, tan. In degrees mode the argument is
    /// converted to radians before the native call.
    Forward,
    /// Returns an angle: asin, acos, atan. In degrees mode the radian
    /// result is converted to degrees.
    Inverse,
}

pub struct FunctionDef {
    pub name: &'static str,
    pub role: AngleRole,
    pub in_domain: fn(f64) -> bool,
    pub apply: fn(f64) -> f64,
}

fn any(_: f64) -> bool {
    true
}

fn non_negative(x: f64) -> bool {
    x >= 0.0
}

fn positive(x: f64) -> bool {
    x > 0.0
}

fn unit_interval(x: f64) -> bool {
    (-1.0..=1.0).contains(&x)
}

// Longest names first so the lexer's greedy match sees "asin" before "sin".
pub const FUNCTIONS: &[FunctionDef] = &[
    FunctionDef { name: "asin", role: AngleRole::Inverse, in_domain: unit_interval, apply: f64::asin },
    FunctionDef { name: "acos", role: AngleRole::Inverse, in_domain: unit_interval, apply: f64::acos },
    FunctionDef { name: "atan", role: AngleRole::Inverse, in_domain: any, apply: f64::atan },
    FunctionDef { name: "sqrt", role: AngleRole::Neutral, in_domain: non_negative, apply: f64::sqrt },
    FunctionDef { name: "cbrt", role: AngleRole::Neutral, in_domain: any, apply: f64::cbrt },
    FunctionDef { name: "sin", role: AngleRole::Forward, in_domain: any, apply: f64::sin },
    FunctionDef { name: "cos", role: AngleRole::Forward, in_domain: any, apply: f64::cos },
    FunctionDef { name: "tan", role: AngleRole::Forward, in_domain: any, apply: f64::tan },
    FunctionDef { name: "log", role: AngleRole::Neutral, in_domain: positive, apply: f64::log10 },
    FunctionDef { name: "ln", role: AngleRole::Neutral, in_domain: positive, apply: f64::ln },
];

pub const CONSTANTS: &[(&str, f64)] = &[
    ("pi", std::f64::consts::PI),
    ("e", std::f64::consts::E),
];

pub fn lookup(name: &str) -> Option<&'static FunctionDef> {
    FUNCTIONS.iter().find(|def| def.name == name)
}

pub fn constant(name: &str) -> Option<f64> {
    CONSTANTS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, v)| *v)
}

/// Applies `def` to `argument`: domain check first, then the angle
/// conversion the role demands, then the native call.
pub fn call(def: &FunctionDef, argument: f64, mode: AngleMode) -> Result<f64, Failure> {
    if !(def.in_domain)(argument) {
        return Err(Failure::DomainError {
            function: def.name,
            argument,
        });
    }

    let x = match (def.role, mode) {
        (AngleRole::Forward, AngleMode::Degrees) => angle::degrees_to_radians(argument),
        _ => argument,
    };
    let y = (def.apply)(x);
    let y = match (def.role, mode) {
        (AngleRole::Inverse, AngleMode::Degrees) => angle::radians_to_degrees(y),
        _ => y,
    };

    if y.is_finite() {
        Ok(y)
    } else {
        Err(Failure::NonFiniteResult)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn lookup_knows_the_whole_table() {
        for name in ["sin", "cos", "tan", "asin", "acos", "atan", "log", "ln", "sqrt", "cbrt"] {
            assert!(lookup(name).is_some(), "missing {name}");
        }
        assert!(lookup("sinh").is_none());
    }

    #[test]
    fn forward_trig_converts_argument_in_degrees() {
        let sin = lookup("sin").unwrap();
        assert!(close(call(sin, 30.0, AngleMode::Degrees).unwrap(), 0.5));
        assert!(close(
            call(sin, std::f64::consts::FRAC_PI_6, AngleMode::Radians).unwrap(),
            0.5
        ));
    }

    #[test]
    fn inverse_trig_converts_result_in_degrees() {
        let asin = lookup("asin").unwrap();
        assert!(close(call(asin, 1.0, AngleMode::Degrees).unwrap(), 90.0));
        assert!(close(
            call(asin, 1.0, AngleMode::Radians).unwrap(),
            std::f64::consts::FRAC_PI_2
        ));
    }

    #[test]
    fn domain_check_precedes_the_math_call() {
        let sqrt = lookup("sqrt").unwrap();
        assert_eq!(
            call(sqrt, -4.0, AngleMode::Degrees),
            Err(Failure::DomainError {
                function: "sqrt",
                argument: -4.0
            })
        );
        let log = lookup("log").unwrap();
        assert!(matches!(
            call(log, 0.0, AngleMode::Degrees),
            Err(Failure::DomainError { .. })
        ));
    }

    #[test]
    fn constants_resolve() {
        assert!(close(constant("pi").unwrap(), std::f64::consts::PI));
        assert!(close(constant("e").unwrap(), std::f64::consts::E));
        assert!(constant("phi").is_none());
    }
}
