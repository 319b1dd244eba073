use crate::error::SimulationError;
use glam::Vec4;
use rand::Rng;

// --- Helper Functions ---

/// Uniform integer in the inclusive range `[ceil(min), floor(max)]`.
///
/// Fails with [`SimulationError::InvalidRange`] when the range is empty or a
/// bound is not finite. No entropy is consumed in that case.
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> Result<i64, SimulationError> {
    let lo = min.ceil();
    let hi = max.floor();
    if !lo.is_finite() || !hi.is_finite() || lo > hi {
        return Err(SimulationError::InvalidRange { min, max });
    }
    Ok(rng.gen_range(lo as i64..=hi as i64))
}

// hsl_to_rgba: h in degrees, s and l in [0, 1]
pub fn hsl_to_rgba(h: f32, s: f32, l: f32) -> Vec4 {
    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h_prime = (h % 360.0) / 60.0;
    let x = chroma * (1.0 - (h_prime % 2.0 - 1.0).abs());
    let (r, g, b) = match h_prime as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = l - chroma / 2.0;
    Vec4::new(
        (r + m).clamp(0.0, 1.0),
        (g + m).clamp(0.0, 1.0),
        (b + m).clamp(0.0, 1.0),
        1.0,
    )
}
