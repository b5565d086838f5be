//! Standard atmosphere (U.S. 1976, lowest three layers).
//!
//! | Layer        | Base (m) | Lapse (K/m) |
//! |--------------|----------|-------------|
//! | Troposphere  | 0        | -0.0065     |
//! | Tropopause   | 11 000   | 0           |
//! | Stratosphere | 20 000   | +0.001      |
//!
//! Each layer starts from the temperature and pressure at the top of the one
//! below, so both are continuous across layer boundaries. The last layer is
//! extended above its 32 km top.

/// Specific gas constant for dry air (J/(kg·K))
const R_SPECIFIC: f64 = 8.314462618 / 0.0289644;
/// Standard gravity used by the barometric formula (m/s²)
const G0: f64 = 9.80665;
/// Sea level temperature (K)
const T0: f64 = 288.15;
/// Sea level pressure (Pa)
const P0: f64 = 101_325.0;
const GAMMA: f64 = 1.4;

/// (base altitude m, temperature lapse K/m)
const LAYERS: [(f64, f64); 3] = [(0.0, -0.0065), (11_000.0, 0.0), (20_000.0, 0.001)];

/// Air properties at one altitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirProperties {
    pub temperature_k: f64,
    pub pressure_pa: f64,
    pub density_kgpm3: f64,
    pub speed_of_sound_mps: f64,
}

/// Temperature and pressure `dh` meters above a layer base.
fn climb(t_base: f64, p_base: f64, lapse: f64, dh: f64) -> (f64, f64) {
    if lapse == 0.0 {
        (t_base, p_base * (-G0 * dh / (R_SPECIFIC * t_base)).exp())
    } else {
        let t = t_base + lapse * dh;
        (t, p_base * (t / t_base).powf(-G0 / (R_SPECIFIC * lapse)))
    }
}

/// Air properties at `altitude_m`. Negative altitudes are clamped to sea level.
pub fn properties(altitude_m: f64) -> AirProperties {
    let h = altitude_m.max(0.0);

    let (mut temperature_k, mut pressure_pa) = (T0, P0);
    for (i, &(base, lapse)) in LAYERS.iter().enumerate() {
        let top = LAYERS.get(i + 1).map_or(f64::INFINITY, |next| next.0);
        (temperature_k, pressure_pa) = climb(temperature_k, pressure_pa, lapse, h.min(top) - base);
        if h <= top {
            break;
        }
    }

    AirProperties {
        temperature_k,
        pressure_pa,
        density_kgpm3: pressure_pa / (R_SPECIFIC * temperature_k),
        speed_of_sound_mps: (GAMMA * R_SPECIFIC * temperature_k).sqrt(),
    }
}
