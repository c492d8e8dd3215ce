//! Table-driven trigonometry on turn fractions
//!
//! Angles are fractions of a full turn (1.0 = 360 degrees), not radians.
//! Values come from a 257-entry quarter-wave sine table with linear
//! interpolation between neighbouring entries.

use std::f32::consts::FRAC_PI_2;

/// Number of entries in the quarter-wave table (both endpoints included)
pub const TABLE_SIZE: usize = 257;

const LAST: usize = TABLE_SIZE - 1;

/// Angle in radians between two neighbouring table entries
const STEP_SIZE: f32 = FRAC_PI_2 / LAST as f32;

/// sin(i / 256 * pi / 2) for i in 0..=256
#[rustfmt::skip]
const TABLE: [f32; TABLE_SIZE] = [
    0.0000000, 0.0061359, 0.0122715, 0.0184067, 0.0245412, 0.0306748,
    0.0368072, 0.0429383, 0.0490677, 0.0551952, 0.0613207, 0.0674439,
    0.0735646, 0.0796824, 0.0857973, 0.0919090, 0.0980171, 0.1041216,
    0.1102222, 0.1163186, 0.1224107, 0.1284981, 0.1345807, 0.1406582,
    0.1467305, 0.1527972, 0.1588581, 0.1649131, 0.1709619, 0.1770042,
    0.1830399, 0.1890687, 0.1950903, 0.2011046, 0.2071114, 0.2131103,
    0.2191012, 0.2250839, 0.2310581, 0.2370236, 0.2429802, 0.2489276,
    0.2548657, 0.2607941, 0.2667128, 0.2726214, 0.2785197, 0.2844075,
    0.2902847, 0.2961509, 0.3020059, 0.3078496, 0.3136817, 0.3195020,
    0.3253103, 0.3311063, 0.3368899, 0.3426607, 0.3484187, 0.3541635,
    0.3598950, 0.3656130, 0.3713172, 0.3770074, 0.3826834, 0.3883450,
    0.3939920, 0.3996242, 0.4052413, 0.4108432, 0.4164296, 0.4220003,
    0.4275551, 0.4330938, 0.4386162, 0.4441221, 0.4496113, 0.4550836,
    0.4605387, 0.4659765, 0.4713967, 0.4767992, 0.4821838, 0.4875502,
    0.4928982, 0.4982277, 0.5035384, 0.5088301, 0.5141027, 0.5193560,
    0.5245897, 0.5298036, 0.5349976, 0.5401715, 0.5453250, 0.5504580,
    0.5555702, 0.5606616, 0.5657318, 0.5707807, 0.5758082, 0.5808140,
    0.5857979, 0.5907597, 0.5956993, 0.6006165, 0.6055110, 0.6103828,
    0.6152316, 0.6200572, 0.6248595, 0.6296382, 0.6343933, 0.6391244,
    0.6438315, 0.6485144, 0.6531728, 0.6578067, 0.6624158, 0.6669999,
    0.6715590, 0.6760927, 0.6806010, 0.6850837, 0.6895405, 0.6939715,
    0.6983762, 0.7027547, 0.7071068, 0.7114322, 0.7157308, 0.7200025,
    0.7242471, 0.7284644, 0.7326543, 0.7368166, 0.7409511, 0.7450578,
    0.7491364, 0.7531868, 0.7572088, 0.7612024, 0.7651673, 0.7691033,
    0.7730105, 0.7768885, 0.7807372, 0.7845566, 0.7883464, 0.7921066,
    0.7958369, 0.7995373, 0.8032075, 0.8068476, 0.8104572, 0.8140363,
    0.8175848, 0.8211025, 0.8245893, 0.8280450, 0.8314696, 0.8348629,
    0.8382247, 0.8415550, 0.8448536, 0.8481203, 0.8513552, 0.8545580,
    0.8577286, 0.8608669, 0.8639729, 0.8670462, 0.8700870, 0.8730950,
    0.8760701, 0.8790122, 0.8819213, 0.8847971, 0.8876396, 0.8904487,
    0.8932243, 0.8959662, 0.8986745, 0.9013488, 0.9039893, 0.9065957,
    0.9091680, 0.9117060, 0.9142098, 0.9166791, 0.9191139, 0.9215140,
    0.9238795, 0.9262102, 0.9285061, 0.9307670, 0.9329928, 0.9351835,
    0.9373390, 0.9394592, 0.9415441, 0.9435935, 0.9456073, 0.9475856,
    0.9495282, 0.9514350, 0.9533060, 0.9551412, 0.9569403, 0.9587035,
    0.9604305, 0.9621214, 0.9637761, 0.9653944, 0.9669765, 0.9685221,
    0.9700313, 0.9715039, 0.9729400, 0.9743394, 0.9757021, 0.9770281,
    0.9783174, 0.9795698, 0.9807853, 0.9819639, 0.9831055, 0.9842101,
    0.9852776, 0.9863081, 0.9873014, 0.9882576, 0.9891765, 0.9900582,
    0.9909026, 0.9917098, 0.9924795, 0.9932119, 0.9939070, 0.9945646,
    0.9951847, 0.9957674, 0.9963126, 0.9968203, 0.9972905, 0.9977231,
    0.9981181, 0.9984756, 0.9987955, 0.9990777, 0.9993224, 0.9995294,
    0.9996988, 0.9998306, 0.9999247, 0.9999812, 1.0000000,
];

/// How a quadrant reads the quarter-wave table
#[derive(Debug, Clone, Copy)]
struct Quadrant {
    /// Read the table backwards (index reflected against the last entry)
    mirror: bool,
    /// Negate the looked-up value
    flip: bool,
}

const fn q(mirror: bool, flip: bool) -> Quadrant {
    Quadrant { mirror, flip }
}

const SIN_QUADRANTS: [Quadrant; 4] = [q(false, false), q(true, false), q(false, true), q(true, true)];
const COS_QUADRANTS: [Quadrant; 4] = [q(true, false), q(false, true), q(true, true), q(false, false)];

/// Reduce a turn to [0, 1)
fn wrap_turn(turn: f32) -> f32 {
    let t = turn - turn.trunc();
    if t < 0.0 {
        t + 1.0
    } else {
        t
    }
}

fn lookup(turn: f32, quadrants: &[Quadrant; 4]) -> f32 {
    let t = wrap_turn(turn);
    let quadrant = ((t * 4.0) as usize).min(3);
    let offset = t - quadrant as f32 * 0.25;
    let policy = quadrants[quadrant];

    let mut index = offset * 4.0 * LAST as f32;
    if policy.mirror {
        index = LAST as f32 - index;
    }
    // Mirrored quadrants land exactly on the last entry at their start, and
    // rounding of `t` near 1.0 can do the same; i1 must stay in the table.
    let index = index.clamp(0.0, LAST as f32);
    let i0 = index as usize;
    let i1 = (i0 + 1).min(LAST);

    let slope = (TABLE[i1] - TABLE[i0]) / STEP_SIZE;
    let value = TABLE[i0] + slope * ((index - i0 as f32) * STEP_SIZE);

    if policy.flip {
        -value
    } else {
        value
    }
}

/// Sine of an angle given as a turn fraction
pub fn m_sin(turn: f32) -> f32 {
    lookup(turn, &SIN_QUADRANTS)
}

/// Cosine of an angle given as a turn fraction
pub fn m_cos(turn: f32) -> f32 {
    lookup(turn, &COS_QUADRANTS)
}

/// Tangent; infinite or NaN where the cosine is exactly zero
pub fn m_tan(turn: f32) -> f32 {
    m_sin(turn) / m_cos(turn)
}

/// Cotangent; infinite or NaN where the sine is exactly zero
pub fn m_cotan(turn: f32) -> f32 {
    m_cos(turn) / m_sin(turn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    const EPS: f32 = 1e-3;

    #[test]
    fn test_landmarks() {
        assert!(m_sin(0.0).abs() < EPS);
        assert!((m_cos(0.0) - 1.0).abs() < EPS);
        assert!((m_sin(0.25) - 1.0).abs() < EPS);
        assert!(m_cos(0.25).abs() < EPS);
        assert!(m_sin(0.5).abs() < EPS);
        assert!((m_cos(0.5) + 1.0).abs() < EPS);
        assert!((m_sin(0.75) + 1.0).abs() < EPS);
        assert!(m_cos(0.75).abs() < EPS);
    }

    #[test]
    fn test_matches_libm() {
        for i in -400..=400 {
            let turn = i as f32 / 97.0;
            assert!((m_sin(turn) - (turn * TAU).sin()).abs() < EPS, "sin at {}", turn);
            assert!((m_cos(turn) - (turn * TAU).cos()).abs() < EPS, "cos at {}", turn);
        }
    }

    #[test]
    fn test_periodic() {
        for i in 0..200 {
            let turn = i as f32 / 200.0 - 0.5;
            assert!((m_sin(turn) - m_sin(turn + 1.0)).abs() < EPS);
            assert!((m_cos(turn) - m_cos(turn + 1.0)).abs() < EPS);
            assert!((m_sin(turn) - m_sin(turn - 1.0)).abs() < EPS);
        }
    }

    #[test]
    fn test_negative_turns_wrap() {
        assert!((m_sin(-0.25) + 1.0).abs() < EPS);
        assert!((m_cos(-0.5) + 1.0).abs() < EPS);
        // Rounds to 1.0 after wrapping; must not index past the table
        assert!(m_sin(-1e-9).abs() < EPS);
    }

    #[test]
    fn test_tan_and_cotan() {
        assert!((m_tan(0.125) - 1.0).abs() < 2.0 * EPS);
        assert!((m_cotan(0.125) - 1.0).abs() < 2.0 * EPS);
        // Unguarded division by an exact zero
        assert!(!m_cotan(0.0).is_finite());
    }
}
