//! Number formatting for warning texts, matching what the browser renders
//! for the same values.

/// `value` with exactly `digits` decimals.
///
/// Rounds half away from zero on the exact binary value, so 0.03125 becomes
/// "0.0313" where `{:.4}` would give "0.0312". Magnitudes of 1e21 and above
/// fall back to [`number`].
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() || value.abs() >= 1e21 {
        return number(value);
    }

    // Every f64 has a terminating decimal expansion of at most 1074 digits
    let exact = format!("{:.1100}", value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(digits))
        .collect();
    let round_up = frac_part.as_bytes().get(digits).is_some_and(|d| *d >= b'5');

    if round_up {
        let mut carry = true;
        for d in kept.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, b'1');
        }
    }

    let split = kept.len() - digits;
    let mut out = String::with_capacity(kept.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    out.extend(kept[..split].iter().map(|&d| d as char));
    if digits > 0 {
        out.push('.');
        out.extend(kept[split..].iter().map(|&d| d as char));
    }
    out
}

/// Shortest text that reads back as `value`. Very large and very small
/// magnitudes switch to exponent form (`1e+21`, `1.5e-7`).
pub fn number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let exp = format!("{:e}", value);
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
            _ => exp,
        };
    }
    format!("{}", value)
}
