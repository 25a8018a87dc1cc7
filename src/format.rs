/// Magnitude from which [`format_distance_m`] prints an infinity sign by default.
pub const INFINITY_LIMIT_M: f64 = 1e6;

/// Depths of field reaching this far are shown as infinite; it sits just past
/// the far end of the focus scale.
pub const DEPTH_INFINITY_LIMIT_M: f64 = 999.5;

const UNITS: [(f64, f64, &str); 4] = [
    // (upper bound in m, multiplier, unit)
    (0.001, 1e6, "µm"),
    (0.01, 1e3, "mm"),
    (1.0, 1e2, "cm"),
    (1000.0, 1.0, "m"),
];

/// Human readable distance with 3 significant digits in the unit that suits
/// its magnitude, e.g. `"500 µm"`, `"3.5 m"`, `"1.5 km"`.
///
/// Anything with a magnitude of `infinity_limit_m` or more prints as `inf` or
/// `-inf`.
pub fn format_distance_m(distance_m: f64, infinity_limit_m: f64) -> String {
    if distance_m.is_nan() {
        return "NaN".to_owned();
    }

    let magnitude = distance_m.abs();
    if magnitude >= infinity_limit_m {
        let sign = if distance_m.is_sign_negative() { "-" } else { "" };
        return format!("{sign}inf");
    }

    let (multiplier, unit) = UNITS
        .iter()
        .find(|(upper, _, _)| magnitude < *upper)
        .map(|&(_, multiplier, unit)| (multiplier, unit))
        .unwrap_or((1e-3, "km"));

    format!("{} {}", significant(distance_m * multiplier, 3), unit)
}

/// Depth of field text, `"infinite"` once the far bound runs off the scale.
pub fn format_depth_m(depth_m: f64) -> String {
    match format_distance_m(depth_m, DEPTH_INFINITY_LIMIT_M).as_str() {
        "inf" => "infinite".to_owned(),
        formatted => formatted.to_owned(),
    }
}

/// `printf("%.*g")`: `digits` significant digits, trailing zeros dropped,
/// exponent notation for very small or large values.
pub fn significant(x: f64, digits: usize) -> String {
    if x == 0.0 {
        return "0".to_owned();
    }

    let precision = digits.max(1);
    let scientific = format!("{:.*e}", precision - 1, x);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exponent) => (mantissa, exponent),
            Err(_) => return scientific,
        },
        // inf
        None => return scientific,
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(mantissa), sign, exponent.abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        trim_zeros(&format!("{:.*}", decimals, x)).to_owned()
    }
}

fn trim_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
