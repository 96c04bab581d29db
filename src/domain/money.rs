use std::fmt;

/// Money is held as integer cents to keep arithmetic exact.
/// $50.00 is 5000 cents.
pub type Cents = i64;

/// Format cents as a decimal string: 5000 -> "50.00", -1 -> "-0.01".
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let magnitude = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, magnitude / 100, magnitude % 100)
}

/// Parse a decimal string into cents: "50" -> 5000, "12.5" -> 1250.
/// At most two fractional digits are accepted.
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };

    let (units_str, frac_str) = match digits.split_once('.') {
        Some((units, frac)) => (units, frac),
        None => (digits, ""),
    };

    if units_str.is_empty() && frac_str.is_empty() {
        return Err(ParseCentsError::InvalidFormat);
    }
    if !units_str.bytes().all(|b| b.is_ascii_digit())
        || !frac_str.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(ParseCentsError::InvalidFormat);
    }
    if frac_str.len() > 2 {
        return Err(ParseCentsError::TooPrecise);
    }

    let units: i64 = if units_str.is_empty() {
        0
    } else {
        units_str.parse().map_err(|_| ParseCentsError::Overflow)?
    };
    let frac: i64 = match frac_str.len() {
        0 => 0,
        // a lone digit is tenths: "12.5" means 12.50
        1 => frac_str.parse::<i64>().unwrap() * 10,
        _ => frac_str.parse().unwrap(),
    };

    let cents = units
        .checked_mul(100)
        .and_then(|c| c.checked_add(frac))
        .ok_or(ParseCentsError::Overflow)?;

    Ok(if negative { -cents } else { cents })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCentsError {
    InvalidFormat,
    TooPrecise,
    Overflow,
}

impl fmt::Display for ParseCentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCentsError::InvalidFormat => write!(f, "invalid money format"),
            ParseCentsError::TooPrecise => write!(f, "amounts have at most two decimal places"),
            ParseCentsError::Overflow => write!(f, "amount is out of range"),
        }
    }
}

impl std::error::Error for ParseCentsError {}
