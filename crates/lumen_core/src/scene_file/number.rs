//! Numeric token scanning for scene files.

/// How numeric tokens in a scene file are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberMode {
    /// Legacy scanner: optional sign, integer digits and an optional
    /// `.fraction`, stopping silently at the first other character.
    /// Exponents are not understood and garbage reads as zero.
    #[default]
    Lenient,

    /// Standard float syntax; malformed tokens and colour channels
    /// outside `0..=255` are rejected.
    Strict,
}

impl NumberMode {
    /// Parse a real number, or `None` if this mode rejects the token.
    pub fn parse_f64(self, token: &str) -> Option<f64> {
        match self {
            NumberMode::Lenient => Some(scan_f64(token)),
            NumberMode::Strict => token.parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }

    /// Parse an integer colour channel.
    pub fn parse_channel(self, token: &str) -> Option<i32> {
        match self {
            NumberMode::Lenient => Some(scan_f64(token).trunc() as i32),
            NumberMode::Strict => token.parse::<i32>().ok(),
        }
    }
}

/// Prefix scan of `[+-]digits[.digits]`; whatever follows is ignored.
pub fn scan_f64(token: &str) -> f64 {
    let bytes = token.trim().as_bytes();
    let mut i = 0;
    let mut sign = 1.0;

    if let Some(&c) = bytes.first() {
        if c == b'-' || c == b'+' {
            if c == b'-' {
                sign = -1.0;
            }
            i += 1;
        }
    }

    let mut value = 0.0;
    while let Some(&c) = bytes.get(i) {
        if !c.is_ascii_digit() {
            break;
        }
        value = value * 10.0 + f64::from(c - b'0');
        i += 1;
    }

    if bytes.get(i) == Some(&b'.') {
        i += 1;
        let mut scale = 0.1;
        while let Some(&c) = bytes.get(i) {
            if !c.is_ascii_digit() {
                break;
            }
            value += f64::from(c - b'0') * scale;
            scale *= 0.1;
            i += 1;
        }
    }

    sign * value
}
