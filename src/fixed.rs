use std::fmt;

/// A decimal with exactly one fractional digit, stored as `value * 10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tenths(pub i32);

impl Tenths {
    #[inline]
    pub const fn from_parts(negative: bool, whole: i32, frac: i32) -> Self {
        let magnitude = whole * 10 + frac;
        if negative {
            Self(-magnitude)
        } else {
            Self(magnitude)
        }
    }

    #[inline]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Tenths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{}", sign, abs / 10, abs % 10)
    }
}
