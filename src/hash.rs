//! 32-bit FNV-1a, folded one byte at a time so the parser can hash a key
//! while it scans for the separator.

pub const OFFSET_BASIS: u32 = 2_166_136_261;
pub const PRIME: u32 = 16_777_619;

#[derive(Debug, Clone, Copy)]
pub struct Fnv1a(u32);

impl Fnv1a {
    #[inline]
    pub const fn new() -> Self {
        Self(OFFSET_BASIS)
    }

    #[inline(always)]
    pub fn write_byte(&mut self, byte: u8) {
        self.0 = (self.0 ^ u32::from(byte)).wrapping_mul(PRIME);
    }

    #[inline]
    pub const fn finish(self) -> u32 {
        self.0
    }
}

impl Default for Fnv1a {
    fn default() -> Self {
        Self::new()
    }
}

pub fn fnv1a(bytes: &[u8]) -> u32 {
    let mut state = Fnv1a::new();
    for &b in bytes {
        state.write_byte(b);
    }
    state.finish()
}
