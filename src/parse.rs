use crate::fixed::Tenths;
use crate::hash::Fnv1a;

/// One `<key>;[-]<digits>.<digit>\n` record, borrowed from the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedRecord<'a> {
    pub key: &'a [u8],
    pub hash: u32,
    pub value: Tenths,
    /// Offset of the byte after the record's newline.
    pub next: usize,
}

/// Parses the record starting at `pos`, hashing the key in the same pass.
///
/// The input must be well formed: a `;` after the key, an optional `-`,
/// at least one whole digit, a `.`, one fractional digit and a newline.
/// Nothing is validated. Malformed input yields an arbitrary record or a
/// panic from an out-of-range index, never undefined behaviour.
///
/// A final record missing its newline is accepted; `next` is then one past
/// the end of `buf`.
#[inline]
pub fn parse_record(buf: &[u8], pos: usize) -> ParsedRecord<'_> {
    let start = pos;
    let mut pos = pos;

    let mut hash = Fnv1a::new();
    let mut byte = buf[pos];
    while byte != b';' {
        hash.write_byte(byte);
        pos += 1;
        byte = buf[pos];
    }
    let key = &buf[start..pos];
    pos += 1;

    let negative = buf[pos] == b'-';
    if negative {
        pos += 1;
    }

    let mut whole: i32 = 0;
    byte = buf[pos];
    while byte != b'.' {
        whole = whole * 10 + i32::from(byte.wrapping_sub(b'0'));
        pos += 1;
        byte = buf[pos];
    }
    pos += 1;

    let frac = i32::from(buf[pos].wrapping_sub(b'0'));

    ParsedRecord {
        key,
        hash: hash.finish(),
        value: Tenths::from_parts(negative, whole, frac),
        next: pos + 2,
    }
}

/// Iterates the records of a newline-aligned chunk.
pub fn records(chunk: &[u8]) -> Records<'_> {
    Records { buf: chunk, pos: 0 }
}

pub struct Records<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Iterator for Records<'a> {
    type Item = ParsedRecord<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.buf.len() {
            return None;
        }
        let record = parse_record(self.buf, self.pos);
        self.pos = record.next;
        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::fnv1a;

    #[test]
    fn parses_positive_record() {
        let rec = parse_record(b"Hamburg;12.3\n", 0);
        assert_eq!(rec.key, b"Hamburg");
        assert_eq!(rec.value, Tenths(123));
        assert_eq!(rec.next, 13);
        assert_eq!(rec.hash, fnv1a(b"Hamburg"));
    }

    #[test]
    fn parses_negative_record() {
        let rec = parse_record(b"Kiel;-5.0\n", 0);
        assert_eq!(rec.key, b"Kiel");
        assert_eq!(rec.value, Tenths(-50));
    }

    #[test]
    fn next_points_at_following_record() {
        let buf = b"Baltimore;-12.3\nblah;1.0\n";
        let first = parse_record(buf, 0);
        assert_eq!(first.value, Tenths(-123));
        assert_eq!(&buf[first.next..], b"blah;1.0\n");

        let second = parse_record(buf, first.next);
        assert_eq!(second.key, b"blah");
        assert_eq!(second.next, buf.len());
    }

    #[test]
    fn single_digit_whole_parts() {
        assert_eq!(parse_record(b"B;2.3\n", 0).value, Tenths(23));
        assert_eq!(parse_record(b"B;-2.3\n", 0).value, Tenths(-23));
        assert_eq!(parse_record(b"B;-0.0\n", 0).value, Tenths(0));
    }

    #[test]
    fn records_handles_missing_final_newline() {
        let got: Vec<_> = records(b"a;1.0\nb;-2.5")
            .map(|r| (r.key, r.value))
            .collect();
        assert_eq!(got, vec![(&b"a"[..], Tenths(10)), (&b"b"[..], Tenths(-25))]);
    }

    #[test]
    fn records_of_empty_chunk() {
        assert_eq!(records(b"").count(), 0);
    }

    #[test]
    fn multibyte_keys_are_kept_verbatim() {
        let rec = parse_record("Zürich;9.9\n".as_bytes(), 0);
        assert_eq!(rec.key, "Zürich".as_bytes());
        assert_eq!(rec.value, Tenths(99));
    }
}
