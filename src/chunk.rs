use std::ops::Range;

use memchr::memchr;

/// Cuts `buf` into `count` contiguous ranges (at least one) that together
/// cover it. Every range except the last ends just past a newline, or at
/// the end of the buffer once the data runs out; trailing ranges may then
/// be empty.
pub fn split_ranges(buf: &[u8], count: usize) -> Vec<Range<usize>> {
    let count = count.max(1);
    let len = buf.len();
    let approx = len / count;

    let mut ranges = Vec::with_capacity(count);
    let mut start = 0;
    for _ in 1..count {
        let probe = (start + approx).saturating_sub(1).max(start);
        let end = if probe >= len {
            len
        } else {
            memchr(b'\n', &buf[probe..]).map_or(len, |i| probe + i + 1)
        };
        ranges.push(start..end);
        start = end;
    }
    ranges.push(start..len);
    ranges
}

pub fn split(buf: &[u8], count: usize) -> Vec<&[u8]> {
    split_ranges(buf, count)
        .into_iter()
        .map(|range| &buf[range])
        .collect()
}
