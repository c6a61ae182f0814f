//! Straightforward line-by-line aggregator. Slower than the table path but
//! validates every line, so it doubles as a cross-check on unknown input.

use ahash::AHashMap;
use memchr::memchr;
use tracing::trace;

use crate::error::Error;
use crate::fixed::Tenths;
use crate::hash::fnv1a;
use crate::station::Station;
use crate::summary::Summary;

const PROGRESS_EVERY: usize = 1_000_000;

pub fn aggregate(buf: &[u8]) -> Result<Summary<'_>, Error> {
    let mut stations: AHashMap<&[u8], Station<'_>> = AHashMap::with_capacity(10_000);

    let mut start = 0;
    let mut line = 0;
    while start < buf.len() {
        let end = memchr(b'\n', &buf[start..]).map_or(buf.len(), |i| start + i);
        let raw = buf[start..end].trim_ascii();
        start = end + 1;
        line += 1;
        if line % PROGRESS_EVERY == 0 {
            trace!(line, "reference scan progress");
        }
        if raw.is_empty() {
            continue;
        }

        let sep = memchr(b';', raw).ok_or(Error::MissingSeparator { line })?;
        let (name, text) = (&raw[..sep], &raw[sep + 1..]);
        let value = parse_measurement(text).ok_or_else(|| Error::InvalidMeasurement {
            line,
            text: String::from_utf8_lossy(text).into_owned(),
        })?;

        match stations.get_mut(name) {
            Some(st) => st.add_measurement(value),
            None => {
                stations.insert(name, Station::new(name, fnv1a(name), value));
            }
        }
    }

    Ok(Summary::from_stations(stations.into_values().collect()))
}

fn parse_measurement(text: &[u8]) -> Option<Tenths> {
    let value: f64 = lexical_core::parse(text).ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(Tenths((value * 10.0).round() as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregates_and_sorts() {
        let summary = aggregate(b"B;2.0\nA;1.0\nA;3.0\n").unwrap();
        let a = summary.get(b"A").unwrap();
        assert_eq!((a.count(), a.min(), a.max()), (2, Tenths(10), Tenths(30)));
        assert_eq!(summary.iter().next().unwrap().key(), b"A");
    }

    #[test]
    fn tolerates_blank_lines_and_crlf() {
        let summary = aggregate(b"A;1.5\r\n\nA;-2.5").unwrap();
        let a = summary.get(b"A").unwrap();
        assert_eq!((a.count(), a.sum()), (2, -10));
    }

    #[test]
    fn accepts_wider_numbers() {
        let summary = aggregate(b"A;7\nA;1.25\n").unwrap();
        let a = summary.get(b"A").unwrap();
        assert_eq!((a.min(), a.max()), (Tenths(13), Tenths(70)));
    }

    #[test]
    fn reports_missing_separator() {
        let err = aggregate(b"A;1.0\nbroken\n").unwrap_err();
        assert!(matches!(err, Error::MissingSeparator { line: 2 }));
    }

    #[test]
    fn reports_bad_number() {
        let err = aggregate(b"A;x1\n").unwrap_err();
        match err {
            Error::InvalidMeasurement { line, text } => {
                assert_eq!(line, 1);
                assert_eq!(text, "x1");
            }
            other => panic!("unexpected error {other}"),
        }
    }
}
