use std::io::{self, Write};

use crate::station::Station;

/// Final, key-sorted aggregation result. Built by consuming a table, so
/// nothing can be recorded into it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary<'a> {
    stations: Vec<Station<'a>>,
}

impl<'a> Summary<'a> {
    /// Sorts by key bytes; a key sorts before any longer key it prefixes.
    pub fn from_stations(mut stations: Vec<Station<'a>>) -> Self {
        stations.sort_unstable_by(|a, b| a.key().cmp(b.key()));
        Self { stations }
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Station<'a>> {
        self.stations.iter()
    }

    pub fn get(&self, key: &[u8]) -> Option<&Station<'a>> {
        self.stations
            .binary_search_by(|st| st.key().cmp(key))
            .ok()
            .map(|i| &self.stations[i])
    }

    /// Renders `{Key=min/mean/max, ...}` followed by a newline. Keys are
    /// written as raw bytes.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(b"{")?;
        for (i, st) in self.stations.iter().enumerate() {
            if i > 0 {
                out.write_all(b", ")?;
            }
            out.write_all(st.key())?;
            write!(out, "={}/{:.1}/{}", st.min(), st.mean(), st.max())?;
        }
        out.write_all(b"}\n")
    }
}

impl<'s, 'a> IntoIterator for &'s Summary<'a> {
    type Item = &'s Station<'a>;
    type IntoIter = std::slice::Iter<'s, Station<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
