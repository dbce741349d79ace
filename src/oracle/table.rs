use std::{
    collections::HashMap,
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};
use shakmaty::Chess;
use tracing::info;

use super::Oracle;
use crate::{
    error::ProbeError,
    position::{parse_position, position_key},
    types::{Dtz, WdlCode},
};

/// In-memory tablebase, keyed by position (clocks ignored).
///
/// Useful as a fixture, and as a fast-restore cache of results computed
/// elsewhere: [`TableOracle::save`] writes a JSON snapshot that
/// [`TableOracle::load`] reads back on the next start.
#[derive(Debug, Clone, Default)]
pub struct TableOracle {
    entries: HashMap<String, Entry>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Entry {
    wdl: Option<WdlCode>,
    dtz: Option<Dtz>,
}

/// One record of a snapshot file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub fen: String,
    #[serde(default)]
    pub wdl: Option<WdlCode>,
    #[serde(default)]
    pub dtz: Option<Dtz>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    entries: Vec<SnapshotEntry>,
}

impl TableOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the results for a position, replacing earlier ones.
    pub fn insert(&mut self, pos: &Chess, wdl: Option<WdlCode>, dtz: Option<Dtz>) {
        self.entries.insert(position_key(pos), Entry { wdl, dtz });
    }

    /// Like [`TableOracle::insert`], for a position given as FEN or EPD.
    pub fn insert_fen(
        &mut self,
        fen: &str,
        wdl: Option<WdlCode>,
        dtz: Option<Dtz>,
    ) -> Result<(), ProbeError> {
        let pos = parse_position(fen)?;
        self.insert(&pos, wdl, dtz);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Restore a table from a JSON snapshot.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProbeError> {
        let path = path.as_ref();
        let snapshot: Snapshot = serde_json::from_reader(BufReader::new(File::open(path)?))?;
        let table = Self::from_entries(snapshot.entries)?;

        info!(path = %path.display(), positions = table.len(), "Restored tablebase snapshot");
        Ok(table)
    }

    /// Write all entries as a JSON snapshot, in key order.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ProbeError> {
        let path = path.as_ref();
        let snapshot = Snapshot {
            entries: self.entries(),
        };
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, &snapshot)?;
        writer.flush()?;

        info!(path = %path.display(), positions = self.len(), "Saved tablebase snapshot");
        Ok(())
    }

    pub fn from_entries(
        entries: impl IntoIterator<Item = SnapshotEntry>,
    ) -> Result<Self, ProbeError> {
        let mut table = Self::new();
        for entry in entries {
            table.insert_fen(&entry.fen, entry.wdl, entry.dtz)?;
        }
        Ok(table)
    }

    /// Entries sorted by position key.
    pub fn entries(&self) -> Vec<SnapshotEntry> {
        let mut entries: Vec<SnapshotEntry> = self
            .entries
            .iter()
            .map(|(key, entry)| SnapshotEntry {
                fen: key.clone(),
                wdl: entry.wdl,
                dtz: entry.dtz,
            })
            .collect();
        entries.sort_by(|a, b| a.fen.cmp(&b.fen));
        entries
    }

    fn get(&self, pos: &Chess) -> Option<&Entry> {
        self.entries.get(&position_key(pos))
    }
}

impl Oracle for TableOracle {
    fn probe_wdl(&self, pos: &Chess) -> Option<WdlCode> {
        self.get(pos).and_then(|entry| entry.wdl)
    }

    fn probe_dtz(&self, pos: &Chess) -> Option<Dtz> {
        self.get(pos).and_then(|entry| entry.dtz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KQK: &str = "4k3/8/4K3/8/8/8/8/5Q2 w - - 0 1";

    #[test]
    fn missing_positions_are_none() {
        let table = TableOracle::new();
        let pos = parse_position(KQK).unwrap();

        assert!(table.is_empty());
        assert_eq!(table.probe_wdl(&pos), None);
        assert_eq!(table.probe_dtz(&pos), None);
    }

    #[test]
    fn lookup_ignores_clocks() {
        let mut table = TableOracle::new();
        table.insert_fen(KQK, Some(WdlCode::Win), Some(3)).unwrap();

        let later = parse_position("4k3/8/4K3/8/8/8/8/5Q2 w - - 14 52").unwrap();
        assert_eq!(table.probe_wdl(&later), Some(WdlCode::Win));
        assert_eq!(table.probe_dtz(&later), Some(3));
    }

    #[test]
    fn partial_entries() {
        let mut table = TableOracle::new();
        table.insert_fen(KQK, Some(WdlCode::Win), None).unwrap();

        let pos = parse_position(KQK).unwrap();
        assert_eq!(table.probe_wdl(&pos), Some(WdlCode::Win));
        assert_eq!(table.probe_dtz(&pos), None);
    }

    #[test]
    fn snapshot_round_trip() {
        let mut table = TableOracle::new();
        table.insert_fen(KQK, Some(WdlCode::Win), Some(3)).unwrap();
        table
            .insert_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1", Some(WdlCode::Draw), Some(0))
            .unwrap();

        let path = std::env::temp_dir().join(format!(
            "tablebase-verdict-snapshot-{}.json",
            std::process::id()
        ));
        table.save(&path).unwrap();
        let restored = TableOracle::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(restored.entries(), table.entries());
    }

    #[test]
    fn snapshot_rejects_bad_fen() {
        let entries = vec![SnapshotEntry {
            fen: "nonsense".to_string(),
            wdl: None,
            dtz: None,
        }];
        assert!(TableOracle::from_entries(entries).is_err());
    }
}
