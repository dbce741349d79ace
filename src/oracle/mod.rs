//! Endgame tablebase oracles.
//!
//! The engine only ever asks two questions of a tablebase: the WDL code
//! and the DTZ of a position. A position that is not covered by any
//! loaded table answers `None`, which callers treat as ordinary data.

mod remote;
mod table;

use std::sync::Arc;

use shakmaty::Chess;

use crate::types::{Dtz, WdlCode};

pub use remote::RemoteOracle;
pub use table::{SnapshotEntry, TableOracle};

/// Read-only query interface of an endgame tablebase.
///
/// Implementations must be free of observable side effects. Caching is
/// allowed, as long as repeated probes answer the same.
pub trait Oracle {
    fn probe_wdl(&self, pos: &Chess) -> Option<WdlCode>;

    fn probe_dtz(&self, pos: &Chess) -> Option<Dtz>;
}

impl<O: Oracle + ?Sized> Oracle for &O {
    fn probe_wdl(&self, pos: &Chess) -> Option<WdlCode> {
        (**self).probe_wdl(pos)
    }

    fn probe_dtz(&self, pos: &Chess) -> Option<Dtz> {
        (**self).probe_dtz(pos)
    }
}

impl<O: Oracle + ?Sized> Oracle for Box<O> {
    fn probe_wdl(&self, pos: &Chess) -> Option<WdlCode> {
        (**self).probe_wdl(pos)
    }

    fn probe_dtz(&self, pos: &Chess) -> Option<Dtz> {
        (**self).probe_dtz(pos)
    }
}

impl<O: Oracle + ?Sized> Oracle for Arc<O> {
    fn probe_wdl(&self, pos: &Chess) -> Option<WdlCode> {
        (**self).probe_wdl(pos)
    }

    fn probe_dtz(&self, pos: &Chess) -> Option<Dtz> {
        (**self).probe_dtz(pos)
    }
}

/// Oracle picked at runtime, see [`crate::OracleConfig`].
#[derive(Debug)]
pub enum AnyOracle {
    Table(TableOracle),
    Remote(RemoteOracle),
}

impl Oracle for AnyOracle {
    fn probe_wdl(&self, pos: &Chess) -> Option<WdlCode> {
        match self {
            AnyOracle::Table(table) => table.probe_wdl(pos),
            AnyOracle::Remote(remote) => remote.probe_wdl(pos),
        }
    }

    fn probe_dtz(&self, pos: &Chess) -> Option<Dtz> {
        match self {
            AnyOracle::Table(table) => table.probe_dtz(pos),
            AnyOracle::Remote(remote) => remote.probe_dtz(pos),
        }
    }
}
