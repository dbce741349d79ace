use std::{collections::HashMap, sync::RwLock, time::Duration};

use reqwest::{Url, blocking::Client};
use serde::Deserialize;
use shakmaty::Chess;
use tracing::{debug, warn};

use super::Oracle;
use crate::{
    error::ProbeError,
    position::{fen_of, position_key},
    types::{Dtz, WdlCode},
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Oracle backed by a tablebase server speaking the probe summary format:
/// `GET {base}?fen=<fen>` answers a JSON object with `wdl` and `dtz`.
///
/// Answers, including failed requests, are memoised per position. There
/// are no retries, a failed request is reported as `None`.
#[derive(Debug)]
pub struct RemoteOracle {
    client: Client,
    base: Url,
    cache: RwLock<HashMap<String, RemoteEntry>>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
struct RemoteEntry {
    #[serde(default)]
    wdl: Option<WdlCode>,
    #[serde(default)]
    dtz: Option<Dtz>,
}

impl RemoteOracle {
    pub fn new(base_url: &str) -> Result<Self, ProbeError> {
        let base = Url::parse(base_url)
            .map_err(|e| ProbeError::Config(format!("invalid tablebase url {base_url}: {e}")))?;
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            base,
            cache: RwLock::new(HashMap::new()),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    fn lookup(&self, pos: &Chess) -> RemoteEntry {
        let key = position_key(pos);

        if let Ok(cache) = self.cache.read() {
            if let Some(entry) = cache.get(&key) {
                return *entry;
            }
        }

        let entry = match self.fetch(pos) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(fen = %key, error = %e, "Remote tablebase probe failed");
                RemoteEntry::default()
            }
        };

        if let Ok(mut cache) = self.cache.write() {
            cache.insert(key, entry);
        }
        entry
    }

    fn fetch(&self, pos: &Chess) -> Result<RemoteEntry, ProbeError> {
        let fen = fen_of(pos);
        let url = Url::parse_with_params(self.base.as_str(), &[("fen", fen.as_str())])
            .map_err(|e| ProbeError::Config(e.to_string()))?;

        debug!(%url, "Probing remote tablebase");
        let body = self.client.get(url).send()?.error_for_status()?.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl Oracle for RemoteOracle {
    fn probe_wdl(&self, pos: &Chess) -> Option<WdlCode> {
        self.lookup(pos).wdl
    }

    fn probe_dtz(&self, pos: &Chess) -> Option<Dtz> {
        self.lookup(pos).dtz
    }
}
