use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Remotes known out of the box.
const KNOWN_REMOTES: &[(u8, &str)] = &[
    (0x93, "living_room"),
    (0x7c, "office"),
    (0x45, "spare_room"),
];

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RemoteData {
    pub remote_id: u8,
    pub name: String,
}

/// Human readable names for remote ids. Purely cosmetic; decoding never depends on it.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    remotes: Vec<RemoteData>,
}

/// Parse a remote id written as `0x93` or `147`.
pub fn parse_remote_id(s: &str) -> Result<u8> {
    let s = s.trim();

    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse(),
    };

    parsed.map_err(|_| Error::InvalidRemoteId(s.to_string()))
}

pub fn create_remotes() -> Vec<RemoteData> {
    KNOWN_REMOTES
        .iter()
        .map(|&(remote_id, name)| RemoteData {
            remote_id,
            name: name.to_string(),
        })
        .collect()
}

impl Registry {
    /// Empty registry; every remote renders as its hex id.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        Registry {
            remotes: create_remotes(),
        }
    }

    /// Add or rename a remote.
    pub fn insert(&mut self, remote: RemoteData) {
        match self
            .remotes
            .iter_mut()
            .find(|known| known.remote_id == remote.remote_id)
        {
            Some(known) => {
                log::debug!(
                    "Renaming remote 0x{:02x}: {} -> {}",
                    remote.remote_id,
                    known.name,
                    remote.name
                );
                known.name = remote.name;
            }
            None => self.remotes.push(remote),
        }
    }

    /// Merge a JSON list of `{"remote_id": .., "name": ..}` records. Returns how many were read.
    #[cfg(feature = "utils")]
    pub fn extend_from_json(&mut self, json: &str) -> Result<usize> {
        let remotes: Vec<RemoteData> = serde_json::from_str(json)?;
        let count = remotes.len();

        for remote in remotes {
            self.insert(remote);
        }

        Ok(count)
    }

    pub fn name(&self, remote_id: u8) -> Option<&str> {
        self.remotes
            .iter()
            .find(|remote| remote.remote_id == remote_id)
            .map(|remote| remote.name.as_str())
    }

    /// Registered name, or the id as `0x..`.
    pub fn label(&self, remote_id: u8) -> String {
        self.name(remote_id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("0x{:02x}", remote_id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RemoteData> {
        self.remotes.iter()
    }

    pub fn len(&self) -> usize {
        self.remotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remotes.is_empty()
    }
}
