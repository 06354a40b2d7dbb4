//! Register-file snapshots.
//!
//! Captures the SFR space plus the bus-side state that is not stored in a
//! cell (safe-mode progress, pending flash command). Snapshots stay in
//! memory; [`to_bytes`]/[`from_bytes`] give a bincode encoding for callers
//! that keep several of them around.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sfr::SFR_COUNT;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("serialization error: {0}")]
    Bincode(#[from] bincode::Error),
    #[error("register file has {0} cells, expected 128")]
    BadLength(usize),
    #[error("invalid safe mode state {0}")]
    BadSafeMode(u8),
}

/// Everything needed to restore a register file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SfrState {
    /// Cells 0x80..=0xFF
    pub cells: Vec<u8>,
    /// 0 = locked, 1 = first key written, 2 = open
    pub safe_mode: u8,
    /// Command written to `ROM_CTRL` and not yet taken
    pub rom_command: Option<u8>,
}

pub fn to_bytes(state: &SfrState) -> Result<Vec<u8>, StateError> {
    if state.cells.len() != SFR_COUNT {
        return Err(StateError::BadLength(state.cells.len()));
    }
    Ok(bincode::serialize(state)?)
}

pub fn from_bytes(data: &[u8]) -> Result<SfrState, StateError> {
    let state: SfrState = bincode::deserialize(data)?;
    if state.cells.len() != SFR_COUNT {
        return Err(StateError::BadLength(state.cells.len()));
    }
    Ok(state)
}
