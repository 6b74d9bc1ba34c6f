//! Persisted policy artifacts
//!
//! Uses postcard for a compact binary encoding of the best network of a run

use std::fs;
use std::path::Path;

use game_core::{Controller, FeedForwardNet, NoOpController, ObservationKind, PolicyController};
use postcard::{from_bytes, to_allocvec};
use thiserror::Error;

/// Leading bytes of every artifact
pub const MAGIC: [u8; 4] = *b"PONG";

/// Current artifact format version
pub const FORMAT_VERSION: u16 = 1;

/// Decisions the match loop reads from a policy's outputs
const DECISION_OUTPUTS: usize = 3;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("artifact I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("artifact encoding failed: {0}")]
    Codec(#[from] postcard::Error),

    #[error("not a policy artifact")]
    BadMagic,

    #[error("unsupported artifact version {found} (expected {expected})")]
    UnsupportedVersion { found: u16, expected: u16 },

    #[error("network weights do not match its declared layer sizes")]
    Malformed,

    #[error(
        "network expects {found} inputs and {outputs} outputs, \
         observation provides {expected} inputs"
    )]
    ShapeMismatch {
        expected: usize,
        found: usize,
        outputs: usize,
    },
}

/// On-disk representation of a trained policy
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PolicyArtifact {
    pub magic: [u8; 4],
    pub version: u16,
    pub net: FeedForwardNet,
}

impl PolicyArtifact {
    pub fn new(net: FeedForwardNet) -> Self {
        Self {
            magic: MAGIC,
            version: FORMAT_VERSION,
            net,
        }
    }

    /// Serialize artifact to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, StoreError> {
        Ok(to_allocvec(self)?)
    }

    /// Deserialize artifact from bytes, rejecting foreign or newer formats
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StoreError> {
        let artifact: PolicyArtifact = from_bytes(bytes)?;
        if artifact.magic != MAGIC {
            return Err(StoreError::BadMagic);
        }
        if artifact.version != FORMAT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: artifact.version,
                expected: FORMAT_VERSION,
            });
        }
        if !artifact.net.is_well_formed() {
            return Err(StoreError::Malformed);
        }
        Ok(artifact)
    }
}

/// Write a network to `path`, replacing any existing file
pub fn save_policy(path: impl AsRef<Path>, net: &FeedForwardNet) -> Result<(), StoreError> {
    let path = path.as_ref();
    let bytes = PolicyArtifact::new(net.clone()).to_bytes()?;
    fs::write(path, &bytes)?;
    log::info!("saved policy ({} bytes) to {}", bytes.len(), path.display());
    Ok(())
}

/// Read a network previously written by [`save_policy`]
pub fn load_policy(path: impl AsRef<Path>) -> Result<FeedForwardNet, StoreError> {
    let bytes = fs::read(path)?;
    Ok(PolicyArtifact::from_bytes(&bytes)?.net)
}

/// Check that a network can drive a paddle with the given observation layout
pub fn check_shape(net: &FeedForwardNet, kind: ObservationKind) -> Result<(), StoreError> {
    let expected = kind.input_len();
    if net.inputs != expected || net.outputs < DECISION_OUTPUTS {
        return Err(StoreError::ShapeMismatch {
            expected,
            found: net.inputs,
            outputs: net.outputs,
        });
    }
    Ok(())
}

/// Controller for a persisted policy.
///
/// Never fails: any problem with the artifact yields an inert paddle so the
/// match can still run.
pub fn load_controller(path: impl AsRef<Path>, kind: ObservationKind) -> Box<dyn Controller> {
    let path = path.as_ref();
    let loaded = load_policy(path).and_then(|net| check_shape(&net, kind).map(|()| net));
    match loaded {
        Ok(net) => {
            log::info!("loaded policy from {}", path.display());
            Box::new(PolicyController::new(net, kind))
        }
        Err(err) => {
            log::warn!(
                "could not use policy at {}: {}; falling back to an idle paddle",
                path.display(),
                err
            );
            Box::new(NoOpController)
        }
    }
}
