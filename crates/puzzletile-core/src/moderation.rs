//! Content moderation gate.
//!
//! The pipeline never judges image content. Callers plug in an
//! [`ImageModerator`] and run it before tiling; [`tile_if_approved`] wires the
//! two together so a rejected upload never reaches the decoder.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::decode::SourceImage;
use crate::error::TileError;
use crate::pipeline::Tiler;
use crate::slice::TileSet;
use crate::storage::TileStore;

/// Outcome of a moderation check.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModerationVerdict {
    pub allowed: bool,
    /// Machine-readable rejection categories, e.g. `"adult"`, `"violence"`.
    #[serde(default)]
    pub reasons: Vec<String>,
}

impl ModerationVerdict {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reasons: Vec::new(),
        }
    }

    pub fn reject<I, S>(reasons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: false,
            reasons: reasons.into_iter().map(Into::into).collect(),
        }
    }
}

/// Decides whether an upload may be turned into a puzzle.
pub trait ImageModerator {
    /// Inspect the raw upload. `Err` means the check itself could not run.
    fn approve(&self, bytes: &[u8], filename: Option<&str>) -> Result<ModerationVerdict, String>;
}

/// Development stand-in that approves everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl ImageModerator for AllowAll {
    fn approve(&self, _bytes: &[u8], _filename: Option<&str>) -> Result<ModerationVerdict, String> {
        Ok(ModerationVerdict::allow())
    }
}

/// Errors from the moderated tiling path.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("Image rejected by moderation: {}", .reasons.join(", "))]
    Rejected { reasons: Vec<String> },

    #[error("Moderation check failed: {0}")]
    Moderator(String),

    #[error(transparent)]
    Tile(#[from] TileError),
}

/// Moderate `source`, then tile it only if it was approved.
pub fn tile_if_approved<M, S>(
    moderator: &M,
    tiler: &Tiler,
    source: &SourceImage<'_>,
    grid: u32,
    namespace: &str,
    store: &mut S,
) -> Result<TileSet, GateError>
where
    M: ImageModerator + ?Sized,
    S: TileStore + ?Sized,
{
    let verdict = moderator
        .approve(source.bytes, source.filename)
        .map_err(GateError::Moderator)?;

    if !verdict.allowed {
        warn!(
            source = source.display_name(),
            reasons = ?verdict.reasons,
            "upload rejected by moderation"
        );
        return Err(GateError::Rejected {
            reasons: verdict.reasons,
        });
    }

    Ok(tiler.run(source, grid, namespace, store)?)
}
