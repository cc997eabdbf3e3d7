//! Process-wide convenience facade over [`Studio`].
//!
//! `initialize` replaces the shared studio wholesale; operations take a
//! snapshot of the current studio and never hold the lock across an await.
//! Code that can pass a [`Studio`] around should prefer that instead.

use crate::models::{Config, GeneratePhotoResult, OptimizeTextResult};
use crate::studio::Studio;
use crate::{Error, Result};
use std::sync::{Arc, PoisonError, RwLock};

static STUDIO: RwLock<Option<Arc<Studio>>> = RwLock::new(None);

/// Install a studio built from `config`, replacing any previous one.
///
/// On error the slot is cleared, so later calls report the uninitialized
/// error instead of reusing earlier credentials.
pub fn initialize(config: Config) -> Result<()> {
    match Studio::new(config) {
        Ok(studio) => {
            install(studio);
            Ok(())
        }
        Err(e) => {
            reset();
            tracing::warn!("Initialization rejected, previous studio cleared: {}", e);
            Err(e)
        }
    }
}

/// Install an already constructed studio, replacing any previous one.
pub fn install(studio: Studio) {
    *STUDIO.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(studio));
    tracing::info!("Studio initialized");
}

/// Drop the installed studio so later calls report the uninitialized error.
pub fn reset() {
    *STUDIO.write().unwrap_or_else(PoisonError::into_inner) = None;
}

fn current() -> Result<Arc<Studio>> {
    STUDIO
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
        .ok_or(Error::Uninitialized)
}

pub async fn generate_photo(prompt: &str) -> GeneratePhotoResult {
    match current() {
        Ok(studio) => studio.generate_photo(prompt).await,
        Err(e) => {
            tracing::error!("Photo generation failed: {}", e);
            GeneratePhotoResult::failed(&e)
        }
    }
}

pub async fn optimize_text(prompt: &str) -> OptimizeTextResult {
    match current() {
        Ok(studio) => studio.optimize_text(prompt).await,
        Err(e) => {
            tracing::error!("Text optimization failed: {}", e);
            OptimizeTextResult::failed(&e)
        }
    }
}
