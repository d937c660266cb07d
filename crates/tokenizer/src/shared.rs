//! Process-wide tokenizer slot.
//!
//! Code that cannot thread a [`Tokenizer`] handle through (plugins, FFI
//! callbacks) can install one here once and fetch it anywhere. Loading
//! happens at most once per process from the caller's point of view.

use crate::Tokenizer;
use bytepair_core::Result;
use log::debug;
use std::sync::OnceLock;

static SHARED: OnceLock<Tokenizer> = OnceLock::new();

/// Install `tokenizer` as the shared instance.
///
/// Fails, handing the tokenizer back, if one is already installed.
pub fn install(tokenizer: Tokenizer) -> std::result::Result<(), Tokenizer> {
    SHARED.set(tokenizer)
}

/// The shared instance, if one is installed.
pub fn get() -> Option<&'static Tokenizer> {
    SHARED.get()
}

/// The shared instance, loading it from the environment on first use.
///
/// Concurrent first calls may each load the tables; only one result is
/// kept and every caller sees that one.
pub fn get_or_load() -> Result<&'static Tokenizer> {
    if let Some(tokenizer) = SHARED.get() {
        return Ok(tokenizer);
    }

    debug!("no shared tokenizer installed, loading from environment");
    let tokenizer = Tokenizer::from_env()?;
    Ok(SHARED.get_or_init(|| tokenizer))
}
