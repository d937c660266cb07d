//! Python bindings for the bytepair tokenizer
//!
//! This module exposes the GPT-2 / GPT-3 byte-level BPE tokenizer to Python
//! as `bytepair.Tokenizer`.

use pyo3::prelude::*;

mod error;
mod tokenizer;

use error::{IntegrityError, UnknownTokenError};
use tokenizer::PyTokenizer;

/// bytepair: GPT-2 / GPT-3 byte-level BPE tokenizer in Rust
#[pymodule]
fn bytepair(py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTokenizer>()?;
    m.add("IntegrityError", py.get_type_bound::<IntegrityError>())?;
    m.add("UnknownTokenError", py.get_type_bound::<UnknownTokenError>())?;

    // Add version info
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
