//! Error handling for Python bindings

use bytepair_tokenizer::TokenizerError as RustTokenizerError;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::{create_exception, PyErr};

create_exception!(
    bytepair,
    IntegrityError,
    PyRuntimeError,
    "The vocabulary or merge tables are missing, unreadable or inconsistent"
);

create_exception!(
    bytepair,
    UnknownTokenError,
    PyValueError,
    "A token ID is not in the vocabulary"
);

/// Convert a Rust TokenizerError to a Python exception
pub trait IntoPyErr {
    fn into_py_err(self) -> PyErr;
}

impl IntoPyErr for RustTokenizerError {
    fn into_py_err(self) -> PyErr {
        let message = self.to_string();
        match self {
            RustTokenizerError::UnknownTokenId(_) => UnknownTokenError::new_err(message),
            err if err.is_input_error() => PyValueError::new_err(message),
            _ => IntegrityError::new_err(message),
        }
    }
}
