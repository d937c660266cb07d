//! PyO3 wrapper for the Tokenizer struct

use bytepair_tokenizer::Tokenizer;
use pyo3::prelude::*;

use crate::error::IntoPyErr;

/// Python wrapper for the bytepair Tokenizer
#[pyclass(name = "Tokenizer", frozen)]
pub struct PyTokenizer {
    inner: Tokenizer,
}

#[pymethods]
impl PyTokenizer {
    /// The GPT-2 / GPT-3 tokenizer over the tables shipped with the library
    #[staticmethod]
    #[pyo3(signature = (cache_capacity=0))]
    fn gpt2(cache_capacity: usize) -> PyResult<Self> {
        let inner = Tokenizer::builder()
            .gpt2()
            .cache_capacity(cache_capacity)
            .build()
            .map_err(|e| e.into_py_err())?;
        Ok(PyTokenizer { inner })
    }

    /// Load a tokenizer from a directory holding `encoder.json` + `vocab.bpe`
    /// or a `tokenizer.json` bundle
    #[staticmethod]
    #[pyo3(signature = (path, cache_capacity=0))]
    fn from_dir(path: &str, cache_capacity: usize) -> PyResult<Self> {
        let inner = Tokenizer::builder()
            .data_dir(path)
            .cache_capacity(cache_capacity)
            .build()
            .map_err(|e| e.into_py_err())?;
        Ok(PyTokenizer { inner })
    }

    /// Load a tokenizer from an explicit encoder/merges file pair
    #[staticmethod]
    #[pyo3(signature = (encoder, merges, cache_capacity=0))]
    fn from_files(encoder: &str, merges: &str, cache_capacity: usize) -> PyResult<Self> {
        let inner = Tokenizer::builder()
            .gpt2_files(encoder, merges)
            .cache_capacity(cache_capacity)
            .build()
            .map_err(|e| e.into_py_err())?;
        Ok(PyTokenizer { inner })
    }

    /// Load a tokenizer from `BYTEPAIR_DATA_DIR`, or the embedded GPT-2
    /// tables when it is unset
    #[staticmethod]
    fn from_env() -> PyResult<Self> {
        let inner = Tokenizer::from_env().map_err(|e| e.into_py_err())?;
        Ok(PyTokenizer { inner })
    }

    /// Encode text to token IDs
    fn encode(&self, py: Python<'_>, text: &str) -> Vec<u32> {
        py.allow_threads(|| self.inner.encode(text))
    }

    /// Encode a batch of texts in parallel
    fn encode_batch(&self, py: Python<'_>, texts: Vec<String>) -> Vec<Vec<u32>> {
        py.allow_threads(|| self.inner.encode_batch(&texts))
    }

    /// Number of tokens `text` encodes to
    fn count(&self, py: Python<'_>, text: &str) -> usize {
        py.allow_threads(|| self.inner.count(text))
    }

    /// Token strings `text` encodes to
    fn tokenize(&self, text: &str) -> PyResult<Vec<String>> {
        self.inner.tokenize(text).map_err(|e| e.into_py_err())
    }

    /// Decode token IDs back to text
    ///
    /// Raises `UnknownTokenError` for an ID outside the vocabulary and
    /// `ValueError` if the IDs split a UTF-8 character.
    fn decode(&self, ids: Vec<u32>) -> PyResult<String> {
        self.inner.decode(&ids).map_err(|e| e.into_py_err())
    }

    /// Decode token IDs, replacing invalid UTF-8 with U+FFFD
    fn decode_lossy(&self, ids: Vec<u32>) -> PyResult<String> {
        self.inner.decode_lossy(&ids).map_err(|e| e.into_py_err())
    }

    /// Token string for an ID, or None
    fn id_to_token(&self, id: u32) -> Option<String> {
        self.inner.id_to_token(id).map(str::to_owned)
    }

    /// ID for a token string, or None
    fn token_to_id(&self, token: &str) -> Option<u32> {
        self.inner.token_to_id(token)
    }

    /// Get the vocabulary size
    fn vocab_size(&self) -> usize {
        self.inner.vocab_size()
    }

    fn __len__(&self) -> usize {
        self.inner.vocab_size()
    }

    /// Get a string representation
    fn __repr__(&self) -> String {
        format!("Tokenizer(vocab_size={})", self.inner.vocab_size())
    }
}
