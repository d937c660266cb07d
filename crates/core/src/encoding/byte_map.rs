//! Reversible byte-to-unicode mapping used by byte-level BPE.
//!
//! BPE vocabularies in the GPT-2 family store tokens as strings over a
//! 256-character alphabet in which every byte has a visible stand-in. Printable
//! bytes (`!..=~`, `¡..=¬`, `®..=ÿ`) keep their Latin-1 code point; the other 68
//! bytes are assigned U+0100, U+0101, ... in increasing byte order. A space
//! (0x20) therefore becomes `Ġ` (U+0120) and a newline (0x0A) becomes `Ċ` (U+010A).

use std::sync::OnceLock;

/// One past the largest code point the mapping produces (U+0143).
const ALPHABET_END: usize = 0x144;

/// Bijection between bytes and their printable stand-ins.
#[derive(Debug, Clone)]
pub struct ByteMap {
    /// Byte value -> stand-in character
    encoder: [char; 256],
    /// Code point -> byte value, for code points below `ALPHABET_END`
    decoder: [Option<u8>; ALPHABET_END],
}

impl ByteMap {
    /// The process-wide mapping, built on first use.
    pub fn get() -> &'static ByteMap {
        static MAP: OnceLock<ByteMap> = OnceLock::new();
        MAP.get_or_init(ByteMap::build)
    }

    fn build() -> Self {
        let mut encoder = ['\0'; 256];
        let mut decoder = [None; ALPHABET_END];

        let mut shifted = 0u32;
        for byte in 0..=255u8 {
            let printable = matches!(byte, b'!'..=b'~' | 0xA1..=0xAC | 0xAE..=0xFF);
            let code = if printable {
                u32::from(byte)
            } else {
                shifted += 1;
                0xFF + shifted
            };
            // every code point involved is below U+0144, so never a surrogate
            let ch = char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER);
            encoder[byte as usize] = ch;
            decoder[code as usize] = Some(byte);
        }

        Self { encoder, decoder }
    }

    /// Stand-in character for `byte`.
    #[inline]
    pub fn char_for(&self, byte: u8) -> char {
        self.encoder[byte as usize]
    }

    /// Byte represented by `ch`, or `None` if `ch` is not in the alphabet.
    #[inline]
    pub fn byte_for(&self, ch: char) -> Option<u8> {
        self.decoder.get(ch as usize).copied().flatten()
    }

    /// Whether every character of `symbol` belongs to the byte alphabet.
    pub fn is_byte_symbol(&self, symbol: &str) -> bool {
        symbol.chars().all(|ch| self.byte_for(ch).is_some())
    }

    /// Map raw bytes to their printable form.
    pub fn encode_bytes(&self, bytes: &[u8]) -> String {
        bytes.iter().map(|&b| self.char_for(b)).collect()
    }

    /// Append the bytes behind `symbol` to `out`.
    ///
    /// Returns `false` (leaving `out` partially extended) if a character is
    /// outside the alphabet.
    pub fn decode_into(&self, symbol: &str, out: &mut Vec<u8>) -> bool {
        for ch in symbol.chars() {
            match self.byte_for(ch) {
                Some(byte) => out.push(byte),
                None => return false,
            }
        }
        true
    }
}
