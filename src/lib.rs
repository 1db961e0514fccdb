pub mod compression;
pub mod error;

pub use compression::{evaluate, frequency, huffman, lz77, lzw};
pub use error::{Error, Result};
