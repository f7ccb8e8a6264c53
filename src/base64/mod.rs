mod alphabet;
pub mod core;
mod engine;
mod error;


pub use self::alphabet::{Alphabet, NUM_EXTRA_SYMBOLS};
pub use self::engine::{Codec, PAD};
pub use self::error::{CodecError, Malformed};
