//! Pattern-driven string masking.
//!
//! A mask pattern mixes literal characters with typed placeholder tokens
//! (see [`token`]). Processing a value walks the pattern and the value in
//! lockstep and yields the formatted text plus a validity flag.
//!
//! # Example
//!
//! ```rust
//! use maskara::{Mask, MaskOptions};
//!
//! let cpf = Mask::new("000.000.000-00", MaskOptions::forward());
//! assert_eq!(cpf.apply("12345678980"), "123.456.789-80");
//!
//! // Stops at the first character the pattern rejects
//! let processed = cpf.process("12345678a80");
//! assert_eq!(processed.result, "123.456.78");
//! assert!(!processed.valid);
//!
//! // Reverse masks anchor on the right and fill missing leading zeros
//! let money = Mask::new("R$ #.##0,00", MaskOptions::reverse());
//! assert_eq!(money.apply("7612345678980"), "R$ 76.123.456.789,80");
//! assert_eq!(money.apply("1"), "R$ 0,01");
//! ```

mod direction;
mod mask;
pub mod token;

pub use mask::{Mask, MaskOptions, ProcessResult, apply, process, validate};
