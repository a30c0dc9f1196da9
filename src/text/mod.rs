// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Turning raw text into stems, and finding the text to turn.
//!
//! - **stemmer**: clean → split → Snowball English stem
//! - **finder**: recursive discovery of `.txt`/`.text` files

mod finder;
mod stemmer;

pub use finder::{is_text_file, list_text_files};
pub use stemmer::{clean, list_stems, parse, stem_file, stem_word, unique_stems};
