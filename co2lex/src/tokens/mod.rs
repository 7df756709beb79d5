//! Definitions for tokens and tokenizers.
//!
//! A token is a classified slice of the input. The tokenizer engine in `tokenizer` is generic
//! over a table of rules per state; `co2` defines the table for CO2 sources.

pub mod co2;
pub mod kind;
pub mod token;
pub mod tokenizer;
