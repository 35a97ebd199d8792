//! Translation resource input: the parsed tree and the flat lookup table.

pub mod table;
pub mod translation;

pub use table::EntryTable;
pub use translation::{
    TranslationNode,
    flatten_into,
    flatten_json,
};
