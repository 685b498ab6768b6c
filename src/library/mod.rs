//! Built-in descriptors
//!
//! Every entry is a process-wide descriptor built once on first use.
//! Parameterized forms are built with the helper constructors (`list_of`,
//! `union`, `schema`, ...) or with `Descriptor::with_arguments`.

mod advanced;
mod arguments;
mod basic;
mod config;
mod containers;
mod schema;

pub use advanced::{
    charset, charset_filter, normalize_path, pattern, pattern_with, BINARY, CHARSET,
    CHARSET_FILTER, DECIMAL, DOMAIN, EMAIL, HEXADECIMAL, ID, PATH, PATH_NAME, PATTERN,
};
pub use basic::{
    literal, optional, union, ANY, ANY_STR, BOOLEAN, BYTE_STRING, FLOAT, INTEGER, LITERAL,
    OPTIONAL, TEXT, UNION,
};
pub use config::PatternFlags;
pub use containers::{list_of, mapping_of, tuple_of, LIST, MAPPING, TUPLE};
pub use schema::{schema, Field, Fields, SCHEMA};
