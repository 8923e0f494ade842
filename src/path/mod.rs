//! Path data: tokenizing, normalised printing and Bezier geometry.

pub(crate) mod geometry;
pub(crate) mod parser;
pub(crate) mod printer;
