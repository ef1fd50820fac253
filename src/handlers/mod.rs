//! Request handlers module

pub mod department;
