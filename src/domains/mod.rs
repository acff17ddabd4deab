//! Business logic: the Miro API boundary and the tools built on it.

pub mod miro;
pub mod tools;
