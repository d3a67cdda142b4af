//! Command handlers.

pub(crate) mod markup;
pub(crate) mod replay;
