pub(crate) mod filter;
pub(crate) mod input;
pub(crate) mod model;
pub(crate) mod summary;
