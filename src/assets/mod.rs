pub(crate) mod decode;
#[cfg(feature = "http")]
pub(crate) mod fetch;
pub(crate) mod loader;
pub(crate) mod source;
