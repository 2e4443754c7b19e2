#[cfg(feature = "phrase")]
pub mod phrase;
