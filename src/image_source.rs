pub mod blob_store;
pub mod loader;
pub mod preview;
pub mod source;
