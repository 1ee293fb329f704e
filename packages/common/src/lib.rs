pub mod filename;
pub mod media;
pub mod storage;
