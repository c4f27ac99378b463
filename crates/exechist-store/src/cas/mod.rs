//! Content-addressed blob store for serialized history records
//!
//! A blob's file name is the SHA-256 of its bytes, so identical records
//! share one file and a damaged file is detected on read. Writes go through
//! a temp file and a rename.

mod atomic;
mod fs_store;
mod sharding;

pub use fs_store::FsStore;
