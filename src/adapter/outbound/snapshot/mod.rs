//! Snapshot persistence adapters.

pub mod file;

pub use file::JsonFileSnapshotStore;
