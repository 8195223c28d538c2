mod memory;

pub use memory::MemoryBucketStore;
