pub mod couchbase;
pub mod store;

pub use couchbase::{CouchbaseClient, CouchbaseConfig};
pub use store::MemoryBucketStore;
