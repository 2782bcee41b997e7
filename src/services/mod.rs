pub mod cache;
pub mod candidates;
pub mod greek;
pub mod latin;
pub mod morpheus_client;
pub mod partitions;
pub mod report;
pub mod sources;
