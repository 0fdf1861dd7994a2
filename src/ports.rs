use crate::errors::StoreError;
use crate::lifecycle::wait::{WaitPolicy, poll_until};
use mockall::automock;
use std::fs::File;

/// Operations the lifecycle needs from an object-storage service.
///
/// The `wait_until_*` methods have polling defaults built on the matching
/// existence probes; adapters with native waiters override them.
#[automock]
pub trait ObjectStore: Send + Sync {
    fn list_buckets(&self) -> Result<Vec<String>, StoreError>;
    fn create_bucket(&self, bucket: &str) -> Result<(), StoreError>;
    fn bucket_exists(&self, bucket: &str) -> Result<bool, StoreError>;

    /// Upload the whole of `body` as `bucket/key`. Returns the number of bytes sent.
    fn put_object(&self, bucket: &str, key: &str, body: File) -> Result<u64, StoreError>;

    /// Fetch `bucket/key` into `sink`. Returns the number of bytes written.
    fn get_object(&self, bucket: &str, key: &str, sink: &mut File) -> Result<u64, StoreError>;

    fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StoreError>;
    fn object_exists(&self, bucket: &str, key: &str) -> Result<bool, StoreError>;
    fn delete_bucket(&self, bucket: &str) -> Result<(), StoreError>;

    fn wait_until_bucket_exists(&self, bucket: &str, policy: &WaitPolicy) -> Result<(), StoreError> {
        poll_until(policy, || self.bucket_exists(bucket))
    }

    fn wait_until_object_not_exists(
        &self,
        bucket: &str,
        key: &str,
        policy: &WaitPolicy,
    ) -> Result<(), StoreError> {
        poll_until(policy, || self.object_exists(bucket, key).map(|exists| !exists))
    }

    fn wait_until_bucket_not_exists(
        &self,
        bucket: &str,
        policy: &WaitPolicy,
    ) -> Result<(), StoreError> {
        poll_until(policy, || self.bucket_exists(bucket).map(|exists| !exists))
    }
}

/// Produces a connected `ObjectStore`. Kept separate so a run can open its
/// source file before any client is built.
#[automock]
pub trait StoreConnector {
    fn connect(&self) -> Result<Box<dyn ObjectStore>, StoreError>;
}
