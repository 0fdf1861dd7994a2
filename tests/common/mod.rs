#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use bucket_lifecycle::Args;
use bucket_lifecycle::errors::StoreError;
use bucket_lifecycle::ports::{ObjectStore, StoreConnector};
use bucket_lifecycle::utils::log_utils::Logger;
use clap::Parser;

#[derive(Default)]
pub struct StoreState {
    pub buckets: BTreeSet<String>,
    pub objects: BTreeMap<(String, String), Vec<u8>>,
    pub calls: Vec<String>,
    pub connects: usize,
    /// Flip one byte of every downloaded object
    pub corrupt_downloads: bool,
    /// Created buckets never show up in existence checks
    pub lagging_buckets: bool,
}

/// In-memory object store. Clones share state, so a test can keep a handle
/// while the lifecycle owns the boxed copy.
#[derive(Clone, Default)]
pub struct MemoryStore {
    pub state: Arc<Mutex<StoreState>>,
}

impl MemoryStore {
    pub fn with_buckets(names: &[&str]) -> Self {
        let store = Self::default();
        store
            .state
            .lock()
            .unwrap()
            .buckets
            .extend(names.iter().map(|n| n.to_string()));
        store
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub fn position(&self, call: &str) -> Option<usize> {
        self.calls().iter().position(|c| c == call)
    }

    pub fn connects(&self) -> usize {
        self.state.lock().unwrap().connects
    }

    pub fn has_bucket(&self, bucket: &str) -> bool {
        self.state.lock().unwrap().buckets.contains(bucket)
    }

    pub fn has_object(&self, bucket: &str, key: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .objects
            .contains_key(&(bucket.to_string(), key.to_string()))
    }

    fn record(&self, call: String) {
        self.state.lock().unwrap().calls.push(call);
    }
}

fn missing(operation: &'static str, what: &str) -> StoreError {
    StoreError::Service {
        operation,
        message: format!("{what} not found"),
    }
}

impl ObjectStore for MemoryStore {
    fn list_buckets(&self) -> Result<Vec<String>, StoreError> {
        self.record("list_buckets".to_string());
        Ok(self.state.lock().unwrap().buckets.iter().cloned().collect())
    }

    fn create_bucket(&self, bucket: &str) -> Result<(), StoreError> {
        self.record(format!("create_bucket:{bucket}"));
        let mut state = self.state.lock().unwrap();
        if !state.buckets.insert(bucket.to_string()) {
            return Err(StoreError::Service {
                operation: "CreateBucket",
                message: "BucketAlreadyOwnedByYou".to_string(),
            });
        }
        Ok(())
    }

    fn bucket_exists(&self, bucket: &str) -> Result<bool, StoreError> {
        self.record(format!("bucket_exists:{bucket}"));
        if self.state.lock().unwrap().lagging_buckets {
            return Ok(false);
        }
        Ok(self.has_bucket(bucket))
    }

    fn put_object(&self, bucket: &str, key: &str, mut body: File) -> Result<u64, StoreError> {
        self.record(format!("put_object:{bucket}/{key}"));
        if !self.has_bucket(bucket) {
            return Err(missing("PutObject", bucket));
        }
        let mut data = Vec::new();
        body.read_to_end(&mut data)?;
        let len = data.len() as u64;
        self.state
            .lock()
            .unwrap()
            .objects
            .insert((bucket.to_string(), key.to_string()), data);
        Ok(len)
    }

    fn get_object(&self, bucket: &str, key: &str, sink: &mut File) -> Result<u64, StoreError> {
        self.record(format!("get_object:{bucket}/{key}"));
        let (mut data, corrupt) = {
            let state = self.state.lock().unwrap();
            let data = state
                .objects
                .get(&(bucket.to_string(), key.to_string()))
                .cloned()
                .ok_or_else(|| missing("GetObject", key))?;
            (data, state.corrupt_downloads)
        };
        if corrupt {
            match data.first_mut() {
                Some(b) => *b ^= 0xff,
                None => data.push(0),
            }
        }
        sink.write_all(&data)?;
        Ok(data.len() as u64)
    }

    fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StoreError> {
        self.record(format!("delete_object:{bucket}/{key}"));
        self.state
            .lock()
            .unwrap()
            .objects
            .remove(&(bucket.to_string(), key.to_string()));
        Ok(())
    }

    fn object_exists(&self, bucket: &str, key: &str) -> Result<bool, StoreError> {
        self.record(format!("object_exists:{bucket}/{key}"));
        Ok(self.has_object(bucket, key))
    }

    fn delete_bucket(&self, bucket: &str) -> Result<(), StoreError> {
        self.record(format!("delete_bucket:{bucket}"));
        let mut state = self.state.lock().unwrap();
        if state.objects.keys().any(|(b, _)| b == bucket) {
            return Err(StoreError::Service {
                operation: "DeleteBucket",
                message: "BucketNotEmpty".to_string(),
            });
        }
        if !state.buckets.remove(bucket) {
            return Err(missing("DeleteBucket", bucket));
        }
        Ok(())
    }
}

pub struct MemoryConnector {
    pub store: MemoryStore,
}

impl MemoryConnector {
    pub fn boxed(store: &MemoryStore) -> Box<dyn StoreConnector> {
        Box::new(Self {
            store: store.clone(),
        })
    }
}

impl StoreConnector for MemoryConnector {
    fn connect(&self) -> Result<Box<dyn ObjectStore>, StoreError> {
        self.store.state.lock().unwrap().connects += 1;
        Ok(Box::new(self.store.clone()))
    }
}

/// Logger that keeps every printed line for later assertions.
pub fn capture_logger() -> (Logger, Rc<RefCell<Vec<String>>>) {
    let lines = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&lines);
    let logger = Logger::with_printer(
        0,
        Box::new(move |line| sink.borrow_mut().push(line.to_string())),
    );
    (logger, lines)
}

/// Parse args the way the binary would, with instant consistency waits.
pub fn args_for(bucket: &str, file: &Path, extra: &[&str]) -> Args {
    let mut argv = vec![
        "bucket-lifecycle".to_string(),
        bucket.to_string(),
        file.to_string_lossy().into_owned(),
        "--wait-interval-secs".to_string(),
        "0".to_string(),
        "--wait-max-attempts".to_string(),
        "3".to_string(),
    ];
    argv.extend(extra.iter().map(|s| s.to_string()));
    Args::try_parse_from(argv).expect("test args should parse")
}
