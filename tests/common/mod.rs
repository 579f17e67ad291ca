//! Shared helpers for integration tests.

#![allow(dead_code)]

use byteorder::{BigEndian, WriteBytesExt};
use nozomi::{IndexFetchResult, QueryDescriptor, ResultSink};

/// Encode identifiers the way a nozomi file stores them.
pub fn encode_ids(ids: &[i32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(ids.len() * 4);
    for &id in ids {
        out.write_i32::<BigEndian>(id).unwrap();
    }
    out
}

/// Sink that keeps every delivered page.
#[derive(Default)]
pub struct RecordingSink {
    pub pages: Vec<(QueryDescriptor, IndexFetchResult)>,
}

impl ResultSink for RecordingSink {
    fn put_results(&mut self, query: &QueryDescriptor, result: &IndexFetchResult) {
        self.pages.push((query.clone(), result.clone()));
    }
}
