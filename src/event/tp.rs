use std::borrow::Cow;

use super::{EventRecord, UmaskRecord};
use crate::error::Result;
use crate::ffi::bindings as b;

/// Tracepoint category under construction.
///
/// Every readable tracepoint of the category becomes one unit mask whose
/// code is the tracepoint ID from `tracing/events/<category>/<name>/id`.
/// Nothing reaches the catalog until the candidate is committed.
#[derive(Clone, Debug)]
pub struct Candidate {
    name: String,
    umasks: Vec<UmaskRecord>,
}

impl Candidate {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            name: category.into(),
            umasks: vec![],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn push(&mut self, tracepoint: String, id: u64) -> Result<()> {
        self.umasks.try_reserve(1)?;
        let name: Cow<'static, str> = Cow::Owned(tracepoint);
        self.umasks.push(UmaskRecord {
            desc: Some(name.clone()),
            name: Some(name),
            id,
            flags: 0,
            group: 0,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.umasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.umasks.is_empty()
    }

    /// Splits into the event head and its unit masks, ready for
    /// [`Catalog::commit`][crate::table::Catalog::commit].
    pub fn into_record(self) -> (EventRecord, Vec<UmaskRecord>) {
        let head = EventRecord {
            name: Some(Cow::Owned(self.name)),
            desc: Some(Cow::Borrowed("tracepoint")),
            ty: b::PERF_TYPE_TRACEPOINT,
            // Tracepoints have no event code, the code is in the unit masks.
            id: 0,
            modmsk: 0,
            numasks: 0,
            ngrp: 1,
            ovfl_idx: None,
            umasks: Default::default(),
        };
        (head, self.umasks)
    }
}
