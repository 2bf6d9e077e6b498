//! Event and unit mask records.
//!
//! Static records ([`StaticEvent`], [`StaticUmask`]) describe the immutable
//! catalog of one hardware family. They are cloned into owned records
//! ([`EventRecord`], [`UmaskRecord`]) that live in a [`Catalog`][crate::table::Catalog]
//! and can be extended at runtime.

pub mod generic;
pub mod tp;

use std::borrow::Cow;

use crate::ffi::bindings as b;

/// Unit masks stored inline in an [`EventRecord`]; the rest go to the overflow arena.
pub const INLINE_UMASKS: usize = 8;

/// Unit mask is the default of its group.
pub const UMASK_DEFAULT: u32 = 0x1;

/// Event type, the `type` field of `perf_event_attr`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    Hardware,
    Software,
    Tracepoint,
    HwCache,
}

impl Category {
    pub const fn as_type(self) -> u32 {
        match self {
            Self::Hardware => b::PERF_TYPE_HARDWARE,
            Self::Software => b::PERF_TYPE_SOFTWARE,
            Self::Tracepoint => b::PERF_TYPE_TRACEPOINT,
            Self::HwCache => b::PERF_TYPE_HW_CACHE,
        }
    }

    pub const fn from_type(ty: u32) -> Option<Self> {
        match ty {
            b::PERF_TYPE_HARDWARE => Some(Self::Hardware),
            b::PERF_TYPE_SOFTWARE => Some(Self::Software),
            b::PERF_TYPE_TRACEPOINT => Some(Self::Tracepoint),
            b::PERF_TYPE_HW_CACHE => Some(Self::HwCache),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct StaticUmask {
    pub name: &'static str,
    pub desc: &'static str,
    pub id: u64,
    pub flags: u32,
    pub group: u32,
}

#[derive(Clone, Debug)]
pub struct StaticEvent {
    pub name: &'static str,
    pub desc: &'static str,
    pub ty: u32,
    pub id: u64,
    pub modmsk: u32,
    pub ngrp: u32,
    pub umasks: &'static [StaticUmask],
}

/// Event table of one hardware family.
#[derive(Debug)]
pub struct StaticTable {
    pub name: &'static str,
    pub desc: &'static str,
    pub events: &'static [StaticEvent],
}

/// Sub-selector refining an event code.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UmaskRecord {
    pub name: Option<Cow<'static, str>>,
    pub desc: Option<Cow<'static, str>>,
    /// OR'd into the event code.
    pub id: u64,
    pub flags: u32,
    pub group: u32,
}

impl UmaskRecord {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn is_default(&self) -> bool {
        self.flags & UMASK_DEFAULT != 0
    }
}

impl From<&StaticUmask> for UmaskRecord {
    fn from(um: &StaticUmask) -> Self {
        Self {
            name: Some(Cow::Borrowed(um.name)),
            desc: Some(Cow::Borrowed(um.desc)),
            id: um.id,
            flags: um.flags,
            group: um.group,
        }
    }
}

/// Catalog entry.
///
/// The first [`INLINE_UMASKS`] unit masks are held in `umasks`, the rest are
/// a contiguous run of the catalog overflow arena starting at `ovfl_idx`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventRecord {
    pub name: Option<Cow<'static, str>>,
    pub desc: Option<Cow<'static, str>>,
    /// Raw `perf_event_attr::type`, see [`Category::from_type`].
    pub ty: u32,
    pub id: u64,
    /// Modifiers the event accepts at PMU level.
    pub modmsk: u32,
    pub numasks: usize,
    pub ngrp: u32,
    pub ovfl_idx: Option<usize>,
    pub umasks: [Option<UmaskRecord>; INLINE_UMASKS],
}

impl EventRecord {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn desc(&self) -> &str {
        self.desc.as_deref().unwrap_or_default()
    }

    pub fn category(&self) -> Option<Category> {
        Category::from_type(self.ty)
    }
}
