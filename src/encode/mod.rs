//! PMU-level encoding: turns a resolved event request into register codes
//! and a canonical event string.
//!
//! Only [`Selection::Umask`] and [`Selection::Pmu`] attributes are consumed
//! here, OS-level modifiers are left to [`perf`][crate::perf].

mod cache;
mod dfl;
#[cfg(test)]
mod test;
mod tp;

use arrayvec::ArrayVec;

pub use dfl::add_defaults;

use crate::config::Plm;
use crate::error::{Error, Result};
use crate::event::{Category, EventRecord, UmaskRecord};
use crate::table::Catalog;

/// Most codes an encoding can produce: ESCR, CCCR and event code on NetBurst.
pub const MAX_ENCODING: usize = 3;

pub type Codes = ArrayVec<u64, MAX_ENCODING>;

/// Modifier handled by the perf_events layer rather than by the PMU.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Modifier {
    /// `u`: monitor at user level.
    User(bool),
    /// `k`: monitor at kernel level.
    Kernel(bool),
    /// `h`: monitor at hypervisor level.
    Hv(bool),
    /// `precise`: sampling skid constraint, see `perf_event_attr::precise_ip`.
    Precise(i64),
}

/// One attribute of an event request, as resolved by the event string parser.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Unit mask by attribute index of the event.
    Umask(usize),
    /// PMU-level modifier by index with its value.
    Pmu { idx: usize, value: u64 },
    /// OS-level modifier.
    Os(Modifier),
}

/// Event request.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Descriptor {
    /// Event index in the catalog.
    pub event: usize,
    /// Privilege levels used when no `u`/`k`/`h` modifier is given.
    pub dfl_plm: Plm,
    /// Attributes in submission order.
    pub attrs: Vec<Selection>,
}

impl Descriptor {
    pub fn new(event: usize, dfl_plm: Plm) -> Self {
        Self {
            event,
            dfl_plm,
            attrs: vec![],
        }
    }

    pub fn umask(mut self, attr_idx: usize) -> Self {
        self.attrs.push(Selection::Umask(attr_idx));
        self
    }

    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.attrs.push(Selection::Os(modifier));
        self
    }
}

/// Output of [`encode`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Encoding {
    /// Register codes, `codes.len()` is the number of meaningful entries.
    pub codes: Codes,
    /// Canonical event string, e.g. `PERF_COUNT_HW_CACHE_L1D:WRITE:ACCESS`.
    pub fstr: String,
    /// Event index in the catalog.
    pub event: usize,
    /// Contributing unit masks (explicit and defaulted), in attribute index order.
    pub umasks: Vec<usize>,
    /// The second code goes to the extra (offcore response) register.
    pub offcore: bool,
}

impl Encoding {
    fn new(event: usize, name: &str) -> Self {
        Self {
            codes: Codes::new(),
            fstr: name.to_string(),
            event,
            umasks: vec![],
            offcore: false,
        }
    }
}

/// Encodes `desc` against `catalog`, dispatching on the event type.
pub fn encode(catalog: &Catalog, desc: &Descriptor) -> Result<Encoding> {
    let ev = event_of(catalog, desc.event)?;
    match ev.category() {
        Some(Category::Tracepoint) => tp::encode(catalog, desc),
        Some(Category::HwCache) => cache::encode(catalog, desc),
        Some(Category::Hardware | Category::Software) => encode_plain(ev, desc),
        None => {
            tracing::debug!("unsupported event type={}", ev.ty);
            Err(Error::NotSupp(format!(
                "event {} has unknown type {}",
                ev.name(),
                ev.ty
            )))
        }
    }
}

// Hardware and software events: the event ID is the code, no attribute applies.
fn encode_plain(ev: &EventRecord, desc: &Descriptor) -> Result<Encoding> {
    if desc.attrs.iter().any(|it| !matches!(it, Selection::Os(_))) {
        return Err(Error::Attr {
            event: ev.name().to_string(),
        });
    }
    let mut enc = Encoding::new(desc.event, ev.name());
    enc.codes.push(ev.id);
    Ok(enc)
}

pub(crate) fn event_of(catalog: &Catalog, idx: usize) -> Result<&EventRecord> {
    catalog
        .event(idx)
        .ok_or_else(|| Error::Inval(format!("no event at index {}", idx)))
}

pub(crate) fn umask_of(catalog: &Catalog, idx: usize, attr_idx: usize) -> Result<&UmaskRecord> {
    catalog.umask(idx, attr_idx).ok_or_else(|| {
        Error::Inval(format!("event {} has no unit mask {}", idx, attr_idx))
    })
}
