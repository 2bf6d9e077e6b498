//! perf_events backend: maps a PMU encoding onto `perf_event_attr`.

mod attr;
pub mod compose;

use crate::config::{Arch, Plm};
use crate::encode::{self, event_of, Codes, Descriptor, Encoding, Modifier, Selection};
use crate::error::{Error, Result};
use crate::event::{Category, EventRecord};
use crate::ffi::Attr;

/// OS-level modifiers of a request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PerfMods {
    /// Explicit privilege levels, empty if no `u`/`k`/`h` was given.
    pub plm: Plm,
    pub precise_ip: i64,
}

impl PerfMods {
    /// Collects the OS-level modifiers of `attrs`.
    ///
    /// Only hardware events may be precise, and there is no hypervisor level
    /// for other event types, so `precise` and `h` are dropped for them.
    pub fn from_attrs(ev: &EventRecord, attrs: &[Selection]) -> Self {
        let hw = ev.category() == Some(Category::Hardware);
        let mut mods = Self::default();
        for attr in attrs {
            let Selection::Os(modifier) = *attr else {
                continue;
            };
            match modifier {
                Modifier::User(on) => {
                    if on {
                        mods.plm |= Plm::PLM3;
                    }
                }
                Modifier::Kernel(on) => {
                    if on {
                        mods.plm |= Plm::PLM0;
                    }
                }
                Modifier::Hv(on) if hw => {
                    if on {
                        mods.plm |= Plm::PLMH;
                    }
                }
                Modifier::Precise(val) if hw => mods.precise_ip = val,
                dropped => tracing::debug!(?dropped, "modifier dropped for {}", ev.name()),
            }
        }
        mods
    }
}

/// Everything a caller needs to open a counter for one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PerfEncoding {
    pub attr: Attr,
    pub codes: Codes,
    /// Canonical event string.
    pub fstr: String,
    /// Event index in the catalog.
    pub idx: usize,
}

/// Encodes `desc` and builds its `perf_event_attr`.
pub fn encode(catalog: &crate::table::Catalog, arch: Arch, desc: &Descriptor) -> Result<PerfEncoding> {
    // Must provide default priv level.
    if desc.dfl_plm.is_empty() {
        return Err(Error::Inval("no default privilege level".to_string()));
    }

    let ev = event_of(catalog, desc.event)?;
    let mods = PerfMods::from_attrs(ev, &desc.attrs);
    let enc = encode::encode(catalog, desc)?;

    from_encoding(enc, ev.ty, arch, desc.dfl_plm, &mods)
}

/// Builds the perf encoding of an already encoded request.
///
/// Exposed for PMUs producing composite encodings.
pub fn from_encoding(enc: Encoding, ty: u32, arch: Arch, dfl_plm: Plm, mods: &PerfMods) -> Result<PerfEncoding> {
    let attr = attr::from(&enc, ty, arch, dfl_plm, mods)?;
    Ok(PerfEncoding {
        attr,
        codes: enc.codes,
        fstr: enc.fstr,
        idx: enc.event,
    })
}
