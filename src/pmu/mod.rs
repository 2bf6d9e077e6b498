#[cfg(test)]
mod test;

use std::io::Write;

use crate::config::Opts;
use crate::encode::{self, Descriptor, Encoding};
use crate::error::{Error, Result};
use crate::event::Category;
use crate::perf::{self, PerfEncoding};
use crate::table::validate::{validate, Report};
use crate::table::Catalog;
use crate::tp;

/// The perf_events generic PMU.
///
/// Owns the event catalog. The catalog is only mutated by [`init`][Self::init],
/// afterwards every query takes `&self`.
///
/// # Examples
///
/// ```rust
/// use perf_event_encode::config::{Opts, Plm};
/// use perf_event_encode::encode::Descriptor;
/// use perf_event_encode::pmu::Pmu;
///
/// let mut opts = Opts::default();
/// opts.discover = false;
///
/// let mut pmu = Pmu::new(opts);
/// pmu.init().unwrap();
///
/// let idx = pmu.find_event("PERF_COUNT_HW_CACHE_L1D").unwrap();
/// let write = pmu.catalog().unwrap().find_umask(idx, "WRITE").unwrap();
///
/// let desc = Descriptor::new(idx, Plm::PLM3).umask(write);
/// let enc = pmu.perf_encoding(&desc).unwrap();
/// assert_eq!(enc.fstr, "PERF_COUNT_HW_CACHE_L1D:WRITE:ACCESS");
/// assert_eq!(enc.attr.config, 1 << 8);
/// ```
pub struct Pmu {
    opts: Opts,
    catalog: Option<Catalog>,
}

/// Event summary returned by [`Pmu::event_info`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventInfo {
    pub name: String,
    pub desc: String,
    pub code: u64,
    pub idx: usize,
    pub category: Option<Category>,
    /// Number of unit masks.
    pub nattrs: usize,
}

/// Unit mask summary returned by [`Pmu::attr_info`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttrInfo {
    pub name: String,
    pub desc: String,
    pub code: u64,
    pub idx: usize,
    pub is_default: bool,
}

impl Pmu {
    pub fn new(opts: Opts) -> Self {
        Self {
            opts,
            catalog: None,
        }
    }

    /// Checks that the host kernel has perf_events.
    pub fn detect(&self) -> Result<()> {
        let dir = &self.opts.proc_sys_kernel;
        let found = ["perf_event_paranoid", "perf_counter_paranoid"]
            .iter()
            .any(|it| dir.join(it).exists());
        match found {
            true => Ok(()),
            false => Err(Error::NotSupp(format!("no perf_events under {:?}", dir))),
        }
    }

    /// Clones the static table and appends the tracepoints found on the host.
    ///
    /// Never fails because of the host: without a debug filesystem no
    /// tracepoint is added, and if the growable clone cannot be allocated the
    /// static table is used as is.
    pub fn init(&mut self) -> Result<()> {
        let opts = &self.opts;
        let mut catalog = match Catalog::clone_static(opts.table, opts.event_grow, opts.umask_grow) {
            Ok(it) => it,
            Err(e) => {
                tracing::debug!(error = %e, "dynamic table disabled");
                Catalog::fixed(opts.table)
            }
        };

        if opts.discover && catalog.is_dynamic() {
            match tp::discover_from_mounts(&mut catalog, &opts.mounts) {
                Ok(n) => tracing::debug!("{} tracepoint events added", n),
                Err(e) => tracing::debug!(error = %e, "tracepoint scan stopped"),
            }
        }

        self.catalog = Some(catalog);
        Ok(())
    }

    /// Releases the catalog, later queries fail with [`NoInit`][Error::NoInit].
    pub fn terminate(&mut self) {
        self.catalog = None;
    }

    pub fn catalog(&self) -> Result<&Catalog> {
        self.catalog.as_ref().ok_or(Error::NoInit)
    }

    pub fn opts(&self) -> &Opts {
        &self.opts
    }

    pub fn nevents(&self) -> Result<usize> {
        Ok(self.catalog()?.len())
    }

    pub fn event_first(&self) -> Result<Option<usize>> {
        Ok((!self.catalog()?.is_empty()).then_some(0))
    }

    pub fn event_next(&self, idx: usize) -> Result<Option<usize>> {
        let len = self.catalog()?.len();
        Ok(idx.checked_add(1).filter(|it| *it < len))
    }

    pub fn event_is_valid(&self, idx: usize) -> bool {
        self.catalog().is_ok_and(|it| idx < it.len())
    }

    pub fn find_event(&self, name: &str) -> Result<usize> {
        self.catalog()?
            .find_event(name)
            .ok_or_else(|| Error::Inval(format!("no event named {}", name)))
    }

    pub fn event_info(&self, idx: usize) -> Result<EventInfo> {
        let ev = encode::event_of(self.catalog()?, idx)?;
        Ok(EventInfo {
            name: ev.name().to_string(),
            desc: ev.desc().to_string(),
            code: ev.id,
            idx,
            category: ev.category(),
            nattrs: ev.numasks,
        })
    }

    pub fn event_nattrs(&self, idx: usize) -> Result<usize> {
        Ok(encode::event_of(self.catalog()?, idx)?.numasks)
    }

    /// Only unit masks are attributes here, modifiers are handled by the OS layer.
    pub fn attr_info(&self, idx: usize, attr_idx: usize) -> Result<AttrInfo> {
        let um = encode::umask_of(self.catalog()?, idx, attr_idx)?;
        Ok(AttrInfo {
            name: um.name().to_string(),
            desc: um.desc.as_deref().unwrap_or_default().to_string(),
            code: um.id,
            idx: attr_idx,
            is_default: um.is_default(),
        })
    }

    /// PMU-level encoding of `desc`.
    pub fn encode(&self, desc: &Descriptor) -> Result<Encoding> {
        encode::encode(self.catalog()?, desc)
    }

    /// Encoding of `desc` ready for `perf_event_open`.
    pub fn perf_encoding(&self, desc: &Descriptor) -> Result<PerfEncoding> {
        perf::encode(self.catalog()?, self.opts.arch, desc)
    }

    pub fn validate(&self) -> Result<Report> {
        Ok(validate(self.catalog()?))
    }

    /// Writes table violations to `out`, fails with [`Inval`][Error::Inval] if any.
    pub fn validate_table(&self, out: &mut impl Write) -> Result<()> {
        let catalog = self.catalog()?;
        validate(catalog).write_to(catalog.name(), out)
    }
}
