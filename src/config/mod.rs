use std::path::PathBuf;

use crate::event::{generic, StaticTable};

macro_rules! unsupported {
    ($($arg:tt)+) => {
        Err($crate::error::Error::NotSupp(format!($($arg)+)))?
    };
}
pub(crate) use unsupported;

/// PMU options, consumed once by [`Pmu::init`][crate::pmu::Pmu::init].
#[derive(Clone, Debug)]
pub struct Opts {
    /// Mount table scanned for the debugfs (or tracefs) mount point.
    pub mounts: PathBuf,

    /// Directory holding `perf_event_paranoid`, used by [`Pmu::detect`][crate::pmu::Pmu::detect].
    pub proc_sys_kernel: PathBuf,

    /// Number of event slots added each time the event store is full.
    pub event_grow: usize,

    /// Number of unit mask slots added each time the overflow arena is full.
    pub umask_grow: usize,

    /// Discover tracepoints at init.
    pub discover: bool,

    /// Architecture family, selects how multi-register encodings are packed.
    pub arch: Arch,

    /// Static catalog cloned at init.
    pub table: &'static StaticTable,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            mounts: PathBuf::from("/proc/mounts"),
            proc_sys_kernel: PathBuf::from("/proc/sys/kernel"),
            event_grow: 512,
            umask_grow: 1024,
            discover: true,
            arch: Arch::Generic,
            table: &generic::TABLE,
        }
    }
}

/// Declared architecture family of the PMU producing the codes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Arch {
    /// Codes are passed through as-is.
    #[default]
    Generic,

    /// Intel NetBurst (Pentium 4): ESCR, CCCR and perf event code.
    Netburst,
}

/// Privilege level mask.
///
/// Levels are numbered as on x86: `PLM0` is the kernel, `PLM3` is user space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plm(pub u32);

impl Plm {
    pub const PLM0: Plm = Plm(0x01);
    pub const PLM1: Plm = Plm(0x02);
    pub const PLM2: Plm = Plm(0x04);
    pub const PLM3: Plm = Plm(0x08);
    pub const PLMH: Plm = Plm(0x10);

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Plm) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for Plm {
    type Output = Plm;

    fn bitor(self, rhs: Self) -> Self {
        Plm(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for Plm {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
