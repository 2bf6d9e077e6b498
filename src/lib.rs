//! Symbolic event encoding for Linux `perf_events`.
//!
//! Resolves symbolic event requests (event, unit masks and modifiers) against
//! a catalog of generic perf_events and the kernel tracepoints found on the
//! host, and produces the `perf_event_attr` to hand to `perf_event_open`.
//!
//! ## Example
//!
//! Encode `PERF_COUNT_HW_CACHE_LL:MISS` for user space only.
//!
//! ```rust
//! use perf_event_encode::config::{Opts, Plm};
//! use perf_event_encode::encode::{Descriptor, Modifier};
//! use perf_event_encode::pmu::Pmu;
//!
//! let mut pmu = Pmu::new(Opts::default());
//! pmu.init().unwrap(); // Tracepoints are added if debugfs is mounted.
//!
//! let idx = pmu.find_event("PERF_COUNT_HW_CACHE_LL").unwrap();
//! let miss = pmu.catalog().unwrap().find_umask(idx, "MISS").unwrap();
//!
//! let desc = Descriptor::new(idx, Plm::PLM0 | Plm::PLM3)
//!     .umask(miss)
//!     .modifier(Modifier::User(true));
//! let enc = pmu.perf_encoding(&desc).unwrap();
//!
//! // READ is the default operation.
//! assert_eq!(enc.fstr, "PERF_COUNT_HW_CACHE_LL:READ:MISS");
//! assert_eq!(enc.attr.config, 0x2 | 0x1 << 16);
//! assert_eq!(enc.attr.exclude_kernel(), 1);
//!
//! pmu.terminate();
//! ```
//!
//! ## Catalog
//!
//! Event indices are stable for the lifetime of the catalog: growing the
//! event store or the unit mask overflow arena never renumbers anything.
//! Use [`table::validate`] to check a catalog for consistency.

pub mod config;
pub mod encode;
pub mod error;
pub mod event;
mod ffi;
pub mod perf;
pub mod pmu;
pub mod table;
pub mod tp;

pub use ffi::Attr;
