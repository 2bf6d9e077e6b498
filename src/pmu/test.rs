use std::fs;

use tempfile::TempDir;

use super::Pmu;
use crate::config::{Opts, Plm};
use crate::encode::Descriptor;
use crate::error::Error;
use crate::event::{generic, Category};
use crate::ffi::bindings as b;

fn offline() -> Opts {
    Opts {
        discover: false,
        ..Default::default()
    }
}

// Fake host with a debugfs mount holding `sched` and `irq` tracepoints.
fn host() -> (TempDir, Opts) {
    let tmp = TempDir::new().unwrap();
    let debugfs = tmp.path().join("debug");
    for (category, tracepoint, id) in [
        ("sched", "sched_switch", "316"),
        ("sched", "sched_wakeup", "317"),
        ("irq", "irq_handler_entry", "99"),
    ] {
        let dir = debugfs.join("tracing/events").join(category).join(tracepoint);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("id"), id).unwrap();
    }

    let mounts = tmp.path().join("mounts");
    fs::write(&mounts, format!("debugfs {} debugfs rw 0 0\n", debugfs.display())).unwrap();

    let opts = Opts {
        mounts,
        event_grow: 1,
        umask_grow: 1,
        ..Default::default()
    };
    (tmp, opts)
}

#[test]
fn test_init_offline() {
    let mut pmu = Pmu::new(offline());
    pmu.init().unwrap();
    assert_eq!(pmu.nevents(), Ok(generic::TABLE.events.len()));
    assert!(pmu.catalog().unwrap().is_dynamic());
}

#[test]
fn test_init_with_tracepoints() {
    let (_tmp, opts) = host();
    let mut pmu = Pmu::new(opts);
    pmu.init().unwrap();
    assert_eq!(pmu.nevents(), Ok(generic::TABLE.events.len() + 2));

    let idx = pmu.find_event("sched").unwrap();
    let info = pmu.event_info(idx).unwrap();
    assert_eq!(info.category, Some(Category::Tracepoint));
    assert_eq!(info.nattrs, 2);

    let wakeup = pmu.catalog().unwrap().find_umask(idx, "sched_wakeup").unwrap();
    let enc = pmu
        .perf_encoding(&Descriptor::new(idx, Plm::PLM0 | Plm::PLM3).umask(wakeup))
        .unwrap();
    assert_eq!(enc.attr.type_, b::PERF_TYPE_TRACEPOINT);
    assert_eq!(enc.attr.config, 317);
    assert_eq!(enc.fstr, "sched:sched_wakeup");

    let mut out = vec![];
    pmu.validate_table(&mut out).unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_init_without_debugfs() {
    let tmp = TempDir::new().unwrap();
    let opts = Opts {
        mounts: tmp.path().join("mounts"),
        ..Default::default()
    };
    let mut pmu = Pmu::new(opts);
    pmu.init().unwrap();
    assert_eq!(pmu.nevents(), Ok(generic::TABLE.events.len()));
}

#[test]
fn test_not_initialized() {
    let pmu = Pmu::new(offline());
    assert_eq!(pmu.nevents(), Err(Error::NoInit));
    assert_eq!(pmu.event_first(), Err(Error::NoInit));
    assert!(!pmu.event_is_valid(0));
    assert_eq!(Error::NoInit.code(), -3);
}

#[test]
fn test_terminate() {
    let mut pmu = Pmu::new(offline());
    pmu.init().unwrap();
    let idx = pmu.find_event("PERF_COUNT_HW_CPU_CYCLES").unwrap();
    let desc = Descriptor::new(idx, Plm::PLM3);
    assert!(pmu.perf_encoding(&desc).is_ok());

    pmu.terminate();
    assert!(pmu.catalog().is_err());
    assert!(!pmu.event_is_valid(idx));
    assert_eq!(pmu.encode(&desc), Err(Error::NoInit));
    assert_eq!(pmu.perf_encoding(&desc), Err(Error::NoInit));
    assert!(matches!(pmu.validate(), Err(Error::NoInit)));

    // A terminated PMU can be initialized again.
    pmu.init().unwrap();
    assert!(pmu.event_is_valid(idx));
}

#[test]
fn test_detect() {
    let tmp = TempDir::new().unwrap();
    let opts = Opts {
        proc_sys_kernel: tmp.path().to_path_buf(),
        ..offline()
    };
    let pmu = Pmu::new(opts);
    assert!(matches!(pmu.detect(), Err(Error::NotSupp(_))));

    fs::write(tmp.path().join("perf_counter_paranoid"), "1\n").unwrap();
    assert_eq!(pmu.detect(), Ok(()));

    fs::remove_file(tmp.path().join("perf_counter_paranoid")).unwrap();
    fs::write(tmp.path().join("perf_event_paranoid"), "2\n").unwrap();
    assert_eq!(pmu.detect(), Ok(()));
}

#[test]
fn test_iteration() {
    let mut pmu = Pmu::new(offline());
    pmu.init().unwrap();

    let mut count = 0;
    let mut next = pmu.event_first().unwrap();
    while let Some(idx) = next {
        assert!(pmu.event_is_valid(idx));
        count += 1;
        next = pmu.event_next(idx).unwrap();
    }
    assert_eq!(Ok(count), pmu.nevents());
    assert!(!pmu.event_is_valid(count));
}

#[test]
fn test_event_next_bounds() {
    let mut pmu = Pmu::new(offline());
    pmu.init().unwrap();
    let last = pmu.nevents().unwrap() - 1;

    assert_eq!(pmu.event_next(last - 1), Ok(Some(last)));
    assert_eq!(pmu.event_next(last), Ok(None));
    assert_eq!(pmu.event_next(last + 10), Ok(None));
    assert_eq!(pmu.event_next(usize::MAX), Ok(None));
}

#[test]
fn test_event_and_attr_info() {
    let mut pmu = Pmu::new(offline());
    pmu.init().unwrap();

    let idx = pmu.find_event("PERF_COUNT_HW_CACHE_L1I").unwrap();
    let info = pmu.event_info(idx).unwrap();
    assert_eq!(info.name, "PERF_COUNT_HW_CACHE_L1I");
    assert_eq!(info.desc, "L1 instruction cache");
    assert_eq!(info.code, b::PERF_COUNT_HW_CACHE_L1I as u64);
    assert_eq!(info.idx, idx);
    assert_eq!(info.category, Some(Category::HwCache));
    assert_eq!(info.nattrs, 4);
    assert_eq!(pmu.event_nattrs(idx), Ok(4));

    let read = pmu.attr_info(idx, 0).unwrap();
    assert_eq!(read.name, "READ");
    assert_eq!(read.code, 0);
    assert!(read.is_default);

    let miss = pmu.attr_info(idx, 3).unwrap();
    assert_eq!(miss.name, "MISS");
    assert_eq!(miss.code, 1 << 16);
    assert!(!miss.is_default);

    assert!(matches!(pmu.attr_info(idx, 4), Err(Error::Inval(_))));
    assert!(matches!(pmu.event_info(10_000), Err(Error::Inval(_))));
    assert!(matches!(pmu.find_event("NOPE"), Err(Error::Inval(_))));
}

#[test]
fn test_validate() {
    let mut pmu = Pmu::new(offline());
    pmu.init().unwrap();
    assert!(pmu.validate().unwrap().is_ok());
}
