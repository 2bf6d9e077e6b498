use super::{add_defaults, encode, Descriptor, Encoding, Modifier, Selection};
use crate::config::Plm;
use crate::error::Error;
use crate::event::{generic, StaticEvent, StaticTable, StaticUmask, UMASK_DEFAULT};
use crate::ffi::bindings as b;
use crate::table::Catalog;

const READ: u64 = 0x0 << 8;
const WRITE: u64 = 0x1 << 8;
const ACCESS: u64 = 0x0 << 16;
const MISS: u64 = 0x1 << 16;
const L1D: u64 = 0x4;

static TABLE: StaticTable = StaticTable {
    name: "test",
    desc: "test PMU",
    events: &[
        StaticEvent {
            name: "CPU_CYCLES",
            desc: "cycles",
            ty: b::PERF_TYPE_HARDWARE,
            id: 0x3c,
            modmsk: 0,
            ngrp: 0,
            umasks: &[],
        },
        StaticEvent {
            name: "L1D",
            desc: "L1 data cache",
            ty: b::PERF_TYPE_HW_CACHE,
            id: L1D,
            modmsk: 0,
            ngrp: 2,
            umasks: &[
                StaticUmask {
                    name: "READ",
                    desc: "read",
                    id: READ,
                    flags: UMASK_DEFAULT,
                    group: 0,
                },
                StaticUmask {
                    name: "WRITE",
                    desc: "write",
                    id: WRITE,
                    flags: 0,
                    group: 0,
                },
                StaticUmask {
                    name: "ACCESS",
                    desc: "access",
                    id: ACCESS,
                    flags: UMASK_DEFAULT,
                    group: 1,
                },
                StaticUmask {
                    name: "MISS",
                    desc: "miss",
                    id: MISS,
                    flags: 0,
                    group: 1,
                },
            ],
        },
        StaticEvent {
            name: "NO_DEFAULT",
            desc: "result group without default",
            ty: b::PERF_TYPE_HW_CACHE,
            id: 0x1,
            modmsk: 0,
            ngrp: 2,
            umasks: &[
                StaticUmask {
                    name: "READ",
                    desc: "read",
                    id: READ,
                    flags: UMASK_DEFAULT,
                    group: 0,
                },
                StaticUmask {
                    name: "MISS",
                    desc: "miss",
                    id: MISS,
                    flags: 0,
                    group: 1,
                },
            ],
        },
        StaticEvent {
            name: "sched",
            desc: "tracepoint",
            ty: b::PERF_TYPE_TRACEPOINT,
            id: 0,
            modmsk: 0,
            ngrp: 1,
            umasks: &[
                StaticUmask {
                    name: "sched_switch",
                    desc: "sched_switch",
                    id: 316,
                    flags: 0,
                    group: 0,
                },
                StaticUmask {
                    name: "sched_wakeup",
                    desc: "sched_wakeup",
                    id: 317,
                    flags: 0,
                    group: 0,
                },
            ],
        },
        StaticEvent {
            name: "RAW",
            desc: "raw event",
            ty: b::PERF_TYPE_RAW,
            id: 0x1234,
            modmsk: 0,
            ngrp: 0,
            umasks: &[],
        },
    ],
};

const CPU_CYCLES: usize = 0;
const L1D_IDX: usize = 1;
const NO_DEFAULT: usize = 2;
const SCHED: usize = 3;
const RAW: usize = 4;

fn catalog() -> Catalog {
    Catalog::clone_static(&TABLE, 4, 4).unwrap()
}

fn code(enc: &Encoding) -> u64 {
    assert_eq!(enc.codes.len(), 1);
    enc.codes[0]
}

fn request(event: usize, umasks: &[usize]) -> Descriptor {
    umasks
        .iter()
        .fold(Descriptor::new(event, Plm::PLM3), |desc, &it| desc.umask(it))
}

// Resolves a canonical string back to a request.
fn resolve(catalog: &Catalog, fstr: &str) -> Descriptor {
    let mut parts = fstr.split(':');
    let event = catalog.find_event(parts.next().unwrap()).unwrap();
    let umasks: Vec<_> = parts.map(|it| catalog.find_umask(event, it).unwrap()).collect();
    request(event, &umasks)
}

#[test]
fn test_hardware() {
    let enc = encode(&catalog(), &request(CPU_CYCLES, &[])).unwrap();
    assert_eq!(code(&enc), 0x3c);
    assert_eq!(enc.fstr, "CPU_CYCLES");
    assert_eq!(enc.event, CPU_CYCLES);
    assert!(enc.umasks.is_empty());
    assert!(!enc.offcore);
}

#[test]
fn test_hardware_os_modifiers() {
    let desc = request(CPU_CYCLES, &[])
        .modifier(Modifier::User(true))
        .modifier(Modifier::Precise(2));
    let enc = encode(&catalog(), &desc).unwrap();
    assert_eq!(code(&enc), 0x3c);
    assert_eq!(enc.fstr, "CPU_CYCLES");
}

#[test]
fn test_hardware_rejects_umask() {
    let result = encode(&catalog(), &request(CPU_CYCLES, &[0]));
    assert_eq!(
        result,
        Err(Error::Attr {
            event: "CPU_CYCLES".to_string()
        })
    );
}

#[test]
fn test_cache_default_fill() {
    let enc = encode(&catalog(), &request(L1D_IDX, &[1])).unwrap();
    assert_eq!(code(&enc), L1D | WRITE | ACCESS);
    assert_eq!(enc.fstr, "L1D:WRITE:ACCESS");
    assert_eq!(enc.umasks, [1, 2]);
}

#[test]
fn test_cache_order_independent() {
    let catalog = catalog();
    let a = encode(&catalog, &request(L1D_IDX, &[3, 1])).unwrap();
    let b = encode(&catalog, &request(L1D_IDX, &[1, 3])).unwrap();
    assert_eq!(a.fstr, "L1D:WRITE:MISS");
    assert_eq!(a.fstr, b.fstr);
    assert_eq!(code(&a), L1D | WRITE | MISS);
    assert_eq!(a.codes, b.codes);
}

#[test]
fn test_cache_omitted_equals_default() {
    let catalog = catalog();
    let omitted = encode(&catalog, &request(L1D_IDX, &[])).unwrap();
    let explicit = encode(&catalog, &request(L1D_IDX, &[2, 0])).unwrap();
    assert_eq!(omitted.codes, explicit.codes);
    assert_eq!(omitted.fstr, "L1D:READ:ACCESS");
    assert_eq!(omitted.fstr, explicit.fstr);
}

#[test]
fn test_cache_group_conflict() {
    let result = encode(&catalog(), &request(L1D_IDX, &[0, 1]));
    assert!(matches!(result, Err(Error::Umask { group: 0, .. })));
}

#[test]
fn test_cache_no_default() {
    let result = encode(&catalog(), &request(NO_DEFAULT, &[0]));
    assert_eq!(
        result,
        Err(Error::Umask {
            event: "NO_DEFAULT".to_string(),
            group: 1,
            reason: "no unit mask selected and no default",
        })
    );

    let enc = encode(&catalog(), &request(NO_DEFAULT, &[1])).unwrap();
    assert_eq!(enc.fstr, "NO_DEFAULT:READ:MISS");
}

#[test]
fn test_cache_rejects_pmu_modifier() {
    let mut desc = request(L1D_IDX, &[]);
    desc.attrs.push(Selection::Pmu { idx: 0, value: 1 });
    assert!(matches!(encode(&catalog(), &desc), Err(Error::Attr { .. })));
}

#[test]
fn test_add_defaults_untouched_on_error() {
    let catalog = catalog();
    let mut umasks = vec![0];
    let result = add_defaults(&catalog, NO_DEFAULT, 0b11, &mut umasks);
    assert!(matches!(result, Err(Error::Umask { group: 1, .. })));
    assert_eq!(umasks, [0]);

    let mut umasks = vec![];
    let code = add_defaults(&catalog, L1D_IDX, 0b10, &mut umasks).unwrap();
    assert_eq!(code, ACCESS);
    assert_eq!(umasks, [2]);
}

#[test]
fn test_canonical_roundtrip() {
    let catalog = catalog();
    for desc in [
        request(CPU_CYCLES, &[]),
        request(L1D_IDX, &[]),
        request(L1D_IDX, &[3]),
        request(L1D_IDX, &[3, 1]),
        request(NO_DEFAULT, &[1]),
        request(SCHED, &[1]),
    ] {
        let enc = encode(&catalog, &desc).unwrap();
        let again = encode(&catalog, &resolve(&catalog, &enc.fstr)).unwrap();
        assert_eq!(enc.codes, again.codes);
        assert_eq!(enc.fstr, again.fstr);
    }
}

#[test]
fn test_canonical_roundtrip_generic() {
    let catalog = Catalog::clone_static(&generic::TABLE, 4, 4).unwrap();
    for idx in 0..catalog.len() {
        let enc = encode(&catalog, &request(idx, &[])).unwrap();
        let again = encode(&catalog, &resolve(&catalog, &enc.fstr)).unwrap();
        assert_eq!(enc.codes, again.codes);
    }
}

#[test]
fn test_tracepoint() {
    let enc = encode(&catalog(), &request(SCHED, &[1])).unwrap();
    assert_eq!(code(&enc), 317);
    assert_eq!(enc.fstr, "sched:sched_wakeup");
    assert_eq!(enc.umasks, [1]);
}

#[test]
fn test_tracepoint_combination() {
    let result = encode(&catalog(), &request(SCHED, &[0, 1]));
    assert!(matches!(result, Err(Error::FeatComb { .. })));
    assert_eq!(result.map_err(|e| e.code()), Err(-5));
}

#[test]
fn test_tracepoint_without_umask() {
    let result = encode(&catalog(), &request(SCHED, &[]));
    assert!(matches!(result, Err(Error::Umask { group: 0, .. })));
}

#[test]
fn test_tracepoint_rejects_pmu_modifier() {
    let mut desc = request(SCHED, &[0]);
    desc.attrs.push(Selection::Pmu { idx: 0, value: 1 });
    assert!(matches!(encode(&catalog(), &desc), Err(Error::Attr { .. })));
}

#[test]
fn test_unknown_type() {
    let result = encode(&catalog(), &request(RAW, &[]));
    assert!(matches!(result, Err(Error::NotSupp(_))));
}

#[test]
fn test_bad_indices() {
    let catalog = catalog();
    assert!(matches!(
        encode(&catalog, &request(catalog.len(), &[])),
        Err(Error::Inval(_))
    ));
    assert!(matches!(
        encode(&catalog, &request(L1D_IDX, &[4])),
        Err(Error::Inval(_))
    ));
}
