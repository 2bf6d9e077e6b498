//! Generic perf_events table: hardware, software and generalized cache events.

use super::{StaticEvent, StaticTable, StaticUmask, UMASK_DEFAULT};
use crate::ffi::bindings as b;

pub static TABLE: StaticTable = StaticTable {
    name: "perf",
    desc: "perf_events generic PMU",
    events: EVENTS,
};

macro_rules! evt {
    ($ty:ident, $name:ident, $desc:literal) => {
        StaticEvent {
            name: stringify!($name),
            desc: $desc,
            ty: b::$ty,
            id: b::$name as _,
            modmsk: 0,
            ngrp: 0,
            umasks: &[],
        }
    };
}

macro_rules! cache_evt {
    ($name:ident, $desc:literal, $umasks:expr) => {
        StaticEvent {
            name: stringify!($name),
            desc: $desc,
            ty: b::PERF_TYPE_HW_CACHE,
            id: b::$name as _,
            modmsk: 0,
            ngrp: 2,
            umasks: $umasks,
        }
    };
}

macro_rules! um {
    ($name:literal, $desc:literal, $id:expr, $group:literal $(, $flags:expr)?) => {
        StaticUmask {
            name: $name,
            desc: $desc,
            id: $id as _,
            flags: 0 $(| $flags)?,
            group: $group,
        }
    };
}

// Operation in bits 8-15, result in bits 16-23:
// https://github.com/torvalds/linux/blob/v6.13/include/uapi/linux/perf_event.h#L71
const OP_READ: StaticUmask = um!("READ", "read access", (b::PERF_COUNT_HW_CACHE_OP_READ << 8), 0, UMASK_DEFAULT);
const OP_WRITE: StaticUmask = um!("WRITE", "write access", (b::PERF_COUNT_HW_CACHE_OP_WRITE << 8), 0);
const OP_PREFETCH: StaticUmask = um!("PREFETCH", "prefetch access", (b::PERF_COUNT_HW_CACHE_OP_PREFETCH << 8), 0);
const RESULT_ACCESS: StaticUmask = um!("ACCESS", "hit access", (b::PERF_COUNT_HW_CACHE_RESULT_ACCESS << 16), 1, UMASK_DEFAULT);
const RESULT_MISS: StaticUmask = um!("MISS", "miss", (b::PERF_COUNT_HW_CACHE_RESULT_MISS << 16), 1);

const RWP: &[StaticUmask] = &[OP_READ, OP_WRITE, OP_PREFETCH, RESULT_ACCESS, RESULT_MISS];
const RP: &[StaticUmask] = &[OP_READ, OP_PREFETCH, RESULT_ACCESS, RESULT_MISS];
const R: &[StaticUmask] = &[OP_READ, RESULT_ACCESS, RESULT_MISS];

#[rustfmt::skip]
const EVENTS: &[StaticEvent] = &[
    evt!(PERF_TYPE_HARDWARE, PERF_COUNT_HW_CPU_CYCLES, "Total cycles"),
    evt!(PERF_TYPE_HARDWARE, PERF_COUNT_HW_INSTRUCTIONS, "Instructions retired"),
    evt!(PERF_TYPE_HARDWARE, PERF_COUNT_HW_CACHE_REFERENCES, "Cache accesses, usually the last level cache"),
    evt!(PERF_TYPE_HARDWARE, PERF_COUNT_HW_CACHE_MISSES, "Cache misses, usually the last level cache"),
    evt!(PERF_TYPE_HARDWARE, PERF_COUNT_HW_BRANCH_INSTRUCTIONS, "Branch instructions retired"),
    evt!(PERF_TYPE_HARDWARE, PERF_COUNT_HW_BRANCH_MISSES, "Mispredicted branches"),
    evt!(PERF_TYPE_HARDWARE, PERF_COUNT_HW_BUS_CYCLES, "Bus cycles"),
    evt!(PERF_TYPE_HARDWARE, PERF_COUNT_HW_STALLED_CYCLES_FRONTEND, "Stalled cycles during issue"),
    evt!(PERF_TYPE_HARDWARE, PERF_COUNT_HW_STALLED_CYCLES_BACKEND, "Stalled cycles during retirement"),
    evt!(PERF_TYPE_HARDWARE, PERF_COUNT_HW_REF_CPU_CYCLES, "Total cycles, not affected by frequency scaling"),

    evt!(PERF_TYPE_SOFTWARE, PERF_COUNT_SW_CPU_CLOCK, "High-resolution per-CPU timer"),
    evt!(PERF_TYPE_SOFTWARE, PERF_COUNT_SW_TASK_CLOCK, "Clock count specific to the task that is running"),
    evt!(PERF_TYPE_SOFTWARE, PERF_COUNT_SW_PAGE_FAULTS, "Page faults"),
    evt!(PERF_TYPE_SOFTWARE, PERF_COUNT_SW_CONTEXT_SWITCHES, "Context switches"),
    evt!(PERF_TYPE_SOFTWARE, PERF_COUNT_SW_CPU_MIGRATIONS, "Migrations of the task to a new CPU"),
    evt!(PERF_TYPE_SOFTWARE, PERF_COUNT_SW_PAGE_FAULTS_MIN, "Minor page faults"),
    evt!(PERF_TYPE_SOFTWARE, PERF_COUNT_SW_PAGE_FAULTS_MAJ, "Major page faults"),
    evt!(PERF_TYPE_SOFTWARE, PERF_COUNT_SW_ALIGNMENT_FAULTS, "Unaligned memory accesses fixed up by the kernel"),
    evt!(PERF_TYPE_SOFTWARE, PERF_COUNT_SW_EMULATION_FAULTS, "Unimplemented instructions emulated by the kernel"),
    evt!(PERF_TYPE_SOFTWARE, PERF_COUNT_SW_DUMMY, "Placeholder that counts nothing"),
    evt!(PERF_TYPE_SOFTWARE, PERF_COUNT_SW_BPF_OUTPUT, "BPF program output"),
    evt!(PERF_TYPE_SOFTWARE, PERF_COUNT_SW_CGROUP_SWITCHES, "Context switches to a task in a different cgroup"),

    cache_evt!(PERF_COUNT_HW_CACHE_L1D, "L1 data cache", RWP),
    cache_evt!(PERF_COUNT_HW_CACHE_L1I, "L1 instruction cache", RP),
    cache_evt!(PERF_COUNT_HW_CACHE_LL, "Last level cache", RWP),
    cache_evt!(PERF_COUNT_HW_CACHE_DTLB, "Data TLB", RWP),
    cache_evt!(PERF_COUNT_HW_CACHE_ITLB, "Instruction TLB", R),
    cache_evt!(PERF_COUNT_HW_CACHE_BPU, "Branch prediction unit", R),
    cache_evt!(PERF_COUNT_HW_CACHE_NODE, "Local memory node", RWP),
];
