#![allow(warnings)]

// Subset of `include/uapi/linux/perf_event.h` this crate encodes against:
// https://github.com/torvalds/linux/blob/v6.13/include/uapi/linux/perf_event.h

pub const PERF_TYPE_HARDWARE: u32 = 0;
pub const PERF_TYPE_SOFTWARE: u32 = 1;
pub const PERF_TYPE_TRACEPOINT: u32 = 2;
pub const PERF_TYPE_HW_CACHE: u32 = 3;
pub const PERF_TYPE_RAW: u32 = 4;

pub const PERF_COUNT_HW_CPU_CYCLES: u32 = 0;
pub const PERF_COUNT_HW_INSTRUCTIONS: u32 = 1;
pub const PERF_COUNT_HW_CACHE_REFERENCES: u32 = 2;
pub const PERF_COUNT_HW_CACHE_MISSES: u32 = 3;
pub const PERF_COUNT_HW_BRANCH_INSTRUCTIONS: u32 = 4;
pub const PERF_COUNT_HW_BRANCH_MISSES: u32 = 5;
pub const PERF_COUNT_HW_BUS_CYCLES: u32 = 6;
pub const PERF_COUNT_HW_STALLED_CYCLES_FRONTEND: u32 = 7;
pub const PERF_COUNT_HW_STALLED_CYCLES_BACKEND: u32 = 8;
pub const PERF_COUNT_HW_REF_CPU_CYCLES: u32 = 9;

pub const PERF_COUNT_HW_CACHE_L1D: u32 = 0;
pub const PERF_COUNT_HW_CACHE_L1I: u32 = 1;
pub const PERF_COUNT_HW_CACHE_LL: u32 = 2;
pub const PERF_COUNT_HW_CACHE_DTLB: u32 = 3;
pub const PERF_COUNT_HW_CACHE_ITLB: u32 = 4;
pub const PERF_COUNT_HW_CACHE_BPU: u32 = 5;
pub const PERF_COUNT_HW_CACHE_NODE: u32 = 6;

pub const PERF_COUNT_HW_CACHE_OP_READ: u32 = 0;
pub const PERF_COUNT_HW_CACHE_OP_WRITE: u32 = 1;
pub const PERF_COUNT_HW_CACHE_OP_PREFETCH: u32 = 2;

pub const PERF_COUNT_HW_CACHE_RESULT_ACCESS: u32 = 0;
pub const PERF_COUNT_HW_CACHE_RESULT_MISS: u32 = 1;

pub const PERF_COUNT_SW_CPU_CLOCK: u32 = 0;
pub const PERF_COUNT_SW_TASK_CLOCK: u32 = 1;
pub const PERF_COUNT_SW_PAGE_FAULTS: u32 = 2;
pub const PERF_COUNT_SW_CONTEXT_SWITCHES: u32 = 3;
pub const PERF_COUNT_SW_CPU_MIGRATIONS: u32 = 4;
pub const PERF_COUNT_SW_PAGE_FAULTS_MIN: u32 = 5;
pub const PERF_COUNT_SW_PAGE_FAULTS_MAJ: u32 = 6;
pub const PERF_COUNT_SW_ALIGNMENT_FAULTS: u32 = 7;
pub const PERF_COUNT_SW_EMULATION_FAULTS: u32 = 8;
pub const PERF_COUNT_SW_DUMMY: u32 = 9;
pub const PERF_COUNT_SW_BPF_OUTPUT: u32 = 10;
pub const PERF_COUNT_SW_CGROUP_SWITCHES: u32 = 11;

pub const PERF_ATTR_SIZE_VER8: u32 = 136;

/*
u32 type_                 major type
u32 size                  size of the attr structure
u64 config                type-specific configuration
u64 sample_period         union with sample_freq
u64 sample_type
u64 read_format
u64 _bitfield_1           option bits, see below
u32 wakeup_events         union with wakeup_watermark
u32 bp_type
u64 config1               union with bp_addr/kprobe_func/uprobe_path
u64 config2               union with bp_len/kprobe_addr/probe_offset
u64 branch_sample_type
u64 sample_regs_user
u32 sample_stack_user
i32 clockid
u64 sample_regs_intr
u32 aux_watermark
u16 sample_max_stack
u16 __reserved_2
u32 aux_sample_size
u32 aux_action
u64 sig_data
u64 config3
*/
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct perf_event_attr {
    pub type_: u32,
    pub size: u32,
    pub config: u64,
    pub sample_period: u64,
    pub sample_type: u64,
    pub read_format: u64,
    pub _bitfield_1: u64,
    pub wakeup_events: u32,
    pub bp_type: u32,
    pub config1: u64,
    pub config2: u64,
    pub branch_sample_type: u64,
    pub sample_regs_user: u64,
    pub sample_stack_user: u32,
    pub clockid: i32,
    pub sample_regs_intr: u64,
    pub aux_watermark: u32,
    pub sample_max_stack: u16,
    pub __reserved_2: u16,
    pub aux_sample_size: u32,
    pub aux_action: u32,
    pub sig_data: u64,
    pub config3: u64,
}

/*
bit  0     disabled
bit  1     inherit
bit  2     pinned
bit  3     exclusive
bit  4     exclude_user
bit  5     exclude_kernel
bit  6     exclude_hv
bit  7     exclude_idle
bits 8-14  mmap, comm, freq, inherit_stat, enable_on_exec, task, watermark
bits 15-16 precise_ip
*/
macro_rules! bitfield {
    ($get:ident, $set:ident, $off:expr, $width:expr) => {
        #[inline]
        pub fn $get(&self) -> u64 {
            (self._bitfield_1 >> $off) & ((1 << $width) - 1)
        }

        #[inline]
        pub fn $set(&mut self, val: u64) {
            let mask = ((1u64 << $width) - 1) << $off;
            self._bitfield_1 = (self._bitfield_1 & !mask) | ((val << $off) & mask);
        }
    };
}

impl perf_event_attr {
    bitfield!(disabled, set_disabled, 0, 1);
    bitfield!(exclude_user, set_exclude_user, 4, 1);
    bitfield!(exclude_kernel, set_exclude_kernel, 5, 1);
    bitfield!(exclude_hv, set_exclude_hv, 6, 1);
    bitfield!(exclude_idle, set_exclude_idle, 7, 1);
    bitfield!(precise_ip, set_precise_ip, 15, 2);
}
