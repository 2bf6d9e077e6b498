pub mod bindings;

pub type Attr = bindings::perf_event_attr;

// The kernel rejects a `perf_event_attr` whose size does not match one of the
// published versions, so the layout is pinned here.
const _: () = assert!(size_of::<Attr>() == bindings::PERF_ATTR_SIZE_VER8 as usize);
