use super::compose::Composition;
use super::PerfMods;
use crate::config::{Arch, Plm};
use crate::encode::Encoding;
use crate::error::{Error, Result};
use crate::ffi::{bindings as b, Attr};

/// Builds the `perf_event_attr` for `enc`.
///
/// Exclusion bits come from the explicit privilege mask of `mods` when one was
/// given, from `dfl_plm` otherwise, never a mix of both.
pub(crate) fn from(enc: &Encoding, ty: u32, arch: Arch, dfl_plm: Plm, mods: &PerfMods) -> Result<Attr> {
    let mut attr = Attr {
        size: b::PERF_ATTR_SIZE_VER8,
        ..Default::default()
    };

    attr.type_ = ty;
    attr.config = Composition::select(arch, enc.offcore).config(&enc.codes)?;

    let plm = match mods.plm.is_empty() {
        true => dfl_plm,
        false => mods.plm,
    };
    attr.set_exclude_user(!plm.contains(Plm::PLM3) as _);
    attr.set_exclude_kernel(!plm.contains(Plm::PLM0) as _);
    attr.set_exclude_hv(!plm.contains(Plm::PLMH) as _);

    // https://github.com/torvalds/linux/blob/v6.13/include/uapi/linux/perf_event.h#L412
    if !(0..=3).contains(&mods.precise_ip) {
        return Err(Error::AttrSet {
            name: "precise",
            value: mods.precise_ip,
        });
    }
    attr.set_precise_ip(mods.precise_ip as _);

    tracing::debug!(
        "PERF[type={:x} val={:#x} e_u={} e_k={} e_hv={} precise={}] {}",
        attr.type_,
        attr.config,
        attr.exclude_user(),
        attr.exclude_kernel(),
        attr.exclude_hv(),
        attr.precise_ip(),
        enc.fstr,
    );

    Ok(attr)
}
