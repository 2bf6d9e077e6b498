use super::{add_defaults, event_of, umask_of, Descriptor, Encoding, Selection};
use crate::error::{Error, Result};
use crate::table::Catalog;

// Generalized cache events: the event ID OR'd with one unit mask per group
// (operation, result), missing groups filled with their defaults.
pub(super) fn encode(catalog: &Catalog, desc: &Descriptor) -> Result<Encoding> {
    let ev = event_of(catalog, desc.event)?;

    let mut grpmsk = match ev.ngrp {
        0 => 0,
        n if n >= u64::BITS => u64::MAX,
        n => (1u64 << n) - 1,
    };
    let mut code = ev.id;
    let mut umasks = vec![];

    for attr in &desc.attrs {
        match *attr {
            Selection::Os(_) => continue,
            Selection::Umask(idx) => {
                let um = umask_of(catalog, desc.event, idx)?;
                code |= um.id;

                let msk = 1u64.checked_shl(um.group).unwrap_or(0);
                // Unit masks cannot be combined within a group.
                if grpmsk & msk == 0 {
                    return Err(Error::Umask {
                        event: ev.name().to_string(),
                        group: um.group,
                        reason: "more than one unit mask selected",
                    });
                }
                grpmsk &= !msk;
                umasks.push(idx);
            }
            // No PMU modifier, no raw umask.
            Selection::Pmu { .. } => {
                return Err(Error::Attr {
                    event: ev.name().to_string(),
                })
            }
        }
    }

    if grpmsk != 0 {
        code |= add_defaults(catalog, desc.event, grpmsk, &mut umasks)?;
    }

    // Defaults are in, now order by attribute index so the string does not
    // depend on submission order.
    umasks.sort();

    let mut enc = Encoding::new(desc.event, ev.name());
    enc.codes.push(code);
    for &idx in &umasks {
        enc.fstr.push(':');
        enc.fstr.push_str(umask_of(catalog, desc.event, idx)?.name());
    }
    enc.umasks = umasks;
    Ok(enc)
}
