use super::{add_defaults, event_of, umask_of, Descriptor, Encoding, Selection};
use crate::error::{Error, Result};
use crate::table::Catalog;

// Tracepoints have no event code, the tracepoint ID is carried by the one
// selected unit mask.
pub(super) fn encode(catalog: &Catalog, desc: &Descriptor) -> Result<Encoding> {
    let ev = event_of(catalog, desc.event)?;

    let mut selected = None;
    for attr in &desc.attrs {
        match *attr {
            Selection::Os(_) => continue,
            Selection::Umask(idx) => {
                // Tracepoint unit masks cannot be combined.
                if selected.is_some() {
                    return Err(Error::FeatComb {
                        event: ev.name().to_string(),
                        reason: "tracepoint unit masks cannot be combined",
                    });
                }
                umask_of(catalog, desc.event, idx)?;
                selected = Some(idx);
            }
            Selection::Pmu { .. } => {
                return Err(Error::Attr {
                    event: ev.name().to_string(),
                })
            }
        }
    }

    let mut umasks = vec![];
    let code = match selected {
        Some(idx) => {
            umasks.push(idx);
            umask_of(catalog, desc.event, idx)?.id
        }
        None => add_defaults(catalog, desc.event, 1, &mut umasks)?,
    };

    let mut enc = Encoding::new(desc.event, ev.name());
    enc.codes.push(code);
    for &idx in &umasks {
        enc.fstr.push(':');
        enc.fstr.push_str(umask_of(catalog, desc.event, idx)?.name());
    }
    enc.umasks = umasks;
    Ok(enc)
}
