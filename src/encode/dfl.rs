use super::event_of;
use crate::error::{Error, Result};
use crate::table::Catalog;

/// Fills every group set in `msk` with the default unit masks of that group.
///
/// Returns the OR of the injected codes and appends the injected attribute
/// indices to `umasks`. Fails with [`Umask`][Error::Umask] if one of the
/// groups has no default, in which case `umasks` is left untouched.
pub fn add_defaults(catalog: &Catalog, event: usize, msk: u64, umasks: &mut Vec<usize>) -> Result<u64> {
    let ev = event_of(catalog, event)?;

    let mut code = 0;
    let mut added = vec![];
    for group in (0..u64::BITS).filter(|it| msk & (1u64 << *it) != 0) {
        let before = added.len();

        for (idx, um) in catalog.umasks(event) {
            if um.group != group || !um.is_default() {
                continue;
            }
            tracing::debug!("added default {} for group {}", um.name(), group);
            code |= um.id;
            added.push(idx);
        }

        if added.len() == before {
            tracing::debug!("no default found for event {} unit mask group {}", ev.name(), group);
            return Err(Error::Umask {
                event: ev.name().to_string(),
                group,
                reason: "no unit mask selected and no default",
            });
        }
    }

    umasks.extend(added);
    Ok(code)
}
