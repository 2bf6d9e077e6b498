use std::io::Write;

use thiserror::Error;

use super::Catalog;
use crate::error::{Error, Result};
use crate::event::INLINE_UMASKS;

/// One consistency violation found in a catalog.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Violation {
    #[error("event{idx}: :: no name (prev event was {prev})")]
    NoName { idx: usize, prev: String },
    #[error("event{idx}: {name} :: no description")]
    NoDesc { idx: usize, name: String },
    #[error("event{idx}: {name} :: invalid type {ty}")]
    BadType { idx: usize, name: String, ty: u32 },
    #[error("event{idx}: {name} :: numasks too big (<{}) without overflow index", INLINE_UMASKS)]
    MissingOvfl { idx: usize, name: String },
    #[error("event{idx}: {name} :: overflow umask idx defined but not needed (<{})", INLINE_UMASKS)]
    NeedlessOvfl { idx: usize, name: String },
    #[error("event{idx}: {name} :: ngrp cannot be zero")]
    ZeroGroups { idx: usize, name: String },
    #[error("event{idx}: {name} :: ngrp must be zero")]
    StrayGroups { idx: usize, name: String },
    #[error("event{idx}: {name} umask{umask} :: missing")]
    MissingUmask { idx: usize, name: String, umask: usize },
    #[error("event{idx}: {name} umask{umask} :: no name")]
    UmaskNoName { idx: usize, name: String, umask: usize },
    #[error("event{idx}: {name} umask{umask}: {uname} :: no description")]
    UmaskNoDesc {
        idx: usize,
        name: String,
        umask: usize,
        uname: String,
    },
    #[error("event{idx}: {name} umask{umask}: {uname} :: invalid grpid {group} (must be < {ngrp})")]
    BadGroup {
        idx: usize,
        name: String,
        umask: usize,
        uname: String,
        group: u32,
        ngrp: u32,
    },
    #[error("event{idx}: {name} :: numasks ({numasks}) invalid, more unit masks exist")]
    ExcessUmask {
        idx: usize,
        name: String,
        numasks: usize,
    },
}

/// Result of [`validate`]: every violation, in catalog order.
#[derive(Clone, Debug, Default)]
pub struct Report {
    pub violations: Vec<Violation>,
}

impl Report {
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    /// Writes one `pmu: <name> <violation>` line per violation, then fails
    /// with [`Inval`][Error::Inval] if there was any.
    pub fn write_to(&self, pmu: &str, out: &mut impl Write) -> Result<()> {
        for it in &self.violations {
            // The diagnostics sink is best effort, only violations fail.
            let _ = writeln!(out, "pmu: {} {}", pmu, it);
        }
        match self.is_ok() {
            true => Ok(()),
            false => Err(Error::Inval(format!(
                "{} table violations",
                self.violations.len()
            ))),
        }
    }
}

/// Checks every event and unit mask of `catalog`, without stopping at the
/// first violation.
pub fn validate(catalog: &Catalog) -> Report {
    let mut violations = vec![];
    let mut push = |v: Violation| violations.push(v);

    for (idx, ev) in catalog.events().enumerate() {
        let name = ev.name().to_string();

        if ev.name.is_none() {
            let prev = idx
                .checked_sub(1)
                .and_then(|it| catalog.event(it))
                .map_or("??", |it| it.name())
                .to_string();
            push(Violation::NoName { idx, prev });
        }
        if ev.desc.is_none() {
            push(Violation::NoDesc { idx, name: name.clone() });
        }
        if ev.category().is_none() {
            push(Violation::BadType {
                idx,
                name: name.clone(),
                ty: ev.ty,
            });
        }
        if ev.numasks >= INLINE_UMASKS && ev.ovfl_idx.is_none() {
            push(Violation::MissingOvfl { idx, name: name.clone() });
        }
        if ev.numasks < INLINE_UMASKS && ev.ovfl_idx.is_some() {
            push(Violation::NeedlessOvfl { idx, name: name.clone() });
        }
        if ev.numasks > 0 && ev.ngrp == 0 {
            push(Violation::ZeroGroups { idx, name: name.clone() });
        }
        if ev.numasks == 0 && ev.ngrp > 0 {
            push(Violation::StrayGroups { idx, name: name.clone() });
        }

        for umask in 0..ev.numasks {
            let Some(um) = catalog.umask(idx, umask) else {
                push(Violation::MissingUmask {
                    idx,
                    name: name.clone(),
                    umask,
                });
                continue;
            };
            if um.name.is_none() {
                push(Violation::UmaskNoName {
                    idx,
                    name: name.clone(),
                    umask,
                });
            }
            if um.desc.is_none() {
                push(Violation::UmaskNoDesc {
                    idx,
                    name: name.clone(),
                    umask,
                    uname: um.name().to_string(),
                });
            }
            if ev.ngrp > 0 && um.group >= ev.ngrp {
                push(Violation::BadGroup {
                    idx,
                    name: name.clone(),
                    umask,
                    uname: um.name().to_string(),
                    group: um.group,
                    ngrp: ev.ngrp,
                });
            }
        }

        if ev.umasks.iter().skip(ev.numasks).any(Option::is_some) {
            push(Violation::ExcessUmask {
                idx,
                name,
                numasks: ev.numasks,
            });
        }
    }

    Report { violations }
}
