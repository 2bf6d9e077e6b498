//! Growable event catalog.
//!
//! Events are addressed by their index in the catalog, which never changes
//! once issued. Unit masks past [`INLINE_UMASKS`] live in a separate overflow
//! arena, in one contiguous run per event, addressed by the run's start index
//! stored in [`EventRecord::ovfl_idx`]. Both stores only grow at the end, so
//! relocating either of them on growth never invalidates an index.

pub mod validate;

use crate::error::{Error, Result};
use crate::event::{EventRecord, StaticEvent, StaticTable, UmaskRecord, INLINE_UMASKS};

#[derive(Clone, Debug)]
pub struct Catalog {
    name: &'static str,
    events: Vec<EventRecord>,
    ovfl: Vec<UmaskRecord>,
    event_grow: usize,
    umask_grow: usize,
    dynamic: bool,
}

impl Catalog {
    /// Clones `table` into a catalog that can grow.
    ///
    /// Room for `event_grow` more events is allocated upfront.
    pub fn clone_static(table: &StaticTable, event_grow: usize, umask_grow: usize) -> Result<Self> {
        let mut catalog = Self {
            name: table.name,
            events: vec![],
            ovfl: vec![],
            event_grow: event_grow.max(1),
            umask_grow: umask_grow.max(1),
            dynamic: true,
        };
        catalog
            .events
            .try_reserve_exact(table.events.len() + catalog.event_grow)?;
        for ev in table.events {
            let umasks = ev.umasks.iter().map(UmaskRecord::from).collect();
            catalog.commit(head_of(ev), umasks)?;
        }
        Ok(catalog)
    }

    /// Static-only catalog, used when the growable clone cannot be allocated.
    ///
    /// Allocating slots on it fails with [`NoMem`][crate::error::Error::NoMem].
    pub fn fixed(table: &StaticTable) -> Self {
        let mut catalog = Self {
            name: table.name,
            events: Vec::with_capacity(table.events.len()),
            ovfl: vec![],
            event_grow: 0,
            umask_grow: 0,
            dynamic: false,
        };
        for ev in table.events {
            let mut head = head_of(ev);
            head.numasks = ev.umasks.len();
            for (slot, um) in head.umasks.iter_mut().zip(ev.umasks) {
                *slot = Some(um.into());
            }
            if ev.umasks.len() >= INLINE_UMASKS {
                head.ovfl_idx = Some(catalog.ovfl.len());
                catalog
                    .ovfl
                    .extend(ev.umasks[INLINE_UMASKS..].iter().map(UmaskRecord::from));
            }
            catalog.events.push(head);
        }
        catalog
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether slots can still be allocated.
    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.events.capacity()
    }

    pub fn event(&self, idx: usize) -> Option<&EventRecord> {
        self.events.get(idx)
    }

    pub fn event_mut(&mut self, idx: usize) -> Option<&mut EventRecord> {
        self.events.get_mut(idx)
    }

    pub fn events(&self) -> impl Iterator<Item = &EventRecord> {
        self.events.iter()
    }

    /// Returns the `attr_idx`-th unit mask of event `idx`, from the inline
    /// slots or from the overflow arena.
    pub fn umask(&self, idx: usize, attr_idx: usize) -> Option<&UmaskRecord> {
        let ev = self.events.get(idx)?;
        if attr_idx >= ev.numasks {
            return None;
        }
        if attr_idx < INLINE_UMASKS {
            ev.umasks[attr_idx].as_ref()
        } else {
            self.ovfl.get(ev.ovfl_idx? + attr_idx - INLINE_UMASKS)
        }
    }

    /// Unit masks of event `idx` with their attribute index.
    pub fn umasks(&self, idx: usize) -> impl Iterator<Item = (usize, &UmaskRecord)> + '_ {
        let numasks = self.events.get(idx).map_or(0, |ev| ev.numasks);
        (0..numasks).filter_map(move |i| self.umask(idx, i).map(|um| (i, um)))
    }

    pub fn find_event(&self, name: &str) -> Option<usize> {
        self.events.iter().position(|ev| ev.name() == name)
    }

    pub fn find_umask(&self, idx: usize, name: &str) -> Option<usize> {
        self.umasks(idx).find(|(_, um)| um.name() == name).map(|(i, _)| i)
    }

    /// Appends an empty event slot and returns its index.
    pub fn allocate_event(&mut self) -> Result<usize> {
        self.reserve_events(1)?;
        self.events.push(EventRecord::default());
        Ok(self.events.len() - 1)
    }

    /// Appends an empty slot to the overflow arena and returns its index.
    ///
    /// The slot is raw: it belongs to no event's run and is never reclaimed.
    /// It is meant for callers laying out runs by hand, which then point an
    /// event's `ovfl_idx` at the first slot through [`event_mut`][Self::event_mut].
    /// [`commit`][Self::commit] places each run after every existing slot, so
    /// raw slots never break a committed run.
    pub fn allocate_umask(&mut self) -> Result<usize> {
        self.reserve_umasks(1)?;
        self.ovfl.push(UmaskRecord::default());
        Ok(self.ovfl.len() - 1)
    }

    /// Appends `head` with `umasks` and returns the new event index.
    ///
    /// `numasks` and `ovfl_idx` of `head` are overwritten. Either the whole
    /// event is committed or the catalog is left untouched.
    pub fn commit(&mut self, mut head: EventRecord, umasks: Vec<UmaskRecord>) -> Result<usize> {
        let spill = umasks.len().saturating_sub(INLINE_UMASKS);
        self.reserve_events(1)?;
        self.reserve_umasks(spill)?;

        head.numasks = umasks.len();
        head.ovfl_idx = (umasks.len() >= INLINE_UMASKS).then_some(self.ovfl.len());
        head.umasks = Default::default();

        let mut umasks = umasks.into_iter();
        for (slot, um) in head.umasks.iter_mut().zip(umasks.by_ref()) {
            *slot = Some(um);
        }
        self.ovfl.extend(umasks);
        self.events.push(head);

        Ok(self.events.len() - 1)
    }

    fn reserve_events(&mut self, n: usize) -> Result<()> {
        if grow(&mut self.events, n, self.event_grow, self.dynamic)? {
            tracing::debug!(capacity = self.events.capacity(), "event table grown");
        }
        Ok(())
    }

    fn reserve_umasks(&mut self, n: usize) -> Result<()> {
        if grow(&mut self.ovfl, n, self.umask_grow, self.dynamic)? {
            tracing::debug!(capacity = self.ovfl.capacity(), "overflow umask table grown");
        }
        Ok(())
    }
}

fn head_of(ev: &StaticEvent) -> EventRecord {
    EventRecord {
        name: Some(ev.name.into()),
        desc: Some(ev.desc.into()),
        ty: ev.ty,
        id: ev.id,
        modmsk: ev.modmsk,
        numasks: 0,
        ngrp: ev.ngrp,
        ovfl_idx: None,
        umasks: Default::default(),
    }
}

// Makes room for `n` more elements, growing by whole increments of `step`.
// Returns whether the store was reallocated.
fn grow<T>(store: &mut Vec<T>, n: usize, step: usize, dynamic: bool) -> Result<bool> {
    let free = store.capacity() - store.len();
    if free >= n {
        return Ok(false);
    }
    if !dynamic {
        return Err(Error::NoMem);
    }
    let more = (n - free).div_ceil(step) * step;
    store.try_reserve_exact(free + more)?;
    Ok(true)
}
