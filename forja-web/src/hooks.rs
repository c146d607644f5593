//! Hooks shared by the Forja components.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use forja_core::AUTO_CLEAR_MS;
use gloo::timers::callback::Timeout;
use yew::prelude::*;

use crate::backend::AbortSlot;

/// Component state that async completions can mutate in place.
///
/// Reads always see the latest value, so callbacks created on an older render
/// never act on a stale copy.
pub struct Store<T> {
    cell: Rc<RefCell<T>>,
    refresh: UseForceUpdateHandle,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
            refresh: self.refresh.clone(),
        }
    }
}

impl<T> Store<T> {
    #[must_use]
    pub fn read(&self) -> Ref<'_, T> {
        self.cell.borrow()
    }

    /// Mutate the state and schedule a re-render.
    pub fn update<R>(&self, mutate: impl FnOnce(&mut T) -> R) -> R {
        let result = mutate(&mut self.cell.borrow_mut());
        self.refresh.force_update();
        result
    }
}

#[hook]
pub fn use_store<T: Default + 'static>() -> Store<T> {
    let cell = use_mut_ref(T::default);
    let refresh = use_force_update();
    Store { cell, refresh }
}

/// Call `expire` with `generation` once [`AUTO_CLEAR_MS`] have passed.
///
/// A new generation (or `None`) cancels the pending timer.
#[hook]
pub fn use_auto_clear(generation: Option<u64>, expire: Callback<u64>) {
    use_effect_with(generation, move |generation| {
        let timer = generation.map(|generation| {
            Timeout::new(AUTO_CLEAR_MS, move || expire.emit(generation))
        });
        move || drop(timer)
    });
}

/// Abort slot that aborts its last request when the component unmounts.
#[hook]
pub fn use_abort_slot() -> Rc<RefCell<AbortSlot>> {
    let slot = use_mut_ref(AbortSlot::default);
    {
        let slot = Rc::clone(&slot);
        use_effect_with((), move |()| move || slot.borrow_mut().abort());
    }
    slot
}
