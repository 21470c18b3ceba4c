//! Walks one toggle through each way an owner can compose with it.
//!
//! Run with `RUST_LOG=debug` to see every pipeline run.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use toggler_core::*;

fn uncontrolled() {
    let t = Toggle::new(
        ToggleConfig::new()
            .on_toggle(|on| log::info!("uncontrolled: toggled -> {on}"))
            .on_reset(|on| log::info!("uncontrolled: reset -> {on}")),
    );
    t.toggle();
    t.toggle();
    t.toggle();
    t.reset();
}

/// The owner keeps "on" and follows the coordinator's proposals itself.
fn controlled() {
    let owner_on = Arc::new(AtomicBool::new(false));
    let t = Toggle::new(ToggleConfig::new().on(Some(false)).on_state_change({
        let owner_on = owner_on.clone();
        move |changes, _| {
            if let Some(on) = changes.on {
                log::info!("controlled: owner accepts {} -> {on}", changes.change_type);
                owner_on.store(on, Ordering::SeqCst);
            }
        }
    }));

    for _ in 0..2 {
        t.toggle();
        t.set_controlled_on(Some(owner_on.load(Ordering::SeqCst)));
        log::info!("controlled: visible state {:?}", t.get_state());
    }
}

/// After four clicks, plain toggles are forced off; a `forced` change
/// still gets through.
fn reducer(forced: ChangeType) {
    let clicks = Arc::new(AtomicUsize::new(0));
    let limit = {
        let clicks = clicks.clone();
        move |_: &ToggleState, changes: ChangeRecord| {
            if changes.change_type == ChangeType::Toggle
                && clicks.fetch_add(1, Ordering::SeqCst) >= 4
            {
                return changes.with_on(false);
            }
            changes
        }
    };
    let t = Toggle::new(
        ToggleConfig::new()
            .state_reducer(limit)
            .on_state_change(|changes, state| {
                log::info!("reducer: {} -> {:?}", changes.change_type, state)
            }),
    );

    for _ in 0..6 {
        t.toggle();
    }
    t.toggle_with(forced);
}

fn props_getter() -> anyhow::Result<()> {
    let t = Toggle::new(ToggleConfig::new());
    let props = t.toggler_props(
        TogglerOverrides::new()
            .on_click(|| log::info!("props: owner click handler"))
            .attr("id", "custom-button-id"),
    );
    log::info!("props: {}", serde_json::to_string(&props.to_json())?);
    props.click();

    let props = t.toggler_props(TogglerOverrides::new());
    log::info!("props: after click {}", serde_json::to_string(&props.to_json())?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    uncontrolled();
    controlled();
    reducer(ChangeType::custom("forced")?);
    props_getter()?;
    Ok(())
}
