//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `switchboard_core` linkage.
//! - Exercise one register/notify round trip with deterministic output.

use serde_json::{json, Value};
use std::cell::Cell;
use std::process::ExitCode;
use std::rc::Rc;
use switchboard_core::{ControllerParams, Core, Declaration, ModelEvent, ModelParams};

fn main() -> ExitCode {
    println!("switchboard_core ping={}", switchboard_core::ping());
    println!("switchboard_core version={}", switchboard_core::core_version());

    match probe() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("switchboard_core probe=error error={err}");
            ExitCode::FAILURE
        }
    }
}

fn probe() -> Result<(), Box<dyn std::error::Error>> {
    let core = Core::builder().debug(true).build();
    let views = Rc::new(Cell::new(0usize));
    let models = Rc::new(Cell::new(0usize));
    let (view_spy, model_spy) = (views.clone(), models.clone());

    core.model()
        .register("probeModel", ModelParams::in_scope("probe"))?;
    core.controller().register(
        "probeController",
        ControllerParams::new()
            .scope("probe")
            .uses(["probeModel"])
            .constr(move |_, _, _, _| {
                Ok(Declaration::new()
                    .on_view("ping", move |_| {
                        view_spy.set(view_spy.get() + 1);
                        Ok(())
                    })
                    .on_model("probeModel", ModelEvent::Update, move |_| {
                        model_spy.set(model_spy.get() + 1);
                        Ok(())
                    }))
            }),
    )?;

    core.notify("ping", &Value::Null, "probe")?;
    core.model_notify("probeModel", ModelEvent::Update, &[json!({"probe": true})])?;
    println!(
        "switchboard_core probe view_hits={} model_hits={}",
        views.get(),
        models.get()
    );

    if let Some(debug) = core.debug() {
        println!("switchboard_core units={}", serde_json::to_string(&debug.list())?);
    }
    Ok(())
}
