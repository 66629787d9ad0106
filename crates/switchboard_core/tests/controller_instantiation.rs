use serde_json::{json, Value};
use std::cell::RefCell;
use std::rc::Rc;
use switchboard_core::{
    ControllerParams, Core, Declaration, InvalidRegistration, ModelEvent, ModelParams,
    Registration, RegistrationError, UnitError,
};

fn debug_core() -> Core {
    Core::builder().debug(true).build()
}

fn empty_controller(scope: &str) -> ControllerParams {
    ControllerParams::new()
        .scope(scope)
        .constr(|_, _, _, _| Ok(Declaration::new()))
}

fn paths(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn registers_successfully_created_controllers() {
    let core = debug_core();
    let debug = core.debug().expect("debug enabled");
    assert!(debug.list().get("myScope").is_none());

    core.controller()
        .register("myController", empty_controller("myScope"))
        .expect("first controller");

    core.model()
        .register("myModel", ModelParams::in_scope("myScope"))
        .expect("model registration");
    let outcome = core
        .controller()
        .register(
            "mySecondController",
            ControllerParams::new()
                .scope("myScope")
                .uses(["myModel"])
                .constr(|me, _, _, _| {
                    let mut declaration = Declaration::new().on_view("myHandler", |_| Ok(()));
                    for event in ModelEvent::all() {
                        declaration = declaration.on_model("myModel", event, |_| Ok(()));
                    }
                    Ok(declaration
                        .method("init", move |_| Ok(json!(me.scope())))
                        .method("myMethod", |_| Ok(Value::Null)))
                }),
        )
        .expect("second controller");
    assert!(outcome.is_registered());
    assert_eq!(outcome.path(), "myScope/mySecondController");

    let listing = debug.list();
    assert_eq!(
        listing.get("myScope"),
        Some(&paths(&["myScope/myController", "myScope/mySecondController"]))
    );
    assert!(
        listing.get("myController").is_none(),
        "the unit name is not a scope"
    );
}

#[test]
fn registers_multiple_controllers_on_the_same_scope() {
    let core = debug_core();
    let controllers = core.controller();
    controllers
        .register("myController", empty_controller("myScope"))
        .expect("myController");
    controllers
        .register("mySecondController", empty_controller("myScope"))
        .expect("mySecondController");
    controllers
        .register("test", empty_controller("testscope"))
        .expect("test");

    let listing = core.debug().expect("debug enabled").list();
    assert_eq!(
        listing.get("myScope"),
        Some(&paths(&["myScope/myController", "myScope/mySecondController"]))
    );
    assert_eq!(listing.get("testscope"), Some(&paths(&["testscope/test"])));
    assert!(listing.get("myController").is_none());
}

#[test]
fn registers_the_same_controller_on_different_scopes() {
    let core = debug_core();
    core.controller()
        .register("myController", empty_controller("myScope"))
        .expect("first scope");
    core.controller()
        .register("myController", empty_controller("mySecondScope"))
        .expect("second scope");

    let listing = core.debug().expect("debug enabled").list();
    assert_eq!(listing.get("myScope"), Some(&paths(&["myScope/myController"])));
    assert_eq!(
        listing.get("mySecondScope"),
        Some(&paths(&["mySecondScope/myController"]))
    );
    assert!(listing.get("myController").is_none());
}

#[test]
fn registers_free_form_names_and_scopes() {
    let core = debug_core();
    for (name, scope) in [
        ("myController", "my scope"),
        ("contrôleur", "portée"),
        ("main view", "app:main"),
    ] {
        core.controller()
            .register(name, empty_controller(scope))
            .expect("free-form registration");
    }

    let listing = core.debug().expect("debug enabled").list();
    assert_eq!(listing.get("my scope"), Some(&paths(&["my scope/myController"])));
    assert_eq!(listing.get("portée"), Some(&paths(&["portée/contrôleur"])));
    assert_eq!(listing.get("app:main"), Some(&paths(&["app:main/main view"])));

    let err = core
        .controller()
        .register("myController", empty_controller("my/scope"))
        .expect_err("separator in scope");
    assert!(matches!(
        err,
        RegistrationError::Invalid(InvalidRegistration::InvalidScope(_))
    ));
}

#[test]
fn skips_controllers_whose_models_are_not_registered() {
    let core = debug_core();
    let constructed = Rc::new(RefCell::new(false));
    let flag = constructed.clone();

    let outcome = core
        .controller()
        .register(
            "myController",
            ControllerParams::new()
                .scope("myScope")
                .uses(["myModel"])
                .constr(move |_, _, _, _| {
                    *flag.borrow_mut() = true;
                    Ok(Declaration::new())
                }),
        )
        .expect("unmet dependency is not an error");

    assert_eq!(
        outcome,
        Registration::Skipped {
            path: "myScope/myController".to_string(),
            missing: vec!["myModel".to_string()],
        }
    );
    assert!(!*constructed.borrow());
    assert!(core.debug().expect("debug enabled").list().is_empty());
}

#[test]
fn late_model_registration_does_not_revive_a_skipped_controller() {
    let core = debug_core();
    let params = || {
        ControllerParams::new()
            .scope("myScope")
            .uses(["myModel"])
            .constr(|_, _, _, _| Ok(Declaration::new()))
    };
    core.controller()
        .register("myController", params())
        .expect("skipped");
    core.model()
        .register("myModel", ModelParams::in_scope("anotherScope"))
        .expect("model");
    assert!(!core.controller().contains("myController", "myScope"));

    core.controller()
        .register("myController", params())
        .expect("retry after model load");
    assert!(core.controller().contains("myController", "myScope"));
}

#[test]
fn destroys_controllers_and_tolerates_repeats() {
    let core = debug_core();
    core.controller()
        .register("myController", empty_controller("myScope"))
        .expect("registration");
    assert!(core.debug().expect("debug").list().get("myScope").is_some());

    core.controller().destroy("myController", "myScope");
    assert!(core.debug().expect("debug").list().get("myScope").is_none());

    core.controller().destroy("myController", "myScope");
    core.controller().destroy("neverRegistered", "nowhere");
}

#[test]
fn notifies_controllers_as_if_from_a_view() {
    let core = debug_core();
    let calls = Rc::new(RefCell::new(Vec::<Value>::new()));

    for (name, scope) in [
        ("myController", "myScope"),
        ("mySecondController", "myScope"),
        ("myThirdController", "mySecondScope"),
    ] {
        let spy = calls.clone();
        core.controller()
            .register(
                name,
                ControllerParams::new().scope(scope).constr(move |_, _, _, _| {
                    Ok(Declaration::new().on_view("myTestViewEvent", move |data| {
                        spy.borrow_mut().push(data.clone());
                        Ok(())
                    }))
                }),
            )
            .expect("registration");
    }

    core.controller()
        .notify("myTestViewEvent", &json!({"foo": "bar"}), "myUselessScope")
        .expect("wrong scope dispatch");
    assert!(calls.borrow().is_empty());

    core.controller()
        .notify("myTestViewEvent", &json!({"foo": "bar"}), "myScope")
        .expect("dispatch");
    let calls = calls.borrow();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0]["foo"], "bar");
    assert_eq!(calls[1], json!({"foo": "bar"}));
}

#[test]
fn notifies_controllers_as_if_from_a_model() {
    let core = debug_core();
    let calls = Rc::new(RefCell::new(Vec::<Value>::new()));
    let spy = calls.clone();
    core.controller()
        .register(
            "myController",
            ControllerParams::new().scope("myScope").constr(move |_, _, _, _| {
                Ok(Declaration::new().on_model(
                    "myTestModelEvent",
                    ModelEvent::Create,
                    move |args| {
                        spy.borrow_mut().extend(args.iter().cloned());
                        Ok(())
                    },
                ))
            }),
        )
        .expect("registration");

    core.controller()
        .model_notify("myTestModelEvent", ModelEvent::Call, &[json!({"foo": "bar"})])
        .expect("wrong type dispatch");
    assert!(calls.borrow().is_empty());

    core.controller()
        .model_notify("myTestModelEvent", ModelEvent::Create, &[json!({"foo": "bar"})])
        .expect("dispatch");
    assert_eq!(*calls.borrow(), vec![json!({"foo": "bar"})]);
}

#[test]
fn rejects_controllers_without_name_or_params() {
    let core = debug_core();

    let err = core
        .controller()
        .register("", empty_controller("myScope"))
        .expect_err("missing name");
    assert!(matches!(
        err,
        RegistrationError::Invalid(InvalidRegistration::MissingName)
    ));

    let err = core
        .controller()
        .register("myController", ControllerParams::new())
        .expect_err("missing params");
    assert!(matches!(
        err,
        RegistrationError::Invalid(InvalidRegistration::MissingParams)
    ));

    assert!(core.debug().expect("debug").list().get("myScope").is_none());
}

#[test]
fn rejects_controllers_without_scope_or_constructor() {
    let core = debug_core();

    let err = core
        .controller()
        .register("myController", ControllerParams::new().scope("myScope"))
        .expect_err("missing constructor");
    assert!(matches!(
        err,
        RegistrationError::Invalid(InvalidRegistration::MissingConstructor)
    ));

    let err = core
        .controller()
        .register(
            "myController",
            ControllerParams::new().constr(|_, _, _, _| Ok(Declaration::new())),
        )
        .expect_err("missing scope");
    assert!(matches!(
        err,
        RegistrationError::Invalid(InvalidRegistration::MissingScope)
    ));

    assert!(core.debug().expect("debug").list().is_empty());
}

#[test]
fn surfaces_failures_raised_while_initialising() {
    let core = debug_core();
    let failing = || {
        ControllerParams::new()
            .scope("mySecondScope")
            .constr(|me, _, _, _| {
                Ok(Declaration::new()
                    .method("init", move |_| me.call("_myTestMethod", &[]))
                    .method("_myTestMethod", |_| Err(UnitError::raised("AIE!"))))
            })
    };

    let err = core
        .controller()
        .register("myController", failing())
        .expect_err("init failure must surface");
    assert!(matches!(
        err.unit_error(),
        Some(UnitError::Raised(message)) if message == "AIE!"
    ));
    assert!(core.debug().expect("debug").list().is_empty());

    let err = core
        .controller()
        .register(
            "myController",
            ControllerParams::new()
                .scope("mySecondScope")
                .constr(|me, _, _, _| {
                    Ok(Declaration::new().method("init", move |_| me.call("_missing", &[])))
                }),
        )
        .expect_err("unknown method must surface");
    assert!(matches!(
        err.unit_error(),
        Some(UnitError::UnknownMethod { method }) if method == "_missing"
    ));

    let err = core
        .controller()
        .register(
            "myController",
            ControllerParams::new()
                .scope("mySecondScope")
                .constr(|_, _, _, _| Err(UnitError::raised("constructor failed"))),
        )
        .expect_err("constructor failure must surface");
    assert!(matches!(err, RegistrationError::Constructor { .. }));
    assert!(core.debug().expect("debug").list().is_empty());

    let err = core
        .controller()
        .register("myController", failing())
        .expect_err("init failure repeats");
    assert!(
        matches!(err, RegistrationError::Constructor { .. }),
        "rollback must not leave a duplicate behind"
    );
}

#[test]
fn surfaces_own_method_calls_made_before_the_shell_is_populated() {
    let core = debug_core();
    let err = core
        .controller()
        .register(
            "myController",
            ControllerParams::new().scope("myScope").constr(|me, _, _, _| {
                me.call("init", &[])?;
                Ok(Declaration::new().method("init", |_| Ok(Value::Null)))
            }),
        )
        .expect_err("methods are not reachable while constructing");

    assert!(matches!(
        err,
        RegistrationError::Constructor { ref path, .. } if path == "myScope/myController"
    ));
    assert!(matches!(
        err.unit_error(),
        Some(UnitError::UnknownMethod { method }) if method == "init"
    ));
    assert!(core.debug().expect("debug").list().is_empty());
    assert!(core.controller().shell("myController", "myScope").is_none());
}

#[test]
fn rolled_back_controllers_leave_no_routes() {
    let core = debug_core();
    let calls = Rc::new(RefCell::new(0usize));
    let spy = calls.clone();
    core.controller()
        .register(
            "myController",
            ControllerParams::new().scope("myScope").constr(move |_, _, _, _| {
                Ok(Declaration::new()
                    .on_view("ping", move |_| {
                        *spy.borrow_mut() += 1;
                        Ok(())
                    })
                    .method("init", |_| Err(UnitError::raised("AIE!"))))
            }),
        )
        .expect_err("init failure");

    core.controller()
        .notify("ping", &Value::Null, "myScope")
        .expect("dispatch");
    assert_eq!(*calls.borrow(), 0);
    assert!(core.debug().expect("debug").msg("myScope/myController").is_empty());
}

#[test]
fn rejects_duplicate_controllers() {
    let core = debug_core();
    core.controller()
        .register("myController", empty_controller("myScope"))
        .expect("first registration");
    let err = core
        .controller()
        .register("myController", empty_controller("myScope"))
        .expect_err("second registration");
    assert!(matches!(
        err,
        RegistrationError::Duplicate { ref scope, ref name } if scope == "myScope" && name == "myController"
    ));
    assert_eq!(
        core.debug().expect("debug").list().get("myScope"),
        Some(&paths(&["myScope/myController"]))
    );
}
