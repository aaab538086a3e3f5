use std::collections::HashMap;

use uritrie::{BasicController, Controller, RouteMatch, Router, RouterError};

fn ctrl(id: &str) -> BasicController<String> {
    BasicController::new(format!("{id}_handler"), id)
}

fn assert_controller(m: Option<RouteMatch<'_, BasicController<String>>>, expected: &str) {
    match m {
        Some(found) => assert_eq!(found.controller().id(), expected),
        None => panic!("expected a match for controller '{expected}', got none"),
    }
}

#[test]
fn literal_pattern_matches_exact_uri() {
    let mut router = Router::new();
    router.add_route("/catalog/books", ctrl("books")).unwrap();

    assert_controller(router.find_route("/catalog/books"), "books");
}

#[test]
fn no_match_is_empty_not_an_error() {
    let mut router = Router::new();
    router
        .add_route("/catalog/toys/cars/{make}/{model}", ctrl("C1"))
        .unwrap();

    assert!(router.find_route("/catalog/books/fiction").is_none());
    assert_eq!(router.find_routes("/catalog/books/fiction").count(), 0);
}

#[test]
fn catalog_end_to_end() {
    let mut router = Router::new();
    router
        .add_route("/catalog/toys/cars/{make}/{model}", ctrl("C1"))
        .unwrap();

    let m = router.find_route("/catalog/toys/cars/honda/crv").unwrap();
    assert_eq!(m.controller().id(), "C1");
    assert_eq!(m.params.get("make"), Some("honda"));
    assert_eq!(m.params.get("model"), Some("crv"));
    assert_eq!(m.params.len(), 2);

    let mut params = HashMap::new();
    params.insert("make".to_string(), "honda".to_string());
    params.insert("model".to_string(), "crv".to_string());
    assert_eq!(
        router.make_uri("C1", &params).unwrap(),
        "/catalog/toys/cars/honda/crv"
    );
}

#[test]
fn make_uri_find_route_round_trip() {
    let mut router = Router::new();
    router
        .add_route("/orders/{year:[0-9]{4}}/order-{id}.html", ctrl("order"))
        .unwrap();

    let mut params = HashMap::new();
    params.insert("year".to_string(), "2024".to_string());
    params.insert("id".to_string(), "12345".to_string());

    let uri = router.make_uri("order", &params).unwrap();
    assert_eq!(uri, "/orders/2024/order-12345.html");

    let m = router.find_route(&uri).unwrap();
    assert_eq!(m.controller().id(), "order");
    assert_eq!(m.params.get("year"), Some("2024"));
    assert_eq!(m.params.get("id"), Some("12345"));
}

#[test]
fn exact_sibling_wins_over_param() {
    let mut router = Router::new();
    router.add_route("/shop/{category}", ctrl("by_category")).unwrap();
    router.add_route("/shop/cars", ctrl("cars")).unwrap();

    assert_controller(router.find_route("/shop/cars"), "cars");
    assert_controller(router.find_route("/shop/boats"), "by_category");
}

#[test]
fn find_routes_orders_siblings_by_specificity() {
    let mut router = Router::new();
    router.add_route("/shop/**", ctrl("catch_all")).unwrap();
    router.add_route("/shop/{name}", ctrl("param")).unwrap();
    router.add_route("/shop/{id:[a-z]+}", ctrl("regex")).unwrap();
    router.add_route("/shop/cars", ctrl("exact")).unwrap();

    let order: Vec<String> = router
        .find_routes("/shop/cars")
        .map(|m| m.controller().id().to_string())
        .collect();
    assert_eq!(order, vec!["exact", "regex", "param", "catch_all"]);
}

#[test]
fn longer_affix_param_tried_first() {
    let mut router = Router::new();
    router.add_route("/files/{name}", ctrl("plain")).unwrap();
    router.add_route("/files/img-{name}", ctrl("image")).unwrap();

    assert_controller(router.find_route("/files/img-cat"), "image");
    let m = router.find_route("/files/img-cat").unwrap();
    assert_eq!(m.params.get("name"), Some("cat"));

    assert_controller(router.find_route("/files/readme"), "plain");
}

#[test]
fn duplicate_equal_controllers_rejected() {
    let mut router = Router::new();
    router
        .add_route("/orders", BasicController::new("same_handler", "first"))
        .unwrap();
    let err = router
        .add_route("/orders", BasicController::new("same_handler", "second"))
        .unwrap_err();
    assert!(matches!(err, RouterError::DuplicateController { .. }));
}

#[test]
fn distinct_controllers_share_a_node() {
    let mut router = Router::new();
    router
        .add_route("/orders", BasicController::with_priority("handler_a", "a", 1))
        .unwrap();
    router
        .add_route("/orders", BasicController::with_priority("handler_b", "b", 5))
        .unwrap();

    let m = router.find_route("/orders").unwrap();
    let ids: Vec<&str> = m.controllers().iter().map(Controller::id).collect();
    assert_eq!(ids, vec!["b", "a"]);
}

#[test]
fn duplicate_param_name_rejected_at_registration() {
    let mut router = Router::new();
    let err = router
        .add_route("/{id}/detail/{id}", ctrl("x"))
        .unwrap_err();
    assert!(matches!(
        err,
        RouterError::NonUniqueParam { param_name, .. } if param_name == "id"
    ));
}

#[test]
fn regex_param_is_anchored() {
    let mut router = Router::new();
    router.add_route("/year/{year:[0-9]{4}}", ctrl("year")).unwrap();

    assert!(router.find_route("/year/123").is_none());
    assert!(router.find_route("/year/20245").is_none());
    assert_controller(router.find_route("/year/2024"), "year");
}

#[test]
fn regex_capture_groups_are_recorded() {
    let mut router = Router::new();
    router
        .add_route("/report/{period:([0-9]{4})-([0-9]{2})}", ctrl("report"))
        .unwrap();

    let m = router.find_route("/report/2024-06").unwrap();
    assert_eq!(m.params.get("period"), Some("2024-06"));
    let groups = m.params.regex_groups("period").unwrap();
    assert_eq!(groups, &["2024-06", "2024", "06"]);
}

#[test]
fn catch_all_consumes_remainder() {
    let mut router = Router::new();
    router.add_route("/static/{*asset}", ctrl("assets")).unwrap();

    let m = router.find_route("/static/css/site/main.css").unwrap();
    assert_eq!(m.controller().id(), "assets");
    assert_eq!(m.params.get("asset"), Some("css/site/main.css"));
}

#[test]
fn unnamed_catch_all_uses_sentinel_param_name() {
    let mut router = Router::new();
    router.add_route("/anything/**", ctrl("fallback")).unwrap();

    let m = router.find_route("/anything/at/all").unwrap();
    assert_eq!(m.params.get("**"), Some("at/all"));
}

#[test]
fn make_uri_unknown_controller() {
    let router: Router<BasicController<String>> = Router::new();
    let err = router.make_uri("nope", &HashMap::new()).unwrap_err();
    assert!(matches!(
        err,
        RouterError::ControllerNotFound { controller_id } if controller_id == "nope"
    ));
}

#[test]
fn make_uri_missing_param() {
    let mut router = Router::new();
    router.add_route("/users/{id}", ctrl("user")).unwrap();

    let err = router.make_uri("user", &HashMap::new()).unwrap_err();
    assert!(matches!(
        err,
        RouterError::MakeUriMissingParam { param_name, .. } if param_name == "id"
    ));
}

#[test]
fn make_uri_value_failing_regex() {
    let mut router = Router::new();
    router.add_route("/year/{year:[0-9]{4}}", ctrl("year")).unwrap();

    let mut params = HashMap::new();
    params.insert("year".to_string(), "24".to_string());
    let err = router.make_uri("year", &params).unwrap_err();
    assert!(matches!(err, RouterError::MakeUriRegexFail { value, .. } if value == "24"));
}

#[test]
fn make_uri_for_catch_all_route() {
    let mut router = Router::new();
    router.add_route("/static/{*asset}", ctrl("assets")).unwrap();

    let mut params = HashMap::new();
    params.insert("asset".to_string(), "css/main.css".to_string());
    assert_eq!(
        router.make_uri("assets", &params).unwrap(),
        "/static/css/main.css"
    );
}

#[test]
fn invalid_regex_pattern_fails_registration() {
    let mut router = Router::new();
    let err = router.add_route("/broken/{id:[0-9}", ctrl("x")).unwrap_err();
    assert!(matches!(err, RouterError::InvalidPattern { .. }));
}

#[test]
fn all_routes_reconstructs_original_patterns() {
    let mut router = Router::new();
    router.add_route("/catalog/books", ctrl("books")).unwrap();
    router
        .add_route("/orders/{year:[0-9]{4}}/order-{id}.html", ctrl("order"))
        .unwrap();
    router.add_route("/static/{*asset}", ctrl("assets")).unwrap();

    let mut patterns: Vec<String> = router.all_routes().into_iter().map(|r| r.pattern).collect();
    patterns.sort();
    assert_eq!(
        patterns,
        vec![
            "/catalog/books".to_string(),
            "/orders/{year:[0-9]{4}}/order-{id}.html".to_string(),
            "/static/{*asset}".to_string(),
        ]
    );
}

#[test]
fn route_by_controller_id_finds_first_hit() {
    let mut router = Router::new();
    router.add_route("/a", ctrl("one")).unwrap();
    router.add_route("/b", ctrl("two")).unwrap();

    let info = router.route_by_controller_id("two").unwrap();
    assert_eq!(info.pattern, "/b");
    assert_eq!(info.controller.id(), "two");
    assert!(router.route_by_controller_id("three").is_none());
}

#[test]
fn matching_logs_under_a_subscriber() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("uritrie=debug")
        .with_test_writer()
        .try_init();

    let mut router = Router::new();
    router.add_route("/logged/{id}", ctrl("logged")).unwrap();
    assert_controller(router.find_route("/logged/42"), "logged");
    assert!(router.find_route("/unlogged").is_none());
}
