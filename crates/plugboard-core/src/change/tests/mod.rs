//! Cross-cutting change-layer tests: the applied-state machine, canonical
//! flatten across edit orders, and round trips over generated edit
//! sequences.

mod property;

use crate::{change::Change, model::Board, repository::Repository, types::PropertyList};

#[test]
fn no_change_never_applies() {
    let mut board = Board::new();
    let mut change = Change::no_change("namespace 'orders' already exists");

    assert!(!change.can_apply());
    assert_eq!(change.description(), "No change");
    assert_eq!(change.conflicts().len(), 1);
    assert_eq!(
        change.conflicts()[0].description(),
        "namespace 'orders' already exists"
    );

    change.apply(&mut board);
    assert!(!change.is_applied());
    change.revert(&mut board);
    assert!(!change.is_applied());
}

#[test]
fn apply_twice_is_a_no_op() {
    let mut board = Board::new();
    let mut change = Change::add_external_flow(&board, "shutdown", None);

    change.apply(&mut board);
    change.apply(&mut board);

    assert!(change.is_applied());
    assert_eq!(board.external_flows.len(), 1);
}

#[test]
fn revert_before_apply_is_a_no_op() {
    let mut board = Board::new();
    let mut change = Change::add_external_flow(&board, "shutdown", None);

    change.revert(&mut board);
    assert!(board.external_flows.is_empty());
}

/// Two sessions assembling the same board through different edit orders
/// must flatten to byte-identical records.
#[test]
fn edit_order_does_not_leak_into_the_stored_record() {
    let repository = Repository::new();

    let mut first = Board::default();
    first.edit(Change::add_function_unbound(&first, "gamma"));
    first.edit(Change::add_function_unbound(&first, "alpha"));
    first.edit(Change::add_function_unbound(&first, "beta"));
    let alpha = first.function_named("alpha").expect("alpha should exist");
    let beta = first.function_named("beta").expect("beta should exist");
    first.edit(Change::add_flow(&first, alpha, "rejected", None));
    first.edit(Change::add_flow(&first, alpha, "done", Some("Receipt")));
    first.edit(Change::add_external_flow(&first, "shutdown", None));
    let done = first.function(alpha).flows[0];
    let rejected = first.function(alpha).flows[1];
    let shutdown = first.external_flows[0];
    first.edit(Change::link_flow_to_function(&first, done, beta));
    first.edit(Change::link_flow_to_external_flow(&first, rejected, shutdown));
    first.edit(Change::add_namespace(
        &first,
        "orders",
        "orders.toml",
        PropertyList::new(),
        vec!["submit".to_string()],
    ));

    let mut second = Board::default();
    second.edit(Change::add_namespace(
        &second,
        "orders",
        "orders.toml",
        PropertyList::new(),
        vec!["submit".to_string()],
    ));
    second.edit(Change::add_external_flow(&second, "shutdown", None));
    second.edit(Change::add_function_unbound(&second, "beta"));
    second.edit(Change::add_function_unbound(&second, "alpha"));
    let alpha = second.function_named("alpha").expect("alpha should exist");
    let beta = second.function_named("beta").expect("beta should exist");
    second.edit(Change::add_flow(&second, alpha, "done", Some("Receipt")));
    second.edit(Change::add_flow(&second, alpha, "rejected", None));
    let done = second.function(alpha).flows[0];
    let rejected = second.function(alpha).flows[1];
    let shutdown = second.external_flows[0];
    second.edit(Change::link_flow_to_external_flow(&second, rejected, shutdown));
    second.edit(Change::link_flow_to_function(&second, done, beta));
    second.edit(Change::add_function_unbound(&second, "gamma"));

    let stored_first = repository.store(&mut first);
    let stored_second = repository.store(&mut second);
    assert_eq!(stored_first, stored_second);

    let (first_json, second_json) = (
        serde_json::to_string(&stored_first).expect("record should serialize"),
        serde_json::to_string(&stored_second).expect("record should serialize"),
    );
    assert_eq!(first_json, second_json);
}
