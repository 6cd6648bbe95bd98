//! Ledger path accessor
//!
//! GREEN when:
//! - set without a key hands back the state unchanged
//! - set with a key writes ledger[key] and leaves siblings alone
//! - get without a key is None regardless of state
//! - set then get round-trips the value

use ledger_state::{get_info_prop, get_ledger_value, set_info_prop, set_ledger_value, wallet_balance};
use ledger_testkit::{default_state, state_with_data, with_balance};
use serde_json::json;

#[test]
fn set_ledger_value_without_key_is_noop() {
    let st = state_with_data();
    let out = set_ledger_value(st.clone(), None, json!(5));
    assert_eq!(out, st);

    let out = set_ledger_value(st.clone(), Some(""), json!(5));
    assert_eq!(out, st, "empty key counts as no key");
}

#[test]
fn set_ledger_value_with_key() {
    let out = set_ledger_value(default_state(), Some("publisherTime"), json!(1));
    assert_eq!(out, state_with_data());
}

#[test]
fn set_ledger_value_keeps_unknown_keys() {
    let st = set_ledger_value(state_with_data(), Some("synopsis"), json!({"a": 1}));
    assert_eq!(
        st.as_value(),
        &json!({"ledger": {"publisherTime": 1, "synopsis": {"a": 1}}})
    );
}

#[test]
fn get_ledger_value_without_key_is_none() {
    assert_eq!(get_ledger_value(&default_state(), None), None);
    assert_eq!(get_ledger_value(&state_with_data(), None), None);
}

#[test]
fn get_ledger_value_with_key() {
    assert_eq!(get_ledger_value(&state_with_data(), Some("publisherTime")), Some(&json!(1)));
    assert_eq!(get_ledger_value(&state_with_data(), Some("missing")), None);
}

#[test]
fn set_then_get_round_trips() {
    let v = json!({"nested": [1, 2, 3]});
    let st = set_ledger_value(default_state(), Some("k"), v.clone());
    assert_eq!(get_ledger_value(&st, Some("k")), Some(&v));
}

#[test]
fn info_props_and_balance() {
    let st = set_info_prop(default_state(), None, json!(1));
    assert_eq!(st, default_state());

    let st = set_info_prop(st, Some("address"), json!("addr"));
    assert_eq!(get_info_prop(&st, Some("address")), Some(&json!("addr")));
    assert_eq!(wallet_balance(&st), 0.0);

    assert_eq!(wallet_balance(&with_balance(default_state(), 10)), 10.0);
    assert_eq!(wallet_balance(&with_balance(default_state(), "2.5")), 2.5);
    assert_eq!(wallet_balance(&with_balance(default_state(), "oops")), 0.0);
}
