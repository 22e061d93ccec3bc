/// Unit tests for the action builder.
///
/// The `data` field names in every intent are part of the wire contract with
/// the deployed contracts, so the assertions here pin them exactly.
use transeos_sdk::actions::{
    ActionBuilder, Authorization, CreateOrderParams, EditOrderParams, SettleOrdersParams,
    SettlementLeg,
};
use transeos_sdk::config::{ClientConfig, Network, Protocol};
use transeos_sdk::encoding::order_key;
use transeos_sdk::errors::TranseosError;

fn network() -> Network {
    Network::new("127.0.0.1", Some(8888), Protocol::Http, "test-chain")
}

fn builder() -> ActionBuilder {
    ActionBuilder::new(ClientConfig::new(
        "basiccontrct",
        Some("exchangecont".into()),
        network(),
    ))
}

fn token_only_builder() -> ActionBuilder {
    ActionBuilder::new(ClientConfig::new("basiccontrct", None, network()))
}

fn auth() -> Authorization {
    Authorization::active("tester")
}

fn order_params() -> CreateOrderParams {
    CreateOrderParams {
        user: "alice".into(),
        sender: "relayer".into(),
        base_amount: "1.5".into(),
        base_decimals: 4,
        base_symbol: "TBTC".into(),
        counter_amount: "30".into(),
        counter_decimals: 2,
        counter_symbol: "TUSD".into(),
        fees_amount: "0.1".into(),
        memo: None,
        expires: 1_600_000_000_000,
    }
}

// ---------------------------------------------------------------------------
// Basic contract
// ---------------------------------------------------------------------------

#[test]
fn test_create_intent_shape() {
    let intent = builder().create("issuer11", "21000000", 4, "TBTC").unwrap();
    assert_eq!(intent.account, "basiccontrct");
    assert_eq!(intent.name, "create");
    // Currency creation runs under the contract's own active authority.
    assert_eq!(intent.authorization, vec![Authorization::active("basiccontrct")]);
    assert_eq!(intent.data["issuer"], "issuer11");
    assert_eq!(intent.data["max_supply"], "21000000.0000 TBTC");
}

#[test]
fn test_issue_formats_quantity_and_defaults_memo() {
    let intent = builder()
        .issue(&auth(), "alice", "100.5", 4, "TBTC", None)
        .unwrap();
    assert_eq!(intent.name, "issue");
    assert_eq!(intent.authorization, vec![auth()]);
    assert_eq!(intent.data["to"], "alice");
    assert_eq!(intent.data["quantity"], "100.5000 TBTC");
    assert_eq!(intent.data["memo"], "Issue TBTC");
}

#[test]
fn test_issue_keeps_explicit_memo() {
    let intent = builder()
        .issue(&auth(), "alice", "1", 2, "TBTC", Some("invoice 42"))
        .unwrap();
    assert_eq!(intent.data["memo"], "invoice 42");
}

#[test]
fn test_transfer_actor_is_sender_account() {
    let intent = builder()
        .transfer(&auth(), "alice", "bob", "5", 4, "TBTC", None)
        .unwrap();
    assert_eq!(intent.authorization, vec![Authorization::active("alice")]);
    assert_eq!(intent.data["from"], "alice");
    assert_eq!(intent.data["to"], "bob");
    assert_eq!(intent.data["quantity"], "5.0000 TBTC");
    // Legacy memo wording carries over to transfers.
    assert_eq!(intent.data["memo"], "Issue TBTC");
}

#[test]
fn test_transfer_empty_from_mentions_source() {
    let err = builder()
        .transfer(&auth(), "", "bob", "5", 4, "TBTC", None)
        .unwrap_err();
    match err {
        TranseosError::Validation { field, message } => {
            assert_eq!(field, "from");
            assert!(message.contains("source"), "message was: {message}");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_transfer_validation_order_is_declared_order() {
    // Both from and to are empty; the from check is declared first.
    let err = builder()
        .transfer(&auth(), "", "", "", 0, "", None)
        .unwrap_err();
    assert!(matches!(
        err,
        TranseosError::Validation { field: "from", .. }
    ));
}

#[test]
fn test_transfer_zero_decimals_rejected() {
    let err = builder()
        .transfer(&auth(), "alice", "bob", "5", 0, "TBTC", None)
        .unwrap_err();
    assert!(matches!(
        err,
        TranseosError::Validation {
            field: "decimals",
            ..
        }
    ));
}

#[test]
fn test_transferfrom_actor_is_spender() {
    let intent = builder()
        .transferfrom(&auth(), "alice", "bob", "carol", "5", 4, "TBTC", None)
        .unwrap();
    assert_eq!(intent.name, "transferfrom");
    assert_eq!(intent.authorization, vec![Authorization::active("carol")]);
    assert_eq!(intent.data["spender"], "carol");
    assert_eq!(intent.data["memo"], "Issue TBTC");
}

#[test]
fn test_approve_has_no_memo() {
    let intent = builder()
        .approve(&auth(), "alice", "carol", "10", 4, "TBTC")
        .unwrap();
    assert_eq!(intent.name, "approve");
    assert_eq!(intent.authorization, vec![Authorization::active("alice")]);
    assert_eq!(intent.data["owner"], "alice");
    assert_eq!(intent.data["spender"], "carol");
    assert_eq!(intent.data["quantity"], "10.0000 TBTC");
    assert!(intent.data.get("memo").is_none());
}

// ---------------------------------------------------------------------------
// Exchange contract
// ---------------------------------------------------------------------------

#[test]
fn test_create_order_derives_key_and_memo() {
    let timestamp = 1_558_000_000_000u64;
    let intent = builder()
        .create_order_at(&auth(), &order_params(), timestamp)
        .unwrap();
    let expected_key = order_key("alice", "TBTC", timestamp).unwrap();

    assert_eq!(intent.account, "exchangecont");
    assert_eq!(intent.name, "createorder");
    assert_eq!(intent.authorization, vec![Authorization::active("alice")]);
    assert_eq!(intent.data["key"], expected_key.to_string());
    assert_eq!(intent.data["timestamp"], timestamp);
    assert_eq!(intent.data["expires"], 1_600_000_000_000u64);
    assert_eq!(intent.data["base"], "1.5000 TBTC");
    assert_eq!(intent.data["counter"], "30.00 TUSD");
    assert_eq!(
        intent.data["memo"],
        format!("Issue order {expected_key}")
    );
}

#[test]
fn test_create_order_fee_currency_is_fixed() {
    // The fee leg is always denominated in GIZMO with 8 decimal places,
    // whatever currencies the order itself trades.
    let intent = builder()
        .create_order_at(&auth(), &order_params(), 1)
        .unwrap();
    assert_eq!(intent.data["fees"], "0.10000000 GIZMO");
}

#[test]
fn test_create_order_explicit_memo_kept() {
    let mut params = order_params();
    params.memo = Some("my order".into());
    let intent = builder().create_order_at(&auth(), &params, 1).unwrap();
    assert_eq!(intent.data["memo"], "my order");
}

#[test]
fn test_create_order_rejects_invalid_user_charset() {
    let mut params = order_params();
    params.user = "Alice".into();
    let err = builder().create_order_at(&auth(), &params, 1).unwrap_err();
    assert!(matches!(err, TranseosError::InvalidCharacter('A')));
}

#[test]
fn test_create_order_requires_expiry() {
    let mut params = order_params();
    params.expires = 0;
    let err = builder().create_order_at(&auth(), &params, 1).unwrap_err();
    assert!(matches!(
        err,
        TranseosError::Validation {
            field: "expires",
            ..
        }
    ));
}

#[test]
fn test_edit_order_data_fields() {
    let params = EditOrderParams {
        user: "alice".into(),
        key: 42,
        base_amount: "1".into(),
        base_decimals: 4,
        base_symbol: "TBTC".into(),
        counter_amount: "20".into(),
        counter_decimals: 2,
        counter_symbol: "TUSD".into(),
        expires: 1_600_000_000_000,
    };
    let intent = builder().edit_order(&auth(), &params).unwrap();
    assert_eq!(intent.name, "editorder");
    let data = intent.data.as_object().unwrap();
    assert_eq!(data.len(), 4);
    assert_eq!(data["key"], "42");
    assert_eq!(data["base"], "1.0000 TBTC");
    assert_eq!(data["counter"], "20.00 TUSD");
    assert_eq!(data["expires"], 1_600_000_000_000u64);
}

#[test]
fn test_cancel_order_data_is_key_only() {
    let intent = builder().cancel_order(&auth(), "alice", 42).unwrap();
    assert_eq!(intent.name, "cancelorder");
    assert_eq!(intent.authorization, vec![Authorization::active("alice")]);
    assert_eq!(intent.data.as_object().unwrap().len(), 1);
    assert_eq!(intent.data["key"], "42");
}

#[test]
fn test_order_key_survives_f64_json_tooling() {
    // Keys exceed 2^53, so they travel as decimal strings; a numeric JSON
    // field would lose precision in f64-based consumers.
    let key = order_key("alice", "TBTC", 1_558_000_000_000).unwrap();
    let intent = builder().cancel_order(&auth(), "alice", key).unwrap();
    assert!(intent.data["key"].is_string());
    assert_eq!(intent.data["key"], key.to_string());
}

#[test]
fn test_retire_order_actor_is_sender() {
    let intent = builder().retire_order(&auth(), "relayer", 42).unwrap();
    assert_eq!(intent.name, "retireorder");
    assert_eq!(intent.authorization, vec![Authorization::active("relayer")]);
    assert_eq!(intent.data["key"], "42");
}

#[test]
fn test_settle_orders_data_fields() {
    let params = SettleOrdersParams {
        sender: "relayer".into(),
        maker: SettlementLeg {
            key: 7,
            base_amount: "1".into(),
            base_decimals: 4,
            base_symbol: "TBTC".into(),
            counter_amount: "20".into(),
            counter_decimals: 2,
            counter_symbol: "TUSD".into(),
        },
        taker: SettlementLeg {
            key: 9,
            base_amount: "20".into(),
            base_decimals: 2,
            base_symbol: "TUSD".into(),
            counter_amount: "1".into(),
            counter_decimals: 4,
            counter_symbol: "TBTC".into(),
        },
        memo: None,
    };
    let intent = builder().settle_orders(&auth(), &params).unwrap();
    assert_eq!(intent.name, "settleorders");
    assert_eq!(intent.authorization, vec![Authorization::active("relayer")]);
    assert_eq!(intent.data["maker"], "7");
    assert_eq!(intent.data["taker"], "9");
    assert_eq!(intent.data["quantity_maker"], "1.0000 TBTC");
    assert_eq!(intent.data["deduct_maker"], "20.00 TUSD");
    assert_eq!(intent.data["quantity_taker"], "20.00 TUSD");
    assert_eq!(intent.data["deduct_taker"], "1.0000 TBTC");
    assert_eq!(intent.data["memo"], "");
}

#[test]
fn test_settle_orders_requires_maker_key() {
    let params = SettleOrdersParams {
        sender: "relayer".into(),
        maker: SettlementLeg {
            key: 0,
            base_amount: "1".into(),
            base_decimals: 4,
            base_symbol: "TBTC".into(),
            counter_amount: "20".into(),
            counter_decimals: 2,
            counter_symbol: "TUSD".into(),
        },
        taker: SettlementLeg {
            key: 9,
            base_amount: "20".into(),
            base_decimals: 2,
            base_symbol: "TUSD".into(),
            counter_amount: "1".into(),
            counter_decimals: 4,
            counter_symbol: "TBTC".into(),
        },
        memo: None,
    };
    let err = builder().settle_orders(&auth(), &params).unwrap_err();
    assert!(matches!(
        err,
        TranseosError::Validation {
            field: "maker.key",
            ..
        }
    ));
}

#[test]
fn test_exchange_ops_need_exchange_address() {
    let err = token_only_builder()
        .cancel_order(&auth(), "alice", 42)
        .unwrap_err();
    assert!(matches!(
        err,
        TranseosError::Validation {
            field: "exchange_address",
            ..
        }
    ));
}

// ---------------------------------------------------------------------------
// Wire shape
// ---------------------------------------------------------------------------

#[test]
fn test_intent_serializes_to_wire_shape() {
    let intent = builder()
        .issue(&auth(), "alice", "100.5", 4, "TBTC", None)
        .unwrap();
    let json = serde_json::to_value(&intent).unwrap();
    assert_eq!(json["account"], "basiccontrct");
    assert_eq!(json["name"], "issue");
    assert_eq!(json["authorization"][0]["actor"], "tester");
    assert_eq!(json["authorization"][0]["permission"], "active");
    assert_eq!(json["data"]["quantity"], "100.5000 TBTC");
}
