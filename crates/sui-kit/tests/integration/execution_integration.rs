//! Signing and submission over HTTP.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use httpmock::MockServer;
use serde_json::json;
use sui_kit::builders::{MergeCoin, SplitCoin};
use sui_kit::*;

use crate::common::{client_for, keypair, rpc_result};

const TX: &[u8] = b"merge coins transaction";

fn mock_no_sign<'a>(server: &'a MockServer, method: &str) -> httpmock::Mock<'a> {
    let partial = json!({"method": method}).to_string();
    server.mock(|when, then| {
        when.method("POST").json_body_partial(partial);
        then.status(200).json_body(rpc_result(json!({
            "txBytes": STANDARD.encode(TX),
            "gas": [{"objectId": "0x99", "version": "2", "digest": "GasDigest"}],
            "inputObjects": []
        })));
    })
}

fn mock_execute(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method("POST")
            .json_body_partial(r#"{"method": "sui_executeTransactionBlock"}"#);
        then.status(200).json_body(rpc_result(json!({
            "digest": "ExecDigest",
            "effects": {"status": {"status": "success"}},
            "timestampMs": "1700000000000",
            "checkpoint": "12"
        })));
    })
}

#[test]
fn test_merge_coin_signs_and_submits() {
    let server = MockServer::start();
    let kp = keypair();
    let no_sign = mock_no_sign(&server, "unsafe_mergeCoins");
    let execute = mock_execute(&server);

    let client = client_for(&server, &kp);
    let merge = MergeCoin::new(
        kp.address(),
        "0x10".parse().unwrap(),
        "0x11".parse().unwrap(),
        5_000_000,
    );
    let result = client.merge_coin(merge);

    no_sign.assert_hits(1);
    execute.assert_hits(1);
    let response = result.result_data();
    assert!(response.is_success());
    assert_eq!(response.digest, "ExecDigest");
    assert_eq!(response.checkpoint, Some(12));
}

#[test]
fn test_execute_carries_valid_signature() {
    let server = MockServer::start();
    let kp = keypair();
    let signature = kp.sign_transaction(TX);
    mock_no_sign(&server, "unsafe_splitCoin");
    let execute = server.mock(|when, then| {
        when.method("POST")
            .json_body_partial(r#"{"method": "sui_executeTransactionBlock"}"#)
            .body_contains(STANDARD.encode(TX))
            .body_contains(signature.to_base64());
        then.status(200).json_body(rpc_result(json!({"digest": "Split"})));
    });

    let client = client_for(&server, &kp);
    let split = SplitCoin::new(kp.address(), "0x10".parse().unwrap(), vec![1, 2], 5_000_000);
    let result = client.split_coin(split);

    execute.assert();
    assert_eq!(result.result_data().digest, "Split");
}

#[test]
fn test_unknown_signer_makes_no_request() {
    let server = MockServer::start();
    let no_sign = mock_no_sign(&server, "unsafe_mergeCoins");

    let client = client_for(&server, &keypair());
    let stranger = KeyPair::generate_ed25519().address();
    let merge = MergeCoin::new(
        stranger,
        "0x10".parse().unwrap(),
        "0x11".parse().unwrap(),
        5_000_000,
    );
    let result = client.merge_coin(merge);

    assert_eq!(result.kind(), Some(ErrorKind::UnknownAddress));
    no_sign.assert_hits(0);
}

#[test]
fn test_multisig_execution() {
    let server = MockServer::start();
    let a = KeyPair::ed25519_from_bytes([1u8; 32]);
    let b = KeyPair::secp256k1_from_bytes(&[2u8; 32]).unwrap();
    let multisig = MultiSig::new(vec![(a.clone(), 1), (b.clone(), 1)], 2).unwrap();
    mock_no_sign(&server, "unsafe_mergeCoins");
    let execute = server.mock(|when, then| {
        when.method("POST")
            .json_body_partial(r#"{"method": "sui_executeTransactionBlock"}"#)
            .body_contains("WaitForLocalExecution");
        then.status(200).json_body(rpc_result(json!({"digest": "Multi"})));
    });

    let client = client_for(&server, &keypair());
    let merge = MergeCoin::new(
        multisig.address(),
        "0x10".parse().unwrap(),
        "0x11".parse().unwrap(),
        5_000_000,
    );
    let result = client.execute_with_multisig(
        &merge,
        &multisig,
        &[a.public_key().clone(), b.public_key().clone()],
        &[],
    );

    execute.assert();
    assert_eq!(result.result_data().digest, "Multi");
}

#[test]
fn test_faucet_over_http() {
    let server = MockServer::start();
    let kp = keypair();
    let recipient = kp.address().to_string();
    let faucet = server.mock(|when, then| {
        when.method("POST")
            .path("/gas")
            .json_body(json!({"FixedAmountRequest": {"recipient": recipient}}));
        then.status(201).json_body(json!({
            "transferredGasObjects": [
                {"amount": 1_000_000_000u64, "id": "0x5", "transferTxDigest": "FaucetTx"}
            ],
            "error": null
        }));
    });

    let client = client_for(&server, &kp);
    let result = client.get_gas_from_faucet(None);

    faucet.assert();
    assert_eq!(result.result_data().transferred_gas_objects.len(), 1);
}
