//! HTTP-level failure modes of the blocking transport.

use std::time::Duration;

use httpmock::MockServer;
use serde_json::json;
use sui_kit::*;

use crate::common::{client_for, coin, keypair, rpc_result};

#[test]
fn test_get_gas_over_http() {
    let server = MockServer::start();
    let kp = keypair();
    let balance = server.mock(|when, then| {
        when.method("POST")
            .header("content-type", "application/json")
            .json_body_partial(r#"{"jsonrpc": "2.0", "method": "suix_getBalance"}"#);
        then.status(200).json_body(rpc_result(json!({
            "coinType": SUI_COIN_TYPE,
            "coinObjectCount": 2,
            "totalBalance": "300"
        })));
    });
    let coins = server.mock(|when, then| {
        when.method("POST")
            .json_body_partial(r#"{"method": "suix_getCoins"}"#);
        then.status(200).json_body(rpc_result(json!({
            "data": [coin(1, 100), coin(2, 200)],
            "nextCursor": "0x2",
            "hasNextPage": false
        })));
    });

    let client = client_for(&server, &kp);
    let result = client.get_gas(None, true);

    balance.assert();
    coins.assert();
    let page = result.result_data();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[1].balance, 200);
    assert_eq!(page.data[0].version, 4);
}

#[test]
fn test_malformed_json_is_decode_error() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("POST");
        then.status(200).body("{ this is not json");
    });

    let client = client_for(&server, &keypair());
    let result = client.execute(&builders::GetCoins::new(keypair().address()));

    mock.assert();
    assert_eq!(result.kind(), Some(ErrorKind::Decode));
    assert!(matches!(result.error(), Some(Error::Rpc(RpcError::Decode(_)))));
}

#[test]
fn test_http_error_page_is_transport_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("POST");
        then.status(502).body("<html>Bad Gateway</html>");
    });

    let client = client_for(&server, &keypair());
    let result = client.get_gas(None, false);

    assert_eq!(result.kind(), Some(ErrorKind::Transport));
    match result.error() {
        Some(Error::Rpc(RpcError::Transport { status_code, timed_out, .. })) => {
            assert_eq!(*status_code, Some(502));
            assert!(!timed_out);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_json_rpc_error_is_protocol_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("POST");
        then.status(200).json_body(json!({
            "jsonrpc": "2.0",
            "id": 0,
            "error": {"code": -32602, "message": "Invalid params", "data": "owner"}
        }));
    });

    let client = client_for(&server, &keypair());
    let result = client.get_gas(None, false);

    assert_eq!(result.kind(), Some(ErrorKind::Protocol));
    match result.error() {
        Some(Error::Rpc(RpcError::Protocol { code, message, data })) => {
            assert_eq!(*code, -32602);
            assert_eq!(message, "Invalid params");
            assert_eq!(data, &Some(json!("owner")));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_slow_server_times_out() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("POST");
        then.status(200)
            .delay(Duration::from_secs(3))
            .json_body(rpc_result(json!({})));
    });

    let client = client_for(&server, &keypair());
    let result = client.get_gas(None, false);

    assert_eq!(result.kind(), Some(ErrorKind::Transport));
    match result.error() {
        Some(Error::Rpc(e)) => assert!(e.is_timeout(), "{e}"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_closed_client_never_touches_network() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("POST");
        then.status(200).json_body(rpc_result(json!({})));
    });

    let mut client = client_for(&server, &keypair());
    client.close();
    client.close();
    assert!(client.is_closed());

    let gas = client.get_gas(None, false);
    let faucet = client.get_gas_from_faucet(None);

    assert!(matches!(gas.error(), Some(Error::Rpc(RpcError::TransportClosed))));
    assert!(matches!(faucet.error(), Some(Error::Rpc(RpcError::TransportClosed))));
    mock.assert_hits(0);
}

#[test]
fn test_unreachable_server_is_transport_error() {
    let client = SuiConfig::custom("http://127.0.0.1:1")
        .request_timeout(Duration::from_millis(500))
        .build()
        .client()
        .unwrap();
    let result = client.get_package("0x2".parse().unwrap());
    assert_eq!(result.kind(), Some(ErrorKind::Transport));
}
