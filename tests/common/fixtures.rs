//! Representative client payloads.

use serde_json::{Value, json};

pub const SCALAR_MESSAGE: &str = "Value is not type of string, integer, boolean or float.";

/// A connect request as a browser client would send it.
pub fn connect_payload() -> Value {
    json!({
        "username": "alice",
        "channels": ["lobby", "notifications"],
        "fresh_user_state": {"color": "red", "age": 30},
        "user_state": {"status": "online"},
        "state_public_keys": ["color"],
        "channel_configs": {
            "lobby": {"notify_presence": true, "history_size": 10}
        },
        "info": {"client": {"name": "web", "version": 3}}
    })
}

/// A user-state update with one nested value that is not allowed.
pub fn bad_user_state_payload() -> Value {
    json!({
        "user": "alice",
        "user_state": {"color": "blue", "tags": ["a", "b"], "age": 31},
        "state_public_keys": ["color"]
    })
}

/// A state mapping with mixed valid and invalid values.
pub fn mixed_state() -> Value {
    json!({
        "name": "alice",
        "active": true,
        "score": 9.5,
        "visits": 12,
        "note": null,
        "history": [1, 2, 3],
        "prefs": {"theme": "dark"}
    })
}
