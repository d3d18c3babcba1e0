//! Schemas for the host's client-submitted payloads.
//!
//! These are built from the generic field machinery and the injected
//! registries; the host decides what to do with the loaded records.
//!
//! - `connect`: a user opening a connection, with initial state and channels
//! - `subscribe`: an existing connection joining more channels
//! - `user_state`: a state update for a known user

use crate::error::BuildResult;
use crate::field::Field;
use crate::id::generate_id;
use crate::registry::Registry;
use crate::schema::Schema;
use crate::validators::Validator;
use serde_json::{Value, json};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Registries consulted by the payload schemas.
#[derive(Clone)]
pub struct Registries {
    pub connections: Arc<dyn Registry>,
    pub users: Arc<dyn Registry>,
}

impl fmt::Debug for Registries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registries").finish_non_exhaustive()
    }
}

/// Built-in payload schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Connect,
    Subscribe,
    UserState,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Connect, Preset::Subscribe, Preset::UserState];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::Subscribe => "subscribe",
            Self::UserState => "user_state",
        }
    }

    /// Build the schema for this preset.
    pub fn schema(&self, registries: &Registries) -> BuildResult<Schema> {
        match self {
            Self::Connect => connect_schema(),
            Self::Subscribe => subscribe_schema(registries.connections.clone()),
            Self::UserState => user_state_schema(registries.users.clone()),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| format!("unknown preset '{s}'"))
    }
}

fn fresh_id() -> Value {
    Value::String(generate_id())
}

fn channel_list() -> Field {
    Field::list(Field::string()).load_default(json!([]))
}

/// Per-channel configuration: channel name -> free-form settings mapping.
fn channel_configs() -> Field {
    Field::nested_mapping(Some(Field::string()), Some(Field::mapping())).load_default(json!({}))
}

pub fn connect_schema() -> BuildResult<Schema> {
    Schema::builder("Connect")
        .field("username", Field::string().required())
        .field("conn_id", Field::string().load_default_with(fresh_id))
        .field("channels", channel_list())
        .field(
            "fresh_user_state",
            Field::nested_mapping(Some(Field::string()), Some(Field::scalar()))
                .load_default(json!({})),
        )
        .field("user_state", Field::flat_mapping().load_default(json!({})))
        .field("state_public_keys", channel_list())
        .field("channel_configs", channel_configs())
        .field("info", Field::mapping().load_default(json!({})))
        .build()
}

pub fn subscribe_schema(connections: Arc<dyn Registry>) -> BuildResult<Schema> {
    Schema::builder("Subscribe")
        .field(
            "conn_id",
            Field::string()
                .required()
                .validate(Validator::connection_exists(connections)),
        )
        .field("channels", Field::list(Field::string()).required())
        .field("channel_configs", channel_configs())
        .field("info", Field::mapping().load_default(json!({})))
        .build()
}

pub fn user_state_schema(users: Arc<dyn Registry>) -> BuildResult<Schema> {
    Schema::builder("UserState")
        .field(
            "user",
            Field::string()
                .required()
                .validate(Validator::user_exists(users)),
        )
        .field("user_state", Field::flat_mapping().load_default(json!({})))
        .field("state_public_keys", channel_list())
        .build()
}
