//! Commands sent by the companion device.
//!
//! Every inbound message names a command and echoes the session id of the
//! context it was issued from. Decoding is deliberately lenient about the
//! session id encoding (number or decimal string) and strict about payload
//! fields a known command needs. Payload fields are only checked by
//! [`InboundMessage::command`], so a bad field never hides the session id.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{SessionId, WireError};

/// Leave the active conference.
pub const HANG_UP: &str = "HANG_UP";
/// Join the conference named in `data`.
pub const JOIN_CONFERENCE: &str = "JOIN_CONFERENCE";
/// Set the microphone mute state from `muted`.
pub const SET_MUTED: &str = "SET_MUTED";

/// A raw message from the companion device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Command name, e.g. [`HANG_UP`].
    pub command: String,
    /// Session the command was issued in. `None` if missing or unreadable.
    #[serde(
        rename = "sessionID",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_session_id"
    )]
    pub session_id: Option<SessionId>,
    /// Conference URL for [`JOIN_CONFERENCE`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// Mute flag for [`SET_MUTED`], sent as `"true"` / `"false"`. Kept raw
    /// until the command is interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muted: Option<Value>,
}

impl InboundMessage {
    /// Create a message with no payload.
    pub fn new(command: impl Into<String>, session_id: Option<SessionId>) -> Self {
        Self {
            command: command.into(),
            session_id,
            data: None,
            muted: None,
        }
    }

    /// A [`HANG_UP`] message.
    pub fn hang_up(session_id: SessionId) -> Self {
        Self::new(HANG_UP, Some(session_id))
    }

    /// A [`JOIN_CONFERENCE`] message.
    pub fn join_conference(session_id: SessionId, url: impl Into<String>) -> Self {
        Self {
            data: Some(url.into()),
            ..Self::new(JOIN_CONFERENCE, Some(session_id))
        }
    }

    /// A [`SET_MUTED`] message.
    pub fn set_muted(session_id: SessionId, muted: bool) -> Self {
        Self {
            muted: Some(Value::String(muted.to_string())),
            ..Self::new(SET_MUTED, Some(session_id))
        }
    }

    /// Serialize to JSON bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, WireError> {
        serde_json::to_vec(self).map_err(WireError::Serialization)
    }

    /// Deserialize from JSON bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WireError> {
        serde_json::from_slice(bytes).map_err(WireError::Deserialization)
    }

    /// Interpret the command name and its payload.
    ///
    /// Unknown command names are not an error; they map to
    /// [`Command::Unknown`] so newer companion apps cannot break older hosts.
    pub fn command(&self) -> Result<Command, WireError> {
        match self.command.as_str() {
            HANG_UP => Ok(Command::HangUp),
            JOIN_CONFERENCE => {
                let url = self.data.as_deref().ok_or(WireError::MissingField("data"))?;
                if url.trim().is_empty() {
                    return Err(WireError::InvalidField {
                        field: "data",
                        reason: "empty conference url".into(),
                    });
                }
                Ok(Command::JoinConference {
                    url: url.to_string(),
                })
            }
            SET_MUTED => {
                let muted = parse_muted(self.muted.as_ref())?;
                Ok(Command::SetMuted { muted })
            }
            other => Ok(Command::Unknown {
                name: other.to_string(),
            }),
        }
    }
}

/// A decoded companion command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Leave the active conference.
    HangUp,
    /// Navigate to a conference.
    JoinConference {
        /// Target conference URL.
        url: String,
    },
    /// Mute or unmute the microphone.
    SetMuted {
        /// Desired mute state.
        muted: bool,
    },
    /// A command this host does not understand.
    Unknown {
        /// The command name as received.
        name: String,
    },
}

impl Command {
    /// The wire name of this command.
    pub fn name(&self) -> &str {
        match self {
            Self::HangUp => HANG_UP,
            Self::JoinConference { .. } => JOIN_CONFERENCE,
            Self::SetMuted { .. } => SET_MUTED,
            Self::Unknown { name } => name,
        }
    }
}

fn lenient_session_id<'de, D>(deserializer: D) -> Result<Option<SessionId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(SessionId::from_json))
}

fn parse_muted(value: Option<&Value>) -> Result<bool, WireError> {
    match value {
        None | Some(Value::Null) => Err(WireError::MissingField("muted")),
        Some(Value::Bool(b)) => Ok(*b),
        Some(Value::String(s)) if s == "true" => Ok(true),
        Some(Value::String(s)) if s == "false" => Ok(false),
        Some(other) => Err(WireError::InvalidField {
            field: "muted",
            reason: format!("invalid muted flag: {other}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: Value) -> Result<InboundMessage, WireError> {
        InboundMessage::from_bytes(&serde_json::to_vec(&value).unwrap())
    }

    #[test]
    fn hang_up_with_numeric_session() {
        let msg = decode(json!({"command": "HANG_UP", "sessionID": 42})).unwrap();
        assert_eq!(msg.session_id, Some(SessionId::new(42)));
        assert_eq!(msg.command().unwrap(), Command::HangUp);
    }

    #[test]
    fn session_id_as_string() {
        let msg = decode(json!({"command": "HANG_UP", "sessionID": "1700000000000"})).unwrap();
        assert_eq!(msg.session_id, Some(SessionId::new(1_700_000_000_000)));
    }

    #[test]
    fn missing_or_unreadable_session_is_none() {
        let msg = decode(json!({"command": "HANG_UP"})).unwrap();
        assert_eq!(msg.session_id, None);

        let msg = decode(json!({"command": "HANG_UP", "sessionID": "soon"})).unwrap();
        assert_eq!(msg.session_id, None);

        let msg = decode(json!({"command": "HANG_UP", "sessionID": null})).unwrap();
        assert_eq!(msg.session_id, None);
    }

    #[test]
    fn join_conference_reads_data() {
        let msg = decode(json!({
            "command": "JOIN_CONFERENCE",
            "sessionID": 1,
            "data": "https://meet.example/room"
        }))
        .unwrap();
        assert_eq!(
            msg.command().unwrap(),
            Command::JoinConference {
                url: "https://meet.example/room".into()
            }
        );
    }

    #[test]
    fn join_conference_without_data_is_rejected() {
        let msg = decode(json!({"command": "JOIN_CONFERENCE", "sessionID": 1})).unwrap();
        assert!(matches!(msg.command(), Err(WireError::MissingField("data"))));

        let msg = decode(json!({"command": "JOIN_CONFERENCE", "sessionID": 1, "data": " "}))
            .unwrap();
        assert!(matches!(
            msg.command(),
            Err(WireError::InvalidField { field: "data", .. })
        ));
    }

    #[test]
    fn set_muted_accepts_text_and_bool() {
        let msg = decode(json!({"command": "SET_MUTED", "sessionID": 1, "muted": "true"})).unwrap();
        assert_eq!(msg.command().unwrap(), Command::SetMuted { muted: true });

        let msg =
            decode(json!({"command": "SET_MUTED", "sessionID": 1, "muted": "false"})).unwrap();
        assert_eq!(msg.command().unwrap(), Command::SetMuted { muted: false });

        let msg = decode(json!({"command": "SET_MUTED", "sessionID": 1, "muted": true})).unwrap();
        assert_eq!(msg.command().unwrap(), Command::SetMuted { muted: true });
    }

    #[test]
    fn set_muted_rejects_other_values() {
        for muted in [json!("yes"), json!("TRUE"), json!(1), json!({})] {
            let msg = decode(json!({"command": "SET_MUTED", "sessionID": 1, "muted": muted}))
                .unwrap();
            assert_eq!(msg.session_id, Some(SessionId::new(1)));
            assert!(matches!(
                msg.command(),
                Err(WireError::InvalidField { field: "muted", .. })
            ));
        }

        let msg = decode(json!({"command": "SET_MUTED", "sessionID": 1})).unwrap();
        assert!(matches!(msg.command(), Err(WireError::MissingField("muted"))));

        let msg = decode(json!({"command": "SET_MUTED", "sessionID": 1, "muted": null})).unwrap();
        assert!(matches!(msg.command(), Err(WireError::MissingField("muted"))));
    }

    #[test]
    fn stray_muted_on_other_commands_is_ignored() {
        let msg = decode(json!({"command": "HANG_UP", "sessionID": 1, "muted": "TRUE"})).unwrap();
        assert_eq!(msg.command().unwrap(), Command::HangUp);

        let msg = decode(json!({
            "command": "JOIN_CONFERENCE",
            "sessionID": 1,
            "data": "https://meet.example/room",
            "muted": 7
        }))
        .unwrap();
        assert_eq!(
            msg.command().unwrap(),
            Command::JoinConference {
                url: "https://meet.example/room".into()
            }
        );
    }

    #[test]
    fn unknown_command_is_not_an_error() {
        let msg = decode(json!({"command": "RAISE_HAND", "sessionID": 1})).unwrap();
        let command = msg.command().unwrap();
        assert_eq!(
            command,
            Command::Unknown {
                name: "RAISE_HAND".into()
            }
        );
        assert_eq!(command.name(), "RAISE_HAND");
    }

    #[test]
    fn message_without_command_is_malformed() {
        assert!(decode(json!({"sessionID": 1})).is_err());
        assert!(decode(json!(["HANG_UP", 1])).is_err());
        assert!(InboundMessage::from_bytes(b"\xff\xfe").is_err());
    }

    #[test]
    fn builders_encode_wire_shape() {
        let bytes = InboundMessage::set_muted(SessionId::new(9), true)
            .to_bytes()
            .unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            value,
            json!({"command": "SET_MUTED", "sessionID": 9, "muted": "true"})
        );

        let bytes = InboundMessage::join_conference(SessionId::new(9), "https://x/room")
            .to_bytes()
            .unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            value,
            json!({"command": "JOIN_CONFERENCE", "sessionID": 9, "data": "https://x/room"})
        );
    }
}
