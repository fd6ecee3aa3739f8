//! Pieces shared by the server and the management binary: logging setup and
//! small response types that do not belong to any one resource.

pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok", maintenance: false };
        assert_eq!(h.status, "ok");
        assert_eq!(
            serde_json::to_value(&h).unwrap(),
            serde_json::json!({"status": "ok", "maintenance": false})
        );
    }

    #[test]
    fn message_serializes_as_object() {
        let m = types::Message::new("Service is currently enduring maintenance");
        assert_eq!(
            serde_json::to_value(&m).unwrap()["message"],
            "Service is currently enduring maintenance"
        );
    }
}
