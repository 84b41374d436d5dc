//! Port-forwarding session requests for SSM Session Manager.

use serde::Serialize;

/// SSM document that forwards a local port to a host reachable from the target.
pub const PORT_FORWARDING_DOCUMENT: &str = "AWS-StartPortForwardingSessionToRemoteHost";

/// A request to forward `local_port_number` to `host:port_number` through `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortForwardingSession {
    /// Instance id the session is opened on.
    pub target: String,
    /// Host to forward to, as resolved from the target instance.
    pub host: String,
    /// Port on `host`.
    pub port_number: u16,
    /// Local port to bind.
    pub local_port_number: u16,
}

/// Document parameters. The SSM schema takes every value as a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionParameters {
    /// Remote host.
    pub host: [String; 1],
    /// Remote port.
    #[serde(rename = "portNumber")]
    pub port_number: [String; 1],
    /// Local port.
    #[serde(rename = "localPortNumber")]
    pub local_port_number: [String; 1],
}

impl PortForwardingSession {
    /// Name of the SSM document used for this session.
    pub fn document_name(&self) -> &'static str {
        PORT_FORWARDING_DOCUMENT
    }

    /// Parameter set for the document.
    pub fn parameters(&self) -> SessionParameters {
        SessionParameters {
            host: [self.host.clone()],
            port_number: [self.port_number.to_string()],
            local_port_number: [self.local_port_number.to_string()],
        }
    }

    /// Parameter set encoded as the JSON string passed to `--parameters`.
    pub fn parameters_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.parameters())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db_session() -> PortForwardingSession {
        PortForwardingSession {
            target: "i-0123456789abcdef0".to_string(),
            host: "10.0.1.5".to_string(),
            port_number: 5432,
            local_port_number: 15432,
        }
    }

    #[test]
    fn test_parameters_are_single_element_string_lists() {
        let params = db_session().parameters();
        assert_eq!(params.host, ["10.0.1.5".to_string()]);
        assert_eq!(params.port_number, ["5432".to_string()]);
        assert_eq!(params.local_port_number, ["15432".to_string()]);
    }

    #[test]
    fn test_parameters_json_keys_and_order() {
        let json = db_session().parameters_json().unwrap();
        assert_eq!(
            json,
            r#"{"host":["10.0.1.5"],"portNumber":["5432"],"localPortNumber":["15432"]}"#
        );
    }

    #[test]
    fn test_document_name() {
        assert_eq!(
            db_session().document_name(),
            "AWS-StartPortForwardingSessionToRemoteHost"
        );
    }
}
