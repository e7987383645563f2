use std::collections::HashMap;

use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json::Value;

/// `ProofExchangeRecord` is a handle to an in-flight proof exchange owned by the agent
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "self::serde")]
pub struct ProofExchangeRecord {
    id: String,

    #[serde(rename = "connectionId")]
    #[serde(skip_serializing_if = "Option::is_none", default)]
    connection_id: Option<String>,
}

impl ProofExchangeRecord {
    pub fn new(id: String) -> Self {
        Self {
            id,
            connection_id: None,
        }
    }

    pub fn get_id(&self) -> String {
        self.id.to_owned()
    }

    pub fn get_connection_id(&self) -> Option<String> {
        self.connection_id.to_owned()
    }
}

/// A single restriction of a requested attribute group
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(crate = "self::serde")]
pub struct Restriction {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub schema_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub schema_issuer_did: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub schema_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub schema_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub issuer_did: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cred_def_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(crate = "self::serde")]
pub struct RequestedAttribute {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub restrictions: Option<Vec<Restriction>>,
}

/// `ProofRequest` is the shared shape of both the `indy` and the `anoncreds` proof requests
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(crate = "self::serde")]
pub struct ProofRequest {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub nonce: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub requested_attributes: Option<HashMap<String, RequestedAttribute>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub requested_predicates: Option<HashMap<String, Value>>,
}

impl ProofRequest {
    pub fn requested_attribute(&self, referent: &str) -> Option<&RequestedAttribute> {
        self.requested_attributes
            .as_ref()
            .and_then(|attributes| attributes.get(referent))
    }
}

/// Raw request formats. The agent fills only the key of the sub-format the verifier used
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(crate = "self::serde")]
pub struct ProofRequestFormats {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub indy: Option<ProofRequest>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub anoncreds: Option<ProofRequest>,
}

/// `ProofFormatData` is the format data the agent reports for a proof exchange
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(crate = "self::serde")]
pub struct ProofFormatData {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub request: Option<ProofRequestFormats>,
}

/// A stored credential the agent matched against one requested referent
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "self::serde")]
pub struct RequestedCredentialMatch {
    #[serde(rename = "credentialId")]
    pub credential_id: String,

    #[serde(default)]
    pub revealed: bool,

    #[serde(rename = "credentialInfo", default)]
    pub credential_info: Value,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub revoked: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(crate = "self::serde")]
pub struct CredentialsForProofRequest {
    #[serde(default)]
    pub attributes: HashMap<String, Vec<RequestedCredentialMatch>>,

    #[serde(default)]
    pub predicates: HashMap<String, Vec<RequestedCredentialMatch>>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(crate = "self::serde")]
pub struct CredentialsForRequestFormats {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub indy: Option<CredentialsForProofRequest>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub anoncreds: Option<CredentialsForProofRequest>,
}

/// `CredentialsForRequest` is the agent's answer to which stored credentials satisfy a proof request
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(crate = "self::serde")]
pub struct CredentialsForRequest {
    #[serde(rename = "proofFormats", default)]
    pub proof_formats: CredentialsForRequestFormats,
}

#[cfg(test)]
mod tests {
    use super::*;

    use rst_common::standard::serde_json::{self, json};

    #[test]
    fn test_parse_format_data() {
        let raw = json!({
            "request": {
                "indy": {
                    "name": "attestation",
                    "version": "1.0",
                    "nonce": "1234",
                    "requested_attributes": {
                        "attestationInfo": {
                            "names": ["operating_system", "issue_date_dateint"],
                            "restrictions": [{"cred_def_id": "D1"}, {"schema_id": "S1"}]
                        }
                    },
                    "requested_predicates": {}
                }
            }
        });

        let data: ProofFormatData = serde_json::from_value(raw).unwrap();
        let request = data.request.unwrap();
        assert!(request.anoncreds.is_none());

        let indy = request.indy.unwrap();
        let group = indy.requested_attribute("attestationInfo").unwrap();
        let restrictions = group.restrictions.as_ref().unwrap();
        assert_eq!(restrictions.len(), 2);
        assert_eq!(restrictions[0].cred_def_id, Some("D1".to_string()));
        assert!(restrictions[1].cred_def_id.is_none());
        assert!(indy.requested_attribute("other").is_none());
    }

    #[test]
    fn test_parse_credentials_for_request() {
        let raw = json!({
            "proofFormats": {
                "anoncreds": {
                    "attributes": {
                        "attestationInfo": [{
                            "credentialId": "cred-1",
                            "revealed": true,
                            "credentialInfo": {"referent": "cred-1"},
                            "revoked": false
                        }]
                    },
                    "predicates": {}
                }
            }
        });

        let credentials: CredentialsForRequest = serde_json::from_value(raw).unwrap();
        assert!(credentials.proof_formats.indy.is_none());

        let anoncreds = credentials.proof_formats.anoncreds.unwrap();
        let matches = anoncreds.attributes.get("attestationInfo").unwrap();
        assert_eq!(matches[0].credential_id, "cred-1".to_string());
        assert_eq!(matches[0].revoked, Some(false));
    }

    #[test]
    fn test_parse_proof_exchange_record() {
        let raw = json!({"id": "proof-1", "connectionId": "conn-1", "state": "request-received"});

        let proof: ProofExchangeRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(proof.get_id(), "proof-1".to_string());
        assert_eq!(proof.get_connection_id(), Some("conn-1".to_string()));
    }
}
