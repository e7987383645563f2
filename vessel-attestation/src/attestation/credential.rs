use rst_common::standard::chrono::{DateTime, Utc};
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json;

use rstdev_domain::entity::ToJSON;
use rstdev_domain::BaseError;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "self::serde")]
pub struct CredentialPreviewAttribute {
    pub name: String,
    pub value: String,

    #[serde(rename = "mime-type")]
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mime_type: Option<String>,
}

/// `RevocationNotification` is set by the agent once it learns the issuer revoked the credential
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "self::serde")]
pub struct RevocationNotification {
    #[serde(rename = "revocationDate")]
    pub revocation_date: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub comment: Option<String>,
}

impl RevocationNotification {
    pub fn new(comment: Option<String>) -> Self {
        Self {
            revocation_date: Utc::now(),
            comment,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(crate = "self::serde")]
pub struct AnonCredsCredentialMetadata {
    #[serde(rename = "credentialDefinitionId")]
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub credential_definition_id: Option<String>,

    #[serde(rename = "schemaId")]
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub schema_id: Option<String>,

    #[serde(rename = "revocationRegistryId")]
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub revocation_registry_id: Option<String>,
}

/// `CredentialMetadata` only maps the AnonCreds entry, other metadata keys are ignored
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(crate = "self::serde")]
pub struct CredentialMetadata {
    #[serde(rename = "_anoncreds/credential")]
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub anoncreds: Option<AnonCredsCredentialMetadata>,
}

/// `CredentialRecord` is a credential already stored in the holder's wallet by the agent
///
/// Records are created and persisted by the agent's credential exchange. This crate only
/// reads them, and asks the agent to delete the invalid attestation ones
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "self::serde")]
pub struct CredentialRecord {
    pub(crate) id: String,

    #[serde(rename = "credentialAttributes", default)]
    pub(crate) credential_attributes: Vec<CredentialPreviewAttribute>,

    #[serde(rename = "revocationNotification")]
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub(crate) revocation_notification: Option<RevocationNotification>,

    #[serde(default)]
    pub(crate) metadata: CredentialMetadata,
}

impl CredentialRecord {
    pub fn new(id: String) -> Self {
        Self {
            id,
            credential_attributes: Vec::new(),
            revocation_notification: None,
            metadata: CredentialMetadata::default(),
        }
    }

    pub fn add_attribute(&mut self, name: String, value: String) -> &mut Self {
        self.credential_attributes.push(CredentialPreviewAttribute {
            name,
            value,
            mime_type: None,
        });
        self
    }

    pub fn set_cred_def_id(&mut self, cred_def_id: String) -> &mut Self {
        let mut anoncreds = self.metadata.anoncreds.clone().unwrap_or_default();
        anoncreds.credential_definition_id = Some(cred_def_id);

        self.metadata.anoncreds = Some(anoncreds);
        self
    }

    pub fn set_revocation_notification(&mut self, notification: RevocationNotification) -> &mut Self {
        self.revocation_notification = Some(notification);
        self
    }

    pub fn get_id(&self) -> String {
        self.id.to_owned()
    }

    pub fn get_attributes(&self) -> &[CredentialPreviewAttribute] {
        &self.credential_attributes
    }

    /// `get_attribute` returns the value of the first attribute with the given name
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.credential_attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    pub fn get_cred_def_id(&self) -> Option<&str> {
        self.metadata
            .anoncreds
            .as_ref()
            .and_then(|anoncreds| anoncreds.credential_definition_id.as_deref())
    }

    pub fn get_revocation_notification(&self) -> Option<&RevocationNotification> {
        self.revocation_notification.as_ref()
    }

    pub fn is_revoked(&self) -> bool {
        self.revocation_notification.is_some()
    }
}

impl ToJSON for CredentialRecord {
    fn to_json(&self) -> Result<String, BaseError> {
        let json_str =
            serde_json::to_string(&self).map_err(|err| BaseError::ToJSONError(err.to_string()))?;

        Ok(json_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rst_common::standard::serde_json::json;

    #[test]
    fn test_parse_agent_record() {
        let raw = json!({
            "id": "cred-1",
            "credentialAttributes": [
                {"name": "issue_date_dateint", "value": "20240101"},
                {"mime-type": "text/plain", "name": "app_id", "value": "ca.bc.gov.BCWallet"}
            ],
            "revocationNotification": {
                "revocationDate": "2024-01-05T10:00:00Z",
                "comment": "revoked by issuer"
            },
            "metadata": {
                "_anoncreds/credential": {
                    "credentialDefinitionId": "NXp6XcGeCR2MviWuY51Dva:3:CL:33557:bcwallet",
                    "schemaId": "NXp6XcGeCR2MviWuY51Dva:2:attestation:1.0"
                },
                "_internal/somethingElse": {"foo": "bar"}
            }
        });

        let record: CredentialRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(record.get_id(), "cred-1".to_string());
        assert_eq!(record.get_attribute("issue_date_dateint"), Some("20240101"));
        assert_eq!(record.get_attribute("app_id"), Some("ca.bc.gov.BCWallet"));
        assert_eq!(record.get_attribute("missing"), None);
        assert_eq!(
            record.get_cred_def_id(),
            Some("NXp6XcGeCR2MviWuY51Dva:3:CL:33557:bcwallet")
        );
        assert!(record.is_revoked());

        let notification = record.get_revocation_notification().unwrap();
        assert_eq!(notification.comment, Some("revoked by issuer".to_string()));
    }

    #[test]
    fn test_parse_record_without_metadata() {
        let raw = json!({"id": "cred-2"});

        let record: CredentialRecord = serde_json::from_value(raw).unwrap();
        assert!(record.get_attributes().is_empty());
        assert!(record.get_cred_def_id().is_none());
        assert!(!record.is_revoked());
    }

    #[test]
    fn test_build_record() {
        let mut record = CredentialRecord::new("cred-3".to_string());
        record
            .add_attribute("issue_date_dateint".to_string(), "20240101".to_string())
            .set_cred_def_id("D1".to_string())
            .set_revocation_notification(RevocationNotification::new(None));

        assert_eq!(record.get_cred_def_id(), Some("D1"));
        assert!(record.is_revoked());

        let json_str = record.to_json().unwrap();
        assert!(json_str.contains("\"_anoncreds/credential\":{\"credentialDefinitionId\":\"D1\"}"));
        assert!(json_str.contains("\"revocationNotification\""));
    }
}
