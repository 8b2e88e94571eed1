//! StreamYard public webinar API shapes and the registration payload.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Person whose details are submitted to unlock a webinar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registrant {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// `GET /api/public/webinars/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebinarInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub is_registration_enabled: Option<bool>,
    #[serde(default)]
    pub vod_url: Option<String>,
    #[serde(default)]
    pub vod_poster_url: Option<String>,
    #[serde(default)]
    pub is_vod_media_deleted: Option<bool>,
    #[serde(default)]
    pub registration_field_definitions: Vec<FieldDefinition>,
}

impl WebinarInfo {
    pub fn registration_required(&self) -> bool {
        self.is_registration_enabled.unwrap_or(false)
    }

    pub fn vod_deleted(&self) -> bool {
        self.is_vod_media_deleted.unwrap_or(false)
    }

    /// Recording URL, ignoring empty strings.
    pub fn vod_url(&self) -> Option<&str> {
        self.vod_url.as_deref().filter(|u| !u.trim().is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldDefinition {
    pub id: String,
    #[serde(default)]
    pub fields: FieldList,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldList {
    #[serde(default)]
    pub data: Vec<RegistrationField>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationField {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub is_required: bool,
}

/// `POST /api/public/webinars/{id}/registrations` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest<'a> {
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub fields: RegistrationFields<'a>,
    pub time_zone: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationFields<'a> {
    pub definition_id: &'a str,
    pub values: BTreeMap<&'a str, &'a str>,
}

/// Fill the first field definition's required fields from `registrant`.
///
/// Required fields of other types are left out; StreamYard rejects the
/// request if it really needs them.
pub fn build_registration<'a>(
    info: &'a WebinarInfo,
    registrant: &'a Registrant,
    time_zone: &'a str,
) -> Result<RegistrationRequest<'a>> {
    let definition = info
        .registration_field_definitions
        .first()
        .ok_or_else(|| Error::parse("webinar requires registration but has no field definitions"))?;

    let mut values = BTreeMap::new();
    for field in definition.fields.data.iter().filter(|f| f.is_required) {
        let value = match field.kind.as_str() {
            "email" => registrant.email.as_str(),
            "firstName" => registrant.first_name.as_str(),
            "lastName" => registrant.last_name.as_str(),
            other => {
                tracing::debug!(field = %field.id, kind = other, "required field left empty");
                continue;
            }
        };
        values.insert(field.id.as_str(), value);
    }

    Ok(RegistrationRequest {
        email: &registrant.email,
        first_name: &registrant.first_name,
        last_name: &registrant.last_name,
        fields: RegistrationFields {
            definition_id: &definition.id,
            values,
        },
        time_zone,
    })
}
