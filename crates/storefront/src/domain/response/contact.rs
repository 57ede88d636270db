use crate::model::contact_message::ContactMessage;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ContactData {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: String,
}

impl From<ContactMessage> for ContactData {
    fn from(value: ContactMessage) -> Self {
        ContactData {
            id: value.id,
            name: value.name,
            email: value.email,
            subject: value.subject,
            message: value.message,
            created_at: value.created_at.and_utc().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ContactEnvelope {
    pub data: ContactData,
}
