use crate::model::user::User as UserModel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct UserData {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<UserModel> for UserData {
    fn from(value: UserModel) -> Self {
        UserData {
            id: value.user_id,
            name: value.name,
            email: value.email,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct UserEnvelope {
    pub user: UserData,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: UserData,
    pub session_id: String,
}
