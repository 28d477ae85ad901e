use chrono::NaiveDateTime;
use diesel::{Insertable, Queryable};
use serde::{Deserialize, Serialize};

/// A row of the `todos` table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Queryable)]
pub struct Todo {
    pub id: i32,
    pub title: String,
    pub status: i32,
    pub created_on: NaiveDateTime,
    pub due_date: Option<NaiveDateTime>,
}

/// Body of `POST /todos`. The id and creation timestamp are assigned by
/// storage, and so is the status when the client leaves it out.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Insertable)]
#[diesel(table_name = crate::repository::schema::todos)]
pub struct PostTodo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: Option<i32>,
}

/// The `{id, title}` shape served by the `/todo` endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Queryable)]
pub struct LegacyTodo {
    pub id: i32,
    pub title: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Insertable)]
#[diesel(table_name = crate::repository::schema::todos)]
pub struct PostLegacyTodo {
    #[serde(default)]
    pub title: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Response {
    pub message: String,
}

impl Response {
    pub fn new(message: impl Into<String>) -> Self {
        Response {
            message: message.into(),
        }
    }
}
