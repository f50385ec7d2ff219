use chrono::NaiveDateTime;
use sqlx::FromRow;

use crate::{
  database::{error::ErrorExt, Connection, Result},
  types::UserId,
  util::Sensitive,
};

#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct User {
  pub id: UserId,
  pub created_at: NaiveDateTime,
  pub username: String,
  pub email: String,
  /// Argon2 PHC string of the user's password.
  #[sqlx(rename = "password")]
  pub password_hash: Sensitive<String>,
}

impl User {
  #[tracing::instrument(skip(conn))]
  pub async fn by_id(conn: &mut Connection, id: UserId) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = ?")
      .bind(id)
      .fetch_optional(conn)
      .await
      .into_db_error()
  }

  #[tracing::instrument(skip(conn))]
  pub async fn by_username(conn: &mut Connection, username: &str) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>("SELECT * FROM users WHERE username = ?")
      .bind(username)
      .fetch_optional(conn)
      .await
      .into_db_error()
  }

  #[tracing::instrument(skip(conn, email), fields(email = "<hidden>"))]
  pub async fn by_email(conn: &mut Connection, email: &str) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>("SELECT * FROM users WHERE email = ?")
      .bind(email)
      .fetch_optional(conn)
      .await
      .into_db_error()
  }
}

/// Columns of a user record that are chosen by the client.
#[derive(Debug, Clone, Copy)]
pub struct NewUser<'a> {
  pub username: &'a str,
  pub email: &'a str,
  pub password_hash: Sensitive<&'a str>,
}

impl NewUser<'_> {
  #[tracing::instrument(skip(conn))]
  pub async fn insert(self, conn: &mut Connection) -> Result<User> {
    sqlx::query_as::<_, User>(
      "INSERT INTO users (username, email, password) VALUES (?, ?, ?) RETURNING *",
    )
    .bind(self.username)
    .bind(self.email)
    .bind(*self.password_hash.value())
    .fetch_one(conn)
    .await
    .into_db_error()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::database::{ErrorExt2, Pool};

  fn alice() -> NewUser<'static> {
    NewUser {
      username: "alice",
      email: "a@x.com",
      password_hash: Sensitive::new("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA"),
    }
  }

  #[tokio::test]
  async fn insert_then_query() {
    let pool = Pool::in_memory().await.unwrap();
    let mut conn = pool.get().await.unwrap();

    let user = alice().insert(&mut conn).await.unwrap();
    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "a@x.com");

    let by_id = User::by_id(&mut conn, user.id).await.unwrap();
    assert_eq!(by_id.as_ref(), Some(&user));

    let by_name = User::by_username(&mut conn, "alice").await.unwrap();
    assert_eq!(by_name.as_ref(), Some(&user));

    let by_email = User::by_email(&mut conn, "a@x.com").await.unwrap();
    assert_eq!(by_email, Some(user));
  }

  #[tokio::test]
  async fn matching_is_exact() {
    let pool = Pool::in_memory().await.unwrap();
    let mut conn = pool.get().await.unwrap();
    alice().insert(&mut conn).await.unwrap();

    assert!(User::by_username(&mut conn, "Alice").await.unwrap().is_none());
    assert!(User::by_username(&mut conn, "ali").await.unwrap().is_none());
    assert!(User::by_email(&mut conn, "A@X.COM").await.unwrap().is_none());
  }

  #[tokio::test]
  async fn duplicate_columns_are_reported() {
    let pool = Pool::in_memory().await.unwrap();
    let mut conn = pool.get().await.unwrap();
    alice().insert(&mut conn).await.unwrap();

    let error = NewUser {
      username: "alice2",
      ..alice()
    }
    .insert(&mut conn)
    .await
    .unwrap_err();
    assert_eq!(error.unique_violation(), Some("users.email"));

    let error = NewUser {
      email: "b@x.com",
      ..alice()
    }
    .insert(&mut conn)
    .await
    .unwrap_err();
    assert_eq!(error.unique_violation(), Some("users.username"));
  }
}
