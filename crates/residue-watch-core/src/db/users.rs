//! User database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::{Role, User};

const USER_COLUMNS: &str = "id, username, password_hash, full_name, role, email, farm_id, \
                            created_at, updated_at";

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        username: row.get(1)?,
        password_hash: row.get(2)?,
        full_name: row.get(3)?,
        role: row.get(4)?,
        email: row.get(5)?,
        farm_id: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

impl Database {
    /// Insert a new user.
    pub fn insert_user(&self, user: &User) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO users (
                id, username, password_hash, full_name, role, email, farm_id,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                user.id,
                user.username,
                user.password_hash,
                user.full_name,
                user.role.as_str(),
                user.email,
                user.farm_id,
                user.created_at,
                user.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Get a user by ID.
    pub fn get_user(&self, id: &str) -> DbResult<Option<User>> {
        self.conn
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"),
                [id],
                user_from_row,
            )
            .optional()?
            .map(User::try_from)
            .transpose()
    }

    /// Get a user by username.
    pub fn get_user_by_username(&self, username: &str) -> DbResult<Option<User>> {
        self.conn
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?"),
                [username],
                user_from_row,
            )
            .optional()?
            .map(User::try_from)
            .transpose()
    }

    /// Get a user by email.
    pub fn get_user_by_email(&self, email: &str) -> DbResult<Option<User>> {
        self.conn
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"),
                [email],
                user_from_row,
            )
            .optional()?
            .map(User::try_from)
            .transpose()
    }

    /// List all users.
    pub fn list_users(&self) -> DbResult<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY username"))?;

        let rows = stmt.query_map([], user_from_row)?;
        let mut users = Vec::new();
        for row in rows {
            users.push(row?.try_into()?);
        }
        Ok(users)
    }

    /// Change a user's role.
    pub fn set_user_role(&self, user_id: &str, role: Role) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE users SET role = ?, updated_at = datetime('now') WHERE id = ?",
            [role.as_str(), user_id],
        )?;
        Ok(rows_affected > 0)
    }
}

/// Intermediate row struct for database mapping.
struct UserRow {
    id: String,
    username: String,
    password_hash: String,
    full_name: String,
    role: String,
    email: String,
    farm_id: Option<String>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<UserRow> for User {
    type Error = DbError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = Role::parse(&row.role)
            .ok_or_else(|| DbError::Constraint(format!("Unknown role: {}", row.role)))?;

        Ok(User {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            full_name: row.full_name,
            role,
            email: row.email,
            farm_id: row.farm_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
