//! User endpoints: profile, dashboard positions, and account user listing.
//!
//! Field names match the snake_case JSON the Canvas API returns. Fields
//! the API omits for some user representations are `Option` or defaulted.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::debug;

use crate::client::CanvasClient;
use crate::error::Error;

// ── Types ────────────────────────────────────────────────────────────

/// A Canvas user, as returned by the profile and account-user endpoints.
///
/// The account listing returns a subset of the profile fields, so
/// everything beyond `id` and `name` is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub short_name: Option<String>,
    pub sortable_name: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub primary_email: Option<String>,
    pub login_id: Option<String>,
    pub sis_user_id: Option<String>,
    pub lti_user_id: Option<String>,
    pub avatar_url: Option<String>,
    /// Calendar links (e.g. `{"ics": "https://..."}`).
    pub calendar: Option<HashMap<String, String>>,
    pub time_zone: Option<String>,
    pub locale: Option<String>,
}

/// The record returned by the profile endpoint. Same shape as [`User`];
/// the two endpoints share every field this crate models.
pub type Profile = User;

/// Per-user dashboard course ordering, keyed by course identifier
/// (e.g. `"course_16552"`).
pub type DashboardPositions = HashMap<String, i32>;

/// Wire envelope for `GET /users/{id}/dashboard_positions`; unwrapped
/// before the caller sees it.
#[derive(Deserialize)]
struct DashboardPositionsEnvelope {
    dashboard_positions: DashboardPositions,
}

// ── Account user query options ───────────────────────────────────────

/// Sort key for the account user listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum UserSortKey {
    Username,
    Email,
    SisId,
    LastLogin,
}

/// Sort direction for the account user listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Query options for [`CanvasClient::list_account_users`].
///
/// Enum-restricted fields (`sort`, `order`) are validated when set, so a
/// bad value fails before any request is issued:
///
/// ```
/// use canvas_api::users::{AccountUsersQuery, UserSortKey};
///
/// let query = AccountUsersQuery::new()
///     .search_term("poga")
///     .sort(UserSortKey::Email);
/// assert!(query.try_sort("invalid_value").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AccountUsersQuery {
    search_term: Option<String>,
    enrollment_type: Option<String>,
    sort: Option<UserSortKey>,
    order: Option<SortOrder>,
}

impl AccountUsersQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict results to users matching this partial name or SIS id.
    pub fn search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    /// Restrict results to users with this enrollment type
    /// (e.g. `student`, `teacher`).
    pub fn enrollment_type(mut self, enrollment_type: impl Into<String>) -> Self {
        self.enrollment_type = Some(enrollment_type.into());
        self
    }

    pub fn sort(mut self, key: UserSortKey) -> Self {
        self.sort = Some(key);
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Set the sort key from its wire string, validating it.
    pub fn try_sort(self, key: &str) -> Result<Self, Error> {
        Ok(self.sort(parse_option("sort", key)?))
    }

    /// Set the sort order from its wire string, validating it.
    pub fn try_order(self, order: &str) -> Result<Self, Error> {
        Ok(self.order(parse_option("order", order)?))
    }

    /// Query parameters for the request; only options actually set are
    /// emitted.
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(ref term) = self.search_term {
            params.push(("search_term", term.clone()));
        }
        if let Some(ref enrollment) = self.enrollment_type {
            params.push(("enrollment_type", enrollment.clone()));
        }
        if let Some(sort) = self.sort {
            params.push(("sort", sort.to_string()));
        }
        if let Some(order) = self.order {
            params.push(("order", order.to_string()));
        }
        params
    }
}

/// Parse an enum-restricted option value, reporting the allowed set on
/// failure.
fn parse_option<T>(field: &'static str, value: &str) -> Result<T, Error>
where
    T: FromStr + VariantList,
{
    value.parse().map_err(|_| Error::InvalidOption {
        field,
        reason: format!("{value:?} is not one of: {}", T::variant_list()),
    })
}

/// Renders the allowed wire strings for an option enum.
trait VariantList {
    fn variant_list() -> String;
}

impl VariantList for UserSortKey {
    fn variant_list() -> String {
        "username, email, sis_id, last_login".into()
    }
}

impl VariantList for SortOrder {
    fn variant_list() -> String {
        "asc, desc".into()
    }
}

impl fmt::Display for AccountUsersQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self.params();
        let mut first = true;
        for (key, value) in params {
            if !first {
                write!(f, "&")?;
            }
            write!(f, "{key}={value}")?;
            first = false;
        }
        Ok(())
    }
}

// ── Endpoints ────────────────────────────────────────────────────────

impl CanvasClient {
    /// Fetch a user's profile.
    ///
    /// `GET /api/v1/users/{user_id}/profile`
    pub async fn get_user_profile(&self, user_id: i64) -> Result<Profile, Error> {
        debug!(user_id, "fetching user profile");
        self.get(&format!("users/{user_id}/profile")).await
    }

    /// Fetch a user's dashboard course ordering.
    ///
    /// `GET /api/v1/users/{user_id}/dashboard_positions`
    ///
    /// The wire format wraps the mapping in a single-keyed object; this
    /// returns the bare mapping.
    pub async fn get_dashboard_positions(
        &self,
        user_id: i64,
    ) -> Result<DashboardPositions, Error> {
        debug!(user_id, "fetching dashboard positions");
        let envelope: DashboardPositionsEnvelope = self
            .get(&format!("users/{user_id}/dashboard_positions"))
            .await?;
        Ok(envelope.dashboard_positions)
    }

    /// List users in the account the token is scoped to.
    ///
    /// `GET /api/v1/accounts/self/users`
    pub async fn list_account_users(
        &self,
        query: &AccountUsersQuery,
    ) -> Result<Vec<User>, Error> {
        debug!(%query, "listing account users");
        self.get_with_params("accounts/self/users", &query.params())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_key_round_trips_wire_strings() {
        assert_eq!("email".parse::<UserSortKey>(), Ok(UserSortKey::Email));
        assert_eq!(UserSortKey::Email.to_string(), "email");
        assert_eq!("sis_id".parse::<UserSortKey>(), Ok(UserSortKey::SisId));
        assert_eq!(UserSortKey::LastLogin.to_string(), "last_login");
    }

    #[test]
    fn invalid_sort_value_is_rejected_before_any_request() {
        let err = AccountUsersQuery::new()
            .try_sort("invalid_value")
            .expect_err("must reject unknown sort key");
        match err {
            Error::InvalidOption { field, reason } => {
                assert_eq!(field, "sort");
                assert!(reason.contains("invalid_value"), "reason: {reason}");
            }
            other => panic!("expected InvalidOption, got: {other:?}"),
        }
    }

    #[test]
    fn invalid_order_value_is_rejected() {
        let err = AccountUsersQuery::new()
            .try_order("sideways")
            .expect_err("must reject unknown order");
        assert!(matches!(err, Error::InvalidOption { field: "order", .. }));
    }

    #[test]
    fn only_set_options_become_params() {
        let query = AccountUsersQuery::new()
            .search_term("poga")
            .sort(UserSortKey::Email);

        assert_eq!(
            query.params(),
            vec![
                ("search_term", "poga".to_string()),
                ("sort", "email".to_string()),
            ]
        );
        assert!(AccountUsersQuery::new().params().is_empty());
    }
}
