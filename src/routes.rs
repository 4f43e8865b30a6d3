//! Client-side routes and the state carried along with a navigation.

use crate::model::{UserId, UserRecord};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/`
    List,
    /// `/users/:id`
    UserDetail(UserId),
}

impl Route {
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.trim();
        if path == "/" || path.is_empty() {
            return Some(Route::List);
        }
        let rest = path.trim_end_matches('/').strip_prefix("/users/")?;
        rest.parse::<UserId>().ok().map(Route::UserDetail)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::List => write!(f, "/"),
            Route::UserDetail(id) => write!(f, "/users/{}", id),
        }
    }
}

/// Current location plus whatever record was attached when navigating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub route: Route,
    pub state: Option<UserRecord>,
}

impl Navigation {
    pub fn list() -> Self {
        Self {
            route: Route::List,
            state: None,
        }
    }

    /// Navigate to a user's detail page carrying the record along.
    pub fn to_user(user: &UserRecord) -> Self {
        Self {
            route: Route::UserDetail(user.id),
            state: Some(user.clone()),
        }
    }

    /// Navigate by path with no attached state.
    pub fn to_path(path: &str) -> Option<Self> {
        Route::parse(path).map(|route| Self { route, state: None })
    }
}

impl Default for Navigation {
    fn default() -> Self {
        Self::list()
    }
}
