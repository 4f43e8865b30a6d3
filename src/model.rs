//! User record types as exchanged with the remote user service.

use serde::{Deserialize, Serialize};

/// Identifier assigned by the remote service.
pub type UserId = u64;

/// Minimum length (in characters) for `name` and `company.name`.
pub const MIN_NAME_LEN: usize = 3;

/// A user as stored by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    #[serde(flatten)]
    pub profile: UserProfile,
}

/// Everything about a user except the server-assigned id.
///
/// This is also the body of a create request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub company: Company,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub suite: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zipcode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geo {
    #[serde(default)]
    pub lat: String,
    #[serde(default)]
    pub lng: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    #[serde(default)]
    pub name: String,
    #[serde(
        rename = "catchPhrase",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub catch_phrase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bs: Option<String>,
}

impl Company {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

impl UserRecord {
    pub fn new(id: UserId, profile: UserProfile) -> Self {
        Self { id, profile }
    }

    /// Address line as shown in the detail view: `street, city, zipcode`.
    pub fn address_line(&self) -> String {
        let a = &self.profile.address;
        format!("{}, {}, {}", a.street, a.city, a.zipcode)
    }
}

/// Username convention for new users: `USER-` followed by the name with
/// every space replaced by a hyphen.
///
/// The same rule serves the on-screen preview and the submitted value.
pub fn derive_username(name: &str) -> String {
    format!("USER-{}", name.replace(' ', "-"))
}

/// Length in characters, not bytes.
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_derive_username_hyphenates_spaces() {
        assert_eq!(derive_username("Leanne Graham"), "USER-Leanne-Graham");
        assert_eq!(derive_username("Ann"), "USER-Ann");
        // Runs of spaces are not collapsed
        assert_eq!(derive_username("A  B"), "USER-A--B");
    }

    #[test]
    fn test_char_len_counts_characters() {
        assert_eq!(char_len("Zoë"), 3);
        assert_eq!(char_len(""), 0);
    }

    #[test]
    fn test_deserialize_remote_shape() {
        let value = json!({
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": {
                "street": "Kulas Light",
                "suite": "Apt. 556",
                "city": "Gwenborough",
                "zipcode": "92998-3874",
                "geo": { "lat": "-37.3159", "lng": "81.1496" }
            },
            "phone": "1-770-736-8031 x56442",
            "website": "hildegard.org",
            "company": {
                "name": "Romaguera-Crona",
                "catchPhrase": "Multi-layered client-server neural-net",
                "bs": "harness real-time e-markets"
            }
        });

        let user: UserRecord = serde_json::from_value(value).unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.profile.username, "Bret");
        assert_eq!(user.profile.address.city, "Gwenborough");
        assert_eq!(
            user.profile.company.catch_phrase.as_deref(),
            Some("Multi-layered client-server neural-net")
        );
        assert_eq!(user.address_line(), "Kulas Light, Gwenborough, 92998-3874");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let user: UserRecord = serde_json::from_value(json!({ "id": 11 })).unwrap();
        assert_eq!(user.id, 11);
        assert!(user.profile.name.is_empty());
        assert!(user.profile.address.geo.is_none());
    }

    #[test]
    fn test_profile_serializes_without_id() {
        let profile = UserProfile {
            name: "Ann Lee".to_string(),
            company: Company::named("Acme"),
            ..UserProfile::default()
        };
        let value = serde_json::to_value(&profile).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["company"], json!({ "name": "Acme" }));
        assert!(value["address"].get("geo").is_none());
    }

    #[test]
    fn test_record_serializes_flat() {
        let user = UserRecord::new(7, UserProfile::default());
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["id"], json!(7));
        assert!(value.get("profile").is_none());
        assert!(value.get("name").is_some());
    }
}
