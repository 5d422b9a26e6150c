use std::collections::HashMap;
use std::sync::OnceLock;

use crate::models::Token;

fn user_data(id: &str, name: &str, scope: &str) -> HashMap<String, String> {
    HashMap::from([
        ("user.id".to_string(), id.to_string()),
        ("user.name".to_string(), name.to_string()),
        ("user.scope".to_string(), scope.to_string()),
    ])
}

/// Mock user directory keyed by token value
fn mock_users() -> &'static HashMap<&'static str, HashMap<String, String>> {
    static MOCK_USERS: OnceLock<HashMap<&'static str, HashMap<String, String>>> =
        OnceLock::new();
    MOCK_USERS.get_or_init(|| {
        HashMap::from([
            (
                "broadcaster_token_123",
                user_data("broadcaster123", "John Broadcaster", "broadcaster"),
            ),
            (
                "viewer_token_456",
                user_data("viewer456", "Jane Viewer", "viewer"),
            ),
            (
                "viewer_token_789",
                user_data("viewer789", "Bob Watcher", "viewer"),
            ),
        ])
    })
}

/// Echo the token back to the platform
pub fn validate_token(token: &Token) -> String {
    token.value.clone()
}

/// Resolve a token to user data. Unrecognized tokens resolve to the
/// "unknown" identity with the token value as display name.
pub fn resolve_user_data(token: &Token) -> HashMap<String, String> {
    if let Some(data) = mock_users().get(token.value.as_str()) {
        return data.clone();
    }
    user_data("unknown", &token.value, "viewer")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(value: &str) -> Token {
        Token {
            value: value.to_string(),
            token_type: "auth".to_string(),
            action: String::new(),
        }
    }

    #[test]
    fn known_token_resolves_to_its_user() {
        let data = resolve_user_data(&token("viewer_token_456"));
        assert_eq!(data["user.id"], "viewer456");
        assert_eq!(data["user.name"], "Jane Viewer");
        assert_eq!(data["user.scope"], "viewer");
    }

    #[test]
    fn unknown_token_resolves_to_unknown_identity() {
        let data = resolve_user_data(&token("bogus_token"));
        assert_eq!(data["user.id"], "unknown");
        assert_eq!(data["user.name"], "bogus_token");
        assert_eq!(data["user.scope"], "viewer");
    }

    #[test]
    fn validate_echoes_the_token_value() {
        assert_eq!(validate_token(&token("abc")), "abc");
    }
}
