//! Payloads exchanged with the storefront API

use serde::{Deserialize, Serialize};

/// Authenticated user profile returned by `GET /auth/profile`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub avatar: String,
    pub role: String,
}

/// Product category embedded in every catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub image: String,
}

/// Product listed by `GET /products`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: i64,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: Category,
    #[serde(default)]
    pub images: Vec<String>,
}

/// User record listed by `GET /users`.
///
/// `password` is accepted when the server echoes it but never sent back out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub id: i64,
    pub email: String,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    pub name: String,
    pub role: String,
    pub avatar: String,
}

/// User record for `POST /users`; id and role are assigned by the server
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDirectoryEntry {
    pub email: String,
    pub password: String,
    pub name: String,
    pub avatar: String,
}

/// Body of `POST /auth/login`
#[derive(Debug, Serialize)]
pub(crate) struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Response of `POST /auth/login`; the refresh token is not used
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn catalog_item_ignores_extra_fields() {
        let item: CatalogItem = serde_json::from_value(json!({
            "id": 4,
            "title": "Classic Grey Hooded Sweatshirt",
            "slug": "classic-grey-hooded-sweatshirt",
            "price": 90,
            "description": "A comfy hoodie",
            "category": {
                "id": 1,
                "name": "Clothes",
                "image": "https://i.imgur.com/QkIa5tT.jpeg",
                "creationAt": "2024-01-01T00:00:00.000Z"
            },
            "images": ["https://i.imgur.com/R2PN9Wq.jpeg"],
            "creationAt": "2024-01-01T00:00:00.000Z",
            "updatedAt": "2024-01-01T00:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(item.price, 90.0);
        assert_eq!(item.category.name, "Clothes");
        assert_eq!(item.images.len(), 1);
    }

    #[test]
    fn directory_entry_never_serializes_password() {
        let entry: DirectoryEntry = serde_json::from_value(json!({
            "id": 1,
            "email": "john@mail.com",
            "password": "changeme",
            "name": "Jhon",
            "role": "customer",
            "avatar": "https://i.imgur.com/LDOO4Qs.jpg"
        }))
        .unwrap();
        assert_eq!(entry.password.as_deref(), Some("changeme"));

        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["role"], "customer");
    }
}
