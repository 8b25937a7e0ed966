//! Fit comments as listed by the comment board.

use crate::ids::{FitStorageKey, UserEmail};
use serde::{Deserialize, Serialize};

/// A published fit comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitComment {
    #[serde(rename = "fitStorageKey")]
    pub fit_storage_key: FitStorageKey,
    #[serde(rename = "itemBrand", default)]
    pub brand: Option<String>,
    #[serde(rename = "itemName", default)]
    pub item_name: Option<String>,
    #[serde(rename = "fitComment", default)]
    pub comment: Option<String>,
    #[serde(rename = "itemSize", default)]
    pub size: Option<String>,
    /// File name of the fit-storage image.
    #[serde(rename = "fitStorageImg")]
    pub image: String,
    #[serde(rename = "userEmail")]
    pub user_email: UserEmail,
    #[serde(rename = "userName", default)]
    pub user_name: Option<String>,
}

impl FitComment {
    /// True when the comment text is present and not blank.
    pub fn has_text(&self) -> bool {
        self.comment
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty())
    }

    pub fn is_by(&self, email: &UserEmail) -> bool {
        &self.user_email == email
    }
}

/// Comments written by `email` that carry text, in server order.
pub fn comments_by(comments: Vec<FitComment>, email: &UserEmail) -> Vec<FitComment> {
    comments
        .into_iter()
        .filter(|comment| comment.is_by(email) && comment.has_text())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(key: i64, email: &str, text: Option<&str>) -> FitComment {
        FitComment {
            fit_storage_key: FitStorageKey::new(key),
            brand: None,
            item_name: None,
            comment: text.map(str::to_string),
            size: None,
            image: format!("{key}.jpg"),
            user_email: UserEmail::from(email),
            user_name: None,
        }
    }

    #[test]
    fn test_comments_by_filters_owner_and_blank_text() {
        let all = vec![
            comment(1, "me@fitpin.kr", Some("fits well")),
            comment(2, "other@fitpin.kr", Some("too long")),
            comment(3, "me@fitpin.kr", Some("   ")),
            comment(4, "me@fitpin.kr", None),
            comment(5, "me@fitpin.kr", Some("a bit tight")),
        ];
        let mine = comments_by(all, &UserEmail::from("me@fitpin.kr"));
        let keys: Vec<i64> = mine.iter().map(|c| c.fit_storage_key.get()).collect();
        assert_eq!(keys, vec![1, 5]);
    }

    #[test]
    fn test_decode_with_nulls() {
        let json = r#"{
            "fitStorageKey": 8,
            "itemBrand": null,
            "itemName": "Denim",
            "fitComment": "good",
            "itemSize": null,
            "fitStorageImg": "abc.jpg",
            "userEmail": "me@fitpin.kr",
            "userName": null
        }"#;
        let parsed: FitComment = serde_json::from_str(json).unwrap();
        assert!(parsed.brand.is_none());
        assert_eq!(parsed.item_name.as_deref(), Some("Denim"));
        assert!(parsed.has_text());
    }
}
