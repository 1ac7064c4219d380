use super::{Amount, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Server-assigned identifier of a menu item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuId(pub String);

impl From<&str> for MenuId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for MenuId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// An item on the cafe menu.
///
/// The backend stores these as documents, so the identifier arrives as `_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(rename = "_id", alias = "id")]
    pub id: MenuId,
    pub name: String,
    pub price: Amount,
}

impl MenuItem {
    pub fn new(id: impl Into<MenuId>, name: impl Into<String>, price: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: Amount(price),
        }
    }

    /// Whether this item matches a menu search query.
    ///
    /// Matches a case-insensitive substring of the name, or a substring of the
    /// price digits. An empty query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&query.to_lowercase())
            || self.price.to_string().contains(query)
    }
}

/// Raw text of the add/edit menu form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuForm {
    pub name: String,
    pub price: String,
}

impl MenuForm {
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
        }
    }

    /// Prefills the form for editing an existing item.
    pub fn from_item(item: &MenuItem) -> Self {
        Self::new(item.name.clone(), item.price.to_string())
    }

    pub fn validate(&self) -> Result<MenuDraft, ValidationError> {
        let name = self.name.trim();
        let price = self.price.trim();
        if name.is_empty() || price.is_empty() {
            return Err(ValidationError::new("Please fill in both fields."));
        }
        let price = price
            .parse::<Amount>()
            .map_err(|_| ValidationError::new("Price must be a whole number."))?;
        Ok(MenuDraft {
            name: name.to_string(),
            price,
        })
    }
}

/// Validated body of `POST /api/menu` and `PUT /api/menu/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuDraft {
    pub name: String,
    pub price: Amount,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_item_decodes_document_id() {
        let item: MenuItem =
            serde_json::from_str(r#"{"_id":"m1","name":"Kopi Susu","price":"18000","__v":0}"#).unwrap();
        assert_eq!(item, MenuItem::new("m1", "Kopi Susu", 18000));

        let item: MenuItem = serde_json::from_str(r#"{"id":"m2","name":"Teh","price":8000}"#).unwrap();
        assert_eq!(item.id, MenuId::from("m2"));
    }

    #[test]
    fn test_matches_name_or_price() {
        let item = MenuItem::new("m1", "Es Kopi Susu", 18000);
        assert!(item.matches("kopi"));
        assert!(item.matches("KOPI susu"));
        assert!(item.matches("180"));
        assert!(item.matches(""));
        assert!(!item.matches("teh"));
    }

    #[test]
    fn test_form_requires_both_fields() {
        let err = MenuForm::new("Kopi", "  ").validate().unwrap_err();
        assert_eq!(err.to_string(), "Please fill in both fields.");
        let err = MenuForm::new("", "1000").validate().unwrap_err();
        assert_eq!(err.to_string(), "Please fill in both fields.");
    }

    #[test]
    fn test_form_rejects_non_numeric_price() {
        assert!(MenuForm::new("Kopi", "12,5").validate().is_err());
        assert!(MenuForm::new("Kopi", "-1").validate().is_err());
    }

    #[test]
    fn test_form_trims_and_parses() {
        let draft = MenuForm::new(" Kopi ", " 15000 ").validate().unwrap();
        assert_eq!(draft, MenuDraft { name: "Kopi".into(), price: Amount(15000) });
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            serde_json::json!({"name": "Kopi", "price": 15000})
        );
    }
}
