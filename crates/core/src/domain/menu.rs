// Menu Domain Model

use super::error::{DomainError, Result};
use super::work_item::ItemId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One dish on the menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: ItemId,
    pub name: String,
    pub prep_minutes: u32,
    pub eat_minutes: u32,
}

impl MenuItem {
    pub fn new(id: ItemId, name: impl Into<String>, prep_minutes: u32, eat_minutes: u32) -> Self {
        Self {
            id,
            name: name.into(),
            prep_minutes,
            eat_minutes,
        }
    }
}

/// Read-only menu catalog
///
/// Ids are non-zero and unique. The menu never changes after construction,
/// so it can be shared between client threads behind an `Arc` without locking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    /// Build a menu, rejecting zero and duplicate ids
    pub fn new(items: Vec<MenuItem>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if item.id == 0 {
                return Err(DomainError::ValidationError(format!(
                    "menu item '{}' has id 0",
                    item.name
                )));
            }
            if item.name.trim().is_empty() {
                return Err(DomainError::ValidationError(format!(
                    "menu item {} has an empty name",
                    item.id
                )));
            }
            if !seen.insert(item.id) {
                return Err(DomainError::DuplicateItem(item.id));
            }
        }
        Ok(Self { items })
    }

    /// Parse the plain text menu format
    ///
    /// One dish per line: `<id> <name> <prep minutes> <eat minutes>`.
    /// Blank lines and lines starting with `#` are skipped.
    ///
    /// ```text
    /// 1 Burger 10 15
    /// 2 Salad 5 10
    /// ```
    pub fn parse_text(input: &str) -> Result<Self> {
        let mut items = Vec::new();

        for (idx, raw) in input.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line_no = idx + 1;
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != 4 {
                return Err(DomainError::InvalidMenu {
                    line: line_no,
                    reason: format!("expected 4 fields, found {}", fields.len()),
                });
            }

            let id = parse_field::<ItemId>(fields[0], "id", line_no)?;
            let prep_minutes = parse_field::<u32>(fields[2], "prep time", line_no)?;
            let eat_minutes = parse_field::<u32>(fields[3], "eating time", line_no)?;

            items.push(MenuItem::new(id, fields[1], prep_minutes, eat_minutes));
        }

        Self::new(items)
    }

    /// Parse the JSON menu format (an array of menu items)
    pub fn parse_json(input: &str) -> crate::error::Result<Self> {
        let items: Vec<MenuItem> = serde_json::from_str(input)?;
        Ok(Self::new(items)?)
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().map(|item| item.id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn parse_field<F: std::str::FromStr>(raw: &str, field: &str, line: usize) -> Result<F> {
    raw.parse::<F>().map_err(|_| DomainError::InvalidMenu {
        line,
        reason: format!("{} '{}' is not a non-negative integer", field, raw),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_menu() {
        let menu = Menu::parse_text("1 Burger 10 15\n2 Salad 5 10\n").unwrap();

        assert_eq!(menu.len(), 2);
        assert_eq!(menu.get(1), Some(&MenuItem::new(1, "Burger", 10, 15)));
        assert_eq!(menu.get(2).unwrap().eat_minutes, 10);
        assert!(menu.get(3).is_none());
    }

    #[test]
    fn test_parse_text_skips_blank_and_comment_lines() {
        let menu = Menu::parse_text("# house menu\n\n  3 Soup 4 6  \n").unwrap();

        assert_eq!(menu.ids().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_parse_text_wrong_field_count() {
        let err = Menu::parse_text("1 Burger 10 15\n2 Fish and Chips 5 10\n").unwrap_err();

        assert_eq!(
            err,
            DomainError::InvalidMenu {
                line: 2,
                reason: "expected 4 fields, found 6".to_string()
            }
        );
    }

    #[test]
    fn test_parse_text_negative_time() {
        let err = Menu::parse_text("1 Burger -10 15").unwrap_err();
        assert!(err.to_string().contains("prep time"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = Menu::parse_text("1 Burger 10 15\n1 Salad 5 10").unwrap_err();
        assert_eq!(err, DomainError::DuplicateItem(1));
    }

    #[test]
    fn test_zero_id_rejected() {
        // Id 0 was the "invalid item" marker of the old lookup; it cannot be a real dish
        let err = Menu::parse_text("0 Water 0 1").unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }

    #[test]
    fn test_parse_json_menu() {
        let json = r#"[
            {"id": 1, "name": "Burger", "prep_minutes": 10, "eat_minutes": 15},
            {"id": 9, "name": "Pie", "prep_minutes": 2, "eat_minutes": 3}
        ]"#;

        let menu = Menu::parse_json(json).unwrap();
        assert_eq!(menu.len(), 2);
        assert_eq!(menu.get(9).unwrap().name, "Pie");
    }

    #[test]
    fn test_parse_json_malformed() {
        let result = Menu::parse_json(r#"[{"id": 1}]"#);
        assert!(matches!(
            result,
            Err(crate::error::AppError::Serialization(_))
        ));
    }
}
