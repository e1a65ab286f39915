//! Menu file loading
//!
//! `.json` files hold an array of menu items; any other file is read as the
//! plain text format (`<id> <name> <prep min> <eat min>` per line).

use brigade_core::domain::Menu;
use brigade_core::Result;
use std::path::Path;
use tracing::info;

pub fn load(path: &Path) -> Result<Menu> {
    let raw = std::fs::read_to_string(path)?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let menu = if is_json {
        Menu::parse_json(&raw)?
    } else {
        Menu::parse_text(&raw)?
    };

    info!(path = %path.display(), items = menu.len(), "Menu loaded");
    Ok(menu)
}

#[cfg(test)]
mod tests {
    use super::*;
    use brigade_core::domain::DomainError;
    use brigade_core::AppError;
    use std::io::Write;

    fn write_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_text_menu() {
        let file = write_file(".txt", "1 Burger 10 15\n2 Salad 5 10\n");

        let menu = load(file.path()).unwrap();
        assert_eq!(menu.len(), 2);
        assert_eq!(menu.get(2).unwrap().name, "Salad");
    }

    #[test]
    fn test_load_json_menu() {
        let file = write_file(
            ".JSON",
            r#"[{"id": 3, "name": "Soup", "prep_minutes": 4, "eat_minutes": 6}]"#,
        );

        let menu = load(file.path()).unwrap();
        assert_eq!(menu.get(3).unwrap().prep_minutes, 4);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load(Path::new("/definitely/not/here/menu.txt"));
        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[test]
    fn test_load_malformed_text() {
        let file = write_file(".menu", "1 Burger ten 15\n");

        let result = load(file.path());
        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::InvalidMenu { line: 1, .. }))
        ));
    }
}
