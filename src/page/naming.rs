use std::collections::HashMap;

/// Maps route names to controller identifiers.
///
/// Routes follow `PascalCase(route) + "Page"` (`create-brand` ->
/// `CreateBrandPage`) unless the alias table says otherwise.
#[derive(Debug, Clone, Default)]
pub struct ControllerNames {
    aliases: HashMap<String, String>,
}

impl ControllerNames {
    pub fn new(aliases: HashMap<String, String>) -> Self {
        Self { aliases }
    }

    pub fn for_route(&self, route: &str) -> String {
        match self.aliases.get(route) {
            Some(alias) => alias.clone(),
            None => conventional_name(route),
        }
    }
}

pub fn conventional_name(route: &str) -> String {
    let mut name: String = route
        .split(['-', '_'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect();
    name.push_str("Page");
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conventional_name() {
        assert_eq!(conventional_name("news"), "NewsPage");
        assert_eq!(conventional_name("create-brand"), "CreateBrandPage");
        assert_eq!(conventional_name("MENU"), "MenuPage");
        assert_eq!(conventional_name("avatar_viewer"), "AvatarViewerPage");
    }

    #[test]
    fn test_alias_wins() {
        let names = ControllerNames::new(HashMap::from([(
            "my-brand".to_string(),
            "BrandPage".to_string(),
        )]));
        assert_eq!(names.for_route("my-brand"), "BrandPage");
        assert_eq!(names.for_route("brand"), "BrandPage");
        assert_eq!(names.for_route("menu"), "MenuPage");
    }
}
