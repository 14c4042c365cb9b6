/// Resolves a navigation `language` tag to a routing locale. Catalog content
/// lives with the remote service; this capability only decides which locale
/// tag travels on the route request.
pub trait TranslationLookup: Send + Sync {
    fn resolve_locale(&self, language: &str) -> String;
}

/// Language tags the navigation surface accepts; anything else falls back
/// to en_US.
pub struct StaticTranslations {
    supported: Vec<String>,
}

impl Default for StaticTranslations {
    fn default() -> Self {
        Self {
            supported: ["de", "en", "es", "fr", "it", "nl", "pt", "ru", "tr", "zh"]
                .iter()
                .map(|tag| tag.to_string())
                .collect(),
        }
    }
}

impl TranslationLookup for StaticTranslations {
    fn resolve_locale(&self, language: &str) -> String {
        let base = language
            .split_once('-')
            .map(|(base, _)| base)
            .unwrap_or(language);

        if self.supported.iter().any(|tag| tag == base) {
            language.to_string()
        } else {
            String::from("en_US")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_tags_pass_through() {
        let translations = StaticTranslations::default();

        assert_eq!(translations.resolve_locale("fr"), "fr");
        assert_eq!(translations.resolve_locale("pt-BR"), "pt-BR");
    }

    #[test]
    fn unknown_tags_fall_back_to_en_us() {
        assert_eq!(StaticTranslations::default().resolve_locale("xx"), "en_US");
    }
}
