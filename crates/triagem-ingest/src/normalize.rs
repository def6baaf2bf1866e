//! Text cleanup applied before classification.

/// Strip surrounding whitespace and, unless `case_sensitive`, lowercase.
pub fn normalize(text: &str, case_sensitive: bool) -> String {
    let trimmed = text.trim();
    if case_sensitive {
        trimmed.to_string()
    } else {
        trimmed.to_lowercase()
    }
}

/// Normalization settings carried from configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Preprocessor {
    pub case_sensitive: bool,
}

impl Preprocessor {
    pub fn new(case_sensitive: bool) -> Self {
        Self { case_sensitive }
    }

    pub fn apply(&self, text: &str) -> String {
        normalize(text, self.case_sensitive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_lowercases() {
        assert_eq!(normalize("  Preciso de AJUDA\n\t", false), "preciso de ajuda");
        assert_eq!(normalize("RECLAMAÇÃO", false), "reclamação");
    }

    #[test]
    fn test_case_sensitive_only_trims() {
        assert_eq!(normalize("  Preciso de AJUDA  ", true), "Preciso de AJUDA");
    }

    #[test]
    fn test_whitespace_only_becomes_empty() {
        assert_eq!(Preprocessor::default().apply(" \n "), "");
    }
}
