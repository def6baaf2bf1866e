//! Keyword rule engine.
//!
//! Plain substring containment on the normalized text: a keyword inside a
//! longer word still matches ("obrigadocument" contains "obrigado").

use async_trait::async_trait;
use tracing::debug;
use triagem_core::{category, ClassificationResult};

use crate::Classifier;

/// Keywords signalling a request that needs action.
pub const PRODUCTIVE_KEYWORDS: &[&str] = &[
    "preciso",
    "gostaria de saber",
    "reclamação",
    "dúvida",
    "problema",
    "erro",
    "solicito",
    "quero",
    "anexo",
    "código",
    "boleto",
];

/// Keywords signalling thanks or acknowledgement.
pub const UNPRODUCTIVE_KEYWORDS: &[&str] = &[
    "obrigado",
    "obrigada",
    "valeu",
    "entendi",
    "ok",
    "confirmado",
    "agradeço",
    "parabéns",
    "concluí",
];

pub const REPLY_PRODUCTIVE: &str = "Obrigado por nos contatar! Recebemos sua solicitação e já estamos analisando. Em breve entraremos em contato com uma solução ou resposta completa.";
pub const REPLY_UNPRODUCTIVE: &str = "Olá! Recebemos sua mensagem. Se precisar de algo mais, estamos à disposição. Caso contrário, considere esta conversa encerrada.";
pub const REPLY_DEFAULT: &str = "Obrigado por nos contatar! Recebemos sua mensagem. Por favor, especifique sua dúvida ou solicitação para que possamos ajudá-lo de forma eficiente.";

/// Which rule fired, and on which keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordMatch<'a> {
    Productive(&'a str),
    Unproductive(&'a str),
    None,
}

/// Ordered keyword lists. Productive keywords are checked first.
#[derive(Debug, Clone)]
pub struct KeywordRules {
    pub productive: Vec<&'static str>,
    pub unproductive: Vec<&'static str>,
}

impl Default for KeywordRules {
    fn default() -> Self {
        Self {
            productive: PRODUCTIVE_KEYWORDS.to_vec(),
            unproductive: UNPRODUCTIVE_KEYWORDS.to_vec(),
        }
    }
}

impl KeywordRules {
    /// First matching rule. A productive hit wins over any unproductive one.
    pub fn matched(&self, text: &str) -> KeywordMatch<'static> {
        if let Some(kw) = self.productive.iter().copied().find(|k| text.contains(k)) {
            return KeywordMatch::Productive(kw);
        }
        if let Some(kw) = self.unproductive.iter().copied().find(|k| text.contains(k)) {
            return KeywordMatch::Unproductive(kw);
        }
        KeywordMatch::None
    }

    /// Category and canned reply for `text`.
    pub fn evaluate(&self, text: &str) -> ClassificationResult {
        let matched = self.matched(text);
        debug!("Keyword match: {:?}", matched);

        let (label, reply) = match matched {
            KeywordMatch::Productive(_) => (category::PRODUCTIVE, REPLY_PRODUCTIVE),
            KeywordMatch::Unproductive(_) => (category::UNPRODUCTIVE, REPLY_UNPRODUCTIVE),
            KeywordMatch::None => (category::PRODUCTIVE_DEFAULT, REPLY_DEFAULT),
        };
        ClassificationResult::new(label, reply)
    }
}

/// Deterministic, offline classifier. The default strategy.
#[derive(Debug, Clone, Default)]
pub struct KeywordClassifier {
    rules: KeywordRules,
}

impl KeywordClassifier {
    pub fn new(rules: KeywordRules) -> Self {
        Self { rules }
    }
}

#[async_trait]
impl Classifier for KeywordClassifier {
    fn name(&self) -> &'static str {
        "keywords"
    }

    async fn classify(&self, text: &str) -> ClassificationResult {
        self.rules.evaluate(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(text: &str) -> ClassificationResult {
        KeywordRules::default().evaluate(text)
    }

    #[test]
    fn test_every_productive_keyword() {
        for kw in PRODUCTIVE_KEYWORDS {
            let result = eval(&format!("olá, {} aqui", kw));
            assert_eq!(result.category, "Produtivo", "keyword {kw}");
            assert_eq!(result.suggested_reply, REPLY_PRODUCTIVE);
        }
    }

    #[test]
    fn test_every_unproductive_keyword() {
        for kw in UNPRODUCTIVE_KEYWORDS {
            let result = eval(&format!("{} pela atenção", kw));
            assert_eq!(result.category, "Improdutivo", "keyword {kw}");
            assert_eq!(result.suggested_reply, REPLY_UNPRODUCTIVE);
        }
    }

    #[test]
    fn test_no_keyword_falls_back() {
        let result = eval("bom dia a todos da equipe");
        assert_eq!(result.category, "Produtivo (Padrão)");
        assert_eq!(result.suggested_reply, REPLY_DEFAULT);
    }

    #[test]
    fn test_productive_wins_over_unproductive() {
        let result = eval("obrigado, mas ainda tenho um problema com o boleto");
        assert_eq!(result.category, "Produtivo");
        assert_eq!(
            KeywordRules::default().matched("obrigado, mas ainda tenho um problema"),
            KeywordMatch::Productive("problema")
        );
    }

    #[test]
    fn test_substring_inside_longer_word_matches() {
        assert_eq!(eval("obrigadocument").category, "Improdutivo");
        // "ok" is contained in "book"
        assert_eq!(eval("facebook").category, "Improdutivo");
    }

    #[test]
    fn test_matching_is_case_sensitive_on_given_text() {
        // Input is expected to be normalized already.
        assert_eq!(eval("PRECISO").category, "Produtivo (Padrão)");
        assert_eq!(eval("preciso").category, "Produtivo");
    }

    #[test]
    fn test_empty_text_falls_back() {
        assert_eq!(eval("").category, "Produtivo (Padrão)");
    }

    #[tokio::test]
    async fn test_classifier_trait() {
        let classifier = KeywordClassifier::default();
        assert_eq!(classifier.name(), "keywords");
        let result = classifier.classify("tenho um problema com meu boleto").await;
        assert_eq!(result.category, "Produtivo");
    }
}
