//! Prompt templates for the model-backed strategies.

use triagem_core::category;

/// Characters of email text embedded in the LLM prompt.
pub const LLM_MAX_CHARS: usize = 2000;

pub const LLM_SYSTEM: &str =
    "Você é um assistente que classifica e-mails corporativos e responde apenas com JSON válido.";

/// Instruction prompt for the external LLM. Embeds at most
/// [`LLM_MAX_CHARS`] characters of `text`.
pub fn llm_prompt(text: &str) -> String {
    let excerpt = truncate_chars(text, LLM_MAX_CHARS);
    format!(
        r#"Classifique o e-mail abaixo em uma de duas categorias:
- "{productive}": o e-mail exige uma ação ou resposta específica (solicitação, dúvida, problema, reclamação, envio de documento).
- "{unproductive}": o e-mail não exige ação imediata (agradecimento, felicitação, confirmação, mensagem social).

Em seguida, escreva uma resposta curta, educada e profissional em português para o remetente.

Responda somente com um objeto JSON no formato:
{{"category": "<{productive} ou {unproductive}>", "suggested_reply": "<resposta sugerida>"}}

E-MAIL:
"""
{excerpt}
""""#,
        productive = category::PRODUCTIVE,
        unproductive = category::UNPRODUCTIVE,
        excerpt = excerpt,
    )
}

/// Premise handed to the zero-shot model.
pub fn zero_shot_prompt(text: &str) -> String {
    format!(
        "Analise o seguinte e-mail recebido por uma empresa do setor financeiro. \
         E-mails que pedem suporte, atualização de casos, envio de arquivos ou \
         esclarecimento de dúvidas exigem uma ação. E-mails de agradecimento, \
         felicitações ou mensagens sociais não exigem ação. E-mail: {}",
        text
    )
}

/// First `max` characters of `text`, never splitting a character.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_counts_characters() {
        assert_eq!(truncate_chars("reclamação", 9), "reclamaçã");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_llm_prompt_embeds_categories_and_excerpt() {
        let prompt = llm_prompt("preciso do boleto");
        assert!(prompt.contains("\"Produtivo\""));
        assert!(prompt.contains("\"Improdutivo\""));
        assert!(prompt.contains("preciso do boleto"));
        assert!(prompt.contains("suggested_reply"));
    }

    #[test]
    fn test_llm_prompt_truncates_to_2000_chars() {
        let long = "é".repeat(2500);
        let prompt = llm_prompt(&long);
        assert!(prompt.contains(&"é".repeat(2000)));
        assert!(!prompt.contains(&"é".repeat(2001)));
    }

    #[test]
    fn test_zero_shot_prompt_wraps_text() {
        assert!(zero_shot_prompt("olá equipe").ends_with("E-mail: olá equipe"));
    }
}
