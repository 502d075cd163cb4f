use crate::config::PromptSettings;

pub const REFERENCE_START_MARKER: &str = "--- CONTEÚDO DE REFERÊNCIA ---";
pub const REFERENCE_END_MARKER: &str = "--- FIM DO CONTEÚDO DE REFERÊNCIA ---";

/// Instruction sent as the first message of every conversation.
///
/// The reference text sits between [`REFERENCE_START_MARKER`] and
/// [`REFERENCE_END_MARKER`] so the model can tell it apart from the rules.
pub fn build_preamble(settings: &PromptSettings, context: &str) -> String {
    format!(
        "Sua única e exclusiva função é ser um assistente sobre o {topic}.
É PROIBIDO usar qualquer conhecimento externo que você tenha. Todas as suas respostas devem ser baseadas ESTRITAMENTE no CONTEÚDO DE REFERÊNCIA abaixo.
Se o usuário perguntar sobre qualquer outro tópico que não esteja no texto (como esportes, futebol, política, história, etc.), você DEVE responder exatamente com a frase: '{fallback}'
Não acrescente nada antes ou depois dessa frase.

{start}
{context}
{end}
",
        topic = settings.topic,
        fallback = settings.fallback_sentence,
        start = REFERENCE_START_MARKER,
        context = context,
        end = REFERENCE_END_MARKER,
    )
}
