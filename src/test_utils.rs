#[cfg(test)]
pub mod fixtures {
    use crate::{config::PromptSettings, models::domain::ReferenceContext};

    pub const PAGE_WITH_MAIN: &str = r#"<!DOCTYPE html>
<html>
  <head><title>Título da aba</title><meta charset="utf-8"></head>
  <body>
    <nav><a href="/">Menu</a> <a href="/contato">Contato</a></nav>
    <main>
      <h1>Dúvidas   frequentes</h1>
      <h2>Quem pode participar?</h2>
      <p>
        Jovens a partir de 16 anos.
      </p>
    </main>
    <footer>Rodapé</footer>
  </body>
</html>"#;

    pub const PAGE_WITH_ARTICLE: &str = r#"<html>
  <body>
    <nav>Menu</nav>
    <article><h1>Cronograma</h1><p>As aulas começam em março.</p></article>
  </body>
</html>"#;

    pub const PAGE_BODY_ONLY: &str = r#"<html>
  <body>
    <header>Início</header>
    <div><p>O curso é gratuito.</p></div>
    <footer>Rodapé</footer>
  </body>
</html>"#;

    pub const REFERENCE_TEXT: &str =
        "Programa Jovem Programador\nAs inscrições são gratuitas.\nAs aulas são presenciais.";

    /// Context built from [`REFERENCE_TEXT`].
    pub fn test_context() -> ReferenceContext {
        ReferenceContext::new(REFERENCE_TEXT, None)
            .expect("fixture reference text is non-empty")
    }

    pub fn test_prompt() -> PromptSettings {
        PromptSettings::for_topic("Programa Jovem Programador")
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Rejected requests: any 4xx or 5xx.
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "request should have been rejected, got {}",
            status
        );
    }

    /// Handled requests, including model failures reported in `erro`.
    pub fn assert_success_status(status: StatusCode) {
        assert!(status.is_success(), "request should have been handled, got {}", status);
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_test_context() {
        let ctx = test_context();
        assert_eq!(ctx.as_str(), REFERENCE_TEXT);
    }

    #[test]
    fn test_fixtures_test_prompt() {
        let prompt = test_prompt();
        assert_eq!(prompt.topic, "Programa Jovem Programador");
        assert!(prompt.fallback_sentence.starts_with("Desculpe"));
    }
}
