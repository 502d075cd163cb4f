use std::{env, time::Duration};

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use refchat_server::client::{ApiClient, Speaker, Transcript, DEFAULT_API_URL};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let url = env::var("CHAT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let client = ApiClient::new(url.as_str(), REQUEST_TIMEOUT)?;
    log::info!("Using chat API at {}", url);

    let mut transcript = Transcript::with_welcome();
    let mut stdout = tokio::io::stdout();
    if let Some((_, welcome)) = transcript.entries().first() {
        stdout.write_all(format!("🤖 {}\n", welcome).as_bytes()).await?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all("Qual sua dúvida? > ".as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let pergunta = line.trim();
        if pergunta.is_empty() {
            continue;
        }

        transcript.push(Speaker::User, pergunta);
        stdout.write_all("Pensando...\n".as_bytes()).await?;
        let resposta = client.ask(pergunta).await;
        stdout.write_all(format!("🤖 {}\n", resposta).as_bytes()).await?;
        transcript.push(Speaker::Assistant, resposta);
    }

    log::info!("Session ended after {} messages", transcript.entries().len());
    Ok(())
}
