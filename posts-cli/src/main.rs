use std::io::{self, BufRead, Write};
use std::process;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use posts_client::{HttpClient, PostId, PostsApi};
use posts_manager::{DELETE_PROMPT, Outcome, PostsManager, RefreshPolicy};
use tracing::debug;

mod interactive;
mod logging;
mod render;
mod settings;

use logging::init_logging;
use render::render_table;
use settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "posts-cli", version, about = "Управление постами через REST-ресурс Posts")]
struct Cli {
    /// Адрес сервера (по умолчанию POSTS_API_URL или http://localhost:8080).
    #[arg(long, global = true)]
    server: Option<String>,

    /// Перезагружать список после каждой успешной мутации.
    #[arg(long, global = true)]
    refetch: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Список постов, отфильтрованный сервером по заголовку.
    List {
        #[arg(long, default_value = "")]
        search: String,
        /// Вывести JSON вместо таблицы.
        #[arg(long)]
        json: bool,
    },
    /// Опубликовать или снять с публикации пост.
    Toggle {
        #[arg(long)]
        id: PostId,
        /// Не спрашивать подтверждение.
        #[arg(long)]
        yes: bool,
    },
    /// Создание поста со статусом Published.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        image: String,
        #[arg(long, value_parser = parse_date)]
        created_at: NaiveDate,
    },
    /// Удаление поста.
    Delete {
        #[arg(long)]
        id: PostId,
        /// Не спрашивать подтверждение.
        #[arg(long)]
        yes: bool,
    },
    /// Интерактивный экран управления постами.
    Screen,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let api_url = normalize_server(cli.server.unwrap_or(settings.api_url));
    let refresh = if cli.refetch {
        RefreshPolicy::Refetch
    } else {
        settings.refresh_policy
    };
    debug!(%api_url, %refresh, "starting posts-cli");

    let client = HttpClient::new(api_url, Duration::from_secs(settings.http_timeout_secs))
        .context("не удалось создать HTTP-клиент")?;
    let mut manager = PostsManager::new(client, refresh);

    match cli.command {
        Command::List { search, json } => {
            // пустой поиск совпадает с начальным, поэтому грузим через mount
            let outcome = if search.is_empty() {
                manager.mount().await
            } else {
                manager.search(search).await
            };
            expect_applied(outcome, &manager)?;
            if json {
                let raw = serde_json::to_string_pretty(manager.screen().posts())
                    .context("не удалось сериализовать список")?;
                println!("{raw}");
            } else {
                print!("{}", render_table(manager.screen().posts()));
            }
        }
        Command::Toggle { id, yes } => {
            expect_applied(manager.mount().await, &manager)?;
            if !manager.request_toggle(&id) {
                bail!("пост {id} не найден");
            }
            let prompt = manager
                .screen()
                .pending_toggle_prompt()
                .ok_or_else(|| anyhow!("диалог смены статуса не открыт"))?;
            if !yes && !confirm(prompt)? {
                manager.cancel_toggle();
                println!("Отменено");
                return Ok(());
            }
            expect_applied(manager.confirm_toggle().await, &manager)?;
            if let Some(post) = manager.screen().posts().iter().find(|post| post.id == id) {
                println!("Статус поста {id}: {}", post.status);
            }
        }
        Command::Create {
            title,
            image,
            created_at,
        } => {
            expect_applied(manager.mount().await, &manager)?;
            manager.open_add_form();
            manager.set_draft_title(title);
            manager.set_draft_image(image);
            manager.set_draft_created_at(Some(created_at));

            match manager.publish().await {
                Outcome::Applied => {}
                Outcome::Rejected => {
                    let reason = manager
                        .screen()
                        .form_error()
                        .map(|err| err.to_string())
                        .unwrap_or_else(|| "invalid draft".to_string());
                    bail!("некорректный пост: {reason}");
                }
                outcome => expect_applied(outcome, &manager)?,
            }
            if let Some(post) = manager.screen().posts().last() {
                println!("Пост создан: id={}, title={}", post.id, post.title);
            }
        }
        Command::Delete { id, yes } => {
            expect_applied(manager.mount().await, &manager)?;
            if !manager.request_delete(&id) {
                bail!("пост {id} не найден");
            }
            if !yes && !confirm(DELETE_PROMPT)? {
                manager.cancel_delete();
                println!("Отменено");
                return Ok(());
            }
            expect_applied(manager.confirm_delete().await, &manager)?;
            println!("Пост удалён: id={id}");
        }
        Command::Screen => interactive::run_screen(manager).await?,
    }

    Ok(())
}

fn expect_applied<A: PostsApi>(outcome: Outcome, manager: &PostsManager<A>) -> Result<()> {
    match outcome {
        Outcome::Applied => Ok(()),
        Outcome::Failed => Err(anyhow!(
            "{}",
            manager
                .screen()
                .notice()
                .unwrap_or("запрос к серверу не выполнен, подробности в логе")
                .to_string()
        )),
        Outcome::Rejected => Err(anyhow!("запрос отклонён валидацией")),
        Outcome::Idle => Err(anyhow!("нет действия для выполнения")),
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush().context("не удалось записать в stdout")?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("не удалось прочитать ответ")?;
    Ok(is_affirmative(&answer))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| format!("некорректная дата '{raw}', ожидается YYYY-MM-DD"))
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_server_keeps_scheme() {
        let s = normalize_server("https://example.com:8080".to_string());
        assert_eq!(s, "https://example.com:8080");
    }

    #[test]
    fn normalize_server_adds_http_scheme() {
        let s = normalize_server("127.0.0.1:8080".to_string());
        assert_eq!(s, "http://127.0.0.1:8080");
    }

    #[test]
    fn parse_date_accepts_iso_dates() {
        assert_eq!(
            parse_date(" 2024-12-31 "),
            Ok(NaiveDate::from_ymd_opt(2024, 12, 31).expect("valid date"))
        );
        assert!(parse_date("31.12.2024").is_err());
    }

    #[test]
    fn is_affirmative_accepts_yes_only() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative(" YES "));
        assert!(!is_affirmative("\n"));
        assert!(!is_affirmative("no"));
    }

    #[test]
    fn cli_parses_create_command() {
        let cli = Cli::try_parse_from([
            "posts-cli",
            "--server",
            "localhost:9000",
            "create",
            "--title",
            "T",
            "--image",
            "t.png",
            "--created-at",
            "2024-01-02",
        ])
        .expect("cli should parse");

        assert_eq!(cli.server.as_deref(), Some("localhost:9000"));
        match cli.command {
            Command::Create { title, created_at, .. } => {
                assert_eq!(title, "T");
                assert_eq!(
                    created_at,
                    NaiveDate::from_ymd_opt(2024, 1, 2).expect("valid date")
                );
            }
            other => panic!("expected create, got {other:?}"),
        }
    }

    #[test]
    fn cli_parses_toggle_id() {
        let cli = Cli::try_parse_from(["posts-cli", "toggle", "--id", "abc", "--yes"])
            .expect("cli should parse");
        match cli.command {
            Command::Toggle { id, yes } => {
                assert_eq!(id.as_str(), "abc");
                assert!(yes);
            }
            other => panic!("expected toggle, got {other:?}"),
        }
    }
}
