use anyhow::{Context, Result};
use chrono::NaiveDate;
use posts_client::{PostId, PostsApi};
use posts_manager::{Dialog, PostsManager};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::render::render_screen;

const HELP: &str = "\
Команды:
  search <текст>      поиск по заголовку (пустой текст сбрасывает поиск)
  refresh             перезагрузить список
  toggle <id>         опубликовать / снять с публикации
  delete <id>         удалить пост
  add                 открыть форму нового поста
  title <текст>       заголовок черновика
  image <текст>       изображение черновика
  date <YYYY-MM-DD>   дата создания черновика
  publish             отправить черновик
  reset               очистить черновик
  close               закрыть форму
  yes | no            ответить на подтверждение
  help                эта справка
  quit                выход";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ScreenCommand {
    Search(String),
    Refresh,
    Toggle(PostId),
    Delete(PostId),
    Add,
    Title(String),
    Image(String),
    Date(NaiveDate),
    Publish,
    Reset,
    Close,
    Yes,
    No,
    Help,
    Quit,
}

pub(crate) fn parse_command(line: &str) -> Result<ScreenCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "search" | "s" => ScreenCommand::Search(rest.to_string()),
        "refresh" | "r" => ScreenCommand::Refresh,
        "toggle" | "block" => ScreenCommand::Toggle(rest.parse()?),
        "delete" | "rm" => ScreenCommand::Delete(rest.parse()?),
        "add" | "new" => ScreenCommand::Add,
        "title" => ScreenCommand::Title(rest.to_string()),
        "image" => ScreenCommand::Image(rest.to_string()),
        "date" => ScreenCommand::Date(
            NaiveDate::parse_from_str(rest, "%Y-%m-%d")
                .map_err(|_| format!("некорректная дата '{rest}', ожидается YYYY-MM-DD"))?,
        ),
        "publish" => ScreenCommand::Publish,
        "reset" => ScreenCommand::Reset,
        "close" => ScreenCommand::Close,
        "yes" | "y" => ScreenCommand::Yes,
        "no" | "n" => ScreenCommand::No,
        "help" | "?" => ScreenCommand::Help,
        "quit" | "exit" | "q" => ScreenCommand::Quit,
        "" => return Err("пустая команда".to_string()),
        other => return Err(format!("неизвестная команда '{other}', см. help")),
    };
    Ok(command)
}

/// Выполняет команду. Возвращает `false`, когда пора выходить.
pub(crate) async fn dispatch<A: PostsApi>(
    manager: &mut PostsManager<A>,
    command: ScreenCommand,
) -> Result<bool, String> {
    manager.clear_notice();

    match command {
        ScreenCommand::Search(search) => {
            manager.search(search).await;
        }
        ScreenCommand::Refresh => {
            manager.load().await;
        }
        ScreenCommand::Toggle(id) => {
            if !manager.request_toggle(&id) {
                return Err(format!("пост {id} не найден в текущем списке"));
            }
        }
        ScreenCommand::Delete(id) => {
            if !manager.request_delete(&id) {
                return Err(format!("пост {id} не найден в текущем списке"));
            }
        }
        ScreenCommand::Add => manager.open_add_form(),
        ScreenCommand::Title(title) => manager.set_draft_title(title),
        ScreenCommand::Image(image) => manager.set_draft_image(image),
        ScreenCommand::Date(date) => manager.set_draft_created_at(Some(date)),
        ScreenCommand::Publish => {
            if !matches!(manager.screen().dialog(), Dialog::AddForm) {
                return Err("форма добавления не открыта, сначала add".to_string());
            }
            manager.publish().await;
        }
        ScreenCommand::Reset => manager.request_reset(),
        ScreenCommand::Close => manager.close_add_form(),
        ScreenCommand::Yes => match manager.screen().dialog().clone() {
            Dialog::ConfirmToggle(_) => {
                manager.confirm_toggle().await;
            }
            Dialog::ConfirmDelete(_) => {
                manager.confirm_delete().await;
            }
            Dialog::ConfirmReset => manager.confirm_reset(),
            Dialog::None | Dialog::AddForm => return Err("нечего подтверждать".to_string()),
        },
        ScreenCommand::No => match manager.screen().dialog().clone() {
            Dialog::ConfirmToggle(_) => manager.cancel_toggle(),
            Dialog::ConfirmDelete(_) => manager.cancel_delete(),
            Dialog::ConfirmReset => manager.cancel_reset(),
            Dialog::None | Dialog::AddForm => return Err("нечего отменять".to_string()),
        },
        ScreenCommand::Help => println!("{HELP}"),
        ScreenCommand::Quit => return Ok(false),
    }
    Ok(true)
}

/// Интерактивный экран: читает команды из stdin и перерисовывает экран.
pub(crate) async fn run_screen<A: PostsApi>(mut manager: PostsManager<A>) -> Result<()> {
    manager.mount().await;
    print!("{}", render_screen(manager.screen()));
    println!("(help: список команд)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    loop {
        stdout
            .write_all(b"> ")
            .await
            .context("не удалось записать в stdout")?;
        stdout.flush().await.context("не удалось записать в stdout")?;

        let Some(line) = lines
            .next_line()
            .await
            .context("не удалось прочитать stdin")?
        else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };
        let redraw = !matches!(command, ScreenCommand::Help);

        match dispatch(&mut manager, command).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(message) => {
                println!("{message}");
                continue;
            }
        }
        if redraw {
            print!("{}", render_screen(manager.screen()));
        }
    }
    Ok(())
}
