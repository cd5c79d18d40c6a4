use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use posts_client::{NewPost, Post, PostId, PostStatus};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
/// Ошибки клиентской валидации черновика. Показываются прямо в форме.
pub enum DraftError {
    /// Одно из обязательных полей пустое.
    #[error("fields must not be empty")]
    EmptyFields,
    /// Среди загруженных постов уже есть такой заголовок.
    #[error("title must be unique")]
    DuplicateTitle,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Несохранённые поля нового поста.
pub struct Draft {
    /// Заголовок.
    pub title: String,
    /// Адрес или путь к изображению.
    pub image: String,
    /// Дата создания, `None` пока не выбрана.
    pub created_at: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Открытый диалог экрана. Одновременно открыт не больше одного.
pub enum Dialog {
    /// Диалогов нет, виден только список.
    #[default]
    None,
    /// Подтверждение смены статуса поста.
    ConfirmToggle(Post),
    /// Форма добавления поста.
    AddForm,
    /// Подтверждение очистки формы (поверх формы добавления).
    ConfirmReset,
    /// Подтверждение удаления поста.
    ConfirmDelete(Post),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Как согласовывать локальный список после успешной мутации.
pub enum RefreshPolicy {
    /// Подставить ответ сервера в локальный список.
    #[default]
    PatchLocal,
    /// Перезагрузить список по текущему поиску.
    Refetch,
}

impl FromStr for RefreshPolicy {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "patch" | "patch-local" => Ok(Self::PatchLocal),
            "refetch" => Ok(Self::Refetch),
            other => Err(format!(
                "unknown refresh policy '{other}', expecting 'patch' or 'refetch'"
            )),
        }
    }
}

impl fmt::Display for RefreshPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PatchLocal => f.write_str("patch"),
            Self::Refetch => f.write_str("refetch"),
        }
    }
}

/// Текст подтверждения смены статуса для поста с текущим статусом `status`.
pub fn toggle_prompt(status: PostStatus) -> &'static str {
    match status {
        PostStatus::Unpublished => "Are you sure you want to publish this post?",
        PostStatus::Published => "Are you sure you want to stop publishing this post?",
    }
}

/// Текст подтверждения очистки формы.
pub const RESET_PROMPT: &str = "Are you sure you want to clear all fields?";

/// Текст подтверждения удаления.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this post?";

/// Состояние экрана управления постами без ввода-вывода.
///
/// Методы `begin_*`/`cancel_*` только двигают диалоги; методы `apply_*`
/// применяют успешный ответ сервера; `fail_toggle` фиксирует сбой смены статуса.
#[derive(Debug, Clone, Default)]
pub struct PostsScreen {
    posts: Vec<Post>,
    search: String,
    dialog: Dialog,
    draft: Draft,
    form_error: Option<DraftError>,
    notice: Option<String>,
}

impl PostsScreen {
    /// Пустой экран: список не загружен, диалогов нет.
    pub fn new() -> Self {
        Self::default()
    }

    /// Последний загруженный список.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Текущая строка поиска.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Открытый диалог.
    pub fn dialog(&self) -> &Dialog {
        &self.dialog
    }

    /// Черновик формы добавления.
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Ошибка валидации, показанная в форме.
    pub fn form_error(&self) -> Option<DraftError> {
        self.form_error
    }

    /// Сообщение о неудачной смене статуса. Остальные сбои сети только
    /// пишутся в лог и сюда не попадают.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Убирает сообщение перед следующим действием.
    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Меняет строку поиска. Возвращает `true`, если она изменилась и список
    /// нужно перезагрузить.
    pub fn set_search(&mut self, search: impl Into<String>) -> bool {
        let search = search.into();
        if search == self.search {
            return false;
        }
        self.search = search;
        true
    }

    /// Полностью заменяет список ответом сервера, без повторной фильтрации.
    pub fn replace_posts(&mut self, posts: Vec<Post>) {
        self.posts = posts;
    }

    fn find(&self, id: &PostId) -> Option<&Post> {
        self.posts.iter().find(|post| &post.id == id)
    }

    /// Открывает подтверждение смены статуса для поста из текущего списка.
    pub fn begin_toggle(&mut self, id: &PostId) -> bool {
        let Some(post) = self.find(id).cloned() else {
            return false;
        };
        self.dialog = Dialog::ConfirmToggle(post);
        true
    }

    /// Цель и новый статус, если открыт диалог смены статуса.
    pub fn pending_toggle(&self) -> Option<(PostId, PostStatus)> {
        match &self.dialog {
            Dialog::ConfirmToggle(post) => Some((post.id.clone(), post.status.toggled())),
            _ => None,
        }
    }

    /// Текст вопроса в открытом диалоге смены статуса.
    pub fn pending_toggle_prompt(&self) -> Option<&'static str> {
        match &self.dialog {
            Dialog::ConfirmToggle(post) => Some(toggle_prompt(post.status)),
            _ => None,
        }
    }

    /// Закрывает подтверждение смены статуса без запроса.
    pub fn cancel_toggle(&mut self) {
        if matches!(self.dialog, Dialog::ConfirmToggle(_)) {
            self.dialog = Dialog::None;
        }
    }

    /// Подставляет обновлённый пост в список (по `id`) и закрывает диалог
    /// смены статуса этого поста.
    pub fn apply_status(&mut self, updated: Post) {
        if matches!(&self.dialog, Dialog::ConfirmToggle(target) if target.id == updated.id) {
            self.dialog = Dialog::None;
        }
        if let Some(post) = self.posts.iter_mut().find(|post| post.id == updated.id) {
            *post = updated;
        }
    }

    /// Сбой смены статуса: диалог закрывается, список не меняется.
    pub fn fail_toggle(&mut self, message: impl Into<String>) {
        self.cancel_toggle();
        self.notice = Some(message.into());
    }

    /// Открывает форму добавления. Черновик сохраняется с прошлого раза.
    pub fn open_add_form(&mut self) {
        self.dialog = Dialog::AddForm;
    }

    /// Закрывает форму (и подтверждение очистки над ней), черновик остаётся.
    pub fn close_add_form(&mut self) {
        if matches!(self.dialog, Dialog::AddForm | Dialog::ConfirmReset) {
            self.dialog = Dialog::None;
        }
    }

    /// Поле «заголовок» черновика.
    pub fn set_draft_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    /// Поле «изображение» черновика.
    pub fn set_draft_image(&mut self, image: impl Into<String>) {
        self.draft.image = image.into();
    }

    /// Дата создания черновика, `None` сбрасывает выбор.
    pub fn set_draft_created_at(&mut self, created_at: Option<NaiveDate>) {
        self.draft.created_at = created_at;
    }

    /// Открывает подтверждение очистки формы.
    pub fn request_reset(&mut self) {
        if matches!(self.dialog, Dialog::AddForm) {
            self.dialog = Dialog::ConfirmReset;
        }
    }

    /// Возвращает к форме, черновик не трогает.
    pub fn cancel_reset(&mut self) {
        if matches!(self.dialog, Dialog::ConfirmReset) {
            self.dialog = Dialog::AddForm;
        }
    }

    /// Очищает черновик и возвращает к форме.
    pub fn confirm_reset(&mut self) {
        if matches!(self.dialog, Dialog::ConfirmReset) {
            self.draft = Draft::default();
            self.dialog = Dialog::AddForm;
        }
    }

    /// Проверяет черновик: сначала пустые поля, затем уникальность заголовка
    /// среди загруженных постов. Ошибка сохраняется для показа в форме.
    pub fn validate_draft(&mut self) -> Result<NewPost, DraftError> {
        self.form_error = None;

        let result = validate_draft(&self.draft, &self.posts);
        if let Err(err) = result {
            self.form_error = Some(err);
        }
        result
    }

    /// Добавляет созданный пост в конец списка, закрывает форму и очищает
    /// черновик.
    pub fn apply_created(&mut self, created: Post) {
        self.posts.push(created);
        self.close_add_form();
        self.draft = Draft::default();
        self.form_error = None;
    }

    /// Открывает подтверждение удаления для поста из текущего списка.
    pub fn begin_delete(&mut self, id: &PostId) -> bool {
        let Some(post) = self.find(id).cloned() else {
            return false;
        };
        self.dialog = Dialog::ConfirmDelete(post);
        true
    }

    /// Цель удаления, если открыт диалог удаления.
    pub fn pending_delete(&self) -> Option<PostId> {
        match &self.dialog {
            Dialog::ConfirmDelete(post) => Some(post.id.clone()),
            _ => None,
        }
    }

    /// Закрывает подтверждение удаления без запроса. Так же закрывается
    /// диалог после неудачного удаления.
    pub fn cancel_delete(&mut self) {
        if matches!(self.dialog, Dialog::ConfirmDelete(_)) {
            self.dialog = Dialog::None;
        }
    }

    /// Убирает пост с `id` из списка и закрывает его диалог удаления.
    /// Возвращает число удалённых строк.
    pub fn apply_deleted(&mut self, id: &PostId) -> usize {
        if matches!(&self.dialog, Dialog::ConfirmDelete(target) if &target.id == id) {
            self.dialog = Dialog::None;
        }
        let before = self.posts.len();
        self.posts.retain(|post| &post.id != id);
        before - self.posts.len()
    }
}

/// Место, где живёт `PostsScreen`, пока `PostsManager` ждёт ответы сервера.
///
/// В CLI экран принадлежит менеджеру, в браузере лежит в реактивном сигнале.
pub trait ScreenStore {
    /// Читает состояние экрана.
    fn read<R>(&self, f: impl FnOnce(&PostsScreen) -> R) -> R;

    /// Меняет состояние экрана.
    fn write<R>(&mut self, f: impl FnOnce(&mut PostsScreen) -> R) -> R;
}

impl ScreenStore for PostsScreen {
    fn read<R>(&self, f: impl FnOnce(&PostsScreen) -> R) -> R {
        f(self)
    }

    fn write<R>(&mut self, f: impl FnOnce(&mut PostsScreen) -> R) -> R {
        f(self)
    }
}

fn validate_draft(draft: &Draft, loaded: &[Post]) -> Result<NewPost, DraftError> {
    let title = draft.title.trim();
    let image = draft.image.trim();
    let Some(created_at) = draft.created_at else {
        return Err(DraftError::EmptyFields);
    };
    if title.is_empty() || image.is_empty() {
        return Err(DraftError::EmptyFields);
    }

    if loaded.iter().any(|post| post.title == title) {
        return Err(DraftError::DuplicateTitle);
    }

    Ok(NewPost {
        title: title.to_string(),
        image: image.to_string(),
        created_at,
        status: PostStatus::Published,
    })
}
