use chrono::NaiveDate;
use posts_client::{PostId, PostsApi};
use tracing::{error, info, warn};

use crate::screen::{PostsScreen, RefreshPolicy, ScreenStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Чем закончилось действие пользователя.
pub enum Outcome {
    /// Запрос выполнен, состояние экрана согласовано с ответом.
    Applied,
    /// Черновик не прошёл валидацию, запрос не отправлялся.
    Rejected,
    /// Запрос завершился ошибкой, она записана в лог.
    Failed,
    /// Нечего делать: поиск не изменился или нужный диалог не открыт.
    Idle,
}

/// Экран управления постами, подключённый к `PostsApi`.
///
/// Каждое действие ждёт свой запрос до конца, поэтому ответы применяются в
/// порядке действий. Сбои сети пишутся в лог; на экран попадает только сбой
/// смены статуса.
pub struct PostsManager<A, S = PostsScreen> {
    api: A,
    screen: S,
    refresh: RefreshPolicy,
}

impl<A: PostsApi> PostsManager<A> {
    /// Менеджер с собственным пустым экраном.
    pub fn new(api: A, refresh: RefreshPolicy) -> Self {
        Self::with_store(api, PostsScreen::new(), refresh)
    }

    /// Текущее состояние экрана.
    pub fn screen(&self) -> &PostsScreen {
        &self.screen
    }
}

impl<A: PostsApi, S: ScreenStore> PostsManager<A, S> {
    /// Менеджер поверх экрана, который хранится снаружи (например, в сигнале UI).
    pub fn with_store(api: A, screen: S, refresh: RefreshPolicy) -> Self {
        Self {
            api,
            screen,
            refresh,
        }
    }

    /// Первая загрузка списка с пустым поиском.
    pub async fn mount(&mut self) -> Outcome {
        self.load().await
    }

    /// Перезагружает список по текущей строке поиска.
    ///
    /// При ошибке остаётся прежний список.
    pub async fn load(&mut self) -> Outcome {
        let search = self.screen.read(|screen| screen.search().to_string());
        match self.api.list_posts(&search).await {
            Ok(posts) => {
                self.screen.write(|screen| screen.replace_posts(posts));
                Outcome::Applied
            }
            Err(err) => {
                error!(error = %err, search = %search, "failed to load posts");
                Outcome::Failed
            }
        }
    }

    /// Меняет строку поиска и, если она изменилась, перезагружает список.
    pub async fn search(&mut self, search: impl Into<String>) -> Outcome {
        if !self.screen.write(|screen| screen.set_search(search)) {
            return Outcome::Idle;
        }
        self.load().await
    }

    /// Открывает подтверждение смены статуса. `false`, если поста нет в списке.
    pub fn request_toggle(&mut self, id: &PostId) -> bool {
        let found = self.screen.write(|screen| screen.begin_toggle(id));
        if !found {
            warn!(%id, "toggle requested for post outside of the loaded list");
        }
        found
    }

    /// Закрывает подтверждение смены статуса без запроса.
    pub fn cancel_toggle(&mut self) {
        self.screen.write(PostsScreen::cancel_toggle);
    }

    /// Отправляет `PATCH` с перевёрнутым статусом выбранного поста.
    pub async fn confirm_toggle(&mut self) -> Outcome {
        let Some((id, status)) = self.screen.read(PostsScreen::pending_toggle) else {
            return Outcome::Idle;
        };

        match self.api.update_status(&id, status).await {
            Ok(updated) => {
                info!(%id, %status, "post status updated");
                self.screen.write(|screen| screen.apply_status(updated));
                self.after_mutation().await;
                Outcome::Applied
            }
            Err(err) => {
                error!(error = %err, %id, "failed to update post status");
                self.screen.write(|screen| {
                    screen.fail_toggle(format!("failed to update post {id}: {err}"))
                });
                Outcome::Failed
            }
        }
    }

    /// Открывает форму добавления.
    pub fn open_add_form(&mut self) {
        self.screen.write(PostsScreen::open_add_form);
    }

    /// Закрывает форму добавления, черновик остаётся.
    pub fn close_add_form(&mut self) {
        self.screen.write(PostsScreen::close_add_form);
    }

    /// Поле «заголовок» черновика.
    pub fn set_draft_title(&mut self, title: impl Into<String>) {
        self.screen.write(|screen| screen.set_draft_title(title));
    }

    /// Поле «изображение» черновика.
    pub fn set_draft_image(&mut self, image: impl Into<String>) {
        self.screen.write(|screen| screen.set_draft_image(image));
    }

    /// Дата создания черновика.
    pub fn set_draft_created_at(&mut self, created_at: Option<NaiveDate>) {
        self.screen
            .write(|screen| screen.set_draft_created_at(created_at));
    }

    /// Открывает подтверждение очистки формы.
    pub fn request_reset(&mut self) {
        self.screen.write(PostsScreen::request_reset);
    }

    /// Возвращает к форме без очистки.
    pub fn cancel_reset(&mut self) {
        self.screen.write(PostsScreen::cancel_reset);
    }

    /// Очищает черновик и возвращает к форме.
    pub fn confirm_reset(&mut self) {
        self.screen.write(PostsScreen::confirm_reset);
    }

    /// Проверяет черновик и создаёт пост со статусом `Published`.
    ///
    /// При сбое сервера форма и черновик остаются как были.
    pub async fn publish(&mut self) -> Outcome {
        let new_post = match self.screen.write(PostsScreen::validate_draft) {
            Ok(new_post) => new_post,
            Err(err) => {
                info!(error = %err, "draft rejected");
                return Outcome::Rejected;
            }
        };

        match self.api.create_post(&new_post).await {
            Ok(created) => {
                info!(id = %created.id, title = %created.title, "post created");
                self.screen.write(|screen| screen.apply_created(created));
                self.after_mutation().await;
                Outcome::Applied
            }
            Err(err) => {
                error!(error = %err, title = %new_post.title, "failed to create post");
                Outcome::Failed
            }
        }
    }

    /// Открывает подтверждение удаления. `false`, если поста нет в списке.
    pub fn request_delete(&mut self, id: &PostId) -> bool {
        let found = self.screen.write(|screen| screen.begin_delete(id));
        if !found {
            warn!(%id, "delete requested for post outside of the loaded list");
        }
        found
    }

    /// Закрывает подтверждение удаления без запроса.
    pub fn cancel_delete(&mut self) {
        self.screen.write(PostsScreen::cancel_delete);
    }

    /// Отправляет `DELETE` для выбранного поста.
    ///
    /// При сбое диалог закрывается, список не меняется.
    pub async fn confirm_delete(&mut self) -> Outcome {
        let Some(id) = self.screen.read(PostsScreen::pending_delete) else {
            return Outcome::Idle;
        };

        match self.api.delete_post(&id).await {
            Ok(()) => {
                info!(%id, "post deleted");
                self.screen.write(|screen| screen.apply_deleted(&id));
                self.after_mutation().await;
                Outcome::Applied
            }
            Err(err) => {
                error!(error = %err, %id, "failed to delete post");
                self.screen.write(PostsScreen::cancel_delete);
                Outcome::Failed
            }
        }
    }

    /// Убирает сообщение о прошлом сбое.
    pub fn clear_notice(&mut self) {
        self.screen.write(PostsScreen::clear_notice);
    }

    async fn after_mutation(&mut self) {
        if self.refresh == RefreshPolicy::Refetch {
            self.load().await;
        }
    }
}
