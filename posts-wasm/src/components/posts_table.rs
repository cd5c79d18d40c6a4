use leptos::prelude::*;
use posts_client::{Post, PostStatus};

use crate::state::AppState;

fn status_class(status: PostStatus) -> &'static str {
    match status {
        PostStatus::Published => "status published",
        PostStatus::Unpublished => "status blocked",
    }
}

#[component]
pub(crate) fn PostsTable(state: AppState) -> impl IntoView {
    let rows = move || {
        state.screen.with(|screen| {
            screen
                .posts()
                .iter()
                .cloned()
                .enumerate()
                .collect::<Vec<(usize, Post)>>()
        })
    };

    view! {
        <div class="table-container">
            <table class="table table-hover">
                <thead>
                    <tr>
                        <th>"#"</th>
                        <th>"Title"</th>
                        <th>"Image"</th>
                        <th>"Created"</th>
                        <th>"Status"</th>
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=rows
                        key=|(index, post)| (*index, post.id.clone(), post.status)
                        children=move |(index, post)| {
                            let toggle_id = post.id.clone();
                            let delete_id = post.id.clone();
                            view! {
                                <tr>
                                    <td>{index + 1}</td>
                                    <td>{post.title.clone()}</td>
                                    <td>
                                        <img
                                            class="img-fluid"
                                            style="width: 150px; height: 80px;"
                                            src=post.image.clone()
                                            alt=post.title.clone()
                                        />
                                    </td>
                                    <td>{post.created_at.to_string()}</td>
                                    <td>
                                        <span class=status_class(post.status)>
                                            {post.status.label()}
                                        </span>
                                    </td>
                                    <td>
                                        <button
                                            class="btn btn-primary"
                                            disabled=move || state.loading.get()
                                            on:click=move |_| {
                                                state.screen.update(|screen| {
                                                    screen.begin_toggle(&toggle_id);
                                                });
                                            }
                                        >
                                            "Block"
                                        </button>
                                        <button
                                            class="btn btn-danger mx-2"
                                            disabled=move || state.loading.get()
                                            on:click=move |_| {
                                                state.screen.update(|screen| {
                                                    screen.begin_delete(&delete_id);
                                                });
                                            }
                                        >
                                            "Delete"
                                        </button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}
