use super::super::{Model, Msg, Page};
use yew::prelude::*;

/// Renders the Disease Recognition page header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-seedling"></i> {" Disease Recognition"}</h1>
            <p class="subtitle">{"Upload, drop, paste or capture a photo of paddy grains"}</p>
        </header>
    }
}

pub fn render_sidebar(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    html! {
        <nav class="sidebar">
            <h2 class="sidebar-title">{"Dashboard"}</h2>
            <p class="sidebar-label">{"Select Page"}</p>
            <ul class="page-list">
                { for Page::ALL.into_iter().map(|page| {
                    let is_active = model.page == page;
                    html! {
                        <li key={page.key()}>
                            <button
                                class={classes!("nav-btn", is_active.then_some("active"))}
                                onclick={link.callback(move |_| Msg::Navigate(page))}
                            >
                                { page.title() }
                            </button>
                        </li>
                    }
                })}
            </ul>
        </nav>
    }
}
