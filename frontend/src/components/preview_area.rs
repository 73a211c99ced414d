use super::super::{ImageSource, Model, Msg};
use super::utils::debounce;
use yew::prelude::*;

pub fn render_preview_area(model: &Model, ctx: &Context<Model>) -> Html {
    let Some(image) = &model.image else {
        return html! {};
    };

    let link = ctx.link().clone();
    let caption = match image.source {
        ImageSource::Camera => "Captured Image".to_string(),
        ImageSource::Upload => image.file.name(),
    };

    html! {
        <div id="preview-container">
            {
                if model.show_preview {
                    html! {
                        <figure>
                            <img id="actual-image-preview"
                                src={image.preview_url.to_string()}
                                alt={caption.clone()}
                                style="max-width:100%; max-height: 400px; object-fit: contain; margin-bottom: 10px;" />
                            <figcaption>{ &caption }</figcaption>
                        </figure>
                    }
                } else {
                    html! { <p class="selected-file">{ format!("Selected: {}", caption) }</p> }
                }
            }
            <div class="button-container">
                <button
                    class="analyze-btn"
                    onclick={link.callback(|_| Msg::TogglePreview)}
                >
                    <i class="fa-solid fa-image"></i>
                    { if model.show_preview { " Hide Image" } else { " Show Image" } }
                </button>
                <button
                    id="clear-btn"
                    class="analyze-btn"
                    style="background-color: var(--clear-color);"
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::ClearImage)
                    })}
                >
                    <i class="fa-solid fa-trash"></i>{" Clear"}
                </button>
                <button
                    class="analyze-btn"
                    style="background-color: var(--primary-color);"
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::Predict)
                    })}
                    disabled={model.requests.is_loading()}
                >
                    { render_predict_button_content(model) }
                </button>
            </div>
        </div>
    }
}

fn render_predict_button_content(model: &Model) -> Html {
    if model.requests.is_loading() {
        html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Please Wait..."}</> }
    } else {
        html! { <><i class="fa-solid fa-magnifying-glass"></i>{" Predict"}</> }
    }
}
