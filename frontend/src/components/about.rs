use super::super::Model;
use shared::ClassInfo;
use yew::prelude::*;

pub fn render_about_page(model: &Model) -> Html {
    let classes = model
        .model_info
        .as_ref()
        .map(|info| info.classes.clone())
        .unwrap_or_else(shared::classes);

    html! {
        <section class="about-page">
            <h1>{"About"}</h1>
            <h3>{"Dataset"}</h3>
            <p>
                {"This project focuses on detecting False Smut in paddy grains. \
                  The dataset consists of images categorized into two classes:"}
            </p>
            <ul>
                { for classes.iter().map(render_class) }
            </ul>
            <h3>{"Accuracy"}</h3>
            <p>
                {"The trained model achieved a classification accuracy of "}
                <strong>{"95%"}</strong>
                {" during testing on a validation dataset. This may vary depending on the quality of the input image."}
            </p>
            { render_model_details(model) }
        </section>
    }
}

fn render_class(class: &ClassInfo) -> Html {
    html! {
        <li key={class.key.to_string()}>
            <strong>{ &class.display_name }</strong>
            { format!(" ({}): {}", class.key, class.description) }
        </li>
    }
}

fn render_model_details(model: &Model) -> Html {
    match &model.model_info {
        Some(info) => html! {
            <p class="muted">
                { format!(
                    "Served by the {} backend. Images are resized to {}x{} with {} channel(s); scores at or above {} count as False Smut.",
                    info.backend, info.input_width, info.input_height, info.channels, info.threshold
                ) }
            </p>
        },
        None => html! {},
    }
}
