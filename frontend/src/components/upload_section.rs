use super::super::{ImageSource, Model, Msg};
use super::utils::{debounce, extract_image_files, trigger_click};
use web_sys::{DragEvent, HtmlInputElement};
use yew::html::Scope;
use yew::prelude::*;

const FILE_INPUT_ID: &str = "file-input";
const CAMERA_INPUT_ID: &str = "camera-input";

pub fn render_upload_section(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    html! {
        <div class="upload-section">
            <h3>{"Capture Image from Camera"}</h3>
            { render_hidden_input(link, CAMERA_INPUT_ID, ImageSource::Camera) }
            <button
                id="camera-button"
                class="analyze-btn"
                onclick={debounce(300, {
                    let open_camera = trigger_click(CAMERA_INPUT_ID);
                    move || open_camera.emit(())
                })}
            >
                <i class="fa-solid fa-camera"></i> {" Take a picture"}
            </button>

            <h3>{"Upload Image for Detection"}</h3>
            { render_hidden_input(link, FILE_INPUT_ID, ImageSource::Upload) }
            { render_drop_zone(model, link) }
        </div>
    }
}

fn render_hidden_input(link: &Scope<Model>, id: &'static str, source: ImageSource) -> Html {
    let handle_change = link.callback(move |e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let files = input.files();
        let first_image = files
            .as_ref()
            .map(extract_image_files)
            .unwrap_or_default()
            .into_iter()
            .next();

        input.set_value("");

        match first_image {
            Some(file) => Msg::ImageSelected(file, source),
            None => Msg::SetError(Some("No valid image file selected.".into())),
        }
    });

    let capture = (source == ImageSource::Camera).then_some("environment");

    html! {
        <input
            type="file"
            id={id}
            accept="image/jpeg,image/png"
            capture={capture}
            style="display: none;"
            onchange={handle_change}
        />
    }
}

fn render_drop_zone(model: &Model, link: &Scope<Model>) -> Html {
    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);

    html! {
        <div
            id="drop-zone"
            class={classes!("upload-area", model.is_dragging.then_some("drag-over"))}
            ondragover={handle_drag_over}
            ondragleave={handle_drag_leave}
            ondrop={handle_drop}
            onclick={debounce(300, {
                let open_picker = trigger_click(FILE_INPUT_ID);
                move || open_picker.emit(())
            })}
        >
            <div class="upload-placeholder">
                <i class="fa-solid fa-cloud-arrow-up"></i>
                <p>{"Choose an Image: drag & drop here, paste, or click"}</p>
                <p class="file-types">{"Supported formats: JPG, JPEG, PNG"}</p>
            </div>
        </div>
    }
}
