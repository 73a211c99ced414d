use super::super::{ImageSource, Model, Msg, Page, SelectedImage};
use super::utils::extract_image_files;
use crate::api;
use gloo_file::{File as GlooFile, ObjectUrl};
use gloo_storage::{LocalStorage, Storage};
use shared::PredictionResponse;
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, DragEvent, FileList};
use yew::prelude::*;

const PAGE_STORAGE_KEY: &str = "false-smut.page";

pub fn restore_page() -> Page {
    let stored = LocalStorage::get::<String>(PAGE_STORAGE_KEY).ok();
    Page::from_stored(stored.as_deref())
}

pub fn handle_navigate(model: &mut Model, page: Page) -> bool {
    if model.page == page {
        return false;
    }
    model.page = page;
    model.error = None;

    if let Err(e) = LocalStorage::set(PAGE_STORAGE_KEY, page.key()) {
        log::warn!("Could not remember page selection: {}", e);
    }
    true
}

pub fn fetch_model_info(ctx: &Context<Model>) {
    let link = ctx.link().clone();
    spawn_local(async move {
        match api::fetch_model_info().await {
            Ok(info) => link.send_message(Msg::ModelInfoLoaded(info)),
            Err(e) => log::warn!("Could not load model info: {}", e),
        }
    });
}

pub fn handle_image_selected(
    model: &mut Model,
    ctx: &Context<Model>,
    file: GlooFile,
    source: ImageSource,
) -> bool {
    let preview_url = ObjectUrl::from(file.clone());
    model.image = Some(SelectedImage {
        file,
        preview_url,
        source,
    });
    model.result = None;
    model.error = None;
    model.requests.image_changed();

    // Captures are shown and classified straight away; uploads wait for the
    // "Predict" button.
    if source == ImageSource::Camera {
        model.show_preview = true;
        ctx.link().send_message(Msg::Predict);
    } else {
        model.show_preview = false;
    }
    true
}

pub fn handle_clear_image(model: &mut Model) -> bool {
    model.image = None;
    model.result = None;
    model.error = None;
    model.show_preview = false;
    model.requests.image_changed();
    true
}

pub fn handle_toggle_preview(model: &mut Model) -> bool {
    if model.image.is_none() {
        model.error = Some("Please upload an image to display.".into());
        return true;
    }
    model.show_preview = !model.show_preview;
    true
}

pub fn handle_predict(model: &mut Model, ctx: &Context<Model>) -> bool {
    let Some(image) = &model.image else {
        model.error = Some("Please upload an image to predict.".into());
        return true;
    };
    let Some(tag) = model.requests.begin() else {
        return false;
    };

    model.error = None;
    model.result = None;

    let file = image.file.clone();
    let link = ctx.link().clone();
    spawn_local(async move {
        match api::predict(&file).await {
            Ok(response) => link.send_message(Msg::PredictionResult(tag, response)),
            Err(error) => link.send_message(Msg::PredictionFailed(tag, error)),
        }
    });
    true
}

pub fn handle_prediction_result(
    model: &mut Model,
    ctx: &Context<Model>,
    tag: u64,
    response: PredictionResponse,
) -> bool {
    let done = model.requests.finish(tag);
    if done.apply {
        log::info!(
            "Prediction {}: {} ({})",
            response.request_id,
            response.label,
            response.confidence
        );
        model.result = Some(response);
    } else {
        log::debug!("Dropping prediction {} for a replaced image", response.request_id);
    }
    if done.run_queued {
        ctx.link().send_message(Msg::Predict);
    }
    true
}

pub fn handle_prediction_failed(
    model: &mut Model,
    ctx: &Context<Model>,
    tag: u64,
    error: String,
) -> bool {
    let done = model.requests.finish(tag);
    if done.apply {
        model.error = Some(error);
    } else {
        log::debug!("Dropping failed prediction for a replaced image: {}", error);
    }
    if done.run_queued {
        ctx.link().send_message(Msg::Predict);
    }
    true
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    if let Some(data_transfer) = event.data_transfer() {
        if let Some(file_list) = data_transfer.files() {
            process_file_list(ctx, file_list);
        }
    }
    true
}

pub fn handle_paste(_model: &mut Model, ctx: &Context<Model>, event: ClipboardEvent) -> bool {
    if let Some(data_transfer) = event.clipboard_data() {
        if let Some(file_list) = data_transfer.files() {
            if file_list.length() > 0 {
                event.prevent_default();
                process_file_list(ctx, file_list);
                return true;
            }
        }
    }
    false
}

fn process_file_list(ctx: &Context<Model>, file_list: FileList) {
    let skipped = file_list.length() as usize;
    match extract_image_files(&file_list).into_iter().next() {
        Some(file) => ctx
            .link()
            .send_message(Msg::ImageSelected(file, ImageSource::Upload)),
        None if skipped > 0 => {
            log::warn!("Skipping {} non-image file(s)", skipped);
            ctx.link()
                .send_message(Msg::SetError(Some("Please choose a JPG or PNG image.".into())));
        }
        None => {}
    }
}
