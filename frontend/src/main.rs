mod api;
mod components;
mod tracker;

use components::about::render_about_page;
use components::handlers;
use components::header::{render_header, render_sidebar};
use components::home::render_home_page;
use components::preview_area::render_preview_area;
use components::results::render_results;
use components::upload_section::render_upload_section;
use components::utils::render_error_message;
use gloo_events::EventListener;
use gloo_file::{File as GlooFile, ObjectUrl};
use shared::{ModelInfo, PredictionResponse};
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, DragEvent};
use tracker::PredictionTracker;
use yew::prelude::*;

// Models
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Home,
    About,
    DiseaseRecognition,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::About, Page::DiseaseRecognition];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::About => "About",
            Page::DiseaseRecognition => "Disease Recognition",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::About => "about",
            Page::DiseaseRecognition => "recognition",
        }
    }

    pub fn from_key(key: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|page| page.key() == key)
    }

    /// Page to open given the remembered key, if any.
    pub fn from_stored(stored: Option<&str>) -> Page {
        stored.and_then(Page::from_key).unwrap_or(Page::Home)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageSource {
    Upload,
    Camera,
}

#[derive(Clone)]
pub struct SelectedImage {
    pub file: GlooFile,
    pub preview_url: ObjectUrl,
    pub source: ImageSource,
}

// Yew msg components
pub enum Msg {
    // Navigation
    Navigate(Page),
    ModelInfoLoaded(ModelInfo),
    HomeImageMissing,

    // Image operations
    ImageSelected(GlooFile, ImageSource),
    ClearImage,
    TogglePreview,

    // Prediction
    Predict,
    PredictionResult(u64, PredictionResponse),
    PredictionFailed(u64, String),

    // UI states
    SetError(Option<String>),
    SetDragging(bool),

    // Input events
    HandleDrop(DragEvent),
    HandlePaste(ClipboardEvent),
}

// Main component
pub struct Model {
    pub page: Page,
    pub image: Option<SelectedImage>,
    pub show_preview: bool,
    pub result: Option<PredictionResponse>,
    pub model_info: Option<ModelInfo>,
    pub home_image_missing: bool,
    pub requests: PredictionTracker,
    pub error: Option<String>,
    pub is_dragging: bool,
    paste_listener: Option<EventListener>,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let mut model = Self {
            page: handlers::restore_page(),
            image: None,
            show_preview: false,
            result: None,
            model_info: None,
            home_image_missing: false,
            requests: PredictionTracker::default(),
            error: None,
            is_dragging: false,
            paste_listener: None,
        };

        let link = ctx.link().clone();
        if let Some(window) = web_sys::window() {
            let listener = EventListener::new(&window, "paste", move |event| {
                if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                    link.send_message(Msg::HandlePaste(clipboard_event.clone()));
                }
            });
            model.paste_listener = Some(listener);
        }

        handlers::fetch_model_info(ctx);

        model
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Navigate(page) => handlers::handle_navigate(self, page),
            Msg::ModelInfoLoaded(info) => {
                self.model_info = Some(info);
                true
            }
            Msg::HomeImageMissing => {
                self.home_image_missing = true;
                true
            }

            Msg::ImageSelected(file, source) => {
                handlers::handle_image_selected(self, ctx, file, source)
            }
            Msg::ClearImage => handlers::handle_clear_image(self),
            Msg::TogglePreview => handlers::handle_toggle_preview(self),

            Msg::Predict => handlers::handle_predict(self, ctx),
            Msg::PredictionResult(tag, response) => {
                handlers::handle_prediction_result(self, ctx, tag, response)
            }
            Msg::PredictionFailed(tag, error) => {
                handlers::handle_prediction_failed(self, ctx, tag, error)
            }

            Msg::SetError(error) => {
                self.error = error;
                true
            }
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }

            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
            Msg::HandlePaste(event) => handlers::handle_paste(self, ctx, event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="layout">
                { render_sidebar(self, ctx) }
                <div class="container">
                    <main class="main-content">
                    {
                        match self.page {
                            Page::Home => render_home_page(self, ctx),
                            Page::About => render_about_page(self),
                            Page::DiseaseRecognition => html! {
                                <>
                                    { render_header() }
                                    { render_upload_section(self, ctx) }
                                    { render_preview_area(self, ctx) }
                                    { render_error_message(self) }
                                    { render_results(self) }
                                </>
                            },
                        }
                    }
                    </main>

                    <footer class="app-footer">
                        <p>{"False Smut Detection System | Fullstack Rust WASM"}</p>
                    </footer>
                </div>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
