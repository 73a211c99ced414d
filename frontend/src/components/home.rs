use super::super::{Model, Msg, Page};
use yew::prelude::*;

const HOME_IMAGE_URL: &str = "/assets/home_page.jpeg";

pub fn render_home_page(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    html! {
        <section class="home-page">
            <h1>{"FALSE SMUT DISEASE DETECTOR"}</h1>
            {
                if model.home_image_missing {
                    html! { <p class="muted">{"Home page image not found."}</p> }
                } else {
                    html! {
                        <img
                            class="home-image"
                            src={HOME_IMAGE_URL}
                            alt="Paddy field"
                            onerror={link.callback(|_: Event| Msg::HomeImageMissing)}
                        />
                    }
                }
            }
            <p>{"Welcome to the False Smut Detection System! 🌾🔍"}</p>
            <h3>{"Get Started"}</h3>
            <p>
                {"Open the "}
                <a href="#" onclick={link.callback(|e: MouseEvent| {
                    e.prevent_default();
                    Msg::Navigate(Page::DiseaseRecognition)
                })}>
                    <strong>{"Disease Recognition"}</strong>
                </a>
                {" page to upload an image or use your camera to detect False Smut in paddy grains."}
            </p>
        </section>
    }
}
