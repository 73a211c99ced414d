use super::super::Model;
use yew::prelude::*;

pub fn render_results(model: &Model) -> Html {
    let Some(result) = &model.result else {
        return html! {};
    };

    let is_positive = result.label.is_positive();
    let confidence = result.confidence.0;

    html! {
        <div class={classes!("results-container", if is_positive { "smut-detected" } else { "smut-absent" })}>
            <div class="result-header">
                <p>
                    {"Model predicts: "}
                    <strong>{ &result.label_text }</strong>
                </p>
                <div class="confidence-meter">
                    <div class="meter-label">{"Confidence Level:"}</div>
                    <div class="meter">
                        <div class="meter-fill" style={format!("width: {}%", confidence)}></div>
                    </div>
                    <div class="meter-value"><strong>{ result.confidence.to_string() }</strong></div>
                </div>
            </div>
            <p class="muted" title={result.image_hash.clone()}>
                { format!("Raw score {:.4} (request {})", result.score, result.request_id) }
            </p>
        </div>
    }
}
