//! HTML pages
//!
//! - GET / - Welcome page
//! - GET /ui - Fetch form
//! - POST /ui - Form submission, re-renders the form with results

use axum::{
    Form, Router,
    extract::{State, rejection::FormRejection},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
};

use super::ImageForm;
use crate::AppState;
use crate::data::AnimalType;
use crate::error::AppError;

/// Create UI router
pub fn ui_router() -> Router<AppState> {
    Router::new()
        .route("/", get(welcome_page))
        .route("/ui", get(form_page).post(submit_form))
}

/// GET /
async fn welcome_page() -> Html<String> {
    Html(render_layout(
        "Animal Images",
        r#"<h1>Animal Images</h1>
  <p>Fetch random cat, dog and bear pictures and keep a record of every one.</p>
  <p><a href="/ui">Open the image form</a></p>"#,
    ))
}

/// GET /ui
async fn form_page() -> Html<String> {
    Html(render_form_page(&FormView::default()))
}

/// POST /ui
///
/// `action=fetch` fetches and stores new images; `action=last` shows the
/// most recently stored one. A type with no stored image yet renders an
/// empty result rather than an error. A form that doesn't deserialize is
/// re-rendered with the error like any other failure.
async fn submit_form(
    State(state): State<AppState>,
    form: Result<Form<ImageForm>, FormRejection>,
) -> impl IntoResponse {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            let (status, message) = AppError::from(rejection).report();
            let view = FormView {
                error: Some(message),
                ..FormView::default()
            };
            return (status, Html(render_form_page(&view)));
        }
    };

    let mut view = FormView {
        animal_type: form.animal_type.parse().ok(),
        amount: form.amount.clone().unwrap_or_default(),
        action: Some(form.action.clone()),
        ..FormView::default()
    };

    match run_action(&state, &form).await {
        Ok(image_urls) => {
            if image_urls.is_empty() {
                view.notice = Some(format!("No saved image for {} yet.", form.animal_type));
            }
            view.image_urls = image_urls;
            (StatusCode::OK, Html(render_form_page(&view)))
        }
        Err(error) => {
            let (status, message) = error.report();
            view.error = Some(message);
            (status, Html(render_form_page(&view)))
        }
    }
}

async fn run_action(state: &AppState, form: &ImageForm) -> Result<Vec<String>, AppError> {
    let animal_type: AnimalType = form.animal_type.parse()?;

    match form.action.as_str() {
        "fetch" => {
            let records = state.images.fetch(animal_type, form.amount()?).await?;
            Ok(records.into_iter().map(|record| record.image_url).collect())
        }
        "last" => match state.images.get_last(animal_type).await {
            Ok(record) => {
                tracing::info!(%animal_type, image_url = %record.image_url, "Showing last image");
                Ok(vec![record.image_url])
            }
            Err(AppError::NotFound) => Ok(Vec::new()),
            Err(error) => Err(error),
        },
        other => Err(AppError::Validation(format!(
            "Unknown action {other:?}; expected \"fetch\" or \"last\""
        ))),
    }
}

// =============================================================================
// Rendering
// =============================================================================

#[derive(Debug, Default)]
struct FormView {
    animal_type: Option<AnimalType>,
    amount: String,
    action: Option<String>,
    image_urls: Vec<String>,
    notice: Option<String>,
    error: Option<String>,
}

fn render_layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{}</title>
</head>
<body>
  {}
</body>
</html>"#,
        html_escape::encode_text(title),
        body
    )
}

fn render_form_page(view: &FormView) -> String {
    let options = AnimalType::ALL
        .iter()
        .map(|animal| {
            let selected = if view.animal_type == Some(*animal) {
                " selected"
            } else {
                ""
            };
            format!(r#"<option value="{animal}"{selected}>{animal}</option>"#)
        })
        .collect::<Vec<_>>()
        .join("\n      ");

    let amount: &str = if view.amount.is_empty() { "1" } else { &view.amount };

    let mut results = String::new();
    if let Some(error) = &view.error {
        results.push_str(&format!(
            "<p class=\"error\"><strong>Error:</strong> {}</p>\n",
            html_escape::encode_text(error)
        ));
    }
    if let Some(notice) = &view.notice {
        results.push_str(&format!("<p>{}</p>\n", html_escape::encode_text(notice)));
    }
    if !view.image_urls.is_empty() {
        let heading = match view.action.as_deref() {
            Some("last") => "Last saved image",
            _ => "Fetched images",
        };
        results.push_str(&format!("<h2>{heading}</h2>\n"));
        for url in &view.image_urls {
            let url = html_escape::encode_double_quoted_attribute(url);
            results.push_str(&format!(
                "<p><a href=\"{url}\"><img src=\"{url}\" alt=\"animal image\" width=\"400\" /></a></p>\n"
            ));
        }
    }

    let body = format!(
        r#"<h1>Animal Images</h1>
  <form method="post" action="/ui">
    <label>Animal
      <select name="animal_type">
      {options}
      </select>
    </label>
    <label>Amount
      <input type="number" name="amount" min="1" value="{amount}" />
    </label>
    <button type="submit" name="action" value="fetch">Fetch new</button>
    <button type="submit" name="action" value="last">Show last</button>
  </form>
  {results}"#,
        amount = html_escape::encode_double_quoted_attribute(amount),
    );

    render_layout("Animal Images", &body)
}
