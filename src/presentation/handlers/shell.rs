use axum::response::Html;

const SHELL_PAGE: &str = include_str!("../../../static/index.html");

pub async fn shell_handler() -> Html<&'static str> {
    Html(SHELL_PAGE)
}
