use crate::echoenv::environment::{EnvSource, ENVIRONMENT_VAR};
use axum::{
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Extension,
};
use std::fmt::Write;
use tracing::{debug, instrument};

#[utoipa::path(
    get,
    path = "/api/hello-world",
    responses(
        (status = 200, description = "Environment name followed by one line per request header"),
    ),
    tag = "hello-world",
)]
// axum handler for the hello-world echo
#[instrument(skip(env, headers))]
pub async fn hello_world(
    Extension(env): Extension<EnvSource>,
    headers: HeaderMap,
) -> impl IntoResponse {
    debug!(headers = headers.keys_len(), "echoing request headers");

    let environment = env.get(ENVIRONMENT_VAR).unwrap_or_default();

    // keys() yields each name once, get() the first value for that name
    let body = headers
        .keys()
        .fold(format!("Environment = {environment}\n"), |mut acc, name| {
            let value = headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default();
            writeln!(acc, "{name} = {value}").expect("Write failed");
            acc
        });

    (StatusCode::OK, body)
}

#[cfg(test)]
mod tests {
    use super::hello_world;
    use crate::echoenv::environment::EnvSource;
    use axum::{
        body::to_bytes,
        http::{HeaderMap, HeaderValue, StatusCode},
        response::IntoResponse,
        Extension,
    };

    async fn echo(env: EnvSource, headers: HeaderMap) -> (StatusCode, String) {
        let response = hello_world(Extension(env), headers).await.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn no_vars() -> EnvSource {
        let none: [(&str, &str); 0] = [];
        EnvSource::fixed(none)
    }

    #[tokio::test]
    async fn environment_line_leads_the_body() {
        let mut headers = HeaderMap::new();
        headers.insert("x-test", HeaderValue::from_static("abc"));

        let (status, body) = echo(EnvSource::fixed([("Environment", "prod")]), headers).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Environment = prod\nx-test = abc\n");
    }

    #[tokio::test]
    async fn unset_environment_renders_empty() {
        let (status, body) = echo(no_vars(), HeaderMap::new()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Environment = \n");
    }

    #[tokio::test]
    async fn one_line_per_header_plus_environment() {
        let mut headers = HeaderMap::new();
        headers.insert("accept", HeaderValue::from_static("text/html"));
        headers.insert("x-a", HeaderValue::from_static("1"));
        headers.insert("x-b", HeaderValue::from_static("2"));

        let (_, body) = echo(EnvSource::fixed([("Environment", "qa")]), headers).await;

        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Environment = qa");
        assert!(lines.contains(&"accept = text/html"));
        assert!(lines.contains(&"x-a = 1"));
        assert!(lines.contains(&"x-b = 2"));
    }

    #[tokio::test]
    async fn first_value_wins_for_repeated_headers() {
        let mut headers = HeaderMap::new();
        headers.append("accept", HeaderValue::from_static("text/html"));
        headers.append("accept", HeaderValue::from_static("application/json"));

        let (_, body) = echo(no_vars(), headers).await;

        assert_eq!(body, "Environment = \naccept = text/html\n");
    }

    #[tokio::test]
    async fn non_unicode_header_value_renders_empty() {
        let mut headers = HeaderMap::new();
        headers.insert("x-raw", HeaderValue::from_bytes(b"\xFF\xFE").unwrap());

        let (_, body) = echo(no_vars(), headers).await;

        assert_eq!(body, "Environment = \nx-raw = \n");
    }

    #[tokio::test]
    async fn repeated_request_yields_identical_body() {
        let mut headers = HeaderMap::new();
        headers.insert("x-test", HeaderValue::from_static("abc"));
        headers.insert("user-agent", HeaderValue::from_static("smoke/1.0"));

        let env = EnvSource::fixed([("Environment", "prod")]);
        let (_, first) = echo(env.clone(), headers.clone()).await;
        let (_, second) = echo(env, headers).await;

        assert_eq!(first, second);
    }
}
