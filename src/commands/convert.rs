use crate::commands::Session;
use crate::models::ConversionForm;
use crate::services::{chart_service, rate_service};
use crate::utils::Table;

const USAGE: &str = "Usage: convert [amount] <divisa>   (e.g. `convert 1000 dolar`; a missing amount counts as 0)";

/// Handle one conversion submission: fetch, convert and redraw the chart.
///
/// A failed fetch leaves the current chart untouched.
pub async fn execute(session: &mut Session, args: &[&str]) -> Result<String, String> {
    tracing::info!("💱 Convert command called with args: {:?}", args);

    // A lone code is a form submitted with the amount left blank
    let (value, divisa) = match args {
        [value, divisa] => (*value, *divisa),
        [divisa] => ("", *divisa),
        _ => return Err(USAGE.to_string()),
    };

    let form = ConversionForm::from_fields(value, divisa).map_err(|e| e.to_string())?;

    let indicator = match rate_service::fetch_indicator(&session.client, &form.divisa).await {
        Ok(indicator) => indicator,
        Err(e) => {
            tracing::error!("Fetching {} failed: {}", form.divisa, e);
            return Err(e.user_message());
        }
    };

    let caption = indicator.caption();
    let previous = session.chart.take();
    let outcome = chart_service::render(
        indicator.serie.as_deref(),
        form.value,
        previous,
        &session.chart_target(),
        Some(&caption),
    )
    .map_err(|e| {
        tracing::error!("Rendering {} failed: {}", form.divisa, e);
        e.to_string()
    })?;

    let mut reply = outcome.result_text.clone();
    if let Some(chart) = &outcome.chart {
        let config = chart.config();
        let unit = indicator.unidad_medida.as_deref().unwrap_or("Valor");
        let mut table = Table::new(&["Fecha", unit]);
        let values = config.datasets.first().map(|d| d.data.as_slice()).unwrap_or_default();
        for (label, value) in config.labels.iter().zip(values) {
            table.add_row(&[label.clone(), format!("{:.2}", value)]);
        }
        reply.push_str(&format!("\n\n{}\n", caption));
        reply.push_str(&table.render());
        reply.push_str(&format!("\n📈 Chart written to {}", chart.path().display()));
    }

    session.chart = outcome.chart;
    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mindicador::MindicadorClient;
    use crate::services::chart_service::tests::RecordingCanvas;
    use crate::test_support::{direct_http_client, indicator_body, serve, Canned};
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn session(base_url: &str, canvas: Arc<RecordingCanvas>, dir: &Path) -> Session {
        let client = MindicadorClient::with_http_client(base_url, direct_http_client());
        Session::new(client, canvas, dir.join("chart.png"))
    }

    #[tokio::test]
    async fn test_convert_renders_result_and_chart() {
        let body = indicator_body(
            "dolar",
            &[("2024-05-10T04:00:00.000Z", 900.0), ("2024-05-09T04:00:00.000Z", 910.0)],
        );
        let (base_url, mut requests) = serve(vec![Canned::ok(body)]).await;
        let canvas = Arc::new(RecordingCanvas::default());
        let dir = TempDir::new().unwrap();
        let mut session = session(&base_url, canvas.clone(), dir.path());

        let reply = execute(&mut session, &["10000", "Dolar"]).await.unwrap();

        assert_eq!(requests.recv().await.unwrap(), "GET /dolar HTTP/1.1");
        assert!(reply.starts_with("Resultado: 11.11"));
        assert!(reply.contains("5/10/2024"));
        assert!(reply.contains("Chart written to"));
        assert_eq!(canvas.draw_count(), 1);
        assert!(session.chart.as_ref().unwrap().path().exists());
    }

    #[tokio::test]
    async fn test_convert_empty_series_clears_chart() {
        let (base_url, _requests) = serve(vec![
            Canned::ok(indicator_body("euro", &[("2024-05-10T04:00:00.000Z", 1000.0)])),
            Canned::ok(indicator_body("euro", &[])),
        ])
        .await;
        let canvas = Arc::new(RecordingCanvas::default());
        let dir = TempDir::new().unwrap();
        let mut session = session(&base_url, canvas.clone(), dir.path());

        execute(&mut session, &["1000", "euro"]).await.unwrap();
        let chart_path = session.chart.as_ref().unwrap().path().to_path_buf();

        let reply = execute(&mut session, &["1000", "euro"]).await.unwrap();
        assert_eq!(reply, "Resultado: $0");
        assert!(session.chart.is_none());
        assert!(!chart_path.exists());
    }

    #[tokio::test]
    async fn test_convert_http_error_keeps_chart() {
        let (base_url, _requests) = serve(vec![
            Canned::ok(indicator_body("uf", &[("2024-05-10T04:00:00.000Z", 37000.0)])),
            Canned::status("500 Internal Server Error"),
        ])
        .await;
        let canvas = Arc::new(RecordingCanvas::default());
        let dir = TempDir::new().unwrap();
        let mut session = session(&base_url, canvas.clone(), dir.path());

        execute(&mut session, &["74000", "uf"]).await.unwrap();

        let err = execute(&mut session, &["1", "uf"]).await.unwrap_err();
        assert_eq!(err, "Internal Server Error");
        let chart = session.chart.take().expect("chart survives failed fetch");
        assert!(chart.path().exists());
        assert_eq!(canvas.draw_count(), 1);
    }

    #[tokio::test]
    async fn test_convert_is_idempotent() {
        let body = indicator_body("dolar", &[("2024-05-10T04:00:00.000Z", 937.42)]);
        let (base_url, _requests) = serve(vec![Canned::ok(body.clone()), Canned::ok(body)]).await;
        let canvas = Arc::new(RecordingCanvas::default());
        let dir = TempDir::new().unwrap();
        let mut session = session(&base_url, canvas.clone(), dir.path());

        let first = execute(&mut session, &["250", "dolar"]).await.unwrap();
        let second = execute(&mut session, &["250", "dolar"]).await.unwrap();

        assert_eq!(first, second);
        assert!(first.starts_with("Resultado: 0.27"));
        assert_eq!(canvas.draw_count(), 2);
        assert!(session.chart.is_some());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_convert_usage_and_form_errors() {
        let canvas = Arc::new(RecordingCanvas::default());
        let dir = TempDir::new().unwrap();
        let mut session = session("http://127.0.0.1:9", canvas, dir.path());

        assert_eq!(execute(&mut session, &[]).await.unwrap_err(), USAGE);
        assert!(execute(&mut session, &["abc", "dolar"])
            .await
            .unwrap_err()
            .contains("Invalid amount"));
        assert_eq!(
            execute(&mut session, &["1", "dolar", "extra"]).await.unwrap_err(),
            USAGE
        );
    }

    #[tokio::test]
    async fn test_convert_lone_code_converts_zero() {
        let body = indicator_body("euro", &[("2024-05-10T04:00:00.000Z", 1012.3)]);
        let (base_url, mut requests) = serve(vec![Canned::ok(body)]).await;
        let canvas = Arc::new(RecordingCanvas::default());
        let dir = TempDir::new().unwrap();
        let mut session = session(&base_url, canvas.clone(), dir.path());

        let reply = execute(&mut session, &["euro"]).await.unwrap();

        assert_eq!(requests.recv().await.unwrap(), "GET /euro HTTP/1.1");
        assert!(reply.starts_with("Resultado: 0\n"));
        assert!(reply.contains("1012.30"));
        assert_eq!(canvas.draw_count(), 1);
    }
}
