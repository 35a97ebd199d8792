//! End-to-end loading over both strategies.

#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]
#![allow(missing_docs)]

use std::collections::HashMap;
use std::fs;
use std::sync::Arc;

use googletest::prelude::*;
use parking_lot::Mutex;
use talks_i18n::config::{
    LoadStrategy,
    LoaderSettings,
};
use talks_i18n::loader::{
    HttpSource,
    ScriptSource,
    Source,
};
use talks_i18n::resolver::{
    FixedLocale,
    LanguageResolver,
};
use talks_i18n::{
    LoadRequest,
    Translator,
};
use tempfile::TempDir;
use tokio::io::{
    AsyncReadExt,
    AsyncWriteExt,
};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

const GERMAN: &str = r#"window.jsTalks.PRIVATE.loadedData = {
    "title": "Hallo Welt",
    "pages": [
        { "name": "Erste Seite" },
        { "name": "Zweite Seite" }
    ]
};
"#;

const BASE: &str = r#"window.jsTalks.PRIVATE.loadedData = {
    "title": "Hello World",
    "showPageIn": "Show page in",
    "pages": [
        { "name": "First page" },
        { "name": "Second page" }
    ]
};
"#;

/// Routes served by [`spawn_server`]: path -> (status, body).
type Routes = HashMap<String, (u16, String)>;

/// Minimal HTTP/1.1 responder. Returns the base URL and the request targets seen.
async fn spawn_server(routes: Routes) -> (String, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let routes = Arc::new(routes);

    let server_seen = Arc::clone(&seen);
    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            let routes = Arc::clone(&routes);
            let seen = Arc::clone(&server_seen);
            tokio::spawn(async move {
                let mut buf = vec![0_u8; 8192];
                let mut read = 0;
                while read < buf.len() {
                    let n = stream.read(&mut buf[read..]).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    read += n;
                    if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }

                let request = String::from_utf8_lossy(&buf[..read]).to_string();
                let target = request.split_whitespace().nth(1).unwrap_or("/").to_string();
                seen.lock().push(target.clone());

                let path = target.split('?').next().unwrap_or("/");
                let (status, body) = routes.get(path).cloned().unwrap_or((404, String::new()));
                let reason = if status == 200 { "OK" } else { "Not Found" };
                let response = format!(
                    "HTTP/1.1 {status} {reason}\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    (format!("http://{address}/i18n/"), seen)
}

fn http_translator(settings: &LoaderSettings) -> Translator<HttpSource, FixedLocale> {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    Translator::new(
        HttpSource::with_client(client, settings),
        LanguageResolver::new(None, FixedLocale(None)),
    )
}

#[tokio::test]
async fn test_network_cascade_falls_back_to_base() {
    let routes = Routes::from([("/i18n/constants.js".to_string(), (200, BASE.to_string()))]);
    let (base_url, seen) = spawn_server(routes).await;
    let translator = http_translator(&LoaderSettings::default());

    let request = LoadRequest::new(base_url, "constants").with_extension(".js").with_language("de-CH");
    let holder = translator.load(request).await.unwrap();

    assert_that!(holder.is_loaded(), eq(true));
    assert_that!(holder.get_value("showpagein"), eq("Show page in"));
    assert_that!(holder.get_value(" PAGES_2_NAME "), eq("Second page"));

    let seen = seen.lock().clone();
    assert_that!(seen, len(eq(3)));
    assert_that!(seen[0], starts_with("/i18n/constants_de-CH.js?newRequest="));
    assert_that!(seen[1], starts_with("/i18n/constants_de.js?newRequest="));
    assert_that!(seen[2], starts_with("/i18n/constants.js?newRequest="));
}

#[tokio::test]
async fn test_network_plain_json_and_callback() {
    let routes = Routes::from([(
        "/i18n/messages_fr.json".to_string(),
        (200, r#"{"Title": "Bonjour"}"#.to_string()),
    )]);
    let (base_url, seen) = spawn_server(routes).await;
    let settings = LoaderSettings { cache_bust: false, ..LoaderSettings::default() };
    let translator = http_translator(&settings);
    let (tx, rx) = oneshot::channel();

    let request = LoadRequest::new(base_url, "messages").with_extension(".json").with_language("fr");
    let holder = translator
        .load_translations(request, move |loaded| {
            let _ = tx.send(loaded);
        })
        .unwrap();

    assert_that!(rx.await.unwrap(), eq(true));
    assert_that!(holder.get_value("title"), eq("Bonjour"));
    assert_that!(seen.lock().clone(), elements_are![eq("/i18n/messages_fr.json")]);
}

#[tokio::test]
async fn test_network_empty_body_and_bad_json_exhaust() {
    let routes = Routes::from([
        ("/i18n/constants_it.js".to_string(), (200, String::new())),
        ("/i18n/constants.js".to_string(), (200, "window.jsTalks.PRIVATE.loadedData = {".to_string())),
    ]);
    let (base_url, seen) = spawn_server(routes).await;
    let translator = http_translator(&LoaderSettings::default());

    let request = LoadRequest::new(base_url, "constants").with_extension(".js").with_language("it");
    let holder = translator.load(request).await.unwrap();

    assert_that!(holder.is_loaded(), eq(false));
    assert_that!(holder.get_value("title"), eq(""));
    assert_that!(seen.lock().len(), eq(2));
}

fn local_settings() -> LoaderSettings {
    LoaderSettings {
        local_file_poll_delay_ms: 25,
        local_file_poll_attempts: 4,
        ..LoaderSettings::default()
    }
}

fn write_scripts(dir: &TempDir) {
    fs::write(dir.path().join("constants_de.js"), GERMAN).unwrap();
    fs::write(dir.path().join("constants.js"), BASE).unwrap();
}

#[tokio::test]
async fn test_local_file_loads_region_fallback() {
    let dir = TempDir::new().unwrap();
    write_scripts(&dir);
    let base = format!("{}/", dir.path().display());
    let settings = local_settings();
    let translator = Translator::new(
        ScriptSource::new(&settings),
        LanguageResolver::new(None, FixedLocale(Some("de-AT".to_string()))),
    );

    let request = LoadRequest::new(base, "constants").with_extension(".js");
    let holder = translator.load(request).await.unwrap();

    assert_that!(holder.is_loaded(), eq(true));
    assert_that!(holder.get_value("title"), eq("Hallo Welt"));
    assert_that!(holder.get_value("pages_1_name"), eq("Erste Seite"));
    // Only the German file was loaded, so base-only keys are missing.
    assert_that!(holder.get_value("showpagein"), eq(""));
}

#[tokio::test]
async fn test_local_file_base_sentinel() {
    let dir = TempDir::new().unwrap();
    write_scripts(&dir);
    let base = format!("{}/", dir.path().display());
    let translator = Translator::new(
        ScriptSource::new(&local_settings()),
        LanguageResolver::new(None, FixedLocale(Some("de".to_string()))),
    );

    let request = LoadRequest::new(base, "constants").with_extension(".js").with_language("BASE");
    let holder = translator.load(request).await.unwrap();

    assert_that!(holder.get_value("title"), eq("Hello World"));
}

#[tokio::test]
async fn test_local_file_from_file_url_base() {
    let dir = TempDir::new().unwrap();
    write_scripts(&dir);
    let base = reqwest::Url::from_directory_path(dir.path()).unwrap().to_string();
    let source = Source::detect(&local_settings(), &base);
    assert!(matches!(source, Source::LocalFile(_)));
    let translator = Translator::new(source, LanguageResolver::new(None, FixedLocale(None)));

    let request = LoadRequest::new(base, "constants").with_extension(".js").with_language("de-DE");
    let holder = translator.load(request).await.unwrap();

    assert_that!(holder.is_loaded(), eq(true));
    assert_that!(holder.get_value("title"), eq("Hallo Welt"));
}

#[tokio::test]
async fn test_local_file_missing_everything() {
    let dir = TempDir::new().unwrap();
    let base = format!("{}/", dir.path().display());
    let settings = LoaderSettings { strategy: LoadStrategy::Auto, ..local_settings() };
    let source = Source::detect(&settings, &base);
    let translator = Translator::new(source, LanguageResolver::new(None, FixedLocale(None)));
    let (tx, rx) = oneshot::channel();

    let request = LoadRequest::new(base, "constants").with_extension(".js").with_language("en-US");
    let holder = translator
        .load_translations(request, move |loaded| {
            let _ = tx.send(loaded);
        })
        .unwrap();

    assert_that!(rx.await.unwrap(), eq(false));
    assert_that!(holder.is_loaded(), eq(false));
    assert_that!(holder.get_value("title"), eq(""));
}
