//! vCard integration tests: real HTTP photo fetch → serializer → directory sink.

use axum::http::header::CONTENT_TYPE;
use axum::routing::get;
use axum::Router;
use bizcard_core::image::{HttpImageResolver, ImageReference};
use bizcard_core::profile::{builtin_profile, LocalizedText, ProfileRecord};
use bizcard_core::shell::ContactSaver;
use bizcard_core::storage::{ImageSlot, MemoryStore, UploadedImages};
use bizcard_core::types::{FetchConfig, ImageConfig};
use bizcard_core::vcard::{generate_vcard, unescape_text, DirectorySink, VCardOptions};
use bizcard_core::Language;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

/// Helper: serve a few image routes on a random local port.
async fn start_image_server() -> String {
    let app = Router::new()
        .route(
            "/portrait.jpg",
            get(|| async { ([(CONTENT_TYPE, "image/jpeg")], JPEG_BYTES.to_vec()) }),
        )
        .route(
            "/page.html",
            get(|| async { ([(CONTENT_TYPE, "text/html")], "<html></html>") }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{}", addr)
}

fn resolver() -> HttpImageResolver {
    HttpImageResolver::new(&FetchConfig {
        timeout: Some(Duration::from_secs(5)),
        ..FetchConfig::default()
    })
    .unwrap()
}

fn read_card(dir: &std::path::Path, filename: &str) -> String {
    std::fs::read_to_string(dir.join(filename)).unwrap()
}

#[tokio::test]
async fn test_remote_photo_is_fetched_and_embedded() {
    let base = start_image_server().await;
    let dir = tempfile::tempdir().unwrap();
    let sink = DirectorySink::new(dir.path());
    let image = ImageReference::remote(format!("{}/portrait.jpg", base));

    let report = generate_vcard(
        &ProfileRecord::named("Marco", "Possinger"),
        Some(&image),
        &VCardOptions::default(),
        &resolver(),
        &sink,
    )
    .await
    .unwrap();

    assert!(report.photo_embedded);
    assert_eq!(report.location, Some(dir.path().join("Marco_Possinger.vcf")));
    let text = read_card(dir.path(), "Marco_Possinger.vcf");
    assert!(text.contains("\r\nPHOTO;ENCODING=b;TYPE=JPEG:/9j/4AAQ\r\n"));
}

#[tokio::test]
async fn test_failed_fetch_still_produces_card() {
    let base = start_image_server().await;
    let dir = tempfile::tempdir().unwrap();
    let sink = DirectorySink::new(dir.path());
    let profile = ProfileRecord {
        email: Some("m@x.de".into()),
        ..ProfileRecord::named("Marco", "Possinger")
    };

    for locator in [
        format!("{}/missing.jpg", base),
        format!("{}/page.html", base),
        "http://127.0.0.1:1/unreachable.jpg".to_string(),
    ] {
        let report = generate_vcard(
            &profile,
            Some(&ImageReference::remote(locator)),
            &VCardOptions::default(),
            &resolver(),
            &sink,
        )
        .await
        .unwrap();
        assert!(!report.photo_embedded);

        let text = read_card(dir.path(), "Marco_Possinger.vcf");
        assert_eq!(
            text,
            "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Marco Possinger\r\nN:Possinger;Marco;;;\r\n\
             EMAIL;TYPE=PREF,INTERNET:m@x.de\r\nEND:VCARD"
        );
    }
}

#[tokio::test]
async fn test_data_url_photo_without_network() {
    let dir = tempfile::tempdir().unwrap();
    let sink = DirectorySink::new(dir.path());
    let image = ImageReference::parse("data:image/png;base64,QUJD").unwrap();

    generate_vcard(
        &ProfileRecord::named("", ""),
        Some(&image),
        &VCardOptions::default(),
        &resolver(),
        &sink,
    )
    .await
    .unwrap();

    let text = read_card(dir.path(), "contact_card.vcf");
    assert!(text.contains("PHOTO;ENCODING=b;TYPE=PNG:QUJD"));
    assert!(text.starts_with("BEGIN:VCARD\r\nVERSION:3.0\r\nFN:\r\nN:;;;;\r\n"));
}

#[tokio::test]
async fn test_unpadded_data_url_is_embedded_as_given() {
    let dir = tempfile::tempdir().unwrap();
    let sink = DirectorySink::new(dir.path());
    let image = ImageReference::parse("data:image/png;base64,QUJDRA").unwrap();

    let report = generate_vcard(
        &ProfileRecord::named("Marco", "Possinger"),
        Some(&image),
        &VCardOptions::default(),
        &resolver(),
        &sink,
    )
    .await
    .unwrap();

    assert!(report.photo_embedded);
    let text = read_card(dir.path(), "Marco_Possinger.vcf");
    assert!(text.contains("\r\nPHOTO;ENCODING=b;TYPE=PNG:QUJDRA\r\nEND:VCARD"));
}

#[tokio::test]
async fn test_builtin_profile_card_structure() {
    let dir = tempfile::tempdir().unwrap();
    let saver = ContactSaver::new(
        Arc::new(builtin_profile().clone()),
        Arc::new(resolver()),
        Arc::new(DirectorySink::new(dir.path())),
    );

    let report = saver.save_contact(Language::En, None).await.unwrap();
    let text = read_card(dir.path(), &report.filename);
    let lines: Vec<&str> = text.split("\r\n").collect();

    assert_eq!(lines.first(), Some(&"BEGIN:VCARD"));
    assert_eq!(lines.get(1), Some(&"VERSION:3.0"));
    assert_eq!(lines.last(), Some(&"END:VCARD"));
    assert_eq!(lines.iter().filter(|l| l.starts_with("FN:")).count(), 1);
    assert_eq!(lines.iter().filter(|l| l.starts_with("N:")).count(), 1);
    assert!(lines.contains(&"TITLE:Founder & Managing Director"));
    assert!(!lines.iter().any(|l| l.starts_with("TEL")));

    let label_at = lines.iter().position(|l| *l == "item1.X-ABLabel:LinkedIn").unwrap();
    assert!(lines[label_at - 1].starts_with("item1.URL:https://www.linkedin.com/"));

    let note = lines.iter().find(|l| l.starts_with("NOTE:")).unwrap();
    assert_eq!(
        unescape_text(&note["NOTE:".len()..]),
        "Company: Munich Living Solutions\nLegal entity: BPD Briem Property Development GmbH"
    );
    let adr = lines.iter().find(|l| l.starts_with("ADR;TYPE=WORK:")).unwrap();
    assert_eq!(*adr, "ADR;TYPE=WORK:;;Bürgermeister-Schneider-Weg 163\\, 85579 Neubiberg;;;");
}

#[tokio::test]
async fn test_uploaded_image_feeds_card() {
    let dir = tempfile::tempdir().unwrap();
    let uploads = UploadedImages::with_config(MemoryStore::new(), &ImageConfig::default());
    uploads
        .set_data_url(ImageSlot::Profile, "data:image/webp;base64,QUJD")
        .unwrap();
    let image = uploads.reference(ImageSlot::Profile).unwrap();

    let profile = ProfileRecord {
        title: LocalizedText::new("", "Founder"),
        ..ProfileRecord::named("Marco", "Possinger")
    };
    let saver = ContactSaver::new(
        Arc::new(profile),
        Arc::new(resolver()),
        Arc::new(DirectorySink::new(dir.path())),
    );
    saver.save_contact(Language::De, image.as_ref()).await.unwrap();

    let text = read_card(dir.path(), "Marco_Possinger.vcf");
    assert!(text.contains("\r\nTITLE:Founder\r\n"));
    assert!(text.contains("\r\nPHOTO;ENCODING=b;TYPE=WEBP:QUJD\r\nEND:VCARD"));
}
