use photo_report::*;
use std::io::Cursor;
use std::path::PathBuf;

fn png(name: &str, width: u32, height: u32) -> ProbedImage {
    let mut bytes = Vec::new();
    image::RgbImage::from_pixel(width, height, image::Rgb([200, 120, 40]))
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    ProbedImage {
        name: name.to_string(),
        blob: ImageBlob {
            source: PathBuf::from(format!("{name}.png")),
            bytes: bytes.into(),
            width,
            height,
        },
    }
}

fn broken(name: &str) -> ProbedImage {
    ProbedImage {
        name: name.to_string(),
        blob: ImageBlob {
            source: PathBuf::from(format!("{name}.jpg")),
            bytes: b"not an image".to_vec().into(),
            width: 0,
            height: 0,
        },
    }
}

fn page_count(bytes: &[u8]) -> usize {
    lopdf::Document::load_mem(bytes).unwrap().get_pages().len()
}

#[test]
fn test_page_count_matches_pagination() {
    let mut session = Session::new();
    session.commit_photos(vec![
        png("l1", 40, 30),
        png("p1", 30, 40),
        png("l2", 40, 30),
        png("p2", 30, 40),
        png("l3", 40, 30),
        png("p3", 30, 40),
        png("p4", 30, 40),
        png("p5", 30, 40),
    ]);

    let report = session.render(&ReportOptions::default()).unwrap();
    // 3 landscape photos -> 2 pages, 5 portrait photos -> 2 pages
    assert_eq!(report.pages, 4);
    assert_eq!(page_count(&report.bytes), 4);
    assert_eq!(report.embedded_images, 8);
}

#[test]
fn test_logo_embedded_once() {
    let mut session = Session::new();
    session.commit_photos(vec![png("a", 40, 30), png("b", 40, 30), png("c", 40, 30)]);
    session.commit_logo(png("logo", 20, 10));
    session.set_metadata_text(MetadataText {
        organization: "Public Works".to_string(),
        subject: "Bridge inspection".to_string(),
        date: "2025-03-14".to_string(),
    });

    let report = session.render(&ReportOptions::default()).unwrap();
    assert_eq!(report.pages, 2);
    assert_eq!(report.embedded_images, 4);
}

#[test]
fn test_undecodable_photo_still_renders() {
    let mut session = Session::new();
    session.commit_photos(vec![broken("corrupt"), png("ok", 40, 30)]);

    let report = session.render(&ReportOptions::default()).unwrap();
    assert_eq!(report.pages, 1);
    assert_eq!(page_count(&report.bytes), 1);
    assert_eq!(report.embedded_images, 1);
}

#[test]
fn test_invalid_options_rejected() {
    let mut session = Session::new();
    session.commit_photos(vec![png("a", 40, 30)]);
    let options = ReportOptions {
        frame_height_mm: -1.0,
        ..Default::default()
    };
    assert!(matches!(
        session.render(&options),
        Err(ReportError::Config(_))
    ));
}

#[tokio::test]
async fn test_export_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("report.pdf");
    let mut session = Session::new();
    session.commit_photos(vec![png("a", 30, 40)]);

    let report = session
        .export(&ReportOptions::default(), &output)
        .await
        .unwrap();
    let written = std::fs::read(&output).unwrap();
    assert_eq!(written, report.bytes);
    assert_eq!(page_count(&written), 1);
}

#[test]
fn test_accented_header_text_is_extractable() {
    let mut session = Session::new();
    session.commit_photos(vec![png("Fachada da ação", 40, 30)]);
    session.set_metadata_text(MetadataText {
        organization: "Prefeitura de São João".to_string(),
        subject: "Reforma da Área Central".to_string(),
        date: "março de 2025".to_string(),
    });

    let report = session.render(&ReportOptions::default()).unwrap();
    let doc = lopdf::Document::load_mem(&report.bytes).unwrap();
    let text = doc.extract_text(&[1]).unwrap();

    assert!(text.contains("PREFEITURA DE SÃO JOÃO"), "{text}");
    assert!(text.contains("Reforma da Área Central"), "{text}");
    assert!(text.contains("março de 2025"), "{text}");
    assert!(text.contains("FACHADA DA AÇÃO"), "{text}");
}
