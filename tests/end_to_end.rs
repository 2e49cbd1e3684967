use std::io::{Cursor, Read};

use archivext::{extract_plain_text, ExtractOpts, WarcIterator, WarcRecordType};
use kuchiki::traits::TendrilSink;

fn parse(html: &str) -> kuchiki::NodeRef {
    kuchiki::parse_html().one(html)
}

#[test]
fn scenario_warc_typing() {
    let data = b"WARC/1.0\r\nWARC-Type: response\r\nContent-Length: 0\r\n\r\n\r\n\r\n";
    let mut it = WarcIterator::new(Cursor::new(&data[..]));
    let rec = it.next().unwrap().unwrap();
    assert_eq!(rec.record_type, WarcRecordType::Response);
    assert_eq!(rec.content_length, 0);
    assert!(!rec.is_http);
    assert!(it.next().is_none());
}

#[test]
fn scenario_http_envelope() {
    let payload = b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n\r\nhi";
    let data = format!(
        "WARC/1.0\r\nWARC-Type: response\r\nContent-Type: application/http; msgtype=response\r\nContent-Length: {}\r\n\r\n{}\r\n\r\n",
        payload.len(),
        std::str::from_utf8(payload).unwrap(),
    );
    let mut it = WarcIterator::new(Cursor::new(data.into_bytes()));
    let rec = it.next().unwrap().unwrap();
    assert!(rec.is_http);
    assert_eq!(rec.http_status_line, b"HTTP/1.1 200 OK");
    assert_eq!(rec.http_headers.get("Content-Type"), Some(&b"text/html"[..]));
    let mut body = String::new();
    it.payload_reader().read_to_string(&mut body).unwrap();
    assert_eq!(body, "hi");
}

#[test]
fn scenario_plain_extraction() {
    let doc = parse("<html><body><p>Hello <b>world</b>!</p></body></html>");
    let out = extract_plain_text(&doc, &ExtractOpts::default());
    assert_eq!(out, "Hello world!");
}

#[test]
fn scenario_preserved_formatting_with_list() {
    let doc = parse("<html><body><ul><li>a</li><li>b</li></ul></body></html>");
    let out = extract_plain_text(&doc, &ExtractOpts::default());
    assert_eq!(out, "  \u{2022} a\n  \u{2022} b");
}

#[test]
fn scenario_main_content_filter() {
    let doc = parse(
        r#"<html><body>
            <div class="article-body">Good</div>
            <div class="site-footer">Bad</div>
        </body></html>"#,
    );
    let opts = ExtractOpts {
        main_content: true,
        ..Default::default()
    };
    let out = extract_plain_text(&doc, &opts);
    assert_eq!(out, "Good");
}

#[test]
fn scenario_link_emission() {
    let doc = parse(r#"<html><body><a href="https://x.example">click</a></body></html>"#);
    let opts = ExtractOpts {
        links: true,
        ..Default::default()
    };
    let out = extract_plain_text(&doc, &opts);
    assert_eq!(out, "click (https://x.example)");
}
