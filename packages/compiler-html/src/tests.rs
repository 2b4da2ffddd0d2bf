use crate::{compile_to_html, render, CompileOptions};
use broadsheet_schema::{Block, BlockId, BlockType, Content, Document, IdGenerator};
use serde_json::{json, Value};

fn block(id: &str, block_type: BlockType, content: Value) -> Block {
    let content: Content = match content {
        Value::Object(map) => map,
        _ => Content::new(),
    };
    Block::new(BlockId::from(id), block_type, content)
}

#[test]
fn test_compile_page_shell() {
    let mut doc = Document::new();
    doc.metadata.name = "Spring Appeal".to_string();
    doc.global_style.background_color = "#fafafa".to_string();

    let html = render(&doc);

    println!("Generated HTML:\n{}", html);

    assert!(html.starts_with("<!DOCTYPE html>\n"));
    assert!(html.contains("<title>Spring Appeal</title>"));
    assert!(html.contains("background-color: #fafafa; font-family: Arial, Helvetica, sans-serif;"));
    assert!(html.trim_end().ends_with("</html>"));
}

#[test]
fn test_subject_line_wins_for_title() {
    let mut doc = Document::new();
    doc.metadata.name = "Internal name".to_string();
    doc.metadata.subject_line = "You're invited".to_string();

    let html = render(&doc);
    assert!(html.contains("<title>You&#39;re invited</title>"));
}

#[test]
fn test_missing_fields_use_defaults() {
    let doc = Document::with_blocks(vec![
        block("b1", BlockType::Button, json!({ "text": "Give today" })),
        block("b2", BlockType::Header, json!({})),
    ]);

    let html = render(&doc);

    assert!(html.contains(">Give today</a>"));
    assert!(html.contains("href=\"#\""));
    assert!(html.contains("background-color: #2563eb"));
    assert!(html.contains("<h1 style="));
    assert!(html.contains(">Your Heading Here</h1>"));
}

#[test]
fn test_text_is_escaped() {
    let doc = Document::with_blocks(vec![
        block(
            "b1",
            BlockType::Text,
            json!({ "text": "<script>alert(\"x\")</script>\nline two" }),
        ),
        block(
            "b2",
            BlockType::Button,
            json!({ "url": "https://example.org/?a=1&b=\"2\"" }),
        ),
    ]);

    let html = render(&doc);

    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;<br>line two"));
    assert!(html.contains("href=\"https://example.org/?a=1&amp;b=&quot;2&quot;\""));
}

#[test]
fn test_custom_blocks_render_nothing() {
    let plain = Document::with_blocks(vec![block("a", BlockType::Spacer, json!({}))]);
    let with_custom = Document::with_blocks(vec![
        block("a", BlockType::Spacer, json!({})),
        block(
            "c",
            BlockType::Custom("poll".to_string()),
            json!({ "question": "Coming?" }),
        ),
    ]);

    assert_eq!(render(&plain), render(&with_custom));
    assert!(!render(&with_custom).contains("Coming?"));
}

#[test]
fn test_every_known_type_renders_with_empty_content() {
    let blocks: Vec<Block> = BlockType::KNOWN
        .iter()
        .enumerate()
        .map(|(i, t)| block(&format!("b{}", i), t.clone(), json!({})))
        .collect();
    let doc = Document::with_blocks(blocks);

    let html = render(&doc);

    // One row per block, the page wrapper row and the statistics grid row
    assert_eq!(html.matches("<tr>").count(), BlockType::KNOWN.len() + 2);
    assert!(html.contains("Support Our Mission"));
    assert!(html.contains("$2,500"));
    assert!(html.contains("(25%)"));
    assert!(html.contains("Our Impact"));
    assert!(html.contains("Unsubscribe"));
}

#[test]
fn test_malformed_field_values_do_not_break_rendering() {
    let doc = Document::with_blocks(vec![
        block("a", BlockType::Header, json!({ "level": "huge", "fontSize": [1] })),
        block("b", BlockType::EventCard, json!({ "events": "tonight" })),
        block("c", BlockType::StatisticsPanel, json!({ "stats": [1, "two", null] })),
        block("d", BlockType::DonationProgress, json!({ "goal": 0, "raised": "lots" })),
        block("e", BlockType::Volunteer, json!({ "roles": { "not": "a list" } })),
        block("f", BlockType::Image, json!({ "width": -40 })),
    ]);

    let html = render(&doc);

    assert!(html.contains("<h1 style=\"margin: 0; color: #111827; font-size: 32px;"));
    assert!(html.contains("(0%)"));
    assert!(html.contains("width=\"6\""));
}

#[test]
fn test_event_list_rendering() {
    let doc = Document::with_blocks(vec![block(
        "e",
        BlockType::EventCard,
        json!({
            "title": "This Month",
            "events": [
                { "title": "Cleanup", "date": "2025-05-01", "time": "9am", "location": "Park" },
                { "title": "Potluck", "date": "TBD" }
            ]
        }),
    )]);

    let html = render(&doc);

    assert!(html.contains(">This Month</h2>"));
    assert!(html.contains(">Cleanup</strong>"));
    assert!(html.contains(">2025-05-01 · 9am</span>"));
    assert!(html.contains(">Park</span>"));
    assert!(html.contains(">TBD</span>"));
}

#[test]
fn test_compact_output() {
    let doc = Document::with_blocks(vec![block("a", BlockType::Divider, json!({}))]);
    let options = CompileOptions {
        pretty: false,
        include_doctype: false,
        ..Default::default()
    };

    let html = compile_to_html(&doc, &options);

    assert!(!html.contains('\n'));
    assert!(html.starts_with("<html lang=\"en\">"));
    assert!(html.contains("<hr style=\"border: none; border-top: 1px solid #e5e7eb; margin: 0;\">"));
}

#[test]
fn test_render_is_deterministic() {
    let mut ids = IdGenerator::new("draft:new");
    let blocks = BlockType::KNOWN
        .iter()
        .map(|t| Block::with_defaults(ids.next_id(), t.clone()))
        .collect();
    let doc = Document::with_blocks(blocks);

    assert_eq!(render(&doc), render(&doc.clone()));
}
