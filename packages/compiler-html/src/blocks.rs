//! Per-type markup templates.
//!
//! Every block becomes one table row inside the content column. Values come
//! from [`Block::value`] and friends, so missing fields already carry the
//! registry defaults by the time they get here.

use crate::compiler::{escape_html, Context, CONTENT_WIDTH};
use broadsheet_schema::{value_to_text, Block, BlockType, DATE_SENTINEL};
use serde_json::Value;

const ROW_PADDING: &str = "padding: 16px 24px;";

pub(crate) fn compile_block(block: &Block, ctx: &mut Context) {
    match &block.block_type {
        BlockType::Header => compile_header(block, ctx),
        BlockType::Text => compile_text(block, ctx),
        BlockType::Image => compile_image(block, ctx),
        BlockType::Button => compile_button(block, ctx),
        BlockType::Divider => compile_divider(block, ctx),
        BlockType::Spacer => compile_spacer(block, ctx),
        BlockType::DonationProgress => compile_donation_progress(block, ctx),
        BlockType::EventCard => compile_event_card(block, ctx),
        BlockType::Countdown => compile_countdown(block, ctx),
        BlockType::StatisticsPanel => compile_statistics_panel(block, ctx),
        BlockType::Volunteer => compile_volunteer(block, ctx),
        BlockType::Announcement => compile_announcement(block, ctx),
        BlockType::SocialLinks => compile_social_links(block, ctx),
        BlockType::Footer => compile_footer(block, ctx),
        BlockType::Custom(tag) => {
            tracing::trace!("No markup for custom block type {}", tag);
        }
    }
}

/// Escaped text of a field
fn text(block: &Block, field: &str) -> String {
    escape_html(&block.text(field))
}

/// Escaped multi-line text, line breaks kept
fn paragraph(block: &Block, field: &str) -> String {
    escape_html(&block.text(field)).replace('\n', "<br>")
}

fn number(block: &Block, field: &str, fallback: f64) -> f64 {
    block
        .number(field)
        .filter(|n| n.is_finite())
        .unwrap_or(fallback)
}

fn items(block: &Block, field: &str) -> Vec<Value> {
    match block.value(field) {
        Value::Array(items) => items,
        _ => Vec::new(),
    }
}

fn item_text(item: &Value, field: &str) -> String {
    escape_html(&item.get(field).map(value_to_text).unwrap_or_default())
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{:.2}", n)
    }
}

/// Thousands-grouped amount, cents only when present
fn format_amount(n: f64) -> String {
    let cents_total = (n.abs() * 100.0).round() as u64;
    let digits = (cents_total / 100).to_string();
    let cents = cents_total % 100;

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if n < 0.0 && cents_total > 0 { "-" } else { "" };
    if cents == 0 {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{:02}", sign, grouped, cents)
    }
}

fn heading(ctx: &mut Context, title: &str, color: &str) {
    ctx.add_line(&format!(
        "<h2 style=\"margin: 0 0 12px; font-size: 22px; color: {};\">{}</h2>",
        color, title
    ));
}

fn cta(ctx: &mut Context, label: &str, url: &str, background: &str) {
    ctx.add_line(&format!(
        "<a href=\"{}\" style=\"display: inline-block; padding: 12px 24px; background-color: {}; color: #ffffff; border-radius: 6px; text-decoration: none; font-weight: bold;\">{}</a>",
        url, background, label
    ));
}

fn compile_header(block: &Block, ctx: &mut Context) {
    let level = number(block, "level", 1.0).round().clamp(1.0, 6.0) as u8;

    ctx.open_row(&format!(
        "align=\"{}\" style=\"{} background-color: {};\"",
        text(block, "align"),
        ROW_PADDING,
        text(block, "backgroundColor")
    ));
    ctx.add_line(&format!(
        "<h{0} style=\"margin: 0; color: {1}; font-size: {2}px; text-align: {3};\">{4}</h{0}>",
        level,
        text(block, "color"),
        format_number(number(block, "fontSize", 32.0)),
        text(block, "align"),
        text(block, "text")
    ));
    ctx.close_row();
}

fn compile_text(block: &Block, ctx: &mut Context) {
    ctx.open_row(&format!(
        "style=\"{} background-color: {};\"",
        ROW_PADDING,
        text(block, "backgroundColor")
    ));
    ctx.add_line(&format!(
        "<p style=\"margin: 0; color: {}; font-size: {}px; line-height: 1.5; text-align: {};\">{}</p>",
        text(block, "color"),
        format_number(number(block, "fontSize", 16.0)),
        text(block, "align"),
        paragraph(block, "text")
    ));
    ctx.close_row();
}

fn compile_image(block: &Block, ctx: &mut Context) {
    let width = number(block, "width", 100.0).clamp(1.0, 100.0);
    let pixels = (CONTENT_WIDTH as f64 * width / 100.0).round() as u32;
    let link = block.text("link");

    ctx.open_row(&format!(
        "align=\"{}\" style=\"{}\"",
        text(block, "align"),
        ROW_PADDING
    ));
    let img = format!(
        "<img src=\"{}\" alt=\"{}\" width=\"{}\" style=\"display: block; width: {}%; max-width: 100%; height: auto; border: 0;\">",
        text(block, "src"),
        text(block, "alt"),
        pixels,
        format_number(width)
    );
    if link.trim().is_empty() {
        ctx.add_line(&img);
    } else {
        ctx.add_line(&format!("<a href=\"{}\">", escape_html(&link)));
        ctx.indent();
        ctx.add_line(&img);
        ctx.dedent();
        ctx.add_line("</a>");
    }
    ctx.close_row();
}

fn compile_button(block: &Block, ctx: &mut Context) {
    ctx.open_row(&format!(
        "align=\"{}\" style=\"{}\"",
        text(block, "align"),
        ROW_PADDING
    ));
    ctx.add_line(&format!(
        "<a href=\"{}\" style=\"display: inline-block; padding: 12px 24px; background-color: {}; color: {}; border-radius: {}px; text-decoration: none; font-weight: bold;\">{}</a>",
        text(block, "url"),
        text(block, "backgroundColor"),
        text(block, "textColor"),
        format_number(number(block, "borderRadius", 6.0)),
        text(block, "text")
    ));
    ctx.close_row();
}

fn compile_divider(block: &Block, ctx: &mut Context) {
    ctx.open_row(&format!(
        "style=\"padding: {}px 24px;\"",
        format_number(number(block, "margin", 16.0))
    ));
    ctx.add_line(&format!(
        "<hr style=\"border: none; border-top: {}px {} {}; margin: 0;\">",
        format_number(number(block, "thickness", 1.0)),
        text(block, "style"),
        text(block, "color")
    ));
    ctx.close_row();
}

fn compile_spacer(block: &Block, ctx: &mut Context) {
    let height = format_number(number(block, "height", 32.0).max(0.0));
    ctx.open_row(&format!(
        "height=\"{0}\" style=\"height: {0}px; line-height: {0}px; font-size: 1px;\"",
        height
    ));
    ctx.add_line("&nbsp;");
    ctx.close_row();
}

fn compile_donation_progress(block: &Block, ctx: &mut Context) {
    let goal = number(block, "goal", 0.0);
    let raised = number(block, "raised", 0.0);
    let percent = if goal > 0.0 {
        (raised / goal * 100.0).clamp(0.0, 100.0).round() as u32
    } else {
        0
    };
    let currency = text(block, "currency");
    let bar_color = text(block, "barColor");

    ctx.open_row(&format!("style=\"{}\"", ROW_PADDING));
    heading(ctx, &text(block, "title"), "#111827");
    ctx.add_line(&format!(
        "<p style=\"margin: 0 0 12px; color: #374151;\">{}</p>",
        paragraph(block, "description")
    ));
    ctx.add_line("<div style=\"background-color: #e5e7eb; border-radius: 8px; height: 16px; overflow: hidden;\">");
    ctx.indent();
    ctx.add_line(&format!(
        "<div style=\"width: {}%; height: 16px; background-color: {};\"></div>",
        percent, bar_color
    ));
    ctx.dedent();
    ctx.add_line("</div>");
    ctx.add_line(&format!(
        "<p style=\"margin: 8px 0 16px; color: #374151;\"><strong>{0}{1}</strong> raised of {0}{2} goal ({3}%)</p>",
        currency,
        format_amount(raised),
        format_amount(goal),
        percent
    ));
    cta(
        ctx,
        &text(block, "buttonText"),
        &text(block, "buttonUrl"),
        &bar_color,
    );
    ctx.close_row();
}

fn compile_event_card(block: &Block, ctx: &mut Context) {
    let accent = text(block, "accentColor");

    ctx.open_row(&format!("style=\"{}\"", ROW_PADDING));
    heading(ctx, &text(block, "title"), &accent);

    for event in items(block, "events") {
        ctx.add_line(&format!(
            "<div style=\"border-left: 4px solid {}; padding: 8px 12px; margin-bottom: 12px;\">",
            accent
        ));
        ctx.indent();
        ctx.add_line(&format!(
            "<strong style=\"display: block; color: #111827;\">{}</strong>",
            item_text(&event, "title")
        ));

        let date = item_text(&event, "date");
        let time = item_text(&event, "time");
        let when = match (date.is_empty(), time.is_empty()) {
            (false, false) => format!("{} · {}", date, time),
            (false, true) => date,
            (true, _) => time,
        };
        if !when.is_empty() {
            ctx.add_line(&format!(
                "<span style=\"display: block; color: #6b7280; font-size: 14px;\">{}</span>",
                when
            ));
        }

        let location = item_text(&event, "location");
        if !location.is_empty() {
            ctx.add_line(&format!(
                "<span style=\"display: block; color: #6b7280; font-size: 14px;\">{}</span>",
                location
            ));
        }

        let description = item_text(&event, "description");
        if !description.is_empty() {
            ctx.add_line(&format!(
                "<p style=\"margin: 4px 0 0; color: #374151;\">{}</p>",
                description
            ));
        }
        ctx.dedent();
        ctx.add_line("</div>");
    }
    ctx.close_row();
}

fn compile_countdown(block: &Block, ctx: &mut Context) {
    let accent = text(block, "accentColor");

    ctx.open_row(&format!("align=\"center\" style=\"{}\"", ROW_PADDING));
    heading(ctx, &text(block, "title"), "#111827");
    ctx.add_line(&format!(
        "<p style=\"margin: 0 0 8px; font-size: 28px; font-weight: bold; color: {};\">{}</p>",
        accent,
        text(block, "targetDate")
    ));
    ctx.add_line(&format!(
        "<p style=\"margin: 0; color: #374151;\">{}</p>",
        paragraph(block, "message")
    ));
    ctx.close_row();
}

fn compile_statistics_panel(block: &Block, ctx: &mut Context) {
    let accent = text(block, "accentColor");
    let stats = items(block, "stats");

    ctx.open_row(&format!("style=\"{}\"", ROW_PADDING));
    heading(ctx, &text(block, "title"), "#111827");

    if !stats.is_empty() {
        let cell_width = 100 / stats.len();
        ctx.add_line("<table role=\"presentation\" width=\"100%\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\">");
        ctx.indent();
        ctx.add_line("<tr>");
        ctx.indent();
        for stat in &stats {
            ctx.add_line(&format!(
                "<td align=\"center\" width=\"{}%\" style=\"padding: 8px;\">",
                cell_width
            ));
            ctx.indent();
            ctx.add_line(&format!(
                "<div style=\"font-size: 28px; font-weight: bold; color: {};\">{}</div>",
                accent,
                item_text(stat, "value")
            ));
            ctx.add_line(&format!(
                "<div style=\"font-size: 14px; color: #6b7280;\">{}</div>",
                item_text(stat, "label")
            ));
            ctx.dedent();
            ctx.add_line("</td>");
        }
        ctx.dedent();
        ctx.add_line("</tr>");
        ctx.dedent();
        ctx.add_line("</table>");
    }
    ctx.close_row();
}

fn compile_volunteer(block: &Block, ctx: &mut Context) {
    let primary = escape_html(&ctx.style.primary_color);

    ctx.open_row(&format!("style=\"{}\"", ROW_PADDING));
    heading(ctx, &text(block, "title"), "#111827");
    ctx.add_line(&format!(
        "<p style=\"margin: 0 0 12px; color: #374151;\">{}</p>",
        paragraph(block, "description")
    ));

    let roles: Vec<String> = items(block, "roles")
        .iter()
        .map(|role| escape_html(&value_to_text(role)))
        .filter(|role| !role.is_empty())
        .collect();
    if !roles.is_empty() {
        ctx.add_line("<ul style=\"margin: 0 0 16px; padding-left: 20px; color: #374151;\">");
        ctx.indent();
        for role in roles {
            ctx.add_line(&format!("<li>{}</li>", role));
        }
        ctx.dedent();
        ctx.add_line("</ul>");
    }

    cta(
        ctx,
        &text(block, "buttonText"),
        &text(block, "buttonUrl"),
        &primary,
    );
    ctx.close_row();
}

fn compile_announcement(block: &Block, ctx: &mut Context) {
    ctx.open_row(&format!(
        "style=\"{} background-color: {};\"",
        ROW_PADDING,
        text(block, "highlightColor")
    ));
    heading(ctx, &text(block, "title"), "#111827");

    let date = block.text("date");
    if !date.is_empty() && date != DATE_SENTINEL {
        ctx.add_line(&format!(
            "<p style=\"margin: 0 0 8px; color: #6b7280; font-size: 14px;\">{}</p>",
            escape_html(&date)
        ));
    }
    ctx.add_line(&format!(
        "<p style=\"margin: 0; color: #374151;\">{}</p>",
        paragraph(block, "body")
    ));
    ctx.close_row();
}

fn compile_social_links(block: &Block, ctx: &mut Context) {
    let primary = escape_html(&ctx.style.primary_color);

    ctx.open_row(&format!(
        "align=\"{}\" style=\"{}\"",
        text(block, "align"),
        ROW_PADDING
    ));
    for link in items(block, "links") {
        let platform = item_text(&link, "platform");
        if platform.is_empty() {
            continue;
        }
        let url = item_text(&link, "url");
        ctx.add_line(&format!(
            "<a href=\"{}\" style=\"display: inline-block; margin: 0 8px; color: {}; text-decoration: none;\">{}</a>",
            if url.is_empty() { "#".to_string() } else { url },
            primary,
            platform
        ));
    }
    ctx.close_row();
}

fn compile_footer(block: &Block, ctx: &mut Context) {
    let color = text(block, "color");

    ctx.open_row(&format!("align=\"center\" style=\"{}\"", ROW_PADDING));
    ctx.add_line(&format!(
        "<p style=\"margin: 0 0 8px; color: {}; font-size: 12px;\">{}</p>",
        color,
        paragraph(block, "text")
    ));
    ctx.add_line(&format!(
        "<a href=\"{}\" style=\"color: {}; font-size: 12px;\">Unsubscribe</a>",
        text(block, "unsubscribeUrl"),
        color
    ));
    ctx.close_row();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(2500.0), "2,500");
        assert_eq!(format_amount(1234567.5), "1,234,567.50");
        assert_eq!(format_amount(-999.0), "-999");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(32.0), "32");
        assert_eq!(format_number(1.5), "1.50");
    }
}
