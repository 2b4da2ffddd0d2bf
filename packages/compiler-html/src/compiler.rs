use crate::blocks::compile_block;
use broadsheet_schema::{Document, GlobalStyle};

/// Options for HTML compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Emit `<!DOCTYPE html>` before the document
    pub include_doctype: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            include_doctype: true,
        }
    }
}

/// Width of the centered content column
pub(crate) const CONTENT_WIDTH: u32 = 600;

pub(crate) struct Context<'a> {
    options: &'a CompileOptions,
    pub(crate) style: &'a GlobalStyle,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    fn new(options: &'a CompileOptions, style: &'a GlobalStyle) -> Self {
        Self {
            options,
            style,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub(crate) fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    pub(crate) fn indent(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    /// Open `<tr><td style=..>` for one block row
    pub(crate) fn open_row(&mut self, td_attrs: &str) {
        self.add_line("<tr>");
        self.indent();
        self.add_line(&format!("<td {}>", td_attrs));
        self.indent();
    }

    pub(crate) fn close_row(&mut self) {
        self.dedent();
        self.add_line("</td>");
        self.dedent();
        self.add_line("</tr>");
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Compile a document to a standalone HTML page.
///
/// Never fails: unknown block types render as nothing and missing or
/// malformed fields fall back to registry defaults.
pub fn compile_to_html(document: &Document, options: &CompileOptions) -> String {
    let mut ctx = Context::new(options, &document.global_style);

    if options.include_doctype {
        ctx.add_line("<!DOCTYPE html>");
    }
    ctx.add_line("<html lang=\"en\">");
    ctx.indent();

    compile_head(document, &mut ctx);

    let style = &document.global_style;
    ctx.add_line(&format!(
        "<body style=\"margin: 0; padding: 0; background-color: {}; font-family: {};\">",
        escape_html(&style.background_color),
        escape_html(&style.font_family)
    ));
    ctx.indent();
    ctx.add_line(&format!(
        "<table role=\"presentation\" width=\"100%\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\" style=\"background-color: {};\">",
        escape_html(&style.background_color)
    ));
    ctx.indent();
    ctx.open_row("align=\"center\" style=\"padding: 24px 0;\"");
    ctx.add_line(&format!(
        "<table role=\"presentation\" width=\"{0}\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\" style=\"max-width: {0}px; width: 100%; background-color: #ffffff;\">",
        CONTENT_WIDTH
    ));
    ctx.indent();

    for block in &document.blocks {
        compile_block(block, &mut ctx);
    }

    ctx.dedent();
    ctx.add_line("</table>");
    ctx.close_row();
    ctx.dedent();
    ctx.add_line("</table>");
    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    let html = ctx.get_output();
    tracing::debug!(
        "Rendered {} blocks into {} bytes of HTML",
        document.blocks.len(),
        html.len()
    );
    html
}

/// Render with default options
pub fn render(document: &Document) -> String {
    compile_to_html(document, &CompileOptions::default())
}

fn compile_head(document: &Document, ctx: &mut Context) {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line(&format!("<title>{}</title>", escape_html(document_title(document))));

    ctx.dedent();
    ctx.add_line("</head>");
}

fn document_title(document: &Document) -> &str {
    let subject = document.metadata.subject_line.trim();
    if subject.is_empty() {
        &document.metadata.name
    } else {
        subject
    }
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
