use tera::{Context, Tera};

use crate::answers::AnswersMap;
use crate::error::{Result, ScaffoldError};
use crate::render::placeholders::check_placeholders;

fn engine() -> Tera {
    let mut tera = Tera::default();
    // Metadata files are XML; answers go in verbatim
    tera.autoescape_on(vec![]);
    tera
}

/// Parse `text`, check that every answer it reads is present, then render it.
fn render_checked(
    text: &str,
    file: &str,
    answers: &AnswersMap,
    context: &Context,
    wrap: impl Fn(tera::Error) -> ScaffoldError,
) -> Result<String> {
    const NAME: &str = "__bundle_file__";

    let mut tera = engine();
    tera.add_raw_template(NAME, text).map_err(&wrap)?;
    let template = tera.get_template(NAME).map_err(&wrap)?;
    check_placeholders(&template.ast, answers, file)?;

    tera.render(NAME, context).map_err(wrap)
}

/// Render the contents of the bundle file `file`.
pub fn render_file_content(
    file: &str,
    text: &str,
    answers: &AnswersMap,
    context: &Context,
) -> Result<String> {
    render_checked(text, file, answers, context, |e| ScaffoldError::RenderError {
        file: file.to_string(),
        source: e,
    })
}

/// Render template expressions in one component of the bundle path `file`
/// (e.g. `{{appname}}.app`).
pub fn render_path_component(
    component: &str,
    file: &str,
    answers: &AnswersMap,
    context: &Context,
) -> Result<String> {
    render_checked(component, file, answers, context, |e| {
        ScaffoldError::FilenameRenderError {
            filename: file.to_string(),
            source: e,
        }
    })
}

/// Detect binary content using content_inspector (BOM-aware, null-byte scanning).
///
/// Only the first 8KB are inspected.
pub fn is_binary(content: &[u8]) -> bool {
    let head = &content[..content.len().min(8192)];
    !content_inspector::inspect(head).is_text()
}
