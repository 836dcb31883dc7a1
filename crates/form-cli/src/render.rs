use handlebars::Handlebars;
use serde::Serialize;

use form_spec::{FormResult, FormSpec};

use crate::CliResult;

#[derive(Serialize)]
struct TemplateContext<'a> {
    title: Option<&'a str>,
    answers: &'a FormResult,
}

/// Renders `template` with `title` and `answers` in scope. Values are not
/// HTML-escaped; the output goes to a terminal.
pub(crate) fn template(template: &str, spec: &FormSpec, answers: &FormResult) -> CliResult<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    let context = TemplateContext {
        title: spec.title(),
        answers,
    };
    Ok(handlebars.render_template(template, &context)?)
}

pub(crate) fn encode_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{:02x}", byte)).collect()
}
