use super::tags::{extract_tags, tag_for_template_name};
use crate::models::Template;

/// Insert a template skeleton into note content.
///
/// The skeleton goes after existing content (separated by a blank line) or
/// replaces blank content. A tag naming the template is appended on its own
/// line unless the content already carries it.
pub fn apply_template(content: &str, template: &Template) -> String {
    let skeleton = template.render();
    let mut out = if content.trim().is_empty() {
        skeleton
    } else {
        format!("{}\n\n{}", content.trim_end(), skeleton)
    };

    if let Some(tag) = tag_for_template_name(&template.name) {
        if !extract_tags(&out).contains(&tag) {
            out.push('\n');
            out.push_str(&tag);
        }
    }

    out
}
