//! The fixed page templates. They're compiled into the binary so a site's
//! look can't drift between runs.

use gtmpl::{Context, Template};
use gtmpl_value::Value;

/// The template for post pages.
pub const POST_TEMPLATE: &str = include_str!("../templates/post.html");

/// The template for the blog index page.
pub const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Parses `source` and executes it against `value`. Errors are returned as
/// the template engine's message.
pub fn render(source: &str, value: Value) -> Result<String, String> {
    let mut template = Template::default();
    template.parse(source).map_err(|e| e.to_string())?;

    let mut out: Vec<u8> = Vec::new();
    template
        .execute(
            &mut out,
            &Context::from(value).map_err(|e| e.to_string())?,
        )
        .map_err(|e| e.to_string())?;
    String::from_utf8(out).map_err(|e| e.to_string())
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_render_object() -> Result<(), String> {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("name".to_owned(), Value::String("world".to_owned()));
        assert_eq!("hello world", render("hello {{.name}}", Value::Object(m))?);
        Ok(())
    }

    #[test]
    fn test_render_does_not_escape() -> Result<(), String> {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("body".to_owned(), Value::String("<p>x</p>".to_owned()));
        assert_eq!("<p>x</p>", render("{{.body}}", Value::Object(m))?);
        Ok(())
    }

    #[test]
    fn test_templates_parse() {
        for source in &[POST_TEMPLATE, INDEX_TEMPLATE] {
            let mut template = Template::default();
            assert!(template.parse(*source).is_ok());
        }
    }
}
