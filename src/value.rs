use crate::index::IndexEntry;
use crate::post::PostPage;
use gtmpl_value::Value;
use std::collections::HashMap;

impl From<&PostPage> for Value {
    fn from(p: &PostPage) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("title".to_owned(), Value::String(p.title.clone()));
        m.insert("description".to_owned(), Value::String(p.description.clone()));
        m.insert("date".to_owned(), Value::String(p.date.clone()));
        m.insert("body".to_owned(), Value::String(p.body.clone()));
        m.insert("cta_text".to_owned(), Value::String(p.cta_text.clone()));
        m.insert("site_name".to_owned(), Value::String(p.site_name.clone()));
        m.insert("blog_name".to_owned(), Value::String(p.blog_name.clone()));
        Value::Object(m)
    }
}

// Title and snippet come from scraped HTML, so they're escaped here rather
// than in the template.
impl From<&IndexEntry> for Value {
    fn from(e: &IndexEntry) -> Value {
        use crate::util::{escape_html, truncate_chars};
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("url".to_owned(), Value::String(e.url.clone()));
        m.insert("title".to_owned(), Value::String(escape_html(&e.title)));
        m.insert("date".to_owned(), Value::String(e.date.clone()));
        m.insert(
            "snippet".to_owned(),
            Value::String(escape_html(truncate_chars(&e.snippet, 140))),
        );
        Value::Object(m)
    }
}
