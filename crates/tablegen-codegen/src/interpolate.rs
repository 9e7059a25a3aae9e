use anyhow::{bail, Result};
use indexmap::IndexMap;

/// Key-value substitution map for one template render.
#[derive(Debug, Default)]
pub struct Interpolations {
    values: IndexMap<String, String>,
}

impl Interpolations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// A source-file template with `{{key}}` markers.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    source: &'static str,
}

impl Template {
    pub const fn new(source: &'static str) -> Self {
        Self { source }
    }

    /// Substitute every marker. A marker without a value is an error: a
    /// half-rendered file must never reach disk.
    pub fn render(&self, values: &Interpolations) -> Result<String> {
        let mut out = String::with_capacity(self.source.len());
        let mut rest = self.source;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let Some(end) = after.find("}}") else {
                bail!("unterminated template marker");
            };
            let key = &after[..end];
            match values.get(key) {
                Some(value) => out.push_str(value),
                None => bail!("no interpolation value for marker {{{{{key}}}}}"),
            }
            rest = &after[end + 2..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_markers() {
        let template = Template::new("hello {{name}}, {{greeting}}");
        let mut values = Interpolations::new();
        values.set("name", "world").set("greeting", "hi");
        assert_eq!(template.render(&values).unwrap(), "hello world, hi");
    }

    #[test]
    fn unknown_marker_is_an_error() {
        let template = Template::new("{{missing}}");
        let err = Template::render(&template, &Interpolations::new()).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn unterminated_marker_is_an_error() {
        let template = Template::new("{{oops");
        assert!(template.render(&Interpolations::new()).is_err());
    }
}
