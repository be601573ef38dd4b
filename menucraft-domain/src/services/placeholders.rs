// Placeholder engine
// Templates are sequences of literal text and {name} or {name: argument}
// tokens. Tokens registered as static resolve from the registry; everything
// else is asked of the viewer at render time. Unknown tokens render as their
// original text so configuration mistakes stay visible without breaking the
// menu.

use std::collections::HashMap;

use crate::ports::Viewer;

/// Registry of globally-static placeholders (operator-defined constants).
/// Whether a template counts as dynamic depends on this registry, so the
/// classification is recomputed against it on every call rather than stored.
#[derive(Debug, Default, Clone)]
pub struct PlaceholderRegistry {
    static_placeholders: HashMap<String, String>,
}

impl PlaceholderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_static(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.static_placeholders.insert(name.into(), value.into());
    }

    pub fn is_static(&self, name: &str) -> bool {
        self.static_placeholders.contains_key(name)
    }

    pub fn resolve_static(&self, name: &str) -> Option<&str> {
        self.static_placeholders.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum TemplatePart {
    Literal(String),
    Placeholder {
        name: String,
        argument: Option<String>,
        // Original token text, echoed verbatim when the name resolves nowhere
        raw: String,
    },
}

/// A parsed template over literal text and named placeholder tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaceholderString {
    original: String,
    parts: Vec<TemplatePart>,
}

impl PlaceholderString {
    /// Parsing never fails: an unterminated '{' is kept as literal text.
    pub fn parse(text: &str) -> Self {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut rest = text;

        while let Some(open) = rest.find('{') {
            let after_open = &rest[open + 1..];
            match after_open.find('}') {
                None => {
                    literal.push_str(rest);
                    rest = "";
                    break;
                }
                Some(close) => {
                    literal.push_str(&rest[..open]);
                    let inner = &after_open[..close];
                    let raw = &rest[open..open + close + 2];
                    if !literal.is_empty() {
                        parts.push(TemplatePart::Literal(std::mem::take(&mut literal)));
                    }
                    let (name, argument) = match inner.split_once(':') {
                        Some((name, argument)) => {
                            (name.trim().to_string(), Some(argument.trim().to_string()))
                        }
                        None => (inner.trim().to_string(), None),
                    };
                    parts.push(TemplatePart::Placeholder {
                        name,
                        argument,
                        raw: raw.to_string(),
                    });
                    rest = &after_open[close + 1..];
                }
            }
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            parts.push(TemplatePart::Literal(literal));
        }

        Self {
            original: text.to_string(),
            parts,
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn has_placeholders(&self) -> bool {
        self.parts
            .iter()
            .any(|part| matches!(part, TemplatePart::Placeholder { .. }))
    }

    /// True when at least one token is not covered by the static registry and
    /// therefore depends on the viewer (or on time).
    pub fn has_dynamic_placeholders(&self, registry: &PlaceholderRegistry) -> bool {
        self.parts.iter().any(|part| match part {
            TemplatePart::Placeholder { name, .. } => !registry.is_static(name),
            TemplatePart::Literal(_) => false,
        })
    }

    pub fn resolve(&self, registry: &PlaceholderRegistry, viewer: &dyn Viewer) -> String {
        let mut out = String::with_capacity(self.original.len());
        for part in &self.parts {
            match part {
                TemplatePart::Literal(text) => out.push_str(text),
                TemplatePart::Placeholder { name, argument, raw } => {
                    if let Some(value) = registry.resolve_static(name) {
                        out.push_str(value);
                    } else if let Some(value) = viewer.placeholder(name, argument.as_deref()) {
                        out.push_str(&value);
                    } else {
                        out.push_str(raw);
                    }
                }
            }
        }
        out
    }
}

/// An ordered sequence of line templates (lore).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaceholderStringList {
    lines: Vec<PlaceholderString>,
}

impl PlaceholderStringList {
    pub fn parse(lines: &[String]) -> Self {
        Self {
            lines: lines.iter().map(|line| PlaceholderString::parse(line)).collect(),
        }
    }

    pub fn originals(&self) -> Vec<&str> {
        self.lines.iter().map(PlaceholderString::original).collect()
    }

    pub fn has_dynamic_placeholders(&self, registry: &PlaceholderRegistry) -> bool {
        self.lines
            .iter()
            .any(|line| line.has_dynamic_placeholders(registry))
    }

    pub fn resolve(&self, registry: &PlaceholderRegistry, viewer: &dyn Viewer) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| line.resolve(registry, viewer))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::ViewerId;
    use uuid::Uuid;

    struct StubViewer;

    impl Viewer for StubViewer {
        fn id(&self) -> ViewerId {
            ViewerId(Uuid::nil())
        }

        fn name(&self) -> &str {
            "Steve"
        }

        fn has_permission(&self, _node: &str) -> bool {
            true
        }

        fn send_message(&self, _message: &str) {}

        fn placeholder(&self, name: &str, argument: Option<&str>) -> Option<String> {
            match (name, argument) {
                ("player", None) => Some("Steve".to_string()),
                ("balance", Some("short")) => Some("1k".to_string()),
                _ => None,
            }
        }
    }

    #[test]
    fn literal_templates_have_no_placeholders() {
        let template = PlaceholderString::parse("Hello world");
        assert!(!template.has_placeholders());
        assert_eq!(
            template.resolve(&PlaceholderRegistry::new(), &StubViewer),
            "Hello world"
        );
    }

    #[test]
    fn viewer_placeholders_resolve_per_viewer() {
        let template = PlaceholderString::parse("Hi {player}, you own {balance: short}");
        assert_eq!(
            template.resolve(&PlaceholderRegistry::new(), &StubViewer),
            "Hi Steve, you own 1k"
        );
    }

    #[test]
    fn unknown_placeholders_render_as_their_original_text() {
        let template = PlaceholderString::parse("value: {nope}");
        assert_eq!(
            template.resolve(&PlaceholderRegistry::new(), &StubViewer),
            "value: {nope}"
        );
    }

    #[test]
    fn unterminated_token_stays_literal() {
        let template = PlaceholderString::parse("broken {player");
        assert!(!template.has_placeholders());
        assert_eq!(
            template.resolve(&PlaceholderRegistry::new(), &StubViewer),
            "broken {player"
        );
    }

    #[test]
    fn dynamic_classification_follows_the_registry() {
        let template = PlaceholderString::parse("Welcome to {server_name}");
        let mut registry = PlaceholderRegistry::new();
        assert!(template.has_dynamic_placeholders(&registry));

        // A reload may add custom static placeholders; the same template must
        // reclassify against the updated registry.
        registry.set_static("server_name", "Hypercube");
        assert!(!template.has_dynamic_placeholders(&registry));
        assert_eq!(
            template.resolve(&registry, &StubViewer),
            "Welcome to Hypercube"
        );
    }

    #[test]
    fn lists_are_dynamic_if_any_line_is() {
        let list = PlaceholderStringList::parse(&[
            "static line".to_string(),
            "hello {player}".to_string(),
        ]);
        assert!(list.has_dynamic_placeholders(&PlaceholderRegistry::new()));
        assert_eq!(
            list.resolve(&PlaceholderRegistry::new(), &StubViewer),
            vec!["static line".to_string(), "hello Steve".to_string()]
        );
    }
}
