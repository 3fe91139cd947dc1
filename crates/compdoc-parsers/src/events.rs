//! Event inference.
//!
//! Events are never declared directly. They are inferred from callback-typed
//! properties (`onClick?: (event: MouseEvent) => void`) and from emitter calls
//! left in the compiled output (`this.emit("change", value)`).

use crate::syntax::*;
use crate::typescript::TypeScriptStructureParser;
use compdoc_common::{EventDescriptor, EventSource, PropertyDescriptor, Result};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static EVENT_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^on[A-Z0-9_]").unwrap());
static CALLBACK_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(Handler|Callback|Listener)$").unwrap());

/// Events implied by callback-typed `on*` properties, in property order.
pub fn events_from_properties(props: &[PropertyDescriptor]) -> Vec<EventDescriptor> {
    props
        .iter()
        .filter(|prop| EVENT_NAME.is_match(&prop.name))
        .filter_map(|prop| {
            let parameters = callable_parameters(&prop.type_annotation)?;
            Some(EventDescriptor::new(
                prop.name.clone(),
                parameters,
                EventSource::Property,
            ))
        })
        .collect()
}

impl TypeScriptStructureParser {
    /// Events emitted through configured emitter calls in compiled output.
    ///
    /// The first argument must be a string literal naming the event. A repeated
    /// event keeps its first call site.
    pub fn events_from_call_sites(&self, compiled: &str) -> Result<Vec<EventDescriptor>> {
        let tree = self.parse_tree(compiled)?;
        let mut events: Vec<EventDescriptor> = Vec::new();

        visit(tree.root_node(), &mut |node| {
            if node.kind() != "call_expression" {
                return;
            }
            let Some(callee) = node.child_by_field_name("function") else {
                return;
            };
            let callee_name = match callee.kind() {
                "identifier" => Some(node_text(&callee, compiled)),
                "member_expression" => field_text(&callee, "property", compiled),
                _ => None,
            };
            if !callee_name.is_some_and(|name| self.conventions.is_event_emitter(name.trim())) {
                return;
            }

            let Some(arguments) = node.child_by_field_name("arguments") else {
                return;
            };
            let arguments = named_children(&arguments);
            let Some(name) = arguments
                .first()
                .filter(|first| first.kind() == "string")
                .and_then(|first| unquote(node_text(first, compiled)))
            else {
                return;
            };

            if events.iter().any(|e| e.name == name) {
                return;
            }
            let parameters: Vec<&str> = arguments[1..]
                .iter()
                .map(|arg| node_text(arg, compiled).trim())
                .collect();
            events.push(EventDescriptor::new(
                name,
                parameters.join(", "),
                EventSource::CallSite,
            ));
        });

        debug!("Found {} call-site events", events.len());
        Ok(events)
    }
}

/// Parameter text of a callable property type, or `None` when it is not callable.
///
/// `((e: Event) => void) | undefined` yields `e: Event`. A union of several
/// callables is kept verbatim, without `undefined` and `null`.
fn callable_parameters(type_annotation: &str) -> Option<String> {
    let members: Vec<&str> = split_top_level(type_annotation, '|')
        .into_iter()
        .map(str::trim)
        .filter(|member| !member.is_empty() && !matches!(*member, "undefined" | "null"))
        .collect();
    if members.is_empty() || !members.iter().all(|member| is_callable(member)) {
        return None;
    }

    match members.as_slice() {
        [member] => Some(parameter_text(strip_wrapping_parens(member))),
        _ => Some(members.join(" | ")),
    }
}

fn is_callable(member: &str) -> bool {
    let member = strip_wrapping_parens(member);
    top_level_arrow(member).is_some()
        || member == "Function"
        || CALLBACK_TYPE.is_match(strip_type_arguments(member))
}

/// `(a: A, b: B) => R` yields `a: A, b: B`; other callables are kept verbatim.
fn parameter_text(signature: &str) -> String {
    if let Some(arrow) = top_level_arrow(signature) {
        let params = signature[..arrow].trim();
        if let Some(inner) = params.strip_prefix('(').and_then(|p| p.strip_suffix(')')) {
            return inner.trim().to_string();
        }
    }
    signature.to_string()
}

/// Byte offset of the first `=>` outside any bracket pair.
fn top_level_arrow(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0i32;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'=' if depth == 0 && bytes.get(i + 1) == Some(&b'>') => return Some(i),
            b'=' if bytes.get(i + 1) == Some(&b'>') => i += 1,
            b'(' | b'<' | b'{' | b'[' => depth += 1,
            b')' | b'>' | b'}' | b']' => depth -= 1,
            _ => {}
        }
        i += 1;
    }
    None
}

fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    let mut previous = '\0';
    for (i, c) in text.char_indices() {
        match c {
            '(' | '<' | '{' | '[' => depth += 1,
            '>' if previous == '=' => {}
            ')' | '>' | '}' | ']' => depth -= 1,
            c if c == separator && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
        previous = c;
    }
    parts.push(&text[start..]);
    parts
}

/// Remove parentheses that enclose the whole text.
fn strip_wrapping_parens(text: &str) -> &str {
    let mut current = text.trim();
    while current.starts_with('(') && current.ends_with(')') {
        let inner = &current[1..current.len() - 1];
        // `(a) => (b)` starts and ends with parens without being wrapped.
        if !balanced(inner) {
            break;
        }
        current = inner.trim();
    }
    current
}

fn balanced(text: &str) -> bool {
    let mut depth = 0i32;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParserConventions;

    #[test]
    fn test_callback_properties_become_events() {
        let props = vec![
            PropertyDescriptor::new("caption", "string"),
            PropertyDescriptor::new("onClick", "(event: MouseEvent, source: string) => void")
                .optional(),
            PropertyDescriptor::new("onClose", "((reason: string) => void) | undefined"),
            PropertyDescriptor::new("onFocus", "FocusHandler"),
            PropertyDescriptor::new("onReady", "Function"),
            PropertyDescriptor::new("onlyOnce", "() => void"),
            PropertyDescriptor::new("onLabel", "string"),
            PropertyDescriptor::new("onChange", "ChangeListener<string> | null"),
        ];
        let events = events_from_properties(&props);

        let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["onClick", "onClose", "onFocus", "onReady", "onChange"]);
        assert_eq!(events[0].parameters, "event: MouseEvent, source: string");
        assert_eq!(events[1].parameters, "reason: string");
        assert_eq!(events[2].parameters, "FocusHandler");
        assert_eq!(events[3].parameters, "Function");
        assert_eq!(events[4].parameters, "ChangeListener<string>");
        assert!(events.iter().all(|e| e.event_type == "function"));
        assert!(events.iter().all(|e| e.source == EventSource::Property));
    }

    #[test]
    fn test_union_of_callables_keeps_type_text() {
        let props = vec![
            PropertyDescriptor::new(
                "onChange",
                "((value: string) => void) | ((value: number) => void) | undefined",
            ),
            PropertyDescriptor::new("onInput", "((value: string) => void) | string"),
        ];
        let events = events_from_properties(&props);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "onChange");
        assert_eq!(
            events[0].parameters,
            "((value: string) => void) | ((value: number) => void)"
        );
    }

    #[test]
    fn test_arrow_returning_callable() {
        assert_eq!(
            parameter_text("(factory: () => string) => Promise<void>"),
            "factory: () => string"
        );
        assert_eq!(top_level_arrow("Map<string, () => void>"), None);
    }

    #[test]
    fn test_emitter_call_sites() {
        let compiled = r#"
class Anchor extends Component {
    handleClick(event) {
        this.emit("onClick", event, this.props.caption);
        fireEvent('onHover');
        this.emit(eventName, event);
        this.emit("onClick", "duplicate");
        this.dispatch("onIgnored", event);
    }
}
"#;
        let events = TypeScriptStructureParser::new()
            .events_from_call_sites(compiled)
            .unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name, "onClick");
        assert_eq!(events[0].parameters, "event, this.props.caption");
        assert_eq!(events[0].source, EventSource::CallSite);
        assert_eq!(events[1].name, "onHover");
        assert_eq!(events[1].parameters, "");
    }

    #[test]
    fn test_custom_emitters() {
        let conventions = ParserConventions {
            event_emitters: vec!["dispatch".to_string()],
            ..ParserConventions::default()
        };
        let events = TypeScriptStructureParser::with_conventions(conventions)
            .events_from_call_sites(r#"this.dispatch("select", index); this.emit("x");"#)
            .unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "select");
        assert_eq!(events[0].parameters, "index");
    }
}
