//! Event synthesis: one list from the two inference sources.

use compdoc_common::EventDescriptor;
use std::collections::HashMap;

/// Merge property-inferred and call-site-inferred events by name.
///
/// Property events keep their order. A call-site event with the same name
/// replaces the property entry in place; new names are appended.
pub fn synthesize_events(
    property_events: Vec<EventDescriptor>,
    call_site_events: Vec<EventDescriptor>,
) -> Vec<EventDescriptor> {
    let mut event_map: HashMap<String, EventDescriptor> = HashMap::new();
    let mut event_order: Vec<String> = Vec::new();

    for event in property_events.into_iter().chain(call_site_events) {
        if !event_map.contains_key(&event.name) {
            event_order.push(event.name.clone());
        }
        event_map.insert(event.name.clone(), event);
    }

    event_order
        .into_iter()
        .filter_map(|name| event_map.remove(&name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use compdoc_common::EventSource;

    #[test]
    fn test_call_site_wins_in_place() {
        let merged = synthesize_events(
            vec![
                EventDescriptor::new("onClick", "event: MouseEvent", EventSource::Property),
                EventDescriptor::new("onFocus", "FocusHandler", EventSource::Property),
            ],
            vec![
                EventDescriptor::new("onHover", "", EventSource::CallSite),
                EventDescriptor::new("onClick", "event, caption", EventSource::CallSite),
            ],
        );

        let names: Vec<&str> = merged.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["onClick", "onFocus", "onHover"]);
        assert_eq!(merged[0].parameters, "event, caption");
        assert_eq!(merged[0].source, EventSource::CallSite);
        assert_eq!(merged[1].source, EventSource::Property);
    }

    #[test]
    fn test_names_are_unique() {
        let merged = synthesize_events(
            vec![EventDescriptor::new("onChange", "value: string", EventSource::Property)],
            vec![EventDescriptor::new("onChange", "value", EventSource::CallSite)],
        );
        assert_eq!(merged.len(), 1);
        assert!(synthesize_events(Vec::new(), Vec::new()).is_empty());
    }
}
