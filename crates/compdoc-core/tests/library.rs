use compdoc_common::{ComponentDocument, EventSource, PropertyDescriptor};
use compdoc_core::{Generator, GeneratorConfig, NoProse, OutputFormat};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const ANCHOR_PROPS: &str = r#"
import { BaseProps } from "../../base/base-props";

export class AnchorProps extends BaseProps {
    caption: string;
    disabled?: boolean = false;
    onNavigate?: (url: string) => void;
}
"#;

const ANCHOR: &str = r#"
import { Component } from "../../base/component";
import { AnchorProps } from "./anchor-props";

export const DEFAULT_CLASS = "app-anchor";

export class Anchor extends Component<AnchorProps> {
    constructor(props: AnchorProps) {
        super(props);
        this.addStyle(DEFAULT_CLASS);
        this.addStyle(DEFAULT_CLASS + "-rtl");
        this.addStyle("link-primary");
    }

    public navigate(url: string, replace?: boolean): void {}

    render(): string {
        return "<a></a>";
    }
}
"#;

const ANCHOR_COMPILED: &str = r#"
export class Anchor extends Component {
    navigate(url, replace) {
        this.emit("onNavigate", url, replace);
        this.emit("onBlur");
    }
}
"#;

fn write_artifact(root: &Path, relative: &str, source: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let artifact = serde_json::json!({
        "version": 3,
        "sources": [format!("../src/{}", relative.replace(".js.map", ".ts"))],
        "sourcesContent": [source],
    });
    fs::write(path, artifact.to_string()).unwrap();
}

fn library() -> TempDir {
    let lib = TempDir::new().unwrap();
    let root = lib.path();
    write_artifact(root, "components/navigation/anchor/anchor-props.js.map", ANCHOR_PROPS);
    write_artifact(root, "components/navigation/anchor/anchor.js.map", ANCHOR);
    fs::write(root.join("components/navigation/anchor/anchor.js"), ANCHOR_COMPILED).unwrap();
    write_artifact(
        root,
        "components/inputs/field/field-props.js.map",
        "export class FieldProps extends UiControlProps { value: string; }",
    );
    write_artifact(
        root,
        "components/inputs/orphan/orphan-props.js.map",
        "export class OrphanProps extends MissingProps { label: string; }",
    );
    write_artifact(
        root,
        "base/control/control-props.js.map",
        "export class UiControlProps extends BaseProps { value?: number; required?: boolean; }",
    );
    fs::create_dir_all(root.join("components/inputs/notes")).unwrap();
    fs::write(root.join("components/inputs/notes/README.md"), "no artifacts").unwrap();
    lib
}

fn config() -> GeneratorConfig {
    GeneratorConfig::from_json(
        r#"{
            "includeAll": true,
            "aliases": { "link": "anchor" },
            "inheritance": { "prefixes": ["Ui"] }
        }"#,
    )
    .unwrap()
}

fn generate(lib: &TempDir) -> Vec<ComponentDocument> {
    Generator::new(lib.path(), config())
        .with_root_properties(vec![PropertyDescriptor::new("id", "string")])
        .generate_all()
}

fn find<'d>(docs: &'d [ComponentDocument], name: &str) -> &'d ComponentDocument {
    docs.iter().find(|d| d.name() == name).unwrap()
}

#[test]
fn own_properties_precede_inherited_root_properties() {
    let lib = library();
    let docs = generate(&lib);
    let anchor = find(&docs, "anchor");

    assert_eq!(anchor.base_class(), Some("BaseProps"));
    assert_eq!(
        &anchor.props()[..3],
        &[
            PropertyDescriptor::new("caption", "string"),
            PropertyDescriptor::new("disabled", "boolean")
                .optional()
                .with_default("false"),
            PropertyDescriptor::new("onNavigate", "(url: string) => void").optional(),
        ]
    );
    assert_eq!(
        anchor.props()[3],
        PropertyDescriptor::new("id", "string").inherit_from("BaseProps")
    );
}

#[test]
fn styles_methods_and_events_are_assembled() {
    let lib = library();
    let docs = generate(&lib);
    let anchor = find(&docs, "anchor");

    let styles: Vec<&str> = anchor.styles().iter().map(|s| s.class_name.as_str()).collect();
    assert_eq!(styles, vec!["app-anchor", "app-anchor-rtl", "link-primary"]);
    assert_eq!(anchor.styles().iter().filter(|s| s.is_default()).count(), 1);

    let methods: Vec<&str> = anchor.methods().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(methods, vec!["navigate"]);

    let events = anchor.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].name, "onNavigate");
    assert_eq!(events[0].parameters, "url, replace");
    assert_eq!(events[0].source, EventSource::CallSite);
    assert_eq!(events[1].name, "onBlur");
}

#[test]
fn inherited_chain_through_prefixed_ancestor() {
    let lib = library();
    let docs = generate(&lib);
    let field = find(&docs, "field");

    let props: Vec<(&str, Option<&str>)> = field
        .props()
        .iter()
        .map(|p| (p.name.as_str(), p.inherited_from.as_deref()))
        .collect();
    assert_eq!(
        props,
        vec![
            ("value", None),
            ("required", Some("UiControlProps")),
            ("id", Some("BaseProps")),
        ]
    );
}

#[test]
fn unresolved_ancestor_keeps_own_properties() {
    let lib = library();
    let docs = generate(&lib);
    let orphan = find(&docs, "orphan");

    assert_eq!(orphan.base_class(), Some("MissingProps"));
    assert_eq!(orphan.props(), &[PropertyDescriptor::new("label", "string")]);
}

#[test]
fn directory_without_artifacts_is_not_generated() {
    let lib = library();
    let docs = generate(&lib);

    assert!(docs.iter().all(|d| d.name() != "notes"));
    assert_eq!(docs.len(), 4);
}

#[test]
fn alias_mirrors_source_and_comes_last() {
    let lib = library();
    let docs = generate(&lib);
    let link = docs.last().unwrap();

    assert_eq!(link.name(), "link");
    assert!(link.is_alias());
    let anchor = find(&docs, "anchor");
    assert_eq!(link.props(), anchor.props());
    assert_eq!(link.methods(), anchor.methods());
    assert_eq!(link.events(), anchor.events());
    assert_eq!(link.styles(), anchor.styles());
    assert_ne!(link.name(), anchor.name());

    let json = serde_json::to_value(link).unwrap();
    assert_eq!(json["aliasOf"], "anchor");
    assert_eq!(json["category"], "navigation");
}

#[test]
fn exclusions_apply_to_generated_documents() {
    let lib = library();
    let mut config = config();
    config.exclusions.props.inherited = vec!["id".to_string()];
    config.exclusions.styles.global = vec!["link-primary".to_string()];
    let docs = Generator::new(lib.path(), config)
        .with_root_properties(vec![PropertyDescriptor::new("id", "string")])
        .generate_all();
    let anchor = find(&docs, "anchor");

    assert!(anchor.props().iter().all(|p| !p.inherited));
    assert!(anchor.styles().iter().all(|s| s.class_name != "link-primary"));
    // Aliases project the filtered source.
    assert_eq!(find(&docs, "link").props(), anchor.props());
}

#[test]
fn documents_are_written_per_component() {
    let lib = library();
    let docs = generate(&lib);
    let out = TempDir::new().unwrap();

    let written =
        compdoc_core::write_documents(out.path(), &docs, &NoProse, OutputFormat::Markdown).unwrap();

    assert_eq!(written.len(), docs.len());
    let link = fs::read_to_string(out.path().join("link.md")).unwrap();
    assert!(link.contains("link is an alias of anchor"));
}

#[test]
fn styles_come_from_separate_registration_module() {
    let lib = TempDir::new().unwrap();
    let root = lib.path();
    write_artifact(
        root,
        "components/navigation/anchor/anchor-props.js.map",
        "export class AnchorProps extends BaseProps { caption: string; }",
    );
    write_artifact(
        root,
        "components/navigation/anchor/anchor.js.map",
        r#"import { DEFAULT_CLASS } from "./anchor.styles";
export class Anchor extends Component<AnchorProps> {}"#,
    );
    write_artifact(
        root,
        "components/navigation/anchor/anchor.styles.js.map",
        "export const DEFAULT_CLASS = 'app-anchor'; addStyle(DEFAULT_CLASS); addStyle(DEFAULT_CLASS + '-rtl');",
    );

    let docs = Generator::new(root, config()).generate_all();
    let anchor = find(&docs, "anchor");

    let styles: Vec<&str> = anchor.styles().iter().map(|s| s.class_name.as_str()).collect();
    assert_eq!(styles, vec!["app-anchor", "app-anchor-rtl"]);
    assert!(anchor.styles()[0].is_default());
}
