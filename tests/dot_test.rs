use bandgraph::{DotConfig, Graph, NodeKind, Source};
use pretty_assertions::assert_eq;

#[test]
fn dot_full_document() {
    let input = "\
Metallica
  Dave Mustaine
Megadeth
  [lead] Dave Mustaine
  [guest] Jimmy DeGrasso
  {rivals} Metallica
";
    let output = bandgraph::render(input).unwrap();
    let expected = "\
digraph {
  layout=sfdp;
  sep=\"+12\";
  overlap=scale;
  splines=true;
  repulsiveforce=1.5;
  _0 [label=\"Metallica\" shape=box];
  _1 [label=\"Megadeth\" shape=box];
  _2 [label=\"Dave Mustaine\"];
  _3 [label=\"Jimmy DeGrasso\"];
  _2 -> _0 [];
  _2 -> _1 [label=\"lead\"];
  _3 -> _1 [style=dashed label=guest];
  _0 -> _1 [label=\"rivals\"];
}
";
    assert_eq!(output, expected);
}

#[test]
fn dot_empty_graph() {
    let output = Graph::new().render();
    assert!(output.starts_with("digraph {\n  layout=sfdp;\n"));
    assert!(output.contains("  repulsiveforce=1.5;\n"));
    assert!(output.ends_with("}\n"));
    assert_eq!(output.lines().count(), 7);
}

#[test]
fn dot_is_deterministic() {
    let input = "Low\n  Mimi Parker\n  Alan Sparhawk\nSwans\n  [guest] Mimi Parker\n";
    let first = bandgraph::render(input).unwrap();
    let second = bandgraph::render(input).unwrap();
    assert_eq!(first, second);
}

#[test]
fn dot_escapes_label_quotes() {
    let mut g = Graph::new();
    let band = g.add_group(r#"The "Quoted" \ Band"#);
    let person = g.add_person("Plain");
    g.labeled_edge(person, band, r#"said "hi""#, "style=dotted");
    let output = g.render();
    assert!(output.contains(r#"_0 [label="The \"Quoted\" \\ Band" shape=box];"#), "got: {output}");
    assert!(output.contains(r#"_1 -> _0 [label="said \"hi\"" style=dotted];"#), "got: {output}");
}

#[test]
fn dot_programmatic_construction() {
    let mut g = Graph::new();
    let low = g.add_group("Low");
    let gybe = g.add_group("Godspeed You! Black Emperor");
    let parker = g.add_person("Mimi Parker");
    let moss = g.add_node("Jessica Moss", NodeKind::Person, "color=gray");
    low.member(&mut g, parker);
    gybe.guest(&mut g, moss);
    g.edge(low, gybe, "label=\"live performance\" style=dotted dir=none");

    let output = g.render();
    assert!(output.contains("  _3 [label=\"Jessica Moss\" color=gray];\n"));
    assert!(output.contains("  _2 -> _0 [];\n"));
    assert!(output.contains("  _3 -> _1 [style=dashed label=guest];\n"));
    assert!(output.contains("  _0 -> _1 [label=\"live performance\" style=dotted dir=none];\n"));
}

#[test]
fn dot_custom_header() {
    let config = DotConfig::from_toml_str("layout = \"neato\"\nsep = \"0.3\"\nrepulsive_force = 2.5\n").unwrap();
    let output = bandgraph::render_with_options("Low\n", Source::Outline, &config).unwrap();
    let header: Vec<&str> = output.lines().take(6).collect();
    assert_eq!(
        header,
        vec![
            "digraph {",
            "  layout=neato;",
            "  sep=0.3;",
            "  overlap=scale;",
            "  splines=true;",
            "  repulsiveforce=2.5;",
        ]
    );
}

#[test]
fn dot_without_repulsive_force() {
    let config = DotConfig {
        repulsive_force: None,
        ..DotConfig::default()
    };
    let output = Graph::new().render_with(&config);
    assert!(!output.contains("repulsiveforce"));
}
