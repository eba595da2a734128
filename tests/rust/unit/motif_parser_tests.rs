use relgraph::motif_parser::ast::{EdgePattern, MotifTerm, VertexPattern};
use relgraph::motif_parser::parse_motif;
use test_case::test_case;

#[test]
fn test_full_motif_with_negation() {
    let terms = parse_motif("(a)-[e1]->(b); (b)-[e2]->(c); !(c)-[]->(a)").unwrap();
    assert_eq!(terms.len(), 3);
    assert_eq!(
        terms[0],
        MotifTerm::Edge(EdgePattern {
            name: Some("e1"),
            src: VertexPattern::named("a"),
            dst: VertexPattern::named("b"),
        })
    );
    assert_eq!(
        terms[2],
        MotifTerm::Negation(EdgePattern {
            name: None,
            src: VertexPattern::named("c"),
            dst: VertexPattern::named("a"),
        })
    );
}

#[test]
fn test_vertex_only_motifs() {
    assert_eq!(
        parse_motif("(a); (b)").unwrap(),
        vec![
            MotifTerm::Vertex(VertexPattern::named("a")),
            MotifTerm::Vertex(VertexPattern::named("b")),
        ]
    );
}

#[test_case("" ; "empty string")]
#[test_case("  \n\t " ; "whitespace only")]
fn test_empty_input_is_an_empty_sequence(motif: &str) {
    assert_eq!(parse_motif(motif).unwrap(), vec![]);
}

#[test_case("(a)-[e]->(b);" ; "trailing separator")]
#[test_case("(a) (b)" ; "missing separator")]
#[test_case("!(a)" ; "negated vertex")]
#[test_case("(a)<-[e]-(b)" ; "reversed arrow is not part of the grammar")]
#[test_case("-[e]->(b)" ; "edge without source")]
fn test_rejected_motifs(motif: &str) {
    assert!(parse_motif(motif).is_err(), "expected `{}` to be rejected", motif);
}

#[test]
fn test_error_display_names_the_offending_input() {
    let err = parse_motif("(a)-[e]->(b) junk").unwrap_err();
    let rendered = err.to_string();
    assert!(rendered.contains("junk"), "got: {}", rendered);
}
