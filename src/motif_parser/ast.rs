/// A vertex reference inside a motif: `(name)` or the anonymous `()`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct VertexPattern<'a> {
    pub name: Option<&'a str>,
}

impl<'a> VertexPattern<'a> {
    pub fn named(name: &'a str) -> Self {
        VertexPattern { name: Some(name) }
    }

    pub fn anonymous() -> Self {
        VertexPattern { name: None }
    }
}

/// A directed edge between two vertex references: `(a)-[e]->(b)`.
/// The edge itself may be anonymous: `(a)-[]->(b)`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct EdgePattern<'a> {
    pub name: Option<&'a str>,
    pub src: VertexPattern<'a>,
    pub dst: VertexPattern<'a>,
}

/// One elementary term of a motif, in sequence order.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MotifTerm<'a> {
    Vertex(VertexPattern<'a>),
    Edge(EdgePattern<'a>),
    /// `!(a)-[e]->(b)`: asserts no such edge exists given prior bindings.
    Negation(EdgePattern<'a>),
}
