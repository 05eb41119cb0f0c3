//! Parameterized Gremlin traversal builder.
//!
//! Values that come from data (ids, partition keys) are never spliced into
//! the script text. Each one becomes a named binding (`p0`, `p1`, ...) sent
//! alongside the script. Labels and property keys are `&'static str`, so
//! only compile-time constants reach the script itself.

use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    V(Option<String>),
    E,
    AddV(&'static str),
    AddE(&'static str),
    To(Traversal),
    Property(&'static str, String),
    In(&'static str),
    Out(&'static str),
    HasLabel(&'static str),
    Values(&'static str),
    Limit(u32),
    Count,
    Drop,
}

/// A traversal rooted at `g`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traversal {
    steps: Vec<Step>,
}

/// Rendered script text plus its bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub text: String,
    pub bindings: Vec<(String, String)>,
}

impl Traversal {
    /// `g.V()`
    pub fn vertices() -> Self {
        Self { steps: vec![Step::V(None)] }
    }

    /// `g.V(id)`
    pub fn vertex(id: &str) -> Self {
        Self { steps: vec![Step::V(Some(id.to_string()))] }
    }

    /// `g.E()`
    pub fn edges() -> Self {
        Self { steps: vec![Step::E] }
    }

    /// `g.addV(label)`
    pub fn add_vertex(label: &'static str) -> Self {
        Self { steps: vec![Step::AddV(label)] }
    }

    pub fn add_edge(mut self, label: &'static str) -> Self {
        self.steps.push(Step::AddE(label));
        self
    }

    pub fn to(mut self, target: Traversal) -> Self {
        self.steps.push(Step::To(target));
        self
    }

    pub fn property(mut self, key: &'static str, value: &str) -> Self {
        self.steps.push(Step::Property(key, value.to_string()));
        self
    }

    pub fn in_(mut self, edge_label: &'static str) -> Self {
        self.steps.push(Step::In(edge_label));
        self
    }

    pub fn out(mut self, edge_label: &'static str) -> Self {
        self.steps.push(Step::Out(edge_label));
        self
    }

    pub fn has_label(mut self, label: &'static str) -> Self {
        self.steps.push(Step::HasLabel(label));
        self
    }

    pub fn values(mut self, key: &'static str) -> Self {
        self.steps.push(Step::Values(key));
        self
    }

    pub fn limit(mut self, n: u32) -> Self {
        self.steps.push(Step::Limit(n));
        self
    }

    pub fn count(mut self) -> Self {
        self.steps.push(Step::Count);
        self
    }

    pub fn drop(mut self) -> Self {
        self.steps.push(Step::Drop);
        self
    }

    /// Render to Gremlin-Groovy with positional bindings.
    pub fn render(&self) -> Script {
        let mut text = String::new();
        let mut bindings = Vec::new();
        self.render_into(&mut text, &mut bindings);
        Script { text, bindings }
    }

    fn render_into(&self, out: &mut String, bindings: &mut Vec<(String, String)>) {
        out.push('g');
        for step in &self.steps {
            match step {
                Step::V(None) => out.push_str(".V()"),
                Step::V(Some(id)) => {
                    let name = bind(bindings, id);
                    let _ = write!(out, ".V({})", name);
                }
                Step::E => out.push_str(".E()"),
                Step::AddV(label) => {
                    let _ = write!(out, ".addV({})", literal(label));
                }
                Step::AddE(label) => {
                    let _ = write!(out, ".addE({})", literal(label));
                }
                Step::To(target) => {
                    out.push_str(".to(");
                    target.render_into(out, bindings);
                    out.push(')');
                }
                Step::Property(key, value) => {
                    let name = bind(bindings, value);
                    let _ = write!(out, ".property({}, {})", literal(key), name);
                }
                Step::In(label) => {
                    let _ = write!(out, ".in({})", literal(label));
                }
                Step::Out(label) => {
                    let _ = write!(out, ".out({})", literal(label));
                }
                Step::HasLabel(label) => {
                    let _ = write!(out, ".hasLabel({})", literal(label));
                }
                Step::Values(key) => {
                    let _ = write!(out, ".values({})", literal(key));
                }
                Step::Limit(n) => {
                    let _ = write!(out, ".limit({})", n);
                }
                Step::Count => out.push_str(".count()"),
                Step::Drop => out.push_str(".drop()"),
            }
        }
    }
}

fn bind(bindings: &mut Vec<(String, String)>, value: &str) -> String {
    let name = format!("p{}", bindings.len());
    bindings.push((name.clone(), value.to_string()));
    name
}

fn literal(ident: &str) -> String {
    debug_assert!(
        ident.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
        "labels and keys must be plain identifiers: {ident}"
    );
    format!("'{}'", ident)
}
