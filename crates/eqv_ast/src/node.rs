use serde::{Deserialize, Serialize};

/// Binary operator separating two operands inside a [`NodeSeq`].
///
/// `CMul` is multiplication the user wrote explicitly (`×`/`\cdot`);
/// `Mul` is the internal explicit form every multiplication is
/// normalized to before the term-level rules run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatorKind {
    Add,
    Sub,
    Mul,
    Div,
    CMul,
}

impl OperatorKind {
    pub fn is_additive(self) -> bool {
        matches!(self, OperatorKind::Add | OperatorKind::Sub)
    }

    pub fn is_multiplicative(self) -> bool {
        matches!(self, OperatorKind::Mul | OperatorKind::Div | OperatorKind::CMul)
    }
}

/// Sign prefix attached to the operand that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Pos,
    Neg,
}

impl Polarity {
    #[inline]
    pub fn negate(self) -> Polarity {
        match self {
            Polarity::Pos => Polarity::Neg,
            Polarity::Neg => Polarity::Pos,
        }
    }

    /// Combine two stacked signs.
    #[inline]
    pub fn combine(self, other: Polarity) -> Polarity {
        if self == other {
            Polarity::Pos
        } else {
            Polarity::Neg
        }
    }
}

/// One element of a parsed formula tree.
///
/// Values are immutable: every rule builds a fresh sequence instead of
/// mutating in place, so the rewrite engine can detect fixpoints by
/// structural comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Number(f64),
    Symbol(String),
    Operator(OperatorKind),
    Sign(Polarity),
    Power { base: NodeSeq, exponent: NodeSeq },
    Fraction { numerator: NodeSeq, denominator: NodeSeq },
    /// A parenthesized group, preserved until a rule flattens it.
    Delimited { body: NodeSeq },
}

impl Node {
    /// True for nodes that stand for a value (everything except
    /// operators and sign prefixes).
    pub fn is_operand(&self) -> bool {
        !matches!(self, Node::Operator(_) | Node::Sign(_))
    }

    pub fn as_operator(&self) -> Option<OperatorKind> {
        match self {
            Node::Operator(op) => Some(*op),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Node::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Node::Symbol(name) => Some(name),
            _ => None,
        }
    }
}

/// Ordered infix list of nodes, e.g. `[x, Operator(Add), y]`.
///
/// A sequence representing a sum or product alternates operand and
/// operator from the second position onward; sign prefixes attach to
/// the operand that follows them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeSeq(pub Vec<Node>);

impl NodeSeq {
    pub fn new(nodes: Vec<Node>) -> Self {
        NodeSeq(nodes)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.0.iter()
    }

    /// The sole node of a single-element sequence.
    pub fn single(&self) -> Option<&Node> {
        match self.0.as_slice() {
            [node] => Some(node),
            _ => None,
        }
    }

    /// True when the sequence holds a top-level `Add`/`Sub` operator,
    /// i.e. it denotes a sum of two or more terms.
    pub fn is_sum(&self) -> bool {
        self.iter()
            .any(|n| n.as_operator().is_some_and(|op| op.is_additive()))
    }

    /// Rebuild the sequence with every nested sub-sequence
    /// (`Power`/`Fraction`/`Delimited` bodies) replaced by `f`'s output.
    /// Top-level nodes are otherwise untouched.
    pub fn map_subseqs(&self, f: &mut impl FnMut(&NodeSeq) -> NodeSeq) -> NodeSeq {
        let nodes = self
            .iter()
            .map(|node| match node {
                Node::Power { base, exponent } => Node::Power {
                    base: f(base),
                    exponent: f(exponent),
                },
                Node::Fraction {
                    numerator,
                    denominator,
                } => Node::Fraction {
                    numerator: f(numerator),
                    denominator: f(denominator),
                },
                Node::Delimited { body } => Node::Delimited { body: f(body) },
                other => other.clone(),
            })
            .collect();
        NodeSeq(nodes)
    }
}

impl From<Vec<Node>> for NodeSeq {
    fn from(nodes: Vec<Node>) -> Self {
        NodeSeq(nodes)
    }
}

impl From<Node> for NodeSeq {
    fn from(node: Node) -> Self {
        NodeSeq(vec![node])
    }
}

impl FromIterator<Node> for NodeSeq {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        NodeSeq(iter.into_iter().collect())
    }
}

impl IntoIterator for NodeSeq {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a NodeSeq {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
