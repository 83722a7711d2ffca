//! Mathematical symbol glossary

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::{debug, instrument};

use crate::search::{FuzzySearcher, SearchField, SearchHit, Searchable};

/// Closed set of glossary sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolCategory {
    Arithmetic,
    Algebra,
    Geometry,
    Calculus,
    SetTheory,
    Logic,
    LinearAlgebra,
    Probability,
    Greek,
}

impl SymbolCategory {
    pub fn all() -> &'static [Self] {
        &[
            Self::Arithmetic,
            Self::Algebra,
            Self::Geometry,
            Self::Calculus,
            Self::SetTheory,
            Self::Logic,
            Self::LinearAlgebra,
            Self::Probability,
            Self::Greek,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Arithmetic => "Arithmetic",
            Self::Algebra => "Algebra",
            Self::Geometry => "Geometry",
            Self::Calculus => "Calculus",
            Self::SetTheory => "Set Theory",
            Self::Logic => "Logic",
            Self::LinearAlgebra => "Linear Algebra",
            Self::Probability => "Probability & Statistics",
            Self::Greek => "Greek Letters",
        }
    }
}

impl std::fmt::Display for SymbolCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A glossary entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    pub id: u32,
    /// The glyph itself
    pub symbol: String,
    pub name: String,
    pub category: SymbolCategory,
    pub meaning: String,
    pub example: String,
    pub latex: String,
}

impl Symbol {
    pub fn new(
        id: u32,
        symbol: impl Into<String>,
        name: impl Into<String>,
        category: SymbolCategory,
    ) -> Self {
        Self {
            id,
            symbol: symbol.into(),
            name: name.into(),
            category,
            meaning: String::new(),
            example: String::new(),
            latex: String::new(),
        }
    }

    pub fn with_meaning(mut self, meaning: impl Into<String>) -> Self {
        self.meaning = meaning.into();
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = example.into();
        self
    }

    pub fn with_latex(mut self, latex: impl Into<String>) -> Self {
        self.latex = latex.into();
        self
    }
}

impl Searchable for Symbol {
    fn field(&self, key: &str) -> Option<Cow<'_, str>> {
        match key {
            "symbol" => Some(Cow::Borrowed(&self.symbol)),
            "name" => Some(Cow::Borrowed(&self.name)),
            "meaning" => Some(Cow::Borrowed(&self.meaning)),
            "example" => Some(Cow::Borrowed(&self.example)),
            "latex" => Some(Cow::Borrowed(&self.latex)),
            "category" => Some(Cow::Borrowed(self.category.display_name())),
            _ => None,
        }
    }
}

/// The symbol glossary
#[derive(Debug)]
pub struct SymbolGlossary {
    symbols: Vec<Symbol>,
    searcher: FuzzySearcher,
}

impl Default for SymbolGlossary {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl SymbolGlossary {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self {
            symbols,
            searcher: FuzzySearcher::new(vec![
                SearchField::exact("symbol", 4.0),
                SearchField::new("name", 3.0),
                SearchField::exact("latex", 2.0),
                SearchField::new("meaning", 1.0),
            ]),
        }
    }

    /// Built-in glossary
    pub fn standard() -> Self {
        Self::new(standard_symbols())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn all(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn get(&self, id: u32) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.id == id)
    }

    pub fn by_category(&self, category: SymbolCategory) -> Vec<&Symbol> {
        self.symbols
            .iter()
            .filter(|s| s.category == category)
            .collect()
    }

    /// Categories that have at least one symbol, with counts, in declaration order
    pub fn categories(&self) -> Vec<(SymbolCategory, usize)> {
        SymbolCategory::all()
            .iter()
            .map(|c| (*c, self.symbols.iter().filter(|s| s.category == *c).count()))
            .filter(|(_, count)| *count > 0)
            .collect()
    }

    /// Ranked search over glyph, name, LaTeX command and meaning
    #[instrument(name = "mathstar.symbols.search", skip(self), fields(result_count = tracing::field::Empty))]
    pub fn search(&self, query: &str) -> Vec<SearchHit<'_, Symbol>> {
        let hits = self.searcher.search(&self.symbols, query);
        tracing::Span::current().record("result_count", hits.len());
        hits
    }

    /// Symbols whose ids appear in `ids`, glossary order
    pub fn favorites(&self, ids: &[u32]) -> Vec<&Symbol> {
        let found: Vec<_> = self
            .symbols
            .iter()
            .filter(|s| ids.contains(&s.id))
            .collect();
        debug!(requested = ids.len(), found = found.len(), "Resolved favorite symbols");
        found
    }
}

fn standard_symbols() -> Vec<Symbol> {
    use SymbolCategory::*;
    vec![
        Symbol::new(1, "+", "Plus", Arithmetic)
            .with_meaning("Addition")
            .with_example("2 + 3 = 5")
            .with_latex("+"),
        Symbol::new(2, "×", "Times", Arithmetic)
            .with_meaning("Multiplication")
            .with_example("4 × 3 = 12")
            .with_latex("\\times"),
        Symbol::new(3, "÷", "Division sign", Arithmetic)
            .with_meaning("Division")
            .with_example("12 ÷ 4 = 3")
            .with_latex("\\div"),
        Symbol::new(4, "≠", "Not equal", Arithmetic)
            .with_meaning("Two values differ")
            .with_example("3 ≠ 4")
            .with_latex("\\neq"),
        Symbol::new(5, "≈", "Approximately equal", Arithmetic)
            .with_meaning("Values are close")
            .with_example("π ≈ 3.14")
            .with_latex("\\approx"),
        Symbol::new(6, "√", "Square root", Algebra)
            .with_meaning("Number whose square is the argument")
            .with_example("√9 = 3")
            .with_latex("\\sqrt{x}"),
        Symbol::new(7, "|x|", "Absolute value", Algebra)
            .with_meaning("Distance from zero")
            .with_example("|-5| = 5")
            .with_latex("|x|"),
        Symbol::new(8, "∝", "Proportional to", Algebra)
            .with_meaning("Varies in constant ratio")
            .with_example("y ∝ x")
            .with_latex("\\propto"),
        Symbol::new(9, "∠", "Angle", Geometry)
            .with_meaning("Angle between two rays")
            .with_example("∠ABC = 90°")
            .with_latex("\\angle"),
        Symbol::new(10, "⊥", "Perpendicular", Geometry)
            .with_meaning("Lines meet at a right angle")
            .with_example("AB ⊥ CD")
            .with_latex("\\perp"),
        Symbol::new(11, "∥", "Parallel", Geometry)
            .with_meaning("Lines never meet")
            .with_example("AB ∥ CD")
            .with_latex("\\parallel"),
        Symbol::new(12, "∫", "Integral", Calculus)
            .with_meaning("Area under a curve, antiderivative")
            .with_example("∫ x dx = x²/2 + C")
            .with_latex("\\int"),
        Symbol::new(13, "∂", "Partial derivative", Calculus)
            .with_meaning("Derivative with respect to one variable")
            .with_example("∂f/∂x")
            .with_latex("\\partial"),
        Symbol::new(14, "∑", "Summation", Calculus)
            .with_meaning("Sum of a sequence of terms")
            .with_example("∑ i = n(n+1)/2")
            .with_latex("\\sum"),
        Symbol::new(15, "lim", "Limit", Calculus)
            .with_meaning("Value approached as the input approaches a point")
            .with_example("lim x→0 sin(x)/x = 1")
            .with_latex("\\lim"),
        Symbol::new(16, "∞", "Infinity", Calculus)
            .with_meaning("Unbounded quantity")
            .with_example("lim x→∞ 1/x = 0")
            .with_latex("\\infty"),
        Symbol::new(17, "∈", "Element of", SetTheory)
            .with_meaning("Membership in a set")
            .with_example("3 ∈ ℕ")
            .with_latex("\\in"),
        Symbol::new(18, "⊆", "Subset", SetTheory)
            .with_meaning("Every element of one set is in another")
            .with_example("A ⊆ B")
            .with_latex("\\subseteq"),
        Symbol::new(19, "∪", "Union", SetTheory)
            .with_meaning("Elements in either set")
            .with_example("A ∪ B")
            .with_latex("\\cup"),
        Symbol::new(20, "∩", "Intersection", SetTheory)
            .with_meaning("Elements in both sets")
            .with_example("A ∩ B")
            .with_latex("\\cap"),
        Symbol::new(21, "∅", "Empty set", SetTheory)
            .with_meaning("Set with no elements")
            .with_example("A ∩ ∅ = ∅")
            .with_latex("\\emptyset"),
        Symbol::new(22, "∀", "For all", Logic)
            .with_meaning("Universal quantifier")
            .with_example("∀x ∈ ℝ, x² ≥ 0")
            .with_latex("\\forall"),
        Symbol::new(23, "∃", "There exists", Logic)
            .with_meaning("Existential quantifier")
            .with_example("∃x: x² = 4")
            .with_latex("\\exists"),
        Symbol::new(24, "⇒", "Implies", Logic)
            .with_meaning("Logical implication")
            .with_example("x = 2 ⇒ x² = 4")
            .with_latex("\\Rightarrow"),
        Symbol::new(25, "¬", "Not", Logic)
            .with_meaning("Logical negation")
            .with_example("¬(p ∧ q)")
            .with_latex("\\neg"),
        Symbol::new(26, "det", "Determinant", LinearAlgebra)
            .with_meaning("Scalar describing a square matrix")
            .with_example("det(A) = ad − bc")
            .with_latex("\\det"),
        Symbol::new(27, "Aᵀ", "Transpose", LinearAlgebra)
            .with_meaning("Matrix with rows and columns swapped")
            .with_example("(Aᵀ)ᵀ = A")
            .with_latex("A^{T}"),
        Symbol::new(28, "⊗", "Tensor product", LinearAlgebra)
            .with_meaning("Product of vector spaces")
            .with_example("V ⊗ W")
            .with_latex("\\otimes"),
        Symbol::new(29, "P(A)", "Probability", Probability)
            .with_meaning("Probability of event A")
            .with_example("P(heads) = 0.5")
            .with_latex("P(A)"),
        Symbol::new(30, "E[X]", "Expected value", Probability)
            .with_meaning("Mean of a random variable")
            .with_example("E[X] = ∑ x·P(x)")
            .with_latex("\\mathbb{E}[X]"),
        Symbol::new(31, "σ", "Sigma", Greek)
            .with_meaning("Standard deviation")
            .with_example("σ² is the variance")
            .with_latex("\\sigma"),
        Symbol::new(32, "π", "Pi", Greek)
            .with_meaning("Ratio of circumference to diameter")
            .with_example("π ≈ 3.14159")
            .with_latex("\\pi"),
        Symbol::new(33, "θ", "Theta", Greek)
            .with_meaning("Common name for an angle")
            .with_example("sin θ")
            .with_latex("\\theta"),
        Symbol::new(34, "Δ", "Delta", Greek)
            .with_meaning("Change in a quantity")
            .with_example("Δx = x₂ − x₁")
            .with_latex("\\Delta"),
    ]
}
