//! Built-in resource tables
//!
//! GeoGebra is listed both as a visualization site and as an installable
//! application under the same id; the cached service keeps one entry.

use super::core::ResourceCatalog;
use super::types::{Resource, ResourceTable};

impl ResourceCatalog {
    pub(crate) fn register_tool_table(&mut self) {
        self.add_table(ResourceTable::new("tools").with_resources(vec![
            Resource::new(101, "Wolfram Alpha", "https://www.wolframalpha.com", "Computation")
                .with_description("Computational knowledge engine with symbolic algebra and step-by-step calculus")
                .with_rating(4.9),
            Resource::new(102, "Symbolab", "https://www.symbolab.com", "Computation")
                .with_description("Step-by-step solver for algebra, trigonometry and calculus")
                .with_rating(4.6),
            Resource::new(103, "Overleaf", "https://www.overleaf.com", "Typesetting")
                .with_description("Collaborative LaTeX editor for research papers")
                .with_rating(4.8),
            Resource::new(104, "Detexify", "https://detexify.kirelabs.org", "Typesetting")
                .with_description("Draw a symbol to find its LaTeX command")
                .with_rating(4.5),
            Resource::new(105, "OEIS", "https://oeis.org", "Reference")
                .with_description("On-Line Encyclopedia of Integer Sequences for research")
                .with_rating(4.7),
            Resource::new(106, "Calculator Soup", "https://www.calculatorsoup.com", "Computation")
                .with_description("Basic arithmetic, fraction and unit calculators")
                .with_rating(4.1),
        ]));
    }

    pub(crate) fn register_learning_table(&mut self) {
        self.add_table(ResourceTable::new("learning").with_resources(vec![
            Resource::new(201, "Khan Academy", "https://www.khanacademy.org", "Courses")
                .with_description("Free practice from elementary arithmetic to college calculus")
                .with_rating(4.8),
            Resource::new(202, "Brilliant", "https://brilliant.org", "Courses")
                .with_description("Interactive problem solving in algebra, geometry and probability")
                .with_rating(4.6),
            Resource::new(203, "MIT OpenCourseWare", "https://ocw.mit.edu", "Courses")
                .with_description("University lectures on linear algebra, differential equations and analysis")
                .with_rating(4.9),
            Resource::new(204, "Paul's Online Math Notes", "https://tutorial.math.lamar.edu", "Notes")
                .with_description("Class notes and worked examples for calculus and differential equations")
                .with_rating(4.7),
            Resource::new(205, "Art of Problem Solving", "https://artofproblemsolving.com", "Competition")
                .with_description("Olympiad preparation, proof techniques and community forums")
                .with_rating(4.6),
            Resource::new(206, "Math is Fun", "https://www.mathsisfun.com", "Notes")
                .with_description("Basic explanations of numbers, fractions and elementary geometry")
                .with_rating(4.3),
            Resource::new(207, "arXiv Mathematics", "https://arxiv.org/archive/math", "Reference")
                .with_description("Preprint archive for mathematics research")
                .with_rating(4.4),
        ]));
    }

    pub(crate) fn register_visualization_table(&mut self) {
        self.add_table(ResourceTable::new("visualization").with_resources(vec![
            Resource::new(301, "GeoGebra", "https://www.geogebra.org", "Graphing")
                .with_description("Dynamic geometry and graph plotting in the browser")
                .with_rating(4.8),
            Resource::new(302, "Desmos", "https://www.desmos.com/calculator", "Graphing")
                .with_description("Graphing calculator for functions, sliders and statistics")
                .with_rating(4.9),
            Resource::new(303, "3Blue1Brown", "https://www.3blue1brown.com", "Video")
                .with_description("Animated explanations of linear algebra and calculus")
                .with_rating(4.9),
            Resource::new(304, "Math3d", "https://www.math3d.org", "Graphing")
                .with_description("Three-dimensional surfaces, vector fields and parametric curves")
                .with_rating(4.2),
        ]));
    }

    pub(crate) fn register_application_table(&mut self) {
        self.add_table(ResourceTable::new("applications").with_resources(vec![
            Resource::new(301, "GeoGebra", "https://www.geogebra.org/download", "Graphing")
                .with_description("Desktop and mobile apps for geometry, graphing and CAS")
                .with_rating(4.7),
            Resource::new(401, "SageMath", "https://www.sagemath.org", "Programming")
                .with_description("Open-source computer algebra and numerical programming system")
                .with_rating(4.5),
            Resource::new(402, "GNU Octave", "https://octave.org", "Programming")
                .with_description("Numerical computation language compatible with MATLAB")
                .with_rating(4.3),
            Resource::new(403, "Photomath", "https://photomath.com", "Mobile")
                .with_description("Scan a problem to see step-by-step basic algebra solutions")
                .with_rating(4.4),
            Resource::new(404, "Lean", "https://lean-lang.org", "Proof Assistant")
                .with_description("Interactive theorem prover for formal proof and research")
                .with_rating(4.6),
        ]));
    }
}
