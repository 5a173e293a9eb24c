// Catalogue of commonly crawled arXiv category codes.

/// (code, human-readable name) for the categories people usually ask for.
pub const COMMON_CATEGORIES: &[(&str, &str)] = &[
    ("cs.AI", "Artificial Intelligence"),
    ("cs.CV", "Computer Vision and Pattern Recognition"),
    ("cs.LG", "Machine Learning"),
    ("cs.CL", "Computation and Language"),
    ("cs.NE", "Neural and Evolutionary Computing"),
    ("cs.RO", "Robotics"),
    ("cs.SE", "Software Engineering"),
    ("cs.IR", "Information Retrieval"),
    ("cs.CC", "Computational Complexity"),
    ("cs.DS", "Data Structures and Algorithms"),
    ("math.ST", "Statistics Theory"),
    ("stat.ML", "Machine Learning (Statistics)"),
    ("q-bio.QM", "Quantitative Methods"),
    ("physics.bio-ph", "Biological Physics"),
];

/// Human-readable name for a category, falling back to the code itself.
pub fn category_name(code: &str) -> &str {
    COMMON_CATEGORIES
        .iter()
        .find(|(c, _)| *c == code)
        .map_or(code, |(_, name)| *name)
}
