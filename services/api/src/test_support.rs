use productivity_coach::recommendations::Recommendations;

/// True when either tier holds the tip with this title.
pub(crate) fn has_tip(recommendations: &Recommendations, title: &str) -> bool {
    let prefix = format!("{title}: ");
    recommendations
        .basic
        .iter()
        .chain(&recommendations.premium)
        .any(|entry| entry.starts_with(&prefix))
}
