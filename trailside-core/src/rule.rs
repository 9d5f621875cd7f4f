/// An adaptation rule as stored in configuration.
///
/// `condition` is a conjunction of clauses such as
/// `fitness_level=low AND time_available<=90`; `adaptation` is a list of
/// `key=value` assignments separated by `;`. Both are parsed once when a
/// rule set is loaded.
///
/// # Examples
/// ```
/// use trailside_core::Rule;
///
/// let rule = Rule::new(
///     "fitness_level=low",
///     "max_difficulty=easy",
///     "Low fitness keeps to easy trails",
/// );
/// assert_eq!(rule.adaptation, "max_difficulty=easy");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rule {
    /// Condition expression.
    #[cfg_attr(feature = "serde", serde(default))]
    pub condition: String,
    /// Adaptation assignments.
    pub adaptation: String,
    /// Human-readable description.
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}

impl Rule {
    /// Construct a rule from its three parts.
    pub fn new(
        condition: impl Into<String>,
        adaptation: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            condition: condition.into(),
            adaptation: adaptation.into(),
            description: description.into(),
        }
    }
}
