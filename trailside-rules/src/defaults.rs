use trailside_core::Rule;

const DEFAULT_RULES: [(&str, &str, &str); 14] = [
    (
        "fitness_level=low",
        "max_difficulty=easy; max_elevation=600",
        "Low fitness keeps to easy trails with modest climbs",
    ),
    (
        "experience_level=beginner",
        "max_difficulty=easy; avoid_risky=true; show_safety_warnings=true",
        "Beginners stay on easy, low-risk trails",
    ),
    (
        "experience_level=intermediate",
        "max_difficulty=7.5",
        "Intermediate hikers skip the hardest alpine routes",
    ),
    (
        "experience_level=expert AND fitness_level=high",
        "min_difficulty=medium",
        "Fit experts are offered a challenge",
    ),
    (
        "fear_of_heights=true",
        "avoid_risky=true; show_safety_warnings=true",
        "Height aversion avoids exposed trails",
    ),
    (
        "weather=rainy",
        "avoid_risky=true; max_elevation=1200",
        "Rain keeps hikers off exposed high ground",
    ),
    (
        "weather=snowy",
        "avoid_risky=true; max_difficulty=medium; show_safety_warnings=true",
        "Snow calls for moderate, low-risk trails",
    ),
    (
        "weather=stormy",
        "avoid_risky=true; max_elevation=800; show_safety_warnings=true",
        "Storms keep hikers low and sheltered",
    ),
    (
        "season=winter",
        "max_elevation=1500; show_safety_warnings=true",
        "Winter limits altitude",
    ),
    (
        "time_available<=90",
        "max_distance=6",
        "Short outings keep distances short",
    ),
    (
        "performance.persistence_score>=0.8 AND fitness_level=high AND time_available>=180",
        "min_distance=8",
        "Persistent, fit hikers get longer routes",
    ),
    (
        "device=mobile",
        "display_mode=compact; max_trails=10; hide_images=true",
        "Phones get a compact list",
    ),
    (
        "archetype=family",
        "max_difficulty=medium; avoid_risky=true",
        "Family outings stay moderate and safe",
    ),
    (
        "archetype=elevation_seeker AND fitness_level=high",
        "min_elevation=500",
        "Fit elevation seekers want real climbs",
    ),
];

/// Built-in adaptation rules used when no rule source is configured.
pub fn default_rules() -> Vec<Rule> {
    DEFAULT_RULES
        .iter()
        .map(|(condition, adaptation, description)| {
            Rule::new(*condition, *adaptation, *description)
        })
        .collect()
}
