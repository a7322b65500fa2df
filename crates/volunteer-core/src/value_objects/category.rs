//! Default event imagery derived from the event category

const IMAGE_BASE_URL: &str = "https://source.unsplash.com/random/800x600/?";

const FALLBACK_TOPIC: &str = "volunteer,charity";

const CATEGORY_TOPICS: &[(&str, &str)] = &[
    ("education", "education,teaching,school"),
    ("health", "health,medical,healthcare"),
    ("environment", "environment,nature,conservation"),
    ("community", "community,charity,neighborhood"),
    ("cultural", "cultural,arts,heritage"),
    ("sports", "sports,athletics,fitness"),
    ("tech", "technology,coding,computer"),
    ("fundraising", "fundraising,charity,donation"),
    ("other", "volunteer,helping,community"),
];

/// Image URL used when an event is created or recategorized without an
/// explicit image. Matching is case-insensitive; unknown categories get a
/// generic volunteering topic.
pub fn default_image_for_category(category: &str) -> String {
    let key = category.trim().to_lowercase();
    let topic = CATEGORY_TOPICS
        .iter()
        .find(|(name, _)| *name == key)
        .map_or(FALLBACK_TOPIC, |(_, topic)| topic);
    format!("{IMAGE_BASE_URL}{topic}")
}
