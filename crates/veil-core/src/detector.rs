use crate::types::Shape;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email shape regex is valid"));

static PHONE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\d\s\-+()]+$").expect("phone shape regex is valid"));

/// Whole-string shape matcher – all detectors must implement this
pub trait ShapeDetector: Send + Sync {
    fn shape(&self) -> Shape;

    /// True when the entire text has this shape (not a substring search)
    fn matches(&self, text: &str) -> bool;

    /// Optional second check after the shape matched
    fn validate(&self, _candidate: &str) -> bool {
        true // Default: shape alone is enough
    }
}

pub struct EmailShape;

impl ShapeDetector for EmailShape {
    fn shape(&self) -> Shape {
        Shape::Email
    }

    fn matches(&self, text: &str) -> bool {
        EMAIL_SHAPE.is_match(text)
    }
}

pub struct PhoneShape;

impl ShapeDetector for PhoneShape {
    fn shape(&self) -> Shape {
        Shape::Phone
    }

    fn matches(&self, text: &str) -> bool {
        PHONE_SHAPE.is_match(text)
    }

    /// Punctuation-only strings such as "--" fit the character class
    fn validate(&self, candidate: &str) -> bool {
        candidate.chars().any(|c| c.is_ascii_digit())
    }
}

/// Ordered set of detectors; the first one that accepts the text wins
pub struct Classifier {
    detectors: Vec<Box<dyn ShapeDetector>>,
}

impl Classifier {
    pub fn new(detectors: Vec<Box<dyn ShapeDetector>>) -> Self {
        Self { detectors }
    }

    pub fn classify(&self, text: &str) -> Option<Shape> {
        self.detectors
            .iter()
            .find(|d| d.matches(text) && d.validate(text))
            .map(|d| d.shape())
    }
}

impl Default for Classifier {
    /// Email is checked before phone
    fn default() -> Self {
        Self::new(vec![Box::new(EmailShape), Box::new(PhoneShape)])
    }
}
