/// Query interpretation
///
/// Everything that turns raw query text into search inputs: language tag,
/// terms, date range and search intent. No I/O happens here.

pub mod dates;
pub mod intent;
pub mod language;
pub mod terms;

pub use dates::{DateExpressionParser, DateRange};
pub use intent::{SearchMode, TaskIntent};
pub use language::{LanguageDetector, LanguageTag};
pub use terms::TermExtractor;
